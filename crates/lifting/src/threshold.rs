//! Operations on decomposed coefficient arrays.
//!
//! After `levels` forward levels of a contiguous buffer, index `i` holds a
//! scaling coefficient when `i` is a multiple of `2^levels` and a detail
//! coefficient otherwise.

#[inline]
fn is_detail(i: usize, levels: u32) -> bool {
    i & ((1usize << levels) - 1) != 0
}

/// Zeroes every detail coefficient with magnitude below `threshold`.
///
/// Returns the number of coefficients zeroed.
pub fn compress_coefficients(values: &mut [f64], threshold: f64, levels: u32) -> usize {
    let mut zeroed = 0;
    for (i, v) in values.iter_mut().enumerate() {
        if is_detail(i, levels) && v.abs() < threshold {
            *v = 0.0;
            zeroed += 1;
        }
    }
    zeroed
}

/// Soft-thresholds every detail coefficient towards zero by `threshold`.
///
/// Coefficients within `[-threshold, threshold]` become zero; the rest lose
/// `threshold` of magnitude and keep their sign.
pub fn shrink_coefficients(values: &mut [f64], threshold: f64, levels: u32) {
    for (i, v) in values.iter_mut().enumerate() {
        if !is_detail(i, levels) {
            continue;
        }
        *v = if *v > threshold {
            *v - threshold
        } else if *v < -threshold {
            *v + threshold
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_zero_threshold_keeps_everything() {
        let mut x = vec![1.0, -0.5, 0.0, 0.25];
        assert_eq!(compress_coefficients(&mut x, 0.0, 2), 0);
        assert_eq!(x, vec![1.0, -0.5, 0.0, 0.25]);
    }

    #[test]
    fn compress_infinite_threshold_keeps_only_scaling() {
        let mut x = vec![1.0, -0.5, 3.0, 0.25, 2.0, 7.0, -1.0, 4.0];
        assert_eq!(compress_coefficients(&mut x, f64::INFINITY, 2), 6);
        assert_eq!(x, vec![1.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn compress_counts_only_small_details() {
        let mut x = vec![0.01, 0.01, 0.5, -0.02];
        assert_eq!(compress_coefficients(&mut x, 0.1, 1), 1);
        assert_eq!(x, vec![0.01, 0.0, 0.5, -0.02]);
    }

    #[test]
    fn shrink_is_soft_threshold() {
        let mut x = vec![5.0, 0.75, 9.0, -0.25, 1.0, -2.0];
        shrink_coefficients(&mut x, 0.5, 1);
        assert_eq!(x, vec![5.0, 0.25, 9.0, 0.0, 1.0, -1.5]);
    }

    #[test]
    fn shrink_zero_threshold_is_identity_on_details() {
        let mut x = vec![1.0, -0.3, 2.0, 0.7];
        shrink_coefficients(&mut x, 0.0, 1);
        assert_eq!(x, vec![1.0, -0.3, 2.0, 0.7]);
    }
}
