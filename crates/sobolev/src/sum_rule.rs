//! Sum-rule order of a refinement mask with dilation 2.
//!
//! With `P = p / 2`, the mask satisfies the sum rules of order `k` when the
//! moments of the even and odd sub-masks agree up to degree `k - 1`. The
//! check is recursive: the moments `y[s]` of the refinable function are
//! built from lower ones, and order `s + 1` holds while the odd residual
//! vanishes.

use crate::error::SobolevError;

const DILATION: f64 = 2.0;
const PARTITION_TOLERANCE: f64 = 1e-4;
const ORDER_ONE_TOLERANCE: f64 = 1e-8;
const HIGHER_ORDER_TOLERANCE: f64 = 1e-6;
/// Orders checked beyond the first.
const MAX_EXTRA_ORDERS: usize = 10;

/// Outcome of [`sum_rule_order`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SumRules {
    /// Highest order satisfied, at least 1.
    pub order: u32,
    /// Sum of the halved mask.
    pub p0: f64,
}

/// Determines the sum-rule order of `mask`.
///
/// # Errors
///
/// [`SobolevError::PartitionOfUnity`] when `Σ mask / 2` is not within 1e-4
/// of one, [`SobolevError::SumRuleOrderOne`] when the alternating sum is not
/// within 1e-8 of zero.
pub fn sum_rule_order(mask: &[f64]) -> Result<SumRules, SobolevError> {
    let halved: Vec<f64> = mask.iter().map(|v| v / DILATION).collect();
    let signs: [f64; 2] = [1.0, -1.0];

    let pp: [f64; 2] = signs.map(|e| {
        halved
            .iter()
            .enumerate()
            .map(|(j, p)| e.powi(j as i32) * p)
            .sum()
    });

    let p0 = pp[0];
    if (p0 - 1.0).abs() > PARTITION_TOLERANCE {
        return Err(SobolevError::PartitionOfUnity { sum: p0 });
    }
    if pp[1].abs() > ORDER_ONE_TOLERANCE {
        return Err(SobolevError::SumRuleOrderOne {
            alternating_sum: pp[1],
        });
    }

    // dp[i][k] = Σ_j j^i · e_k^j · P[j]
    let dp: Vec<[f64; 2]> = (0..=MAX_EXTRA_ORDERS)
        .map(|i| {
            signs.map(|e| {
                halved
                    .iter()
                    .enumerate()
                    .map(|(j, p)| (j as f64).powi(i as i32) * e.powi(j as i32) * p)
                    .sum()
            })
        })
        .collect();

    let mut y = vec![0.0; MAX_EXTRA_ORDERS + 1];
    y[0] = 1.0;
    let mut order = 1;

    for s in 1..=MAX_EXTRA_ORDERS {
        let mut lower = [0.0; 2];
        for (k, acc) in lower.iter_mut().enumerate() {
            *acc = (0..s)
                .map(|g| {
                    binomial(s, g)
                        * DILATION.powi(g as i32)
                        * (-1f64).powi((s - g) as i32)
                        * y[g]
                        * dp[s - g][k]
                })
                .sum();
        }
        let scale = DILATION.powi(s as i32);
        y[s] = lower[0] / (1.0 - scale * p0);
        let residual = lower[1] + scale * y[s] * pp[1];
        if residual.abs() > HIGHER_ORDER_TOLERANCE {
            break;
        }
        order += 1;
    }

    Ok(SumRules { order, p0 })
}

fn binomial(n: usize, k: usize) -> f64 {
    (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binomials() {
        assert_eq!(binomial(5, 0), 1.0);
        assert_eq!(binomial(5, 2), 10.0);
        assert_eq!(binomial(10, 5), 252.0);
    }

    #[test]
    fn haar_has_order_one() {
        let rules = sum_rule_order(&[1.0, 1.0]).unwrap();
        assert_eq!(rules.order, 1);
        assert_eq!(rules.p0, 1.0);
    }

    #[test]
    fn hat_function_has_order_two() {
        assert_eq!(sum_rule_order(&[0.5, 1.0, 0.5]).unwrap().order, 2);
    }

    #[test]
    fn cubic_bspline_has_order_four() {
        let mask = [0.125, 0.5, 0.75, 0.5, 0.125];
        assert_eq!(sum_rule_order(&mask).unwrap().order, 4);
    }

    #[test]
    fn four_point_has_order_four() {
        let mask = [-0.0625, 0.0, 0.5625, 1.0, 0.5625, 0.0, -0.0625];
        assert_eq!(sum_rule_order(&mask).unwrap().order, 4);
    }

    #[test]
    fn partition_of_unity_failure() {
        assert!(matches!(
            sum_rule_order(&[1.0]),
            Err(SobolevError::PartitionOfUnity { .. })
        ));
    }

    #[test]
    fn order_one_failure() {
        assert!(matches!(
            sum_rule_order(&[2.0]),
            Err(SobolevError::SumRuleOrderOne { .. })
        ));
        assert!(matches!(
            sum_rule_order(&[1.5, 0.5]),
            Err(SobolevError::SumRuleOrderOne { .. })
        ));
    }
}
