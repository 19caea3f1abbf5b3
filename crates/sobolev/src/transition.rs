//! Transition operator of a refinement mask.

use nalgebra::DMatrix;

/// Builds the `(2N+1)×(2N+1)` transition operator of `mask`, `N = len - 1`.
///
/// Row `i` holds the autocorrelation `a` of the mask shifted by `2i`:
/// `T[i][j] = a[2i - j] / 2` where that index lies in `0..=2N`.
///
/// # Panics
///
/// Panics if `mask` is empty.
pub fn transition_operator(mask: &[f64]) -> DMatrix<f64> {
    assert!(!mask.is_empty(), "transition operator of an empty mask");
    let n = mask.len() - 1;
    let a = autocorrelation(mask);
    let dim = 2 * n + 1;

    DMatrix::from_fn(dim, dim, |i, j| {
        let k = 2 * i as i64 - j as i64;
        if (0..=(2 * n) as i64).contains(&k) {
            a[k as usize] / 2.0
        } else {
            0.0
        }
    })
}

/// `a[j] = Σ_l p[N + l - j] · p[l]` for `j` in `0..=2N`.
fn autocorrelation(p: &[f64]) -> Vec<f64> {
    let n = p.len() - 1;
    (0..=2 * n)
        .map(|j| {
            let lo = j.saturating_sub(n);
            let hi = n.min(j);
            (lo..=hi).map(|l| p[n + l - j] * p[l]).sum()
        })
        .collect()
}
