//! Sobolev smoothness estimate from the transition operator spectrum.

use nalgebra::Schur;
use tracing::{debug, trace};

use crate::error::SobolevError;
use crate::sum_rule::sum_rule_order;
use crate::transition::transition_operator;

const IMAGINARY_TOLERANCE: f64 = 1e-6;
const EIGENVALUE_TOLERANCE: f64 = 1e-6;
const SCHUR_MAX_ITERATIONS: usize = 100_000;

/// Result of [`estimate`].
#[derive(Clone, Debug, PartialEq)]
pub struct SmoothnessEstimate {
    /// Sobolev exponent `-log2(ρ) / 2`.
    pub exponent: f64,
    /// Sum-rule order of the mask.
    pub sum_rule_order: u32,
    /// The `2 × order` eigenvalues following the top one, ascending.
    pub leading_eigenvalues: Vec<f64>,
}

/// Estimates the Sobolev smoothness exponent of the refinable function
/// with mask `mask`.
///
/// The mask must sum to 2 and satisfy the sum rule of order 1.
///
/// # Errors
///
/// See [`SobolevError`]; every failure mode has its own variant.
///
/// # Example
///
/// ```
/// let haar = wavelift_sobolev::smoothness(&[1.0, 1.0]).unwrap();
/// assert!((haar - 0.5).abs() < 1e-9);
/// ```
pub fn smoothness(mask: &[f64]) -> Result<f64, SobolevError> {
    estimate(mask).map(|e| e.exponent)
}

/// Like [`smoothness`], keeping the intermediate quantities.
pub fn estimate(mask: &[f64]) -> Result<SmoothnessEstimate, SobolevError> {
    if mask.is_empty() {
        return Err(SobolevError::EmptyMask);
    }
    if let Some((index, &value)) = mask.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(SobolevError::NonFiniteMask { index, value });
    }

    let rules = sum_rule_order(mask)?;
    let order = rules.order as usize;
    let count = 2 * order;

    let operator = transition_operator(mask);
    let dim = operator.nrows();
    if dim < count + 1 {
        return Err(SobolevError::TooFewEigenvalues {
            required: count + 1,
            found: dim,
        });
    }

    let schur = Schur::try_new(operator, f64::EPSILON, SCHUR_MAX_ITERATIONS)
        .ok_or(SobolevError::EigenDecomposition { dim })?;
    let mut eigenvalues: Vec<f64> = schur
        .complex_eigenvalues()
        .iter()
        .map(|c| if c.im.abs() > IMAGINARY_TOLERANCE { 0.0 } else { c.re })
        .collect();
    eigenvalues.sort_by(|a, b| b.abs().total_cmp(&a.abs()));
    trace!(?eigenvalues, "transition operator spectrum");

    // The top eigenvalue is always 1.
    let mut leading: Vec<f64> = eigenvalues[1..=count].to_vec();
    leading.sort_by(f64::total_cmp);

    // 0, 1/2^(2·order-1), ..., 1/4, 1/2
    let reference = (0..count).map(|j| if j == 0 { 0.0 } else { 0.5f64.powi((count - j) as i32) });
    let deviates: Vec<bool> = leading
        .iter()
        .zip(reference)
        .enumerate()
        .map(|(j, (e, r))| (e - r).abs() > EIGENVALUE_TOLERANCE.min(0.5f64.powi(j as i32 + 3)))
        .collect();

    let first = deviates.iter().position(|&d| d).unwrap_or(0);
    let last = deviates.iter().rposition(|&d| d).unwrap_or(0);
    let radius = leading[first].abs().max(leading[last].abs());
    let exponent = -radius.log2() / 2.0;

    debug!(
        order = rules.order,
        radius, exponent, "estimated Sobolev smoothness"
    );

    Ok(SmoothnessEstimate {
        exponent,
        sum_rule_order: rules.order,
        leading_eigenvalues: leading,
    })
}
