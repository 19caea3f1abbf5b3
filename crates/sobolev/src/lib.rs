//! # wavelift-sobolev
//!
//! Sobolev smoothness of refinable functions with dilation 2.
//!
//! For a mask `p` (the refinement coefficients of a scaling function,
//! summing to 2) the estimate proceeds in three steps:
//!
//! | Step | Module | Result |
//! |------|--------|--------|
//! | Sum rules | [`sum_rule_order`] | approximation order `k`, or an error |
//! | Transition operator | [`transition_operator`] | `(2N+1)×(2N+1)` matrix from the mask autocorrelation |
//! | Spectrum | [`estimate`] | `-log2(ρ)/2`, with `ρ` the largest eigenvalue not explained by the sum rules |
//!
//! The `2k` eigenvalues following the trivial eigenvalue 1 are compared with
//! `1/2, 1/4, …`; the first and last that deviate bound the spectral radius
//! `ρ` that limits smoothness.
//!
//! ```
//! use wavelift_sobolev::smoothness;
//!
//! let hat = smoothness(&[0.5, 1.0, 0.5]).unwrap();
//! assert!((hat - 1.5).abs() < 1e-9);
//! ```

mod error;
mod estimate;
mod sum_rule;
mod transition;

pub use error::SobolevError;
pub use estimate::{SmoothnessEstimate, estimate, smoothness};
pub use sum_rule::{SumRules, sum_rule_order};
pub use transition::transition_operator;
