//! Error types for the wavelift-sobolev crate.

/// Error type for the Sobolev smoothness estimate.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SobolevError {
    /// Returned when the mask has no coefficients.
    #[error("mask is empty")]
    EmptyMask,

    /// Returned when a mask coefficient is NaN or infinite.
    #[error("mask coefficient {index} is not finite: {value}")]
    NonFiniteMask {
        /// Position of the coefficient.
        index: usize,
        /// Offending value.
        value: f64,
    },

    /// Returned when the halved mask does not sum to one.
    #[error("mask does not satisfy the partition of unity: sum/2 = {sum}")]
    PartitionOfUnity {
        /// Sum of the halved mask.
        sum: f64,
    },

    /// Returned when the mask does not satisfy the sum rule of order 1.
    #[error("mask does not satisfy the sum rule of order 1: alternating sum/2 = {alternating_sum}")]
    SumRuleOrderOne {
        /// Alternating sum of the halved mask.
        alternating_sum: f64,
    },

    /// Returned when the transition operator is too small for the sum-rule order.
    #[error("transition operator has {found} eigenvalues, at least {required} needed")]
    TooFewEigenvalues {
        /// Eigenvalues required (2 × order + 1).
        required: usize,
        /// Eigenvalues available.
        found: usize,
    },

    /// Returned when the Schur decomposition does not converge.
    #[error("eigen-decomposition of the {dim}×{dim} transition operator did not converge")]
    EigenDecomposition {
        /// Operator dimension.
        dim: usize,
    },
}
