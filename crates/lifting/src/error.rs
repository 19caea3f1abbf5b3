//! Error types for the wavelift-lifting crate.

/// Error type for the fallible lookups of the wavelift-lifting crate.
///
/// The lifting primitives themselves never fail: a buffer whose length does
/// not fit the requested level is a programming error and panics.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LiftingError {
    /// Returned when a scheme name does not match any catalog entry.
    #[error("unsupported lifting scheme: {0}")]
    UnsupportedScheme(String),

    /// Returned when a boundary name is neither clamped nor cyclic.
    #[error("unsupported boundary mode: {0}")]
    UnsupportedBoundary(String),
}
