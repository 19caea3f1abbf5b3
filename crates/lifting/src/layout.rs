//! Strided buffer addressing and boundary handling.

use crate::error::LiftingError;

/// How stencil taps that fall outside the buffer are resolved.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Boundary {
    /// Out-of-range taps replicate the nearest in-range sample.
    #[default]
    Clamped,
    /// Out-of-range taps wrap around; the buffer is one period of a signal.
    Cyclic,
}

impl Boundary {
    /// Parses a boundary mode from a case-insensitive name.
    ///
    /// # Errors
    ///
    /// Returns [`LiftingError::UnsupportedBoundary`] if the name is not recognized.
    pub fn from_name(name: &str) -> Result<Self, LiftingError> {
        match name.to_lowercase().as_str() {
            "clamped" | "non-cyclic" => Ok(Self::Clamped),
            "cyclic" | "periodic" => Ok(Self::Cyclic),
            _ => Err(LiftingError::UnsupportedBoundary(name.to_string())),
        }
    }
}

/// Addressing of a logical signal of `len` samples inside a backing slice.
///
/// Sample `i` lives at `samples[i * stride]`. The backing slice may be longer
/// than needed (e.g. one column of an interleaved buffer).
///
/// # Example
///
/// ```
/// use wavelift_lifting::{Boundary, Layout};
///
/// let layout = Layout::new(16).with_stride(2).with_boundary(Boundary::Cyclic);
/// assert_eq!(layout.len(), 16);
/// assert!(layout.is_cyclic());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    len: usize,
    stride: usize,
    boundary: Boundary,
}

impl Layout {
    /// Creates a contiguous, clamped layout of `len` samples.
    pub fn new(len: usize) -> Self {
        Self {
            len,
            stride: 1,
            boundary: Boundary::Clamped,
        }
    }

    /// Sets the distance between consecutive logical samples.
    ///
    /// # Panics
    ///
    /// Panics if `stride` is zero.
    pub fn with_stride(mut self, stride: usize) -> Self {
        assert!(stride > 0, "stride must be positive");
        self.stride = stride;
        self
    }

    /// Sets the boundary mode.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Returns the logical number of samples.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the layout addresses no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the stride.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the boundary mode.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Returns `true` for [`Boundary::Cyclic`].
    pub fn is_cyclic(&self) -> bool {
        self.boundary == Boundary::Cyclic
    }

    /// Index into the backing slice of logical sample `i`.
    #[inline]
    pub(crate) fn at(&self, i: usize) -> usize {
        i * self.stride
    }

    /// Number of (even, odd) sample pairs at `level`.
    #[inline]
    pub(crate) fn blocks(&self, level: u32) -> usize {
        self.len >> (level + 1)
    }

    /// Maps a possibly out-of-range block index onto `0..blocks`.
    #[inline]
    pub(crate) fn resolve(&self, block: i64, blocks: usize) -> usize {
        let blocks = blocks as i64;
        match self.boundary {
            Boundary::Cyclic => block.rem_euclid(blocks) as usize,
            Boundary::Clamped => block.clamp(0, blocks - 1) as usize,
        }
    }

    /// Asserts the preconditions shared by every primitive.
    pub(crate) fn check(&self, samples: &[f64], level: u32) {
        assert!(
            is_multiple_of_power_of_two(self.len, level + 1),
            "buffer length {} is not a multiple of 2^{}",
            self.len,
            level + 1
        );
        assert!(
            self.len == 0 || samples.len() > (self.len - 1) * self.stride,
            "backing slice of {} samples is too short for {} samples at stride {}",
            samples.len(),
            self.len,
            self.stride
        );
    }
}

/// Returns `true` if `n` is divisible by `2^exponent`.
pub fn is_multiple_of_power_of_two(n: usize, exponent: u32) -> bool {
    n & ((1usize << exponent) - 1) == 0
}
