//! Basis functions and multiresolution operations on them.

use serde::Serialize;
use tracing::debug;
use wavelift_lifting::{Boundary, Layout, Program, compress_coefficients, shrink_coefficients};

use crate::error::BasisError;
use crate::test_function::TestFunction;

/// Largest supported level count (`2^24` samples).
pub const MAX_LEVELS: u32 = 24;

/// Which basis function to synthesize.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BasisFunction {
    /// Primal scaling function.
    Scaling,
    /// Primal wavelet.
    Wavelet,
    /// Dual scaling function.
    DualScaling,
    /// Dual wavelet.
    DualWavelet,
}

impl BasisFunction {
    /// Every basis function, in selector order.
    pub const ALL: [BasisFunction; 4] = [
        BasisFunction::Scaling,
        BasisFunction::Wavelet,
        BasisFunction::DualScaling,
        BasisFunction::DualWavelet,
    ];

    fn is_dual(&self) -> bool {
        matches!(self, Self::DualScaling | Self::DualWavelet)
    }

    fn is_wavelet(&self) -> bool {
        matches!(self, Self::Wavelet | Self::DualWavelet)
    }
}

/// Distance between a signal and its processed version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct ErrorMetrics {
    /// Largest absolute difference.
    pub l_inf: f64,
    /// Euclidean norm of the difference.
    pub l2: f64,
}

impl ErrorMetrics {
    /// Compares `values` against `reference` sample by sample.
    pub fn between(reference: &[f64], values: &[f64]) -> Self {
        let (l_inf, sq) = reference
            .iter()
            .zip(values)
            .map(|(a, b)| (a - b).abs())
            .fold((0.0f64, 0.0f64), |(m, s), d| (m.max(d), s + d * d));
        Self { l_inf, l2: sq.sqrt() }
    }
}

/// Sum of all values.
pub fn volume(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// A level count `L` and `2^L` samples on a clamped, contiguous buffer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Basis {
    levels: u32,
    #[serde(skip)]
    boundary: Boundary,
    values: Vec<f64>,
}

impl Basis {
    /// Wraps existing samples; `values.len()` must be `2^levels`.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::TooManyLevels`] above [`MAX_LEVELS`].
    ///
    /// # Panics
    ///
    /// Panics if the length does not match.
    pub fn from_values(levels: u32, values: Vec<f64>) -> Result<Self, BasisError> {
        check_levels(levels)?;
        assert_eq!(
            values.len(),
            1usize << levels,
            "basis over {levels} levels needs 2^{levels} samples"
        );
        Ok(Self {
            levels,
            boundary: Boundary::default(),
            values,
        })
    }

    /// Sets the boundary mode used by later transforms of this basis.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Synthesizes a basis function by running the inverse transform on an
    /// impulse from level `levels - width` down to 0.
    ///
    /// Scaling functions start from an impulse at `n/2`, wavelets from one
    /// at `n/2 + 2^(levels - width)`. Dual functions use the biorthogonal
    /// inverse instead of the inverse.
    ///
    /// # Errors
    ///
    /// [`BasisError::LevelsBelowWidth`] when `levels` is below the scheme's
    /// width, [`BasisError::TooManyLevels`] above [`MAX_LEVELS`].
    pub fn function(
        program: Program<'_>,
        levels: u32,
        kind: BasisFunction,
        boundary: Boundary,
    ) -> Result<Self, BasisError> {
        check_levels(levels)?;
        let width = program.width();
        if levels < width {
            return Err(BasisError::LevelsBelowWidth {
                scheme: program.scheme().to_string(),
                width,
                levels,
            });
        }

        let n = 1usize << levels;
        let top = levels - width;
        let mut values = vec![0.0; n];
        let position = if kind.is_wavelet() { n / 2 + (1 << top) } else { n / 2 };
        values[position] = 1.0;

        let layout = Layout::new(n).with_boundary(boundary);
        for level in (0..=top).rev() {
            if kind.is_dual() {
                program.biorthogonal_inverse(&mut values, layout, level);
            } else {
                program.inverse(&mut values, layout, level);
            }
        }
        debug!(scheme = %program.scheme(), levels, ?kind, ?boundary, "synthesized basis function");

        Ok(Self {
            levels,
            boundary,
            values,
        })
    }

    /// Samples a test function on `2^levels` points.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::TooManyLevels`] above [`MAX_LEVELS`].
    pub fn test_function(levels: u32, function: TestFunction) -> Result<Self, BasisError> {
        check_levels(levels)?;
        Ok(Self {
            levels,
            boundary: Boundary::default(),
            values: function.sample(1 << levels),
        })
    }

    /// Returns the level count.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the sample vector is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the samples.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consumes the basis, returning its samples.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Sum of the samples.
    pub fn volume(&self) -> f64 {
        volume(&self.values)
    }

    /// Returns the boundary mode.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    fn layout(&self) -> Layout {
        Layout::new(self.values.len()).with_boundary(self.boundary)
    }

    /// Projection onto the scaling space at `level`: decompose
    /// `levels - level` times, drop every detail and reconstruct.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::LevelOutOfRange`] when `level > levels`.
    pub fn spline_component(
        &self,
        program: Program<'_>,
        level: u32,
    ) -> Result<Vec<f64>, BasisError> {
        if level > self.levels {
            return Err(BasisError::LevelOutOfRange {
                level,
                max: self.levels,
            });
        }
        let depth = self.levels - level;
        let layout = self.layout();
        let mut values = self.values.clone();
        program.forward_levels(&mut values, layout, depth);
        compress_coefficients(&mut values, f64::INFINITY, depth);
        program.inverse_levels(&mut values, layout, depth);
        Ok(values)
    }

    /// Projection onto the wavelet space between `level` and `level + 1`:
    /// decompose `levels - level` times, keep only the coarsest detail band
    /// and reconstruct.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::LevelOutOfRange`] unless `level < levels`.
    pub fn wavelet_component(
        &self,
        program: Program<'_>,
        level: u32,
    ) -> Result<Vec<f64>, BasisError> {
        if level >= self.levels {
            return Err(BasisError::LevelOutOfRange {
                level,
                max: self.levels.saturating_sub(1),
            });
        }
        let depth = self.levels - level;
        let layout = self.layout();
        let mut values = self.values.clone();
        program.forward_levels(&mut values, layout, depth);

        let scaling = (1usize << depth) - 1;
        let finer = (1usize << (depth - 1)) - 1;
        for (i, v) in values.iter_mut().enumerate() {
            if i & scaling == 0 || i & finer != 0 {
                *v = 0.0;
            }
        }

        program.inverse_levels(&mut values, layout, depth);
        Ok(values)
    }

    /// Hard-thresholds the full decomposition in place.
    ///
    /// Returns the fraction of samples zeroed, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`BasisError::InvalidThreshold`] for a NaN or negative threshold.
    pub fn compress(&mut self, program: Program<'_>, threshold: f64) -> Result<f64, BasisError> {
        check_threshold(threshold)?;
        let layout = self.layout();
        program.forward_levels(&mut self.values, layout, self.levels);
        let zeroed = compress_coefficients(&mut self.values, threshold, self.levels);
        program.inverse_levels(&mut self.values, layout, self.levels);

        let ratio = zeroed as f64 / self.values.len() as f64;
        debug!(threshold, zeroed, ratio, "compressed basis");
        Ok(ratio)
    }

    /// Soft-thresholds the details of the first `smooth_level` levels in
    /// place.
    ///
    /// # Errors
    ///
    /// [`BasisError::InvalidThreshold`] for a NaN or negative threshold,
    /// [`BasisError::LevelOutOfRange`] when `smooth_level > levels`.
    pub fn smooth(
        &mut self,
        program: Program<'_>,
        threshold: f64,
        smooth_level: u32,
    ) -> Result<(), BasisError> {
        check_threshold(threshold)?;
        if smooth_level > self.levels {
            return Err(BasisError::LevelOutOfRange {
                level: smooth_level,
                max: self.levels,
            });
        }
        let layout = self.layout();
        program.forward_levels(&mut self.values, layout, smooth_level);
        shrink_coefficients(&mut self.values, threshold, smooth_level);
        program.inverse_levels(&mut self.values, layout, smooth_level);
        Ok(())
    }
}

fn check_levels(levels: u32) -> Result<(), BasisError> {
    if levels > MAX_LEVELS {
        return Err(BasisError::TooManyLevels {
            levels,
            max: MAX_LEVELS,
        });
    }
    Ok(())
}

fn check_threshold(threshold: f64) -> Result<(), BasisError> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(BasisError::InvalidThreshold(threshold));
    }
    Ok(())
}
