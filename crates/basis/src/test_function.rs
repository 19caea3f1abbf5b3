//! Analytic test signals for compression and smoothing experiments.

use serde::Serialize;

use crate::error::BasisError;

/// Underlying smooth or singular shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Sum of four Gaussian bumps.
    Gaussians,
    /// `9x(exp(-|x|^(1/2) / 9) - 1)`, a cusp at 0.
    Cusp,
    /// `97(x - 1/2) tanh(|x - 1/2|^(1/2) / 97)`, a cusp at 1/2.
    TanhCusp,
    /// `exp(-|x|)`, a kink at 0.
    Kink,
    /// `|2x - 1|^(1/2)`, a square-root singularity at 1/2.
    SquareRoot,
}

/// One of the ten test signals: five shapes, each optionally noisy.
///
/// Index `i` selects shape `i % 5`; indices 5 to 9 add deterministic noise
/// of amplitude 1e-2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TestFunction {
    shape: Shape,
    noisy: bool,
}

const SHAPES: [Shape; 5] = [
    Shape::Gaussians,
    Shape::Cusp,
    Shape::TanhCusp,
    Shape::Kink,
    Shape::SquareRoot,
];

// The noise hash constant is single precision.
const NOISE_FREQUENCY: f32 = 753.545_312_3;

impl TestFunction {
    /// Number of test functions.
    pub const COUNT: usize = 10;

    /// Creates a test function.
    pub fn new(shape: Shape, noisy: bool) -> Self {
        Self { shape, noisy }
    }

    /// Selects a test function by index in `0..10`.
    pub fn from_index(index: usize) -> Result<Self, BasisError> {
        if index >= Self::COUNT {
            return Err(BasisError::UnknownTestFunction(index));
        }
        Ok(Self::new(SHAPES[index % SHAPES.len()], index >= SHAPES.len()))
    }

    /// Returns the shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns `true` if noise is added.
    pub fn is_noisy(&self) -> bool {
        self.noisy
    }

    /// Evaluates the function at `x`.
    pub fn eval(&self, x: f64) -> f64 {
        let clean = match self.shape {
            Shape::Gaussians => {
                let t = 9.0 * x;
                0.75 * (-(t - 2.0).powi(2) / 4.0).exp()
                    + 0.75 * (-(t + 1.0).powi(2) / 49.0).exp()
                    + 0.5 * (-(t - 7.0).powi(2) / 4.0).exp()
                    - 0.2 * (-(t - 4.0).powi(2)).exp()
            }
            Shape::Cusp => 9.0 * x * ((-(x * x).powf(0.25) / 9.0).exp() - 1.0),
            Shape::TanhCusp => {
                let d = x - 0.5;
                97.0 * d * ((d * d).powf(0.25) / 97.0).tanh()
            }
            Shape::Kink => (-x.abs()).exp(),
            Shape::SquareRoot => (2.0 * x - 1.0).powi(2).powf(0.25),
        };
        if self.noisy { clean + noise(x) } else { clean }
    }

    /// Samples the function at `n` points spread evenly over `[-1, 1]`.
    pub fn sample(&self, n: usize) -> Vec<f64> {
        let last = n.saturating_sub(1).max(1) as f64;
        (0..n)
            .map(|i| self.eval(i as f64 / last * 2.0 - 1.0))
            .collect()
    }
}

fn noise(x: f64) -> f64 {
    let h = x.sin() * f64::from(NOISE_FREQUENCY);
    ((h - h.floor()) * 2.0 - 1.0) * 1e-2
}
