//! The front-end pipeline: one request in, one report out.

use serde::Serialize;
use tracing::{info, warn};
use wavelift_lifting::{Boundary, LiftingStep, Program, Scheme};

use crate::basis::{Basis, BasisFunction, ErrorMetrics, MAX_LEVELS, volume};
use crate::error::BasisError;
use crate::test_function::TestFunction;

/// Default level count of a request.
pub const DEFAULT_LEVELS: u32 = 12;

/// What to sample before any operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FunctionKind {
    /// A basis function of the selected scheme.
    Basis(BasisFunction),
    /// An analytic test signal.
    Test(TestFunction),
}

/// Multiresolution operation applied to the sampled function.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Operation {
    #[default]
    None,
    /// Hard thresholding of the full decomposition.
    Compress { threshold: f64 },
    /// Soft thresholding of the finest `level` levels.
    Smooth { threshold: f64, level: u32 },
}

/// Which component of the result to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Space {
    /// Projection onto the scaling space at a level.
    Scaling,
    /// Projection onto the wavelet space at a level.
    Wavelet,
}

/// Input of [`render`].
///
/// # Example
///
/// ```
/// use wavelift_basis::{BasisFunction, FunctionKind, Request, render};
/// use wavelift_lifting::Scheme;
///
/// let request = Request::new(Scheme::Cdf53)
///     .with_levels(6)
///     .with_function(FunctionKind::Basis(BasisFunction::Scaling));
///
/// let report = render(&request).unwrap();
/// assert_eq!(report.values.len(), 64);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    scheme: Scheme,
    script: Option<String>,
    levels: u32,
    boundary: Boundary,
    function: FunctionKind,
    operation: Operation,
    view: Option<(Space, u32)>,
}

impl Request {
    /// Creates a request for the scaling function of `scheme` over
    /// [`DEFAULT_LEVELS`] levels, with no operation and no component view.
    pub fn new(scheme: Scheme) -> Self {
        Self {
            scheme,
            script: None,
            levels: DEFAULT_LEVELS,
            boundary: Boundary::default(),
            function: FunctionKind::Basis(BasisFunction::Scaling),
            operation: Operation::None,
            view: None,
        }
    }

    /// Sets the step script read by [`Scheme::Custom`].
    pub fn with_script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Sets the level count.
    pub fn with_levels(mut self, levels: u32) -> Self {
        self.levels = levels;
        self
    }

    /// Sets the boundary mode.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Sets the sampled function.
    pub fn with_function(mut self, function: FunctionKind) -> Self {
        self.function = function;
        self
    }

    /// Sets the operation.
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }

    /// Reports the component in `space` at `level` instead of the full
    /// result.
    pub fn with_view(mut self, space: Space, level: u32) -> Self {
        self.view = Some((space, level));
        self
    }

    /// Returns the scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the step script, if any.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Returns the level count.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Returns the boundary mode.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Returns the sampled function.
    pub fn function(&self) -> FunctionKind {
        self.function
    }

    /// Returns the operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Returns the component view, if any.
    pub fn view(&self) -> Option<(Space, u32)> {
        self.view
    }

    /// Validates this request.
    ///
    /// Returns an error if the level count exceeds [`MAX_LEVELS`], a
    /// threshold is NaN or negative, or a smoothing or view level lies
    /// outside the basis.
    pub fn validate(&self) -> Result<(), BasisError> {
        if self.levels > MAX_LEVELS {
            return Err(BasisError::TooManyLevels {
                levels: self.levels,
                max: MAX_LEVELS,
            });
        }
        match self.operation {
            Operation::None => {}
            Operation::Compress { threshold } => check_threshold(threshold)?,
            Operation::Smooth { threshold, level } => {
                check_threshold(threshold)?;
                check_level(level, self.levels)?;
            }
        }
        match self.view {
            Some((Space::Scaling, level)) => check_level(level, self.levels)?,
            Some((Space::Wavelet, level)) => {
                check_level(level, self.levels.saturating_sub(1))?;
                if self.levels == 0 {
                    return Err(BasisError::LevelOutOfRange { level, max: 0 });
                }
            }
            None => {}
        }
        Ok(())
    }
}

fn check_threshold(threshold: f64) -> Result<(), BasisError> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(BasisError::InvalidThreshold(threshold));
    }
    Ok(())
}

fn check_level(level: u32, max: u32) -> Result<(), BasisError> {
    if level > max {
        return Err(BasisError::LevelOutOfRange { level, max });
    }
    Ok(())
}

/// Output of [`render`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BasisReport {
    /// Scheme actually used, after any fallback.
    pub scheme: String,
    pub levels: u32,
    /// `2^levels` samples of the requested view.
    pub values: Vec<f64>,
    /// Fraction of coefficients zeroed by compression.
    pub compression_ratio: Option<f64>,
    /// Error of the operation's result against its input.
    pub error: Option<ErrorMetrics>,
    /// Sum of `values`.
    pub volume: f64,
    /// Human-readable findings, one per line.
    pub diagnostics: Vec<String>,
}

/// Resolves the program a request runs, falling back to the first catalog
/// scheme when a custom script yields no steps.
fn resolve<'a>(
    scheme: Scheme,
    steps: &'a [LiftingStep],
    diagnostics: &mut Vec<String>,
) -> Program<'a> {
    if scheme == Scheme::Custom && steps.is_empty() {
        let fallback = Scheme::default();
        warn!(%fallback, "custom script has no steps");
        diagnostics.push(format!("custom script has no steps, using {fallback}"));
        Program::catalog(fallback)
    } else {
        Program::new(scheme, steps)
    }
}

/// Runs a request: samples the function, applies the operation and
/// extracts the requested view.
///
/// Script errors do not fail the call; they appear in
/// [`BasisReport::diagnostics`].
///
/// # Errors
///
/// Returns the first [`Request::validate`] error, or
/// [`BasisError::LevelsBelowWidth`] when a basis function is requested over
/// fewer levels than the scheme's width.
pub fn render(request: &Request) -> Result<BasisReport, BasisError> {
    request.validate()?;
    let _span = tracing::info_span!(
        "render",
        scheme = %request.scheme,
        levels = request.levels
    )
    .entered();

    let mut diagnostics = Vec::new();
    let steps = match (request.scheme, request.script.as_deref()) {
        (Scheme::Custom, script) => {
            let parsed = wavelift_script::parse_steps(script.unwrap_or_default());
            diagnostics.extend(parsed.diagnostic);
            parsed.steps
        }
        _ => Vec::new(),
    };
    let program = resolve(request.scheme, &steps, &mut diagnostics);

    let mut basis = match request.function {
        FunctionKind::Basis(kind) => {
            Basis::function(program, request.levels, kind, request.boundary)?
        }
        FunctionKind::Test(function) => {
            Basis::test_function(request.levels, function)?.with_boundary(request.boundary)
        }
    };

    let mut compression_ratio = None;
    let mut error = None;
    match request.operation {
        Operation::None => {}
        Operation::Compress { threshold } => {
            let reference = basis.values().to_vec();
            let ratio = basis.compress(program, threshold)?;
            let metrics = ErrorMetrics::between(&reference, basis.values());
            diagnostics.push(format!("compression ratio: {ratio}"));
            diagnostics.push(format!("l_inf error: {}, l2 error: {}", metrics.l_inf, metrics.l2));
            compression_ratio = Some(ratio);
            error = Some(metrics);
        }
        Operation::Smooth { threshold, level } => {
            let reference = basis.values().to_vec();
            basis.smooth(program, threshold, level)?;
            let metrics = ErrorMetrics::between(&reference, basis.values());
            diagnostics.push(format!("l_inf error: {}, l2 error: {}", metrics.l_inf, metrics.l2));
            error = Some(metrics);
        }
    }

    let values = match request.view {
        None => basis.into_values(),
        Some((Space::Scaling, level)) => basis.spline_component(program, level)?,
        Some((Space::Wavelet, level)) => basis.wavelet_component(program, level)?,
    };
    let volume = volume(&values);
    info!(volume, diagnostics = diagnostics.len(), "rendered basis");

    Ok(BasisReport {
        scheme: program.scheme().to_string(),
        levels: request.levels,
        values,
        compression_ratio,
        error,
        volume,
        diagnostics,
    })
}
