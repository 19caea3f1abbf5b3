//! Smoothness analysis of a scheme on a 32-sample probe.

use serde::Serialize;
use tracing::{info, warn};
use wavelift_lifting::{Layout, Program, iupdate};
use wavelift_sobolev::SobolevError;

/// Length of the probe buffer.
pub const PROBE_LEN: usize = 32;
const SCALING_PROBE: usize = PROBE_LEN / 2;
const WAVELET_PROBE: usize = PROBE_LEN / 2 + 1;
const VANISHING_MOMENT_PROBE: [f64; 2] = [1.0, 1.0];

/// Range of Sobolev exponents `]lower, upper[` for which the primal and
/// dual functions form a Riesz basis.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RieszInterval {
    /// Negated dual smoothness.
    pub lower: f64,
    /// Primal smoothness.
    pub upper: f64,
}

impl RieszInterval {
    /// Interval `]-dual, primal[` from the two smoothness exponents.
    pub fn new(primal: f64, dual: f64) -> Self {
        Self {
            lower: -dual,
            upper: primal,
        }
    }
}

impl std::fmt::Display for RieszInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "]{}, {}[", self.lower, self.upper)
    }
}

/// Everything [`analyze`] learns about a scheme.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Scheme name.
    pub scheme: String,
    /// One inverse level applied to an impulse: the primal scaling mask.
    pub scaling_coefficients: Vec<f64>,
    /// Sobolev exponent of the primal scaling function, NaN on failure.
    pub primal_smoothness: f64,
    /// Sum of the primal scaling mask (2 for a normalized scheme).
    pub scaling_sum: f64,
    /// Even scale step that would normalize the scaling mask.
    pub suggested_even_scale: Option<f64>,
    /// One biorthogonal-inverse level applied to an impulse.
    pub dual_scaling_coefficients: Vec<f64>,
    /// Sobolev exponent of the dual scaling function, NaN on failure.
    pub dual_smoothness: f64,
    /// One inverse level applied to a detail impulse.
    pub wavelet_coefficients: Vec<f64>,
    /// Sum of the wavelet mask; zero when it has a vanishing moment.
    pub wavelet_sum: f64,
    /// Symmetric update coefficient that gives the wavelet a vanishing moment.
    pub vanishing_moment_update: Option<f64>,
    /// Sobolev exponents for which primal and dual form a Riesz basis.
    pub riesz_interval: RieszInterval,
    /// Human-readable findings, one per line.
    pub diagnostics: Vec<String>,
}

/// One level of synthesis applied to a unit impulse at `position`.
pub(crate) fn impulse_response(program: Program<'_>, position: usize, dual: bool) -> Vec<f64> {
    let layout = Layout::new(PROBE_LEN);
    let mut samples = vec![0.0; PROBE_LEN];
    samples[position] = 1.0;
    if dual {
        program.biorthogonal_inverse(&mut samples, layout, 0);
    } else {
        program.inverse(&mut samples, layout, 0);
    }
    samples
}

/// Sum of the wavelet mask and the update coefficient that zeroes it.
///
/// The wavelet sum is affine in the coefficient `c` of a symmetric 2-tap
/// update appended to the program; probing with `c = 1` gives the slope.
pub(crate) fn vanishing_moment(program: Program<'_>) -> (f64, f64) {
    let layout = Layout::new(PROBE_LEN);
    let current: f64 = impulse_response(program, WAVELET_PROBE, false).iter().sum();

    let mut probe = vec![0.0; PROBE_LEN];
    probe[WAVELET_PROBE] = 1.0;
    iupdate(&mut probe, layout, &VANISHING_MOMENT_PROBE, 0);
    program.inverse(&mut probe, layout, 0);
    let after: f64 = probe.iter().sum();

    (current, -current / (after - current))
}

/// Sobolev exponent of the mask in `samples` after trimming leading and
/// trailing zeros and multiplying by `scale`.
pub fn mask_smoothness(samples: &[f64], scale: f64) -> Result<f64, SobolevError> {
    let start = samples.iter().position(|v| *v != 0.0).unwrap_or(samples.len());
    let end = samples.iter().rposition(|v| *v != 0.0).map_or(start, |i| i + 1);
    let mask: Vec<f64> = samples[start..end].iter().map(|v| v * scale).collect();
    wavelift_sobolev::smoothness(&mask)
}

/// Like [`mask_smoothness`], logging a failure and reporting it as NaN.
pub fn compute_smoothness(samples: &[f64], scale: f64) -> f64 {
    mask_smoothness(samples, scale).unwrap_or_else(|e| {
        warn!(error = %e, "smoothness estimate failed");
        f64::NAN
    })
}

fn smoothness_line(label: &str, result: &Result<f64, SobolevError>) -> (f64, String) {
    match result {
        Ok(s) => (*s, format!("{label} smoothness: {s}")),
        Err(e) => (f64::NAN, format!("{label} smoothness unavailable: {e}")),
    }
}

/// Analyzes one level of `program` on a [`PROBE_LEN`]-sample probe.
///
/// Reports the primal and dual scaling masks with their smoothness, the
/// wavelet mask, normalization advice and the update coefficient that adds
/// a vanishing moment.
pub fn analyze(program: Program<'_>) -> AnalysisReport {
    let _span = tracing::info_span!("analyze", scheme = %program.scheme()).entered();
    let mut diagnostics = Vec::new();

    let scaling_coefficients = impulse_response(program, SCALING_PROBE, false);
    let (primal_smoothness, line) =
        smoothness_line("primal", &mask_smoothness(&scaling_coefficients, 1.0));
    diagnostics.push(line);

    let scaling_sum: f64 = scaling_coefficients.iter().sum();
    let suggested_even_scale = (scaling_sum != 2.0).then_some(scaling_sum / 2.0);
    if let Some(scale) = suggested_even_scale {
        diagnostics.push(format!("sum of scaling coefficients = {scaling_sum}"));
        diagnostics.push(format!(
            "it is advisable to add an even scale step with value {scale}"
        ));
    }

    let dual_scaling_coefficients = impulse_response(program, SCALING_PROBE, true);
    let (dual_smoothness, line) =
        smoothness_line("dual", &mask_smoothness(&dual_scaling_coefficients, 2.0));
    diagnostics.push(line);

    let wavelet_coefficients = impulse_response(program, WAVELET_PROBE, false);
    let (wavelet_sum, update) = vanishing_moment(program);
    diagnostics.push(format!("current wavelet sum is {wavelet_sum}"));
    let vanishing_moment_update = (wavelet_sum != 0.0).then_some(update);
    if let Some(value) = vanishing_moment_update {
        diagnostics.push(format!(
            "add update step with mask value {value} for one vanishing moment"
        ));
    }

    let riesz_interval = RieszInterval::new(primal_smoothness, dual_smoothness);
    diagnostics.push(format!("Riesz basis for {riesz_interval}"));

    info!(
        primal = primal_smoothness,
        dual = dual_smoothness,
        scaling_sum,
        wavelet_sum,
        "analysis complete"
    );

    AnalysisReport {
        scheme: program.scheme().to_string(),
        scaling_coefficients,
        primal_smoothness,
        scaling_sum,
        suggested_even_scale,
        dual_scaling_coefficients,
        dual_smoothness,
        wavelet_coefficients,
        wavelet_sum,
        vanishing_moment_update,
        riesz_interval,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use wavelift_lifting::{LiftingStep, Scheme, StepKind};

    #[test]
    fn trims_zeros_before_estimating() {
        let mut samples = vec![0.0; 8];
        samples[3] = 1.0;
        samples[4] = 1.0;
        assert_abs_diff_eq!(mask_smoothness(&samples, 1.0).unwrap(), 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(compute_smoothness(&samples[3..5], 1.0), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn all_zero_samples_are_nan() {
        assert!(compute_smoothness(&[0.0; 8], 1.0).is_nan());
        assert!(matches!(
            mask_smoothness(&[0.0; 8], 1.0),
            Err(SobolevError::EmptyMask)
        ));
    }

    #[test]
    fn failed_estimate_is_nan() {
        assert!(compute_smoothness(&[0.5, 0.5], 1.0).is_nan());
    }

    #[test]
    fn cdf53_analysis() {
        let report = analyze(Program::catalog(Scheme::Cdf53));
        assert_eq!(report.scaling_coefficients[15..18], [0.5, 1.0, 0.5]);
        assert_eq!(report.scaling_sum, 2.0);
        assert_eq!(report.suggested_even_scale, None);
        assert_abs_diff_eq!(report.primal_smoothness, 1.5, epsilon = 1e-9);
        // The 2-tap update already gives a vanishing moment.
        assert_eq!(report.wavelet_sum, 0.0);
        assert_eq!(report.vanishing_moment_update, None);
        assert_eq!(report.riesz_interval.upper, report.primal_smoothness);
        assert_eq!(report.riesz_interval.lower, -report.dual_smoothness);
    }

    #[test]
    fn predict_only_scheme_gets_update_advice() {
        let steps = vec![LiftingStep::with_mask(StepKind::Predict, vec![0.5, 0.5])];
        let report = analyze(Program::custom(&steps));
        assert_eq!(report.wavelet_sum, 1.0);
        // Matches the CDF 5/3 update.
        assert_abs_diff_eq!(report.vanishing_moment_update.unwrap(), 0.25, epsilon = 1e-12);
    }

    #[test]
    fn unnormalized_scheme_gets_scale_advice() {
        let steps = vec![
            LiftingStep::with_mask(StepKind::Predict, vec![0.5, 0.5]),
            LiftingStep::with_mask(StepKind::ScaleEven, vec![2.0]),
        ];
        let report = analyze(Program::custom(&steps));
        // The even sample is halved by the inverse scale.
        assert_abs_diff_eq!(report.scaling_sum, 1.0);
        assert_eq!(report.suggested_even_scale, Some(0.5));
        assert!(report.primal_smoothness.is_nan());
        assert!(
            report
                .diagnostics
                .iter()
                .any(|d| d.contains("even scale step with value 0.5"))
        );
    }
}
