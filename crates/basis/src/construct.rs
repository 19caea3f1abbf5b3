//! Stable-wavelet construction: a sweep over a trailing symmetric update.
//!
//! Appends `update [α, β, β, α]` to a custom program. For each `α` of the
//! sweep, `β` is chosen so the wavelet gains a vanishing moment, then the
//! primal and dual smoothness are measured. The `α` with the smoothest dual
//! wins; ties go to the smallest `α`.

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace};
use wavelift_lifting::{LiftingStep, Program, StepKind};

use crate::analysis::{
    PROBE_LEN, RieszInterval, impulse_response, mask_smoothness, vanishing_moment,
};
use crate::error::BasisError;

/// Largest number of `α` values a sweep may evaluate.
pub const MAX_CANDIDATES: usize = 1_000_000;

// Slack on the sweep length so an endpoint hit up to rounding is included.
const ENDPOINT_SLACK: f64 = 1e-9;

/// Sweep over `α` for [`construct_stable_wavelet`].
///
/// # Example
///
/// ```
/// use wavelift_basis::SearchConfig;
///
/// let config = SearchConfig::new()
///     .with_range(-1.0, 1.0)
///     .with_step(0.01)
///     .with_parallel(false);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.candidates(), 201);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// First `α`.
    min_alpha: f64,
    /// Largest `α` considered.
    max_alpha: f64,
    /// Sweep increment.
    step: f64,
    /// Evaluate candidates on the rayon pool.
    parallel: bool,
}

impl SearchConfig {
    /// Creates the default sweep.
    ///
    /// Defaults: `α` from -2 to 2 in steps of 1e-4, evaluated in parallel.
    pub fn new() -> Self {
        Self {
            min_alpha: -2.0,
            max_alpha: 2.0,
            step: 1e-4,
            parallel: true,
        }
    }

    /// Sets the `α` range.
    pub fn with_range(mut self, min_alpha: f64, max_alpha: f64) -> Self {
        self.min_alpha = min_alpha;
        self.max_alpha = max_alpha;
        self
    }

    /// Sets the sweep increment.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Returns the first `α`.
    pub fn min_alpha(&self) -> f64 {
        self.min_alpha
    }

    /// Returns the largest `α` considered.
    pub fn max_alpha(&self) -> f64 {
        self.max_alpha
    }

    /// Returns the sweep increment.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns whether candidates are evaluated in parallel.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// The `i`-th `α` of the sweep.
    pub fn alpha(&self, i: usize) -> f64 {
        self.min_alpha + i as f64 * self.step
    }

    /// Number of `α` values in the sweep, both endpoints included.
    ///
    /// Only meaningful for a configuration that passes [`validate`](Self::validate).
    pub fn candidates(&self) -> usize {
        self.span().floor() as usize + 1
    }

    /// Number of steps between the endpoints, with rounding slack.
    fn span(&self) -> f64 {
        (self.max_alpha - self.min_alpha) / self.step + ENDPOINT_SLACK
    }

    /// Validates this configuration.
    ///
    /// Returns an error if a bound or the step is non-finite, the step is not
    /// positive, the range is empty, or the sweep would exceed
    /// [`MAX_CANDIDATES`].
    pub fn validate(&self) -> Result<(), BasisError> {
        let invalid = |reason: String| Err(BasisError::InvalidSearch { reason });
        if !self.min_alpha.is_finite() || !self.max_alpha.is_finite() {
            return invalid(format!(
                "alpha range must be finite, got [{}, {}]",
                self.min_alpha, self.max_alpha
            ));
        }
        if self.min_alpha > self.max_alpha {
            return invalid(format!(
                "min_alpha {} exceeds max_alpha {}",
                self.min_alpha, self.max_alpha
            ));
        }
        if !self.step.is_finite() || self.step <= 0.0 {
            return invalid(format!("step must be finite and positive, got {}", self.step));
        }
        let span = self.span();
        if !(span < MAX_CANDIDATES as f64) {
            return Err(BasisError::TooManyCandidates {
                count: span.floor() + 1.0,
                max: MAX_CANDIDATES,
            });
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of [`construct_stable_wavelet`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StableWavelet {
    /// Outer update coefficient.
    pub alpha: f64,
    /// Inner update coefficient, giving one vanishing moment.
    pub beta: f64,
    /// Sobolev exponent of the primal scaling function.
    pub primal_smoothness: f64,
    /// Sobolev exponent of the dual scaling function.
    pub dual_smoothness: f64,
    /// Riesz interval of the constructed pair.
    pub riesz_interval: RieszInterval,
    /// Candidates evaluated.
    pub candidates: usize,
    /// Whether any candidate had a finite dual and a non-NaN primal.
    pub found_valid: bool,
}

impl StableWavelet {
    /// The appended update mask `[α, β, β, α]`.
    pub fn update_mask(&self) -> [f64; 4] {
        [self.alpha, self.beta, self.beta, self.alpha]
    }
}

#[derive(Clone, Copy, Debug)]
struct Candidate {
    alpha: f64,
    beta: f64,
    primal: f64,
    dual: f64,
}

impl Candidate {
    fn is_valid(&self) -> bool {
        self.dual.is_finite() && !self.primal.is_nan()
    }
}

/// Sets the trailing update of `steps` to `[α, β, β, α]` with `β` solved
/// for one vanishing moment, and measures both smoothness exponents.
fn evaluate(steps: &mut [LiftingStep], alpha: f64) -> Candidate {
    let last = steps.len() - 1;
    steps[last].mask = vec![alpha, 0.0, 0.0, alpha];
    let (_, beta) = vanishing_moment(Program::custom(steps));
    steps[last].mask = vec![alpha, beta, beta, alpha];

    let program = Program::custom(steps);
    let primal = mask_smoothness(&impulse_response(program, PROBE_LEN / 2, false), 1.0)
        .unwrap_or(f64::NAN);
    let dual = mask_smoothness(&impulse_response(program, PROBE_LEN / 2, true), 2.0)
        .unwrap_or(f64::NAN);
    trace!(alpha, beta, primal, dual, "evaluated candidate");

    Candidate {
        alpha,
        beta,
        primal,
        dual,
    }
}

/// Appends a symmetric 4-tap update to `steps` and tunes it for the
/// smoothest dual.
///
/// On return the last step of `steps` is `update [α, β, β, α]` at the
/// winning `α`. If no candidate is valid the sweep's first `α` is used.
/// Parallel and sequential sweeps give identical results.
///
/// # Errors
///
/// Returns [`BasisError::InvalidSearch`] or [`BasisError::TooManyCandidates`] if
/// `config` does not validate.
pub fn construct_stable_wavelet(
    steps: &mut Vec<LiftingStep>,
    config: &SearchConfig,
) -> Result<StableWavelet, BasisError> {
    config.validate()?;
    let _span = tracing::info_span!("construct", steps = steps.len()).entered();

    steps.push(LiftingStep::with_mask(StepKind::Update, vec![0.0; 4]));
    let count = config.candidates();
    debug!(
        count,
        min = config.min_alpha(),
        max = config.max_alpha(),
        step = config.step(),
        parallel = config.parallel(),
        "sweeping update coefficient"
    );

    let template: &[LiftingStep] = steps;
    let candidates: Vec<Candidate> = if config.parallel() {
        (0..count)
            .into_par_iter()
            .map_init(
                || template.to_vec(),
                |scratch, i| evaluate(scratch, config.alpha(i)),
            )
            .collect()
    } else {
        let mut scratch = template.to_vec();
        (0..count)
            .map(|i| evaluate(&mut scratch, config.alpha(i)))
            .collect()
    };

    // Ascending sweep with strict `>`: the earliest of equal duals wins.
    let best = candidates
        .iter()
        .filter(|c| c.is_valid())
        .fold(None::<&Candidate>, |best, c| match best {
            Some(b) if c.dual <= b.dual => Some(b),
            _ => Some(c),
        });
    let found_valid = best.is_some();
    let alpha = best.map_or(config.min_alpha(), |c| c.alpha);

    let winner = evaluate(steps, alpha);
    info!(
        alpha = winner.alpha,
        beta = winner.beta,
        primal = winner.primal,
        dual = winner.dual,
        found_valid,
        "constructed stable wavelet"
    );

    Ok(StableWavelet {
        alpha: winner.alpha,
        beta: winner.beta,
        primal_smoothness: winner.primal,
        dual_smoothness: winner.dual,
        riesz_interval: RieszInterval::new(winner.primal, winner.dual),
        candidates: count,
        found_valid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sweep() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.min_alpha(), -2.0);
        assert_eq!(cfg.max_alpha(), 2.0);
        assert_eq!(cfg.step(), 1e-4);
        assert!(cfg.parallel());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn alpha_is_not_accumulated() {
        let cfg = SearchConfig::new().with_range(-1.0, 1.0).with_step(0.1);
        assert_eq!(cfg.alpha(0), -1.0);
        assert_eq!(cfg.alpha(7), -1.0 + 7.0 * 0.1);
    }

    #[test]
    fn candidate_count_includes_endpoints() {
        let cfg = SearchConfig::new().with_range(0.0, 1.0).with_step(0.25);
        assert_eq!(cfg.candidates(), 5);
        let single = SearchConfig::new().with_range(0.5, 0.5);
        assert_eq!(single.candidates(), 1);
    }

    #[test]
    fn validate_rejects_bad_configs() {
        assert!(SearchConfig::new().with_step(0.0).validate().is_err());
        assert!(SearchConfig::new().with_step(f64::NAN).validate().is_err());
        assert!(SearchConfig::new().with_range(1.0, -1.0).validate().is_err());
        assert!(
            SearchConfig::new()
                .with_range(f64::NEG_INFINITY, 0.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn validate_bounds_sweep_size() {
        let tiny_step = SearchConfig::new().with_step(1e-12);
        assert!(matches!(
            tiny_step.validate(),
            Err(BasisError::TooManyCandidates { max: MAX_CANDIDATES, .. })
        ));

        let overflow = SearchConfig::new().with_range(-1e300, 1e300).with_step(1e-300);
        assert!(matches!(
            overflow.validate(),
            Err(BasisError::TooManyCandidates { .. })
        ));

        let at_limit = SearchConfig::new()
            .with_range(0.0, (MAX_CANDIDATES - 1) as f64)
            .with_step(1.0);
        assert!(at_limit.validate().is_ok());
        assert_eq!(at_limit.candidates(), MAX_CANDIDATES);
        assert!(at_limit.clone().with_range(0.0, MAX_CANDIDATES as f64).validate().is_err());
    }

    #[test]
    fn sweep_includes_endpoint_lost_to_rounding() {
        // 0.3 / 0.1 is 2.9999999999999996 and 3 * 0.1 exceeds 0.3.
        let cfg = SearchConfig::new().with_range(0.0, 0.3).with_step(0.1);
        assert_eq!(cfg.candidates(), 4);
        approx::assert_abs_diff_eq!(cfg.alpha(3), 0.3, epsilon = 1e-12);

        let full = SearchConfig::new().with_range(-2.0, 2.0).with_step(0.01);
        assert_eq!(full.candidates(), 401);
        approx::assert_abs_diff_eq!(full.alpha(400), 2.0, epsilon = 1e-12);
        assert_eq!(SearchConfig::default().candidates(), 40_001);
    }

    #[test]
    fn invalid_config_leaves_steps_alone() {
        let mut steps = vec![LiftingStep::with_mask(StepKind::Predict, vec![0.5, 0.5])];
        let cfg = SearchConfig::new().with_step(-1.0);
        assert!(construct_stable_wavelet(&mut steps, &cfg).is_err());
        assert_eq!(steps.len(), 1);
    }

    #[test]
    fn trailing_update_gets_winning_mask() {
        let mut steps = vec![LiftingStep::with_mask(StepKind::Predict, vec![0.5, 0.5])];
        let cfg = SearchConfig::new()
            .with_range(-0.5, 0.5)
            .with_step(0.25)
            .with_parallel(false);
        let result = construct_stable_wavelet(&mut steps, &cfg).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].kind, StepKind::Update);
        assert_eq!(steps[1].mask, result.update_mask().to_vec());
        assert_eq!(result.candidates, 5);
    }

    #[test]
    fn linear_predict_gains_moment_from_constructed_update() {
        let mut steps = vec![LiftingStep::with_mask(StepKind::Predict, vec![0.5, 0.5])];
        let cfg = SearchConfig::new()
            .with_range(-1.0, 1.0)
            .with_step(0.05)
            .with_parallel(false);
        let result = construct_stable_wavelet(&mut steps, &cfg).unwrap();

        assert_eq!(result.candidates, 41);
        assert!(result.found_valid);
        approx::assert_abs_diff_eq!(2.0 * (result.alpha + result.beta), 0.5, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(result.alpha, -0.05, epsilon = 1e-9);
        approx::assert_abs_diff_eq!(result.primal_smoothness, 1.5, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(result.dual_smoothness, 1.2533, epsilon = 1e-3);
        assert_eq!(result.riesz_interval.upper, result.primal_smoothness);
    }

    #[test]
    fn parallel_matches_sequential() {
        let base = vec![
            LiftingStep::with_mask(
                StepKind::Predict,
                vec![-1.0 / 16.0, 9.0 / 16.0, 9.0 / 16.0, -1.0 / 16.0],
            ),
            LiftingStep::with_mask(StepKind::Update, vec![0.25, 0.25]),
        ];
        let cfg = SearchConfig::new().with_range(-0.5, 0.5).with_step(0.1);

        let mut parallel = base.clone();
        let a = construct_stable_wavelet(&mut parallel, &cfg).unwrap();
        let mut sequential = base.clone();
        let b =
            construct_stable_wavelet(&mut sequential, &cfg.clone().with_parallel(false)).unwrap();

        assert_eq!(a.alpha, b.alpha);
        assert_eq!(a.beta, b.beta);
        assert_eq!(a.dual_smoothness.to_bits(), b.dual_smoothness.to_bits());
        assert_eq!(parallel, sequential);
    }
}
