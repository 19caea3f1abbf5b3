//! Lifting steps: the unit a scheme program is made of.

use crate::layout::Layout;
use crate::primitives::{
    ipredict, iscale_even, iscale_odd, iupdate, predict, scale_even, scale_odd, update,
};

/// Kind of a lifting step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepKind {
    /// Odd samples minus a stencil of even samples.
    Predict,
    /// Even samples plus a stencil of odd samples.
    Update,
    /// Even samples times a factor.
    ScaleEven,
    /// Odd samples times a factor.
    ScaleOdd,
}

impl StepKind {
    /// All kinds, in script-tag order.
    pub const ALL: [StepKind; 4] = [
        StepKind::Predict,
        StepKind::Update,
        StepKind::ScaleEven,
        StepKind::ScaleOdd,
    ];

    /// Script tag that opens a step of this kind.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Predict => "predict",
            Self::Update => "update",
            Self::ScaleEven => "scale_even",
            Self::ScaleOdd => "scale_odd",
        }
    }

    /// Looks up the kind opened by a script tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.tag() == tag)
    }
}

/// One step of a custom scheme program.
///
/// Predict and update steps use the whole mask as a stencil; scale steps use
/// only the first coefficient as the factor and are skipped while the mask is
/// empty.
#[derive(Clone, Debug, PartialEq)]
pub struct LiftingStep {
    /// Step kind.
    pub kind: StepKind,
    /// Stencil coefficients (or the scale factor in position 0).
    pub mask: Vec<f64>,
}

impl LiftingStep {
    /// Creates a step with an empty mask.
    pub fn new(kind: StepKind) -> Self {
        Self {
            kind,
            mask: Vec::new(),
        }
    }

    /// Creates a step with the given mask.
    pub fn with_mask(kind: StepKind, mask: Vec<f64>) -> Self {
        Self { kind, mask }
    }

    /// Borrowed stage view, or `None` for a scale step without a factor.
    ///
    /// Custom scale steps never touch the border samples of a clamped buffer.
    pub fn stage(&self) -> Option<Stage<'_>> {
        match self.kind {
            StepKind::Predict => Some(Stage::Predict(&self.mask)),
            StepKind::Update => Some(Stage::Update(&self.mask)),
            StepKind::ScaleEven => self.mask.first().map(|&factor| Stage::ScaleEven {
                factor,
                avoid_border: true,
            }),
            StepKind::ScaleOdd => self.mask.first().map(|&factor| Stage::ScaleOdd {
                factor,
                avoid_border: true,
            }),
        }
    }
}

/// A primitive bound to its mask or factor.
///
/// Catalog schemes are `'static` tables of stages; custom steps lend their
/// masks through [`LiftingStep::stage`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Stage<'a> {
    /// [`predict`] with this stencil.
    Predict(&'a [f64]),
    /// [`update`] with this stencil.
    Update(&'a [f64]),
    /// [`scale_even`] by `factor`.
    ScaleEven {
        /// Multiplier of the even samples.
        factor: f64,
        /// Leave the first and last even sample alone on clamped buffers.
        avoid_border: bool,
    },
    /// [`scale_odd`] by `factor`.
    ScaleOdd {
        /// Multiplier of the odd samples.
        factor: f64,
        /// Leave the first and last odd sample alone on clamped buffers.
        avoid_border: bool,
    },
}

impl Stage<'_> {
    /// Applies the stage.
    pub fn apply(&self, samples: &mut [f64], layout: Layout, level: u32) {
        match *self {
            Stage::Predict(mask) => predict(samples, layout, mask, level),
            Stage::Update(mask) => update(samples, layout, mask, level),
            Stage::ScaleEven {
                factor,
                avoid_border,
            } => scale_even(samples, layout, factor, level, avoid_border),
            Stage::ScaleOdd {
                factor,
                avoid_border,
            } => scale_odd(samples, layout, factor, level, avoid_border),
        }
    }

    /// Undoes [`Stage::apply`].
    pub fn undo(&self, samples: &mut [f64], layout: Layout, level: u32) {
        match *self {
            Stage::Predict(mask) => ipredict(samples, layout, mask, level),
            Stage::Update(mask) => iupdate(samples, layout, mask, level),
            Stage::ScaleEven {
                factor,
                avoid_border,
            } => iscale_even(samples, layout, factor, level, avoid_border),
            Stage::ScaleOdd {
                factor,
                avoid_border,
            } => iscale_odd(samples, layout, factor, level, avoid_border),
        }
    }

    /// Dual counterpart of [`Stage::undo`]: predict and update trade places
    /// and scale factors are reciprocated.
    ///
    /// This synthesizes the dual basis. It is not the inverse of anything.
    pub fn undo_dual(&self, samples: &mut [f64], layout: Layout, level: u32) {
        match *self {
            Stage::Predict(mask) => iupdate(samples, layout, mask, level),
            Stage::Update(mask) => ipredict(samples, layout, mask, level),
            Stage::ScaleEven { factor, .. } => {
                iscale_even(samples, layout, 1.0 / factor, level, true)
            }
            Stage::ScaleOdd { factor, .. } => {
                iscale_odd(samples, layout, 1.0 / factor, level, true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip() {
        for kind in StepKind::ALL {
            assert_eq!(StepKind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(StepKind::from_tag("lift"), None);
    }

    #[test]
    fn scale_step_without_factor_has_no_stage() {
        assert_eq!(LiftingStep::new(StepKind::ScaleEven).stage(), None);
        assert_eq!(LiftingStep::new(StepKind::ScaleOdd).stage(), None);
    }

    #[test]
    fn scale_step_uses_first_coefficient() {
        let step = LiftingStep::with_mask(StepKind::ScaleOdd, vec![2.0, 7.0]);
        assert_eq!(
            step.stage(),
            Some(Stage::ScaleOdd {
                factor: 2.0,
                avoid_border: true
            })
        );
    }

    #[test]
    fn empty_predict_is_identity() {
        let step = LiftingStep::new(StepKind::Predict);
        let mut x = vec![1.0, 2.0, 3.0, 4.0];
        step.stage().unwrap().apply(&mut x, Layout::new(4), 0);
        assert_eq!(x, vec![1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn dual_undo_swaps_roles() {
        let mask = [0.5, 0.5];
        let layout = Layout::new(8);
        let mut dual = vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0];
        let mut direct = dual.clone();
        Stage::Predict(&mask).undo_dual(&mut dual, layout, 0);
        iupdate(&mut direct, layout, &mask, 0);
        assert_eq!(dual, direct);
    }
}
