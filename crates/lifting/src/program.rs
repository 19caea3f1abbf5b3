//! The single interpreter shared by catalog and custom schemes.

use crate::layout::Layout;
use crate::scheme::Scheme;
use crate::step::{LiftingStep, Stage};

/// A scheme together with the custom steps it interprets.
///
/// Catalog schemes ignore `steps`; [`Scheme::Custom`] runs them.
///
/// # Example
///
/// ```
/// use wavelift_lifting::{Layout, Program, Scheme};
///
/// let program = Program::catalog(Scheme::Cdf53);
/// let layout = Layout::new(8);
/// let mut x = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// program.forward(&mut x, layout, 0);
/// program.inverse(&mut x, layout, 0);
/// assert!((x[3] - 4.0).abs() < 1e-12);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Program<'a> {
    scheme: Scheme,
    steps: &'a [LiftingStep],
}

impl<'a> Program<'a> {
    /// Binds a scheme to the steps a custom scheme would run.
    pub fn new(scheme: Scheme, steps: &'a [LiftingStep]) -> Self {
        Self { scheme, steps }
    }

    /// A catalog scheme.
    pub fn catalog(scheme: Scheme) -> Self {
        Self { scheme, steps: &[] }
    }

    /// A custom scheme running `steps`.
    pub fn custom(steps: &'a [LiftingStep]) -> Self {
        Self {
            scheme: Scheme::Custom,
            steps,
        }
    }

    /// Returns the scheme.
    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    /// Returns the scheme's width.
    pub fn width(&self) -> u32 {
        self.scheme.width()
    }

    /// Stages in forward order.
    pub fn stages(&self) -> Vec<Stage<'a>> {
        match self.scheme.stages() {
            Some(table) => table.to_vec(),
            None => self.steps.iter().filter_map(LiftingStep::stage).collect(),
        }
    }

    /// One forward (analysis) level.
    pub fn forward(&self, samples: &mut [f64], layout: Layout, level: u32) {
        for stage in self.stages() {
            stage.apply(samples, layout, level);
        }
    }

    /// One inverse (synthesis) level; exactly undoes [`Program::forward`].
    pub fn inverse(&self, samples: &mut [f64], layout: Layout, level: u32) {
        for stage in self.stages().iter().rev() {
            stage.undo(samples, layout, level);
        }
    }

    /// One synthesis level of the dual basis.
    ///
    /// Walks the stages backwards like [`Program::inverse`], but undoes each
    /// predict as an update and each update as a predict, and reciprocates
    /// scale factors. Feeding it an impulse yields the dual scaling or
    /// wavelet function. It does not invert [`Program::forward`].
    pub fn biorthogonal_inverse(&self, samples: &mut [f64], layout: Layout, level: u32) {
        for stage in self.stages().iter().rev() {
            stage.undo_dual(samples, layout, level);
        }
    }

    /// Forward levels `0..levels`, finest first.
    pub fn forward_levels(&self, samples: &mut [f64], layout: Layout, levels: u32) {
        for level in 0..levels {
            self.forward(samples, layout, level);
        }
    }

    /// Inverse levels `levels-1` down to 0, coarsest first.
    pub fn inverse_levels(&self, samples: &mut [f64], layout: Layout, levels: u32) {
        for level in (0..levels).rev() {
            self.inverse(samples, layout, level);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::StepKind;
    use approx::assert_abs_diff_eq;

    fn four_point_steps() -> Vec<LiftingStep> {
        vec![
            LiftingStep::with_mask(
                StepKind::Predict,
                vec![-1.0 / 16.0, 9.0 / 16.0, 9.0 / 16.0, -1.0 / 16.0],
            ),
            LiftingStep::with_mask(StepKind::Update, vec![0.25, 0.25]),
        ]
    }

    #[test]
    fn custom_matches_equivalent_catalog_scheme() {
        let steps = four_point_steps();
        let data: Vec<f64> = (0..32).map(|i| (i as f64 * 0.3).cos()).collect();
        let layout = Layout::new(32);

        let mut custom = data.clone();
        Program::custom(&steps).forward_levels(&mut custom, layout, 3);
        let mut catalog = data;
        Program::catalog(Scheme::FourPoint).forward_levels(&mut catalog, layout, 3);

        assert_eq!(custom, catalog);
    }

    #[test]
    fn catalog_program_ignores_steps() {
        let steps = four_point_steps();
        let program = Program::new(Scheme::Haar, &steps);
        assert_eq!(program.stages(), Scheme::Haar.stages().unwrap().to_vec());
    }

    #[test]
    fn custom_skips_scale_without_factor() {
        let steps = vec![
            LiftingStep::new(StepKind::ScaleEven),
            LiftingStep::with_mask(StepKind::Predict, vec![0.5, 0.5]),
        ];
        assert_eq!(Program::custom(&steps).stages().len(), 1);
    }

    #[test]
    fn biorthogonal_inverse_differs_from_inverse() {
        let layout = Layout::new(32);
        let program = Program::catalog(Scheme::Cdf53);
        let mut primal = vec![0.0; 32];
        primal[16] = 1.0;
        let mut dual = primal.clone();
        program.inverse(&mut primal, layout, 0);
        program.biorthogonal_inverse(&mut dual, layout, 0);
        // Primal CDF 5/3 scaling mask: [1/2, 1, 1/2].
        assert_abs_diff_eq!(primal[15], 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(primal[17], 0.5, epsilon = 1e-15);
        assert_ne!(primal, dual);
        assert_abs_diff_eq!(dual.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
    }
}
