//! Forward followed by inverse must reproduce the input for every scheme.

use approx::assert_relative_eq;
use wavelift_lifting::{Boundary, Layout, LiftingStep, Program, Scheme, StepKind};

fn signal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let x = i as f64 / n as f64;
            (7.0 * x).sin() + 0.3 * (31.0 * x).cos() + x * x
        })
        .collect()
}

fn custom_steps() -> Vec<LiftingStep> {
    vec![
        LiftingStep::with_mask(StepKind::Predict, vec![-0.1, 0.6, 0.6, -0.1]),
        LiftingStep::with_mask(StepKind::Update, vec![0.2, 0.3, -0.05]),
        LiftingStep::with_mask(StepKind::ScaleEven, vec![1.7]),
        LiftingStep::with_mask(StepKind::ScaleOdd, vec![0.6]),
        LiftingStep::with_mask(StepKind::Update, vec![-0.07, 0.32, 0.32, -0.07]),
    ]
}

fn assert_round_trip(program: Program<'_>, boundary: Boundary) {
    let width = program.width();
    for levels in width..=width + 3 {
        let n = 1usize << levels;
        let layout = Layout::new(n).with_boundary(boundary);
        let original = signal(n);
        let mut x = original.clone();

        program.forward_levels(&mut x, layout, levels);
        assert_ne!(x, original, "{} did nothing at {levels} levels", program.scheme());
        program.inverse_levels(&mut x, layout, levels);

        for (got, want) in x.iter().zip(&original) {
            assert_relative_eq!(*got, *want, max_relative = 1e-9, epsilon = 1e-12);
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_round_trip_clamped() {
    for scheme in Scheme::ALL.into_iter().filter(|s| *s != Scheme::Custom) {
        assert_round_trip(Program::catalog(scheme), Boundary::Clamped);
    }
}

#[test]
fn catalog_round_trip_cyclic() {
    for scheme in Scheme::ALL.into_iter().filter(|s| *s != Scheme::Custom) {
        assert_round_trip(Program::catalog(scheme), Boundary::Cyclic);
    }
}

// ---------------------------------------------------------------------------
// Custom
// ---------------------------------------------------------------------------

#[test]
fn custom_round_trip() {
    let steps = custom_steps();
    assert_round_trip(Program::custom(&steps), Boundary::Clamped);
    assert_round_trip(Program::custom(&steps), Boundary::Cyclic);
}

// ---------------------------------------------------------------------------
// Strided
// ---------------------------------------------------------------------------

#[test]
fn strided_round_trip_leaves_gaps_alone() {
    let n = 64;
    let stride = 3;
    let layout = Layout::new(n).with_stride(stride);
    let mut backing: Vec<f64> = (0..n * stride).map(|i| i as f64 * 0.25 - 3.0).collect();
    let original = backing.clone();
    let program = Program::catalog(Scheme::Cdf97);

    program.forward_levels(&mut backing, layout, 5);
    for (i, (got, want)) in backing.iter().zip(&original).enumerate() {
        if i % stride != 0 {
            assert_eq!(got, want, "gap sample {i} was touched");
        }
    }
    program.inverse_levels(&mut backing, layout, 5);

    for (got, want) in backing.iter().zip(&original) {
        assert_relative_eq!(*got, *want, max_relative = 1e-9, epsilon = 1e-12);
    }
}
