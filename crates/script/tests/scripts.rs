//! End-to-end script compilation.

use wavelift_lifting::{LiftingStep, Program, Scheme, StepKind};
use wavelift_script::{ParseError, compile, parse_steps, render_steps};

const FOUR_POINT_SCRIPT: &str = "predict;\n-1/16; 9/16; 9/16; -1/16;\n\nupdate;\n0.25; 0.25;";

// ---------------------------------------------------------------------------
// Successful scripts
// ---------------------------------------------------------------------------

#[test]
fn four_point_script_gives_two_steps() {
    let parsed = parse_steps(FOUR_POINT_SCRIPT);
    assert!(parsed.is_ok());
    assert_eq!(
        parsed.steps,
        vec![
            LiftingStep::with_mask(StepKind::Predict, vec![-0.0625, 0.5625, 0.5625, -0.0625]),
            LiftingStep::with_mask(StepKind::Update, vec![0.25, 0.25]),
        ]
    );
}

#[test]
fn script_runs_like_the_catalog_scheme() {
    let steps = compile(FOUR_POINT_SCRIPT).unwrap();
    let custom = Program::custom(&steps);
    let catalog = Program::catalog(Scheme::FourPoint);
    assert_eq!(custom.stages(), catalog.stages());
}

#[test]
fn daubechies_script_with_functions() {
    let text = "\
update; 0; sqrt(3);
predict; (sqrt(3) - 2) / 4; sqrt(3) / 4; 0; 0;
update; 0; 0; 0; -1;
scale_even; (sqrt(3) - 1) / 2;
scale_odd; (sqrt(3) + 1) / 2;
";
    let steps = compile(text).unwrap();
    let kinds: Vec<StepKind> = steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::Update,
            StepKind::Predict,
            StepKind::Update,
            StepKind::ScaleEven,
            StepKind::ScaleOdd
        ]
    );
    assert_eq!(steps[1].mask.len(), 4);
    assert_eq!(steps[0].mask[1], 3f64.sqrt());
}

#[test]
fn rendered_steps_can_be_appended() {
    let mut steps = compile(FOUR_POINT_SCRIPT).unwrap();
    let extra = vec![LiftingStep::with_mask(
        StepKind::Update,
        vec![-0.0415, 0.2915, 0.2915, -0.0415],
    )];
    let text = format!("{FOUR_POINT_SCRIPT}\n{}", render_steps(&extra));
    steps.extend(extra);
    assert_eq!(compile(&text).unwrap(), steps);
}

// ---------------------------------------------------------------------------
// Failing scripts
// ---------------------------------------------------------------------------

#[test]
fn coefficient_before_tag() {
    assert_eq!(compile("0.5;"), Err(ParseError::TagMissing { line: 1 }));
    let parsed = parse_steps("0.5;");
    assert!(parsed.steps.is_empty());
    assert!(parsed.diagnostic.unwrap().contains("tag missing"));
}

#[test]
fn errors_never_escape_parse_steps() {
    for text in ["predict; (1;", "predict; 1", "predict; foo(2);", "predict; 1 $ 2;", "predict; pow(1);"] {
        let parsed = parse_steps(text);
        assert!(parsed.steps.is_empty(), "{text}");
        assert!(parsed.diagnostic.is_some(), "{text}");
    }
}

#[test]
fn empty_script_is_empty() {
    let parsed = parse_steps("");
    assert!(parsed.is_ok());
    assert!(parsed.steps.is_empty());
}
