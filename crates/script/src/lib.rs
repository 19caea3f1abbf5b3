//! # wavelift-script
//!
//! A tiny language for writing custom lifting schemes as text.
//!
//! A script is a sequence of `;`-terminated statements. A tag (`predict`,
//! `update`, `scale_even`, `scale_odd`) opens a new step; every following
//! arithmetic expression is evaluated to a number and appended to that
//! step's mask.
//!
//! ```text
//! predict;
//! -1/16; 9/16; 9/16; -1/16;   // four-point prediction
//!
//! update;
//! 0.25; 0.25;
//! ```
//!
//! Expressions support `+ - * /`, parentheses, unary signs and the functions
//! `sqrt`, `pow`, `sin`, `cos`, `exp`, `log`, `log2` and `abs`.
//!
//! ## Pipeline
//!
//! ```text
//! text ──tokenize──> Vec<Token> ──parse──> Program ──assemble──> Vec<LiftingStep>
//! ```
//!
//! [`compile`] runs the pipeline and reports the first error. [`parse_steps`]
//! is the entry point for front ends: it never fails, logs the error and
//! returns an empty step list instead.

pub mod ast;
mod error;
mod eval;
mod parser;
mod token;

use std::fmt::Write;

use tracing::{debug, error};
use wavelift_lifting::LiftingStep;

pub use error::ParseError;
pub use eval::assemble;
pub use parser::parse;
pub use token::{Token, TokenKind, tokenize};

/// Compiles script text into lifting steps.
///
/// # Errors
///
/// Returns the first tokenizer, parser or assembly error.
///
/// # Example
///
/// ```
/// use wavelift_lifting::StepKind;
///
/// let steps = wavelift_script::compile("predict; 0.5; 0.5; update; 0.25; 0.25;").unwrap();
/// assert_eq!(steps.len(), 2);
/// assert_eq!(steps[1].kind, StepKind::Update);
/// ```
pub fn compile(text: &str) -> Result<Vec<LiftingStep>, ParseError> {
    let tokens = tokenize(text)?;
    let program = parse(&tokens)?;
    assemble(&program)
}

/// Outcome of [`parse_steps`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedScript {
    /// Steps in source order; empty when the script failed to parse.
    pub steps: Vec<LiftingStep>,
    /// `parse error: ...` line when the script failed to parse.
    pub diagnostic: Option<String>,
}

impl ParsedScript {
    /// Returns `true` if the script parsed without error.
    pub fn is_ok(&self) -> bool {
        self.diagnostic.is_none()
    }
}

/// Parses script text without ever failing.
///
/// Errors are logged and reported in [`ParsedScript::diagnostic`]; the step
/// list is then empty.
pub fn parse_steps(text: &str) -> ParsedScript {
    match compile(text) {
        Ok(steps) => {
            debug!(steps = steps.len(), "parsed step script");
            ParsedScript {
                steps,
                diagnostic: None,
            }
        }
        Err(e) => {
            error!(error = %e, "failed to parse step script");
            ParsedScript {
                steps: Vec::new(),
                diagnostic: Some(format!("parse error: {e}")),
            }
        }
    }
}

/// Prints steps back as script text that [`compile`]s to the same steps.
pub fn render_steps(steps: &[LiftingStep]) -> String {
    let mut out = String::new();
    for (i, step) in steps.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{};", step.kind.tag());
        for &c in &step.mask {
            let _ = writeln!(out, "{};", render_number(c));
        }
    }
    out
}

fn render_number(v: f64) -> String {
    if v.is_nan() {
        "0/0".to_string()
    } else if v == f64::INFINITY {
        "1/0".to_string()
    } else if v == f64::NEG_INFINITY {
        "-1/0".to_string()
    } else {
        format!("{v:?}")
    }
}
