//! Evaluation of expressions and assembly of lifting steps.

use wavelift_lifting::LiftingStep;

use crate::ast::{
    AddOp, Call, Expression, Factor, Function, MulOp, Operand, Program, Statement, Term,
};
use crate::error::ParseError;

impl Expression {
    /// Evaluates the expression with native `f64` semantics.
    pub fn value(&self) -> f64 {
        self.rest
            .iter()
            .fold(self.first.value(), |acc, (op, term)| match op {
                AddOp::Add => acc + term.value(),
                AddOp::Sub => acc - term.value(),
            })
    }
}

impl Term {
    /// Evaluates the product chain.
    pub fn value(&self) -> f64 {
        self.rest
            .iter()
            .fold(self.first.value(), |acc, (op, factor)| match op {
                MulOp::Mul => acc * factor.value(),
                MulOp::Div => acc / factor.value(),
            })
    }
}

impl Factor {
    /// Evaluates the operand and applies the sign.
    pub fn value(&self) -> f64 {
        let v = match &self.operand {
            Operand::Number(v) => *v,
            Operand::Group(inner) => inner.value(),
            Operand::Call(call) => call.value(),
        };
        if self.negated { -v } else { v }
    }
}

impl Call {
    /// Evaluates the arguments and applies the function.
    pub fn value(&self) -> f64 {
        let args: Vec<f64> = self.args.iter().map(Expression::value).collect();
        self.function.apply(&args)
    }
}

impl Function {
    /// Applies the function; `args` has [`Function::arity`] elements.
    pub fn apply(&self, args: &[f64]) -> f64 {
        match self {
            Self::Sqrt => args[0].sqrt(),
            Self::Pow => args[0].powf(args[1]),
            Self::Sin => args[0].sin(),
            Self::Cos => args[0].cos(),
            Self::Exp => args[0].exp(),
            Self::Log => args[0].ln(),
            Self::Log2 => args[0].log2(),
            Self::Abs => args[0].abs(),
        }
    }
}

/// Turns a program into lifting steps.
///
/// Every tag opens a step; every coefficient is appended to the open step.
///
/// # Errors
///
/// Returns [`ParseError::TagMissing`] for a coefficient before the first tag.
pub fn assemble(program: &Program) -> Result<Vec<LiftingStep>, ParseError> {
    let mut steps: Vec<LiftingStep> = Vec::new();
    for statement in &program.statements {
        match statement {
            Statement::Tag { kind, .. } => steps.push(LiftingStep::new(*kind)),
            Statement::Coefficient { expr, line } => {
                let step = steps
                    .last_mut()
                    .ok_or(ParseError::TagMissing { line: *line })?;
                step.mask.push(expr.value());
            }
        }
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::token::tokenize;
    use approx::assert_relative_eq;

    fn eval(text: &str) -> f64 {
        let program = parse(&tokenize(&format!("predict; {text};")).unwrap()).unwrap();
        assemble(&program).unwrap()[0].mask[0]
    }

    #[test]
    fn arithmetic_precedence_and_associativity() {
        assert_eq!(eval("1 + 2 * 3"), 7.0);
        assert_eq!(eval("(1 + 2) * 3"), 9.0);
        assert_eq!(eval("8 / 4 / 2"), 1.0);
        assert_eq!(eval("10 - 4 - 3"), 3.0);
        assert_eq!(eval("-1/16"), -0.0625);
        assert_eq!(eval("2 * -3"), -6.0);
        assert_eq!(eval("+4"), 4.0);
    }

    #[test]
    fn functions() {
        assert_relative_eq!(eval("sqrt(3)"), 3f64.sqrt());
        assert_relative_eq!(eval("pow(2, 10)"), 1024.0);
        assert_relative_eq!(eval("sin(1) * sin(1) + cos(1) * cos(1)"), 1.0, epsilon = 1e-15);
        assert_relative_eq!(eval("log(exp(2))"), 2.0, epsilon = 1e-15);
        assert_eq!(eval("log2(8)"), 3.0);
        assert_eq!(eval("abs(-2.5)"), 2.5);
        assert_relative_eq!(eval("(sqrt(3) - 1) / 2"), (3f64.sqrt() - 1.0) / 2.0);
    }

    #[test]
    fn native_float_semantics() {
        assert_eq!(eval("1/0"), f64::INFINITY);
        assert_eq!(eval("-1/0"), f64::NEG_INFINITY);
        assert!(eval("0/0").is_nan());
        assert!(eval("sqrt(-1)").is_nan());
    }

    #[test]
    fn coefficients_follow_the_open_tag() {
        let program = parse(&tokenize("scale_even; 2; scale_odd; update; 1; 2;").unwrap()).unwrap();
        let steps = assemble(&program).unwrap();
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].mask, vec![2.0]);
        assert!(steps[1].mask.is_empty());
        assert_eq!(steps[2].mask, vec![1.0, 2.0]);
    }

    #[test]
    fn tag_missing() {
        let program = parse(&tokenize("\n0.5;").unwrap()).unwrap();
        assert_eq!(assemble(&program), Err(ParseError::TagMissing { line: 2 }));
    }
}
