//! Syntax tree of a step script, one type per grammar production.
//!
//! ```text
//! program    = { statement ";" }
//! statement  = tag | expression
//! expression = term { ("+" | "-") term }
//! term       = factor { ("*" | "/") factor }
//! factor     = [ "+" | "-" ] ( number | "(" expression ")" | call )
//! call       = identifier "(" [ expression { "," expression } ] ")"
//! ```

use wavelift_lifting::StepKind;

/// A parsed script.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

/// One `;`-terminated statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    /// Opens a new step of the given kind.
    Tag { kind: StepKind, line: usize },
    /// Appends its value to the open step's mask.
    Coefficient { expr: Expression, line: usize },
}

/// Additive chain, evaluated left to right.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    pub first: Term,
    pub rest: Vec<(AddOp, Term)>,
}

/// `+` or `-` between terms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddOp {
    Add,
    Sub,
}

/// Multiplicative chain, evaluated left to right.
#[derive(Clone, Debug, PartialEq)]
pub struct Term {
    pub first: Factor,
    pub rest: Vec<(MulOp, Factor)>,
}

/// `*` or `/` between factors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MulOp {
    Mul,
    Div,
}

/// An optionally negated operand.
#[derive(Clone, Debug, PartialEq)]
pub struct Factor {
    pub negated: bool,
    pub operand: Operand,
}

/// The innermost value of a factor.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    /// A numeric literal.
    Number(f64),
    /// A parenthesized expression.
    Group(Box<Expression>),
    /// A builtin function call.
    Call(Call),
}

/// A builtin call whose arity was checked by the parser.
#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub function: Function,
    pub args: Vec<Expression>,
}

/// Builtin functions, all on `f64` with native semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Pow,
    Sin,
    Cos,
    Exp,
    Log,
    Log2,
    Abs,
}

impl Function {
    /// Every builtin, in lookup order.
    pub const ALL: [Function; 8] = [
        Function::Sqrt,
        Function::Pow,
        Function::Sin,
        Function::Cos,
        Function::Exp,
        Function::Log,
        Function::Log2,
        Function::Abs,
    ];

    /// Identifier the function is called by.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Pow => "pow",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log2 => "log2",
            Self::Abs => "abs",
        }
    }

    /// Looks up a builtin by identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Number of arguments the function takes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Pow => 2,
            _ => 1,
        }
    }
}
