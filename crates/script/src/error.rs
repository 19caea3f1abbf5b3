//! Error types for the wavelift-script crate.

/// Error raised while tokenizing, parsing or evaluating a step script.
///
/// Line numbers are 1-based. Errors found after the last token carry no line.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// A character that starts no token.
    #[error("line {line}: unexpected character '{found}'")]
    UnexpectedCharacter {
        /// Line of the character.
        line: usize,
        /// The offending character.
        found: char,
    },

    /// A numeric literal the float parser rejects.
    #[error("line {line}: invalid number '{text}'")]
    InvalidNumber {
        /// Line of the literal.
        line: usize,
        /// Literal text.
        text: String,
    },

    /// The script ended while a token was still required.
    #[error("unexpected end: missing {expected}")]
    UnexpectedEnd {
        /// What the parser was waiting for.
        expected: String,
    },

    /// A token other than the required one.
    #[error("line {line}: required: {expected}, found: {found}")]
    Unexpected {
        /// Line of the token found.
        line: usize,
        /// What the parser was waiting for.
        expected: String,
        /// Text of the token found.
        found: String,
    },

    /// An identifier in call position that names no function.
    #[error("line {line}: unknown function {name}")]
    UnknownFunction {
        /// Line of the identifier.
        line: usize,
        /// The identifier.
        name: String,
    },

    /// A call with the wrong number of arguments.
    #[error("line {line}: {name} takes {expected} argument(s), found {found}")]
    Arity {
        /// Line of the call.
        line: usize,
        /// Function name.
        name: String,
        /// Arguments the function takes.
        expected: usize,
        /// Arguments supplied.
        found: usize,
    },

    /// A coefficient expression before the first tag.
    #[error("line {line}: tag missing (valid tags are predict, update, scale_even, scale_odd)")]
    TagMissing {
        /// Line of the expression.
        line: usize,
    },
}
