use thiserror::Error;

use crate::error::{ErrorKind, LexError};

/// Represents all errors that can occur during lexing or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    #[error(transparent)]
    Lex(#[from] LexError),
    /// Found a token that does not fit the construct being parsed.
    #[error("Error on line {line}: Expected {expected} in {construct}, found {found}.")]
    UnexpectedToken {
        /// What the grammar required at this point.
        expected:  String,
        /// The token encountered.
        found:     String,
        /// The construct being parsed, e.g. `field declaration`.
        construct: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Reached the end of input in the middle of a construct.
    #[error("Error on line {line}: Unexpected end of input in {construct}.")]
    UnexpectedEndOfInput {
        /// The construct being parsed.
        construct: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Found extra tokens after the program block was closed.
    #[error("Error on line {line}: Expected end of input after the program block, found {found}.")]
    TrailingInput {
        /// The extra token.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// A statement that is not allowed inside a form-level `if` or `for`.
    #[error("Error on line {line}: {statement} is not allowed inside a form {container}.")]
    StatementNotAllowedInForm {
        /// Description of the rejected statement.
        statement: &'static str,
        /// `if` or `for`.
        container: &'static str,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Parentheses, prefix operators, operator chains and blocks nested
    /// past the parser's limit.
    #[error("Error on line {line}: {construct} is nested more than {limit} levels deep.")]
    NestingTooDeep {
        /// The construct that crossed the limit.
        construct: &'static str,
        /// The maximum nesting depth.
        limit:     usize,
        /// The source line where the error occurred.
        line:      usize,
    },
}

impl ParseError {
    /// Classifies the error into the language's error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lex(_) => ErrorKind::Lexical,
            Self::UnexpectedToken { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::TrailingInput { .. }
            | Self::StatementNotAllowedInForm { .. }
            | Self::NestingTooDeep { .. } => ErrorKind::Syntax,
        }
    }

    /// Source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Lex(error) => error.line(),
            Self::UnexpectedToken { line, .. }
            | Self::UnexpectedEndOfInput { line, .. }
            | Self::TrailingInput { line, .. }
            | Self::StatementNotAllowedInForm { line, .. }
            | Self::NestingTooDeep { line, .. } => *line,
        }
    }
}
