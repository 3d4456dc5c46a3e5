use thiserror::Error;

/// Represents all errors that can occur while turning source text into tokens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character that starts no token.
    #[error("Error on line {line}: Unexpected character '{character}'.")]
    UnexpectedCharacter {
        /// The offending character.
        character: char,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A string literal whose closing quote is missing.
    #[error("Error on line {line}: Unterminated string literal.")]
    UnterminatedString {
        /// The line the string starts on.
        line: usize,
    },
    /// A lone `&` or `|`.
    #[error("Error on line {line}: Expected '{expected}' but found a single '{found}'.")]
    IncompleteOperator {
        /// The two-character operator that was started.
        expected: &'static str,
        /// The character actually present.
        found:    char,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// A run of digits too large for a 64-bit integer.
    #[error("Error on line {line}: Integer literal '{literal}' is too large.")]
    IntegerTooLarge {
        /// The digits as written.
        literal: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl LexError {
    /// Source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UnexpectedCharacter { line, .. }
            | Self::UnterminatedString { line }
            | Self::IncompleteOperator { line, .. }
            | Self::IntegerTooLarge { line, .. } => *line,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;
