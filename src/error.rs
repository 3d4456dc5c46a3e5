/// Lexical errors.
///
/// Raised by the tokenizer when the source contains a character the language
/// does not know, a string literal that never closes, a half-written `&&` or
/// `||`, or an integer literal that does not fit in 64 bits.
pub mod lex_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building the syntax tree.
/// Parse errors name the construct that was being parsed, what was expected
/// and what was found instead. Lexical errors surface through this type as
/// well, since tokens are pulled lazily by the parser.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: name and
/// type errors, arithmetic failures, malformed form declarations and budget
/// exhaustion.
pub mod runtime_error;

pub use lex_error::LexError;
pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;

/// Broad classification of a compile failure.
///
/// Hosts use this to decide how to present an error without matching on
/// every individual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unknown character, unterminated string and similar tokenizer failures.
    Lexical,
    /// Unexpected token at a grammar point.
    Syntax,
    /// Undeclared or already declared identifier.
    Name,
    /// Operand, condition or assignment type mismatch.
    Type,
    /// Division by zero or integer overflow.
    Arithmetic,
    /// The evaluation budget ran out or the compile was cancelled.
    Budget,
    /// A state the parser never produces was reached.
    Internal,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lexical => "LexicalError",
            Self::Syntax => "SyntaxError",
            Self::Name => "NameError",
            Self::Type => "TypeError",
            Self::Arithmetic => "ArithmeticError",
            Self::Budget => "BudgetError",
            Self::Internal => "InternalError",
        };
        f.write_str(name)
    }
}

/// Any error that aborts a compile.
///
/// Every failure is fatal: a compile either produces its full result or one
/// of these.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<LexError> for Error {
    fn from(error: LexError) -> Self {
        Self::Parse(ParseError::Lex(error))
    }
}

impl Error {
    /// Classifies the error into the language's error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Parse(error) => error.kind(),
            Self::Runtime(error) => error.kind(),
        }
    }

    /// Source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Parse(error) => error.line(),
            Self::Runtime(error) => error.line(),
        }
    }
}
