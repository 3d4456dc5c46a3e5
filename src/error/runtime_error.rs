use thiserror::Error;

use crate::{
    ast::{BinaryOperator, UnaryOperator},
    error::ErrorKind,
    interpreter::value::SymbolType,
};

/// Represents all errors that can occur during evaluation and form extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read, assigned or extracted a variable that was never declared.
    #[error("Error on line {line}: Undeclared variable '{name}'.")]
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Declared a name that is already visible.
    #[error("Error on line {line}: Variable '{name}' is already declared.")]
    AlreadyDeclared {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Read a variable that was declared without an initializer and never
    /// assigned.
    #[error("Error on line {line}: Variable '{name}' is used before it is initialized.")]
    Uninitialized {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Two fields of the same form ended up with the same name.
    #[error("Error on line {line}: Form '{form}' already has a field named '{field}'.")]
    DuplicateField {
        /// The form being extracted.
        form:  String,
        /// The repeated field name.
        field: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Declared, assigned or initialized a variable with a value of the
    /// wrong type.
    #[error("Error on line {line}: Cannot store a {found} value in '{name}' of type {expected}.")]
    AssignmentTypeMismatch {
        /// The variable name.
        name:     String,
        /// The declared type.
        expected: SymbolType,
        /// The type of the value.
        found:    SymbolType,
        /// The source line where the error occurred.
        line:     usize,
    },
    /// Applied a binary operator to operand types it does not support.
    #[error("Error on line {line}: Operator '{op}' is not supported between {left} and {right}.")]
    UnsupportedBinary {
        /// The operator.
        op:    BinaryOperator,
        /// Type of the left operand.
        left:  SymbolType,
        /// Type of the right operand.
        right: SymbolType,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Applied a prefix operator to an operand type it does not support.
    #[error("Error on line {line}: Operator '{op}' cannot be applied to {operand}.")]
    UnsupportedUnary {
        /// The operator.
        op:      UnaryOperator,
        /// Type of the operand.
        operand: SymbolType,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// An `if` or `for` condition did not evaluate to a boolean.
    #[error("Error on line {line}: Condition of {construct} must be BOOL, found {found}.")]
    ConditionNotBoolean {
        /// `if` or `for`.
        construct: &'static str,
        /// The type of the condition value.
        found:     SymbolType,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// A field property had a value that cannot be used for its key.
    #[error("Error on line {line}: Property '{key}' of field '{field}' {details}.")]
    InvalidProperty {
        /// The field being extracted.
        field:   String,
        /// The property key.
        key:     String,
        /// Description of what is wrong.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Division by zero.
    #[error("Error on line {line}: Division by zero.")]
    DivisionByZero {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An integer operation left the 64-bit range.
    #[error("Error on line {line}: Integer overflow in '{op}'.")]
    Overflow {
        /// The operator that overflowed.
        op:   String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Too many loop iterations.
    #[error("Error on line {line}: Iteration budget of {limit} exceeded.")]
    IterationBudgetExceeded {
        /// The configured iteration limit.
        limit: u64,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// The wall-clock budget ran out.
    #[error("Error on line {line}: Evaluation timed out.")]
    TimedOut {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The host cancelled the compile.
    #[error("Error on line {line}: Compilation was cancelled.")]
    Cancelled {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A node reached the evaluator in a position the parser never puts it.
    #[error("Error on line {line}: Unexpected {node} during {phase}.")]
    UnexpectedNode {
        /// Short name of the node.
        node:  &'static str,
        /// What the evaluator was doing.
        phase: &'static str,
        /// The source line where the error occurred.
        line:  usize,
    },
}

impl RuntimeError {
    /// Classifies the error into the language's error taxonomy.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UndeclaredVariable { .. }
            | Self::AlreadyDeclared { .. }
            | Self::Uninitialized { .. }
            | Self::DuplicateField { .. } => ErrorKind::Name,
            Self::AssignmentTypeMismatch { .. }
            | Self::UnsupportedBinary { .. }
            | Self::UnsupportedUnary { .. }
            | Self::ConditionNotBoolean { .. }
            | Self::InvalidProperty { .. } => ErrorKind::Type,
            Self::DivisionByZero { .. } | Self::Overflow { .. } => ErrorKind::Arithmetic,
            Self::IterationBudgetExceeded { .. } | Self::TimedOut { .. } | Self::Cancelled { .. } => {
                ErrorKind::Budget
            },
            Self::UnexpectedNode { .. } => ErrorKind::Internal,
        }
    }

    /// Source line the error was reported on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::UndeclaredVariable { line, .. }
            | Self::AlreadyDeclared { line, .. }
            | Self::Uninitialized { line, .. }
            | Self::DuplicateField { line, .. }
            | Self::AssignmentTypeMismatch { line, .. }
            | Self::UnsupportedBinary { line, .. }
            | Self::UnsupportedUnary { line, .. }
            | Self::ConditionNotBoolean { line, .. }
            | Self::InvalidProperty { line, .. }
            | Self::DivisionByZero { line }
            | Self::Overflow { line, .. }
            | Self::IterationBudgetExceeded { line, .. }
            | Self::TimedOut { line }
            | Self::Cancelled { line }
            | Self::UnexpectedNode { line, .. } => *line,
        }
    }
}
