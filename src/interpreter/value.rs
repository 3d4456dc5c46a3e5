use std::fmt;

use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// The static type of a variable, as written after its name in a `var`
/// declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolType {
    /// `int`, a signed 64-bit integer.
    Int,
    /// `string`.
    String,
    /// `bool`.
    Bool,
}

impl SymbolType {
    /// The keyword that names this type in source code.
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::String => "string",
            Self::Bool => "bool",
        }
    }
}

impl fmt::Display for SymbolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "INT",
            Self::String => "STRING",
            Self::Bool => "BOOL",
        };
        f.write_str(name)
    }
}

/// Represents a runtime value in the interpreter.
///
/// Every value has exactly one of the three language types. Values are plain
/// data and are cloned freely between the symbol table and the evaluator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A string.
    Str(String),
    /// `true` or `false`, produced by literals, comparisons and `!`.
    Bool(bool),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl Value {
    /// The type tag of this value.
    #[must_use]
    pub const fn ty(&self) -> SymbolType {
        match self {
            Self::Int(_) => SymbolType::Int,
            Self::Str(_) => SymbolType::String,
            Self::Bool(_) => SymbolType::Bool,
        }
    }

    /// Returns the boolean inside a condition value.
    ///
    /// # Parameters
    /// - `construct`: `if` or `for`, used in the error message.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use pato::interpreter::value::Value;
    ///
    /// assert!(Value::Bool(true).as_condition("if", 1).unwrap());
    /// assert!(Value::Int(1).as_condition("if", 1).is_err());
    /// ```
    pub const fn as_condition(&self, construct: &'static str, line: usize) -> EvalResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(RuntimeError::ConditionNotBoolean { construct,
                                                         found: self.ty(),
                                                         line }),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prints_strings_without_quotes() {
        assert_eq!(Value::from("hi").to_string(), "hi");
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Bool(false).to_string(), "false");
    }

    #[test]
    fn type_names_are_upper_case() {
        assert_eq!(Value::Int(0).ty().to_string(), "INT");
        assert_eq!(SymbolType::String.to_string(), "STRING");
        assert_eq!(SymbolType::Bool.keyword(), "bool");
    }

    #[test]
    fn non_boolean_condition_is_a_type_error() {
        let err = Value::from("yes").as_condition("for", 3).unwrap_err();
        assert_eq!(err,
                   RuntimeError::ConditionNotBoolean { construct: "for",
                                                       found:     SymbolType::String,
                                                       line:      3, });
    }
}
