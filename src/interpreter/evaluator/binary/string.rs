use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{SymbolType, Value},
    },
};

impl Context {
    /// Evaluates an operator on two strings.
    ///
    /// `+` concatenates. `==`, `<` and `>` compare lexicographically by byte.
    /// Every other operator is a type error.
    pub fn eval_string_binary(op: BinaryOperator,
                              mut left: String,
                              right: &str,
                              line: usize)
                              -> EvalResult<Value> {
        match op {
            BinaryOperator::Add => {
                left.push_str(right);
                Ok(Value::Str(left))
            },
            BinaryOperator::Equal => Ok(Value::Bool(left == right)),
            BinaryOperator::Greater => Ok(Value::Bool(left.as_str() > right)),
            BinaryOperator::Less => Ok(Value::Bool(left.as_str() < right)),
            BinaryOperator::Sub
            | BinaryOperator::Mul
            | BinaryOperator::Div
            | BinaryOperator::And
            | BinaryOperator::Or => Err(RuntimeError::UnsupportedBinary { op,
                                                                         left: SymbolType::String,
                                                                         right: SymbolType::String,
                                                                         line }),
        }
    }
}
