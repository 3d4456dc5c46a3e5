use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Evaluates a binary operation on two already evaluated operands.
    ///
    /// Operands of the same type are handed to the integer, string or boolean
    /// rules. Operands of different types are never coerced: every operator
    /// fails on them with a type error.
    ///
    /// # Example
    /// ```
    /// use pato::{
    ///     ast::BinaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let sum = Context::eval_binary(BinaryOperator::Add, Value::from("a"), Value::from("b"), 1);
    /// assert_eq!(sum.unwrap(), Value::from("ab"));
    ///
    /// let mixed = Context::eval_binary(BinaryOperator::Add, Value::from("a"), Value::Int(1), 1);
    /// assert!(mixed.is_err());
    /// ```
    pub fn eval_binary(op: BinaryOperator,
                       left: Value,
                       right: Value,
                       line: usize)
                       -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(a), Value::Int(b)) => Self::eval_integer_binary(op, a, b, line),
            (Value::Str(a), Value::Str(b)) => Self::eval_string_binary(op, a, &b, line),
            (Value::Bool(a), Value::Bool(b)) => Self::eval_boolean_binary(op, a, b, line),
            (left, right) => Err(RuntimeError::UnsupportedBinary { op,
                                                                   left: left.ty(),
                                                                   right: right.ty(),
                                                                   line }),
        }
    }
}
