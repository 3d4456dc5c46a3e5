use crate::{
    ast::UnaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
};

impl Context {
    /// Evaluates a unary operation on a value.
    ///
    /// Supported operators:
    /// - `Plus`: identity on every type.
    /// - `Negate`: integer negation.
    /// - `Not`: boolean negation.
    ///
    /// # Parameters
    /// - `op`: Unary operator.
    /// - `value`: Input value.
    /// - `line`: Line number for error reporting.
    ///
    /// # Example
    /// ```
    /// use pato::{
    ///     ast::UnaryOperator,
    ///     interpreter::{evaluator::core::Context, value::Value},
    /// };
    ///
    /// let v = Context::eval_unary(UnaryOperator::Negate, Value::Int(5), 1).unwrap();
    /// assert_eq!(v, Value::Int(-5));
    ///
    /// let v = Context::eval_unary(UnaryOperator::Not, Value::Bool(true), 1).unwrap();
    /// assert_eq!(v, Value::Bool(false));
    ///
    /// assert!(Context::eval_unary(UnaryOperator::Not, Value::Int(0), 1).is_err());
    /// ```
    pub fn eval_unary(op: UnaryOperator, value: Value, line: usize) -> EvalResult<Value> {
        match (op, value) {
            (UnaryOperator::Plus, value) => Ok(value),
            (UnaryOperator::Negate, Value::Int(n)) => {
                n.checked_neg()
                 .map(Value::Int)
                 .ok_or_else(|| RuntimeError::Overflow { op: op.to_string(),
                                                         line })
            },
            (UnaryOperator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (UnaryOperator::Negate | UnaryOperator::Not, value) => {
                Err(RuntimeError::UnsupportedUnary { op,
                                                     operand: value.ty(),
                                                     line })
            },
        }
    }
}
