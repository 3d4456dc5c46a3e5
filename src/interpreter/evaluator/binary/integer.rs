use crate::{
    ast::BinaryOperator,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::Value,
    },
    util::num::checked_arithmetic,
};

impl Context {
    /// Evaluates an operator on two integers.
    ///
    /// Arithmetic is checked and `/` rounds toward negative infinity.
    /// Comparisons produce booleans. `&&` and `||` treat non-zero as true and
    /// produce booleans as well.
    pub fn eval_integer_binary(op: BinaryOperator,
                               left: i64,
                               right: i64,
                               line: usize)
                               -> EvalResult<Value> {
        use BinaryOperator::{Add, And, Div, Equal, Greater, Less, Mul, Or, Sub};

        match op {
            Add | Sub | Mul | Div => Ok(Value::Int(checked_arithmetic(op, left, right, line)?)),
            Equal => Ok(Value::Bool(left == right)),
            Greater => Ok(Value::Bool(left > right)),
            Less => Ok(Value::Bool(left < right)),
            And => Ok(Value::Bool(left != 0 && right != 0)),
            Or => Ok(Value::Bool(left != 0 || right != 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuntimeError;

    fn int(op: BinaryOperator, a: i64, b: i64) -> EvalResult<Value> {
        Context::eval_integer_binary(op, a, b, 1)
    }

    #[test]
    fn division_floors() {
        assert_eq!(int(BinaryOperator::Div, 7, 2).unwrap(), Value::Int(3));
        assert_eq!(int(BinaryOperator::Div, -7, 2).unwrap(), Value::Int(-4));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(int(BinaryOperator::Div, 1, 0).unwrap_err(),
                   RuntimeError::DivisionByZero { line: 1 });
    }

    #[test]
    fn truthiness_of_integers() {
        assert_eq!(int(BinaryOperator::And, 2, 0).unwrap(), Value::Bool(false));
        assert_eq!(int(BinaryOperator::Or, 0, -3).unwrap(), Value::Bool(true));
    }

    #[test]
    fn comparisons() {
        assert_eq!(int(BinaryOperator::Less, 1, 2).unwrap(), Value::Bool(true));
        assert_eq!(int(BinaryOperator::Greater, 1, 2).unwrap(), Value::Bool(false));
        assert_eq!(int(BinaryOperator::Equal, 5, 5).unwrap(), Value::Bool(true));
    }
}
