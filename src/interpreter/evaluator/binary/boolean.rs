use crate::{
    ast::BinaryOperator,
    error::RuntimeError,
    interpreter::{
        evaluator::core::{Context, EvalResult},
        value::{SymbolType, Value},
    },
};

impl Context {
    /// Evaluates an operator on two booleans.
    ///
    /// `&&`, `||` and `==` behave as usual. `<` and `>` order `false` before
    /// `true`. Arithmetic on booleans is a type error.
    pub fn eval_boolean_binary(op: BinaryOperator,
                               left: bool,
                               right: bool,
                               line: usize)
                               -> EvalResult<Value> {
        use BinaryOperator::{Add, And, Div, Equal, Greater, Less, Mul, Or, Sub};

        match op {
            And => Ok(Value::Bool(left && right)),
            Or => Ok(Value::Bool(left || right)),
            Equal => Ok(Value::Bool(left == right)),
            Greater => Ok(Value::Bool(left & !right)),
            Less => Ok(Value::Bool(!left & right)),
            Add | Sub | Mul | Div => Err(RuntimeError::UnsupportedBinary { op,
                                                                           left: SymbolType::Bool,
                                                                           right: SymbolType::Bool,
                                                                           line }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_puts_false_first() {
        assert_eq!(Context::eval_boolean_binary(BinaryOperator::Greater, true, false, 1).unwrap(),
                   Value::Bool(true));
        assert_eq!(Context::eval_boolean_binary(BinaryOperator::Less, true, false, 1).unwrap(),
                   Value::Bool(false));
        assert_eq!(Context::eval_boolean_binary(BinaryOperator::Less, false, true, 1).unwrap(),
                   Value::Bool(true));
    }

    #[test]
    fn addition_of_booleans_is_rejected() {
        assert!(Context::eval_boolean_binary(BinaryOperator::Add, true, true, 1).is_err());
    }
}
