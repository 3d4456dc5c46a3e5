use crate::{ast::BinaryOperator, error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Integer division rounding toward negative infinity.
///
/// Returns `None` when `divisor` is zero or the quotient does not fit in an
/// `i64` (`i64::MIN / -1`).
///
/// ## Example
/// ```
/// use pato::util::num::floor_div;
///
/// assert_eq!(floor_div(7, 2), Some(3));
/// assert_eq!(floor_div(-7, 2), Some(-4));
/// assert_eq!(floor_div(7, -2), Some(-4));
/// assert_eq!(floor_div(1, 0), None);
/// ```
#[must_use]
pub const fn floor_div(dividend: i64, divisor: i64) -> Option<i64> {
    let Some(quotient) = dividend.checked_div(divisor) else {
        return None;
    };
    let Some(remainder) = dividend.checked_rem(divisor) else {
        return None;
    };
    if remainder != 0 && (remainder < 0) != (divisor < 0) {
        return quotient.checked_sub(1);
    }
    Some(quotient)
}

/// Applies an arithmetic operator to two integers.
///
/// ## Errors
/// - `RuntimeError::DivisionByZero` for `/` with a zero divisor.
/// - `RuntimeError::Overflow` when the result does not fit in an `i64`.
///
/// ## Parameters
/// - `op`: One of `+ - * /`.
/// - `line`: Source code line number for error reporting.
///
/// ## Example
/// ```
/// use pato::{ast::BinaryOperator, error::RuntimeError, util::num::checked_arithmetic};
///
/// assert_eq!(checked_arithmetic(BinaryOperator::Mul, 6, 7, 1).unwrap(), 42);
/// assert!(matches!(checked_arithmetic(BinaryOperator::Div, 1, 0, 3),
///                  Err(RuntimeError::DivisionByZero { line: 3 })));
/// assert!(matches!(checked_arithmetic(BinaryOperator::Add, i64::MAX, 1, 3),
///                  Err(RuntimeError::Overflow { .. })));
/// ```
pub fn checked_arithmetic(op: BinaryOperator,
                          left: i64,
                          right: i64,
                          line: usize)
                          -> EvalResult<i64> {
    let result = match op {
        BinaryOperator::Add => left.checked_add(right),
        BinaryOperator::Sub => left.checked_sub(right),
        BinaryOperator::Mul => left.checked_mul(right),
        BinaryOperator::Div => {
            if right == 0 {
                return Err(RuntimeError::DivisionByZero { line });
            }
            floor_div(left, right)
        },
        BinaryOperator::Equal
        | BinaryOperator::Greater
        | BinaryOperator::Less
        | BinaryOperator::And
        | BinaryOperator::Or => {
            return Err(RuntimeError::UnexpectedNode { node: "non-arithmetic operator",
                                                      phase: "integer arithmetic",
                                                      line });
        },
    };
    result.ok_or_else(|| RuntimeError::Overflow { op: op.to_string(),
                                                  line })
}
