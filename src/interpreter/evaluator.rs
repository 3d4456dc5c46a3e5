/// Binary operator evaluation logic.
///
/// Dispatches on the operand types: integer arithmetic and comparison, string
/// concatenation and comparison, boolean logic. Mixed operand types are
/// rejected.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements identity, integer negation and boolean NOT.
pub mod unary;

/// Core evaluation logic and context management.
///
/// Contains the runtime context, the expression and statement dispatch, and
/// the result type shared by the evaluator.
pub mod core;

/// Evaluation of `if` statements and `for` loops.
///
/// Checks conditions and charges loop iterations against the budget.
pub mod control_flow;

/// Form extraction.
///
/// Turns a form declaration into a flat field list, resolving form-level
/// conditionals and unrolling form-level loops, and registers the result.
pub mod form;

/// Evaluation limits.
///
/// Counts loop iterations and watches the deadline and cancellation token.
pub mod budget;
