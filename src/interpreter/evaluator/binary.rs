/// Type dispatch for binary operators.
pub mod core;

/// Operators on two integers.
pub mod integer;

/// Operators on two strings.
pub mod string;

/// Operators on two booleans.
pub mod boolean;
