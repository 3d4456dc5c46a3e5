/// Entry points of the parser.
///
/// Contains the program rule, the expression entry point and the shared
/// result type.
pub mod core;

/// Token stream with single-token lookahead.
///
/// Wraps the tokenizer, hands out node ids and builds the errors shared by
/// every grammar rule.
pub mod utils;

/// Binary operator parsing.
///
/// Implements the precedence levels from `* /` up to `||`, all
/// left-associative.
pub mod binary;

/// Factor parsing.
///
/// Literals, identifiers, prefix operators, parenthesized expressions and
/// `Scan()`.
pub mod unary;

/// Block parsing.
///
/// Parses `{` NEWLINE statement* `}` sequences.
pub mod block;

/// Statement parsing.
///
/// Declarations, assignments, `Println`, `if`, `for` and blank lines.
pub mod statement;

/// Form and field declaration parsing.
///
/// Parses `form` blocks, field declarations and their property lists, and
/// rejects statements that may not appear inside a form.
pub mod form;
