/// The evaluator module executes syntax tree nodes.
///
/// The evaluator walks the tree, evaluates expressions and statements,
/// maintains variable state and extracts form definitions. It is the core
/// execution engine of the compiler.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements with strict typing.
/// - Resolves form declarations into flat field lists.
/// - Reports runtime errors and enforces the evaluation budget.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer (tokenizer) reads the raw source text and produces a stream of
/// tokens, each corresponding to meaningful language elements such as
/// literals, identifiers, operators, delimiters and keywords. This is the
/// first stage of compilation.
///
/// # Responsibilities
/// - Strips line comments and converts the input into tokens with line
///   numbers.
/// - Handles integer and string literals, identifiers, keywords and
///   operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser pulls tokens from the lexer with a single token of lookahead
/// and constructs the tree for the whole program, including form and field
/// declarations.
///
/// # Responsibilities
/// - Converts tokens into [`crate::ast::Node`]s.
/// - Validates grammar and syntax, reporting errors with the construct being
///   parsed and the line.
pub mod parser;
/// Variable bindings.
///
/// Declares the symbol, the per-frame symbol table and the scope stack that
/// isolates form loops from the enclosing program.
pub mod symbol_table;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the three value types of the language and the static types that
/// variable declarations name.
pub mod value;
