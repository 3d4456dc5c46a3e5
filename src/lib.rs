//! # pato
//!
//! pato compiles a small imperative language with declarative form blocks.
//! A program declares typed variables, loops, branches and prints, and
//! describes input forms whose fields may depend on those variables.
//! Compiling a program evaluates it and returns the extracted form
//! definitions together with a generated React component for each.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    ast::Node,
    interpreter::{evaluator::core::Context, parser::core::parse_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the [`ast::Node`] type and the operator and field
/// kinds that make up the syntax tree. The tree is built by the parser and
/// walked by the evaluator.
///
/// # Responsibilities
/// - Defines one node variant per language construct.
/// - Attaches ids and source lines to nodes for labels and error reporting.
pub mod ast;
/// Generates React form components from form definitions.
pub mod codegen;
/// Compile options: evaluation budget and cancellation.
pub mod config;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// This module defines all errors that can be raised while compiling. Every
/// error carries the source line it was raised on and a classification into
/// the language's error kinds.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Classifies every error with [`error::ErrorKind`].
pub mod error;
/// Form definitions and the store they are registered in.
pub mod forms;
/// Orchestrates lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Coordinates the lexer, parser, evaluator, symbol tables and values.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Checked integer arithmetic shared by the evaluator.
pub mod util;

pub use config::{CancellationToken, CompileOptions};
pub use error::{Error, ErrorKind};
pub use forms::{FieldProperties, FormDefinition, FormField};

/// Everything a successful compile produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compilation {
    /// Extracted forms, in the order their names were first registered.
    pub forms:     Vec<FormDefinition>,
    /// One generated component per form, in the same order as `forms`.
    pub generated: Vec<String>,
    /// Lines printed by `Println`, in execution order.
    pub output:    Vec<String>,
}

/// Parses `source` into its syntax tree without evaluating it.
///
/// # Errors
/// Returns the first lexical or syntax error.
///
/// # Examples
/// ```
/// let root = pato::parse("{\nvar x int = 1\n}").unwrap();
/// assert_eq!(root.describe(), "block");
///
/// assert!(pato::parse("{\nvar x int = \n}").is_err());
/// ```
pub fn parse(source: &str) -> Result<Node, Error> {
    Ok(parse_program(source)?)
}

/// Compiles `source` with the default [`CompileOptions`].
///
/// # Errors
/// Returns the first error of any phase. No partial result is produced.
///
/// # Examples
/// ```
/// let source = "{\n\
///               form contact {\n\
///                 string_field email { label: \"Email\", required: true }\n\
///               }\n\
///               }";
/// let compilation = pato::compile(source).unwrap();
/// assert_eq!(compilation.forms[0].name, "contact");
/// assert_eq!(compilation.forms[0].fields[0].properties.label, "Email");
/// assert!(compilation.generated[0].contains("export function ContactForm()"));
///
/// // Intentional error: strings and integers do not mix.
/// let err = pato::compile("{\nPrintln(\"a\" + 1)\n}").unwrap_err();
/// assert_eq!(err.kind(), pato::ErrorKind::Type);
/// ```
pub fn compile(source: &str) -> Result<Compilation, Error> {
    compile_with(source, &CompileOptions::default())
}

/// Compiles `source`, bounding evaluation by `options`.
///
/// Every call owns a fresh context, so the form store starts out empty and
/// compiling the same source twice gives the same result.
///
/// # Errors
/// Returns the first error of any phase, including budget exhaustion and
/// cancellation.
pub fn compile_with(source: &str, options: &CompileOptions) -> Result<Compilation, Error> {
    tracing::debug!(bytes = source.len(), "compile started");

    let root = parse_program(source)?;
    let mut context = Context::with_options(options);
    context.eval_statement(&root)?;

    let iterations = context.iterations();
    let forms = context.forms.into_forms();
    let generated = codegen::generate_forms(&forms);
    tracing::debug!(forms = forms.len(),
                    output_lines = context.output.len(),
                    iterations,
                    "compile finished");

    Ok(Compilation { forms,
                     generated,
                     output: context.output })
}
