use crate::{
    ast::Node,
    error::ParseError,
    interpreter::{
        lexer::{Token, strip_comments},
        parser::{binary::parse_boolean_expression, block::parse_block, utils::TokenStream},
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// A program is a single block. Blank lines before it and after it are
/// accepted; anything else after the closing brace is an error.
///
/// Grammar: `program := NEWLINE* block NEWLINE* EOF`
///
/// # Parameters
/// - `source`: Raw source text. Comments are stripped here.
///
/// # Returns
/// The root [`crate::ast::NodeKind::Block`] node.
pub fn parse_program(source: &str) -> ParseResult<Node> {
    let cleaned = strip_comments(source);
    let mut tokens = TokenStream::new(&cleaned)?;

    tokens.skip_newlines()?;
    let root = parse_block(&mut tokens, "program")?;
    tokens.skip_newlines()?;

    if !tokens.check(&Token::Eof) {
        return Err(ParseError::TrailingInput { found: tokens.peek().to_string(),
                                               line:  tokens.line(), });
    }
    tracing::trace!(root = %root.id, "parsed program");
    Ok(root)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing. It begins at the
/// lowest-precedence level, `||`, and recursively descends through the
/// precedence hierarchy.
///
/// Grammar: `expression := boolean_expression`
pub fn parse_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_boolean_expression(tokens)
}
