use crate::{
    ast::{Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult, form::parse_field_declaration, statement::parse_statement,
            utils::TokenStream,
        },
    },
};

/// Parses a block delimited by braces.
///
/// The opening brace must be followed directly by a newline. Statements,
/// field declarations and blank lines follow until the closing brace. Nothing
/// after the closing brace is consumed.
///
/// Grammar: `block := "{" NEWLINE (statement | field_declaration)* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned at the opening brace.
/// - `construct`: What the block belongs to, used in error messages.
///
/// # Returns
/// A [`NodeKind::Block`] node holding the statements in source order.
pub fn parse_block(tokens: &mut TokenStream<'_>, construct: &'static str) -> ParseResult<Node> {
    let line = tokens.line();
    tokens.enter(construct)?;
    tokens.expect(&Token::LBrace, construct)?;
    tokens.expect(&Token::NewLine, construct)?;

    let mut statements = Vec::new();
    while !tokens.eat(&Token::RBrace)? {
        if tokens.check(&Token::Eof) {
            return Err(tokens.unexpected("'}'", construct));
        }
        let statement = if tokens.peek().is_field_keyword() {
            parse_field_declaration(tokens)?
        } else {
            parse_statement(tokens)?
        };
        statements.push(statement);
    }

    tokens.leave(1);
    Ok(tokens.node(line, NodeKind::Block(statements)))
}
