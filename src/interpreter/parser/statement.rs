use crate::{
    ast::{Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            form::parse_form_declaration,
            utils::TokenStream,
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a form declaration, optionally followed by a newline.
/// - `Println(expr)`.
/// - a variable declaration.
/// - an assignment.
/// - a `for` loop.
/// - an `if` statement with an optional `else`.
/// - a blank line, which becomes a no-op.
///
/// The first token decides which construct is parsed; there is no
/// backtracking once it matched.
pub fn parse_statement(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let line = tokens.line();
    match tokens.peek() {
        Token::Form => {
            let form = parse_form_declaration(tokens)?;
            tokens.eat(&Token::NewLine)?;
            Ok(form)
        },
        Token::Println => parse_print(tokens, line),
        Token::Var => parse_variable_declaration(tokens, line),
        Token::Identifier(_) => parse_assignment(tokens, line),
        Token::While => parse_while(tokens, line),
        Token::If => parse_if(tokens, line),
        Token::NewLine => {
            tokens.advance()?;
            Ok(tokens.node(line, NodeKind::NoOp))
        },
        _ => Err(tokens.unexpected("a statement", "block")),
    }
}

/// Parses `Println ( expr ) NEWLINE`.
fn parse_print(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Node> {
    const CONSTRUCT: &str = "Println statement";

    tokens.expect(&Token::Println, CONSTRUCT)?;
    tokens.expect(&Token::LParen, CONSTRUCT)?;
    let expr = parse_expression(tokens)?;
    tokens.expect(&Token::RParen, CONSTRUCT)?;
    tokens.expect(&Token::NewLine, CONSTRUCT)?;

    Ok(tokens.node(line, NodeKind::Print(Box::new(expr))))
}

/// Parses `var ID TYPE [= expr] NEWLINE`.
fn parse_variable_declaration(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Node> {
    const CONSTRUCT: &str = "variable declaration";

    tokens.expect(&Token::Var, CONSTRUCT)?;
    let name = tokens.expect_identifier(CONSTRUCT)?;
    let Token::Type(ty) = *tokens.peek() else {
        return Err(tokens.unexpected("a type", CONSTRUCT));
    };
    tokens.advance()?;

    let init = if tokens.eat(&Token::Assign)? {
        Some(Box::new(parse_expression(tokens)?))
    } else {
        None
    };
    tokens.expect(&Token::NewLine, CONSTRUCT)?;

    Ok(tokens.node(line, NodeKind::VarDeclaration { name, ty, init }))
}

/// Parses `ID = expr NEWLINE`.
///
/// Also used for the assignments allowed inside a form-level `for` body.
pub(in crate::interpreter::parser) fn parse_assignment(tokens: &mut TokenStream<'_>,
                                                       line: usize)
                                                       -> ParseResult<Node> {
    const CONSTRUCT: &str = "assignment";

    let name = tokens.expect_identifier(CONSTRUCT)?;
    let target = tokens.node(line, NodeKind::Identifier(name));
    tokens.expect(&Token::Assign, CONSTRUCT)?;
    let value = parse_expression(tokens)?;
    tokens.expect(&Token::NewLine, CONSTRUCT)?;

    Ok(tokens.node(line,
                   NodeKind::Assignment { target: Box::new(target),
                                          value:  Box::new(value), }))
}

/// Parses `for expr block NEWLINE`, the language's while loop.
fn parse_while(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Node> {
    const CONSTRUCT: &str = "for loop";

    tokens.expect(&Token::While, CONSTRUCT)?;
    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens, CONSTRUCT)?;
    tokens.expect(&Token::NewLine, CONSTRUCT)?;

    Ok(tokens.node(line,
                   NodeKind::While { condition: Box::new(condition),
                                     body:      Box::new(body), }))
}

/// Parses `if expr block (else block)? NEWLINE`.
fn parse_if(tokens: &mut TokenStream<'_>, line: usize) -> ParseResult<Node> {
    const CONSTRUCT: &str = "if statement";

    tokens.expect(&Token::If, CONSTRUCT)?;
    let condition = parse_expression(tokens)?;
    let then_branch = parse_block(tokens, CONSTRUCT)?;
    let else_branch = if tokens.eat(&Token::Else)? {
        Some(Box::new(parse_block(tokens, CONSTRUCT)?))
    } else {
        None
    };
    tokens.expect(&Token::NewLine, CONSTRUCT)?;

    Ok(tokens.node(line,
                   NodeKind::If { condition: Box::new(condition),
                                  then_branch: Box::new(then_branch),
                                  else_branch }))
}
