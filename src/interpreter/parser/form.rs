use crate::{
    ast::{FieldKind, Node, NodeKind, PropertyValue},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression},
            utils::TokenStream,
        },
    },
};

/// Parses `form ID { ... }`.
///
/// The body holds field declarations, `if` blocks, `for` blocks and blank
/// lines, in any order. Unlike ordinary blocks, the opening brace does not
/// need to be followed by a newline and the `if`/`for` blocks take no `else`
/// and no trailing newline.
pub fn parse_form_declaration(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    const CONSTRUCT: &str = "form declaration";

    let line = tokens.line();
    tokens.expect(&Token::Form, CONSTRUCT)?;
    let name = tokens.expect_identifier(CONSTRUCT)?;
    tokens.expect(&Token::LBrace, CONSTRUCT)?;

    let mut body = Vec::new();
    loop {
        tokens.skip_newlines()?;
        if tokens.eat(&Token::RBrace)? {
            break;
        }
        let child = if tokens.check(&Token::If) {
            parse_form_conditional(tokens)?
        } else if tokens.check(&Token::While) {
            parse_form_loop(tokens)?
        } else if tokens.peek().is_field_keyword() {
            parse_field_declaration(tokens)?
        } else {
            return Err(tokens.unexpected("a field declaration, 'if' or 'for'", CONSTRUCT));
        };
        body.push(child);
    }

    Ok(tokens.node(line, NodeKind::FormDeclaration { name, body }))
}

/// Parses a form-level `if expr block`.
fn parse_form_conditional(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let line = tokens.line();
    tokens.expect(&Token::If, "form if")?;
    let condition = parse_expression(tokens)?;
    let then_branch = parse_block(tokens, "form if")?;
    check_form_body(&then_branch, "if")?;

    Ok(tokens.node(line,
                   NodeKind::If { condition:   Box::new(condition),
                                  then_branch: Box::new(then_branch),
                                  else_branch: None, }))
}

/// Parses a form-level `for expr block`.
fn parse_form_loop(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    let line = tokens.line();
    tokens.expect(&Token::While, "form for")?;
    let condition = parse_expression(tokens)?;
    let body = parse_block(tokens, "form for")?;
    check_form_body(&body, "for")?;

    Ok(tokens.node(line,
                   NodeKind::While { condition: Box::new(condition),
                                     body:      Box::new(body), }))
}

/// Rejects statements that field extraction cannot handle.
///
/// An `if` body may only declare fields. A `for` body may also assign, so the
/// loop condition can make progress.
fn check_form_body(block: &Node, container: &'static str) -> ParseResult<()> {
    let NodeKind::Block(statements) = &block.kind else {
        return Ok(());
    };
    for statement in statements {
        let allowed = match statement.kind {
            NodeKind::FieldDeclaration { .. } | NodeKind::NoOp => true,
            NodeKind::Assignment { .. } => container == "for",
            _ => false,
        };
        if !allowed {
            return Err(ParseError::StatementNotAllowedInForm { statement: statement.describe(),
                                                               container,
                                                               line: statement.line });
        }
    }
    Ok(())
}

/// Parses `string_field|select_field|checkbox_field ID { properties }`.
pub fn parse_field_declaration(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    const CONSTRUCT: &str = "field declaration";

    let line = tokens.line();
    let kind = match tokens.peek() {
        Token::StringField => FieldKind::String,
        Token::SelectField => FieldKind::Select,
        Token::CheckboxField => FieldKind::Checkbox,
        _ => return Err(tokens.unexpected("a field type", CONSTRUCT)),
    };
    tokens.advance()?;
    let name = tokens.expect_identifier(CONSTRUCT)?;
    tokens.expect(&Token::LBrace, CONSTRUCT)?;
    let properties = parse_properties(tokens)?;

    Ok(tokens.node(line,
                   NodeKind::FieldDeclaration { kind,
                                                name,
                                                properties }))
}

/// Parses `key: value` pairs up to and including the closing brace.
///
/// Pairs are separated by commas or newlines. A repeated key keeps the
/// position of its first occurrence and the value of its last.
fn parse_properties(tokens: &mut TokenStream<'_>) -> ParseResult<Vec<Node>> {
    const CONSTRUCT: &str = "field properties";

    let mut properties: Vec<Node> = Vec::new();
    loop {
        tokens.skip_newlines()?;
        if tokens.eat(&Token::RBrace)? {
            return Ok(properties);
        }

        let line = tokens.line();
        let key = tokens.expect_identifier(CONSTRUCT)?;
        tokens.expect(&Token::Colon, CONSTRUCT)?;
        let value = parse_property_value(tokens)?;

        let existing = properties.iter_mut()
                                 .find(|property| property_key(property) == Some(key.as_str()));
        match existing {
            Some(property) => property.kind = NodeKind::FieldProperty { key, value },
            None => {
                let property = tokens.node(line, NodeKind::FieldProperty { key, value });
                properties.push(property);
            },
        }

        if !tokens.eat(&Token::Comma)?
           && !tokens.check(&Token::NewLine)
           && !tokens.check(&Token::RBrace)
        {
            return Err(tokens.unexpected("',', a newline or '}'", CONSTRUCT));
        }
    }
}

fn property_key(node: &Node) -> Option<&str> {
    match &node.kind {
        NodeKind::FieldProperty { key, .. } => Some(key),
        _ => None,
    }
}

fn parse_property_value(tokens: &mut TokenStream<'_>) -> ParseResult<PropertyValue> {
    let line = tokens.line();
    let kind = match tokens.peek() {
        Token::Str(s) => NodeKind::Str(s.clone()),
        Token::Bool(b) => NodeKind::Bool(*b),
        Token::Integer(n) => NodeKind::Int(*n),
        Token::LBracket => return parse_array(tokens).map(PropertyValue::Array),
        _ => {
            return Err(tokens.unexpected("a string, boolean, integer or array",
                                         "field properties"));
        },
    };
    tokens.advance()?;
    Ok(PropertyValue::Scalar(Box::new(tokens.node(line, kind))))
}

/// Parses `[ (STRING | IDENT) ("," (STRING | IDENT))* ","? ]`.
fn parse_array(tokens: &mut TokenStream<'_>) -> ParseResult<Vec<Node>> {
    const CONSTRUCT: &str = "options array";

    tokens.expect(&Token::LBracket, CONSTRUCT)?;
    let mut items = Vec::new();
    loop {
        tokens.skip_newlines()?;
        if tokens.eat(&Token::RBracket)? {
            return Ok(items);
        }

        let line = tokens.line();
        let kind = match tokens.peek() {
            Token::Str(s) => NodeKind::Str(s.clone()),
            Token::Identifier(name) => NodeKind::Identifier(name.clone()),
            _ => return Err(tokens.unexpected("a string or identifier", CONSTRUCT)),
        };
        tokens.advance()?;
        items.push(tokens.node(line, kind));

        tokens.skip_newlines()?;
        if !tokens.eat(&Token::Comma)? && !tokens.check(&Token::RBracket) {
            return Err(tokens.unexpected("',' or ']'", CONSTRUCT));
        }
    }
}
