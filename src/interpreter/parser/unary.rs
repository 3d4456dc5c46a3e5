use crate::{
    ast::{Node, NodeKind, UnaryOperator},
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            utils::TokenStream,
        },
    },
};

/// Parses a factor, the tightest-binding expression.
///
/// Supports prefix operators `+`, `-` and `!`, which are right-associative,
/// so `!-x` parses as `!(-x)`.
///
/// Grammar:
/// ```text
///     factor := INT | STRING | BOOL | IDENT
///             | ("+" | "-" | "!") factor
///             | "(" expression ")"
///             | "Scan" "(" ")"
/// ```
pub fn parse_factor(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    const CONSTRUCT: &str = "expression";

    let line = tokens.line();
    let kind = match tokens.peek() {
        Token::Integer(n) => NodeKind::Int(*n),
        Token::Str(s) => NodeKind::Str(s.clone()),
        Token::Bool(b) => NodeKind::Bool(*b),
        Token::Identifier(name) => NodeKind::Identifier(name.clone()),
        Token::Plus => return parse_unary(tokens, UnaryOperator::Plus, line),
        Token::Minus => return parse_unary(tokens, UnaryOperator::Negate, line),
        Token::Bang => return parse_unary(tokens, UnaryOperator::Not, line),
        Token::LParen => {
            tokens.enter("parenthesized expression")?;
            tokens.advance()?;
            let inner = parse_expression(tokens)?;
            tokens.expect(&Token::RParen, CONSTRUCT)?;
            tokens.leave(1);
            return Ok(inner);
        },
        Token::Scan => {
            tokens.advance()?;
            tokens.expect(&Token::LParen, "Scan call")?;
            tokens.expect(&Token::RParen, "Scan call")?;
            return Ok(tokens.node(line, NodeKind::Scan));
        },
        _ => return Err(tokens.unexpected("an expression", CONSTRUCT)),
    };
    tokens.advance()?;
    Ok(tokens.node(line, kind))
}

fn parse_unary(tokens: &mut TokenStream<'_>, op: UnaryOperator, line: usize) -> ParseResult<Node> {
    tokens.enter("prefix operator")?;
    tokens.advance()?;
    let operand = parse_factor(tokens)?;
    tokens.leave(1);
    Ok(tokens.node(line,
                   NodeKind::UnaryOp { op,
                                       operand: Box::new(operand) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;

    fn factor(source: &str) -> Result<Node, ParseError> {
        let mut tokens = TokenStream::new(source)?;
        parse_factor(&mut tokens)
    }

    #[test]
    fn nested_prefix_operators() {
        let node = factor("!-x").unwrap();
        let NodeKind::UnaryOp { op: UnaryOperator::Not,
                                operand, } = node.kind
        else {
            panic!("expected a negation");
        };
        assert!(matches!(operand.kind,
                         NodeKind::UnaryOp { op: UnaryOperator::Negate,
                                             .. }));
    }

    #[test]
    fn string_literal_keeps_its_text() {
        assert_eq!(factor("\"a b\"").unwrap().kind, NodeKind::Str("a b".to_string()));
    }

    #[test]
    fn unclosed_parenthesis_is_an_error() {
        assert!(matches!(factor("(1 + 2"), Err(ParseError::UnexpectedEndOfInput { .. })));
    }

    #[test]
    fn deep_nesting_is_rejected() {
        let nested = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        assert!(matches!(factor(&nested),
                         Err(ParseError::NestingTooDeep { limit: 128, .. })));

        let negations = format!("{}true", "!".repeat(129));
        assert!(matches!(factor(&negations),
                         Err(ParseError::NestingTooDeep { construct: "prefix operator", .. })));

        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(factor(&shallow).unwrap().kind, NodeKind::Int(1));
    }

    #[test]
    fn operator_alone_is_not_a_factor() {
        assert!(matches!(factor("*"),
                         Err(ParseError::UnexpectedToken { construct: "expression", .. })));
    }
}
