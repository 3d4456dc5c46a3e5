use crate::{
    ast::{BinaryOperator, Node, NodeKind},
    interpreter::{
        lexer::Token,
        parser::{core::ParseResult, unary::parse_factor, utils::TokenStream},
    },
};

/// Parses one left-associative precedence level.
///
/// `operand` parses the next tighter level and `operator` maps the lookahead
/// to an operator of this level, or `None` when the level ends. Each operator
/// deepens the left-leaning tree, so it counts as one nesting level.
fn parse_left_associative(tokens: &mut TokenStream<'_>,
                          operand: fn(&mut TokenStream<'_>) -> ParseResult<Node>,
                          operator: fn(&Token) -> Option<BinaryOperator>)
                          -> ParseResult<Node> {
    let mut left = operand(tokens)?;
    let mut levels = 0;
    while let Some(op) = operator(tokens.peek()) {
        tokens.enter("operator chain")?;
        levels += 1;
        let line = tokens.line();
        tokens.advance()?;
        let right = operand(tokens)?;
        left = tokens.node(line,
                           NodeKind::BinaryOp { op,
                                                left: Box::new(left),
                                                right: Box::new(right) });
    }
    tokens.leave(levels);
    Ok(left)
}

/// Parses `||` chains.
///
/// The rule is: `boolean_expression := boolean_term ("||" boolean_term)*`
pub fn parse_boolean_expression(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_boolean_term, |token| match token {
        Token::OrOr => Some(BinaryOperator::Or),
        _ => None,
    })
}

/// Parses `&&` chains.
///
/// The rule is: `boolean_term := relational ("&&" relational)*`
pub fn parse_boolean_term(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_relational, |token| match token {
        Token::AndAnd => Some(BinaryOperator::And),
        _ => None,
    })
}

/// Parses comparisons.
///
/// Comparisons chain left to right, so `a < b == c` compares the boolean
/// result of `a < b` with `c`.
///
/// The rule is: `relational := expression (("==" | ">" | "<") expression)*`
pub fn parse_relational(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_additive, |token| match token {
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::Less => Some(BinaryOperator::Less),
        _ => None,
    })
}

/// Parses addition and subtraction.
///
/// The rule is: `expression := term (("+" | "-") term)*`
pub fn parse_additive(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_multiplicative, |token| match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        _ => None,
    })
}

/// Parses multiplication and division.
///
/// The rule is: `term := factor (("*" | "/") factor)*`
pub fn parse_multiplicative(tokens: &mut TokenStream<'_>) -> ParseResult<Node> {
    parse_left_associative(tokens, parse_factor, |token| match token {
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Node {
        let mut tokens = TokenStream::new(source).unwrap();
        parse_boolean_expression(&mut tokens).unwrap()
    }

    fn render(node: &Node) -> String {
        match &node.kind {
            NodeKind::Int(n) => n.to_string(),
            NodeKind::Identifier(name) => name.clone(),
            NodeKind::Bool(b) => b.to_string(),
            NodeKind::BinaryOp { op, left, right } => {
                format!("({} {op} {})", render(left), render(right))
            },
            NodeKind::UnaryOp { op, operand } => format!("({op}{})", render(operand)),
            other => format!("{other:?}"),
        }
    }

    #[test]
    fn subtraction_is_left_associative() {
        assert_eq!(render(&parse("10 - 3 - 2")), "((10 - 3) - 2)");
    }

    #[test]
    fn comparisons_chain_left_to_right() {
        assert_eq!(render(&parse("a < b == c")), "((a < b) == c)");
    }

    #[test]
    fn full_precedence_ladder() {
        assert_eq!(render(&parse("a || b && c == d + e * -f")),
                   "(a || (b && (c == (d + (e * (-f))))))");
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(render(&parse("(1 + 2) * 3")), "((1 + 2) * 3)");
    }
}
