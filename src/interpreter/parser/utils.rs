use std::mem;

use crate::{
    ast::{Node, NodeIdGenerator, NodeKind},
    error::ParseError,
    interpreter::{
        lexer::{Spanned, Token, Tokenizer},
        parser::core::ParseResult,
    },
};

/// Deepest nesting of parentheses, prefix operators, operator chains and
/// blocks the parser accepts.
pub const MAX_NESTING_DEPTH: usize = 128;

/// The parser's view of the input: the current token plus a tokenizer that
/// produces the rest on demand.
///
/// Tokens are pulled one at a time, so a lexical error further down the
/// source only surfaces once the parser reaches it.
pub struct TokenStream<'src> {
    tokenizer: Tokenizer<'src>,
    current:   Spanned,
    ids:       NodeIdGenerator,
    depth:     usize,
}

impl<'src> TokenStream<'src> {
    /// Starts a stream over comment-free source text.
    pub fn new(source: &'src str) -> ParseResult<Self> {
        let mut tokenizer = Tokenizer::new(source);
        let current = tokenizer.next_token()?;
        Ok(Self { tokenizer,
                  current,
                  ids: NodeIdGenerator::new(),
                  depth: 0 })
    }

    /// The lookahead token.
    #[must_use]
    pub const fn peek(&self) -> &Token {
        &self.current.token
    }

    /// Line of the lookahead token.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.current.line
    }

    /// Whether the lookahead is `token`.
    #[must_use]
    pub fn check(&self, token: &Token) -> bool {
        self.peek() == token
    }

    /// Consumes the lookahead token and returns it.
    pub fn advance(&mut self) -> ParseResult<Spanned> {
        let next = self.tokenizer.next_token()?;
        Ok(mem::replace(&mut self.current, next))
    }

    /// Consumes the lookahead if it is `token`.
    pub fn eat(&mut self, token: &Token) -> ParseResult<bool> {
        if self.check(token) {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consumes `token` or fails, naming the construct being parsed.
    pub fn expect(&mut self, token: &Token, construct: &'static str) -> ParseResult<Spanned> {
        if self.check(token) {
            return self.advance();
        }
        Err(self.unexpected(&token.to_string(), construct))
    }

    /// Consumes an identifier and returns its name.
    pub fn expect_identifier(&mut self, construct: &'static str) -> ParseResult<String> {
        if let Token::Identifier(name) = self.peek() {
            let name = name.clone();
            self.advance()?;
            return Ok(name);
        }
        Err(self.unexpected("an identifier", construct))
    }

    /// Skips any number of newline tokens.
    pub fn skip_newlines(&mut self) -> ParseResult<()> {
        while self.eat(&Token::NewLine)? {}
        Ok(())
    }

    /// Builds the error for a lookahead that does not fit the grammar.
    #[must_use]
    pub fn unexpected(&self, expected: &str, construct: &'static str) -> ParseError {
        match self.peek() {
            Token::Eof => ParseError::UnexpectedEndOfInput { construct,
                                                             line: self.line() },
            found => ParseError::UnexpectedToken { expected: expected.to_string(),
                                                   found: found.to_string(),
                                                   construct,
                                                   line: self.line() },
        }
    }

    /// Descends one nesting level, failing past [`MAX_NESTING_DEPTH`].
    ///
    /// Every successful call is paired with a [`TokenStream::leave`] once the
    /// nested construct is parsed.
    pub fn enter(&mut self, construct: &'static str) -> ParseResult<()> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep { construct,
                                                    limit: MAX_NESTING_DEPTH,
                                                    line: self.line() });
        }
        self.depth += 1;
        Ok(())
    }

    /// Climbs back up `levels` nesting levels.
    pub const fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }

    /// Creates a node with a fresh id.
    pub fn node(&mut self, line: usize, kind: NodeKind) -> Node {
        Node { id: self.ids.next_id(),
               line,
               kind }
    }
}
