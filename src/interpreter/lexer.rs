use std::{fmt, ops::Range};

use logos::Logos;

use crate::{
    error::{LexError, lex_error::LexResult},
    interpreter::value::SymbolType,
};

/// Tokens as recognized by the generated state machine.
///
/// Converted into [`Token`] by the [`Tokenizer`], which also turns the
/// error-marker variants into [`LexError`]s.
#[derive(Logos, Debug, PartialEq, Eq, Clone)]
#[logos(extras = LexerExtras)]
#[logos(skip r"[ \t]+")]
enum RawToken {
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    #[regex(r#""[^"]*""#, parse_string, allow_greedy = true)]
    Str(String),
    #[regex(r#""[^"]*"#, count_newlines, allow_greedy = true)]
    UnterminatedStr,
    #[token("true", |_| true)]
    #[token("false", |_| false)]
    Bool(bool),
    #[token("var")]
    Var,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("for")]
    For,
    #[token("Println")]
    Println,
    #[token("Scan")]
    Scan,
    #[token("int", |_| SymbolType::Int)]
    #[token("string", |_| SymbolType::String)]
    #[token("bool", |_| SymbolType::Bool)]
    Type(SymbolType),
    #[token("form")]
    Form,
    #[token("string_field")]
    StringField,
    #[token("select_field")]
    SelectField,
    #[token("checkbox_field")]
    CheckboxField,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("!")]
    Bang,
    #[token("&&")]
    AndAnd,
    #[token("||")]
    OrOr,
    #[token("==")]
    EqualEqual,
    #[token("=")]
    Assign,
    #[token(">")]
    Greater,
    #[token("<")]
    Less,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(":")]
    Colon,
    #[token(",")]
    Comma,
    #[token("\n", |lex| {
        lex.extras.line += 1;
    })]
    NewLine,
}

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Newlines are tokens because they terminate statements. Once the input is
/// exhausted the lexer keeps returning [`Token::Eof`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    Integer(i64),
    /// String literal tokens with the quotes removed. No escapes exist.
    Str(String),
    /// `true` or `false`.
    Bool(bool),
    /// `var`
    Var,
    /// `if`
    If,
    /// `else`
    Else,
    /// `for`, the language's while loop.
    While,
    /// `Println`
    Println,
    /// `Scan`
    Scan,
    /// `int`, `string` or `bool`.
    Type(SymbolType),
    /// `form`
    Form,
    /// `string_field`
    StringField,
    /// `select_field`
    SelectField,
    /// `checkbox_field`
    CheckboxField,
    /// Identifier tokens; variable, form or field names such as `counter`.
    Identifier(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `!`
    Bang,
    /// `&&`
    AndAnd,
    /// `||`
    OrOr,
    /// `==`
    EqualEqual,
    /// `=`
    Assign,
    /// `>`
    Greater,
    /// `<`
    Less,
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// Statement terminator.
    NewLine,
    /// End of input.
    Eof,
}

impl Token {
    /// Whether the token starts a field declaration.
    #[must_use]
    pub const fn is_field_keyword(&self) -> bool {
        matches!(self, Self::StringField | Self::SelectField | Self::CheckboxField)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Integer(n) => return write!(f, "integer '{n}'"),
            Self::Str(s) => return write!(f, "string \"{s}\""),
            Self::Bool(b) => return write!(f, "'{b}'"),
            Self::Identifier(name) => return write!(f, "identifier '{name}'"),
            Self::Type(ty) => return write!(f, "type '{}'", ty.keyword()),
            Self::NewLine => return f.write_str("newline"),
            Self::Eof => return f.write_str("end of input"),
            Self::Var => "var",
            Self::If => "if",
            Self::Else => "else",
            Self::While => "for",
            Self::Println => "Println",
            Self::Scan => "Scan",
            Self::Form => "form",
            Self::StringField => "string_field",
            Self::SelectField => "select_field",
            Self::CheckboxField => "checkbox_field",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Bang => "!",
            Self::AndAnd => "&&",
            Self::OrOr => "||",
            Self::EqualEqual => "==",
            Self::Assign => "=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::Colon => ":",
            Self::Comma => ",",
        };
        write!(f, "'{symbol}'")
    }
}

/// A token together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    /// 1-based line the token starts on.
    pub line:  usize,
    /// Byte range of the token in the tokenized text.
    pub span:  Range<usize>,
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

fn parse_integer(lex: &logos::Lexer<RawToken>) -> Option<i64> {
    lex.slice().parse().ok()
}

fn parse_string(lex: &mut logos::Lexer<RawToken>) -> String {
    count_newlines(lex);
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}

fn count_newlines(lex: &mut logos::Lexer<RawToken>) {
    let newlines = lex.slice().bytes().filter(|&b| b == b'\n').count();
    lex.extras.line += newlines;
}

/// Removes `//` line comments, keeping the line breaks so that line numbers
/// still point into the original text.
///
/// The pass is purely textual: a `//` inside a string literal starts a
/// comment too.
///
/// # Example
/// ```
/// use pato::interpreter::lexer::strip_comments;
///
/// assert_eq!(strip_comments("var x int // note\n{"), "var x int \n{");
/// ```
#[must_use]
pub fn strip_comments(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for (index, line) in source.split('\n').enumerate() {
        if index > 0 {
            out.push('\n');
        }
        match line.find("//") {
            Some(start) => out.push_str(&line[..start]),
            None => out.push_str(line),
        }
    }
    out
}

/// Pull-based tokenizer over comment-free source text.
///
/// Each call to [`Tokenizer::next_token`] yields one token. After the input
/// is exhausted every further call yields [`Token::Eof`].
pub struct Tokenizer<'src> {
    inner: logos::Lexer<'src, RawToken>,
}

impl<'src> Tokenizer<'src> {
    /// Starts tokenizing `source` at line 1.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::starting_at_line(source, 1)
    }

    fn starting_at_line(source: &'src str, line: usize) -> Self {
        Self { inner: RawToken::lexer_with_extras(source, LexerExtras { line }) }
    }

    /// Current line of the tokenizer.
    #[must_use]
    pub fn line(&self) -> usize {
        self.inner.extras.line
    }

    /// Produces the next token.
    ///
    /// # Errors
    /// Fails on the first character that starts no token, on an unterminated
    /// string literal, on a lone `&` or `|`, and on integer literals that do
    /// not fit in 64 bits.
    pub fn next_token(&mut self) -> LexResult<Spanned> {
        let line = self.inner.extras.line;
        let Some(result) = self.inner.next() else {
            let end = self.inner.source().len();
            return Ok(Spanned { token: Token::Eof,
                                line,
                                span: end..end });
        };
        let span = self.inner.span();
        let raw = result.map_err(|()| classify_error(self.inner.slice(), line))?;
        let token = match raw {
            RawToken::UnterminatedStr => return Err(LexError::UnterminatedString { line }),
            RawToken::Integer(n) => Token::Integer(n),
            RawToken::Str(s) => Token::Str(s),
            RawToken::Bool(b) => Token::Bool(b),
            RawToken::Var => Token::Var,
            RawToken::If => Token::If,
            RawToken::Else => Token::Else,
            RawToken::For => Token::While,
            RawToken::Println => Token::Println,
            RawToken::Scan => Token::Scan,
            RawToken::Type(ty) => Token::Type(ty),
            RawToken::Form => Token::Form,
            RawToken::StringField => Token::StringField,
            RawToken::SelectField => Token::SelectField,
            RawToken::CheckboxField => Token::CheckboxField,
            RawToken::Identifier(name) => Token::Identifier(name),
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Star => Token::Star,
            RawToken::Slash => Token::Slash,
            RawToken::Bang => Token::Bang,
            RawToken::AndAnd => Token::AndAnd,
            RawToken::OrOr => Token::OrOr,
            RawToken::EqualEqual => Token::EqualEqual,
            RawToken::Assign => Token::Assign,
            RawToken::Greater => Token::Greater,
            RawToken::Less => Token::Less,
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::LBrace => Token::LBrace,
            RawToken::RBrace => Token::RBrace,
            RawToken::LBracket => Token::LBracket,
            RawToken::RBracket => Token::RBracket,
            RawToken::Colon => Token::Colon,
            RawToken::Comma => Token::Comma,
            RawToken::NewLine => Token::NewLine,
        };
        Ok(Spanned { token, line, span })
    }
}

/// Turns the slice logos could not match into a descriptive error.
fn classify_error(slice: &str, line: usize) -> LexError {
    if !slice.is_empty() && slice.bytes().all(|b| b.is_ascii_digit()) {
        return LexError::IntegerTooLarge { literal: slice.to_string(),
                                           line };
    }
    let character = slice.chars().next().unwrap_or('\0');
    match character {
        '&' => LexError::IncompleteOperator { expected: "&&",
                                              found: '&',
                                              line },
        '|' => LexError::IncompleteOperator { expected: "||",
                                              found: '|',
                                              line },
        _ => LexError::UnexpectedCharacter { character, line },
    }
}

/// Reads the single token starting at byte `position` of `source`.
///
/// Returns the token and the byte position just past it. At the end of input
/// the token is [`Token::Eof`] and the position is unchanged. The line number
/// is computed from the text before `position`. Comments must already be
/// stripped.
///
/// # Errors
/// Fails with the same errors as [`Tokenizer::next_token`], and with an
/// unexpected character error if `position` is not on a character boundary.
///
/// # Example
/// ```
/// use pato::interpreter::lexer::{Token, next_token};
///
/// let (first, position) = next_token("var x", 0).unwrap();
/// assert_eq!(first.token, Token::Var);
/// let (second, _) = next_token("var x", position).unwrap();
/// assert_eq!(second.token, Token::Identifier("x".to_string()));
/// ```
pub fn next_token(source: &str, position: usize) -> LexResult<(Spanned, usize)> {
    let before = &source.as_bytes()[..position.min(source.len())];
    let line = 1 + before.iter().filter(|&&b| b == b'\n').count();
    let Some(rest) = source.get(position..) else {
        let character = source.get(..position)
                              .and_then(|s| s.chars().next_back())
                              .unwrap_or('\0');
        return Err(LexError::UnexpectedCharacter { character, line });
    };
    let mut tokenizer = Tokenizer::starting_at_line(rest, line);
    let mut spanned = tokenizer.next_token()?;
    spanned.span = spanned.span.start + position..spanned.span.end + position;
    let end = spanned.span.end;
    Ok((spanned, end))
}

/// Strips comments from `source` and tokenizes all of it.
///
/// The returned list always ends with a single [`Token::Eof`].
///
/// # Errors
/// Returns the first lexical error in the source.
pub fn tokenize(source: &str) -> LexResult<Vec<Spanned>> {
    let cleaned = strip_comments(source);
    let mut tokenizer = Tokenizer::new(&cleaned);
    let mut tokens = Vec::new();
    loop {
        let spanned = tokenizer.next_token()?;
        let done = spanned.token == Token::Eof;
        tokens.push(spanned);
        if done {
            return Ok(tokens);
        }
    }
}
