//! Lexer for ABNF source text.
//!
//! Produces span-based tokens without storing text - text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character.

use std::ops::Range;

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    #[regex(r"[A-Za-z][A-Za-z0-9-]*")]
    RuleName,

    #[token("=")]
    DefinedAs,

    /// Incremental alternative `=/`
    #[token("=/")]
    DefinedAsIncremental,

    #[token("/")]
    Slash,

    #[token("*")]
    Star,

    #[regex(r"[0-9]+")]
    Number,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    /// `"..."`, case-insensitive
    #[regex(r#""[^"\r\n]*""#)]
    CharVal,

    /// `"...` running into the end of the line
    #[regex(r#""[^"\r\n]*"#)]
    UnclosedCharVal,

    /// `%s"..."` (RFC 7405)
    #[regex(r#"%[sS]"[^"\r\n]*""#)]
    CaseSensitiveVal,

    /// `%i"..."` (RFC 7405)
    #[regex(r#"%[iI]"[^"\r\n]*""#)]
    CaseInsensitiveVal,

    /// `%b`, `%d` or `%x` followed by a value, a dotted series or a range.
    /// Digits are checked against the base by the parser.
    #[regex(r"%[bBdDxX][0-9A-Za-z]+(?:(?:\.[0-9A-Za-z]+)+|-[0-9A-Za-z]+)?")]
    NumVal,

    #[regex(r"<[^>\r\n]*>")]
    ProseVal,

    #[regex(r";[^\r\n]*", allow_greedy = true)]
    Comment,

    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    /// Coalesced unrecognized characters
    Garbage,
}

impl SyntaxKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::Whitespace | Self::Newline | Self::Comment)
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }

    /// Starts in column 0, i.e. begins a new rule.
    #[inline]
    pub fn at_line_start(&self, source: &str) -> bool {
        self.span.start == 0 || source.as_bytes()[self.span.start - 1] == b'\n'
    }
}

/// Tokenizes source into a vector of span-based tokens, trivia included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(SyntaxKind::Garbage, start..end));
                }
                tokens.push(Token::new(kind, lexer.span()));
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(SyntaxKind::Garbage, start..source.len()));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[token.span.clone()]
}
