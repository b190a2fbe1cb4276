//! Token kinds consumed by the parsing automaton

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// The closed set of token kinds the automaton distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Keywords
    And,
    Begin,
    Class,
    Do,
    Done,
    Else,
    End,
    Exception,
    For,
    Fun,
    Function,
    Functor,
    If,
    In,
    Let,
    Match,
    Method,
    Module,
    Mutable,
    Object,
    Of,
    Private,
    Rec,
    Sig,
    Struct,
    Then,
    Try,
    Type,
    Val,
    /// `value`, the revised syntax spelling of a binding
    Value,
    Virtual,
    While,
    With,

    Ident,
    /// Numbers, strings, characters, `true`/`false`, `_` and anything unrecognized
    Literal,
    /// Any operator run without a dedicated kind
    Operator,

    ParenOpen,
    ParenClose,
    BracketOpen,
    BracketClose,
    BraceOpen,
    BraceClose,
    Prime,
    Pipe,
    Equals,
    Semicolon,
    Comma,
    Arrow,
    /// A lone `:`, the type annotation marker
    Colon,
    Sharp,
    Backslash,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A token with its source slice and byte span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub span: Range<usize>,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, span: Range<usize>) -> Self {
        Self { kind, text, span }
    }

    /// The end-of-input token, positioned at the end of the source
    pub fn eof(at: usize) -> Self {
        Self {
            kind: TokenKind::Eof,
            text: "",
            span: at..at,
        }
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    /// True when the token text starts with an ASCII uppercase letter
    pub fn is_capitalized(&self) -> bool {
        self.text
            .as_bytes()
            .first()
            .is_some_and(|b| b.is_ascii_uppercase())
    }

    /// First character of the token text, if any
    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }
}

/// Owned copy of a token, for token dumps that outlive the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenRecord {
    pub kind: TokenKind,
    pub text: String,
    pub span: Range<usize>,
}

impl From<Token<'_>> for TokenRecord {
    fn from(token: Token<'_>) -> Self {
        Self {
            kind: token.kind,
            text: token.text.to_string(),
            span: token.span,
        }
    }
}
