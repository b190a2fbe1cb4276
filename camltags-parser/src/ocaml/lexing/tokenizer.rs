//! Tokenizer
//!
//! Wraps the logos lexer and turns raw lexemes into automaton tokens. The tokenizer never
//! fails: characters logos does not recognize come back as literal values, and once the input
//! is exhausted every further call yields the end-of-input token.

use crate::ocaml::token::{lookup_keyword, Lexeme, Token, TokenKind};
use logos::{Lexer, Logos};

pub struct Tokenizer<'src> {
    lexer: Lexer<'src, Lexeme>,
    source_len: usize,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexeme::lexer(source),
            source_len: source.len(),
        }
    }

    /// Produce the next token, or `Eof` forever once the input is consumed.
    pub fn next_token(&mut self) -> Token<'src> {
        match self.lexer.next() {
            None => Token::eof(self.source_len),
            Some(result) => {
                let text = self.lexer.slice();
                let span = self.lexer.span();
                let kind = match result {
                    Ok(lexeme) => classify(lexeme, text),
                    Err(()) => TokenKind::Literal,
                };
                Token::new(kind, text, span)
            }
        }
    }
}

impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

fn classify(lexeme: Lexeme, text: &str) -> TokenKind {
    match lexeme {
        Lexeme::Word => match lookup_keyword(text) {
            Some(kind) => kind,
            None if text == "_" => TokenKind::Literal,
            None => TokenKind::Ident,
        },
        Lexeme::Operator => classify_operator(text),
        Lexeme::Str | Lexeme::Char | Lexeme::Number => TokenKind::Literal,
        // skipped by its callback, never handed out
        Lexeme::Comment => TokenKind::Literal,
        Lexeme::ParenOpen => TokenKind::ParenOpen,
        Lexeme::ParenClose => TokenKind::ParenClose,
        Lexeme::BracketOpen => TokenKind::BracketOpen,
        Lexeme::BracketClose => TokenKind::BracketClose,
        Lexeme::BraceOpen => TokenKind::BraceOpen,
        Lexeme::BraceClose => TokenKind::BraceClose,
        Lexeme::Prime => TokenKind::Prime,
        Lexeme::Comma => TokenKind::Comma,
        Lexeme::Semicolon => TokenKind::Semicolon,
        Lexeme::Sharp => TokenKind::Sharp,
        Lexeme::Backslash => TokenKind::Backslash,
    }
}

/// Operator runs: `|`, `=` and `:` alone, and `->`, matter to the grammar.
fn classify_operator(text: &str) -> TokenKind {
    match text {
        "|" => TokenKind::Pipe,
        "=" => TokenKind::Equals,
        ":" => TokenKind::Colon,
        "->" => TokenKind::Arrow,
        _ => TokenKind::Operator,
    }
}

/// Tokenize a whole source, end-of-input excluded.
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    Tokenizer::new(source).collect()
}
