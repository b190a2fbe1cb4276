//! One-token lookahead window
//!
//! Several productions cannot decide on the current token alone (`let f x` versus `let v =`,
//! `end =` after a signature), so the automaton always sees the current token together with
//! the one that follows it.

use super::tokenizer::Tokenizer;
use crate::ocaml::token::Token;

pub struct Lookahead<'src> {
    tokenizer: Tokenizer<'src>,
    current: Token<'src>,
    next: Token<'src>,
}

impl<'src> Lookahead<'src> {
    /// Prime the window with the first two tokens of the source.
    pub fn new(source: &'src str) -> Self {
        let mut tokenizer = Tokenizer::new(source);
        let current = tokenizer.next_token();
        let next = tokenizer.next_token();
        Self {
            tokenizer,
            current,
            next,
        }
    }

    pub fn current(&self) -> &Token<'src> {
        &self.current
    }

    pub fn next(&self) -> &Token<'src> {
        &self.next
    }

    /// True once the current token is the end of input
    pub fn is_done(&self) -> bool {
        self.current.is_eof()
    }

    /// Slide the window by one token.
    pub fn advance(&mut self) {
        let following = self.tokenizer.next_token();
        self.current = std::mem::replace(&mut self.next, following);
    }
}
