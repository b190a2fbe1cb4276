//! Keyword table
//!
//! Words are read by the lexer as plain identifiers and resolved here. Besides the reserved
//! words, a few textual operators and the boolean literals are folded into generic kinds so the
//! automaton never mistakes them for binding names.

use super::kind::TokenKind;
use once_cell::sync::Lazy;
use std::collections::HashMap;

static KEYWORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    use TokenKind::*;
    HashMap::from([
        ("and", And),
        ("begin", Begin),
        ("class", Class),
        ("do", Do),
        ("done", Done),
        ("else", Else),
        ("end", End),
        ("exception", Exception),
        ("for", For),
        ("fun", Fun),
        ("function", Function),
        ("functor", Functor),
        ("if", If),
        ("in", In),
        ("let", Let),
        ("match", Match),
        ("method", Method),
        ("module", Module),
        ("mutable", Mutable),
        ("nonrec", Rec),
        ("object", Object),
        ("of", Of),
        ("private", Private),
        ("rec", Rec),
        ("sig", Sig),
        ("struct", Struct),
        ("then", Then),
        ("try", Try),
        ("type", Type),
        ("val", Val),
        ("value", Value),
        ("virtual", Virtual),
        ("while", While),
        ("with", With),
        // textual infix operators
        ("or", Operator),
        ("mod", Operator),
        ("land", Operator),
        ("lor", Operator),
        ("lxor", Operator),
        ("lsl", Operator),
        ("lsr", Operator),
        ("asr", Operator),
        ("true", Literal),
        ("false", Literal),
    ])
});

/// Resolve a word against the keyword table.
pub fn lookup_keyword(word: &str) -> Option<TokenKind> {
    KEYWORDS.get(word).copied()
}
