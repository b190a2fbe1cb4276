//! Lexer
//!
//!     This module turns OCaml source text into the token stream the parsing automaton reads.
//!
//! The Lexing Pipeline
//!
//!     1. Core tokenization using the logos lexer. See [token::core](crate::ocaml::token::core).
//!        Whitespace is skipped, comments are consumed by a callback (see [literals]), string
//!        and character literals become single lexemes.
//!
//!     2. Classification. See [tokenizer]. Words are looked up in the keyword table, operator
//!        runs with grammatical weight (`|`, `=`, `:`, `->`) get their own kinds, and anything
//!        logos cannot recognize becomes a literal value so the stream never breaks.
//!
//!     3. Lookahead. See [lookahead]. The automaton consumes `(current, next)` pairs.
//!
//!     Tokens keep their byte spans. Nothing here tracks lines: positions are only resolved
//!     when a declaration is recorded, see [source](crate::ocaml::source).

pub mod literals;
pub mod lookahead;
pub mod tokenizer;

pub use lookahead::Lookahead;
pub use tokenizer::{tokenize, Tokenizer};
