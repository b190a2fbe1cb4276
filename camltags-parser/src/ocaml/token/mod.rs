//! Token types shared by the tokenizer and the parsing automaton.
//!
//!     Tokens come in two layers:
//!
//!     Core Lexemes:
//!         What the logos lexer recognizes: words, numbers, operator runs, punctuation,
//!         strings and character literals. Comments never surface, they are consumed by a
//!         lexer callback. See [core](core).
//!
//!     Tokens:
//!         What the automaton consumes. Words are resolved against the keyword table, operator
//!         runs are classified (`|`, `=`, `:`, `->` have grammatical weight), and everything
//!         else collapses into a handful of kinds. See [kind](kind) and [keywords](keywords).
//!
//!     A token keeps its source slice and byte span. Line numbers are derived from the span
//!     later, when a declaration is actually recorded.

pub mod core;
pub mod keywords;
pub mod kind;

pub use self::core::Lexeme;
pub use keywords::lookup_keyword;
pub use kind::{Token, TokenKind, TokenRecord};
