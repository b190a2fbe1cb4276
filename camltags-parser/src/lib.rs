//! # camltags
//!
//! A declaration extractor for OCaml sources.
//!
//! File Layout
//!
//! The extractor is a single streaming pipeline. Source text is tokenized with a logos lexer,
//! the token stream is read through a one-token lookahead window, and a pushdown automaton
//! turns `(current, next)` token pairs into tags while tracking the lexical scope:
//!
//! src/ocaml
//!   ├── token        Token kinds, keyword table and the raw logos lexemes
//!   ├── lexing       Tokenizer, comment/string skipping, lookahead window
//!   ├── parsing      Automaton states, context stack and the productions
//!   ├── tags         Declaration records, kinds and sinks
//!   └── formats      ctags / xref / json / yaml renderers
//!
//! For testing guidelines, see the [testing module](ocaml::testing).

pub mod ocaml;
