//! Parsing module for OCaml declarations
//!
//!     This module turns a token stream into declaration tags:
//!         1. Lexing: tokenization and the one-token lookahead window. See [lexing](crate::ocaml::lexing).
//!         2. Scope tracking: a bounded stack of scope frames. See [context].
//!         3. Recognition: a pushdown automaton over `(current, next)` token pairs. See
//!            [automaton], with its productions in [declarations] and [expressions].
//!
//! Recognition
//!
//!     The automaton does not build a syntax tree. Each state is one grammar production and
//!     reacts to the current token, using the next one where the current token alone is
//!     ambiguous: `let f x` declares a function where `let v =` declares a value, and a
//!     capitalized name in a type body is a constructor unless a `.` follows it.
//!
//!     Scopes are frames on the context stack. Strong frames are declaration boundaries
//!     (modules, classes, top level bindings, types, `begin` blocks), soft frames are
//!     transient (`let ... in`, parentheses, match arms). Leaving a declaration unwinds to the
//!     nearest strong frame in one step, however deep the expression was.
//!
//! Recovery
//!
//!     Nothing here fails. Tokens a production does not expect are handed to the top level
//!     rules, so malformed input reads as "a new declaration may start here". Tentative
//!     constructors are staged and only emitted once confirmed. The one degraded condition,
//!     a full context stack, is reported as a [`Diagnostic`].

mod automaton;
pub mod context;
mod declarations;
mod expressions;
pub mod state;

pub use context::{ContextStack, Frame, Role, Strength, DEFAULT_CAPACITY};
pub use state::State;

use crate::ocaml::diagnostics::Diagnostic;
use crate::ocaml::lexing::Lookahead;
use crate::ocaml::tags::{KindSet, Tag, TagSink};
use automaton::Automaton;
use serde::Serialize;

/// Settings for one extraction run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Kinds that are emitted; disabled kinds still drive scope tracking
    pub kinds: KindSet,
    /// Also emit parameters and bindings local to expressions
    pub export_local_info: bool,
    /// Capacity of the context stack
    pub max_depth: usize,
    /// Module named after the input file, emitted first when set
    pub file_module: Option<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            kinds: KindSet::all(),
            export_local_info: false,
            max_depth: DEFAULT_CAPACITY,
            file_module: None,
        }
    }
}

impl ExtractOptions {
    pub fn with_kinds(mut self, kinds: KindSet) -> Self {
        self.kinds = kinds;
        self
    }

    pub fn with_local_info(mut self, export: bool) -> Self {
        self.export_local_info = export;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_file_module(mut self, name: impl Into<String>) -> Self {
        self.file_module = Some(name.into());
        self
    }
}

/// Everything one run produced
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Extraction {
    pub tags: Vec<Tag>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Extract all declarations of `source` into a vector.
pub fn extract_tags(source: &str, options: &ExtractOptions) -> Extraction {
    let mut tags = Vec::new();
    let diagnostics = extract_into(source, options, &mut tags);
    Extraction { tags, diagnostics }
}

/// Stream declarations of `source` into `sink` as they are confirmed.
pub fn extract_into<S: TagSink>(
    source: &str,
    options: &ExtractOptions,
    sink: &mut S,
) -> Vec<Diagnostic> {
    let mut window = Lookahead::new(source);
    let mut automaton = Automaton::new(source, options, sink);

    if !window.is_done() {
        if let Some(name) = &options.file_module {
            automaton.add_file_module(name);
        }
    }

    while !window.is_done() {
        automaton.step(window.current(), window.next());
        window.advance();
    }

    let (_, diagnostics) = automaton.finish();
    diagnostics
}
