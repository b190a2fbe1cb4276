//! Main module for OCaml tag extraction

pub mod diagnostics;
pub mod formats;
pub mod lexing;
pub mod loader;
pub mod parsing;
pub mod source;
pub mod tags;
pub mod testing;
pub mod token;
pub mod transforms;

pub use diagnostics::{Diagnostic, DiagnosticSeverity};
pub use loader::{module_name_for_path, LoaderError, SourceLoader};
pub use parsing::{extract_into, extract_tags, ExtractOptions, Extraction};
pub use tags::{Kind, KindSet, Scope, Tag, TagSink};
