//! Testing utilities for tag assertions
//!
//!     Extraction tests check what the automaton emitted: names, kinds, positions and scopes.
//!     Comparing whole `Tag` values makes tests brittle (every new field breaks them) and
//!     comparing counts makes them shallow, so tests go through the fluent assertions of
//!     [assert_tags](fn@assert_tags) and state only what they care about.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use crate::ocaml::testing::assert_tags;
//!
//!     let tags = extract_tags("module M = struct let f x = x end", &options).tags;
//!
//!     assert_tags(&tags)
//!         .count(2)
//!         .tag(0, |tag| tag.name("M").kind(Kind::Module).no_scope())
//!         .tag(1, |tag| tag.name("f").kind(Kind::Function).scope(Kind::Module, "M"));
//!     ```
//!
//! Fixtures
//!
//!     Larger OCaml samples live in `camltags-parser/tests/fixtures/`. Load them through
//!     [fixture_path] or [fixture_source] rather than pasting them into tests.

mod tag_assertions;

pub use tag_assertions::{TagAssertion, TagsAssertion};

use crate::ocaml::tags::Tag;
use std::path::PathBuf;

/// Create an assertion builder for a tag list
pub fn assert_tags(tags: &[Tag]) -> TagsAssertion<'_> {
    TagsAssertion { tags }
}

/// Path of a file under `tests/fixtures` of this crate
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Contents of a fixture file. Panics when it is missing, which is a broken test setup.
pub fn fixture_source(name: &str) -> String {
    let path = fixture_path(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("cannot read fixture {}: {}", path.display(), err))
}
