//! Output formats
//!
//! Tags from one or more files are rendered through a [`Formatter`] looked up by name in the
//! [`FormatRegistry`]. Formatters only see [`TaggedFile`]s, so they never run extraction
//! themselves; the one exception is `tokens`, which re-tokenizes the source for debugging.
//!
//! Available formats:
//!
//! - `ctags`: extended tags file, see [`ctags`]
//! - `xref`: human readable cross reference, one declaration per line
//! - `json`, `yaml`: the tag records with their file
//! - `tokens`: the token stream of each file as JSON

pub mod ctags;
pub mod registry;
pub mod serialized;
pub mod tokens;
pub mod xref;

pub use ctags::CtagsFormatter;
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use serialized::{JsonFormatter, YamlFormatter};
pub use tokens::TokensFormatter;
pub use xref::XrefFormatter;

use crate::ocaml::source::SourceLocation;
use crate::ocaml::tags::Tag;

/// The tags of one input file, with the text they were taken from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFile {
    /// Path as it should appear in the output
    pub path: String,
    pub source: String,
    pub tags: Vec<Tag>,
}

impl TaggedFile {
    pub fn new(path: impl Into<String>, source: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            path: path.into(),
            source: source.into(),
            tags,
        }
    }
}

/// Rendering switches shared by all formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Order tags by name, then file, then line. Otherwise keep discovery order.
    pub sort: bool,
    /// Emit the format's preamble, if it has one
    pub header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sort: true,
            header: true,
        }
    }
}

/// A tag ready to be written: the tag, its file and the text of its line
pub(crate) struct Entry<'a> {
    pub file: &'a TaggedFile,
    pub tag: &'a Tag,
    pub line_text: &'a str,
}

/// Flatten `files` into entries, sorted when `sort` is set
pub(crate) fn entries(files: &[TaggedFile], sort: bool) -> Vec<Entry<'_>> {
    let mut entries = Vec::new();
    for file in files {
        let location = SourceLocation::new(&file.source);
        for tag in &file.tags {
            let line_text = location
                .line_text(tag.line.saturating_sub(1))
                .unwrap_or("");
            entries.push(Entry {
                file,
                tag,
                line_text,
            });
        }
    }
    if sort {
        // stable, so tags sharing name, file and line keep discovery order
        entries.sort_by(|a, b| {
            a.tag
                .name
                .cmp(&b.tag.name)
                .then_with(|| a.file.path.cmp(&b.file.path))
                .then_with(|| a.tag.line.cmp(&b.tag.line))
        });
    }
    entries
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::TaggedFile;
    use crate::ocaml::parsing::{extract_tags, ExtractOptions};

    /// A small tagged file shared by the formatter tests
    pub fn shapes() -> TaggedFile {
        let source = "type shape =\n  | Circle of float\n  | Square of float\n\nlet area s = 0.0\n";
        let options = ExtractOptions::default().with_file_module("Shapes");
        TaggedFile::new("shapes.ml", source, extract_tags(source, &options).tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_discovery_order_unsorted() {
        let files = [fixtures::shapes()];
        let names: Vec<&str> = entries(&files, false)
            .iter()
            .map(|entry| entry.tag.name.as_str())
            .collect();
        assert_eq!(names, vec!["Shapes", "shape", "Circle", "Square", "area"]);
    }

    #[test]
    fn test_entries_sorted_by_name_bytewise() {
        let files = [fixtures::shapes()];
        let names: Vec<&str> = entries(&files, true)
            .iter()
            .map(|entry| entry.tag.name.as_str())
            .collect();
        assert_eq!(names, vec!["Circle", "Shapes", "Square", "area", "shape"]);
    }

    #[test]
    fn test_entries_carry_line_text() {
        let files = [fixtures::shapes()];
        let all = entries(&files, false);
        assert_eq!(all[2].line_text, "  | Circle of float");
        assert_eq!(all[4].line_text, "let area s = 0.0");
    }
}
