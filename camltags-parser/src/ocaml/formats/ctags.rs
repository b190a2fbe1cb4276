//! Extended ctags format
//!
//! One line per tag, fields separated by tabs:
//!
//! ```text
//! area	shapes.ml	/^let area s = 0.0$/;"	f	line:5
//! Circle	shapes.ml	/^  | Circle of float$/;"	C	line:2	type:shape
//! ```
//!
//! The address is a search pattern over the whole declaring line. `\` and `/` are escaped,
//! and so is a `$` ending the line, which would otherwise read as the anchor.

use super::registry::{FormatError, Formatter};
use super::{entries, Entry, RenderOptions, TaggedFile};
use std::fmt::Write;

pub struct CtagsFormatter;

impl Formatter for CtagsFormatter {
    fn name(&self) -> &str {
        "ctags"
    }

    fn serialize(
        &self,
        files: &[TaggedFile],
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        let mut output = String::new();
        if options.header {
            output.push_str(&header(options.sort));
        }
        for entry in entries(files, options.sort) {
            output.push_str(&tag_line(&entry));
            output.push('\n');
        }
        Ok(output)
    }

    fn description(&self) -> &str {
        "Extended tags file for editors (vi, emacs with etags-select)"
    }
}

fn header(sorted: bool) -> String {
    let mut header = String::new();
    // writing to a String cannot fail
    let _ = writeln!(
        header,
        "!_TAG_FILE_FORMAT\t2\t/extended format; --format=1 will not append ;\" to lines/"
    );
    let _ = writeln!(
        header,
        "!_TAG_FILE_SORTED\t{}\t/0=unsorted, 1=sorted, 2=foldcase/",
        u8::from(sorted)
    );
    let _ = writeln!(header, "!_TAG_PROGRAM_NAME\tcamltags\t//");
    let _ = writeln!(
        header,
        "!_TAG_PROGRAM_VERSION\t{}\t//",
        env!("CARGO_PKG_VERSION")
    );
    header
}

fn tag_line(entry: &Entry<'_>) -> String {
    let tag = entry.tag;
    let mut line = format!(
        "{}\t{}\t/^{}$/;\"\t{}\tline:{}",
        tag.name,
        entry.file.path,
        escape_pattern(entry.line_text),
        tag.kind.letter(),
        tag.line
    );
    if let Some(scope) = &tag.scope {
        let _ = write!(line, "\t{}:{}", scope.kind.name(), scope.name);
    }
    line
}

/// Escape a source line for use inside a `/^...$/` search pattern
pub fn escape_pattern(line: &str) -> String {
    let mut escaped = String::with_capacity(line.len());
    for c in line.chars() {
        if c == '\\' || c == '/' {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    if escaped.ends_with('$') {
        escaped.insert(escaped.len() - 1, '\\');
    }
    escaped
}
