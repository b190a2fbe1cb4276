//! Cross reference listing: name, kind, line, file and the declaring line, in columns.

use super::registry::{FormatError, Formatter};
use super::{entries, RenderOptions, TaggedFile};

pub struct XrefFormatter;

impl Formatter for XrefFormatter {
    fn name(&self) -> &str {
        "xref"
    }

    fn serialize(
        &self,
        files: &[TaggedFile],
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        let mut output = String::new();
        for entry in entries(files, options.sort) {
            let line = format!(
                "{:<16} {:<12} {:>4} {:<16} {}",
                entry.tag.qualified_name(),
                entry.tag.kind.name(),
                entry.tag.line,
                entry.file.path,
                entry.line_text.trim()
            );
            output.push_str(line.trim_end());
            output.push('\n');
        }
        Ok(output)
    }

    fn description(&self) -> &str {
        "Human readable cross reference"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocaml::formats::fixtures;

    #[test]
    fn test_xref_columns() {
        let options = RenderOptions {
            sort: false,
            header: true,
        };
        let output = XrefFormatter
            .serialize(&[fixtures::shapes()], &options)
            .unwrap();
        insta::assert_snapshot!(output, @r###"
        Shapes           module          1 shapes.ml        type shape =
        shape            type            1 shapes.ml        type shape =
        shape.Circle     Constructor     2 shapes.ml        | Circle of float
        shape.Square     Constructor     3 shapes.ml        | Square of float
        area             function        5 shapes.ml        let area s = 0.0
        "###);
    }
}
