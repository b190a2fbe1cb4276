//! JSON and YAML renderings of the tag records

use super::registry::{FormatError, Formatter};
use super::{entries, RenderOptions, TaggedFile};
use crate::ocaml::tags::Tag;
use serde::Serialize;

/// A tag as written by the serialized formats: the record plus its file
#[derive(Serialize)]
struct FileTag<'a> {
    file: &'a str,
    #[serde(flatten)]
    tag: &'a Tag,
}

fn file_tags<'a>(files: &'a [TaggedFile], options: &RenderOptions) -> Vec<FileTag<'a>> {
    entries(files, options.sort)
        .into_iter()
        .map(|entry| FileTag {
            file: &entry.file.path,
            tag: entry.tag,
        })
        .collect()
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(
        &self,
        files: &[TaggedFile],
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(&file_tags(files, options))
            .map_err(|err| FormatError::SerializationError(err.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    fn description(&self) -> &str {
        "Tag records as a JSON array"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(
        &self,
        files: &[TaggedFile],
        options: &RenderOptions,
    ) -> Result<String, FormatError> {
        serde_yaml::to_string(&file_tags(files, options))
            .map_err(|err| FormatError::SerializationError(err.to_string()))
    }

    fn description(&self) -> &str {
        "Tag records as a YAML list"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocaml::formats::fixtures;

    fn unsorted() -> RenderOptions {
        RenderOptions {
            sort: false,
            header: false,
        }
    }

    #[test]
    fn test_json_records() {
        let output = JsonFormatter
            .serialize(&[fixtures::shapes()], &unsorted())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 5);

        assert_eq!(records[2]["file"], "shapes.ml");
        assert_eq!(records[2]["name"], "Circle");
        assert_eq!(records[2]["kind"], "Constructor");
        assert_eq!(records[2]["line"], 2);
        assert_eq!(records[2]["column"], 4);
        assert_eq!(records[2]["scope"]["kind"], "type");
        assert_eq!(records[2]["scope"]["name"], "shape");
        assert!(records[4].get("scope").is_none());
    }

    #[test]
    fn test_yaml_records() {
        let file = fixtures::shapes();
        let files = [TaggedFile::new(
            file.path,
            file.source,
            file.tags.into_iter().skip(4).collect(),
        )];
        let output = YamlFormatter.serialize(&files, &unsorted()).unwrap();
        insta::assert_snapshot!(output, @r###"
        - file: shapes.ml
          name: area
          kind: function
          line: 5
          column: 4
          byte_offset: 58
        "###);
    }

    #[test]
    fn test_empty_input_is_an_empty_list() {
        let output = JsonFormatter.serialize(&[], &unsorted()).unwrap();
        assert_eq!(output, "[]\n");
    }
}
