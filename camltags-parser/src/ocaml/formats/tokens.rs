//! Token dump, for looking at what the tokenizer made of a file

use super::registry::{FormatError, Formatter};
use super::{RenderOptions, TaggedFile};
use crate::ocaml::transforms::standard::{TokenStream, TOKENIZATION};
use serde::Serialize;

#[derive(Serialize)]
struct FileTokens<'a> {
    file: &'a str,
    tokens: TokenStream,
}

pub struct TokensFormatter;

impl Formatter for TokensFormatter {
    fn name(&self) -> &str {
        "tokens"
    }

    fn serialize(
        &self,
        files: &[TaggedFile],
        _options: &RenderOptions,
    ) -> Result<String, FormatError> {
        let dumps = files
            .iter()
            .map(|file| {
                let tokens = TOKENIZATION
                    .run(file.source.clone())
                    .map_err(|err| FormatError::SerializationError(err.to_string()))?;
                Ok(FileTokens {
                    file: &file.path,
                    tokens,
                })
            })
            .collect::<Result<Vec<_>, FormatError>>()?;

        let mut json = serde_json::to_string_pretty(&dumps)
            .map_err(|err| FormatError::SerializationError(err.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    fn description(&self) -> &str {
        "Token stream of each file as JSON"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_dump() {
        let files = [TaggedFile::new("a.ml", "let x (* c *) = 1", Vec::new())];
        let output = TokensFormatter
            .serialize(&files, &RenderOptions::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value[0]["file"], "a.ml");
        let tokens = value[0]["tokens"].as_array().unwrap();
        let texts: Vec<&str> = tokens
            .iter()
            .map(|token| token["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, vec!["let", "x", "=", "1"]);
        assert_eq!(tokens[2]["span"]["start"], 14);
        assert_eq!(tokens[2]["span"]["end"], 15);
    }
}
