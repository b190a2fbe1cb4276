//! Individual transformation stages
//!
//! Both stages start from the source text. Neither can fail on any input; the `Result` is the
//! pipeline's contract.

use crate::ocaml::lexing::Tokenizer;
use crate::ocaml::parsing::{extract_tags, ExtractOptions, Extraction};
use crate::ocaml::token::TokenRecord;
use crate::ocaml::transforms::{Runnable, TransformError};

/// Tokenization stage: `String` → owned token stream, end-of-input excluded
#[derive(Debug, Default)]
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Tokenization
    }
}

impl Runnable<String, Vec<TokenRecord>> for Tokenization {
    fn run(&self, input: String) -> Result<Vec<TokenRecord>, TransformError> {
        Ok(Tokenizer::new(&input).map(TokenRecord::from).collect())
    }
}

/// Tag extraction stage: `String` → tags and diagnostics
#[derive(Debug, Default)]
pub struct TagExtraction {
    options: ExtractOptions,
}

impl TagExtraction {
    pub fn new(options: ExtractOptions) -> Self {
        Self { options }
    }
}

impl Runnable<String, Extraction> for TagExtraction {
    fn run(&self, input: String) -> Result<Extraction, TransformError> {
        Ok(extract_tags(&input, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocaml::token::TokenKind;

    #[test]
    fn test_tokenization_owns_its_text() {
        let tokens = Tokenization::new()
            .run("let x = (* no *) 1".to_string())
            .unwrap();
        let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Let,
                TokenKind::Ident,
                TokenKind::Equals,
                TokenKind::Literal
            ]
        );
        assert_eq!(tokens[3].span, 17..18);
    }

    #[test]
    fn test_extraction_uses_its_options() {
        let stage = TagExtraction::new(ExtractOptions::default().with_local_info(true));
        let extraction = stage.run("let f x = x".to_string()).unwrap();
        assert_eq!(extraction.tags.len(), 2);
    }
}
