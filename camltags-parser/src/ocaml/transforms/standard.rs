//! Standard transform definitions
//!
//! Pre-built pipelines, created on first use with `once_cell::sync::Lazy`.

use crate::ocaml::parsing::{ExtractOptions, Extraction};
use crate::ocaml::token::TokenRecord;
use crate::ocaml::transforms::stages::{TagExtraction, Tokenization};
use crate::ocaml::transforms::Transform;
use once_cell::sync::Lazy;

/// Owned token stream
pub type TokenStream = Vec<TokenRecord>;

pub type TokenizationTransform = Transform<String, TokenStream>;

pub type ExtractionTransform = Transform<String, Extraction>;

/// Tokenization: String → tokens
pub static TOKENIZATION: Lazy<TokenizationTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization::new()));

/// Extraction with default options: String → tags and diagnostics
pub static EXTRACTION: Lazy<ExtractionTransform> =
    Lazy::new(|| extraction_with(ExtractOptions::default()));

/// Extraction pipeline for non-default options
pub fn extraction_with(options: ExtractOptions) -> ExtractionTransform {
    Transform::from_fn(Ok).then(TagExtraction::new(options))
}
