//! Source loading utilities
//!
//! `SourceLoader` loads OCaml text from a file or a string and runs transforms on it. It also
//! remembers where the text came from, since an OCaml file name names a module.

use crate::ocaml::parsing::{ExtractOptions, Extraction};
use crate::ocaml::transforms::standard::{extraction_with, TokenStream, EXTRACTION, TOKENIZATION};
use crate::ocaml::transforms::{Transform, TransformError};
use std::fs;
use std::path::{Path, PathBuf};

/// Error that can occur when loading sources
#[derive(Debug, Clone)]
pub enum LoaderError {
    /// IO error when reading file
    IoError(String),
    /// Transform error
    TransformError(TransformError),
}

impl std::fmt::Display for LoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderError::IoError(msg) => write!(f, "IO error: {}", msg),
            LoaderError::TransformError(err) => write!(f, "Transform error: {}", err),
        }
    }
}

impl std::error::Error for LoaderError {}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError(err.to_string())
    }
}

impl From<TransformError> for LoaderError {
    fn from(err: TransformError) -> Self {
        LoaderError::TransformError(err)
    }
}

/// Module name an OCaml file defines: its stem with the first letter upper-cased.
///
/// `src/foo_bar.ml` defines `Foo_bar`.
pub fn module_name_for_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let mut chars = stem.chars();
    let first = chars.next()?;
    Some(first.to_ascii_uppercase().to_string() + chars.as_str())
}

/// Source loader with transform shortcuts
pub struct SourceLoader {
    source: String,
    path: Option<PathBuf>,
}

impl SourceLoader {
    /// Load from a file path. Invalid UTF-8 is replaced rather than rejected.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoaderError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        Ok(SourceLoader {
            source: String::from_utf8_lossy(&bytes).into_owned(),
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        SourceLoader {
            source: source.into(),
            path: None,
        }
    }

    /// Run a custom transform on the source
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> Result<O, LoaderError> {
        Ok(transform.run(self.source.clone())?)
    }

    pub fn tokenize(&self) -> Result<TokenStream, LoaderError> {
        self.with(&TOKENIZATION)
    }

    /// Extract tags with `options` as given.
    pub fn extract(&self, options: &ExtractOptions) -> Result<Extraction, LoaderError> {
        if *options == ExtractOptions::default() {
            self.with(&EXTRACTION)
        } else {
            self.with(&extraction_with(options.clone()))
        }
    }

    /// Extract tags, adding the module named after the file when the source has a path.
    pub fn extract_file(&self, options: &ExtractOptions) -> Result<Extraction, LoaderError> {
        match self.module_name() {
            Some(name) if options.file_module.is_none() => {
                self.extract(&options.clone().with_file_module(name))
            }
            _ => self.extract(options),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn module_name(&self) -> Option<String> {
        self.path.as_deref().and_then(module_name_for_path)
    }

    pub fn source_ref(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocaml::tags::Kind;
    use crate::ocaml::testing::fixture_path;

    #[test]
    fn test_module_name_for_path() {
        assert_eq!(
            module_name_for_path(Path::new("src/foo_bar.ml")),
            Some("Foo_bar".to_string())
        );
        assert_eq!(
            module_name_for_path(Path::new("Parser.mli")),
            Some("Parser".to_string())
        );
        assert_eq!(module_name_for_path(Path::new("")), None);
    }

    #[test]
    fn test_from_string_has_no_module() {
        let loader = SourceLoader::from_string("let x = 1");
        assert_eq!(loader.module_name(), None);
        let extraction = loader.extract_file(&ExtractOptions::default()).unwrap();
        assert_eq!(extraction.tags.len(), 1);
    }

    #[test]
    fn test_from_path_nonexistent() {
        let result = SourceLoader::from_path("nonexistent.ml");
        assert!(matches!(result, Err(LoaderError::IoError(_))));
    }

    #[test]
    fn test_from_path_adds_file_module() {
        let loader = SourceLoader::from_path(fixture_path("shapes.ml")).unwrap();
        assert_eq!(loader.module_name(), Some("Shapes".to_string()));

        let extraction = loader.extract_file(&ExtractOptions::default()).unwrap();
        assert_eq!(extraction.tags[0].name, "Shapes");
        assert_eq!(extraction.tags[0].kind, Kind::Module);
    }

    #[test]
    fn test_explicit_file_module_wins() {
        let loader = SourceLoader::from_path(fixture_path("shapes.ml")).unwrap();
        let options = ExtractOptions::default().with_file_module("Other");
        let extraction = loader.extract_file(&options).unwrap();
        assert_eq!(extraction.tags[0].name, "Other");
    }

    #[test]
    fn test_extract_honors_options() {
        let loader = SourceLoader::from_string("let f x = x");
        let plain = loader.extract(&ExtractOptions::default()).unwrap();
        assert_eq!(plain.tags.len(), 1);

        let local = loader
            .extract(&ExtractOptions::default().with_local_info(true))
            .unwrap();
        assert_eq!(local.tags.len(), 2);
        assert_eq!(local.tags[1].qualified_name(), "f/x");
    }

    #[test]
    fn test_tokenize() {
        let tokens = SourceLoader::from_string("type t").tokenize().unwrap();
        assert_eq!(tokens.len(), 2);
    }
}
