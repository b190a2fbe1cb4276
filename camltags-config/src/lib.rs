//! Shared configuration loader for camltags.
//!
//! `defaults/camltags.default.toml` is embedded into the binary so that docs and runtime
//! behavior stay in sync. Applications layer user files and command line overrides on top of
//! those defaults via [`Loader`] before deserializing into [`CamltagsConfig`].

use camltags_parser::ocaml::{ExtractOptions, Kind, KindSet};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/camltags.default.toml");

/// Name of the per-project file picked up from the working directory
pub const PROJECT_FILE: &str = "camltags.toml";

/// Top-level configuration consumed by camltags.
#[derive(Debug, Clone, Deserialize)]
pub struct CamltagsConfig {
    pub extraction: ExtractionConfig,
    pub kinds: KindsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionConfig {
    pub export_local_info: bool,
    pub max_scope_depth: usize,
    /// Tag each file with the module its name defines
    pub file_module: bool,
}

/// One switch per declaration kind.
#[derive(Debug, Clone, Deserialize)]
pub struct KindsConfig {
    pub class: bool,
    pub method: bool,
    pub module: bool,
    pub variable: bool,
    pub value_signature: bool,
    #[serde(rename = "type")]
    pub type_: bool,
    pub function: bool,
    pub constructor: bool,
    pub record_field: bool,
    pub exception: bool,
}

impl KindsConfig {
    pub fn enabled(&self, kind: Kind) -> bool {
        match kind {
            Kind::Class => self.class,
            Kind::Method => self.method,
            Kind::Module => self.module,
            Kind::Variable => self.variable,
            Kind::ValueSignature => self.value_signature,
            Kind::Type => self.type_,
            Kind::Function => self.function,
            Kind::Constructor => self.constructor,
            Kind::RecordField => self.record_field,
            Kind::Exception => self.exception,
        }
    }

    pub fn kind_set(&self) -> KindSet {
        Kind::ALL
            .into_iter()
            .filter(|kind| self.enabled(*kind))
            .collect()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub sort: bool,
    pub header: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Ctags,
    Xref,
    Json,
    Yaml,
    Tokens,
}

impl OutputFormat {
    /// Name of the formatter in the format registry
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Ctags => "ctags",
            OutputFormat::Xref => "xref",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Tokens => "tokens",
        }
    }
}

impl CamltagsConfig {
    /// Extraction settings for the parser. The file module name is per file and left unset.
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions::default()
            .with_kinds(self.kinds.kind_set())
            .with_local_info(self.extraction.export_local_info)
            .with_max_depth(self.extraction.max_scope_depth)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Enable exactly the kinds in `kinds`, overriding every `kinds.*` switch.
    pub fn with_kinds(self, kinds: KindSet) -> Result<Self, ConfigError> {
        Kind::ALL.into_iter().try_fold(self, |loader, kind| {
            loader.set_override(&format!("kinds.{}", kind_key(kind)), kinds.contains(kind))
        })
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CamltagsConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Key of a kind's switch in the `[kinds]` table
pub fn kind_key(kind: Kind) -> &'static str {
    match kind {
        Kind::Class => "class",
        Kind::Method => "method",
        Kind::Module => "module",
        Kind::Variable => "variable",
        Kind::ValueSignature => "value_signature",
        Kind::Type => "type",
        Kind::Function => "function",
        Kind::Constructor => "constructor",
        Kind::RecordField => "record_field",
        Kind::Exception => "exception",
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CamltagsConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert!(!config.extraction.export_local_info);
        assert_eq!(config.extraction.max_scope_depth, 256);
        assert!(config.extraction.file_module);
        assert_eq!(config.kinds.kind_set(), KindSet::all());
        assert_eq!(config.output.format, OutputFormat::Ctags);
        assert!(config.output.sort);
        assert!(config.output.header);
    }

    #[test]
    fn defaults_match_parser_defaults() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.extract_options(), ExtractOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("output.format", "json")
            .expect("override to apply")
            .set_override("extraction.export_local_info", true)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(config.extract_options().export_local_info);
    }

    #[test]
    fn kind_overrides_select_exact_set() {
        let kinds = KindSet::from_letters("fM").unwrap();
        let config = Loader::new()
            .with_kinds(kinds)
            .expect("overrides to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.extract_options().kinds, kinds);
        assert!(!config.kinds.type_);
    }

    #[test]
    fn user_file_layers_over_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        writeln!(file, "[kinds]\nconstructor = false\n\n[output]\nformat = \"xref\"")
            .expect("write config");

        let config = Loader::new()
            .with_file(file.path())
            .build()
            .expect("config to build");
        assert!(!config.kinds.constructor);
        assert!(config.kinds.type_);
        assert_eq!(config.output.format, OutputFormat::Xref);
        assert_eq!(config.extraction.max_scope_depth, 256);
    }

    #[test]
    fn missing_required_file_is_an_error() {
        assert!(Loader::new()
            .with_file("/nonexistent/camltags.toml")
            .build()
            .is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        assert!(Loader::new()
            .with_optional_file("/nonexistent/camltags.toml")
            .build()
            .is_ok());
    }

    #[test]
    fn rejects_unknown_format() {
        let result = Loader::new()
            .set_override("output.format", "etags")
            .expect("override to apply")
            .build();
        assert!(result.is_err());
    }
}
