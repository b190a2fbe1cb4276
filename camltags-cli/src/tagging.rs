//! Tagging a list of files
//!
//! Each file is loaded and extracted on its own. A file that cannot be read is recorded as a
//! failure and the remaining files are still tagged.

use camltags_parser::ocaml::formats::TaggedFile;
use camltags_parser::ocaml::{Diagnostic, ExtractOptions, LoaderError, SourceLoader};
use tracing::debug;

/// What tagging a set of files produced
#[derive(Debug, Default)]
pub struct TagRun {
    pub files: Vec<TaggedFile>,
    /// Files that could not be loaded, with the reason
    pub failures: Vec<(String, LoaderError)>,
    /// Non-fatal conditions, with the file they were found in
    pub diagnostics: Vec<(String, Diagnostic)>,
}

impl TagRun {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Tag every path in order. With `file_module`, each file gets a module tag named after it.
pub fn tag_files(paths: &[String], options: &ExtractOptions, file_module: bool) -> TagRun {
    let mut run = TagRun::default();
    for path in paths {
        match tag_file(path, options, file_module) {
            Ok((file, diagnostics)) => {
                run.diagnostics.extend(
                    diagnostics
                        .into_iter()
                        .map(|diagnostic| (path.clone(), diagnostic)),
                );
                run.files.push(file);
            }
            Err(err) => run.failures.push((path.clone(), err)),
        }
    }
    run
}

fn tag_file(
    path: &str,
    options: &ExtractOptions,
    file_module: bool,
) -> Result<(TaggedFile, Vec<Diagnostic>), LoaderError> {
    let loader = SourceLoader::from_path(path)?;
    let extraction = if file_module {
        loader.extract_file(options)?
    } else {
        loader.extract(options)?
    };
    debug!(path, tags = extraction.tags.len(), "tagged file");
    Ok((
        TaggedFile::new(path, loader.source_ref(), extraction.tags),
        extraction.diagnostics,
    ))
}
