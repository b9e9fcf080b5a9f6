use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::Context;
use log::debug;
use walkdir::WalkDir;

use crate::utils::PathExt;

/// A source file found while walking the listing directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    dir: PathBuf,
    name: String,
}

impl SourceFile {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// The heading of the file in the notebook.
    ///
    /// There are many `mod.rs` and `main.rs` files, so those are prefixed with
    /// the name of their directory.
    #[must_use]
    pub fn title(&self) -> String {
        let name = match self.dir.file_name() {
            Some(parent) if self.name == "mod.rs" || self.name == "main.rs" => {
                format!("{}/{}", parent.to_string_lossy(), self.name)
            }
            _ => self.name.clone(),
        };

        // `_` would start a subscript
        name.replace('_', "\\_")
    }

    #[must_use]
    pub fn path(&self) -> String {
        format!("{}/{}", self.dir.display(), self.name)
    }
}

/// Collects every file below `source`, sorted by directory and then by name.
pub fn collect_files(
    source: impl AsRef<Path>,
    extension: Option<&str>,
) -> anyhow::Result<Vec<SourceFile>> {
    let source = source.as_ref();
    let mut files = Vec::new();

    for entry in WalkDir::new(source) {
        let entry = entry.with_context(|| format!("failed to walk `{}`", source.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if let Some(extension) = extension {
            if !path.has_extension(extension) {
                continue;
            }
        }

        files.push(SourceFile::new(
            path.parent().unwrap_or(source),
            entry.file_name().to_string_lossy(),
        ));
    }

    files.sort_by_cached_key(|file| (file.dir.to_string_lossy().into_owned(), file.name.clone()));
    debug!("found {} files in `{}`", files.len(), source.display());

    Ok(files)
}

/// Includes whole source files as `listings`, one subsection per file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeListing {
    language: String,
}

impl CodeListing {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    #[must_use]
    pub fn render(&self, files: &[SourceFile]) -> String {
        let mut result = String::new();

        for file in files {
            // writing to a String can not fail
            let _ = write!(
                result,
                "\\subsection{{{}}}\n\\lstinputlisting[language={}]{{{}}}\n",
                file.title(),
                self.language,
                file.path(),
            );
        }

        result
    }
}

impl Default for CodeListing {
    fn default() -> Self {
        Self::new("Rust")
    }
}
