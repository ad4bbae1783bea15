//! Merging of YAML files on disk.
//!
//! Both files are read and parsed up front, and the destination is only
//! written once the merge has succeeded.
//!
//! # Examples
//!
//! ```no_run
//! use std::path::Path;
//!
//! use yamlmerge::files::{self, Options, WriteMode};
//!
//! let options = Options {
//!     write_mode: WriteMode::Atomic,
//! };
//!
//! let report = files::merge_files(Path::new("overrides.yaml"), Path::new("config.yaml"), &options)?;
//! println!("replaced {} values", report.replaced);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::merge::{self, Report};
use crate::yaml::{self, Document};

/// How the merged destination is written back to disk.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Truncate the destination file and write the merged document into it.
    #[default]
    Truncate,
    /// Write the merged document to a temporary file next to the destination
    /// and rename it over the destination, so that an interrupted write never
    /// leaves a partially written file behind.
    Atomic,
}

/// Options for [`merge_files`].
#[derive(Debug, Default, Clone)]
pub struct Options {
    /// How the destination is written.
    pub write_mode: WriteMode,
}

/// Error raised when merging files.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
    /// A file could not be parsed as YAML.
    #[error("failed to parse {}:{line}:{column}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// The 1-based line the error starts on.
        line: usize,
        /// The 1-based column the error starts on.
        column: usize,
        /// The underlying error.
        #[source]
        source: yaml::Error,
    },
    /// The documents could not be merged.
    #[error("failed to merge documents")]
    Merge {
        /// The underlying error.
        #[from]
        source: merge::Error,
    },
    /// The destination could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

/// Merge the YAML file at `source` into the YAML file at `destination`.
///
/// # Errors
///
/// Errors if either file can't be read or parsed, if the documents can't be
/// merged, or if the destination can't be written. The destination is left
/// untouched unless the error happened while writing it.
pub fn merge_files(source: &Path, destination: &Path, options: &Options) -> Result<Report, Error> {
    let source_doc = load(source)?;
    let mut destination_doc = load(destination)?;

    let report = merge::merge(&source_doc, &mut destination_doc)?;
    let output = destination_doc.to_vec();

    let result = match options.write_mode {
        WriteMode::Truncate => write_truncate(destination, &output),
        WriteMode::Atomic => write_atomic(destination, &output),
    };

    result.map_err(|source| Error::Write {
        path: destination.to_owned(),
        source,
    })?;

    tracing::info!(
        source = %source.display(),
        destination = %destination.display(),
        replaced = report.replaced,
        appended = report.appended,
        skipped = report.skipped,
        "merged files"
    );

    Ok(report)
}

/// Read and parse a document.
fn load(path: &Path) -> Result<Document, Error> {
    let input = fs::read(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;

    tracing::debug!(path = %path.display(), len = input.len(), "parsing");

    yaml::from_slice(&input).map_err(|source| {
        let (line, column) = line_column(&input, source.span().start);

        Error::Parse {
            path: path.to_owned(),
            line,
            column,
            source,
        }
    })
}

/// Translate a byte offset into a 1-based line and column.
fn line_column(input: &[u8], offset: usize) -> (usize, usize) {
    let before = input.get(..offset).unwrap_or(input);
    let line = memchr::memchr_iter(b'\n', before).count() + 1;

    let column = match memchr::memrchr(b'\n', before) {
        Some(n) => before.len() - n,
        None => before.len() + 1,
    };

    (line, column)
}

fn write_truncate(path: &Path, output: &[u8]) -> io::Result<()> {
    tracing::debug!(path = %path.display(), "writing in place");

    let mut file = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)?;

    file.write_all(output)?;
    file.flush()
}

fn write_atomic(path: &Path, output: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    tracing::debug!(path = %path.display(), temporary = %file.path().display(), "writing atomically");

    file.write_all(output)?;
    file.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(file.path(), metadata.permissions())?;
    }

    file.persist(path).map_err(|error| error.error)?;
    Ok(())
}
