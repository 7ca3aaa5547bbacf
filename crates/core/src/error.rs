//! Error types for the morsel tokenizer library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the tokenizer library.
///
/// File access is the only failure the library surfaces. Lookup-style
/// operations never fail: unknown or out-of-range input resolves to the
/// `<unk>` token instead of raising an error.
#[derive(Error, Debug)]
pub enum TokenizerError {
    /// A corpus or model file could not be opened, read, or written.
    #[error("file access error for {path}: {err}")]
    FileAccess {
        path: PathBuf,
        #[source]
        err: std::io::Error,
    },
}

impl TokenizerError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn file_access(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            err,
        }
    }
}

/// Result type alias for tokenizer operations.
pub type Result<T> = std::result::Result<T, TokenizerError>;
