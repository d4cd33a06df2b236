//! Errors raised while turning raw text into posts

use std::path::PathBuf;
use thiserror::Error;

/// A document that cannot become a [`Post`](super::Post)
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document does not start with a front-matter block")]
    MissingFrontMatter,

    #[error("front-matter block opened with `{delimiter}` is never closed")]
    UnterminatedFrontMatter { delimiter: &'static str },

    #[error("invalid {format} front-matter: {message}")]
    InvalidFrontMatter {
        format: &'static str,
        message: String,
    },

    #[error("front-matter has no title")]
    MissingTitle,

    #[error("front-matter has no date")]
    MissingDate,

    #[error("unrecognized date `{0}`")]
    InvalidDate(String),
}

/// Failure to load a post file from disk
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed post {path:?}: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

impl LoadError {
    /// Path of the file that failed to load
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::Io { path, .. } | LoadError::Document { path, .. } => path,
        }
    }
}
