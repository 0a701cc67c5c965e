//! Error types for inventory building, reference extraction and scanning.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every failure that aborts an analysis run.
///
/// Unresolved references, unattributable files and unrecognized document
/// shapes are not errors; they are dropped or counted by the scanner.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("malformed XML in {}: {source}", path.display())]
    MalformedXml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },

    /// Only raised where a document has to be parsed as XML.
    #[error("{} is not valid UTF-8: {source}", path.display())]
    NotUtf8 {
        path: PathBuf,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("invalid artifact descriptor {}: {reason}", path.display())]
    InvalidDescriptor { path: PathBuf, reason: String },

    #[error("failed to compile artifact name pattern: {0}")]
    Matcher(#[from] regex::Error),

    #[error("invalid unit exclusion pattern '{pattern}': {source}")]
    InvalidExclusion {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("artifact '{artifact}' is declared by both '{first}' and '{second}'")]
    ArtifactCollision {
        artifact: String,
        first: String,
        second: String,
    },

    #[error("failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn xml(path: impl Into<PathBuf>, source: roxmltree::Error) -> Self {
        Self::MalformedXml {
            path: path.into(),
            source,
        }
    }
}
