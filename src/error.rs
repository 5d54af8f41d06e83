use std::path::PathBuf;

use thiserror::Error;

/// Failures at the file and settings edge. Segmentation itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("malformed document JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document '{filename}' already exists (use --force to overwrite)")]
    Conflict { filename: String },

    #[error("--out-dir is required when segmenting {count} files")]
    MissingOutDir { count: usize },

    #[error("cannot derive a document filename from {path}")]
    InvalidFilename { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
