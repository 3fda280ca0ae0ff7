//! Error types for the virtual filesystem and its storage backends.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures reading or writing the persisted snapshot.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The browser refused the operation (quota, private mode, ...).
    #[error("browser storage error: {0}")]
    Browser(String),
}

/// All virtual filesystem errors.
#[derive(Error, Debug)]
pub enum VfsError {
    #[error("'{0}' already exists")]
    AlreadyExists(String),

    #[error("'{0}' not found")]
    NotFound(String),

    #[error("'{0}' is not a directory")]
    NotADirectory(String),

    #[error("'{0}' is not a file")]
    NotAFile(String),

    #[error("invalid name '{0}'")]
    InvalidName(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("corrupt snapshot: {0}")]
    Snapshot(String),
}

pub type Result<T, E = VfsError> = std::result::Result<T, E>;
