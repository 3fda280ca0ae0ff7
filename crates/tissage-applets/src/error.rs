use thiserror::Error;
use tissage_vfs::VfsError;

#[derive(Error, Debug)]
pub enum AppletError {
    #[error(transparent)]
    Vfs(#[from] VfsError),

    /// A save is already running.
    #[error("a save is already in progress")]
    SaveInProgress,

    /// `save` without a current file; callers fall back to "save as".
    #[error("no file is open")]
    NoCurrentFile,

    #[error("failed to encode editor options: {0}")]
    Options(String),

    #[error("{0}")]
    Dom(String),
}

pub type Result<T, E = AppletError> = std::result::Result<T, E>;
