use camino::Utf8PathBuf;
use tissage_vfs::VfsError;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path}: {message}")]
    Config { path: Utf8PathBuf, message: String },

    #[error("path is not valid UTF-8: {0}")]
    NonUtf8Path(String),

    #[error("unknown entry '{0}'")]
    UnknownEntry(String),

    #[error("{0} is not a directory")]
    NotADirectory(Utf8PathBuf),

    #[error("cannot copy {0} into itself")]
    CopyIntoSelf(Utf8PathBuf),

    #[error("{asset} lies inside {dest}, which the copy would replace")]
    AssetInsideDestination { asset: Utf8PathBuf, dest: Utf8PathBuf },

    #[error(transparent)]
    Vfs(#[from] VfsError),
}

pub type Result<T, E = SiteError> = std::result::Result<T, E>;
