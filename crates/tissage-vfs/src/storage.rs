//! Where snapshots live between sessions.
//!
//! The browser backend (`localStorage`) is provided by `tissage-applets`;
//! this crate only ships the platform-free ones.

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::StorageError;

/// Key under which the snapshot is kept in browser storage.
pub const STORAGE_KEY: &str = "sci_ux_filesystem";

/// A slot holding at most one serialized snapshot.
pub trait Storage {
    /// `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>, StorageError>;
    fn save(&mut self, data: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-process storage, used by tests and static page generation.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    data: Option<String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: impl Into<String>) -> Self {
        Self {
            data: Some(data.into()),
        }
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

impl Storage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.data.clone())
    }

    fn save(&mut self, data: &str) -> Result<(), StorageError> {
        self.data = Some(data.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.data = None;
        Ok(())
    }
}

/// A snapshot stored as a single JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: Utf8PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for FileStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        match fs_err::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&mut self, data: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            fs_err::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        fs_err::write(&self.path, data).map_err(|e| self.io_error(e))
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        match fs_err::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut s = MemoryStorage::new();
        assert_eq!(s.load().unwrap(), None);
        s.save("abc").unwrap();
        assert_eq!(s.load().unwrap().as_deref(), Some("abc"));
        s.clear().unwrap();
        assert_eq!(s.data(), None);
    }

    #[test]
    fn test_file_storage_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let mut s = FileStorage::new(root.join("nested/state/fs.json"));

        assert_eq!(s.load().unwrap(), None);
        s.save("{}").unwrap();
        assert_eq!(s.load().unwrap().as_deref(), Some("{}"));

        s.clear().unwrap();
        assert!(!s.path().exists());
        // clearing twice is fine
        s.clear().unwrap();
    }
}
