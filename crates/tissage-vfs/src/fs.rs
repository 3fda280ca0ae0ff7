use tracing::{debug, info, warn};

use crate::error::{Result, VfsError};
use crate::item::{FileSystemItem, validate_name};
use crate::snapshot;
use crate::storage::Storage;

/// A persistent in-memory file tree with a current working directory.
///
/// Every mutation writes the whole tree back to the storage. When that
/// write fails the in-memory change is kept and the error is returned.
#[derive(Debug)]
pub struct VirtualFileSystem<S: Storage> {
    root: FileSystemItem,
    current_path: Vec<String>,
    storage: S,
}

impl<S: Storage> VirtualFileSystem<S> {
    /// Load the tree from `storage`, or create and save the default tree when
    /// nothing was stored or the stored snapshot is unreadable.
    pub fn open(storage: S) -> Result<Self> {
        let stored = storage.load()?;
        let mut vfs = Self {
            root: FileSystemItem::directory("root"),
            current_path: Vec::new(),
            storage,
        };

        match stored.as_deref().map(snapshot::decode) {
            Some(Ok(root)) => {
                info!("Loaded filesystem from storage");
                vfs.root = root;
            }
            Some(Err(e)) => {
                warn!("Discarding stored filesystem: {e}");
                vfs.root = default_tree();
                vfs.persist()?;
            }
            None => {
                vfs.root = default_tree();
                vfs.persist()?;
                info!("Created new filesystem with default files");
            }
        }
        Ok(vfs)
    }

    pub fn root(&self) -> &FileSystemItem {
        &self.root
    }

    pub fn current_path(&self) -> &[String] {
        &self.current_path
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The directory at the current path. A path that no longer resolves to
    /// a directory resets to the root.
    pub fn current_directory(&mut self) -> &FileSystemItem {
        if resolve_dir(&self.root, &self.current_path).is_none() {
            debug!(path = ?self.current_path, "current path vanished, back to root");
            self.current_path.clear();
        }
        resolve_dir(&self.root, &self.current_path).unwrap_or(&self.root)
    }

    fn current_directory_mut(&mut self) -> Result<&mut FileSystemItem> {
        if resolve_dir(&self.root, &self.current_path).is_none() {
            self.current_path.clear();
        }
        let path = &self.current_path;
        resolve_dir_mut(&mut self.root, path)
            .ok_or_else(|| VfsError::NotADirectory(format!("/{}", path.join("/"))))
    }

    /// Change to an absolute path given as a list of names.
    pub fn navigate_to<P: AsRef<str>>(&mut self, path: &[P]) -> Result<()> {
        let mut dir = &self.root;
        for part in path {
            let part = part.as_ref();
            dir = match dir.child(part) {
                Some(next) if next.is_directory() => next,
                Some(_) => return Err(VfsError::NotADirectory(part.to_string())),
                None => return Err(VfsError::NotFound(part.to_string())),
            };
        }
        self.current_path = path.iter().map(|p| p.as_ref().to_string()).collect();
        debug!(path = %self.path_string(), "navigated");
        Ok(())
    }

    /// Descend into a child directory of the current directory.
    pub fn enter(&mut self, name: &str) -> Result<()> {
        let mut path = self.current_path.clone();
        path.push(name.to_string());
        self.navigate_to(&path)
    }

    /// Move to the parent directory; `false` when already at the root.
    pub fn go_up(&mut self) -> bool {
        self.current_path.pop().is_some()
    }

    pub fn current_items(&mut self) -> Vec<&FileSystemItem> {
        self.current_directory().children.values().collect()
    }

    /// `/` at the root, otherwise `/a/b`.
    pub fn path_string(&self) -> String {
        format!("/{}", self.current_path.join("/"))
    }

    pub fn create_file(&mut self, name: &str, content: &str) -> Result<()> {
        validate_name(name)?;
        let dir = self.current_directory_mut()?;
        if dir.child(name).is_some() {
            return Err(VfsError::AlreadyExists(name.to_string()));
        }
        dir.add_child(FileSystemItem::file(name, content));
        debug!(name, "created file");
        self.persist()
    }

    pub fn create_directory(&mut self, name: &str) -> Result<()> {
        validate_name(name)?;
        let dir = self.current_directory_mut()?;
        if dir.child(name).is_some() {
            return Err(VfsError::AlreadyExists(name.to_string()));
        }
        dir.add_child(FileSystemItem::directory(name));
        debug!(name, "created directory");
        self.persist()
    }

    /// Remove a file or a whole directory from the current directory.
    pub fn delete_item(&mut self, name: &str) -> Result<()> {
        let dir = self.current_directory_mut()?;
        if dir.remove_child(name).is_none() {
            return Err(VfsError::NotFound(name.to_string()));
        }
        debug!(name, "deleted");
        self.persist()
    }

    /// Drop everything, rebuild the default tree and return to the root.
    pub fn reset(&mut self) -> Result<()> {
        self.storage.clear()?;
        self.root = default_tree();
        self.current_path.clear();
        self.persist()?;
        info!("Filesystem reset to defaults");
        Ok(())
    }

    /// Find an item by absolute (`/a/b`) or root-relative (`a/b`) path.
    /// `/` is the root itself.
    pub fn lookup(&self, path: &str) -> Option<&FileSystemItem> {
        let mut item = &self.root;
        for part in split_path(path) {
            item = item.child(part)?;
        }
        Some(item)
    }

    pub fn read_file(&self, path: &str) -> Result<&str> {
        match self.lookup(path) {
            Some(item) if item.is_file() => Ok(&item.content),
            Some(_) => Err(VfsError::NotAFile(path.to_string())),
            None => Err(VfsError::NotFound(path.to_string())),
        }
    }

    /// Parent directories of `path` that do not exist yet, outermost first.
    pub fn missing_parents(&self, path: &str) -> Vec<String> {
        let parts: Vec<&str> = split_path(path).collect();
        let Some((_, parents)) = parts.split_last() else {
            return Vec::new();
        };
        let mut dir = Some(&self.root);
        let mut missing = Vec::new();
        let mut prefix = String::new();
        for part in parents {
            prefix.push('/');
            prefix.push_str(part);
            dir = dir.and_then(|d| d.child(part));
            if dir.is_none() {
                missing.push(prefix.clone());
            }
        }
        missing
    }

    /// Create or overwrite the file at `path`. Missing parent directories
    /// are created only when `create_dirs` is set.
    pub fn write_file(&mut self, path: &str, content: &str, create_dirs: bool) -> Result<()> {
        let parts: Vec<&str> = split_path(path).collect();
        let Some((name, parents)) = parts.split_last() else {
            return Err(VfsError::InvalidName(path.to_string()));
        };
        validate_name(name)?;
        for part in parents {
            validate_name(part)?;
        }

        let mut dir = &mut self.root;
        for part in parents {
            if dir.child(part).is_none() {
                if !create_dirs {
                    return Err(VfsError::NotFound(part.to_string()));
                }
                debug!(dir = %part, "creating parent directory");
                dir.add_child(FileSystemItem::directory(*part));
            }
            dir = match dir.child_mut(part) {
                Some(next) if next.is_directory() => next,
                _ => return Err(VfsError::NotADirectory(part.to_string())),
            };
        }

        match dir.child_mut(name) {
            Some(existing) if existing.is_file() => existing.set_content(content),
            Some(_) => return Err(VfsError::NotAFile(path.to_string())),
            None => dir.add_child(FileSystemItem::file(*name, content)),
        }
        debug!(path, bytes = content.len(), "wrote file");
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let json = snapshot::encode(&self.root)?;
        self.storage.save(&json)?;
        Ok(())
    }
}

fn resolve_dir<'a>(root: &'a FileSystemItem, path: &[String]) -> Option<&'a FileSystemItem> {
    let mut dir = root;
    for part in path {
        dir = dir.child(part).filter(|d| d.is_directory())?;
    }
    Some(dir)
}

fn resolve_dir_mut<'a>(
    root: &'a mut FileSystemItem,
    path: &[String],
) -> Option<&'a mut FileSystemItem> {
    let mut dir = root;
    for part in path {
        dir = dir.child_mut(part).filter(|d| d.is_directory())?;
    }
    Some(dir)
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|p| !p.is_empty())
}

/// The tree a fresh filesystem starts with.
pub fn default_tree() -> FileSystemItem {
    let mut root = FileSystemItem::directory("root");

    let mut notebooks = FileSystemItem::directory("notebooks");
    notebooks.add_child(
        FileSystemItem::file(
            "sample.ipynb",
            r#"{"cells": [], "metadata": {}, "nbformat": 4}"#,
        )
        .with_size(1024),
    );
    root.add_child(notebooks);

    let mut data = FileSystemItem::directory("data");
    data.add_child(
        FileSystemItem::file("sample.csv", "name,age,city\nJohn,25,NYC\nJane,30,LA").with_size(512),
    );
    root.add_child(data);

    let mut scripts = FileSystemItem::directory("scripts");
    scripts.add_child(
        FileSystemItem::file(
            "analysis.py",
            "# Sample Python script\nimport pandas as pd\nprint('Hello Sci-UX!')",
        )
        .with_size(256),
    );
    root.add_child(scripts);

    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    fn fresh() -> VirtualFileSystem<MemoryStorage> {
        VirtualFileSystem::open(MemoryStorage::new()).unwrap()
    }

    fn names(vfs: &mut VirtualFileSystem<MemoryStorage>) -> Vec<String> {
        vfs.current_items().into_iter().map(|i| i.name.clone()).collect()
    }

    #[test_log::test]
    fn test_default_tree_is_saved() {
        let vfs = fresh();
        assert!(vfs.storage().data().is_some());
        let csv = vfs.lookup("/data/sample.csv").unwrap();
        assert_eq!(csv.size, 512);
        assert_eq!(vfs.lookup("notebooks/sample.ipynb").unwrap().size, 1024);
        assert_eq!(vfs.lookup("/scripts/analysis.py").unwrap().size, 256);
    }

    #[test_log::test]
    fn test_changes_survive_reopen() {
        let mut vfs = fresh();
        vfs.create_directory("projects").unwrap();
        vfs.enter("projects").unwrap();
        vfs.create_file("todo.txt", "milk").unwrap();

        let mut reopened = VirtualFileSystem::open(vfs.into_storage()).unwrap();
        assert_eq!(reopened.read_file("/projects/todo.txt").unwrap(), "milk");
        assert_eq!(names(&mut reopened), ["notebooks", "data", "scripts", "projects"]);
        assert_eq!(reopened.path_string(), "/");
    }

    #[test_log::test]
    fn test_corrupt_snapshot_rebuilds_defaults() {
        let vfs = VirtualFileSystem::open(MemoryStorage::with_data("{broken")).unwrap();
        assert!(vfs.lookup("/data").is_some());
        assert!(vfs.storage().data().unwrap().contains("\"version\""));
    }

    #[test_log::test]
    fn test_navigation() {
        let mut vfs = fresh();
        assert_eq!(vfs.path_string(), "/");
        assert!(!vfs.go_up());

        vfs.navigate_to(&["data"]).unwrap();
        assert_eq!(vfs.path_string(), "/data");
        assert_eq!(names(&mut vfs), ["sample.csv"]);

        assert!(matches!(vfs.enter("sample.csv"), Err(VfsError::NotADirectory(_))));
        assert!(matches!(vfs.navigate_to(&["nope"]), Err(VfsError::NotFound(_))));
        assert_eq!(vfs.path_string(), "/data");

        assert!(vfs.go_up());
        assert_eq!(vfs.path_string(), "/");
    }

    #[test_log::test]
    fn test_deleted_current_directory_resets_to_root() {
        let mut vfs = fresh();
        vfs.navigate_to(&["data"]).unwrap();
        vfs.go_up();
        vfs.current_path = vec!["data".into()];
        vfs.root.remove_child("data");
        assert_eq!(vfs.current_directory().name, "root");
        assert_eq!(vfs.path_string(), "/");
    }

    #[test_log::test]
    fn test_mutations_target_nested_directory() {
        let mut vfs = fresh();
        vfs.navigate_to(&["data"]).unwrap();
        vfs.create_directory("raw").unwrap();
        vfs.enter("raw").unwrap();
        vfs.create_file("a.csv", "x").unwrap();
        vfs.delete_item("a.csv").unwrap();
        vfs.create_file("b.csv", "y").unwrap();
        assert_eq!(names(&mut vfs), ["b.csv"]);
        assert_eq!(vfs.read_file("/data/raw/b.csv").unwrap(), "y");

        vfs.root.remove_child("data");
        vfs.create_file("orphan.txt", "").unwrap();
        assert_eq!(vfs.path_string(), "/");
        assert!(vfs.lookup("/orphan.txt").is_some());
    }

    #[test_log::test]
    fn test_create_rejects_duplicates_and_bad_names() {
        let mut vfs = fresh();
        assert!(matches!(
            vfs.create_directory("data"),
            Err(VfsError::AlreadyExists(n)) if n == "data"
        ));
        assert!(matches!(vfs.create_file("data", ""), Err(VfsError::AlreadyExists(_))));
        for bad in ["", ".", "..", "a/b"] {
            assert!(matches!(vfs.create_file(bad, ""), Err(VfsError::InvalidName(_))));
        }
    }

    #[test_log::test]
    fn test_file_size_is_byte_length() {
        let mut vfs = fresh();
        vfs.create_file("note.txt", "héllo").unwrap();
        assert_eq!(vfs.lookup("/note.txt").unwrap().size, 6);
    }

    #[test_log::test]
    fn test_delete() {
        let mut vfs = fresh();
        vfs.delete_item("data").unwrap();
        assert!(vfs.lookup("/data/sample.csv").is_none());
        assert!(matches!(vfs.delete_item("data"), Err(VfsError::NotFound(_))));
        let reopened = VirtualFileSystem::open(vfs.into_storage()).unwrap();
        assert!(reopened.lookup("/data").is_none());
    }

    #[test_log::test]
    fn test_reset() {
        let mut vfs = fresh();
        vfs.delete_item("notebooks").unwrap();
        vfs.navigate_to(&["data"]).unwrap();
        vfs.reset().unwrap();
        assert_eq!(vfs.path_string(), "/");
        assert!(vfs.lookup("/notebooks/sample.ipynb").is_some());
    }

    #[test_log::test]
    fn test_read_and_write_paths() {
        let mut vfs = fresh();
        assert!(matches!(vfs.read_file("/data"), Err(VfsError::NotAFile(_))));
        assert!(matches!(vfs.read_file("/data/x.csv"), Err(VfsError::NotFound(_))));

        vfs.write_file("/data/sample.csv", "a,b", false).unwrap();
        let csv = vfs.lookup("/data/sample.csv").unwrap();
        assert_eq!((csv.content.as_str(), csv.size), ("a,b", 3));

        assert_eq!(vfs.missing_parents("/x/y/z.txt"), ["/x", "/x/y"]);
        assert!(matches!(
            vfs.write_file("/x/y/z.txt", "z", false),
            Err(VfsError::NotFound(p)) if p == "x"
        ));
        vfs.write_file("/x/y/z.txt", "z", true).unwrap();
        assert_eq!(vfs.read_file("x/y/z.txt").unwrap(), "z");
        assert!(vfs.missing_parents("/x/y/z.txt").is_empty());

        assert!(matches!(
            vfs.write_file("/data/sample.csv/inner", "", true),
            Err(VfsError::NotADirectory(_))
        ));
        assert!(matches!(vfs.write_file("/data", "", false), Err(VfsError::NotAFile(_))));
        assert!(matches!(vfs.write_file("/", "", false), Err(VfsError::InvalidName(_))));
    }

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn load(&self) -> std::result::Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn save(&mut self, _: &str) -> std::result::Result<(), StorageError> {
            Err(StorageError::Browser("quota exceeded".into()))
        }
        fn clear(&mut self) -> std::result::Result<(), StorageError> {
            Ok(())
        }
    }

    #[test_log::test]
    fn test_save_failure_is_reported() {
        let err = VirtualFileSystem::open(BrokenStorage).unwrap_err();
        assert!(err.to_string().contains("quota exceeded"));
    }
}
