use facet::Facet;
use indexmap::IndexMap;

use crate::error::{Result, VfsError};

/// File or directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Facet)]
#[repr(u8)]
#[facet(rename_all = "snake_case")]
pub enum ItemKind {
    File,
    Directory,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::File => "file",
            ItemKind::Directory => "directory",
        }
    }
}

/// A node of the file tree. Directories keep their children in insertion
/// order, keyed by the child's own name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSystemItem {
    pub name: String,
    pub kind: ItemKind,
    pub size: u64,
    /// ISO-8601 local timestamp, e.g. `2024-05-01T09:30:00.000000`.
    pub modified: String,
    pub content: String,
    pub children: IndexMap<String, FileSystemItem>,
}

impl FileSystemItem {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ItemKind::Directory,
            size: 0,
            modified: now_iso(),
            content: String::new(),
            children: IndexMap::new(),
        }
    }

    /// A file whose size is the byte length of `content`.
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            name: name.into(),
            kind: ItemKind::File,
            size: content.len() as u64,
            modified: now_iso(),
            content,
            children: IndexMap::new(),
        }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn is_directory(&self) -> bool {
        self.kind == ItemKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind == ItemKind::File
    }

    /// Lowercased extension of a file name, empty for directories and
    /// extension-less names.
    pub fn extension(&self) -> String {
        if !self.is_file() {
            return String::new();
        }
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&FileSystemItem> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut FileSystemItem> {
        self.children.get_mut(name)
    }

    /// Insert a child; ignored on files.
    pub fn add_child(&mut self, item: FileSystemItem) {
        if self.is_directory() {
            self.children.insert(item.name.clone(), item);
        }
    }

    /// Remove a child, keeping the order of the remaining ones.
    pub fn remove_child(&mut self, name: &str) -> Option<FileSystemItem> {
        self.children.shift_remove(name)
    }

    /// Replace a file's content, updating its size and timestamp.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.size = self.content.len() as u64;
        self.modified = now_iso();
    }
}

/// Names are non-empty, contain no `/` and are never `.` or `..`.
pub(crate) fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains('/') {
        return Err(VfsError::InvalidName(name.to_string()));
    }
    Ok(())
}

pub(crate) fn now_iso() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(FileSystemItem::file("Report.CSV", "").extension(), "csv");
        assert_eq!(FileSystemItem::file("Makefile", "").extension(), "");
        assert_eq!(FileSystemItem::directory("a.b").extension(), "");
    }

    #[test]
    fn test_files_ignore_children() {
        let mut f = FileSystemItem::file("a.txt", "hi");
        f.add_child(FileSystemItem::file("b.txt", ""));
        assert!(f.children.is_empty());
        assert_eq!(f.size, 2);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut d = FileSystemItem::directory("d");
        for name in ["a", "b", "c"] {
            d.add_child(FileSystemItem::file(name, ""));
        }
        d.remove_child("a");
        assert_eq!(d.children.keys().collect::<Vec<_>>(), ["b", "c"]);
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = now_iso();
        assert_eq!(ts.len(), 26);
        assert_eq!(&ts[10..11], "T");
    }
}
