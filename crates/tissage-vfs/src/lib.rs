//! A small persistent virtual filesystem.
//!
//! The tree lives in memory and is written as a JSON snapshot to a
//! [`Storage`] after every change. Browsers persist it in `localStorage`,
//! native tools use [`FileStorage`] or [`MemoryStorage`].
//!
//! ```
//! use tissage_vfs::{MemoryStorage, VirtualFileSystem};
//!
//! let mut vfs = VirtualFileSystem::open(MemoryStorage::new()).unwrap();
//! vfs.create_file("notes.md", "# Notes").unwrap();
//! assert_eq!(vfs.read_file("/notes.md").unwrap(), "# Notes");
//! ```

mod error;
mod fs;
mod item;
pub mod snapshot;
mod storage;

pub use error::{Result, StorageError, VfsError};
pub use fs::{VirtualFileSystem, default_tree};
pub use item::{FileSystemItem, ItemKind};
pub use storage::{FileStorage, MemoryStorage, STORAGE_KEY, Storage};
