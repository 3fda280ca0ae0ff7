//! Whole-tree JSON snapshots.
//!
//! The tree is flattened into a preorder list of entries, each carrying the
//! full path of names from the root:
//!
//! ```json
//! {"version":1,"entries":[
//!   {"path":["data"],"kind":"directory","size":0,"modified":"...","content":""},
//!   {"path":["data","sample.csv"],"kind":"file","size":512,"modified":"...","content":"..."}
//! ]}
//! ```
//!
//! Parents always precede their children, so decoding is a single pass.

use facet::Facet;

use crate::error::{Result, VfsError};
use crate::item::{FileSystemItem, ItemKind, validate_name};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Facet)]
struct Snapshot {
    version: u32,
    entries: Vec<SnapshotEntry>,
}

#[derive(Debug, Facet)]
struct SnapshotEntry {
    path: Vec<String>,
    kind: ItemKind,
    #[facet(default)]
    size: u64,
    #[facet(default)]
    modified: String,
    #[facet(default)]
    content: String,
}

/// Serialize the tree below `root` (the root itself is implicit).
pub fn encode(root: &FileSystemItem) -> Result<String> {
    let mut entries = Vec::new();
    let mut path = Vec::new();
    flatten(root, &mut path, &mut entries);
    let snapshot = Snapshot {
        version: SNAPSHOT_VERSION,
        entries,
    };
    facet_json::to_string(&snapshot).map_err(|e| VfsError::Snapshot(e.to_string()))
}

fn flatten(dir: &FileSystemItem, path: &mut Vec<String>, out: &mut Vec<SnapshotEntry>) {
    for child in dir.children.values() {
        path.push(child.name.clone());
        out.push(SnapshotEntry {
            path: path.clone(),
            kind: child.kind,
            size: child.size,
            modified: child.modified.clone(),
            content: child.content.clone(),
        });
        if child.is_directory() {
            flatten(child, path, out);
        }
        path.pop();
    }
}

/// Rebuild a tree. Entries with an invalid name, a missing or non-directory
/// parent, or a path seen before are rejected, as are unknown versions.
pub fn decode(json: &str) -> Result<FileSystemItem> {
    let snapshot: Snapshot =
        facet_json::from_str(json).map_err(|e| VfsError::Snapshot(e.to_string()))?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(VfsError::Snapshot(format!(
            "unsupported version {}",
            snapshot.version
        )));
    }

    let mut root = FileSystemItem::directory("root");
    for entry in snapshot.entries {
        let Some((name, parents)) = entry.path.split_last() else {
            return Err(VfsError::Snapshot("entry with an empty path".to_string()));
        };
        for part in &entry.path {
            validate_name(part).map_err(|e| VfsError::Snapshot(e.to_string()))?;
        }

        let mut dir = &mut root;
        for part in parents {
            dir = match dir.child_mut(part) {
                Some(next) if next.is_directory() => next,
                Some(_) => {
                    return Err(VfsError::Snapshot(format!("'{part}' is not a directory")));
                }
                None => {
                    return Err(VfsError::Snapshot(format!(
                        "orphan entry '{}'",
                        entry.path.join("/")
                    )));
                }
            };
        }
        if dir.child(name).is_some() {
            return Err(VfsError::Snapshot(format!(
                "duplicate entry '{}'",
                entry.path.join("/")
            )));
        }

        let item = FileSystemItem {
            name: name.clone(),
            kind: entry.kind,
            size: entry.size,
            modified: entry.modified,
            content: entry.content,
            children: Default::default(),
        };
        dir.add_child(item);
    }
    Ok(root)
}
