//! File explorer applet.
//!
//! The explorer owns a [`VirtualFileSystem`] and turns user actions into
//! [`ExplorerEffect`]s. It never touches the DOM itself: the browser glue
//! performs the effects, and native callers (tests, static page generation)
//! can inspect them directly.

use tissage::css::{Css, Stylesheet};
use tissage::prelude::*;
use tissage_vfs::{FileSystemItem, Storage, VfsError, VirtualFileSystem};
use tracing::{debug, info, warn};

/// Page the editor is served under when a file is opened from the explorer.
pub const EDITOR_OPEN_PAGE: &str = "text-editor-open";

pub const RESET_PROMPT: &str =
    "Reset filesystem to defaults? This will delete all your files and folders.";

/// A file picked in the explorer, handed to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection {
    pub name: String,
    pub content: String,
    /// Absolute path, e.g. `/data/sample.csv`.
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerAction {
    /// Single click on a row.
    Select(String),
    /// Double click on a row: enter a directory or open a file.
    Open(String),
    /// "New Folder" with the name the user typed, if any.
    NewFolder(Option<String>),
    NewFile(Option<String>),
    /// Delete the selected item (already confirmed).
    Delete,
    GoUp,
    /// Reset to the default tree (already confirmed).
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplorerEffect {
    /// Re-render the rows and the path display, clearing the selection.
    Refresh,
    /// Highlight this row (or none) and toggle the delete button.
    Selection(Option<String>),
    Alert(String),
    Status(String),
    /// Hand the file to the editor and navigate to [`EDITOR_OPEN_PAGE`].
    OpenFile(FileSelection),
}

pub struct FileExplorer<S: Storage> {
    id: String,
    vfs: VirtualFileSystem<S>,
    selected: Option<String>,
}

impl<S: Storage> FileExplorer<S> {
    pub fn new(id: impl Into<String>, vfs: VirtualFileSystem<S>) -> Self {
        let id = id.into();
        debug!(%id, "created file explorer");
        Self {
            id,
            vfs,
            selected: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vfs(&self) -> &VirtualFileSystem<S> {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut VirtualFileSystem<S> {
        &mut self.vfs
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Confirmation text for deleting the current selection.
    pub fn delete_prompt(&self) -> Option<String> {
        self.selected.as_ref().map(|name| format!("Delete '{name}'?"))
    }

    pub fn render(&mut self) -> Element {
        div()
            .id(self.id.clone())
            .class("file-explorer")
            .child(self.toolbar())
            .child(self.file_list())
    }

    pub fn toolbar(&self) -> Element {
        div()
            .class("fe-toolbar")
            .child(tool_button("fe-new-folder", "new-folder", "+ New Folder"))
            .child(tool_button("fe-new-file", "new-file", "+ New File"))
            .child(tool_button("fe-delete", "delete", "Delete").flag("disabled"))
            .child(tool_button("fe-up", "up", "Up"))
            .child(
                tool_button("fe-reset", "reset", "Reset")
                    .style("background: #dc3545; color: white; margin-left: 10px;"),
            )
            .child(
                span()
                    .id("fe-path")
                    .class("fe-path-display")
                    .text(self.vfs.path_string()),
            )
    }

    pub fn file_list(&mut self) -> Element {
        let header = tr().children(["Type", "Name", "Size", "Modified"].map(|h| th().text(h)));
        div().class("fe-file-list-container").child(
            table()
                .class("fe-file-table")
                .child(thead().child(header))
                .child(tbody().id("fe-file-list").children(self.render_rows())),
        )
    }

    /// Rows of the current directory: directories first, then by
    /// case-insensitive name.
    pub fn render_rows(&mut self) -> Vec<Element> {
        let mut items = self.vfs.current_items();
        items.sort_by_key(|item| (!item.is_directory(), item.name.to_lowercase()));
        items.into_iter().map(item_row).collect()
    }

    /// The selection the editor would receive for `name` in the current
    /// directory.
    pub fn selection_for(&mut self, name: &str) -> Option<FileSelection> {
        let content = self
            .vfs
            .current_directory()
            .child(name)
            .filter(|item| item.is_file())?
            .content
            .clone();
        let base = self.vfs.path_string();
        let path = if base == "/" {
            format!("/{name}")
        } else {
            format!("{base}/{name}")
        };
        Some(FileSelection {
            name: name.to_string(),
            content,
            path,
        })
    }

    pub fn apply(&mut self, action: ExplorerAction) -> Vec<ExplorerEffect> {
        debug!(?action, "explorer action");
        let effects = self.perform(action);
        if effects.contains(&ExplorerEffect::Refresh) {
            self.selected = None;
        }
        effects
    }

    fn perform(&mut self, action: ExplorerAction) -> Vec<ExplorerEffect> {
        match action {
            ExplorerAction::Select(name) => {
                self.selected = Some(name.clone());
                vec![ExplorerEffect::Selection(Some(name))]
            }
            ExplorerAction::Open(name) => self.open(&name),
            ExplorerAction::NewFolder(name) => match prompted_name(name) {
                Some(name) => {
                    let result = self.vfs.create_directory(&name);
                    self.after_create("Folder", &name, result)
                }
                None => Vec::new(),
            },
            ExplorerAction::NewFile(name) => match prompted_name(name) {
                Some(name) => {
                    let result = self.vfs.create_file(&name, "");
                    self.after_create("File", &name, result)
                }
                None => Vec::new(),
            },
            ExplorerAction::Delete => {
                let Some(name) = self.selected.take() else {
                    return Vec::new();
                };
                match self.vfs.delete_item(&name) {
                    Ok(()) => vec![
                        ExplorerEffect::Status(format!("Deleted '{name}'")),
                        ExplorerEffect::Refresh,
                    ],
                    Err(VfsError::NotFound(_)) => vec![ExplorerEffect::Refresh],
                    Err(e) => self.persist_failed(e),
                }
            }
            ExplorerAction::GoUp => {
                if self.vfs.go_up() {
                    self.selected = None;
                    vec![ExplorerEffect::Refresh]
                } else {
                    Vec::new()
                }
            }
            ExplorerAction::Reset => {
                self.selected = None;
                match self.vfs.reset() {
                    Ok(()) => vec![
                        ExplorerEffect::Status("Filesystem reset to defaults".to_string()),
                        ExplorerEffect::Refresh,
                    ],
                    Err(e) => self.persist_failed(e),
                }
            }
        }
    }

    fn open(&mut self, name: &str) -> Vec<ExplorerEffect> {
        let is_dir = self
            .vfs
            .current_directory()
            .child(name)
            .map(FileSystemItem::is_directory);

        match is_dir {
            Some(true) => match self.vfs.enter(name) {
                Ok(()) => {
                    self.selected = None;
                    vec![ExplorerEffect::Refresh]
                }
                Err(e) => vec![ExplorerEffect::Alert(format!("Could not open '{name}': {e}"))],
            },
            Some(false) => match self.selection_for(name) {
                Some(selection) => {
                    info!(path = %selection.path, "opening file in editor");
                    vec![ExplorerEffect::OpenFile(selection)]
                }
                None => vec![ExplorerEffect::Alert(format!("Could not open file: {name}"))],
            },
            None => vec![ExplorerEffect::Alert(format!("Could not open file: {name}"))],
        }
    }

    fn after_create(
        &mut self,
        what: &str,
        name: &str,
        result: tissage_vfs::Result<()>,
    ) -> Vec<ExplorerEffect> {
        match result {
            Ok(()) => vec![
                ExplorerEffect::Status(format!("Created {} '{name}'", what.to_lowercase())),
                ExplorerEffect::Refresh,
            ],
            Err(VfsError::AlreadyExists(_)) => {
                vec![ExplorerEffect::Alert(format!("{what} '{name}' already exists!"))]
            }
            Err(VfsError::InvalidName(_)) => {
                vec![ExplorerEffect::Alert(format!("'{name}' is not a valid name"))]
            }
            Err(e) => self.persist_failed(e),
        }
    }

    /// The change is applied in memory even when saving failed.
    fn persist_failed(&mut self, e: VfsError) -> Vec<ExplorerEffect> {
        warn!("filesystem not saved: {e}");
        vec![
            ExplorerEffect::Refresh,
            ExplorerEffect::Alert(format!("Could not save the filesystem: {e}")),
        ]
    }
}

fn prompted_name(name: Option<String>) -> Option<String> {
    let name = name?;
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn tool_button(id: &str, modifier: &str, label: &str) -> Element {
    button()
        .id(id)
        .class(format!("fe-btn fe-btn-{modifier}"))
        .text(label)
}

pub fn item_row(item: &FileSystemItem) -> Element {
    let size = if item.is_file() {
        format_size(item.size)
    } else {
        "-".to_string()
    };
    tr().class("fe-item-row")
        .data("name", item.name.clone())
        .data("type", item.kind.as_str())
        .child(td().class("fe-item-icon").text(file_icon(item)))
        .child(td().class("fe-item-name").text(item.name.clone()))
        .child(td().class("fe-item-size").text(size))
        .child(td().class("fe-item-modified").text(format_modified(&item.modified)))
}

pub fn file_icon(item: &FileSystemItem) -> &'static str {
    if item.is_directory() {
        return "[DIR]";
    }
    match item.extension().as_str() {
        "py" => "[PY]",
        "ipynb" => "[NB]",
        "csv" => "[CSV]",
        "json" => "[JSON]",
        "txt" => "[TXT]",
        "md" => "[MD]",
        "html" => "[HTML]",
        "css" => "[CSS]",
        "js" => "[JS]",
        _ => "[FILE]",
    }
}

/// `512 B`, `2 KB`, `3 MB` (whole units, rounded down).
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    if size < KB {
        format!("{size} B")
    } else if size < MB {
        format!("{} KB", size / KB)
    } else {
        format!("{} MB", size / MB)
    }
}

/// `2024-05-01T09:30:00.123456` becomes `2024-05-01 09:30:00`.
pub fn format_modified(modified: &str) -> String {
    if modified.is_empty() {
        return "-".to_string();
    }
    modified.chars().take(19).collect::<String>().replace('T', " ")
}

pub fn styles() -> Stylesheet {
    Stylesheet::new()
        .rule(Css::class("file-explorer").props([
            ("border", "1px solid #ddd"),
            ("border_radius", "8px"),
            ("background", "white"),
            ("font_family", "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif"),
            ("max_width", "800px"),
            ("box_shadow", "0 2px 10px rgba(0,0,0,0.1)"),
        ]))
        .rule(Css::class("fe-toolbar").props([
            ("padding", "10px"),
            ("border_bottom", "1px solid #eee"),
            ("background", "#f8f9fa"),
            ("display", "flex"),
            ("gap", "10px"),
            ("align_items", "center"),
            ("border_radius", "7px 7px 0 0"),
        ]))
        .rule(Css::class("fe-btn").props([
            ("padding", "8px 12px"),
            ("border", "1px solid #ccc"),
            ("border_radius", "4px"),
            ("background", "white"),
            ("cursor", "pointer"),
            ("font_size", "14px"),
            ("transition", "background 0.2s"),
        ]))
        .rule(Css::selector(".fe-btn:hover").prop("background", "#f0f0f0"))
        .rule(Css::selector(".fe-btn:disabled").props([
            ("opacity", "0.5"),
            ("cursor", "not-allowed"),
            ("background", "#f5f5f5"),
        ]))
        .rule(Css::class("fe-path-display").props([
            ("margin_left", "auto"),
            ("font_family", "monospace"),
            ("background", "#e9ecef"),
            ("padding", "6px 10px"),
            ("border_radius", "4px"),
            ("color", "#495057"),
            ("font_size", "14px"),
        ]))
        .rule(
            Css::class("fe-file-list-container")
                .props([("max_height", "400px"), ("overflow_y", "auto")]),
        )
        .rule(
            Css::class("fe-file-table")
                .props([("width", "100%"), ("border_collapse", "collapse")]),
        )
        .rule(Css::selector(".fe-file-table th").props([
            ("padding", "12px 8px"),
            ("border_bottom", "2px solid #dee2e6"),
            ("background", "#f8f9fa"),
            ("text_align", "left"),
            ("font_weight", "600"),
            ("color", "#495057"),
            ("font_size", "14px"),
        ]))
        .rule(Css::selector(".fe-file-table td").props([
            ("padding", "10px 8px"),
            ("border_bottom", "1px solid #dee2e6"),
            ("font_size", "14px"),
        ]))
        .rule(
            Css::class("fe-item-row")
                .props([("cursor", "pointer"), ("transition", "background 0.2s")]),
        )
        .rule(Css::selector(".fe-item-row:hover").prop("background", "#f8f9fa"))
        .rule(Css::selector(".fe-item-row.selected").prop("background", "#e3f2fd"))
        .rule(Css::class("fe-item-icon").props([
            ("width", "80px"),
            ("text_align", "center"),
            ("font_size", "12px"),
            ("font_family", "monospace"),
            ("color", "#666"),
        ]))
        .rule(
            Css::class("fe-item-name").props([("font_weight", "500"), ("color", "#212529")]),
        )
        .rule(Css::class("fe-item-size").props([
            ("width", "80px"),
            ("text_align", "right"),
            ("color", "#6c757d"),
            ("font_family", "monospace"),
            ("font_size", "13px"),
        ]))
        .rule(Css::class("fe-item-modified").props([
            ("width", "150px"),
            ("color", "#6c757d"),
            ("font_family", "monospace"),
            ("font_size", "13px"),
        ]))
}
