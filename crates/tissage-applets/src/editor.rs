//! CodeMirror-backed text editor applet.

use facet::Facet;
use tissage::css::{Css, Stylesheet};
use tissage::prelude::*;
use tissage_vfs::{Storage, VfsError, VirtualFileSystem};
use tracing::{debug, info};

use crate::error::{AppletError, Result};
use crate::explorer::FileSelection;

pub const DISCARD_PROMPT: &str =
    "You have unsaved changes. Are you sure you want to create a new file?";

pub const SAVE_AS_PROMPT: &str =
    "Enter filename (use / for directories, e.g. 'scripts/new_file.py'):";

/// Entries of the language picker: `(mode, label)`.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("auto", "Auto-detect"),
    ("text", "Plain Text"),
    ("python", "Python"),
    ("javascript", "JavaScript"),
    ("htmlmixed", "HTML"),
    ("css", "CSS"),
    ("markdown", "Markdown"),
    ("javascript", "JSON"),
];

/// CodeMirror mode for a file name, `text` when unknown.
pub fn detect_mode(filename: &str) -> &'static str {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return "text";
    };
    match ext.to_lowercase().as_str() {
        "py" => "python",
        "js" | "jsx" | "ts" | "tsx" | "json" | "ipynb" => "javascript",
        "html" | "htm" => "htmlmixed",
        "css" | "scss" | "sass" => "css",
        "md" => "markdown",
        _ => "text",
    }
}

pub fn mode_display_name(mode: &str) -> String {
    match mode {
        "python" => "Python".to_string(),
        "javascript" => "JavaScript".to_string(),
        "htmlmixed" => "HTML".to_string(),
        "css" => "CSS".to_string(),
        "markdown" => "Markdown".to_string(),
        "text" => "Plain Text".to_string(),
        other => title_case(other),
    }
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Options object passed to the `CodeMirror` constructor.
#[derive(Debug, Clone, Facet)]
#[facet(rename_all = "camelCase")]
pub struct CodeMirrorOptions {
    pub line_numbers: bool,
    pub mode: String,
    pub theme: String,
    pub line_wrapping: bool,
    pub indent_unit: u32,
    pub tab_size: u32,
    pub match_brackets: bool,
    pub auto_close_brackets: bool,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct TextEditor {
    id: String,
    current_file: Option<String>,
    content: String,
    mode: String,
    modified: bool,
    saving: bool,
}

impl TextEditor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            current_file: None,
            content: String::new(),
            mode: "text".to_string(),
            modified: false,
            saving: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Save is only offered for a known file with unsaved changes.
    pub fn can_save(&self) -> bool {
        self.modified && self.current_file.is_some()
    }

    pub fn file_label(&self) -> &str {
        self.current_file.as_deref().unwrap_or("Untitled")
    }

    /// `●` while there are unsaved changes.
    pub fn status_text(&self) -> &'static str {
        if self.modified { "●" } else { "" }
    }

    pub fn render(&self) -> Element {
        div()
            .id(self.id.clone())
            .class("text-editor")
            .child(self.toolbar())
            .child(
                div()
                    .class("te-editor-container")
                    .child(div().id("te-editor").class("te-editor-wrapper")),
            )
            .child(
                div()
                    .class("te-status-bar")
                    .child(
                        span()
                            .id("te-cursor-info")
                            .class("te-cursor-info")
                            .text(cursor_text(0, 0)),
                    )
                    .child(
                        span()
                            .id("te-file-status")
                            .class("te-file-status")
                            .text(self.status_text()),
                    )
                    .child(
                        span()
                            .id("te-language-info")
                            .class("te-language-info")
                            .text(mode_display_name(&self.mode)),
                    ),
            )
    }

    fn toolbar(&self) -> Element {
        let language = select()
            .id("te-language")
            .class("te-language-select")
            .children(LANGUAGES.iter().enumerate().map(|(i, (mode, label))| {
                option().value(*mode).text(*label).flag_if("selected", i == 0)
            }));

        div()
            .class("te-toolbar")
            .child(tool_button("te-new", "new", "New"))
            .child(tool_button("te-open", "open", "Open"))
            .child(tool_button("te-save", "save", "Save").flag_if("disabled", !self.can_save()))
            .child(tool_button("te-save-as", "save-as", "Save As"))
            .child(div().class("te-separator"))
            .child(tool_button("te-undo", "undo", "Undo"))
            .child(tool_button("te-redo", "redo", "Redo"))
            .child(div().class("te-separator"))
            .child(language)
            .child(span().id("te-file-info").class("te-file-info").text(self.file_label()))
    }

    pub fn codemirror_options(&self) -> CodeMirrorOptions {
        CodeMirrorOptions {
            line_numbers: true,
            mode: self.mode.clone(),
            theme: "default".to_string(),
            line_wrapping: true,
            indent_unit: 4,
            tab_size: 4,
            match_brackets: true,
            auto_close_brackets: true,
            value: self.content.clone(),
        }
    }

    pub fn codemirror_options_json(&self) -> Result<String> {
        facet_json::to_string(&self.codemirror_options())
            .map_err(|e| AppletError::Options(e.to_string()))
    }

    /// Replace the buffer with `content`, as after opening `filename`.
    /// The mode follows the file name when one is given.
    pub fn load(&mut self, content: impl Into<String>, filename: Option<&str>) {
        self.content = content.into();
        self.current_file = filename.map(str::to_string);
        if let Some(name) = filename {
            self.mode = detect_mode(name).to_string();
        }
        self.modified = false;
        debug!(file = ?self.current_file, mode = %self.mode, "editor loaded");
    }

    pub fn new_file(&mut self) {
        self.load("", None);
    }

    pub fn open_file(&mut self, selection: &FileSelection) {
        self.load(selection.content.clone(), Some(&selection.path));
    }

    /// Load one of the demo snippets as an untitled buffer; `kind` is the
    /// snippet's `data-type`.
    pub fn load_sample(&mut self, content: impl Into<String>, kind: &str) {
        let name = format!("sample.{}", sample_extension(kind));
        self.load(content, None);
        self.mode = detect_mode(&name).to_string();
    }

    /// Record an edit made in the editor.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.modified = true;
    }

    pub fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }

    /// Apply a value from the language picker. `auto` re-detects from the
    /// current file name.
    pub fn select_language(&mut self, value: &str) {
        let mode = match (value, &self.current_file) {
            ("auto", Some(file)) => detect_mode(file),
            ("auto", None) => "text",
            (other, _) => other,
        };
        self.mode = mode.to_string();
    }

    /// Write the buffer back to the current file, which must exist.
    /// Returns the saved path.
    pub fn save<S: Storage>(&mut self, vfs: &mut VirtualFileSystem<S>) -> Result<String> {
        let path = self.current_file.clone().ok_or(AppletError::NoCurrentFile)?;
        self.guarded(|editor| {
            if vfs.lookup(&path).is_none() {
                return Err(VfsError::NotFound(path).into());
            }
            vfs.write_file(&path, &editor.content, false)?;
            editor.modified = false;
            info!(%path, "saved");
            Ok(path)
        })
    }

    /// Write the buffer to `path`, creating the file and, with
    /// `create_dirs`, its missing parent directories. The editor then
    /// tracks the new path.
    pub fn save_as<S: Storage>(
        &mut self,
        vfs: &mut VirtualFileSystem<S>,
        path: &str,
        create_dirs: bool,
    ) -> Result<String> {
        let path = path.trim();
        if path.is_empty() {
            return Err(VfsError::InvalidName(path.to_string()).into());
        }
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        self.guarded(|editor| {
            vfs.write_file(&path, &editor.content, create_dirs)?;
            editor.mode = detect_mode(&path).to_string();
            editor.current_file = Some(path.clone());
            editor.modified = false;
            info!(%path, "saved as");
            Ok(path)
        })
    }

    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.saving {
            return Err(AppletError::SaveInProgress);
        }
        self.saving = true;
        let result = f(self);
        self.saving = false;
        result
    }
}

fn sample_extension(kind: &str) -> &'static str {
    match kind {
        "python" => "py",
        "javascript" => "js",
        "html" => "html",
        "json" => "json",
        _ => "txt",
    }
}

/// `Line 1, Column 1` for a zero-based CodeMirror cursor.
pub fn cursor_text(line: u32, ch: u32) -> String {
    format!("Line {}, Column {}", line + 1, ch + 1)
}

fn tool_button(id: &str, modifier: &str, label: &str) -> Element {
    button()
        .id(id)
        .class(format!("te-btn te-btn-{modifier}"))
        .text(label)
}

pub fn styles() -> Stylesheet {
    Stylesheet::new()
        .rule(Css::class("text-editor").props([
            ("border", "1px solid #ddd"),
            ("border_radius", "8px"),
            ("background", "white"),
            ("font_family", "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif"),
            ("display", "flex"),
            ("flex_direction", "column"),
            ("height", "600px"),
            ("max_width", "100%"),
            ("box_shadow", "0 2px 10px rgba(0,0,0,0.1)"),
        ]))
        .rule(Css::class("te-toolbar").props([
            ("padding", "10px"),
            ("border_bottom", "1px solid #eee"),
            ("background", "#f8f9fa"),
            ("display", "flex"),
            ("gap", "8px"),
            ("align_items", "center"),
            ("border_radius", "7px 7px 0 0"),
            ("flex_shrink", "0"),
        ]))
        .rule(Css::class("te-btn").props([
            ("padding", "6px 12px"),
            ("border", "1px solid #ccc"),
            ("border_radius", "4px"),
            ("background", "white"),
            ("cursor", "pointer"),
            ("font_size", "13px"),
            ("transition", "background 0.2s"),
        ]))
        .rule(Css::selector(".te-btn:hover:not(:disabled)").prop("background", "#f0f0f0"))
        .rule(Css::selector(".te-btn:disabled").props([
            ("opacity", "0.5"),
            ("cursor", "not-allowed"),
            ("background", "#f5f5f5"),
        ]))
        .rule(Css::class("te-separator").props([
            ("width", "1px"),
            ("height", "20px"),
            ("background", "#ddd"),
            ("margin", "0 4px"),
        ]))
        .rule(Css::class("te-language-select").props([
            ("padding", "6px 8px"),
            ("border", "1px solid #ccc"),
            ("border_radius", "4px"),
            ("font_size", "13px"),
            ("background", "white"),
        ]))
        .rule(Css::class("te-file-info").props([
            ("margin_left", "auto"),
            ("font_weight", "500"),
            ("color", "#495057"),
            ("font_size", "14px"),
        ]))
        .rule(Css::class("te-editor-container").props([
            ("display", "flex"),
            ("flex", "1"),
            ("overflow", "hidden"),
            ("min_height", "0"),
        ]))
        .rule(Css::class("te-editor-wrapper").props([("flex", "1"), ("overflow", "hidden")]))
        .rule(Css::selector(".CodeMirror").props([
            ("height", "100%"),
            ("font_family", "'Courier New', Consolas, monospace"),
            ("font_size", "14px"),
            ("line_height", "1.5"),
        ]))
        .rule(
            Css::selector(".CodeMirror-scroll")
                .props([("overflow_y", "auto"), ("overflow_x", "auto")]),
        )
        .rule(Css::class("te-status-bar").props([
            ("padding", "8px 12px"),
            ("border_top", "1px solid #eee"),
            ("background", "#f8f9fa"),
            ("display", "flex"),
            ("justify_content", "space-between"),
            ("align_items", "center"),
            ("font_size", "12px"),
            ("color", "#666"),
            ("border_radius", "0 0 7px 7px"),
            ("flex_shrink", "0"),
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tissage_vfs::MemoryStorage;

    fn vfs() -> VirtualFileSystem<MemoryStorage> {
        VirtualFileSystem::open(MemoryStorage::new()).unwrap()
    }

    #[test]
    fn test_load_sample() {
        let mut ed = TextEditor::new("te");
        ed.load_sample("print(1)", "python");
        assert_eq!(ed.mode(), "python");
        assert_eq!(ed.current_file(), None);
        assert!(!ed.is_modified());
        ed.load_sample("{}", "yaml");
        assert_eq!(ed.mode(), "text");
    }

    #[test]
    fn test_detect_mode() {
        assert_eq!(detect_mode("analysis.py"), "python");
        assert_eq!(detect_mode("App.TSX"), "javascript");
        assert_eq!(detect_mode("sample.ipynb"), "javascript");
        assert_eq!(detect_mode("index.htm"), "htmlmixed");
        assert_eq!(detect_mode("theme.sass"), "css");
        assert_eq!(detect_mode("README.md"), "markdown");
        assert_eq!(detect_mode("data.csv"), "text");
        assert_eq!(detect_mode("Makefile"), "text");
    }

    #[test]
    fn test_mode_display_name() {
        assert_eq!(mode_display_name("htmlmixed"), "HTML");
        assert_eq!(mode_display_name("text"), "Plain Text");
        assert_eq!(mode_display_name("rust"), "Rust");
        assert_eq!(mode_display_name("shell script"), "Shell Script");
    }

    #[test]
    fn test_render_fresh_editor() {
        let html = TextEditor::new("main-text-editor").render().render();
        assert!(html.starts_with("<div id=\"main-text-editor\" class=\"text-editor\">"));
        assert!(html.contains("id=\"te-save\" class=\"te-btn te-btn-save\" type=\"button\" disabled>Save</button>"));
        assert!(html.contains("<option value=\"auto\" selected>Auto-detect</option>"));
        assert!(html.contains("<span id=\"te-file-info\" class=\"te-file-info\">Untitled</span>"));
        assert!(html.contains(">Line 1, Column 1</span>"));
        assert!(html.contains("<span id=\"te-language-info\" class=\"te-language-info\">Plain Text</span>"));
    }

    #[test]
    fn test_codemirror_options_json() {
        let mut editor = TextEditor::new("te");
        editor.load("print(1)", Some("/scripts/a.py"));
        let json = editor.codemirror_options_json().unwrap();
        assert!(json.contains("\"lineNumbers\":true"));
        assert!(json.contains("\"mode\":\"python\""));
        assert!(json.contains("\"indentUnit\":4"));
        assert!(json.contains("\"value\":\"print(1)\""));
    }

    #[test]
    fn test_edit_tracking() {
        let mut editor = TextEditor::new("te");
        assert_eq!(editor.status_text(), "");
        editor.set_content("x");
        assert_eq!(editor.status_text(), "●");
        // nothing to save to yet
        assert!(!editor.can_save());

        editor.load("a", Some("/notes.md"));
        assert!(!editor.is_modified());
        assert_eq!(editor.mode(), "markdown");
        editor.set_content("ab");
        assert!(editor.can_save());
    }

    #[test]
    fn test_select_language() {
        let mut editor = TextEditor::new("te");
        editor.select_language("auto");
        assert_eq!(editor.mode(), "text");
        editor.load("", Some("/x.css"));
        editor.select_language("python");
        assert_eq!(editor.mode(), "python");
        editor.select_language("auto");
        assert_eq!(editor.mode(), "css");
    }

    #[test_log::test]
    fn test_open_edit_save() {
        let mut vfs = vfs();
        let mut editor = TextEditor::new("te");
        let selection = FileSelection {
            name: "analysis.py".into(),
            content: vfs.read_file("/scripts/analysis.py").unwrap().to_string(),
            path: "/scripts/analysis.py".into(),
        };
        editor.open_file(&selection);
        assert_eq!(editor.file_label(), "/scripts/analysis.py");
        assert_eq!(editor.mode(), "python");

        editor.set_content("print('changed')");
        assert_eq!(editor.save(&mut vfs).unwrap(), "/scripts/analysis.py");
        assert!(!editor.is_modified());

        let item = vfs.lookup("/scripts/analysis.py").unwrap();
        assert_eq!(item.content, "print('changed')");
        assert_eq!(item.size, 16);
    }

    #[test_log::test]
    fn test_save_without_file_or_target() {
        let mut vfs = vfs();
        let mut editor = TextEditor::new("te");
        assert!(matches!(editor.save(&mut vfs), Err(AppletError::NoCurrentFile)));

        editor.load("x", Some("/gone.txt"));
        assert!(matches!(
            editor.save(&mut vfs),
            Err(AppletError::Vfs(VfsError::NotFound(_)))
        ));
        assert!(vfs.lookup("/gone.txt").is_none());
    }

    #[test_log::test]
    fn test_save_as_creates_directories_on_request() {
        let mut vfs = vfs();
        let mut editor = TextEditor::new("te");
        editor.set_content("{}");

        assert!(matches!(
            editor.save_as(&mut vfs, "out/new/result.json", false),
            Err(AppletError::Vfs(VfsError::NotFound(_)))
        ));
        assert!(editor.is_modified());

        let path = editor.save_as(&mut vfs, " out/new/result.json ", true).unwrap();
        assert_eq!(path, "/out/new/result.json");
        assert_eq!(editor.current_file(), Some("/out/new/result.json"));
        assert_eq!(editor.mode(), "javascript");
        assert_eq!(vfs.read_file("/out/new/result.json").unwrap(), "{}");

        assert!(matches!(
            editor.save_as(&mut vfs, "  ", true),
            Err(AppletError::Vfs(VfsError::InvalidName(_)))
        ));
    }

    #[test]
    fn test_cursor_text() {
        assert_eq!(cursor_text(0, 0), "Line 1, Column 1");
        assert_eq!(cursor_text(9, 4), "Line 10, Column 5");
    }
}
