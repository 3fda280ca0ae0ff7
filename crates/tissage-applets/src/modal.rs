//! Overlay dialogs used by the applets.

use tissage::css::{Css, Stylesheet};
use tissage::prelude::*;
use tissage_vfs::Storage;

use crate::explorer::{FileExplorer, FileSelection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
    Full,
}

impl ModalSize {
    pub fn as_str(self) -> &'static str {
        match self {
            ModalSize::Small => "small",
            ModalSize::Medium => "medium",
            ModalSize::Large => "large",
            ModalSize::Full => "full",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalButton {
    pub text: String,
    pub id: String,
    /// `modal-btn-primary` or `modal-btn-secondary`.
    pub class: String,
    pub disabled: bool,
}

impl ModalButton {
    pub fn primary(text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            id: id.into(),
            class: "modal-btn-primary".to_string(),
            disabled: false,
        }
    }

    pub fn secondary(text: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            class: "modal-btn-secondary".to_string(),
            ..Self::primary(text, id)
        }
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    fn render(&self) -> Element {
        button()
            .id(self.id.clone())
            .class(format!("modal-btn {}", self.class))
            .flag_if("disabled", self.disabled)
            .text(self.text.clone())
    }
}

#[derive(Debug, Clone)]
pub struct Modal {
    id: String,
    title: String,
    size: ModalSize,
    closeable: bool,
}

impl Modal {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            size: ModalSize::default(),
            closeable: true,
        }
    }

    pub fn size(mut self, size: ModalSize) -> Self {
        self.size = size;
        self
    }

    /// Whether the header carries a close (`×`) button.
    pub fn closeable(mut self, closeable: bool) -> Self {
        self.closeable = closeable;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn close_id(&self) -> String {
        format!("{}-close", self.id)
    }

    pub fn confirm_id(&self) -> String {
        format!("{}-confirm", self.id)
    }

    pub fn cancel_id(&self) -> String {
        format!("{}-cancel", self.id)
    }

    /// The hidden overlay. Without footer buttons a single Close button is
    /// rendered.
    pub fn render(&self, body: impl Into<Node>, footer: Vec<ModalButton>) -> Element {
        let footer = if footer.is_empty() {
            vec![ModalButton::secondary("Close", self.close_id())]
        } else {
            footer
        };

        let header = div()
            .class("modal-header")
            .child(h3().class("modal-title").text(self.title.clone()))
            .child_opt(
                self.closeable
                    .then(|| button().id(self.close_id()).class("modal-close").text("×")),
            );

        div()
            .id(self.id.clone())
            .class("modal-overlay")
            .style("display: none;")
            .child(
                div()
                    .class(format!("modal-content modal-{}", self.size.as_str()))
                    .child(header)
                    .child(div().class("modal-body").child(body))
                    .child(
                        div()
                            .class("modal-footer")
                            .children(footer.iter().map(ModalButton::render)),
                    ),
            )
    }
}

/// A large modal wrapping a file explorer, used by the editor's "Open".
#[derive(Debug, Clone)]
pub struct FileExplorerModal {
    modal: Modal,
    selected: Option<FileSelection>,
}

impl FileExplorerModal {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            modal: Modal::new(id, "Select File").size(ModalSize::Large),
            selected: None,
        }
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Id the embedded explorer should be created with.
    pub fn explorer_id(&self) -> String {
        format!("{}-fe", self.modal.id)
    }

    pub fn render<S: Storage>(&self, explorer: &mut FileExplorer<S>) -> Element {
        let footer = vec![
            ModalButton::secondary("Cancel", self.modal.cancel_id()),
            ModalButton::primary("Open Selected", self.modal.confirm_id())
                .disabled(self.selected.is_none()),
        ];
        self.modal.render(explorer.render(), footer)
    }

    /// Select `name` in the explorer's current directory. Returns whether a
    /// file was selected, which enables the confirm button.
    pub fn select<S: Storage>(&mut self, explorer: &mut FileExplorer<S>, name: &str) -> bool {
        match explorer.selection_for(name) {
            Some(selection) => {
                self.selected = Some(selection);
                true
            }
            None => false,
        }
    }

    pub fn selected(&self) -> Option<&FileSelection> {
        self.selected.as_ref()
    }

    /// Hand out the selection and reset.
    pub fn confirm(&mut self) -> Option<FileSelection> {
        self.selected.take()
    }

    pub fn cancel(&mut self) {
        self.selected = None;
    }
}

pub fn modal_styles() -> Stylesheet {
    Stylesheet::new()
        .rule(Css::class("modal-overlay").props([
            ("position", "fixed"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100%"),
            ("background", "rgba(0, 0, 0, 0.5)"),
            ("display", "flex"),
            ("justify_content", "center"),
            ("align_items", "center"),
            ("z_index", "1000"),
        ]))
        .rule(Css::class("modal-content").props([
            ("background", "white"),
            ("border_radius", "8px"),
            ("box_shadow", "0 4px 20px rgba(0, 0, 0, 0.3)"),
            ("display", "flex"),
            ("flex_direction", "column"),
            ("max_height", "90vh"),
            ("overflow", "hidden"),
        ]))
        .rule(Css::class("modal-small").props([("width", "400px"), ("max_width", "90vw")]))
        .rule(Css::class("modal-medium").props([("width", "600px"), ("max_width", "90vw")]))
        .rule(Css::class("modal-large").props([("width", "900px"), ("max_width", "95vw")]))
        .rule(Css::class("modal-full").props([("width", "95vw"), ("height", "90vh")]))
        .rule(Css::class("modal-header").props([
            ("padding", "20px"),
            ("border_bottom", "1px solid #eee"),
            ("display", "flex"),
            ("justify_content", "space-between"),
            ("align_items", "center"),
            ("background", "#f8f9fa"),
        ]))
        .rule(Css::selector(".modal-header h3").props([
            ("margin", "0"),
            ("color", "#333"),
            ("font_size", "18px"),
        ]))
        .rule(Css::class("modal-close").props([
            ("background", "none"),
            ("border", "none"),
            ("font_size", "24px"),
            ("cursor", "pointer"),
            ("color", "#666"),
            ("padding", "0"),
            ("width", "30px"),
            ("height", "30px"),
            ("border_radius", "50%"),
        ]))
        .rule(
            Css::selector(".modal-close:hover")
                .props([("color", "#000"), ("background", "#e9ecef")]),
        )
        .rule(Css::class("modal-body").props([
            ("padding", "20px"),
            ("overflow", "auto"),
            ("flex", "1"),
        ]))
        .rule(Css::class("modal-footer").props([
            ("padding", "20px"),
            ("border_top", "1px solid #eee"),
            ("display", "flex"),
            ("justify_content", "flex-end"),
            ("gap", "10px"),
            ("background", "#f8f9fa"),
        ]))
        .rule(Css::class("modal-btn").props([
            ("padding", "8px 16px"),
            ("border", "none"),
            ("border_radius", "4px"),
            ("cursor", "pointer"),
            ("font_size", "14px"),
        ]))
        .rule(
            Css::class("modal-btn-primary").props([("background", "#007bff"), ("color", "white")]),
        )
        .rule(
            Css::selector(".modal-btn-primary:hover:not(:disabled)").prop("background", "#0056b3"),
        )
        .rule(
            Css::class("modal-btn-secondary")
                .props([("background", "#6c757d"), ("color", "white")]),
        )
        .rule(
            Css::selector(".modal-btn:disabled")
                .props([("opacity", "0.5"), ("cursor", "not-allowed")]),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tissage_vfs::{MemoryStorage, VirtualFileSystem};

    #[test]
    fn test_default_footer_and_close_button() {
        let html = Modal::new("confirm", "Confirm").render(p().text("Sure?"), Vec::new()).render();
        assert!(html.starts_with(
            "<div id=\"confirm\" class=\"modal-overlay\" style=\"display: none;\">"
        ));
        assert!(html.contains("<div class=\"modal-content modal-medium\">"));
        assert!(html.contains("<h3 class=\"modal-title\">Confirm</h3>"));
        assert!(html.contains("<button id=\"confirm-close\" class=\"modal-close\" type=\"button\">×</button>"));
        assert!(html.contains(
            "<button id=\"confirm-close\" class=\"modal-btn modal-btn-secondary\" type=\"button\">Close</button>"
        ));
    }

    #[test]
    fn test_not_closeable() {
        let html = Modal::new("m", "T")
            .closeable(false)
            .size(ModalSize::Full)
            .render("body", vec![ModalButton::primary("OK", "m-ok")])
            .render();
        assert!(!html.contains("modal-close"));
        assert!(html.contains("modal-full"));
        assert!(html.contains(">OK</button>"));
    }

    #[test]
    fn test_file_explorer_modal_selection() {
        let vfs = VirtualFileSystem::open(MemoryStorage::new()).unwrap();
        let mut picker = FileExplorerModal::new("te-file-open-modal");
        let mut explorer = FileExplorer::new(picker.explorer_id(), vfs);

        let html = picker.render(&mut explorer).render();
        assert!(html.contains("<h3 class=\"modal-title\">Select File</h3>"));
        assert!(html.contains("modal-large"));
        assert!(html.contains("<div id=\"te-file-open-modal-fe\" class=\"file-explorer\">"));
        assert!(html.contains(
            "id=\"te-file-open-modal-confirm\" class=\"modal-btn modal-btn-primary\" type=\"button\" disabled>Open Selected"
        ));

        assert!(!picker.select(&mut explorer, "data"));
        explorer.vfs_mut().enter("data").unwrap();
        assert!(picker.select(&mut explorer, "sample.csv"));
        assert!(!picker.render(&mut explorer).render().contains("disabled>Open Selected"));

        let chosen = picker.confirm().unwrap();
        assert_eq!(chosen.path, "/data/sample.csv");
        assert!(picker.selected().is_none());
    }
}
