//! Interactive UI components: alerts, badges, progress bars, modals,
//! accordions, tabs, toasts and timelines.
//!
//! Behaviour lives in inline `onclick` handlers so the markup works without
//! any script bundle.

use crate::components::layouts::paragraph_if_text;
use crate::element::{Element, Node};
use crate::script::js_string;
use crate::tags::{button, div, h5, h6, p, script, small, span};

/// Colour variants shared by alerts, badges, progress bars and toasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Primary,
    Secondary,
    Success,
    Danger,
    Warning,
    Info,
}

impl Variant {
    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Primary => "primary",
            Variant::Secondary => "secondary",
            Variant::Success => "success",
            Variant::Danger => "danger",
            Variant::Warning => "warning",
            Variant::Info => "info",
        }
    }

    /// Solid colour used for progress bars.
    pub fn color(self) -> &'static str {
        match self {
            Variant::Primary => "#007bff",
            Variant::Secondary => "#6c757d",
            Variant::Success => "#28a745",
            Variant::Danger => "#dc3545",
            Variant::Warning => "#ffc107",
            Variant::Info => "#17a2b8",
        }
    }

    /// (background, border, text) used by toasts. Only the four alert tones
    /// have a palette; anything else falls back to info.
    fn soft_palette(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Variant::Success => ("#d4edda", "#c3e6cb", "#155724"),
            Variant::Warning => ("#fff3cd", "#ffeaa7", "#856404"),
            Variant::Danger => ("#f8d7da", "#f5c6cb", "#721c24"),
            _ => ("#d1ecf1", "#bee5eb", "#0c5460"),
        }
    }
}

const CLOSE_PARENT: &str = "this.parentElement.style.display='none'";

pub fn alert(message: impl Into<Node>, kind: Variant, dismissible: bool) -> Element {
    let el = div()
        .class(format!("alert alert-{}", kind.as_str()))
        .child(message);
    if !dismissible {
        return el;
    }
    el.child(
        button()
            .style("background: none; border: none; font-size: 1.5rem; font-weight: bold; line-height: 1; color: inherit; opacity: 0.5; cursor: pointer; float: right; padding: 0; margin-left: 1rem;")
            .onclick(CLOSE_PARENT)
            .text("×"),
    )
}

/// `badge_type` is free-form so framework-only variants such as `gold` work.
pub fn badge(text: &str, badge_type: &str) -> Element {
    span().class(format!("badge badge-{badge_type}")).text(text)
}

/// A progress bar; the label defaults to `"{percentage}%"`.
pub fn progress_bar(percentage: u8, label: Option<&str>, color: Variant) -> Element {
    let percentage = percentage.min(100);
    let label = label
        .map(str::to_string)
        .unwrap_or_else(|| format!("{percentage}%"));
    div()
        .class("progress")
        .style("display: flex; height: 1rem; background-color: #e9ecef; border-radius: 0.375rem; overflow: hidden; margin-bottom: 1rem;")
        .child(
            div()
                .class("progress-bar")
                .style(format!(
                    "width: {percentage}%; background-color: {}; display: flex; align-items: center; justify-content: center; color: white; font-size: 0.75rem; font-weight: bold; transition: width 0.6s ease;",
                    color.color()
                ))
                .text(label),
        )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalSize {
    Small,
    #[default]
    Default,
    Large,
    ExtraLarge,
}

impl ModalSize {
    fn max_width(self) -> &'static str {
        match self {
            ModalSize::Small => "300px",
            ModalSize::Default => "500px",
            ModalSize::Large => "800px",
            ModalSize::ExtraLarge => "1200px",
        }
    }
}

/// A hidden modal dialog. Show it with
/// `document.getElementById(id).style.display='flex'`; clicking the backdrop
/// or the close button hides it again.
pub fn modal(
    id: &str,
    heading: &str,
    body: impl Into<Node>,
    footer: Vec<Element>,
    size: ModalSize,
) -> Element {
    let header = div()
        .class("modal-header")
        .style("display: flex; align-items: center; justify-content: space-between; padding: 1rem; border-bottom: 1px solid #dee2e6;")
        .child(h5().style("margin: 0; font-weight: 500;").text(heading))
        .child(
            button()
                .style("background: none; border: none; font-size: 1.5rem; font-weight: bold; line-height: 1; color: #6c757d; cursor: pointer; padding: 0;")
                .onclick(format!("document.getElementById('{id}').style.display='none'"))
                .text("×"),
        );

    let body = div()
        .class("modal-body")
        .style("padding: 1rem;")
        .child(paragraph_if_text(body.into()));

    let footer = (!footer.is_empty()).then(|| {
        div()
            .class("modal-footer")
            .style("display: flex; align-items: center; justify-content: flex-end; padding: 1rem; border-top: 1px solid #dee2e6; gap: 0.5rem;")
            .children(footer)
    });

    let content = div()
        .class("modal-content")
        .style("background-color: #fff; border-radius: 0.375rem; box-shadow: 0 0.5rem 1rem rgba(0,0,0,0.15); max-height: 90vh; overflow-y: auto;")
        .child(header)
        .child(body)
        .child_opt(footer);

    div()
        .id(id)
        .class("modal")
        .style("position: fixed; top: 0; left: 0; z-index: 1050; width: 100%; height: 100%; background-color: rgba(0,0,0,0.5); display: none; align-items: center; justify-content: center;")
        .onclick("if(event.target === this) this.style.display='none'")
        .child(
            div()
                .class("modal-dialog")
                .style(format!(
                    "max-width: {}; width: 90%; margin: auto;",
                    size.max_width()
                ))
                .child(content),
        )
}

/// A button inside a [`button_group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupButton {
    pub text: String,
    pub class: String,
    pub onclick: Option<String>,
    /// Opens the modal matching this CSS selector.
    pub opens_modal: Option<String>,
}

impl GroupButton {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: "btn btn-primary".to_string(),
            onclick: None,
            opens_modal: None,
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    pub fn onclick(mut self, js: impl Into<String>) -> Self {
        self.onclick = Some(js.into());
        self
    }

    pub fn opens_modal(mut self, target: impl Into<String>) -> Self {
        self.opens_modal = Some(target.into());
        self
    }

    fn build(self) -> Element {
        let mut el = button().class(self.class);
        let mut onclick = self.onclick.unwrap_or_default();
        if let Some(target) = self.opens_modal {
            onclick = format!("document.querySelector('{target}').style.display='flex'");
            el = el.data("toggle", "modal").data("target", target);
        }
        el.onclick(onclick).text(self.text)
    }
}

pub fn button_group(buttons: impl IntoIterator<Item = GroupButton>) -> Element {
    div()
        .class("button-group")
        .style("display: flex; gap: 0.5rem; margin-bottom: 1rem;")
        .children(buttons.into_iter().map(GroupButton::build))
}

/// One collapsible section of an [`accordion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccordionItem {
    pub title: String,
    pub content: Node,
    pub show: bool,
}

impl AccordionItem {
    pub fn new(title: impl Into<String>, content: impl Into<Node>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            show: false,
        }
    }

    pub fn shown(mut self) -> Self {
        self.show = true;
        self
    }
}

pub fn accordion(id: &str, items: Vec<AccordionItem>) -> Element {
    let count = items.len();
    let sections = items.into_iter().enumerate().map(|(i, item)| {
        let item_id = format!("{id}-item-{i}");
        let toggle = format!(
            "var content = document.getElementById('{item_id}'); var icon = this.querySelector('.accordion-icon'); if (content.style.display === 'block') {{ content.style.display = 'none'; icon.textContent = '+'; this.parentElement.style.borderBottom = 'none'; }} else {{ content.style.display = 'block'; icon.textContent = '−'; this.parentElement.style.borderBottom = '1px solid #dee2e6'; }}"
        );
        let header_style = if item.show {
            "padding: 0; margin: 0; background-color: #f8f9fa; border-bottom: 1px solid #dee2e6;"
        } else {
            "border-bottom: none;"
        };

        let header = div().class("accordion-header").style(header_style).child(
            button()
                .style("width: 100%; padding: 1rem; text-align: left; background-color: transparent; border: none; font-size: 1rem; font-weight: 500; cursor: pointer; display: flex; justify-content: space-between; align-items: center;")
                .onclick(toggle)
                .text(item.title)
                .child(
                    span()
                        .class("accordion-icon")
                        .style("font-weight: bold; font-size: 1.2rem;")
                        .text(if item.show { "−" } else { "+" }),
                ),
        );

        let content = div()
            .id(item_id)
            .class("accordion-content")
            .style(format!(
                "padding: 1rem; display: {};",
                if item.show { "block" } else { "none" }
            ))
            .child(item.content);

        let mut wrapper = div().class("accordion-item");
        if i + 1 < count {
            wrapper = wrapper.style("border-bottom: 1px solid #dee2e6;");
        }
        wrapper.child(header).child(content)
    });

    div()
        .id(id)
        .class("accordion")
        .style("border: 1px solid #dee2e6; border-radius: 0.375rem; margin-bottom: 1rem;")
        .children(sections)
}

/// One pane of a [`tabs`] block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub id: String,
    pub title: String,
    pub content: Node,
}

impl TabItem {
    pub fn new(id: impl Into<String>, title: impl Into<String>, content: impl Into<Node>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
        }
    }
}

const SHOW_TAB_JS: &str = "
        function showTab(tabId) {
            var panes = document.querySelectorAll('.tab-pane');
            panes.forEach(function(pane) {
                pane.style.display = 'none';
            });
            var buttons = document.querySelectorAll('.tab-nav button');
            buttons.forEach(function(button) {
                button.style.borderBottomColor = 'transparent';
                button.style.color = '#6c757d';
                button.style.fontWeight = '400';
            });
            document.getElementById(tabId).style.display = 'block';
            event.target.style.borderBottomColor = '#007bff';
            event.target.style.color = '#007bff';
            event.target.style.fontWeight = '600';
        }
    ";

/// A tab strip; the first tab starts active.
pub fn tabs(items: Vec<TabItem>) -> Element {
    let mut nav = div()
        .class("tab-nav")
        .style("display: flex; border-bottom: 1px solid #dee2e6; margin-bottom: 1rem; background-color: #f8f9fa;");
    let mut panes = div().class("tab-content").style("min-height: 200px;");

    for (i, item) in items.into_iter().enumerate() {
        let active = i == 0;
        let (accent, color, weight) = if active {
            ("#007bff", "#007bff", "600")
        } else {
            ("transparent", "#6c757d", "400")
        };
        nav.push(
            button()
                .style(format!(
                    "padding: 0.75rem 1rem; border: none; background-color: transparent; cursor: pointer; border-bottom: 2px solid {accent}; color: {color}; font-weight: {weight}; transition: all 0.2s ease;"
                ))
                .onclick(format!("showTab({})", js_string(&item.id)))
                .text(item.title),
        );
        panes.push(
            div()
                .id(item.id)
                .class("tab-pane")
                .style(if active { "display: block;" } else { "display: none;" })
                .child(item.content),
        );
    }

    div()
        .class("tabs-container")
        .child(nav)
        .child(panes)
        .child(script().text(SHOW_TAB_JS))
}

pub fn toast(message: &str, kind: Variant, heading: Option<&str>) -> Element {
    let (bg, border, color) = kind.soft_palette();
    div()
        .class(format!("toast toast-{}", kind.as_str()))
        .style(format!(
            "background-color: {bg}; border: 1px solid {border}; color: {color}; border-radius: 0.375rem; padding: 1rem; margin-bottom: 1rem; box-shadow: 0 0.125rem 0.25rem rgba(0,0,0,0.075); position: relative;"
        ))
        .child_opt(heading.map(|h| {
            div()
                .style("font-weight: 600; margin-bottom: 0.5rem; font-size: 0.9rem;")
                .text(h)
        }))
        .text(message)
        .child(
            button()
                .style("position: absolute; top: 0.5rem; right: 0.5rem; background: none; border: none; font-size: 1.2rem; font-weight: bold; color: inherit; opacity: 0.7; cursor: pointer; padding: 0;")
                .onclick(CLOSE_PARENT)
                .text("×"),
        )
}

/// One entry of a [`timeline`]. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineEvent {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
}

pub fn timeline(events: &[TimelineEvent]) -> Element {
    div()
        .class("timeline")
        .style("position: relative; padding-left: 2rem; border-left: 2px solid #dee2e6; margin: 2rem 0;")
        .children(events.iter().map(|event| {
            div()
                .class("timeline-item")
                .style("position: relative; margin-bottom: 2rem; padding-left: 1rem; background-color: #fff;")
                .child(
                    div().class("timeline-marker").style(
                        "position: absolute; left: -2.5rem; top: 0; width: 1rem; height: 1rem; background-color: #007bff; border: 2px solid #fff; border-radius: 50%; box-shadow: 0 0 0 2px #dee2e6;",
                    ),
                )
                .child_opt(event.title.as_deref().map(|t| {
                    h6().style("margin-bottom: 0.5rem; font-weight: 600;").text(t)
                }))
                .child_opt(event.date.as_deref().map(|d| {
                    small()
                        .style("color: #6c757d; margin-bottom: 0.5rem; display: block;")
                        .text(d)
                }))
                .child_opt(
                    event
                        .description
                        .as_deref()
                        .map(|d| p().style("margin-bottom: 0;").text(d)),
                )
        }))
}
