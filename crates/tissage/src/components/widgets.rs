//! Navigation and decoration widgets: breadcrumbs, pagination, dropdowns,
//! icons, spinners, collapsibles, carousels, offcanvas panels, and the
//! tooltip/popover data attributes.

use crate::components::layouts::paragraph_if_text;
use crate::element::{Element, Node};
use crate::tags::{a, button, div, h5, i, img, li, nav, ol, p, span, ul};

/// A breadcrumb or dropdown entry. Entries without an `href` render as a
/// plain span (or a button in a dropdown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Crumb {
    pub text: String,
    pub href: Option<String>,
}

impl Crumb {
    pub fn link(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: Some(href.into()),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: None,
        }
    }
}

/// The last crumb is the current page and is never a link.
pub fn breadcrumb(items: &[Crumb]) -> Element {
    let last = items.len().saturating_sub(1);
    let list = ol()
        .class("breadcrumb")
        .children(items.iter().enumerate().map(|(idx, item)| {
            let inner = if idx == last {
                span().aria("current", "page").text(item.text.as_str())
            } else if let Some(href) = &item.href {
                a().href(href.as_str()).text(item.text.as_str())
            } else {
                span().text(item.text.as_str())
            };
            li().class("breadcrumb-item").child(inner)
        }));
    nav().aria("label", "breadcrumb").child(list)
}

/// The range of page numbers shown around `current`.
pub fn page_window(current: u32, total: u32, window: u32) -> std::ops::RangeInclusive<u32> {
    let start = current.saturating_sub(window / 2).max(1);
    let end = total.min(start + window.saturating_sub(1));
    start..=end
}

pub fn pagination(current: u32, total: u32, window: u32) -> Element {
    let edge = |label: &str, disabled: bool| {
        let link = if disabled {
            span().class("page-link").text(label)
        } else {
            a().class("page-link").href("#").aria("label", label).text(label)
        };
        li().class(if disabled { "page-item disabled" } else { "page-item" })
            .child(link)
    };

    let mut list = ul().class("pagination").child(edge("Previous", current <= 1));
    for page in page_window(current, total, window) {
        let item = if page == current {
            li().class("page-item active")
                .aria("current", "page")
                .child(span().class("page-link").text(page.to_string()))
        } else {
            li().class("page-item")
                .child(a().class("page-link").href("#").text(page.to_string()))
        };
        list.push(item);
    }
    list.push(edge("Next", current >= total));

    nav().aria("label", "Page navigation").child(list)
}

/// `None` entries and entries labelled `---` become dividers.
pub fn dropdown(label: &str, items: &[Option<Crumb>]) -> Element {
    let toggle = button()
        .class("btn btn-secondary dropdown-toggle")
        .data("toggle", "dropdown")
        .aria("haspopup", "true")
        .aria("expanded", "false")
        .text(label);

    let menu = div()
        .class("dropdown-menu")
        .aria("labelledby", "dropdownMenuButton")
        .children(items.iter().map(|item| match item {
            Some(crumb) if crumb.text != "---" => match &crumb.href {
                Some(href) => {
                    a().class("dropdown-item").href(href.as_str()).text(crumb.text.as_str())
                }
                None => button().class("dropdown-item").text(crumb.text.as_str()),
            },
            _ => div().class("dropdown-divider"),
        }));

    div().class("dropdown").child(toggle).child(menu)
}

/// `fa` and `feather` get their library prefixes; any other library name is
/// used as a class prefix.
pub fn icon(name: &str, library: &str) -> Element {
    let class = match library {
        "fa" => format!("fas fa-{name}"),
        "feather" => format!("feather feather-{name}"),
        other => format!("{other}-{name}"),
    };
    i().class(class).aria("hidden", "true")
}

/// `kind` is `border` or `grow`; border spinners carry screen-reader text.
pub fn spinner(kind: &str, size: Option<&str>, color: Option<&str>) -> Element {
    let mut classes = vec![format!("spinner-{kind}")];
    if let Some(size) = size {
        classes.push(format!("spinner-{kind}-{size}"));
    }
    if let Some(color) = color {
        classes.push(format!("text-{color}"));
    }
    let el = div()
        .class(classes.join(" "))
        .role("status")
        .aria("hidden", "true");
    if kind == "border" {
        el.child(span().class("sr-only").text("Loading..."))
    } else {
        el
    }
}

pub fn collapse(id: &str, content: impl Into<Node>, trigger_text: &str) -> Element {
    let trigger = button()
        .class("btn btn-primary")
        .data("bs-toggle", "collapse")
        .data("bs-target", format!("#{id}"))
        .aria("expanded", "false")
        .aria("controls", id)
        .text(trigger_text);
    let body = div()
        .id(id)
        .class("collapse")
        .child(div().class("card card-body").child(paragraph_if_text(content.into())));
    div().child(trigger).child(body)
}

/// Marks `target` as a tooltip trigger.
pub fn tooltip(target: Element, text: &str, placement: &str) -> Element {
    target
        .title(text)
        .data("toggle", "tooltip")
        .data("placement", placement)
}

pub fn popover(
    target: Element,
    heading: &str,
    content: &str,
    placement: &str,
    trigger: &str,
) -> Element {
    target
        .title(heading)
        .data("toggle", "popover")
        .data("placement", placement)
        .data("trigger", trigger)
        .data("content", content)
}

/// A carousel slide: an image with an optional caption, or arbitrary content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slide {
    Image {
        src: String,
        caption_title: Option<String>,
        caption_text: Option<String>,
    },
    Content(Node),
}

pub fn carousel(id: &str, slides: Vec<Slide>, controls: bool, indicators: bool) -> Element {
    let mut root = div()
        .id(id)
        .class("carousel slide")
        .data("ride", "carousel");

    if indicators {
        root.push(ol().class("carousel-indicators").children((0..slides.len()).map(|idx| {
            let dot = li()
                .data("target", format!("#{id}"))
                .data("slide-to", idx.to_string());
            if idx == 0 { dot.class("active") } else { dot }
        })));
    }

    let inner = div()
        .class("carousel-inner")
        .children(slides.into_iter().enumerate().map(|(idx, slide)| {
            let item = div().class(if idx == 0 {
                "carousel-item active"
            } else {
                "carousel-item"
            });
            match slide {
                Slide::Image {
                    src,
                    caption_title,
                    caption_text,
                } => {
                    let caption = (caption_title.is_some() || caption_text.is_some()).then(|| {
                        div()
                            .class("carousel-caption d-none d-md-block")
                            .child_opt(caption_title.map(|t| h5().text(t)))
                            .child_opt(caption_text.map(|t| p().text(t)))
                    });
                    item.child(img().attr("src", src).class("d-block w-100"))
                        .child_opt(caption)
                }
                Slide::Content(node) => item.child(node),
            }
        }));
    root.push(inner);

    if controls {
        for (dir, label) in [("prev", "Previous"), ("next", "Next")] {
            root.push(
                a().class(format!("carousel-control-{dir}"))
                    .href(format!("#{id}"))
                    .role("button")
                    .data("slide", dir)
                    .child(
                        span()
                            .class(format!("carousel-control-{dir}-icon"))
                            .aria("hidden", "true"),
                    )
                    .child(span().class("sr-only").text(label)),
            );
        }
    }

    root
}

/// An off-canvas side panel. `placement` is `start`, `end`, `top` or `bottom`.
pub fn offcanvas(id: &str, heading: &str, body: impl Into<Node>, placement: &str) -> Element {
    let label_id = format!("{id}Label");
    div()
        .id(id)
        .class(format!("offcanvas offcanvas-{placement}"))
        .tabindex(-1)
        .aria("labelledby", label_id.as_str())
        .child(
            div()
                .class("offcanvas-header")
                .child(h5().id(label_id.as_str()).class("offcanvas-title").text(heading))
                .child(
                    button()
                        .class("btn-close text-reset")
                        .data("bs-dismiss", "offcanvas")
                        .aria("label", "Close"),
                ),
        )
        .child(
            div()
                .class("offcanvas-body")
                .child(paragraph_if_text(body.into())),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breadcrumb_last_is_current() {
        let html = breadcrumb(&[
            Crumb::link("Home", "/"),
            Crumb::plain("Library"),
            Crumb::link("Data", "/data"),
        ])
        .render();
        assert!(html.contains("<a href=\"/\">Home</a>"));
        assert!(html.contains("<span>Library</span>"));
        assert!(html.contains("<span aria-current=\"page\">Data</span>"));
        assert!(!html.contains("href=\"/data\""));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(6, 10, 5), 4..=8);
        assert_eq!(page_window(10, 10, 5), 8..=10);
        assert_eq!(page_window(2, 3, 5), 1..=3);
    }

    #[test]
    fn test_pagination_disabled_edges() {
        let html = pagination(1, 1, 5).render();
        assert!(html.contains("<li class=\"page-item disabled\">\n      <span class=\"page-link\">Previous</span>"));
        assert!(html.contains("<span class=\"page-link\">Next</span>"));
        assert!(html.contains("<li class=\"page-item active\" aria-current=\"page\">"));
    }

    #[test]
    fn test_pagination_links() {
        let html = pagination(3, 10, 5).render();
        assert!(html.contains("<a class=\"page-link\" aria-label=\"Previous\" href=\"#\">Previous</a>"));
        assert!(html.contains("<a class=\"page-link\" href=\"#\">5</a>"));
        assert!(!html.contains(">6<"));
    }

    #[test]
    fn test_dropdown_dividers() {
        let el = dropdown(
            "Menu",
            &[
                Some(Crumb::link("Profile", "/me")),
                Some(Crumb::plain("---")),
                None,
                Some(Crumb::plain("Logout")),
            ],
        );
        let html = el.render();
        assert_eq!(html.matches("dropdown-divider").count(), 2);
        assert!(html.contains("<button class=\"dropdown-item\" type=\"button\">Logout</button>"));
    }

    #[test]
    fn test_icon_libraries() {
        assert_eq!(icon("home", "fa").get_attr("class"), Some("fas fa-home"));
        assert_eq!(icon("x", "feather").get_attr("class"), Some("feather feather-x"));
        assert_eq!(icon("star", "bi").get_attr("class"), Some("bi-star"));
    }

    #[test]
    fn test_spinner() {
        let html = spinner("border", Some("sm"), Some("primary")).render();
        assert!(html.starts_with("<div class=\"spinner-border spinner-border-sm text-primary\" role=\"status\" aria-hidden=\"true\">"));
        assert!(html.contains("Loading..."));
        assert!(spinner("grow", None, None).child_nodes().is_empty());
    }

    #[test]
    fn test_tooltip_and_popover() {
        let el = tooltip(button().text("?"), "Help", "top");
        assert_eq!(el.get_attr("title"), Some("Help"));
        assert_eq!(el.get_attr("data-toggle"), Some("tooltip"));

        let el = popover(span(), "T", "C", "right", "hover");
        assert_eq!(el.get_attr("data-content"), Some("C"));
        assert_eq!(el.get_attr("data-trigger"), Some("hover"));
    }

    #[test]
    fn test_carousel() {
        let html = carousel(
            "c",
            vec![
                Slide::Image {
                    src: "/a.png".into(),
                    caption_title: Some("A".into()),
                    caption_text: None,
                },
                Slide::Content("plain".into()),
            ],
            true,
            true,
        )
        .render();
        assert!(html.contains("<li class=\"active\" data-target=\"#c\" data-slide-to=\"0\"></li>"));
        assert!(html.contains("carousel-item active"));
        assert!(html.contains("<h5>A</h5>"));
        assert!(html.contains("data-slide=\"next\""));
    }

    #[test]
    fn test_offcanvas_and_collapse() {
        let html = offcanvas("side", "Menu", "hello", "end").render();
        assert!(html.contains("class=\"offcanvas offcanvas-end\" tabindex=\"-1\" aria-labelledby=\"sideLabel\""));
        assert!(html.contains("<p>hello</p>"));

        let html = collapse("more", "details", "Show").render();
        assert!(html.contains("data-bs-target=\"#more\""));
        assert!(html.contains("<div id=\"more\" class=\"collapse\">"));
    }
}
