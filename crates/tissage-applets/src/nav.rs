//! Single-page navigation bar.
//!
//! Links carry their target page in `data-page`; the browser glue intercepts
//! clicks on `.spa-link` instead of following `href`.

use tissage::css::{Css, Stylesheet};
use tissage::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: String,
    pub url: String,
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn link(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            children: Vec::new(),
        }
    }

    pub fn dropdown(label: impl Into<String>, children: Vec<NavItem>) -> Self {
        Self {
            label: label.into(),
            url: "#".to_string(),
            children,
        }
    }
}

/// Page name for a nav url: `#` has none, otherwise leading slashes go.
pub fn page_name(url: &str) -> &str {
    if url == "#" { "" } else { url.trim_start_matches('/') }
}

fn spa_link(label: &str, url: &str) -> Element {
    a().href("#")
        .class("sci_ux_navbar_link spa-link")
        .data("page", page_name(url))
        .text(label)
}

pub fn navbar(brand: Option<&str>, items: &[NavItem]) -> Element {
    let brand = brand.map(|b| {
        a().href("#")
            .class("sci_ux_navbar_brand spa-link")
            .data("page", "")
            .text(b)
    });

    div()
        .class("sci_ux_navbar")
        .child_opt(brand)
        .children(items.iter().map(|item| {
            if item.children.is_empty() {
                spa_link(&item.label, &item.url)
            } else {
                div()
                    .class("sci_ux_dropdown")
                    .child(button().class("sci_ux_dropbtn").text(format!("{} ▼", item.label)))
                    .child(
                        div()
                            .class("sci_ux_dropdown_content")
                            .children(item.children.iter().map(|c| spa_link(&c.label, &c.url))),
                    )
            }
        }))
}

pub fn navbar_styles() -> Stylesheet {
    Stylesheet::new()
        .rule(
            Css::class("sci_ux_navbar")
                .props([("overflow", "hidden"), ("background_color", "#333")]),
        )
        .rule(Css::selector(".sci_ux_navbar_link, .sci_ux_navbar_brand").props([
            ("float", "left"),
            ("display", "block"),
            ("color", "white"),
            ("text_align", "center"),
            ("padding", "14px 20px"),
            ("text_decoration", "none"),
        ]))
        .rule(Css::class("sci_ux_navbar_brand").prop("font_weight", "bold"))
        .rule(
            Css::selector(".sci_ux_navbar_link:hover")
                .props([("background_color", "#ddd"), ("color", "black")]),
        )
        .rule(Css::class("sci_ux_dropdown").props([("float", "left"), ("overflow", "hidden")]))
        .rule(Css::class("sci_ux_dropbtn").props([
            ("font_size", "16px"),
            ("border", "none"),
            ("outline", "none"),
            ("color", "white"),
            ("padding", "14px 16px"),
            ("background_color", "inherit"),
            ("font_family", "inherit"),
            ("margin", "0"),
            ("cursor", "pointer"),
        ]))
        .rule(
            Css::selector(".sci_ux_dropdown:hover .sci_ux_dropbtn")
                .props([("background_color", "#ddd"), ("color", "black")]),
        )
        .rule(Css::class("sci_ux_dropdown_content").props([
            ("display", "none"),
            ("position", "absolute"),
            ("background_color", "#f9f9f9"),
            ("min_width", "160px"),
            ("box_shadow", "0px 8px 16px 0px rgba(0,0,0,0.2)"),
            ("z_index", "1"),
        ]))
        .rule(Css::selector(".sci_ux_dropdown_content a").props([
            ("float", "none"),
            ("color", "black"),
            ("padding", "12px 16px"),
            ("text_decoration", "none"),
            ("display", "block"),
            ("text_align", "left"),
        ]))
        .rule(Css::selector(".sci_ux_dropdown_content a:hover").prop("background_color", "#ddd"))
        .rule(
            Css::selector(".sci_ux_dropdown:hover .sci_ux_dropdown_content")
                .prop("display", "block"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_name() {
        assert_eq!(page_name("/about"), "about");
        assert_eq!(page_name("about"), "about");
        assert_eq!(page_name("#"), "");
    }

    #[test]
    fn test_plain_link() {
        let html = navbar(None, &[NavItem::link("About", "/about")]).render();
        assert_eq!(
            html,
            "<div class=\"sci_ux_navbar\">\n  \
             <a class=\"sci_ux_navbar_link spa-link\" data-page=\"about\" href=\"#\">About</a>\n\
             </div>"
        );
    }

    #[test]
    fn test_dropdown() {
        let items = [NavItem::dropdown(
            "Features",
            vec![NavItem::link("Editor", "text-editor"), NavItem::link("Files", "/file-explorer")],
        )];
        let html = navbar(Some("Sci-UX"), &items).render();
        assert!(html.contains("<a class=\"sci_ux_navbar_brand spa-link\" data-page=\"\" href=\"#\">Sci-UX</a>"));
        assert!(html.contains("<button class=\"sci_ux_dropbtn\" type=\"button\">Features ▼</button>"));
        assert!(html.contains("data-page=\"text-editor\" href=\"#\">Editor</a>"));
        assert!(html.contains("data-page=\"file-explorer\" href=\"#\">Files</a>"));
    }
}
