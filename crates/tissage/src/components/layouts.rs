//! Page-level layout building blocks.

use crate::element::{Element, Node};
use crate::framework::framework_css;
use crate::tags::{
    a, body, div, footer as footer_el, h1, h4, h5, head, hr, html, link, meta, nav, p, script,
    section, style, title,
};

/// Wrap plain text in a paragraph, pass anything else through.
pub(crate) fn paragraph_if_text(node: Node) -> Node {
    match node {
        Node::Text(text) => Node::Element(p().text(text)),
        other => other,
    }
}

pub fn container(fluid: bool) -> Element {
    div().class(if fluid { "container-fluid" } else { "container" })
}

pub fn row(columns: impl IntoIterator<Item = Element>) -> Element {
    div().class("row").children(columns)
}

/// `col-{size}` for a sized column, plain `col` otherwise.
pub fn col(size: Option<u8>) -> Element {
    match size {
        Some(n) => div().class(format!("col-{n}")),
        None => div().class("col"),
    }
}

/// A card with optional header title, body and footer. A text body becomes
/// a paragraph.
pub fn card(title: Option<&str>, body: Option<Node>, footer: Option<Node>) -> Element {
    div()
        .class("card")
        .child_opt(
            title.map(|t| div().class("card-header").child(h5().class("card-title").text(t))),
        )
        .child_opt(body.map(|b| div().class("card-body").child(paragraph_if_text(b))))
        .child_opt(footer.map(|f| div().class("card-footer").child(f)))
}

/// A full `html` page with the framework stylesheet inlined in `head`.
#[derive(Debug, Clone, Default)]
pub struct PageTemplate {
    pub title: String,
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
    pub head_extra: Vec<Element>,
    pub body: Vec<Node>,
}

impl PageTemplate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn stylesheet(mut self, href: impl Into<String>) -> Self {
        self.stylesheets.push(href.into());
        self
    }

    pub fn script(mut self, src: impl Into<String>) -> Self {
        self.scripts.push(src.into());
        self
    }

    pub fn head(mut self, el: Element) -> Self {
        self.head_extra.push(el);
        self
    }

    pub fn content(mut self, node: impl Into<Node>) -> Self {
        self.body.push(node.into());
        self
    }

    pub fn build(self) -> Element {
        let head_el = head()
            .child(meta().attr("charset", "UTF-8"))
            .child(
                meta()
                    .name("viewport")
                    .attr("content", "width=device-width, initial-scale=1.0"),
            )
            .child(title().text(self.title))
            .child(style().text(framework_css()))
            .children(
                self.stylesheets
                    .into_iter()
                    .map(|href| link().attr("rel", "stylesheet").href(href)),
            )
            .children(self.head_extra);

        let body_el = body()
            .children(self.body)
            .children(self.scripts.into_iter().map(|src| script().attr("src", src)));

        html().child(head_el).child(body_el)
    }

    /// The page with its doctype.
    pub fn render(self) -> String {
        format!("<!DOCTYPE html>\n{}", self.build().render())
    }
}

pub fn hero_section(
    heading: &str,
    subtitle: Option<&str>,
    background: &str,
    color: &str,
) -> Element {
    let style = format!(
        "background-color: {background}; color: {color}; padding: 4rem 0; text-align: center; min-height: 400px; display: flex; align-items: center;"
    );
    section().class("hero-section").style(style).child(
        container(false)
            .child(
                h1().style("font-size: 3rem; margin-bottom: 1rem; font-weight: bold;")
                    .text(heading),
            )
            .child_opt(
                subtitle.map(|s| p().style("font-size: 1.25rem; margin-bottom: 0;").text(s)),
            ),
    )
}

/// A link in a [`navbar`] or [`dashboard_layout`] menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub text: String,
    pub href: String,
    pub active: bool,
}

impl Link {
    pub fn new(text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            href: href.into(),
            active: false,
        }
    }

    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }
}

pub fn navbar(brand: Option<&str>, items: &[Link], background: &str, color: &str) -> Element {
    let style = format!(
        "background-color: {background}; color: {color}; padding: 1rem 0; border-bottom: 1px solid #dee2e6; box-shadow: 0 2px 4px rgba(0,0,0,0.1);"
    );
    let brand_link = a()
        .href("#")
        .style(format!(
            "font-size: 1.5rem; font-weight: bold; text-decoration: none; color: {color};"
        ))
        .text(brand.unwrap_or("Brand"));
    let menu = div().style("text-align: right;").children(items.iter().map(|item| {
        a().href(item.href.as_str())
            .style(format!(
                "margin-left: 2rem; text-decoration: none; color: {color}; font-weight: 500;"
            ))
            .text(item.text.as_str())
    }));

    nav().class("navbar").style(style).child(
        container(false).child(row([
            col(Some(6)).child(brand_link),
            col(Some(6)).child(menu),
        ])),
    )
}

pub fn sidebar_layout(
    sidebar: impl IntoIterator<Item = Node>,
    main_content: impl IntoIterator<Item = Node>,
    sidebar_width: u8,
) -> Element {
    let sidebar_width = sidebar_width.clamp(1, 11);
    container(false).child(row([
        col(Some(sidebar_width)).child(
            div()
                .style("background-color: #f8f9fa; padding: 2rem; min-height: 100vh; border-right: 1px solid #dee2e6;")
                .children(sidebar),
        ),
        col(Some(12 - sidebar_width)).child(div().style("padding: 2rem;").children(main_content)),
    ]))
}

pub fn footer(
    content: Option<Node>,
    copyright: Option<&str>,
    background: &str,
    color: &str,
) -> Element {
    let style = format!(
        "background-color: {background}; color: {color}; padding: 3rem 0 1rem 0; margin-top: auto; border-top: 1px solid #dee2e6;"
    );
    let copyright_row = copyright.map(|text| {
        row([col(None)
            .child(hr().style("margin: 2rem 0 1rem 0; border-color: #dee2e6;"))
            .child(
                p().style(format!(
                    "text-align: center; margin: 0; color: {color}; font-size: 0.9rem;"
                ))
                .text(text),
            )])
    });
    footer_el()
        .class("footer")
        .style(style)
        .child(container(false).child_opt(content).child_opt(copyright_row))
}

/// Sidebar navigation on the left, `main_content` on the right.
pub fn dashboard_layout(
    heading: &str,
    items: &[Link],
    main_content: impl IntoIterator<Item = Node>,
) -> Element {
    let mut sidebar = vec![Node::from(
        h4().style(
            "margin-bottom: 2rem; color: #333; padding-bottom: 1rem; border-bottom: 2px solid #007bff;",
        )
        .text(heading),
    )];
    sidebar.extend(items.iter().map(|item| {
        let (color, weight) = if item.active {
            ("#007bff", "600")
        } else {
            ("#6c757d", "400")
        };
        Node::from(
            a()
                .href(item.href.as_str())
                .style(format!(
                    "display: block; padding: 0.75rem 0; text-decoration: none; color: {color}; font-weight: {weight}; border-bottom: 1px solid #e9ecef; transition: color 0.2s;"
                ))
                .text(item.text.as_str()),
        )
    }));

    div()
        .class("dashboard")
        .style("min-height: 100vh; display: flex; flex-direction: column;")
        .child(sidebar_layout(sidebar, main_content, 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_classes() {
        assert_eq!(col(Some(4)).get_attr("class"), Some("col-4"));
        assert_eq!(col(None).get_attr("class"), Some("col"));
        assert_eq!(container(true).get_attr("class"), Some("container-fluid"));
    }

    #[test]
    fn test_card_wraps_text_body() {
        let html = card(Some("Stats"), Some("42 users".into()), None).render();
        assert_eq!(
            html,
            "<div class=\"card\">\n  <div class=\"card-header\">\n    <h5 class=\"card-title\">Stats</h5>\n  </div>\n  <div class=\"card-body\">\n    <p>42 users</p>\n  </div>\n</div>"
        );
    }

    #[test]
    fn test_card_footer_text_is_inline() {
        let html = card(None, None, Some("fine print".into())).render();
        assert!(html.contains("<div class=\"card-footer\">fine print</div>"));
    }

    #[test]
    fn test_page_template() {
        let html = PageTemplate::new("Demo")
            .stylesheet("/extra.css")
            .script("/app.js")
            .content(p().text("hi"))
            .render();
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
        assert!(html.contains("<title>Demo</title>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/extra.css\">"));
        assert!(html.contains("<script type=\"text/javascript\" src=\"/app.js\"></script>"));
        assert!(html.contains(".btn-primary {"));
    }

    #[test]
    fn test_hero_style() {
        let el = hero_section("Welcome", None, "#f8f9fa", "#333");
        assert_eq!(
            el.get_attr("style"),
            Some("background-color: #f8f9fa; color: #333; padding: 4rem 0; text-align: center; min-height: 400px; display: flex; align-items: center;")
        );
        assert!(!el.render().contains("<p"));
    }

    #[test]
    fn test_sidebar_widths() {
        let html = sidebar_layout(Vec::<Node>::new(), Vec::<Node>::new(), 4).render();
        assert!(html.contains("class=\"col-4\""));
        assert!(html.contains("class=\"col-8\""));
    }

    #[test]
    fn test_dashboard_active_link() {
        let items = [Link::new("Home", "/").active(), Link::new("Reports", "/reports")];
        let html = dashboard_layout("Admin", &items, [Node::from("body")]).render();
        assert!(html.contains("color: #007bff; font-weight: 600;"));
        assert!(html.contains("color: #6c757d; font-weight: 400;"));
    }

    #[test]
    fn test_footer_copyright() {
        let html = footer(None, Some("© 2024"), "#f8f9fa", "#6c757d").render();
        assert!(html.contains("<hr style=\"margin: 2rem 0 1rem 0; border-color: #dee2e6;\">"));
        assert!(html.contains(">© 2024</p>"));
    }
}
