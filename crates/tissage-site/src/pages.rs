//! The loader shell every generated page shares.
//!
//! A page holds the navbar, the pre-rendered entry inside `#content`, and
//! one `<template data-page>` per showcase entry. With a wasm bundle the
//! shell shows a spinner until the bundle has started the app; the router
//! in the bundle swaps `#content` between the templates.

use camino::{Utf8Path, Utf8PathBuf};
use tissage::components::layouts::PageTemplate;
use tissage::css::{Css, Stylesheet};
use tissage::prelude::*;
use tissage::script::js_string;
use tissage_applets::nav::{navbar, navbar_styles};
use tracing::{debug, info};

use crate::demo;
use crate::error::Result;

pub const DEFAULT_TITLE: &str = "Tissage Application";

const CODEMIRROR_CDN: &str = "https://cdnjs.cloudflare.com/ajax/libs/codemirror/5.65.16";

const CODEMIRROR_SCRIPTS: &[&str] = &[
    "codemirror.min.js",
    "mode/python/python.min.js",
    "mode/javascript/javascript.min.js",
    "mode/xml/xml.min.js",
    "mode/htmlmixed/htmlmixed.min.js",
    "mode/css/css.min.js",
    "mode/markdown/markdown.min.js",
    "addon/edit/matchbrackets.min.js",
    "addon/edit/closebrackets.min.js",
];

/// One HTML file to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub filename: Utf8PathBuf,
    /// Showcase entry shown first
    pub entry: String,
    pub title: String,
}

impl Page {
    pub fn new(
        filename: impl Into<Utf8PathBuf>,
        entry: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            entry: entry.into(),
            title: title.into(),
        }
    }
}

/// `index.html` on the home page and `about.html` on the about page.
pub fn default_pages(title: &str) -> Vec<Page> {
    vec![
        Page::new("index.html", "home", format!("Home - {title}")),
        Page::new("about.html", "about", format!("About - {title}")),
    ]
}

/// Site-wide settings for the shell.
#[derive(Debug, Clone, Default)]
pub struct ShellOptions {
    /// Navbar brand
    pub brand: Option<String>,
    /// JS module generated by wasm-bindgen, relative to the page
    pub wasm_bundle: Option<String>,
}

fn loader_styles() -> Stylesheet {
    Stylesheet::new()
        .rule(Css::element("body").props([
            ("font_family", "Arial, sans-serif"),
            ("padding", "20px"),
            ("background_color", "#f5f5f5"),
        ]))
        .rule(Css::id("loading").props([("text_align", "center"), ("padding", "50px")]))
        .rule(Css::id("content").props([("max_width", "1200px"), ("margin", "0 auto")]))
        .rule(Css::class("spinner").props([
            ("border", "4px solid #f3f3f3"),
            ("border_top", "4px solid #3498db"),
            ("border_radius", "50%"),
            ("width", "40px"),
            ("height", "40px"),
            ("animation", "spin 2s linear infinite"),
            ("margin", "0 auto"),
        ]))
        .raw("@keyframes spin {\n  0% { transform: rotate(0deg); }\n  100% { transform: rotate(360deg); }\n}")
}

fn page_template(page: &str) -> Result<Element> {
    Ok(Element::new("template")
        .data("page", page)
        .child(demo::render_entry(page)?))
}

/// Module script that loads the bundle and starts the app on `entry`.
fn bootstrap(bundle: &str, entry: &str) -> Element {
    let bundle = js_string(bundle);
    let entry = js_string(entry);
    let js = format!(
        "import init, {{ start_app }} from {bundle};\n\
         const loading = document.getElementById('loading');\n\
         const content = document.getElementById('content');\n\
         try {{\n\
         \x20 await init();\n\
         \x20 start_app({entry});\n\
         \x20 loading.style.display = 'none';\n\
         \x20 content.style.display = 'block';\n\
         }} catch (error) {{\n\
         \x20 console.error('Error loading application:', error);\n\
         \x20 loading.innerHTML = '<p style=\"color: red;\">Error loading application: ' + error.message + '</p>';\n\
         }}"
    );
    script().attr("type", "module").text(js)
}

/// Render the complete HTML document for `page`.
pub fn render_shell(page: &Page, options: &ShellOptions) -> Result<String> {
    let content = demo::render_entry(&page.entry)?;
    let live = options.wasm_bundle.is_some();

    let styles = loader_styles()
        .extend(navbar_styles())
        .extend(demo::styles());

    let mut template = PageTemplate::new(&page.title)
        .stylesheet(format!("{CODEMIRROR_CDN}/codemirror.min.css"))
        .head(style().id("app-styles").css(&styles));

    if live {
        template = template.content(
            div()
                .id("loading")
                .child(div().class("spinner"))
                .child(p().text("Loading application...")),
        );
    }

    template = template
        .content(navbar(options.brand.as_deref(), &demo::nav_items()))
        .content(
            div()
                .id("content")
                .style(if live { "display: none;" } else { "display: block;" })
                .child(content),
        );

    for (entry, _) in demo::ENTRIES {
        template = template.content(page_template(entry)?);
    }

    for script in CODEMIRROR_SCRIPTS {
        template = template.script(format!("{CODEMIRROR_CDN}/{script}"));
    }

    if let Some(bundle) = &options.wasm_bundle {
        template = template.content(bootstrap(bundle, &page.entry));
    }

    Ok(template.render())
}

/// Write one page, creating its directory. Returns the log line.
pub fn build_page(page: &Page, options: &ShellOptions) -> Result<String> {
    let html = render_shell(page, options)?;
    if let Some(dir) = page.filename.parent().filter(|d| !d.as_str().is_empty()) {
        fs_err::create_dir_all(dir)?;
    }
    fs_err::write(&page.filename, html)?;

    let message = format!(
        "Generated {} (entry: {}, title: {})",
        page.filename, page.entry, page.title
    );
    info!("{message}");
    Ok(message)
}

/// Write every page under `output_dir`; stops at the first failure. The
/// bundle in `options` is relative to `output_dir` and gets rewritten for
/// pages in subdirectories.
pub fn build_pages(
    pages: &[Page],
    output_dir: &Utf8Path,
    options: &ShellOptions,
) -> Result<Vec<String>> {
    debug!(count = pages.len(), %output_dir, "building pages");
    pages
        .iter()
        .map(|page| {
            let page = Page {
                filename: output_dir.join(&page.filename),
                ..page.clone()
            };
            let options = ShellOptions {
                wasm_bundle: options
                    .wasm_bundle
                    .as_deref()
                    .map(|bundle| bundle_path_for(&page.filename, output_dir, bundle)),
                ..options.clone()
            };
            build_page(&page, &options)
        })
        .collect()
}

/// Relative path from an output page to `bundle`, so nested pages still
/// find it.
pub fn bundle_path_for(page: &Utf8Path, output_dir: &Utf8Path, bundle: &str) -> String {
    let depth = page
        .strip_prefix(output_dir)
        .map(|rel| rel.components().count().saturating_sub(1))
        .unwrap_or(0);
    let bundle = bundle.trim_start_matches("./");
    if depth == 0 {
        format!("./{bundle}")
    } else {
        format!("{}{bundle}", "../".repeat(depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_shell() {
        let page = Page::new("index.html", "home", "Home");
        let html = render_shell(&page, &ShellOptions::default()).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(html.contains("<title>Home</title>"));
        assert!(html.contains("<style id=\"app-styles\">"));
        assert!(html.contains("@keyframes spin"));
        assert!(html.contains("<div id=\"content\" style=\"display: block;\">"));
        assert!(!html.contains("id=\"loading\""));
        assert!(!html.contains("type=\"module\""));
        for entry in ["home", "about", "file-explorer", "text-editor"] {
            assert!(html.contains(&format!("<template data-page=\"{entry}\">")));
        }
        assert!(html.contains("codemirror.min.js"));
    }

    #[test]
    fn test_live_shell() {
        let page = Page::new("editor.html", "text-editor", "Editor");
        let options = ShellOptions {
            brand: Some("Lab".to_string()),
            wasm_bundle: Some("./pkg/tissage_applets.js".to_string()),
        };
        let html = render_shell(&page, &options).unwrap();

        assert!(html.contains("<div id=\"loading\">"));
        assert!(html.contains("<div id=\"content\" style=\"display: none;\">"));
        assert!(html.contains("import init, { start_app } from \"./pkg/tissage_applets.js\";"));
        assert!(html.contains("start_app(\"text-editor\");"));
        assert!(html.contains(">Lab</a>"));
    }

    #[test]
    fn test_bootstrap_escapes_bundle_path() {
        let page = Page::new("index.html", "home", "Home");
        let options = ShellOptions {
            brand: None,
            wasm_bundle: Some("./pkg/x</script><script>alert(1).js".to_string()),
        };
        let html = render_shell(&page, &options).unwrap();
        assert!(html.contains("from \"./pkg/x<\\/script><script>alert(1).js\";"));
        assert!(!html.contains("x</script>"));
    }

    #[test]
    fn test_unknown_entry_fails() {
        let page = Page::new("x.html", "nope", "X");
        assert!(render_shell(&page, &ShellOptions::default()).is_err());
    }

    #[test]
    fn test_default_pages() {
        let pages = default_pages("Lab");
        assert_eq!(pages[0], Page::new("index.html", "home", "Home - Lab"));
        assert_eq!(pages[1].entry, "about");
    }

    #[test]
    fn test_bundle_path_for() {
        let out = Utf8Path::new("/site");
        assert_eq!(
            bundle_path_for(Utf8Path::new("/site/index.html"), out, "pkg/app.js"),
            "./pkg/app.js"
        );
        assert_eq!(
            bundle_path_for(Utf8Path::new("/site/docs/a/page.html"), out, "./pkg/app.js"),
            "../../pkg/app.js"
        );
    }
}
