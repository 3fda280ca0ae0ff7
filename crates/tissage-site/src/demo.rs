//! Built-in showcase pages.
//!
//! Each entry renders the content that goes inside `#content`. The applet
//! pages pre-render their applet over the default file tree so the page
//! reads correctly before the wasm bundle mounts it.

use tissage::components::forms::contact_form;
use tissage::components::layouts::card;
use tissage::components::ui::{ModalSize, modal};
use tissage::css::{Css, Stylesheet};
use tissage::prelude::*;
use tissage_applets::nav::NavItem;
use tissage_applets::{FileExplorer, TextEditor};
use tissage_vfs::{MemoryStorage, VirtualFileSystem};

use crate::error::{Result, SiteError};

type Render = fn() -> Result<Element>;

/// Entries in navigation order; the first one is the fallback page.
pub const ENTRIES: &[(&str, Render)] = &[
    ("home", home),
    ("about", about),
    ("file-explorer", file_explorer),
    ("text-editor", text_editor),
];

pub fn render_entry(name: &str) -> Result<Element> {
    let (_, render) = ENTRIES
        .iter()
        .find(|(entry, _)| *entry == name)
        .ok_or_else(|| SiteError::UnknownEntry(name.to_string()))?;
    render()
}

pub fn nav_items() -> Vec<NavItem> {
    vec![
        NavItem::link("Home", "home"),
        NavItem::link("About", "about"),
        NavItem::dropdown(
            "Applets",
            vec![
                NavItem::link("File Explorer", "file-explorer"),
                NavItem::link("Text Editor", "text-editor"),
            ],
        ),
        NavItem::dropdown(
            "Features",
            vec![
                NavItem::link("HTML Generation", "home"),
                NavItem::link("CSS Styling", "home"),
                NavItem::link("Interactive Components", "home"),
            ],
        ),
        NavItem::link("Contact", "about"),
    ]
}

struct Feature {
    key: &'static str,
    title: &'static str,
    summary: &'static str,
    details: &'static [&'static str],
    example: &'static str,
}

const FEATURES: &[Feature] = &[
    Feature {
        key: "html",
        title: "HTML Generation",
        summary: "Generate clean, semantic HTML with a fluent builder API.",
        details: &[
            "One constructor per HTML tag",
            "Method chaining for building complex structures",
            "Text and attribute values are escaped",
            "Attributes render in a stable order",
        ],
        example: "let card = div()\n    .class(\"card\")\n    .child(h3().text(\"Card Title\"))\n    .child(p().text(\"Card content goes here\"));",
    },
    Feature {
        key: "css",
        title: "CSS Styling",
        summary: "Build stylesheets in code, no separate CSS files needed.",
        details: &[
            "Rules from class, id and element selectors",
            "snake_case property names become kebab-case",
            "Media queries for responsive layouts",
            "A built-in framework stylesheet",
        ],
        example: "let sheet = Stylesheet::new().rule(\n    Css::class(\"my-class\").props([\n        (\"padding\", \"20px\"),\n        (\"border_radius\", \"8px\"),\n    ]),\n);",
    },
    Feature {
        key: "interactive",
        title: "Interactive Components",
        summary: "Forms, modals and applets that come alive in the browser.",
        details: &[
            "Form components with labels and help text",
            "Modal dialogs and overlays",
            "A file explorer over browser storage",
            "A code editor with syntax highlighting",
        ],
        example: "let form = contact_form(\"/submit\");",
    },
];

fn feature_modal_id(key: &str) -> String {
    format!("feature-{key}")
}

fn feature_modal(feature: &Feature) -> Element {
    let id = feature_modal_id(feature.key);
    let body = div()
        .child(p().class("modal-description").text(feature.summary))
        .child(h3().class("modal-section-title").text("Key Features:"))
        .child(
            ul().class("modal-features-list")
                .children(feature.details.iter().map(|d| li().text(*d))),
        )
        .child(h3().class("modal-section-title").text("Example:"))
        .child(pre().class("modal-code-example").child(code().text(feature.example)));
    let got_it = button()
        .class("modal-button")
        .onclick(format!("document.getElementById('{id}').style.display='none'"))
        .text("Got it!");
    modal(&id, feature.title, body, vec![got_it], ModalSize::Default)
}

fn page_footer(lines: [&str; 2]) -> Element {
    footer().child(
        div()
            .class("footer")
            .children(lines.into_iter().map(|line| p().text(line))),
    )
}

fn hero(heading: &str, tagline: &str) -> Element {
    div().class("hero").child(h1().text(heading)).child(p().text(tagline))
}

const EXPLORER_FEATURES: &[(&str, &str)] = &[
    (
        "📁 File Management",
        "Create, delete, and organize files and folders with an intuitive interface.",
    ),
    (
        "💾 Persistent Storage",
        "Files and folders persist across browser sessions using localStorage.",
    ),
    (
        "🔍 File Type Support",
        "Recognizes common file types: Python scripts, Jupyter notebooks, CSV data, and more.",
    ),
    ("⚡ Quick Actions", "Toolbar buttons for efficient file operations."),
];

const EDITOR_FEATURES: &[(&str, &str)] = &[
    (
        "🎨 Syntax Highlighting",
        "Python, JavaScript, HTML, CSS, JSON, and more with automatic language detection.",
    ),
    ("📝 Smart Editing", "Line numbers, cursor position tracking, and bracket matching."),
    ("💾 File Operations", "New, open, save, and save-as against the browser file system."),
    ("⚡ Responsive UI", "Toolbar, status bar, and a manual language override."),
];

fn feature_cards(cards: &[(&str, &str)]) -> Element {
    div().class("feature-grid").children(
        cards.iter().map(|(title, text)| {
            div()
                .class("card")
                .child(h3().text(*title))
                .child(p().text(*text))
        }),
    )
}

fn usage(items: &[&str]) -> Element {
    div()
        .class("demo-section")
        .child(h2().text("Usage Instructions"))
        .child(ul().class("usage-list").children(items.iter().map(|i| li().text(*i))))
}

pub fn home() -> Result<Element> {
    let cards = FEATURES.iter().map(|f| {
        let learn_more = button()
            .id(format!("btn-{}", f.key))
            .class("btn-primary")
            .onclick(format!(
                "document.getElementById('{}').style.display='flex'",
                feature_modal_id(f.key)
            ))
            .text("Learn More");
        card(Some(f.title), Some(p().text(f.summary).into()), Some(learn_more.into()))
    });

    Ok(div()
        .class("app-container")
        .child(hero(
            "Welcome to tissage",
            "A modern web application built from typed HTML and CSS builders",
        ))
        .child(div().class("feature-grid").children(cards))
        .children(FEATURES.iter().map(feature_modal))
        .child(
            div()
                .class("form-section")
                .child(h2().text("Try it out!"))
                .child(contact_form("#")),
        )
        .child(
            div()
                .class("demo-section")
                .child(h2().text("Interactive Demo"))
                .child(
                    div()
                        .class("demo-content")
                        .child(p().text(
                            "This is a demonstration of the tissage component library.",
                        ))
                        .child(p().text(
                            "Open the applets from the navbar to try the file explorer and editor.",
                        )),
                ),
        )
        .child(page_footer(["Built with tissage", "© 2024 tissage"])))
}

pub fn about() -> Result<Element> {
    Ok(div()
        .class("app-container")
        .child(
            div()
                .class("about-panel")
                .child(h1().text("About Us"))
                .child(h2().text("Our Mission"))
                .child(p().text(
                    "We want building web front ends to feel like writing ordinary code. \
                     tissage lets you describe pages, styles and widgets with the same \
                     types and tools you use everywhere else.",
                ))
                .child(h2().text("Why tissage?"))
                .child(p().text(
                    "Web development usually means juggling HTML, CSS and JavaScript. \
                     With tissage the markup, the styles and the browser logic are all \
                     built from one typed API, from the static shell to the live applets.",
                ))
                .child(h2().text("Get Started"))
                .child(p().text(
                    "Run `tissage build` in a project with a .config/tissage.yaml and open \
                     the generated index.html.",
                )),
        )
        .child(page_footer(["Built with tissage", "© 2024 tissage"])))
}

fn demo_vfs() -> Result<VirtualFileSystem<MemoryStorage>> {
    Ok(VirtualFileSystem::open(MemoryStorage::new())?)
}

/// Placeholder the wasm bundle replaces with a live applet.
fn applet_host(id: &str, applet: &str, preview: Element) -> Element {
    div().id(id).class("applet-host").data("applet", applet).child(preview)
}

pub fn file_explorer() -> Result<Element> {
    let host_id = "main-file-explorer";
    let mut explorer = FileExplorer::new(format!("{host_id}-fe"), demo_vfs()?);

    Ok(div()
        .class("app-container")
        .child(hero(
            "File Explorer",
            "A Jupyter-like file browser for managing your projects and notebooks",
        ))
        .child(
            div()
                .class("demo-section")
                .child(h2().text("Features"))
                .child(feature_cards(EXPLORER_FEATURES)),
        )
        .child(
            div()
                .class("demo-section")
                .child(h2().text("Try It Out"))
                .child(p().text(
                    "Use the file explorer below to navigate, create files and folders, and explore the virtual file system:",
                ))
                .child(
                    div()
                        .class("applet-frame")
                        .child(applet_host(host_id, "file-explorer", explorer.render())),
                ),
        )
        .child(usage(&[
            "🖱️ Single-click to select files and folders",
            "🖱️ Double-click folders to navigate into them",
            "🖱️ Double-click files to open them in the text editor",
            "📁 Use '+ New Folder' to create directories",
            "📄 Use '+ New File' to create new files",
            "🗑️ Select items and click 'Delete' to remove them",
            "⬆️ Click 'Up' to navigate to the parent directory",
            "🔄 Click 'Reset' to restore default files (clears all custom data)",
            "💾 All changes are automatically saved to browser storage",
        ]))
        .child(page_footer([
            "File Explorer Demo",
            "Ready for integration with notebook editors and data analysis tools",
        ])))
}

const SAMPLES: &[(&str, &str, &str)] = &[
    (
        "python",
        "Python Example",
        "# Scientific computing example\nimport numpy as np\n\ndef analyze_data(data):\n    mean = np.mean(data)\n    std = np.std(data)\n    return {'mean': mean, 'std': std}\n\ndata = np.random.normal(0, 1, 1000)\nresults = analyze_data(data)\nprint(f\"Mean: {results['mean']:.3f}\")",
    ),
    (
        "javascript",
        "JavaScript Example",
        "// Data visualization example\nclass DataVisualizer {\n    constructor(containerId) {\n        this.container = document.getElementById(containerId);\n        this.data = [];\n    }\n\n    addData(points) {\n        this.data = [...this.data, ...points];\n        this.render();\n    }\n\n    render() {\n        console.log('Rendering', this.data.length, 'points');\n    }\n}",
    ),
    (
        "html",
        "HTML Example",
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    <title>Scientific Dashboard</title>\n</head>\n<body>\n    <header class=\"main-header\">\n        <h1>Data Analysis Dashboard</h1>\n    </header>\n    <main id=\"content\">\n        <div class=\"chart-container\"></div>\n    </main>\n</body>\n</html>",
    ),
    (
        "json",
        "JSON Configuration",
        "{\n  \"experiment\": {\n    \"name\": \"Data Analysis Pipeline\",\n    \"version\": \"1.2.0\",\n    \"parameters\": {\n      \"sample_size\": 1000,\n      \"confidence_level\": 0.95,\n      \"method\": \"bootstrap\"\n    },\n    \"enabled\": true\n  }\n}",
    ),
];

pub fn text_editor() -> Result<Element> {
    let host_id = "main-text-editor";
    let editor = TextEditor::new(format!("{host_id}-te"));

    let samples = SAMPLES.iter().map(|(kind, heading, source)| {
        div()
            .class("sample-card")
            .data("type", *kind)
            .child(h4().text(*heading))
            .child(pre().class("sample-preview").child(code().text(*source)))
    });

    Ok(div()
        .class("app-container")
        .child(hero(
            "Text Editor",
            "A code editor with syntax highlighting for scientific computing",
        ))
        .child(
            div()
                .class("demo-section")
                .child(h2().text("Features"))
                .child(feature_cards(EDITOR_FEATURES)),
        )
        .child(
            div()
                .class("demo-section")
                .child(h2().text("Try It Out"))
                .child(p().text(
                    "Use the text editor below to write code with syntax highlighting:",
                ))
                .child(applet_host(host_id, "text-editor", editor.render())),
        )
        .child(
            div()
                .class("demo-section")
                .child(h2().text("Sample Code"))
                .child(p().text("Click on any sample below to load it into the editor:"))
                .child(div().class("sample-code-grid").children(samples)),
        )
        .child(usage(&[
            "📝 Start typing to see real-time syntax highlighting",
            "🔤 Use the language selector to override auto-detection",
            "📁 Click 'New' to start a fresh document",
            "📂 Click 'Open' to pick a file from the file system",
            "💾 Use 'Save As' to choose a path and enable 'Save'",
            "🎯 Click on sample code cards to load examples",
            "📍 Watch the status bar for cursor position and file information",
        ]))
        .child(page_footer([
            "Text Editor Demo",
            "Perfect for coding, documentation, and data analysis scripts",
        ])))
}

/// Styles shared by the showcase pages.
pub fn styles() -> Stylesheet {
    Stylesheet::new()
        .rule(Css::class("app-container").props([
            ("max_width", "1200px"),
            ("margin", "0 auto"),
            ("padding", "20px"),
        ]))
        .rule(Css::class("hero").props([
            ("background", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
            ("color", "white"),
            ("padding", "60px 0"),
            ("text_align", "center"),
            ("border_radius", "10px"),
            ("margin_bottom", "30px"),
        ]))
        .rule(Css::class("feature-grid").props([
            ("display", "grid"),
            ("grid_template_columns", "repeat(auto-fit, minmax(250px, 1fr))"),
            ("gap", "20px"),
            ("margin", "30px 0"),
        ]))
        .rule(Css::selector(".feature-grid .card").props([
            ("padding", "20px"),
            ("transition", "transform 0.3s ease"),
        ]))
        .rule(Css::selector(".feature-grid .card:hover").prop("transform", "translateY(-5px)"))
        .rule(Css::class("btn-primary").props([
            ("background", "#667eea"),
            ("color", "white"),
            ("padding", "12px 24px"),
            ("border", "none"),
            ("border_radius", "6px"),
            ("cursor", "pointer"),
            ("font_size", "16px"),
        ]))
        .rule(Css::selector(".btn-primary:hover").prop("background", "#5a6fd8"))
        .rule(Css::class("footer").props([
            ("text_align", "center"),
            ("margin_top", "50px"),
            ("padding_top", "30px"),
            ("border_top", "1px solid #eee"),
            ("color", "#666"),
        ]))
        .rule(Css::selector(".form-section, .demo-section").prop("margin", "40px 0"))
        .rule(
            Css::selector(".demo-section h2").props([("color", "#333"), ("margin_bottom", "15px")]),
        )
        .rule(Css::selector(".demo-section p").props([("color", "#555"), ("line_height", "1.6")]))
        .rule(Css::class("usage-list").props([
            ("max_width", "600px"),
            ("margin", "20px auto"),
            ("line_height", "1.6"),
            ("color", "#555"),
        ]))
        .rule(Css::class("demo-content").props([
            ("background", "white"),
            ("padding", "20px"),
            ("border_radius", "8px"),
            ("box_shadow", "0 2px 10px rgba(0,0,0,0.1)"),
        ]))
        .rule(Css::class("about-panel").props([
            ("background", "white"),
            ("padding", "40px"),
            ("border_radius", "10px"),
            ("margin", "20px 0"),
        ]))
        .rule(Css::selector(".about-panel h1").props([
            ("color", "#2c3e50"),
            ("text_align", "center"),
            ("margin_bottom", "30px"),
        ]))
        .rule(Css::class("applet-frame").props([
            ("margin", "20px 0"),
            ("display", "flex"),
            ("justify_content", "center"),
        ]))
        .rule(Css::class("modal-description").props([("color", "#666"), ("line_height", "1.5")]))
        .rule(Css::class("modal-section-title").props([("color", "#333"), ("margin_top", "25px")]))
        .rule(Css::class("modal-code-example").props([
            ("background", "#f8f9fa"),
            ("padding", "15px"),
            ("border_radius", "5px"),
            ("overflow_x", "auto"),
            ("border_left", "4px solid #667eea"),
        ]))
        .rule(Css::class("modal-button").props([
            ("background", "#667eea"),
            ("color", "white"),
            ("padding", "10px 20px"),
            ("border", "none"),
            ("border_radius", "5px"),
            ("cursor", "pointer"),
        ]))
        .rule(Css::class("sample-code-grid").props([
            ("display", "grid"),
            ("grid_template_columns", "repeat(auto-fit, minmax(300px, 1fr))"),
            ("gap", "20px"),
            ("margin", "20px 0"),
        ]))
        .rule(Css::class("sample-card").props([
            ("border", "1px solid #ddd"),
            ("border_radius", "8px"),
            ("padding", "15px"),
            ("background", "white"),
            ("cursor", "pointer"),
            ("transition", "all 0.2s ease"),
        ]))
        .rule(Css::selector(".sample-card:hover").props([
            ("border_color", "#007acc"),
            ("transform", "translateY(-2px)"),
        ]))
        .rule(Css::class("sample-preview").props([
            ("background", "#f8f9fa"),
            ("border", "1px solid #e9ecef"),
            ("border_radius", "4px"),
            ("padding", "12px"),
            ("font_family", "'Courier New', Consolas, monospace"),
            ("font_size", "13px"),
            ("overflow", "auto"),
            ("max_height", "200px"),
        ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_renders() {
        for (name, _) in ENTRIES {
            let html = render_entry(name).unwrap().render();
            assert!(html.starts_with("<div class=\"app-container\">"), "{name}");
        }
    }

    #[test]
    fn test_unknown_entry() {
        let err = render_entry("blog").unwrap_err();
        assert_eq!(err.to_string(), "unknown entry 'blog'");
    }

    #[test]
    fn test_home_feature_modals() {
        let html = home().unwrap().render();
        for key in ["html", "css", "interactive"] {
            assert!(html.contains(&format!("id=\"btn-{key}\"")));
            assert!(html.contains(&format!("id=\"feature-{key}\"")));
        }
        assert!(html.contains("Send Message"));
    }

    #[test]
    fn test_applet_hosts() {
        let html = file_explorer().unwrap().render();
        assert!(html.contains("id=\"main-file-explorer\" class=\"applet-host\" data-applet=\"file-explorer\""));
        assert!(html.contains("data-name=\"notebooks\""));

        let html = text_editor().unwrap().render();
        assert!(html.contains("data-applet=\"text-editor\""));
        assert!(html.contains("id=\"te-editor\""));
        assert_eq!(html.matches("class=\"sample-card\"").count(), SAMPLES.len());
    }

    #[test]
    fn test_nav_targets_are_entries() {
        fn targets(items: &[NavItem]) -> Vec<String> {
            items
                .iter()
                .flat_map(|item| {
                    if item.children.is_empty() {
                        vec![item.url.clone()]
                    } else {
                        targets(&item.children)
                    }
                })
                .collect()
        }
        for target in targets(&nav_items()) {
            assert!(ENTRIES.iter().any(|(name, _)| *name == target), "{target}");
        }
    }
}
