//! HTML element tree and its pretty-printed rendering.
//!
//! Elements own an ordered attribute list and an ordered list of child
//! [`Node`]s. Rendering uses two spaces per nesting level: text stays inline,
//! nested elements go on their own lines.

use std::fmt;

use crate::css::Stylesheet;

/// Tags that never have content or a closing tag.
pub const VOID_TAGS: &[&str] = &[
    "img", "input", "br", "hr", "meta", "link", "track", "source", "col", "area", "base",
];

/// Global attributes, in the order they are emitted.
const GLOBAL_ATTRS: &[&str] = &[
    "id",
    "class",
    "style",
    "title",
    "lang",
    "dir",
    "hidden",
    "tabindex",
    "accesskey",
    "contenteditable",
    "draggable",
    "spellcheck",
    "translate",
    "role",
];

/// Tags whose text content is emitted without escaping.
const RAW_TEXT_TAGS: &[&str] = &["script", "style"];

/// A child of an [`Element`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Text content, escaped on render (except inside `script`/`style`).
    Text(String),
    /// Pre-rendered markup, emitted verbatim on its own line.
    Raw(String),
    /// A nested element.
    Element(Element),
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// A single attribute. `value == None` is a boolean attribute (`required`,
/// `disabled`, ...) rendered by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

impl Attr {
    fn rank(&self) -> usize {
        if let Some(pos) = GLOBAL_ATTRS.iter().position(|g| *g == self.name) {
            pos
        } else if self.name.starts_with("data-") {
            GLOBAL_ATTRS.len()
        } else if self.name.starts_with("aria-") {
            GLOBAL_ATTRS.len() + 1
        } else {
            GLOBAL_ATTRS.len() + 2
        }
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: Vec<Attr>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Whether this is one of the [`VOID_TAGS`].
    pub fn is_void(&self) -> bool {
        VOID_TAGS.contains(&self.tag.as_str())
    }

    /// Get an attribute value. Boolean attributes yield `Some("")`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_deref().unwrap_or(""))
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Set or replace an attribute in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match self.attrs.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => self.attrs.push(Attr { name, value }),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|a| a.name != name);
    }

    /// Append a child node.
    pub fn push(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    // ------------------------------------------------------------------
    // Chained builders
    // ------------------------------------------------------------------

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, Some(value.into()));
        self
    }

    /// Set an attribute only when `value` is `Some`.
    pub fn attr_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.attr(name, v),
            None => self,
        }
    }

    /// Boolean attribute, rendered by name only.
    pub fn flag(mut self, name: impl Into<String>) -> Self {
        self.set_attr(name, None);
        self
    }

    /// Boolean attribute when `on` holds, otherwise removed.
    pub fn flag_if(mut self, name: &str, on: bool) -> Self {
        if on {
            self.set_attr(name, None);
        } else {
            self.remove_attr(name);
        }
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    /// Replace the class list.
    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    /// Append classes to the class list, skipping ones already present.
    pub fn add_class(mut self, class: &str) -> Self {
        let mut classes: Vec<String> = self
            .get_attr("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        for c in class.split_whitespace() {
            if !classes.iter().any(|existing| existing == c) {
                classes.push(c.to_string());
            }
        }
        if !classes.is_empty() {
            self.set_attr("class", Some(classes.join(" ")));
        }
        self
    }

    pub fn style(self, style: impl Into<String>) -> Self {
        self.attr("style", style)
    }

    pub fn title(self, title: impl Into<String>) -> Self {
        self.attr("title", title)
    }

    pub fn lang(self, lang: impl Into<String>) -> Self {
        self.attr("lang", lang)
    }

    pub fn dir(self, dir: impl Into<String>) -> Self {
        self.attr("dir", dir)
    }

    pub fn hidden(self, hidden: bool) -> Self {
        self.flag_if("hidden", hidden)
    }

    pub fn tabindex(self, index: i32) -> Self {
        self.attr("tabindex", index.to_string())
    }

    pub fn role(self, role: impl Into<String>) -> Self {
        self.attr("role", role)
    }

    pub fn href(self, href: impl Into<String>) -> Self {
        self.attr("href", href)
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    pub fn value(self, value: impl Into<String>) -> Self {
        self.attr("value", value)
    }

    pub fn kind(self, kind: impl Into<String>) -> Self {
        self.attr("type", kind)
    }

    pub fn onclick(self, js: impl Into<String>) -> Self {
        self.attr("onclick", js)
    }

    /// `data-{key}` attribute.
    pub fn data(self, key: &str, value: impl Into<String>) -> Self {
        self.attr(format!("data-{key}"), value)
    }

    /// `aria-{key}` attribute.
    pub fn aria(self, key: &str, value: impl Into<String>) -> Self {
        self.attr(format!("aria-{key}"), value)
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.push(node);
        self
    }

    /// Append a child only when present.
    pub fn child_opt(self, node: Option<impl Into<Node>>) -> Self {
        match node {
            Some(n) => self.child(n),
            None => self,
        }
    }

    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Append pre-rendered markup.
    pub fn raw(mut self, markup: impl Into<String>) -> Self {
        self.children.push(Node::Raw(markup.into()));
        self
    }

    /// Append a stylesheet's rendered rules as text, separated from any
    /// existing text by a newline.
    pub fn css(self, sheet: &Stylesheet) -> Self {
        let rules = sheet.render_rules();
        if rules.is_empty() {
            return self;
        }
        let has_text = self.children.iter().any(|n| matches!(n, Node::Text(_)));
        if has_text {
            self.text(format!("\n{rules}"))
        } else {
            self.text(rules)
        }
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Render at nesting depth 0.
    pub fn render(&self) -> String {
        self.render_at(0)
    }

    pub fn render_at(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write_to(&mut out, depth);
        out
    }

    fn write_to(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        out.push_str(&pad);
        out.push('<');
        out.push_str(&self.tag);
        self.write_attrs(out);
        out.push('>');

        if self.is_void() {
            return;
        }

        let raw_text = RAW_TEXT_TAGS.contains(&self.tag.as_str());
        let mut has_text = false;
        let mut has_block = false;

        for node in &self.children {
            match node {
                Node::Text(text) => {
                    has_text = true;
                    if raw_text {
                        out.push_str(text);
                    } else {
                        out.push_str(&html_escape::encode_text(text));
                    }
                }
                Node::Element(el) => {
                    has_block = true;
                    out.push('\n');
                    el.write_to(out, depth + 1);
                }
                Node::Raw(markup) => {
                    has_block = true;
                    out.push('\n');
                    out.push_str(&"  ".repeat(depth + 1));
                    out.push_str(markup);
                }
            }
        }

        if has_block && !has_text {
            out.push('\n');
            out.push_str(&pad);
        }

        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }

    fn write_attrs(&self, out: &mut String) {
        let mut ordered: Vec<&Attr> = self.attrs.iter().collect();
        ordered.sort_by_key(|a| a.rank());
        for attr in ordered {
            out.push(' ');
            out.push_str(&attr.name);
            if let Some(value) = &attr.value {
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(value));
                out.push('"');
            }
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
