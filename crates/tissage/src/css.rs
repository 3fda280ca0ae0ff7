//! CSS rule builder.
//!
//! ```
//! use tissage::css::{Css, Stylesheet};
//!
//! let sheet = Stylesheet::new()
//!     .rule(Css::class("card").prop("border_radius", "8px"))
//!     .media(Css::media("max-width: 768px").rule(Css::class("card").prop("padding", "0")));
//! assert!(sheet.to_css().starts_with(".card {\n  border-radius: 8px;\n}"));
//! ```

use std::fmt;

/// A selector plus its declarations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    selector: String,
    props: Vec<(String, String)>,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            props: Vec::new(),
        }
    }

    /// Add a declaration. `snake_case` names are written as `kebab-case`.
    pub fn prop(mut self, name: &str, value: impl Into<String>) -> Self {
        self.props.push((name.replace('_', "-"), value.into()));
        self
    }

    pub fn props<'a, I>(mut self, props: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (name, value) in props {
            self = self.prop(name, value);
        }
        self
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Render at the given depth. Empty rules render as an empty string.
    pub fn render(&self, depth: usize) -> String {
        if self.props.is_empty() {
            return String::new();
        }
        let pad = "  ".repeat(depth);
        let body = self
            .props
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ");
        format!("{pad}{} {{\n{pad}  {body};\n{pad}}}", self.selector)
    }
}

/// `@media (condition) { ... }` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaQuery {
    condition: String,
    items: Vec<Item>,
}

impl MediaQuery {
    pub fn new(condition: impl Into<String>) -> Self {
        Self {
            condition: condition.into(),
            items: Vec::new(),
        }
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.items.push(Item::Rule(rule));
        self
    }

    pub fn media(mut self, query: MediaQuery) -> Self {
        self.items.push(Item::Media(query));
        self
    }

    pub fn render(&self, depth: usize) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let pad = "  ".repeat(depth);
        let mut parts = vec![format!("{pad}@media ({}) {{", self.condition)];
        parts.extend(
            self.items
                .iter()
                .map(|item| item.render(depth + 1))
                .filter(|s| !s.is_empty()),
        );
        parts.push(format!("{pad}}}"));
        parts.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Item {
    Rule(Rule),
    Media(MediaQuery),
    Raw(String),
}

impl Item {
    fn render(&self, depth: usize) -> String {
        match self {
            Item::Rule(r) => r.render(depth),
            Item::Media(m) => m.render(depth),
            Item::Raw(css) => css.clone(),
        }
    }
}

/// Selector helpers.
pub struct Css;

impl Css {
    pub fn element(tag: &str) -> Rule {
        Rule::new(tag)
    }

    /// `.name`, unless the dot is already there.
    pub fn class(name: &str) -> Rule {
        if name.starts_with('.') {
            Rule::new(name)
        } else {
            Rule::new(format!(".{name}"))
        }
    }

    /// `#name`, unless the hash is already there.
    pub fn id(name: &str) -> Rule {
        if name.starts_with('#') {
            Rule::new(name)
        } else {
            Rule::new(format!("#{name}"))
        }
    }

    pub fn selector(selector: &str) -> Rule {
        Rule::new(selector)
    }

    pub fn media(condition: &str) -> MediaQuery {
        MediaQuery::new(condition)
    }
}

/// An ordered collection of rules, media queries and raw CSS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    items: Vec<Item>,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.items.push(Item::Rule(rule));
        self
    }

    pub fn rules(mut self, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.items.extend(rules.into_iter().map(Item::Rule));
        self
    }

    pub fn media(mut self, query: MediaQuery) -> Self {
        self.items.push(Item::Media(query));
        self
    }

    pub fn raw(mut self, css: impl Into<String>) -> Self {
        self.items.push(Item::Raw(css.into()));
        self
    }

    pub fn push_rule(&mut self, rule: Rule) {
        self.items.push(Item::Rule(rule));
    }

    /// Append every item of `other`.
    pub fn extend(mut self, other: Stylesheet) -> Self {
        self.items.extend(other.items);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn rendered(&self) -> impl Iterator<Item = String> + '_ {
        self.items
            .iter()
            .map(|item| item.render(0))
            .filter(|s| !s.is_empty())
    }

    /// Non-empty items separated by a blank line.
    pub fn to_css(&self) -> String {
        self.rendered().collect::<Vec<_>>().join("\n\n")
    }

    /// Non-empty items separated by a single newline, as embedded in `<style>`.
    pub fn render_rules(&self) -> String {
        self.rendered().collect::<Vec<_>>().join("\n")
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::style;

    #[test]
    fn test_rule_format() {
        let rule = Css::element("body")
            .prop("font_family", "sans-serif")
            .prop("margin", "0");
        assert_eq!(
            rule.render(0),
            "body {\n  font-family: sans-serif; margin: 0;\n}"
        );
    }

    #[test]
    fn test_empty_rule_renders_nothing() {
        assert_eq!(Css::class("x").render(0), "");
        assert_eq!(Css::media("print").render(0), "");
    }

    #[test]
    fn test_selector_prefixes() {
        assert_eq!(Css::class("btn").selector(), ".btn");
        assert_eq!(Css::class(".btn").selector(), ".btn");
        assert_eq!(Css::id("main").selector(), "#main");
        assert_eq!(Css::id("#main").selector(), "#main");
    }

    #[test]
    fn test_media_query_indents_rules() {
        let mq = Css::media("max-width: 768px").rule(Css::class("col").prop("width", "100%"));
        assert_eq!(
            mq.render(0),
            "@media (max-width: 768px) {\n  .col {\n    width: 100%;\n  }\n}"
        );
    }

    #[test]
    fn test_stylesheet_skips_empty_and_keeps_raw() {
        let sheet = Stylesheet::new()
            .rule(Css::class("a").prop("color", "red"))
            .rule(Css::class("empty"))
            .raw("/* raw */");
        assert_eq!(sheet.to_css(), ".a {\n  color: red;\n}\n\n/* raw */");
    }

    #[test]
    fn test_style_element_merges_text_and_rules() {
        let sheet = Stylesheet::new().rule(Css::element("p").prop("margin", "0"));
        let html = style().text("h1 { color: red; }").css(&sheet).render();
        assert_eq!(
            html,
            "<style>h1 { color: red; }\np {\n  margin: 0;\n}</style>"
        );
    }
}
