//! Form fields, buttons and ready-made forms.

use crate::element::{Element, Node};
use crate::tags::{button, div, form, input, label, option, select, small, span, textarea};

/// Horizontal alignment of a [`form_actions`] row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Wrap an input with its label and optional help text.
///
/// The input gains the `form-control` class, and `required` when asked. A
/// required field's label ends with a red asterisk.
pub fn form_group(label_text: &str, input: Element, help: Option<&str>, required: bool) -> Element {
    let mut lbl = label().class("form-label").text(label_text);
    if required {
        lbl = lbl.text(" ").child(span().class("text-danger").text("*"));
    }

    let input = input.add_class("form-control").flag_if("required", required);

    div()
        .class("form-group")
        .child(lbl)
        .child(input)
        .child_opt(help.map(|h| small().class("form-text text-muted").text(h)))
}

/// A single input plus the label and help text that decide whether it gets
/// wrapped in a [`form_group`].
#[derive(Debug, Clone)]
pub struct Field {
    input: Element,
    label: Option<String>,
    help: Option<String>,
    required: bool,
}

impl Field {
    fn new(input: Element) -> Self {
        Self {
            input,
            label: None,
            help: None,
            required: false,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.input = self.input.attr("placeholder", placeholder);
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.input = self.input.attr("value", value);
        self
    }

    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.input = self.input.attr(name, value);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.input = self.input.id(id);
        self
    }

    /// Labelled fields become a form group, bare ones stay a lone input.
    pub fn build(self) -> Element {
        match self.label {
            Some(label) => form_group(&label, self.input, self.help.as_deref(), self.required),
            None => self.input.flag_if("required", self.required),
        }
    }
}

impl From<Field> for Node {
    fn from(field: Field) -> Self {
        Node::Element(field.build())
    }
}

pub fn text_field(name: &str) -> Field {
    Field::new(input().name(name))
}

pub fn email_field(name: &str) -> Field {
    Field::new(input().kind("email").name(name)).placeholder("Enter your email")
}

pub fn password_field(name: &str) -> Field {
    Field::new(input().kind("password").name(name)).placeholder("Enter your password")
}

pub fn textarea_field(name: &str, rows: u32) -> Field {
    Field::new(textarea().name(name).attr("rows", rows.to_string()))
}

/// A `type="search"` input. It carries `form-control` even without a label.
pub fn search_field(name: &str) -> Field {
    let el = input().kind("search").name(name).id(name).class("form-control");
    Field::new(el).placeholder("Search...")
}

const RANGE_STYLE: &str = "width: 100%; height: 0.5rem; border-radius: 0.25rem; \
    background: #dee2e6; outline: none; appearance: none; -webkit-appearance: none;";

/// A slider over `min..=max` starting at `value`.
pub fn range_field(name: &str, min: i64, max: i64, value: i64) -> Field {
    let el = input()
        .kind("range")
        .name(name)
        .id(name)
        .style(RANGE_STYLE)
        .attr("min", min.to_string())
        .attr("max", max.to_string())
        .attr("value", value.to_string());
    Field::new(el)
}

/// A select over `(value, text)` options.
pub fn select_field(name: &str, options: &[(&str, &str)], selected: Option<&str>) -> Field {
    let select_el = select().name(name).children(options.iter().map(|(value, text)| {
        option()
            .value(*value)
            .flag_if("selected", selected == Some(*value))
            .text(*text)
    }));
    Field::new(select_el)
}

pub fn file_field(name: &str, accept: Option<&str>, multiple: bool) -> Field {
    let el = input()
        .kind("file")
        .name(name)
        .class("form-control-file")
        .attr_opt("accept", accept)
        .flag_if("multiple", multiple);
    Field::new(el)
}

pub fn checkbox_field(name: &str, label_text: &str, checked: bool) -> Element {
    div()
        .class("form-check")
        .child(
            input()
                .kind("checkbox")
                .name(name)
                .value("1")
                .class("form-check-input")
                .flag_if("checked", checked),
        )
        .child(label().class("form-check-label").text(label_text))
}

/// One `.form-check` per `(value, text)` option.
pub fn radio_field(name: &str, options: &[(&str, &str)], selected: Option<&str>) -> Element {
    div()
        .class("form-group")
        .children(options.iter().map(|(value, text)| {
            div()
                .class("form-check")
                .child(
                    input()
                        .kind("radio")
                        .name(name)
                        .value(*value)
                        .class("form-check-input")
                        .flag_if("checked", selected == Some(*value)),
                )
                .child(label().class("form-check-label").text(*text))
        }))
}

pub fn hidden_field(name: &str, value: &str) -> Element {
    input().kind("hidden").name(name).value(value)
}

pub fn submit_button(text: &str) -> Element {
    button().kind("submit").class("btn btn-primary").text(text)
}

pub fn reset_button(text: &str) -> Element {
    button().kind("reset").class("btn btn-secondary").text(text)
}

pub fn form_actions(buttons: impl IntoIterator<Item = Element>, alignment: Alignment) -> Element {
    let class = match alignment {
        Alignment::Left => "form-actions",
        Alignment::Right => "form-actions text-right",
        Alignment::Center => "form-actions text-center",
    };
    div().class(class).children(buttons)
}

pub fn login_form(action: &str) -> Element {
    form()
        .attr("action", action)
        .attr("method", "post")
        .child(email_field("email").label("Email").required())
        .child(password_field("password").label("Password").required())
        .child(div().class("mb-3").child(checkbox_field("remember", "Remember me", false)))
        .child(form_actions([submit_button("Login")], Alignment::Right))
}

pub fn contact_form(action: &str) -> Element {
    form()
        .attr("action", action)
        .attr("method", "post")
        .child(text_field("name").label("Name").required())
        .child(email_field("email").label("Email").required())
        .child(text_field("subject").label("Subject").required())
        .child(textarea_field("message", 5).label("Message").required())
        .child(form_actions(
            [submit_button("Send Message"), reset_button("Clear")],
            Alignment::Right,
        ))
}

pub fn search_form(action: &str, placeholder: &str, button_text: &str) -> Element {
    form()
        .class("form-inline")
        .attr("action", action)
        .child(
            input()
                .kind("search")
                .name("q")
                .attr("placeholder", placeholder)
                .class("form-control mr-2"),
        )
        .child(
            button()
                .kind("submit")
                .class("btn btn-outline-success")
                .text(button_text),
        )
}

pub fn inline_form(action: &str, fields: impl IntoIterator<Item = Node>) -> Element {
    form()
        .class("form-inline")
        .attr("action", action)
        .attr("method", "post")
        .children(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_group() {
        let html = text_field("name").label("Name").required().build().render();
        assert_eq!(
            html,
            "<div class=\"form-group\">\n  <label class=\"form-label\">Name \n    <span class=\"text-danger\">*</span></label>\n  <input class=\"form-control\" type=\"text\" name=\"name\" required>\n</div>"
        );
    }

    #[test]
    fn test_bare_field_is_plain_input() {
        let el = email_field("email").build();
        assert_eq!(el.tag(), "input");
        assert_eq!(el.get_attr("placeholder"), Some("Enter your email"));
        assert!(!el.has_class("form-control"));
    }

    #[test]
    fn test_help_text() {
        let el = password_field("pw").label("Password").help("8+ chars").build();
        let html = el.render();
        assert!(html.contains("<small class=\"form-text text-muted\">8+ chars</small>"));
        assert!(html.contains("placeholder=\"Enter your password\""));
    }

    #[test]
    fn test_select_marks_selected() {
        let html = select_field("c", &[("fr", "France"), ("jp", "Japan")], Some("jp"))
            .build()
            .render();
        assert!(html.contains("<option value=\"fr\">France</option>"));
        assert!(html.contains("<option value=\"jp\" selected>Japan</option>"));
    }

    #[test]
    fn test_search_field() {
        let bare = search_field("q").build();
        assert_eq!(bare.get_attr("type"), Some("search"));
        assert_eq!(bare.get_attr("id"), Some("q"));
        assert_eq!(bare.get_attr("placeholder"), Some("Search..."));
        assert!(bare.has_class("form-control"));

        let html = search_field("q").label("Find").placeholder("Find files").build().render();
        assert!(html.starts_with("<div class=\"form-group\">"));
        assert!(html.contains("<input id=\"q\" class=\"form-control\" type=\"search\""));
        assert!(html.contains("placeholder=\"Find files\""));
    }

    #[test]
    fn test_range_field() {
        let el = range_field("volume", 0, 11, 5).build();
        assert_eq!(el.get_attr("type"), Some("range"));
        assert_eq!(el.get_attr("min"), Some("0"));
        assert_eq!(el.get_attr("max"), Some("11"));
        assert_eq!(el.get_attr("value"), Some("5"));
        assert!(el.get_attr("style").is_some_and(|s| s.starts_with("width: 100%;")));

        let html = range_field("volume", -10, 10, 0).label("Volume").build().render();
        assert!(html.contains("<label class=\"form-label\">Volume</label>"));
        assert!(html.contains("min=\"-10\""));
    }

    #[test]
    fn test_file_field_keeps_own_class() {
        let el = file_field("upload", Some(".csv"), true).label("Data").build();
        let html = el.render();
        assert!(html.contains("class=\"form-control-file form-control\""));
        assert!(html.contains("accept=\".csv\" multiple"));
    }

    #[test]
    fn test_checkbox_and_radio() {
        let cb = checkbox_field("remember", "Remember me", true);
        assert!(cb.render().contains("value=\"1\" checked"));

        let radios = radio_field("size", &[("s", "Small"), ("l", "Large")], Some("l"));
        assert_eq!(radios.child_nodes().len(), 2);
        assert!(radios.render().contains("value=\"l\" checked"));
    }

    #[test]
    fn test_form_actions_alignment() {
        let el = form_actions([submit_button("Go")], Alignment::Center);
        assert_eq!(el.get_attr("class"), Some("form-actions text-center"));
    }

    #[test]
    fn test_contact_form() {
        let html = contact_form("/contact").render();
        assert!(html.starts_with("<form method=\"post\" action=\"/contact\">"));
        assert!(html.contains("rows=\"5\""));
        assert!(html.contains(">Send Message</button>"));
        assert!(html.contains("<button class=\"btn btn-secondary\" type=\"reset\">Clear</button>"));
        assert!(html.contains("form-actions text-right"));
    }

    #[test]
    fn test_search_form() {
        let el = search_form("/search", "Search...", "Search");
        assert_eq!(el.get_attr("method"), Some("get"));
        assert!(el.render().contains("name=\"q\""));
    }
}
