//! Values embedded in inline scripts and event handler attributes.

/// `value` as a JavaScript string literal.
///
/// The literal is JSON-encoded with `facet-json`, and `</` is written as
/// `<\/` so the value cannot close an enclosing `<script>` element.
pub fn js_string(value: &str) -> String {
    // a plain string always serializes
    let json = facet_json::to_string(&value.to_string()).unwrap_or_else(|_| "\"\"".to_string());
    json.replace("</", "<\\/")
}
