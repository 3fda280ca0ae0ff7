//! One constructor per HTML tag.
//!
//! A few tags start with default attributes: `button` is `type="button"`,
//! `input` is `type="text"`, `form` uses `method="get"`, `script` is
//! `type="text/javascript"`, `html` is `lang="en"`, `track` is
//! `kind="subtitles"` and `area` is `shape="rect"`.

use crate::element::Element;

macro_rules! tags {
    ($($name:ident $(=> [$($attr:literal = $value:literal),* $(,)?])?;)*) => {
        $(
            #[doc = concat!("`<", stringify!($name), ">` element")]
            pub fn $name() -> Element {
                #[allow(unused_mut)]
                let mut el = Element::new(stringify!($name));
                $($(el.set_attr($attr, Some($value.to_string()));)*)?
                el
            }
        )*
    };
}

tags! {
    // Structure
    div; span; p; h1; h2; h3; h4; h5; h6;
    nav; header; footer; main; section; article; aside;
    html => ["lang" = "en"];
    head; body; title; meta; link; style; base; noscript;
    script => ["type" = "text/javascript"];
    // Inline text
    a; br; hr; b; i; strong; em; u; s; small; mark; del; ins; sub; sup;
    code; pre; kbd; samp; var; cite; q; abbr; dfn; time;
    blockquote; address; figure; figcaption;
    // Lists
    ul; ol; li; dl; dt; dd;
    // Tables
    table; caption; colgroup; col; thead; tbody; tfoot; tr; td; th;
    // Forms
    button => ["type" = "button"];
    input => ["type" = "text"];
    form => ["method" = "get"];
    label; select; option; textarea; fieldset; legend; datalist; output;
    progress; meter;
    // Media
    img; video; audio; canvas; iframe; picture; source; map;
    track => ["kind" = "subtitles"];
    area => ["shape" = "rect"];
    // Interactive
    details; summary; dialog;
}

/// `<!DOCTYPE html>` followed by an `html` element holding `head` and `body`.
pub fn document(head: Element, body: Element) -> String {
    format!("<!DOCTYPE html>\n{}", html().child(head).child(body).render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(button().render(), "<button type=\"button\"></button>");
        assert_eq!(form().get_attr("method"), Some("get"));
        assert_eq!(html().get_attr("lang"), Some("en"));
        assert_eq!(track().render(), "<track kind=\"subtitles\">");
        assert_eq!(area().get_attr("shape"), Some("rect"));
    }

    #[test]
    fn test_plain_tag_has_no_attrs() {
        assert!(section().attrs().is_empty());
        assert_eq!(main().tag(), "main");
    }

    #[test]
    fn test_document() {
        let doc = document(head().child(title().text("Hi")), body());
        assert!(doc.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(doc.contains("    <title>Hi</title>"));
        assert!(doc.ends_with("</html>"));
    }
}
