//! Typed HTML and CSS builders.
//!
//! Pages are assembled from [`Element`] trees built with the tag
//! constructors in [`tags`], styled with [`css`] rules and the built-in
//! [`framework`] stylesheet, and composed from the [`components`] library.
//!
//! ```
//! use tissage::prelude::*;
//!
//! let page = div().class("container").child(h1().text("Hello"));
//! assert_eq!(page.render(), "<div class=\"container\">\n  <h1>Hello</h1>\n</div>");
//! ```

pub mod components;
pub mod css;
pub mod element;
pub mod framework;
pub mod script;
pub mod tags;

pub use element::{Attr, Element, Node, VOID_TAGS};

pub mod prelude {
    pub use crate::css::{Css, MediaQuery, Rule, Stylesheet};
    pub use crate::element::{Element, Node};
    pub use crate::framework::framework_css;
    pub use crate::tags::*;
}
