use std::collections::HashMap;

use tissage::prelude::*;
use tracing::{debug, warn};

type Render = Box<dyn Fn() -> Element>;

/// Maps page names to content renderers. Unknown and empty names resolve to
/// the fallback page.
pub struct Router {
    routes: HashMap<String, Render>,
    order: Vec<String>,
    fallback: String,
}

impl Router {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            routes: HashMap::new(),
            order: Vec::new(),
            fallback: fallback.into(),
        }
    }

    pub fn route(
        mut self,
        page: impl Into<String>,
        render: impl Fn() -> Element + 'static,
    ) -> Self {
        let page = page.into();
        if self.routes.insert(page.clone(), Box::new(render)).is_none() {
            self.order.push(page);
        }
        self
    }

    /// Registered pages, in registration order.
    pub fn pages(&self) -> &[String] {
        &self.order
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn contains(&self, page: &str) -> bool {
        self.routes.contains_key(page)
    }

    /// The page actually served for `page`.
    pub fn target<'a>(&'a self, page: &'a str) -> &'a str {
        if self.routes.contains_key(page) {
            page
        } else {
            if !page.is_empty() {
                warn!(page, fallback = %self.fallback, "unknown page");
            }
            &self.fallback
        }
    }

    pub fn resolve(&self, page: &str) -> Element {
        let target = self.target(page);
        debug!(page = target, "rendering page");
        match self.routes.get(target) {
            Some(render) => render(),
            None => div()
                .class("app-container")
                .child(h1().text("Page not found"))
                .child(p().text(format!("No page named '{target}'."))),
        }
    }
}

/// Page name carried by a clicked link's `data-page` attribute.
pub fn page_from_link(data_page: Option<&str>) -> &str {
    data_page
        .map(|p| p.trim().trim_start_matches(['/', '#']))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> Router {
        Router::new("home")
            .route("home", || h1().text("Home"))
            .route("about", || h1().text("About"))
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        let r = router();
        assert_eq!(r.resolve("about").render(), "<h1>About</h1>");
        assert_eq!(r.resolve("nope").render(), "<h1>Home</h1>");
        assert_eq!(r.resolve("").render(), "<h1>Home</h1>");
        assert_eq!(r.target("nope"), "home");
        assert_eq!(r.pages(), ["home", "about"]);
    }

    #[test]
    fn test_missing_fallback() {
        let r = Router::new("home");
        assert!(r.resolve("x").render().contains("No page named 'home'."));
    }

    #[test]
    fn test_reregistering_keeps_order() {
        let r = router().route("home", || h1().text("Home 2"));
        assert_eq!(r.pages(), ["home", "about"]);
        assert_eq!(r.resolve("home").render(), "<h1>Home 2</h1>");
    }

    #[test]
    fn test_page_from_link() {
        assert_eq!(page_from_link(Some("/about")), "about");
        assert_eq!(page_from_link(Some("#")), "");
        assert_eq!(page_from_link(Some(" text-editor ")), "text-editor");
        assert_eq!(page_from_link(None), "");
    }
}
