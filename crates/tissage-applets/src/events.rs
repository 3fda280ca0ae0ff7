//! Listener bookkeeping.
//!
//! Handlers are keyed `"{element_id}_{event}"`, or `"document_{event}"` for
//! document-level listeners, so registering a handler for the same key
//! replaces the previous one instead of stacking duplicates.

use std::collections::HashMap;

use tracing::trace;

/// Minimum gap between two accepted double clicks on the file list.
pub const DOUBLE_CLICK_DEBOUNCE_MS: f64 = 500.0;

/// Events that may carry a key name (`"Escape"`, `"Enter"`, ...).
pub trait KeyedEvent {
    fn key(&self) -> Option<String>;
}

pub type Handler<E> = Box<dyn FnMut(&E)>;

pub fn listener_key(element_id: Option<&str>, event: &str) -> String {
    match element_id {
        Some(id) => format!("{id}_{event}"),
        None => format!("document_{event}"),
    }
}

pub struct EventRegistry<E> {
    handlers: HashMap<String, Handler<E>>,
}

impl<E> Default for EventRegistry<E> {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }
}

impl<E: 'static> EventRegistry<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on element `id`; returns the key.
    pub fn on(&mut self, id: &str, event: &str, handler: impl FnMut(&E) + 'static) -> String {
        self.insert(listener_key(Some(id), event), Box::new(handler))
    }

    pub fn on_document(&mut self, event: &str, handler: impl FnMut(&E) + 'static) -> String {
        self.insert(listener_key(None, event), Box::new(handler))
    }

    pub fn on_click(&mut self, id: &str, handler: impl FnMut(&E) + 'static) -> String {
        self.on(id, "click", handler)
    }

    pub fn on_submit(&mut self, id: &str, handler: impl FnMut(&E) + 'static) -> String {
        self.on(id, "submit", handler)
    }

    /// Element-level when `id` is given, document-level otherwise.
    pub fn on_keydown(&mut self, id: Option<&str>, handler: impl FnMut(&E) + 'static) -> String {
        self.insert(listener_key(id, "keydown"), Box::new(handler))
    }

    /// Document-level keydown that only fires for `Escape`.
    pub fn on_escape(&mut self, mut handler: impl FnMut(&E) + 'static) -> String
    where
        E: KeyedEvent,
    {
        self.on_document("keydown", move |event: &E| {
            if event.key().as_deref() == Some("Escape") {
                handler(event);
            }
        })
    }

    fn insert(&mut self, key: String, handler: Handler<E>) -> String {
        if self.handlers.insert(key.clone(), handler).is_some() {
            trace!(%key, "replaced listener");
        }
        key
    }

    pub fn contains(&self, key: &str) -> bool {
        self.handlers.contains_key(key)
    }

    pub fn remove(&mut self, id: &str, event: &str) -> bool {
        self.handlers.remove(&listener_key(Some(id), event)).is_some()
    }

    pub fn remove_document(&mut self, event: &str) -> bool {
        self.handlers.remove(&listener_key(None, event)).is_some()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler registered under `key`. Returns whether one ran.
    pub fn dispatch(&mut self, key: &str, event: &E) -> bool {
        match self.handlers.get_mut(key) {
            Some(handler) => {
                handler(event);
                true
            }
            None => false,
        }
    }

    /// Take a handler out so it can run while the registry is free to be
    /// modified; pair with [`EventRegistry::restore`].
    pub fn take(&mut self, key: &str) -> Option<Handler<E>> {
        self.handlers.remove(key)
    }

    /// Put a taken handler back unless something was registered meanwhile.
    pub fn restore(&mut self, key: String, handler: Handler<E>) {
        self.handlers.entry(key).or_insert(handler);
    }
}

/// Accepts an event only if the previous accepted one is at least
/// `window_ms` old.
#[derive(Debug, Clone)]
pub struct Debounce {
    window_ms: f64,
    last: Option<f64>,
}

impl Debounce {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms,
            last: None,
        }
    }

    pub fn accept(&mut self, now_ms: f64) -> bool {
        if let Some(last) = self.last
            && now_ms - last < self.window_ms
        {
            return false;
        }
        self.last = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Key(&'static str);

    impl KeyedEvent for Key {
        fn key(&self) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn test_keys() {
        assert_eq!(listener_key(Some("fe-up"), "click"), "fe-up_click");
        assert_eq!(listener_key(None, "keydown"), "document_keydown");
    }

    #[test]
    fn test_replacing_a_handler() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::<()>::new();

        let h = hits.clone();
        registry.on_click("save", move |_| h.borrow_mut().push("first"));
        let h = hits.clone();
        let key = registry.on_click("save", move |_| h.borrow_mut().push("second"));

        assert_eq!(registry.len(), 1);
        assert!(registry.dispatch(&key, &()));
        assert!(!registry.dispatch("missing_click", &()));
        assert_eq!(*hits.borrow(), ["second"]);
    }

    #[test]
    fn test_escape_filter() {
        let count = Rc::new(RefCell::new(0));
        let mut registry = EventRegistry::<Key>::new();
        let c = count.clone();
        let key = registry.on_escape(move |_| *c.borrow_mut() += 1);

        registry.dispatch(&key, &Key("Enter"));
        registry.dispatch(&key, &Key("Escape"));
        assert_eq!(*count.borrow(), 1);
        assert!(registry.remove_document("keydown"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_take_and_restore() {
        let mut registry = EventRegistry::<()>::new();
        let key = registry.on_submit("form", |_| {});
        let handler = registry.take(&key).unwrap();
        assert!(!registry.contains(&key));
        registry.restore(key.clone(), handler);
        assert!(registry.contains("form_submit"));
        assert!(registry.remove("form", "submit"));
    }

    #[test]
    fn test_debounce() {
        let mut d = Debounce::new(DOUBLE_CLICK_DEBOUNCE_MS);
        assert!(d.accept(1000.0));
        assert!(!d.accept(1400.0));
        assert!(d.accept(1500.0));
        assert!(!d.accept(1999.0));
    }
}
