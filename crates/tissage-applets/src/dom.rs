//! Browser glue: `localStorage`, CodeMirror, mounting and event wiring.
//!
//! Applet state lives in thread-locals (wasm is single-threaded). DOM
//! listeners only forward to the [`EventRegistry`], so re-mounting an applet
//! swaps handlers instead of stacking them.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::sync::Once;

use tissage_vfs::{STORAGE_KEY, Storage, StorageError, VirtualFileSystem};
use tracing::{debug, info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CustomEvent, CustomEventInit, Event, EventTarget, HtmlSelectElement, KeyboardEvent};

use crate::NAVIGATE_EVENT;
use crate::editor::{self, DISCARD_PROMPT, SAVE_AS_PROMPT, TextEditor, cursor_text};
use crate::error::AppletError;
use crate::events::{DOUBLE_CLICK_DEBOUNCE_MS, Debounce, EventRegistry, KeyedEvent, listener_key};
use crate::explorer::{
    self, EDITOR_OPEN_PAGE, ExplorerAction, ExplorerEffect, FileExplorer, FileSelection,
    RESET_PROMPT,
};
use crate::modal::{FileExplorerModal, modal_styles};
use crate::router::{Router, page_from_link};

const PICKER_ID: &str = "te-file-open-modal";
const EDITOR_PAGE: &str = "text-editor";

thread_local! {
    static EVENTS: RefCell<EventRegistry<Event>> = RefCell::new(EventRegistry::new());
    static EXPLORERS: RefCell<HashMap<String, FileExplorer<LocalStorage>>> =
        RefCell::new(HashMap::new());
    static PICKER: RefCell<Option<FileExplorerModal>> = const { RefCell::new(None) };
    static EDITOR: RefCell<Option<TextEditor>> = const { RefCell::new(None) };
    static CODEMIRROR: RefCell<Option<CodeMirror>> = const { RefCell::new(None) };
    static ROUTER: RefCell<Option<Router>> = const { RefCell::new(None) };
    static PENDING_FILE: RefCell<Option<FileSelection>> = const { RefCell::new(None) };
    static DOUBLE_CLICK: RefCell<Debounce> = RefCell::new(Debounce::new(DOUBLE_CLICK_DEBOUNCE_MS));
    // set while the editor pushes its own content into CodeMirror
    static SYNCING: Cell<bool> = const { Cell::new(false) };
}

#[wasm_bindgen]
extern "C" {
    pub type CodeMirror;

    #[wasm_bindgen(catch, js_name = CodeMirror)]
    fn create_codemirror(
        place: &web_sys::Element,
        options: &JsValue,
    ) -> Result<CodeMirror, JsValue>;

    #[wasm_bindgen(method, js_name = getValue)]
    fn get_value(this: &CodeMirror) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    fn set_value(this: &CodeMirror, value: &str);

    #[wasm_bindgen(method, js_name = setOption)]
    fn set_option(this: &CodeMirror, name: &str, value: &JsValue);

    #[wasm_bindgen(method)]
    fn on(this: &CodeMirror, event: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn undo(this: &CodeMirror);

    #[wasm_bindgen(method)]
    fn redo(this: &CodeMirror);

    #[wasm_bindgen(method, js_name = getCursor)]
    fn get_cursor(this: &CodeMirror) -> CursorPosition;

    type CursorPosition;

    #[wasm_bindgen(method, getter)]
    fn line(this: &CursorPosition) -> u32;

    #[wasm_bindgen(method, getter)]
    fn ch(this: &CursorPosition) -> u32;
}

impl From<AppletError> for JsValue {
    fn from(e: AppletError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

impl KeyedEvent for Event {
    fn key(&self) -> Option<String> {
        self.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key)
    }
}

// ----------------------------------------------------------------------------
// Storage
// ----------------------------------------------------------------------------

/// The snapshot slot in `window.localStorage`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    key: String,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self {
            key: STORAGE_KEY.to_string(),
        }
    }
}

impl LocalStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Browser("no window".to_string()))?
            .local_storage()
            .map_err(browser_error)?
            .ok_or_else(|| StorageError::Browser("localStorage is unavailable".to_string()))
    }
}

fn browser_error(e: JsValue) -> StorageError {
    StorageError::Browser(format!("{e:?}"))
}

impl Storage for LocalStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        let value = self.storage()?.get_item(&self.key).map_err(browser_error)?;
        Ok(value.filter(|v| v != "null"))
    }

    fn save(&mut self, data: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(&self.key, data).map_err(browser_error)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.storage()?.remove_item(&self.key).map_err(browser_error)
    }
}

fn open_vfs() -> Result<VirtualFileSystem<LocalStorage>, AppletError> {
    Ok(VirtualFileSystem::open(LocalStorage::new())?)
}

// ----------------------------------------------------------------------------
// DOM helpers
// ----------------------------------------------------------------------------

fn document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

fn by_id(id: &str) -> Option<web_sys::Element> {
    document()?.get_element_by_id(id)
}

fn query(selector: &str) -> Option<web_sys::Element> {
    document()?.query_selector(selector).ok().flatten()
}

fn query_all(selector: &str) -> Vec<web_sys::Element> {
    let Some(list) = document().and_then(|d| d.query_selector_all(selector).ok()) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .collect()
}

fn set_text(selector: &str, text: &str) {
    if let Some(el) = query(selector) {
        el.set_text_content(Some(text));
    }
}

fn set_disabled(el: &web_sys::Element, disabled: bool) {
    let _ = if disabled {
        el.set_attribute("disabled", "")
    } else {
        el.remove_attribute("disabled")
    };
}

/// Add a `<style id=...>` to the head once.
fn ensure_styles(id: &str, css: &str) {
    if by_id(id).is_some() {
        return;
    }
    let Some(head) = query("head") else {
        return;
    };
    let markup = tissage::tags::style().id(id).text(css).render();
    let _ = head.insert_adjacent_html("beforeend", &markup);
}

pub fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}

pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// `None` when the user cancels.
pub fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window()?
        .prompt_with_message_and_default(message, default)
        .ok()
        .flatten()
}

/// `data-name` of the `.fe-item-row` an event happened in.
fn row_name(event: &Event) -> Option<String> {
    event
        .target()?
        .dyn_into::<web_sys::Element>()
        .ok()?
        .closest(".fe-item-row")
        .ok()??
        .get_attribute("data-name")
}

// ----------------------------------------------------------------------------
// Event wiring
// ----------------------------------------------------------------------------

fn dispatch(key: &str, event: &Event) {
    let Some(mut handler) = EVENTS.with(|r| r.borrow_mut().take(key)) else {
        return;
    };
    handler(event);
    EVENTS.with(|r| r.borrow_mut().restore(key.to_string(), handler));
}

fn attach(target: &EventTarget, event: &str, key: String) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(move |e: Event| dispatch(&key, &e));
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

/// Route `event` on `el` to `handler`, registered under `name`.
fn bind(
    el: &web_sys::Element,
    name: &str,
    event: &str,
    handler: impl FnMut(&Event) + 'static,
) -> Result<(), JsValue> {
    let key = EVENTS.with(|r| r.borrow_mut().on(name, event, handler));
    let marker = format!("data-bound-{event}");
    if el.has_attribute(&marker) {
        return Ok(());
    }
    el.set_attribute(&marker, "")?;
    attach(el, event, key)
}

fn bind_selector(
    selector: &str,
    event: &str,
    handler: impl FnMut(&Event) + 'static,
) -> Result<(), JsValue> {
    match query(selector) {
        Some(el) => bind(&el, selector, event, handler),
        None => {
            debug!(selector, "no element, listener skipped");
            Ok(())
        }
    }
}

/// Document- or window-level listener, attached once per event name.
fn bind_global(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(&Event) + 'static,
) -> Result<(), JsValue> {
    let attached = EVENTS.with(|r| r.borrow().contains(&listener_key(None, event)));
    let key = EVENTS.with(|r| r.borrow_mut().on_document(event, handler));
    if attached {
        return Ok(());
    }
    attach(target, event, key)
}

/// Ask the app to show `page`.
pub fn request_navigation(page: &str) -> Result<(), JsValue> {
    let detail = js_sys::Object::new();
    js_sys::Reflect::set(&detail, &JsValue::from_str("page"), &JsValue::from_str(page))?;
    let init = CustomEventInit::new();
    init.set_detail(&detail);
    let event = CustomEvent::new_with_event_init_dict(NAVIGATE_EVENT, &init)?;
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    window.dispatch_event(&event)?;
    Ok(())
}

// ----------------------------------------------------------------------------
// Logging
// ----------------------------------------------------------------------------

static LOGGING: Once = Once::new();

#[wasm_bindgen]
pub fn init_logging() {
    LOGGING.call_once(|| {
        tracing_wasm::set_as_global_default_with_config(
            tracing_wasm::WASMLayerConfigBuilder::new()
                .set_max_level(tracing::Level::DEBUG)
                .build(),
        );
    });
}

// ----------------------------------------------------------------------------
// File explorer
// ----------------------------------------------------------------------------

fn with_explorer<T>(id: &str, f: impl FnOnce(&mut FileExplorer<LocalStorage>) -> T) -> Option<T> {
    EXPLORERS.with(|cell| cell.borrow_mut().get_mut(id).map(f))
}

/// Render a file explorer into `#container_id` and wire it up.
#[wasm_bindgen]
pub fn mount_file_explorer(container_id: &str) -> Result<(), JsValue> {
    init_logging();
    let container = by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{container_id}")))?;

    let explorer_id = format!("{container_id}-fe");
    let mut explorer = FileExplorer::new(explorer_id.clone(), open_vfs()?);
    ensure_styles("file-explorer-styles", &explorer::styles().to_css());
    container.set_inner_html(&explorer.render().render());

    EXPLORERS.with(|cell| cell.borrow_mut().insert(explorer_id.clone(), explorer));
    wire_explorer(&explorer_id)?;
    info!(%explorer_id, "file explorer mounted");
    Ok(())
}

fn wire_explorer(id: &str) -> Result<(), JsValue> {
    let scoped = |suffix: &str| format!("#{id} {suffix}");

    let owner = id.to_string();
    bind_selector(&scoped(".fe-btn-new-folder"), "click", move |_| {
        let name = prompt("Enter folder name:", "");
        run_explorer(&owner, ExplorerAction::NewFolder(name));
    })?;

    let owner = id.to_string();
    bind_selector(&scoped(".fe-btn-new-file"), "click", move |_| {
        let name = prompt("Enter file name:", "");
        run_explorer(&owner, ExplorerAction::NewFile(name));
    })?;

    let owner = id.to_string();
    bind_selector(&scoped(".fe-btn-delete"), "click", move |_| {
        if let Some(question) = with_explorer(&owner, |fe| fe.delete_prompt()).flatten()
            && confirm(&question)
        {
            run_explorer(&owner, ExplorerAction::Delete);
        }
    })?;

    let owner = id.to_string();
    bind_selector(&scoped(".fe-btn-up"), "click", move |_| {
        run_explorer(&owner, ExplorerAction::GoUp);
    })?;

    let owner = id.to_string();
    bind_selector(&scoped(".fe-btn-reset"), "click", move |_| {
        if confirm(RESET_PROMPT) {
            run_explorer(&owner, ExplorerAction::Reset);
        }
    })?;

    // rows are re-rendered, so listen on the container
    let list = scoped(".fe-file-list-container");

    let owner = id.to_string();
    bind_selector(&list, "click", move |event| {
        let Some(name) = row_name(event) else {
            return;
        };
        run_explorer(&owner, ExplorerAction::Select(name.clone()));
        if is_picker(&owner) {
            picker_select(&owner, &name);
        }
    })?;

    let owner = id.to_string();
    bind_selector(&list, "dblclick", move |event| {
        event.prevent_default();
        event.stop_propagation();
        let Some(name) = row_name(event) else {
            return;
        };
        if !DOUBLE_CLICK.with(|d| d.borrow_mut().accept(js_sys::Date::now())) {
            debug!(%name, "double click too rapid, ignored");
            return;
        }
        run_explorer(&owner, ExplorerAction::Open(name));
    })?;

    bind_selector(&list, "contextmenu", |event| {
        if row_name(event).is_some() {
            event.prevent_default();
        }
    })
}

fn run_explorer(id: &str, action: ExplorerAction) {
    let effects = with_explorer(id, |fe| fe.apply(action)).unwrap_or_default();
    for effect in effects {
        perform(id, effect);
    }
}

fn perform(id: &str, effect: ExplorerEffect) {
    match effect {
        ExplorerEffect::Refresh => refresh_explorer(id),
        ExplorerEffect::Selection(name) => highlight(id, name.as_deref()),
        ExplorerEffect::Alert(message) => alert(&message),
        ExplorerEffect::Status(message) => info!("{message}"),
        ExplorerEffect::OpenFile(selection) if is_picker(id) => {
            close_picker();
            deliver_to_editor(&selection);
        }
        ExplorerEffect::OpenFile(selection) => {
            PENDING_FILE.with(|p| *p.borrow_mut() = Some(selection));
            if let Err(e) = request_navigation(EDITOR_OPEN_PAGE) {
                warn!("navigation to the editor failed: {e:?}");
            }
        }
    }
}

fn refresh_explorer(id: &str) {
    let Some((rows, path)) = with_explorer(id, |fe| {
        let rows = fe
            .render_rows()
            .iter()
            .map(|row| row.render())
            .collect::<Vec<_>>()
            .join("\n");
        (rows, fe.vfs().path_string())
    }) else {
        return;
    };
    if let Some(body) = query(&format!("#{id} tbody")) {
        body.set_inner_html(&rows);
    }
    set_text(&format!("#{id} .fe-path-display"), &path);
    highlight(id, None);
}

fn highlight(id: &str, selected: Option<&str>) {
    for row in query_all(&format!("#{id} .fe-item-row")) {
        let on = selected.is_some() && row.get_attribute("data-name").as_deref() == selected;
        let class = if on { "fe-item-row selected" } else { "fe-item-row" };
        let _ = row.set_attribute("class", class);
    }
    if let Some(delete) = query(&format!("#{id} .fe-btn-delete")) {
        set_disabled(&delete, selected.is_none());
    }
}

// ----------------------------------------------------------------------------
// File picker modal
// ----------------------------------------------------------------------------

fn is_picker(explorer_id: &str) -> bool {
    PICKER.with(|p| {
        p.borrow()
            .as_ref()
            .is_some_and(|m| m.explorer_id() == explorer_id)
    })
}

fn open_picker() -> Result<(), JsValue> {
    let picker = FileExplorerModal::new(PICKER_ID);
    let explorer_id = picker.explorer_id();
    let mut explorer = FileExplorer::new(explorer_id.clone(), open_vfs()?);

    ensure_styles("modal-system-styles", &modal_styles().to_css());
    ensure_styles("file-explorer-styles", &explorer::styles().to_css());

    if let Some(old) = by_id(PICKER_ID) {
        old.remove();
    }
    let body = query("body").ok_or_else(|| JsValue::from_str("no body"))?;
    body.insert_adjacent_html("beforeend", &picker.render(&mut explorer).render())?;

    let modal = picker.modal().clone();
    EXPLORERS.with(|cell| cell.borrow_mut().insert(explorer_id.clone(), explorer));
    PICKER.with(|p| *p.borrow_mut() = Some(picker));
    wire_explorer(&explorer_id)?;

    bind_selector(&format!("#{}", modal.close_id()), "click", |_| close_picker())?;
    bind_selector(&format!("#{}", modal.cancel_id()), "click", |_| close_picker())?;
    bind_selector(&format!("#{}", modal.confirm_id()), "click", |_| {
        let chosen = PICKER.with(|p| p.borrow_mut().as_mut().and_then(FileExplorerModal::confirm));
        close_picker();
        if let Some(selection) = chosen {
            deliver_to_editor(&selection);
        }
    })?;
    bind_selector(&format!("#{PICKER_ID}"), "click", |event| {
        // clicks on the backdrop itself close the dialog
        let on_overlay = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .is_some_and(|el| el.id() == PICKER_ID);
        if on_overlay {
            close_picker();
        }
    })?;
    if let Some(document) = document() {
        bind_global(&document, "keydown", |event| {
            if event.key().as_deref() == Some("Escape") {
                close_picker();
            }
        })?;
    }

    if let Some(overlay) = by_id(PICKER_ID) {
        overlay.set_attribute("style", "display: flex;")?;
    }
    Ok(())
}

fn picker_select(explorer_id: &str, name: &str) {
    let selected = PICKER.with(|p| {
        EXPLORERS.with(|x| {
            let mut picker = p.borrow_mut();
            let mut explorers = x.borrow_mut();
            match (picker.as_mut(), explorers.get_mut(explorer_id)) {
                (Some(picker), Some(explorer)) => picker.select(explorer, name),
                _ => false,
            }
        })
    });
    if let Some(button) = by_id(&format!("{PICKER_ID}-confirm")) {
        set_disabled(&button, !selected);
    }
}

fn close_picker() {
    PICKER.with(|p| {
        if let Some(picker) = p.borrow_mut().as_mut() {
            picker.cancel();
        }
    });
    if let Some(overlay) = by_id(PICKER_ID) {
        let _ = overlay.set_attribute("style", "display: none;");
    }
}

// ----------------------------------------------------------------------------
// Text editor
// ----------------------------------------------------------------------------

fn with_editor<T>(f: impl FnOnce(&mut TextEditor) -> T) -> Option<T> {
    EDITOR.with(|cell| cell.borrow_mut().as_mut().map(f))
}

fn with_codemirror<T>(f: impl FnOnce(&CodeMirror) -> T) -> Option<T> {
    CODEMIRROR.with(|cell| cell.borrow().as_ref().map(f))
}

/// Render the text editor into `#container_id`. A file handed over by the
/// explorer is opened right away.
#[wasm_bindgen]
pub fn mount_text_editor(container_id: &str) -> Result<(), JsValue> {
    init_logging();
    let container = by_id(container_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{container_id}")))?;

    let mut editor = TextEditor::new(format!("{container_id}-te"));
    if let Some(selection) = PENDING_FILE.with(|p| p.borrow_mut().take()) {
        editor.open_file(&selection);
    }

    ensure_styles("text-editor-styles", &editor::styles().to_css());
    container.set_inner_html(&editor.render().render());

    let options = js_sys::JSON::parse(&editor.codemirror_options_json()?)?;
    EDITOR.with(|cell| *cell.borrow_mut() = Some(editor));

    let codemirror = by_id("te-editor").map(|place| create_codemirror(&place, &options));
    match codemirror {
        Some(Ok(cm)) => {
            let on_change = Closure::<dyn FnMut(JsValue, JsValue)>::new(|_, _| editor_changed());
            cm.on("change", on_change.as_ref().unchecked_ref());
            on_change.forget();

            let on_cursor = Closure::<dyn FnMut(JsValue)>::new(|_| cursor_moved());
            cm.on("cursorActivity", on_cursor.as_ref().unchecked_ref());
            on_cursor.forget();

            CODEMIRROR.with(|cell| *cell.borrow_mut() = Some(cm));
        }
        Some(Err(e)) => warn!("CodeMirror is not available: {e:?}"),
        None => warn!("#te-editor not found"),
    }

    wire_editor()?;
    refresh_editor_ui();
    info!(%container_id, "text editor mounted");
    Ok(())
}

fn wire_editor() -> Result<(), JsValue> {
    bind_selector("#te-new", "click", |_| {
        let modified = with_editor(|ed| ed.is_modified()).unwrap_or(false);
        if modified && !confirm(DISCARD_PROMPT) {
            return;
        }
        with_editor(TextEditor::new_file);
        push_to_codemirror();
        refresh_editor_ui();
    })?;
    bind_selector("#te-open", "click", |_| {
        if let Err(e) = open_picker() {
            alert(&format!("Could not open file picker: {e:?}"));
        }
    })?;
    bind_selector("#te-save", "click", |_| save())?;
    bind_selector("#te-save-as", "click", |_| save_as())?;
    bind_selector("#te-undo", "click", |_| {
        with_codemirror(|cm| cm.undo());
    })?;
    bind_selector("#te-redo", "click", |_| {
        with_codemirror(|cm| cm.redo());
    })?;
    for (index, card) in query_all(".sample-card").into_iter().enumerate() {
        bind(&card, &format!("sample-card-{index}"), "click", |event| {
            let Some(card) = event
                .current_target()
                .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            else {
                return;
            };
            let kind = card.get_attribute("data-type").unwrap_or_default();
            let code = card
                .query_selector("code")
                .ok()
                .flatten()
                .and_then(|c| c.text_content())
                .unwrap_or_default();
            with_editor(|ed| ed.load_sample(code, &kind));
            push_to_codemirror();
            refresh_editor_ui();
        })?;
    }
    bind_selector("#te-language", "change", |event| {
        let Some(select) = event
            .target()
            .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
        else {
            return;
        };
        let value = select.value();
        let mode = with_editor(|ed| {
            ed.select_language(&value);
            ed.mode().to_string()
        });
        if let Some(mode) = mode {
            with_codemirror(|cm| cm.set_option("mode", &JsValue::from_str(&mode)));
        }
        refresh_editor_ui();
    })
}

fn deliver_to_editor(selection: &FileSelection) {
    debug!(path = %selection.path, "opening selection in editor");
    with_editor(|ed| ed.open_file(selection));
    push_to_codemirror();
    refresh_editor_ui();
}

fn editor_changed() {
    if SYNCING.with(Cell::get) {
        return;
    }
    if let Some(value) = with_codemirror(|cm| cm.get_value()) {
        with_editor(|ed| ed.set_content(value));
    }
    refresh_editor_ui();
}

fn cursor_moved() {
    if let Some(text) = with_codemirror(|cm| {
        let pos = cm.get_cursor();
        cursor_text(pos.line(), pos.ch())
    }) {
        set_text("#te-cursor-info", &text);
    }
}

/// Copy the editor buffer and mode into CodeMirror without flagging an edit.
fn push_to_codemirror() {
    let Some((content, mode)) = with_editor(|ed| (ed.content().to_string(), ed.mode().to_string()))
    else {
        return;
    };
    SYNCING.with(|s| s.set(true));
    with_codemirror(|cm| {
        cm.set_value(&content);
        cm.set_option("mode", &JsValue::from_str(&mode));
    });
    SYNCING.with(|s| s.set(false));
}

/// Pick up edits CodeMirror has that the editor state missed.
fn pull_from_codemirror() {
    if let Some(value) = with_codemirror(|cm| cm.get_value()) {
        with_editor(|ed| {
            if ed.content() != value {
                ed.set_content(value);
            }
        });
    }
}

fn refresh_editor_ui() {
    let Some((label, status, language, mode, can_save)) = with_editor(|ed| {
        (
            ed.file_label().to_string(),
            ed.status_text(),
            editor::mode_display_name(ed.mode()),
            ed.mode().to_string(),
            ed.can_save(),
        )
    }) else {
        return;
    };
    set_text("#te-file-info", &label);
    set_text("#te-file-status", status);
    set_text("#te-language-info", &language);
    let select = query("#te-language").and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
    if let Some(select) = select {
        select.set_value(&mode);
    }
    if let Some(button) = query("#te-save") {
        set_disabled(&button, !can_save);
    }
}

fn save() {
    pull_from_codemirror();
    let mut vfs = match open_vfs() {
        Ok(vfs) => vfs,
        Err(e) => {
            alert(&format!("Error saving file: {e}"));
            return;
        }
    };
    match with_editor(|ed| ed.save(&mut vfs)) {
        Some(Ok(path)) => alert(&format!("Saved {path}")),
        Some(Err(AppletError::NoCurrentFile)) => save_as(),
        Some(Err(AppletError::SaveInProgress)) => debug!("save already running"),
        Some(Err(e)) => alert(&format!("Error saving file: {e}")),
        None => {}
    }
    refresh_editor_ui();
}

fn save_as() {
    pull_from_codemirror();
    let default = with_editor(|ed| ed.current_file().unwrap_or("untitled.txt").to_string())
        .unwrap_or_else(|| "untitled.txt".to_string());
    let Some(path) = prompt(SAVE_AS_PROMPT, &default) else {
        return;
    };
    if path.trim().is_empty() {
        return;
    }
    let mut vfs = match open_vfs() {
        Ok(vfs) => vfs,
        Err(e) => {
            alert(&format!("Error saving file: {e}"));
            return;
        }
    };
    if let Some(first) = vfs.missing_parents(&path).first()
        && !confirm(&format!("Directory '{first}' doesn't exist. Create it?"))
    {
        return;
    }
    match with_editor(|ed| ed.save_as(&mut vfs, &path, true)) {
        Some(Ok(saved)) => alert(&format!("Saved as {saved}")),
        Some(Err(AppletError::SaveInProgress)) => debug!("save already running"),
        Some(Err(e)) => alert(&format!("Error saving file: {e}")),
        None => {}
    }
    push_mode_to_codemirror();
    refresh_editor_ui();
}

fn push_mode_to_codemirror() {
    if let Some(mode) = with_editor(|ed| ed.mode().to_string()) {
        with_codemirror(|cm| cm.set_option("mode", &JsValue::from_str(&mode)));
    }
}

// ----------------------------------------------------------------------------
// Single-page app
// ----------------------------------------------------------------------------

/// Build a router from the `<template data-page="...">` sections of the
/// page. The first template is the fallback.
fn router_from_templates() -> Router {
    let templates = query_all("template[data-page]");
    let fallback = templates
        .first()
        .and_then(|t| t.get_attribute("data-page"))
        .unwrap_or_else(|| "home".to_string());

    templates.into_iter().fold(Router::new(fallback), |router, template| {
        let Some(page) = template.get_attribute("data-page") else {
            return router;
        };
        let markup = template.inner_html();
        router.route(page, move || tissage::tags::div().raw(markup.clone()))
    })
}

/// Start the single-page app: collect the page templates, intercept
/// `.spa-link` clicks and `sci-ux-navigate` events, and show `initial_page`.
#[wasm_bindgen]
pub fn start_app(initial_page: &str) -> Result<(), JsValue> {
    init_logging();
    let router = router_from_templates();
    info!(pages = ?router.pages(), "starting app");
    ROUTER.with(|cell| *cell.borrow_mut() = Some(router));

    let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
    bind_global(&document, "click", |event| {
        let link = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
            .and_then(|el| el.closest(".spa-link").ok().flatten());
        if let Some(link) = link {
            event.prevent_default();
            let data_page = link.get_attribute("data-page");
            navigate(page_from_link(data_page.as_deref()));
        }
    })?;

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    bind_global(&window, NAVIGATE_EVENT, |event| {
        let page = event
            .dyn_ref::<CustomEvent>()
            .and_then(|e| js_sys::Reflect::get(&e.detail(), &JsValue::from_str("page")).ok())
            .and_then(|p| p.as_string())
            .unwrap_or_default();
        navigate(&page);
    })?;

    navigate(initial_page);
    Ok(())
}

/// Swap `#content` for `page` and mount the applets it contains.
pub fn navigate(page: &str) {
    let page = if page == EDITOR_OPEN_PAGE { EDITOR_PAGE } else { page };
    let Some(markup) = ROUTER.with(|cell| cell.borrow().as_ref().map(|r| r.resolve(page).render()))
    else {
        warn!(page, "navigation before start_app");
        return;
    };
    match query("#content").or_else(|| query("body")) {
        Some(content) => content.set_inner_html(&markup),
        None => return,
    }
    mount_applets();
}

/// Mount every `[data-applet]` placeholder on the page.
#[wasm_bindgen]
pub fn mount_applets() {
    for host in query_all("[data-applet]") {
        let id = host.id();
        let result = match host.get_attribute("data-applet").as_deref() {
            Some("file-explorer") => mount_file_explorer(&id),
            Some("text-editor") => mount_text_editor(&id),
            other => {
                warn!(?other, %id, "unknown applet");
                Ok(())
            }
        };
        if let Err(e) = result {
            warn!(%id, "failed to mount applet: {e:?}");
        }
    }
}
