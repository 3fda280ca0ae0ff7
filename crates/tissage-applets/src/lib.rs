//! Browser applets for tissage sites: a file explorer and a text editor over
//! a persistent virtual filesystem, plus the single-page navigation they
//! live in.
//!
//! Everything except [`dom`] is platform-free and renders plain
//! [`tissage::Element`] trees, so pages can be pre-rendered natively and
//! then brought to life by the wasm build.

pub mod editor;
mod error;
pub mod events;
pub mod explorer;
pub mod modal;
pub mod nav;
pub mod router;

#[cfg(target_arch = "wasm32")]
pub mod dom;

pub use editor::TextEditor;
pub use error::{AppletError, Result};
pub use explorer::{ExplorerAction, ExplorerEffect, FileExplorer, FileSelection};
pub use router::Router;

/// Window event asking the app to switch pages; `detail.page` names the
/// target.
pub const NAVIGATE_EVENT: &str = "sci-ux-navigate";
