//! Clipboard access
//!
//! The widget only needs one clipboard operation, so it is injected as a
//! small capability trait. `WebClipboard` talks to the Web Clipboard API;
//! tests substitute an in-memory writer.

use async_trait::async_trait;

use crate::errors::{describe_js_error, WidgetError};

/// Something that can put text on the system clipboard
#[async_trait(?Send)]
pub trait ClipboardWriter {
    /// Write `text` to the clipboard, resolving once the platform reports
    /// success or failure
    async fn write_text(&self, text: &str) -> Result<(), WidgetError>;
}

/// `navigator.clipboard.writeText`
#[derive(Debug, Clone, Copy, Default)]
pub struct WebClipboard;

#[async_trait(?Send)]
impl ClipboardWriter for WebClipboard {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError> {
        let window = web_sys::window().ok_or(WidgetError::NoWindow)?;
        let clipboard = window.navigator().clipboard();
        wasm_bindgen_futures::JsFuture::from(clipboard.write_text(text))
            .await
            .map(|_| ())
            .map_err(|e| WidgetError::ClipboardRejected(describe_js_error(&e)))
    }
}
