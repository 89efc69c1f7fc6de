//! Click-to-copy buttons for the browser
//!
//! Clicking the trigger copies the text of a source element to the clipboard
//! and flashes the trigger green for a moment. From JavaScript:
//!
//! ```js
//! import init, { initLogging, attachCopyButton, installCopyButton } from "./copy_widget.js";
//!
//! await init();
//! initLogging("info");
//!
//! // Explicit wiring
//! const handle = attachCopyButton(button, span, { resetDelayMs: 150 });
//!
//! // Or the page-load default: #copy-btn copies #plain-data
//! installCopyButton();
//! ```

use std::sync::Once;

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement};

pub mod attach;
pub mod config;
pub mod dom;
pub mod errors;
pub mod utils;
pub mod widget;

#[cfg(test)]
mod testing;

pub use attach::{attach, attach_by_id, AttachedWidget, ClickTarget, Page};
pub use config::{ResetPolicy, WidgetConfig};
pub use dom::{on_document_ready, DomPage, DomSource, DomTrigger};
pub use errors::WidgetError;
pub use utils::{BrowserRuntime, ClipboardWriter, Color, PendingTimer, Runtime, WebClipboard};
pub use widget::{CopyWidget, StyleTarget, TextSource};

type BrowserAttachment = AttachedWidget<DomTrigger, DomSource, WebClipboard, BrowserRuntime>;

/// Install the panic hook and console logger; later calls are ignored
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        let level = config::parse_log_level(level.as_deref());
        wasm_logger::init(wasm_logger::Config::new(level));
        log::info!("copy-widget logging at {}", level);
    });
}

/// A wired copy button, returned to JavaScript
///
/// Freeing the handle removes the click listener, so keep it for as long as
/// the button should work.
#[wasm_bindgen]
pub struct CopyButtonHandle {
    inner: BrowserAttachment,
}

#[wasm_bindgen]
impl CopyButtonHandle {
    /// Copy now, as if the button had been clicked. Rejects if the clipboard
    /// refuses the write.
    pub fn copy(&self) -> js_sys::Promise {
        let widget = self.inner.widget().clone();
        wasm_bindgen_futures::future_to_promise(async move {
            widget.copy().await.map_err(JsValue::from)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Remove the click listener
    pub fn detach(self) {
        self.inner.detach();
    }
}

/// Wire `trigger` to copy the text of `source`
#[wasm_bindgen(js_name = attachCopyButton)]
pub fn attach_copy_button(
    trigger: HtmlElement,
    source: Element,
    options: JsValue,
) -> Result<CopyButtonHandle, JsValue> {
    let config = WidgetConfig::from_js(options)?;
    let inner = attach(
        DomTrigger(trigger),
        DomSource(source),
        WebClipboard,
        BrowserRuntime,
        config,
    )?;
    Ok(CopyButtonHandle { inner })
}

/// Look up `triggerId` and `sourceId` (default `copy-btn` / `plain-data`)
/// and wire them. Returns `undefined` when either element is missing.
#[wasm_bindgen(js_name = attachCopyButtonById)]
pub fn attach_copy_button_by_id(options: JsValue) -> Result<Option<CopyButtonHandle>, JsValue> {
    let config = WidgetConfig::from_js(options)?;
    let page = DomPage::current()?;
    Ok(attach_by_id(&page, WebClipboard, BrowserRuntime, config).map(|inner| CopyButtonHandle { inner }))
}

/// Wire the button by id once the document has loaded
///
/// The listener stays registered for the lifetime of the page.
#[wasm_bindgen(js_name = installCopyButton)]
pub fn install_copy_button(options: JsValue) -> Result<(), JsValue> {
    let config = WidgetConfig::from_js(options)?;
    let page = DomPage::current()?;

    let lookup = page.clone();
    on_document_ready(&page, move || {
        if let Some(attached) = attach_by_id(&lookup, WebClipboard, BrowserRuntime, config) {
            keep_for_page_lifetime(attached);
        }
    })?;
    Ok(())
}

fn keep_for_page_lifetime(attached: BrowserAttachment) {
    // Skips the Drop that would unregister the listener
    std::mem::forget(attached);
}
