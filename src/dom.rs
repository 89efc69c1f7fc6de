//! Browser DOM implementations of the widget's element traits

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Document, Element, HtmlElement};

use crate::attach::{ClickTarget, Page};
use crate::errors::{describe_js_error, WidgetError};
use crate::utils::color::Color;
use crate::widget::{StyleTarget, TextSource};

/// Clickable element with an inline style, usually a `<button>`
#[derive(Debug, Clone)]
pub struct DomTrigger(pub HtmlElement);

/// Any element; its `textContent` is the payload
#[derive(Debug, Clone)]
pub struct DomSource(pub Element);

impl StyleTarget for DomTrigger {
    fn set_background(&self, color: &Color) -> Result<(), WidgetError> {
        self.0
            .style()
            .set_property("background", &color.to_css())
            .map_err(|e| WidgetError::Style(describe_js_error(&e)))
    }
}

impl ClickTarget for DomTrigger {
    type Listener = Closure<dyn Fn()>;

    fn listen_click(&self, handler: Box<dyn Fn()>) -> Result<Self::Listener, WidgetError> {
        let closure = Closure::wrap(handler);
        self.0
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(|e| WidgetError::Listener(describe_js_error(&e)))?;
        Ok(closure)
    }

    fn unlisten_click(&self, listener: Self::Listener) {
        if let Err(e) = self
            .0
            .remove_event_listener_with_callback("click", listener.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove click listener: {}", describe_js_error(&e));
        }
    }
}

impl TextSource for DomSource {
    fn text(&self) -> String {
        self.0.text_content().unwrap_or_default()
    }
}

/// The current document
#[derive(Debug, Clone)]
pub struct DomPage {
    document: Document,
}

impl DomPage {
    pub fn current() -> Result<Self, WidgetError> {
        let window = web_sys::window().ok_or(WidgetError::NoWindow)?;
        let document = window.document().ok_or(WidgetError::NoDocument)?;
        Ok(Self { document })
    }
}

impl Page for DomPage {
    type Trigger = DomTrigger;
    type Source = DomSource;

    fn trigger_by_id(&self, id: &str) -> Option<Self::Trigger> {
        let element = self.document.get_element_by_id(id)?;
        match element.dyn_into::<HtmlElement>() {
            Ok(html) => Some(DomTrigger(html)),
            Err(_) => {
                log::debug!("#{} is not an HTML element", id);
                None
            }
        }
    }

    fn source_by_id(&self, id: &str) -> Option<Self::Source> {
        self.document.get_element_by_id(id).map(DomSource)
    }
}

/// Run `f` once the document has been parsed
///
/// Waits for `DOMContentLoaded` while the document is still loading,
/// otherwise runs `f` right away.
pub fn on_document_ready<F>(page: &DomPage, f: F) -> Result<(), WidgetError>
where
    F: FnOnce() + 'static,
{
    if page.document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let options = AddEventListenerOptions::new();
    options.set_once(true);
    let callback = Closure::once_into_js(f);
    page.document
        .add_event_listener_with_callback_and_add_event_listener_options(
            "DOMContentLoaded",
            callback.unchecked_ref(),
            &options,
        )
        .map_err(|e| WidgetError::Listener(describe_js_error(&e)))
}
