//! Copy widget error types

use std::fmt;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised while wiring or running a copy widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetError {
    /// No global `window` (not running in a browser page)
    NoWindow,
    /// The window has no document
    NoDocument,
    /// The clipboard refused the write (permission denied, not focused, ...)
    ClipboardRejected(String),
    /// Setting the trigger's inline style failed
    Style(String),
    /// Registering or removing the click listener failed
    Listener(String),
    /// A color string was not `#rrggbb` or `#rrggbbaa`
    InvalidColor(String),
    /// Widget options could not be decoded or failed validation
    InvalidConfig(String),
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "No window"),
            Self::NoDocument => write!(f, "No document"),
            Self::ClipboardRejected(msg) => write!(f, "Clipboard write rejected: {}", msg),
            Self::Style(msg) => write!(f, "Failed to update button style: {}", msg),
            Self::Listener(msg) => write!(f, "Failed to register click listener: {}", msg),
            Self::InvalidColor(value) => write!(f, "Invalid color '{}': expected #rrggbb or #rrggbbaa", value),
            Self::InvalidConfig(msg) => write!(f, "Invalid copy button options: {}", msg),
        }
    }
}

impl std::error::Error for WidgetError {}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Describe a thrown JS value, preferring `Error.message`
pub(crate) fn describe_js_error(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
