//! Browser capabilities and small value types shared by the widget

pub mod clipboard;
pub mod color;
pub mod timer;

pub use clipboard::{ClipboardWriter, WebClipboard};
pub use color::Color;
pub use timer::{BrowserRuntime, PendingTimer, Runtime};
