//! Click-to-copy widget
//!
//! A click reads the source element's text, writes it to the clipboard and,
//! once the write succeeds, flashes the trigger's background before
//! resetting it to idle:
//!
//! ```text
//! idle --(write ok)--> success --(reset delay)--> idle
//! ```
//!
//! The widget is generic over the elements, the clipboard and the runtime so
//! the same logic drives real DOM elements and the in-memory fakes used in
//! tests.

use std::cell::RefCell;
use std::rc::Rc;

use crate::config::{ResetPolicy, WidgetConfig};
use crate::errors::WidgetError;
use crate::utils::clipboard::ClipboardWriter;
use crate::utils::color::Color;
use crate::utils::timer::{PendingTimer, Runtime};

/// Element whose rendered text is the copy payload
pub trait TextSource {
    /// Current text content; empty when the element has none
    fn text(&self) -> String;
}

/// Element whose background shows copy feedback
pub trait StyleTarget {
    fn set_background(&self, color: &Color) -> Result<(), WidgetError>;
}

pub struct CopyWidget<T, S, C, R: Runtime> {
    inner: Rc<Inner<T, S, C, R>>,
}

struct Inner<T, S, C, R: Runtime> {
    trigger: Rc<T>,
    source: S,
    clipboard: C,
    runtime: R,
    config: WidgetConfig,
    pending_reset: RefCell<Option<R::Timer>>,
}

impl<T, S, C, R: Runtime> Clone for CopyWidget<T, S, C, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T, S, C, R: Runtime> Drop for Inner<T, S, C, R> {
    fn drop(&mut self) {
        // A flash that is still showing must still end in idle
        if let Some(reset) = self.pending_reset.get_mut().take() {
            reset.detach();
        }
    }
}

impl<T, S, C, R: Runtime> CopyWidget<T, S, C, R> {
    pub fn trigger(&self) -> &T {
        &self.inner.trigger
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.inner.config
    }
}

impl<T, S, C, R> CopyWidget<T, S, C, R>
where
    T: StyleTarget + 'static,
    S: TextSource + 'static,
    C: ClipboardWriter + 'static,
    R: Runtime + 'static,
{
    pub fn new(trigger: T, source: S, clipboard: C, runtime: R, config: WidgetConfig) -> Self {
        Self {
            inner: Rc::new(Inner {
                trigger: Rc::new(trigger),
                source,
                clipboard,
                runtime,
                config,
                pending_reset: RefCell::new(None),
            }),
        }
    }

    /// Handle a click on the trigger
    ///
    /// The payload is read before anything is awaited, so later edits to the
    /// source do not change what this click copies. Failures are dropped.
    pub fn click(&self) {
        let text = self.inner.source.text();
        let widget = self.clone();
        self.inner.runtime.spawn(async move {
            if let Err(e) = widget.copy_text(text).await {
                log::debug!("Copy failed: {}", e);
            }
        });
    }

    /// Copy the source's current text and show feedback
    pub async fn copy(&self) -> Result<(), WidgetError> {
        let text = self.inner.source.text();
        self.copy_text(text).await
    }

    async fn copy_text(&self, text: String) -> Result<(), WidgetError> {
        match self.inner.clipboard.write_text(&text).await {
            Ok(()) => {
                log::debug!("Copied {} bytes to clipboard", text.len());
                self.flash(&self.inner.config.success_color);
                Ok(())
            }
            Err(e) => {
                if let Some(color) = self.inner.config.failure_color {
                    self.flash(&color);
                }
                Err(e)
            }
        }
    }

    /// Paint `color` now and schedule the reset to idle
    ///
    /// The reset owns its own handle on the trigger, so it still fires if the
    /// widget is detached or dropped in the meantime.
    fn flash(&self, color: &Color) {
        paint(self.inner.trigger.as_ref(), color);

        let trigger = Rc::clone(&self.inner.trigger);
        let idle = self.inner.config.idle_color;
        let reset = self.inner.runtime.schedule(
            self.inner.config.reset_delay_ms,
            Box::new(move || paint(trigger.as_ref(), &idle)),
        );

        match self.inner.config.reset_policy {
            ResetPolicy::CancelPending => {
                let previous = self.inner.pending_reset.replace(Some(reset));
                if let Some(previous) = previous {
                    previous.cancel();
                }
            }
            ResetPolicy::Overlap => reset.detach(),
        }
    }
}

fn paint<T: StyleTarget>(trigger: &T, color: &Color) {
    if let Err(e) = trigger.set_background(color) {
        log::warn!("{}", e);
    }
}
