//! Wiring a widget to its trigger's click events

use crate::config::WidgetConfig;
use crate::errors::WidgetError;
use crate::utils::clipboard::ClipboardWriter;
use crate::utils::timer::Runtime;
use crate::widget::{CopyWidget, StyleTarget, TextSource};

/// Element that can deliver click events
pub trait ClickTarget {
    /// Registration token, handed back to `unlisten_click`
    type Listener;

    fn listen_click(&self, handler: Box<dyn Fn()>) -> Result<Self::Listener, WidgetError>;

    fn unlisten_click(&self, listener: Self::Listener);
}

/// Element lookup by id
pub trait Page {
    type Trigger: StyleTarget + ClickTarget + 'static;
    type Source: TextSource + 'static;

    fn trigger_by_id(&self, id: &str) -> Option<Self::Trigger>;

    fn source_by_id(&self, id: &str) -> Option<Self::Source>;
}

/// A widget together with its click listener
///
/// The listener is removed when this is dropped. To keep a button wired for
/// the lifetime of the page, leak it with `std::mem::forget`.
pub struct AttachedWidget<T: ClickTarget, S, C, R: Runtime> {
    widget: CopyWidget<T, S, C, R>,
    listener: Option<T::Listener>,
}

impl<T, S, C, R> AttachedWidget<T, S, C, R>
where
    T: StyleTarget + ClickTarget + 'static,
    S: TextSource + 'static,
    C: ClipboardWriter + 'static,
    R: Runtime + 'static,
{
    pub fn widget(&self) -> &CopyWidget<T, S, C, R> {
        &self.widget
    }

    /// Remove the click listener; later clicks do nothing
    pub fn detach(self) {
        log::debug!("Copy button #{} detached", self.widget.config().trigger_id);
    }
}

impl<T: ClickTarget, S, C, R: Runtime> Drop for AttachedWidget<T, S, C, R> {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.take() {
            self.widget.trigger().unlisten_click(listener);
        }
    }
}

/// Wire `trigger` so that clicking it copies the text of `source`
pub fn attach<T, S, C, R>(
    trigger: T,
    source: S,
    clipboard: C,
    runtime: R,
    config: WidgetConfig,
) -> Result<AttachedWidget<T, S, C, R>, WidgetError>
where
    T: StyleTarget + ClickTarget + 'static,
    S: TextSource + 'static,
    C: ClipboardWriter + 'static,
    R: Runtime + 'static,
{
    let widget = CopyWidget::new(trigger, source, clipboard, runtime, config);

    let on_click = widget.clone();
    let listener = widget
        .trigger()
        .listen_click(Box::new(move || on_click.click()))?;

    Ok(AttachedWidget {
        widget,
        listener: Some(listener),
    })
}

/// Look up the configured trigger and source and wire them
///
/// Returns `None` without side effects when either element is missing.
pub fn attach_by_id<P, C, R>(
    page: &P,
    clipboard: C,
    runtime: R,
    config: WidgetConfig,
) -> Option<AttachedWidget<P::Trigger, P::Source, C, R>>
where
    P: Page,
    C: ClipboardWriter + 'static,
    R: Runtime + 'static,
{
    let Some(trigger) = page.trigger_by_id(&config.trigger_id) else {
        log::debug!("No trigger #{}, copy button not wired", config.trigger_id);
        return None;
    };
    let Some(source) = page.source_by_id(&config.source_id) else {
        log::debug!("No source #{}, copy button not wired", config.source_id);
        return None;
    };

    match attach(trigger, source, clipboard, runtime, config) {
        Ok(attached) => Some(attached),
        Err(e) => {
            log::warn!("{}", e);
            None
        }
    }
}
