//! Task spawning and delayed callbacks
//!
//! The widget awaits the clipboard on the page's event loop and resets the
//! button with a timer. Both go through `Runtime` so that the same widget
//! code runs against `wasm_bindgen_futures` + `gloo_timers` in the browser
//! and against a manual clock in tests.

use gloo_timers::callback::Timeout;
use std::future::Future;

/// Handle to a scheduled callback
pub trait PendingTimer {
    /// Stop the callback from running (no-op if it already ran)
    fn cancel(self);

    /// Release the handle and let the callback run when due. Dropping a
    /// handle without calling this cancels the callback.
    fn detach(self);
}

/// Single-threaded executor plus timer source
pub trait Runtime {
    type Timer: PendingTimer + 'static;

    /// Run a future to completion on the current thread's event loop
    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static;

    /// Run `callback` once after `delay_ms` milliseconds
    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer;
}

/// Browser event loop: `spawn_local` for futures, `setTimeout` for timers
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserRuntime;

impl Runtime for BrowserRuntime {
    type Timer = Timeout;

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        wasm_bindgen_futures::spawn_local(task);
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer {
        Timeout::new(delay_ms, callback)
    }
}

impl PendingTimer for Timeout {
    fn cancel(self) {
        // Dropping a Timeout clears it
        drop(self);
    }

    /// Hands the callback to the browser for good. gloo leaks the boxed
    /// closure and the timeout id is dropped, so a detached reset can no
    /// longer be cancelled. One small leak per flash.
    fn detach(self) {
        let _id = self.forget();
    }
}
