//! In-memory page, clipboard and clock for unit tests

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::{LocalPool, LocalSpawner};
use futures::task::LocalSpawnExt;

use crate::attach::{ClickTarget, Page};
use crate::errors::WidgetError;
use crate::utils::clipboard::ClipboardWriter;
use crate::utils::color::Color;
use crate::utils::timer::{PendingTimer, Runtime};
use crate::widget::{StyleTarget, TextSource};

// =============================================================================
// Elements
// =============================================================================

/// Element that records every background it is given
#[derive(Clone)]
pub struct FakeElement {
    state: Rc<ElementState>,
}

struct ElementState {
    id: String,
    text: RefCell<String>,
    backgrounds: RefCell<Vec<String>>,
    listeners: RefCell<Vec<(u64, Rc<dyn Fn()>)>>,
    next_listener: Cell<u64>,
    refuse_listeners: Cell<bool>,
}

impl FakeElement {
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            state: Rc::new(ElementState {
                id: id.to_string(),
                text: RefCell::new(text.to_string()),
                backgrounds: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                refuse_listeners: Cell::new(false),
            }),
        }
    }

    pub fn id(&self) -> &str {
        &self.state.id
    }

    pub fn set_text(&self, text: &str) {
        *self.state.text.borrow_mut() = text.to_string();
    }

    pub fn backgrounds(&self) -> Vec<String> {
        self.state.backgrounds.borrow().clone()
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.borrow().len()
    }

    pub fn refuse_listeners(&self) {
        self.state.refuse_listeners.set(true);
    }

    /// Dispatch a synthetic click to every registered listener
    pub fn click(&self) {
        let listeners: Vec<Rc<dyn Fn()>> = self
            .state
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener();
        }
    }
}

impl TextSource for FakeElement {
    fn text(&self) -> String {
        self.state.text.borrow().clone()
    }
}

impl StyleTarget for FakeElement {
    fn set_background(&self, color: &Color) -> Result<(), WidgetError> {
        self.state.backgrounds.borrow_mut().push(color.to_css());
        Ok(())
    }
}

impl ClickTarget for FakeElement {
    type Listener = u64;

    fn listen_click(&self, handler: Box<dyn Fn()>) -> Result<Self::Listener, WidgetError> {
        if self.state.refuse_listeners.get() {
            return Err(WidgetError::Listener("listeners refused".to_string()));
        }
        let id = self.state.next_listener.get();
        self.state.next_listener.set(id + 1);
        self.state.listeners.borrow_mut().push((id, Rc::from(handler)));
        Ok(id)
    }

    fn unlisten_click(&self, listener: Self::Listener) {
        self.state.listeners.borrow_mut().retain(|(id, _)| *id != listener);
    }
}

/// Page whose elements can be added at any time
#[derive(Default)]
pub struct FakePage {
    elements: RefCell<HashMap<String, FakeElement>>,
}

impl FakePage {
    pub fn insert(&self, element: FakeElement) {
        self.elements
            .borrow_mut()
            .insert(element.id().to_string(), element);
    }

    pub fn get(&self, id: &str) -> Option<FakeElement> {
        self.elements.borrow().get(id).cloned()
    }
}

impl Page for FakePage {
    type Trigger = FakeElement;
    type Source = FakeElement;

    fn trigger_by_id(&self, id: &str) -> Option<Self::Trigger> {
        self.get(id)
    }

    fn source_by_id(&self, id: &str) -> Option<Self::Source> {
        self.get(id)
    }
}

// =============================================================================
// Clipboard
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum WriteMode {
    #[default]
    Accept,
    Reject,
    Defer,
}

/// Clipboard that records writes and answers per the configured mode
#[derive(Clone, Default)]
pub struct FakeClipboard {
    state: Rc<ClipboardState>,
}

#[derive(Default)]
struct ClipboardState {
    writes: RefCell<Vec<String>>,
    mode: Cell<WriteMode>,
    deferred: RefCell<VecDeque<oneshot::Sender<Result<(), WidgetError>>>>,
}

impl FakeClipboard {
    pub fn writes(&self) -> Vec<String> {
        self.state.writes.borrow().clone()
    }

    pub fn reject_writes(&self) {
        self.state.mode.set(WriteMode::Reject);
    }

    /// Hold every write open until `resolve_next`
    pub fn defer_writes(&self) {
        self.state.mode.set(WriteMode::Defer);
    }

    pub fn resolve_next(&self, result: Result<(), WidgetError>) {
        let sender = self
            .state
            .deferred
            .borrow_mut()
            .pop_front()
            .expect("no deferred clipboard write");
        let _ = sender.send(result);
    }
}

#[async_trait(?Send)]
impl ClipboardWriter for FakeClipboard {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError> {
        self.state.writes.borrow_mut().push(text.to_string());
        match self.state.mode.get() {
            WriteMode::Accept => Ok(()),
            WriteMode::Reject => Err(WidgetError::ClipboardRejected("NotAllowedError".to_string())),
            WriteMode::Defer => {
                let (tx, rx) = oneshot::channel();
                self.state.deferred.borrow_mut().push_back(tx);
                rx.await
                    .unwrap_or_else(|_| Err(WidgetError::ClipboardRejected("dropped".to_string())))
            }
        }
    }
}

// =============================================================================
// Runtime
// =============================================================================

struct Scheduled {
    id: u64,
    due: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u64,
    timers: Vec<Scheduled>,
}

/// Local executor with a clock that only moves when told to
#[derive(Clone)]
pub struct ManualRuntime {
    clock: Rc<RefCell<Clock>>,
    pool: Rc<RefCell<LocalPool>>,
    spawner: LocalSpawner,
}

/// Clears its callback when dropped, like a gloo `Timeout`
pub struct ManualTimer {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl ManualRuntime {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            clock: Rc::new(RefCell::new(Clock::default())),
            pool: Rc::new(RefCell::new(pool)),
            spawner,
        }
    }

    pub fn run_until_stalled(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    /// Move the clock forward, firing due timers in order
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now + ms;
        loop {
            self.run_until_stalled();

            let next = {
                let mut clock = self.clock.borrow_mut();
                let index = clock
                    .timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.id))
                    .map(|(index, _)| index);
                index.map(|index| {
                    let timer = clock.timers.remove(index);
                    clock.now = timer.due;
                    timer
                })
            };

            match next {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    pub fn pending_timers(&self) -> usize {
        self.clock.borrow().timers.len()
    }
}

impl Runtime for ManualRuntime {
    type Timer = ManualTimer;

    fn spawn<F>(&self, task: F)
    where
        F: Future<Output = ()> + 'static,
    {
        self.spawner.spawn_local(task).expect("spawn on local pool");
    }

    fn schedule(&self, delay_ms: u32, callback: Box<dyn FnOnce()>) -> Self::Timer {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due = clock.now + u64::from(delay_ms);
        clock.timers.push(Scheduled { id, due, callback });
        ManualTimer {
            id,
            clock: Rc::downgrade(&self.clock),
        }
    }
}

impl PendingTimer for ManualTimer {
    fn cancel(self) {
        drop(self);
    }

    fn detach(mut self) {
        self.clock = Weak::new();
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            let removed: Vec<Scheduled> = {
                let mut clock = clock.borrow_mut();
                let (removed, kept) = std::mem::take(&mut clock.timers)
                    .into_iter()
                    .partition(|timer| timer.id == self.id);
                clock.timers = kept;
                removed
            };
            drop(removed);
        }
    }
}
