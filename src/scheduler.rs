//! Timer seam. The splash only ever needs "run this after N ms" and
//! "cancel that", so both the browser `setTimeout` and the virtual clock used in
//! tests implement the same two-method trait.

use std::cell::{Cell, RefCell};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Tasks are one-shot.
pub type Task = Box<dyn FnOnce()>;

/// Handle returned by a successful [`Scheduler::set_timeout`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub i32);

pub trait Scheduler {
    /// `None` if the timer could not be registered; the task is dropped unrun.
    fn set_timeout(&self, delay_ms: u32, task: Task) -> Option<TimerId>;
    /// Cancelling an id that already fired (or never existed) is a no-op.
    fn clear_timeout(&self, id: TimerId);
}

// --- Browser ----------------------------------------------------------------

/// `window.setTimeout` / `window.clearTimeout`.
pub struct BrowserScheduler {
    window: web_sys::Window,
}

impl BrowserScheduler {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Task) -> Option<TimerId> {
        // once_into_js frees the closure after it runs; a cleared timer leaks its closure.
        let callback = Closure::once_into_js(move || task());
        let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), delay)
        {
            Ok(handle) => Some(TimerId(handle)),
            Err(e) => {
                log::error!("setTimeout rejected: {e:?}");
                None
            }
        }
    }

    fn clear_timeout(&self, id: TimerId) {
        self.window.clear_timeout_with_handle(id.0);
    }
}

// --- Virtual clock ------------------------------------------------------------

struct Pending {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Tasks fire in due-time order, ties broken by scheduling order. A task may
/// schedule further tasks; those fire in the same `advance` call if they fall
/// due within the advanced window.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_id: Cell<i32>,
    queue: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of tasks waiting to fire.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Milliseconds until the next task is due, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.queue
            .borrow()
            .iter()
            .map(|p| p.due_ms.saturating_sub(self.now_ms.get()))
            .min()
    }

    /// Move the clock forward, running every task that falls due.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms.get() + ms;
        while let Some(task) = self.pop_due(target) {
            task();
        }
        self.now_ms.set(target);
    }

    /// Jump straight to the next due task and run it (plus anything else due at
    /// that instant). Returns false if the queue was empty.
    pub fn run_next(&self) -> bool {
        match self.next_due_in() {
            Some(wait) => {
                self.advance(wait);
                true
            }
            None => false,
        }
    }

    fn pop_due(&self, limit_ms: u64) -> Option<Task> {
        let mut queue = self.queue.borrow_mut();
        // Vec order is insertion order, so the first minimum is the earliest scheduled.
        let idx = queue
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= limit_ms)
            .min_by_key(|(_, p)| p.due_ms)
            .map(|(i, _)| i)?;
        let pending = queue.remove(idx);
        self.now_ms.set(pending.due_ms);
        Some(pending.task)
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Task) -> Option<TimerId> {
        let id = TimerId(self.next_id.get() + 1);
        self.next_id.set(id.0);
        self.queue.borrow_mut().push(Pending {
            id,
            due_ms: self.now_ms.get() + u64::from(delay_ms),
            task,
        });
        Some(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.queue.borrow_mut().retain(|p| p.id != id);
    }
}
