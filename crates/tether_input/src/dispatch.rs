//! Event dispatch queue
//!
//! Cross-thread handoff between input producers and the render thread.
//! Producers append boxed tasks from any thread; the render thread drains the
//! queue once per frame and runs every task in enqueue order against its own
//! context. A failing or panicking task is logged and skipped over, it never
//! stops the drain.

use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tether_core::{BridgeError, Result};

/// A unit of work executed on the render thread
pub type Task<C> = Box<dyn FnOnce(&mut C) -> Result<()> + Send + 'static>;

/// Outcome of one drain pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrainReport {
    pub executed: usize,
    pub failed: usize,
}

/// Ordered multi-producer task queue
///
/// Cloning yields another handle onto the same queue.
pub struct DispatchQueue<C> {
    tasks: Arc<Mutex<VecDeque<Task<C>>>>,
}

impl<C> Clone for DispatchQueue<C> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
        }
    }
}

impl<C> DispatchQueue<C> {
    pub fn new() -> Self {
        Self {
            tasks: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Append a task behind everything already queued
    pub fn enqueue<F>(&self, task: F)
    where
        F: FnOnce(&mut C) -> Result<()> + Send + 'static,
    {
        self.tasks.lock().push_back(Box::new(task));
    }

    /// Discard every pending task and queue `task` in their place
    ///
    /// Both happen under one lock, so no producer can slip a task in between
    /// the flush and `task`. Returns how many tasks were discarded.
    pub fn flush_and_enqueue<F>(&self, task: F) -> usize
    where
        F: FnOnce(&mut C) -> Result<()> + Send + 'static,
    {
        let mut tasks = self.tasks.lock();
        let discarded = tasks.len();
        tasks.clear();
        tasks.push_back(Box::new(task));
        discarded
    }

    /// Run every task queued so far, in order
    ///
    /// Never blocks waiting for work: an empty queue returns immediately.
    /// Tasks enqueued while the drain runs wait for the next drain.
    pub fn drain(&self, context: &mut C) -> DrainReport {
        let pending = std::mem::take(&mut *self.tasks.lock());
        let mut report = DrainReport::default();

        for task in pending {
            report.executed += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| task(context)))
                .unwrap_or_else(|payload| Err(BridgeError::TaskPanicked(panic_message(&*payload))));

            if let Err(e) = outcome {
                report.failed += 1;
                tracing::error!("dispatch task failed: {}", e);
            }
        }

        report
    }

    pub fn len(&self) -> usize {
        self.tasks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.lock().is_empty()
    }
}

impl<C> Default for DispatchQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
