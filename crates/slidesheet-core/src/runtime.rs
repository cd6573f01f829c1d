//! Frame-callback runtime.
//!
//! The [`Runtime`] owns the callback registry; everything else talks to it
//! through a weak [`RuntimeHandle`]. Once the runtime is dropped, handles stay
//! valid but every registration becomes inactive.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;

struct RuntimeInner {
    next_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<FxHashMap<FrameCallbackId, FrameCallback>>,
    frame_requested: Cell<bool>,
    last_frame_nanos: Cell<Option<u64>>,
    scheduler: Option<Arc<dyn RuntimeScheduler>>,
}

impl RuntimeInner {
    fn request_frame(&self) {
        if self.frame_requested.replace(true) {
            return;
        }
        if let Some(scheduler) = &self.scheduler {
            scheduler.schedule_frame();
        }
    }
}

/// Owner of the frame-callback registry for one UI thread.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a runtime that notifies `scheduler` whenever a frame is needed.
    pub fn with_scheduler(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self::build(Some(scheduler))
    }

    fn build(scheduler: Option<Arc<dyn RuntimeScheduler>>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                next_callback_id: Cell::new(1),
                frame_callbacks: RefCell::new(FxHashMap::default()),
                frame_requested: Cell::new(false),
                last_frame_nanos: Cell::new(None),
                scheduler,
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Returns `false` once the owning [`Runtime`] has been dropped.
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Register a one-shot callback for the next drained frame.
    ///
    /// Returns `None` when the runtime is gone; the callback is dropped.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let inner = self.inner.upgrade()?;
        let id = inner.next_callback_id.get();
        inner.next_callback_id.set(id + 1);
        inner
            .frame_callbacks
            .borrow_mut()
            .insert(id, Box::new(callback));
        inner.request_frame();
        Some(id)
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.frame_callbacks.borrow_mut().remove(&id);
        }
    }

    /// Run every callback registered before this call, in registration order.
    ///
    /// Callbacks registered while draining are deferred to the next frame.
    /// Returns the number of callbacks that ran.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) -> usize {
        let Some(inner) = self.inner.upgrade() else {
            return 0;
        };
        inner.frame_requested.set(false);
        inner.last_frame_nanos.set(Some(frame_time_nanos));

        let mut batch: SmallVec<[FrameCallbackId; 8]> =
            inner.frame_callbacks.borrow().keys().copied().collect();
        batch.sort_unstable();

        let mut ran = 0;
        for id in batch {
            // Cancelled while an earlier callback in this batch ran.
            let Some(callback) = inner.frame_callbacks.borrow_mut().remove(&id) else {
                continue;
            };
            callback(frame_time_nanos);
            ran += 1;
        }

        if !inner.frame_callbacks.borrow().is_empty() {
            inner.request_frame();
        }
        log::trace!("drained {ran} frame callbacks at {frame_time_nanos}ns");
        ran
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| !inner.frame_callbacks.borrow().is_empty())
    }

    pub fn pending_frame_callbacks(&self) -> usize {
        self.inner
            .upgrade()
            .map_or(0, |inner| inner.frame_callbacks.borrow().len())
    }

    /// Time of the most recently drained frame, if any.
    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
