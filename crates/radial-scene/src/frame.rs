//! Frame-callback queue.
//!
//! Callbacks requested during a frame run on the next one: [`FrameScheduler::take_due`]
//! drains everything queued so far, and anything requested while those run
//! waits for the following call.

use radial_core::ShapeId;
use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a queued callback, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(u64);

/// Work a frame callback performs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameTask {
    /// Repaint the whole surface if the shape is still dirty.
    Redraw(ShapeId),
    /// Destroy the shape once the clock reaches `deadline`.
    Bounce { shape: ShapeId, deadline: Duration },
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    queued: BTreeMap<FrameHandle, FrameTask>,
    next: u64,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, task: FrameTask) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.queued.insert(handle, task);
        handle
    }

    /// Returns true if the callback was still pending.
    pub fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.queued.remove(&handle).is_some()
    }

    /// Removes and returns every queued callback in request order.
    pub fn take_due(&mut self) -> Vec<(FrameHandle, FrameTask)> {
        std::mem::take(&mut self.queued).into_iter().collect()
    }

    pub fn pending(&self) -> usize {
        self.queued.len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.queued.contains_key(&handle)
    }
}
