//! Display-synced repeating task.

use tracing::{debug, trace};

/// Identifies one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// The host's display-sync primitive (vsync callback, redraw request).
pub trait FrameScheduler {
    /// Schedules one callback for the next displayed frame.
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancels a pending callback. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Self-rescheduling frame task. Stopping it is synchronous and idempotent.
#[derive(Debug, Default)]
pub struct FrameLoop {
    pending: Option<FrameHandle>,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.pending.is_some() {
            return;
        }
        let handle = scheduler.request_frame();
        debug!(handle = handle.0, "frame loop started");
        self.pending = Some(handle);
    }

    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
            debug!(handle = handle.0, "frame loop stopped");
        }
    }

    /// Claims a fired frame. Returns `false` for handles this loop does not
    /// own (stale or cancelled); otherwise schedules the next frame.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut dyn FrameScheduler) -> bool {
        if self.pending != Some(handle) {
            trace!(handle = handle.0, "ignoring foreign frame");
            return false;
        }
        self.pending = Some(scheduler.request_frame());
        true
    }
}

/// Scheduler driven by hand: frames fire only when the owner calls
/// [`ManualScheduler::next_frame`]. Used by headless hosts and tests.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }

    /// Takes the oldest pending callback, as a vsync tick would.
    pub fn next_frame(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loop_reschedules_itself() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::default();
        frames.start(&mut sched);
        for _ in 0..3 {
            let handle = sched.next_frame().expect("scheduled");
            assert!(frames.on_frame(handle, &mut sched));
        }
        assert_eq!(sched.pending().len(), 1);
    }

    #[test]
    fn start_twice_schedules_once() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::default();
        frames.start(&mut sched);
        frames.start(&mut sched);
        assert_eq!(sched.pending().len(), 1);
    }

    #[test]
    fn stop_cancels_and_is_idempotent() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::default();
        frames.start(&mut sched);
        frames.stop(&mut sched);
        frames.stop(&mut sched);
        assert!(!frames.is_running());
        assert!(sched.pending().is_empty());
        assert_eq!(sched.cancelled_count(), 1);
    }

    #[test]
    fn stop_without_start_is_a_no_op() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::default();
        frames.stop(&mut sched);
        assert_eq!(sched.cancelled_count(), 0);
    }

    #[test]
    fn stale_frame_is_rejected() {
        let mut sched = ManualScheduler::new();
        let mut frames = FrameLoop::default();
        frames.start(&mut sched);
        let handle = sched.next_frame().expect("scheduled");
        frames.stop(&mut sched);
        assert!(!frames.on_frame(handle, &mut sched));
        assert!(sched.pending().is_empty());
    }
}
