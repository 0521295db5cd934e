use camera_rig::{FrameHandle, FrameScheduler};

/// Frame scheduler backed by the window's redraw cycle.
///
/// A requested frame stays pending until the host sees `RedrawRequested`
/// and calls [`DisplaySync::fire`].
#[derive(Debug, Default)]
pub struct DisplaySync {
    next_id: u64,
    pending: Option<FrameHandle>,
}

impl DisplaySync {
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Hands out the pending frame for this redraw, if any.
    pub fn fire(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }
}

impl FrameScheduler for DisplaySync {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
