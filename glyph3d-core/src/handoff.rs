/// Single-slot frame handoff between a render thread and the display
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender};
use std::time::Duration;

use crate::error::{RenderError, RenderResult};
use crate::framebuffer::Frame;

/// Producer half. Only complete frames can be published.
pub struct FramePublisher {
    tx: SyncSender<Frame>,
}

/// Consumer half. Blocks until a complete frame is ready.
pub struct FrameReceiver {
    rx: Receiver<Frame>,
}

/// Create a connected publisher/receiver pair with room for one frame.
///
/// A publisher that runs ahead blocks until the display has taken the
/// previous frame, so frames are never skipped or torn.
pub fn frame_slot() -> (FramePublisher, FrameReceiver) {
    let (tx, rx) = mpsc::sync_channel(1);
    (FramePublisher { tx }, FrameReceiver { rx })
}

impl FramePublisher {
    /// Hand over a finished frame, waiting while the slot is occupied.
    pub fn publish(&self, frame: Frame) -> RenderResult<()> {
        self.tx.send(frame).map_err(|_| RenderError::HandoffClosed)
    }
}

impl FrameReceiver {
    /// Wait for the next frame. `None` once the publisher is gone and the
    /// slot is drained.
    pub fn wait(&self) -> Option<Frame> {
        self.rx.recv().ok()
    }

    /// Like [`FrameReceiver::wait`] but gives up after `timeout`, so the
    /// display can keep polling for input while the renderer is busy.
    pub fn wait_timeout(&self, timeout: Duration) -> RenderResult<Option<Frame>> {
        match self.rx.recv_timeout(timeout) {
            Ok(frame) => Ok(Some(frame)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(RenderError::HandoffClosed),
        }
    }
}
