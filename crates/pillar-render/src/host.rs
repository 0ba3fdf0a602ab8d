//! Host services the pillar depends on: viewport size, resize notification
//! and a display-synchronised frame callback.
//!
//! Registrations are handed out as [`Subscription`]s. The host keeps a clone
//! of the shared flag and skips any callback whose subscription has been
//! cancelled or dropped, so a torn-down pillar can never be called again.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Viewport or surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size { width: 0.0, height: 0.0 };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True when nothing drawn would be visible.
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Corner-to-corner length.
    pub fn diagonal(&self) -> f64 {
        pillar_core::waveform::diagonal(self.width as f64, self.height as f64)
    }
}

/// Cancellation handle for a frame request or resize listener.
///
/// Cancelling is idempotent. Dropping the handle cancels it.
#[derive(Debug)]
pub struct Subscription {
    active: Arc<AtomicBool>,
}

impl Subscription {
    /// Create a live subscription and the flag the host keeps.
    pub fn pair() -> (Self, Arc<AtomicBool>) {
        let active = Arc::new(AtomicBool::new(true));
        (Self { active: active.clone() }, active)
    }

    pub fn cancel(&self) {
        self.active.store(false, Ordering::Relaxed);
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Relaxed)
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// The environment a pillar is mounted into.
pub trait FrameHost {
    /// Current container size in pixels.
    fn viewport_size(&self) -> Size;

    /// Ask for one callback at the next display refresh.
    fn request_animation_frame(&mut self) -> Subscription;

    /// Ask to be told about every viewport size change.
    fn listen_resize(&mut self) -> Subscription;
}

/// Spy counters kept by [`ManualHost`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostStats {
    pub frames_requested: u64,
    pub frames_delivered: u64,
    pub resizes_delivered: u64,
}

/// A host driven explicitly by its owner's loop.
///
/// The owner (a UI redraw hook, a test) calls [`ManualHost::set_viewport`]
/// when the window changes and polls [`ManualHost::take_resize`] and
/// [`ManualHost::take_frame`] once per display refresh, dispatching to the
/// pillar when they return true.
#[derive(Debug, Default)]
pub struct ManualHost {
    viewport: Size,
    frame_requests: Vec<Arc<AtomicBool>>,
    resize_listeners: Vec<Arc<AtomicBool>>,
    resize_pending: bool,
    stats: HostStats,
}

impl ManualHost {
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Default::default()
        }
    }

    /// Change the viewport. Listeners are notified on the next `take_resize`.
    pub fn set_viewport(&mut self, size: Size) {
        if size != self.viewport {
            self.viewport = size;
            self.resize_pending = true;
        }
    }

    /// Consume a pending resize. True if a live listener should handle it.
    pub fn take_resize(&mut self) -> bool {
        self.resize_listeners.retain(|flag| flag.load(Ordering::Relaxed));
        let due = std::mem::take(&mut self.resize_pending) && !self.resize_listeners.is_empty();
        if due {
            self.stats.resizes_delivered += 1;
        }
        due
    }

    /// Consume the frame requests made since the last refresh. True if any is
    /// still live; cancelled requests are discarded without firing.
    pub fn take_frame(&mut self) -> bool {
        let due = self
            .frame_requests
            .drain(..)
            .filter(|flag| flag.swap(false, Ordering::Relaxed))
            .count()
            > 0;
        if due {
            self.stats.frames_delivered += 1;
        }
        due
    }

    /// Whether a live frame request is waiting for the next refresh.
    pub fn frame_pending(&self) -> bool {
        self.live_frame_requests() > 0
    }

    pub fn live_frame_requests(&self) -> usize {
        self.frame_requests
            .iter()
            .filter(|flag| flag.load(Ordering::Relaxed))
            .count()
    }

    pub fn live_resize_listeners(&self) -> usize {
        self.resize_listeners
            .iter()
            .filter(|flag| flag.load(Ordering::Relaxed))
            .count()
    }

    pub fn stats(&self) -> HostStats {
        self.stats
    }
}

impl FrameHost for ManualHost {
    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn request_animation_frame(&mut self) -> Subscription {
        let (subscription, flag) = Subscription::pair();
        self.frame_requests.push(flag);
        self.stats.frames_requested += 1;
        subscription
    }

    fn listen_resize(&mut self) -> Subscription {
        let (subscription, flag) = Subscription::pair();
        self.resize_listeners.push(flag);
        subscription
    }
}
