//! The light pillar as a mountable component.
//!
//! One mount owns exactly one resize listener and at most one pending frame
//! request. Unmounting (or dropping the pillar) releases both together, so
//! repeated mount cycles never leave an orphaned loop behind.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::host::{FrameHost, Subscription};
use crate::render_loop::{FrameStats, RenderLoop, RenderState};
use crate::surface::DrawingSurface;
use crate::viewport::ViewportAdapter;
use pillar_core::RayField;

/// Host registrations owned by one mount.
#[derive(Debug)]
struct Mount {
    resize_listener: Subscription,
    frame_request: Option<Subscription>,
}

impl Mount {
    fn release(&self) {
        self.resize_listener.cancel();
        if let Some(request) = &self.frame_request {
            request.cancel();
        }
    }
}

/// Animated background of procedurally generated light rays.
pub struct LightPillar<R: Rng = StdRng> {
    rng: R,
    viewport: ViewportAdapter,
    field: RayField,
    render_loop: RenderLoop,
    mount: Option<Mount>,
}

impl LightPillar<StdRng> {
    /// Unseeded pillar: every run draws a different field.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible pillar for golden frames and benchmarks.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for LightPillar<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LightPillar<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            rng,
            viewport: ViewportAdapter::new(),
            field: RayField::empty(),
            render_loop: RenderLoop::new(),
            mount: None,
        }
    }

    /// Attach to a host: listen for resizes, size the surface, generate the
    /// field, draw the first frame and request the next one.
    ///
    /// Mounting an already mounted pillar first releases the old mount.
    pub fn mount<H, S>(&mut self, host: &mut H, surface: &mut S) -> FrameStats
    where
        H: FrameHost,
        S: DrawingSurface + ?Sized,
    {
        if self.mount.is_some() {
            self.unmount();
        }

        let resize_listener = host.listen_resize();
        self.mount = Some(Mount {
            resize_listener,
            frame_request: None,
        });
        self.reinitialize(host, surface);

        let size = self.render_loop.state().viewport.size;
        info!("light pillar mounted at {} x {}", size.width, size.height);

        self.frame(host, surface)
    }

    /// Release the resize listener and the pending frame request.
    pub fn unmount(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.release();
            info!(
                "light pillar unmounted after {} frames",
                self.render_loop.frames()
            );
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mount.is_some()
    }

    /// Handle a viewport change. Ignored unless mounted.
    pub fn handle_resize<H, S>(&mut self, host: &mut H, surface: &mut S)
    where
        H: FrameHost,
        S: DrawingSurface + ?Sized,
    {
        if self.mount.is_none() {
            return;
        }
        self.reinitialize(host, surface);
    }

    /// Draw the frame the host just delivered and request the next one.
    ///
    /// Returns `None` when no frame is outstanding, e.g. after unmount.
    pub fn on_animation_frame<H, S>(&mut self, host: &mut H, surface: &mut S) -> Option<FrameStats>
    where
        H: FrameHost,
        S: DrawingSurface + ?Sized,
    {
        let mount = self.mount.as_mut()?;
        mount.frame_request.take()?;
        Some(self.frame(host, surface))
    }

    pub fn field(&self) -> &RayField {
        &self.field
    }

    pub fn state(&self) -> &RenderState {
        self.render_loop.state()
    }

    /// Frames drawn over the pillar's lifetime.
    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    /// Whether a frame request is outstanding.
    pub fn frame_pending(&self) -> bool {
        self.mount
            .as_ref()
            .and_then(|mount| mount.frame_request.as_ref())
            .is_some()
    }

    fn reinitialize<H, S>(&mut self, host: &mut H, surface: &mut S)
    where
        H: FrameHost,
        S: DrawingSurface + ?Sized,
    {
        let metrics = self.viewport.sync(&*host, surface);
        self.render_loop.set_viewport(metrics);
        self.field.regenerate(&mut self.rng);
        debug!(
            "light pillar field regenerated (generation {})",
            self.field.generation()
        );
    }

    fn frame<H, S>(&mut self, host: &mut H, surface: &mut S) -> FrameStats
    where
        H: FrameHost,
        S: DrawingSurface + ?Sized,
    {
        let stats = self.render_loop.draw_frame(surface, &self.field);
        if let Some(mount) = self.mount.as_mut() {
            mount.frame_request = Some(host.request_animation_frame());
        }
        stats
    }
}

impl<R: Rng> Drop for LightPillar<R> {
    fn drop(&mut self) {
        self.unmount();
    }
}
