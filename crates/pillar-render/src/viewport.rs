use log::{debug, warn};

use crate::host::{FrameHost, Size};
use crate::surface::DrawingSurface;

/// Dimensions the render loop draws against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportMetrics {
    pub size: Size,
    /// `sqrt(width² + height²)`.
    pub diagonal: f64,
}

impl ViewportMetrics {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            diagonal: size.diagonal(),
        }
    }
}

/// Keeps the backing surface matched to the host viewport.
#[derive(Debug, Default)]
pub struct ViewportAdapter {
    metrics: ViewportMetrics,
    warned_empty: bool,
}

impl ViewportAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the host size, resize the surface to it and recompute the diagonal.
    ///
    /// A zero-area viewport is not an error; the pillar simply draws nothing
    /// visible until the host reports a usable size.
    pub fn sync<S: DrawingSurface + ?Sized>(
        &mut self,
        host: &impl FrameHost,
        surface: &mut S,
    ) -> ViewportMetrics {
        let size = host.viewport_size();
        surface.resize(size);
        self.metrics = ViewportMetrics::new(size);

        if size.is_empty() {
            if !self.warned_empty {
                warn!("light pillar viewport is empty ({} x {})", size.width, size.height);
                self.warned_empty = true;
            }
        } else {
            self.warned_empty = false;
            debug!(
                "light pillar viewport {} x {}, diagonal {:.1}",
                size.width, size.height, self.metrics.diagonal
            );
        }

        self.metrics
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualHost;
    use crate::recording::RecordingSurface;

    #[test]
    fn test_sync_resizes_surface() {
        let host = ManualHost::new(Size::new(1000.0, 800.0));
        let mut surface = RecordingSurface::new(Size::ZERO);
        let mut adapter = ViewportAdapter::new();

        let metrics = adapter.sync(&host, &mut surface);

        assert_eq!(surface.size(), Size::new(1000.0, 800.0));
        assert!((metrics.diagonal - 1280.6248).abs() < 1e-3);
        assert_eq!(adapter.metrics(), metrics);
    }

    #[test]
    fn test_sync_tracks_changes() {
        let mut host = ManualHost::new(Size::new(3.0, 4.0));
        let mut surface = RecordingSurface::new(Size::ZERO);
        let mut adapter = ViewportAdapter::new();
        assert_eq!(adapter.sync(&host, &mut surface).diagonal, 5.0);

        host.set_viewport(Size::new(6.0, 8.0));
        assert_eq!(adapter.sync(&host, &mut surface).diagonal, 10.0);
        assert_eq!(surface.size(), Size::new(6.0, 8.0));
    }

    #[test]
    fn test_empty_viewport() {
        let host = ManualHost::new(Size::ZERO);
        let mut surface = RecordingSurface::new(Size::new(5.0, 5.0));
        let metrics = ViewportAdapter::new().sync(&host, &mut surface);
        assert_eq!(metrics.diagonal, 0.0);
        assert!(surface.size().is_empty());
    }
}
