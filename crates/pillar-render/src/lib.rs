pub mod host;
pub mod pillar;
pub mod recording;
pub mod render_loop;
pub mod surface;
pub mod viewport;

pub use host::{FrameHost, HostStats, ManualHost, Size, Subscription};
pub use pillar::LightPillar;
pub use recording::{DrawCommand, RecordingSurface};
pub use render_loop::{FrameStats, RenderLoop, RenderState};
pub use surface::{ColorStop, CompositeMode, DrawingSurface, LinearGradient, Paint, Rect, SavedState};
pub use viewport::{ViewportAdapter, ViewportMetrics};
