use glam::Vec2;
use pillar_core::waveform::{self, GLOW_HALF_WIDTH, ROTATION, TIME_STEP};
use pillar_core::{Rgba, RayField, BACKGROUND, GLOW_VIOLET};

use crate::surface::{CompositeMode, DrawingSurface, LinearGradient, Paint, Rect, SavedState};
use crate::viewport::ViewportMetrics;

/// Everything the loop carries from one frame to the next.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderState {
    /// Global animation clock. Only ever grows.
    pub time: f64,
    pub viewport: ViewportMetrics,
}

/// What one call to [`RenderLoop::draw_frame`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    pub time: f64,
    pub rays_stroked: usize,
    /// False when the surface was not ready and nothing was drawn.
    pub drawn: bool,
}

/// Draws complete pillar frames onto a [`DrawingSurface`].
///
/// Scheduling is left to the caller: one `draw_frame` per display refresh.
#[derive(Debug, Default)]
pub struct RenderLoop {
    state: RenderState,
    frames: u64,
    scratch: Vec<Vec2>,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// Frames drawn since creation.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Adopt new viewport metrics. The clock keeps running.
    pub fn set_viewport(&mut self, viewport: ViewportMetrics) {
        self.state.viewport = viewport;
    }

    /// Draw one frame:
    ///
    /// 1. opaque background over the whole surface, untransformed
    /// 2. advance the clock
    /// 3. move to the centre and rotate 45 degrees (reverted at the end)
    /// 4. the violet centre glow along the rotated axis
    /// 5. every ray, additively blended
    pub fn draw_frame<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        field: &RayField,
    ) -> FrameStats {
        let ready = surface.is_ready();
        let size = self.state.viewport.size;

        if ready {
            surface.fill_rect(Rect::from_size(size), &Paint::Solid(BACKGROUND));
        }

        self.state.time += TIME_STEP;
        self.frames += 1;

        if !ready {
            return FrameStats {
                time: self.state.time,
                rays_stroked: 0,
                drawn: false,
            };
        }

        let diagonal = self.state.viewport.diagonal;
        let limit = waveform::extent(diagonal);
        let time = self.state.time;

        let mut rotated = SavedState::new(surface);
        rotated.translate(Vec2::new(size.width / 2.0, size.height / 2.0));
        rotated.rotate(ROTATION as f32);

        rotated.fill_rect(glow_rect(diagonal), &Paint::Linear(glow_gradient()));

        let mut rays_stroked = 0;
        for ray in field {
            ray.path_into(time, limit, &mut self.scratch);
            if self.scratch.len() < 2 {
                continue;
            }
            let color: Rgba = ray.color().into();
            rotated.set_composite(CompositeMode::Lighter);
            rotated.stroke_path(&self.scratch, ray.stroke_width() as f32, color);
            rotated.set_composite(CompositeMode::SourceOver);
            rays_stroked += 1;
        }

        FrameStats {
            time,
            rays_stroked,
            drawn: true,
        }
    }
}

/// Tall rectangle centred on the rotated axis, spanning ±diagonal.
fn glow_rect(diagonal: f64) -> Rect {
    let half = GLOW_HALF_WIDTH as f32;
    let diagonal = diagonal as f32;
    Rect::new(-half, -diagonal, 2.0 * half, 2.0 * diagonal)
}

/// Transparent → violet → transparent across the glow width.
fn glow_gradient() -> LinearGradient {
    let half = GLOW_HALF_WIDTH as f32;
    LinearGradient::new(Vec2::new(-half, 0.0), Vec2::new(half, 0.0))
        .with_stop(0.0, Rgba::TRANSPARENT)
        .with_stop(0.5, GLOW_VIOLET)
        .with_stop(1.0, Rgba::TRANSPARENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Size;
    use crate::recording::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn setup(size: Size) -> (RenderLoop, RecordingSurface, RayField) {
        let mut render_loop = RenderLoop::new();
        render_loop.set_viewport(ViewportMetrics::new(size));
        let surface = RecordingSurface::new(size);
        let field = RayField::generate(&mut StdRng::seed_from_u64(5));
        (render_loop, surface, field)
    }

    #[test]
    fn test_time_advances_by_step() {
        let (mut render_loop, mut surface, field) = setup(Size::new(400.0, 300.0));
        let mut previous = render_loop.state().time;
        for _ in 0..500 {
            let stats = render_loop.draw_frame(&mut surface, &field);
            assert!(stats.time > previous);
            assert!((stats.time - previous - TIME_STEP).abs() < 1e-12);
            previous = stats.time;
        }
        assert_eq!(render_loop.frames(), 500);
    }

    #[test]
    fn test_frame_command_order() {
        let (mut render_loop, mut surface, field) = setup(Size::new(400.0, 300.0));
        let stats = render_loop.draw_frame(&mut surface, &field);
        assert_eq!(stats.rays_stroked, field.len());

        let commands = surface.commands();
        assert!(matches!(
            &commands[0],
            DrawCommand::FillRect { paint: Paint::Solid(c), .. } if *c == BACKGROUND
        ));
        assert_eq!(commands[1], DrawCommand::Save);
        assert_eq!(commands[2], DrawCommand::Translate { offset: Vec2::new(200.0, 150.0) });
        assert!(matches!(commands[3], DrawCommand::Rotate { .. }));
        assert!(matches!(
            &commands[4],
            DrawCommand::FillRect { paint: Paint::Linear(_), .. }
        ));
        assert_eq!(commands.last(), Some(&DrawCommand::Restore));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn test_background_untransformed() {
        let (mut render_loop, mut surface, field) = setup(Size::new(400.0, 300.0));
        render_loop.draw_frame(&mut surface, &field);
        surface.take_commands();
        render_loop.draw_frame(&mut surface, &field);

        match &surface.commands()[0] {
            DrawCommand::FillRect { rect, transform, composite, .. } => {
                assert_eq!(*rect, Rect::new(0.0, 0.0, 400.0, 300.0));
                assert_eq!(*transform, glam::Affine2::IDENTITY.to_cols_array());
                assert_eq!(*composite, CompositeMode::SourceOver);
            }
            other => panic!("expected background fill, got {other:?}"),
        }
    }

    #[test]
    fn test_rays_stroked_additively() {
        let (mut render_loop, mut surface, field) = setup(Size::new(400.0, 300.0));
        render_loop.draw_frame(&mut surface, &field);

        let strokes: Vec<_> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokePath { composite, width, .. } => Some((*composite, *width)),
                _ => None,
            })
            .collect();
        assert_eq!(strokes.len(), field.len());
        for ((composite, width), ray) in strokes.iter().zip(field.iter()) {
            assert_eq!(*composite, CompositeMode::Lighter);
            assert_eq!(*width, ray.stroke_width() as f32);
        }
        assert_eq!(surface.composite(), CompositeMode::SourceOver);
    }

    #[test]
    fn test_glow_spans_diagonal() {
        let (mut render_loop, mut surface, field) = setup(Size::new(300.0, 400.0));
        render_loop.draw_frame(&mut surface, &field);
        let glow = surface.commands().iter().find_map(|c| match c {
            DrawCommand::FillRect { rect, paint: Paint::Linear(g), .. } => Some((*rect, g.clone())),
            _ => None,
        });
        let (rect, gradient) = glow.expect("glow fill");
        assert_eq!(rect, Rect::new(-300.0, -500.0, 600.0, 1000.0));
        assert_eq!(gradient.stops.len(), 3);
        assert_eq!(gradient.stops[1].color, GLOW_VIOLET);
    }

    #[test]
    fn test_unready_surface_skips_drawing() {
        let (mut render_loop, _, field) = setup(Size::new(400.0, 300.0));
        let mut surface = RecordingSurface::unavailable();
        let stats = render_loop.draw_frame(&mut surface, &field);
        assert!(!stats.drawn);
        assert!(surface.commands().is_empty());
        assert!((render_loop.state().time - TIME_STEP).abs() < 1e-12);
    }

    #[test]
    fn test_empty_viewport_strokes_nothing() {
        let (mut render_loop, mut surface, field) = setup(Size::ZERO);
        let stats = render_loop.draw_frame(&mut surface, &field);
        assert!(stats.drawn);
        assert_eq!(stats.rays_stroked, 0);
        assert_eq!(surface.depth(), 0);
    }
}
