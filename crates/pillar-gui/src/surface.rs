use egui::{Color32, Mesh, Painter, Pos2, Shape, Stroke};
use glam::{Affine2, Vec2};
use pillar_core::Rgba;
use pillar_render::{CompositeMode, DrawingSurface, LinearGradient, Paint, Rect, Size};

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Affine2,
    composite: CompositeMode,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            composite: CompositeMode::SourceOver,
        }
    }
}

/// [`DrawingSurface`] that emits egui shapes through a [`Painter`].
///
/// egui has no transform stack, so one is kept here and applied to every
/// vertex. `Lighter` maps to egui's additive colours. The whole drawing is
/// scaled by `overfill` around the centre so rotated corners stay hidden.
pub struct EguiSurface<'a> {
    painter: &'a Painter,
    origin: Vec2,
    size: Size,
    overfill: f32,
    base: Affine2,
    state: State,
    stack: Vec<State>,
}

impl<'a> EguiSurface<'a> {
    pub fn new(painter: &'a Painter, rect: egui::Rect, overfill: f32) -> Self {
        let size = Size::new(rect.width(), rect.height());
        let origin = Vec2::new(rect.min.x, rect.min.y);
        Self {
            painter,
            origin,
            size,
            overfill,
            base: base_transform(origin, size, overfill),
            state: State::default(),
            stack: Vec::new(),
        }
    }

    /// Screen position of a point in the current drawing space.
    pub fn map_point(&self, point: Vec2) -> Pos2 {
        let p = (self.base * self.state.transform).transform_point2(point);
        Pos2::new(p.x, p.y)
    }

    /// Uniform scale from drawing space to screen, for stroke widths.
    fn scale(&self) -> f32 {
        (self.base * self.state.transform).matrix2.x_axis.length()
    }

    fn color(&self, color: Rgba) -> Color32 {
        let [r, g, b, a] = color.to_rgba8();
        let color = Color32::from_rgba_unmultiplied(r, g, b, a);
        match self.state.composite {
            CompositeMode::SourceOver => color,
            CompositeMode::Lighter => color.additive(),
        }
    }

    /// Triangle strip across the rectangle, cut at every gradient stop.
    ///
    /// Colours are evaluated per vertex, which is exact for gradients that
    /// run along one of the rectangle's axes.
    fn gradient_mesh(&self, rect: Rect, gradient: &LinearGradient) -> Mesh {
        let dir = gradient.end - gradient.start;
        let along_x = dir.x.abs() >= dir.y.abs();
        let max = rect.max();
        let (lo, hi) = if along_x {
            (rect.min.x, max.x)
        } else {
            (rect.min.y, max.y)
        };

        let mut cuts = vec![lo, hi];
        for stop in &gradient.stops {
            let p = gradient.start + dir * stop.offset;
            let cut = if along_x { p.x } else { p.y };
            if cut > lo && cut < hi {
                cuts.push(cut);
            }
        }
        cuts.sort_by(f32::total_cmp);
        cuts.dedup();

        let len2 = dir.length_squared();
        let t_at = |p: Vec2| {
            if len2 > 0.0 {
                (p - gradient.start).dot(dir) / len2
            } else {
                0.0
            }
        };

        let mut mesh = Mesh::default();
        for cut in cuts {
            let (a, b) = if along_x {
                (Vec2::new(cut, rect.min.y), Vec2::new(cut, max.y))
            } else {
                (Vec2::new(rect.min.x, cut), Vec2::new(max.x, cut))
            };
            let idx = mesh.vertices.len() as u32;
            mesh.colored_vertex(self.map_point(a), self.color(gradient.color_at(t_at(a))));
            mesh.colored_vertex(self.map_point(b), self.color(gradient.color_at(t_at(b))));
            if idx >= 2 {
                mesh.add_triangle(idx - 2, idx - 1, idx);
                mesh.add_triangle(idx - 1, idx + 1, idx);
            }
        }
        mesh
    }
}

fn base_transform(origin: Vec2, size: Size, overfill: f32) -> Affine2 {
    let center = Vec2::new(size.width / 2.0, size.height / 2.0);
    Affine2::from_translation(origin + center)
        * Affine2::from_scale(Vec2::splat(overfill))
        * Affine2::from_translation(-center)
}

impl DrawingSurface for EguiSurface<'_> {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.base = base_transform(self.origin, size, self.overfill);
        self.state = State::default();
        self.stack.clear();
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        match paint {
            Paint::Solid(color) => {
                let points = rect.corners().map(|c| self.map_point(c)).to_vec();
                self.painter
                    .add(Shape::convex_polygon(points, self.color(*color), Stroke::NONE));
            }
            Paint::Linear(gradient) => {
                let mesh = self.gradient_mesh(rect, gradient);
                self.painter.add(Shape::mesh(mesh));
            }
        }
    }

    fn stroke_path(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        if points.len() < 2 {
            return;
        }
        let mapped: Vec<Pos2> = points.iter().map(|p| self.map_point(*p)).collect();
        let stroke = Stroke::new(width * self.scale(), self.color(color));
        self.painter.add(Shape::line(mapped, stroke));
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(radians);
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Context, LayerId};

    fn painter(ctx: &Context, size: egui::Vec2) -> Painter {
        let rect = egui::Rect::from_min_size(Pos2::ZERO, size);
        Painter::new(ctx.clone(), LayerId::background(), rect)
    }

    #[test]
    fn test_overfill_scales_about_centre() {
        let ctx = Context::default();
        let painter = painter(&ctx, egui::vec2(200.0, 100.0));
        let surface = EguiSurface::new(&painter, painter.clip_rect(), 1.2);

        let centre = surface.map_point(Vec2::new(100.0, 50.0));
        assert!((centre.x - 100.0).abs() < 1e-4 && (centre.y - 50.0).abs() < 1e-4);

        let corner = surface.map_point(Vec2::ZERO);
        assert!((corner.x + 20.0).abs() < 1e-4);
        assert!((corner.y + 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_save_restore_transform() {
        let ctx = Context::default();
        let painter = painter(&ctx, egui::vec2(100.0, 100.0));
        let mut surface = EguiSurface::new(&painter, painter.clip_rect(), 1.0);

        surface.save();
        surface.translate(Vec2::new(50.0, 50.0));
        surface.rotate(std::f32::consts::FRAC_PI_2);
        let p = surface.map_point(Vec2::new(10.0, 0.0));
        assert!((p.x - 50.0).abs() < 1e-4 && (p.y - 60.0).abs() < 1e-4);
        surface.restore();

        let p = surface.map_point(Vec2::new(10.0, 0.0));
        assert!((p.x - 10.0).abs() < 1e-4 && p.y.abs() < 1e-4);
        // Extra restores are ignored.
        surface.restore();
    }

    #[test]
    fn test_lighter_is_additive() {
        let ctx = Context::default();
        let painter = painter(&ctx, egui::vec2(10.0, 10.0));
        let mut surface = EguiSurface::new(&painter, painter.clip_rect(), 1.0);
        let violet = Rgba::from_rgba8(139, 92, 246, 0.5);

        assert!(surface.color(violet).a() > 0);
        surface.set_composite(CompositeMode::Lighter);
        assert_eq!(surface.color(violet).a(), 0);
    }

    #[test]
    fn test_gradient_mesh_cut_at_stops() {
        let ctx = Context::default();
        let painter = painter(&ctx, egui::vec2(1000.0, 1000.0));
        let surface = EguiSurface::new(&painter, painter.clip_rect(), 1.0);
        let gradient = LinearGradient::new(Vec2::new(-300.0, 0.0), Vec2::new(300.0, 0.0))
            .with_stop(0.0, Rgba::TRANSPARENT)
            .with_stop(0.5, pillar_core::GLOW_VIOLET)
            .with_stop(1.0, Rgba::TRANSPARENT);

        let mesh = surface.gradient_mesh(Rect::new(-300.0, -500.0, 600.0, 1000.0), &gradient);

        // Three cuts (left, centre, right), two vertices each, four triangles.
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.len(), 12);
        assert_eq!(mesh.vertices[0].color, Color32::TRANSPARENT);
        assert!(mesh.vertices[2].color.a() > 0);
    }
}
