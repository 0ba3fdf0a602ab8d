use glam::Vec2;
use pillar_core::Rgba;
use serde::Serialize;
use std::ops::{Deref, DerefMut};

use crate::host::Size;

/// How new paint combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CompositeMode {
    /// Normal alpha blending.
    #[default]
    SourceOver,
    /// Additive blending: overlapping strokes brighten each other.
    Lighter,
}

/// Axis-aligned rectangle in the current (possibly transformed) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Corners in winding order: min, (max.x, min.y), max, (min.x, max.y).
    pub fn corners(&self) -> [Vec2; 4] {
        let max = self.max();
        [
            self.min,
            Vec2::new(max.x, self.min.y),
            max,
            Vec2::new(self.min.x, max.y),
        ]
    }
}

/// One colour stop of a gradient; `offset` in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Rgba,
}

/// Gradient along the line from `start` to `end`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearGradient {
    pub start: Vec2,
    pub end: Vec2,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end, stops: Vec::new() }
    }

    pub fn with_stop(mut self, offset: f32, color: Rgba) -> Self {
        self.stops.push(ColorStop { offset: offset.clamp(0.0, 1.0), color });
        self
    }

    /// Colour at parameter `t` along the gradient line.
    pub fn color_at(&self, t: f32) -> Rgba {
        let Some(first) = self.stops.first() else {
            return Rgba::TRANSPARENT;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let f = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return Rgba::new(
                    a.color.r + (b.color.r - a.color.r) * f,
                    a.color.g + (b.color.g - a.color.g) * f,
                    a.color.b + (b.color.b - a.color.b) * f,
                    a.color.a + (b.color.a - a.color.a) * f,
                );
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}

/// Fill style for [`DrawingSurface::fill_rect`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    Solid(Rgba),
    Linear(LinearGradient),
}

/// Immediate-mode 2D drawing target.
///
/// Mirrors the subset of a canvas 2D context the pillar needs. `save` and
/// `restore` push and pop both the affine transform and the composite mode.
pub trait DrawingSurface {
    /// Backing size in pixels.
    fn size(&self) -> Size;

    /// Resize the backing store. Drawing state is reset to the identity.
    fn resize(&mut self, size: Size);

    /// Whether drawing calls will land anywhere.
    fn is_ready(&self) -> bool {
        true
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint);

    /// Stroke an open polyline through `points`.
    fn stroke_path(&mut self, points: &[Vec2], width: f32, color: Rgba);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, offset: Vec2);

    fn rotate(&mut self, radians: f32);

    fn set_composite(&mut self, mode: CompositeMode);
}

/// Saves the surface state on creation and restores it on drop.
///
/// Any transform or composite change made through the guard is reverted on
/// every exit path, unwinding included.
pub struct SavedState<'a, S: DrawingSurface + ?Sized> {
    surface: &'a mut S,
}

impl<'a, S: DrawingSurface + ?Sized> SavedState<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        surface.save();
        Self { surface }
    }
}

impl<S: DrawingSurface + ?Sized> Deref for SavedState<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> DerefMut for SavedState<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.surface
    }
}

impl<S: DrawingSurface + ?Sized> Drop for SavedState<'_, S> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}
