//! In-memory drawing surface that records every call.
//!
//! Used for golden-frame tests and benchmarks. Each paint command carries the
//! transform and composite mode in effect when it was issued, so a recorded
//! frame can be checked without rasterising anything.

use glam::{Affine2, Vec2};
use pillar_core::Rgba;
use serde::Serialize;

use crate::host::Size;
use crate::surface::{CompositeMode, DrawingSurface, Paint, Rect};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    Resize {
        size: Size,
    },
    FillRect {
        rect: Rect,
        paint: Paint,
        /// Column-major 2x3 transform, as `Affine2::to_cols_array`.
        transform: [f32; 6],
        composite: CompositeMode,
    },
    StrokePath {
        points: Vec<Vec2>,
        width: f32,
        color: Rgba,
        transform: [f32; 6],
        composite: CompositeMode,
    },
    Save,
    Restore,
    Translate {
        offset: Vec2,
    },
    Rotate {
        radians: f32,
    },
    SetComposite {
        mode: CompositeMode,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
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

/// A [`DrawingSurface`] that keeps a log instead of pixels.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    ready: bool,
    state: State,
    stack: Vec<State>,
    commands: Vec<DrawCommand>,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ready: true,
            ..Default::default()
        }
    }

    /// A surface whose host has no drawing context yet.
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drain the log, e.g. between frames.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Current save-stack depth.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Affine2 {
        self.state.transform
    }

    pub fn composite(&self) -> CompositeMode {
        self.state.composite
    }

    /// `restore` calls made with an empty save stack.
    pub fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// The log as pretty JSON, for golden-frame fixtures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.commands)
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.state = State::default();
        self.stack.clear();
        self.commands.push(DrawCommand::Resize { size });
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            paint: paint.clone(),
            transform: self.state.transform.to_cols_array(),
            composite: self.state.composite,
        });
    }

    fn stroke_path(&mut self, points: &[Vec2], width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokePath {
            points: points.to_vec(),
            width,
            color,
            transform: self.state.transform.to_cols_array(),
            composite: self.state.composite,
        });
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some(state) => self.state = state,
            None => self.unbalanced_restores += 1,
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, offset: Vec2) {
        self.state.transform = self.state.transform * Affine2::from_translation(offset);
        self.commands.push(DrawCommand::Translate { offset });
    }

    fn rotate(&mut self, radians: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(radians);
        self.commands.push(DrawCommand::Rotate { radians });
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
        self.commands.push(DrawCommand::SetComposite { mode });
    }
}
