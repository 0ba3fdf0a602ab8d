use glam::Vec2;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use crate::color::Hsla;
use crate::waveform;

/// Lateral offset from the pillar axis.
pub const LATERAL_OFFSET_RANGE: RangeInclusive<f64> = -200.0..=200.0;
/// Stroke width in surface units.
pub const STROKE_WIDTH_RANGE: RangeInclusive<f64> = 5.0..=25.0;
/// Spatial frequency of the wave.
pub const FREQUENCY_RANGE: RangeInclusive<f64> = 0.002..=0.012;
/// Peak lateral displacement.
pub const AMPLITUDE_RANGE: RangeInclusive<f64> = 50.0..=150.0;
/// Drift speed. Generated and kept, but never applied: all rays share one clock.
pub const DRIFT_SPEED_RANGE: RangeInclusive<f64> = 0.005..=0.025;
/// Stroke opacity.
pub const ALPHA_RANGE: RangeInclusive<f64> = 0.1..=0.4;
/// Violet to pink.
pub const HUE_RANGE: RangeInclusive<f64> = 250.0..=310.0;
/// Phase is half-open: `[0, 2π)`.
pub const PHASE_END: f64 = TAU;

pub const SATURATION: f32 = 0.8;
pub const LIGHTNESS: f32 = 0.65;

/// One wavy light stroke of the pillar.
///
/// All parameters are drawn once at construction. A ray is never mutated;
/// the field replaces rays wholesale when it regenerates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ray {
    lateral_offset: f64,
    stroke_width: f64,
    frequency: f64,
    amplitude: f64,
    phase: f64,
    drift_speed: f64,
    alpha: f64,
    hue: f64,
}

impl Ray {
    /// Draw every parameter independently and uniformly from its range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            lateral_offset: rng.gen_range(LATERAL_OFFSET_RANGE),
            stroke_width: rng.gen_range(STROKE_WIDTH_RANGE),
            frequency: rng.gen_range(FREQUENCY_RANGE),
            amplitude: rng.gen_range(AMPLITUDE_RANGE),
            phase: rng.gen_range(0.0..PHASE_END),
            drift_speed: rng.gen_range(DRIFT_SPEED_RANGE),
            alpha: rng.gen_range(ALPHA_RANGE),
            hue: rng.gen_range(HUE_RANGE),
        }
    }

    pub fn lateral_offset(&self) -> f64 {
        self.lateral_offset
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn drift_speed(&self) -> f64 {
        self.drift_speed
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Stroke colour: the ray's hue at 80% saturation, 65% lightness.
    pub fn color(&self) -> Hsla {
        Hsla::new(self.hue as f32, SATURATION, LIGHTNESS, self.alpha as f32)
    }

    /// Position of the ray at height `y` in pillar space.
    pub fn point_at(&self, y: f64, time: f64, limit: f64) -> Vec2 {
        let x = waveform::lateral_position(
            y,
            self.lateral_offset,
            self.frequency,
            self.phase,
            time,
            self.amplitude,
            limit,
        );
        Vec2::new(x as f32, y as f32)
    }

    /// The open polyline traced by this ray at `time`, from `-limit` upward.
    pub fn path(&self, time: f64, limit: f64) -> Vec<Vec2> {
        waveform::sample_heights(limit)
            .map(|y| self.point_at(y, time, limit))
            .collect()
    }

    /// Write the path into `out`, reusing its allocation.
    pub fn path_into(&self, time: f64, limit: f64, out: &mut Vec<Vec2>) {
        out.clear();
        out.extend(waveform::sample_heights(limit).map(|y| self.point_at(y, time, limit)));
    }
}
