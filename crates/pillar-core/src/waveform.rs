//! Pure waveform math shared by every ray.
//!
//! A ray is a vertical polyline in the rotated pillar space. Its lateral
//! displacement is the product of two sines at different spatial frequencies,
//! tapered by a downward parabola so the pillar converges toward both ends.

/// Vertical distance between consecutive path points.
pub const PATH_STEP: f64 = 15.0;

/// Fraction of the viewport diagonal each ray extends from the centre.
pub const EXTENT_FACTOR: f64 = 0.8;

/// Time advanced per rendered frame.
pub const TIME_STEP: f64 = 0.002;

/// Rotation of the pillar axis (45 degrees).
pub const ROTATION: f64 = std::f64::consts::FRAC_PI_4;

/// Half of the centre glow width.
pub const GLOW_HALF_WIDTH: f64 = 300.0;

/// Peak of the taper parabola at the centre of the ray.
const TAPER_PEAK: f64 = 1.2;

/// Corner-to-corner length of a `width` x `height` viewport.
pub fn diagonal(width: f64, height: f64) -> f64 {
    (width * width + height * height).sqrt()
}

/// Half-length of a ray for the given diagonal.
pub fn extent(diagonal: f64) -> f64 {
    diagonal * EXTENT_FACTOR
}

/// Beating lateral offset at height `y`, before tapering.
pub fn offset(y: f64, frequency: f64, phase: f64, time: f64, amplitude: f64) -> f64 {
    (y * frequency + time + phase).sin() * (y * frequency * 0.5 + time * 1.5).sin() * amplitude
}

/// Taper applied to the offset: `1.2 - (|y| / limit)^2`.
///
/// Not clamped; reaches 0.2 at `|y| == limit`. A non-positive `limit` has no
/// extent to taper over and yields 0.
pub fn shape_multiplier(y: f64, limit: f64) -> f64 {
    if limit <= 0.0 {
        return 0.0;
    }
    let center_factor = y.abs() / limit;
    TAPER_PEAK - center_factor * center_factor
}

/// Final lateral position of a ray point at height `y`.
pub fn lateral_position(
    y: f64,
    lateral_offset: f64,
    frequency: f64,
    phase: f64,
    time: f64,
    amplitude: f64,
    limit: f64,
) -> f64 {
    let displacement = offset(y, frequency, phase, time, amplitude);
    lateral_offset + displacement * shape_multiplier(y, limit).max(0.0)
}

/// Sample heights `-limit, -limit + step, ...` strictly below `limit`.
pub fn sample_heights(limit: f64) -> impl Iterator<Item = f64> {
    let count = if limit > 0.0 {
        (2.0 * limit / PATH_STEP).ceil() as usize
    } else {
        0
    };
    (0..count).map(move |i| -limit + i as f64 * PATH_STEP)
}
