pub mod color;
pub mod field;
pub mod ray;
pub mod waveform;

pub use color::{Hsla, Rgba, BACKGROUND, GLOW_VIOLET};
pub use field::{RayField, RAY_COUNT};
pub use ray::Ray;
