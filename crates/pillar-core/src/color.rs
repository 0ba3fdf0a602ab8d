use serde::{Deserialize, Serialize};
use std::fmt;

/// Straight (non-premultiplied) RGBA colour with channels in 0..1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

/// Page background behind the pillar (`#090014`).
pub const BACKGROUND: Rgba = Rgba {
    r: 9.0 / 255.0,
    g: 0.0,
    b: 20.0 / 255.0,
    a: 1.0,
};

/// Core violet of the centre glow (`rgba(139, 92, 246, 0.1)`).
pub const GLOW_VIOLET: Rgba = Rgba {
    r: 139.0 / 255.0,
    g: 92.0 / 255.0,
    b: 246.0 / 255.0,
    a: 0.1,
};

impl Default for Rgba {
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0.0, g: 0.0, b: 0.0, a: 0.0 };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 1.0)
    }

    /// 8-bit colour channels with a fractional alpha, like CSS `rgba()`.
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a,
        }
    }

    /// Parse `#rrggbb` or `#rgb`.
    pub fn parse_hex(text: &str) -> Option<Rgba> {
        let digits = text.strip_prefix('#')?;
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match digits.len() {
            6 => Some(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let short = |i: usize| channel(&digits[i..i + 1]).map(|v| v * 17);
                Some(Self::from_rgb8(short(0)?, short(1)?, short(2)?))
            }
            _ => None,
        }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Colour channels quantised to 8 bits, alpha included.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, _] = self.to_rgba8();
        write!(f, "rgba({r},{g},{b},{})", self.a)
    }
}

/// Hue/saturation/lightness colour as written in CSS `hsla()`.
///
/// `saturation` and `lightness` are fractions (0.8 means 80%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub hue_degrees: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub alpha: f32,
}

impl Hsla {
    pub fn new(hue_degrees: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        Self { hue_degrees, saturation, lightness, alpha }
    }

    /// CSS Color 4 HSL to sRGB conversion.
    pub fn to_rgba(&self) -> Rgba {
        let h = self.hue_degrees.rem_euclid(360.0);
        let s = self.saturation.clamp(0.0, 1.0);
        let l = self.lightness.clamp(0.0, 1.0);
        let a = s * l.min(1.0 - l);
        let channel = |n: f32| {
            let k = (n + h / 30.0) % 12.0;
            l - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
        };
        Rgba::new(channel(0.0), channel(8.0), channel(4.0), self.alpha)
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Rgba {
        hsla.to_rgba()
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({:.1}, {}%, {}%, {})",
            self.hue_degrees,
            (self.saturation * 100.0).round(),
            (self.lightness * 100.0).round(),
            self.alpha
        )
    }
}
