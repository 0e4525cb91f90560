//! Color value types with derived hex and HSV representations

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::io::configuration::GRAYSCALE_SATURATION_THRESHOLD;
use crate::io::error::{Result, invalid_parameter};

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create an RGB triple
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not six hexadecimal digits
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            digits
                .get(range)
                .and_then(|part| u8::from_str_radix(part, 16).ok())
        };

        match (digits.len(), channel(0..2), channel(2..4), channel(4..6)) {
            (6, Some(r), Some(g), Some(b)) => Ok(Self::new(r, g, b)),
            _ => Err(invalid_parameter(
                "hex",
                &hex,
                &"expected six hexadecimal digits",
            )),
        }
    }

    /// Lowercase `#rrggbb` representation
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSV with hue in degrees and saturation/value on a 0-100 scale
    pub fn to_hsv(self) -> Hsv {
        let r = f64::from(self.r) / 255.0;
        let g = f64::from(self.g) / 255.0;
        let b = f64::from(self.b) / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let hue = if delta <= 0.0 {
            0.0
        } else if (max - r).abs() < f64::EPSILON {
            60.0 * ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };

        let saturation = if max <= 0.0 { 0.0 } else { delta / max };

        Hsv {
            h: hue.rem_euclid(360.0),
            s: saturation * 100.0,
            v: max * 100.0,
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue angle in degrees
    pub h: f64,
    /// Saturation percentage
    pub s: f64,
    /// Value (brightness) percentage
    pub v: f64,
}

impl Hsv {
    /// Create an HSV value
    pub const fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Whether hue is too unreliable to compare at this saturation
    pub fn is_grayscale(&self) -> bool {
        self.s <= GRAYSCALE_SATURATION_THRESHOLD
    }
}

/// Identifier of a color within a palette
pub type ColorId = u32;

/// A named brick color
///
/// RGB is the only stored channel data; hex and HSV are always derived from
/// it so they cannot drift. Equality and hashing follow the full value, and
/// palettes guarantee ids are unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    id: ColorId,
    name: String,
    rgb: Rgb,
}

impl Color {
    /// Create a color
    pub fn new(id: ColorId, name: impl Into<String>, rgb: Rgb) -> Self {
        Self {
            id,
            name: name.into(),
            rgb,
        }
    }

    /// Stable palette id
    pub const fn id(&self) -> ColorId {
        self.id
    }

    /// Canonical color name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored RGB value
    pub const fn rgb(&self) -> Rgb {
        self.rgb
    }

    /// Derived `#rrggbb` string
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }

    /// Derived HSV value
    pub fn hsv(&self) -> Hsv {
        self.rgb.to_hsv()
    }

    /// Grayscale test on the derived HSV value
    pub fn is_grayscale(&self) -> bool {
        self.hsv().is_grayscale()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.hex())
    }
}
