//! Brick colors, perceptual distance and palette matching

/// HSV distance metric with grayscale handling
pub mod distance;
/// Palettes, palette ordering and nearest-color lookup
pub mod palette;
/// Color value types and conversions
pub mod value;

pub use palette::{ColorMatcher, Palette};
pub use value::{Color, ColorId, Hsv, Rgb};
