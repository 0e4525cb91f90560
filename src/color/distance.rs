//! Perceptually weighted HSV distance with grayscale-aware special cases
//!
//! Hue is meaningless for near-neutral colors, so the metric switches between
//! three regimes depending on how many of the two inputs are grayscale.

use crate::color::value::Hsv;
use crate::io::configuration::{
    DEFAULT_HUE_WEIGHT, DEFAULT_SATURATION_WEIGHT, DEFAULT_VALUE_WEIGHT, GRAY_CHROMATIC_PENALTY,
};

/// Per-channel weights of the distance metric
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceWeights {
    /// Weight of the normalized hue difference
    pub hue: f64,
    /// Weight of the saturation difference
    pub saturation: f64,
    /// Weight of the value difference
    pub value: f64,
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self {
            hue: DEFAULT_HUE_WEIGHT,
            saturation: DEFAULT_SATURATION_WEIGHT,
            value: DEFAULT_VALUE_WEIGHT,
        }
    }
}

/// Circular hue difference mapped onto `[0, 100]`
///
/// The raw difference wraps at 360 degrees so it never exceeds 180.
pub fn normalized_hue_difference(a: f64, b: f64) -> f64 {
    let raw = (a - b).rem_euclid(360.0);
    let circular = raw.min(360.0 - raw);
    circular / 180.0 * 100.0
}

/// Weighted distance between two HSV colors
///
/// - Two grayscale colors compare on saturation and a doubled value term.
/// - Grayscale against chromatic adds a fixed penalty so such pairs never
///   look close.
/// - Two chromatic colors use a weighted Euclidean distance over hue,
///   saturation and value.
pub fn distance(a: Hsv, b: Hsv, weights: DistanceWeights) -> f64 {
    let saturation = weights.saturation * (a.s - b.s);

    match (a.is_grayscale(), b.is_grayscale()) {
        (true, true) => {
            let value = 2.0 * weights.value * (a.v - b.v);
            saturation.hypot(value)
        }
        (true, false) | (false, true) => {
            let value = weights.value * (a.v - b.v);
            GRAY_CHROMATIC_PENALTY + saturation.hypot(value)
        }
        (false, false) => {
            let hue = weights.hue * normalized_hue_difference(a.h, b.h);
            let value = weights.value * (a.v - b.v);
            (hue * hue + saturation * saturation + value * value).sqrt()
        }
    }
}

/// Distance using the default weights
pub fn default_distance(a: Hsv, b: Hsv) -> f64 {
    distance(a, b, DistanceWeights::default())
}
