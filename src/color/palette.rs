//! Brick color palettes and nearest-color matching

use std::cmp::Ordering;

use crate::color::distance::{DistanceWeights, distance};
use crate::color::value::{Color, ColorId, Rgb};
use crate::io::error::{MosaicError, Result};

/// Common plate colors as (name, hex), used when no inventory is supplied
pub const DEFAULT_COLORS: &[(&str, &str)] = &[
    ("White", "#ffffff"),
    ("Black", "#212121"),
    ("Light Bluish Gray", "#a0a5a9"),
    ("Dark Bluish Gray", "#6c6e68"),
    ("Red", "#c91a09"),
    ("Dark Red", "#720e0f"),
    ("Orange", "#fe8a18"),
    ("Bright Light Orange", "#f8bb3d"),
    ("Yellow", "#f2cd37"),
    ("Lime", "#bbe90b"),
    ("Green", "#237841"),
    ("Dark Green", "#184632"),
    ("Sand Green", "#a0bcac"),
    ("Medium Azure", "#36aebf"),
    ("Medium Blue", "#5a93db"),
    ("Blue", "#0055bf"),
    ("Dark Blue", "#0a3463"),
    ("Medium Lavender", "#ac78ba"),
    ("Magenta", "#923978"),
    ("Bright Pink", "#e4adc8"),
    ("Tan", "#e4cd9e"),
    ("Dark Tan", "#958a73"),
    ("Nougat", "#d09168"),
    ("Reddish Brown", "#582a12"),
];

/// Presentation order of palette entries
///
/// Grayscale entries come first by ascending brightness, then chromatic
/// entries by hue ascending, saturation descending, value descending. The
/// order also decides ties in [`find_closest`].
pub fn palette_order(a: &Color, b: &Color) -> Ordering {
    let (ha, hb) = (a.hsv(), b.hsv());
    match (ha.is_grayscale(), hb.is_grayscale()) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (true, true) => ha.v.total_cmp(&hb.v),
        (false, false) => ha
            .h
            .total_cmp(&hb.h)
            .then_with(|| hb.s.total_cmp(&ha.s))
            .then_with(|| hb.v.total_cmp(&ha.v)),
    }
}

/// Non-empty, sorted set of available brick colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Build a palette, sorting entries into presentation order
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty or two entries share an id
    pub fn new(mut colors: Vec<Color>) -> Result<Self> {
        if colors.is_empty() {
            return Err(MosaicError::EmptyPalette);
        }

        let mut ids: Vec<ColorId> = colors.iter().map(Color::id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair.first() == pair.get(1)) {
            return Err(crate::io::error::invalid_parameter(
                "palette",
                &format!("{pair:?}"),
                &"color ids must be unique",
            ));
        }

        colors.sort_by(palette_order);
        Ok(Self { colors })
    }

    /// Palette of [`DEFAULT_COLORS`] with ids assigned in declaration order
    ///
    /// # Errors
    ///
    /// Returns an error only if the built-in table is malformed
    pub fn default_lego() -> Result<Self> {
        let colors = DEFAULT_COLORS
            .iter()
            .enumerate()
            .map(|(index, &(name, hex))| {
                Ok(Color::new(index as ColorId + 1, name, Rgb::from_hex(hex)?))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(colors)
    }

    /// Entries in presentation order
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Look up a color by id
    pub fn by_id(&self, id: ColorId) -> Option<&Color> {
        self.colors.iter().find(|color| color.id() == id)
    }

    /// Look up a color by name, ignoring ASCII case
    pub fn by_name(&self, name: &str) -> Option<&Color> {
        self.colors
            .iter()
            .find(|color| color.name().eq_ignore_ascii_case(name))
    }
}

/// Nearest palette entry to `rgb` under `weights`
///
/// Linear scan; the first entry in palette order wins ties.
///
/// # Errors
///
/// Returns [`MosaicError::EmptyPalette`] if `palette` has no entries
pub fn find_closest<'a>(
    rgb: Rgb,
    palette: &'a [Color],
    weights: DistanceWeights,
) -> Result<&'a Color> {
    let target = rgb.to_hsv();
    let mut best: Option<(&Color, f64)> = None;

    for color in palette {
        let candidate = distance(target, color.hsv(), weights);
        match best {
            Some((_, best_distance)) if candidate >= best_distance => {}
            _ => best = Some((color, candidate)),
        }
    }

    best.map(|(color, _)| color).ok_or(MosaicError::EmptyPalette)
}

/// Matches arbitrary RGB values against an owned palette snapshot
#[derive(Debug, Clone)]
pub struct ColorMatcher {
    palette: Palette,
    weights: DistanceWeights,
}

impl ColorMatcher {
    /// Create a matcher using the default distance weights
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            weights: DistanceWeights::default(),
        }
    }

    /// Replace the distance weights
    #[must_use]
    pub fn with_weights(mut self, weights: DistanceWeights) -> Self {
        self.weights = weights;
        self
    }

    /// New matcher over `palette` with the same weights
    ///
    /// The current matcher is left untouched, so snapshots handed out earlier
    /// keep matching against the palette they were created with.
    #[must_use]
    pub fn reload(&self, palette: Palette) -> Self {
        Self {
            palette,
            weights: self.weights,
        }
    }

    /// The palette this matcher was built with
    pub const fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Distance weights in use
    pub const fn weights(&self) -> DistanceWeights {
        self.weights
    }

    /// Nearest palette color to `rgb`
    ///
    /// # Errors
    ///
    /// Cannot fail for a palette built through [`Palette::new`], which
    /// rejects empty input
    pub fn find_closest(&self, rgb: Rgb) -> Result<&Color> {
        find_closest(rgb, self.palette.colors(), self.weights)
    }
}
