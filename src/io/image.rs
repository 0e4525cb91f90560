//! Image decoding and quantization into a color grid

use image::imageops::FilterType;
use image::{DynamicImage, Rgba};
use std::collections::HashMap;
use std::path::Path;

use crate::color::{Color, ColorMatcher, Rgb};
use crate::io::configuration::{DEFAULT_MOSAIC_WIDTH, MAX_MOSAIC_DIMENSION};
use crate::io::error::{MosaicError, Result, invalid_parameter};
use crate::spatial::ColorGrid;

/// Mosaic size in studs for an image, preserving aspect ratio when only one
/// side (or neither) is requested
pub fn mosaic_dimensions(
    image_width: u32,
    image_height: u32,
    width: Option<usize>,
    height: Option<usize>,
) -> (usize, usize) {
    let scale = |target: usize, from: u32, to: u32| -> usize {
        if from == 0 {
            return target;
        }
        ((target as f64 * f64::from(to) / f64::from(from)).round() as usize).max(1)
    };

    match (width, height) {
        (Some(w), Some(h)) => (w, h),
        (Some(w), None) => (w, scale(w, image_width, image_height)),
        (None, Some(h)) => (scale(h, image_height, image_width), h),
        (None, None) => (
            DEFAULT_MOSAIC_WIDTH,
            scale(DEFAULT_MOSAIC_WIDTH, image_width, image_height),
        ),
    }
}

fn validate_dimension(parameter: &'static str, value: usize) -> Result<u32> {
    if value == 0 || value > MAX_MOSAIC_DIMENSION {
        return Err(invalid_parameter(
            parameter,
            &value,
            &format!("must be between 1 and {MAX_MOSAIC_DIMENSION} studs"),
        ));
    }
    u32::try_from(value).map_err(|e| invalid_parameter(parameter, &value, &e))
}

/// Blend a pixel onto a white background
pub fn composite_on_white(pixel: Rgba<u8>) -> Rgb {
    let [r, g, b, a] = pixel.0;
    let alpha = u16::from(a);
    let blend = |channel: u8| -> u8 {
        let mixed = (u16::from(channel) * alpha + 255 * (255 - alpha) + 127) / 255;
        mixed.min(255) as u8
    };
    Rgb::new(blend(r), blend(g), blend(b))
}

/// Resize an image to `width x height` studs and match every pixel
///
/// Matches are memoized per distinct RGB value, which keeps large
/// photographs with few distinct colors cheap.
///
/// # Errors
///
/// Returns an error if a dimension is zero or above the maximum mosaic size
pub fn rasterize_image(
    image: &DynamicImage,
    width: usize,
    height: usize,
    matcher: &ColorMatcher,
) -> Result<ColorGrid> {
    let target_width = validate_dimension("width", width)?;
    let target_height = validate_dimension("height", height)?;

    let resized = image
        .resize_exact(target_width, target_height, FilterType::Triangle)
        .to_rgba8();

    let mut cache: HashMap<Rgb, Color> = HashMap::new();
    let mut rows: Vec<Vec<Color>> = Vec::with_capacity(height);
    for row in resized.rows() {
        let mut cells = Vec::with_capacity(width);
        for &pixel in row {
            let rgb = composite_on_white(pixel);
            let color = match cache.get(&rgb) {
                Some(color) => color.clone(),
                None => {
                    let color = matcher.find_closest(rgb)?.clone();
                    cache.insert(rgb, color.clone());
                    color
                }
            };
            cells.push(color);
        }
        rows.push(cells);
    }

    log::debug!(
        "rasterized {}x{} image into {width}x{height} studs using {} distinct colors",
        image.width(),
        image.height(),
        cache.len()
    );

    ColorGrid::from_rows(rows)
}

/// Load an image file and rasterize it
///
/// `width`/`height` follow [`mosaic_dimensions`].
///
/// # Errors
///
/// Returns an error if the file cannot be decoded or the size is invalid
pub fn rasterize_path<P: AsRef<Path>>(
    path: P,
    width: Option<usize>,
    height: Option<usize>,
    matcher: &ColorMatcher,
) -> Result<ColorGrid> {
    let path_buf = path.as_ref().to_path_buf();
    let image = image::open(&path_buf).map_err(|e| MosaicError::ImageLoad {
        path: path_buf,
        source: e,
    })?;

    let (grid_width, grid_height) =
        mosaic_dimensions(image.width(), image.height(), width, height);
    rasterize_image(&image, grid_width, grid_height, matcher)
}
