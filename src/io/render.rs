//! PNG previews of placements and instruction steps

use image::{ImageBuffer, Rgba, RgbaImage};
use std::path::Path;

use crate::algorithm::instructions::{InstructionPlan, InstructionStep};
use crate::algorithm::placement::Placement;
use crate::color::Rgb;
use crate::io::configuration::OUTLINE_DARKEN_FACTOR;
use crate::io::error::{MosaicError, Result, invalid_parameter};

const BACKGROUND: Rgba<u8> = Rgba([235, 235, 235, 255]);

/// How a placement is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrickStyle {
    /// Filled rectangle with an outline
    Plain,
    /// Filled rectangle with an outline and a stud dot per cell
    Highlighted,
}

fn shade(rgb: Rgb, factor: f64) -> Rgba<u8> {
    let scale = |channel: u8| (f64::from(channel) * factor).round().clamp(0.0, 255.0) as u8;
    Rgba([scale(rgb.r), scale(rgb.g), scale(rgb.b), 255])
}

fn lighten(rgb: Rgb) -> Rgba<u8> {
    let lift = |channel: u8| channel.saturating_add((255 - channel) / 2);
    Rgba([lift(rgb.r), lift(rgb.g), lift(rgb.b), 255])
}

/// Blank canvas for a `width x height` stud mosaic
///
/// # Errors
///
/// Returns an error if `scale` is zero or the canvas would overflow `u32`
pub fn blank_canvas(width: usize, height: usize, scale: u32) -> Result<RgbaImage> {
    if scale == 0 {
        return Err(invalid_parameter("scale", &scale, &"must be at least 1"));
    }
    let pixel_width = u32::try_from(width)
        .ok()
        .and_then(|w| w.checked_mul(scale))
        .ok_or_else(|| invalid_parameter("width", &width, &"canvas too large"))?;
    let pixel_height = u32::try_from(height)
        .ok()
        .and_then(|h| h.checked_mul(scale))
        .ok_or_else(|| invalid_parameter("height", &height, &"canvas too large"))?;
    Ok(ImageBuffer::from_pixel(pixel_width, pixel_height, BACKGROUND))
}

/// Draw one placement onto `canvas`
pub fn draw_placement(canvas: &mut RgbaImage, placement: &Placement, scale: u32, style: BrickStyle) {
    let rgb = placement.color.rgb();
    let fill = shade(rgb, 1.0);
    let outline = shade(rgb, OUTLINE_DARKEN_FACTOR);
    let stud = lighten(rgb);

    let rect = placement.rect();
    let x0 = rect.x as u32 * scale;
    let y0 = rect.y as u32 * scale;
    let x1 = rect.right() as u32 * scale;
    let y1 = rect.bottom() as u32 * scale;

    for py in y0..y1.min(canvas.height()) {
        for px in x0..x1.min(canvas.width()) {
            let on_edge = px == x0 || py == y0 || px + 1 == x1 || py + 1 == y1;
            let color = if on_edge {
                outline
            } else if style == BrickStyle::Highlighted && is_stud_center(px, py, scale) {
                stud
            } else {
                fill
            };
            canvas.put_pixel(px, py, color);
        }
    }
}

// Dot of radius scale/4 centered in each stud cell
fn is_stud_center(px: u32, py: u32, scale: u32) -> bool {
    let half = scale / 2;
    let radius = (scale / 4).max(1);
    let dx = (px % scale).abs_diff(half);
    let dy = (py % scale).abs_diff(half);
    dx * dx + dy * dy <= radius * radius
}

/// Render all placements of a finished mosaic
///
/// # Errors
///
/// See [`blank_canvas`]
pub fn render_mosaic(
    placements: &[Placement],
    width: usize,
    height: usize,
    scale: u32,
) -> Result<RgbaImage> {
    let mut canvas = blank_canvas(width, height, scale)?;
    for placement in placements {
        draw_placement(&mut canvas, placement, scale, BrickStyle::Plain);
    }
    Ok(canvas)
}

/// Render the state after `step`: earlier bricks plain, this step's bricks
/// highlighted, later bricks absent
///
/// # Errors
///
/// See [`blank_canvas`]
pub fn render_step(
    plan: &InstructionPlan,
    step: &InstructionStep,
    width: usize,
    height: usize,
    scale: u32,
) -> Result<RgbaImage> {
    let mut canvas = blank_canvas(width, height, scale)?;
    for placement in plan.previously_placed(step) {
        draw_placement(&mut canvas, placement, scale, BrickStyle::Plain);
    }
    for placement in plan.placements(step) {
        draw_placement(&mut canvas, placement, scale, BrickStyle::Highlighted);
    }
    Ok(canvas)
}

/// Save a rendered image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the directory cannot be created or the image cannot
/// be encoded
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| MosaicError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save(output_path)
        .map_err(|e| MosaicError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
