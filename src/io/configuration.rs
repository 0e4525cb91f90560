//! Mosaic constants and runtime configuration defaults

// Color matching
/// Saturation (0-100 scale) at or below which a color counts as grayscale
pub const GRAYSCALE_SATURATION_THRESHOLD: f64 = 10.0;
/// Fixed distance penalty between a grayscale and a chromatic color
pub const GRAY_CHROMATIC_PENALTY: f64 = 100.0;
/// Default weight of the normalized hue difference
pub const DEFAULT_HUE_WEIGHT: f64 = 3.0;
/// Default weight of the saturation difference
pub const DEFAULT_SATURATION_WEIGHT: f64 = 1.0;
/// Default weight of the value (brightness) difference
pub const DEFAULT_VALUE_WEIGHT: f64 = 1.0;

// Mosaic geometry
/// Default mosaic width in studs
pub const DEFAULT_MOSAIC_WIDTH: usize = 48;
/// Default mosaic height in studs
pub const DEFAULT_MOSAIC_HEIGHT: usize = 48;
// Safety limit to prevent oversized rasterization and instruction output
/// Maximum allowed mosaic dimension in studs
pub const MAX_MOSAIC_DIMENSION: usize = 512;

// Instruction sequencing
/// Default number of regions per side of the instruction layout
pub const DEFAULT_REGION_GRID_SIZE: usize = 3;
/// Default cap on bricks introduced in a single instruction step
pub const DEFAULT_BRICKS_PER_STEP: usize = 8;

// Rendering
/// Pixels per stud in preview renders
pub const DEFAULT_PREVIEW_SCALE: u32 = 16;
/// Factor applied to brick color channels for outlines
pub const OUTLINE_DARKEN_FACTOR: f64 = 0.6;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Suffix of the rendered preview image
pub const PREVIEW_SUFFIX: &str = "_mosaic.png";
/// Suffix of the parts list CSV
pub const PARTS_CSV_SUFFIX: &str = "_parts.csv";
/// Suffix of the parts list JSON
pub const PARTS_JSON_SUFFIX: &str = "_parts.json";
/// Suffix of the printable instructions
pub const INSTRUCTIONS_HTML_SUFFIX: &str = "_instructions.html";
/// Suffix of the machine-readable instructions
pub const INSTRUCTIONS_JSON_SUFFIX: &str = "_instructions.json";
/// Suffix of the purchase list CSV
pub const PURCHASE_CSV_SUFFIX: &str = "_purchase.csv";
/// Suffix of the manual lookup list
pub const MANUAL_LOOKUP_SUFFIX: &str = "_manual_lookup.json";
/// Suffix of the directory holding per-step renders
pub const STEP_IMAGES_SUFFIX: &str = "_steps";

/// Image extensions accepted by the batch processor
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];
