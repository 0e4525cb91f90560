//! Photo-to-brick-mosaic conversion: palette matching, greedy brick placement,
//! parts and purchase lists, and region-by-region build instructions
//!
//! An image is quantized into a grid of palette colors, covered with the
//! largest fitting same-color bricks, and the placements are summarized and
//! sequenced into printable build steps.

#![forbid(unsafe_code)]

/// Brick catalog, greedy placement, and instruction sequencing
pub mod algorithm;
/// Parts aggregation and purchase list resolution
pub mod analysis;
/// Color values, HSV distance, and palette matching
pub mod color;
/// Input/output operations and error handling
pub mod io;
/// Color grids and region division
pub mod spatial;

pub use io::error::{MosaicError, Result};
