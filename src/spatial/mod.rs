//! Spatial data structures for the mosaic
//!
//! This module contains:
//! - The rectangular color grid produced by rasterization
//! - Cell rectangles shared by placements and regions
//! - The coarse region layout used to group build instructions

/// Color grid and cell rectangles
pub mod grid;
/// Region partitioning and labeling
pub mod region;

pub use grid::{CellRect, ColorGrid};
pub use region::{Region, divide_into_regions};
