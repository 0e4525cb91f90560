//! Emitted brick instances and tiling verification

use ndarray::Array2;
use serde::Serialize;
use std::fmt;

use crate::algorithm::catalog::BrickType;
use crate::color::Color;
use crate::spatial::{CellRect, ColorGrid};

/// One brick placed on the mosaic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Sequential id in emission order
    pub id: usize,
    /// Left column of the footprint
    pub x: usize,
    /// Top row of the footprint
    pub y: usize,
    /// Footprint and part
    pub brick_type: BrickType,
    /// Color shared by every covered cell
    pub color: Color,
}

impl Placement {
    /// Covered cells
    pub const fn rect(&self) -> CellRect {
        CellRect::new(self.x, self.y, self.brick_type.width, self.brick_type.height)
    }

    /// Number of studs covered
    pub const fn area(&self) -> usize {
        self.brick_type.area()
    }
}

/// A broken tiling invariant found by [`check_tiling`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TilingDefect {
    /// Footprint extends past the grid edge
    OutOfBounds {
        /// Offending placement id
        placement: usize,
    },
    /// A covered cell differs from the placement color
    ColorMismatch {
        /// Offending placement id
        placement: usize,
        /// Column of the mismatching cell
        x: usize,
        /// Row of the mismatching cell
        y: usize,
    },
    /// Two placements cover the same cell
    Overlap {
        /// Placement that claimed the cell first
        first: usize,
        /// Placement that claimed it again
        second: usize,
        /// Column of the shared cell
        x: usize,
        /// Row of the shared cell
        y: usize,
    },
    /// No placement covers a cell
    Uncovered {
        /// Column of the cell
        x: usize,
        /// Row of the cell
        y: usize,
    },
}

impl fmt::Display for TilingDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { placement } => {
                write!(f, "placement {placement} extends past the grid")
            }
            Self::ColorMismatch { placement, x, y } => {
                write!(f, "placement {placement} covers differently colored cell ({x}, {y})")
            }
            Self::Overlap {
                first,
                second,
                x,
                y,
            } => write!(f, "placements {first} and {second} overlap at ({x}, {y})"),
            Self::Uncovered { x, y } => write!(f, "cell ({x}, {y}) is not covered"),
        }
    }
}

/// Verify that `placements` tile `grid` exactly with single-colored bricks
///
/// # Errors
///
/// Returns the first defect found, checking placements in order and then
/// scanning for uncovered cells
pub fn check_tiling(grid: &ColorGrid, placements: &[Placement]) -> Result<(), TilingDefect> {
    let mut owner: Array2<Option<usize>> = Array2::from_elem((grid.height(), grid.width()), None);

    for placement in placements {
        let rect = placement.rect();
        if rect.right() > grid.width() || rect.bottom() > grid.height() {
            return Err(TilingDefect::OutOfBounds {
                placement: placement.id,
            });
        }

        for (x, y) in rect.cells() {
            if grid.get(x, y).is_none_or(|color| color.id() != placement.color.id()) {
                return Err(TilingDefect::ColorMismatch {
                    placement: placement.id,
                    x,
                    y,
                });
            }
            if let Some(slot) = owner.get_mut([y, x]) {
                if let Some(first) = *slot {
                    return Err(TilingDefect::Overlap {
                        first,
                        second: placement.id,
                        x,
                        y,
                    });
                }
                *slot = Some(placement.id);
            }
        }
    }

    match owner.indexed_iter().find(|(_, slot)| slot.is_none()) {
        Some(((y, x), _)) => Err(TilingDefect::Uncovered { x, y }),
        None => Ok(()),
    }
}
