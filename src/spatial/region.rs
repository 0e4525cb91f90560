//! Coarse partition of the mosaic into labeled build regions
//!
//! Regions only group instructions for presentation; they never constrain
//! brick placement.

use serde::Serialize;

use crate::io::error::{Result, invalid_parameter};
use crate::spatial::grid::CellRect;

/// One labeled block of the region layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
    /// Row letter followed by 1-based column number, e.g. `B3`
    pub label: String,
    /// Region row index (0-based)
    pub row: usize,
    /// Region column index (0-based)
    pub col: usize,
    /// Covered cells
    #[serde(flatten)]
    pub bounds: CellRect,
}

impl Region {
    /// Check if the cell at `(x, y)` belongs to this region
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        self.bounds.contains(x, y)
    }
}

/// Row letters for a 0-based row index: `A`..`Z`, then `AA`, `AB`, ...
pub fn row_letters(row: usize) -> String {
    let mut letters = Vec::new();
    let mut remaining = row + 1;
    while remaining > 0 {
        remaining -= 1;
        letters.push(char::from(b'A' + (remaining % 26) as u8));
        remaining /= 26;
    }
    letters.iter().rev().collect()
}

/// Label for the region at `row`, `col`
pub fn region_label(row: usize, col: usize) -> String {
    format!("{}{}", row_letters(row), col + 1)
}

/// Start offset of each band when `length` is split into `parts`
///
/// Every band is `length / parts` wide except the last, which runs to
/// `length` and so absorbs the whole remainder.
fn band_boundaries(length: usize, parts: usize) -> Vec<usize> {
    let band = length / parts;
    (0..parts)
        .map(|i| i * band)
        .chain(std::iter::once(length))
        .collect()
}

/// Partition a `width x height` grid into `grid_size x grid_size` regions
///
/// Regions are returned in label order (row-major: `A1`, `A2`, ..., `B1`).
/// Together they cover every cell exactly once.
///
/// # Errors
///
/// Returns an error if `grid_size` is zero or exceeds either grid dimension
/// (which would leave a region empty)
pub fn divide_into_regions(width: usize, height: usize, grid_size: usize) -> Result<Vec<Region>> {
    if grid_size == 0 {
        return Err(invalid_parameter("grid_size", &grid_size, &"must be at least 1"));
    }
    if grid_size > width || grid_size > height {
        return Err(invalid_parameter(
            "grid_size",
            &grid_size,
            &format!("cannot split a {width}x{height} grid without empty regions"),
        ));
    }

    let columns = band_boundaries(width, grid_size);
    let rows = band_boundaries(height, grid_size);

    let mut regions = Vec::with_capacity(grid_size * grid_size);
    for (row, row_band) in rows.windows(2).enumerate() {
        let (&y0, &y1) = match (row_band.first(), row_band.get(1)) {
            (Some(y0), Some(y1)) => (y0, y1),
            _ => continue,
        };
        for (col, col_band) in columns.windows(2).enumerate() {
            let (&x0, &x1) = match (col_band.first(), col_band.get(1)) {
                (Some(x0), Some(x1)) => (x0, x1),
                _ => continue,
            };
            regions.push(Region {
                label: region_label(row, col),
                row,
                col,
                bounds: CellRect::new(x0, y0, x1 - x0, y1 - y0),
            });
        }
    }

    Ok(regions)
}

/// Index of the region containing `(x, y)`
pub fn region_index_of(regions: &[Region], x: usize, y: usize) -> Option<usize> {
    regions.iter().position(|region| region.contains(x, y))
}
