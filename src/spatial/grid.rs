//! Fully populated rectangular grid of brick colors
//!
//! Cells are stored in an `ndarray` matrix indexed by `[row, col]`, i.e.
//! `[y, x]` with the origin at the top-left stud.

use ndarray::Array2;
use serde::Serialize;

use crate::color::{Color, ColorId};
use crate::io::error::{Result, malformed_grid};

/// Axis-aligned rectangle in stud coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellRect {
    /// Left column (inclusive)
    pub x: usize,
    /// Top row (inclusive)
    pub y: usize,
    /// Width in studs
    pub width: usize,
    /// Height in studs
    pub height: usize,
}

impl CellRect {
    /// Create a rectangle
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Column one past the right edge
    pub const fn right(&self) -> usize {
        self.x + self.width
    }

    /// Row one past the bottom edge
    pub const fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Number of cells covered
    pub const fn area(&self) -> usize {
        self.width * self.height
    }

    /// Check if a cell lies inside the rectangle
    pub const fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check if two rectangles share at least one cell
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Iterate over the covered cells as `(x, y)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

/// Mosaic grid of matched colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    cells: Array2<Color>,
}

impl ColorGrid {
    /// Build a grid from rows of colors (top row first)
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows, the first row is empty, or the
    /// rows differ in length
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if height == 0 || width == 0 {
            return Err(malformed_grid(&format!(
                "grid must have positive dimensions, got {width}x{height}"
            )));
        }

        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != width) {
            return Err(malformed_grid(&format!(
                "row {index} has {} cells, expected {width}",
                row.len()
            )));
        }

        let flat: Vec<Color> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((height, width), flat)
            .map_err(|e| malformed_grid(&e))?;
        Ok(Self { cells })
    }

    /// Wrap an existing `(height, width)` matrix
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_array(cells: Array2<Color>) -> Result<Self> {
        let (height, width) = cells.dim();
        if height == 0 || width == 0 {
            return Err(malformed_grid(&format!(
                "grid must have positive dimensions, got {width}x{height}"
            )));
        }
        Ok(Self { cells })
    }

    /// Grid filled with a single color
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn filled(width: usize, height: usize, color: &Color) -> Result<Self> {
        Self::from_array(Array2::from_elem((height, width), color.clone()))
    }

    /// Width in studs
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Height in studs
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Total number of cells
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Color at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<&Color> {
        self.cells.get([y, x])
    }

    /// Rectangle covering the whole grid
    pub fn bounds(&self) -> CellRect {
        CellRect::new(0, 0, self.width(), self.height())
    }

    /// Check whether every cell of `rect` lies inside the grid and has `color_id`
    pub fn is_uniform(&self, rect: &CellRect, color_id: ColorId) -> bool {
        rect.right() <= self.width()
            && rect.bottom() <= self.height()
            && rect
                .cells()
                .all(|(x, y)| self.get(x, y).is_some_and(|c| c.id() == color_id))
    }

    /// Underlying `(height, width)` matrix
    pub const fn cells(&self) -> &Array2<Color> {
        &self.cells
    }

    /// Iterate over `(x, y, color)` in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Color)> {
        self.cells
            .indexed_iter()
            .map(|((y, x), color)| (x, y, color))
    }
}
