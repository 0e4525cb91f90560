use bitvec::prelude::*;
use std::fmt;

use crate::spatial::CellRect;

/// Flat bit mask of covered cells, indexed by `row * width + col`
///
/// Owned by a single optimizer run; out-of-range queries report covered so
/// that footprints hanging off the grid are never accepted.
#[derive(Clone, Debug)]
pub struct CoverageMask {
    bits: BitVec,
    width: usize,
    height: usize,
}

impl CoverageMask {
    /// Create a mask with no cells covered
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            bits: bitvec![0; width * height],
            width,
            height,
        }
    }

    /// Mask width
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Mask height
    pub const fn height(&self) -> usize {
        self.height
    }

    const fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Test a single cell
    pub fn is_covered(&self, x: usize, y: usize) -> bool {
        self.index(x, y)
            .and_then(|index| self.bits.get(index).as_deref().copied())
            .unwrap_or(true)
    }

    /// Check that every cell of `rect` is inside the mask and uncovered
    pub fn is_free(&self, rect: &CellRect) -> bool {
        if rect.right() > self.width || rect.bottom() > self.height {
            return false;
        }
        (rect.y..rect.bottom()).all(|y| {
            let start = y * self.width + rect.x;
            self.bits
                .get(start..start + rect.width)
                .is_some_and(|row| row.not_any())
        })
    }

    /// Mark every cell of `rect` as covered
    pub fn cover(&mut self, rect: &CellRect) {
        for y in rect.y..rect.bottom().min(self.height) {
            let start = y * self.width + rect.x.min(self.width);
            let end = y * self.width + rect.right().min(self.width);
            if let Some(row) = self.bits.get_mut(start..end) {
                row.fill(true);
            }
        }
    }

    /// First uncovered cell at or after `(x, y)` in row-major order
    pub fn next_uncovered(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        let start = self.index(x, y)?;
        let offset = self.bits.get(start..)?.first_zero()?;
        let index = start + offset;
        Some((index % self.width, index / self.width))
    }

    /// Number of covered cells
    pub fn covered_count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Test if every cell is covered
    pub fn is_complete(&self) -> bool {
        self.bits.all()
    }
}

impl fmt::Display for CoverageMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CoverageMask({}x{}, {} covered)",
            self.width,
            self.height,
            self.covered_count()
        )
    }
}
