//! Greedy largest-fit-first brick placement
//!
//! Cells are scanned in row-major order. At each uncovered cell the catalog
//! is tried largest area first and the first brick type whose footprint is in
//! bounds, uncovered, single-colored and available is committed. The scan
//! never backtracks, so results are greedy rather than optimal, but fully
//! determined by the grid and the catalog order.

use crate::algorithm::availability::AvailabilityMap;
use crate::algorithm::catalog::{BrickCatalog, BrickType};
use crate::algorithm::coverage::CoverageMask;
use crate::algorithm::placement::Placement;
use crate::color::Color;
use crate::io::error::{MosaicError, Result};
use crate::spatial::{CellRect, ColorGrid};

/// Brick placement optimizer over a fixed catalog
#[derive(Debug, Clone, Copy)]
pub struct PlacementOptimizer<'a> {
    catalog: &'a BrickCatalog,
    availability: Option<&'a AvailabilityMap>,
}

impl<'a> PlacementOptimizer<'a> {
    /// Optimizer treating every (type, color) pair as available
    pub const fn new(catalog: &'a BrickCatalog) -> Self {
        Self {
            catalog,
            availability: None,
        }
    }

    /// Skip combinations the availability map marks as unavailable
    #[must_use]
    pub const fn with_availability(mut self, availability: &'a AvailabilityMap) -> Self {
        self.availability = Some(availability);
        self
    }

    /// Catalog in use
    pub const fn catalog(&self) -> &'a BrickCatalog {
        self.catalog
    }

    /// Cover `grid` with placements
    ///
    /// Placement ids run from 0 in emission (raster) order.
    ///
    /// # Errors
    ///
    /// Returns [`MosaicError::UncoverableCell`] if no catalog entry fits at
    /// some cell. A validated catalog always holds an available 1x1, so this
    /// signals a broken invariant rather than bad input.
    pub fn optimize(&self, grid: &ColorGrid) -> Result<Vec<Placement>> {
        let (width, height) = (grid.width(), grid.height());
        let mut coverage = CoverageMask::new(width, height);
        let mut placements = Vec::new();

        let mut cursor = coverage.next_uncovered(0, 0);
        while let Some((x, y)) = cursor {
            let Some(anchor) = grid.get(x, y) else {
                return Err(self.uncoverable(x, y, width, height, None));
            };

            let chosen = self
                .catalog
                .types()
                .iter()
                .find(|brick_type| self.fits(grid, &coverage, brick_type, anchor, x, y));

            let Some(brick_type) = chosen else {
                return Err(self.uncoverable(x, y, width, height, Some(anchor)));
            };

            coverage.cover(&CellRect::new(x, y, brick_type.width, brick_type.height));
            placements.push(Placement {
                id: placements.len(),
                x,
                y,
                brick_type: brick_type.clone(),
                color: anchor.clone(),
            });

            cursor = coverage.next_uncovered(x, y);
        }

        log::debug!(
            "placed {} bricks over {}x{} grid ({} cells)",
            placements.len(),
            width,
            height,
            grid.cell_count()
        );

        Ok(placements)
    }

    fn fits(
        &self,
        grid: &ColorGrid,
        coverage: &CoverageMask,
        brick_type: &BrickType,
        anchor: &Color,
        x: usize,
        y: usize,
    ) -> bool {
        let rect = CellRect::new(x, y, brick_type.width, brick_type.height);
        self.availability
            .is_none_or(|map| map.is_available(brick_type, anchor))
            && coverage.is_free(&rect)
            && grid.is_uniform(&rect, anchor.id())
    }

    fn uncoverable(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        anchor: Option<&Color>,
    ) -> MosaicError {
        log::error!(
            "no brick type covers cell ({x}, {y}) of {width}x{height} grid (color {}, {} catalog entries)",
            anchor.map_or_else(|| "<missing>".to_string(), ToString::to_string),
            self.catalog.len()
        );
        MosaicError::UncoverableCell {
            x,
            y,
            grid_dimensions: (width, height),
        }
    }
}

/// Cover `grid` using `catalog`, optionally constrained by `availability`
///
/// # Errors
///
/// See [`PlacementOptimizer::optimize`]
pub fn optimize(
    grid: &ColorGrid,
    catalog: &BrickCatalog,
    availability: Option<&AvailabilityMap>,
) -> Result<Vec<Placement>> {
    let optimizer = PlacementOptimizer::new(catalog);
    match availability {
        Some(map) => optimizer.with_availability(map).optimize(grid),
        None => optimizer.optimize(grid),
    }
}
