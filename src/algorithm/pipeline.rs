//! End-to-end mosaic construction from a color grid
//!
//! Runs the optimizer, then derives the parts list, savings report and
//! instruction plan from its placements.

use crate::algorithm::availability::AvailabilityMap;
use crate::algorithm::catalog::BrickCatalog;
use crate::algorithm::instructions::{InstructionPlan, generate_instructions};
use crate::algorithm::optimizer::PlacementOptimizer;
use crate::algorithm::placement::Placement;
use crate::analysis::parts::{PartsEntry, SavingsReport, summarize};
use crate::io::configuration::{DEFAULT_BRICKS_PER_STEP, DEFAULT_REGION_GRID_SIZE};
use crate::io::error::Result;
use crate::spatial::{ColorGrid, divide_into_regions};

/// Parameters for deriving instructions from placements
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MosaicConfig {
    /// Regions per side of the instruction layout
    pub region_grid_size: usize,
    /// Maximum bricks introduced per step
    pub bricks_per_step: usize,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            region_grid_size: DEFAULT_REGION_GRID_SIZE,
            bricks_per_step: DEFAULT_BRICKS_PER_STEP,
        }
    }
}

/// Everything derived from one grid
#[derive(Debug, Clone)]
pub struct Mosaic {
    /// Source grid
    pub grid: ColorGrid,
    /// Optimized placements in emission order
    pub placements: Vec<Placement>,
    /// Aggregated parts list
    pub parts: Vec<PartsEntry>,
    /// Piece savings over all 1x1s
    pub savings: SavingsReport,
    /// Region-by-region build plan
    pub plan: InstructionPlan,
}

/// Builds mosaics against a catalog and optional availability constraints
#[derive(Debug, Clone, Copy)]
pub struct MosaicBuilder<'a> {
    optimizer: PlacementOptimizer<'a>,
    config: MosaicConfig,
}

impl<'a> MosaicBuilder<'a> {
    /// Builder with default configuration and no availability constraints
    pub fn new(catalog: &'a BrickCatalog) -> Self {
        Self {
            optimizer: PlacementOptimizer::new(catalog),
            config: MosaicConfig::default(),
        }
    }

    /// Restrict placements to available (brick type, color) pairs
    #[must_use]
    pub const fn with_availability(mut self, availability: &'a AvailabilityMap) -> Self {
        self.optimizer = self.optimizer.with_availability(availability);
        self
    }

    /// Replace the configuration
    #[must_use]
    pub const fn with_config(mut self, config: MosaicConfig) -> Self {
        self.config = config;
        self
    }

    /// Optimize `grid` and derive parts, savings and instructions
    ///
    /// The region grid size is clamped to the grid's smaller dimension so
    /// tiny mosaics still get a valid layout.
    ///
    /// # Errors
    ///
    /// Returns an error if placement fails or the configuration is invalid
    pub fn build(&self, grid: ColorGrid) -> Result<Mosaic> {
        let placements = self.optimizer.optimize(&grid)?;
        let parts = summarize(&placements, self.optimizer.catalog());
        let savings = SavingsReport::for_grid(&grid, &placements);

        let region_grid_size = self
            .config
            .region_grid_size
            .min(grid.width())
            .min(grid.height());
        let regions = divide_into_regions(grid.width(), grid.height(), region_grid_size)?;
        let plan = generate_instructions(&placements, &regions, self.config.bricks_per_step)?;

        log::info!(
            "mosaic {}x{}: {} pieces ({} saved, {}%), {} steps",
            grid.width(),
            grid.height(),
            placements.len(),
            savings.savings,
            savings.savings_percent,
            plan.total_steps()
        );

        Ok(Mosaic {
            grid,
            placements,
            parts,
            savings,
            plan,
        })
    }
}
