//! Parts list aggregation and savings against an all-1x1 build

use serde::Serialize;
use std::collections::HashMap;

use crate::algorithm::catalog::{BrickCatalog, BrickType, BrickTypeId};
use crate::algorithm::placement::Placement;
use crate::color::{Color, ColorId};
use crate::spatial::ColorGrid;

/// Count of one brick type in one color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartsEntry {
    /// Part footprint
    pub brick_type: BrickType,
    /// Part color
    pub color: Color,
    /// Number of pieces
    pub count: usize,
}

/// Group placements by (brick type, color)
///
/// Entries are ordered by catalog rank (largest brick first), then by
/// descending count, then by color name, so output is reproducible.
/// Brick types missing from `catalog` sort after all known types.
pub fn summarize(placements: &[Placement], catalog: &BrickCatalog) -> Vec<PartsEntry> {
    let mut groups: HashMap<(BrickTypeId, ColorId), PartsEntry> = HashMap::new();

    for placement in placements {
        groups
            .entry((placement.brick_type.id, placement.color.id()))
            .and_modify(|entry| entry.count += 1)
            .or_insert_with(|| PartsEntry {
                brick_type: placement.brick_type.clone(),
                color: placement.color.clone(),
                count: 1,
            });
    }

    let mut entries: Vec<PartsEntry> = groups.into_values().collect();
    entries.sort_by(|a, b| {
        let rank_a = catalog.rank(a.brick_type.id).unwrap_or(usize::MAX);
        let rank_b = catalog.rank(b.brick_type.id).unwrap_or(usize::MAX);
        rank_a
            .cmp(&rank_b)
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| a.color.name().cmp(b.color.name()))
            .then_with(|| a.color.id().cmp(&b.color.id()))
            .then_with(|| a.brick_type.id.cmp(&b.brick_type.id))
    });
    entries
}

/// Per-color stud counts of the all-1x1 baseline, most used color first
pub fn unoptimized_summary(grid: &ColorGrid) -> Vec<(Color, usize)> {
    let mut counts: HashMap<ColorId, (Color, usize)> = HashMap::new();
    for (_, _, color) in grid.iter() {
        counts
            .entry(color.id())
            .and_modify(|(_, count)| *count += 1)
            .or_insert_with(|| (color.clone(), 1));
    }

    let mut summary: Vec<(Color, usize)> = counts.into_values().collect();
    summary.sort_by(|(color_a, count_a), (color_b, count_b)| {
        count_b
            .cmp(count_a)
            .then_with(|| color_a.name().cmp(color_b.name()))
            .then_with(|| color_a.id().cmp(&color_b.id()))
    });
    summary
}

/// Piece savings of the optimized build over one 1x1 per stud
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SavingsReport {
    /// Studs in the mosaic, i.e. pieces needed with 1x1s only
    pub total_cells: usize,
    /// Pieces in the optimized build
    pub optimized_pieces: usize,
    /// Pieces saved
    pub savings: usize,
    /// Pieces saved as a rounded percentage of `total_cells`
    pub savings_percent: u32,
}

impl SavingsReport {
    /// Compare an optimized piece count against the stud count
    pub fn new(total_cells: usize, optimized_pieces: usize) -> Self {
        let savings = total_cells.saturating_sub(optimized_pieces);
        let savings_percent = if total_cells == 0 {
            0
        } else {
            (savings as f64 / total_cells as f64 * 100.0).round() as u32
        };
        Self {
            total_cells,
            optimized_pieces,
            savings,
            savings_percent,
        }
    }

    /// Savings of `placements` over the grid they tile
    pub fn for_grid(grid: &ColorGrid, placements: &[Placement]) -> Self {
        Self::new(grid.cell_count(), placements.len())
    }
}

/// Total piece count across a parts list
pub fn total_pieces(entries: &[PartsEntry]) -> usize {
    entries.iter().map(|entry| entry.count).sum()
}
