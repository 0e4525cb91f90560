//! Inventory constraints on (brick type, color) combinations

use std::collections::HashSet;

use crate::algorithm::catalog::{BrickType, BrickTypeId};
use crate::color::{Color, ColorId};

/// Set of (brick type, color) pairs that cannot be sourced
///
/// Pairs are keyed by the canonical brick type id, so a rotated variant
/// shares the availability of the part it was rotated from. 1x1 footprints
/// are always available regardless of what is recorded here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailabilityMap {
    unavailable: HashSet<(BrickTypeId, ColorId)>,
}

impl AvailabilityMap {
    /// Map with every combination available
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a combination as unavailable
    pub fn mark_unavailable(&mut self, brick_type: &BrickType, color: &Color) {
        self.unavailable
            .insert((brick_type.canonical_id, color.id()));
    }

    /// Record a combination as available again
    pub fn mark_available(&mut self, brick_type: &BrickType, color: &Color) {
        self.unavailable
            .remove(&(brick_type.canonical_id, color.id()));
    }

    /// Check whether a brick type may be placed in a color
    pub fn is_available(&self, brick_type: &BrickType, color: &Color) -> bool {
        brick_type.is_unit()
            || !self
                .unavailable
                .contains(&(brick_type.canonical_id, color.id()))
    }

    /// Number of recorded unavailable combinations
    pub fn unavailable_count(&self) -> usize {
        self.unavailable.len()
    }
}
