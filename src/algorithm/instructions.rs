//! Region-by-region build instructions
//!
//! Placements are assigned to the region holding their top-left stud, so a
//! brick straddling a boundary is built with the region it starts in. Within
//! a region, bricks are added row by row in raster order, and a row with more
//! bricks than the step limit is split across several steps.

use serde::Serialize;
use std::ops::Range;

use crate::algorithm::placement::Placement;
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::Region;
use crate::spatial::region::region_index_of;

/// One unit of building work
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionStep {
    /// 1-based position in the plan
    pub step_number: usize,
    /// Label of the region being built
    pub region_label: String,
    /// Indices into [`InstructionPlan::sequence`] added by this step
    pub range: Range<usize>,
}

impl InstructionStep {
    /// Number of bricks added in this step
    pub fn brick_count(&self) -> usize {
        self.range.len()
    }
}

/// Ordered build sequence with its division into steps
///
/// Placements are stored once in build order; each step is a contiguous
/// range of that order, so everything before a step's range is exactly the
/// set of previously placed bricks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionPlan {
    sequence: Vec<Placement>,
    steps: Vec<InstructionStep>,
    regions: Vec<Region>,
}

impl InstructionPlan {
    /// All placements in build order
    pub fn sequence(&self) -> &[Placement] {
        &self.sequence
    }

    /// Steps in build order
    pub fn steps(&self) -> &[InstructionStep] {
        &self.steps
    }

    /// Regions the plan was built against
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Total number of steps
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    /// Step by 1-based number
    pub fn step(&self, step_number: usize) -> Option<&InstructionStep> {
        step_number
            .checked_sub(1)
            .and_then(|index| self.steps.get(index))
    }

    /// Bricks introduced by `step`
    pub fn placements(&self, step: &InstructionStep) -> &[Placement] {
        self.sequence.get(step.range.clone()).unwrap_or(&[])
    }

    /// Bricks placed in all earlier steps
    pub fn previously_placed(&self, step: &InstructionStep) -> &[Placement] {
        self.sequence.get(..step.range.start).unwrap_or(&[])
    }

    /// Fraction of the plan completed once `step` is done
    pub fn progress(&self, step: &InstructionStep) -> f64 {
        if self.steps.is_empty() {
            return 0.0;
        }
        step.step_number as f64 / self.steps.len() as f64
    }

    /// Steps belonging to the region with `label`
    pub fn steps_for_region<'a>(
        &'a self,
        label: &'a str,
    ) -> impl Iterator<Item = &'a InstructionStep> + 'a {
        self.steps
            .iter()
            .filter(move |step| step.region_label == label)
    }
}

/// Build an instruction plan for `placements` over `regions`
///
/// Regions are visited in the order given (label order when produced by
/// [`divide_into_regions`](crate::spatial::divide_into_regions)). Every
/// placement appears in exactly one step.
///
/// # Errors
///
/// Returns an error if `max_per_step` is zero or a placement's top-left cell
/// lies outside every region
pub fn generate_instructions(
    placements: &[Placement],
    regions: &[Region],
    max_per_step: usize,
) -> Result<InstructionPlan> {
    if max_per_step == 0 {
        return Err(invalid_parameter(
            "max_per_step",
            &max_per_step,
            &"must be at least 1",
        ));
    }

    let mut buckets: Vec<Vec<&Placement>> = vec![Vec::new(); regions.len()];
    for placement in placements {
        let index = region_index_of(regions, placement.x, placement.y).ok_or_else(|| {
            invalid_parameter(
                "regions",
                &format!("({}, {})", placement.x, placement.y),
                &format!("placement {} starts outside every region", placement.id),
            )
        })?;
        if let Some(bucket) = buckets.get_mut(index) {
            bucket.push(placement);
        }
    }

    let mut sequence = Vec::with_capacity(placements.len());
    let mut steps = Vec::new();

    for (region, bucket) in regions.iter().zip(buckets.iter_mut()) {
        bucket.sort_by_key(|placement| (placement.y, placement.x, placement.id));

        for row in bucket.chunk_by(|a, b| a.y == b.y) {
            for batch in row.chunks(max_per_step) {
                let start = sequence.len();
                sequence.extend(batch.iter().map(|&placement| placement.clone()));
                steps.push(InstructionStep {
                    step_number: steps.len() + 1,
                    region_label: region.label.clone(),
                    range: start..sequence.len(),
                });
            }
        }
    }

    log::debug!(
        "sequenced {} bricks into {} steps across {} regions",
        sequence.len(),
        steps.len(),
        regions.len()
    );

    Ok(InstructionPlan {
        sequence,
        steps,
        regions: regions.to_vec(),
    })
}
