/// Per-color availability of brick types
pub mod availability;
/// Ordered brick type catalog
pub mod catalog;
/// Bit mask of covered cells
pub mod coverage;
/// Build instruction sequencing
pub mod instructions;
/// Greedy placement optimizer
pub mod optimizer;
/// End-to-end mosaic construction
pub mod pipeline;
/// Placement records and tiling verification
pub mod placement;

pub use catalog::{BrickCatalog, BrickKind, BrickType};
pub use optimizer::{PlacementOptimizer, optimize};
pub use placement::Placement;
