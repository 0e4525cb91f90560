//! Aggregation of placements into parts and purchase lists

/// Parts list and savings metric
pub mod parts;
/// Store element resolution
pub mod purchase;
