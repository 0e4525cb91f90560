/// Command-line parsing and batch processing
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Parts, purchase and instruction exports
pub mod export;
/// Image rasterization
pub mod image;
/// Store inventory loading
pub mod inventory;
/// Logger setup
pub mod logging;
/// Terminal progress display
pub mod progress;
/// Preview rendering
pub mod render;
