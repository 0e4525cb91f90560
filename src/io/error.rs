//! Error types and path context for mosaic operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all mosaic operations
#[derive(Debug)]
pub enum MosaicError {
    /// Failed to load source image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Inventory or export JSON could not be parsed or produced
    Json {
        /// Path of the document involved
        path: PathBuf,
        /// Underlying serde error
        source: serde_json::Error,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Grid is empty or not rectangular
    MalformedGrid {
        /// Description of what's wrong with the grid
        reason: String,
    },

    /// Color matching was attempted against a palette with no entries
    EmptyPalette,

    /// Brick catalog is empty, unparsable, or lacks a 1x1 fallback
    InvalidCatalog {
        /// Description of the catalog defect
        reason: String,
    },

    /// No brick type could cover a cell during placement
    ///
    /// Only reachable if the 1x1 fallback is missing or rejected, which
    /// catalog validation rules out.
    UncoverableCell {
        /// Column of the uncovered cell
        x: usize,
        /// Row of the uncovered cell
        y: usize,
        /// Grid dimensions (width, height)
        grid_dimensions: (usize, usize),
    },
}

impl fmt::Display for MosaicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Json { path, source } => {
                write!(f, "JSON error in '{}': {source}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedGrid { reason } => write!(f, "Malformed grid: {reason}"),
            Self::EmptyPalette => write!(f, "Color palette is empty"),
            Self::InvalidCatalog { reason } => write!(f, "Invalid brick catalog: {reason}"),
            Self::UncoverableCell {
                x,
                y,
                grid_dimensions,
            } => {
                write!(
                    f,
                    "No brick type could cover cell ({x}, {y}) (grid size {}x{})",
                    grid_dimensions.0, grid_dimensions.1
                )
            }
        }
    }
}

impl std::error::Error for MosaicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for mosaic results
pub type Result<T> = std::result::Result<T, MosaicError>;

/// Attaches the offending path to errors raised by file operations
pub trait WithPath<T> {
    /// Replace the placeholder path and operation of an I/O or JSON error
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<MosaicError>,
{
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.map_err(|e| match e.into() {
            MosaicError::FileSystem { source, .. } => MosaicError::FileSystem {
                path: path.to_path_buf(),
                operation,
                source,
            },
            MosaicError::Json { source, .. } => MosaicError::Json {
                path: path.to_path_buf(),
                source,
            },
            MosaicError::ImageLoad { source, .. } => MosaicError::ImageLoad {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }
}

impl From<image::ImageError> for MosaicError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MosaicError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for MosaicError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MosaicError {
    MosaicError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed grid error
pub fn malformed_grid(reason: &impl ToString) -> MosaicError {
    MosaicError::MalformedGrid {
        reason: reason.to_string(),
    }
}

/// Create an invalid catalog error
pub fn invalid_catalog(reason: &impl ToString) -> MosaicError {
    MosaicError::InvalidCatalog {
        reason: reason.to_string(),
    }
}
