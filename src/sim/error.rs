//! Engine error type

use thiserror::Error;

/// Errors reported by the grid and its rule/controller layers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// Width or height is zero or too large to address with `i32` coordinates.
    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A coordinate fell outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
    /// Rule notation or neighbor counts could not be used.
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    /// Seeding probability outside `[0, 1]` (or NaN).
    #[error("seeding probability {0} is not within [0, 1]")]
    InvalidProbability(f64),
}
