//! Error types for gridcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridcalc-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell coordinate notation
    #[error("Invalid cell coordinate: {0}")]
    InvalidCoord(String),

    /// Invalid cell range notation
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Coordinate outside the configured grid bounds
    #[error("Coordinate {coord} outside grid bounds {width}x{height}")]
    OutOfBounds {
        coord: crate::Coord,
        width: u32,
        height: u32,
    },
}
