//! # gridcalc-core
//!
//! Core data structures for the gridcalc spreadsheet widget.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`Coord`] - 1-based (column, row) cell coordinates with A1 notation
//! - [`CellRange`] - Rectangular spans of cells (e.g., "A1:B10")
//! - [`GridSize`] - The configured bounds of the addressable grid
//! - [`CellGrid`] - The sparse raw-value store backing the widget
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{CellGrid, Coord, GridSize};
//!
//! let mut grid = CellGrid::new(GridSize::new(26, 26));
//!
//! grid.set(Coord::new(1, 1), "hello").unwrap();
//! grid.set("B2".parse().unwrap(), "42").unwrap();
//!
//! assert_eq!(grid.get(Coord::new(1, 1)), "hello");
//! // Cells never written read back as the empty string.
//! assert_eq!(grid.get(Coord::new(3, 3)), "");
//! ```

pub mod coord;
pub mod error;
pub mod grid;
pub mod range;

// Re-exports for convenience
pub use coord::{Coord, GridSize};
pub use error::{Error, Result};
pub use grid::CellGrid;
pub use range::{CellRange, CellRangeIterator};
