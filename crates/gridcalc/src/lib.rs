//! # gridcalc
//!
//! In-memory evaluation core for a browser-style spreadsheet widget.
//!
//! gridcalc owns the grid of raw cell content and the formula engine that
//! interprets `=`-prefixed cells; everything presentational (rendering,
//! selection, editing state, event wiring) lives in the embedding UI and
//! talks to this crate through [`Sheet`].
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! // A 26x26 sheet, addressed A1..Z26
//! let mut sheet = Sheet::new(26, 26);
//!
//! sheet.set_cell_value(Coord::new(1, 1), "1").unwrap();
//! sheet.set_cell_value(Coord::new(2, 1), "2").unwrap();
//! sheet.set_cell_value(Coord::new(1, 2), "=SUM(A1:B1)").unwrap();
//!
//! assert_eq!(sheet.display_value(Coord::new(1, 2)), "3");
//! ```

pub mod prelude;
pub mod sheet;

pub use sheet::{Sheet, INVALID_DISPLAY};

// Re-export core types
pub use gridcalc_core::{
    CellGrid, CellRange, CellRangeIterator, Coord, Error, GridSize, Result,
};

// Re-export formula types
pub use gridcalc_formula::{
    evaluate, parse_expression, BinaryOperator, Expr, FormulaError, FormulaResult, NullResolver,
    Resolver, UnaryOperator, Value,
};
