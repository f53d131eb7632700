//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Grid types
    CellGrid,
    CellRange,
    Coord,
    GridSize,

    // Error types
    Error,
    FormulaError,
    FormulaResult,
    Result,

    // Formula types
    Resolver,
    Value,

    // Main types
    Sheet,
    INVALID_DISPLAY,
};
