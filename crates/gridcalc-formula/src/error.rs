//! Formula error types

use gridcalc_core::Coord;
use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// Every failure mode of the engine is a value of this type; nothing
/// escapes the public boundary as a panic. `NotAvailable` and
/// `SelfReference` are produced by the embedding layer's [`Resolver`]
/// implementation but defined here so they travel through evaluation
/// unchanged.
///
/// [`Resolver`]: crate::Resolver
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Malformed expression syntax
    #[error("Parse error: {0}")]
    Parse(String),

    /// Runtime evaluation fault (type mismatch, division by zero, ...)
    #[error("Evaluation error: {0}")]
    Eval(String),

    /// Unknown function name
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Wrong number of arguments
    #[error("Wrong number of arguments for {function}: expected {expected}, got {actual}")]
    ArgumentCount {
        function: String,
        expected: String,
        actual: usize,
    },

    /// Reference to a cell outside the configured grid bounds
    #[error("Reference {0} is outside the grid")]
    NotAvailable(Coord),

    /// Cell directly references itself
    #[error("Cell {0} references itself")]
    SelfReference(Coord),
}
