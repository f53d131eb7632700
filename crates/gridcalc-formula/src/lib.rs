//! # gridcalc-formula
//!
//! Formula parser and evaluator for the gridcalc spreadsheet widget.
//!
//! This crate provides:
//! - Formula parsing (text → AST)
//! - Formula evaluation (AST → value) against a [`Resolver`]
//! - The built-in function library (math, logical, text)
//!
//! Reference and range lookups go through the [`Resolver`] trait, so this
//! crate never sees the grid directly; the embedding layer decides what a
//! cell reference means (and is where self-reference and bounds policy
//! live).
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_formula::{evaluate, parse_expression, NullResolver, Value};
//!
//! let expr = parse_expression("5+5").unwrap();
//! let value = evaluate(&expr, &NullResolver).unwrap();
//! assert_eq!(value, Value::Number(10.0));
//! ```

pub mod ast;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;

pub use ast::{BinaryOperator, Expr, UnaryOperator};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, NullResolver, Resolver, Value};
pub use parser::parse_expression;
