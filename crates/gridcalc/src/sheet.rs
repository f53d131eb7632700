//! The widget-facing sheet: grid store plus formula engine
//!
//! [`Sheet`] is the boundary the presentation layer talks to. The UI commits
//! raw edits with [`Sheet::set_cell_value`], reads raw content back with
//! [`Sheet::get_cell_value`], and asks for [`Sheet::execute_formula`] (or
//! the [`Sheet::display_value`] convenience) whenever a cell's content
//! starts with `=`. Nothing is cached: every call re-evaluates against the
//! live grid, which is what lets an edit anywhere show up in every
//! dependent cell on the next redraw.

use gridcalc_core::{CellGrid, CellRange, Coord, GridSize};
use gridcalc_formula::{evaluate, parse_expression, FormulaError, FormulaResult, Resolver, Value};

/// Fixed literal the widget shows for any failed formula evaluation
pub const INVALID_DISPLAY: &str = "INVALID";

/// A bounded grid of raw cell content with formula evaluation
#[derive(Debug, Clone)]
pub struct Sheet {
    grid: CellGrid,
}

impl Sheet {
    /// Create an empty sheet with the given column and row counts
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            grid: CellGrid::new(GridSize::new(width, height)),
        }
    }

    /// The configured grid bounds
    pub fn size(&self) -> GridSize {
        self.grid.size()
    }

    /// Commit a raw value into a cell (the UI's edit-commit path)
    pub fn set_cell_value(
        &mut self,
        coord: Coord,
        value: impl Into<String>,
    ) -> gridcalc_core::Result<()> {
        self.grid.set(coord, value)
    }

    /// Read the raw content of a cell, `""` if never written
    pub fn get_cell_value(&self, coord: Coord) -> &str {
        self.grid.get(coord)
    }

    /// Evaluate a formula expression on behalf of the cell at `coord`
    ///
    /// `expression` is the cell content with the leading `=` stripped. The
    /// coordinate of the evaluating cell is threaded through every
    /// recursive call (nested range formulas, chained results) rather than
    /// stashed in shared state, so re-entry always sees the right cell.
    ///
    /// If the computed result itself starts with `=`, it is treated as a
    /// formula pointing at another formula and re-evaluated for the same
    /// coordinate. Depth is unbounded: an indirect reference cycle recurses
    /// until the stack runs out. Only direct self-reference is rejected
    /// (see [`FormulaError::SelfReference`]).
    pub fn execute_formula(&self, coord: Coord, expression: &str) -> FormulaResult<String> {
        let expr = parse_expression(expression)?;

        let resolver = SheetResolver {
            sheet: self,
            active: coord,
        };
        let value = evaluate(&expr, &resolver)?;

        let display = value.to_display_string();
        if display.is_empty() {
            return Ok(display);
        }

        if let Some(chained) = display.strip_prefix('=') {
            // Formula points to formula
            return self.execute_formula(coord, chained);
        }

        Ok(display)
    }

    /// The string the widget should render for a cell
    ///
    /// Non-formula content is shown verbatim; formula content is evaluated,
    /// with any error collapsed to the fixed [`INVALID_DISPLAY`] literal.
    pub fn display_value(&self, coord: Coord) -> String {
        let raw = self.grid.get(coord);
        match raw.strip_prefix('=') {
            Some(expression) => self
                .execute_formula(coord, expression)
                .unwrap_or_else(|_| INVALID_DISPLAY.to_string()),
            None => raw.to_string(),
        }
    }
}

/// Resolver backing formula evaluation with the sheet's live grid
///
/// Carries the coordinate of the cell being evaluated so direct
/// self-references can be rejected.
struct SheetResolver<'a> {
    sheet: &'a Sheet,
    active: Coord,
}

impl Resolver for SheetResolver<'_> {
    fn cell(&self, coord: Coord) -> FormulaResult<Value> {
        if !self.sheet.grid.size().contains(coord) {
            return Err(FormulaError::NotAvailable(coord));
        }

        if coord == self.active {
            return Err(FormulaError::SelfReference(coord));
        }

        // The raw value, formula text included: a referenced formula is not
        // evaluated here, it surfaces through result chaining instead
        let raw = self.sheet.grid.get(coord);
        Ok(if raw.is_empty() {
            Value::Empty
        } else {
            Value::String(raw.to_string())
        })
    }

    fn range(&self, range: CellRange) -> FormulaResult<Vec<Vec<Value>>> {
        let block = self.sheet.grid.range(range);
        let mut rows = Vec::with_capacity(block.len());

        for (dy, raw_row) in block.into_iter().enumerate() {
            let mut row = Vec::with_capacity(raw_row.len());
            for (dx, raw) in raw_row.into_iter().enumerate() {
                let value = match raw.strip_prefix('=') {
                    Some(expression) => {
                        // A formula inside the range is resolved with that
                        // cell's own coordinate; any member error aborts the
                        // whole range
                        let member =
                            Coord::new(range.start.x + dx as u32, range.start.y + dy as u32);
                        let resolved = self.sheet.execute_formula(member, expression)?;
                        if resolved.is_empty() {
                            Value::Empty
                        } else {
                            Value::String(resolved)
                        }
                    }
                    None if raw.is_empty() => Value::Empty,
                    None => Value::String(raw.to_string()),
                };
                row.push(value);
            }
            rows.push(row);
        }

        Ok(rows)
    }
}
