//! The sparse grid value store
//!
//! Only non-empty cells are stored. Absent entries are equivalent to the
//! empty string, so reads never fail and never allocate.

use crate::coord::{Coord, GridSize};
use crate::error::{Error, Result};
use crate::range::CellRange;
use ahash::AHashMap;

/// Sparse mapping from [`Coord`] to raw cell content
///
/// The grid stores whatever text the UI committed, formulas included: a
/// value starting with `=` is kept verbatim and only interpreted by the
/// formula engine at display time. Writes are bounds-checked against the
/// configured [`GridSize`]; reads are not, since an out-of-bounds read is
/// indistinguishable from a blank cell.
#[derive(Debug, Clone)]
pub struct CellGrid {
    size: GridSize,
    cells: AHashMap<Coord, String>,
}

impl CellGrid {
    /// Create an empty grid with the given bounds
    pub fn new(size: GridSize) -> Self {
        Self {
            size,
            cells: AHashMap::new(),
        }
    }

    /// The configured grid bounds
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Store a raw value, overwriting any previous content
    ///
    /// Writing the empty string clears the cell, preserving the invariant
    /// that absent entries and empty cells are the same thing.
    pub fn set(&mut self, coord: Coord, value: impl Into<String>) -> Result<()> {
        if !self.size.contains(coord) {
            return Err(Error::OutOfBounds {
                coord,
                width: self.size.width,
                height: self.size.height,
            });
        }

        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&coord);
        } else {
            self.cells.insert(coord, value);
        }
        Ok(())
    }

    /// Read the raw value at a coordinate, `""` if the cell was never written
    pub fn get(&self, coord: Coord) -> &str {
        self.cells.get(&coord).map(String::as_str).unwrap_or("")
    }

    /// Read a rectangular block of raw values, row-major
    ///
    /// The result always has `range.row_count()` rows of `range.col_count()`
    /// entries: cells with no stored data appear inline as `""` rather than
    /// being skipped, so positions within the block are stable.
    pub fn range(&self, range: CellRange) -> Vec<Vec<&str>> {
        let mut rows = Vec::with_capacity(range.row_count() as usize);

        for y in range.start.y..=range.end.y {
            let mut row = Vec::with_capacity(range.col_count() as usize);
            for x in range.start.x..=range.end.x {
                row.push(self.get(Coord::new(x, y)));
            }
            rows.push(row);
        }

        rows
    }

    /// Number of non-empty cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid holds no data at all
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over all non-empty cells in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &str)> {
        self.cells.iter().map(|(c, v)| (*c, v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn grid() -> CellGrid {
        CellGrid::new(GridSize::new(26, 26))
    }

    #[test]
    fn test_unwritten_cells_read_empty() {
        let grid = grid();
        assert_eq!(grid.get(Coord::new(1, 1)), "");
        assert_eq!(grid.get(Coord::new(26, 26)), "");
        // Out-of-bounds reads are blank too, not errors
        assert_eq!(grid.get(Coord::new(100, 100)), "");
    }

    #[test]
    fn test_write_then_read_identity() {
        let mut grid = grid();
        grid.set(Coord::new(2, 3), "hello").unwrap();
        assert_eq!(grid.get(Coord::new(2, 3)), "hello");

        grid.set(Coord::new(2, 3), "world").unwrap();
        assert_eq!(grid.get(Coord::new(2, 3)), "world");
    }

    #[test]
    fn test_empty_write_clears() {
        let mut grid = grid();
        grid.set(Coord::new(1, 1), "x").unwrap();
        assert_eq!(grid.len(), 1);

        grid.set(Coord::new(1, 1), "").unwrap();
        assert_eq!(grid.len(), 0);
        assert_eq!(grid.get(Coord::new(1, 1)), "");
    }

    #[test]
    fn test_out_of_bounds_write_rejected() {
        let mut grid = grid();
        assert!(grid.set(Coord::new(27, 1), "x").is_err());
        assert!(grid.set(Coord::new(1, 27), "x").is_err());
        assert!(grid.set(Coord::new(0, 1), "x").is_err());
        assert!(grid.set(Coord::new(1, 0), "x").is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_range_is_rectangular_with_holes() {
        let mut grid = grid();
        grid.set(Coord::new(1, 1), "a").unwrap();
        grid.set(Coord::new(2, 2), "b").unwrap();
        // Row 3 of the requested block has no data at all

        let block = grid.range(CellRange::parse("A1:B3").unwrap());
        assert_eq!(
            block,
            vec![vec!["a", ""], vec!["", "b"], vec!["", ""]],
        );
    }

    #[test]
    fn test_range_row_major_order() {
        let mut grid = grid();
        grid.set(Coord::new(1, 1), "1").unwrap();
        grid.set(Coord::new(2, 1), "2").unwrap();
        grid.set(Coord::new(1, 2), "3").unwrap();
        grid.set(Coord::new(2, 2), "4").unwrap();

        let block = grid.range(CellRange::parse("A1:B2").unwrap());
        assert_eq!(block, vec![vec!["1", "2"], vec!["3", "4"]]);
    }
}
