//! Rectangular cell ranges

use crate::coord::Coord;
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A rectangular range of cells (e.g., "A1:B10")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start coordinate (top-left)
    pub start: Coord,
    /// End coordinate (bottom-right)
    pub end: Coord,
}

impl CellRange {
    /// Create a new range from two corner coordinates
    ///
    /// The corners are normalized so that `start` is the top-left and `end`
    /// the bottom-right regardless of argument order.
    pub fn new(a: Coord, b: Coord) -> Self {
        Self {
            start: Coord::new(a.x.min(b.x), a.y.min(b.y)),
            end: Coord::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a single-cell range
    pub fn single(coord: Coord) -> Self {
        Self {
            start: coord,
            end: coord,
        }
    }

    /// Parse a range from A1:B10 notation
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(colon_pos) = s.find(':') {
            let start = Coord::parse(&s[..colon_pos])
                .map_err(|_| Error::InvalidRange(format!("bad start coordinate in '{s}'")))?;
            let end = Coord::parse(&s[colon_pos + 1..])
                .map_err(|_| Error::InvalidRange(format!("bad end coordinate in '{s}'")))?;
            Ok(Self::new(start, end))
        } else {
            let coord =
                Coord::parse(s).map_err(|_| Error::InvalidRange(format!("bad range '{s}'")))?;
            Ok(Self::single(coord))
        }
    }

    /// Check if a coordinate is within this range
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= self.start.x
            && coord.x <= self.end.x
            && coord.y >= self.start.y
            && coord.y <= self.end.y
    }

    /// Number of rows in the range
    pub fn row_count(&self) -> u32 {
        self.end.y - self.start.y + 1
    }

    /// Number of columns in the range
    pub fn col_count(&self) -> u32 {
        self.end.x - self.start.x + 1
    }

    /// Total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() as u64 * self.col_count() as u64
    }

    /// Iterate over all coordinates in the range, row-major
    /// (y ascending outer, x ascending inner)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_x: self.start.x,
            current_y: self.start.y,
        }
    }

    /// Format as an A1:B10 string
    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start.to_a1_string(), self.end.to_a1_string())
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over coordinates in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_x: u32,
    current_y: u32,
}

impl Iterator for CellRangeIterator {
    type Item = Coord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_y > self.range.end.y {
            return None;
        }

        let coord = Coord::new(self.current_x, self.current_y);

        self.current_x += 1;
        if self.current_x > self.range.end.x {
            self.current_x = self.range.start.x;
            self.current_y += 1;
        }

        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.range.cell_count() as usize;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_range_parse() {
        let range = CellRange::parse("A1:B2").unwrap();
        assert_eq!(range.start, Coord::new(1, 1));
        assert_eq!(range.end, Coord::new(2, 2));

        // Single cell
        let range = CellRange::parse("C3").unwrap();
        assert_eq!(range.start, Coord::new(3, 3));
        assert_eq!(range.end, Coord::new(3, 3));
    }

    #[test]
    fn test_range_normalization() {
        // Corners given bottom-right first
        let range = CellRange::new(Coord::new(4, 4), Coord::new(2, 2));
        assert_eq!(range.start, Coord::new(2, 2));
        assert_eq!(range.end, Coord::new(4, 4));
    }

    #[test]
    fn test_range_contains() {
        let range = CellRange::parse("B2:D4").unwrap();

        assert!(range.contains(Coord::new(2, 2)));
        assert!(range.contains(Coord::new(4, 4)));
        assert!(range.contains(Coord::new(3, 3)));

        assert!(!range.contains(Coord::new(1, 1)));
        assert!(!range.contains(Coord::new(2, 5)));
    }

    #[test]
    fn test_range_counts() {
        let range = CellRange::parse("A1:C2").unwrap();
        assert_eq!(range.row_count(), 2);
        assert_eq!(range.col_count(), 3);
        assert_eq!(range.cell_count(), 6);
    }

    #[test]
    fn test_range_iterator_row_major() {
        let range = CellRange::parse("A1:B2").unwrap();
        let cells: Vec<_> = range.cells().collect();

        assert_eq!(cells.len(), 4);
        assert_eq!(cells[0], Coord::new(1, 1)); // A1
        assert_eq!(cells[1], Coord::new(2, 1)); // B1
        assert_eq!(cells[2], Coord::new(1, 2)); // A2
        assert_eq!(cells[3], Coord::new(2, 2)); // B2
    }
}
