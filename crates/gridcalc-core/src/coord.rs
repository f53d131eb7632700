//! Cell coordinates and grid bounds

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A cell coordinate (e.g., "A1", "$B$2")
///
/// Coordinates are 1-based pairs of (column, row). Position 0 on either axis
/// is reserved for the widget's header row/column and is never addressable;
/// constructing or parsing a coordinate with a zero component is an error.
/// The optional `$` prefix of A1 notation is accepted and discarded (the
/// widget has no copy/fill semantics that would distinguish absolute
/// references).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    /// Column index (1-based, A=1, B=2, ...)
    pub x: u32,
    /// Row index (1-based)
    pub y: u32,
}

impl Coord {
    /// Create a new coordinate from 1-based column and row indices
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Parse a coordinate from A1-style notation
    ///
    /// # Examples
    /// ```
    /// use gridcalc_core::Coord;
    ///
    /// let coord = Coord::parse("A1").unwrap();
    /// assert_eq!(coord.x, 1);
    /// assert_eq!(coord.y, 1);
    ///
    /// let coord = Coord::parse("$B$2").unwrap();
    /// assert_eq!(coord.x, 2);
    /// assert_eq!(coord.y, 2);
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::InvalidCoord("empty coordinate".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        // Optional column absolute marker
        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }

        if pos == col_start {
            return Err(Error::InvalidCoord(format!("no column letters in '{s}'")));
        }

        let x = Self::letters_to_column(&s[col_start..pos])?;

        // Optional row absolute marker
        if bytes.get(pos) == Some(&b'$') {
            pos += 1;
        }

        let row_str = &s[pos..];
        if row_str.is_empty() {
            return Err(Error::InvalidCoord(format!("no row number in '{s}'")));
        }

        let y: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidCoord(format!("invalid row number in '{s}'")))?;

        // Row 0 is the header row, not addressable
        if y == 0 {
            return Err(Error::InvalidCoord(format!("row number must be >= 1 in '{s}'")));
        }

        Ok(Self { x, y })
    }

    /// Convert a 1-based column index to letters (1 = A, 26 = Z, 27 = AA, etc.)
    pub fn column_to_letters(x: u32) -> String {
        let mut result = String::new();
        let mut n = x;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to a 1-based index (A = 1, Z = 26, AA = 27, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidCoord("empty column letters".into()));
        }

        let mut x: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidCoord(format!("invalid column letter '{c}'")));
            }
            x = x
                .checked_mul(26)
                .and_then(|v| v.checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1))
                .ok_or_else(|| Error::InvalidCoord(format!("column too large: {letters}")))?;
        }

        Ok(x)
    }

    /// Format as an A1-style string
    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.x), self.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

impl FromStr for Coord {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// The configured bounds of the addressable data grid
///
/// Supplied once when the grid is constructed. Data cells live at
/// `x in 1..=width`, `y in 1..=height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSize {
    /// Number of addressable columns
    pub width: u32,
    /// Number of addressable rows
    pub height: u32,
}

impl GridSize {
    /// Create new grid bounds
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Check whether a coordinate lies inside the addressable grid
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x >= 1 && coord.x <= self.width && coord.y >= 1 && coord.y <= self.height
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
