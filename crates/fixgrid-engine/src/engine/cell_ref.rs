//! Cell reference parsing and formatting.
//!
//! The grid is fixed at ten columns (`A`..=`J`) and 99 rows (`1`..=`99`).
//! References are parsed case-insensitively and always displayed upper-case.
//!
//! # Examples
//!
//! ```ignore
//! let cell = CellRef::from_str("b3").unwrap();
//! assert_eq!(cell.col, 1);  // 0-indexed
//! assert_eq!(cell.row, 2);
//! assert_eq!(cell.to_string(), "B3");
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Number of columns in the grid (`A` through `J`).
pub const COLS: usize = 10;
/// Number of rows in the grid (`1` through `99`).
pub const ROWS: usize = 99;

/// A reference to a cell by column and row indices (0-indexed).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

fn a1_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?i)(?<letter>[A-J])(?<number>[1-9][0-9]?)$")
            .expect("cell reference regex must compile")
    })
}

impl CellRef {
    pub fn new(col: usize, row: usize) -> CellRef {
        CellRef { row, col }
    }

    /// Parse a cell reference like "A1" or "j99".
    /// Returns None if the input is outside the grid or malformed.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(name: &str) -> Option<CellRef> {
        Self::parse_a1(name)
    }

    fn parse_a1(name: &str) -> Option<CellRef> {
        let caps = a1_re().captures(name)?;
        let letter = caps["letter"].to_ascii_uppercase();
        let col = (letter.as_bytes()[0] - b'A') as usize;
        let row = caps["number"].parse::<usize>().ok()?.checked_sub(1)?;
        Some(CellRef::new(col, row))
    }

    /// Build a reference from an upper- or lower-case column letter and a 1-based row.
    pub fn from_parts(letter: char, row_1based: usize) -> Option<CellRef> {
        let letter = letter.to_ascii_uppercase();
        if !('A'..='J').contains(&letter) || !(1..=ROWS).contains(&row_1based) {
            return None;
        }
        Some(CellRef::new((letter as u8 - b'A') as usize, row_1based - 1))
    }

    /// Convert a column index to its letter (0 -> A, 9 -> J).
    pub fn col_to_letter(col: usize) -> char {
        (b'A' + (col % COLS) as u8) as char
    }
}

impl std::str::FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_a1(s).ok_or_else(|| format!("Invalid cell reference: {}", s))
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CellRef::col_to_letter(self.col), self.row + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::CellRef;

    #[test]
    fn test_from_str_bounds() {
        let a1 = CellRef::from_str("A1").unwrap();
        assert_eq!((a1.col, a1.row), (0, 0));

        let j99 = CellRef::from_str("J99").unwrap();
        assert_eq!((j99.col, j99.row), (9, 98));
    }

    #[test]
    fn test_from_str_case_insensitive() {
        let lower = CellRef::from_str("c12").unwrap();
        assert_eq!(lower, CellRef::new(2, 11));
        assert_eq!(lower.to_string(), "C12");
    }

    #[test]
    fn test_from_str_invalid_inputs() {
        assert!(CellRef::from_str("").is_none());
        assert!(CellRef::from_str("K1").is_none());
        assert!(CellRef::from_str("A0").is_none());
        assert!(CellRef::from_str("A100").is_none());
        assert!(CellRef::from_str("A01").is_none());
        assert!(CellRef::from_str("AA1").is_none());
        assert!(CellRef::from_str("A 1").is_none());
    }

    #[test]
    fn test_from_parts() {
        assert_eq!(CellRef::from_parts('b', 2), Some(CellRef::new(1, 1)));
        assert_eq!(CellRef::from_parts('K', 2), None);
        assert_eq!(CellRef::from_parts('A', 100), None);
    }
}
