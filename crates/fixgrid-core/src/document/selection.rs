use fixgrid_engine::engine::CellRef;
use std::fmt;

use crate::error::{FixgridError, Result};

/// A rectangular block of cells between an anchor and a cursor.
///
/// The corners may be given in any order; iteration is always rows outer,
/// columns inner, starting at the top-left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub anchor: CellRef,
    pub cursor: CellRef,
}

impl Selection {
    pub fn new(anchor: CellRef, cursor: CellRef) -> Self {
        Selection { anchor, cursor }
    }

    pub fn single(cell: CellRef) -> Self {
        Selection::new(cell, cell)
    }

    /// Parse `B2` or `A1:C3`.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        let parse_ref = |s: &str| {
            CellRef::from_str(s.trim())
                .ok_or_else(|| FixgridError::InvalidSelection(text.to_string()))
        };
        match text.split_once(':') {
            Some((start, end)) => Ok(Selection::new(parse_ref(start)?, parse_ref(end)?)),
            None => Ok(Selection::single(parse_ref(text)?)),
        }
    }

    /// (min_col, min_row, max_col, max_row)
    pub fn bounds(&self) -> (usize, usize, usize, usize) {
        (
            self.anchor.col.min(self.cursor.col),
            self.anchor.row.min(self.cursor.row),
            self.anchor.col.max(self.cursor.col),
            self.anchor.row.max(self.cursor.row),
        )
    }

    pub fn contains(&self, cell: &CellRef) -> bool {
        let (min_col, min_row, max_col, max_row) = self.bounds();
        (min_col..=max_col).contains(&cell.col) && (min_row..=max_row).contains(&cell.row)
    }

    pub fn len(&self) -> usize {
        let (min_col, min_row, max_col, max_row) = self.bounds();
        (max_col - min_col + 1) * (max_row - min_row + 1)
    }

    /// A selection always holds at least one cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn cells(&self) -> Vec<CellRef> {
        let (min_col, min_row, max_col, max_row) = self.bounds();
        (min_row..=max_row)
            .flat_map(|row| (min_col..=max_col).map(move |col| CellRef::new(col, row)))
            .collect()
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.anchor == self.cursor {
            write!(f, "{}", self.anchor)
        } else {
            write!(f, "{}:{}", self.anchor, self.cursor)
        }
    }
}
