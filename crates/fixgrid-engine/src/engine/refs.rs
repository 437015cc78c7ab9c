//! Reference and range rewriting.
//!
//! Before arithmetic and function calls can be reduced, every cell address in
//! a formula is replaced by text:
//!
//! - **Ranges**: `A1:B2` → `[1,2,3]` (numeric members only, rows outer)
//! - **References**: `B7` → `4`, or `0` when the cell has no number
//! - **Lists**: `[1,2,3]` → `1,2,3` so the values can feed a call or arithmetic
//!
//! Ranges must be rewritten before single references, otherwise the endpoints
//! of `A1:B2` would be resolved on their own.

use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::format::{format_list, format_number};
use super::{CellRef, Snapshot};

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)([A-J])([1-9][0-9]?):([A-J])([1-9][0-9]?)")
            .expect("range regex must compile")
    })
}

fn cell_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)[A-J][1-9][0-9]?").expect("cell regex must compile"))
}

fn list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]").expect("list regex must compile"))
}

/// Replace every `A1:B3` span with a bracketed list of its numeric members.
///
/// Blank, missing and non-numeric cells are skipped rather than read as zero.
pub fn expand_ranges(formula: &str, snapshot: &Snapshot) -> String {
    range_re()
        .replace_all(formula, |caps: &Captures| {
            let corners = (
                corner(&caps[1], &caps[2]),
                corner(&caps[3], &caps[4]),
            );
            let (Some(start), Some(end)) = corners else {
                return caps[0].to_string();
            };
            format!("[{}]", format_list(&range_values(start, end, snapshot)))
        })
        .into_owned()
}

fn corner(letter: &str, row: &str) -> Option<CellRef> {
    let letter = letter.chars().next()?;
    CellRef::from_parts(letter, row.parse().ok()?)
}

/// Numeric values of the rectangle spanned by two corners, rows outer, columns inner.
pub fn range_values(start: CellRef, end: CellRef, snapshot: &Snapshot) -> Vec<f64> {
    let (min_row, max_row) = (start.row.min(end.row), start.row.max(end.row));
    let (min_col, max_col) = (start.col.min(end.col), start.col.max(end.col));

    let mut values = Vec::new();
    for row in min_row..=max_row {
        for col in min_col..=max_col {
            if let Some(n) = snapshot.number(&CellRef::new(col, row)) {
                values.push(n);
            }
        }
    }
    values
}

/// Replace every single-cell reference with the cell's number, or `0`.
pub fn resolve_references(formula: &str, snapshot: &Snapshot) -> String {
    cell_re()
        .replace_all(formula, |caps: &Captures| {
            let value = CellRef::from_str(&caps[0])
                .and_then(|cell_ref| snapshot.number(&cell_ref))
                .unwrap_or(0.0);
            format_number(value)
        })
        .into_owned()
}

/// Whether the formula mentions any cell, alone or as a range endpoint.
pub fn has_references(formula: &str) -> bool {
    cell_re().is_match(formula)
}

/// Strip the brackets from every list, exposing its comma-separated contents.
pub fn unwrap_lists(formula: &str) -> String {
    list_re().replace_all(formula, "$1").into_owned()
}
