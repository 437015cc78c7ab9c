//! Spreadsheet engine API.
//!
//! This module provides the formula evaluation pipeline:
//!
//! - [`CellRef`] - Cell reference parsing (A1 notation ↔ row/col indices)
//! - [`Cell`], [`Snapshot`] - Read-only view of the grid during an evaluation
//! - [`expand_ranges`], [`resolve_references`], [`unwrap_lists`] - Reference rewriting
//! - [`reduce_arithmetic`] - Infix arithmetic with precedence tiers
//! - [`try_evaluate`], [`evaluate`] - Rewrite a formula to its fixed point
//! - [`format_number`] - Format values as they appear in formula text

mod arith;
mod cell;
mod cell_ref;
mod eval;
pub(crate) mod format;
mod refs;

pub use arith::{reduce_arithmetic, reduce_high, reduce_low};
pub use cell::{Cell, Snapshot, parse_number};
pub use cell_ref::{COLS, CellRef, ROWS};
pub use eval::{
    DEFAULT_MAX_PASSES, ERROR_MARKER, EvalOptions, eval_pass, evaluate, evaluate_or,
    try_evaluate, try_evaluate_with,
};
pub use format::{format_bool, format_list, format_number};
pub use refs::{
    expand_ranges, has_references, range_values, resolve_references, unwrap_lists,
};
