//! Cell records and the read-only snapshot the engine evaluates against.

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

use super::CellRef;

/// A single addressable cell and its raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub id: CellRef,
    pub value: String,
}

impl Cell {
    pub fn new(id: CellRef, value: impl Into<String>) -> Self {
        Cell {
            id,
            value: value.into(),
        }
    }
}

/// Immutable copy of every cell's text, taken when an evaluation starts.
///
/// Later writes to the grid the snapshot was built from are not visible here.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    values: HashMap<CellRef, String>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw text of a cell, if the cell is present.
    pub fn get(&self, cell_ref: &CellRef) -> Option<&str> {
        self.values.get(cell_ref).map(String::as_str)
    }

    /// Numeric value of a cell.
    ///
    /// None when the cell is absent, blank, or its text does not start with a number.
    pub fn number(&self, cell_ref: &CellRef) -> Option<f64> {
        let text = self.get(cell_ref)?;
        if text.trim().is_empty() {
            return None;
        }
        parse_number(text)
    }

    pub fn insert(&mut self, cell_ref: CellRef, value: impl Into<String>) {
        self.values.insert(cell_ref, value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<Cell> for Snapshot {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let values = iter.into_iter().map(|c| (c.id, c.value)).collect();
        Snapshot { values }
    }
}

impl FromIterator<(CellRef, String)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (CellRef, String)>>(iter: I) -> Self {
        Snapshot {
            values: iter.into_iter().collect(),
        }
    }
}

fn number_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
            .expect("number prefix regex must compile")
    })
}

/// Parse the longest leading decimal literal of `text`.
///
/// Leading whitespace is ignored and trailing garbage is dropped, so `" 12abc"`
/// reads as `12`. Returns None when no digits lead the text.
pub fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let m = number_prefix_re().find(text)?;
    let literal = m.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => literal.parse::<f64>().ok(),
    }
}
