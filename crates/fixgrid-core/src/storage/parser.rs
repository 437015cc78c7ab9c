//! Parser for .grd file format

use crate::error::{FixgridError, Result};
use fixgrid_engine::engine::CellRef;
use std::fs;
use std::path::Path;

/// One `REF: value` line of a `.grd` file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GrdEntry {
    /// Literal text (bare number or quoted string)
    Text(CellRef, String),
    /// Formula without its leading `=`, evaluated when the file is loaded
    Formula(CellRef, String),
}

impl GrdEntry {
    pub fn cell_ref(&self) -> &CellRef {
        match self {
            GrdEntry::Text(cell_ref, _) | GrdEntry::Formula(cell_ref, _) => cell_ref,
        }
    }
}

/// Parse a .grd file
pub fn parse_grd(path: &Path) -> Result<Vec<GrdEntry>> {
    let content = fs::read_to_string(path)?;
    parse_grd_content(&content)
}

/// Parse .grd content from a string, keeping file order.
pub fn parse_grd_content(content: &str) -> Result<Vec<GrdEntry>> {
    let mut entries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Parse "CELLREF: VALUE" format
        let Some((cell_ref_str, value_str)) = line.split_once(':') else {
            return Err(FixgridError::Parse {
                line: line_num + 1,
                message: "Expected 'CELLREF: VALUE' format".to_string(),
            });
        };

        let cell_ref_str = cell_ref_str.trim();
        let cell_ref = CellRef::from_str(cell_ref_str).ok_or_else(|| FixgridError::Parse {
            line: line_num + 1,
            message: format!("Invalid cell reference: {}", cell_ref_str),
        })?;

        if let Some(entry) = parse_cell_value(cell_ref, value_str.trim(), line_num + 1)? {
            entries.push(entry);
        }
    }

    Ok(entries)
}

/// Parse a cell value string. Blank values produce no entry.
fn parse_cell_value(cell_ref: CellRef, value: &str, line_num: usize) -> Result<Option<GrdEntry>> {
    if value.is_empty() {
        return Ok(None);
    }

    if let Some(formula) = value.strip_prefix('=') {
        return Ok(Some(GrdEntry::Formula(cell_ref, formula.to_string())));
    }

    // Quoted string: starts and ends with '"'
    if value.starts_with('"') && value.ends_with('"') && value.len() >= 2 {
        let text = unescape_grd_text(&value[1..value.len() - 1]);
        return Ok(Some(GrdEntry::Text(cell_ref, text)));
    }

    if value.parse::<f64>().is_ok() {
        return Ok(Some(GrdEntry::Text(cell_ref, value.to_string())));
    }

    Err(FixgridError::Parse {
        line: line_num,
        message: format!("Invalid value: {}. Use quotes for text.", value),
    })
}

fn unescape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(next) => {
                    out.push('\\');
                    out.push(next);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(ch);
        }
    }
    out
}
