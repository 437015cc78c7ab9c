//! Writer for .grd file format

use crate::document::Document;
use crate::error::Result;
use std::fs;
use std::path::Path;

/// Write a document's grid to a .grd file
pub fn write_grd(path: &Path, doc: &Document) -> Result<()> {
    fs::write(path, write_grd_content(doc))?;
    Ok(())
}

/// Write a document's grid to a .grd format string.
///
/// Cells hold values, not formulas, so every line is a literal: text that
/// reads back as a number is written bare, anything else is quoted.
pub fn write_grd_content(doc: &Document) -> String {
    let mut lines = vec!["# fixgrid sheet".to_string()];

    for (cell_ref, text) in doc.sorted_cells() {
        if text.is_empty() {
            continue;
        }
        let value_str = if text.trim() == text && text.parse::<f64>().is_ok() {
            text
        } else {
            format!("\"{}\"", escape_grd_text(&text))
        };
        lines.push(format!("{}: {}", cell_ref, value_str));
    }

    lines.join("\n") + "\n"
}

fn escape_grd_text(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out
}
