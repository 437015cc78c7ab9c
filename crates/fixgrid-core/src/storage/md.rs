//! Markdown export functionality

use crate::document::Document;
use fixgrid_engine::engine::CellRef;
use std::path::Path;

/// Write the grid to a markdown file
pub fn write_markdown(path: &Path, doc: &Document) -> std::io::Result<()> {
    std::fs::write(path, markdown_content(doc))
}

/// Render the populated part of the grid as a markdown table.
pub fn markdown_content(doc: &Document) -> String {
    let mut out = String::from("# Sheet\n\n");

    let Some((min_row, min_col, max_row, max_col)) = find_grid_bounds(doc) else {
        out.push_str("*Empty spreadsheet*\n");
        return out;
    };

    // Header with column letters
    out.push_str("|   |");
    for col in min_col..=max_col {
        out.push_str(&format!(" {} |", CellRef::col_to_letter(col)));
    }
    out.push('\n');

    out.push_str("|---|");
    for _ in min_col..=max_col {
        out.push_str("---|");
    }
    out.push('\n');

    for row in min_row..=max_row {
        out.push_str(&format!("| {} |", row + 1)); // 1-based row numbers
        for col in min_col..=max_col {
            let text = doc.get_cell(&CellRef::new(col, row));
            out.push_str(&format!(" {} |", escape_markdown(&text)));
        }
        out.push('\n');
    }

    out
}

/// Bounds of the populated cells as (min_row, min_col, max_row, max_col).
fn find_grid_bounds(doc: &Document) -> Option<(usize, usize, usize, usize)> {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for entry in doc.grid.iter() {
        let cell_ref = entry.key();
        bounds = Some(match bounds {
            None => (cell_ref.row, cell_ref.col, cell_ref.row, cell_ref.col),
            Some((min_row, min_col, max_row, max_col)) => (
                min_row.min(cell_ref.row),
                min_col.min(cell_ref.col),
                max_row.max(cell_ref.row),
                max_col.max(cell_ref.col),
            ),
        });
    }
    bounds
}

/// Escape special markdown characters in cell content
fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn markdown_export_empty_sheet() {
        let doc = Document::new();
        assert_eq!(markdown_content(&doc), "# Sheet\n\n*Empty spreadsheet*\n");
    }

    #[test]
    fn markdown_export_escapes_pipes() {
        let mut doc = Document::new();
        doc.set_cell(&CellRef::new(1, 1), "a|b");
        assert_eq!(
            markdown_content(&doc),
            "# Sheet\n\n|   | B |\n|---|---|\n| 2 | a\\|b |\n"
        );
    }

    #[test]
    fn markdown_export_matches_expected_simple() {
        let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let grid_path = repo_root.join("tests/fixtures/simple.grd");
        let expected_path = repo_root.join("tests/fixtures/simple.expected.md");
        let output_path = std::env::temp_dir().join(format!(
            "fixgrid_simple_export_{}_{}_{:?}.md",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos(),
            std::thread::current().id(),
        ));
        struct Cleanup(PathBuf);
        impl Drop for Cleanup {
            fn drop(&mut self) {
                let _ = fs::remove_file(&self.0);
            }
        }
        let _cleanup = Cleanup(output_path.clone());

        let doc = Document::with_file(Some(grid_path)).unwrap();
        write_markdown(&output_path, &doc).unwrap();

        let actual = fs::read_to_string(&output_path).unwrap();
        let expected = fs::read_to_string(expected_path).unwrap();

        let normalize = |text: String| text.replace("\r\n", "\n");
        assert_eq!(normalize(actual), normalize(expected));
    }
}
