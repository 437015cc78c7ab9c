use super::Document;
use crate::error::{FixgridError, Result};
use crate::storage::{GrdEntry, parse_grd, write_grd, write_markdown};
use std::path::{Path, PathBuf};
use tracing::info;

impl Document {
    /// Create a document, loading `path` when it exists.
    ///
    /// A path that does not exist yet becomes the save target of an empty
    /// document.
    pub fn with_file(path: Option<PathBuf>) -> Result<Self> {
        let mut core = Self::new();
        if let Some(ref p) = path {
            core.open(p)?;
        }
        Ok(core)
    }

    /// Load `path` if it exists, otherwise just remember it for saving.
    pub fn open(&mut self, path: &Path) -> Result<()> {
        if path.exists() {
            self.load_file(path)
        } else {
            self.file_path = Some(path.to_path_buf());
            self.modified = false;
            Ok(())
        }
    }

    /// Save to current file path.
    /// Returns the path saved to.
    pub fn save_file(&mut self) -> Result<PathBuf> {
        let Some(path) = &self.file_path else {
            return Err(FixgridError::NoFilePath);
        };

        write_grd(path, self)?;
        self.modified = false;
        info!(path = %path.display(), cells = self.filled_count(), "saved sheet");
        Ok(path.clone())
    }

    /// Save to `path` and make it the current file.
    pub fn save_as(&mut self, path: &Path) -> Result<()> {
        self.file_path = Some(path.to_path_buf());
        self.save_file()?;
        Ok(())
    }

    /// Load from file.
    ///
    /// Entries are applied in file order, so a formula sees the cells written
    /// above it. The current grid is only replaced once the whole file parsed.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let entries = parse_grd(path)?;

        let mut loaded = Document::with_options(self.options.clone(), &self.error_marker);
        for entry in &entries {
            match entry {
                GrdEntry::Text(cell_ref, text) => {
                    loaded.grid.insert(*cell_ref, text.clone());
                }
                GrdEntry::Formula(cell_ref, formula) => {
                    loaded.set_cell(cell_ref, &format!("={}", formula));
                }
            }
        }

        self.grid = loaded.grid;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        info!(path = %path.display(), entries = entries.len(), "loaded sheet");
        Ok(())
    }

    /// Export the grid as a markdown table.
    pub fn export_markdown(&self, path: &Path) -> Result<()> {
        write_markdown(path, self)?;
        Ok(())
    }
}
