use dashmap::DashMap;
use fixgrid_engine::engine::{CellRef, ERROR_MARKER, EvalOptions, Snapshot};
use std::path::PathBuf;
use std::sync::Arc;

/// Cell text keyed by position (DashMap is internally Arc-based, clones are cheap).
///
/// Absent keys are blank cells. Formula cells hold their evaluated result,
/// never the formula itself.
pub type Grid = Arc<DashMap<CellRef, String>>;

/// UI-agnostic document state for the spreadsheet.
pub struct Document {
    /// The spreadsheet grid
    pub grid: Grid,
    /// Options passed to every formula evaluation
    pub options: EvalOptions,
    /// Text written into a cell when its formula fails outright
    pub error_marker: String,
    /// Current file path
    pub file_path: Option<PathBuf>,
    /// Whether the grid has been modified
    pub modified: bool,
}

impl Document {
    /// Create a new, empty document.
    ///
    /// This constructor is side-effect free: it does not touch the filesystem.
    pub fn new() -> Self {
        Self::with_options(EvalOptions::default(), ERROR_MARKER)
    }

    pub fn with_options(options: EvalOptions, error_marker: &str) -> Self {
        Document {
            grid: Arc::new(DashMap::new()),
            options,
            error_marker: error_marker.to_string(),
            file_path: None,
            modified: false,
        }
    }

    /// Raw text of a cell; blank cells read as the empty string.
    pub fn get_cell(&self, cell_ref: &CellRef) -> String {
        self.grid
            .get(cell_ref)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Copy every cell's text for a single evaluation.
    pub fn snapshot(&self) -> Snapshot {
        self.grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    /// Number of cells whose text is not blank.
    pub fn filled_count(&self) -> usize {
        self.grid
            .iter()
            .filter(|entry| !entry.value().trim().is_empty())
            .count()
    }

    /// Populated cells in row-major order.
    pub fn sorted_cells(&self) -> Vec<(CellRef, String)> {
        let mut cells: Vec<_> = self
            .grid
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect();
        cells.sort_by(|a, b| a.0.cmp(&b.0));
        cells
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
