use super::{Document, Selection};
use crate::error::{FixgridError, Result};
use fixgrid_engine::engine::{CellRef, evaluate_or, has_references, try_evaluate_with};
use tracing::{debug, warn};

/// What a formula-bar application wrote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Text written to every selected cell
    pub value: String,
    /// Number of cells written
    pub written: usize,
    /// The formula mentions cells and was applied to more than one cell.
    /// References are not shifted per target cell.
    pub relative_refs_warning: bool,
}

/// Remove all whitespace, the way cell input is normalized before evaluation.
fn strip_whitespace(input: &str) -> String {
    input.chars().filter(|c| !c.is_whitespace()).collect()
}

impl Document {
    /// Evaluate a formula (without its leading `=`) against the current grid,
    /// writing the error marker on a hard failure.
    pub fn evaluate_formula(&self, formula: &str) -> String {
        let result = evaluate_or(formula, &self.snapshot(), &self.options, &self.error_marker);
        if result == self.error_marker {
            warn!(formula, "formula failed, writing error marker");
        }
        result
    }

    /// Evaluate a formula (without its leading `=`), reporting hard failures.
    pub fn try_evaluate_formula(&self, formula: &str) -> Result<String> {
        Ok(try_evaluate_with(formula, &self.snapshot(), &self.options)?)
    }

    /// Evaluate one-off input such as a command-line formula.
    ///
    /// Whitespace is stripped and the leading `=` is optional. Nothing is
    /// written to the grid.
    pub fn evaluate_input(&self, input: &str) -> String {
        let normalized = strip_whitespace(input);
        let formula = normalized.strip_prefix('=').unwrap_or(&normalized);
        self.evaluate_formula(formula)
    }

    /// Store `text` verbatim; empty text clears the cell.
    fn write_cell(&mut self, cell_ref: CellRef, text: String) {
        if text.is_empty() {
            self.grid.remove(&cell_ref);
        } else {
            self.grid.insert(cell_ref, text);
        }
        self.modified = true;
    }

    /// Change a cell's content.
    ///
    /// Whitespace is stripped to decide whether the input is a formula. A
    /// formula is evaluated against the grid as it was before this write and
    /// its result replaces the input; anything else is stored unchanged.
    /// Returns the text now held by the cell.
    pub fn set_cell(&mut self, cell_ref: &CellRef, input: &str) -> String {
        let normalized = strip_whitespace(input);
        let text = match normalized.strip_prefix('=') {
            Some(formula) => self.evaluate_formula(formula),
            None => input.to_string(),
        };
        debug!(cell = %cell_ref, input, stored = text.as_str(), "set cell");
        self.write_cell(*cell_ref, text.clone());
        text
    }

    /// Like [`Document::set_cell`], addressing the cell by name (`"B7"`).
    pub fn set_cell_by_name(&mut self, name: &str, input: &str) -> Result<String> {
        let cell_ref = CellRef::from_str(name.trim())
            .ok_or_else(|| FixgridError::InvalidCellRef(name.to_string()))?;
        Ok(self.set_cell(&cell_ref, input))
    }

    /// Apply formula-bar input to every cell of a selection.
    ///
    /// The input is trimmed; blank input writes nothing. A formula is
    /// evaluated once and the same result is written to each cell.
    pub fn apply_to_selection(&mut self, selection: &Selection, input: &str) -> ApplyOutcome {
        let input = input.trim();
        if input.is_empty() {
            return ApplyOutcome {
                value: String::new(),
                written: 0,
                relative_refs_warning: false,
            };
        }

        let (value, mentions_cells) = match input.strip_prefix('=') {
            Some(formula) => {
                let formula = strip_whitespace(formula);
                (self.evaluate_formula(&formula), has_references(&formula))
            }
            None => (input.to_string(), false),
        };

        let targets = selection.cells();
        for cell_ref in &targets {
            self.write_cell(*cell_ref, value.clone());
        }
        debug!(%selection, written = targets.len(), value = value.as_str(), "applied input");

        ApplyOutcome {
            value,
            written: targets.len(),
            relative_refs_warning: mentions_cells && targets.len() > 1,
        }
    }
}
