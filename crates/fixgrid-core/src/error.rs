//! Error types for Fixgrid core.

use thiserror::Error;

use fixgrid_engine::EngineError;

/// Errors that can occur while loading, saving or editing a document.
///
/// Formula failures are not reported here: they are written into the cell
/// as the document's error marker.
#[derive(Error, Debug)]
pub enum FixgridError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid cell reference: {0}")]
    InvalidCellRef(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("No file path set")]
    NoFilePath,

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),
}

pub type Result<T> = std::result::Result<T, FixgridError>;
