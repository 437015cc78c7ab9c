//! fixgrid-core - UI-agnostic document model + storage.

pub mod document;
pub mod error;
pub mod storage;

pub use document::{ApplyOutcome, Document, Grid, Selection};
pub use error::{FixgridError, Result};

pub use fixgrid_engine::engine::CellRef;
