//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod selection;
mod state;

pub use ops::ApplyOutcome;
pub use selection::Selection;
pub use state::{Document, Grid};
