//! File formats: `.grd` sheets and markdown export.

pub mod md;
pub mod parser;
pub mod writer;

pub use md::{markdown_content, write_markdown};
pub use parser::{GrdEntry, parse_grd, parse_grd_content};
pub use writer::{write_grd, write_grd_content};
