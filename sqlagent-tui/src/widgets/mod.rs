//! Reusable widget components.

pub mod grid;
pub mod syntax;

pub use grid::{column_widths, GridWidget};
pub use syntax::SqlHighlighter;
