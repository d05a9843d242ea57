//! Selection parsing and report schema definitions.
//!
//! This module handles:
//! - Parsing selection JSON (report rows + current selection)
//! - Validating that the parallel arrays line up
//! - Defining the output report schema

pub mod input;
pub mod schema;

// Re-export main types
pub use input::{load_selection, parse_selection, SelectionInput};
pub use schema::{to_report, FlameReport, HotPath};
