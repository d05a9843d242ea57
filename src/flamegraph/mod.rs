//! Flamegraph rendering of aggregated call trees.
//!
//! Two renderers are available: a built-in one colored by the name-hash
//! palette, and inferno's classic SVG fed from the tree's folded export.

pub mod folded;
pub mod generator;

// Re-export main types
pub use folded::generate_inferno_flamegraph;
pub use generator::{generate_flamegraph, generate_text_summary, get_truncated_name, FlamegraphConfig};
