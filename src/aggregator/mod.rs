//! Aggregation of selected report rows into a flame graph call tree.
//!
//! This module transforms a selection into:
//! - A weighted call tree (for rendering)
//! - Hot path analysis (where most samples end)
//! - Sample distribution statistics

pub mod metrics;
pub mod selection;
pub mod tree;

// Re-export main types and functions
pub use metrics::{calculate_hot_paths, calculate_sample_distribution, SampleDistribution};
pub use selection::{aggregate, build_flame_tree, collect_samples, split_chain, ChainFilter, Sample};
pub use tree::{collapse_single_child, insert_chain, TreeNode};
