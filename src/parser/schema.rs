//! Output JSON schema definitions for flame reports.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use crate::aggregator::TreeNode;
use crate::utils::config::SCHEMA_VERSION;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Whether chains were aggregated leaf-first
    pub inverted: bool,

    /// Regex the chains were filtered with, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// Number of samples aggregated
    pub total_samples: u64,

    /// Top hot paths (ranked by self samples)
    pub hot_paths: Vec<HotPath>,

    /// The aggregated call tree
    pub tree: TreeNode,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// A hot path in the call tree (root-to-node path with self samples)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotPath {
    /// Collapsed stack representation (e.g., "nginx;main;schedule")
    pub stack: String,

    /// Samples ending at the last frame of this path
    pub samples: u64,

    /// Percentage of all samples
    pub percentage: f64,
}

/// Assemble a report from an aggregated tree
///
/// **Public** - used by commands to create final output
pub fn to_report(
    tree: TreeNode,
    hot_paths: Vec<HotPath>,
    inverted: bool,
    filter: Option<String>,
) -> FlameReport {
    use chrono::Utc;

    FlameReport {
        version: SCHEMA_VERSION.to_string(),
        inverted,
        filter,
        total_samples: tree.value,
        hot_paths,
        tree,
        generated_at: Utc::now().to_rfc3339(),
    }
}
