//! Calculate hot paths and sample distribution from a call tree.
//!
//! Hot paths are the call paths where the most samples end, i.e. where
//! threads spent the most time off-CPU.

use super::tree::TreeNode;
use crate::parser::schema::HotPath;
use log::debug;

/// A root-to-node path with its self samples
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathWeight {
    /// Frames joined with `;`, for display
    pub stack: String,
    pub samples: u64,
    /// Number of frames in the path, root included
    pub depth: usize,
}

/// Flatten the tree into paths with non-zero self samples
///
/// **Public** - sorted by samples (descending), ties keep tree order
pub fn path_weights(tree: &TreeNode) -> Vec<PathWeight> {
    let mut weights = Vec::new();
    let mut path = vec![tree.name.as_str()];
    collect_weights(tree, &mut path, &mut weights);

    weights.sort_by(|a, b| b.samples.cmp(&a.samples));
    weights
}

fn collect_weights<'a>(node: &'a TreeNode, path: &mut Vec<&'a str>, out: &mut Vec<PathWeight>) {
    let samples = node.self_value();
    if samples > 0 {
        out.push(PathWeight {
            stack: path.join(";"),
            samples,
            depth: path.len(),
        });
    }
    for child in &node.children {
        path.push(child.name.as_str());
        collect_weights(child, path, out);
        path.pop();
    }
}

/// Calculate hot paths from a call tree
///
/// **Public** - main entry point for metrics calculation
///
/// # Arguments
/// * `tree` - Aggregated call tree
/// * `top_n` - Number of top paths to return (e.g., 10)
///
/// # Returns
/// Vector of hot paths, sorted by self samples (descending)
pub fn calculate_hot_paths(tree: &TreeNode, top_n: usize) -> Vec<HotPath> {
    let weights = path_weights(tree);
    debug!("Calculating top {} hot paths from {} paths", top_n, weights.len());

    weights
        .iter()
        .take(top_n)
        .map(|w| create_hot_path(w, tree.value))
        .collect()
}

/// Create a HotPath from a PathWeight
///
/// **Public** - conversion helper
pub fn create_hot_path(weight: &PathWeight, total_samples: u64) -> HotPath {
    let percentage = if total_samples > 0 {
        (weight.samples as f64 / total_samples as f64) * 100.0
    } else {
        0.0
    };

    HotPath {
        stack: weight.stack.clone(),
        samples: weight.samples,
        percentage,
    }
}

/// Calculate sample distribution statistics
///
/// **Public** - provides summary statistics
pub fn calculate_sample_distribution(tree: &TreeNode) -> SampleDistribution {
    let weights = path_weights(tree);
    if weights.is_empty() {
        return SampleDistribution::default();
    }

    let total: u64 = weights.iter().map(|w| w.samples).sum();
    let count = weights.len();
    let mean = total / count as u64;

    let mut sorted: Vec<u64> = weights.iter().map(|w| w.samples).collect();
    sorted.sort_unstable();
    let median = sorted[sorted.len() / 2];

    // Top 10% of paths
    let top_count = (count as f64 * 0.1).ceil() as usize;
    let top_samples: u64 = weights.iter().take(top_count).map(|w| w.samples).sum();

    SampleDistribution {
        total_samples: total,
        path_count: count,
        max_depth: tree.depth(),
        mean_samples_per_path: mean,
        median_samples_per_path: median,
        top_10_percent_samples: top_samples,
        top_10_percent_percentage: if total > 0 {
            (top_samples as f64 / total as f64) * 100.0
        } else {
            0.0
        },
    }
}

/// Sample distribution statistics
///
/// **Public** - returned from calculate_sample_distribution
#[derive(Debug, Clone, Default)]
pub struct SampleDistribution {
    /// Total samples across all paths
    pub total_samples: u64,

    /// Number of distinct paths with self samples
    pub path_count: usize,

    /// Deepest level of the tree
    pub max_depth: usize,

    pub mean_samples_per_path: u64,
    pub median_samples_per_path: u64,

    /// Samples in the top 10% of paths
    pub top_10_percent_samples: u64,

    /// Percentage of all samples in the top 10%
    pub top_10_percent_percentage: f64,
}

impl SampleDistribution {
    /// Returns true if the top 10% of paths hold more than 80% of samples
    pub fn is_highly_concentrated(&self) -> bool {
        self.top_10_percent_percentage > 80.0
    }

    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Total: {} samples | Paths: {} | Depth: {} | Mean: {} | Median: {} | Top 10%: {:.1}%",
            self.total_samples,
            self.path_count,
            self.max_depth,
            self.mean_samples_per_path,
            self.median_samples_per_path,
            self.top_10_percent_percentage
        )
    }
}
