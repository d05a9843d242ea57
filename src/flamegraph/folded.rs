//! Classic flamegraph rendering through inferno.
//!
//! The call tree is exported to folded stack lines and handed to inferno,
//! which produces the familiar interactive flamegraph.pl-style SVG.

use super::generator::FlamegraphConfig;
use crate::aggregator::TreeNode;
use crate::utils::error::FlamegraphError;
use inferno::flamegraph::{self, Direction, Options};
use log::{debug, info, warn};

/// Generate an inferno SVG from a call tree
///
/// **Public** - alternative to `generate_flamegraph`
///
/// # Errors
/// * `FlamegraphError::EmptyTree` - the tree holds no samples
/// * `FlamegraphError::RenderFailed` - inferno rejected the folded input
pub fn generate_inferno_flamegraph(
    tree: &TreeNode,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    let lines = tree.folded_lines();
    if lines.is_empty() {
        return Err(FlamegraphError::EmptyTree);
    }

    let config = config.cloned().unwrap_or_default();
    debug!("Exported {} folded stack lines", lines.len());
    if config.highlight.is_some() {
        warn!("Highlighting is not supported by the inferno renderer; ignoring it");
    }

    let mut options = Options::default();
    options.title = config.title.clone();
    options.count_name = "samples".to_string();
    options.image_width = Some(config.width);
    if config.inverted {
        options.direction = Direction::Inverted;
    }

    let mut buffer = Vec::new();
    flamegraph::from_lines(&mut options, lines.iter().map(String::as_str), &mut buffer)
        .map_err(|e| FlamegraphError::RenderFailed(e.to_string()))?;

    let svg = String::from_utf8_lossy(&buffer).into_owned();
    info!("Inferno flamegraph generated ({} bytes)", svg.len());
    Ok(svg)
}
