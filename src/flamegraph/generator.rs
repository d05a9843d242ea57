//! SVG flamegraph generation from an aggregated call tree.
//!
//! Custom renderer instead of inferno so that:
//! - Frame fills come from the name-hash palette (stable across reports)
//! - Children are drawn in insertion order, never re-sorted
//! - Inverted reports render as icicles (root on top)

use crate::aggregator::TreeNode;
use crate::palette::{frame_color, FrameLabel};
use crate::utils::config::{DEFAULT_SVG_WIDTH, FRAME_HEIGHT, MIN_FRAME_WIDTH, TITLE_MARGIN};
use crate::utils::error::FlamegraphError;
use log::info;

const CHAR_WIDTH: f64 = 7.0;
const MIN_LABEL_WIDTH: f64 = 35.0;

/// Flamegraph configuration
#[derive(Debug, Clone)]
pub struct FlamegraphConfig {
    pub title: String,
    pub width: usize,
    /// Root on top instead of at the bottom
    pub inverted: bool,
    /// Frames whose name contains this text are highlighted
    pub highlight: Option<String>,
}

impl Default for FlamegraphConfig {
    fn default() -> Self {
        Self {
            title: "Off-CPU Time Flame Graph".to_string(),
            width: DEFAULT_SVG_WIDTH,
            inverted: false,
            highlight: None,
        }
    }
}

impl FlamegraphConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn with_highlight(mut self, highlight: Option<String>) -> Self {
        self.highlight = highlight.filter(|h| !h.is_empty());
        self
    }

    /// Whether a frame should be drawn with the highlight color
    pub fn is_highlighted(&self, name: &str) -> bool {
        self.highlight
            .as_deref()
            .is_some_and(|needle| name.contains(needle))
    }
}

/// Layout state shared by every rendered frame
struct Canvas<'a> {
    config: &'a FlamegraphConfig,
    graph_height: usize,
    out: String,
}

/// Generate an SVG flamegraph from a call tree
///
/// **Public** - main entry point for the built-in renderer
///
/// # Errors
/// * `FlamegraphError::EmptyTree` - the tree holds no samples
pub fn generate_flamegraph(
    tree: &TreeNode,
    config: Option<&FlamegraphConfig>,
) -> Result<String, FlamegraphError> {
    if tree.value == 0 {
        return Err(FlamegraphError::EmptyTree);
    }

    let config = config.cloned().unwrap_or_default();
    info!(
        "Generating flamegraph with {} nodes ({} samples)",
        tree.total_nodes(),
        tree.value
    );

    let width = config.width;
    let graph_height = (tree.depth() + 1) * FRAME_HEIGHT;
    let total_height = graph_height + TITLE_MARGIN + 10;

    let mut canvas = Canvas {
        config: &config,
        graph_height,
        out: String::new(),
    };

    // Header
    canvas.out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));

    // Styles
    canvas.out.push_str(
        r#"<style>.func { font: 12px sans-serif; } .func:hover { stroke: black; stroke-width: 1; cursor: pointer; opacity: 0.9; }</style>"#,
    );

    // Title
    canvas.out.push_str(&format!(
        r#"<text x="{}" y="20" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape_xml(&config.title)
    ));

    render_node(tree, tree.value, 0, 0.0, width as f64, &mut canvas);

    canvas.out.push_str("</svg>");

    info!("Flamegraph generated successfully ({} bytes)", canvas.out.len());
    Ok(canvas.out)
}

fn render_node(node: &TreeNode, total: u64, level: usize, x: f64, w: f64, canvas: &mut Canvas<'_>) {
    if w < MIN_FRAME_WIDTH {
        return;
    }

    let label = FrameLabel::new(&node.name).highlighted(canvas.config.is_highlighted(&node.name));
    let color = frame_color(&label);

    let y = if canvas.config.inverted {
        TITLE_MARGIN + level * FRAME_HEIGHT
    } else {
        TITLE_MARGIN + canvas.graph_height - (level + 1) * FRAME_HEIGHT
    };

    let name = escape_xml(&node.name);
    let percentage = node.value as f64 / total as f64 * 100.0;
    canvas.out.push_str(&format!(
        r#"<rect x="{:.2}" y="{}" width="{:.2}" height="{}" fill="{}" class="func"><title>{} ({} samples, {:.2}%)</title></rect>"#,
        x, y, w, FRAME_HEIGHT, color, name, node.value, percentage
    ));

    if let Some(display_name) = get_truncated_name(&node.name, w) {
        canvas.out.push_str(&format!(
            r#"<text x="{:.2}" y="{}" dx="4" dy="13" font-size="12" fill="black" pointer-events="none">{}</text>"#,
            x,
            y,
            escape_xml(&display_name)
        ));
    }

    // Children keep insertion order, left to right
    let mut current_x = x;
    for child in &node.children {
        let child_w = child.value as f64 / node.value as f64 * w;
        render_node(child, total, level + 1, current_x, child_w, canvas);
        current_x += child_w;
    }
}

/// Fit a frame label into `width` pixels
///
/// **Public** - returns `None` when the frame is too narrow for any text
pub fn get_truncated_name(name: &str, width: f64) -> Option<String> {
    if width <= MIN_LABEL_WIDTH || name.is_empty() {
        return None;
    }

    let max_chars = (width / CHAR_WIDTH) as usize;
    let len = name.chars().count();
    if len <= max_chars {
        Some(name.to_string())
    } else if max_chars > 3 {
        let head: String = name.chars().take(max_chars - 3).collect();
        Some(format!("{}...", head))
    } else {
        None
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Create a text summary of the hottest paths, colored like the flamegraph
///
/// **Public** - printed by `render --summary`
pub fn generate_text_summary(tree: &TreeNode, max_lines: usize) -> String {
    use crate::aggregator::metrics::path_weights;

    let weights = path_weights(tree);
    let total = tree.value.max(1);
    let reset = "\x1b[0m";
    let mut lines = Vec::new();

    lines.push("  OFF-CPU HOT PATHS".to_string());
    lines.push(format!("  {}", "-".repeat(72)));
    lines.push(format!("  {:<50} {:>10} {:>8}", "Call Path (Hottest First)", "SAMPLES", "%"));
    lines.push(format!("  {}", "-".repeat(72)));

    for weight in weights.iter().take(max_lines) {
        let percentage = weight.samples as f64 / total as f64 * 100.0;
        let leaf = weight.stack.rsplit(';').next().unwrap_or(&weight.stack);
        let color = frame_color(&FrameLabel::new(leaf)).ansi_fg();

        let display_stack = truncate_front(&weight.stack, 50);

        lines.push(format!(
            "  {}{:<50}{} {:>10} {:>7.1}%",
            color, display_stack, reset, weight.samples, percentage
        ));
    }

    lines.push(format!("  {}", "-".repeat(72)));

    // Top-level breakdown as bars
    lines.push(String::new());
    lines.push(format!("  {} ({} samples)", tree.name, tree.value));
    for child in &tree.children {
        let percentage = child.value as f64 / total as f64 * 100.0;
        let bar = "#".repeat((percentage / 2.0) as usize);
        let color = frame_color(&FrameLabel::new(&child.name)).ansi_fg();

        lines.push(format!(
            "  └─ {}{:<24}{} {}{:<50}{} {:>5.1}%",
            color,
            truncate_front(&child.name, 24),
            reset,
            color,
            bar,
            reset,
            percentage
        ));
    }

    if weights.len() > max_lines {
        lines.push(String::new());
        lines.push(format!(
            "   (Showing top {} of {} paths)",
            max_lines,
            weights.len()
        ));
    }

    lines.join("\n")
}

/// Keep the tail of long paths, where the interesting frames are
fn truncate_front(s: &str, max: usize) -> String {
    let len = s.chars().count();
    if len <= max {
        return s.to_string();
    }
    let tail: String = s.chars().skip(len - (max - 3)).collect();
    format!("...{}", tail)
}
