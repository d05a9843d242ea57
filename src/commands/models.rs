use crate::flamegraph::FlamegraphConfig;
use std::path::PathBuf;

/// Which SVG renderer to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Renderer {
    /// Built-in renderer with name-hash colors
    #[default]
    Builtin,
    /// inferno's flamegraph.pl-style SVG
    Inferno,
}

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Selection JSON file
    pub input: PathBuf,

    /// Output path for JSON report
    pub output_json: Option<PathBuf>,

    /// Output path for SVG flamegraph (optional)
    pub output_svg: Option<PathBuf>,

    /// Regex applied to the raw call-chain strings
    pub regex: Option<String>,

    /// Aggregate leaf-first
    pub inverted: bool,

    /// Row selection overriding the input's own
    pub rows: Option<Vec<usize>>,

    /// Secondary table selection overriding the input's own
    pub filter_rows: Option<Vec<usize>>,

    /// Number of top hot paths to include in the report
    pub top_paths: usize,

    /// Flamegraph configuration
    pub flamegraph_config: Option<FlamegraphConfig>,

    pub renderer: Renderer,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("selection.json"),
            output_json: Some(PathBuf::from("report.json")),
            output_svg: None,
            regex: None,
            inverted: false,
            rows: None,
            filter_rows: None,
            top_paths: 20,
            flamegraph_config: None,
            renderer: Renderer::Builtin,
            print_summary: false,
        }
    }
}
