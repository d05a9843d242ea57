//! Offcpu Flame CLI
//!
//! Aggregates off-CPU call chains into a call tree and renders it
//! as a flamegraph, a JSON report, or a terminal summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use offcpu_flame::commands::{
    display_hashes, display_version, execute_render, validate_args, validate_report_file,
    RenderArgs, Renderer,
};
use offcpu_flame::flamegraph::FlamegraphConfig;

/// Offcpu Flame - flamegraphs for off-CPU profiles
#[derive(Parser, Debug)]
#[command(name = "offcpu-flame")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Aggregate a selection and render it
    Render {
        /// Selection JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for SVG flamegraph
        #[arg(short, long)]
        flamegraph: Option<PathBuf>,

        /// Only aggregate chains matching this regex
        #[arg(short, long)]
        regex: Option<String>,

        /// Root chains at the leaf frame
        #[arg(long)]
        inverted: bool,

        /// Selected rows (defaults to the selection in the input)
        #[arg(long, value_delimiter = ',')]
        rows: Option<Vec<usize>>,

        /// Selected rows of the secondary label table
        #[arg(long, value_delimiter = ',')]
        filter_rows: Option<Vec<usize>>,

        /// Highlight frames containing this text
        #[arg(long)]
        highlight: Option<String>,

        /// Number of top hot paths to include
        #[arg(long, default_value = "20")]
        top_paths: usize,

        /// Flamegraph title
        #[arg(long)]
        title: Option<String>,

        /// Flamegraph width in pixels
        #[arg(long, default_value = "1200")]
        width: usize,

        /// SVG renderer
        #[arg(long, value_enum, default_value_t = Renderer::Builtin)]
        renderer: Renderer,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Show the hash and color of frame names
    Hash {
        /// Frame names
        #[arg(required = true)]
        names: Vec<String>,

        /// Show the highlight color instead
        #[arg(long)]
        highlighted: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Render {
            input,
            output,
            flamegraph,
            regex,
            inverted,
            rows,
            filter_rows,
            highlight,
            top_paths,
            title,
            width,
            renderer,
            summary,
        } => {
            let fg_config = if flamegraph.is_some() {
                let mut config = FlamegraphConfig::new().with_highlight(highlight);

                if let Some(title_str) = title {
                    config = config.with_title(title_str);
                }

                config.width = width;

                Some(config)
            } else {
                None
            };

            let args = RenderArgs {
                input,
                output_json: output,
                output_svg: flamegraph,
                regex,
                inverted,
                rows,
                filter_rows,
                top_paths,
                flamegraph_config: fg_config,
                renderer,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_render(args)?;
        }

        Commands::Hash { names, highlighted } => {
            display_hashes(&names, highlighted);
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
