//! Render command implementation.
//!
//! The render command:
//! 1. Reads the selection JSON
//! 2. Resolves row selection and filters
//! 3. Aggregates the call tree
//! 4. Calculates metrics
//! 5. Generates flamegraph
//! 6. Writes output files

use super::models::{RenderArgs, Renderer};
use crate::aggregator::{aggregate, calculate_hot_paths, calculate_sample_distribution, collect_samples, ChainFilter};
use crate::flamegraph::{generate_flamegraph, generate_inferno_flamegraph, generate_text_summary};
use crate::output::{write_report, write_svg};
use crate::parser::{load_selection, to_report, FlameReport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written, if any output succeeded
///
/// # Errors
/// * Unreadable or malformed selection file
/// * Invalid regex filter
/// * Empty selection when a flamegraph was requested
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<FlameReport> {
    let start_time = Instant::now();

    info!("Rendering off-CPU selection from: {}", args.input.display());

    // Step 1: Read selection
    info!("Step 1/5: Reading selection...");
    let input = load_selection(&args.input).context("Failed to read selection")?;

    // Step 2: Resolve selection and filters
    info!("Step 2/5: Resolving selection and filters...");
    let rows = args.rows.clone().unwrap_or_else(|| input.selected_rows());
    let filter_rows = args
        .filter_rows
        .clone()
        .unwrap_or_else(|| input.filter_selected.clone());

    let filter = ChainFilter::new()
        .with_regex(args.regex.as_deref().unwrap_or_default())
        .context("Failed to compile call-chain filter")?
        .with_head_rows(&input.filter_labels, &filter_rows);

    debug!(
        "{} of {} rows selected, {} filter rows, regex: {:?}",
        rows.len(),
        input.row_count(),
        filter_rows.len(),
        filter.pattern()
    );

    // Step 3: Aggregate
    info!("Step 3/5: Aggregating call tree...");
    let samples = collect_samples(&input, &rows, &filter);
    let tree = aggregate(&samples, args.inverted);

    let distribution = calculate_sample_distribution(&tree);
    info!("Sample distribution: {}", distribution.summary());

    // Step 4: Hot paths
    info!("Step 4/5: Calculating top {} hot paths...", args.top_paths);
    let hot_paths = calculate_hot_paths(&tree, args.top_paths);

    for (i, path) in hot_paths.iter().take(3).enumerate() {
        debug!(
            "  {}. {} samples ({:.1}%): {}",
            i + 1,
            path.samples,
            path.percentage,
            path.stack
        );
    }

    // Step 5: Outputs
    info!("Step 5/5: Writing outputs...");
    if let Some(svg_path) = &args.output_svg {
        let config = args
            .flamegraph_config
            .clone()
            .unwrap_or_default()
            .with_inverted(args.inverted);

        let svg = match args.renderer {
            Renderer::Builtin => generate_flamegraph(&tree, Some(&config)),
            Renderer::Inferno => generate_inferno_flamegraph(&tree, Some(&config)),
        }
        .context("Failed to generate flamegraph")?;

        write_svg(&svg, svg_path).context("Failed to write flamegraph SVG")?;
        info!("✓ Flamegraph written to: {}", svg_path.display());
    }

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("OFF-CPU SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Selection:     {}", args.input.display());
        println!("Samples:       {}", tree.value);
        println!("Mode:          {}", if args.inverted { "inverted" } else { "normal" });
        println!("Unique Paths:  {}", distribution.path_count);
        println!("\n{}", generate_text_summary(&tree, 10));
        println!("{}", "=".repeat(80));
    }

    let report = to_report(tree, hot_paths, args.inverted, args.regex.clone());

    if let Some(json_path) = &args.output_json {
        write_report(&report, json_path).context("Failed to write report JSON")?;
        info!("✓ Report written to: {}", json_path.display());
    }

    let elapsed = start_time.elapsed();
    info!("Render completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate render arguments
///
/// **Public** - can be called before execute_render for early validation
pub fn validate_args(args: &RenderArgs) -> Result<()> {
    if args.input.as_os_str().is_empty() {
        anyhow::bail!("Input path cannot be empty");
    }

    if args.output_json.is_none() && args.output_svg.is_none() && !args.print_summary {
        anyhow::bail!("Nothing to do: request a report, a flamegraph or a summary");
    }

    if args.top_paths == 0 {
        anyhow::bail!("top_paths must be greater than 0");
    }

    if args.top_paths > 1000 {
        anyhow::bail!("top_paths is too large (max 1000)");
    }

    if let Some(pattern) = &args.regex {
        ChainFilter::new()
            .with_regex(pattern)
            .context("Invalid --regex")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_valid() {
        assert!(validate_args(&RenderArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_input() {
        let args = RenderArgs {
            input: PathBuf::new(),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_no_outputs() {
        let args = RenderArgs {
            output_json: None,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_summary_only() {
        let args = RenderArgs {
            output_json: None,
            print_summary: true,
            ..Default::default()
        };
        assert!(validate_args(&args).is_ok());
    }

    #[test]
    fn test_validate_args_top_paths_zero() {
        let args = RenderArgs {
            top_paths: 0,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_top_paths_too_large() {
        let args = RenderArgs {
            top_paths: 2000,
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_bad_regex() {
        let args = RenderArgs {
            regex: Some("(".to_string()),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }
}
