use crate::output::read_report;
use crate::palette::{frame_color, name_hash, normalize_frame_name, FrameLabel};
use crate::utils::config::SCHEMA_VERSION;
use anyhow::Result;
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)?;

    if report.tree.value != report.total_samples {
        anyhow::bail!(
            "Root value {} does not match total_samples {}",
            report.tree.value,
            report.total_samples
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Mode: {}", if report.inverted { "inverted" } else { "normal" });
    println!("  Samples: {}", report.total_samples);
    println!("  Root: {}", report.tree.name);
    println!("  Nodes: {}", report.tree.total_nodes());
    println!("  Hot Paths: {}", report.hot_paths.len());

    Ok(())
}

/// Print the hash vector and color of each frame name
pub fn display_hashes(names: &[String], highlighted: bool) {
    for name in names {
        let normalized = normalize_frame_name(name);
        let color = frame_color(&FrameLabel::new(name).highlighted(highlighted));
        println!(
            "{}{:<32}\x1b[0m  hash={:.6}  {}  {}",
            color.ansi_fg(),
            name,
            name_hash(Some(normalized)),
            color.to_hex(),
            color
        );
    }
}

/// Display version information
pub fn display_version() {
    println!("Offcpu Flame v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Call-tree aggregation and flamegraph rendering for off-CPU profiles.");
}
