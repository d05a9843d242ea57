//! JSON report output writer.
//!
//! Writes FlameReport structs to JSON files with proper formatting.

use super::validate_path;
use crate::parser::schema::FlameReport;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
///
/// # Example
/// ```ignore
/// let report = to_report(tree, hot_paths, false, None);
/// write_report(&report, "report.json")?;
/// ```
pub fn write_report(report: &FlameReport, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_path(output_path)?;
    super::create_parent_dirs(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    // Serialize to JSON with pretty printing
    serde_json::to_writer_pretty(writer, report).map_err(OutputError::SerializationFailed)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize a report to a string
///
/// **Public** - useful for tests and piping
pub fn report_to_string(report: &FlameReport) -> Result<String, OutputError> {
    serde_json::to_string_pretty(report).map_err(OutputError::SerializationFailed)
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - used by the validate command
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<FlameReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: FlameReport =
        serde_json::from_reader(BufReader::new(file)).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, {} samples",
        report.version, report.total_samples
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::{insert_chain, TreeNode};
    use crate::parser::schema::{to_report, HotPath};
    use tempfile::NamedTempFile;

    fn create_test_report() -> FlameReport {
        let mut tree = TreeNode::new("processes");
        insert_chain(&mut tree, &["nginx", "epoll_wait"]);
        insert_chain(&mut tree, &["redis", "futex_wait"]);

        let hot_paths = vec![HotPath {
            stack: "processes;nginx;epoll_wait".to_string(),
            samples: 1,
            percentage: 50.0,
        }];
        to_report(tree, hot_paths, false, Some("wait".to_string()))
    }

    #[test]
    fn test_write_and_read_report() {
        let report = create_test_report();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_report(&report, path).unwrap();
        let loaded = read_report(path).unwrap();

        assert_eq!(loaded.version, report.version);
        assert_eq!(loaded.total_samples, 2);
        assert_eq!(loaded.tree, report.tree);
        assert_eq!(loaded.filter.as_deref(), Some("wait"));
    }

    #[test]
    fn test_report_to_string_shape() {
        let json = report_to_string(&create_test_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tree"]["name"], "processes");
        assert_eq!(value["tree"]["value"], 2);
        assert_eq!(value["tree"]["children"][0]["name"], "nginx");
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/report.json");

        write_report(&create_test_report(), &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
