//! Selection source parsing.
//!
//! A selection file carries the report rows as parallel arrays plus an
//! optional secondary table whose selected labels restrict which chains are
//! aggregated.
//!
//! ```json
//! {
//!   "threads": ["nginx-1", "nginx-2"],
//!   "callchains": ["schedule<br>do_nanosleep<br>", null],
//!   "selected": [0, 1],
//!   "filter_labels": ["schedule", "futex_wait"],
//!   "filter_selected": [0]
//! }
//! ```

use crate::utils::error::ParseError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Rows of an off-CPU report and the current selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionInput {
    /// Thread/process label per row
    pub threads: Vec<String>,

    /// `<br>`-separated call chain per row, leaf frame first
    #[serde(alias = "callchain")]
    pub callchains: Vec<Option<String>>,

    /// Selected row indices (absent means every row)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected: Option<Vec<usize>>,

    /// Labels of the secondary table
    #[serde(default)]
    pub filter_labels: Vec<String>,

    /// Selected rows of the secondary table
    #[serde(default)]
    pub filter_selected: Vec<usize>,
}

impl SelectionInput {
    pub fn row_count(&self) -> usize {
        self.threads.len()
    }

    /// Rows to aggregate when no explicit selection is given
    ///
    /// **Public** - resolves an absent selection to every row
    pub fn selected_rows(&self) -> Vec<usize> {
        match &self.selected {
            Some(rows) => rows.clone(),
            None => (0..self.row_count()).collect(),
        }
    }
}

/// Parse a selection from a JSON string
///
/// **Public** - main entry point for in-memory input
///
/// # Errors
/// * `ParseError::JsonError` - malformed JSON
/// * `ParseError::InvalidFormat` - thread and chain arrays differ in length
pub fn parse_selection(raw: &str) -> Result<SelectionInput, ParseError> {
    let input: SelectionInput = serde_json::from_str(raw)?;
    validate_selection(&input)?;

    debug!(
        "Parsed selection: {} rows, {} filter labels",
        input.row_count(),
        input.filter_labels.len()
    );

    Ok(input)
}

/// Load a selection from a JSON file
///
/// **Public** - used by the render command
pub fn load_selection(path: impl AsRef<Path>) -> Result<SelectionInput, ParseError> {
    let path = path.as_ref();
    info!("Reading selection from: {}", path.display());

    let file = File::open(path)?;
    let input: SelectionInput = serde_json::from_reader(BufReader::new(file))?;
    validate_selection(&input)?;

    Ok(input)
}

/// Check that the parallel arrays line up
///
/// **Private** - internal validation
fn validate_selection(input: &SelectionInput) -> Result<(), ParseError> {
    if input.threads.len() != input.callchains.len() {
        return Err(ParseError::InvalidFormat(format!(
            "{} thread labels but {} call chains",
            input.threads.len(),
            input.callchains.len()
        )));
    }
    Ok(())
}
