//! Turn selected report rows into samples and samples into a call tree.
//!
//! Row handling follows the report's conventions:
//! - call chains are `<br>`-separated, leaf frame first, with a trailing
//!   empty element
//! - the thread/process label becomes the outermost frame
//! - normal mode flips chains root-first, inverted mode keeps them leaf-first

use super::tree::{collapse_single_child, insert_chain, TreeNode};
use crate::parser::SelectionInput;
use crate::utils::config::{CHAIN_DELIMITER, INVERTED_ROOT_NAME, NORMAL_ROOT_NAME, NO_CALLCHAIN};
use crate::utils::error::FilterError;
use log::{debug, warn};
use regex::Regex;

/// One selected observation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    /// Thread or process label of the row
    pub thread: String,

    /// Frames, leaf first, never empty
    pub chain: Vec<String>,
}

impl Sample {
    pub fn new(thread: impl Into<String>, chain: Vec<String>) -> Self {
        Self {
            thread: thread.into(),
            chain,
        }
    }

    /// Frames in insertion order for the given mode
    ///
    /// **Public** - used by `aggregate`
    pub fn oriented(&self, inverted: bool) -> Vec<&str> {
        let mut frames: Vec<&str> = self.chain.iter().map(String::as_str).collect();
        frames.push(self.thread.as_str());
        if !inverted {
            frames.reverse();
        }
        frames
    }
}

/// Split a raw call-chain string into trimmed, non-empty frames
///
/// **Public** - used by `collect_samples`
///
/// Empty entries are dropped wherever they occur, not only at the ends,
/// so a doubled `<br><br>` never produces an unnamed frame. A missing or
/// blank chain yields the `[NO CALLCHAIN]` placeholder.
pub fn split_chain(raw: Option<&str>) -> Vec<String> {
    let frames: Vec<String> = raw
        .unwrap_or_default()
        .split(CHAIN_DELIMITER)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();

    if frames.is_empty() {
        vec![NO_CALLCHAIN.to_string()]
    } else {
        frames
    }
}

/// Row eligibility rules
///
/// **Public** - built once per aggregation run
#[derive(Debug, Clone, Default)]
pub struct ChainFilter {
    pattern: Option<Regex>,
    /// `None` when no secondary selection restricts the chains
    heads: Option<Vec<String>>,
}

impl ChainFilter {
    /// A filter that lets every chain through
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the raw chain string to match `pattern`
    ///
    /// An empty pattern disables the regex filter.
    pub fn with_regex(mut self, pattern: &str) -> Result<Self, FilterError> {
        self.pattern = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(self)
    }

    /// Require the first frame to be one of `heads`
    ///
    /// An empty list disables the check.
    pub fn with_heads(mut self, heads: Vec<String>) -> Self {
        self.heads = if heads.is_empty() { None } else { Some(heads) };
        self
    }

    /// Resolve head labels from a secondary table selection
    ///
    /// An empty row list disables the check. Out-of-range indices are
    /// skipped, but a non-empty row list still restricts the chains even
    /// when none of its rows resolve, in which case nothing passes.
    pub fn with_head_rows(mut self, labels: &[String], rows: &[usize]) -> Self {
        if rows.is_empty() {
            self.heads = None;
            return self;
        }

        let heads = rows
            .iter()
            .filter_map(|&row| {
                let label = labels.get(row);
                if label.is_none() {
                    warn!("Ignoring filter row {} (table has {} rows)", row, labels.len());
                }
                label.cloned()
            })
            .collect();
        self.heads = Some(heads);
        self
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_ref().map(Regex::as_str)
    }

    /// Regex check against the unsplit chain string
    pub fn matches_raw(&self, raw: &str) -> bool {
        self.pattern.as_ref().map_or(true, |re| re.is_match(raw))
    }

    /// Head-label check against the split chain
    pub fn should_insert(&self, chain: &[String]) -> bool {
        let Some(heads) = &self.heads else {
            return true;
        };
        chain
            .first()
            .is_some_and(|head| heads.iter().any(|h| h == head))
    }
}

/// Gather the samples of the selected rows that pass `filter`
///
/// **Public** - first half of an aggregation run
///
/// # Arguments
/// * `input` - Report rows (parallel thread and chain arrays)
/// * `rows` - Selected row indices, in selection order
/// * `filter` - Regex and head-label rules
pub fn collect_samples(input: &SelectionInput, rows: &[usize], filter: &ChainFilter) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(rows.len());

    for &row in rows {
        let Some(thread) = input.threads.get(row) else {
            warn!("Ignoring selected row {} (report has {} rows)", row, input.threads.len());
            continue;
        };
        let raw = input.callchains.get(row).and_then(Option::as_deref);

        if !filter.matches_raw(raw.unwrap_or_default()) {
            continue;
        }

        let chain = split_chain(raw);
        if !filter.should_insert(&chain) {
            continue;
        }

        samples.push(Sample::new(thread.as_str(), chain));
    }

    debug!("Collected {} of {} selected rows", samples.len(), rows.len());
    samples
}

/// Build the call tree for `samples`
///
/// **Public** - second half of an aggregation run
///
/// The root is `samples` in inverted mode and `processes` otherwise. When
/// every sample shares one top-level frame, that frame becomes the root.
pub fn aggregate(samples: &[Sample], inverted: bool) -> TreeNode {
    let root_name = if inverted {
        INVERTED_ROOT_NAME
    } else {
        NORMAL_ROOT_NAME
    };

    let mut root = TreeNode::new(root_name);
    for sample in samples {
        insert_chain(&mut root, &sample.oriented(inverted));
    }

    debug!(
        "Aggregated {} samples into {} nodes",
        root.value,
        root.total_nodes()
    );

    collapse_single_child(root)
}

/// Run a full aggregation over a selection
///
/// **Public** - convenience wrapper over `collect_samples` + `aggregate`
pub fn build_flame_tree(
    input: &SelectionInput,
    rows: &[usize],
    filter: &ChainFilter,
    inverted: bool,
) -> TreeNode {
    let samples = collect_samples(input, rows, filter);
    aggregate(&samples, inverted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rows: &[(&str, Option<&str>)]) -> SelectionInput {
        SelectionInput {
            threads: rows.iter().map(|(t, _)| t.to_string()).collect(),
            callchains: rows.iter().map(|(_, c)| c.map(str::to_string)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_split_chain() {
        assert_eq!(
            split_chain(Some(" schedule <br>do_nanosleep<br>")),
            vec!["schedule", "do_nanosleep"]
        );
        assert_eq!(split_chain(Some("<br>")), vec![NO_CALLCHAIN]);
        assert_eq!(split_chain(None), vec![NO_CALLCHAIN]);
    }

    #[test]
    fn test_split_chain_drops_interior_empties() {
        assert_eq!(
            split_chain(Some("<br>schedule<br><br> <br>main<br>")),
            vec!["schedule", "main"]
        );
    }

    #[test]
    fn test_oriented() {
        let sample = Sample::new("nginx", vec!["leaf".into(), "caller".into()]);
        assert_eq!(sample.oriented(true), vec!["leaf", "caller", "nginx"]);
        assert_eq!(sample.oriented(false), vec!["nginx", "caller", "leaf"]);
    }

    #[test]
    fn test_regex_excludes_chain() {
        let data = input(&[("t1", Some("foo<br>bar<br>"))]);
        let filter = ChainFilter::new().with_regex("baz").unwrap();
        assert!(collect_samples(&data, &[0], &filter).is_empty());

        let filter = ChainFilter::new().with_regex("o<br>b").unwrap();
        assert_eq!(collect_samples(&data, &[0], &filter).len(), 1);
    }

    #[test]
    fn test_invalid_regex() {
        assert!(ChainFilter::new().with_regex("(unclosed").is_err());
    }

    #[test]
    fn test_head_filter() {
        let data = input(&[
            ("t1", Some("schedule<br>main<br>")),
            ("t2", Some("futex_wait<br>main<br>")),
        ]);
        let labels = vec!["futex_wait".to_string(), "schedule".to_string()];
        let filter = ChainFilter::new().with_head_rows(&labels, &[0, 7]);

        let samples = collect_samples(&data, &[0, 1], &filter);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].thread, "t2");
    }

    #[test]
    fn test_head_filter_with_only_unknown_rows_rejects_all() {
        let data = input(&[
            ("t1", Some("schedule<br>main<br>")),
            ("t2", Some("futex_wait<br>main<br>")),
        ]);
        let labels = vec!["schedule".to_string()];
        let filter = ChainFilter::new().with_head_rows(&labels, &[5]);

        assert!(collect_samples(&data, &[0, 1], &filter).is_empty());
    }

    #[test]
    fn test_head_filter_empty_rows_passes_all() {
        let data = input(&[("t1", Some("schedule<br>")), ("t2", Some("futex_wait<br>"))]);
        let labels = vec!["schedule".to_string()];
        let filter = ChainFilter::new().with_head_rows(&labels, &[]);

        assert_eq!(collect_samples(&data, &[0, 1], &filter).len(), 2);
    }

    #[test]
    fn test_out_of_range_rows_skipped() {
        let data = input(&[("t1", Some("a<br>"))]);
        let samples = collect_samples(&data, &[3, 0], &ChainFilter::new());
        assert_eq!(samples.len(), 1);
    }

    #[test]
    fn test_aggregate_normal_mode() {
        let data = input(&[
            ("proc", Some("read<br>main<br>")),
            ("proc", Some("write<br>main<br>")),
        ]);
        let tree = build_flame_tree(&data, &[0, 1], &ChainFilter::new(), false);

        // single top-level process is promoted to root
        assert_eq!(tree.name, "proc");
        assert_eq!(tree.value, 2);
        let main = tree.child("main").unwrap();
        assert_eq!(main.value, 2);
        let names: Vec<&str> = main.children.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["read", "write"]);
    }

    #[test]
    fn test_aggregate_inverted_mode() {
        let data = input(&[
            ("a", Some("schedule<br>main<br>")),
            ("b", Some("futex<br>main<br>")),
        ]);
        let tree = build_flame_tree(&data, &[0, 1], &ChainFilter::new(), true);

        assert_eq!(tree.name, INVERTED_ROOT_NAME);
        assert_eq!(tree.value, 2);
        assert_eq!(tree.find_path(&["schedule", "main", "a"]).unwrap().value, 1);
        assert_eq!(tree.find_path(&["futex", "main", "b"]).unwrap().value, 1);
    }

    #[test]
    fn test_missing_chain_uses_placeholder() {
        let data = input(&[("a", None), ("b", Some(""))]);
        let tree = build_flame_tree(&data, &[0, 1], &ChainFilter::new(), true);

        // both samples share the placeholder, so it is promoted to root
        assert_eq!(tree.name, NO_CALLCHAIN);
        assert_eq!(tree.value, 2);
    }

    #[test]
    fn test_empty_selection() {
        let data = input(&[("a", Some("x<br>"))]);
        let tree = build_flame_tree(&data, &[], &ChainFilter::new(), false);
        assert_eq!(tree.name, NORMAL_ROOT_NAME);
        assert_eq!(tree.value, 0);
    }
}
