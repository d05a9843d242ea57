//! Interactive view state over one report.
//!
//! A host UI forwards its events (row selection, secondary table selection,
//! regex edits, the inversion toggle) as `SessionEvent`s. Every event
//! rebuilds the tree from scratch; nothing is carried over between runs.

use crate::aggregator::{build_flame_tree, ChainFilter, TreeNode};
use crate::parser::SelectionInput;
use crate::utils::error::FilterError;
use log::debug;

/// A change coming from the host UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Rows selected in the main table
    SelectRows(Vec<usize>),

    /// Rows selected in the secondary (head label) table
    SelectFilterRows(Vec<usize>),

    /// New regex filter text (`None` or empty clears it)
    SetFilter(Option<String>),

    /// Inversion checkbox toggled
    SetInverted(bool),
}

/// Current selection state and the tree it produces
#[derive(Debug, Clone)]
pub struct FlameSession {
    input: SelectionInput,
    rows: Vec<usize>,
    filter_rows: Vec<usize>,
    pattern: Option<String>,
    inverted: bool,
    tree: TreeNode,
}

impl FlameSession {
    /// Start a session with the input's own selection
    ///
    /// **Public** - constructor
    pub fn new(input: SelectionInput, inverted: bool) -> Self {
        let rows = input.selected_rows();
        let filter_rows = input.filter_selected.clone();
        let tree = build_flame_tree(
            &input,
            &rows,
            &ChainFilter::new().with_head_rows(&input.filter_labels, &filter_rows),
            inverted,
        );

        Self {
            input,
            rows,
            filter_rows,
            pattern: None,
            inverted,
            tree,
        }
    }

    pub fn tree(&self) -> &TreeNode {
        &self.tree
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Apply one UI event and rebuild the tree
    ///
    /// **Public** - the single update entry point
    ///
    /// # Errors
    /// * `FilterError::InvalidRegex` - the new filter does not compile; the
    ///   session keeps its previous state
    pub fn apply(&mut self, event: SessionEvent) -> Result<&TreeNode, FilterError> {
        debug!("Session event: {:?}", event);

        let mut rows = self.rows.clone();
        let mut filter_rows = self.filter_rows.clone();
        let mut pattern = self.pattern.clone();
        let mut inverted = self.inverted;

        match event {
            SessionEvent::SelectRows(r) => rows = r,
            SessionEvent::SelectFilterRows(r) => filter_rows = r,
            SessionEvent::SetFilter(p) => pattern = p.filter(|p| !p.is_empty()),
            SessionEvent::SetInverted(i) => inverted = i,
        }

        let filter = ChainFilter::new()
            .with_regex(pattern.as_deref().unwrap_or_default())?
            .with_head_rows(&self.input.filter_labels, &filter_rows);

        self.tree = build_flame_tree(&self.input, &rows, &filter, inverted);
        self.rows = rows;
        self.filter_rows = filter_rows;
        self.pattern = pattern;
        self.inverted = inverted;

        Ok(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> SelectionInput {
        SelectionInput {
            threads: vec!["a".into(), "b".into(), "c".into()],
            callchains: vec![
                Some("schedule<br>main<br>".into()),
                Some("futex_wait<br>main<br>".into()),
                Some("schedule<br>worker<br>".into()),
            ],
            filter_labels: vec!["schedule".into(), "futex_wait".into()],
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_tree_uses_all_rows() {
        let session = FlameSession::new(report(), false);
        assert_eq!(session.tree().value, 3);
        assert_eq!(session.rows(), &[0, 1, 2]);
    }

    #[test]
    fn test_select_rows() {
        let mut session = FlameSession::new(report(), false);
        let tree = session.apply(SessionEvent::SelectRows(vec![1])).unwrap();
        // one thread left, promoted to root
        assert_eq!(tree.name, "b");
        assert_eq!(tree.value, 1);
    }

    #[test]
    fn test_filter_rows() {
        let mut session = FlameSession::new(report(), true);
        let tree = session
            .apply(SessionEvent::SelectFilterRows(vec![0]))
            .unwrap();
        assert_eq!(tree.name, "schedule");
        assert_eq!(tree.value, 2);
    }

    #[test]
    fn test_regex_then_clear() {
        let mut session = FlameSession::new(report(), false);
        assert_eq!(
            session
                .apply(SessionEvent::SetFilter(Some("worker".into())))
                .unwrap()
                .value,
            1
        );
        assert_eq!(
            session.apply(SessionEvent::SetFilter(None)).unwrap().value,
            3
        );
        assert_eq!(session.pattern(), None);
    }

    #[test]
    fn test_invalid_regex_keeps_state() {
        let mut session = FlameSession::new(report(), false);
        session.apply(SessionEvent::SelectRows(vec![0, 1])).unwrap();

        assert!(session
            .apply(SessionEvent::SetFilter(Some("[".into())))
            .is_err());
        assert_eq!(session.tree().value, 2);
        assert_eq!(session.pattern(), None);
    }

    #[test]
    fn test_toggle_inverted() {
        let mut session = FlameSession::new(report(), false);
        assert_eq!(session.tree().name, "processes");

        session.apply(SessionEvent::SetInverted(true)).unwrap();
        assert!(session.inverted());
        assert_eq!(session.tree().name, "samples");
    }
}
