//! Weighted call tree built from call chains.
//!
//! Each path from the root spells a distinct call-chain prefix and each
//! node counts the chains that pass through or end at it. Children keep
//! insertion order so the renderer lays frames out the way they arrived.

use serde::{Deserialize, Serialize};

/// A node of the flame graph domain model
///
/// **Public** - handed to every render sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Frame (or synthetic root) label
    pub name: String,

    /// Number of chains passing through or ending at this node
    pub value: u64,

    /// Callees in insertion order
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create an empty node
    ///
    /// **Public** - constructor
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: 0,
            children: Vec::new(),
        }
    }

    /// Samples ending exactly at this node
    pub fn self_value(&self) -> u64 {
        let children: u64 = self.children.iter().map(|c| c.value).sum();
        self.value.saturating_sub(children)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of levels below this node (a leaf has depth 0)
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.depth() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of nodes in this subtree, including this one
    pub fn total_nodes(&self) -> usize {
        1 + self.children.iter().map(TreeNode::total_nodes).sum::<usize>()
    }

    /// Direct child by exact name
    pub fn child(&self, name: &str) -> Option<&TreeNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Descend along `path` starting below this node
    pub fn find_path(&self, path: &[&str]) -> Option<&TreeNode> {
        path.iter().try_fold(self, |node, name| node.child(name))
    }

    /// Export the tree as folded stack lines (`a;b;c count`)
    ///
    /// **Public** - input format for inferno
    ///
    /// One line per node with a non-zero self count. `;` inside a frame
    /// name is written as `:` since the format reserves it as separator.
    pub fn folded_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut path = vec![folded_frame(&self.name)];
        collect_folded(self, &mut path, &mut lines);
        lines
    }
}

fn folded_frame(name: &str) -> String {
    name.replace(';', ":")
}

fn collect_folded(node: &TreeNode, path: &mut Vec<String>, out: &mut Vec<String>) {
    let self_value = node.self_value();
    if self_value > 0 {
        out.push(format!("{} {}", path.join(";"), self_value));
    }
    for child in &node.children {
        path.push(folded_frame(&child.name));
        collect_folded(child, path, out);
        path.pop();
    }
}

/// Insert one call chain into the tree rooted at `root`
///
/// **Public** - core of the aggregator
///
/// # Algorithm
/// 1. Count the chain at the root
/// 2. For each trimmed entry, reuse the first child with the same name or
///    append a new one
/// 3. Count the chain at every node it descends into
pub fn insert_chain<S: AsRef<str>>(root: &mut TreeNode, chain: &[S]) {
    root.value += 1;

    let mut node = root;
    for entry in chain {
        let name = entry.as_ref().trim();
        let idx = match node.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                node.children.push(TreeNode::new(name));
                node.children.len() - 1
            }
        };
        node = &mut node.children[idx];
        node.value += 1;
    }
}

/// Replace a root that has exactly one child with that child
///
/// **Public** - applied once after aggregation, not recursively
pub fn collapse_single_child(mut root: TreeNode) -> TreeNode {
    if root.children.len() == 1 {
        if let Some(only) = root.children.pop() {
            return only;
        }
    }
    root
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn node(name: &str, value: u64, children: Vec<TreeNode>) -> TreeNode {
        TreeNode {
            name: name.to_string(),
            value,
            children,
        }
    }

    #[test]
    fn test_insert_shared_prefix() {
        let mut root = TreeNode::new("root");
        insert_chain(&mut root, &["B", "A"]);
        insert_chain(&mut root, &["B", "C"]);

        assert_eq!(
            root,
            node(
                "root",
                2,
                vec![node(
                    "B",
                    2,
                    vec![node("A", 1, vec![]), node("C", 1, vec![])]
                )]
            )
        );
    }

    #[test]
    fn test_insert_trims_entries() {
        let mut root = TreeNode::new("root");
        insert_chain(&mut root, &["  main ", "read"]);
        insert_chain(&mut root, &["main", " read\t"]);

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "main");
        assert_eq!(root.children[0].children[0].value, 2);
    }

    #[test]
    fn test_insert_empty_chain_counts_root_only() {
        let mut root = TreeNode::new("root");
        insert_chain::<&str>(&mut root, &[]);
        assert_eq!(root.value, 1);
        assert!(root.is_leaf());
    }

    #[test]
    fn test_prefix_chain_ends_inside_tree() {
        let mut root = TreeNode::new("root");
        insert_chain(&mut root, &["a", "b", "c"]);
        insert_chain(&mut root, &["a", "b"]);

        let b = root.find_path(&["a", "b"]).unwrap();
        assert_eq!(b.value, 2);
        assert_eq!(b.self_value(), 1);
    }

    #[test]
    fn test_collapse_single_child() {
        let mut root = TreeNode::new("processes");
        insert_chain(&mut root, &["proc", "main"]);
        insert_chain(&mut root, &["proc", "poll"]);

        let root = collapse_single_child(root);
        assert_eq!(root.name, "proc");
        assert_eq!(root.value, 2);
    }

    #[test]
    fn test_collapse_is_not_recursive() {
        let mut root = TreeNode::new("processes");
        insert_chain(&mut root, &["proc", "main", "a"]);

        let root = collapse_single_child(root);
        assert_eq!(root.name, "proc");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].name, "main");
    }

    #[test]
    fn test_collapse_keeps_multi_child_root() {
        let mut root = TreeNode::new("processes");
        insert_chain(&mut root, &["a"]);
        insert_chain(&mut root, &["b"]);

        assert_eq!(collapse_single_child(root).name, "processes");
    }

    #[test]
    fn test_folded_lines() {
        let mut root = TreeNode::new("root");
        insert_chain(&mut root, &["main", "read"]);
        insert_chain(&mut root, &["main", "read"]);
        insert_chain(&mut root, &["main"]);

        assert_eq!(
            root.folded_lines(),
            vec!["root;main 1".to_string(), "root;main;read 2".to_string()]
        );
    }

    #[test]
    fn test_folded_lines_escape_separator() {
        let mut root = TreeNode::new("root");
        insert_chain(&mut root, &["ns;fn", "leaf"]);

        assert_eq!(root.folded_lines(), vec!["root;ns:fn;leaf 1".to_string()]);
        assert_eq!(root.children[0].name, "ns;fn");
    }

    #[test]
    fn test_depth_and_size() {
        let mut root = TreeNode::new("root");
        insert_chain(&mut root, &["a", "b", "c"]);
        insert_chain(&mut root, &["x"]);

        assert_eq!(root.depth(), 3);
        assert_eq!(root.total_nodes(), 5);
    }
}
