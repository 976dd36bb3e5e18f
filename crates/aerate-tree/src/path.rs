//! Positions in a tree expressed as child-index chains.

use std::fmt;

/// Position of a node: the child index taken at each level, starting at the root.
///
/// The empty path addresses the root. A path never borrows the tree, so it stays
/// valid across edits; operations that shift siblings return the updated path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    /// Path of the root node.
    #[must_use]
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Child indices from the root.
    #[must_use]
    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// Number of edges between the root and this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// True for the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Index of this node within its parent.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.0.last().copied()
    }

    /// Path of the parent node.
    #[must_use]
    pub fn parent(&self) -> Option<NodePath> {
        self.0
            .split_last()
            .map(|(_, parent)| NodePath(parent.to_vec()))
    }

    /// Path of the child at `index`.
    #[must_use]
    pub fn child(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        indices.push(index);
        NodePath(indices)
    }

    /// Path of the sibling at `index` under the same parent.
    ///
    /// The root has no siblings and is returned unchanged.
    #[must_use]
    pub fn sibling(&self, index: usize) -> NodePath {
        let mut indices = self.0.clone();
        if let Some(last) = indices.last_mut() {
            *last = index;
        }
        NodePath(indices)
    }

    /// True when `self` is a strict ancestor of `other`.
    #[must_use]
    pub fn is_ancestor_of(&self, other: &NodePath) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("/")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        let root = NodePath::root();
        assert!(root.is_root());
        assert_eq!(root.depth(), 0);
        assert_eq!(root.parent(), None);
        assert_eq!(root.index(), None);
    }

    #[test]
    fn test_child_and_parent() {
        let path = NodePath::root().child(2).child(0);
        assert_eq!(path.indices(), &[2, 0]);
        assert_eq!(path.depth(), 2);
        assert_eq!(path.index(), Some(0));
        assert_eq!(path.parent(), Some(NodePath::from(vec![2])));
    }

    #[test]
    fn test_sibling() {
        let path = NodePath::from(vec![1, 3]);
        assert_eq!(path.sibling(4), NodePath::from(vec![1, 4]));
        assert_eq!(NodePath::root().sibling(4), NodePath::root());
    }

    #[test]
    fn test_is_ancestor_of() {
        let para = NodePath::from(vec![0, 1]);
        assert!(NodePath::root().is_ancestor_of(&para));
        assert!(NodePath::from(vec![0]).is_ancestor_of(&para));
        assert!(!para.is_ancestor_of(&para));
        assert!(!NodePath::from(vec![1]).is_ancestor_of(&para));
    }

    #[test]
    fn test_display() {
        assert_eq!(NodePath::root().to_string(), "/");
        assert_eq!(NodePath::from(vec![0, 2, 1]).to_string(), "/0/2/1");
    }
}
