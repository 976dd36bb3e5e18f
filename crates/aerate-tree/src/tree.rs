//! Element tree with the text/tail content model.
//!
//! A node owns the text that appears before its first child (`text`) and the
//! text that follows its closing tag up to the next sibling (`tail`). The tail
//! belongs to the parent's content stream, not to the node itself:
//!
//! ```text
//! <para>intro <bold>strong</bold> rest</para>
//!       ^^^^^ para.text   ^^^^^ bold.tail
//! ```
//!
//! An empty string stands for absent text or tail.

use std::collections::HashMap;

use crate::path::NodePath;

/// Node in a documentation markup tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeNode {
    /// Element tag name (may include a namespace prefix).
    pub tag: String,
    /// Text before the first child.
    pub text: String,
    /// Text after the element, owned by the parent's content stream.
    pub tail: String,
    /// Element attributes.
    pub attrs: HashMap<String, String>,
    /// Child nodes in document order.
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a new tree node with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Set text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set tail content.
    #[must_use]
    pub fn with_tail(mut self, tail: impl Into<String>) -> Self {
        self.tail = tail.into();
        self
    }

    /// Set attributes.
    #[must_use]
    pub fn with_attrs(mut self, attrs: HashMap<String, String>) -> Self {
        self.attrs = attrs;
        self
    }

    /// Add a single attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    /// Set children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    /// Build an empty node with the same tag and attributes.
    ///
    /// Text, tail and children are not copied. Used when an edit splits a node
    /// in two and the second half needs a parent of the same kind.
    #[must_use]
    pub fn duplicate(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            ..Default::default()
        }
    }

    /// True when the node has neither text nor children.
    ///
    /// The tail is not part of the node's own content and is ignored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty() && self.children.is_empty()
    }

    /// True when the node has no element children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// First direct child with the given tag.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&TreeNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children with the given tag.
    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a TreeNode> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// All descendants (excluding `self`) in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&TreeNode> {
        let mut nodes = Vec::new();
        collect_descendants(self, &mut nodes);
        nodes
    }

    /// Concatenated text of this node and all descendants, without the node's
    /// own tail.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        push_content(self, &mut out);
        out
    }

    /// Concatenated text and tails of the whole subtree in document order,
    /// including the node's own tail.
    #[must_use]
    pub fn document_text(&self) -> String {
        let mut out = self.text_content();
        out.push_str(&self.tail);
        out
    }

    /// Look up a node by path.
    #[must_use]
    pub fn get(&self, path: &NodePath) -> Option<&TreeNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get(i))
    }

    /// Look up a node by path for mutation.
    #[must_use]
    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut TreeNode> {
        path.indices()
            .iter()
            .try_fold(self, |node, &i| node.children.get_mut(i))
    }
}

fn collect_descendants<'a>(node: &'a TreeNode, nodes: &mut Vec<&'a TreeNode>) {
    for child in &node.children {
        nodes.push(child);
        collect_descendants(child, nodes);
    }
}

fn push_content(node: &TreeNode, out: &mut String) {
    out.push_str(&node.text);
    for child in &node.children {
        push_content(child, out);
        out.push_str(&child.tail);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> TreeNode {
        TreeNode::new("para").with_text("Copy ").with_children(vec![
            TreeNode::new("bold")
                .with_text("all ")
                .with_children(vec![TreeNode::new("emphasis").with_text("the")])
                .with_tail(" elements"),
            TreeNode::new("computeroutput")
                .with_text("NULL")
                .with_tail("."),
        ])
    }

    #[test]
    fn test_text_content_interleaves_tails() {
        assert_eq!(sample().text_content(), "Copy all the elements NULL.");
    }

    #[test]
    fn test_document_text_includes_own_tail() {
        let node = TreeNode::new("bold").with_text("a").with_tail(" b");
        assert_eq!(node.text_content(), "a");
        assert_eq!(node.document_text(), "a b");
    }

    #[test]
    fn test_duplicate_copies_tag_and_attrs_only() {
        let node = TreeNode::new("simplesect")
            .with_attr("kind", "note")
            .with_text("text")
            .with_tail("tail")
            .with_children(vec![TreeNode::new("para")]);

        let copy = node.duplicate();

        assert_eq!(copy.tag, "simplesect");
        assert_eq!(copy.attr("kind"), Some("note"));
        assert!(copy.is_empty());
        assert!(copy.tail.is_empty());
    }

    #[test]
    fn test_is_empty_ignores_tail() {
        assert!(TreeNode::new("bold").with_tail("after").is_empty());
        assert!(!TreeNode::new("bold").with_text("x").is_empty());
    }

    #[test]
    fn test_get_by_path() {
        let tree = sample();
        let path = NodePath::from(vec![0, 0]);
        assert_eq!(tree.get(&path).map(|n| n.tag.as_str()), Some("emphasis"));
        assert!(tree.get(&NodePath::from(vec![5])).is_none());
        assert_eq!(tree.get(&NodePath::root()).map(|n| n.tag.as_str()), Some("para"));
    }

    #[test]
    fn test_get_mut_by_path() {
        let mut tree = sample();
        tree.get_mut(&NodePath::from(vec![1])).unwrap().text = "nullptr".to_owned();
        assert_eq!(tree.text_content(), "Copy all the elements nullptr.");
    }

    #[test]
    fn test_descendants_in_document_order() {
        let tree = sample();
        let tags: Vec<_> = tree.descendants().iter().map(|n| n.tag.as_str()).collect();
        assert_eq!(tags, vec!["bold", "emphasis", "computeroutput"]);
    }

    #[test]
    fn test_children_named() {
        let tree = TreeNode::new("detaileddescription").with_children(vec![
            TreeNode::new("para").with_text("a"),
            TreeNode::new("title"),
            TreeNode::new("para").with_text("b"),
        ]);
        let texts: Vec<_> = tree.children_named("para").map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
        assert_eq!(tree.child("title").map(|t| t.tag.as_str()), Some("title"));
    }
}
