//! `TreeNode` to XML serializer.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::fmt::Write;

use crate::tree::TreeNode;

/// Serialize `TreeNode` structures back to XML.
///
/// Attributes are written in sorted order so output is stable across runs.
pub struct XmlTreeSerializer;

impl XmlTreeSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize a node, its subtree and its tail.
    pub fn serialize(&self, node: &TreeNode) -> String {
        let mut out = String::with_capacity(256);
        serialize_node(node, &mut out);
        out
    }

    /// Serialize only the children of `node` (skip the wrapper element).
    pub fn serialize_children(&self, node: &TreeNode) -> String {
        let mut out = String::with_capacity(256);
        out.push_str(&escape_text(&node.text));
        for child in &node.children {
            serialize_node(child, &mut out);
        }
        out
    }
}

impl Default for XmlTreeSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize a single node recursively.
fn serialize_node(node: &TreeNode, out: &mut String) {
    // Opening tag
    out.push('<');
    out.push_str(&node.tag);

    // Attributes
    let mut attrs: Vec<_> = node.attrs.iter().collect();
    attrs.sort();
    for (key, value) in attrs {
        let _ = write!(out, r#" {}="{}""#, key, escape_attr(value));
    }

    if node.is_empty() {
        // Self-closing tag
        out.push_str(" />");
    } else {
        out.push('>');
        out.push_str(&escape_text(&node.text));

        for child in &node.children {
            serialize_node(child, out);
        }

        let _ = write!(out, "</{}>", node.tag);
    }

    out.push_str(&escape_text(&node.tail));
}

/// Escape text for XML content.
fn escape_text(text: &str) -> String {
    escape_xml(text, false)
}

/// Escape text for XML attribute values.
fn escape_attr(text: &str) -> String {
    escape_xml(text, true)
}

/// Escape XML special characters.
fn escape_xml(text: &str, escape_quotes: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' if escape_quotes => result.push_str("&quot;"),
            '\'' if escape_quotes => result.push_str("&apos;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::XmlTreeParser;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_serialize_simple_element() {
        let node = TreeNode::new("para").with_text("Hello");
        assert_eq!(XmlTreeSerializer::new().serialize(&node), "<para>Hello</para>");
    }

    #[test]
    fn test_serialize_with_children_and_tail() {
        let bold = TreeNode::new("bold").with_text("all").with_tail(" elements");
        let para = TreeNode::new("para").with_text("Copy ").with_children(vec![bold]);

        assert_eq!(
            XmlTreeSerializer::new().serialize(&para),
            "<para>Copy <bold>all</bold> elements</para>"
        );
    }

    #[test]
    fn test_serialize_self_closing() {
        let para = TreeNode::new("para")
            .with_text("Before")
            .with_children(vec![TreeNode::new("linebreak").with_tail("After")]);

        assert_eq!(
            XmlTreeSerializer::new().serialize(&para),
            "<para>Before<linebreak />After</para>"
        );
    }

    #[test]
    fn test_serialize_sorted_attributes() {
        let node = TreeNode::new("ref")
            .with_attr("refid", "a\"b")
            .with_attr("kindref", "member")
            .with_text("x");

        assert_eq!(
            XmlTreeSerializer::new().serialize(&node),
            r#"<ref kindref="member" refid="a&quot;b">x</ref>"#
        );
    }

    #[test]
    fn test_serialize_children_skips_wrapper() {
        let root = TreeNode::new("root")
            .with_children(vec![TreeNode::new("para").with_text("a & b")]);

        assert_eq!(
            XmlTreeSerializer::new().serialize_children(&root),
            "<para>a &amp; b</para>"
        );
    }

    #[test]
    fn test_round_trip() {
        let xml = r#"<para>If <emphasis>i</emphasis> isn't an index, <computeroutput>NULL</computeroutput> &lt; 0<linebreak />end</para>"#;
        let tree = XmlTreeParser::new().parse(xml).unwrap();
        assert_eq!(XmlTreeSerializer::new().serialize(&tree), xml);
    }
}
