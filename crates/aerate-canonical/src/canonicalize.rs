//! Paragraph canonicalization.
//!
//! Rewrites a description tree so that every paragraph holds either only inline
//! decorations or only structural blocks, and every inline decoration is a
//! leaf. Nested decorations become siblings in reading order; paragraphs that
//! mix the two kinds are split in place.

use aerate_tree::{NodePath, TreeNode};

use crate::cursor::Cursor;
use crate::error::CanonicalizeError;
use crate::markup::{Markup, PARAGRAPH};

/// Counts of the edits one canonicalization run performed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CanonicalizeStats {
    pub lifted: usize,
    pub divided: usize,
    pub removed: usize,
    pub merged: usize,
}

impl CanonicalizeStats {
    /// True when the tree was already canonical.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        *self == Self::default()
    }
}

/// Kind of content a paragraph is committed to, decided by its first content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParaKind {
    /// Text and inline decorations.
    Simple,
    /// Structural blocks only.
    Block,
}

/// What inline canonicalization did to the node it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InlineOutcome {
    /// Node was empty and is gone; its index now holds the next sibling.
    Removed,
    /// Node was merged into its previous sibling; its index now holds the next sibling.
    Merged,
    /// Node is a leaf and stays where it is.
    Kept,
}

/// Canonicalize every paragraph in the tree rooted at `root`.
///
/// Paragraphs are looked for below the root; the root itself is never treated
/// as one. Paragraphs nested in structural blocks (list items, sections,
/// parameter descriptions) are canonicalized when traversal reaches them.
///
/// # Errors
///
/// Returns [`CanonicalizeError::UnsupportedMarkup`] for a paragraph child
/// outside both vocabularies, or for a non-inline node nested in an inline
/// decoration. The tree may be partially rewritten when an error is returned.
pub fn canonicalize(root: &mut TreeNode) -> Result<CanonicalizeStats, CanonicalizeError> {
    let mut stats = CanonicalizeStats::default();
    let mut cursor = Cursor::new(root);

    let mut at = cursor.advance(&NodePath::root());
    while let Some(position) = at {
        at = if cursor.node(&position)?.tag == PARAGRAPH {
            canonicalize_para(&mut cursor, &position, &mut stats)?
        } else {
            cursor.advance(&position)
        };
    }

    tracing::debug!(
        lifted = stats.lifted,
        divided = stats.divided,
        removed = stats.removed,
        merged = stats.merged,
        "Canonicalized tree"
    );
    Ok(stats)
}

/// Which children of the paragraph being scanned were split apart by a lift.
///
/// Mirrors the paragraph's child list and is kept in step with every edit, so
/// only pieces of one flattened decoration are ever merged back together.
/// Neighbors that were already adjacent in the input stay as they are.
struct Fragments(Vec<bool>);

impl Fragments {
    fn new(len: usize) -> Self {
        Self(vec![false; len])
    }

    /// The child at `index` was lifted out of, gaining the lifted node and,
    /// when `continued`, the rest of the decoration as following siblings.
    fn lifted(&mut self, index: usize, continued: bool) {
        if let Some(parent) = self.0.get_mut(index) {
            *parent = true;
        }
        let added = if continued { 2 } else { 1 };
        for offset in 1..=added {
            self.0.insert((index + offset).min(self.0.len()), true);
        }
    }

    fn removed(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    /// Both the child at `index` and its previous sibling are fragments.
    fn pair(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .is_some_and(|previous| self.is(previous) && self.is(index))
    }

    fn is(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }
}

/// Canonicalize the paragraph at `at` and return where traversal continues.
fn canonicalize_para(
    cursor: &mut Cursor<'_>,
    at: &NodePath,
    stats: &mut CanonicalizeStats,
) -> Result<Option<NodePath>, CanonicalizeError> {
    let para = cursor.node(at)?;
    if para.is_empty() {
        stats.removed += 1;
        return Ok(cursor.remove(at)?);
    }
    let kind = classify_para(para)?;
    let mut fragments = Fragments::new(para.children.len());

    let mut index = 0;
    loop {
        let para = cursor.node(at)?;
        let Some(child) = para.children.get(index) else {
            break;
        };
        let markup = Markup::classify(&child.tag).ok_or_else(|| unsupported(child, para))?;
        let tail_has_text = has_text(&child.tail);
        let child_path = at.child(index);

        match (kind, markup) {
            (ParaKind::Simple, Markup::Inline(_)) => {
                match canonicalize_inline(cursor, &child_path, &mut fragments, stats)? {
                    InlineOutcome::Removed | InlineOutcome::Merged => {}
                    InlineOutcome::Kept => index += 1,
                }
            }
            (ParaKind::Block, Markup::Structural(_)) if tail_has_text => {
                cursor.divide_tail(&child_path)?;
                stats.divided += 1;
                break;
            }
            (ParaKind::Block, Markup::Structural(_)) => index += 1,
            (ParaKind::Simple, Markup::Structural(_)) | (ParaKind::Block, Markup::Inline(_)) => {
                cursor.divide(&child_path)?;
                stats.divided += 1;
                break;
            }
        }
    }

    Ok(cursor.advance(at))
}

/// Decide what a paragraph holds from its leading content.
///
/// Any leading text, whitespace included, makes the paragraph simple.
fn classify_para(para: &TreeNode) -> Result<ParaKind, CanonicalizeError> {
    if !para.text.is_empty() {
        return Ok(ParaKind::Simple);
    }
    let Some(first) = para.children.first() else {
        return Ok(ParaKind::Simple);
    };
    match Markup::classify(&first.tag) {
        Some(Markup::Inline(_)) => Ok(ParaKind::Simple),
        Some(Markup::Structural(_)) => Ok(ParaKind::Block),
        None => Err(unsupported(first, para)),
    }
}

/// Reduce the inline node at `at` to a leaf, lifting nested decorations out.
fn canonicalize_inline(
    cursor: &mut Cursor<'_>,
    at: &NodePath,
    fragments: &mut Fragments,
    stats: &mut CanonicalizeStats,
) -> Result<InlineOutcome, CanonicalizeError> {
    let index = at.index().unwrap_or_default();
    loop {
        let node = cursor.node(at)?;
        if node.is_empty() {
            cursor.remove(at)?;
            fragments.removed(index);
            stats.removed += 1;
            return Ok(InlineOutcome::Removed);
        }

        let Some(first) = node.children.first() else {
            break;
        };
        if !matches!(Markup::classify(&first.tag), Some(Markup::Inline(_))) {
            return Err(unsupported(first, node));
        }
        let lifted = cursor.lift(&at.child(0))?;
        fragments.lifted(index, lifted.continuation.is_some());
        stats.lifted += 1;
    }

    if fragments.pair(index) && mergeable_with_previous(cursor, at)? {
        cursor.merge(at)?;
        fragments.removed(index);
        stats.merged += 1;
        return Ok(InlineOutcome::Merged);
    }
    Ok(InlineOutcome::Kept)
}

/// True when the leaf at `at` directly continues an identical decoration leaf.
fn mergeable_with_previous(cursor: &Cursor<'_>, at: &NodePath) -> Result<bool, CanonicalizeError> {
    let Some(previous_index) = at.index().and_then(|index| index.checked_sub(1)) else {
        return Ok(false);
    };
    let node = cursor.node(at)?;
    let previous = cursor.node(&at.sibling(previous_index))?;
    Ok(previous.is_leaf()
        && previous.tail.is_empty()
        && previous.tag == node.tag
        && previous.attrs == node.attrs)
}

fn has_text(text: &str) -> bool {
    !text.trim().is_empty()
}

fn unsupported(node: &TreeNode, parent: &TreeNode) -> CanonicalizeError {
    CanonicalizeError::UnsupportedMarkup {
        tag: node.tag.clone(),
        parent: parent.tag.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerate_tree::{XmlTreeParser, XmlTreeSerializer};
    use pretty_assertions::assert_eq;

    fn parse(xml: &str) -> TreeNode {
        XmlTreeParser::new().parse(xml).unwrap()
    }

    /// Wrap paragraphs in an entity tree: root, detailed description, body.
    fn entity(body: &str) -> TreeNode {
        parse(&format!(
            "<root><detaileddescription>{body}</detaileddescription></root>"
        ))
    }

    fn body(tree: &TreeNode) -> String {
        XmlTreeSerializer::new().serialize_children(&tree.children[0])
    }

    /// Check the structural post-conditions on every paragraph in the tree.
    fn assert_canonical(tree: &TreeNode) {
        for para in tree.descendants().into_iter().filter(|n| n.tag == PARAGRAPH) {
            let kinds: Vec<bool> = para
                .children
                .iter()
                .map(|child| Markup::classify(&child.tag).unwrap().is_inline())
                .collect();
            assert!(
                kinds.iter().all(|&k| k) || kinds.iter().all(|&k| !k),
                "mixed paragraph: {}",
                XmlTreeSerializer::new().serialize(para)
            );
            for child in &para.children {
                if Markup::classify(&child.tag).unwrap().is_inline() {
                    assert!(child.is_leaf(), "inline <{}> is not a leaf", child.tag);
                }
            }
        }
    }

    #[test]
    fn test_split_text_and_list() {
        let mut tree = entity(
            "<para>Intro<itemizedlist><listitem><para>a</para></listitem></itemizedlist></para>",
        );
        let before = tree.document_text();

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para>Intro</para><para><itemizedlist><listitem><para>a</para></listitem></itemizedlist></para>"
        );
        assert_eq!(stats.divided, 1);
        assert_eq!(tree.document_text(), before);
        assert_canonical(&tree);
    }

    #[test]
    fn test_nested_decorations_flatten() {
        let mut tree = entity("<para>x <bold>a<emphasis>b</emphasis>c</bold> y</para>");
        let before = tree.document_text();

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para>x <bold>a</bold><emphasis>b</emphasis><bold>c</bold> y</para>"
        );
        assert_eq!(stats.lifted, 1);
        assert_eq!(tree.document_text(), before);
        assert_canonical(&tree);
    }

    #[test]
    fn test_deep_nesting_flattens_in_reading_order() {
        let mut tree = entity(
            "<para><bold><emphasis><computeroutput>a</computeroutput>b</emphasis>c</bold></para>",
        );
        let before = tree.document_text();

        canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para><computeroutput>a</computeroutput><emphasis>b</emphasis><bold>c</bold></para>"
        );
        assert_eq!(tree.document_text(), before);
        assert_canonical(&tree);
    }

    #[test]
    fn test_block_paragraph_followed_by_inline() {
        let mut tree = entity("<para><programlisting/><bold>x</bold> tail</para>");

        canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para><programlisting /></para><para><bold>x</bold> tail</para>"
        );
        assert_canonical(&tree);
    }

    #[test]
    fn test_structural_tail_text_starts_new_paragraph() {
        let mut tree = entity(
            "<para><simplesect kind=\"return\"><para>r</para></simplesect>Trailing words</para>",
        );
        let before = tree.document_text();

        canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para><simplesect kind=\"return\"><para>r</para></simplesect></para><para>Trailing words</para>"
        );
        assert_eq!(tree.document_text(), before);
    }

    #[test]
    fn test_whitespace_between_blocks_stays() {
        let xml = "<para><itemizedlist><listitem><para>a</para></listitem></itemizedlist>\n<orderedlist><listitem><para>b</para></listitem></orderedlist>\n</para>";
        let mut tree = entity(xml);

        let stats = canonicalize(&mut tree).unwrap();

        assert!(stats.is_unchanged());
        assert_eq!(body(&tree), xml);
    }

    #[test]
    fn test_leading_whitespace_makes_paragraph_simple() {
        let mut tree = entity(
            "<para>\n<itemizedlist><listitem><para>a</para></listitem></itemizedlist>\n<orderedlist><listitem><para>b</para></listitem></orderedlist>\n</para>",
        );
        let before = tree.document_text();

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para>\n</para><para><itemizedlist><listitem><para>a</para></listitem></itemizedlist>\n<orderedlist><listitem><para>b</para></listitem></orderedlist>\n</para>"
        );
        assert_eq!(stats.divided, 1);
        assert_eq!(tree.document_text(), before);
        assert_canonical(&tree);
    }

    #[test]
    fn test_single_space_before_block_is_split_off() {
        let mut tree = entity("<para> <itemizedlist/></para>");

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(body(&tree), "<para> </para><para><itemizedlist /></para>");
        assert_eq!(stats.divided, 1);
    }

    #[test]
    fn test_empty_nodes_removed() {
        let mut tree = entity("<para></para><para>a<bold></bold> b</para>");

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(body(&tree), "<para>a b</para>");
        assert_eq!(stats.removed, 2);
    }

    #[test]
    fn test_lifted_fragments_separated_by_other_markup_stay() {
        let mut tree = entity("<para><bold>a<emphasis>b</emphasis></bold><bold>c</bold></para>");
        let before = tree.document_text();

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para><bold>a</bold><emphasis>b</emphasis><bold>c</bold></para>"
        );
        assert_eq!(stats.merged, 0);
        assert_eq!(tree.document_text(), before);
    }

    #[test]
    fn test_adjacent_source_decorations_stay() {
        let xml = "<para><bold>a</bold><bold>b</bold> <bold>c</bold></para>";
        let mut tree = entity(xml);

        let stats = canonicalize(&mut tree).unwrap();

        assert!(stats.is_unchanged());
        assert_eq!(body(&tree), xml);
    }

    #[test]
    fn test_lifted_fragments_rejoin() {
        let mut tree = entity("<para><bold><bold>x</bold>y</bold></para>");
        let before = tree.document_text();

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(body(&tree), "<para><bold>xy</bold></para>");
        assert_eq!(
            stats,
            CanonicalizeStats {
                lifted: 1,
                divided: 0,
                removed: 1,
                merged: 1,
            }
        );
        assert_eq!(tree.document_text(), before);
        assert!(canonicalize(&mut tree).unwrap().is_unchanged());
    }

    #[test]
    fn test_fragment_not_merged_into_source_neighbor() {
        let mut tree = entity("<para><bold>a</bold><bold>b<emphasis>c</emphasis></bold></para>");

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(
            body(&tree),
            "<para><bold>a</bold><bold>b</bold><emphasis>c</emphasis></para>"
        );
        assert_eq!(stats.merged, 0);
    }

    #[test]
    fn test_different_attributes_do_not_merge() {
        let xml = r#"<para><ref refid="a">x</ref><ref refid="b">y</ref></para>"#;
        let mut tree = entity(xml);

        let stats = canonicalize(&mut tree).unwrap();

        assert!(stats.is_unchanged());
        assert_eq!(body(&tree), xml);
    }

    #[test]
    fn test_nested_paragraphs_canonicalized() {
        let mut tree = entity(
            "<para><parameterlist kind=\"param\"><parameteritem><parameterdescription><para>the <bold>v<emphasis>e</emphasis></bold></para></parameterdescription></parameteritem></parameterlist></para>",
        );

        canonicalize(&mut tree).unwrap();

        assert!(body(&tree).contains(
            "<para>the <bold>v</bold><emphasis>e</emphasis></para>"
        ));
        assert_canonical(&tree);
    }

    #[test]
    fn test_idempotent() {
        let mut tree = entity(
            "<para>See <bold>the <emphasis>real</emphasis> thing</bold>:<itemizedlist><listitem><para>one<computeroutput>x</computeroutput></para></listitem></itemizedlist>after<bold>z</bold></para><para></para>",
        );

        let first = canonicalize(&mut tree).unwrap();
        let once = tree.clone();
        let second = canonicalize(&mut tree).unwrap();

        assert!(!first.is_unchanged());
        assert!(second.is_unchanged());
        assert_eq!(tree, once);
        assert_canonical(&tree);
    }

    #[test]
    fn test_brief_and_detailed_descriptions() {
        let mut tree = parse(
            "<root><briefdescription><para>Short <bold>b<emphasis>e</emphasis></bold></para></briefdescription><detaileddescription><para>Long<verbatim>v</verbatim></para></detaileddescription></root>",
        );

        let stats = canonicalize(&mut tree).unwrap();

        assert_eq!(stats.lifted, 1);
        assert_eq!(stats.divided, 1);
        assert_canonical(&tree);
    }

    #[test]
    fn test_unknown_paragraph_child() {
        let mut tree = entity("<para>a<blink>b</blink></para>");

        assert_eq!(
            canonicalize(&mut tree),
            Err(CanonicalizeError::UnsupportedMarkup {
                tag: "blink".to_owned(),
                parent: "para".to_owned(),
            })
        );
    }

    #[test]
    fn test_unknown_leading_child() {
        let mut tree = entity("<para><sect1>x</sect1></para>");

        assert_eq!(
            canonicalize(&mut tree),
            Err(CanonicalizeError::UnsupportedMarkup {
                tag: "sect1".to_owned(),
                parent: "para".to_owned(),
            })
        );
    }

    #[test]
    fn test_structural_inside_decoration() {
        let mut tree = entity("<para><bold><itemizedlist/></bold></para>");

        assert_eq!(
            canonicalize(&mut tree),
            Err(CanonicalizeError::UnsupportedMarkup {
                tag: "itemizedlist".to_owned(),
                parent: "bold".to_owned(),
            })
        );
    }

    #[test]
    fn test_root_is_not_a_paragraph() {
        let mut tree = parse("<para><bold>a<emphasis>b</emphasis></bold></para>");

        let stats = canonicalize(&mut tree).unwrap();

        assert!(stats.is_unchanged());
    }
}
