//! Structural edits on a tree, addressed by path.
//!
//! The cursor borrows one tree mutably and offers the primitive edits the
//! canonicalizer is built from. It keeps no position of its own: every
//! operation takes the [`NodePath`] it acts on and returns the paths that are
//! meaningful afterwards, so a caller can never hold a position that an edit
//! silently invalidated.
//!
//! All edits keep the document text (text and tails in document order)
//! unchanged, except [`Cursor::remove`], which drops the removed node's own
//! content. Nodes that an edit splits are never deleted, even when one half ends
//! up empty.

use std::mem;

use aerate_tree::{NodePath, TreeNode};

use crate::error::EditError;

/// Minimum depth of a node any edit may target: not the root, not a child of it.
const MIN_EDIT_DEPTH: usize = 2;

/// Minimum depth for lift: the node's parent must itself be editable.
const MIN_LIFT_DEPTH: usize = MIN_EDIT_DEPTH + 1;

/// Paths produced by [`Cursor::lift`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lifted {
    /// New position of the lifted node (right after its former parent).
    pub node: NodePath,
    /// Duplicate of the former parent holding the tail and following siblings.
    pub continuation: Option<NodePath>,
}

/// Edit handle bound to one tree.
pub struct Cursor<'t> {
    root: &'t mut TreeNode,
}

impl<'t> Cursor<'t> {
    /// Bind a cursor to the tree rooted at `root`.
    pub fn new(root: &'t mut TreeNode) -> Self {
        Self { root }
    }

    /// The tree being edited.
    #[must_use]
    pub fn tree(&self) -> &TreeNode {
        self.root
    }

    /// Node at `at`.
    pub fn node(&self, at: &NodePath) -> Result<&TreeNode, EditError> {
        self.root
            .get(at)
            .ok_or_else(|| EditError::MissingNode { path: at.clone() })
    }

    /// Next position in depth-first document order.
    ///
    /// Returns the first child if any, else the next sibling, else the next
    /// sibling of the nearest ancestor that has one. `None` means the traversal
    /// is exhausted.
    #[must_use]
    pub fn advance(&self, at: &NodePath) -> Option<NodePath> {
        let node = self.root.get(at)?;
        if node.children.is_empty() {
            self.skip(at)
        } else {
            Some(at.child(0))
        }
    }

    /// Next position in document order that is not inside the subtree at `at`.
    #[must_use]
    pub fn skip(&self, at: &NodePath) -> Option<NodePath> {
        let index = at.index()?;
        self.first_from(at.parent()?, index + 1)
    }

    /// First existing position at or after child `index` of `parent`, climbing
    /// to ancestors' following siblings when `parent` has run out of children.
    fn first_from(&self, mut parent: NodePath, mut index: usize) -> Option<NodePath> {
        loop {
            let node = self.root.get(&parent)?;
            if index < node.children.len() {
                return Some(parent.child(index));
            }
            index = parent.index()? + 1;
            parent = parent.parent()?;
        }
    }

    /// Promote the node at `at` to a sibling immediately after its parent.
    ///
    /// When the node has tail text or following siblings, the parent is
    /// duplicated: the duplicate takes the tail as its text and the following
    /// siblings as its children and is inserted right after the lifted node.
    /// The parent keeps everything before the node. The parent's own tail moves
    /// to whichever node now comes last.
    ///
    /// ```text
    /// <para><bold>a<emphasis>b</emphasis>c</bold></para>
    /// lift(emphasis) =>
    /// <para><bold>a</bold><emphasis>b</emphasis><bold>c</bold></para>
    /// ```
    pub fn lift(&mut self, at: &NodePath) -> Result<Lifted, EditError> {
        self.check("lift", at, MIN_LIFT_DEPTH)?;
        let (parent_path, index) = split_path(at)?;
        let (grand_path, parent_index) = split_path(&parent_path)?;

        let parent = self.node_mut(&parent_path)?;
        let following = parent.children.split_off(index + 1);
        let Some(mut node) = parent.children.pop() else {
            return Err(EditError::MissingNode { path: at.clone() });
        };
        let parent_tail = mem::take(&mut parent.tail);

        let continuation = if node.tail.is_empty() && following.is_empty() {
            node.tail = parent_tail;
            None
        } else {
            let mut continuation = parent.duplicate();
            continuation.text = mem::take(&mut node.tail);
            continuation.children = following;
            continuation.tail = parent_tail;
            Some(continuation)
        };

        let grand = self.node_mut(&grand_path)?;
        grand.children.insert(parent_index + 1, node);
        let continuation = continuation.map(|continuation| {
            grand.children.insert(parent_index + 2, continuation);
            grand_path.child(parent_index + 2)
        });

        Ok(Lifted {
            node: grand_path.child(parent_index + 1),
            continuation,
        })
    }

    /// Split the parent of `at` in two, starting the second half at `at`.
    ///
    /// The parent is duplicated; `at` and its following siblings move into the
    /// duplicate, which is inserted right after the parent and inherits the
    /// parent's tail. Returns the duplicate's path.
    ///
    /// ```text
    /// <para>prefix <itemizedlist/>suffix</para>
    /// divide(itemizedlist) =>
    /// <para>prefix </para><para><itemizedlist/>suffix</para>
    /// ```
    pub fn divide(&mut self, at: &NodePath) -> Result<NodePath, EditError> {
        self.check("divide", at, MIN_EDIT_DEPTH)?;
        let (parent_path, index) = split_path(at)?;

        let parent = self.node_mut(&parent_path)?;
        let mut continuation = parent.duplicate();
        continuation.children = parent.children.split_off(index);
        continuation.tail = mem::take(&mut parent.tail);

        self.insert_after(&parent_path, continuation)
    }

    /// Split the parent of `at` right after `at`, starting the second half with
    /// the node's tail text.
    ///
    /// Like [`Cursor::divide`], but `at` stays in the original parent; the
    /// duplicate takes its tail as text plus its following siblings.
    pub fn divide_tail(&mut self, at: &NodePath) -> Result<NodePath, EditError> {
        self.check("divide", at, MIN_EDIT_DEPTH)?;
        let (parent_path, index) = split_path(at)?;

        let parent = self.node_mut(&parent_path)?;
        let mut continuation = parent.duplicate();
        continuation.children = parent.children.split_off(index + 1);
        continuation.text = mem::take(&mut parent.children[index].tail);
        continuation.tail = mem::take(&mut parent.tail);

        self.insert_after(&parent_path, continuation)
    }

    /// Delete the node at `at` with its subtree.
    ///
    /// Tail text is kept: it is appended to the previous sibling's tail, or to
    /// the parent's text when there is no previous sibling. Returns the position
    /// that follows the removed subtree in document order, which is where a
    /// traversal standing on the node (or inside it) continues.
    pub fn remove(&mut self, at: &NodePath) -> Result<Option<NodePath>, EditError> {
        self.check("remove", at, MIN_EDIT_DEPTH)?;
        let (parent_path, index) = split_path(at)?;

        let parent = self.node_mut(&parent_path)?;
        let node = parent.children.remove(index);
        if !node.tail.is_empty() {
            match index.checked_sub(1) {
                Some(previous) => parent.children[previous].tail.push_str(&node.tail),
                None => parent.text.push_str(&node.tail),
            }
        }

        Ok(self.first_from(parent_path, index))
    }

    /// Join the node at `at` into its previous sibling.
    ///
    /// The previous sibling's tail and then the node's text are appended at
    /// the end of the previous sibling's content (its last child's tail, or its
    /// text when it has no children); the node's children are reparented onto
    /// it and the node's tail becomes its tail. Returns the merged node's path.
    pub fn merge(&mut self, at: &NodePath) -> Result<NodePath, EditError> {
        self.check("merge", at, MIN_EDIT_DEPTH)?;
        let (parent_path, index) = split_path(at)?;
        let Some(previous_index) = index.checked_sub(1) else {
            return Err(EditError::NoPreviousSibling { path: at.clone() });
        };

        let parent = self.node_mut(&parent_path)?;
        let node = parent.children.remove(index);
        let previous = &mut parent.children[previous_index];

        let mut carried = mem::take(&mut previous.tail);
        carried.push_str(&node.text);
        match previous.children.last_mut() {
            Some(last) => last.tail.push_str(&carried),
            None => previous.text.push_str(&carried),
        }
        previous.children.extend(node.children);
        previous.tail = node.tail;

        Ok(at.sibling(previous_index))
    }

    /// Insert `node` right after the node at `sibling`.
    fn insert_after(&mut self, sibling: &NodePath, node: TreeNode) -> Result<NodePath, EditError> {
        let (parent_path, index) = split_path(sibling)?;
        self.node_mut(&parent_path)?.children.insert(index + 1, node);
        Ok(sibling.sibling(index + 1))
    }

    fn node_mut(&mut self, at: &NodePath) -> Result<&mut TreeNode, EditError> {
        self.root
            .get_mut(at)
            .ok_or_else(|| EditError::MissingNode { path: at.clone() })
    }

    /// Validate depth and existence before any mutation happens.
    fn check(&self, op: &'static str, at: &NodePath, required: usize) -> Result<(), EditError> {
        if at.depth() < required {
            return Err(EditError::TooShallow {
                op,
                path: at.clone(),
                required,
                found: at.depth(),
            });
        }
        self.node(at).map(|_| ())
    }
}

fn split_path(at: &NodePath) -> Result<(NodePath, usize), EditError> {
    at.parent()
        .zip(at.index())
        .ok_or_else(|| EditError::MissingNode { path: at.clone() })
}
