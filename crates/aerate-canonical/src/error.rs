//! Error types for structural edits and canonicalization.

use aerate_tree::NodePath;

/// A structural edit was requested where its precondition does not hold.
///
/// These never come from input data: they mean the code driving the cursor
/// asked for an impossible edit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum EditError {
    /// Edit targeted the root or a direct child of the root.
    #[error("cannot {op} node at {path}: needs depth {required}, found {found}")]
    TooShallow {
        /// Name of the edit.
        op: &'static str,
        /// Target path.
        path: NodePath,
        /// Minimum depth for this edit.
        required: usize,
        /// Actual depth.
        found: usize,
    },

    /// No node exists at the path.
    #[error("no node at {path}")]
    MissingNode {
        /// Target path.
        path: NodePath,
    },

    /// Merge needs a previous sibling to merge into.
    #[error("cannot merge node at {path}: it has no previous sibling")]
    NoPreviousSibling {
        /// Target path.
        path: NodePath,
    },
}

/// Error during canonicalization of one entity's tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CanonicalizeError {
    /// Tag outside the supported vocabulary where classification is required.
    #[error("unsupported markup <{tag}> in <{parent}>")]
    UnsupportedMarkup {
        /// Offending tag.
        tag: String,
        /// Tag of the enclosing node.
        parent: String,
    },

    /// Internal invariant failure in the edit sequence.
    #[error("structural precondition violated")]
    Structural(#[from] EditError),
}
