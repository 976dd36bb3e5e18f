//! Render error type.

/// Error while rendering a description tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    /// Tag outside the vocabulary expected at this position.
    #[error("unsupported markup <{tag}> in <{parent}>")]
    UnsupportedMarkup { tag: String, parent: String },

    /// Tree shape that canonicalization should have removed.
    #[error("<{tag}> is not in canonical form")]
    NotCanonical { tag: String },

    /// Known markup with no reStructuredText rendering.
    #[error("<{tag}> cannot be rendered")]
    Unsupported { tag: String },
}
