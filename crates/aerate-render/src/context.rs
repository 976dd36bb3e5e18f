//! Render settings passed down explicitly through every renderer.

use crate::xref::{RefKind, Resolve, Target};

/// Settings and collaborators for rendering one description.
///
/// Nested blocks do not track an indentation level: each renderer returns
/// text starting at column zero and the enclosing block indents it by
/// [`indent`](Self::indent) spaces.
///
/// # Example
///
/// ```
/// use aerate_render::{RenderContext, XrefIndex};
///
/// let index = XrefIndex::new();
/// let ctx = RenderContext::new("c").with_indent(4).with_resolver(&index);
/// assert_eq!(ctx.indent, 4);
/// ```
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    /// Spaces per nesting level for directive and block bodies.
    pub indent: usize,
    /// Sphinx domain for cross-reference roles (`c` gives `:c:func:`).
    pub domain: &'a str,
    /// Language for code blocks that do not name one.
    pub language: &'a str,
    /// Cross-reference lookup. Without one, references render as plain text.
    pub resolver: Option<&'a dyn Resolve>,
}

impl<'a> RenderContext<'a> {
    /// Default indentation width.
    pub const DEFAULT_INDENT: usize = 3;

    /// Create a context for `domain`, using it as the code language too.
    #[must_use]
    pub fn new(domain: &'a str) -> Self {
        Self {
            indent: Self::DEFAULT_INDENT,
            domain,
            language: domain,
            resolver: None,
        }
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: &'a str) -> Self {
        self.language = language;
        self
    }

    #[must_use]
    pub fn with_resolver(mut self, resolver: &'a dyn Resolve) -> Self {
        self.resolver = Some(resolver);
        self
    }

    pub(crate) fn resolve(&self, kind: RefKind, id: &str) -> Option<&'a Target> {
        self.resolver?.resolve(kind, id)
    }
}
