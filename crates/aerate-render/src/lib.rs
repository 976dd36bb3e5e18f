//! reStructuredText rendering of canonical Doxygen descriptions.
//!
//! Input is a description tree already brought into canonical form by
//! `aerate-canonical`: paragraphs are either inline runs of text and leaf
//! decorations, or sequences of structural blocks. Output is Sphinx-flavored
//! reStructuredText, one string per paragraph.
//!
//! # Architecture
//!
//! - [`render_inline`]: one paragraph of text and decorations, with the
//!   escaping that keeps inline markers recognizable next to any neighbor
//! - [`render_paragraphs`] / [`render_description`]: lists, admonitions,
//!   field lists, code blocks and tables built from structural markup
//! - [`RenderContext`]: indentation width, domain and code language, passed
//!   explicitly instead of held in global state
//! - [`Resolve`] / [`XrefIndex`]: `<ref>` targets looked up from Doxygen's
//!   `index.xml`, rendered as domain roles
//!
//! # Example
//!
//! ```
//! use aerate_render::{RenderContext, render_paragraphs};
//! use aerate_tree::XmlTreeParser;
//!
//! let description = XmlTreeParser::new()
//!     .parse("<briefdescription><para>Get the <emphasis>i</emphasis>th element.</para></briefdescription>")
//!     .unwrap();
//!
//! let blocks = render_paragraphs(&description, &RenderContext::new("c")).unwrap();
//! assert_eq!(blocks, vec!["Get the *i*\\th element."]);
//! ```

mod block;
mod context;
mod error;
mod escape;
mod inline;
mod util;
mod xref;

pub use block::{Admonition, render_description, render_paragraphs};
pub use context::RenderContext;
pub use error::RenderError;
pub use inline::render_inline;
pub use util::indent;
pub use xref::{RefKind, Resolve, Target, XrefIndex};
