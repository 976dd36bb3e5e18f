//! Canonicalization of Doxygen description trees.
//!
//! Doxygen freely mixes running text, inline decorations and block content in
//! one `<para>`, and nests decorations inside each other. Rendering is much
//! simpler on a restricted shape, which this crate produces in place:
//!
//! - every paragraph holds only inline decorations (with text) or only
//!   structural blocks;
//! - every inline decoration is a leaf;
//! - pieces of one decoration split apart by flattening are joined again.
//!
//! Text and tails keep their document order through every rewrite.
//!
//! # Example
//!
//! ```
//! use aerate_canonical::canonicalize;
//! use aerate_tree::{XmlTreeParser, XmlTreeSerializer};
//!
//! let mut tree = XmlTreeParser::new()
//!     .parse("<root><briefdescription><para>a <bold>b<emphasis>c</emphasis></bold></para></briefdescription></root>")
//!     .unwrap();
//!
//! let stats = canonicalize(&mut tree).unwrap();
//!
//! assert_eq!(stats.lifted, 1);
//! assert_eq!(
//!     XmlTreeSerializer::new().serialize(&tree.children[0].children[0]),
//!     "<para>a <bold>b</bold><emphasis>c</emphasis></para>"
//! );
//! ```

mod canonicalize;
mod cursor;
mod error;
mod markup;

pub use canonicalize::{CanonicalizeStats, canonicalize};
pub use cursor::{Cursor, Lifted};
pub use error::{CanonicalizeError, EditError};
pub use markup::{Inline, Markup, PARAGRAPH, Structural};
