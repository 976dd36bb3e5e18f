//! Documentation markup trees.
//!
//! This crate provides the tree model shared by the canonicalizer and the
//! renderer: an owned element tree using the lxml-style text/tail content
//! model, index-chain positions into it, and XML loading/serialization.
//!
//! # Architecture
//!
//! - [`TreeNode`]: tag, attributes, text, tail and ordered children
//! - [`NodePath`]: position of a node as child indices from the root
//! - [`XmlTreeParser`]: quick-xml based parser that keeps whitespace exactly and
//!   folds Doxygen character elements (`<sp/>`, `<ndash/>`) into text
//! - [`XmlTreeSerializer`]: XML writer with stable attribute order
//!
//! # Example
//!
//! ```
//! use aerate_tree::{NodePath, XmlTreeParser};
//!
//! let tree = XmlTreeParser::new()
//!     .parse("<para>Copy <bold>all</bold> elements</para>")
//!     .unwrap();
//!
//! let bold = tree.get(&NodePath::root().child(0)).unwrap();
//! assert_eq!(bold.text, "all");
//! assert_eq!(bold.tail, " elements");
//! assert_eq!(tree.text_content(), "Copy all elements");
//! ```

mod characters;
mod error;
mod parser;
mod path;
mod serializer;
mod tree;

pub use error::TreeError;
pub use parser::XmlTreeParser;
pub use path::NodePath;
pub use serializer::XmlTreeSerializer;
pub use tree::TreeNode;
