//! XML to `TreeNode` parser.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::characters::character_element;
use crate::error::TreeError;
use crate::tree::TreeNode;

/// Parse XML documents into `TreeNode` structures.
///
/// Text and tails are kept byte for byte (no trimming), so document order and
/// whitespace survive a parse/serialize round trip.
pub struct XmlTreeParser;

impl XmlTreeParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an XML string and return its document element.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed XML or has no element.
    pub fn parse(&self, xml: &str) -> Result<TreeNode, TreeError> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let tag = self.decode_tag(&reader, &e);
                    let attrs = self.decode_attrs(&reader, &e);
                    let mut root = self.parse_children(&mut reader, &tag)?;
                    root.tag = tag;
                    root.attrs = attrs;
                    return Ok(root);
                }
                Event::Empty(e) => {
                    return Ok(TreeNode {
                        tag: self.decode_tag(&reader, &e),
                        attrs: self.decode_attrs(&reader, &e),
                        ..Default::default()
                    });
                }
                Event::Eof => return Err(TreeError::NoRootElement),
                // Prolog: declaration, doctype, comments, whitespace
                _ => {}
            }
            buf.clear();
        }
    }

    /// Read and parse an XML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn parse_file(&self, path: &Path) -> Result<TreeNode, TreeError> {
        let xml = std::fs::read_to_string(path).map_err(|source| TreeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse(&xml)
    }

    fn parse_children<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        parent_tag: &str,
    ) -> Result<TreeNode, TreeError> {
        let mut buf = Vec::new();
        let mut node = TreeNode::default();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let child_tag = self.decode_tag(reader, &e);
                    let child_attrs = self.decode_attrs(reader, &e);
                    let mut child = self.parse_children(reader, &child_tag)?;
                    if child.is_empty()
                        && let Some(text) = character_element(&child_tag)
                    {
                        append_text(&mut node, text);
                    } else {
                        child.tag = child_tag;
                        child.attrs = child_attrs;
                        node.children.push(child);
                    }
                }
                Event::Empty(e) => {
                    let child_tag = self.decode_tag(reader, &e);
                    if let Some(text) = character_element(&child_tag) {
                        append_text(&mut node, text);
                    } else {
                        let child = TreeNode {
                            attrs: self.decode_attrs(reader, &e),
                            tag: child_tag,
                            ..Default::default()
                        };
                        node.children.push(child);
                    }
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?.into_owned();
                    append_text(&mut node, &text);
                }
                Event::GeneralRef(e) => {
                    // Entity references (e.g., &lt; &gt; &amp; &#x20;)
                    let entity = reader.decoder().decode(&e)?.into_owned();
                    let text = decode_entity(&entity);
                    append_text(&mut node, &text);
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e).into_owned();
                    append_text(&mut node, &text);
                }
                Event::End(e) => {
                    let end_tag = self.decode_tag_from_bytes(reader, e.name().as_ref());
                    if end_tag == parent_tag {
                        return Ok(node);
                    }
                    // Mismatched end tag - continue
                }
                Event::Eof => {
                    return Ok(node);
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn decode_tag<R: BufRead>(&self, reader: &Reader<R>, e: &BytesStart) -> String {
        self.decode_tag_from_bytes(reader, e.name().as_ref())
    }

    fn decode_tag_from_bytes<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader.decoder().decode(name).map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            std::borrow::Cow::into_owned,
        )
    }

    fn decode_attrs<R: BufRead>(
        &self,
        reader: &Reader<R>,
        e: &BytesStart,
    ) -> HashMap<String, String> {
        let mut attrs = HashMap::new();
        for attr in e.attributes().flatten() {
            let key = reader.decoder().decode(attr.key.as_ref()).map_or_else(
                |_| String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                std::borrow::Cow::into_owned,
            );

            // Skip namespace declarations
            if key.starts_with("xmlns") {
                continue;
            }

            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );

            attrs.insert(key, value);
        }
        attrs
    }
}

impl Default for XmlTreeParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Append text to node's text or last child's tail.
fn append_text(node: &mut TreeNode, text: &str) {
    if let Some(last_child) = node.children.last_mut() {
        last_child.tail.push_str(text);
    } else {
        node.text.push_str(text);
    }
}

/// Decode XML entity references to their character values.
fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        // Numeric character references
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        // Unknown entity - preserve as-is
        _ => format!("&{entity};"),
    }
}
