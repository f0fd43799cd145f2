//! Serialization of graph queries and generic payload output

pub mod payload;
pub mod xml;

pub use payload::{Payload, EMPTY_NOTICE};
pub use xml::{from_xml, parse_xml_str, to_xml, to_xml_string};

use crate::error::{Error, Result};
use xmltree::{Element, EmitterConfig, XMLNode};

/// Render `element` as an indented XML document.
pub fn pretty_xml(element: &Element) -> Result<String> {
    let mut buf = Vec::new();
    let config = EmitterConfig::new().perform_indent(true).indent_string("  ");
    element.write_with_config(&mut buf, config).map_err(|e| Error::Xml(e.to_string()))?;
    Ok(String::from_utf8(buf)?)
}

/// Parse `text` as XML and re-indent it, or `None` if it is not XML.
///
/// Only a document with exactly one root element and nothing else at the top
/// level is re-indented; anything the tree would not reproduce stays text.
pub fn reindent_xml(text: &str) -> Option<String> {
    let mut nodes = Element::parse_all(text.as_bytes()).ok()?;
    if nodes.len() != 1 {
        return None;
    }
    match nodes.pop()? {
        XMLNode::Element(element) => pretty_xml(&element).ok(),
        _ => None,
    }
}
