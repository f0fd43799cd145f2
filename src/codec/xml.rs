//! XML encoding of graph queries.
//!
//! ```text
//! <query id="Q1">
//!   <graph>
//!     <edges>
//!       <edge id="Q1_0"><subject/><predicate/><object/></edge>
//!     </edges>
//!   </graph>
//!   <entrypoints>
//!     <entrypoints>
//!       <node/><enttype/>
//!       <string_descriptor><name_string/></string_descriptor>
//!       <text_descriptor><doceid/><start/><end/></text_descriptor>
//!     </entrypoints>
//!   </entrypoints>
//! </query>
//! ```
//!
//! Each entry point is wrapped in an element that reuses the plural
//! `entrypoints` tag; downstream consumers read that name.

use super::pretty_xml;
use crate::core::{
    DescriptorKind, Descriptors, Edge, EntryPoint, GraphQuery, ImageDescriptor, StringDescriptor,
    TextDescriptor, VideoDescriptor, BOTTOMRIGHT, DOCEID, EDGES, END, ENTRYPOINTS, ENTTYPE, GRAPH,
    KEYFRAMEID, NAME_STRING, NODE, OBJECT, PREDICATE, START, SUBJECT, TOPLEFT,
};
use crate::error::{Error, Result};
use xmltree::{Element, XMLNode};

pub const QUERY: &str = "query";
pub const EDGE: &str = "edge";
pub const ID: &str = "id";

/// Descriptor records as flat lists of `(tag, text)` children.
trait XmlRecord: Sized {
    fn fields(&self) -> Vec<(&'static str, &str)>;
    fn from_element(el: &Element) -> Result<Self>;
}

impl XmlRecord for StringDescriptor {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![(NAME_STRING, &self.name_string)]
    }

    fn from_element(el: &Element) -> Result<Self> {
        Ok(StringDescriptor { name_string: child_text(el, NAME_STRING)? })
    }
}

impl XmlRecord for TextDescriptor {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![(DOCEID, &self.doceid), (START, &self.start), (END, &self.end)]
    }

    fn from_element(el: &Element) -> Result<Self> {
        Ok(TextDescriptor {
            doceid: child_text(el, DOCEID)?,
            start: child_text(el, START)?,
            end: child_text(el, END)?,
        })
    }
}

impl XmlRecord for VideoDescriptor {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            (DOCEID, &self.doceid),
            (KEYFRAMEID, &self.keyframeid),
            (TOPLEFT, &self.topleft),
            (BOTTOMRIGHT, &self.bottomright),
        ]
    }

    fn from_element(el: &Element) -> Result<Self> {
        Ok(VideoDescriptor {
            doceid: child_text(el, DOCEID)?,
            keyframeid: child_text(el, KEYFRAMEID)?,
            topleft: child_text(el, TOPLEFT)?,
            bottomright: child_text(el, BOTTOMRIGHT)?,
        })
    }
}

impl XmlRecord for ImageDescriptor {
    fn fields(&self) -> Vec<(&'static str, &str)> {
        vec![(DOCEID, &self.doceid), (TOPLEFT, &self.topleft), (BOTTOMRIGHT, &self.bottomright)]
    }

    fn from_element(el: &Element) -> Result<Self> {
        Ok(ImageDescriptor {
            doceid: child_text(el, DOCEID)?,
            topleft: child_text(el, TOPLEFT)?,
            bottomright: child_text(el, BOTTOMRIGHT)?,
        })
    }
}

/// Build the `<query id=...>` tree for `query`.
pub fn to_xml(query: &GraphQuery, query_id: &str) -> Element {
    let mut root = Element::new(QUERY);
    root.attributes.insert(ID.to_string(), query_id.to_string());

    let mut edges = Element::new(EDGES);
    for (idx, edge) in query.graph.edges.iter().enumerate() {
        let mut edge_tag = Element::new(EDGE);
        edge_tag.attributes.insert(ID.to_string(), format!("{}_{}", query_id, idx));
        push(&mut edge_tag, leaf(SUBJECT, &edge.subject));
        push(&mut edge_tag, leaf(PREDICATE, &edge.predicate));
        push(&mut edge_tag, leaf(OBJECT, &edge.object));
        push(&mut edges, edge_tag);
    }
    let mut graph = Element::new(GRAPH);
    push(&mut graph, edges);
    push(&mut root, graph);

    let mut entrypoints = Element::new(ENTRYPOINTS);
    for entrypoint in &query.entrypoints {
        push(&mut entrypoints, entry_point_element(entrypoint));
    }
    push(&mut root, entrypoints);

    root
}

fn entry_point_element(entrypoint: &EntryPoint) -> Element {
    let mut ep_tag = Element::new(ENTRYPOINTS);
    push(&mut ep_tag, leaf(NODE, &entrypoint.node));
    push(&mut ep_tag, leaf(ENTTYPE, &entrypoint.enttype));

    let d = &entrypoint.descriptors;
    push_records(&mut ep_tag, DescriptorKind::String, d.strings.as_deref());
    push_records(&mut ep_tag, DescriptorKind::Text, d.texts.as_deref());
    push_records(&mut ep_tag, DescriptorKind::Video, d.videos.as_deref());
    push_records(&mut ep_tag, DescriptorKind::Image, d.images.as_deref());
    ep_tag
}

/// One repeated `kind` element per record.
fn push_records<T: XmlRecord>(parent: &mut Element, kind: DescriptorKind, records: Option<&[T]>) {
    for record in records.unwrap_or_default() {
        let mut tag = Element::new(kind.as_str());
        for (name, value) in record.fields() {
            push(&mut tag, leaf(name, value));
        }
        push(parent, tag);
    }
}

/// Decode a `<query>` tree back into its id and graph query.
pub fn from_xml(root: &Element) -> Result<(String, GraphQuery)> {
    if root.name != QUERY {
        return Err(Error::MalformedQuery(format!("expected <{}>, found <{}>", QUERY, root.name)));
    }
    let query_id = root
        .attributes
        .get(ID)
        .cloned()
        .ok_or_else(|| Error::MalformedQuery("<query> has no id attribute".to_string()))?;

    let edges_tag = required_child(required_child(root, GRAPH)?, EDGES)?;
    let edges = child_elements(edges_tag)
        .filter(|el| el.name == EDGE)
        .map(|el| {
            Ok(Edge {
                subject: child_text(el, SUBJECT)?,
                predicate: child_text(el, PREDICATE)?,
                object: child_text(el, OBJECT)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let entrypoints = match root.get_child(ENTRYPOINTS) {
        Some(tag) => child_elements(tag)
            .filter(|el| el.name == ENTRYPOINTS)
            .map(parse_entry_point)
            .collect::<Result<Vec<_>>>()?,
        None => Vec::new(),
    };

    Ok((query_id, GraphQuery { graph: crate::core::Graph { edges }, entrypoints }))
}

fn parse_entry_point(el: &Element) -> Result<EntryPoint> {
    let mut descriptors = Descriptors::default();
    for child in child_elements(el) {
        match DescriptorKind::from_key(&child.name) {
            Some(DescriptorKind::String) => {
                push_record(&mut descriptors.strings, StringDescriptor::from_element(child)?)
            }
            Some(DescriptorKind::Text) => {
                push_record(&mut descriptors.texts, TextDescriptor::from_element(child)?)
            }
            Some(DescriptorKind::Video) => {
                push_record(&mut descriptors.videos, VideoDescriptor::from_element(child)?)
            }
            Some(DescriptorKind::Image) => {
                push_record(&mut descriptors.images, ImageDescriptor::from_element(child)?)
            }
            None if child.name == NODE || child.name == ENTTYPE => {}
            None => {
                return Err(Error::MalformedQuery(format!(
                    "unexpected <{}> in entry point",
                    child.name
                )))
            }
        }
    }

    Ok(EntryPoint {
        node: child_text(el, NODE)?,
        enttype: child_text(el, ENTTYPE)?,
        descriptors,
    })
}

fn push_record<T>(records: &mut Option<Vec<T>>, record: T) {
    records.get_or_insert_with(Vec::new).push(record);
}

/// Pretty-printed XML document for `query`.
pub fn to_xml_string(query: &GraphQuery, query_id: &str) -> Result<String> {
    pretty_xml(&to_xml(query, query_id))
}

pub fn parse_xml_str(document: &str) -> Result<(String, GraphQuery)> {
    let root = Element::parse(document.as_bytes()).map_err(|e| Error::Xml(e.to_string()))?;
    from_xml(&root)
}

/// Whitespace-only values go out as CDATA; the parser drops them as plain
/// character data.
fn leaf(name: &str, text: &str) -> Element {
    let mut el = Element::new(name);
    if text.trim().is_empty() {
        if !text.is_empty() {
            el.children.push(XMLNode::CData(text.to_string()));
        }
    } else {
        el.children.push(XMLNode::Text(text.to_string()));
    }
    el
}

fn push(parent: &mut Element, child: Element) {
    parent.children.push(XMLNode::Element(child));
}

fn child_elements(el: &Element) -> impl Iterator<Item = &Element> {
    el.children.iter().filter_map(XMLNode::as_element)
}

fn required_child<'a>(el: &'a Element, name: &str) -> Result<&'a Element> {
    el.get_child(name)
        .ok_or_else(|| Error::MalformedQuery(format!("<{}> has no <{}>", el.name, name)))
}

fn child_text(el: &Element, name: &str) -> Result<String> {
    Ok(required_child(el, name)?.get_text().map(|t| t.into_owned()).unwrap_or_default())
}
