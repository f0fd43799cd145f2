//! Canonical graph query data structures
//!
//! A [`GraphQuery`] is the unit handed to the downstream matching engine and
//! the payload of both the JSON and the XML interchange formats. Field names
//! here are the interchange keys verbatim.

use serde::{Deserialize, Serialize};

pub mod construct;
pub use construct::*;

pub const GRAPH: &str = "graph";
pub const SUBJECT: &str = "subject";
pub const PREDICATE: &str = "predicate";
pub const OBJECT: &str = "object";
pub const EDGES: &str = "edges";
pub const ENTRYPOINTS: &str = "entrypoints";
pub const NODE: &str = "node";
pub const ENTTYPE: &str = "enttype";
pub const STRING_DESCRIPTOR: &str = "string_descriptor";
pub const TEXT_DESCRIPTOR: &str = "text_descriptor";
pub const VIDEO_DESCRIPTOR: &str = "video_descriptor";
pub const IMAGE_DESCRIPTOR: &str = "image_descriptor";
pub const NAME_STRING: &str = "name_string";
pub const START: &str = "start";
pub const END: &str = "end";
pub const DOCEID: &str = "doceid";
pub const KEYFRAMEID: &str = "keyframeid";
pub const TOPLEFT: &str = "topleft";
pub const BOTTOMRIGHT: &str = "bottomright";

/// A reified (subject, predicate, object) statement of an event or relation.
/// `predicate` holds the local name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub subject: String,
    pub predicate: String,
    pub object: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringDescriptor {
    pub name_string: String,
}

/// Character span in a text document. Offsets are kept as their lexical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextDescriptor {
    pub doceid: String,
    pub start: String,
    pub end: String,
}

/// Bounding box on a video keyframe. Corners are `"x,y"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDescriptor {
    pub doceid: String,
    pub keyframeid: String,
    pub topleft: String,
    pub bottomright: String,
}

/// Bounding box on an image. Corners are `"x,y"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub doceid: String,
    pub topleft: String,
    pub bottomright: String,
}

/// The four descriptor modalities an entry point can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    String,
    Text,
    Video,
    Image,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 4] =
        [DescriptorKind::String, DescriptorKind::Text, DescriptorKind::Video, DescriptorKind::Image];

    /// Interchange key (`string_descriptor`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            DescriptorKind::String => STRING_DESCRIPTOR,
            DescriptorKind::Text => TEXT_DESCRIPTOR,
            DescriptorKind::Video => VIDEO_DESCRIPTOR,
            DescriptorKind::Image => IMAGE_DESCRIPTOR,
        }
    }

    pub fn from_key(key: &str) -> Option<DescriptorKind> {
        DescriptorKind::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

/// Descriptors of an entry point, by kind.
///
/// `None` means the kind is absent; a present kind serializes under its key
/// and an absent one is never written as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptors {
    #[serde(rename = "string_descriptor", default, skip_serializing_if = "Option::is_none")]
    pub strings: Option<Vec<StringDescriptor>>,
    #[serde(rename = "text_descriptor", default, skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<TextDescriptor>>,
    #[serde(rename = "video_descriptor", default, skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<VideoDescriptor>>,
    #[serde(rename = "image_descriptor", default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<ImageDescriptor>>,
}

impl Descriptors {
    /// Kinds present, in interchange order.
    pub fn kinds(&self) -> Vec<DescriptorKind> {
        DescriptorKind::ALL.into_iter().filter(|k| self.contains(*k)).collect()
    }

    pub fn contains(&self, kind: DescriptorKind) -> bool {
        self.len_of(kind).is_some()
    }

    /// Record count for `kind`, `None` when the kind is absent.
    pub fn len_of(&self, kind: DescriptorKind) -> Option<usize> {
        match kind {
            DescriptorKind::String => self.strings.as_ref().map(Vec::len),
            DescriptorKind::Text => self.texts.as_ref().map(Vec::len),
            DescriptorKind::Video => self.videos.as_ref().map(Vec::len),
            DescriptorKind::Image => self.images.as_ref().map(Vec::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kinds().is_empty()
    }
}

/// An entity anchoring a graph query. `enttype` holds the local name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPoint {
    pub node: String,
    pub enttype: String,
    #[serde(flatten)]
    pub descriptors: Descriptors,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Graph {
    pub edges: Vec<Edge>,
}

/// Canonical `{graph: {edges}, entrypoints}` structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQuery {
    pub graph: Graph,
    pub entrypoints: Vec<EntryPoint>,
}

impl GraphQuery {
    pub fn edges(&self) -> &[Edge] {
        &self.graph.edges
    }
}
