//! Construction of canonical graph query values.

use super::{Descriptors, Edge, EntryPoint, Graph, GraphQuery};

/// Fragment after the last `#` of `uri`, or `uri` itself when it has none.
pub fn local_name(uri: &str) -> &str {
    uri.rsplit_once('#').map_or(uri, |(_, fragment)| fragment)
}

/// Number of descriptor records kept out of `n`.
///
/// A quarter of the records, but never fewer than three, capped at `n`.
pub fn sample_count(n: usize) -> usize {
    n.min((n / 4).max(3))
}

fn sample<T>(records: Option<Vec<T>>) -> Option<Vec<T>> {
    records.map(|mut records| {
        records.truncate(sample_count(records.len()));
        records
    })
}

pub fn make_edge(subject: &str, predicate: &str, object: &str) -> Edge {
    Edge {
        subject: subject.to_string(),
        predicate: local_name(predicate).to_string(),
        object: object.to_string(),
    }
}

/// Build an entry point, keeping only the sampled prefix of every descriptor
/// kind present in `descriptors`.
pub fn make_entry_point(node: &str, enttype: &str, descriptors: Descriptors) -> EntryPoint {
    EntryPoint {
        node: node.to_string(),
        enttype: local_name(enttype).to_string(),
        descriptors: Descriptors {
            strings: sample(descriptors.strings),
            texts: sample(descriptors.texts),
            videos: sample(descriptors.videos),
            images: sample(descriptors.images),
        },
    }
}

pub fn make_graph_query(edges: Vec<Edge>, entrypoints: Vec<EntryPoint>) -> GraphQuery {
    GraphQuery { graph: Graph { edges }, entrypoints }
}
