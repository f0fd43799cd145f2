//! Graph query assembly from a single event or relation.

use super::extractor::KnowledgeGraphExtractor;
use crate::core::{make_edge, make_entry_point, make_graph_query, GraphQuery};
use crate::error::Result;
use crate::querying::{iri_ref, ExclusionSet, QueryExecutor};
use indexmap::IndexSet;
use tracing::{debug, info};

/// Builds canonical graph queries rooted at an event or relation.
///
/// Every outgoing role edge of the root becomes an [`Edge`](crate::core::Edge).
/// Every distinct object of those edges becomes an entry point, provided it
/// is an IRI and has at least one descriptor. Literal objects and objects
/// without descriptors stay in the graph but are not anchors.
pub struct GraphQueryBuilder<'a, E: QueryExecutor> {
    extractor: &'a KnowledgeGraphExtractor<E>,
    exclude_predicates: ExclusionSet,
    exclude_objects: ExclusionSet,
}

impl<'a, E: QueryExecutor> GraphQueryBuilder<'a, E> {
    pub fn new(extractor: &'a KnowledgeGraphExtractor<E>) -> Self {
        Self {
            extractor,
            exclude_predicates: ExclusionSet::new(),
            exclude_objects: ExclusionSet::new(),
        }
    }

    pub fn exclude_predicates(mut self, predicates: ExclusionSet) -> Self {
        self.exclude_predicates = predicates;
        self
    }

    pub fn exclude_objects(mut self, objects: ExclusionSet) -> Self {
        self.exclude_objects = objects;
        self
    }

    pub fn build(&self, root_uri: &str) -> Result<GraphQuery> {
        let groups = self.extractor.edges_of_subject(
            root_uri,
            &self.exclude_predicates,
            &self.exclude_objects,
        )?;

        let mut edges = Vec::new();
        let mut objects = IndexSet::new();
        for (predicate, targets) in &groups {
            for object in targets {
                edges.push(make_edge(root_uri, predicate, object));
                objects.insert(object.as_str());
            }
        }

        let mut entrypoints = Vec::new();
        for object in objects {
            // literal objects (dates, values) are edges but never anchors
            if iri_ref(object).is_err() {
                debug!(node = object, "literal object, not an entry point");
                continue;
            }
            let descriptors = self.extractor.entry_point_descriptors(object)?;
            if descriptors.is_empty() {
                debug!(node = object, "no descriptors, not an entry point");
                continue;
            }
            let enttype = self.extractor.entity_type(object)?;
            entrypoints.push(make_entry_point(object, &enttype, descriptors));
        }

        info!(
            root = root_uri,
            edges = edges.len(),
            entrypoints = entrypoints.len(),
            "built graph query"
        );
        Ok(make_graph_query(edges, entrypoints))
    }
}
