//! Knowledge-graph extractor
//!
//! Recovers events, relations, role edges, entity types and entry-point
//! descriptors from an AIDA knowledge base. Edges are always read through the
//! `rdf:Statement` reification layer, where the ontology attaches confidence
//! to each assertion. Type assertions have their own lookup
//! ([`KnowledgeGraphExtractor::entity_type`]) and are filtered out of edge
//! traversals.

use crate::core::{
    local_name, Descriptors, ImageDescriptor, StringDescriptor, TextDescriptor, VideoDescriptor,
};
use crate::error::{Error, Result};
use crate::querying::{exclusion_filter, iri_ref, BindingRow, ExclusionSet, QueryExecutor};
use indexmap::IndexMap;
use tracing::debug;

/// Predicate URI to the subjects or objects it links, in first-seen order.
pub type PredicateGroups = IndexMap<String, Vec<String>>;

/// Types of resource that appear as the subject of a role statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementSubject {
    Event,
    Relation,
}

impl StatementSubject {
    pub const ALL: [StatementSubject; 2] = [StatementSubject::Event, StatementSubject::Relation];

    /// Class local name in the AIDA namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementSubject::Event => "Event",
            StatementSubject::Relation => "Relation",
        }
    }
}

/// Extractor over a knowledge base reachable through `E`.
///
/// Each call issues its queries synchronously and returns freshly built
/// values; the extractor holds no state besides the executor.
pub struct KnowledgeGraphExtractor<E: QueryExecutor> {
    executor: E,
}

impl<E: QueryExecutor> KnowledgeGraphExtractor<E> {
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// All instances typed `aida:Event`.
    pub fn list_event_uris(&self) -> Result<Vec<String>> {
        let q = "
    SELECT DISTINCT ?event
    WHERE { ?event a aida:Event }
    ";
        values_of(self.executor.select(q)?, "event")
    }

    /// Distinct role predicates linking events (and relations) to entities.
    pub fn list_role_edges_by_type(&self) -> Result<IndexMap<StatementSubject, Vec<String>>> {
        let mut res = IndexMap::new();
        for subject_type in StatementSubject::ALL {
            let q = format!(
                "
        SELECT DISTINCT ?role WHERE {{
          ?sub a aida:{} .
          ?ent a aida:Entity .
          ?r rdf:subject ?sub ;
             rdf:predicate ?role ;
             rdf:object ?ent .
        }}
        ",
                subject_type.as_str()
            );
            res.insert(subject_type, values_of(self.executor.select(&q)?, "role")?);
        }
        Ok(res)
    }

    /// Outgoing edges of an event or relation, grouped by predicate URI.
    ///
    /// `rdf:type` statements are never returned.
    pub fn edges_of_subject(
        &self,
        uri: &str,
        exclude_predicates: &ExclusionSet,
        exclude_objects: &ExclusionSet,
    ) -> Result<PredicateGroups> {
        let q = format!(
            "
    SELECT DISTINCT ?p ?o
    WHERE {{
      ?r a rdf:Statement ;
         rdf:subject {} ;
         rdf:predicate ?p ;
         rdf:object ?o .
      FILTER(?p != rdf:type) .
      {}
      {}
    }}
    ",
            iri_ref(uri)?,
            exclusion_filter("?p", exclude_predicates)?,
            exclusion_filter("?o", exclude_objects)?
        );
        let groups = group_by_predicate(self.executor.select(&q)?, "o")?;
        debug!(uri, predicates = groups.len(), "collected outgoing edges");
        Ok(groups)
    }

    /// Incoming edges of an entity, grouped by predicate URI.
    pub fn edges_of_object(
        &self,
        uri: &str,
        exclude_predicates: &ExclusionSet,
        exclude_subjects: &ExclusionSet,
    ) -> Result<PredicateGroups> {
        let q = format!(
            "
    SELECT DISTINCT ?s ?p
    WHERE {{
      ?r a rdf:Statement ;
         rdf:subject ?s ;
         rdf:predicate ?p ;
         rdf:object {} .
      FILTER(?p != rdf:type) .
      {}
      {}
    }}
    ",
            iri_ref(uri)?,
            exclusion_filter("?p", exclude_predicates)?,
            exclusion_filter("?s", exclude_subjects)?
        );
        let groups = group_by_predicate(self.executor.select(&q)?, "s")?;
        debug!(uri, predicates = groups.len(), "collected incoming edges");
        Ok(groups)
    }

    /// Local name of the type asserted for `uri` by its reified type statement.
    ///
    /// An untyped entity is a data-integrity violation and fails with
    /// [`Error::EmptyResult`].
    pub fn entity_type(&self, uri: &str) -> Result<String> {
        let q = format!(
            "
    SELECT DISTINCT ?t
    WHERE {{
      ?r a rdf:Statement ;
         rdf:subject {} ;
         rdf:predicate rdf:type ;
         rdf:object ?t .
    }}
    ",
            iri_ref(uri)?
        );
        let rows = self.executor.select(&q)?;
        let first = rows
            .first()
            .ok_or_else(|| Error::EmptyResult { lookup: "entity type", uri: uri.to_string() })?;
        Ok(local_name(first.value("t")?).to_string())
    }

    /// Name, text, video and image descriptors justifying `uri`.
    ///
    /// Each kind is queried independently and only kinds with at least one
    /// binding are present in the result.
    pub fn entry_point_descriptors(&self, uri: &str) -> Result<Descriptors> {
        let node = iri_ref(uri)?;

        let strings = self.descriptor_query(&string_descriptor_query(&node), |row| {
            Ok(StringDescriptor { name_string: row.value("name_string")?.to_string() })
        })?;

        let texts = self.descriptor_query(&text_descriptor_query(&node), |row| {
            Ok(TextDescriptor {
                doceid: row.value("doceid")?.to_string(),
                start: row.value("start")?.to_string(),
                end: row.value("end")?.to_string(),
            })
        })?;

        let videos = self.descriptor_query(&video_descriptor_query(&node), |row| {
            Ok(VideoDescriptor {
                doceid: row.value("doceid")?.to_string(),
                keyframeid: row.value("keyframeid")?.to_string(),
                topleft: corner(row, "topleftX", "topleftY")?,
                bottomright: corner(row, "bottomrightX", "bottomrightY")?,
            })
        })?;

        let images = self.descriptor_query(&image_descriptor_query(&node), |row| {
            Ok(ImageDescriptor {
                doceid: row.value("doceid")?.to_string(),
                topleft: corner(row, "topleftX", "topleftY")?,
                bottomright: corner(row, "bottomrightX", "bottomrightY")?,
            })
        })?;

        let descriptors = Descriptors { strings, texts, videos, images };
        debug!(uri, kinds = ?descriptors.kinds(), "collected descriptors");
        Ok(descriptors)
    }

    fn descriptor_query<T>(
        &self,
        q: &str,
        format: impl Fn(&BindingRow) -> Result<T>,
    ) -> Result<Option<Vec<T>>> {
        let bindings = self.executor.select(q)?;
        if bindings.is_empty() {
            return Ok(None);
        }
        bindings.iter().map(format).collect::<Result<Vec<_>>>().map(Some)
    }
}

fn string_descriptor_query(node: &str) -> String {
    format!(
        "
    SELECT DISTINCT ?name_string
    WHERE {{ {} aida:hasName ?name_string }}
    ",
        node
    )
}

fn text_descriptor_query(node: &str) -> String {
    format!(
        "
    SELECT DISTINCT ?doceid ?start ?end
    WHERE {{
      {} aida:justifiedBy ?j .
      ?j a aida:TextJustification ;
         aida:source ?doceid ;
         aida:startOffset ?start ;
         aida:endOffsetInclusive ?end .
    }}
    ",
        node
    )
}

fn video_descriptor_query(node: &str) -> String {
    format!(
        "
    SELECT DISTINCT ?doceid ?keyframeid ?topleftX ?topleftY ?bottomrightX ?bottomrightY
    WHERE {{
      {} aida:justifiedBy ?j .
      ?j a aida:KeyFrameVideoJustification ;
         aida:source ?doceid ;
         aida:keyFrame ?keyframeid ;
         aida:boundingBox ?box .
      ?box aida:boundingBoxUpperLeftX ?topleftX ;
           aida:boundingBoxUpperLeftY ?topleftY ;
           aida:boundingBoxLowerRightX ?bottomrightX ;
           aida:boundingBoxLowerRightY ?bottomrightY .
    }}
    ",
        node
    )
}

fn image_descriptor_query(node: &str) -> String {
    format!(
        "
    SELECT DISTINCT ?doceid ?topleftX ?topleftY ?bottomrightX ?bottomrightY
    WHERE {{
      {} aida:justifiedBy ?j .
      ?j a aida:ImageJustification ;
         aida:source ?doceid ;
         aida:boundingBox ?box .
      ?box aida:boundingBoxUpperLeftX ?topleftX ;
           aida:boundingBoxUpperLeftY ?topleftY ;
           aida:boundingBoxLowerRightX ?bottomrightX ;
           aida:boundingBoxLowerRightY ?bottomrightY .
    }}
    ",
        node
    )
}

/// `"x,y"` from a pair of coordinate bindings.
fn corner(row: &BindingRow, x: &str, y: &str) -> Result<String> {
    Ok(format!("{},{}", row.value(x)?, row.value(y)?))
}

fn values_of(rows: Vec<BindingRow>, var: &str) -> Result<Vec<String>> {
    rows.iter().map(|row| row.value(var).map(str::to_string)).collect()
}

/// Group rows by `?p`, collecting the `value_var` bindings per predicate.
fn group_by_predicate(rows: Vec<BindingRow>, value_var: &str) -> Result<PredicateGroups> {
    let mut groups = PredicateGroups::new();
    for row in &rows {
        groups
            .entry(row.value("p")?.to_string())
            .or_default()
            .push(row.value(value_var)?.to_string());
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::querying::BindingValue;

    #[test]
    fn test_group_by_predicate_keeps_first_seen_order() {
        let row = |p: &str, o: &str| {
            BindingRow::new().with("p", BindingValue::uri(p)).with("o", BindingValue::uri(o))
        };
        let rows = vec![
            row("http://x#hasTime", "T1"),
            row("http://x#hasAgent", "E1"),
            row("http://x#hasTime", "T2"),
            row("http://x#hasAgent", "E2"),
        ];
        let groups = group_by_predicate(rows, "o").unwrap();
        let keys: Vec<&String> = groups.keys().collect();
        assert_eq!(keys, ["http://x#hasTime", "http://x#hasAgent"]);
        assert_eq!(groups["http://x#hasAgent"], ["E1", "E2"]);
        assert_eq!(groups["http://x#hasTime"], ["T1", "T2"]);
    }

    #[test]
    fn test_corner_formatting() {
        let row = BindingRow::new()
            .with("x", BindingValue::literal("10"))
            .with("y", BindingValue::literal("20"));
        assert_eq!(corner(&row, "x", "y").unwrap(), "10,20");
        assert!(corner(&row, "x", "z").is_err());
    }

    #[test]
    fn test_statement_subject_names() {
        let names: Vec<&str> = StatementSubject::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, ["Event", "Relation"]);
    }
}
