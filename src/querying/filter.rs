//! Exclusion filters and URI validation for query templates.

use super::LDC_ONT_NS;
use crate::error::Result;
use oxigraph::model::NamedNode;
use std::collections::BTreeSet;

/// Set of predicates, objects or subjects to leave out of a traversal.
///
/// Ordered so the emitted filter clause is deterministic.
pub type ExclusionSet = BTreeSet<String>;

/// Validate `uri` and render it as a SPARQL IRI reference (`<uri>`).
pub fn iri_ref(uri: &str) -> Result<String> {
    let node = NamedNode::new(uri)?;
    Ok(format!("<{}>", node.as_str()))
}

/// Build a `FILTER(?var NOT IN (...))` clause.
///
/// Values starting with `http` are taken as full URIs; anything else is a
/// local name in the LDC ontology namespace. An empty set yields an empty
/// string, so no clause is emitted at all.
pub fn exclusion_filter(variable: &str, excluded: &ExclusionSet) -> Result<String> {
    if excluded.is_empty() {
        return Ok(String::new());
    }

    let variable = if variable.starts_with('?') {
        variable.to_string()
    } else {
        format!("?{}", variable)
    };

    let refs = excluded
        .iter()
        .map(|ex| {
            if ex.starts_with("http") {
                iri_ref(ex)
            } else {
                iri_ref(&format!("{}{}", LDC_ONT_NS, ex))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(format!("FILTER({} NOT IN ({}))", variable, refs.join(", ")))
}
