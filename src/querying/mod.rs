//! SPARQL query execution against an AIDA knowledge base.
//!
//! Every query issued by the extractor goes through a [`QueryExecutor`]. The
//! executor prepends the namespace prefix block, runs the query and hands back
//! the `bindings` array of a SPARQL 1.1 JSON result document.

pub mod filter;
pub mod http_client;
pub mod oxigraph_adapter;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use filter::{exclusion_filter, iri_ref, ExclusionSet};
pub use http_client::HttpQueryExecutor;
pub use oxigraph_adapter::OxigraphExecutor;

/// AIDA interchange ontology namespace.
pub const AIDA_NS: &str = "https://tac.nist.gov/tracks/SM-KBP/2018/ontologies/InterchangeOntology#";
/// LDC seedling ontology namespace, used to resolve bare excluded names.
pub const LDC_ONT_NS: &str = "https://tac.nist.gov/tracks/SM-KBP/2018/ontologies/SeedlingOntology#";
pub const RDF_NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Prefix block prepended to every query body.
pub const PREFIXES: &str = "
PREFIX aida: <https://tac.nist.gov/tracks/SM-KBP/2018/ontologies/InterchangeOntology#>
PREFIX skos: <http://www.w3.org/2004/02/skos/core#>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX ldcOnt: <https://tac.nist.gov/tracks/SM-KBP/2018/ontologies/SeedlingOntology#>
";

/// Prepend the namespace prefix block to a query body.
pub fn prefixed(query_body: &str) -> String {
    format!("{}{}", PREFIXES, query_body)
}

/// One bound term in a result row, in SPARQL JSON results shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingValue {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
}

impl BindingValue {
    pub fn uri(value: impl Into<String>) -> Self {
        Self { kind: "uri".to_string(), value: value.into(), datatype: None, lang: None }
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Self { kind: "literal".to_string(), value: value.into(), datatype: None, lang: None }
    }
}

/// A single solution: variable name to bound term.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingRow(pub HashMap<String, BindingValue>);

impl BindingRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, var: &str, value: BindingValue) -> Self {
        self.0.insert(var.to_string(), value);
        self
    }

    pub fn get(&self, var: &str) -> Option<&BindingValue> {
        self.0.get(var)
    }

    /// Lexical value bound to `var`, failing if the variable is unbound.
    pub fn value(&self, var: &str) -> Result<&str> {
        self.0
            .get(var)
            .map(|b| b.value.as_str())
            .ok_or_else(|| Error::MissingBinding(var.to_string()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// SPARQL 1.1 JSON results document. Only the parts the extractor reads.
#[derive(Debug, Default, Deserialize)]
pub struct SparqlJsonResults {
    #[serde(default)]
    pub results: Option<ResultSet>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub bindings: Option<Vec<BindingRow>>,
}

impl SparqlJsonResults {
    /// The bindings array, empty when `results` or `bindings` is absent.
    pub fn into_bindings(self) -> Vec<BindingRow> {
        self.results.and_then(|r| r.bindings).unwrap_or_default()
    }
}

/// Executes SELECT queries and returns their binding rows.
///
/// Implementors only provide [`execute_select`](QueryExecutor::execute_select),
/// which receives the complete query text. Callers use
/// [`select`](QueryExecutor::select) with a bare body.
pub trait QueryExecutor {
    fn execute_select(&self, query: &str) -> Result<Vec<BindingRow>>;

    fn select(&self, query_body: &str) -> Result<Vec<BindingRow>> {
        self.execute_select(&prefixed(query_body))
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    fn execute_select(&self, query: &str) -> Result<Vec<BindingRow>> {
        (**self).execute_select(query)
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    fn execute_select(&self, query: &str) -> Result<Vec<BindingRow>> {
        (**self).execute_select(query)
    }
}
