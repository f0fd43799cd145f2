//! Oxigraph-backed query executor.
//!
//! Loads an AIDA knowledge base (Turtle) into an in-process Oxigraph store and
//! answers extractor queries from it, producing the same binding rows a remote
//! endpoint would return in its SPARQL JSON results.
//!
//! # Example
//!
//! ```ignore
//! use aida_query::querying::{OxigraphExecutor, QueryExecutor};
//!
//! let executor = OxigraphExecutor::from_turtle_file("kb/doc1.ttl")?;
//! let rows = executor.select("SELECT DISTINCT ?event WHERE { ?event a aida:Event }")?;
//! for row in rows {
//!     println!("event: {}", row.value("event")?);
//! }
//! ```

use super::{BindingRow, BindingValue, QueryExecutor};
use crate::error::{Error, Result};
use oxigraph::io::RdfFormat;
use oxigraph::model::vocab::{rdf, xsd};
use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

pub struct OxigraphExecutor {
    store: Store,
}

impl OxigraphExecutor {
    /// Wrap an existing store.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Create an executor over Turtle data read from `reader`.
    pub fn from_turtle_reader(reader: impl Read) -> Result<Self> {
        let store = Store::new()?;
        store.load_from_reader(RdfFormat::Turtle, reader)?;
        Ok(Self { store })
    }

    pub fn from_turtle_str(data: &str) -> Result<Self> {
        Self::from_turtle_reader(data.as_bytes())
    }

    pub fn from_turtle_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let executor = Self::from_turtle_reader(BufReader::new(File::open(path)?))?;
        info!(path = %path.display(), quads = executor.len()?, "loaded knowledge base");
        Ok(executor)
    }

    /// Number of quads in the underlying store.
    pub fn len(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.is_empty()?)
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl QueryExecutor for OxigraphExecutor {
    fn execute_select(&self, query: &str) -> Result<Vec<BindingRow>> {
        debug!(query, "executing on in-process store");

        let parsed_query = SparqlEvaluator::new()
            .parse_query(query)
            .map_err(|e| Error::Store(e.to_string()))?;
        let results = parsed_query.on_store(&self.store).execute()?;

        let mut rows = Vec::new();

        // ASK and CONSTRUCT results carry no bindings
        if let QueryResults::Solutions(solutions) = results {
            for solution in solutions {
                let solution = solution?;
                let mut row = BindingRow::new();
                for (var, term) in solution.iter() {
                    row.0.insert(var.as_str().to_string(), binding_value(term));
                }
                rows.push(row);
            }
        }

        Ok(rows)
    }
}

/// Convert a term into its SPARQL JSON results representation.
fn binding_value(term: &Term) -> BindingValue {
    match term {
        Term::NamedNode(node) => BindingValue::uri(node.as_str()),
        Term::BlankNode(node) => BindingValue {
            kind: "bnode".to_string(),
            value: node.as_str().to_string(),
            datatype: None,
            lang: None,
        },
        Term::Literal(literal) => {
            let datatype = literal.datatype();
            BindingValue {
                kind: "literal".to_string(),
                value: literal.value().to_string(),
                datatype: (datatype != xsd::STRING && datatype != rdf::LANG_STRING)
                    .then(|| datatype.as_str().to_string()),
                lang: literal.language().map(str::to_string),
            }
        }
        #[allow(unreachable_patterns)]
        other => BindingValue {
            kind: "triple".to_string(),
            value: other.to_string(),
            datatype: None,
            lang: None,
        },
    }
}
