//! # aida-query
//!
//! Extraction of graph queries from AIDA knowledge bases.
//!
//! Events and relations in an AIDA triple store are connected to entities by
//! reified `rdf:Statement`s. This crate walks those statements over SPARQL,
//! collects the role edges of an event together with the multi-modal
//! descriptors (names, text spans, video keyframe and image boxes) that
//! justify its entities, and assembles them into a canonical
//! [`GraphQuery`](core::GraphQuery) that a graph-matching engine consumes.
//! Graph queries travel as JSON or XML.
//!
//! ## Pipeline
//!
//! - [`querying`]: executors (remote endpoint, in-process Oxigraph) and
//!   filter clauses
//! - [`extraction`]: the knowledge-graph extractor and graph query builder
//! - [`core`]: canonical data model, namespace stripping, descriptor sampling
//! - [`codec`]: XML encoding and pretty-printing / file output
//!
//! ## Example
//!
//! ```ignore
//! use aida_query::extraction::{GraphQueryBuilder, KnowledgeGraphExtractor};
//! use aida_query::querying::OxigraphExecutor;
//! use aida_query::codec::Payload;
//!
//! let extractor = KnowledgeGraphExtractor::new(OxigraphExecutor::from_turtle_file("doc1.ttl")?);
//! for event in extractor.list_event_uris()? {
//!     let query = GraphQueryBuilder::new(&extractor).build(&event)?;
//!     Payload::json(&query)?.pretty_print()?;
//! }
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::return_self_not_must_use)]

/// Configuration structures and utilities
pub mod config;

/// Canonical graph query data structures
pub mod core;

/// JSON/XML serialization and payload output
pub mod codec;

/// Knowledge-graph traversal
pub mod extraction;

/// SPARQL execution and query building helpers
pub mod querying;

pub mod error;

// Re-export commonly used types
pub use crate::config::{EndpointConfig, StoreKind};
pub use crate::core::{Edge, EntryPoint, GraphQuery};
pub use crate::error::{Error, Result};
