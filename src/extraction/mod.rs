//! Extraction of graph queries from an AIDA knowledge base

pub mod builder;
pub mod extractor;

pub use builder::GraphQueryBuilder;
pub use extractor::{KnowledgeGraphExtractor, PredicateGroups, StatementSubject};
