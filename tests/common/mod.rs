//! Shared test helpers

#![allow(dead_code)]

use aida_query::error::{Error, Result};
use aida_query::extraction::KnowledgeGraphExtractor;
use aida_query::querying::{BindingRow, ExclusionSet, OxigraphExecutor, QueryExecutor};
use std::cell::RefCell;
use std::collections::VecDeque;

pub const LDC: &str = "https://tac.nist.gov/tracks/SM-KBP/2018/ontologies/SeedlingOntology#";
pub const EVENTS: &str = "http://www.isi.edu/gaia/events/";
pub const RELATIONS: &str = "http://www.isi.edu/gaia/relations/";
pub const ENTITIES: &str = "http://www.isi.edu/gaia/entities/";

pub fn ldc(local: &str) -> String {
    format!("{}{}", LDC, local)
}

pub fn event(local: &str) -> String {
    format!("{}{}", EVENTS, local)
}

pub fn relation(local: &str) -> String {
    format!("{}{}", RELATIONS, local)
}

pub fn entity(local: &str) -> String {
    format!("{}{}", ENTITIES, local)
}

pub fn set(items: &[&str]) -> ExclusionSet {
    items.iter().map(|s| s.to_string()).collect()
}

/// Extractor over the fixture knowledge base.
pub fn fixture_extractor() -> KnowledgeGraphExtractor<OxigraphExecutor> {
    let executor = OxigraphExecutor::from_turtle_str(include_str!("../fixtures/aida_kb.ttl"))
        .expect("fixture should load");
    KnowledgeGraphExtractor::new(executor)
}

pub fn sorted(mut values: Vec<String>) -> Vec<String> {
    values.sort();
    values
}

/// Executor that answers from a queue of canned responses and records every
/// query it receives.
#[derive(Default)]
pub struct ScriptedExecutor {
    responses: RefCell<VecDeque<Result<Vec<BindingRow>>>>,
    pub queries: RefCell<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, rows: Vec<BindingRow>) -> Self {
        self.responses.borrow_mut().push_back(Ok(rows));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses.borrow_mut().push_back(Err(Error::Transport(message.to_string())));
        self
    }

    pub fn query(&self, idx: usize) -> String {
        self.queries.borrow()[idx].clone()
    }
}

impl QueryExecutor for ScriptedExecutor {
    fn execute_select(&self, query: &str) -> Result<Vec<BindingRow>> {
        self.queries.borrow_mut().push(query.to_string());
        self.responses.borrow_mut().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}
