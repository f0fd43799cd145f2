//! Configuration for SPARQL endpoint access

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Endpoint used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3030/aida/";

/// Default transport timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Flavour of SPARQL protocol server behind an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// Apache Jena Fuseki, form-encoded `query=` / `update=` parameters
    #[default]
    Jena,
    /// Oxigraph server, query text sent as the request body
    Oxigraph,
}

impl StoreKind {
    pub fn from_string(kind: &str) -> Option<StoreKind> {
        match kind.to_lowercase().as_str() {
            "jena" | "fuseki" => Some(StoreKind::Jena),
            "oxigraph" => Some(StoreKind::Oxigraph),
            _ => None,
        }
    }
}

/// Configuration for a SPARQL endpoint.
///
/// The `url` is the dataset base; read queries are sent to `<url>/query` and
/// updates to `<url>/update`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub url: String,
    pub store: StoreKind,
    pub auth_token: Option<String>,
    pub timeout_secs: u64,
}

impl EndpointConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            store: StoreKind::default(),
            auth_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: EndpointConfig = serde_json::from_str(&raw)?;
        if config.url.trim().is_empty() {
            return Err(Error::Config(format!("{} does not set an endpoint url", path.display())));
        }
        Ok(config)
    }

    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }

    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn query_url(&self) -> String {
        format!("{}/query", self.url.trim_end_matches('/'))
    }

    pub fn update_url(&self) -> String {
        format!("{}/update", self.url.trim_end_matches('/'))
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_creation() {
        let config = EndpointConfig::new("http://localhost:3030/dataset/");
        assert_eq!(config.store, StoreKind::Jena);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn test_query_and_update_urls() {
        let config = EndpointConfig::new("http://localhost:3030/dataset/");
        assert_eq!(config.query_url(), "http://localhost:3030/dataset/query");
        assert_eq!(config.update_url(), "http://localhost:3030/dataset/update");

        let config = EndpointConfig::new("http://localhost:7878");
        assert_eq!(config.query_url(), "http://localhost:7878/query");
    }

    #[test]
    fn test_store_kind_from_string() {
        assert_eq!(StoreKind::from_string("Fuseki"), Some(StoreKind::Jena));
        assert_eq!(StoreKind::from_string("oxigraph"), Some(StoreKind::Oxigraph));
        assert_eq!(StoreKind::from_string("virtuoso"), None);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EndpointConfig =
            serde_json::from_str(r#"{"url": "http://kb:3030/rpi/", "store": "oxigraph"}"#)
                .unwrap();
        assert_eq!(config.store, StoreKind::Oxigraph);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
