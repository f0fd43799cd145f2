//! Blocking HTTP executor for remote SPARQL endpoints (Apache Jena Fuseki, Oxigraph server).

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::time::Duration;
use tracing::debug;

use super::{BindingRow, QueryExecutor, SparqlJsonResults};
use crate::config::{EndpointConfig, StoreKind};
use crate::error::{Error, Result};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Executor backed by a SPARQL protocol endpoint.
///
/// Holds one pooled client used for both the read and the update context.
/// No retries are attempted; every failure surfaces as [`Error::Transport`].
pub struct HttpQueryExecutor {
    endpoint: EndpointConfig,
    client: Client,
}

impl HttpQueryExecutor {
    pub fn new(endpoint: EndpointConfig) -> Result<HttpQueryExecutor> {
        let client = Client::builder()
            .timeout(Duration::from_secs(endpoint.timeout_secs))
            .build()
            .map_err(|e| Error::Transport(e.to_string()))?;

        Ok(HttpQueryExecutor { endpoint, client })
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    /// Execute a SPARQL update. Not used by the extraction path.
    pub fn update(&self, sparql_update: &str) -> Result<()> {
        let request = self.add_auth_header(self.client.post(self.endpoint.update_url()));

        let request = match self.endpoint.store {
            StoreKind::Jena => request.form(&[("update", sparql_update)]),
            StoreKind::Oxigraph => request
                .header(CONTENT_TYPE, "application/sparql-update")
                .body(sparql_update.to_string()),
        };

        check_status(request.send()?, "Update")?;
        Ok(())
    }

    fn add_auth_header(&self, request: RequestBuilder) -> RequestBuilder {
        if let Some(token) = &self.endpoint.auth_token {
            request.bearer_auth(token)
        } else {
            request
        }
    }
}

impl QueryExecutor for HttpQueryExecutor {
    fn execute_select(&self, query: &str) -> Result<Vec<BindingRow>> {
        let url = self.endpoint.query_url();
        debug!(%url, "issuing SPARQL query");

        let request = self.add_auth_header(self.client.post(&url)).header(ACCEPT, SPARQL_RESULTS_JSON);

        let request = match self.endpoint.store {
            // Fuseki takes the query as a form-encoded parameter
            StoreKind::Jena => request.form(&[("query", query)]),
            StoreKind::Oxigraph => request
                .header(CONTENT_TYPE, "application/sparql-query")
                .body(query.to_string()),
        };

        let response = check_status(request.send()?, "Query")?;
        let results: SparqlJsonResults = response.json()?;
        let rows = results.into_bindings();
        debug!(rows = rows.len(), "query answered");
        Ok(rows)
    }
}

fn check_status(response: Response, action: &str) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let error_body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
    Err(Error::Transport(format!("{} failed with status {}: {}", action, status, error_body)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_creation() {
        let endpoint = EndpointConfig::new("http://localhost:3030/dataset/");
        let executor = HttpQueryExecutor::new(endpoint).unwrap();
        assert_eq!(executor.endpoint().query_url(), "http://localhost:3030/dataset/query");
    }

    #[test]
    fn test_unreachable_endpoint_is_transport_error() {
        // Nothing listens on the discard port locally
        let endpoint = EndpointConfig::new("http://127.0.0.1:9/kb/").with_timeout_secs(2);
        let executor = HttpQueryExecutor::new(endpoint).unwrap();
        let err = executor.select("SELECT ?s WHERE { ?s ?p ?o }").unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
