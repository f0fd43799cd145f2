//! Error types for extraction and codec operations

use thiserror::Error;

/// Result type alias for graph query operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for graph query operations
#[derive(Error, Debug)]
pub enum Error {
    /// Network or endpoint failure while executing a query
    #[error("Transport error: {0}")]
    Transport(String),

    /// In-process store failure (loading or evaluation)
    #[error("Store error: {0}")]
    Store(String),

    /// A lookup that requires at least one binding found none
    #[error("No {lookup} found for <{uri}>")]
    EmptyResult { lookup: &'static str, uri: String },

    /// A result row lacks a projected variable
    #[error("Binding for ?{0} missing from result row")]
    MissingBinding(String),

    /// URI rejected before being interpolated into a query
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// XML emission or parsing failure
    #[error("XML error: {0}")]
    Xml(String),

    /// XML document does not have the graph query shape
    #[error("Malformed query document: {0}")]
    MalformedQuery(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Byte payload is not valid UTF-8
    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}

impl From<oxigraph::store::StorageError> for Error {
    fn from(err: oxigraph::store::StorageError) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<oxigraph::store::LoaderError> for Error {
    fn from(err: oxigraph::store::LoaderError) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<oxigraph::sparql::QueryEvaluationError> for Error {
    fn from(err: oxigraph::sparql::QueryEvaluationError) -> Self {
        Error::Store(err.to_string())
    }
}

impl From<oxigraph::model::IriParseError> for Error {
    fn from(err: oxigraph::model::IriParseError) -> Self {
        Error::InvalidUri(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");
    }

    #[test]
    fn test_empty_result_display() {
        let err = Error::EmptyResult {
            lookup: "entity type",
            uri: "http://example.org/e1".to_string(),
        };
        assert_eq!(err.to_string(), "No entity type found for <http://example.org/e1>");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
