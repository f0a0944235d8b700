//! Error types for the SKOS glossary.

use thiserror::Error;

/// Result type alias using the glossary's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for glossary operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The triple store is not reachable or not configured
    #[error("Store error: {0}")]
    Store(String),

    /// A SPARQL query failed to execute; carries the originating query text
    #[error("Query error: {message}")]
    Query { message: String, query: String },

    /// Invalid input (malformed URI, bad language code, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_store() {
        let err = Error::Store("endpoint unreachable".to_string());
        assert_eq!(err.to_string(), "Store error: endpoint unreachable");
    }

    #[test]
    fn test_error_display_query_hides_query_text() {
        let err = Error::Query {
            message: "parse error".to_string(),
            query: "SELECT * WHERE { ?s ?p ?o }".to_string(),
        };
        // The query text is carried for logging but kept out of Display.
        assert_eq!(err.to_string(), "Query error: parse error");
    }

    #[test]
    fn test_error_display_invalid_input() {
        let err = Error::InvalidInput("not an absolute URI".to_string());
        assert_eq!(err.to_string(), "Invalid input: not an absolute URI");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }
}
