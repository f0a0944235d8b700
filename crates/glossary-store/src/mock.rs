//! Mock SPARQL client for deterministic testing.
//!
//! Canned rows are registered against a query substring; the first
//! registered needle contained in an executed query wins. Unmatched
//! queries return no rows. Failures can be injected per needle to test
//! the degradation paths.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use glossary_store::mock::MockSparqlClient;
//! use glossary_core::RdfTerm;
//!
//! let store = MockSparqlClient::new().with_rows(
//!     "skos:altLabel",
//!     vec![MockSparqlClient::row(&[
//!         ("concept", RdfTerm::Uri("http://example.com/c1".into())),
//!         ("label", RdfTerm::lang_literal("Cat", "en")),
//!     ])],
//! );
//! ```

use std::sync::Mutex;

use async_trait::async_trait;

use glossary_core::{Error, RdfTerm, Result, SelectRow, SparqlClient};

/// Deterministic in-memory stand-in for a SPARQL endpoint.
pub struct MockSparqlClient {
    responses: Vec<(String, Vec<SelectRow>)>,
    failures: Vec<String>,
    available: bool,
    queries: Mutex<Vec<String>>,
}

impl Default for MockSparqlClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSparqlClient {
    pub fn new() -> Self {
        Self {
            responses: Vec::new(),
            failures: Vec::new(),
            available: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Register canned rows for queries containing `needle`.
    pub fn with_rows(mut self, needle: impl Into<String>, rows: Vec<SelectRow>) -> Self {
        self.responses.push((needle.into(), rows));
        self
    }

    /// Fail queries containing `needle` with a query error.
    pub fn with_failure(mut self, needle: impl Into<String>) -> Self {
        self.failures.push(needle.into());
        self
    }

    /// Report the endpoint as unreachable.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Convenience row constructor for fixtures.
    pub fn row(bindings: &[(&str, RdfTerm)]) -> SelectRow {
        let mut row = SelectRow::new();
        for (var, term) in bindings {
            row.insert(*var, term.clone());
        }
        row
    }

    /// Queries executed so far, in order.
    pub fn executed_queries(&self) -> Vec<String> {
        self.queries.lock().expect("mock lock poisoned").clone()
    }
}

#[async_trait]
impl SparqlClient for MockSparqlClient {
    async fn select(&self, query: &str) -> Result<Vec<SelectRow>> {
        self.queries
            .lock()
            .expect("mock lock poisoned")
            .push(query.to_string());

        if let Some(needle) = self.failures.iter().find(|n| query.contains(n.as_str())) {
            return Err(Error::Query {
                message: format!("injected failure for {needle:?}"),
                query: query.to_string(),
            });
        }

        Ok(self
            .responses
            .iter()
            .find(|(needle, _)| query.contains(needle.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }

    async fn ping(&self) -> bool {
        self.available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_matches_first_needle() {
        let store = MockSparqlClient::new()
            .with_rows(
                "skos:Concept",
                vec![MockSparqlClient::row(&[(
                    "concept",
                    RdfTerm::Uri("http://example.com/c1".to_string()),
                )])],
            )
            .with_rows("skos:ConceptScheme", vec![]);

        let rows = store.select("SELECT ... ?c a skos:Concept ...").await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(store.executed_queries().len(), 1);
    }

    #[tokio::test]
    async fn test_mock_injected_failure() {
        let store = MockSparqlClient::new().with_failure("skos:broader");
        let err = store.select("... skos:broader ...").await.unwrap_err();
        match err {
            Error::Query { query, .. } => assert!(query.contains("skos:broader")),
            _ => panic!("Expected Query error"),
        }
    }

    #[tokio::test]
    async fn test_mock_unmatched_query_is_empty() {
        let store = MockSparqlClient::new();
        assert!(store.select("SELECT * WHERE {}").await.unwrap().is_empty());
    }
}
