//! SPARQL 1.1 Protocol client over HTTP.
//!
//! Queries are POSTed form-encoded and results parsed from the W3C SPARQL
//! Query Results JSON Format into [`SelectRow`]s.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use glossary_core::{defaults, Error, RdfTerm, Result, SelectRow, SparqlClient};

/// Media type of the SPARQL JSON results format.
const RESULTS_JSON: &str = "application/sparql-results+json";

/// HTTP client for one SPARQL endpoint.
pub struct SparqlEndpointClient {
    client: Client,
    endpoint: String,
}

impl SparqlEndpointClient {
    /// Create a client with the default query timeout.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(
            endpoint,
            Duration::from_secs(defaults::QUERY_TIMEOUT_SECS),
        )
    }

    /// Create a client with a custom query timeout.
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute(&self, query: &str) -> Result<SparqlResultsJson> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::ACCEPT, RESULTS_JSON)
            .form(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Query {
                message: format!("endpoint returned {status}: {}", body.trim()),
                query: query.to_string(),
            });
        }

        response
            .json::<SparqlResultsJson>()
            .await
            .map_err(|e| Error::Query {
                message: format!("malformed results document: {e}"),
                query: query.to_string(),
            })
    }
}

#[async_trait]
impl SparqlClient for SparqlEndpointClient {
    async fn select(&self, query: &str) -> Result<Vec<SelectRow>> {
        let start = Instant::now();
        trace!(
            subsystem = "store",
            component = "sparql_client",
            op = "select",
            query = query,
            "Executing SELECT"
        );

        let document = self.execute(query).await?;
        let rows: Vec<SelectRow> = document
            .results
            .map(|r| r.bindings.into_iter().map(binding_to_row).collect())
            .unwrap_or_default();

        debug!(
            subsystem = "store",
            component = "sparql_client",
            op = "select",
            row_count = rows.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "SELECT complete"
        );
        Ok(rows)
    }

    async fn ping(&self) -> bool {
        match self.execute("ASK {}").await {
            Ok(document) => document.boolean.is_some(),
            Err(e) => {
                warn!(
                    subsystem = "store",
                    component = "sparql_client",
                    op = "ping",
                    error = %e,
                    "Endpoint unreachable"
                );
                false
            }
        }
    }
}

// =============================================================================
// W3C SPARQL QUERY RESULTS JSON FORMAT
// =============================================================================

#[derive(Debug, Deserialize)]
struct SparqlResultsJson {
    #[allow(dead_code)]
    head: Option<serde_json::Value>,
    results: Option<ResultsSection>,
    boolean: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct ResultsSection {
    bindings: Vec<std::collections::HashMap<String, JsonTerm>>,
}

#[derive(Debug, Deserialize)]
struct JsonTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
    #[serde(rename = "xml:lang")]
    lang: Option<String>,
    datatype: Option<String>,
}

fn binding_to_row(binding: std::collections::HashMap<String, JsonTerm>) -> SelectRow {
    let mut row = SelectRow::new();
    for (var, term) in binding {
        let term = match term.kind.as_str() {
            // Blank nodes are resources too; label them with the _: prefix.
            "uri" => RdfTerm::Uri(term.value),
            "bnode" => RdfTerm::Uri(format!("_:{}", term.value)),
            _ => RdfTerm::Literal {
                value: term.value,
                lang: term.lang,
                datatype: term.datatype,
            },
        };
        row.insert(var, term);
    }
    row
}
