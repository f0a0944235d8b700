//! Trait definitions for the store boundary and the extension points.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::error::Result;
use crate::rdf::SelectRow;

/// Definitions contributed by related-resource providers, keyed by match
/// type. Values are provider-shaped JSON blocks.
pub type ExternalDefinitions = BTreeMap<String, serde_json::Value>;

/// The store query interface consumed by the glossary.
///
/// Implementations execute a SPARQL SELECT against the triple store and
/// return the bound rows. Failures surface as errors; the glossary layer
/// decides per operation whether to degrade or to propagate.
#[async_trait]
pub trait SparqlClient: Send + Sync {
    /// Execute a SELECT query and materialize all result rows.
    async fn select(&self, query: &str) -> Result<Vec<SelectRow>>;

    /// Probe endpoint reachability. Never errors; unreachable is `false`.
    async fn ping(&self) -> bool;
}

/// Extension point contributing external definitions to a concept detail
/// view (e.g. links into other datasets).
///
/// Registered providers are invoked in registration order once per
/// `get_concept` call; each may contribute a keyed definitions block, and
/// the blocks are merged (later providers win on key collisions). A
/// provider error is logged and skipped, never failing the lookup.
#[async_trait]
pub trait RelatedResourceProvider: Send + Sync {
    async fn provide(
        &self,
        store: &dyn SparqlClient,
        concept_uri: &str,
        language: &str,
    ) -> Result<Option<ExternalDefinitions>>;
}

/// Context handed to list-query alterers.
#[derive(Debug, Clone)]
pub struct ListQueryContext<'a> {
    /// The selected letter, empty for "all concepts".
    pub letter: &'a str,
    /// The language the listing was requested in.
    pub language: &'a str,
    /// The maximum number of items, 0 for unbounded.
    pub limit: usize,
}

/// Extension point rewriting the letter-listing query before execution.
pub trait ListQueryAlter: Send + Sync {
    fn alter(&self, query: &mut String, ctx: &ListQueryContext<'_>);
}
