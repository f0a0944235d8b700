//! The glossary repository: language-aware result shaping over the store.
//!
//! Every public operation issues its store round trips strictly
//! sequentially and materializes the full result set before shaping it.
//! Store failures are caught here and degrade to empty/`None`/`NotFound`
//! results; only the visual-mapper path propagates errors (see
//! [`crate::graph`]).

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use glossary_core::{
    labels, CharacterAvailability, Concept, ConceptDefinitions, ConceptLookup, ConceptStub,
    ConceptSummary, Error, ExternalDefinitions, GlossaryConfig, ListQueryAlter, ListQueryContext,
    PropertyRef, PropertyValue, RelatedConcept, RelationNode, ResourceProperty, ResourceRecord,
    Result, SparqlClient, Suggestion, UrlComposer,
};

use crate::client::SparqlEndpointClient;
use crate::{graph, queries};

/// Namespace → prefix table used to shorten predicate URIs in resource
/// dumps.
const NAMESPACE_PREFIXES: &[(&str, &str)] = &[
    ("http://www.w3.org/1999/02/22-rdf-syntax-ns#", "rdf:"),
    ("http://www.w3.org/2000/01/rdf-schema#", "rdfs:"),
    ("http://purl.org/dc/elements/1.1/", "dc:"),
    ("http://purl.org/dc/terms/", "dcterms:"),
    ("http://dbpedia.org/property/", "dbpedia:"),
    ("http://xmlns.com/foaf/0.1/", "foaf:"),
    ("http://www.geonames.org/ontology#", "geonames:"),
    ("http://www.w3.org/2004/02/skos/core#", "skos:"),
    ("http://www.w3.org/2002/07/owl#", "owl:"),
];

/// Prefixed predicates whose default-language value is promoted to the
/// top-level `name` of a resource dump.
const NAME_PROPERTIES: &[&str] = &["foaf:name", "skos:prefLabel", "dc:title", "geonames:name"];

/// One glossary instance: configuration, store handle, and the registered
/// extension points.
pub struct Glossary {
    config: GlossaryConfig,
    store: Option<Arc<dyn SparqlClient>>,
    providers: Vec<Arc<dyn glossary_core::RelatedResourceProvider>>,
    list_alterers: Vec<Arc<dyn ListQueryAlter>>,
}

impl Glossary {
    /// Create a glossary over the endpoint named in the configuration.
    /// A configuration without an endpoint yields an instance whose read
    /// operations all degrade to empty results.
    pub fn new(config: GlossaryConfig) -> Self {
        let store: Option<Arc<dyn SparqlClient>> = match config.endpoint_url.as_deref() {
            Some(endpoint) => {
                match SparqlEndpointClient::with_timeout(endpoint, config.query_timeout) {
                    Ok(client) => Some(Arc::new(client)),
                    Err(e) => {
                        error!(
                            subsystem = "store",
                            component = "glossary",
                            op = "new",
                            error = %e,
                            "Failed to build store client, operating degraded"
                        );
                        None
                    }
                }
            }
            None => None,
        };
        Self::with_store_option(config, store)
    }

    /// Create a glossary over an externally built store handle (used by
    /// tests and by embedders with their own client).
    pub fn with_store(config: GlossaryConfig, store: Arc<dyn SparqlClient>) -> Self {
        Self::with_store_option(config, Some(store))
    }

    fn with_store_option(config: GlossaryConfig, store: Option<Arc<dyn SparqlClient>>) -> Self {
        info!(
            subsystem = "store",
            component = "glossary",
            op = "new",
            endpoint = config.endpoint_url.as_deref().unwrap_or("-"),
            language = config.default_language(),
            "Glossary instance created"
        );
        Self {
            config,
            store,
            providers: Vec::new(),
            list_alterers: Vec::new(),
        }
    }

    pub fn config(&self) -> &GlossaryConfig {
        &self.config
    }

    /// Register a related-resource provider; invoked in registration order
    /// on every concept detail lookup.
    pub fn register_provider(
        &mut self,
        provider: Arc<dyn glossary_core::RelatedResourceProvider>,
    ) {
        self.providers.push(provider);
    }

    /// Register a listing-query alterer; invoked in registration order
    /// before every listing query executes.
    pub fn register_list_alterer(&mut self, alterer: Arc<dyn ListQueryAlter>) {
        self.list_alterers.push(alterer);
    }

    /// Whether the store is configured and reachable.
    pub async fn available(&self) -> bool {
        match &self.store {
            Some(store) => store.ping().await,
            None => false,
        }
    }

    fn language_or_default<'a>(&'a self, language: &'a str) -> &'a str {
        if language.is_empty() {
            self.config.default_language()
        } else {
            language
        }
    }

    fn url_composer(&self) -> UrlComposer<'_> {
        UrlComposer::new(&self.config)
    }

    /// Log a query failure. Message and originating query text both go to
    /// the operational log; callers degrade afterwards.
    fn log_query_error(&self, op: &str, err: &Error) {
        match err {
            Error::Query { message, query } => error!(
                subsystem = "store",
                component = "glossary",
                op = op,
                error = message.as_str(),
                query = query.as_str(),
                "Query failed"
            ),
            other => error!(
                subsystem = "store",
                component = "glossary",
                op = op,
                error = %other,
                "Query failed"
            ),
        }
    }

    // =========================================================================
    // AUTOCOMPLETE
    // =========================================================================

    /// Suggestions for an autocomplete field.
    ///
    /// Suggestions whose display label starts with the search term precede
    /// those matching it elsewhere; each group is sorted case-insensitively.
    /// Empty input or an unavailable store yields an empty list; a query
    /// failure is logged and yields an empty list.
    pub async fn autocomplete(&self, term: &str, limit: usize, language: &str) -> Vec<Suggestion> {
        let Some(store) = &self.store else {
            return Vec::new();
        };
        if term.is_empty() {
            return Vec::new();
        }
        let language = self.language_or_default(language);

        let query = match queries::autocomplete(term, language, limit) {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    subsystem = "store",
                    component = "glossary",
                    op = "autocomplete",
                    error = %e,
                    "Rejected autocomplete input"
                );
                return Vec::new();
            }
        };

        let start = Instant::now();
        let rows = match store.select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                self.log_query_error("autocomplete", &e);
                return Vec::new();
            }
        };

        let composer = self.url_composer();
        let term_lower = term.to_lowercase();
        let mut starting: Vec<Suggestion> = Vec::new();
        let mut containing: Vec<Suggestion> = Vec::new();
        for row in &rows {
            let (Some(uri), Some(label), Some(pref_label)) =
                (row.uri("concept"), row.value("label"), row.value("prefLabel"))
            else {
                continue;
            };
            let label = labels::normalize_label(label);
            let pref_label = labels::normalize_label(pref_label);
            let display = if label == pref_label {
                label
            } else {
                format!("{label} ({pref_label})")
            };
            let suggestion = Suggestion {
                url: composer.compose(uri, &pref_label, language),
                label: display,
            };
            match suggestion.label.to_lowercase().find(&term_lower) {
                Some(position) if position > 0 => containing.push(suggestion),
                _ => starting.push(suggestion),
            }
        }

        starting.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        containing.sort_by(|a, b| a.label.to_lowercase().cmp(&b.label.to_lowercase()));
        starting.extend(containing);

        debug!(
            subsystem = "store",
            component = "glossary",
            op = "autocomplete",
            search_term = term,
            language = language,
            result_count = starting.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Autocomplete complete"
        );
        starting
    }

    // =========================================================================
    // LISTING
    // =========================================================================

    /// Alphabetic concept listing.
    ///
    /// An empty letter lists all concepts; a limit of 0 is unbounded. Two
    /// concepts adjacent in store-result order sharing a case-insensitive
    /// preferred label under different URIs both get `multiple = true`. The
    /// final list is sorted case-insensitively by preferred label.
    pub async fn get_list(&self, letter: &str, language: &str, limit: usize) -> Vec<ConceptSummary> {
        let Some(store) = &self.store else {
            return Vec::new();
        };
        let language = self.language_or_default(language);

        let mut query = match queries::list_by_letter(letter, language, limit) {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    subsystem = "store",
                    component = "glossary",
                    op = "get_list",
                    error = %e,
                    "Rejected listing input"
                );
                return Vec::new();
            }
        };

        // Registered alterers may rewrite the listing query before it runs.
        let ctx = ListQueryContext {
            letter,
            language,
            limit,
        };
        for alterer in &self.list_alterers {
            alterer.alter(&mut query, &ctx);
        }

        let rows = match store.select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                self.log_query_error("get_list", &e);
                return Vec::new();
            }
        };

        let composer = self.url_composer();
        let mut concepts: Vec<ConceptSummary> = Vec::new();
        let mut index_by_uri: HashMap<String, usize> = HashMap::new();
        let mut previous: Option<(String, String)> = None;
        for row in &rows {
            let (Some(uri), Some(raw_label)) = (row.uri("concept"), row.value("prefLabel")) else {
                continue;
            };

            let index = match index_by_uri.get(uri) {
                Some(index) => *index,
                None => {
                    concepts.push(ConceptSummary {
                        uri: uri.to_string(),
                        pref_label: labels::normalize_label(raw_label),
                        url: composer.compose(uri, raw_label, language),
                        broader: Vec::new(),
                        multiple: false,
                    });
                    index_by_uri.insert(uri.to_string(), concepts.len() - 1);
                    concepts.len() - 1
                }
            };
            if let Some(broader_label) = row.value("broaderLabel") {
                concepts[index].broader.push(broader_label.to_string());
            }

            // Disambiguation depends on store-result order: adjacent rows
            // with equal labels under different URIs flag both concepts.
            if let Some((previous_uri, previous_label)) = &previous {
                if previous_uri != uri
                    && raw_label.to_lowercase() == previous_label.to_lowercase()
                {
                    concepts[index].multiple = true;
                    if let Some(previous_index) = index_by_uri.get(previous_uri) {
                        concepts[*previous_index].multiple = true;
                    }
                }
            }
            previous = Some((uri.to_string(), raw_label.to_string()));
        }

        concepts.sort_by(|a, b| a.pref_label.to_lowercase().cmp(&b.pref_label.to_lowercase()));

        debug!(
            subsystem = "store",
            component = "glossary",
            op = "get_list",
            letter = letter,
            language = language,
            result_count = concepts.len(),
            "Listing complete"
        );
        concepts
    }

    // =========================================================================
    // CONCEPT DETAIL
    // =========================================================================

    /// Resolve a single concept.
    ///
    /// Malformed URIs, an unavailable store, and query failures all yield
    /// `NotFound`. A concept that exists but carries no preferred label in
    /// the requested language yields the `MissingLanguage` stub.
    pub async fn get_concept(&self, uri: &str, language: &str) -> ConceptLookup {
        let Some(store) = &self.store else {
            return ConceptLookup::NotFound;
        };
        let language = self.language_or_default(language);
        let default_language = self.config.default_language();

        let query = match queries::concept_labels(uri, language) {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    subsystem = "store",
                    component = "glossary",
                    op = "get_concept",
                    concept_uri = uri,
                    error = %e,
                    "Rejected concept URI"
                );
                return ConceptLookup::NotFound;
            }
        };
        let rows = match store.select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                self.log_query_error("get_concept", &e);
                return ConceptLookup::NotFound;
            }
        };
        if rows.is_empty() {
            return ConceptLookup::NotFound;
        }

        let mut pref_label: Option<String> = None;
        let mut pref_label_default: Option<String> = None;
        let mut pref_labels = std::collections::BTreeMap::new();
        let mut alt_labels: Vec<String> = Vec::new();
        let mut internal: Vec<String> = Vec::new();
        for row in &rows {
            if let Some(value) = row.value("prefLabel") {
                match row.lang("prefLabel") {
                    Some(lang) if lang == language => pref_label = Some(value.to_string()),
                    Some(lang) => {
                        pref_labels.insert(lang.to_string(), value.to_string());
                    }
                    None => {}
                }
                if row.lang("prefLabel") == Some(default_language) {
                    pref_label_default = Some(value.to_string());
                }
            }
            if let Some(alt_label) = row.value("altLabel") {
                if !alt_labels.iter().any(|l| l == alt_label) {
                    alt_labels.push(alt_label.to_string());
                }
            }
            if let Some(definition) = row.value("definition") {
                let definition = labels::clean_definition(definition);
                if !definition.is_empty() && !internal.iter().any(|d| d == &definition) {
                    internal.push(definition);
                }
            }
        }

        // No data for the requested language: degraded partial shape.
        let Some(pref_label) = pref_label else {
            return ConceptLookup::MissingLanguage(ConceptStub {
                uri: uri.to_string(),
                pref_label_default,
                language: default_language.to_string(),
            });
        };

        // Second round trip, strictly after the first: the relation edges.
        let query = match queries::concept_relations(uri, language) {
            Ok(query) => query,
            Err(e) => {
                self.log_query_error("get_concept", &e);
                return ConceptLookup::NotFound;
            }
        };
        let rows = match store.select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                self.log_query_error("get_concept", &e);
                return ConceptLookup::NotFound;
            }
        };

        let composer = self.url_composer();
        let mut broader = RelationAccumulator::default();
        let mut narrower = RelationAccumulator::default();
        let mut related = RelationAccumulator::default();
        for row in &rows {
            for (accumulator, uri_var, label_var) in [
                (&mut broader, "broaderUri", "broader"),
                (&mut narrower, "narrowerUri", "narrower"),
                (&mut related, "relatedUri", "related"),
            ] {
                if let (Some(target_uri), Some(label)) = (row.uri(uri_var), row.value(label_var)) {
                    accumulator.register(RelatedConcept {
                        uri: target_uri.to_string(),
                        pref_label: label.to_string(),
                        url: composer.compose(target_uri, label, language),
                    });
                }
            }
        }

        let external = self.collect_external_definitions(store, uri, language).await;

        ConceptLookup::Found(Concept {
            uri: uri.to_string(),
            pref_label,
            pref_labels,
            alt_labels,
            definitions: ConceptDefinitions { internal, external },
            broader: broader.into_vec(),
            narrower: narrower.into_vec(),
            related: related.into_vec(),
        })
    }

    /// Invoke the registered related-resource providers in order, merging
    /// their keyed definition blocks. Provider failures are logged and
    /// skipped.
    async fn collect_external_definitions(
        &self,
        store: &Arc<dyn SparqlClient>,
        uri: &str,
        language: &str,
    ) -> ExternalDefinitions {
        let mut external = ExternalDefinitions::new();
        for provider in &self.providers {
            match provider.provide(&**store, uri, language).await {
                Ok(Some(definitions)) => external.extend(definitions),
                Ok(None) => {}
                Err(e) => warn!(
                    subsystem = "store",
                    component = "glossary",
                    op = "get_concept",
                    concept_uri = uri,
                    error = %e,
                    "Related-resource provider failed"
                ),
            }
        }
        external
    }

    // =========================================================================
    // COUNTS
    // =========================================================================

    /// Number of concepts with a preferred label in the given language, or
    /// `None` on store error.
    pub async fn count_concepts(&self, language: &str) -> Option<u64> {
        let Some(store) = &self.store else { return None };
        let language = self.language_or_default(language);
        let query = match queries::concept_count(language) {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    subsystem = "store",
                    component = "glossary",
                    op = "count_concepts",
                    error = %e,
                    "Rejected language"
                );
                return None;
            }
        };
        match store.select(&query).await {
            Ok(rows) => Some(rows.len() as u64),
            Err(e) => {
                self.log_query_error("count_concepts", &e);
                None
            }
        }
    }

    /// Number of concept schemes, or `None` on store error. Scheme counting
    /// is language-independent; the parameter is accepted for interface
    /// symmetry with [`Self::count_concepts`].
    pub async fn count_concept_schemes(&self, language: &str) -> Option<u64> {
        let Some(store) = &self.store else { return None };
        let language = self.language_or_default(language);
        let query = queries::concept_scheme_count();
        match store.select(&query).await {
            Ok(rows) => {
                debug!(
                    subsystem = "store",
                    component = "glossary",
                    op = "count_concept_schemes",
                    language = language,
                    result_count = rows.len(),
                    "Scheme count complete"
                );
                Some(rows.len() as u64)
            }
            Err(e) => {
                self.log_query_error("count_concept_schemes", &e);
                None
            }
        }
    }

    // =========================================================================
    // RESOURCE DUMP
    // =========================================================================

    /// Generic property dump of an arbitrary URI. `None` on malformed URI,
    /// unavailable store, query failure, or a URI without any triples.
    pub async fn get_resource(&self, uri: &str) -> Option<ResourceRecord> {
        let Some(store) = &self.store else { return None };
        let query = match queries::resource_properties(uri) {
            Ok(query) => query,
            Err(e) => {
                warn!(
                    subsystem = "store",
                    component = "glossary",
                    op = "get_resource",
                    concept_uri = uri,
                    error = %e,
                    "Rejected resource URI"
                );
                return None;
            }
        };
        let rows = match store.select(&query).await {
            Ok(rows) => rows,
            Err(e) => {
                self.log_query_error("get_resource", &e);
                return None;
            }
        };
        if rows.is_empty() {
            return None;
        }

        let default_language = self.config.default_language();
        let mut record = ResourceRecord {
            name: None,
            resource: "concept".to_string(),
            values: Vec::new(),
        };
        for row in &rows {
            let Some(property_uri) = row.uri("property") else {
                continue;
            };
            let property = PropertyRef {
                uri: property_uri.to_string(),
                name: shorten_predicate(property_uri),
            };
            let Some(term) = row.get("value") else { continue };
            let value = match term.uri() {
                Some(target) => PropertyValue::Uri {
                    url: target.to_string(),
                },
                None => {
                    let literal = term.value().unwrap_or_default();
                    if NAME_PROPERTIES.contains(&property.name.as_str())
                        && term.lang() == Some(default_language)
                    {
                        record.name = Some(literal.to_string());
                    }
                    PropertyValue::Literal {
                        value: literal.to_string(),
                    }
                }
            };
            record.values.push(ResourceProperty { property, value });
        }
        Some(record)
    }

    // =========================================================================
    // VISUAL MAPPER
    // =========================================================================

    /// Build the visual mapper tree for a root URI (or the synthetic
    /// project root when absent).
    ///
    /// This is the one fatal path: any store failure propagates to the
    /// caller instead of degrading.
    pub async fn visual_mapper_data(
        &self,
        root_uri: Option<&str>,
        language: &str,
    ) -> Result<RelationNode> {
        let Some(store) = &self.store else {
            return Err(Error::Store("store not configured".to_string()));
        };
        let language = self.language_or_default(language);
        graph::build(store.as_ref(), root_uri, language).await
    }

    // =========================================================================
    // CHARACTER AVAILABILITY
    // =========================================================================

    /// Recompute the a-z availability table for every configured language
    /// by probing each letter with a limit-1 listing. The caller persists
    /// the returned table.
    pub async fn update_character_list(&self) -> CharacterAvailability {
        let mut languages = std::collections::BTreeMap::new();
        for language in self.config.languages.clone() {
            let mut letters = std::collections::BTreeMap::new();
            for letter in glossary_core::defaults::ALPHABET.chars() {
                let found = self.get_list(&letter.to_string(), &language, 1).await.len();
                letters.insert(letter, found as u64);
            }
            languages.insert(language, letters);
        }
        info!(
            subsystem = "store",
            component = "glossary",
            op = "update_character_list",
            result_count = languages.len(),
            "Character availability recomputed"
        );
        CharacterAvailability {
            languages,
            refreshed_at: Utc::now(),
        }
    }
}

/// Deduplicates relation references by URI, keeping first-seen order and
/// the last-seen label.
#[derive(Default)]
struct RelationAccumulator {
    entries: Vec<RelatedConcept>,
    index_by_uri: HashMap<String, usize>,
}

impl RelationAccumulator {
    fn register(&mut self, entry: RelatedConcept) {
        match self.index_by_uri.get(&entry.uri) {
            Some(index) => self.entries[*index] = entry,
            None => {
                self.index_by_uri.insert(entry.uri.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    fn into_vec(self) -> Vec<RelatedConcept> {
        self.entries
    }
}

/// Replace a known namespace with its prefix in a predicate URI.
fn shorten_predicate(uri: &str) -> String {
    for (namespace, prefix) in NAMESPACE_PREFIXES {
        if let Some(local) = uri.strip_prefix(namespace) {
            return format!("{prefix}{local}");
        }
    }
    uri.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_predicate() {
        assert_eq!(
            shorten_predicate("http://www.w3.org/2004/02/skos/core#prefLabel"),
            "skos:prefLabel"
        );
        assert_eq!(
            shorten_predicate("http://purl.org/dc/terms/title"),
            "dcterms:title"
        );
        assert_eq!(
            shorten_predicate("http://example.com/custom#p"),
            "http://example.com/custom#p"
        );
    }

    #[test]
    fn test_relation_accumulator_last_label_wins() {
        let mut accumulator = RelationAccumulator::default();
        accumulator.register(RelatedConcept {
            uri: "http://example.com/c1".to_string(),
            pref_label: "First".to_string(),
            url: "u1".to_string(),
        });
        accumulator.register(RelatedConcept {
            uri: "http://example.com/c2".to_string(),
            pref_label: "Other".to_string(),
            url: "u2".to_string(),
        });
        accumulator.register(RelatedConcept {
            uri: "http://example.com/c1".to_string(),
            pref_label: "Second".to_string(),
            url: "u1".to_string(),
        });

        let entries = accumulator.into_vec();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].uri, "http://example.com/c1");
        assert_eq!(entries[0].pref_label, "Second");
        assert_eq!(entries[1].uri, "http://example.com/c2");
    }
}
