//! Mock-store scenarios for the glossary repository: autocomplete
//! bucketing, listing disambiguation, concept lookup shapes, counts, and
//! degradation behavior.

use std::sync::Arc;

use async_trait::async_trait;

use glossary_core::{
    ConceptLookup, ExternalDefinitions, GlossaryConfig, LanguageMapping, RdfTerm,
    RelatedResourceProvider, Result, SparqlClient, UrlSettings,
};
use glossary_store::mock::MockSparqlClient;
use glossary_store::Glossary;

fn uri(s: &str) -> RdfTerm {
    RdfTerm::Uri(s.to_string())
}

fn config() -> GlossaryConfig {
    GlossaryConfig::new("http://localhost:8890/sparql")
        .languages(["en", "de", "fr"])
        .map_language("en", LanguageMapping::new(["en", "de"]))
        .url_settings(UrlSettings {
            base_url: "https://example.com".to_string(),
            language_prefix: None,
            base_path: "glossary".to_string(),
            site_language: "en".to_string(),
            default_site_language: "en".to_string(),
        })
}

fn glossary(store: MockSparqlClient) -> Glossary {
    Glossary::with_store(config(), Arc::new(store))
}

// =============================================================================
// AUTOCOMPLETE
// =============================================================================

/// Autocomplete rows as the store returns them: one row per matched label,
/// each carrying the concept's preferred label.
fn autocomplete_store() -> MockSparqlClient {
    MockSparqlClient::new().with_rows(
        "ORDER BY ASC(?label)",
        vec![
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/category")),
                ("label", RdfTerm::lang_literal("Category", "en")),
                ("prefLabel", RdfTerm::lang_literal("Category", "en")),
            ]),
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/category")),
                ("label", RdfTerm::lang_literal("cat food", "en")),
                ("prefLabel", RdfTerm::lang_literal("Category", "en")),
            ]),
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/wildcat")),
                ("label", RdfTerm::lang_literal("Wildcat", "en")),
                ("prefLabel", RdfTerm::lang_literal("Wildcat", "en")),
            ]),
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/cat")),
                ("label", RdfTerm::lang_literal("Cat", "en")),
                ("prefLabel", RdfTerm::lang_literal("Cat", "en")),
            ]),
        ],
    )
}

#[tokio::test]
async fn autocomplete_orders_prefix_matches_first() {
    let glossary = glossary(autocomplete_store());
    let suggestions = glossary.autocomplete("cat", 15, "en").await;

    let labels: Vec<&str> = suggestions.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["Cat", "cat food (Category)", "Category", "Wildcat"]
    );
}

#[tokio::test]
async fn autocomplete_buckets_are_each_sorted() {
    let glossary = glossary(autocomplete_store());
    let suggestions = glossary.autocomplete("cat", 15, "en").await;

    let position = |needle: &str| {
        suggestions
            .iter()
            .position(|s| s.label == needle)
            .unwrap_or(usize::MAX)
    };
    // Every prefix match precedes every mid-string match.
    assert!(position("Category") < position("Wildcat"));
    // Within the prefix bucket, labels are case-insensitively ascending.
    assert!(position("Cat") < position("cat food (Category)"));
    assert!(position("cat food (Category)") < position("Category"));
}

#[tokio::test]
async fn autocomplete_appends_pref_label_when_matched_label_differs() {
    let glossary = glossary(autocomplete_store());
    let suggestions = glossary.autocomplete("cat", 15, "en").await;

    let alt = suggestions
        .iter()
        .find(|s| s.label.starts_with("cat food"))
        .expect("altLabel match present");
    assert_eq!(alt.label, "cat food (Category)");
    // The URL is composed from the preferred label, not the matched one.
    assert!(alt.url.contains("/glossary/en/Category?uri="));
}

#[tokio::test]
async fn autocomplete_empty_input_yields_empty_list() {
    let glossary = glossary(autocomplete_store());
    assert!(glossary.autocomplete("", 15, "en").await.is_empty());
}

#[tokio::test]
async fn autocomplete_query_failure_degrades_to_empty() {
    let glossary = glossary(MockSparqlClient::new().with_failure("ORDER BY ASC(?label)"));
    assert!(glossary.autocomplete("cat", 15, "en").await.is_empty());
}

#[tokio::test]
async fn autocomplete_without_store_yields_empty_list() {
    let glossary = Glossary::new(GlossaryConfig::default());
    assert!(glossary.autocomplete("cat", 15, "en").await.is_empty());
}

// =============================================================================
// LISTING
// =============================================================================

fn listing_store() -> MockSparqlClient {
    MockSparqlClient::new().with_rows(
        "?broaderLabel",
        vec![
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/mercury-planet")),
                ("prefLabel", RdfTerm::lang_literal("Mercury", "en")),
                ("broaderLabel", RdfTerm::lang_literal("Planets", "en")),
            ]),
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/mercury-element")),
                ("prefLabel", RdfTerm::lang_literal("mercury", "en")),
                ("broaderLabel", RdfTerm::lang_literal("Chemical elements", "en")),
            ]),
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/venus")),
                ("prefLabel", RdfTerm::lang_literal("Venus", "en")),
                ("broaderLabel", RdfTerm::lang_literal("Planets", "en")),
            ]),
            MockSparqlClient::row(&[
                ("concept", uri("http://example.com/concepts/venus")),
                ("prefLabel", RdfTerm::lang_literal("Venus", "en")),
                ("broaderLabel", RdfTerm::lang_literal("Goddesses", "en")),
            ]),
        ],
    )
}

#[tokio::test]
async fn listing_flags_adjacent_label_collisions_on_both_concepts() {
    let glossary = glossary(listing_store());
    let concepts = glossary.get_list("m", "en", 0).await;

    let planet = concepts
        .iter()
        .find(|c| c.uri.ends_with("mercury-planet"))
        .unwrap();
    let element = concepts
        .iter()
        .find(|c| c.uri.ends_with("mercury-element"))
        .unwrap();
    let venus = concepts.iter().find(|c| c.uri.ends_with("venus")).unwrap();

    assert!(planet.multiple);
    assert!(element.multiple);
    assert!(!venus.multiple);
}

#[tokio::test]
async fn listing_accumulates_broader_labels() {
    let glossary = glossary(listing_store());
    let concepts = glossary.get_list("", "en", 0).await;

    let venus = concepts.iter().find(|c| c.uri.ends_with("venus")).unwrap();
    assert_eq!(venus.broader, vec!["Planets", "Goddesses"]);
}

#[tokio::test]
async fn listing_sorts_case_insensitively() {
    let glossary = glossary(listing_store());
    let concepts = glossary.get_list("", "en", 0).await;

    let labels: Vec<String> = concepts.iter().map(|c| c.pref_label.to_lowercase()).collect();
    let mut sorted = labels.clone();
    sorted.sort();
    assert_eq!(labels, sorted);
}

#[tokio::test]
async fn listing_is_idempotent_against_unchanged_store() {
    let glossary = glossary(listing_store());
    let first = glossary.get_list("", "en", 0).await;
    let second = glossary.get_list("", "en", 0).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn listing_runs_registered_query_alterers() {
    struct MarkQuery;
    impl glossary_core::ListQueryAlter for MarkQuery {
        fn alter(&self, query: &mut String, ctx: &glossary_core::ListQueryContext<'_>) {
            assert_eq!(ctx.letter, "v");
            query.push_str("\n# altered");
        }
    }

    let store = Arc::new(listing_store());
    let mut glossary = Glossary::with_store(config(), store.clone());
    glossary.register_list_alterer(Arc::new(MarkQuery));
    glossary.get_list("v", "en", 0).await;

    let executed = store.executed_queries();
    assert!(executed.iter().any(|q| q.ends_with("# altered")));
}

// =============================================================================
// CONCEPT DETAIL
// =============================================================================

fn concept_store() -> MockSparqlClient {
    MockSparqlClient::new()
        .with_rows(
            "skos:altLabel ?altLabel",
            vec![
                MockSparqlClient::row(&[
                    ("prefLabel", RdfTerm::lang_literal("Cat", "en")),
                    ("altLabel", RdfTerm::lang_literal("Feline", "en")),
                    ("definition", RdfTerm::lang_literal(" A small mammal. ", "en")),
                ]),
                MockSparqlClient::row(&[
                    ("prefLabel", RdfTerm::lang_literal("Katze", "de")),
                    ("altLabel", RdfTerm::lang_literal("Feline", "en")),
                    ("definition", RdfTerm::lang_literal("A small mammal.", "en")),
                ]),
                MockSparqlClient::row(&[
                    ("prefLabel", RdfTerm::lang_literal("Chat", "fr")),
                    ("altLabel", RdfTerm::lang_literal("Housecat", "en")),
                ]),
            ],
        )
        .with_rows(
            "?broaderUri",
            vec![
                MockSparqlClient::row(&[
                    ("broaderUri", uri("http://example.com/concepts/mammal")),
                    ("broader", RdfTerm::lang_literal("Mammal", "en")),
                    ("narrowerUri", uri("http://example.com/concepts/kitten")),
                    ("narrower", RdfTerm::lang_literal("Kitten", "en")),
                ]),
                MockSparqlClient::row(&[
                    ("broaderUri", uri("http://example.com/concepts/mammal")),
                    ("broader", RdfTerm::lang_literal("Mammal (updated)", "en")),
                    ("relatedUri", uri("http://example.com/concepts/dog")),
                    ("related", RdfTerm::lang_literal("Dog", "en")),
                ]),
            ],
        )
}

#[tokio::test]
async fn concept_lookup_splits_requested_and_other_languages() {
    let glossary = glossary(concept_store());
    let lookup = glossary
        .get_concept("http://example.com/concepts/cat", "en")
        .await;

    let ConceptLookup::Found(concept) = lookup else {
        panic!("expected Found");
    };
    assert_eq!(concept.pref_label, "Cat");
    assert_eq!(concept.pref_labels.get("de").map(String::as_str), Some("Katze"));
    assert_eq!(concept.pref_labels.get("fr").map(String::as_str), Some("Chat"));
    assert!(!concept.pref_labels.contains_key("en"));
}

#[tokio::test]
async fn concept_lookup_deduplicates_labels_and_definitions() {
    let glossary = glossary(concept_store());
    let ConceptLookup::Found(concept) = glossary
        .get_concept("http://example.com/concepts/cat", "en")
        .await
    else {
        panic!("expected Found");
    };

    assert_eq!(concept.alt_labels, vec!["Feline", "Housecat"]);
    // Definitions are trimmed before deduplication.
    assert_eq!(concept.definitions.internal, vec!["A small mammal."]);
}

#[tokio::test]
async fn concept_lookup_deduplicates_relations_last_label_wins() {
    let glossary = glossary(concept_store());
    let ConceptLookup::Found(concept) = glossary
        .get_concept("http://example.com/concepts/cat", "en")
        .await
    else {
        panic!("expected Found");
    };

    assert_eq!(concept.broader.len(), 1);
    assert_eq!(concept.broader[0].pref_label, "Mammal (updated)");
    assert_eq!(concept.narrower.len(), 1);
    assert_eq!(concept.related.len(), 1);
    assert!(concept.broader[0]
        .url
        .contains("?uri=http%3A%2F%2Fexample.com%2Fconcepts%2Fmammal"));
}

#[tokio::test]
async fn concept_lookup_missing_language_returns_stub() {
    let glossary = glossary(concept_store());
    let lookup = glossary
        .get_concept("http://example.com/concepts/cat", "it")
        .await;

    let ConceptLookup::MissingLanguage(stub) = lookup else {
        panic!("expected MissingLanguage");
    };
    assert_eq!(stub.uri, "http://example.com/concepts/cat");
    assert_eq!(stub.pref_label_default.as_deref(), Some("Cat"));
    assert_eq!(stub.language, "en");
}

#[tokio::test]
async fn concept_lookup_malformed_uri_is_not_found() {
    let glossary = glossary(concept_store());
    assert!(glossary.get_concept("not a uri", "en").await.is_not_found());
}

#[tokio::test]
async fn concept_lookup_unknown_uri_is_not_found() {
    let glossary = glossary(MockSparqlClient::new());
    assert!(glossary
        .get_concept("http://example.com/concepts/nothing", "en")
        .await
        .is_not_found());
}

#[tokio::test]
async fn concept_lookup_merges_provider_definitions() {
    struct DbpediaLinks;
    #[async_trait]
    impl RelatedResourceProvider for DbpediaLinks {
        async fn provide(
            &self,
            _store: &dyn SparqlClient,
            concept_uri: &str,
            _language: &str,
        ) -> Result<Option<ExternalDefinitions>> {
            let mut definitions = ExternalDefinitions::new();
            definitions.insert(
                "exactMatch".to_string(),
                serde_json::json!([format!("{concept_uri}#dbpedia")]),
            );
            Ok(Some(definitions))
        }
    }

    struct SilentProvider;
    #[async_trait]
    impl RelatedResourceProvider for SilentProvider {
        async fn provide(
            &self,
            _store: &dyn SparqlClient,
            _concept_uri: &str,
            _language: &str,
        ) -> Result<Option<ExternalDefinitions>> {
            Ok(None)
        }
    }

    let mut glossary = Glossary::with_store(config(), Arc::new(concept_store()));
    glossary.register_provider(Arc::new(SilentProvider));
    glossary.register_provider(Arc::new(DbpediaLinks));

    let ConceptLookup::Found(concept) = glossary
        .get_concept("http://example.com/concepts/cat", "en")
        .await
    else {
        panic!("expected Found");
    };
    assert_eq!(concept.definitions.external.len(), 1);
    assert!(concept.definitions.external.contains_key("exactMatch"));
}

// =============================================================================
// COUNTS AND AVAILABILITY
// =============================================================================

#[tokio::test]
async fn counts_are_distinct_row_counts() {
    let store = MockSparqlClient::new()
        .with_rows(
            "?concept a skos:Concept",
            vec![
                MockSparqlClient::row(&[("concept", uri("http://example.com/concepts/a"))]),
                MockSparqlClient::row(&[("concept", uri("http://example.com/concepts/b"))]),
            ],
        )
        .with_rows(
            "skos:ConceptScheme",
            vec![MockSparqlClient::row(&[(
                "conceptScheme",
                uri("http://example.com/scheme"),
            )])],
        );
    let glossary = glossary(store);

    assert_eq!(glossary.count_concepts("en").await, Some(2));
    assert_eq!(glossary.count_concept_schemes("en").await, Some(1));
}

#[tokio::test]
async fn count_failure_yields_none() {
    let glossary = glossary(MockSparqlClient::new().with_failure("skos:Concept"));
    assert_eq!(glossary.count_concepts("en").await, None);
}

#[tokio::test]
async fn availability_follows_store_ping() {
    assert!(glossary(MockSparqlClient::new()).available().await);
    assert!(!glossary(MockSparqlClient::new().unavailable()).available().await);
    assert!(!Glossary::new(GlossaryConfig::default()).available().await);
}

// =============================================================================
// RESOURCE DUMP
// =============================================================================

#[tokio::test]
async fn resource_dump_promotes_default_language_name() {
    let store = MockSparqlClient::new().with_rows(
        "?property ?value",
        vec![
            MockSparqlClient::row(&[
                ("property", uri("http://www.w3.org/2004/02/skos/core#prefLabel")),
                ("value", RdfTerm::lang_literal("Cat", "en")),
            ]),
            MockSparqlClient::row(&[
                ("property", uri("http://www.w3.org/2004/02/skos/core#broader")),
                ("value", uri("http://example.com/concepts/mammal")),
            ]),
        ],
    );
    let glossary = glossary(store);

    let record = glossary
        .get_resource("http://example.com/concepts/cat")
        .await
        .expect("record present");
    assert_eq!(record.name.as_deref(), Some("Cat"));
    assert_eq!(record.resource, "concept");
    assert_eq!(record.values.len(), 2);
    assert_eq!(record.values[0].property.name, "skos:prefLabel");
    assert_eq!(record.values[1].property.name, "skos:broader");
}

#[tokio::test]
async fn resource_dump_of_unknown_uri_is_none() {
    let glossary = glossary(MockSparqlClient::new());
    assert!(glossary
        .get_resource("http://example.com/concepts/nothing")
        .await
        .is_none());
}

// =============================================================================
// CHARACTER AVAILABILITY
// =============================================================================

#[tokio::test]
async fn character_list_probes_every_language_and_letter() {
    let glossary = glossary(listing_store());
    let table = glossary.update_character_list().await;

    assert_eq!(table.languages.len(), 3);
    let english = table.languages.get("en").unwrap();
    assert_eq!(english.len(), 26);
    // The mock answers the listing query regardless of letter; every probe
    // found concepts.
    assert!(english.values().all(|&count| count > 0));
}
