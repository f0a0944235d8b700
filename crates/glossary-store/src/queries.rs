//! Parameterized SPARQL query templates.
//!
//! Each builder takes already-validated-or-validatable user input, binds it
//! through [`crate::escape`], and returns the final SELECT text. Queries
//! select `DISTINCT` and filter by exact language-tag equality, never by
//! prefix match.

use glossary_core::Result;

use crate::escape::{escape_regex, validate_language, validate_uri};

pub const PREFIX_SKOS: &str = "PREFIX skos:<http://www.w3.org/2004/02/skos/core#>";
pub const PREFIX_DC: &str = "PREFIX dc:<http://purl.org/dc/terms/>";
pub const PREFIX_RDF: &str = "PREFIX rdf:<http://www.w3.org/1999/02/22-rdf-syntax-ns#>";

// =============================================================================
// AUTOCOMPLETE / LISTING
// =============================================================================

/// Autocomplete over preferred and alternate labels.
///
/// Matches the search term case-insensitively anywhere in the label and
/// returns the matched label alongside the concept's preferred label.
pub fn autocomplete(term: &str, language: &str, limit: usize) -> Result<String> {
    let language = validate_language(language)?;
    let pattern = escape_regex(term);
    Ok(format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?concept ?label ?prefLabel
WHERE {{
  ?concept a skos:Concept.
  {{
    ?concept skos:prefLabel ?label FILTER(regex(str(?label),'{pattern}','i') && lang(?label) = '{language}').
    ?concept skos:prefLabel ?prefLabel FILTER(lang(?prefLabel) = '{language}').
  }} UNION {{
    ?concept skos:altLabel ?label FILTER(regex(str(?label),'{pattern}','i') && lang(?label) = '{language}').
    ?concept skos:prefLabel ?prefLabel FILTER(lang(?prefLabel) = '{language}').
  }}
}}
ORDER BY ASC(?label)
LIMIT {limit}"
    ))
}

/// Alphabetic listing, optionally filtered by starting letter.
///
/// An empty letter means "no filter, all concepts". A limit of 0 means
/// unbounded.
pub fn list_by_letter(letter: &str, language: &str, limit: usize) -> Result<String> {
    let language = validate_language(language)?;
    let label_filter = if letter.is_empty() {
        String::new()
    } else {
        format!("regex(str(?prefLabel),'^ *{}','i') && ", escape_regex(letter))
    };
    let mut query = format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?concept ?prefLabel ?broaderLabel
WHERE {{
  ?concept a skos:Concept.
  ?concept skos:prefLabel ?prefLabel FILTER({label_filter}lang(?prefLabel) = '{language}').
  OPTIONAL {{
    ?concept skos:broader ?broader.
    ?broader skos:prefLabel ?broaderLabel FILTER(lang(?broaderLabel) = '{language}').
  }}
}}"
    );
    if limit > 0 {
        query.push_str(&format!("\nLIMIT {limit}"));
    }
    Ok(query)
}

// =============================================================================
// CONCEPT DETAIL
// =============================================================================

/// Preferred labels (all languages), plus alternate labels and definitions
/// in the requested language.
pub fn concept_labels(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT *
WHERE {{
  <{uri}> a skos:Concept.
  <{uri}> skos:prefLabel ?prefLabel.
  OPTIONAL {{
    <{uri}> skos:altLabel ?altLabel FILTER(lang(?altLabel) = '{language}').
  }}
  OPTIONAL {{
    <{uri}> skos:definition ?definition FILTER(lang(?definition) = '{language}').
  }}
}}"
    ))
}

/// Broader, narrower, and related references in the requested language.
pub fn concept_relations(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT *
WHERE {{
  <{uri}> a skos:Concept.
  OPTIONAL {{
    <{uri}> skos:broader ?broaderUri.
    ?broaderUri skos:prefLabel ?broader FILTER(lang(?broader) = '{language}').
  }}
  OPTIONAL {{
    <{uri}> skos:narrower ?narrowerUri.
    ?narrowerUri skos:prefLabel ?narrower FILTER(lang(?narrower) = '{language}').
  }}
  OPTIONAL {{
    <{uri}> skos:related ?relatedUri.
    ?relatedUri skos:prefLabel ?related FILTER(lang(?related) = '{language}').
  }}
}}"
    ))
}

// =============================================================================
// COUNTS
// =============================================================================

/// Distinct concepts carrying a preferred label in the given language.
pub fn concept_count(language: &str) -> Result<String> {
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?concept
WHERE {{
  ?concept a skos:Concept.
  ?concept skos:prefLabel ?label FILTER(lang(?label) = '{language}').
}}"
    ))
}

/// All distinct concept schemes. Scheme counting is language-independent.
pub fn concept_scheme_count() -> String {
    format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?conceptScheme
WHERE {{
  ?conceptScheme a skos:ConceptScheme.
}}"
    )
}

// =============================================================================
// RESOURCE DUMP
// =============================================================================

/// Every property/value pair of an arbitrary resource.
pub fn resource_properties(uri: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    Ok(format!(
        "SELECT ?property ?value
WHERE {{
  <{uri}> ?property ?value.
}}"
    ))
}

// =============================================================================
// VISUAL MAPPER
// =============================================================================

/// Label and type evidence for a visual mapper root: the label comes from
/// `skos:prefLabel` or `dc:title`, a bound `?concept` proves a
/// `skos:broader` triple, a bound `?topConcept` proves the URI is the
/// target of `skos:hasTopConcept`.
pub fn root_type(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}
{PREFIX_DC}

SELECT ?label ?topConcept ?concept
WHERE {{
  {{ <{uri}> skos:prefLabel ?label . FILTER(lang(?label) = '{language}') . }}
    UNION {{ <{uri}> dc:title ?label . FILTER(lang(?label) = '{language}') . }}

  OPTIONAL {{
    <{uri}> skos:broader ?concept .
  }}
  OPTIONAL {{
    ?topConcept skos:hasTopConcept <{uri}> .
  }}
}}"
    ))
}

/// Project root: all concept schemes, with `hasTopConcept` second-hop
/// evidence under the `nn` variable.
pub fn scheme_children(language: &str) -> Result<String> {
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}
{PREFIX_DC}
{PREFIX_RDF}

SELECT DISTINCT ?n ?nLabel ?nn
WHERE {{
  ?n rdf:type skos:ConceptScheme .
  ?n dc:title ?nLabel . FILTER(lang(?nLabel) = '{language}') .

  OPTIONAL {{
    ?n skos:hasTopConcept ?nn .
  }}
}}"
    ))
}

/// Concept scheme root: its top concepts one hop out.
pub fn top_concepts(scheme_uri: &str, language: &str) -> Result<String> {
    let scheme_uri = validate_uri(scheme_uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?n ?nLabel ?nb ?nn ?nr
WHERE {{
  <{scheme_uri}> skos:hasTopConcept ?n .
  ?n skos:prefLabel ?nLabel . FILTER(lang(?nLabel) = '{language}') .
  ?nb skos:hasTopConcept ?n .
  OPTIONAL {{ ?n skos:narrower ?nn . }}
  OPTIONAL {{ ?n skos:related ?nr . }}
}}"
    ))
}

/// Top concept root: the schemes containing it, as parents.
pub fn top_concept_parents(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}
{PREFIX_DC}

SELECT DISTINCT ?b ?bLabel ?bn
WHERE {{
  ?b skos:hasTopConcept <{uri}> .
  ?b dc:title ?bLabel . FILTER(lang(?bLabel) = '{language}') .
  OPTIONAL {{ ?b skos:hasTopConcept ?bn . }}
}}"
    ))
}

/// Concept root: broader concepts as parents, with their own second-hop
/// evidence.
pub fn concept_parents(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?b ?bLabel ?bb ?bn ?br
WHERE {{
  <{uri}> skos:broader ?b .
  ?b skos:prefLabel ?bLabel . FILTER(lang(?bLabel) = '{language}') .
  {{ ?b skos:broader ?bb . }} UNION {{ ?bb skos:hasTopConcept ?b }}
  ?b skos:narrower ?bn .
  OPTIONAL {{ ?b skos:related ?br . }}
}}"
    ))
}

/// Narrower concepts one hop below a top concept or concept root.
pub fn concept_children(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?n ?nLabel ?nb ?nn ?nr
WHERE {{
  <{uri}> skos:narrower ?n .
  ?n skos:prefLabel ?nLabel . FILTER(lang(?nLabel) = '{language}') .
  ?n skos:broader ?nb .
  OPTIONAL {{ ?n skos:narrower ?nn . }}
  OPTIONAL {{ ?n skos:related ?nr . }}
}}"
    ))
}

/// Related concepts of a top concept or concept root.
pub fn concept_related(uri: &str, language: &str) -> Result<String> {
    let uri = validate_uri(uri)?;
    let language = validate_language(language)?;
    Ok(format!(
        "{PREFIX_SKOS}

SELECT DISTINCT ?r ?rLabel ?rb ?rn ?rr
WHERE {{
  <{uri}> skos:related ?r .
  ?r skos:prefLabel ?rLabel . FILTER(lang(?rLabel) = '{language}') .
  {{ ?r skos:broader ?rb . }} UNION {{ ?rb skos:hasTopConcept ?r }}
  OPTIONAL {{ ?r skos:narrower ?rn . }}
  OPTIONAL {{ ?r skos:related ?rr . }}
}}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autocomplete_query_shape() {
        let query = autocomplete("cat", "en", 15).unwrap();
        assert!(query.contains("SELECT DISTINCT ?concept ?label ?prefLabel"));
        assert!(query.contains("skos:altLabel"));
        assert!(query.contains("lang(?label) = 'en'"));
        assert!(query.contains("LIMIT 15"));
        assert!(query.contains("ORDER BY ASC(?label)"));
    }

    #[test]
    fn test_autocomplete_escapes_search_term() {
        let query = autocomplete("cat').}UNION{?s ?p ?o.FILTER('", "en", 15).unwrap();
        // The crafted term cannot close the quoted regex pattern.
        assert!(!query.contains("cat')"));
    }

    #[test]
    fn test_autocomplete_rejects_bad_language() {
        assert!(autocomplete("cat", "en' || lang(?x) != '", 15).is_err());
    }

    #[test]
    fn test_list_query_without_letter_has_no_regex() {
        let query = list_by_letter("", "en", 0).unwrap();
        assert!(!query.contains("regex"));
        assert!(!query.contains("LIMIT"));
    }

    #[test]
    fn test_list_query_with_letter_and_limit() {
        let query = list_by_letter("c", "en", 10).unwrap();
        assert!(query.contains("regex(str(?prefLabel),'^ *c','i')"));
        assert!(query.ends_with("LIMIT 10"));
    }

    #[test]
    fn test_concept_queries_reject_malformed_uri() {
        assert!(concept_labels("no scheme", "en").is_err());
        assert!(concept_relations("http://x.com/a> <b", "en").is_err());
    }

    #[test]
    fn test_root_type_query_contains_both_label_sources() {
        let query = root_type("http://example.com/c1", "en").unwrap();
        assert!(query.contains("skos:prefLabel"));
        assert!(query.contains("dc:title"));
        assert!(query.contains("?topConcept skos:hasTopConcept"));
    }

    #[test]
    fn test_relation_queries_use_prefixed_second_hop_vars() {
        let query = concept_children("http://example.com/c1", "en").unwrap();
        for var in ["?n ", "?nLabel", "?nb", "?nn", "?nr"] {
            assert!(query.contains(var), "missing {var}");
        }
        let query = concept_parents("http://example.com/c1", "en").unwrap();
        for var in ["?b ", "?bLabel", "?bb", "?bn", "?br"] {
            assert!(query.contains(var), "missing {var}");
        }
    }
}
