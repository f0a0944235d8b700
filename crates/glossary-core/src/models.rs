//! Concept data model shared across the glossary crates.
//!
//! The JSON field names are a client contract (the visual mapper and the
//! autocomplete/listing widgets consume them verbatim), so serde renames
//! pin them explicitly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::traits::ExternalDefinitions;

// =============================================================================
// AUTOCOMPLETE / LISTING
// =============================================================================

/// One autocomplete suggestion.
///
/// When the matched label is an alternate label (or a preferred label that
/// differs after normalization), the display label carries the preferred
/// label in parentheses: `"cat food (Category)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub label: String,
    pub url: String,
}

/// One entry of an alphabetic concept listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptSummary {
    pub uri: String,
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    pub url: String,
    /// Labels of all broader concepts, used by the UI as a disambiguation
    /// hint when `multiple` is set.
    pub broader: Vec<String>,
    /// True when another concept in the same result shares this concept's
    /// case-insensitive preferred label.
    pub multiple: bool,
}

// =============================================================================
// CONCEPT DETAIL
// =============================================================================

/// A broader/narrower/related reference on a concept detail view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedConcept {
    pub uri: String,
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    pub url: String,
}

/// Definitions of a concept, split by origin.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptDefinitions {
    /// Definitions read from the store, deduplicated.
    pub internal: Vec<String>,
    /// Definitions contributed by related-resource providers, keyed by
    /// match type.
    pub external: ExternalDefinitions,
}

/// A fully resolved concept in one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub uri: String,
    /// Preferred label in the requested language.
    #[serde(rename = "prefLabel")]
    pub pref_label: String,
    /// Preferred labels in the other languages, keyed by language code.
    #[serde(rename = "prefLabels")]
    pub pref_labels: BTreeMap<String, String>,
    /// Alternate labels in the requested language, deduplicated.
    #[serde(rename = "altLabels")]
    pub alt_labels: Vec<String>,
    pub definitions: ConceptDefinitions,
    pub broader: Vec<RelatedConcept>,
    pub narrower: Vec<RelatedConcept>,
    pub related: Vec<RelatedConcept>,
}

/// Degraded concept shape returned when the store has no preferred label in
/// the requested language. Distinct from "not found" — the concept exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptStub {
    pub uri: String,
    /// Preferred label in the configured default language, when present.
    #[serde(rename = "prefLabelDefault")]
    pub pref_label_default: Option<String>,
    /// The default language the stub fell back to.
    pub language: String,
}

/// Outcome of a concept lookup.
///
/// Callers must handle `MissingLanguage` distinctly from `NotFound`: the
/// stub still identifies the concept and names its default-language label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConceptLookup {
    Found(Concept),
    MissingLanguage(ConceptStub),
    NotFound,
}

impl ConceptLookup {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConceptLookup::NotFound)
    }
}

// =============================================================================
// VISUAL MAPPER
// =============================================================================

/// Node type of a visual mapper root, determined by the presence or absence
/// of `skos:broader` / `skos:hasTopConcept` triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RootType {
    #[serde(rename = "project")]
    Project,
    #[serde(rename = "conceptScheme")]
    ConceptScheme,
    #[serde(rename = "topConcept")]
    TopConcept,
    #[serde(rename = "concept")]
    Concept,
}

/// The relation buckets of a visual mapper node.
///
/// A bucket that the traversal found empty is omitted from the JSON
/// entirely — never serialized as an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<RelationNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RelationNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related: Option<Vec<RelationNode>>,
}

impl Relations {
    pub fn is_empty(&self) -> bool {
        self.parents.is_none() && self.children.is_none() && self.related.is_none()
    }
}

/// One node of the visual mapper tree.
///
/// `size` is 1 plus the count of all descendant nodes discovered under this
/// node during the single traversal. Second-hop placeholder nodes carry a
/// size but no name; the UI sizing depends on exactly this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationNode {
    /// Concept URI; `null` only on the synthetic project root.
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub size: u64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub node_type: Option<RootType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relations: Option<Relations>,
}

impl RelationNode {
    /// A leaf node carrying only an identity and the initial size.
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
            size: 1,
            node_type: None,
            relations: None,
        }
    }
}

// =============================================================================
// RESOURCE DUMP
// =============================================================================

/// A property reference on a resource dump, with the full predicate URI and
/// its prefixed short form (`skos:prefLabel`, `dc:title`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRef {
    pub uri: String,
    pub name: String,
}

/// A property value on a resource dump, distinguishing resources from
/// literals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PropertyValue {
    #[serde(rename = "uri")]
    Uri { url: String },
    #[serde(rename = "string")]
    Literal { value: String },
}

/// One property/value pair of a resource dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProperty {
    pub property: PropertyRef,
    pub value: PropertyValue,
}

/// Generic property dump of an arbitrary URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    /// Value of a common naming predicate in the default language, when one
    /// was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub resource: String,
    #[serde(rename = "value")]
    pub values: Vec<ResourceProperty>,
}

// =============================================================================
// CHARACTER AVAILABILITY
// =============================================================================

/// Recomputed a-z availability table: language → letter → number of
/// concepts found (0 or 1, probed with limit 1).
///
/// Persisting the table back into configuration storage is the caller's
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAvailability {
    pub languages: BTreeMap<String, BTreeMap<char, u64>>,
    pub refreshed_at: DateTime<Utc>,
}
