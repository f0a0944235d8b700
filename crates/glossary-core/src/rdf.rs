//! RDF term and result-row model for SPARQL SELECT responses.
//!
//! A row maps variable names to typed bindings: a URI (resource) or a
//! literal with an optional language tag and datatype. The accessors mirror
//! how the normalization layer consumes bindings — `uri(var)` for resources,
//! `value(var)` / `lang(var)` for literals.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single RDF term bound to a SELECT variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RdfTerm {
    /// A resource (named node or blank node).
    Uri(String),
    /// A literal value with optional language tag and datatype.
    Literal {
        value: String,
        lang: Option<String>,
        datatype: Option<String>,
    },
}

impl RdfTerm {
    /// Build a plain literal without language tag or datatype.
    pub fn literal(value: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            lang: None,
            datatype: None,
        }
    }

    /// Build a language-tagged literal.
    pub fn lang_literal(value: impl Into<String>, lang: impl Into<String>) -> Self {
        RdfTerm::Literal {
            value: value.into(),
            lang: Some(lang.into()),
            datatype: None,
        }
    }

    /// The URI if this term is a resource.
    pub fn uri(&self) -> Option<&str> {
        match self {
            RdfTerm::Uri(uri) => Some(uri),
            RdfTerm::Literal { .. } => None,
        }
    }

    /// The literal value if this term is a literal.
    pub fn value(&self) -> Option<&str> {
        match self {
            RdfTerm::Literal { value, .. } => Some(value),
            RdfTerm::Uri(_) => None,
        }
    }

    /// The language tag if this term is a language-tagged literal.
    pub fn lang(&self) -> Option<&str> {
        match self {
            RdfTerm::Literal { lang, .. } => lang.as_deref(),
            RdfTerm::Uri(_) => None,
        }
    }

    /// Whether this term is a resource.
    pub fn is_uri(&self) -> bool {
        matches!(self, RdfTerm::Uri(_))
    }
}

/// One row of a SPARQL SELECT result: variable name → bound term.
///
/// Unbound variables (OPTIONAL patterns without a match) are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectRow(HashMap<String, RdfTerm>);

impl SelectRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable. Returns self for fixture-style chaining.
    pub fn bind(mut self, var: impl Into<String>, term: RdfTerm) -> Self {
        self.0.insert(var.into(), term);
        self
    }

    pub fn insert(&mut self, var: impl Into<String>, term: RdfTerm) {
        self.0.insert(var.into(), term);
    }

    pub fn get(&self, var: &str) -> Option<&RdfTerm> {
        self.0.get(var)
    }

    /// Whether the variable is bound in this row.
    pub fn contains(&self, var: &str) -> bool {
        self.0.contains_key(var)
    }

    /// URI of the named variable, if bound to a resource.
    pub fn uri(&self, var: &str) -> Option<&str> {
        self.0.get(var).and_then(RdfTerm::uri)
    }

    /// Literal value of the named variable, if bound to a literal.
    pub fn value(&self, var: &str) -> Option<&str> {
        self.0.get(var).and_then(RdfTerm::value)
    }

    /// Language tag of the named variable, if bound to a tagged literal.
    pub fn lang(&self, var: &str) -> Option<&str> {
        self.0.get(var).and_then(RdfTerm::lang)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_accessors() {
        let uri = RdfTerm::Uri("http://example.com/c1".to_string());
        assert_eq!(uri.uri(), Some("http://example.com/c1"));
        assert_eq!(uri.value(), None);
        assert!(uri.is_uri());

        let lit = RdfTerm::lang_literal("Katze", "de");
        assert_eq!(lit.value(), Some("Katze"));
        assert_eq!(lit.lang(), Some("de"));
        assert_eq!(lit.uri(), None);
    }

    #[test]
    fn test_row_bound_and_unbound() {
        let row = SelectRow::new()
            .bind("concept", RdfTerm::Uri("http://example.com/c1".to_string()))
            .bind("prefLabel", RdfTerm::lang_literal("Cat", "en"));

        assert_eq!(row.uri("concept"), Some("http://example.com/c1"));
        assert_eq!(row.value("prefLabel"), Some("Cat"));
        assert_eq!(row.lang("prefLabel"), Some("en"));
        assert!(!row.contains("altLabel"));
        assert_eq!(row.value("altLabel"), None);
    }

    #[test]
    fn test_row_type_mismatch_yields_none() {
        let row = SelectRow::new().bind("prefLabel", RdfTerm::lang_literal("Cat", "en"));
        // Asking for the URI of a literal binding is None, not a panic.
        assert_eq!(row.uri("prefLabel"), None);
    }
}
