//! # glossary-core
//!
//! Core types, traits, and abstractions for the SKOS glossary.
//!
//! This crate provides the foundational data structures and trait definitions
//! that the other glossary crates depend on: the concept data model, the RDF
//! term/row model returned by the store, configuration, label utilities, and
//! the canonical URL composer.

pub mod config;
pub mod defaults;
pub mod error;
pub mod labels;
pub mod logging;
pub mod models;
pub mod rdf;
pub mod traits;
pub mod url;

// Re-export commonly used types at crate root
pub use config::{AdvancedSettings, GlossaryConfig, LanguageMapping, UrlSettings};
pub use error::{Error, Result};
pub use labels::{clean_definition, normalize_label, slugify};
pub use models::*;
pub use rdf::{RdfTerm, SelectRow};
pub use traits::{
    ExternalDefinitions, ListQueryAlter, ListQueryContext, RelatedResourceProvider, SparqlClient,
};
pub use url::UrlComposer;
