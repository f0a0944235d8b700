//! # glossary-store
//!
//! SPARQL store layer for the SKOS glossary.
//!
//! This crate provides:
//! - Parameterized SPARQL query templates with injection-safe value binding
//! - The SPARQL 1.1 Protocol HTTP client (JSON results format)
//! - The glossary repository: autocomplete, alphabetic listings, concept
//!   detail, counts, resource dumps, a-z availability
//! - The visual-mapper relation graph builder
//! - A process-wide instance registry keyed by configuration identity
//!
//! ## Example
//!
//! ```rust,ignore
//! use glossary_core::GlossaryConfig;
//! use glossary_store::Glossary;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = GlossaryConfig::new("http://localhost:8890/sparql")
//!         .languages(["en", "de"]);
//!     let glossary = Glossary::new(config);
//!
//!     for suggestion in glossary.autocomplete("cat", 15, "en").await {
//!         println!("{} -> {}", suggestion.label, suggestion.url);
//!     }
//! }
//! ```

pub mod client;
pub mod escape;
pub mod glossary;
pub mod graph;
pub mod mock;
pub mod queries;
pub mod registry;

pub use client::SparqlEndpointClient;
pub use glossary::Glossary;

// Re-export core types
pub use glossary_core::*;
