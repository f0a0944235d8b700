//! Structured logging field name constants for the glossary.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-row iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "api", "store", "graph"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "glossary", "sparql_client", "visual_mapper", "registry"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "autocomplete", "get_list", "get_concept", "select"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// SPARQL query text (logged on execution errors).
pub const QUERY: &str = "query";

/// Language code the operation was invoked with.
pub const LANGUAGE: &str = "language";

/// Concept or resource URI being operated on.
pub const CONCEPT_URI: &str = "concept_uri";

/// Autocomplete search term.
pub const SEARCH_TERM: &str = "search_term";

/// Listing letter filter.
pub const LETTER: &str = "letter";

/// Visual mapper root type ("project", "conceptScheme", ...).
pub const ROOT_TYPE: &str = "root_type";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of result rows returned by a query.
pub const ROW_COUNT: &str = "row_count";

/// Number of shaped results returned to the caller.
pub const RESULT_COUNT: &str = "result_count";

/// Total node count of a visual mapper tree.
pub const NODE_COUNT: &str = "node_count";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
