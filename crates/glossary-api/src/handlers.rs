//! HTTP handlers for the glossary API.
//!
//! Most operations degrade to empty JSON results per the store layer's
//! error policy; the visual-mapper endpoint is the one path that answers
//! HTTP 500 with a user-facing error body.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use glossary_core::{defaults, CharacterAvailability, ConceptLookup, Error};

use crate::AppState;

fn default_autocomplete_limit() -> usize {
    defaults::AUTOCOMPLETE_LIMIT
}

// =============================================================================
// AUTOCOMPLETE
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct AutocompleteParams {
    /// Search term; empty yields an empty suggestion list.
    #[serde(default)]
    pub s: String,
    #[serde(default)]
    pub lang: String,
    #[serde(default = "default_autocomplete_limit")]
    pub limit: usize,
}

pub async fn autocomplete(
    State(state): State<AppState>,
    Query(params): Query<AutocompleteParams>,
) -> Response {
    let suggestions = state
        .glossary
        .autocomplete(&params.s, params.limit, &params.lang)
        .await;
    Json(suggestions).into_response()
}

// =============================================================================
// LISTING
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Starting letter; empty lists all concepts.
    #[serde(rename = "char", default)]
    pub letter: String,
    #[serde(default)]
    pub lang: String,
    /// Maximum number of items, 0 for unbounded.
    #[serde(default)]
    pub limit: usize,
}

pub async fn concepts(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Response {
    let concepts = state
        .glossary
        .get_list(&params.letter, &params.lang, params.limit)
        .await;
    Json(concepts).into_response()
}

// =============================================================================
// CONCEPT DETAIL
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ConceptParams {
    pub uri: String,
    #[serde(default)]
    pub lang: String,
}

pub async fn concept(
    State(state): State<AppState>,
    Query(params): Query<ConceptParams>,
) -> Response {
    match state.glossary.get_concept(&params.uri, &params.lang).await {
        ConceptLookup::Found(concept) => Json(concept).into_response(),
        // Degraded shape: the concept exists but not in this language.
        ConceptLookup::MissingLanguage(stub) => Json(stub).into_response(),
        ConceptLookup::NotFound => {
            (StatusCode::NOT_FOUND, Json(json!({"error": "concept not found"}))).into_response()
        }
    }
}

// =============================================================================
// RESOURCE DUMP
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ResourceParams {
    pub uri: String,
}

pub async fn resource(
    State(state): State<AppState>,
    Query(params): Query<ResourceParams>,
) -> Response {
    match state.glossary.get_resource(&params.uri).await {
        Some(record) => Json(record).into_response(),
        None => {
            (StatusCode::NOT_FOUND, Json(json!({"error": "resource not found"}))).into_response()
        }
    }
}

// =============================================================================
// STATS
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    #[serde(default)]
    pub lang: String,
}

/// Counts are `null` when the store errored, per the degradation policy.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub concepts: Option<u64>,
    pub concept_schemes: Option<u64>,
}

pub async fn stats(State(state): State<AppState>, Query(params): Query<StatsParams>) -> Response {
    let concepts = state.glossary.count_concepts(&params.lang).await;
    let concept_schemes = state.glossary.count_concept_schemes(&params.lang).await;
    Json(StatsResponse {
        concepts,
        concept_schemes,
    })
    .into_response()
}

// =============================================================================
// VISUAL MAPPER
// =============================================================================

fn default_visual_mapper_language() -> String {
    defaults::DEFAULT_LANGUAGE.to_string()
}

#[derive(Debug, Deserialize)]
pub struct VisualMapperParams {
    /// Root URI; absent renders the synthetic project root.
    pub uri: Option<String>,
    #[serde(default = "default_visual_mapper_language")]
    pub lang: String,
}

pub async fn visual_mapper_data(
    State(state): State<AppState>,
    Query(params): Query<VisualMapperParams>,
) -> Response {
    match state
        .glossary
        .visual_mapper_data(params.uri.as_deref(), &params.lang)
        .await
    {
        Ok(tree) => Json(tree).into_response(),
        Err(e) => {
            // The one fatal path: log message and query, answer 500.
            match &e {
                Error::Query { message, query } => error!(
                    subsystem = "api",
                    component = "visual_mapper",
                    op = "get_visual_mapper_data",
                    error = message.as_str(),
                    query = query.as_str(),
                    "Visual mapper query failed"
                ),
                other => error!(
                    subsystem = "api",
                    component = "visual_mapper",
                    op = "get_visual_mapper_data",
                    error = %other,
                    "Visual mapper request failed"
                ),
            }
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": format!("An error occurred building the visual mapper data: {e}")
                })),
            )
                .into_response()
        }
    }
}

// =============================================================================
// CHARACTER AVAILABILITY
// =============================================================================

pub async fn refresh_characters(State(state): State<AppState>) -> Json<CharacterAvailability> {
    Json(state.glossary.update_character_list().await)
}

// =============================================================================
// HEALTH
// =============================================================================

pub async fn health(State(state): State<AppState>) -> Response {
    let store_available = state.glossary.available().await;
    Json(json!({
        "status": "ok",
        "store_available": store_available,
    }))
    .into_response()
}
