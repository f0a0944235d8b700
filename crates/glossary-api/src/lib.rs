//! glossary-api - HTTP API server for the SKOS glossary.
//!
//! The router and handlers live in the library so integration tests can
//! drive them without binding a socket; the binary wires middleware,
//! configuration, and the listener around [`router`].

pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, routing::post, Router};

use glossary_store::Glossary;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub glossary: Arc<Glossary>,
}

/// Build the API router over the given state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/autocomplete", get(handlers::autocomplete))
        .route("/concepts", get(handlers::concepts))
        .route("/concept", get(handlers::concept))
        .route("/resource", get(handlers::resource))
        .route("/stats", get(handlers::stats))
        .route("/get-visual-mapper-data", get(handlers::visual_mapper_data))
        .route("/characters/refresh", post(handlers::refresh_characters))
        .route("/health", get(handlers::health))
        .with_state(state)
}
