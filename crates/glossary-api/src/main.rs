//! glossary-api - HTTP API server binary.

use std::net::SocketAddr;

use axum::http::Request;
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use glossary_api::{router, AppState};
use glossary_core::{defaults, GlossaryConfig, UrlSettings};
use glossary_store::registry;

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful
/// for log correlation when chasing slow store round trips.
#[derive(Clone, Default)]
struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

fn env_or(name: &str, fallback: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| fallback.to_string())
}

/// Build the glossary configuration from the environment.
///
/// `GLOSSARY_ENDPOINT_URL` is optional: without it the server still runs,
/// with every read operation degrading to empty results.
fn config_from_env() -> GlossaryConfig {
    let languages: Vec<String> = env_or("GLOSSARY_LANGUAGES", defaults::DEFAULT_LANGUAGE)
        .split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    let mut config = match std::env::var("GLOSSARY_ENDPOINT_URL") {
        Ok(endpoint) => GlossaryConfig::new(endpoint),
        Err(_) => GlossaryConfig::default(),
    };
    config = config.languages(languages).url_settings(UrlSettings {
        base_url: env_or("GLOSSARY_BASE_URL", "http://localhost"),
        language_prefix: std::env::var("GLOSSARY_LANGUAGE_PREFIX").ok(),
        base_path: env_or("GLOSSARY_BASE_PATH", "glossary"),
        site_language: env_or("GLOSSARY_SITE_LANGUAGE", defaults::DEFAULT_LANGUAGE),
        default_site_language: env_or("GLOSSARY_DEFAULT_SITE_LANGUAGE", defaults::DEFAULT_LANGUAGE),
    });
    config
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "glossary_api=debug,glossary_store=debug,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config_from_env();
    let glossary = registry::instance(&config);

    let app = router(AppState { glossary })
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(CorsLayer::permissive());

    let port: u16 = env_or("GLOSSARY_PORT", &defaults::SERVER_PORT.to_string())
        .parse()
        .unwrap_or(defaults::SERVER_PORT);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(
        subsystem = "api",
        component = "server",
        op = "startup",
        port = port,
        endpoint = config.endpoint_url.as_deref().unwrap_or("-"),
        "Glossary API listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
