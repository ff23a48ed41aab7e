// Gatehouse API server
// Decision: Store and signing config are built once at startup; any
// misconfiguration is fatal here, never surfaced as a per-request failure

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse_api::auth::middleware::AuthState;
use gatehouse_api::config::ServerConfig;
use gatehouse_api::storage::InMemoryUserStore;
use gatehouse_core::TokenService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present, then initialize tracing
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gatehouse_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("gatehouse-api starting...");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        algorithm = ?config.token.algorithm,
        ttl_secs = config.token.default_ttl.as_secs(),
        "Token signing configured"
    );

    // Populate the read-only user store
    let store = match &config.users_fixture {
        Some(path) => InMemoryUserStore::from_fixture(path)
            .context("Failed to load user fixture")?,
        None => InMemoryUserStore::dev_seed().context("Failed to build dev seed")?,
    };
    tracing::info!(users = store.len(), "User store populated");

    let token_service = TokenService::new(config.token.clone());
    let auth_state = AuthState::new(token_service, Arc::new(store));

    let app = gatehouse_api::api_router(auth_state);

    // Add CORS layer only if origins are configured
    let cors_origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|s| s.parse().ok())
        .collect();

    let app = if cors_origins.is_empty() {
        tracing::info!("CORS not configured (same-origin requests only)");
        app
    } else {
        tracing::info!(origins = ?cors_origins, "CORS origins configured");
        app.layer(
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(cors_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                    header::ORIGIN,
                ])
                .allow_credentials(true),
        )
    };

    // Add tracing
    let app = app.layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;
    tracing::info!("HTTP server listening on {}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
