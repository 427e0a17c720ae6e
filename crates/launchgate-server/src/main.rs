//! Launchgate server entry point.
//!
//! Bootstraps the registration store and workflow state, then starts the
//! Axum HTTP server with graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use axum::http::HeaderValue;
use tokio::net::TcpListener;
use tracing::{info, warn};

use launchgate_storage::{MemoryStore, RegistrationStore};

use launchgate_server::config::{ServerConfig, StoreBackendType};
use launchgate_server::routes;
use launchgate_server::state::AppState;

use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Cap on in-flight API requests, keeping a burst from exhausting the
/// store's connection pool.
const MAX_IN_FLIGHT_REQUESTS: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    let store = build_store(&config).await?;
    let state = Arc::new(AppState::new(store));
    let app = build_router(state, &config);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "launchgate listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("launchgate stopped");
    Ok(())
}

/// Bootstrap the configured registration store.
async fn build_store(config: &ServerConfig) -> anyhow::Result<Arc<dyn RegistrationStore>> {
    match &config.store_backend {
        StoreBackendType::Memory => {
            info!("using in-memory store (data will not persist)");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "postgres-backend")]
        StoreBackendType::Postgres { url } => {
            info!("using PostgreSQL store");
            Ok(Arc::new(
                launchgate_storage::PostgresStore::connect(url)
                    .await
                    .context("failed to connect to PostgreSQL store")?,
            ))
        }
        #[cfg(not(feature = "postgres-backend"))]
        StoreBackendType::Postgres { .. } => {
            anyhow::bail!("PostgreSQL store requested but feature 'postgres-backend' is not enabled")
        }
    }
}

/// Build the Axum router with all routes and middleware.
fn build_router(state: Arc<AppState>, config: &ServerConfig) -> Router {
    // CORS — the splash and claim pages are served from another origin.
    let cors = CorsLayer::new()
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);
    let cors = match config.allowed_origin.as_deref().map(str::parse::<HeaderValue>) {
        Some(Ok(origin)) => cors.allow_origin(origin),
        Some(Err(_)) => {
            warn!("invalid LAUNCHGATE_ALLOWED_ORIGIN, allowing any origin");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    };

    routes::router(state)
        .layer(tower::limit::ConcurrencyLimitLayer::new(MAX_IN_FLIGHT_REQUESTS))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            axum::http::header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        if let Ok(mut sig) =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
        {
            sig.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received, stopping server");
}
