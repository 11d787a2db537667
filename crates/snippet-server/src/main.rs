//! Snippet Server
//!
//! HTTP service for storing and retrieving short text snippets (code and log
//! excerpts) under 8 character ids.
//!
//! Backed either by an in-process list or by an embedded SQLite database,
//! chosen at startup through `SNIPPETS_STORE`.

mod config;
mod error;
mod extractors;
mod handlers;
mod services;
mod storage;

use anyhow::{Context, Result};
use axum::{routing::get, Router};
use snippet_core::SnippetStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::{ServerConfig, StoreKind};
use crate::services::SnippetService;
use crate::storage::{Database, MemoryStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub snippets: Arc<SnippetService>,
}

#[tokio::main]
async fn main() {
    // Set up panic hook to log crashes
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()));
        let payload = if let Some(s) = info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        eprintln!("[PANIC] at {:?}: {}", location, payload);
        tracing::error!("PANIC at {:?}: {}", location, payload);
    }));

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("[FATAL] Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!("Starting Snippet Server v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_server().await {
        error!("Server failed: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_server() -> Result<()> {
    let config = ServerConfig::load().context("Failed to load configuration")?;
    let addr = config.socket_addr()?;
    info!("Config loaded: bind={}, store={:?}", addr, config.store);

    let store = open_store(&config).await?;
    let state = AppState {
        snippets: Arc::new(SnippetService::new(store, config.list_limit())),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn open_store(config: &ServerConfig) -> Result<Arc<dyn SnippetStore>> {
    match config.store {
        StoreKind::Memory => {
            warn!("Using in-memory store, snippets are lost on restart");
            let store = if config.seed {
                MemoryStore::seeded()
            } else {
                MemoryStore::new()
            };
            Ok(Arc::new(store))
        }
        StoreKind::Sqlite => {
            let db = Database::connect(&config.database_url)
                .await
                .context("Failed to initialize database")?;
            Ok(Arc::new(db))
        }
    }
}

pub(crate) fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route(
            "/snippets",
            get(handlers::snippets::list).post(handlers::snippets::create),
        )
        .route(
            "/snippets/:id",
            get(handlers::snippets::get)
                .put(handlers::snippets::update)
                .delete(handlers::snippets::delete),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
