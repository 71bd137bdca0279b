//! Party Ledger Backend
//!
//! REST backend for a farm-supply trading network: party accounts, their farms
//! (sub-parties), vendors, and dated party/vendor transaction entries, persisted
//! in SQLite.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod registry;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use auth::PlaintextVerifier;
use config::Config;
use db::Database;
use registry::{AccountRegistry, EntryLedger, SubPartyRegistry, VendorRegistry};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub accounts: Arc<AccountRegistry>,
    pub sub_parties: Arc<SubPartyRegistry>,
    pub vendors: Arc<VendorRegistry>,
    pub entries: Arc<EntryLedger>,
}

impl AppState {
    /// Wire every registry to the given database handle.
    pub fn new(db: Database, config: &Config) -> Self {
        let accounts = Arc::new(AccountRegistry::new(
            db.clone(),
            Arc::new(PlaintextVerifier),
        ));
        let sub_parties = Arc::new(SubPartyRegistry::new(db.clone(), accounts.clone()));
        let vendors = Arc::new(VendorRegistry::new(db.clone(), accounts.clone()));
        let entries = Arc::new(EntryLedger::new(db.clone(), config.allow_zero_amounts));

        Self {
            db,
            accounts,
            sub_parties,
            vendors,
            entries,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Party Ledger Backend");
    tracing::info!("Bind address: {}", config.bind_addr());
    if config.allow_zero_amounts {
        tracing::info!("Zero quantity/price accepted on entries");
    }

    // Initialize database
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("Database connected");

    let bind_addr = config.bind_addr();
    let state = AppState::new(db.clone(), &config);
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server running on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    db.close().await;
    tracing::info!("Database connection closed");

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Parties
        .route("/parties", get(api::list_parties).post(api::create_party))
        .route("/login", post(api::login))
        // Sub-parties
        .route("/parties/add", post(api::create_sub_party))
        .route("/parties/{parent_party_id}", get(api::list_sub_parties))
        // Vendors
        .route("/vendors", post(api::create_vendor))
        .route("/vendors/{party_id}", get(api::list_vendors))
        // Entries
        .route("/party-vendor-entries", post(api::create_entry));

    Router::new()
        .nest("/api", api_routes)
        .route("/health", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> (StatusCode, &'static str) {
    match state.db.health_check().await {
        Ok(()) => (StatusCode::OK, "OK"),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE")
        }
    }
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests;
