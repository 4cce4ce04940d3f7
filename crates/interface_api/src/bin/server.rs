//! Device Warranty Platform - API Server Binary
//!
//! This binary starts the HTTP API server for the device warranty platform.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin warranty-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 API_JWT_SECRET=... cargo run --bin warranty-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_JWT_SECRET` - JWT signing secret (required in production)
//! * `API_JWT_EXPIRATION_SECS` - JWT token expiration in seconds (default: 3600)
//! * `API_TIMEZONE` - IANA timezone coverage periods are anchored to (default: Asia/Kolkata)
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::ClaimService;
use domain_pricing::{PlanBook, PricingCatalog};
use domain_warranty::WarrantyService;
use infra_store::{
    MemoryActivityLog, MemoryClaimStore, MemoryStore, MemoryWarrantyStore, TrustedCallbackGateway,
};
use interface_api::{config::ApiConfig, create_router, AppState};

/// Main entry point for the API server.
///
/// Initializes logging, loads configuration, wires the domain services over
/// the in-memory document store, and starts the HTTP server.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration cannot be loaded from environment
/// - The configured timezone is not a known IANA name
/// - Server fails to bind to the configured address
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    // Load configuration from environment
    let config = load_config()?;

    // Initialize tracing/logging
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Device Warranty Platform API Server"
    );

    // Resolve the business timezone before wiring anything
    let timezone = config.business_timezone()?;
    tracing::info!(timezone = %timezone.0.name(), "Coverage periods anchored");

    // Wire the domain services over the shared document store
    let store = Arc::new(MemoryStore::new());
    let warranty_store = Arc::new(MemoryWarrantyStore::new(store.clone()));
    let claim_store = Arc::new(MemoryClaimStore::new(store.clone()));
    let activity_log = Arc::new(MemoryActivityLog::new(store.clone()));
    let gateway = Arc::new(TrustedCallbackGateway::new());
    let plans = Arc::new(PlanBook::standard());

    let warranty_service = Arc::new(WarrantyService::new(
        warranty_store.clone(),
        gateway,
        activity_log.clone(),
        plans.clone(),
        timezone,
    ));
    let claim_service = Arc::new(ClaimService::new(
        claim_store,
        warranty_store,
        activity_log.clone(),
    ));

    let state = AppState {
        warranty: warranty_service,
        claims: claim_service,
        plans,
        catalog: PricingCatalog::standard(),
        activity: activity_log,
        health: store,
        config: config.clone(),
    };

    // Create the API router
    let app = create_router(state);

    // Parse server address
    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(%addr, "Server listening");

    // Create TCP listener and serve
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads API configuration from environment variables.
///
/// Falls back to default values if environment variables are not set.
///
/// # Returns
///
/// `ApiConfig` populated from environment or defaults
fn load_config() -> Result<ApiConfig, Box<dyn std::error::Error>> {
    // Try to load from environment with API_ prefix
    let config = ApiConfig::from_env().unwrap_or_else(|_| {
        // Fall back to individual env vars or defaults
        ApiConfig {
            host: std::env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("API_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: std::env::var("API_JWT_SECRET")
                .unwrap_or_else(|_| "dev-secret-change-in-production".to_string()),
            jwt_expiration_secs: std::env::var("API_JWT_EXPIRATION_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(3600),
            log_level: std::env::var("API_LOG_LEVEL")
                .or_else(|_| std::env::var("RUST_LOG"))
                .unwrap_or_else(|_| "info".to_string()),
            timezone: std::env::var("API_TIMEZONE")
                .unwrap_or_else(|_| "Asia/Kolkata".to_string()),
        }
    });

    Ok(config)
}

/// Initializes the tracing subscriber for structured logging.
///
/// # Arguments
///
/// * `log_level` - The minimum log level to output (trace, debug, info, warn, error)
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
