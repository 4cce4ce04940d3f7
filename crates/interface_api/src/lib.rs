//! HTTP API Layer
//!
//! This crate provides the REST API for the device warranty platform using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each domain
//! - **Middleware**: Authentication, authorization, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put, delete},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use core_kernel::{ActivityLogPort, HealthCheckable};
use domain_claims::ClaimService;
use domain_pricing::{PlanBook, PricingCatalog};
use domain_warranty::WarrantyService;

use crate::config::ApiConfig;
use crate::middleware::{auth_middleware, audit_middleware};
use crate::handlers::{activity, claims, health, pricing, warranty};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub warranty: Arc<WarrantyService>,
    pub claims: Arc<ClaimService>,
    pub plans: Arc<PlanBook>,
    pub catalog: &'static PricingCatalog,
    pub activity: Arc<dyn ActivityLogPort>,
    pub health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Wired application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Pricing routes
    let pricing_routes = Router::new()
        .route("/", get(pricing::list_plans))
        .route("/quote", get(pricing::quote));

    // Inspection and warranty routes
    let warranty_routes = Router::new()
        .route("/", post(warranty::submit_inspection))
        .route("/", get(warranty::list_inspections))
        .route("/:id", get(warranty::get_inspection))
        .route("/:id", delete(warranty::delete_inspection))
        .route("/imei/:imei", get(warranty::get_inspection_by_imei))
        .route("/:id/purchase", post(warranty::start_purchase))
        .route("/:id/purchase/confirm", post(warranty::confirm_purchase))
        .route("/:id/activate", post(warranty::activate_warranty))
        .route("/:id/fine", post(warranty::issue_fine))
        .route("/:id/warranty", get(warranty::get_warranty));

    // Claims routes
    let claims_routes = Router::new()
        .route("/", post(claims::submit_claim))
        .route("/", get(claims::list_claims))
        .route("/:id", get(claims::get_claim))
        .route("/:id/status", put(claims::update_status));

    // Activity feed routes
    let activity_routes = Router::new().route("/", get(activity::recent_activity));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/plans", pricing_routes)
        .nest("/inspections", warranty_routes)
        .nest("/claims", claims_routes)
        .nest("/activity", activity_routes)
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
