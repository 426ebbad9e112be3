//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::{delete, get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{accounts, health, ussd};
use crate::state::AppState;

// ============================================================================
// Concurrency Limiting Constants
// ============================================================================

/// Maximum concurrent requests for account-management endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## USSD (aggregator callbacks, not rate limited)
/// - `POST /ussd` - Handle one session step
///
/// ## Management (rate limited)
/// - `GET /ussd/callback-logs` - List logged callback requests
/// - `POST /accounts` - Create account
/// - `GET /accounts/cid/:client_id` - Get account by client ID
/// - `GET /accounts/phone/:phone_number` - Get account by phone number
/// - `DELETE /accounts/:phone_number` - Delete account by phone number
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    // Build CORS layer
    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    // Create concurrency-limited management routes
    let account_routes = Router::new()
        .route("/", post(accounts::create_account))
        .route("/cid/:client_id", get(accounts::get_account_by_client_id))
        .route("/phone/:phone_number", get(accounts::get_account_by_phone))
        .route("/:phone_number", delete(accounts::delete_account))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    let callback_log_routes = Router::new()
        .route("/", get(ussd::list_callback_logs))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public, no rate limit)
        .route("/health", get(health::health))
        // Aggregator callbacks (no rate limit - the aggregator must never be throttled)
        .route("/ussd", post(ussd::ussd_callback))
        .nest("/ussd/callback-logs", callback_log_routes)
        .nest("/accounts", account_routes)
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
