use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers::{AppState, create_booking, list_bookings, list_rooms};

/// Creates the API router with all study room booking endpoints
///
/// - GET /health - Health check
/// - GET /rooms - List study rooms
/// - GET /bookings?date=YYYY-MM-DD - List bookings, optionally for one date
/// - POST /bookings - Book the first available room for a date
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))
        .route("/rooms", get(list_rooms))
        .route("/bookings", get(list_bookings).post(create_booking))
        // Add tracing middleware
        .layer(TraceLayer::new_for_http())
        // Add application state
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
