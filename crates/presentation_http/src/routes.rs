//! Route definitions

use axum::{
    Router,
    routing::{get, post},
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and status endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Board API (v1)
        .route("/v1/boards", get(handlers::boards::list_boards))
        .route("/v1/boards/{unique_id}", get(handlers::boards::get_board))
        .route(
            "/v1/boards/{unique_id}/refresh",
            post(handlers::boards::refresh_board),
        )
        // Stop lookup (v1)
        .route("/v1/stops", get(handlers::stops::search_stops))
        // Attach state
        .with_state(state)
}
