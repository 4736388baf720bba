//! HTTP control API module
//!
//! This module binds the engine's user-facing controls to HTTP endpoints.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Displayed mode
        .route("/mode/next", post(next_mode_handler))
        .route("/mode", put(set_mode_handler))
        .route("/toggle", post(toggle_handler))
        .route("/reset", post(reset_handler))
        // Per-mode controls
        .route("/timers/:mode/:action", post(timer_action_handler))
        // Field editors of the displayed mode
        .route("/fields/:field", put(set_field_handler))
        .route("/fields/:field/increase", post(increase_field_handler))
        .route("/fields/:field/decrease", post(decrease_field_handler))
        .route("/fields/:field/press/:direction", post(press_field_handler))
        .route("/fields/:field/release", post(release_field_handler))
        // Preferences
        .route("/preferences", get(get_preferences_handler).put(apply_preferences_handler))
        .route("/preferences/save", post(save_preferences_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
