//! API routes module
//!
//! This module defines all HTTP API routes for the event API.

pub mod events;
pub mod health;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create all API routes
/// Note: These are nested under /api by axum_helpers::create_router
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/v3/app/events", events::router(state))
        .merge(health::router(state.clone()))
}

/// Informational root route, mounted at the top level of the app
pub fn root_router() -> Router {
    Router::new().route("/", get(root))
}

async fn root() -> &'static str {
    "Event API is running. Use the /api/v3/app/events endpoint."
}
