use axum::{routing::get, Router};

use crate::api::{handlers, AppState};

/// All application routes.
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // Dashboard overview
        .route("/api/analytics/app-wide", get(handlers::overview::app_wide))
        .route("/api/analytics/stores", get(handlers::stores::list))
        // Per-store drill-down
        .route("/api/stores/:id", get(handlers::stores::detail))
        .with_state(state)
}
