use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::api::AppState;
use crate::dashboards::overview::service;

pub async fn app_wide(State(state): State<AppState>) -> impl IntoResponse {
    match service::get_overview(state.provider.as_ref()).await {
        Ok(overview) => (StatusCode::OK, Json(overview)).into_response(),
        Err(err) => {
            tracing::error!("app-wide analytics failed: {err}");
            super::failure("Failed to fetch analytics", err).into_response()
        }
    }
}
