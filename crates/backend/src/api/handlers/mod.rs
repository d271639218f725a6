use axum::http::StatusCode;
use axum::Json;
use contracts::analytics::ApiError;

use crate::shared::error::AnalyticsError;

pub mod overview;
pub mod stores;

/// Uniform 500 payload: a stable context string for the client plus the
/// underlying error message for debugging.
fn failure(context: &str, err: AnalyticsError) -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::with_message(context, err.to_string())),
    )
}
