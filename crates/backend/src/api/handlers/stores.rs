use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use contracts::analytics::store::{StoreDetailResponse, StoreListResponse};
use contracts::analytics::ApiError;

use crate::api::AppState;

pub async fn list(State(state): State<AppState>) -> impl IntoResponse {
    match state.provider.all_stores().await {
        Ok(stores) => {
            let body = StoreListResponse {
                count: stores.len(),
                stores,
                timestamp: Utc::now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(err) => {
            tracing::error!("store list failed: {err}");
            super::failure("Failed to fetch stores", err).into_response()
        }
    }
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    match state.provider.store_analytics(&id).await {
        Ok(Some(detail)) => {
            let body = StoreDetailResponse {
                detail,
                timestamp: Utc::now(),
            };
            (StatusCode::OK, Json(body)).into_response()
        }
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiError::new("Store not found")),
        )
            .into_response(),
        Err(err) => {
            tracing::error!("store analytics failed for '{id}': {err}");
            super::failure("Failed to fetch store analytics", err).into_response()
        }
    }
}
