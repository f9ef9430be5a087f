use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::constants::DATABASE_UNAVAILABLE_MESSAGE;
use crate::database::DatabaseManager;
use crate::middleware::ApiResponse;
use crate::state::AppState;

/// GET /health - liveness plus a round trip to the document store
pub async fn health(State(state): State<AppState>) -> Response {
    let now = chrono::Utc::now();

    match DatabaseManager::health_check(state.store.as_ref()).await {
        Ok(()) => ApiResponse::success(json!({
            "status": "ok",
            "timestamp": now,
            "database": "ok",
            "backend": state.store.backend(),
        }))
        .into_response(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            ApiResponse::message(StatusCode::SERVICE_UNAVAILABLE, DATABASE_UNAVAILABLE_MESSAGE)
                .into_response()
        }
    }
}
