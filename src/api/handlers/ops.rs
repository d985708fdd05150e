use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// GET /health - the ledger table must be reachable, not just the file.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let row = sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM bets")
        .fetch_one(&state.db)
        .await;

    match row {
        Ok((bets,)) => (StatusCode::OK, Json(json!({ "status": "healthy", "bets": bets }))),
        Err(e) => {
            tracing::error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "status": "unhealthy", "db": "unavailable" })),
            )
        }
    }
}

/// GET /metrics - Prometheus scrape payload
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    ([(CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], state.metrics_handle.render())
}
