use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tower::ServiceExt;

use betledger::api::router::create_router;
use betledger::betting::{BetManager, StakeConfig};
use betledger::config::AppConfig;
use betledger::AppState;

/// Fresh in-memory ledger with the schema applied.
#[allow(dead_code)]
pub async fn setup_test_db() -> SqlitePool {
    betledger::db::init_pool("sqlite::memory:", 1)
        .await
        .expect("Failed to open in-memory ledger")
}

#[allow(dead_code)]
pub fn test_config() -> AppConfig {
    AppConfig {
        database_url: "sqlite::memory:".into(),
        db_max_connections: 1,
        host: "127.0.0.1".into(),
        port: 0,
        kelly_fraction: Decimal::new(25, 2),
        max_stake_fraction: Decimal::new(10, 2),
        min_stake: Decimal::ONE,
    }
}

#[allow(dead_code)]
pub async fn setup_manager() -> BetManager {
    BetManager::new(setup_test_db().await, StakeConfig::default())
}

#[allow(dead_code)]
pub async fn build_test_app() -> Router {
    build_test_app_with_pool().await.0
}

/// Router plus a handle on its pool, for tests that need to break the store.
#[allow(dead_code)]
pub async fn build_test_app_with_pool() -> (Router, SqlitePool) {
    let pool = setup_test_db().await;
    let metrics_handle = betledger::metrics::init_metrics();
    let router = create_router(AppState::new(pool.clone(), test_config(), metrics_handle));
    (router, pool)
}

/// Send a raw body with a JSON content type.
#[allow(dead_code)]
pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

/// Send a request and decode the JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    (status, json)
}

#[allow(dead_code)]
pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

/// Read a decimal serialized as a JSON string.
#[allow(dead_code)]
pub fn json_dec(value: &serde_json::Value) -> Decimal {
    value
        .as_str()
        .unwrap_or_else(|| panic!("expected decimal string, got {value}"))
        .parse()
        .unwrap()
}
