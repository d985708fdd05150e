use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Bets
        .route("/api/bets", get(handlers::bets::list).post(handlers::bets::place))
        .route("/api/bets/summary", get(handlers::bets::summary))
        .route(
            "/api/bets/:id",
            get(handlers::bets::detail).delete(handlers::bets::remove),
        )
        .route("/api/bets/:id/settle", post(handlers::bets::settle))
        // Config
        .route("/api/config", get(handlers::config::get_config))
        // Sizing preview
        .route("/api/stake/quote", get(handlers::stake::quote));

    let public = Router::new()
        .route("/health", get(handlers::ops::health_check))
        .route("/metrics", get(handlers::ops::metrics));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
