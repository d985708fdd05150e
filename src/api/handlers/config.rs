use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::betting::StakeConfig;
use crate::AppState;

use super::ApiResponse;

#[derive(Serialize)]
pub struct ConfigView {
    /// Sizing parameters the bet manager is actually using.
    pub sizing: StakeConfig,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
}

/// GET /api/config - active sizing and server settings
pub async fn get_config(State(state): State<AppState>) -> Json<ApiResponse<ConfigView>> {
    let c = &state.config;

    Json(ApiResponse::ok(ConfigView {
        sizing: *state.bets.stake_config(),
        host: c.host.clone(),
        port: c.port,
        db_max_connections: c.db_max_connections,
    }))
}
