pub mod api;
pub mod betting;
pub mod config;
pub mod db;
pub mod errors;
pub mod metrics;
pub mod models;

use crate::betting::BetManager;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: AppConfig,
    pub bets: BetManager,
    pub metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
}

impl AppState {
    pub fn new(
        db: sqlx::SqlitePool,
        config: AppConfig,
        metrics_handle: metrics_exporter_prometheus::PrometheusHandle,
    ) -> Self {
        let bets = BetManager::new(db.clone(), config.stake_config());
        Self {
            db,
            config,
            bets,
            metrics_handle,
        }
    }
}
