use betledger::api::router::create_router;
use betledger::config::AppConfig;
use betledger::{db, metrics, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;
    let addr = format!("{}:{}", config.host, config.port);

    tracing::info!(database_url = %config.database_url, "Opening bet ledger...");
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Bet ledger ready");

    tracing::info!(
        kelly_fraction = %config.kelly_fraction,
        max_stake_fraction = %config.max_stake_fraction,
        min_stake = %config.min_stake,
        "Stake sizing configured"
    );

    let metrics_handle = metrics::init_metrics();
    let state = AppState::new(pool, config, metrics_handle);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    // LOG_FORMAT=json for machine-readable logs
    let json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(json.then(|| fmt::layer().json()))
        .with((!json).then(fmt::layer))
        .init();
}
