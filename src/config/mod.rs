use rust_decimal::Decimal;
use std::env;

use crate::betting::stake_sizer::StakeConfig;

const DEFAULT_DATABASE_URL: &str = "sqlite://bets.db";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,

    // Stake sizing
    pub kelly_fraction: Decimal,
    pub max_stake_fraction: Decimal,
    pub min_stake: Decimal,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".into())
                .parse()?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()?,

            kelly_fraction: env::var("KELLY_FRACTION")
                .unwrap_or_else(|_| "0.25".into())
                .parse()?,
            max_stake_fraction: env::var("MAX_STAKE_FRACTION")
                .unwrap_or_else(|_| "0.10".into())
                .parse()?,
            min_stake: env::var("MIN_STAKE")
                .unwrap_or_else(|_| "1".into())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject sizing parameters the calculator cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.kelly_fraction <= Decimal::ZERO || self.kelly_fraction > Decimal::ONE {
            anyhow::bail!("KELLY_FRACTION must be in (0, 1], got {}", self.kelly_fraction);
        }
        if self.max_stake_fraction <= Decimal::ZERO || self.max_stake_fraction > Decimal::ONE {
            anyhow::bail!(
                "MAX_STAKE_FRACTION must be in (0, 1], got {}",
                self.max_stake_fraction
            );
        }
        if self.min_stake.is_sign_negative() {
            anyhow::bail!("MIN_STAKE must not be negative, got {}", self.min_stake);
        }
        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        Ok(())
    }

    pub fn stake_config(&self) -> StakeConfig {
        StakeConfig {
            kelly_fraction: self.kelly_fraction,
            max_stake_fraction: self.max_stake_fraction,
            min_stake: self.min_stake,
        }
    }
}
