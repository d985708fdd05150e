use chrono::Utc;
use metrics::{counter, histogram};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::bet_repo;
use crate::errors::BetError;
use crate::models::{BetRecord, NewBet, Outcome};

use super::stake_sizer::{quote, StakeBreakdown, StakeConfig};
use super::summary::{summarize, LedgerSummary};

/// A freshly placed bet plus the figures derived at placement time.
#[derive(Debug, Clone, Serialize)]
pub struct PlacedBet {
    #[serde(flatten)]
    pub bet: BetRecord,
    pub bankroll_if_won: Decimal,
    pub bankroll_if_lost: Decimal,
    /// Not persisted.
    pub expected_value: Decimal,
}

/// Places, settles and removes bets against the ledger.
///
/// Owns the store handle and the sizing parameters; cheap to clone.
#[derive(Clone)]
pub struct BetManager {
    pool: SqlitePool,
    stake_config: StakeConfig,
}

impl BetManager {
    pub fn new(pool: SqlitePool, stake_config: StakeConfig) -> Self {
        Self { pool, stake_config }
    }

    pub fn stake_config(&self) -> &StakeConfig {
        &self.stake_config
    }

    /// Size a bet without recording it.
    pub fn quote(
        &self,
        bankroll: Decimal,
        odds: Decimal,
        win_probability: Decimal,
    ) -> Result<StakeBreakdown, BetError> {
        validate_inputs(bankroll, odds, win_probability)?;
        Ok(quote(bankroll, odds, win_probability, &self.stake_config))
    }

    /// Validate inputs, size the stake and record the bet as pending.
    pub async fn place_bet(
        &self,
        bankroll: Decimal,
        odds: Decimal,
        win_probability: Decimal,
    ) -> Result<PlacedBet, BetError> {
        let sizing = self.quote(bankroll, odds, win_probability)?;

        let new_bet = NewBet {
            created_at: Utc::now(),
            bankroll,
            odds,
            win_probability,
            stake: sizing.stake,
            potential_gain: sizing.potential_gain,
        };
        let bet = bet_repo::insert_bet(&self.pool, &new_bet).await?;

        counter!("bets_placed_total").increment(1);
        histogram!("bet_stake").record(bet.stake.to_f64().unwrap_or(0.0));
        tracing::info!(
            bet_id = bet.id,
            bankroll = %bet.bankroll,
            odds = %bet.odds,
            win_probability = %bet.win_probability,
            stake = %bet.stake,
            expected_value = %sizing.expected_value,
            "Bet placed"
        );

        Ok(PlacedBet {
            bet,
            bankroll_if_won: sizing.bankroll_if_won,
            bankroll_if_lost: sizing.bankroll_if_lost,
            expected_value: sizing.expected_value,
        })
    }

    /// Apply an outcome and return the resulting bankroll.
    ///
    /// Always computed from the bet's original bankroll, stake and gain, so
    /// settling the same bet twice with the same outcome gives the same result.
    pub async fn settle_bet(&self, id: i64, outcome: Outcome) -> Result<Decimal, BetError> {
        let bet = bet_repo::get_bet(&self.pool, id).await?;
        let resulting_bankroll =
            outcome.resulting_bankroll(bet.bankroll, bet.stake, bet.potential_gain);

        bet_repo::update_outcome(&self.pool, id, outcome, resulting_bankroll).await?;

        counter!("bets_settled_total", "outcome" => outcome.as_str()).increment(1);
        tracing::info!(
            bet_id = id,
            previous = %bet.outcome,
            outcome = %outcome,
            resulting_bankroll = %resulting_bankroll,
            "Bet settled"
        );

        Ok(resulting_bankroll)
    }

    /// Delete a bet. Unknown ids are ignored.
    pub async fn remove_bet(&self, id: i64) -> Result<(), BetError> {
        let deleted = bet_repo::delete_bet(&self.pool, id).await?;

        if deleted {
            counter!("bets_deleted_total").increment(1);
            tracing::info!(bet_id = id, "Bet deleted");
        } else {
            tracing::debug!(bet_id = id, "Delete requested for unknown bet");
        }

        Ok(())
    }

    pub async fn list_bets(&self) -> Result<Vec<BetRecord>, BetError> {
        bet_repo::list_bets(&self.pool).await
    }

    pub async fn get_bet(&self, id: i64) -> Result<BetRecord, BetError> {
        bet_repo::get_bet(&self.pool, id).await
    }

    pub async fn summary(&self) -> Result<LedgerSummary, BetError> {
        let bets = bet_repo::list_bets(&self.pool).await?;
        Ok(summarize(&bets))
    }
}

fn validate_inputs(
    bankroll: Decimal,
    odds: Decimal,
    win_probability: Decimal,
) -> Result<(), BetError> {
    let problem = if bankroll <= Decimal::ZERO {
        Some(format!("bankroll must be greater than 0, got {bankroll}"))
    } else if odds <= Decimal::ONE {
        Some(format!("odds must be greater than 1, got {odds}"))
    } else if win_probability < Decimal::ZERO || win_probability > Decimal::ONE {
        Some(format!(
            "win probability must be between 0 and 1, got {win_probability}"
        ))
    } else {
        None
    };

    match problem {
        Some(msg) => {
            counter!("bet_validation_failures_total").increment(1);
            tracing::warn!(%bankroll, %odds, %win_probability, "Rejected bet input: {msg}");
            Err(BetError::Validation(msg))
        }
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_validate_inputs() {
        assert!(validate_inputs(dec("1000"), dec("1.28"), dec("0.9")).is_ok());
        assert!(validate_inputs(dec("1000"), dec("1.01"), dec("0")).is_ok());
        assert!(validate_inputs(dec("1000"), dec("1.01"), dec("1")).is_ok());

        for (b, o, p) in [
            ("0", "1.5", "0.5"),
            ("-10", "1.5", "0.5"),
            ("100", "1", "0.5"),
            ("100", "0.9", "0.5"),
            ("100", "1.5", "-0.01"),
            ("100", "1.5", "1.01"),
        ] {
            let err = validate_inputs(dec(b), dec(o), dec(p)).unwrap_err();
            assert!(matches!(err, BetError::Validation(_)), "{b} {o} {p}");
        }
    }

    #[test]
    fn test_placed_bet_serializes_flat() {
        let placed = PlacedBet {
            bet: BetRecord {
                id: 1,
                created_at: Utc::now(),
                bankroll: dec("1000"),
                odds: dec("1.28"),
                win_probability: dec("0.9"),
                stake: dec("100.00"),
                potential_gain: dec("28.0000"),
                outcome: Outcome::Pending,
                resulting_bankroll: dec("1000"),
            },
            bankroll_if_won: dec("1028"),
            bankroll_if_lost: dec("900"),
            expected_value: dec("15.2"),
        };

        let json = serde_json::to_value(&placed).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["stake"], "100.00");
        assert_eq!(json["outcome"], "pending");
        assert_eq!(json["bankroll_if_lost"], "900");
    }
}
