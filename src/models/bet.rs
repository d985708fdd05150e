use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Pending,
    Won,
    Lost,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown outcome '{0}', expected pending, won or lost")]
pub struct ParseOutcomeError(pub String);

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Pending => "pending",
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }

    /// Bankroll after applying this outcome to a bet.
    pub fn resulting_bankroll(
        &self,
        bankroll: Decimal,
        stake: Decimal,
        potential_gain: Decimal,
    ) -> Decimal {
        match self {
            Outcome::Pending => bankroll,
            Outcome::Won => bankroll.saturating_add(potential_gain),
            Outcome::Lost => bankroll.saturating_sub(stake),
        }
    }
}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Outcome::Pending),
            "won" => Ok(Outcome::Won),
            "lost" => Ok(Outcome::Lost),
            _ => Err(ParseOutcomeError(s.to_string())),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// BetRecord
// ---------------------------------------------------------------------------

/// Database row for the bets table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BetRecord {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub bankroll: Decimal,
    pub odds: Decimal,
    pub win_probability: Decimal,
    pub stake: Decimal,
    pub potential_gain: Decimal,
    pub outcome: Outcome,
    pub resulting_bankroll: Decimal,
}

impl BetRecord {
    pub fn is_settled(&self) -> bool {
        self.outcome != Outcome::Pending
    }
}

/// A bet about to be inserted; the id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBet {
    pub created_at: DateTime<Utc>,
    pub bankroll: Decimal,
    pub odds: Decimal,
    pub win_probability: Decimal,
    pub stake: Decimal,
    pub potential_gain: Decimal,
}

// Decimals are stored as TEXT, so rows are decoded by hand.
impl<'r> FromRow<'r, SqliteRow> for BetRecord {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let outcome: String = row.try_get("outcome")?;

        Ok(Self {
            id: row.try_get("id")?,
            created_at: row.try_get("created_at")?,
            bankroll: decimal_column(row, "bankroll")?,
            odds: decimal_column(row, "odds")?,
            win_probability: decimal_column(row, "win_probability")?,
            stake: decimal_column(row, "stake")?,
            potential_gain: decimal_column(row, "potential_gain")?,
            outcome: outcome.parse().map_err(|e| sqlx::Error::ColumnDecode {
                index: "outcome".into(),
                source: Box::new(e),
            })?,
            resulting_bankroll: decimal_column(row, "resulting_bankroll")?,
        })
    }
}

fn decimal_column(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.into(),
        source: Box::new(e),
    })
}
