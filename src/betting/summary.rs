use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{BetRecord, Outcome};

/// Aggregate view of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerSummary {
    pub total_bets: i64,
    pub pending: i64,
    pub won: i64,
    pub lost: i64,
    pub total_staked: Decimal,
    /// Sum of `resulting_bankroll - bankroll` over settled bets.
    pub realized_profit: Decimal,
    /// `resulting_bankroll` of the most recent bet, if any.
    pub latest_bankroll: Option<Decimal>,
}

pub fn summarize(bets: &[BetRecord]) -> LedgerSummary {
    let mut summary = LedgerSummary {
        total_bets: bets.len() as i64,
        pending: 0,
        won: 0,
        lost: 0,
        total_staked: Decimal::ZERO,
        realized_profit: Decimal::ZERO,
        latest_bankroll: None,
    };

    for bet in bets {
        match bet.outcome {
            Outcome::Pending => summary.pending += 1,
            Outcome::Won => summary.won += 1,
            Outcome::Lost => summary.lost += 1,
        }
        summary.total_staked = summary.total_staked.saturating_add(bet.stake);
        if bet.is_settled() {
            let profit = bet.resulting_bankroll.saturating_sub(bet.bankroll);
            summary.realized_profit = summary.realized_profit.saturating_add(profit);
        }
    }

    summary.latest_bankroll = bets
        .iter()
        .max_by_key(|b| b.id)
        .map(|b| b.resulting_bankroll);

    summary
}
