use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Fractional-Kelly sizing parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeConfig {
    /// Multiplier applied to the full Kelly fraction (default 0.25).
    pub kelly_fraction: Decimal,
    /// Ceiling on a single stake as a fraction of bankroll (default 10%).
    pub max_stake_fraction: Decimal,
    /// Floor on every stake, in currency units (default 1.00).
    pub min_stake: Decimal,
}

impl Default for StakeConfig {
    fn default() -> Self {
        Self {
            kelly_fraction: Decimal::new(25, 2),     // 0.25
            max_stake_fraction: Decimal::new(10, 2), // 0.10
            min_stake: Decimal::ONE,
        }
    }
}

/// Everything derived from one (bankroll, odds, probability) triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeBreakdown {
    pub bankroll: Decimal,
    pub odds: Decimal,
    pub win_probability: Decimal,
    /// Net payout per unit staked (`odds - 1`).
    pub net_odds: Decimal,
    pub full_kelly: Decimal,
    /// `full_kelly × kelly_fraction`, before the ceiling and floor.
    pub applied_fraction: Decimal,
    pub stake: Decimal,
    pub potential_gain: Decimal,
    pub expected_value: Decimal,
    pub bankroll_if_won: Decimal,
    pub bankroll_if_lost: Decimal,
}

/// Full Kelly fraction `f = (b·p − q) / b`. Negative when the bet has no edge.
///
/// Saturates to `Decimal::MIN`/`Decimal::MAX` when `b` is so small the
/// quotient is unrepresentable.
pub fn full_kelly(net_odds: Decimal, win_probability: Decimal) -> Decimal {
    if net_odds <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let q = Decimal::ONE - win_probability;
    let edge = net_odds.saturating_mul(win_probability) - q;

    edge.checked_div(net_odds).unwrap_or(if edge.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

/// Recommended stake, rounded half-up to cents.
///
/// The raw Kelly stake is capped at `bankroll × max_stake_fraction` and then
/// floored at `min_stake`, in that order, so a negative edge still yields
/// `min_stake` and a floor above the ceiling wins. Returns zero when
/// `odds <= 1`. Input ranges are not checked here.
pub fn compute_stake(
    bankroll: Decimal,
    odds: Decimal,
    win_probability: Decimal,
    config: &StakeConfig,
) -> Decimal {
    let net_odds = odds.saturating_sub(Decimal::ONE);
    if net_odds <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let fraction = full_kelly(net_odds, win_probability).saturating_mul(config.kelly_fraction);
    let raw = bankroll.saturating_mul(fraction);
    let ceiling = bankroll.saturating_mul(config.max_stake_fraction);

    round_cents(raw.min(ceiling).max(config.min_stake))
}

/// Stake plus the derived payoff figures shown to the user.
pub fn quote(
    bankroll: Decimal,
    odds: Decimal,
    win_probability: Decimal,
    config: &StakeConfig,
) -> StakeBreakdown {
    let net_odds = odds.saturating_sub(Decimal::ONE);
    let full = full_kelly(net_odds, win_probability);
    let stake = compute_stake(bankroll, odds, win_probability, config);
    let potential_gain = stake.saturating_mul(net_odds);
    let expected_value = win_probability.saturating_mul(potential_gain)
        - (Decimal::ONE - win_probability).saturating_mul(stake);

    StakeBreakdown {
        bankroll,
        odds,
        win_probability,
        net_odds,
        full_kelly: full,
        applied_fraction: full.saturating_mul(config.kelly_fraction),
        stake,
        potential_gain,
        expected_value,
        bankroll_if_won: bankroll.saturating_add(potential_gain),
        bankroll_if_lost: bankroll.saturating_sub(stake),
    }
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
