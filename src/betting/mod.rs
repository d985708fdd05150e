pub mod lifecycle;
pub mod stake_sizer;
pub mod summary;

pub use lifecycle::{BetManager, PlacedBet};
pub use stake_sizer::{compute_stake, quote, StakeBreakdown, StakeConfig};
pub use summary::{summarize, LedgerSummary};
