pub mod bet;

pub use bet::{BetRecord, NewBet, Outcome, ParseOutcomeError};
