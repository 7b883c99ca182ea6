//! Game modules.
//!
//! Each game wires configuration, entropy, the outcome resolver and the
//! payout calculator into the shared settlement backbone on [`crate::Engine`].

mod coin_flip;
mod dice;
mod lottery;
mod path_drop;
mod raffle;
mod wheel;

pub use dice::DiceBet;
pub use raffle::RaffleKind;

use thiserror::Error;

/// Errors surfaced by plays and claims. Every variant is fatal to the
/// current transaction; the host reverts all state, so the engine never
/// recovers or retries locally.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("caller is not authorized")]
    Unauthorized,
    #[error("game is paused for this asset")]
    InactiveGame,
    #[error("{what} out of bounds (got={value}, allowed=[{min}, {max}])")]
    OutOfBounds {
        what: &'static str,
        value: u64,
        min: u64,
        max: u64,
    },
    #[error("no configuration or ledger entry for the requested game/asset")]
    MissingConfiguration,
    #[error("invalid {what} ({value})")]
    InvalidVariant { what: &'static str, value: u64 },
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("arithmetic overflow")]
    ArithmeticOverflow,
}
