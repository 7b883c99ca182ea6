//! Midway execution engine.
//!
//! This crate contains the deterministic settlement logic ([`Engine`]) and the
//! outcome-resolution machinery shared by every wagering game.
//!
//! ## Determinism requirements
//! - Do not use wall-clock time inside the engine; the host supplies a coarse
//!   timestamp through [`rng::DrawContext`].
//! - Do not use non-deterministic randomness; only derive draws from the
//!   provided transaction context and play counters.
//! - Avoid iteration order of hash-based collections influencing outputs
//!   (ledger state lives in `BTreeMap`s).
//!
//! ## Transaction model
//! One play or claim is one synchronous host transaction. The engine never
//! rolls back: it validates before mutating, and any error returned to the
//! host aborts the whole transaction, so partial escrows or credits are never
//! committed.

pub mod engine;
pub mod games;
pub mod ledger;
pub mod payout;
pub mod platform;
pub mod resolve;
pub mod rng;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;

pub use engine::Engine;
pub use games::{DiceBet, GameError, RaffleKind};
pub use ledger::RewardLedger;
pub use platform::Platform;
pub use resolve::{resolve_path, Path, TierTable};
pub use rng::{DrawContext, EntropySource, TxEntropy};
