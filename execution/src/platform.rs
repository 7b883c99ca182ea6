//! Host platform seam.
//!
//! The engine consumes its collaborators — treasury escrow, fungible and
//! non-fungible transfer primitives, ticket issuance and the event sink —
//! through this one trait. Everything is synchronous: one play or claim is
//! one indivisible host transaction, and the host commits or reverts it
//! wholesale.

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{AssetId, Event};

use crate::games::GameError;

pub trait Platform {
    /// Whether the treasury accepts this asset at all (distinct from the
    /// per-game active flag).
    fn treasury_active(&self, asset: AssetId) -> bool;

    /// Move escrowed wagers into the treasury.
    fn treasury_deposit(&mut self, asset: AssetId, amount: u64) -> Result<(), GameError>;

    /// Extract payout funds from the treasury. Fails with
    /// [`GameError::InsufficientFunds`] when the treasury cannot cover the
    /// amount; the engine never extracts without a matching settlement.
    fn treasury_extract(&mut self, asset: AssetId, amount: u64) -> Result<(), GameError>;

    /// Withdraw the wager from the caller's spendable balance.
    fn withdraw_from_caller(
        &mut self,
        caller: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError>;

    /// Deliver claimed winnings to a player.
    fn deposit_to(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError>;

    /// Take custody of a prize item, to be held in the reward ledger until
    /// claimed.
    fn withdraw_item(&mut self, item: u64) -> Result<(), GameError>;

    /// Deliver a claimed held item to a player.
    fn deposit_item(&mut self, player: &PublicKey, item: u64) -> Result<(), GameError>;

    /// Mint raffle tickets drained by a claim.
    fn mint_tickets(&mut self, player: &PublicKey, amount: u64) -> Result<(), GameError>;

    /// Fire-and-forget outcome record; never read back by the engine.
    fn emit(&mut self, event: Event);
}
