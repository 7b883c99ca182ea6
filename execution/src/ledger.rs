//! Durable per-player reward ledger.
//!
//! Accounts are keyed by `(player, asset)` and accumulate heterogeneous
//! reward kinds between plays and claims. Creation is an explicit upsert on
//! first credit; accounts are never deleted — claims drain balances to zero
//! and the account persists.

use std::collections::BTreeMap;

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{
    AssetId, Drained, RewardAccount, RewardKind, MAX_FREE_PLAY_BANK, MAX_HELD_ITEMS,
};
use tracing::debug;

use crate::games::GameError;

/// All unclaimed rewards owed by the engine, across players and assets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RewardLedger {
    accounts: BTreeMap<(PublicKey, AssetId), RewardAccount>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn account(&self, player: &PublicKey, asset: AssetId) -> Option<&RewardAccount> {
        self.accounts.get(&(player.clone(), asset))
    }

    /// Explicit lazy-create: visible to tests, unlike null-object behavior.
    fn upsert(&mut self, player: &PublicKey, asset: AssetId) -> &mut RewardAccount {
        self.accounts
            .entry((player.clone(), asset))
            .or_insert_with(|| {
                debug!(?asset, "creating reward account");
                RewardAccount::default()
            })
    }

    pub fn credit_winnings(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError> {
        let account = self.upsert(player, asset);
        account.winnings = account
            .winnings
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn credit_tickets(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError> {
        let account = self.upsert(player, asset);
        account.tickets = account
            .tickets
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn credit_credits(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError> {
        let account = self.upsert(player, asset);
        account.credits = account
            .credits
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(())
    }

    /// Bank one free play, saving the win-chance parameter it will replay
    /// with. The bank is bounded so a single account cannot grow without
    /// limit.
    pub fn credit_free_play(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        win_bps: u16,
    ) -> Result<(), GameError> {
        let account = self.upsert(player, asset);
        if account.free_plays.len() >= MAX_FREE_PLAY_BANK {
            return Err(GameError::OutOfBounds {
                what: "free play bank",
                value: account.free_plays.len() as u64,
                min: 0,
                max: MAX_FREE_PLAY_BANK as u64,
            });
        }
        account.free_plays.push(win_bps);
        Ok(())
    }

    pub fn credit_item(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        item: u64,
    ) -> Result<(), GameError> {
        let account = self.upsert(player, asset);
        if account.items.len() >= MAX_HELD_ITEMS {
            return Err(GameError::OutOfBounds {
                what: "held items",
                value: account.items.len() as u64,
                min: 0,
                max: MAX_HELD_ITEMS as u64,
            });
        }
        account.items.push(item);
        Ok(())
    }

    /// Consume one banked free play, returning the oldest saved parameter.
    pub fn take_free_play(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
    ) -> Result<u16, GameError> {
        let account = self
            .accounts
            .get_mut(&(player.clone(), asset))
            .ok_or(GameError::MissingConfiguration)?;
        if account.free_plays.is_empty() {
            return Err(GameError::OutOfBounds {
                what: "free plays",
                value: 0,
                min: 1,
                max: MAX_FREE_PLAY_BANK as u64,
            });
        }
        Ok(account.free_plays.remove(0))
    }

    /// Drain the requested kinds in caller order, zeroing the ledger's copy
    /// of each. A player with no account for `asset` cannot claim under it;
    /// an empty request is a no-op. Draining an already-empty kind returns
    /// its zero value, never an error, so immediate re-claims are idempotent.
    pub fn claim(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        kinds: &[RewardKind],
    ) -> Result<Vec<Drained>, GameError> {
        if kinds.is_empty() {
            return Ok(vec![]);
        }
        let account = self
            .accounts
            .get_mut(&(player.clone(), asset))
            .ok_or(GameError::MissingConfiguration)?;

        let mut drained = Vec::with_capacity(kinds.len());
        for kind in kinds {
            drained.push(match kind {
                RewardKind::Winnings => Drained::Winnings(std::mem::take(&mut account.winnings)),
                RewardKind::Tickets => Drained::Tickets(std::mem::take(&mut account.tickets)),
                RewardKind::Credits => Drained::Credits(std::mem::take(&mut account.credits)),
                RewardKind::Items => Drained::Items(std::mem::take(&mut account.items)),
            });
        }
        Ok(drained)
    }

    /// Sum of fungible winnings currently owed for `asset` across all
    /// players. Conservation checks compare this against treasury
    /// extraction totals.
    pub fn total_winnings(&self, asset: AssetId) -> u64 {
        self.accounts
            .iter()
            .filter(|((_, a), _)| *a == asset)
            .map(|(_, account)| account.winnings)
            .sum()
    }
}
