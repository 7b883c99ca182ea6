//! Test doubles for the host platform.

use std::collections::BTreeMap;

use commonware_cryptography::{
    ed25519::{PrivateKey, PublicKey},
    sha256::Sha256,
    Hasher, Signer,
};
use midway_types::games::{AssetId, Event};

use crate::games::GameError;
use crate::platform::Platform;
use crate::rng::DrawContext;

/// Creates an account keypair for Ed25519 signatures used by players.
pub fn create_account_keypair(seed: u64) -> (PrivateKey, PublicKey) {
    let private = PrivateKey::from_seed(seed);
    let public = private.public_key();
    (private, public)
}

/// Creates a deterministic draw context for tests.
pub fn create_draw_context(seed: u64, timestamp: u64) -> DrawContext {
    let mut hasher = Sha256::new();
    hasher.update(&seed.to_be_bytes());
    DrawContext {
        tx_unique: hasher.finalize().0,
        timestamp,
    }
}

/// In-memory host platform with recorded events and running escrow totals.
#[derive(Default)]
pub struct TestPlatform {
    pub treasury: BTreeMap<AssetId, u64>,
    pub inactive_assets: Vec<AssetId>,
    pub caller_balances: BTreeMap<(PublicKey, AssetId), u64>,
    pub minted_tickets: BTreeMap<PublicKey, u64>,
    pub item_vault: Vec<u64>,
    pub player_items: BTreeMap<PublicKey, Vec<u64>>,
    pub events: Vec<Event>,
    /// Running totals for conservation assertions.
    pub total_deposited: BTreeMap<AssetId, u64>,
    pub total_extracted: BTreeMap<AssetId, u64>,
}

impl TestPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fund_treasury(&mut self, asset: AssetId, amount: u64) {
        *self.treasury.entry(asset).or_default() += amount;
    }

    pub fn fund_caller(&mut self, caller: &PublicKey, asset: AssetId, amount: u64) {
        *self
            .caller_balances
            .entry((caller.clone(), asset))
            .or_default() += amount;
    }

    pub fn deactivate_asset(&mut self, asset: AssetId) {
        self.inactive_assets.push(asset);
    }

    pub fn stock_item(&mut self, item: u64) {
        self.item_vault.push(item);
    }

    pub fn treasury_balance(&self, asset: AssetId) -> u64 {
        self.treasury.get(&asset).copied().unwrap_or(0)
    }

    pub fn caller_balance(&self, caller: &PublicKey, asset: AssetId) -> u64 {
        self.caller_balances
            .get(&(caller.clone(), asset))
            .copied()
            .unwrap_or(0)
    }
}

impl Platform for TestPlatform {
    fn treasury_active(&self, asset: AssetId) -> bool {
        !self.inactive_assets.contains(&asset)
    }

    fn treasury_deposit(&mut self, asset: AssetId, amount: u64) -> Result<(), GameError> {
        let balance = self.treasury.entry(asset).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        *self.total_deposited.entry(asset).or_default() += amount;
        Ok(())
    }

    fn treasury_extract(&mut self, asset: AssetId, amount: u64) -> Result<(), GameError> {
        let balance = self.treasury.entry(asset).or_default();
        if *balance < amount {
            return Err(GameError::InsufficientFunds);
        }
        *balance -= amount;
        *self.total_extracted.entry(asset).or_default() += amount;
        Ok(())
    }

    fn withdraw_from_caller(
        &mut self,
        caller: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError> {
        let balance = self
            .caller_balances
            .entry((caller.clone(), asset))
            .or_default();
        if *balance < amount {
            return Err(GameError::InsufficientFunds);
        }
        *balance -= amount;
        Ok(())
    }

    fn deposit_to(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        amount: u64,
    ) -> Result<(), GameError> {
        let balance = self
            .caller_balances
            .entry((player.clone(), asset))
            .or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(())
    }

    fn withdraw_item(&mut self, item: u64) -> Result<(), GameError> {
        let position = self
            .item_vault
            .iter()
            .position(|held| *held == item)
            .ok_or(GameError::InvalidVariant {
                what: "item",
                value: item,
            })?;
        self.item_vault.remove(position);
        Ok(())
    }

    fn deposit_item(&mut self, player: &PublicKey, item: u64) -> Result<(), GameError> {
        self.player_items.entry(player.clone()).or_default().push(item);
        Ok(())
    }

    fn mint_tickets(&mut self, player: &PublicKey, amount: u64) -> Result<(), GameError> {
        let minted = self.minted_tickets.entry(player.clone()).or_default();
        *minted = minted
            .checked_add(amount)
            .ok_or(GameError::ArithmeticOverflow)?;
        Ok(())
    }

    fn emit(&mut self, event: Event) {
        self.events.push(event);
    }
}
