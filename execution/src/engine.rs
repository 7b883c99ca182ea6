//! Settlement backbone and claim orchestration.
//!
//! One play walks Validating → Escrowing → Resolving → Paying → Crediting →
//! Done. The engine performs every fallible validation before its first
//! mutation and returns the first error to the host, which aborts the whole
//! transaction; there is no engine-side rollback.

use std::collections::BTreeMap;

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{
    AssetId, ConfigInvariantError, Drained, Event, GameConfig, GameKind, RewardKind, UnitOutcome,
};
use tracing::debug;

use crate::games::GameError;
use crate::ledger::RewardLedger;
use crate::payout::accumulate;
use crate::platform::Platform;

/// Validated, escrowed state handed to a game's resolving stage.
#[derive(Debug)]
pub(crate) struct PlaySetup {
    pub wager: u64,
    pub units: u16,
    /// First nonce reserved for this play; unit `i` draws with
    /// `base_nonce + i`.
    pub base_nonce: u64,
}

pub struct Engine<P: Platform> {
    configs: BTreeMap<(GameKind, AssetId), GameConfig>,
    ledger: RewardLedger,
    platform: P,
}

impl<P: Platform> Engine<P> {
    pub fn new(platform: P) -> Self {
        Self {
            configs: BTreeMap::new(),
            ledger: RewardLedger::new(),
            platform,
        }
    }

    /// Install or replace a game configuration. Invariants are enforced here,
    /// at write time; play-time table failures are configuration defects.
    /// The play counter is owned by the engine: replacing a config carries
    /// the existing counter forward so nonces are never rewound.
    pub fn install_config(
        &mut self,
        kind: GameKind,
        asset: AssetId,
        mut config: GameConfig,
    ) -> Result<(), ConfigInvariantError> {
        config.validate_invariants()?;
        if let Some(existing) = self.configs.get(&(kind, asset)) {
            config.plays = existing.plays;
        }
        self.configs.insert((kind, asset), config);
        Ok(())
    }

    pub fn config(&self, kind: GameKind, asset: AssetId) -> Option<&GameConfig> {
        self.configs.get(&(kind, asset))
    }

    pub fn ledger(&self) -> &RewardLedger {
        &self.ledger
    }

    pub(crate) fn ledger_mut(&mut self) -> &mut RewardLedger {
        &mut self.ledger
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Validating + Escrowing.
    ///
    /// Lazily creates the per-asset config record on first play, checks the
    /// active flags and wager/unit bounds, advances the play counter by
    /// `units` BEFORE any draw, then escrows the lump-sum wager. When
    /// `escrow_from_caller` is false the play is house-staked (a banked free
    /// play) and no funds move in.
    pub(crate) fn begin_play(
        &mut self,
        player: &PublicKey,
        kind: GameKind,
        asset: AssetId,
        wager: u64,
        units: u16,
        escrow_from_caller: bool,
    ) -> Result<(PlaySetup, GameConfig), GameError> {
        if !self.platform.treasury_active(asset) {
            return Err(GameError::InactiveGame);
        }

        let config = self
            .configs
            .entry((kind, asset))
            .or_insert_with(|| GameConfig::default_for(kind));
        if !config.active {
            return Err(GameError::InactiveGame);
        }
        if wager < config.min_wager || wager > config.max_wager {
            return Err(GameError::OutOfBounds {
                what: "wager",
                value: wager,
                min: config.min_wager,
                max: config.max_wager,
            });
        }
        if units < config.min_units || units > config.max_units {
            return Err(GameError::OutOfBounds {
                what: "units",
                value: units as u64,
                min: config.min_units as u64,
                max: config.max_units as u64,
            });
        }
        let escrow = wager
            .checked_mul(units as u64)
            .ok_or(GameError::ArithmeticOverflow)?;

        // Reserve nonces before drawing so they are never reused across or
        // within plays, even if a later stage aborts.
        let base_nonce = config.plays;
        config.plays = config
            .plays
            .checked_add(units as u64)
            .ok_or(GameError::ArithmeticOverflow)?;
        let snapshot = config.clone();

        if escrow_from_caller {
            self.platform.withdraw_from_caller(player, asset, escrow)?;
            self.platform.treasury_deposit(asset, escrow)?;
        }

        debug!(
            game = ?kind,
            ?asset,
            wager,
            units,
            base_nonce,
            escrowed = escrow_from_caller,
            "play escrowed"
        );

        Ok((
            PlaySetup {
                wager,
                units,
                base_nonce,
            },
            snapshot,
        ))
    }

    /// Paying + Crediting + Done.
    ///
    /// Sums the per-unit payouts, extracts the total from the treasury
    /// (insufficient treasury funds abort the play), credits the reward
    /// ledger and emits the outcome record. Returns the total payout.
    pub(crate) fn settle_rewards(
        &mut self,
        player: &PublicKey,
        kind: GameKind,
        asset: AssetId,
        wager: u64,
        units: u16,
        outcomes: Vec<UnitOutcome>,
        tickets: u64,
        credits: u64,
        free_plays: Vec<u16>,
    ) -> Result<u64, GameError> {
        let mut total_payout: u64 = 0;
        for outcome in &outcomes {
            total_payout = accumulate(total_payout, outcome.payout)?;
        }

        if total_payout > 0 {
            self.platform.treasury_extract(asset, total_payout)?;
            self.ledger.credit_winnings(player, asset, total_payout)?;
        }
        if tickets > 0 {
            self.ledger.credit_tickets(player, asset, tickets)?;
        }
        if credits > 0 {
            self.ledger.credit_credits(player, asset, credits)?;
        }
        for win_bps in free_plays {
            self.ledger.credit_free_play(player, asset, win_bps)?;
        }

        debug!(game = ?kind, ?asset, wager, units, total_payout, "play settled");
        self.platform.emit(Event::PlaySettled {
            player: player.clone(),
            game: kind,
            asset,
            wager,
            units,
            outcomes,
            total_payout,
        });
        Ok(total_payout)
    }

    /// Hold a prize item for a player until claimed: custody moves from the
    /// host to the engine and the item id is credited to the reward account.
    /// Invoked by external drawing flows (e.g. a raffle draw naming a
    /// winner).
    pub fn award_prize_item(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        item: u64,
    ) -> Result<(), GameError> {
        self.platform.withdraw_item(item)?;
        self.ledger.credit_item(player, asset, item)
    }

    /// Drain the requested reward kinds in caller order and forward each to
    /// its transfer primitive. Idempotent: an immediate second claim drains
    /// zeros and transfers nothing.
    pub fn claim(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        kinds: &[RewardKind],
    ) -> Result<Vec<Drained>, GameError> {
        if kinds.is_empty() {
            return Ok(vec![]);
        }
        let drained = self.ledger.claim(player, asset, kinds)?;

        for entry in &drained {
            match entry {
                Drained::Winnings(amount) => {
                    if *amount > 0 {
                        self.platform.deposit_to(player, asset, *amount)?;
                    }
                }
                Drained::Tickets(amount) => {
                    if *amount > 0 {
                        self.platform.mint_tickets(player, *amount)?;
                    }
                }
                Drained::Credits(amount) => {
                    if *amount > 0 {
                        self.platform.emit(Event::CreditsRedeemed {
                            player: player.clone(),
                            asset,
                            amount: *amount,
                        });
                    }
                }
                Drained::Items(items) => {
                    for item in items {
                        self.platform.deposit_item(player, *item)?;
                    }
                }
            }
        }

        debug!(?asset, kinds = kinds.len(), "rewards claimed");
        self.platform.emit(Event::RewardsClaimed {
            player: player.clone(),
            asset,
            drained: drained.clone(),
        });
        Ok(drained)
    }
}
