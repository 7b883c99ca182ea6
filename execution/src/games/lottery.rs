//! Tiered lottery.
//!
//! Cumulative-boundary allocation over a jackpot-tailed table: the rarest
//! tier sits first and the final, widest tier pays nothing. Losing draws earn
//! consolation raffle tickets at the configured rate.

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{AssetId, GameKind, OutcomeDetail, UnitOutcome, TIER_SCALE};

use super::GameError;
use crate::engine::Engine;
use crate::payout::{loss_credit, payout};
use crate::platform::Platform;
use crate::resolve::TierTable;
use crate::rng::EntropySource;

impl<P: Platform> Engine<P> {
    /// Buy `draws` lottery draws at `wager` per draw.
    pub fn play_lottery(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
        wager: u64,
        draws: u16,
    ) -> Result<Vec<UnitOutcome>, GameError> {
        let (setup, config) =
            self.begin_play(player, GameKind::Lottery, asset, wager, draws, true)?;
        let table = TierTable::new(config.tier_widths.clone())?;

        let mut outcomes = Vec::with_capacity(setup.units as usize);
        let mut tickets: u64 = 0;
        for unit in 0..setup.units {
            let scalar = entropy.next_scalar(setup.base_nonce + unit as u64);
            let tier = table.resolve(scalar % TIER_SCALE)?;
            let multiplier =
                *config
                    .multiplier_table
                    .get(tier)
                    .ok_or(GameError::InvalidVariant {
                        what: "multiplier index",
                        value: tier as u64,
                    })?;
            let paid = payout(setup.wager, multiplier, config.multiplier_divisor)?;
            if multiplier == 0 {
                // Consolation tickets on the losing tier, same floor rule as
                // loss credits.
                tickets = tickets
                    .checked_add(loss_credit(setup.wager, config.ticket_rate))
                    .ok_or(GameError::ArithmeticOverflow)?;
            }
            outcomes.push(UnitOutcome {
                detail: OutcomeDetail::Tier { index: tier as u8 },
                multiplier,
                payout: paid,
            });
        }

        self.settle_rewards(
            player,
            GameKind::Lottery,
            asset,
            setup.wager,
            setup.units,
            outcomes.clone(),
            tickets,
            0,
            vec![],
        )?;
        Ok(outcomes)
    }
}
