//! Wheel of fortune.
//!
//! A static cumulative-boundary table: twelve pockets of uneven width over
//! `TIER_SCALE`, each mapped to a multiplier (hundredths). The table is
//! validated when the configuration is written; spins only reduce the scalar
//! and look the tier up.

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{AssetId, GameKind, OutcomeDetail, UnitOutcome, TIER_SCALE};

use super::GameError;
use crate::engine::Engine;
use crate::payout::payout;
use crate::platform::Platform;
use crate::resolve::TierTable;
use crate::rng::EntropySource;

impl<P: Platform> Engine<P> {
    /// Spin `spins` times at `wager` per spin.
    pub fn play_wheel(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
        wager: u64,
        spins: u16,
    ) -> Result<Vec<UnitOutcome>, GameError> {
        let (setup, config) = self.begin_play(player, GameKind::Wheel, asset, wager, spins, true)?;
        let table = TierTable::new(config.tier_widths.clone())?;

        let mut outcomes = Vec::with_capacity(setup.units as usize);
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
            outcomes.push(UnitOutcome {
                detail: OutcomeDetail::Tier { index: tier as u8 },
                multiplier,
                payout: paid,
            });
        }

        self.settle_rewards(
            player,
            GameKind::Wheel,
            asset,
            setup.wager,
            setup.units,
            outcomes.clone(),
            0,
            0,
            vec![],
        )?;
        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{create_account_keypair, TestPlatform};

    const ASSET: AssetId = AssetId(1);

    struct ScalarEntropy(u64);

    impl EntropySource for ScalarEntropy {
        fn next_scalar(&self, _nonce: u64) -> u64 {
            self.0
        }

        fn path_digest(&self, _asset_tag: &[u8], _counter: u64) -> [u8; 32] {
            [0u8; 32]
        }
    }

    fn funded_engine(player: &PublicKey) -> Engine<TestPlatform> {
        let mut platform = TestPlatform::new();
        platform.fund_treasury(ASSET, 1_000_000);
        platform.fund_caller(player, ASSET, 100_000);
        Engine::new(platform)
    }

    #[test]
    fn scalar_4700_lands_in_tier_five() {
        // Cumulative widths: 100, 110, 610, 2110, 4610, 4710, ... — 4700 sits
        // in [4610, 4710), the tier that starts at the 4610 boundary.
        let (_, player) = create_account_keypair(1);
        let mut engine = funded_engine(&player);

        let outcomes = engine
            .play_wheel(&player, ASSET, &ScalarEntropy(4_700), 100, 1)
            .expect("play");
        assert_eq!(outcomes[0].detail, OutcomeDetail::Tier { index: 5 });
        assert_eq!(outcomes[0].multiplier, 800);
        assert_eq!(outcomes[0].payout, 800);
    }

    #[test]
    fn boundary_scalars_belong_to_the_starting_tier() {
        let (_, player) = create_account_keypair(2);
        let mut engine = funded_engine(&player);

        let outcomes = engine
            .play_wheel(&player, ASSET, &ScalarEntropy(4_609), 100, 1)
            .expect("play");
        assert_eq!(outcomes[0].detail, OutcomeDetail::Tier { index: 4 });

        let outcomes = engine
            .play_wheel(&player, ASSET, &ScalarEntropy(4_610), 100, 1)
            .expect("play");
        assert_eq!(outcomes[0].detail, OutcomeDetail::Tier { index: 5 });
    }

    #[test]
    fn scalars_reduce_modulo_the_scale() {
        let (_, player) = create_account_keypair(3);
        let mut engine = funded_engine(&player);

        // 30_000 reduces to 0: the first pocket.
        let outcomes = engine
            .play_wheel(&player, ASSET, &ScalarEntropy(30_000), 100, 1)
            .expect("play");
        assert_eq!(outcomes[0].detail, OutcomeDetail::Tier { index: 0 });
    }

    #[test]
    fn treasury_shortfall_aborts_the_spin() {
        let (_, player) = create_account_keypair(4);
        let mut platform = TestPlatform::new();
        platform.fund_caller(&player, ASSET, 100_000);
        let mut engine = Engine::new(platform);

        // Tier 1 pays 80x; an unfunded treasury (only the escrowed 100)
        // cannot cover it.
        let err = engine
            .play_wheel(&player, ASSET, &ScalarEntropy(105), 100, 1)
            .expect_err("treasury too small");
        assert_eq!(err, GameError::InsufficientFunds);
        assert_eq!(engine.ledger().total_winnings(ASSET), 0);
    }
}
