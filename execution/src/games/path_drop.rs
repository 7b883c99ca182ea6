//! Path-drop game (plinko-style).
//!
//! Each ball derives one digest and walks `pin_lines` binary steps, one
//! digest byte per step; the step sum indexes the multiplier table
//! (`pin_lines + 1` entries, symmetric and edge-heavy by default). Balls in
//! one play are independent draws against the same per-ball wager.

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{AssetId, GameKind, OutcomeDetail, UnitOutcome};

use super::GameError;
use crate::engine::Engine;
use crate::payout::payout;
use crate::platform::Platform;
use crate::resolve::resolve_path;
use crate::rng::EntropySource;

impl<P: Platform> Engine<P> {
    /// Drop `balls` balls at `wager` per ball.
    pub fn play_path_drop(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
        wager: u64,
        balls: u16,
    ) -> Result<Vec<UnitOutcome>, GameError> {
        let (setup, config) =
            self.begin_play(player, GameKind::PathDrop, asset, wager, balls, true)?;

        let mut outcomes = Vec::with_capacity(setup.units as usize);
        for unit in 0..setup.units {
            let counter = setup.base_nonce + unit as u64;
            let digest = entropy.path_digest(&asset.tag(), counter);
            let path = resolve_path(&digest, config.pin_lines)?;
            let multiplier = *config
                .multiplier_table
                .get(path.index as usize)
                .ok_or(GameError::InvalidVariant {
                    what: "multiplier index",
                    value: path.index as u64,
                })?;
            let paid = payout(setup.wager, multiplier, config.multiplier_divisor)?;
            outcomes.push(UnitOutcome {
                detail: OutcomeDetail::Path {
                    steps: path.steps,
                    index: path.index,
                },
                multiplier,
                payout: paid,
            });
        }

        self.settle_rewards(
            player,
            GameKind::PathDrop,
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
    use crate::mocks::{create_account_keypair, create_draw_context, TestPlatform};
    use crate::rng::TxEntropy;

    const ASSET: AssetId = AssetId(1);

    /// Entropy stub returning a fixed digest for every ball.
    struct FixedEntropy([u8; 32]);

    impl EntropySource for FixedEntropy {
        fn next_scalar(&self, _nonce: u64) -> u64 {
            0
        }

        fn path_digest(&self, _asset_tag: &[u8], _counter: u64) -> [u8; 32] {
            self.0
        }
    }

    fn funded_engine(player: &PublicKey) -> Engine<TestPlatform> {
        let mut platform = TestPlatform::new();
        platform.fund_treasury(ASSET, 1_000_000);
        platform.fund_caller(player, ASSET, 100_000);
        Engine::new(platform)
    }

    #[test]
    fn center_slot_pays_forty() {
        // Six odd bytes in the first twelve: step sum 6 lands on the center
        // multiplier (40 over divisor 100), so wager 100 pays exactly 40.
        let (_, player) = create_account_keypair(1);
        let mut engine = funded_engine(&player);
        let mut digest = [0u8; 32];
        for i in 0..6 {
            digest[i] = 1;
        }
        let entropy = FixedEntropy(digest);

        let outcomes = engine
            .play_path_drop(&player, ASSET, &entropy, 100, 1)
            .expect("play");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            outcomes[0].detail,
            OutcomeDetail::Path {
                steps: 0b11_1111,
                index: 6,
            }
        );
        assert_eq!(outcomes[0].multiplier, 40);
        assert_eq!(outcomes[0].payout, 40);
        assert_eq!(engine.ledger().total_winnings(ASSET), 40);
    }

    #[test]
    fn edge_slot_pays_five_to_one() {
        let (_, player) = create_account_keypair(2);
        let mut engine = funded_engine(&player);
        let entropy = FixedEntropy([0u8; 32]); // all-left path, index 0

        let outcomes = engine
            .play_path_drop(&player, ASSET, &entropy, 100, 1)
            .expect("play");
        assert_eq!(outcomes[0].multiplier, 500);
        assert_eq!(outcomes[0].payout, 500);
    }

    #[test]
    fn multi_ball_plays_sum_independent_draws() {
        let (_, player) = create_account_keypair(3);
        let mut engine = funded_engine(&player);
        let entropy = TxEntropy::new(create_draw_context(9, 1_700_000_000));

        let outcomes = engine
            .play_path_drop(&player, ASSET, &entropy, 50, 10)
            .expect("play");
        assert_eq!(outcomes.len(), 10);
        let expected: u64 = outcomes.iter().map(|o| o.payout).sum();
        assert_eq!(engine.ledger().total_winnings(ASSET), expected);

        // Same context replays identically.
        let mut replay = funded_engine(&player);
        let again = replay
            .play_path_drop(&player, ASSET, &entropy, 50, 10)
            .expect("play");
        assert_eq!(again, outcomes);
    }

    #[test]
    fn ball_count_is_bounded() {
        let (_, player) = create_account_keypair(4);
        let mut engine = funded_engine(&player);
        let entropy = FixedEntropy([0u8; 32]);

        let err = engine
            .play_path_drop(&player, ASSET, &entropy, 100, 0)
            .expect_err("zero balls");
        assert!(matches!(err, GameError::OutOfBounds { what: "units", .. }));
    }
}
