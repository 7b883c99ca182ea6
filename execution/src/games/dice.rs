//! Two-dice game.
//!
//! Bet tags:
//! 0 = Under (total 2-6)
//! 1 = Over (total 8-12)
//! 2 = Seven (total exactly 7)
//!
//! Each roll derives one digest; the first two bytes become the dice. The
//! multiplier table has one entry per bet tag (hundredths).

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{AssetId, GameKind, OutcomeDetail, UnitOutcome};

use super::GameError;
use crate::engine::Engine;
use crate::payout::payout;
use crate::platform::Platform;
use crate::rng::EntropySource;

/// Dice bet types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DiceBet {
    Under = 0,
    Over = 1,
    Seven = 2,
}

impl DiceBet {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Under),
            1 => Some(Self::Over),
            2 => Some(Self::Seven),
            _ => None,
        }
    }

    fn wins(&self, total: u8) -> bool {
        match self {
            Self::Under => total < 7,
            Self::Over => total > 7,
            Self::Seven => total == 7,
        }
    }
}

impl<P: Platform> Engine<P> {
    /// Roll `rolls` times at `wager` per roll on the given bet tag.
    pub fn play_dice(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
        wager: u64,
        rolls: u16,
        bet_tag: u8,
    ) -> Result<Vec<UnitOutcome>, GameError> {
        let bet = DiceBet::from_u8(bet_tag).ok_or(GameError::InvalidVariant {
            what: "dice bet",
            value: bet_tag as u64,
        })?;

        let (setup, config) = self.begin_play(player, GameKind::Dice, asset, wager, rolls, true)?;
        let win_multiplier = *config
            .multiplier_table
            .get(bet as usize)
            .ok_or(GameError::InvalidVariant {
                what: "multiplier index",
                value: bet as u64,
            })?;

        let mut outcomes = Vec::with_capacity(setup.units as usize);
        for unit in 0..setup.units {
            let counter = setup.base_nonce + unit as u64;
            let digest = entropy.path_digest(&asset.tag(), counter);
            let d1 = digest[0] % 6 + 1;
            let d2 = digest[1] % 6 + 1;

            let won = bet.wins(d1 + d2);
            let multiplier = if won { win_multiplier } else { 0 };
            let paid = payout(setup.wager, multiplier, config.multiplier_divisor)?;
            outcomes.push(UnitOutcome {
                detail: OutcomeDetail::Dice { d1, d2 },
                multiplier,
                payout: paid,
            });
        }

        self.settle_rewards(
            player,
            GameKind::Dice,
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

    /// Entropy stub with chosen dice bytes.
    struct DiceEntropy(u8, u8);

    impl EntropySource for DiceEntropy {
        fn next_scalar(&self, _nonce: u64) -> u64 {
            0
        }

        fn path_digest(&self, _asset_tag: &[u8], _counter: u64) -> [u8; 32] {
            let mut digest = [0u8; 32];
            digest[0] = self.0;
            digest[1] = self.1;
            digest
        }
    }

    fn funded_engine(player: &PublicKey) -> Engine<TestPlatform> {
        let mut platform = TestPlatform::new();
        platform.fund_treasury(ASSET, 1_000_000);
        platform.fund_caller(player, ASSET, 100_000);
        Engine::new(platform)
    }

    #[test]
    fn seven_pays_the_long_odds() {
        let (_, player) = create_account_keypair(1);
        let mut engine = funded_engine(&player);

        // Bytes 2 and 3 roll 3 + 4 = 7.
        let outcomes = engine
            .play_dice(&player, ASSET, &DiceEntropy(2, 3), 100, 1, 2)
            .expect("play");
        assert_eq!(outcomes[0].detail, OutcomeDetail::Dice { d1: 3, d2: 4 });
        assert_eq!(outcomes[0].multiplier, 570);
        assert_eq!(outcomes[0].payout, 570);
    }

    #[test]
    fn under_loses_on_seven() {
        let (_, player) = create_account_keypair(2);
        let mut engine = funded_engine(&player);

        let outcomes = engine
            .play_dice(&player, ASSET, &DiceEntropy(2, 3), 100, 1, 0)
            .expect("play");
        assert_eq!(outcomes[0].multiplier, 0);
        assert_eq!(outcomes[0].payout, 0);
    }

    #[test]
    fn over_wins_on_twelve() {
        let (_, player) = create_account_keypair(3);
        let mut engine = funded_engine(&player);

        // Bytes 5 and 5 roll 6 + 6 = 12.
        let outcomes = engine
            .play_dice(&player, ASSET, &DiceEntropy(5, 5), 200, 1, 1)
            .expect("play");
        assert_eq!(outcomes[0].detail, OutcomeDetail::Dice { d1: 6, d2: 6 });
        assert_eq!(outcomes[0].payout, 460);
    }

    #[test]
    fn unknown_bet_tag_is_rejected_before_escrow() {
        let (_, player) = create_account_keypair(4);
        let mut engine = funded_engine(&player);

        let err = engine
            .play_dice(&player, ASSET, &DiceEntropy(0, 0), 100, 1, 9)
            .expect_err("bad tag");
        assert_eq!(
            err,
            GameError::InvalidVariant {
                what: "dice bet",
                value: 9,
            }
        );
        assert_eq!(engine.platform().caller_balance(&player, ASSET), 100_000);
        assert!(engine.config(GameKind::Dice, ASSET).is_none());
    }

    #[test]
    fn dice_stay_in_range() {
        let (_, player) = create_account_keypair(5);
        let mut engine = funded_engine(&player);

        for byte in 0..=255u8 {
            let outcomes = engine
                .play_dice(&player, ASSET, &DiceEntropy(byte, byte), 100, 1, 0)
                .expect("play");
            if let OutcomeDetail::Dice { d1, d2 } = outcomes[0].detail {
                assert!((1..=6).contains(&d1));
                assert!((1..=6).contains(&d2));
            } else {
                panic!("unexpected outcome detail");
            }
        }
    }
}
