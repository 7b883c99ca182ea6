//! Coin flip with caller-chosen odds.
//!
//! The caller picks a win chance in basis points of `TIER_SCALE`; the tier
//! table is rebuilt and re-validated on every play because the widths depend
//! on that parameter:
//!
//! `[win_bps, free_bps, rest]`
//!
//! - tier 0: win, multiplier `(TIER_SCALE - edge_bps) * divisor / win_bps`;
//! - tier 1: free replay — the wager is lost but one free play is banked,
//!   saving the chosen `win_bps` for later;
//! - tier 2: loss, optionally paying consolation off-chain credits.
//!
//! A banked free play is consumed oldest-first and replays with the saved
//! parameter; the house stakes the table minimum, so no caller escrow.

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{
    AssetId, GameKind, OutcomeDetail, UnitOutcome, MAX_WIN_BPS, MIN_WIN_BPS, TIER_SCALE,
};

use super::GameError;
use crate::engine::Engine;
use crate::payout::{loss_credit, payout};
use crate::platform::Platform;
use crate::resolve::TierTable;
use crate::rng::EntropySource;

/// Win multiplier for the chosen odds, denominated in `divisor`.
fn win_multiplier(win_bps: u16, edge_bps: u16, divisor: u64) -> Result<u64, GameError> {
    let numerator = (divisor as u128) * ((TIER_SCALE - edge_bps as u64) as u128);
    u64::try_from(numerator / win_bps as u128).map_err(|_| GameError::ArithmeticOverflow)
}

impl<P: Platform> Engine<P> {
    /// Flip once at the chosen win chance.
    pub fn play_coin_flip(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
        wager: u64,
        win_bps: u16,
    ) -> Result<UnitOutcome, GameError> {
        self.flip(player, asset, entropy, Some(wager), win_bps)
    }

    /// Consume the oldest banked free play. The saved win chance replaces a
    /// caller-supplied one, the free-play count drops by one and the house
    /// stakes the table minimum.
    pub fn play_coin_flip_free(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
    ) -> Result<UnitOutcome, GameError> {
        let win_bps = self.ledger_mut().take_free_play(player, asset)?;
        self.flip(player, asset, entropy, None, win_bps)
    }

    fn flip(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        entropy: &impl EntropySource,
        wager: Option<u64>,
        win_bps: u16,
    ) -> Result<UnitOutcome, GameError> {
        if win_bps < MIN_WIN_BPS || win_bps > MAX_WIN_BPS {
            return Err(GameError::OutOfBounds {
                what: "win chance",
                value: win_bps as u64,
                min: MIN_WIN_BPS as u64,
                max: MAX_WIN_BPS as u64,
            });
        }
        let (wager, from_caller) = match wager {
            Some(wager) => (wager, true),
            None => (
                // House-staked replay; a banked free play implies the config
                // record already exists.
                self.config(GameKind::CoinFlip, asset)
                    .ok_or(GameError::MissingConfiguration)?
                    .min_wager,
                false,
            ),
        };
        let (setup, config) =
            self.begin_play(player, GameKind::CoinFlip, asset, wager, 1, from_caller)?;

        // Parameterized widths: recompute and re-validate on every play.
        let win = win_bps as u64;
        let free = (config.free_bps as u64).min(TIER_SCALE - win);
        let table = TierTable::new(vec![win, free, TIER_SCALE - win - free])?;

        let scalar = entropy.next_scalar(setup.base_nonce);
        let tier = table.resolve(scalar % TIER_SCALE)?;

        let mut credits = 0;
        let mut free_plays = vec![];
        let outcome = match tier {
            0 => {
                let multiplier = win_multiplier(win_bps, config.edge_bps, config.multiplier_divisor)?;
                let paid = payout(setup.wager, multiplier, config.multiplier_divisor)?;
                UnitOutcome {
                    detail: OutcomeDetail::Flip { won: true },
                    multiplier,
                    payout: paid,
                }
            }
            1 => {
                free_plays.push(win_bps);
                UnitOutcome {
                    detail: OutcomeDetail::Flip { won: false },
                    multiplier: 0,
                    payout: 0,
                }
            }
            _ => {
                credits = loss_credit(setup.wager, config.loss_credit_rate);
                UnitOutcome {
                    detail: OutcomeDetail::Flip { won: false },
                    multiplier: 0,
                    payout: 0,
                }
            }
        };

        self.settle_rewards(
            player,
            GameKind::CoinFlip,
            asset,
            setup.wager,
            1,
            vec![outcome],
            0,
            credits,
            free_plays,
        )?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{create_account_keypair, TestPlatform};
    use midway_types::games::{GameConfig, RewardKind};

    const ASSET: AssetId = AssetId(1);

    /// Entropy stub yielding a fixed reduced scalar.
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
    fn winning_flip_pays_the_derived_multiplier() {
        let (_, player) = create_account_keypair(1);
        let mut engine = funded_engine(&player);

        // Even-money chance with the default 2.5% edge: 1.95x.
        let outcome = engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(0), 1_000, 5_000)
            .expect("play");
        assert_eq!(outcome.multiplier, 19_500);
        assert_eq!(outcome.payout, 1_950);
        assert_eq!(engine.ledger().total_winnings(ASSET), 1_950);
    }

    #[test]
    fn losing_flip_awards_consolation_credits() {
        let (_, player) = create_account_keypair(2);
        let mut engine = funded_engine(&player);

        let outcome = engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(9_999), 1_000, 5_000)
            .expect("play");
        assert_eq!(outcome.payout, 0);

        // Default rate: 1 credit per 10 wagered.
        let account = engine.ledger().account(&player, ASSET).expect("account");
        assert_eq!(account.credits, 100);
        assert_eq!(account.winnings, 0);
    }

    #[test]
    fn free_tier_banks_the_chosen_parameter() {
        let (_, player) = create_account_keypair(3);
        let mut engine = funded_engine(&player);

        // Default free width is 100; with win_bps 2_000 the free tier covers
        // [2_000, 2_100).
        engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(2_050), 500, 2_000)
            .expect("play");
        let account = engine.ledger().account(&player, ASSET).expect("account");
        assert_eq!(account.free_plays, vec![2_000]);
    }

    #[test]
    fn free_play_replays_the_saved_parameter_without_escrow() {
        let (_, player) = create_account_keypair(4);
        let mut engine = funded_engine(&player);

        engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(2_050), 500, 2_000)
            .expect("bank a free play");
        let caller_before = engine.platform().caller_balance(&player, ASSET);
        let treasury_before = engine.platform().treasury_balance(ASSET);

        // The saved 20% chance wins on scalar 1_999; house stakes min_wager.
        let outcome = engine
            .play_coin_flip_free(&player, ASSET, &ScalarEntropy(1_999))
            .expect("free play");
        assert!(matches!(outcome.detail, OutcomeDetail::Flip { won: true }));

        // No caller escrow happened; the payout came out of the treasury.
        assert_eq!(engine.platform().caller_balance(&player, ASSET), caller_before);
        assert_eq!(
            engine.platform().treasury_balance(ASSET),
            treasury_before - outcome.payout
        );

        // The bank is spent: a second free play is out of bounds.
        assert!(matches!(
            engine.play_coin_flip_free(&player, ASSET, &ScalarEntropy(0)),
            Err(GameError::OutOfBounds {
                what: "free plays",
                ..
            })
        ));
    }

    #[test]
    fn win_chance_is_bounded() {
        let (_, player) = create_account_keypair(5);
        let mut engine = funded_engine(&player);

        for bad in [0u16, MIN_WIN_BPS - 1, MAX_WIN_BPS + 1, 10_000] {
            assert!(matches!(
                engine.play_coin_flip(&player, ASSET, &ScalarEntropy(0), 1_000, bad),
                Err(GameError::OutOfBounds {
                    what: "win chance",
                    ..
                })
            ));
        }
    }

    #[test]
    fn boundary_scalar_resolves_to_the_free_tier() {
        let (_, player) = create_account_keypair(6);
        let mut engine = funded_engine(&player);

        // win_bps = 5_000: scalar 4_999 wins, scalar 5_000 starts the free
        // tier (half-open boundaries).
        let outcome = engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(4_999), 100, 5_000)
            .expect("play");
        assert!(matches!(outcome.detail, OutcomeDetail::Flip { won: true }));

        let outcome = engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(5_000), 100, 5_000)
            .expect("play");
        assert!(matches!(outcome.detail, OutcomeDetail::Flip { won: false }));
        let account = engine.ledger().account(&player, ASSET).expect("account");
        assert_eq!(account.free_plays, vec![5_000]);
    }

    #[test]
    fn disabled_consolation_features_stay_silent() {
        let (_, player) = create_account_keypair(7);
        let mut engine = funded_engine(&player);
        let mut config = GameConfig::default_for(GameKind::CoinFlip);
        config.loss_credit_rate = 0;
        config.free_bps = 0;
        engine
            .install_config(GameKind::CoinFlip, ASSET, config)
            .expect("install");

        engine
            .play_coin_flip(&player, ASSET, &ScalarEntropy(9_999), 1_000, 5_000)
            .expect("play");
        // Nothing was credited, so no reward account was created and there
        // is nothing to claim under this asset.
        assert!(engine.ledger().account(&player, ASSET).is_none());
        assert_eq!(
            engine.claim(&player, ASSET, &[RewardKind::Winnings, RewardKind::Credits]),
            Err(GameError::MissingConfiguration)
        );
    }
}
