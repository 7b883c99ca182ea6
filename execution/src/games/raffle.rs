//! Raffle entry purchase.
//!
//! Raffle types:
//! 0 = Daily (1 ticket per 10 wagered)
//! 1 = Weekly (1 ticket per 25 wagered)
//! 2 = Mega (1 ticket per 100 wagered)
//!
//! Buying entries is a settlement with no random draw: the wager is escrowed
//! and the earned tickets accumulate in the reward ledger. The drawing itself
//! happens outside the engine; claimed tickets are minted through the host's
//! ticket-issuance primitive.

use commonware_cryptography::ed25519::PublicKey;
use midway_types::games::{AssetId, GameKind, OutcomeDetail, UnitOutcome, RAFFLE_TICKET_RATES};

use super::GameError;
use crate::engine::Engine;
use crate::platform::Platform;

/// Raffle types.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RaffleKind {
    Daily = 0,
    Weekly = 1,
    Mega = 2,
}

impl RaffleKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Daily),
            1 => Some(Self::Weekly),
            2 => Some(Self::Mega),
            _ => None,
        }
    }

    fn ticket_rate(&self) -> u64 {
        RAFFLE_TICKET_RATES[*self as usize]
    }
}

impl<P: Platform> Engine<P> {
    /// Exchange `wager` for raffle tickets of the tagged raffle type.
    /// Returns the number of tickets earned.
    pub fn buy_raffle_entries(
        &mut self,
        player: &PublicKey,
        asset: AssetId,
        wager: u64,
        raffle_tag: u8,
    ) -> Result<u64, GameError> {
        let kind = RaffleKind::from_u8(raffle_tag).ok_or(GameError::InvalidVariant {
            what: "raffle type",
            value: raffle_tag as u64,
        })?;

        let (setup, _config) =
            self.begin_play(player, GameKind::Raffle, asset, wager, 1, true)?;
        let tickets = setup.wager / kind.ticket_rate();

        let outcome = UnitOutcome {
            detail: OutcomeDetail::Entries { tickets },
            multiplier: 0,
            payout: 0,
        };
        self.settle_rewards(
            player,
            GameKind::Raffle,
            asset,
            setup.wager,
            1,
            vec![outcome],
            tickets,
            0,
            vec![],
        )?;
        Ok(tickets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{create_account_keypair, TestPlatform};
    use midway_types::games::{Drained, RewardKind};

    const ASSET: AssetId = AssetId(1);

    fn funded_engine(player: &PublicKey) -> Engine<TestPlatform> {
        let mut platform = TestPlatform::new();
        platform.fund_caller(player, ASSET, 100_000);
        Engine::new(platform)
    }

    #[test]
    fn wager_converts_to_tickets_at_the_tagged_rate() {
        let (_, player) = create_account_keypair(1);
        let mut engine = funded_engine(&player);

        assert_eq!(
            engine.buy_raffle_entries(&player, ASSET, 1_000, 0),
            Ok(100)
        );
        assert_eq!(engine.buy_raffle_entries(&player, ASSET, 1_000, 1), Ok(40));
        assert_eq!(engine.buy_raffle_entries(&player, ASSET, 1_000, 2), Ok(10));

        let account = engine.ledger().account(&player, ASSET).expect("account");
        assert_eq!(account.tickets, 150);
        // The full wager went to the treasury; nothing was extracted.
        assert_eq!(engine.platform().treasury_balance(ASSET), 3_000);
    }

    #[test]
    fn partial_entries_floor() {
        let (_, player) = create_account_keypair(2);
        let mut engine = funded_engine(&player);

        // 1 ticket per 25: 110 buys 4 tickets, the remainder stays with the
        // house.
        assert_eq!(engine.buy_raffle_entries(&player, ASSET, 110, 1), Ok(4));
    }

    #[test]
    fn unknown_raffle_type_is_rejected_before_escrow() {
        let (_, player) = create_account_keypair(3);
        let mut engine = funded_engine(&player);

        assert_eq!(
            engine.buy_raffle_entries(&player, ASSET, 1_000, 3),
            Err(GameError::InvalidVariant {
                what: "raffle type",
                value: 3,
            })
        );
        assert_eq!(engine.platform().caller_balance(&player, ASSET), 100_000);
    }

    #[test]
    fn claimed_tickets_are_minted() {
        let (_, player) = create_account_keypair(4);
        let mut engine = funded_engine(&player);
        engine
            .buy_raffle_entries(&player, ASSET, 500, 0)
            .expect("buy");

        let drained = engine
            .claim(&player, ASSET, &[RewardKind::Tickets])
            .expect("claim");
        assert_eq!(drained, vec![Drained::Tickets(50)]);
        assert_eq!(
            engine
                .platform()
                .minted_tickets
                .get(&player)
                .copied()
                .unwrap_or(0),
            50
        );

        // Re-claiming immediately mints nothing further.
        let drained = engine
            .claim(&player, ASSET, &[RewardKind::Tickets])
            .expect("claim");
        assert_eq!(drained, vec![Drained::Tickets(0)]);
        assert_eq!(
            engine
                .platform()
                .minted_tickets
                .get(&player)
                .copied()
                .unwrap_or(0),
            50
        );
    }
}
