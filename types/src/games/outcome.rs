use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use commonware_cryptography::ed25519::PublicKey;
use serde::{Deserialize, Serialize};

use super::{AssetId, Drained, GameKind, MAX_UNITS_PER_PLAY};

/// How one draw resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeDetail {
    /// Cumulative-boundary tier allocation.
    Tier { index: u8 },
    /// Stepwise binary path; bit i of `steps` is step i (0 = left, 1 = right),
    /// `index` is the step sum.
    Path { steps: u32, index: u8 },
    /// Two-dice draw.
    Dice { d1: u8, d2: u8 },
    /// Binary win/lose flip.
    Flip { won: bool },
    /// Raffle entry purchase.
    Entries { tickets: u64 },
}

impl Write for OutcomeDetail {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Tier { index } => {
                0u8.write(writer);
                index.write(writer);
            }
            Self::Path { steps, index } => {
                1u8.write(writer);
                steps.write(writer);
                index.write(writer);
            }
            Self::Dice { d1, d2 } => {
                2u8.write(writer);
                d1.write(writer);
                d2.write(writer);
            }
            Self::Flip { won } => {
                3u8.write(writer);
                won.write(writer);
            }
            Self::Entries { tickets } => {
                4u8.write(writer);
                tickets.write(writer);
            }
        }
    }
}

impl Read for OutcomeDetail {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        Ok(match kind {
            0 => Self::Tier {
                index: u8::read(reader)?,
            },
            1 => Self::Path {
                steps: u32::read(reader)?,
                index: u8::read(reader)?,
            },
            2 => Self::Dice {
                d1: u8::read(reader)?,
                d2: u8::read(reader)?,
            },
            3 => Self::Flip {
                won: bool::read(reader)?,
            },
            4 => Self::Entries {
                tickets: u64::read(reader)?,
            },
            _ => return Err(Error::InvalidEnum(kind)),
        })
    }
}

impl EncodeSize for OutcomeDetail {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Tier { index } => index.encode_size(),
            Self::Path { steps, index } => steps.encode_size() + index.encode_size(),
            Self::Dice { d1, d2 } => d1.encode_size() + d2.encode_size(),
            Self::Flip { won } => won.encode_size(),
            Self::Entries { tickets } => tickets.encode_size(),
        }
    }
}

/// One draw's resolution and what it paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOutcome {
    pub detail: OutcomeDetail,
    pub multiplier: u64,
    pub payout: u64,
}

impl Write for UnitOutcome {
    fn write(&self, writer: &mut impl BufMut) {
        self.detail.write(writer);
        self.multiplier.write(writer);
        self.payout.write(writer);
    }
}

impl Read for UnitOutcome {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            detail: OutcomeDetail::read(reader)?,
            multiplier: u64::read(reader)?,
            payout: u64::read(reader)?,
        })
    }
}

impl EncodeSize for UnitOutcome {
    fn encode_size(&self) -> usize {
        self.detail.encode_size() + self.multiplier.encode_size() + self.payout.encode_size()
    }
}

/// Records delivered to the host event sink on successful settlement and
/// claim. Informational only; never read back by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    PlaySettled {
        player: PublicKey,
        game: GameKind,
        asset: AssetId,
        wager: u64,
        units: u16,
        outcomes: Vec<UnitOutcome>,
        total_payout: u64,
    },
    RewardsClaimed {
        player: PublicKey,
        asset: AssetId,
        drained: Vec<Drained>,
    },
    /// Off-chain credit units redeemed by a claim; settlement of these is a
    /// host concern.
    CreditsRedeemed {
        player: PublicKey,
        asset: AssetId,
        amount: u64,
    },
}

impl Write for Event {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::PlaySettled {
                player,
                game,
                asset,
                wager,
                units,
                outcomes,
                total_payout,
            } => {
                0u8.write(writer);
                player.write(writer);
                game.write(writer);
                asset.write(writer);
                wager.write(writer);
                units.write(writer);
                (outcomes.len() as u32).write(writer);
                for outcome in outcomes {
                    outcome.write(writer);
                }
                total_payout.write(writer);
            }
            Self::RewardsClaimed {
                player,
                asset,
                drained,
            } => {
                1u8.write(writer);
                player.write(writer);
                asset.write(writer);
                (drained.len() as u32).write(writer);
                for entry in drained {
                    entry.write(writer);
                }
            }
            Self::CreditsRedeemed {
                player,
                asset,
                amount,
            } => {
                2u8.write(writer);
                player.write(writer);
                asset.write(writer);
                amount.write(writer);
            }
        }
    }
}

impl Read for Event {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        match kind {
            0 => {
                let player = PublicKey::read(reader)?;
                let game = GameKind::read(reader)?;
                let asset = AssetId::read(reader)?;
                let wager = u64::read(reader)?;
                let units = u16::read(reader)?;
                let len = u32::read(reader)? as usize;
                if len > MAX_UNITS_PER_PLAY as usize {
                    return Err(Error::Invalid("Event", "too many outcomes"));
                }
                let mut outcomes = Vec::with_capacity(len);
                for _ in 0..len {
                    outcomes.push(UnitOutcome::read(reader)?);
                }
                let total_payout = u64::read(reader)?;
                Ok(Self::PlaySettled {
                    player,
                    game,
                    asset,
                    wager,
                    units,
                    outcomes,
                    total_payout,
                })
            }
            1 => {
                let player = PublicKey::read(reader)?;
                let asset = AssetId::read(reader)?;
                let len = u32::read(reader)? as usize;
                if len > 8 {
                    return Err(Error::Invalid("Event", "too many drained kinds"));
                }
                let mut drained = Vec::with_capacity(len);
                for _ in 0..len {
                    drained.push(Drained::read(reader)?);
                }
                Ok(Self::RewardsClaimed {
                    player,
                    asset,
                    drained,
                })
            }
            2 => Ok(Self::CreditsRedeemed {
                player: PublicKey::read(reader)?,
                asset: AssetId::read(reader)?,
                amount: u64::read(reader)?,
            }),
            _ => Err(Error::InvalidEnum(kind)),
        }
    }
}

impl EncodeSize for Event {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::PlaySettled {
                player,
                game,
                asset,
                wager,
                units,
                outcomes,
                total_payout,
            } => {
                player.encode_size()
                    + game.encode_size()
                    + asset.encode_size()
                    + wager.encode_size()
                    + units.encode_size()
                    + 4
                    + outcomes.iter().map(|o| o.encode_size()).sum::<usize>()
                    + total_payout.encode_size()
            }
            Self::RewardsClaimed {
                player,
                asset,
                drained,
            } => {
                player.encode_size()
                    + asset.encode_size()
                    + 4
                    + drained.iter().map(|d| d.encode_size()).sum::<usize>()
            }
            Self::CreditsRedeemed {
                player,
                asset,
                amount,
            } => player.encode_size() + asset.encode_size() + amount.encode_size(),
        }
    }
}
