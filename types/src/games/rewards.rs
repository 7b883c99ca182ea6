use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};

use super::{
    read_u16_list, read_u64_list, u16_list_encode_size, u64_list_encode_size, write_u16_list,
    write_u64_list, MAX_FREE_PLAY_BANK, MAX_HELD_ITEMS,
};

/// Claimable asset-kind discriminator.
///
/// Claims name the kinds to drain as a caller-ordered list. Free plays are
/// deliberately absent: they have no external transfer primitive and are
/// consumed only by replays.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardKind {
    Winnings = 0,
    Tickets = 1,
    Credits = 2,
    Items = 3,
}

impl RewardKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Winnings),
            1 => Some(Self::Tickets),
            2 => Some(Self::Credits),
            3 => Some(Self::Items),
            _ => None,
        }
    }
}

impl Write for RewardKind {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for RewardKind {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        Self::from_u8(kind).ok_or(Error::InvalidEnum(kind))
    }
}

impl EncodeSize for RewardKind {
    fn encode_size(&self) -> usize {
        1
    }
}

/// Accumulated, unclaimed rewards for one `(player, asset)` pair.
///
/// Created lazily on the first credit and never deleted: claims reset
/// balances to zero but the account persists.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RewardAccount {
    /// Fungible winnings owed, already extracted from the treasury.
    pub winnings: u64,
    /// Unclaimed raffle tickets.
    pub tickets: u64,
    /// Saved win-chance parameters for banked free plays, oldest first.
    /// The free-play count is the length of this queue.
    pub free_plays: Vec<u16>,
    /// Off-chain credit units.
    pub credits: u64,
    /// Held non-fungible item ids.
    pub items: Vec<u64>,
}

impl RewardAccount {
    pub fn is_empty(&self) -> bool {
        self.winnings == 0
            && self.tickets == 0
            && self.free_plays.is_empty()
            && self.credits == 0
            && self.items.is_empty()
    }
}

impl Write for RewardAccount {
    fn write(&self, writer: &mut impl BufMut) {
        self.winnings.write(writer);
        self.tickets.write(writer);
        write_u16_list(&self.free_plays, writer);
        self.credits.write(writer);
        write_u64_list(&self.items, writer);
    }
}

impl Read for RewardAccount {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            winnings: u64::read(reader)?,
            tickets: u64::read(reader)?,
            free_plays: read_u16_list(reader, MAX_FREE_PLAY_BANK)?,
            credits: u64::read(reader)?,
            items: read_u64_list(reader, MAX_HELD_ITEMS)?,
        })
    }
}

impl EncodeSize for RewardAccount {
    fn encode_size(&self) -> usize {
        self.winnings.encode_size()
            + self.tickets.encode_size()
            + u16_list_encode_size(&self.free_plays)
            + self.credits.encode_size()
            + u64_list_encode_size(&self.items)
    }
}

/// Value drained from one reward kind by a claim, in caller order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drained {
    Winnings(u64),
    Tickets(u64),
    Credits(u64),
    Items(Vec<u64>),
}

impl Drained {
    pub fn kind(&self) -> RewardKind {
        match self {
            Self::Winnings(_) => RewardKind::Winnings,
            Self::Tickets(_) => RewardKind::Tickets,
            Self::Credits(_) => RewardKind::Credits,
            Self::Items(_) => RewardKind::Items,
        }
    }
}

impl Write for Drained {
    fn write(&self, writer: &mut impl BufMut) {
        self.kind().write(writer);
        match self {
            Self::Winnings(amount) | Self::Tickets(amount) | Self::Credits(amount) => {
                amount.write(writer)
            }
            Self::Items(items) => write_u64_list(items, writer),
        }
    }
}

impl Read for Drained {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(match RewardKind::read(reader)? {
            RewardKind::Winnings => Self::Winnings(u64::read(reader)?),
            RewardKind::Tickets => Self::Tickets(u64::read(reader)?),
            RewardKind::Credits => Self::Credits(u64::read(reader)?),
            RewardKind::Items => Self::Items(read_u64_list(reader, MAX_HELD_ITEMS)?),
        })
    }
}

impl EncodeSize for Drained {
    fn encode_size(&self) -> usize {
        1 + match self {
            Self::Winnings(amount) | Self::Tickets(amount) | Self::Credits(amount) => {
                amount.encode_size()
            }
            Self::Items(items) => u64_list_encode_size(items),
        }
    }
}
