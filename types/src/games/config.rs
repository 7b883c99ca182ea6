use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::{
    read_u64_list, u64_list_encode_size, write_u64_list, DEFAULT_DICE_MULTIPLIERS, DEFAULT_EDGE_BPS,
    DEFAULT_LOSS_CREDIT_RATE, DEFAULT_LOTTERY_MULTIPLIERS, DEFAULT_LOTTERY_WIDTHS,
    DEFAULT_MAX_WAGER, DEFAULT_MIN_WAGER, DEFAULT_MULTIPLIER_DIVISOR, DEFAULT_PATH_MULTIPLIERS,
    DEFAULT_PIN_LINES, DEFAULT_TICKET_RATE, DEFAULT_WHEEL_MULTIPLIERS, DEFAULT_WHEEL_WIDTHS,
    MAX_MULTIPLIER_TABLE, MAX_PIN_LINES, MAX_TIERS, MAX_UNITS_PER_PLAY, ODDS_DIVISOR, TIER_SCALE,
};

/// Identifies a fungible asset kind accepted for wagering.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct AssetId(pub u32);

impl AssetId {
    /// Big-endian byte tag, mixed into per-ball path digests.
    pub fn tag(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }
}

impl Write for AssetId {
    fn write(&self, writer: &mut impl BufMut) {
        self.0.write(writer);
    }
}

impl Read for AssetId {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self(u32::read(reader)?))
    }
}

impl EncodeSize for AssetId {
    fn encode_size(&self) -> usize {
        self.0.encode_size()
    }
}

/// Supported game families.
#[repr(u8)]
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum GameKind {
    PathDrop = 0,
    CoinFlip = 1,
    Dice = 2,
    Wheel = 3,
    Lottery = 4,
    Raffle = 5,
}

impl GameKind {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::PathDrop),
            1 => Some(Self::CoinFlip),
            2 => Some(Self::Dice),
            3 => Some(Self::Wheel),
            4 => Some(Self::Lottery),
            5 => Some(Self::Raffle),
            _ => None,
        }
    }
}

impl Write for GameKind {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameKind {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let kind = u8::read(reader)?;
        Self::from_u8(kind).ok_or(Error::InvalidEnum(kind))
    }
}

impl EncodeSize for GameKind {
    fn encode_size(&self) -> usize {
        1
    }
}

#[derive(Debug, ThisError, PartialEq, Eq)]
pub enum ConfigInvariantError {
    #[error("multiplier table length mismatch (len={len}, expected={expected})")]
    TableLength { len: usize, expected: usize },
    #[error("multiplier divisor must be nonzero")]
    ZeroDivisor,
    #[error("wager bounds inverted (min={min}, max={max})")]
    WagerBounds { min: u64, max: u64 },
    #[error("unit bounds invalid (min={min}, max={max})")]
    UnitBounds { min: u16, max: u16 },
    #[error("pin lines out of range (got={got}, max={max})")]
    PinLines { got: u8, max: u8 },
    #[error("tier widths must sum to {expected} (got={got})")]
    TierWidthSum { got: u64, expected: u64 },
    #[error("tier table invalid (widths={widths}, multipliers={multipliers}, max={max})")]
    TierTableShape {
        widths: usize,
        multipliers: usize,
        max: usize,
    },
    #[error("house edge out of range (got={got} bps)")]
    EdgeTooLarge { got: u16 },
}

/// Per-`(GameKind, AssetId)` game configuration.
///
/// `plays` is the monotonic play counter reused as a randomness nonce: it is
/// owned exclusively by this record and advanced by the number of units
/// BEFORE any draw, so a nonce is never reused across or within plays.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub active: bool,
    pub min_wager: u64,
    pub max_wager: u64,
    pub min_units: u16,
    pub max_units: u16,
    /// Ordered outcome-index → multiplier mapping (empty for games that
    /// compute multipliers from a caller parameter).
    pub multiplier_table: Vec<u64>,
    pub multiplier_divisor: u64,
    /// Tier widths over `TIER_SCALE` for cumulative-boundary games; empty
    /// for path/dice/parameterized games.
    pub tier_widths: Vec<u64>,
    /// Path-step count for path-drop games; zero otherwise.
    pub pin_lines: u8,
    /// Monotonic play counter (randomness nonce).
    pub plays: u64,
    /// House edge in basis points, applied to parameterized odds.
    pub edge_bps: u16,
    /// Wager per consolation off-chain credit on a losing flip (0 disables).
    pub loss_credit_rate: u64,
    /// Wager per consolation raffle ticket on a losing lottery draw
    /// (0 disables).
    pub ticket_rate: u64,
    /// Width of the free-replay tier for parameterized-odds games (0 disables).
    pub free_bps: u16,
}

impl GameConfig {
    /// Create a default configuration for a game kind.
    pub fn default_for(kind: GameKind) -> Self {
        let base = Self {
            active: true,
            min_wager: DEFAULT_MIN_WAGER,
            max_wager: DEFAULT_MAX_WAGER,
            min_units: 1,
            max_units: 1,
            multiplier_table: vec![],
            multiplier_divisor: DEFAULT_MULTIPLIER_DIVISOR,
            tier_widths: vec![],
            pin_lines: 0,
            plays: 0,
            edge_bps: 0,
            loss_credit_rate: 0,
            ticket_rate: 0,
            free_bps: 0,
        };
        match kind {
            GameKind::PathDrop => Self {
                max_units: MAX_UNITS_PER_PLAY,
                multiplier_table: DEFAULT_PATH_MULTIPLIERS.to_vec(),
                pin_lines: DEFAULT_PIN_LINES,
                ..base
            },
            GameKind::CoinFlip => Self {
                multiplier_divisor: ODDS_DIVISOR,
                edge_bps: DEFAULT_EDGE_BPS,
                loss_credit_rate: DEFAULT_LOSS_CREDIT_RATE,
                free_bps: 100,
                ..base
            },
            GameKind::Dice => Self {
                max_units: 10,
                multiplier_table: DEFAULT_DICE_MULTIPLIERS.to_vec(),
                ..base
            },
            GameKind::Wheel => Self {
                max_units: 10,
                multiplier_table: DEFAULT_WHEEL_MULTIPLIERS.to_vec(),
                tier_widths: DEFAULT_WHEEL_WIDTHS.to_vec(),
                ..base
            },
            GameKind::Lottery => Self {
                max_units: 10,
                multiplier_table: DEFAULT_LOTTERY_MULTIPLIERS.to_vec(),
                tier_widths: DEFAULT_LOTTERY_WIDTHS.to_vec(),
                ticket_rate: DEFAULT_TICKET_RATE,
                ..base
            },
            GameKind::Raffle => Self {
                multiplier_divisor: 1,
                ..base
            },
        }
    }

    /// Write-time invariant checks. Static tables are validated here, not at
    /// play time; parameterized tables are re-validated per play by the
    /// resolver.
    pub fn validate_invariants(&self) -> Result<(), ConfigInvariantError> {
        if self.multiplier_divisor == 0 {
            return Err(ConfigInvariantError::ZeroDivisor);
        }
        if self.min_wager > self.max_wager {
            return Err(ConfigInvariantError::WagerBounds {
                min: self.min_wager,
                max: self.max_wager,
            });
        }
        if self.min_units == 0
            || self.min_units > self.max_units
            || self.max_units > MAX_UNITS_PER_PLAY
        {
            return Err(ConfigInvariantError::UnitBounds {
                min: self.min_units,
                max: self.max_units,
            });
        }
        if self.pin_lines > MAX_PIN_LINES {
            return Err(ConfigInvariantError::PinLines {
                got: self.pin_lines,
                max: MAX_PIN_LINES,
            });
        }
        if self.pin_lines > 0 {
            let expected = self.pin_lines as usize + 1;
            if self.multiplier_table.len() != expected {
                return Err(ConfigInvariantError::TableLength {
                    len: self.multiplier_table.len(),
                    expected,
                });
            }
        }
        if !self.tier_widths.is_empty() {
            if self.tier_widths.len() > MAX_TIERS
                || self.tier_widths.len() != self.multiplier_table.len()
            {
                return Err(ConfigInvariantError::TierTableShape {
                    widths: self.tier_widths.len(),
                    multipliers: self.multiplier_table.len(),
                    max: MAX_TIERS,
                });
            }
            let total: u64 = self.tier_widths.iter().sum();
            if total != TIER_SCALE {
                return Err(ConfigInvariantError::TierWidthSum {
                    got: total,
                    expected: TIER_SCALE,
                });
            }
        }
        if self.edge_bps as u64 >= TIER_SCALE {
            return Err(ConfigInvariantError::EdgeTooLarge {
                got: self.edge_bps,
            });
        }
        Ok(())
    }
}

impl Write for GameConfig {
    fn write(&self, writer: &mut impl BufMut) {
        self.active.write(writer);
        self.min_wager.write(writer);
        self.max_wager.write(writer);
        self.min_units.write(writer);
        self.max_units.write(writer);
        write_u64_list(&self.multiplier_table, writer);
        self.multiplier_divisor.write(writer);
        write_u64_list(&self.tier_widths, writer);
        self.pin_lines.write(writer);
        self.plays.write(writer);
        self.edge_bps.write(writer);
        self.loss_credit_rate.write(writer);
        self.ticket_rate.write(writer);
        self.free_bps.write(writer);
    }
}

impl Read for GameConfig {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            active: bool::read(reader)?,
            min_wager: u64::read(reader)?,
            max_wager: u64::read(reader)?,
            min_units: u16::read(reader)?,
            max_units: u16::read(reader)?,
            multiplier_table: read_u64_list(reader, MAX_MULTIPLIER_TABLE.max(MAX_TIERS))?,
            multiplier_divisor: u64::read(reader)?,
            tier_widths: read_u64_list(reader, MAX_TIERS)?,
            pin_lines: u8::read(reader)?,
            plays: u64::read(reader)?,
            edge_bps: u16::read(reader)?,
            loss_credit_rate: u64::read(reader)?,
            ticket_rate: u64::read(reader)?,
            free_bps: u16::read(reader)?,
        })
    }
}

impl EncodeSize for GameConfig {
    fn encode_size(&self) -> usize {
        self.active.encode_size()
            + self.min_wager.encode_size()
            + self.max_wager.encode_size()
            + self.min_units.encode_size()
            + self.max_units.encode_size()
            + u64_list_encode_size(&self.multiplier_table)
            + self.multiplier_divisor.encode_size()
            + u64_list_encode_size(&self.tier_widths)
            + self.pin_lines.encode_size()
            + self.plays.encode_size()
            + self.edge_bps.encode_size()
            + self.loss_credit_rate.encode_size()
            + self.ticket_rate.encode_size()
            + self.free_bps.encode_size()
    }
}
