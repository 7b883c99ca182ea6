//! Outcome resolution.
//!
//! Two interchangeable algorithms, selected per game:
//! - cumulative-boundary tier allocation ([`TierTable`]): a scalar in
//!   `[0, TIER_SCALE)` falls into the first tier whose cumulative boundary
//!   exceeds it; boundaries are half-open `[low, high)`, so a scalar equal to
//!   a boundary belongs to the tier that starts there;
//! - stepwise binary path simulation ([`resolve_path`]): one digest byte per
//!   step, parity picks the direction, the step sum indexes the multiplier
//!   table.

use crate::games::GameError;
use midway_types::games::{MAX_PIN_LINES, MAX_TIERS, TIER_SCALE};

/// A validated cumulative-boundary table over `TIER_SCALE`.
///
/// Static tables are built once at configuration-write time; parameterized
/// tables (widths derived from a caller-chosen parameter) are rebuilt and
/// re-validated on every play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TierTable {
    widths: Vec<u64>,
}

impl TierTable {
    /// Validate that `widths` partition `[0, TIER_SCALE)` exactly: no gap,
    /// no overlap. Zero-width tiers are permitted and never selected.
    pub fn new(widths: Vec<u64>) -> Result<Self, GameError> {
        if widths.is_empty() || widths.len() > MAX_TIERS {
            return Err(GameError::InvalidVariant {
                what: "tier count",
                value: widths.len() as u64,
            });
        }
        let mut total: u64 = 0;
        for width in &widths {
            total = total
                .checked_add(*width)
                .ok_or(GameError::ArithmeticOverflow)?;
        }
        if total != TIER_SCALE {
            return Err(GameError::InvalidVariant {
                what: "tier width sum",
                value: total,
            });
        }
        Ok(Self { widths })
    }

    pub fn tiers(&self) -> usize {
        self.widths.len()
    }

    /// Resolve a reduced scalar `r < TIER_SCALE` to its tier index.
    ///
    /// An out-of-range `r` is an internal invariant violation, not caller
    /// input: callers reduce the raw scalar modulo `TIER_SCALE` first.
    pub fn resolve(&self, r: u64) -> Result<usize, GameError> {
        if r >= TIER_SCALE {
            return Err(GameError::InvalidVariant {
                what: "tier scalar",
                value: r,
            });
        }
        let mut cumulative: u64 = 0;
        for (index, width) in self.widths.iter().enumerate() {
            cumulative += width;
            if r < cumulative {
                return Ok(index);
            }
        }
        // Unreachable while the sum invariant holds.
        Err(GameError::InvalidVariant {
            what: "tier scalar",
            value: r,
        })
    }
}

/// A resolved path: bit `i` of `steps` is step `i` (0 = left, 1 = right),
/// `index` is the step sum in `[0, step_count]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Path {
    pub steps: u32,
    pub index: u8,
}

/// Simulate a binary path from raw digest bytes, one byte per step; even
/// bytes step left, odd bytes step right.
pub fn resolve_path(bytes: &[u8], step_count: u8) -> Result<Path, GameError> {
    if step_count == 0 || step_count > MAX_PIN_LINES {
        return Err(GameError::InvalidVariant {
            what: "path step count",
            value: step_count as u64,
        });
    }
    if bytes.len() < step_count as usize {
        return Err(GameError::InvalidVariant {
            what: "path byte count",
            value: bytes.len() as u64,
        });
    }

    let mut steps: u32 = 0;
    let mut index: u8 = 0;
    for (i, byte) in bytes.iter().take(step_count as usize).enumerate() {
        if byte % 2 == 1 {
            steps |= 1 << i;
            index += 1;
        }
    }
    Ok(Path { steps, index })
}
