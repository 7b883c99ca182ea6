//! Fixed-point payout arithmetic.
//!
//! All payouts are `floor(wager * multiplier / divisor)` computed in u128 and
//! truncated toward the house; no path rounds up. Results that do not fit a
//! u64 are fatal to the play.

use crate::games::GameError;

/// Compute one unit's payout. `divisor == 0` is a configuration defect, not
/// caller input.
pub fn payout(wager: u64, multiplier: u64, divisor: u64) -> Result<u64, GameError> {
    if divisor == 0 {
        return Err(GameError::InvalidVariant {
            what: "multiplier divisor",
            value: 0,
        });
    }
    let gross = (wager as u128) * (multiplier as u128) / (divisor as u128);
    u64::try_from(gross).map_err(|_| GameError::ArithmeticOverflow)
}

/// Checked accumulation of per-unit payouts into a play total.
pub fn accumulate(total: u64, unit: u64) -> Result<u64, GameError> {
    total.checked_add(unit).ok_or(GameError::ArithmeticOverflow)
}

/// Consolation off-chain credits for a losing draw: `floor(wager / rate)`,
/// zero when no rate is configured.
pub fn loss_credit(wager: u64, rate: u64) -> u64 {
    if rate == 0 {
        0
    } else {
        wager / rate
    }
}
