/// Scale for tier-width tables. Cumulative boundaries must sum to this exactly.
pub const TIER_SCALE: u64 = 10_000;

/// Maximum number of tiers in a boundary table.
pub const MAX_TIERS: usize = 64;

/// Maximum pin lines for path-drop games. One SHA-256 digest supplies all
/// path bytes, so a path can never be longer than the digest.
pub const MAX_PIN_LINES: u8 = 32;

/// Maximum multiplier-table length (`MAX_PIN_LINES + 1`).
pub const MAX_MULTIPLIER_TABLE: usize = MAX_PIN_LINES as usize + 1;

/// Maximum draws (balls, dice pairs, spins) in a single play.
pub const MAX_UNITS_PER_PLAY: u16 = 100;

/// Maximum banked free plays per reward account.
pub const MAX_FREE_PLAY_BANK: usize = 64;

/// Maximum held non-fungible items per reward account.
pub const MAX_HELD_ITEMS: usize = 128;

/// Allowed range for the caller-chosen win chance (basis points of `TIER_SCALE`).
pub const MIN_WIN_BPS: u16 = 100;
pub const MAX_WIN_BPS: u16 = 9_000;

/// Divisor for parameterized-odds multipliers (coin flip).
pub const ODDS_DIVISOR: u64 = 10_000;

/// Divisor for table-driven multipliers (path drop, dice, wheel, lottery).
pub const DEFAULT_MULTIPLIER_DIVISOR: u64 = 100;

/// Default house edge for parameterized-odds games (2.5%).
pub const DEFAULT_EDGE_BPS: u16 = 250;

/// Default consolation credit rate: 1 off-chain credit per 10 wagered on a
/// losing flip. Zero disables consolation credits.
pub const DEFAULT_LOSS_CREDIT_RATE: u64 = 10;

/// Default consolation ticket rate: 1 raffle ticket per 100 wagered on a
/// losing lottery draw. Zero disables consolation tickets.
pub const DEFAULT_TICKET_RATE: u64 = 100;

/// Default pin lines for path-drop games.
pub const DEFAULT_PIN_LINES: u8 = 12;

/// Default path-drop multiplier table (hundredths; symmetric, edge-heavy).
pub const DEFAULT_PATH_MULTIPLIERS: [u64; 13] = [
    500, 400, 300, 200, 100, 80, 40, 80, 100, 200, 300, 400, 500,
];

/// Default dice multiplier table (hundredths): under 7, over 7, exactly 7.
pub const DEFAULT_DICE_MULTIPLIERS: [u64; 3] = [230, 230, 570];

/// Default wheel tier widths (sum to `TIER_SCALE`).
pub const DEFAULT_WHEEL_WIDTHS: [u64; 12] = [
    100, 10, 500, 1_500, 2_500, 100, 200, 1_000, 1_500, 100, 1_100, 1_390,
];

/// Default wheel multipliers (hundredths), one per tier.
pub const DEFAULT_WHEEL_MULTIPLIERS: [u64; 12] = [
    800, 8_000, 160, 55, 30, 800, 400, 80, 55, 800, 75, 60,
];

/// Default lottery tier widths, rarest first (sum to `TIER_SCALE`).
pub const DEFAULT_LOTTERY_WIDTHS: [u64; 5] = [1, 9, 90, 900, 9_000];

/// Default lottery multipliers (hundredths); the final tier is the losing
/// tier and pays nothing.
pub const DEFAULT_LOTTERY_MULTIPLIERS: [u64; 5] = [400_000, 10_000, 1_500, 120, 0];

/// Wager per raffle entry, by raffle type (daily, weekly, mega).
pub const RAFFLE_TICKET_RATES: [u64; 3] = [10, 25, 100];

/// Default wager bounds.
pub const DEFAULT_MIN_WAGER: u64 = 10;
pub const DEFAULT_MAX_WAGER: u64 = 1_000_000;
