//! Wagering domain types.
//!
//! Defines game/config/reward/outcome state and constants used by the
//! execution layer and clients.

mod codec;
mod config;
mod constants;
mod outcome;
mod rewards;

pub use codec::{read_u16_list, read_u64_list, u16_list_encode_size, u64_list_encode_size, write_u16_list, write_u64_list};
pub use config::*;
pub use constants::*;
pub use outcome::*;
pub use rewards::*;
