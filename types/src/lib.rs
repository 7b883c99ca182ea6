//! Common types for the midway wagering engine.
//!
//! Defines asset/game identifiers, per-game configuration, reward-account
//! state and outcome/event records shared by the execution layer and clients.

pub mod games;
