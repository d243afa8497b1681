//! Battle orchestration.
//!
//! A [`BattleManager`] owns one battle from setup to loot. It exposes
//! phase-advancing operations rather than driving a loop itself, so a
//! presentation layer can interleave user input between phases.

mod manager;

pub use manager::{ActionSummary, BattleManager, DEFAULT_DROP_CHANCE};
