//! Core participant types: shared combat state, player, enemy, RNG.
//!
//! The engine has exactly two kinds of combatant, so shared behavior
//! lives on the composed [`Participant`] rather than behind a trait:
//! [`Player`] and [`Enemy`] each wrap one and add their own state.

pub mod enemy;
pub mod participant;
pub mod player;
pub mod rng;

pub use enemy::{Enemy, EnemyRoster, EnemyTemplate};
pub use participant::Participant;
pub use player::{Player, PlayerSnapshot};
pub use rng::GameRng;
