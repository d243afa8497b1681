//! # card-combat
//!
//! A turn-based deck-combat engine: a player and one or more enemies
//! alternately play cards drawn from personal decks, applying damage,
//! defense, shield, and strength until one side is eliminated.
//!
//! ## Design Principles
//!
//! 1. **Pure effects, structured results**: card resolution computes and
//!    returns what happened ([`CardOutcome`], [`ActionSummary`]); all
//!    narration belongs to the presentation layer.
//!
//! 2. **Deterministic by seed**: every shuffle, enemy sample, gold roll,
//!    and drop thinning draws from an injectable [`GameRng`].
//!
//! 3. **Explicit ownership**: the catalog is built once and passed by
//!    reference; a battle borrows the player and exclusively owns its
//!    enemies. No globals, no singletons.
//!
//! ## Error policy
//!
//! Configuration errors (duplicate names, wrong-side cards, empty enemy
//! decks) panic at construction. Contract violations (playing a card not
//! in hand, overspending) are asserts; callers pre-validate with the
//! exposed queries. Lookup misses are `Option`. Nothing else fails.
//!
//! ## Modules
//!
//! - `cards`: card definitions, the catalog, JSON loading
//! - `core`: participant state, player, enemy, RNG
//! - `effects`: pure forecast and resolution of card effects
//! - `battle`: the turn orchestrator

pub mod battle;
pub mod cards;
pub mod core;
pub mod effects;

// Re-export commonly used types
pub use crate::cards::{Card, CardCatalog, CardDef, CardId, Side};
pub use crate::core::{Enemy, EnemyRoster, EnemyTemplate, GameRng, Participant, Player, PlayerSnapshot};
pub use crate::effects::{forecast, resolve, CardOutcome, DamageForecast, TargetReport};
pub use crate::battle::{ActionSummary, BattleManager, DEFAULT_DROP_CHANCE};
