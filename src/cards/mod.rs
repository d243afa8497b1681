//! Card system: definitions, catalog, and data-file loading.
//!
//! ## Key Types
//!
//! - `CardId`: dense identifier assigned at registration
//! - `Side`: who may hold a card (player or enemy)
//! - `CardDef`: declared stats, built in code or deserialized from JSON
//! - `Card`: a registered, immutable definition
//! - `CardCatalog`: name- and id-keyed lookup, built once at setup

pub mod card;
pub mod catalog;
pub mod loader;

pub use card::{Card, CardDef, CardId, Side};
pub use catalog::CardCatalog;
pub use loader::{load_cards, load_catalog, load_enemy_templates};
