//! JSON data-file loading.
//!
//! Cards and enemy templates ship as JSON arrays. Parse errors surface
//! as `serde_json::Result` so the application can abort startup with a
//! real message; registration of the parsed definitions then applies the
//! usual configuration-error checks (duplicate names panic).

use crate::core::enemy::EnemyTemplate;

use super::card::CardDef;
use super::catalog::CardCatalog;

/// Parse a JSON array of card definitions.
pub fn load_cards(json: &str) -> serde_json::Result<Vec<CardDef>> {
    serde_json::from_str(json)
}

/// Parse a JSON array of card definitions and register them all.
///
/// Returns the populated catalog. Duplicate names panic, as with
/// [`CardCatalog::register`].
pub fn load_catalog(json: &str) -> serde_json::Result<CardCatalog> {
    let mut catalog = CardCatalog::new();
    for def in load_cards(json)? {
        catalog.register(def);
    }
    Ok(catalog)
}

/// Parse a JSON array of enemy templates.
///
/// Card names inside the templates are not resolved here; that happens
/// at [`EnemyTemplate::instantiate`] time against a populated catalog.
pub fn load_enemy_templates(json: &str) -> serde_json::Result<Vec<EnemyTemplate>> {
    serde_json::from_str(json)
}
