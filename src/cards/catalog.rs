//! Card catalog for definition lookup.
//!
//! The `CardCatalog` stores every card definition in the game. It is
//! built once during setup, passed by reference to whatever needs it,
//! and treated as read-only afterwards. Name collisions are a
//! configuration error and abort construction.

use rustc_hash::FxHashMap;

use super::card::{Card, CardDef, CardId, Side};

/// Registry of card definitions, keyed by id and (case-insensitively) by name.
///
/// ## Example
///
/// ```
/// use card_combat::cards::{CardCatalog, CardDef, Side};
///
/// let mut catalog = CardCatalog::new();
/// let stab = catalog.register(CardDef::new("Stab", 1, Side::Player).with_damage(6, 1));
///
/// assert_eq!(catalog.lookup("stab").unwrap().id, stab);
/// assert!(catalog.lookup("missing").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    cards: Vec<Card>,
    by_name: FxHashMap<String, CardId>,
    /// Ids of player-side cards, partitioned at registration time.
    player_cards: Vec<CardId>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a card definition and return its assigned id.
    ///
    /// Panics if a card with the same name (case-insensitive) already
    /// exists: duplicate names are a configuration error.
    pub fn register(&mut self, def: CardDef) -> CardId {
        let key = def.name.to_lowercase();
        if self.by_name.contains_key(&key) {
            panic!("card {:?} already registered", def.name);
        }

        let id = CardId::new(self.cards.len() as u32);
        if def.side == Side::Player {
            self.player_cards.push(id);
        }
        self.by_name.insert(key, id);
        self.cards.push(Card { id, def });
        id
    }

    /// Look up a card by name, case-insensitively.
    ///
    /// Absence is a caller-recoverable condition (e.g. reprompt the user).
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Card> {
        let id = *self.by_name.get(&name.to_lowercase())?;
        Some(&self.cards[id.index()])
    }

    /// Get a card by id.
    ///
    /// Returns `None` only for ids not minted by this catalog.
    #[must_use]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id.index())
    }

    /// Get a card by id, panicking if not found.
    ///
    /// Use when the id is known to come from this catalog.
    #[must_use]
    pub fn get_unchecked(&self, id: CardId) -> &Card {
        self.cards.get(id.index()).expect("card not found in catalog")
    }

    /// Get the number of registered cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all registered cards.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Ids of all player-side cards, in registration order.
    ///
    /// Partitioned at registration time for O(1) access.
    #[must_use]
    pub fn player_cards(&self) -> &[CardId] {
        &self.player_cards
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.iter().filter(move |c| predicate(c))
    }
}
