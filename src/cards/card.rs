//! Card definitions - static card data.
//!
//! `CardDef` holds the stats a card is declared with, either in code
//! (builder methods) or in a JSON data file (serde). Registering a
//! `CardDef` with the catalog assigns it a dense `CardId` and freezes it
//! into a `Card`. Cards are never mutated after registration: playing a
//! card only changes the participants involved.

use serde::{Deserialize, Serialize};

/// Unique identifier for a registered card.
///
/// Assigned by the catalog at registration. Decks and piles hold
/// `CardId`s; duplicates in a deck are simply repeated ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Index into the catalog's card table.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Which kind of participant may hold a card in its deck.
///
/// Fixed at creation and never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

fn one() -> i32 {
    1
}

/// Declared card stats, before catalog registration.
///
/// Serde defaults make JSON card files terse: only `name`, `cost`, and
/// `side` are required, everything else defaults to "no effect".
///
/// ```
/// use card_combat::cards::{CardDef, Side};
///
/// let stab = CardDef::new("Stab", 1, Side::Player).with_damage(6, 1);
/// assert_eq!(stab.damage, 6);
/// assert!(stab.is_attack());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardDef {
    /// Card name: the unique, case-insensitive lookup key.
    pub name: String,

    /// Action points required to play this card.
    pub cost: i32,

    /// Damage dealt per hit.
    #[serde(default)]
    pub damage: i32,

    /// Number of hits this card performs.
    #[serde(default = "one")]
    pub hits: i32,

    /// Defense granted to the user.
    #[serde(default)]
    pub defense: i32,

    /// Shield granted to the user.
    #[serde(default)]
    pub shield: i32,

    /// Strength granted to the user.
    #[serde(default)]
    pub strength: i32,

    /// Attack every living opponent instead of a single target.
    #[serde(default, alias = "attackAll")]
    pub attack_all: bool,

    /// Removed from circulation for the rest of the battle once played.
    #[serde(default, alias = "singleUse")]
    pub single_use: bool,

    /// Which side may hold this card.
    pub side: Side,
}

impl CardDef {
    /// Create a card definition with no effects.
    #[must_use]
    pub fn new(name: impl Into<String>, cost: i32, side: Side) -> Self {
        Self {
            name: name.into(),
            cost,
            damage: 0,
            hits: 1,
            defense: 0,
            shield: 0,
            strength: 0,
            attack_all: false,
            single_use: false,
            side,
        }
    }

    /// Set damage per hit and hit count (builder pattern).
    #[must_use]
    pub fn with_damage(mut self, damage: i32, hits: i32) -> Self {
        self.damage = damage;
        self.hits = hits;
        self
    }

    /// Set the defense self-buff.
    #[must_use]
    pub fn with_defense(mut self, defense: i32) -> Self {
        self.defense = defense;
        self
    }

    /// Set the shield self-buff.
    #[must_use]
    pub fn with_shield(mut self, shield: i32) -> Self {
        self.shield = shield;
        self
    }

    /// Set the strength self-buff.
    #[must_use]
    pub fn with_strength(mut self, strength: i32) -> Self {
        self.strength = strength;
        self
    }

    /// Make this card hit every living opponent.
    #[must_use]
    pub fn attack_all(mut self) -> Self {
        self.attack_all = true;
        self
    }

    /// Make this card single-use.
    #[must_use]
    pub fn single_use(mut self) -> Self {
        self.single_use = true;
        self
    }

    /// True when playing this card can change an opponent's health.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.damage * self.hits != 0
    }
}

/// An immutable, registered card.
///
/// Identical to its `CardDef` plus the catalog-assigned id.
#[derive(Clone, Debug)]
pub struct Card {
    /// Catalog-assigned identifier.
    pub id: CardId,
    /// The declared stats.
    pub def: CardDef,
}

impl Card {
    /// Card name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.def.name
    }

    /// Cost in action points.
    #[must_use]
    pub fn cost(&self) -> i32 {
        self.def.cost
    }

    /// True when playing this card can change an opponent's health.
    #[must_use]
    pub fn is_attack(&self) -> bool {
        self.def.is_attack()
    }

    /// True when the given side may hold this card.
    #[must_use]
    pub fn playable_by(&self, side: Side) -> bool {
        self.def.side == side
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.def.name, self.def.cost)
    }
}
