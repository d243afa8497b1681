//! The player: a participant with persistent progression.
//!
//! Gold, the permanent deck, and the upgrade counters survive across
//! battles; the battle piles do not. External shop/hospital logic drives
//! progression exclusively through the methods here.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardCatalog, CardId, Side};

use super::participant::Participant;

/// The player character.
#[derive(Clone, Debug)]
pub struct Player {
    participant: Participant,
    gold: i32,
    draw_size: usize,
}

impl Player {
    /// Create a player at full health with an empty purse.
    ///
    /// Every card in the deck must be player-side; an enemy-only card in
    /// a player deck is a configuration error and panics.
    #[must_use]
    pub fn new(
        catalog: &CardCatalog,
        name: impl Into<String>,
        max_health: i32,
        max_action_points: i32,
        deck: Vec<CardId>,
        draw_size: usize,
    ) -> Self {
        for &id in &deck {
            let card = catalog.get_unchecked(id);
            assert!(
                card.playable_by(Side::Player),
                "player deck contains enemy-only card {:?}",
                card.name()
            );
        }

        Self {
            participant: Participant::new(name, max_health, max_action_points, deck),
            gold: 0,
            draw_size,
        }
    }

    /// Shared combat state.
    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    /// Shared combat state, mutable.
    pub fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participant
    }

    /// True iff the player is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.participant.is_dead()
    }

    /// Gold in the purse. Never negative.
    #[must_use]
    pub fn gold(&self) -> i32 {
        self.gold
    }

    /// Add gold to the purse.
    pub fn add_gold(&mut self, amount: i32) {
        assert!(amount >= 0, "gold gain must be non-negative");
        self.gold += amount;
    }

    /// Spend gold. A spend that would leave the purse negative is a
    /// contract violation; validate with [`Self::gold`] first.
    pub fn spend_gold(&mut self, amount: i32) {
        assert!(amount >= 0, "gold spend must be non-negative");
        self.gold -= amount;
        assert!(self.gold >= 0, "gold spend exceeds purse");
    }

    /// Number of cards the hand is topped up to each turn.
    #[must_use]
    pub fn draw_size(&self) -> usize {
        self.draw_size
    }

    /// Permanent upgrade: draw one more card per turn.
    pub fn increase_draw_size(&mut self) {
        self.draw_size += 1;
    }

    /// Permanent upgrade: one more action point per turn.
    pub fn increase_max_action_points(&mut self) {
        self.participant.raise_max_action_points();
    }

    /// Permanent upgrade: raise maximum health. Current health is
    /// unchanged; heal separately if desired.
    pub fn increase_max_health(&mut self, amount: i32) {
        self.participant.raise_max_health(amount);
    }

    /// Restore health, clamped at max.
    pub fn heal(&mut self, amount: i32) {
        self.participant.heal(amount);
    }

    /// Add a card to the permanent deck. Player-side cards only.
    pub fn add_card(&mut self, card: &Card) {
        assert!(
            card.playable_by(Side::Player),
            "cannot add enemy-only card {:?} to player deck",
            card.name()
        );
        self.participant.add_to_deck(card.id);
    }

    /// Capture the primitive tuple an external store persists.
    #[must_use]
    pub fn snapshot(&self, catalog: &CardCatalog) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.participant.name().to_string(),
            health: self.participant.health(),
            max_health: self.participant.max_health(),
            max_action_points: self.participant.max_action_points(),
            draw_size: self.draw_size,
            gold: self.gold,
            deck: self
                .participant
                .deck()
                .iter()
                .map(|&id| catalog.get_unchecked(id).name().to_string())
                .collect(),
        }
    }

    /// Reconstruct a player from a snapshot.
    ///
    /// Returns `None` if any deck card name no longer resolves in the
    /// catalog; the caller decides how to recover.
    #[must_use]
    pub fn from_snapshot(catalog: &CardCatalog, snapshot: &PlayerSnapshot) -> Option<Self> {
        let mut deck = Vec::with_capacity(snapshot.deck.len());
        for name in &snapshot.deck {
            deck.push(catalog.lookup(name)?.id);
        }

        let mut player = Self::new(
            catalog,
            snapshot.name.clone(),
            snapshot.max_health,
            snapshot.max_action_points,
            deck,
            snapshot.draw_size,
        );
        player.participant.restore_health(snapshot.health);
        player.add_gold(snapshot.gold);
        Some(player)
    }
}

/// The serializable primitive tuple a save store holds for a player.
///
/// Cards are stored by name so saves survive catalog id reordering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub health: i32,
    pub max_health: i32,
    pub max_action_points: i32,
    pub draw_size: usize,
    pub gold: i32,
    pub deck: Vec<String>,
}
