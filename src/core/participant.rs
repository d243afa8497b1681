//! Shared combat state for players and enemies.
//!
//! `Participant` holds everything common to both sides of a battle:
//! health, action points, the transient combat modifiers (defense,
//! shield, strength), the permanent deck, and the battle-scoped
//! draw/hand/discard piles. Player and Enemy compose a `Participant`
//! rather than subclassing it; behavior that differs between the two
//! lives on their own types.
//!
//! ## Pile invariant
//!
//! At all times `draw_pile ∪ hand ∪ discard_pile` is a sub-multiset of
//! `deck`: the deck minus any single-use cards already spent this
//! battle. [`Participant::initialize_deck`] resets the piles at battle
//! start; [`Participant::play`] routes cards to the discard pile or, for
//! single-use cards, out of circulation entirely.

use crate::cards::{CardCatalog, CardId};

use super::rng::GameRng;

/// Combat state shared by the player and every enemy.
#[derive(Clone, Debug)]
pub struct Participant {
    name: String,
    max_health: i32,
    health: i32,
    max_action_points: i32,
    action_points: i32,

    /// Flat damage reduction per incoming hit. Zeroed each turn start.
    pub defense: i32,
    /// Damage-absorption pool consumed before health. Zeroed each turn start.
    pub shield: i32,
    /// Bonus added to own outgoing damage. Halves (ceiling) each turn start.
    pub strength: i32,

    deck: Vec<CardId>,
    draw_pile: Vec<CardId>,
    hand: Vec<CardId>,
    discard_pile: Vec<CardId>,
}

impl Participant {
    /// Create a participant at full health and action points, with empty
    /// battle piles.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        max_health: i32,
        max_action_points: i32,
        deck: Vec<CardId>,
    ) -> Self {
        assert!(max_health > 0, "max health must be positive");
        assert!(max_action_points >= 0, "max action points must be non-negative");

        Self {
            name: name.into(),
            max_health,
            health: max_health,
            max_action_points,
            action_points: max_action_points,
            defense: 0,
            shield: 0,
            strength: 0,
            deck,
            draw_pile: Vec::new(),
            hand: Vec::new(),
            discard_pile: Vec::new(),
        }
    }

    /// Participant name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn append_to_name(&mut self, suffix: &str) {
        self.name.push_str(suffix);
    }

    /// Current health, always in `[0, max_health]`.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// True iff health has reached zero. Terminal for this participant.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Current action points.
    #[must_use]
    pub fn action_points(&self) -> i32 {
        self.action_points
    }

    /// Maximum action points.
    #[must_use]
    pub fn max_action_points(&self) -> i32 {
        self.max_action_points
    }

    /// Lose health, clamped at zero.
    pub fn take_damage(&mut self, amount: i32) {
        assert!(amount >= 0, "damage must be non-negative");
        self.health = (self.health - amount).max(0);
    }

    /// Restore health, clamped at max.
    pub fn heal(&mut self, amount: i32) {
        assert!(amount >= 0, "healing must be non-negative");
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Set health directly, clamped to `[0, max_health]`. Used when
    /// reconstructing a participant from saved primitives.
    pub(crate) fn restore_health(&mut self, health: i32) {
        self.health = health.clamp(0, self.max_health);
    }

    pub(crate) fn raise_max_health(&mut self, amount: i32) {
        assert!(amount >= 0);
        self.max_health += amount;
    }

    pub(crate) fn raise_max_action_points(&mut self) {
        self.max_action_points += 1;
    }

    pub(crate) fn refill_action_points(&mut self) {
        self.action_points = self.max_action_points;
    }

    pub(crate) fn spend_action_points(&mut self, cost: i32) {
        self.action_points -= cost;
        assert!(self.action_points >= 0, "action points overspent");
    }

    /// The permanent deck (template set of owned cards).
    #[must_use]
    pub fn deck(&self) -> &[CardId] {
        &self.deck
    }

    pub(crate) fn add_to_deck(&mut self, card: CardId) {
        self.deck.push(card);
    }

    /// Cards waiting to be drawn, bottom to top.
    #[must_use]
    pub fn draw_pile(&self) -> &[CardId] {
        &self.draw_pile
    }

    /// Cards currently in hand.
    #[must_use]
    pub fn hand(&self) -> &[CardId] {
        &self.hand
    }

    /// Cards already played or discarded this battle.
    #[must_use]
    pub fn discard_pile(&self) -> &[CardId] {
        &self.discard_pile
    }

    /// True iff the given card is currently in hand.
    #[must_use]
    pub fn hand_contains(&self, card: CardId) -> bool {
        self.hand.contains(&card)
    }

    /// Reset the piles for a new battle: hand and discard cleared, draw
    /// pile filled with the full deck (single-use cards included, since
    /// spent tracking is battle-scoped) and shuffled.
    pub fn initialize_deck(&mut self, rng: &mut GameRng) {
        self.hand.clear();
        self.discard_pile.clear();
        self.draw_pile.clear();
        self.draw_pile.extend_from_slice(&self.deck);
        rng.shuffle(&mut self.draw_pile);
    }

    /// Top up the hand to `target` cards.
    ///
    /// Reshuffles the discard pile into the draw pile whenever the draw
    /// pile empties; the discard pile is empty immediately afterwards.
    /// Stops early once every remaining card this battle is in hand.
    pub fn draw_cards(&mut self, target: usize, rng: &mut GameRng) {
        while self.hand.len() < target {
            if self.draw_pile.is_empty() {
                if self.discard_pile.is_empty() {
                    break;
                }
                self.draw_pile.append(&mut self.discard_pile);
                rng.shuffle(&mut self.draw_pile);
            }
            let Some(card) = self.draw_pile.pop() else { break };
            self.hand.push(card);
        }
    }

    /// Play a card from the hand.
    ///
    /// The card must be in hand and affordable; both are caller
    /// responsibilities (pre-validate with [`Self::hand_contains`] and
    /// [`Self::action_points`]), so violations are asserts. The card is
    /// routed to the discard pile, or permanently out of this battle if
    /// it is single-use.
    pub fn play(&mut self, card: CardId, catalog: &CardCatalog) {
        let pos = self
            .hand
            .iter()
            .position(|&c| c == card)
            .expect("played card must be in hand");

        let def = catalog.get_unchecked(card);
        self.hand.remove(pos);
        self.spend_action_points(def.cost());

        if !def.def.single_use {
            self.discard_pile.push(card);
        }
    }

    /// Turn-start decay: defense and shield fully reset, strength halves
    /// rounding up, action points refill.
    pub fn turn_start_reset(&mut self) {
        self.defense = 0;
        self.shield = 0;
        self.strength = (self.strength + 1) / 2;
        self.refill_action_points();
    }
}
