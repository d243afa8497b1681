//! Enemies: participants with pre-committed intents and loot.
//!
//! Enemies are stamped out of [`EnemyTemplate`]s (typically loaded from a
//! JSON data file) so every battle gets fresh instances. During the
//! planning phase an enemy commits an ordered intent queue of cards,
//! chosen by uniform sampling from its full card pool under its
//! action-point budget; the queue is drained FIFO during the enemy
//! action phase.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{CardCatalog, CardId, Side};

use super::participant::Participant;
use super::rng::GameRng;

/// An enemy on the battlefield.
#[derive(Clone, Debug)]
pub struct Enemy {
    participant: Participant,
    placement_cost: f64,
    max_gold: i32,
    card_drops: Vec<CardId>,
    intent: SmallVec<[CardId; 4]>,
}

impl Enemy {
    /// Shared combat state.
    #[must_use]
    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    /// Shared combat state, mutable.
    pub fn participant_mut(&mut self) -> &mut Participant {
        &mut self.participant
    }

    /// Enemy name (possibly display-numbered by the battle).
    #[must_use]
    pub fn name(&self) -> &str {
        self.participant.name()
    }

    /// True iff the enemy is dead.
    #[must_use]
    pub fn is_dead(&self) -> bool {
        self.participant.is_dead()
    }

    pub(crate) fn append_to_name(&mut self, suffix: &str) {
        self.participant.append_to_name(suffix);
    }

    /// Cost to place this enemy on a battlefield, used by encounter
    /// assembly under a stamina budget.
    #[must_use]
    pub fn placement_cost(&self) -> f64 {
        self.placement_cost
    }

    /// Candidate cards offered to the player if this enemy falls.
    #[must_use]
    pub fn card_drops(&self) -> &[CardId] {
        &self.card_drops
    }

    /// Roll the gold dropped at death: uniform in
    /// `[max_gold / 2, max_gold]`.
    #[must_use]
    pub fn roll_gold(&self, rng: &mut GameRng) -> i32 {
        rng.gen_range_inclusive(self.max_gold / 2..=self.max_gold)
    }

    /// The committed intent queue, in play order.
    #[must_use]
    pub fn intent(&self) -> &[CardId] {
        &self.intent
    }

    /// Pop the next intent card, FIFO.
    pub fn pop_intent(&mut self) -> Option<CardId> {
        if self.intent.is_empty() {
            None
        } else {
            Some(self.intent.remove(0))
        }
    }

    /// Commit this turn's intent.
    ///
    /// Resets action points to max, then repeatedly samples one card
    /// uniformly at random from the full card pool (enemies do not plan
    /// from the draw pile). A sampled card is queued when it fits the
    /// remaining budget and is not already queued this turn; its cost is
    /// then deducted. `attempt_cap` consecutive misses ends planning, so
    /// an empty intent is a normal outcome, not an error.
    pub fn plan_move(&mut self, catalog: &CardCatalog, rng: &mut GameRng, attempt_cap: u32) {
        self.participant.refill_action_points();
        self.intent.clear();

        let deck_len = self.participant.deck().len();
        let mut misses = 0;
        while self.participant.action_points() > 0 && misses < attempt_cap {
            let id = self.participant.deck()[rng.gen_range_usize(0..deck_len)];
            let cost = catalog.get_unchecked(id).cost();

            if cost <= self.participant.action_points() && !self.intent.contains(&id) {
                self.intent.push(id);
                self.participant.spend_action_points(cost);
                misses = 0;
            } else {
                misses += 1;
            }
        }
    }
}

/// A "type" of enemy, instantiable into fresh [`Enemy`] values.
///
/// Deserializes from the enemy data file; camelCase aliases accept the
/// original field spellings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    #[serde(alias = "maxHealth")]
    pub health: i32,
    #[serde(alias = "actionPoints")]
    pub action_points: i32,
    /// Card names; resolved against the catalog at instantiation.
    pub deck: Vec<String>,
    /// Battlefield placement cost.
    pub cost: f64,
    /// Gold-drop ceiling. Must be positive.
    pub gold: i32,
    /// Names of cards this enemy can drop on defeat.
    #[serde(default, alias = "cardDrops")]
    pub card_drops: Vec<String>,
}

impl EnemyTemplate {
    /// Create a fresh, fully-healed enemy from this template.
    ///
    /// Every card name must resolve in the catalog, the deck must be
    /// non-empty and enemy-side, and the gold ceiling positive;
    /// anything else is a configuration error and panics.
    #[must_use]
    pub fn instantiate(&self, catalog: &CardCatalog) -> Enemy {
        assert!(!self.deck.is_empty(), "enemy {:?} has an empty deck", self.name);
        assert!(self.gold > 0, "enemy {:?} must drop gold", self.name);

        let resolve = |name: &String| -> CardId {
            catalog
                .lookup(name)
                .unwrap_or_else(|| panic!("enemy {:?} references unknown card {:?}", self.name, name))
                .id
        };

        let deck: Vec<CardId> = self.deck.iter().map(resolve).collect();
        for &id in &deck {
            let card = catalog.get_unchecked(id);
            assert!(
                card.playable_by(Side::Enemy),
                "enemy {:?} deck contains player-only card {:?}",
                self.name,
                card.name()
            );
        }
        let card_drops = self.card_drops.iter().map(resolve).collect();

        Enemy {
            participant: Participant::new(&self.name, self.health, self.action_points, deck),
            placement_cost: self.cost,
            max_gold: self.gold,
            card_drops,
            intent: SmallVec::new(),
        }
    }
}

/// Registry of enemy templates, keyed case-insensitively by name.
///
/// Built once during setup, read-only afterwards. Duplicate template
/// names are a configuration error.
#[derive(Clone, Debug, Default)]
pub struct EnemyRoster {
    templates: Vec<EnemyTemplate>,
    by_name: rustc_hash::FxHashMap<String, usize>,
}

impl EnemyRoster {
    /// Create a new empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a template. Panics on duplicate names.
    pub fn register(&mut self, template: EnemyTemplate) {
        let key = template.name.to_lowercase();
        if self.by_name.contains_key(&key) {
            panic!("enemy template {:?} already registered", template.name);
        }
        self.by_name.insert(key, self.templates.len());
        self.templates.push(template);
    }

    /// Look up a template by name, case-insensitively.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&EnemyTemplate> {
        let idx = *self.by_name.get(&name.to_lowercase())?;
        Some(&self.templates[idx])
    }

    /// Instantiate a fresh enemy by template name.
    #[must_use]
    pub fn spawn(&self, name: &str, catalog: &CardCatalog) -> Option<Enemy> {
        Some(self.lookup(name)?.instantiate(catalog))
    }

    /// Iterate over all templates, in registration order.
    pub fn templates(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.templates.iter()
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardDef;

    fn catalog() -> CardCatalog {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDef::new("Claw", 1, Side::Enemy).with_damage(4, 1));
        catalog.register(CardDef::new("Bite", 2, Side::Enemy).with_damage(7, 1));
        catalog.register(CardDef::new("Hide", 1, Side::Enemy).with_defense(3));
        catalog.register(CardDef::new("Stab", 1, Side::Player).with_damage(6, 1));
        catalog
    }

    fn wolf_template() -> EnemyTemplate {
        EnemyTemplate {
            name: "Wolf".to_string(),
            health: 14,
            action_points: 3,
            deck: vec!["Claw".to_string(), "Bite".to_string(), "Hide".to_string()],
            cost: 1.0,
            gold: 10,
            card_drops: vec!["Stab".to_string()],
        }
    }

    #[test]
    fn test_instantiate() {
        let catalog = catalog();
        let wolf = wolf_template().instantiate(&catalog);

        assert_eq!(wolf.name(), "Wolf");
        assert_eq!(wolf.participant().health(), 14);
        assert_eq!(wolf.participant().deck().len(), 3);
        assert_eq!(wolf.card_drops().len(), 1);
        assert!(wolf.intent().is_empty());
    }

    #[test]
    #[should_panic(expected = "unknown card")]
    fn test_unknown_card_panics() {
        let catalog = catalog();
        let mut template = wolf_template();
        template.deck.push("Fireball".to_string());
        template.instantiate(&catalog);
    }

    #[test]
    #[should_panic(expected = "player-only card")]
    fn test_player_card_in_enemy_deck_panics() {
        let catalog = catalog();
        let mut template = wolf_template();
        template.deck.push("Stab".to_string());
        template.instantiate(&catalog);
    }

    #[test]
    #[should_panic(expected = "empty deck")]
    fn test_empty_deck_panics() {
        let catalog = catalog();
        let mut template = wolf_template();
        template.deck.clear();
        template.instantiate(&catalog);
    }

    #[test]
    fn test_roll_gold_range() {
        let catalog = catalog();
        let wolf = wolf_template().instantiate(&catalog);
        let mut rng = GameRng::new(42);

        for _ in 0..100 {
            let gold = wolf.roll_gold(&mut rng);
            assert!((5..=10).contains(&gold));
        }
    }

    #[test]
    fn test_plan_move_fits_budget() {
        let catalog = catalog();
        let mut wolf = wolf_template().instantiate(&catalog);
        let mut rng = GameRng::new(42);

        for _ in 0..50 {
            wolf.plan_move(&catalog, &mut rng, 5);

            let total: i32 = wolf
                .intent()
                .iter()
                .map(|&id| catalog.get_unchecked(id).cost())
                .sum();
            assert!(total <= wolf.participant().max_action_points());

            // No card queued twice in one turn
            let mut seen = wolf.intent().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), wolf.intent().len());
        }
    }

    #[test]
    fn test_plan_move_terminates_with_unaffordable_deck() {
        let mut catalog = CardCatalog::new();
        catalog.register(CardDef::new("Overload", 9, Side::Enemy).with_damage(20, 1));

        let template = EnemyTemplate {
            name: "Golem".to_string(),
            health: 30,
            action_points: 2,
            deck: vec!["Overload".to_string()],
            cost: 2.0,
            gold: 20,
            card_drops: vec![],
        };
        let mut golem = template.instantiate(&catalog);
        let mut rng = GameRng::new(42);

        golem.plan_move(&catalog, &mut rng, 5);
        assert!(golem.intent().is_empty());
        assert_eq!(golem.participant().action_points(), 2);
    }

    #[test]
    fn test_intent_drains_fifo() {
        let catalog = catalog();
        let mut wolf = wolf_template().instantiate(&catalog);
        let mut rng = GameRng::new(3);

        wolf.plan_move(&catalog, &mut rng, 5);
        let committed = wolf.intent().to_vec();
        assert!(!committed.is_empty());

        let mut drained = Vec::new();
        while let Some(card) = wolf.pop_intent() {
            drained.push(card);
        }
        assert_eq!(drained, committed);
        assert!(wolf.intent().is_empty());
    }

    #[test]
    fn test_roster() {
        let mut roster = EnemyRoster::new();
        roster.register(wolf_template());

        assert_eq!(roster.len(), 1);
        assert!(roster.lookup("wolf").is_some());
        assert!(roster.lookup("dragon").is_none());

        let catalog = catalog();
        let wolf = roster.spawn("WOLF", &catalog).unwrap();
        assert_eq!(wolf.participant().health(), 14);
        assert!(roster.spawn("dragon", &catalog).is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_template_panics() {
        let mut roster = EnemyRoster::new();
        roster.register(wolf_template());
        roster.register(wolf_template());
    }

    #[test]
    fn test_template_serde_aliases() {
        let json = r#"{
            "name": "Wolf", "maxHealth": 14, "actionPoints": 3,
            "deck": ["Claw"], "cost": 1.0, "gold": 10, "cardDrops": ["Stab"]
        }"#;

        let template: EnemyTemplate = serde_json::from_str(json).unwrap();
        assert_eq!(template.health, 14);
        assert_eq!(template.action_points, 3);
        assert_eq!(template.card_drops, vec!["Stab".to_string()]);
    }
}
