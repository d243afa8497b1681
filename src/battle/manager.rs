//! The battle manager: turn sequencing, death sweeps, loot.
//!
//! One `BattleManager` runs one battle. It borrows the player (whose
//! progression must survive the battle), exclusively owns its enemies
//! and its RNG, and reads cards from a shared catalog.
//!
//! Call order per round, enforced by the caller:
//!
//! 1. `start` (once)
//! 2. loop while `!is_battle_over()`:
//!    - `pre_player_turn`
//!    - `player_action` as often as the player can and wants to act
//!    - `pre_enemy_turn`
//!    - `enemies_turn`
//!    - `post_turn`
//! 3. `post_game` (once)

use rustc_hash::FxHashSet;

use crate::cards::{CardCatalog, CardId, Side};
use crate::core::{Enemy, GameRng, Player};
use crate::effects::{resolve, CardOutcome};

/// Probability that a candidate drop is withheld from the player.
pub const DEFAULT_DROP_CHANCE: f64 = 0.4;

/// Consecutive failed samples before an enemy gives up planning.
const PLAN_ATTEMPT_CAP: u32 = 5;

/// The structured consequences of a single card play.
///
/// Everything a presentation layer needs to narrate the action; the
/// engine itself never prints.
#[derive(Clone, Debug)]
pub struct ActionSummary {
    /// The card that was played.
    pub card: CardId,
    /// Which side acted.
    pub side: Side,
    /// Name of the acting participant.
    pub actor: String,
    /// What the card did.
    pub outcome: CardOutcome,
    /// Gold the player collected from enemies killed by this action.
    pub gold_gained: i32,
    /// True iff this action ended the battle.
    pub battle_over: bool,
}

/// Orchestrates one battle between the player and a group of enemies.
pub struct BattleManager<'a> {
    catalog: &'a CardCatalog,
    player: &'a mut Player,
    enemies: Vec<Enemy>,
    turn: u32,
    pending_drops: FxHashSet<CardId>,
    rng: GameRng,
}

impl<'a> BattleManager<'a> {
    /// Create a battle. Requires at least one enemy.
    ///
    /// With more than one enemy, names are display-numbered
    /// (" (1)", " (2)", ...) so a caller can tell duplicates apart.
    #[must_use]
    pub fn new(
        catalog: &'a CardCatalog,
        player: &'a mut Player,
        mut enemies: Vec<Enemy>,
        rng: GameRng,
    ) -> Self {
        assert!(!enemies.is_empty(), "a battle needs at least one enemy");

        if enemies.len() > 1 {
            for (i, enemy) in enemies.iter_mut().enumerate() {
                enemy.append_to_name(&format!(" ({})", i + 1));
            }
        }

        Self {
            catalog,
            player,
            enemies,
            turn: 1,
            pending_drops: FxHashSet::default(),
            rng,
        }
    }

    /// Set up every participant's battle piles. Call once, first.
    pub fn start(&mut self) {
        self.player.participant_mut().initialize_deck(&mut self.rng);
        for enemy in &mut self.enemies {
            enemy.participant_mut().initialize_deck(&mut self.rng);
        }
    }

    /// True iff the player is dead or no enemies remain.
    ///
    /// Pure query, safe to call at any point.
    #[must_use]
    pub fn is_battle_over(&self) -> bool {
        self.player.is_dead() || self.enemies.is_empty()
    }

    /// Current turn number, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The player, for display and pre-validation queries.
    #[must_use]
    pub fn player(&self) -> &Player {
        self.player
    }

    /// The living enemies, in display order.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Reset the player's turn-scoped stats and top up their hand.
    pub fn pre_player_turn(&mut self) {
        self.player.participant_mut().turn_start_reset();
        let draw_size = self.player.draw_size();
        self.player.participant_mut().draw_cards(draw_size, &mut self.rng);
    }

    /// Play one player card.
    ///
    /// The card must be in the player's hand and affordable; the caller
    /// validates with the exposed query methods first, so violations are
    /// asserts. Attack-all cards ignore `target` and hit every living
    /// enemy. `target` indexes into [`Self::enemies`]; it may be `None`
    /// when the card is not an attack or exactly one enemy lives.
    ///
    /// Newly dead enemies are swept before returning: the player is
    /// awarded each one's gold roll, their drop pools accumulate into
    /// the battle's pending drop set, and they leave the field.
    pub fn player_action(&mut self, card: CardId, target: Option<usize>) -> ActionSummary {
        let catalog = self.catalog;
        let def = catalog.get_unchecked(card);

        self.player.participant_mut().play(card, catalog);

        let outcome = if def.def.attack_all {
            let mut targets: Vec<&mut _> = self
                .enemies
                .iter_mut()
                .map(Enemy::participant_mut)
                .collect();
            resolve(def, self.player.participant_mut(), &mut targets)
        } else if def.is_attack() {
            assert!(
                target.is_some() || self.enemies.len() == 1,
                "a target is required with more than one living enemy"
            );
            let idx = target.unwrap_or(0);
            assert!(idx < self.enemies.len(), "target index out of range");
            resolve(
                def,
                self.player.participant_mut(),
                &mut [self.enemies[idx].participant_mut()],
            )
        } else {
            resolve(def, self.player.participant_mut(), &mut [])
        };

        let gold_gained = self.sweep_dead_enemies();
        self.player.add_gold(gold_gained);

        ActionSummary {
            card,
            side: Side::Player,
            actor: self.player.participant().name().to_string(),
            outcome,
            gold_gained,
            battle_over: self.is_battle_over(),
        }
    }

    /// Reset every living enemy's turn-scoped stats and commit their
    /// intents for this round.
    pub fn pre_enemy_turn(&mut self) {
        let catalog = self.catalog;
        for enemy in &mut self.enemies {
            enemy.participant_mut().turn_start_reset();
            enemy.plan_move(catalog, &mut self.rng, PLAN_ATTEMPT_CAP);
        }
    }

    /// Drain every living enemy's committed intent, in field order.
    ///
    /// Produces one summary per card resolved, so a multi-card turn is
    /// fully observable. The whole phase stops as soon as the player
    /// dies.
    pub fn enemies_turn(&mut self) -> Vec<ActionSummary> {
        let catalog = self.catalog;
        let mut summaries = Vec::new();

        'field: for enemy in &mut self.enemies {
            while let Some(card) = enemy.pop_intent() {
                let def = catalog.get_unchecked(card);
                let actor = enemy.name().to_string();
                let outcome = resolve(
                    def,
                    enemy.participant_mut(),
                    &mut [self.player.participant_mut()],
                );
                let player_died = self.player.is_dead();

                summaries.push(ActionSummary {
                    card,
                    side: Side::Enemy,
                    actor,
                    outcome,
                    gold_gained: 0,
                    battle_over: player_died,
                });

                if player_died {
                    break 'field;
                }
            }
        }

        summaries
    }

    /// Advance the turn counter. Call once per full round.
    pub fn post_turn(&mut self) {
        self.turn += 1;
    }

    /// Thin the accumulated drop pool and hand back what survives.
    ///
    /// Each candidate is independently withheld with probability
    /// `drop_chance` ([`DEFAULT_DROP_CHANCE`] in normal play). Call
    /// exactly once after the battle loop exits; the pool is consumed.
    pub fn post_game(&mut self, drop_chance: f64) -> Vec<CardId> {
        let mut drops: Vec<CardId> = std::mem::take(&mut self.pending_drops).into_iter().collect();
        // Stable order so a seeded rng thins reproducibly
        drops.sort_unstable();
        drops.retain(|_| !self.rng.gen_bool(drop_chance));
        drops
    }

    /// Remove dead enemies, banking their loot. Returns gold gained.
    fn sweep_dead_enemies(&mut self) -> i32 {
        let mut gold = 0;
        for enemy in &self.enemies {
            if enemy.is_dead() {
                gold += enemy.roll_gold(&mut self.rng);
                self.pending_drops.extend(enemy.card_drops().iter().copied());
            }
        }
        self.enemies.retain(|enemy| !enemy.is_dead());
        gold
    }
}
