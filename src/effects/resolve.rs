//! Forecasting and applying card effects.
//!
//! The damage pipeline is fixed: defense reduces each hit before the
//! hit count multiplies, shield then absorbs from the total, and health
//! takes the remainder. A card's self-buffs land after its damage, so a
//! strength card never boosts its own hits.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::Participant;

/// Predicted damage of one card against one opponent.
///
/// [`forecast`] is pure; [`resolve`] applies these exact numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageForecast {
    /// Damage of a single hit after the opponent's defense.
    pub per_hit: i32,
    /// Total across all hits, before shield.
    pub after_defense: i32,
    /// Amount the opponent's shield would absorb.
    pub absorbed: i32,
    /// Health the opponent would actually lose.
    pub health_loss: i32,
}

/// Compute the damage a card would deal, without mutating anything.
///
/// Per hit: `max(damage + user.strength - opponent.defense, 0)`.
/// Defense applies once per hit, before the hit multiplier; shield
/// absorbs from the multiplied total.
#[must_use]
pub fn forecast(card: &Card, user: &Participant, opponent: &Participant) -> DamageForecast {
    // A non-attack never touches health, whatever the user's strength
    if !card.is_attack() {
        return DamageForecast {
            per_hit: 0,
            after_defense: 0,
            absorbed: 0,
            health_loss: 0,
        };
    }

    let per_hit = (card.def.damage + user.strength - opponent.defense).max(0);
    let after_defense = per_hit * card.def.hits;
    let absorbed = opponent.shield.min(after_defense);

    DamageForecast {
        per_hit,
        after_defense,
        absorbed,
        health_loss: after_defense - absorbed,
    }
}

/// What one target suffered from a resolved card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetReport {
    /// Target name at resolution time.
    pub name: String,
    /// Health actually lost.
    pub damage: i32,
    /// Damage the target's shield absorbed.
    pub absorbed: i32,
    /// True iff this card killed the target.
    pub died: bool,
}

/// The structured result of resolving one card.
///
/// Carries everything a presentation layer needs to narrate the play;
/// the engine itself prints nothing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardOutcome {
    /// The card that was resolved.
    pub card: CardId,
    /// Per-target damage reports, in target order. Empty for pure
    /// defensive plays.
    pub targets: Vec<TargetReport>,
    /// Defense the user gained.
    pub defense_gained: i32,
    /// Shield the user gained.
    pub shield_gained: i32,
    /// Strength the user gained.
    pub strength_gained: i32,
}

impl CardOutcome {
    /// Total health lost across all targets.
    #[must_use]
    pub fn total_damage(&self) -> i32 {
        self.targets.iter().map(|t| t.damage).sum()
    }
}

/// Apply a card's effects: damage to every supplied opponent, then
/// self-buffs to the user.
///
/// The caller supplies the target set: one living opponent for a normal
/// attack, every living opponent for an attack-all card, none for a
/// pure defensive play. Each opponent's own defense and shield are
/// computed independently, with the user's strength as it was before
/// this card's buffs.
pub fn resolve(card: &Card, user: &mut Participant, opponents: &mut [&mut Participant]) -> CardOutcome {
    let mut targets = Vec::with_capacity(opponents.len());

    if card.is_attack() {
        for opponent in opponents.iter_mut() {
            let hit = forecast(card, user, opponent);

            opponent.shield -= hit.absorbed;
            opponent.take_damage(hit.health_loss);

            targets.push(TargetReport {
                name: opponent.name().to_string(),
                damage: hit.health_loss,
                absorbed: hit.absorbed,
                died: opponent.is_dead(),
            });
        }
    }

    user.defense += card.def.defense;
    user.shield += card.def.shield;
    user.strength += card.def.strength;

    CardOutcome {
        card: card.id,
        targets,
        defense_gained: card.def.defense,
        shield_gained: card.def.shield,
        strength_gained: card.def.strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardCatalog, CardDef, Side};

    fn fighter(name: &str, health: i32) -> Participant {
        Participant::new(name, health, 3, Vec::new())
    }

    fn card(catalog: &mut CardCatalog, def: CardDef) -> Card {
        let id = catalog.register(def);
        catalog.get_unchecked(id).clone()
    }

    #[test]
    fn test_defense_applies_per_hit_before_multiplier() {
        let mut catalog = CardCatalog::new();
        let double = card(&mut catalog, CardDef::new("Double Tap", 2, Side::Player).with_damage(5, 2));

        let mut user = fighter("Hero", 50);
        let mut target = fighter("Wolf", 30);
        target.defense = 2;

        // Per hit: 5 - 2 = 3, times 2 hits = 6 (not 10 - 2 = 8)
        let f = forecast(&double, &user, &target);
        assert_eq!(f.per_hit, 3);
        assert_eq!(f.after_defense, 6);

        resolve(&double, &mut user, &mut [&mut target]);
        assert_eq!(target.health(), 24);
    }

    #[test]
    fn test_strength_adds_per_hit() {
        let mut catalog = CardCatalog::new();
        let double = card(&mut catalog, CardDef::new("Double Tap", 2, Side::Player).with_damage(5, 2));

        let mut user = fighter("Hero", 50);
        user.strength = 3;
        let mut target = fighter("Wolf", 30);

        let f = forecast(&double, &user, &target);
        assert_eq!(f.per_hit, 8);
        assert_eq!(f.health_loss, 16);
    }

    #[test]
    fn test_defense_never_heals() {
        let mut catalog = CardCatalog::new();
        let stab = card(&mut catalog, CardDef::new("Stab", 1, Side::Player).with_damage(3, 1));

        let mut user = fighter("Hero", 50);
        let mut target = fighter("Turtle", 30);
        target.defense = 10;

        let f = forecast(&stab, &user, &target);
        assert_eq!(f.per_hit, 0);
        assert_eq!(f.health_loss, 0);

        resolve(&stab, &mut user, &mut [&mut target]);
        assert_eq!(target.health(), 30);
    }

    #[test]
    fn test_shield_absorbs_after_defense() {
        let mut catalog = CardCatalog::new();
        let smash = card(&mut catalog, CardDef::new("Smash", 2, Side::Player).with_damage(8, 1));

        let mut user = fighter("Hero", 50);
        let mut target = fighter("Wolf", 30);
        target.shield = 5;

        // After-defense 8 against shield 5 leaves 3 health loss
        let outcome = resolve(&smash, &mut user, &mut [&mut target]);

        assert_eq!(target.shield, 0);
        assert_eq!(target.health(), 27);
        assert_eq!(outcome.targets[0].absorbed, 5);
        assert_eq!(outcome.targets[0].damage, 3);
    }

    #[test]
    fn test_shield_decrements_by_exactly_absorbed() {
        let mut catalog = CardCatalog::new();
        let stab = card(&mut catalog, CardDef::new("Stab", 1, Side::Player).with_damage(4, 1));

        let mut user = fighter("Hero", 50);
        let mut target = fighter("Wolf", 30);
        target.shield = 9;

        resolve(&stab, &mut user, &mut [&mut target]);

        assert_eq!(target.shield, 5);
        assert_eq!(target.health(), 30);
    }

    #[test]
    fn test_forecast_matches_resolve() {
        let mut catalog = CardCatalog::new();
        let smash = card(
            &mut catalog,
            CardDef::new("Smash", 2, Side::Player).with_damage(6, 3),
        );

        let mut user = fighter("Hero", 50);
        user.strength = 2;
        let mut target = fighter("Wolf", 30);
        target.defense = 3;
        target.shield = 4;

        let before = target.health();
        let f = forecast(&smash, &user, &target);
        let outcome = resolve(&smash, &mut user, &mut [&mut target]);

        assert_eq!(outcome.targets[0].damage, f.health_loss);
        assert_eq!(outcome.targets[0].absorbed, f.absorbed);
        assert_eq!(target.health(), before - f.health_loss);
    }

    #[test]
    fn test_self_buffs_apply_after_damage() {
        let mut catalog = CardCatalog::new();
        let flurry = card(
            &mut catalog,
            CardDef::new("Flurry", 2, Side::Player).with_damage(4, 1).with_strength(3),
        );

        let mut user = fighter("Hero", 50);
        let mut target = fighter("Wolf", 30);

        let outcome = resolve(&flurry, &mut user, &mut [&mut target]);

        // The card's own strength buff does not boost its own damage
        assert_eq!(outcome.targets[0].damage, 4);
        assert_eq!(user.strength, 3);
        assert_eq!(outcome.strength_gained, 3);
    }

    #[test]
    fn test_pure_defensive_card_needs_no_target() {
        let mut catalog = CardCatalog::new();
        let stance = card(
            &mut catalog,
            CardDef::new("Defensive Stance", 2, Side::Player).with_defense(4).with_shield(3),
        );

        let mut user = fighter("Hero", 50);
        let outcome = resolve(&stance, &mut user, &mut []);

        assert_eq!(user.defense, 4);
        assert_eq!(user.shield, 3);
        assert!(outcome.targets.is_empty());
        assert_eq!(outcome.total_damage(), 0);
    }

    #[test]
    fn test_attack_all_uses_each_targets_own_mitigation() {
        let mut catalog = CardCatalog::new();
        let sweep = card(
            &mut catalog,
            CardDef::new("Sweep", 2, Side::Player).with_damage(6, 1).attack_all(),
        );

        let mut user = fighter("Hero", 50);
        let mut armored = fighter("Knight", 30);
        armored.defense = 4;
        let mut shielded = fighter("Mage", 30);
        shielded.shield = 2;
        let mut bare = fighter("Rat", 30);

        let outcome = resolve(&sweep, &mut user, &mut [&mut armored, &mut shielded, &mut bare]);

        assert_eq!(armored.health(), 28); // 6 - 4 defense
        assert_eq!(shielded.health(), 26); // 6 - 2 shield
        assert_eq!(shielded.shield, 0);
        assert_eq!(bare.health(), 24);
        assert_eq!(outcome.targets.len(), 3);
        assert_eq!(outcome.total_damage(), 2 + 4 + 6);
    }

    #[test]
    fn test_kill_is_reported() {
        let mut catalog = CardCatalog::new();
        let stab = card(&mut catalog, CardDef::new("Stab", 1, Side::Player).with_damage(6, 1));

        let mut user = fighter("Hero", 50);
        let mut target = fighter("Rat", 3);

        let outcome = resolve(&stab, &mut user, &mut [&mut target]);

        assert!(target.is_dead());
        assert_eq!(target.health(), 0);
        assert!(outcome.targets[0].died);
    }
}
