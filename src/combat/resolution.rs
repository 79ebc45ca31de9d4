//! Attack resolution
//!
//! The controller never rolls dice itself. It hands attacker, target and
//! cover context to a [`CombatResolver`] and applies whatever comes back.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::combat::constants::{
    cover_damage_multiplier, cover_hit_adjustment, BASE_CRITICAL_CHANCE, BASE_HIT_CHANCE,
    CRITICAL_DAMAGE_MULTIPLIER, HIT_CHANCE_FALLOFF_PER_TILE, MAX_HIT_CHANCE, MIN_HIT_CHANCE,
};
use crate::combat::map::{CoverLevel, MapArea};
use crate::combat::rules::{attack_ap_cost, EncounterRules};
use crate::combat::state::{Combatant, Enemy, Perk};
use crate::core::types::GridPosition;

/// Cover and rules context for a single attack
///
/// `rules` must be the same rules the attack was planned with, so the
/// resolver charges the AP cost the planner expected.
#[derive(Clone, Copy)]
pub struct AttackContext<'a> {
    pub is_behind_cover: bool,
    pub map: &'a MapArea,
    pub rules: &'a dyn EncounterRules,
}

/// Side effects of an attack worth telling the player about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// Attacker could not pay the AP cost
    AttackUnaffordable,
    /// Unsilenced ranged fire alerts nearby hostiles
    WeaponNoise { weapon: String },
}

/// Result of the player's attack on an enemy
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    pub new_attacker: Combatant,
    pub new_target: Enemy,
    pub success: bool,
    pub damage: i32,
    pub is_critical: bool,
    pub events: Vec<CombatEvent>,
}

/// Result of an enemy's attack on the player
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyAttackOutcome {
    pub new_attacker: Enemy,
    pub new_target: Combatant,
    pub success: bool,
    pub damage: i32,
}

/// Combat resolution primitive
pub trait CombatResolver {
    fn execute_attack(
        &mut self,
        attacker: &Combatant,
        target: &Enemy,
        context: &AttackContext,
    ) -> AttackOutcome;
}

/// Dice-rolling resolver with a deterministic seed
pub struct SeededCombatResolver {
    rng: ChaCha8Rng,
    critical_chance: f32,
}

impl SeededCombatResolver {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            critical_chance: BASE_CRITICAL_CHANCE,
        }
    }

    pub fn with_critical_chance(mut self, chance: f32) -> Self {
        self.critical_chance = chance.clamp(0.0, 1.0);
        self
    }

    /// Resolve an enemy's attack on the player
    pub fn resolve_enemy_attack(
        &mut self,
        attacker: &Enemy,
        target: &Combatant,
        map: &MapArea,
    ) -> EnemyAttackOutcome {
        let cover = map.cover_level(target.position);
        let hit_chance = hit_chance(attacker.position, target.position, cover);
        let success = self.rng.gen::<f32>() <= hit_chance;

        let damage = if success {
            scaled_damage(attacker.damage, cover_damage_multiplier(cover))
        } else {
            0
        };

        let mut new_attacker = attacker.clone();
        new_attacker.action_points = (new_attacker.action_points - 1).max(0);

        let mut new_target = target.clone();
        new_target.health = (new_target.health - damage).max(0);

        EnemyAttackOutcome {
            new_attacker,
            new_target,
            success,
            damage,
        }
    }
}

impl CombatResolver for SeededCombatResolver {
    fn execute_attack(
        &mut self,
        attacker: &Combatant,
        target: &Enemy,
        context: &AttackContext,
    ) -> AttackOutcome {
        let cost = attack_ap_cost(attacker, context.rules);
        let Some(cost) = cost.filter(|c| *c <= attacker.action_points) else {
            return AttackOutcome {
                new_attacker: attacker.clone(),
                new_target: target.clone(),
                success: false,
                damage: 0,
                is_critical: false,
                events: vec![CombatEvent::AttackUnaffordable],
            };
        };

        // The map's own cover level wins; a bare flag means half cover
        let cover = match context.map.cover_level(target.position) {
            CoverLevel::None if context.is_behind_cover => CoverLevel::Half,
            level if context.is_behind_cover => level,
            _ => CoverLevel::None,
        };

        let hit_chance = hit_chance(attacker.position, target.position, cover);
        let success = self.rng.gen::<f32>() <= hit_chance;

        let mut damage = 0;
        let mut is_critical = false;
        if success {
            damage = scaled_damage(attacker.weapon_damage(), cover_damage_multiplier(cover));
            if self.critical_chance > 0.0 && self.rng.gen::<f32>() < self.critical_chance {
                damage = scaled_damage(damage, CRITICAL_DAMAGE_MULTIPLIER);
                is_critical = true;
            }
        }

        let mut events = Vec::new();
        if let Some(weapon) = attacker.weapon.as_ref() {
            if weapon.is_ranged() && !weapon.silenced {
                events.push(CombatEvent::WeaponNoise {
                    weapon: weapon.name.clone(),
                });
            }
        }

        let mut new_target = target.clone();
        new_target.health = (new_target.health - damage).max(0);

        let mut new_attacker = attacker.clone();
        new_attacker.action_points = (new_attacker.action_points - cost).max(0);
        if new_attacker.has_perk(Perk::GunFu) {
            new_attacker.perk_runtime.gun_fu_shots_this_turn += 1;
        }

        AttackOutcome {
            new_attacker,
            new_target,
            success,
            damage,
            is_critical,
            events,
        }
    }
}

fn hit_chance(attacker: GridPosition, target: GridPosition, cover: CoverLevel) -> f32 {
    let distance = attacker.euclidean_distance(&target);
    let chance = BASE_HIT_CHANCE - distance * HIT_CHANCE_FALLOFF_PER_TILE + cover_hit_adjustment(cover);
    chance.clamp(MIN_HIT_CHANCE, MAX_HIT_CHANCE)
}

fn scaled_damage(base: i32, multiplier: f32) -> i32 {
    ((base.max(0) as f32) * multiplier).round() as i32
}
