//! Rule queries the planner and resolver consult
//!
//! Hosts with their own occupancy or perk systems implement
//! [`EncounterRules`]; [`StandardRules`] covers the common case.

use crate::combat::constants::DEFAULT_MOVEMENT_COST;
use crate::combat::map::MapArea;
use crate::combat::state::{Combatant, Enemy, Perk};
use crate::core::types::GridPosition;

/// Movement/occupancy and perk queries
pub trait EncounterRules {
    /// Can `actor` step onto `position` given the living enemies on the map?
    fn is_position_walkable(
        &self,
        position: GridPosition,
        map: &MapArea,
        actor: &Combatant,
        living_enemies: &[&Enemy],
    ) -> bool;

    /// Does a perk make the actor's next attack cost zero AP?
    fn should_attack_be_free(&self, actor: &Combatant) -> bool;
}

/// Default rules: bounded walkable tiles, no stacking, gun-fu first shot free
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl EncounterRules for StandardRules {
    fn is_position_walkable(
        &self,
        position: GridPosition,
        map: &MapArea,
        actor: &Combatant,
        living_enemies: &[&Enemy],
    ) -> bool {
        let Some(tile) = map.tile(position) else {
            return false;
        };
        if !tile.is_walkable || position == actor.position {
            return false;
        }
        !living_enemies.iter().any(|e| e.position == position)
    }

    fn should_attack_be_free(&self, actor: &Combatant) -> bool {
        actor.has_perk(Perk::GunFu) && actor.perk_runtime.gun_fu_shots_this_turn == 0
    }
}

/// AP cost of one attack, or `None` when encumbrance makes it unpayable
pub fn attack_ap_cost(actor: &Combatant, rules: &dyn EncounterRules) -> Option<i32> {
    if rules.should_attack_be_free(actor) {
        return Some(0);
    }
    let multiplier = actor.encumbrance.attack_ap_multiplier;
    if !multiplier.is_finite() {
        return None;
    }
    let base = actor.weapon_ap_cost().max(0) as f32;
    let cost = (base * multiplier.max(0.0)).ceil();
    cost.is_finite().then_some(cost as i32)
}

/// AP cost of a single-step move, or `None` when movement is blocked
pub fn movement_ap_cost(actor: &Combatant) -> Option<i32> {
    actor
        .encumbrance
        .movement_ap_multiplier
        .is_finite()
        .then_some(DEFAULT_MOVEMENT_COST)
}

/// Straight-line range check; the attacker's own tile is never in range
pub fn is_in_attack_range(attacker: GridPosition, target: GridPosition, range: i32) -> bool {
    if range <= 0 {
        return false;
    }
    let distance = attacker.euclidean_distance(&target);
    distance > 0.0 && distance <= range as f32
}
