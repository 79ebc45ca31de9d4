//! Re-planning signature
//!
//! The controller only re-plans when something the planner cares about has
//! changed. Enemy pairs are sorted by id so snapshot order never matters.

use serde::{Deserialize, Serialize};

use crate::combat::state::{Combatant, Enemy};
use crate::core::types::{CombatantId, GridPosition, TurnCount};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickSignature {
    pub turn: TurnCount,
    pub action_points: i32,
    pub position: GridPosition,
    /// Free attacks already spent; a free miss changes nothing else
    pub free_attacks_used: u32,
    /// `(id, health)` of every living enemy, sorted by id
    pub enemies: Vec<(CombatantId, i32)>,
}

impl TickSignature {
    pub fn capture(turn: TurnCount, actor: &Combatant, enemies: &[Enemy]) -> Self {
        let mut pairs: Vec<(CombatantId, i32)> = enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| (e.id, e.health))
            .collect();
        pairs.sort_unstable();
        Self {
            turn,
            action_points: actor.action_points,
            position: actor.position,
            free_attacks_used: actor.perk_runtime.gun_fu_shots_this_turn,
            enemies: pairs,
        }
    }
}
