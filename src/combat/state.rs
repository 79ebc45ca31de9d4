//! Combatant snapshots owned by the encounter runtime
//!
//! The planner reads these; only the host mutates them, by applying the
//! commands the controller returns.

use serde::{Deserialize, Serialize};

use crate::combat::constants::{DEFAULT_ATTACK_COST, DEFAULT_ATTACK_DAMAGE, DEFAULT_WEAPON_RANGE};
use crate::combat::weapons::Weapon;
use crate::core::types::{CombatantId, GridPosition};

/// Carry-weight penalties applied to action costs
///
/// A non-finite multiplier means the action cannot be paid for at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Encumbrance {
    pub attack_ap_multiplier: f32,
    pub movement_ap_multiplier: f32,
}

impl Default for Encumbrance {
    fn default() -> Self {
        Self {
            attack_ap_multiplier: 1.0,
            movement_ap_multiplier: 1.0,
        }
    }
}

impl Encumbrance {
    /// Overloaded past the point of acting
    pub fn immobilized() -> Self {
        Self {
            attack_ap_multiplier: f32::INFINITY,
            movement_ap_multiplier: f32::INFINITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Perk {
    /// First attack each turn costs no AP
    GunFu,
}

/// Per-turn perk bookkeeping, reset at the start of each player turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerkRuntime {
    pub gun_fu_shots_this_turn: u32,
}

/// The combatant under automated control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub position: GridPosition,
    pub health: i32,
    pub max_health: i32,
    pub action_points: i32,
    pub max_action_points: i32,
    pub weapon: Option<Weapon>,
    #[serde(default)]
    pub encumbrance: Encumbrance,
    #[serde(default)]
    pub perks: Vec<Perk>,
    #[serde(default)]
    pub perk_runtime: PerkRuntime,
}

impl Combatant {
    pub fn new(name: &str, position: GridPosition, max_health: i32, max_action_points: i32) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.to_string(),
            position,
            health: max_health,
            max_health,
            action_points: max_action_points,
            max_action_points,
            weapon: None,
            encumbrance: Encumbrance::default(),
            perks: Vec::new(),
            perk_runtime: PerkRuntime::default(),
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn has_perk(&self, perk: Perk) -> bool {
        self.perks.contains(&perk)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Health as a fraction of max; a combatant without max health counts as healthy
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0 {
            self.health as f32 / self.max_health as f32
        } else {
            1.0
        }
    }

    pub fn weapon_damage(&self) -> i32 {
        self.weapon.as_ref().map_or(DEFAULT_ATTACK_DAMAGE, |w| w.damage)
    }

    pub fn weapon_range(&self) -> i32 {
        self.weapon.as_ref().map_or(DEFAULT_WEAPON_RANGE, |w| w.range)
    }

    pub fn weapon_ap_cost(&self) -> i32 {
        self.weapon.as_ref().map_or(DEFAULT_ATTACK_COST, |w| w.ap_cost)
    }
}

/// A hostile combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: CombatantId,
    pub name: String,
    pub position: GridPosition,
    pub health: i32,
    pub max_health: i32,
    pub action_points: i32,
    pub max_action_points: i32,
    pub damage: i32,
    pub attack_range: i32,
}

impl Enemy {
    pub fn new(name: &str, position: GridPosition) -> Self {
        Self {
            id: CombatantId::new(),
            name: name.to_string(),
            position,
            health: 40,
            max_health: 40,
            action_points: 4,
            max_action_points: 4,
            damage: 6,
            attack_range: 2,
        }
    }

    pub fn with_health(mut self, health: i32, max_health: i32) -> Self {
        self.health = health;
        self.max_health = max_health;
        self
    }

    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0 {
            self.health as f32 / self.max_health as f32
        } else {
            1.0
        }
    }
}
