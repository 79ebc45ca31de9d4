//! Combat snapshots and the small combat-math helpers the planner leans on
//!
//! Everything here is host-facing data plus pure queries. The automation
//! layer reads it; only the host mutates it.

pub mod constants;
pub mod map;
pub mod resolution;
pub mod rules;
pub mod state;
pub mod weapons;

pub use map::{CoverLevel, MapArea, MapTile, TileType};
pub use resolution::{
    AttackContext, AttackOutcome, CombatEvent, CombatResolver, EnemyAttackOutcome,
    SeededCombatResolver,
};
pub use rules::{attack_ap_cost, is_in_attack_range, movement_ap_cost, EncounterRules, StandardRules};
pub use state::{Combatant, Encumbrance, Enemy, Perk, PerkRuntime};
pub use weapons::Weapon;
