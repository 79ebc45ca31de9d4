//! Auto-Battle - tactical decision engine for turn-based squad encounters
//!
//! The planner scores attack, move and wait candidates under a behaviour
//! profile; the controller drives it from a host tick loop and hands back
//! state commands for the host to apply.

pub mod automation;
pub mod combat;
pub mod core;
pub mod encounter;

pub use automation::{
    plan_action, AutoBattleController, AutoBattleProfile, AutoBattleUpdateContext, Decision,
    PlannerContext, ProfileId, StateCommand,
};
pub use combat::{Combatant, Enemy, MapArea};
pub use crate::core::{AutoBattleError, AutoBattleSettings, CombatantId, GridPosition, Result};
pub use encounter::{Encounter, EncounterOutcome};
