//! Reference encounter runtime
//!
//! Owns the snapshots the controller reads, applies the commands it returns,
//! and plays the enemy side so a whole encounter can run unattended.

pub mod enemy_phase;
pub mod state;

pub use enemy_phase::{run_enemy_phase, EnemyAction};
pub use state::{check_encounter_end, Encounter, EncounterOutcome};
