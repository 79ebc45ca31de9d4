//! Auto-battle automation
//!
//! - `profiles`: tunable behaviour personalities, loadable from TOML
//! - `planner`: pure scoring of attack / move / wait candidates
//! - `controller`: tick-driven state machine that plans and executes
//! - `commands`: the state transitions handed back to the host

pub mod commands;
pub mod constants;
pub mod controller;
pub mod decision;
pub mod planner;
pub mod profiles;
pub mod signature;
pub mod state;
pub mod text;

pub use commands::{FloatingNumber, FloatingNumberKind, LogEntry, StateCommand};
pub use controller::{AutoBattleController, AutoBattleUpdateContext};
pub use decision::{ActionSummary, Decision, DecisionDescription, DecisionSummary, Rationale};
pub use planner::{plan_action, PlannerContext};
pub use profiles::{
    get_profile, get_profile_by_name, load_profile, AutoBattleProfile, ProfileId, ProfileRegistry,
    ProfileThresholds, ProfileWeights,
};
pub use signature::TickSignature;
pub use state::{AutoBattleState, AutoBattleStatus, HudPauseKey, PauseReason};
pub use text::{EnglishLogStrings, LogStrings};
