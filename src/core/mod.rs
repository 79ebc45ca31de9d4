//! Shared identifiers, configuration and errors

pub mod config;
pub mod error;
pub mod types;

pub use config::AutoBattleSettings;
pub use error::{AutoBattleError, Result};
pub use types::{CombatantId, GridPosition, TurnCount};
