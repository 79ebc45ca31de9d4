//! State-transition commands returned by the controller
//!
//! The engine never writes to host state directly. Every mutation it wants
//! (AP spend, movement, damage, turn end, log lines, floating numbers) comes
//! back as a [`StateCommand`] for the host to apply in order.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::automation::decision::{DecisionDescription, DecisionSummary};
use crate::automation::state::{AutoBattleStatus, PauseReason};
use crate::combat::resolution::CombatEvent;
use crate::combat::state::{Combatant, Enemy};
use crate::core::types::GridPosition;

/// Semantic log line; hosts render it through their own string tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", rename_all = "snake_case")]
pub enum LogEntry {
    AutoBattleEngaged { profile: String },
    AutoBattlePaused { reason: Option<PauseReason> },
    AutoBattleDecision { profile: String, decision: DecisionDescription },
    HitEnemy { target: String, damage: i32 },
    MissedEnemy { target: String },
    Combat { event: CombatEvent },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatingNumberKind {
    Damage,
    Crit,
}

/// Damage number to float over a tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatingNumber {
    pub id: Uuid,
    pub value: i32,
    pub position: GridPosition,
    pub kind: FloatingNumberKind,
}

impl FloatingNumber {
    pub fn new(value: i32, position: GridPosition, kind: FloatingNumberKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            value,
            position,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum StateCommand {
    SetStatus {
        status: AutoBattleStatus,
        reason: Option<PauseReason>,
    },
    RecordDecision(DecisionSummary),
    /// Write back attacker and target snapshots after an attack
    ApplyDamage { attacker: Combatant, target: Enemy },
    MovePlayer(GridPosition),
    /// Signed AP delta for the acting combatant
    AdjustActionPoints(i32),
    EndTurn,
    LogMessage(LogEntry),
    FloatingNumber(FloatingNumber),
}

impl StateCommand {
    /// Does applying this command change the encounter itself (not just HUD/log)?
    pub fn mutates_encounter(&self) -> bool {
        matches!(
            self,
            StateCommand::ApplyDamage { .. }
                | StateCommand::MovePlayer(_)
                | StateCommand::AdjustActionPoints(_)
                | StateCommand::EndTurn
        )
    }
}
