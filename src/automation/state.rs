//! Host-visible automation status
//!
//! The controller keeps its own copy of status and reason; hosts mirror them
//! into an [`AutoBattleState`] by applying `SetStatus` / `RecordDecision`
//! commands, which is what HUDs read.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::automation::decision::DecisionSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutoBattleStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

/// Why automation stopped acting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PauseReason {
    ManualInput,
    Dialogue,
    Objective,
    Resources,
    Ap,
    /// Encounter not in a plannable state (no combat, not our turn, no map)
    Settings,
}

impl PauseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            PauseReason::ManualInput => "manual_input",
            PauseReason::Dialogue => "dialogue",
            PauseReason::Objective => "objective",
            PauseReason::Resources => "resources",
            PauseReason::Ap => "ap",
            PauseReason::Settings => "settings",
        }
    }
}

impl fmt::Display for PauseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HUD string key for a pause reason; `Settings` and no reason show as "none"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HudPauseKey {
    None,
    ManualInput,
    Dialogue,
    Objective,
    Resources,
    Ap,
}

impl From<Option<PauseReason>> for HudPauseKey {
    fn from(reason: Option<PauseReason>) -> Self {
        match reason {
            Some(PauseReason::ManualInput) => HudPauseKey::ManualInput,
            Some(PauseReason::Dialogue) => HudPauseKey::Dialogue,
            Some(PauseReason::Objective) => HudPauseKey::Objective,
            Some(PauseReason::Resources) => HudPauseKey::Resources,
            Some(PauseReason::Ap) => HudPauseKey::Ap,
            Some(PauseReason::Settings) | None => HudPauseKey::None,
        }
    }
}

/// Host-owned mirror of the controller's status
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoBattleState {
    pub status: AutoBattleStatus,
    pub reason: Option<PauseReason>,
    pub last_decision: Option<DecisionSummary>,
}

impl AutoBattleState {
    pub fn set_status(&mut self, status: AutoBattleStatus, reason: Option<PauseReason>) {
        self.status = status;
        self.reason = reason;
    }

    /// Recording a decision implies automation is running
    pub fn record_decision(&mut self, summary: DecisionSummary) {
        self.last_decision = Some(summary);
        self.status = AutoBattleStatus::Running;
        self.reason = None;
    }

    pub fn clear_decision(&mut self) {
        self.last_decision = None;
    }

    pub fn hud_pause_key(&self) -> HudPauseKey {
        self.reason.into()
    }
}
