//! Planner output
//!
//! A [`Decision`] is created fresh every planning cycle, never mutated, and
//! dropped once executed. Rationale entries are semantic keys with their
//! numeric parameters, not prose, so hosts localise them independently.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::automation::profiles::ProfileId;
use crate::core::types::{CombatantId, GridPosition, TurnCount};

/// One reason behind a candidate's score, in the order it was considered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "snake_case")]
pub enum Rationale {
    NoLivingEnemies,
    NoAdvantageousAction,
    Distance(u32),
    ExpectedDamage(f32),
    TargetVulnerable,
    PanicDampeningAttack,
    PreserveApReserve,
    GainCover,
    MaintainCover,
    AdvanceOnTarget,
    CreateDistance,
    HoldApReserve,
}

impl Rationale {
    pub fn key(&self) -> &'static str {
        match self {
            Rationale::NoLivingEnemies => "no living enemies",
            Rationale::NoAdvantageousAction => "no advantageous action",
            Rationale::Distance(_) => "distance",
            Rationale::ExpectedDamage(_) => "expected damage",
            Rationale::TargetVulnerable => "target vulnerable",
            Rationale::PanicDampeningAttack => "panic dampening attack",
            Rationale::PreserveApReserve => "preserve ap reserve",
            Rationale::GainCover => "gain cover",
            Rationale::MaintainCover => "maintain cover",
            Rationale::AdvanceOnTarget => "advance on target",
            Rationale::CreateDistance => "create distance",
            Rationale::HoldApReserve => "hold ap reserve",
        }
    }
}

impl fmt::Display for Rationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rationale::Distance(d) => write!(f, "{} {}", self.key(), d),
            Rationale::ExpectedDamage(e) => write!(f, "{} {:.1}", self.key(), e),
            _ => f.write_str(self.key()),
        }
    }
}

/// Short label for what a decision does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionSummary {
    NoTargets,
    Attack,
    MoveToCover,
    Reposition,
    HoldPosition,
}

impl ActionSummary {
    pub fn label(&self) -> &'static str {
        match self {
            ActionSummary::NoTargets => "No targets",
            ActionSummary::Attack => "Attack",
            ActionSummary::MoveToCover => "Move to cover",
            ActionSummary::Reposition => "Reposition",
            ActionSummary::HoldPosition => "Hold position",
        }
    }
}

impl fmt::Display for ActionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Decision {
    Attack {
        target_id: CombatantId,
        target_name: String,
        target_position: GridPosition,
        expected_damage: f32,
        ap_cost: i32,
        distance: u32,
        score: f32,
        rationale: Vec<Rationale>,
    },
    Move {
        destination: GridPosition,
        cover_gain: f32,
        distance_to_nearest_enemy: u32,
        ap_cost: i32,
        score: f32,
        rationale: Vec<Rationale>,
    },
    Wait {
        score: f32,
        rationale: Vec<Rationale>,
    },
}

impl Decision {
    /// Sentinel returned when nothing is left alive to fight
    pub fn no_targets() -> Self {
        Decision::Wait {
            score: f32::NEG_INFINITY,
            rationale: vec![Rationale::NoLivingEnemies],
        }
    }

    pub fn score(&self) -> f32 {
        match self {
            Decision::Attack { score, .. }
            | Decision::Move { score, .. }
            | Decision::Wait { score, .. } => *score,
        }
    }

    pub fn rationale(&self) -> &[Rationale] {
        match self {
            Decision::Attack { rationale, .. }
            | Decision::Move { rationale, .. }
            | Decision::Wait { rationale, .. } => rationale,
        }
    }

    /// AP the decision expects to spend; waiting is accounted for at execution
    pub fn ap_cost(&self) -> i32 {
        match self {
            Decision::Attack { ap_cost, .. } | Decision::Move { ap_cost, .. } => *ap_cost,
            Decision::Wait { .. } => 0,
        }
    }

    pub fn target_id(&self) -> Option<CombatantId> {
        match self {
            Decision::Attack { target_id, .. } => Some(*target_id),
            _ => None,
        }
    }

    pub fn target_name(&self) -> Option<&str> {
        match self {
            Decision::Attack { target_name, .. } => Some(target_name),
            _ => None,
        }
    }

    pub fn summary(&self) -> ActionSummary {
        match self {
            Decision::Attack { .. } => ActionSummary::Attack,
            Decision::Move { cover_gain, .. } if *cover_gain > 0.0 => ActionSummary::MoveToCover,
            Decision::Move { .. } => ActionSummary::Reposition,
            Decision::Wait { rationale, .. }
                if rationale.first() == Some(&Rationale::NoLivingEnemies) =>
            {
                ActionSummary::NoTargets
            }
            Decision::Wait { .. } => ActionSummary::HoldPosition,
        }
    }

    /// Summary plus the leading rationale, as used in the decision log line
    pub fn description(&self) -> DecisionDescription {
        DecisionDescription {
            summary: self.summary(),
            target_name: self.target_name().map(str::to_string),
            lead_rationale: self.rationale().first().cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionDescription {
    pub summary: ActionSummary,
    pub target_name: Option<String>,
    pub lead_rationale: Option<Rationale>,
}

impl fmt::Display for DecisionDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary)?;
        if let Some(target) = &self.target_name {
            write!(f, " {}", target)?;
        }
        if let Some(lead) = &self.lead_rationale {
            write!(f, " ({})", lead)?;
        }
        Ok(())
    }
}

/// What the host remembers about the most recent decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub profile_id: ProfileId,
    pub action: ActionSummary,
    pub target_id: Option<CombatantId>,
    pub target_name: Option<String>,
    pub score: f32,
    /// Rationale joined with ", "
    pub explanation: String,
    pub turn: TurnCount,
}

impl DecisionSummary {
    pub fn from_decision(decision: &Decision, profile_id: ProfileId, turn: TurnCount) -> Self {
        let explanation = decision
            .rationale()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self {
            profile_id,
            action: decision.summary(),
            target_id: decision.target_id(),
            target_name: decision.target_name().map(str::to_string),
            score: decision.score(),
            explanation,
            turn,
        }
    }
}
