//! Reference host: owns the encounter and applies controller commands

use serde::{Deserialize, Serialize};

use crate::automation::commands::{FloatingNumber, LogEntry, StateCommand};
use crate::automation::controller::AutoBattleUpdateContext;
use crate::automation::profiles::ProfileId;
use crate::automation::state::AutoBattleState;
use crate::combat::map::MapArea;
use crate::combat::state::{Combatant, Enemy, PerkRuntime};
use crate::core::types::TurnCount;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterOutcome {
    Undecided,
    Victory,
    Defeat,
}

/// Complete encounter state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    // Combatants
    pub player: Combatant,
    pub enemies: Vec<Enemy>,
    pub map: MapArea,

    // Turn state
    pub in_combat: bool,
    pub is_player_turn: bool,
    pub turn_count: TurnCount,
    pub active_dialogue_id: Option<String>,
    pub outcome: EncounterOutcome,

    // Host-facing views
    pub auto_battle: AutoBattleState,
    pub log: Vec<LogEntry>,
    pub floating_numbers: Vec<FloatingNumber>,
}

impl Encounter {
    pub fn new(player: Combatant, enemies: Vec<Enemy>, map: MapArea) -> Self {
        Self {
            player,
            enemies,
            map,
            in_combat: true,
            is_player_turn: true,
            turn_count: 1,
            active_dialogue_id: None,
            outcome: EncounterOutcome::Undecided,
            auto_battle: AutoBattleState::default(),
            log: Vec::new(),
            floating_numbers: Vec::new(),
        }
    }

    pub fn is_finished(&self) -> bool {
        self.outcome != EncounterOutcome::Undecided
    }

    pub fn living_enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.enemies.iter().filter(|e| e.is_alive())
    }

    /// Snapshot for the controller's next tick
    pub fn update_context(&self, enabled: bool, profile_id: ProfileId) -> AutoBattleUpdateContext<'_> {
        AutoBattleUpdateContext {
            enabled,
            profile_id,
            player: &self.player,
            enemies: &self.enemies,
            map: Some(&self.map),
            in_combat: self.in_combat,
            is_player_turn: self.is_player_turn,
            turn_count: self.turn_count,
            active_dialogue_id: self.active_dialogue_id.as_deref(),
        }
    }

    /// Apply one command in order
    pub fn apply(&mut self, command: StateCommand) {
        match command {
            StateCommand::SetStatus { status, reason } => self.auto_battle.set_status(status, reason),
            StateCommand::RecordDecision(summary) => self.auto_battle.record_decision(summary),
            StateCommand::ApplyDamage { attacker, target } => {
                self.player = attacker;
                if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == target.id) {
                    *enemy = target;
                }
                self.check_end();
            }
            StateCommand::MovePlayer(position) => self.player.position = position,
            StateCommand::AdjustActionPoints(delta) => {
                self.player.action_points = (self.player.action_points + delta).max(0);
            }
            StateCommand::EndTurn => self.switch_turn(),
            StateCommand::LogMessage(entry) => self.log.push(entry),
            StateCommand::FloatingNumber(number) => self.floating_numbers.push(number),
        }
    }

    pub fn apply_all(&mut self, commands: impl IntoIterator<Item = StateCommand>) {
        for command in commands {
            self.apply(command);
        }
    }

    /// Hand the turn to the other side
    pub fn switch_turn(&mut self) {
        if self.is_player_turn {
            self.is_player_turn = false;
            for enemy in self.enemies.iter_mut().filter(|e| e.is_alive()) {
                enemy.action_points = enemy.max_action_points;
            }
            tracing::debug!("Turn {}: enemy phase", self.turn_count);
        } else {
            self.begin_player_turn();
        }
    }

    /// Back to the player: new turn number, full AP, fresh perk counters
    pub fn begin_player_turn(&mut self) {
        self.is_player_turn = true;
        self.turn_count += 1;
        self.player.action_points = self.player.max_action_points;
        self.player.perk_runtime = PerkRuntime::default();
        tracing::debug!("Turn {}: player phase", self.turn_count);
    }

    /// Settle the outcome once one side is down
    pub fn check_end(&mut self) {
        if let Some(outcome) = check_encounter_end(self) {
            tracing::info!("Encounter ended on turn {}: {:?}", self.turn_count, outcome);
            self.outcome = outcome;
            self.in_combat = false;
        }
    }
}

pub fn check_encounter_end(encounter: &Encounter) -> Option<EncounterOutcome> {
    if !encounter.player.is_alive() {
        return Some(EncounterOutcome::Defeat);
    }
    if encounter.living_enemies().next().is_none() {
        return Some(EncounterOutcome::Victory);
    }
    None
}
