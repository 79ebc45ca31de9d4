//! Localized text tables
//!
//! The engine only emits [`LogEntry`] keys and parameters. Hosts implement
//! [`LogStrings`] per locale; [`EnglishLogStrings`] is the reference table.

use crate::automation::commands::LogEntry;
use crate::automation::decision::DecisionDescription;
use crate::automation::state::HudPauseKey;
use crate::combat::resolution::CombatEvent;

pub trait LogStrings {
    fn auto_battle_engaged(&self, profile: &str) -> String;
    fn auto_battle_paused(&self, reason: &str) -> String;
    fn auto_battle_decision(&self, profile: &str, decision: &str) -> String;
    fn hit_enemy(&self, target: &str, damage: i32) -> String;
    fn missed_enemy(&self, target: &str) -> String;
    fn hud_pause_reason(&self, key: HudPauseKey) -> String;
    fn combat_event(&self, event: &CombatEvent) -> String;

    fn decision_description(&self, description: &DecisionDescription) -> String {
        description.to_string()
    }

    fn render(&self, entry: &LogEntry) -> String {
        match entry {
            LogEntry::AutoBattleEngaged { profile } => self.auto_battle_engaged(profile),
            LogEntry::AutoBattlePaused { reason } => {
                let reason_text = self.hud_pause_reason(HudPauseKey::from(*reason));
                self.auto_battle_paused(&reason_text)
            }
            LogEntry::AutoBattleDecision { profile, decision } => {
                self.auto_battle_decision(profile, &self.decision_description(decision))
            }
            LogEntry::HitEnemy { target, damage } => self.hit_enemy(target, *damage),
            LogEntry::MissedEnemy { target } => self.missed_enemy(target),
            LogEntry::Combat { event } => self.combat_event(event),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLogStrings;

impl LogStrings for EnglishLogStrings {
    fn auto_battle_engaged(&self, profile: &str) -> String {
        format!("AutoBattle engaged ({} profile).", profile)
    }

    fn auto_battle_paused(&self, reason: &str) -> String {
        format!("AutoBattle paused: {}.", reason)
    }

    fn auto_battle_decision(&self, profile: &str, decision: &str) -> String {
        format!("AutoBattle [{}]: {}", profile, decision)
    }

    fn hit_enemy(&self, target: &str, damage: i32) -> String {
        format!("You hit {} for {} damage.", target, damage)
    }

    fn missed_enemy(&self, target: &str) -> String {
        format!("You missed {}.", target)
    }

    fn hud_pause_reason(&self, key: HudPauseKey) -> String {
        match key {
            HudPauseKey::None => "standing by",
            HudPauseKey::ManualInput => "manual input",
            HudPauseKey::Dialogue => "dialogue active",
            HudPauseKey::Objective => "objective update",
            HudPauseKey::Resources => "resources low",
            HudPauseKey::Ap => "out of AP",
        }
        .to_string()
    }

    fn combat_event(&self, event: &CombatEvent) -> String {
        match event {
            CombatEvent::AttackUnaffordable => "Not enough AP to attack.".to_string(),
            CombatEvent::WeaponNoise { weapon } => {
                format!("{} echoes loudly, nearby hostiles are on edge.", weapon)
            }
        }
    }
}
