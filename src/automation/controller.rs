//! Auto-battle controller - drives the planner from the host's tick loop
//!
//! State machine: `Idle ⇄ Running ⇄ Paused`, plus a sticky manual override
//! that pins the controller to `Paused(ManualInput)` until automation is
//! switched off and on again.
//!
//! Every tick the host passes a fresh snapshot. The controller checks its
//! fail-safes, compares a [`TickSignature`] with the one it last planned
//! on, and only when something changed does it plan and execute. All
//! effects come back as [`StateCommand`]s; nothing is written directly.

use crate::automation::commands::{FloatingNumber, FloatingNumberKind, LogEntry, StateCommand};
use crate::automation::decision::{Decision, DecisionSummary};
use crate::automation::planner::{plan_action, PlannerContext};
use crate::automation::profiles::{ProfileId, ProfileRegistry};
use crate::automation::signature::TickSignature;
use crate::automation::state::{AutoBattleStatus, PauseReason};
use crate::combat::constants::DEFAULT_ATTACK_COST;
use crate::combat::map::MapArea;
use crate::combat::resolution::{AttackContext, CombatEvent, CombatResolver};
use crate::combat::rules::{is_in_attack_range, EncounterRules, StandardRules};
use crate::combat::state::{Combatant, Enemy};
use crate::core::types::{CombatantId, GridPosition, TurnCount};

/// Snapshot handed to the controller every tick
#[derive(Debug, Clone, Copy)]
pub struct AutoBattleUpdateContext<'a> {
    pub enabled: bool,
    pub profile_id: ProfileId,
    pub player: &'a Combatant,
    pub enemies: &'a [Enemy],
    pub map: Option<&'a MapArea>,
    pub in_combat: bool,
    pub is_player_turn: bool,
    pub turn_count: TurnCount,
    pub active_dialogue_id: Option<&'a str>,
}

pub struct AutoBattleController<R: EncounterRules = StandardRules> {
    registry: ProfileRegistry,
    rules: R,
    status: AutoBattleStatus,
    reason: Option<PauseReason>,
    last_signature: Option<TickSignature>,
    manual_override: bool,
}

impl AutoBattleController<StandardRules> {
    /// Controller over the built-in profiles and standard rules
    pub fn new() -> Self {
        Self::with_rules(ProfileRegistry::new(), StandardRules)
    }
}

impl Default for AutoBattleController<StandardRules> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: EncounterRules> AutoBattleController<R> {
    pub fn with_rules(registry: ProfileRegistry, rules: R) -> Self {
        Self {
            registry,
            rules,
            status: AutoBattleStatus::Idle,
            reason: None,
            last_signature: None,
            manual_override: false,
        }
    }

    pub fn status(&self) -> AutoBattleStatus {
        self.status
    }

    pub fn reason(&self) -> Option<PauseReason> {
        self.reason
    }

    pub fn is_manual_override(&self) -> bool {
        self.manual_override
    }

    pub fn last_signature(&self) -> Option<&TickSignature> {
        self.last_signature.as_ref()
    }

    pub fn registry(&self) -> &ProfileRegistry {
        &self.registry
    }

    /// Forget everything; call when a new encounter starts
    pub fn reset(&mut self) {
        self.status = AutoBattleStatus::Idle;
        self.reason = None;
        self.last_signature = None;
        self.manual_override = false;
    }

    /// The player touched the controls; pause until automation is re-enabled
    pub fn notify_manual_override(&mut self, reason: PauseReason) -> Vec<StateCommand> {
        tracing::info!("Auto-battle manual override: {}", reason);
        self.manual_override = true;
        self.last_signature = None;
        self.status = AutoBattleStatus::Paused;
        self.reason = Some(reason);
        vec![
            StateCommand::SetStatus {
                status: AutoBattleStatus::Paused,
                reason: Some(reason),
            },
            StateCommand::LogMessage(LogEntry::AutoBattlePaused {
                reason: Some(reason),
            }),
        ]
    }

    /// Advance the controller by one host tick
    pub fn update(
        &mut self,
        context: &AutoBattleUpdateContext,
        resolver: &mut dyn CombatResolver,
    ) -> Vec<StateCommand> {
        let mut commands = Vec::new();
        let profile_label = self.registry.get(context.profile_id).label.clone();

        if !context.enabled {
            self.transition(AutoBattleStatus::Idle, None, &profile_label, &mut commands);
            self.manual_override = false;
            self.last_signature = None;
            return commands;
        }

        if self.manual_override {
            self.transition(
                AutoBattleStatus::Paused,
                Some(PauseReason::ManualInput),
                &profile_label,
                &mut commands,
            );
            return commands;
        }

        let map = match self.resolve_fail_safe(context) {
            Ok(map) => map,
            Err(reason) => {
                self.transition(AutoBattleStatus::Paused, Some(reason), &profile_label, &mut commands);
                self.last_signature = None;
                return commands;
            }
        };

        let signature = TickSignature::capture(context.turn_count, context.player, context.enemies);
        if self.last_signature.as_ref() == Some(&signature) {
            tracing::debug!("Auto-battle signature unchanged, skipping turn {}", context.turn_count);
            return commands;
        }

        let decision = plan_action(&PlannerContext {
            actor: context.player,
            enemies: context.enemies,
            map,
            profile: self.registry.get(context.profile_id),
            rules: &self.rules,
        });
        tracing::info!(
            "Auto-battle [{}] chose {} (score {:.2})",
            profile_label,
            decision.description(),
            decision.score()
        );

        commands.push(StateCommand::RecordDecision(DecisionSummary::from_decision(
            &decision,
            context.profile_id,
            context.turn_count,
        )));
        self.transition(AutoBattleStatus::Running, None, &profile_label, &mut commands);
        commands.push(StateCommand::LogMessage(LogEntry::AutoBattleDecision {
            profile: profile_label,
            decision: decision.description(),
        }));

        self.execute_into(&decision, context.player, context.enemies, map, resolver, &mut commands);
        self.last_signature = Some(signature);
        commands
    }

    /// Execute a previously planned decision against the current snapshot
    ///
    /// Refuses to act off-turn or outside combat. A stale target or move
    /// falls back to waiting out the turn.
    pub fn execute_decision(
        &self,
        decision: &Decision,
        context: &AutoBattleUpdateContext,
        resolver: &mut dyn CombatResolver,
    ) -> Vec<StateCommand> {
        let mut commands = Vec::new();
        let Some(map) = context.map else {
            return commands;
        };
        if !context.in_combat || !context.is_player_turn {
            tracing::warn!("Refusing to execute auto-battle decision off-turn");
            return commands;
        }
        self.execute_into(decision, context.player, context.enemies, map, resolver, &mut commands);
        commands
    }

    /// The map to plan on, or the reason planning must pause
    fn resolve_fail_safe<'a>(
        &self,
        context: &AutoBattleUpdateContext<'a>,
    ) -> Result<&'a MapArea, PauseReason> {
        let map = match context.map {
            Some(map) if context.in_combat && context.is_player_turn => map,
            _ => return Err(PauseReason::Settings),
        };
        if context.player.action_points <= 0 {
            return Err(PauseReason::Ap);
        }
        if context.active_dialogue_id.is_some() {
            return Err(PauseReason::Dialogue);
        }
        if !context.enemies.iter().any(Enemy::is_alive) {
            return Err(PauseReason::Settings);
        }
        Ok(map)
    }

    /// Emit status commands only when status or reason actually change
    fn transition(
        &mut self,
        status: AutoBattleStatus,
        reason: Option<PauseReason>,
        profile_label: &str,
        commands: &mut Vec<StateCommand>,
    ) {
        if self.status == status && self.reason == reason {
            return;
        }
        tracing::info!(
            "Auto-battle {:?} -> {:?} (reason: {:?})",
            self.status,
            status,
            reason
        );
        self.status = status;
        self.reason = reason;
        commands.push(StateCommand::SetStatus { status, reason });

        match status {
            AutoBattleStatus::Running => {
                commands.push(StateCommand::LogMessage(LogEntry::AutoBattleEngaged {
                    profile: profile_label.to_string(),
                }));
            }
            AutoBattleStatus::Paused => {
                commands.push(StateCommand::LogMessage(LogEntry::AutoBattlePaused { reason }));
            }
            AutoBattleStatus::Idle => {}
        }
    }

    fn execute_into(
        &self,
        decision: &Decision,
        player: &Combatant,
        enemies: &[Enemy],
        map: &MapArea,
        resolver: &mut dyn CombatResolver,
        commands: &mut Vec<StateCommand>,
    ) {
        match decision {
            Decision::Attack {
                target_id,
                target_name,
                ..
            } => self.execute_attack(*target_id, target_name, player, enemies, map, resolver, commands),
            Decision::Move {
                destination,
                ap_cost,
                ..
            } => self.execute_move(*destination, *ap_cost, player, enemies, map, commands),
            Decision::Wait { .. } => self.execute_wait(player, commands),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn execute_attack(
        &self,
        target_id: CombatantId,
        target_name: &str,
        player: &Combatant,
        enemies: &[Enemy],
        map: &MapArea,
        resolver: &mut dyn CombatResolver,
        commands: &mut Vec<StateCommand>,
    ) {
        let Some(enemy) = enemies.iter().find(|e| e.id == target_id && e.is_alive()) else {
            tracing::warn!(
                "Attack target {} no longer valid; falling back to wait",
                target_id
            );
            self.execute_wait(player, commands);
            return;
        };
        if !is_in_attack_range(player.position, enemy.position, player.weapon_range()) {
            tracing::warn!(
                "Attack target {} moved out of range; falling back to wait",
                target_name
            );
            self.execute_wait(player, commands);
            return;
        }

        let context = AttackContext {
            is_behind_cover: map.provides_cover(enemy.position),
            map,
            rules: &self.rules,
        };
        let outcome = resolver.execute_attack(player, enemy, &context);

        if outcome.events.contains(&CombatEvent::AttackUnaffordable) {
            tracing::warn!("Attack on {} unaffordable at execution; waiting instead", target_name);
            commands.push(StateCommand::LogMessage(LogEntry::Combat {
                event: CombatEvent::AttackUnaffordable,
            }));
            self.execute_wait(player, commands);
            return;
        }

        let remaining_ap = outcome.new_attacker.action_points;
        commands.push(StateCommand::ApplyDamage {
            attacker: outcome.new_attacker,
            target: outcome.new_target,
        });
        for event in outcome.events {
            commands.push(StateCommand::LogMessage(LogEntry::Combat { event }));
        }

        if outcome.success {
            commands.push(StateCommand::LogMessage(LogEntry::HitEnemy {
                target: target_name.to_string(),
                damage: outcome.damage,
            }));
            let kind = if outcome.is_critical {
                FloatingNumberKind::Crit
            } else {
                FloatingNumberKind::Damage
            };
            commands.push(StateCommand::FloatingNumber(FloatingNumber::new(
                outcome.damage,
                enemy.position,
                kind,
            )));
        } else {
            commands.push(StateCommand::LogMessage(LogEntry::MissedEnemy {
                target: target_name.to_string(),
            }));
        }

        if remaining_ap <= 0 {
            commands.push(StateCommand::EndTurn);
        }
    }

    fn execute_move(
        &self,
        destination: GridPosition,
        ap_cost: i32,
        player: &Combatant,
        enemies: &[Enemy],
        map: &MapArea,
        commands: &mut Vec<StateCommand>,
    ) {
        let living: Vec<&Enemy> = enemies.iter().filter(|e| e.is_alive()).collect();
        let still_valid = ap_cost <= player.action_points
            && player.position.manhattan_distance(&destination) == 1
            && self.rules.is_position_walkable(destination, map, player, &living);
        if !still_valid {
            tracing::warn!("Move to {} no longer valid; falling back to wait", destination);
            self.execute_wait(player, commands);
            return;
        }

        commands.push(StateCommand::MovePlayer(destination));
        commands.push(StateCommand::AdjustActionPoints(-ap_cost));
        if player.action_points - ap_cost <= 0 {
            commands.push(StateCommand::EndTurn);
        }
    }

    /// Burn whatever AP is left and hand the turn over
    fn execute_wait(&self, player: &Combatant, commands: &mut Vec<StateCommand>) {
        let attack_cost = if self.rules.should_attack_be_free(player) {
            0
        } else {
            DEFAULT_ATTACK_COST
        };
        if player.action_points > attack_cost {
            commands.push(StateCommand::AdjustActionPoints(-player.action_points));
        }
        commands.push(StateCommand::EndTurn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::resolution::SeededCombatResolver;
    use crate::combat::state::Perk;
    use crate::combat::weapons::Weapon;

    /// Host rules where every attack is free
    struct AlwaysFreeRules;

    impl EncounterRules for AlwaysFreeRules {
        fn is_position_walkable(
            &self,
            position: GridPosition,
            map: &MapArea,
            actor: &Combatant,
            living_enemies: &[&Enemy],
        ) -> bool {
            StandardRules.is_position_walkable(position, map, actor, living_enemies)
        }

        fn should_attack_be_free(&self, _actor: &Combatant) -> bool {
            true
        }
    }

    struct Fixture {
        player: Combatant,
        enemies: Vec<Enemy>,
        map: MapArea,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                player: Combatant::new("Runner", GridPosition::new(3, 3), 80, 4)
                    .with_weapon(Weapon::pistol()),
                enemies: vec![Enemy::new("Guard", GridPosition::new(3, 4))],
                map: MapArea::walled("test", 7, 7),
            }
        }

        fn context(&self) -> AutoBattleUpdateContext<'_> {
            AutoBattleUpdateContext {
                enabled: true,
                profile_id: ProfileId::Balanced,
                player: &self.player,
                enemies: &self.enemies,
                map: Some(&self.map),
                in_combat: true,
                is_player_turn: true,
                turn_count: 1,
                active_dialogue_id: None,
            }
        }
    }

    fn status_commands(commands: &[StateCommand]) -> Vec<(AutoBattleStatus, Option<PauseReason>)> {
        commands
            .iter()
            .filter_map(|c| match c {
                StateCommand::SetStatus { status, reason } => Some((*status, *reason)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_disabled_stays_idle_silently() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let context = AutoBattleUpdateContext {
            enabled: false,
            ..fixture.context()
        };

        let commands = controller.update(&context, &mut resolver);

        assert!(commands.is_empty());
        assert_eq!(controller.status(), AutoBattleStatus::Idle);
    }

    #[test]
    fn test_plans_and_runs_when_enabled() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        let commands = controller.update(&fixture.context(), &mut resolver);

        assert_eq!(controller.status(), AutoBattleStatus::Running);
        assert!(matches!(commands[0], StateCommand::RecordDecision(_)));
        assert!(commands
            .iter()
            .any(|c| matches!(c, StateCommand::ApplyDamage { .. })));
        assert!(controller.last_signature().is_some());
    }

    #[test]
    fn test_unchanged_signature_is_noop() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        let first = controller.update(&fixture.context(), &mut resolver);
        let second = controller.update(&fixture.context(), &mut resolver);

        assert!(!first.is_empty());
        assert!(second.is_empty());
    }

    #[test]
    fn test_fail_safe_order() {
        let mut fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        let off_turn = AutoBattleUpdateContext {
            is_player_turn: false,
            ..fixture.context()
        };
        controller.update(&off_turn, &mut resolver);
        assert_eq!(controller.reason(), Some(PauseReason::Settings));

        let dialogue = AutoBattleUpdateContext {
            active_dialogue_id: Some("fixer_intro"),
            ..fixture.context()
        };
        controller.update(&dialogue, &mut resolver);
        assert_eq!(controller.reason(), Some(PauseReason::Dialogue));

        fixture.player.action_points = 0;
        let no_ap = AutoBattleUpdateContext {
            active_dialogue_id: Some("fixer_intro"),
            ..fixture.context()
        };
        controller.update(&no_ap, &mut resolver);
        assert_eq!(controller.reason(), Some(PauseReason::Ap));
        assert!(controller.last_signature().is_none());
    }

    #[test]
    fn test_no_living_enemies_pauses() {
        let mut fixture = Fixture::new();
        fixture.enemies[0].health = 0;
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        let commands = controller.update(&fixture.context(), &mut resolver);

        assert_eq!(
            status_commands(&commands),
            vec![(AutoBattleStatus::Paused, Some(PauseReason::Settings))]
        );
    }

    #[test]
    fn test_missing_map_pauses() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let context = AutoBattleUpdateContext {
            map: None,
            ..fixture.context()
        };

        controller.update(&context, &mut resolver);

        assert_eq!(controller.status(), AutoBattleStatus::Paused);
        assert_eq!(controller.reason(), Some(PauseReason::Settings));
    }

    #[test]
    fn test_manual_override_is_sticky_until_toggled() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        let notified = controller.notify_manual_override(PauseReason::ManualInput);
        assert_eq!(notified.len(), 2);
        assert!(controller.is_manual_override());

        // Still paused while enabled, and no decision is made
        let commands = controller.update(&fixture.context(), &mut resolver);
        assert!(commands.is_empty());
        assert_eq!(controller.reason(), Some(PauseReason::ManualInput));

        // Toggle off clears the override...
        let off = AutoBattleUpdateContext {
            enabled: false,
            ..fixture.context()
        };
        controller.update(&off, &mut resolver);
        assert!(!controller.is_manual_override());
        assert_eq!(controller.status(), AutoBattleStatus::Idle);

        // ...and back on resumes planning
        let commands = controller.update(&fixture.context(), &mut resolver);
        assert!(commands
            .iter()
            .any(|c| matches!(c, StateCommand::RecordDecision(_))));
    }

    #[test]
    fn test_status_logged_only_on_change() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let off_turn = AutoBattleUpdateContext {
            is_player_turn: false,
            ..fixture.context()
        };

        let first = controller.update(&off_turn, &mut resolver);
        let second = controller.update(&off_turn, &mut resolver);

        assert_eq!(first.len(), 2);
        assert!(second.is_empty());
    }

    #[test]
    fn test_dead_target_falls_back_to_wait() {
        let mut fixture = Fixture::new();
        let controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let target_id = fixture.enemies[0].id;
        let decision = Decision::Attack {
            target_id,
            target_name: "Guard".to_string(),
            target_position: GridPosition::new(3, 4),
            expected_damage: 12.0,
            ap_cost: 2,
            distance: 1,
            score: 12.0,
            rationale: vec![],
        };
        fixture.enemies[0].health = 0;

        let commands = controller.execute_decision(&decision, &fixture.context(), &mut resolver);

        assert_eq!(
            commands,
            vec![StateCommand::AdjustActionPoints(-4), StateCommand::EndTurn]
        );
    }

    #[test]
    fn test_execute_refuses_off_turn() {
        let fixture = Fixture::new();
        let controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let context = AutoBattleUpdateContext {
            is_player_turn: false,
            ..fixture.context()
        };
        let wait = Decision::Wait {
            score: -0.5,
            rationale: vec![],
        };

        assert!(controller
            .execute_decision(&wait, &context, &mut resolver)
            .is_empty());
    }

    #[test]
    fn test_wait_with_one_ap_just_ends_turn() {
        let mut fixture = Fixture::new();
        fixture.player.action_points = 1;
        let controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let wait = Decision::Wait {
            score: -0.5,
            rationale: vec![],
        };

        let commands = controller.execute_decision(&wait, &fixture.context(), &mut resolver);

        assert_eq!(commands, vec![StateCommand::EndTurn]);
    }

    #[test]
    fn test_move_ends_turn_on_last_ap() {
        let mut fixture = Fixture::new();
        fixture.player.action_points = 1;
        let controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let step = Decision::Move {
            destination: GridPosition::new(3, 2),
            cover_gain: 0.0,
            distance_to_nearest_enemy: 2,
            ap_cost: 1,
            score: 0.1,
            rationale: vec![],
        };

        let commands = controller.execute_decision(&step, &fixture.context(), &mut resolver);

        assert_eq!(
            commands,
            vec![
                StateCommand::MovePlayer(GridPosition::new(3, 2)),
                StateCommand::AdjustActionPoints(-1),
                StateCommand::EndTurn,
            ]
        );
    }

    #[test]
    fn test_host_rules_make_attack_free() {
        let mut fixture = Fixture::new();
        fixture.player.action_points = 1;
        let mut controller = AutoBattleController::with_rules(ProfileRegistry::new(), AlwaysFreeRules);
        let mut resolver = SeededCombatResolver::new(1);

        let commands = controller.update(&fixture.context(), &mut resolver);

        let attacker_ap = commands.iter().find_map(|c| match c {
            StateCommand::ApplyDamage { attacker, .. } => Some(attacker.action_points),
            _ => None,
        });
        assert_eq!(attacker_ap, Some(1));
        assert!(!commands.contains(&StateCommand::LogMessage(LogEntry::Combat {
            event: CombatEvent::AttackUnaffordable,
        })));
        assert!(!commands.contains(&StateCommand::EndTurn));
    }

    #[test]
    fn test_attack_draining_ap_ends_turn() {
        let mut fixture = Fixture::new();
        fixture.player.action_points = 2;
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        let commands = controller.update(&fixture.context(), &mut resolver);

        let attacker_ap = commands.iter().find_map(|c| match c {
            StateCommand::ApplyDamage { attacker, .. } => Some(attacker.action_points),
            _ => None,
        });
        assert_eq!(attacker_ap, Some(0));
        assert_eq!(commands.last(), Some(&StateCommand::EndTurn));
    }

    #[test]
    fn test_wait_with_free_attack_spends_last_ap() {
        let mut fixture = Fixture::new();
        fixture.player.action_points = 1;
        fixture.player.perks.push(Perk::GunFu);
        let controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let wait = Decision::Wait {
            score: -0.5,
            rationale: vec![],
        };

        let commands = controller.execute_decision(&wait, &fixture.context(), &mut resolver);

        assert_eq!(
            commands,
            vec![StateCommand::AdjustActionPoints(-1), StateCommand::EndTurn]
        );
    }

    #[test]
    fn test_target_out_of_range_falls_back_to_wait() {
        let mut fixture = Fixture::new();
        let controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);
        let decision = Decision::Attack {
            target_id: fixture.enemies[0].id,
            target_name: "Guard".to_string(),
            target_position: GridPosition::new(3, 4),
            expected_damage: 12.0,
            ap_cost: 2,
            distance: 1,
            score: 12.0,
            rationale: vec![],
        };
        fixture.enemies[0].position = GridPosition::new(6, 6);

        let commands = controller.execute_decision(&decision, &fixture.context(), &mut resolver);

        assert_eq!(
            commands,
            vec![StateCommand::AdjustActionPoints(-4), StateCommand::EndTurn]
        );
    }

    #[test]
    fn test_reset_starts_fresh_encounter() {
        let fixture = Fixture::new();
        let mut controller = AutoBattleController::new();
        let mut resolver = SeededCombatResolver::new(1);

        controller.update(&fixture.context(), &mut resolver);
        controller.notify_manual_override(PauseReason::ManualInput);
        assert!(controller.is_manual_override());

        controller.reset();

        assert_eq!(controller.status(), AutoBattleStatus::Idle);
        assert_eq!(controller.reason(), None);
        assert!(!controller.is_manual_override());
        assert!(controller.last_signature().is_none());

        // Same snapshot plans again after a reset
        let commands = controller.update(&fixture.context(), &mut resolver);
        assert!(matches!(commands[0], StateCommand::RecordDecision(_)));
        assert_eq!(controller.status(), AutoBattleStatus::Running);
    }
}
