//! Decision planner
//!
//! Scores every candidate action the actor could take right now and returns
//! the best one. Pure and deterministic: the same snapshot and profile always
//! yield the same decision, and nothing passed in is mutated.
//!
//! Candidates are enumerated attacks first, then the four cardinal moves,
//! then the wait floor. The first candidate with the strictly greatest score
//! wins, so enumeration order breaks ties.

use crate::automation::constants::{
    ATTACK_RESERVE_PENALTY, EXPOSED_ATTACK_PENALTY, EXPOSED_COVER_THRESHOLD,
    HABITUAL_RETREAT_BIAS, MOVE_RESERVE_PENALTY, OVERWATCH_THREAT_FACTOR, PANIC_DAMAGE_FACTOR,
    PANIC_EXPOSED_PENALTY, RATIONALE_BONUS_THRESHOLD, RATIONALE_COVER_GAIN_THRESHOLD,
    RATIONALE_COVER_HOLD_THRESHOLD, RATIONALE_MOVEMENT_THRESHOLD, RETREAT_DRIFT_PENALTY,
    TARGET_COVER_DAMAGE_FACTOR, WAIT_SCORE,
};
use crate::automation::decision::{Decision, Rationale};
use crate::automation::profiles::AutoBattleProfile;
use crate::combat::map::MapArea;
use crate::combat::rules::{attack_ap_cost, is_in_attack_range, movement_ap_cost, EncounterRules};
use crate::combat::state::{Combatant, Enemy};
use crate::core::types::GridPosition;

/// Cardinal steps, in enumeration order
const MOVEMENT_VECTORS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Read-only snapshot the planner scores against
pub struct PlannerContext<'a> {
    pub actor: &'a Combatant,
    pub enemies: &'a [Enemy],
    pub map: &'a MapArea,
    pub profile: &'a AutoBattleProfile,
    pub rules: &'a dyn EncounterRules,
}

/// Pick the best action for the actor
pub fn plan_action(context: &PlannerContext) -> Decision {
    let living = living_enemies(context.enemies);
    if living.is_empty() {
        return Decision::no_targets();
    }

    let panic = context.actor.health_fraction() <= context.profile.thresholds.panic_health_fraction;

    let attacks = build_attack_decisions(context, &living, panic);
    let moves = build_move_decisions(context, &living, panic);

    let mut best: Option<Decision> = None;
    for candidate in attacks.into_iter().chain(moves).chain(std::iter::once(build_wait_decision())) {
        tracing::debug!(
            "Auto-battle candidate {:?} score={:.3}",
            candidate.summary(),
            candidate.score()
        );
        let better = best.as_ref().map_or(true, |b| candidate.score() > b.score());
        if better {
            best = Some(candidate);
        }
    }

    best.unwrap_or_else(build_wait_decision)
}

fn living_enemies(enemies: &[Enemy]) -> Vec<&Enemy> {
    enemies.iter().filter(|e| e.is_alive()).collect()
}

fn nearest_enemy_distance(position: GridPosition, enemies: &[&Enemy]) -> Option<u32> {
    enemies
        .iter()
        .map(|e| position.manhattan_distance(&e.position))
        .min()
}

/// Non-finite scores sort below every real candidate
fn clamp_score(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        f32::NEG_INFINITY
    }
}

fn reserve_shortfall(profile: &AutoBattleProfile, remaining_ap: i32) -> f32 {
    (profile.thresholds.ap_reserve - remaining_ap).max(0) as f32
}

fn build_attack_decisions(context: &PlannerContext, living: &[&Enemy], panic: bool) -> Vec<Decision> {
    let PlannerContext {
        actor, map, profile, ..
    } = context;

    let Some(attack_cost) = attack_ap_cost(actor, context.rules) else {
        return Vec::new();
    };
    if attack_cost > actor.action_points {
        return Vec::new();
    }

    let weapon_damage = actor.weapon_damage() as f32;
    let weapon_range = actor.weapon_range();
    let own_cover = map.cover_value(actor.position);
    let exposed = own_cover < EXPOSED_COVER_THRESHOLD;
    let weights = &profile.weights;

    living
        .iter()
        .filter(|enemy| is_in_attack_range(actor.position, enemy.position, weapon_range))
        .map(|enemy| {
            let distance = actor.position.manhattan_distance(&enemy.position);
            let target_cover = map.cover_value(enemy.position);

            let expected_damage = if target_cover > 0.0 {
                weapon_damage * TARGET_COVER_DAMAGE_FACTOR
            } else {
                weapon_damage
            };
            let execution_bonus =
                (1.0 - enemy.health_fraction()) * weights.focus_lowest_health * expected_damage;
            let overwatch_bias =
                weights.focus_overwatch_threat * enemy.damage as f32 * OVERWATCH_THREAT_FACTOR;
            let cover_penalty = if exposed { EXPOSED_ATTACK_PENALTY } else { 0.0 };
            let panic_penalty = if panic {
                let exposure = if exposed { PANIC_EXPOSED_PENALTY } else { 0.0 };
                weights.retreat_bias * (expected_damage * PANIC_DAMAGE_FACTOR + exposure)
            } else {
                0.0
            };
            let reserve_penalty =
                reserve_shortfall(profile, actor.action_points - attack_cost) * ATTACK_RESERVE_PENALTY;

            let score = weights.attack_bias * expected_damage + execution_bonus + overwatch_bias
                - cover_penalty
                - panic_penalty
                - reserve_penalty;

            let mut rationale = vec![
                Rationale::Distance(distance),
                Rationale::ExpectedDamage(expected_damage),
            ];
            if execution_bonus > RATIONALE_BONUS_THRESHOLD {
                rationale.push(Rationale::TargetVulnerable);
            }
            if panic_penalty > RATIONALE_BONUS_THRESHOLD {
                rationale.push(Rationale::PanicDampeningAttack);
            }
            if reserve_penalty > RATIONALE_BONUS_THRESHOLD {
                rationale.push(Rationale::PreserveApReserve);
            }

            Decision::Attack {
                target_id: enemy.id,
                target_name: enemy.name.clone(),
                target_position: enemy.position,
                expected_damage,
                ap_cost: attack_cost,
                distance,
                score: clamp_score(score),
                rationale,
            }
        })
        .collect()
}

fn build_move_decisions(context: &PlannerContext, living: &[&Enemy], panic: bool) -> Vec<Decision> {
    let PlannerContext {
        actor, map, profile, ..
    } = context;

    let Some(move_cost) = movement_ap_cost(actor) else {
        return Vec::new();
    };
    if actor.action_points <= 0 || move_cost > actor.action_points {
        return Vec::new();
    }
    let Some(current_distance) = nearest_enemy_distance(actor.position, living) else {
        return Vec::new();
    };

    let weights = &profile.weights;
    let current_cover = map.cover_value(actor.position);
    let weapon_range = actor.weapon_range() as f32;
    let values_distance = panic || weights.retreat_bias > HABITUAL_RETREAT_BIAS;

    let mut decisions = Vec::new();
    for (dx, dy) in MOVEMENT_VECTORS {
        let destination = actor.position.offset(dx, dy);
        if !context
            .rules
            .is_position_walkable(destination, map, actor, living)
        {
            continue;
        }

        let cover_value = map.cover_value(destination);
        let cover_gain = (cover_value - current_cover).max(0.0);
        let distance_after = nearest_enemy_distance(destination, living).unwrap_or(current_distance);
        let closing = if current_distance > 0 {
            current_distance as f32 - distance_after as f32
        } else {
            0.0
        };

        let pursuit_bias = if weapon_range > 0.0 {
            weights.pursuit_aggression * (closing / weapon_range)
        } else {
            0.0
        };
        let retreat_bonus = if values_distance {
            weights.retreat_bias * (distance_after as f32 - current_distance as f32).max(0.0)
        } else {
            0.0
        };
        let cover_score = weights.maintain_cover * cover_value;
        let reserve_penalty =
            reserve_shortfall(profile, actor.action_points - move_cost) * MOVE_RESERVE_PENALTY;

        let score = cover_score + pursuit_bias + retreat_bonus
            - (-closing).max(0.0) * RETREAT_DRIFT_PENALTY
            - reserve_penalty;

        let mut rationale = Vec::new();
        if cover_gain > RATIONALE_COVER_GAIN_THRESHOLD {
            rationale.push(Rationale::GainCover);
        } else if cover_value > RATIONALE_COVER_HOLD_THRESHOLD {
            rationale.push(Rationale::MaintainCover);
        }
        if closing > RATIONALE_MOVEMENT_THRESHOLD {
            rationale.push(Rationale::AdvanceOnTarget);
        }
        if retreat_bonus > RATIONALE_MOVEMENT_THRESHOLD {
            rationale.push(Rationale::CreateDistance);
        }
        if reserve_penalty > RATIONALE_BONUS_THRESHOLD {
            rationale.push(Rationale::HoldApReserve);
        }

        decisions.push(Decision::Move {
            destination,
            cover_gain,
            distance_to_nearest_enemy: distance_after,
            ap_cost: move_cost,
            score: clamp_score(score),
            rationale,
        });
    }

    decisions
}

fn build_wait_decision() -> Decision {
    Decision::Wait {
        score: WAIT_SCORE,
        rationale: vec![Rationale::NoAdvantageousAction],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automation::decision::ActionSummary;
    use crate::automation::profiles::{get_profile, ProfileId, ProfileThresholds, ProfileWeights};
    use crate::combat::map::CoverLevel;
    use crate::combat::rules::StandardRules;
    use crate::combat::state::Encumbrance;
    use crate::combat::weapons::Weapon;

    fn actor_at(x: i32, y: i32, weapon: Weapon) -> Combatant {
        Combatant::new("Runner", GridPosition::new(x, y), 80, 4).with_weapon(weapon)
    }

    fn plan(actor: &Combatant, enemies: &[Enemy], map: &MapArea, id: ProfileId) -> Decision {
        plan_action(&PlannerContext {
            actor,
            enemies,
            map,
            profile: get_profile(id),
            rules: &StandardRules,
        })
    }

    #[test]
    fn test_no_living_enemies_returns_sentinel() {
        let map = MapArea::walled("test", 7, 7);
        let actor = actor_at(3, 3, Weapon::pistol());
        let dead = Enemy::new("Guard", GridPosition::new(3, 4)).with_health(0, 40);

        let decision = plan(&actor, &[dead], &map, ProfileId::Balanced);

        assert_eq!(decision.summary(), ActionSummary::NoTargets);
        assert_eq!(decision.score(), f32::NEG_INFINITY);

        let empty = plan(&actor, &[], &map, ProfileId::Balanced);
        assert_eq!(empty.summary(), ActionSummary::NoTargets);
    }

    #[test]
    fn test_attack_score_matches_formula() {
        let map = MapArea::walled("test", 7, 7);
        let actor = actor_at(3, 3, Weapon::pistol());
        let enemy = Enemy::new("Guard", GridPosition::new(3, 4)).with_health(20, 40);

        let decision = plan(&actor, &[enemy], &map, ProfileId::Balanced);

        // 12 + 0.5*0.75*12 + 0.85*6*0.05 - 0.25 (exposed) - 0 (reserve: 2 left >= 1)
        let expected = 12.0 + 4.5 + 0.255 - 0.25;
        assert!(matches!(decision, Decision::Attack { .. }));
        assert!((decision.score() - expected).abs() < 1e-4);
        assert!(decision.rationale().contains(&Rationale::TargetVulnerable));
    }

    #[test]
    fn test_target_in_cover_reduces_expected_damage() {
        let mut map = MapArea::walled("test", 7, 7);
        map.set_cover(GridPosition::new(3, 4), CoverLevel::Half);
        let actor = actor_at(3, 3, Weapon::pistol());
        let enemy = Enemy::new("Guard", GridPosition::new(3, 4));

        match plan(&actor, &[enemy], &map, ProfileId::Balanced) {
            Decision::Attack { expected_damage, .. } => assert_eq!(expected_damage, 9.0),
            other => panic!("expected attack, got {:?}", other),
        }
    }

    #[test]
    fn test_unpayable_attack_excluded() {
        let map = MapArea::walled("test", 7, 7);
        let mut actor = actor_at(3, 3, Weapon::pistol());
        actor.encumbrance = Encumbrance {
            attack_ap_multiplier: f32::INFINITY,
            movement_ap_multiplier: 1.0,
        };
        let enemy = Enemy::new("Guard", GridPosition::new(3, 4));

        let decision = plan(&actor, &[enemy], &map, ProfileId::Aggressive);

        assert!(!matches!(decision, Decision::Attack { .. }));
        assert!(decision.score().is_finite());
    }

    #[test]
    fn test_unaffordable_attack_excluded() {
        let map = MapArea::walled("test", 7, 7);
        let mut actor = actor_at(3, 3, Weapon::rifle());
        actor.action_points = 2;
        let enemy = Enemy::new("Guard", GridPosition::new(3, 4));

        let decision = plan(&actor, &[enemy], &map, ProfileId::Aggressive);

        assert!(!matches!(decision, Decision::Attack { .. }));
    }

    #[test]
    fn test_immobilized_actor_waits() {
        let map = MapArea::walled("test", 7, 7);
        let mut actor = actor_at(3, 3, Weapon::knife());
        actor.encumbrance = Encumbrance::immobilized();
        let enemy = Enemy::new("Guard", GridPosition::new(5, 5));

        let decision = plan(&actor, &[enemy], &map, ProfileId::Balanced);

        assert_eq!(decision.summary(), ActionSummary::HoldPosition);
        assert_eq!(decision.score(), WAIT_SCORE);
    }

    #[test]
    fn test_walled_in_actor_out_of_range_waits() {
        let mut map = MapArea::walled("test", 7, 7);
        for pos in [(4, 3), (2, 3), (3, 4), (3, 2)] {
            map.set_wall(GridPosition::new(pos.0, pos.1));
        }
        let actor = actor_at(3, 3, Weapon::knife());
        let enemy = Enemy::new("Guard", GridPosition::new(5, 5));

        let decision = plan(&actor, &[enemy], &map, ProfileId::Aggressive);

        assert_eq!(decision.summary(), ActionSummary::HoldPosition);
    }

    #[test]
    fn test_tie_prefers_earlier_candidate() {
        // Stepping +x and +y close the same distance on open floor; +x is
        // enumerated first.
        let map = MapArea::open("test", 9, 9);
        let actor = actor_at(4, 4, Weapon::knife());
        let enemy = Enemy::new("Guard", GridPosition::new(6, 6));

        let decision = plan(&actor, &[enemy], &map, ProfileId::Aggressive);

        match decision {
            Decision::Move { destination, .. } => assert_eq!(destination, GridPosition::new(5, 4)),
            other => panic!("expected move, got {:?}", other),
        }
    }

    #[test]
    fn test_tie_prefers_attack_over_move() {
        // Zeroed weights: the attack and the step toward the enemy both score 0
        let profile = AutoBattleProfile {
            id: ProfileId::Balanced,
            label: "Flat".to_string(),
            description: String::new(),
            weights: ProfileWeights {
                attack_bias: 0.0,
                focus_lowest_health: 0.0,
                focus_overwatch_threat: 0.0,
                maintain_cover: 0.0,
                pursuit_aggression: 0.0,
                consumable_aggression: 0.0,
                retreat_bias: 0.0,
            },
            thresholds: ProfileThresholds {
                panic_health_fraction: 0.0,
                ap_reserve: 0,
                minimum_consumable_charges: 0,
            },
        };
        let mut map = MapArea::walled("test", 7, 7);
        map.set_cover(GridPosition::new(3, 3), CoverLevel::Half);
        let actor = actor_at(3, 3, Weapon::pistol());
        let enemy = Enemy::new("Guard", GridPosition::new(3, 5));

        let decision = plan_action(&PlannerContext {
            actor: &actor,
            enemies: &[enemy],
            map: &map,
            profile: &profile,
            rules: &StandardRules,
        });

        assert_eq!(decision.summary(), ActionSummary::Attack);
        assert_eq!(decision.score(), 0.0);
    }

    #[test]
    fn test_defensive_retreats_at_full_health() {
        let map = MapArea::walled("test", 9, 9);
        let actor = actor_at(4, 4, Weapon::knife());
        let enemy = Enemy::new("Guard", GridPosition::new(4, 6));

        match plan(&actor, &[enemy], &map, ProfileId::Defensive) {
            Decision::Move {
                distance_to_nearest_enemy,
                ..
            } => assert!(distance_to_nearest_enemy > 2),
            other => panic!("expected retreat move, got {:?}", other),
        }
    }

    #[test]
    fn test_planner_does_not_mutate_inputs() {
        let map = MapArea::walled("test", 7, 7);
        let actor = actor_at(3, 3, Weapon::pistol());
        let enemies = vec![Enemy::new("Guard", GridPosition::new(3, 4))];
        let (actor_before, enemies_before, map_before) = (actor.clone(), enemies.clone(), map.clone());

        let first = plan(&actor, &enemies, &map, ProfileId::Balanced);
        let second = plan(&actor, &enemies, &map, ProfileId::Balanced);

        assert_eq!(first, second);
        assert_eq!(actor, actor_before);
        assert_eq!(enemies, enemies_before);
        assert_eq!(map, map_before);
    }
}
