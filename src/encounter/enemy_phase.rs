//! Enemy side of the turn loop
//!
//! Deliberately simple: anything in range shoots, everything else closes
//! the distance one tile per AP. Enough to play an encounter out.

use serde::{Deserialize, Serialize};

use crate::combat::resolution::SeededCombatResolver;
use crate::combat::rules::is_in_attack_range;
use crate::core::types::{CombatantId, GridPosition};
use crate::encounter::state::Encounter;

const STEPS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum EnemyAction {
    Attack {
        enemy: CombatantId,
        success: bool,
        damage: i32,
    },
    Step {
        enemy: CombatantId,
        to: GridPosition,
    },
    Hold {
        enemy: CombatantId,
    },
}

/// Play every living enemy's turn, then hand the turn back to the player
pub fn run_enemy_phase(
    encounter: &mut Encounter,
    resolver: &mut SeededCombatResolver,
) -> Vec<EnemyAction> {
    let mut actions = Vec::new();
    if encounter.is_player_turn || encounter.is_finished() {
        return actions;
    }

    for index in 0..encounter.enemies.len() {
        while encounter.enemies[index].is_alive()
            && encounter.enemies[index].action_points > 0
            && encounter.player.is_alive()
        {
            let enemy = &encounter.enemies[index];
            if is_in_attack_range(enemy.position, encounter.player.position, enemy.attack_range) {
                let outcome = resolver.resolve_enemy_attack(enemy, &encounter.player, &encounter.map);
                actions.push(EnemyAction::Attack {
                    enemy: enemy.id,
                    success: outcome.success,
                    damage: outcome.damage,
                });
                encounter.enemies[index] = outcome.new_attacker;
                encounter.player = outcome.new_target;
                continue;
            }

            match step_toward_player(encounter, index) {
                Some(to) => {
                    let enemy = &mut encounter.enemies[index];
                    enemy.position = to;
                    enemy.action_points -= 1;
                    actions.push(EnemyAction::Step { enemy: enemy.id, to });
                }
                None => {
                    actions.push(EnemyAction::Hold {
                        enemy: encounter.enemies[index].id,
                    });
                    break;
                }
            }
        }
    }

    encounter.check_end();
    if !encounter.is_finished() {
        encounter.switch_turn();
    }
    actions
}

/// Best cardinal step that strictly closes Manhattan distance to the player
fn step_toward_player(encounter: &Encounter, index: usize) -> Option<GridPosition> {
    let enemy = &encounter.enemies[index];
    let target = encounter.player.position;
    let current = enemy.position.manhattan_distance(&target);

    STEPS
        .iter()
        .map(|(dx, dy)| enemy.position.offset(*dx, *dy))
        .filter(|pos| {
            encounter.map.tile(*pos).is_some_and(|t| t.is_walkable)
                && *pos != target
                && !encounter
                    .enemies
                    .iter()
                    .enumerate()
                    .any(|(i, e)| i != index && e.is_alive() && e.position == *pos)
        })
        .filter(|pos| pos.manhattan_distance(&target) < current)
        .min_by_key(|pos| pos.manhattan_distance(&target))
}
