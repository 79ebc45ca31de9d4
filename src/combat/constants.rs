//! Combat resolution constants - all tunable values in one place

use crate::combat::map::CoverLevel;

// Unarmed fallbacks
pub const DEFAULT_ATTACK_DAMAGE: i32 = 5;
pub const DEFAULT_ATTACK_COST: i32 = 1;
pub const DEFAULT_WEAPON_RANGE: i32 = 1;

// Single-step movement always costs one AP
pub const DEFAULT_MOVEMENT_COST: i32 = 1;

// Hit chance
pub const BASE_HIT_CHANCE: f32 = 0.65;
pub const HIT_CHANCE_FALLOFF_PER_TILE: f32 = 0.05;
pub const MIN_HIT_CHANCE: f32 = 0.1;
pub const MAX_HIT_CHANCE: f32 = 0.95;

// Criticals
pub const BASE_CRITICAL_CHANCE: f32 = 0.05;
pub const CRITICAL_DAMAGE_MULTIPLIER: f32 = 1.5;

/// Damage multiplier applied to attacks against a target in cover
pub fn cover_damage_multiplier(level: CoverLevel) -> f32 {
    match level {
        CoverLevel::None => 1.0,
        CoverLevel::Half => 0.75,
        CoverLevel::Full => 0.55,
    }
}

/// Additive hit chance adjustment against a target in cover
pub fn cover_hit_adjustment(level: CoverLevel) -> f32 {
    match level {
        CoverLevel::None => 0.0,
        CoverLevel::Half => -0.2,
        CoverLevel::Full => -0.4,
    }
}
