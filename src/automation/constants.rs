//! Planner scoring constants - every tunable in one place

/// Score of the always-available wait candidate
pub const WAIT_SCORE: f32 = -0.5;

/// Expected damage multiplier against a target standing on a cover tile
pub const TARGET_COVER_DAMAGE_FACTOR: f32 = 0.75;

/// Own cover value below which the actor counts as exposed
pub const EXPOSED_COVER_THRESHOLD: f32 = 0.5;

/// Flat penalty for attacking from an exposed tile
pub const EXPOSED_ATTACK_PENALTY: f32 = 0.25;

/// Share of expected damage lost to panic, scaled by retreat bias
pub const PANIC_DAMAGE_FACTOR: f32 = 0.2;

/// Extra panic penalty for attacking while exposed, scaled by retreat bias
pub const PANIC_EXPOSED_PENALTY: f32 = 2.0;

/// Weight of the target's own damage in the overwatch-threat term
pub const OVERWATCH_THREAT_FACTOR: f32 = 0.05;

/// Penalty per AP an attack digs into the profile's reserve
pub const ATTACK_RESERVE_PENALTY: f32 = 0.4;

/// Penalty per AP a move digs into the profile's reserve
pub const MOVE_RESERVE_PENALTY: f32 = 0.35;

/// Penalty per tile a move drifts away from the nearest enemy
pub const RETREAT_DRIFT_PENALTY: f32 = 0.1;

/// Retreat bias above which a profile values distance even when healthy
pub const HABITUAL_RETREAT_BIAS: f32 = 0.8;

// Rationale thresholds: terms smaller than these are not worth mentioning
pub const RATIONALE_BONUS_THRESHOLD: f32 = 0.1;
pub const RATIONALE_COVER_GAIN_THRESHOLD: f32 = 0.01;
pub const RATIONALE_COVER_HOLD_THRESHOLD: f32 = 0.4;
pub const RATIONALE_MOVEMENT_THRESHOLD: f32 = 0.2;
