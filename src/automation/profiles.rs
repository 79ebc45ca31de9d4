//! Auto-battle behavior profiles
//!
//! Profiles are pure data: a weight vector and a handful of thresholds.
//! The three built-ins differ only in their numbers. Hosts may retune them
//! by dropping `<id>.toml` files into a profile directory, but lookup itself
//! never fails: anything unknown resolves to the balanced profile.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::core::error::{AutoBattleError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileId {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
}

impl ProfileId {
    /// Built-in ids in catalogue order
    pub const ALL: [ProfileId; 3] = [ProfileId::Balanced, ProfileId::Aggressive, ProfileId::Defensive];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileId::Balanced => "balanced",
            ProfileId::Aggressive => "aggressive",
            ProfileId::Defensive => "defensive",
        }
    }

    /// Lenient parse for player-supplied ids
    pub fn from_str_or_default(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            tracing::debug!("Unknown auto-battle profile {:?}, using {}", s, ProfileId::default());
            ProfileId::default()
        })
    }

    /// Next profile in catalogue order, wrapping around
    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|id| id == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProfileId {
    type Err = AutoBattleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "balanced" => Ok(ProfileId::Balanced),
            "aggressive" => Ok(ProfileId::Aggressive),
            "defensive" => Ok(ProfileId::Defensive),
            _ => Err(AutoBattleError::UnknownProfile(s.to_string())),
        }
    }
}

/// Decision weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileWeights {
    /// Multiplies expected damage of every attack
    pub attack_bias: f32,
    /// Bonus for finishing wounded targets
    pub focus_lowest_health: f32,
    /// Bonus weighted by the target's own damage output
    pub focus_overwatch_threat: f32,
    /// Reward for standing on cover
    pub maintain_cover: f32,
    /// Reward for closing distance, per weapon range
    pub pursuit_aggression: f32,
    /// Willingness to spend consumables (carried for hosts, unused by the planner)
    pub consumable_aggression: f32,
    /// Reward for opening distance; also damps attacks while panicking
    pub retreat_bias: f32,
}

impl Default for ProfileWeights {
    fn default() -> Self {
        Self {
            attack_bias: 1.0,
            focus_lowest_health: 0.75,
            focus_overwatch_threat: 0.85,
            maintain_cover: 0.8,
            pursuit_aggression: 0.65,
            consumable_aggression: 0.5,
            retreat_bias: 0.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileThresholds {
    /// Health fraction at or below which the actor panics
    pub panic_health_fraction: f32,
    /// AP the profile prefers to leave unspent
    pub ap_reserve: i32,
    pub minimum_consumable_charges: u32,
}

impl Default for ProfileThresholds {
    fn default() -> Self {
        Self {
            panic_health_fraction: 0.35,
            ap_reserve: 1,
            minimum_consumable_charges: 1,
        }
    }
}

/// A named behavior preset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoBattleProfile {
    /// Set from the file name when loaded from disk
    #[serde(default)]
    pub id: ProfileId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub weights: ProfileWeights,
    #[serde(default)]
    pub thresholds: ProfileThresholds,
}

impl AutoBattleProfile {
    pub fn balanced() -> Self {
        Self {
            id: ProfileId::Balanced,
            label: "Balanced".to_string(),
            description: "Evaluates offence and defence evenly. Prioritises clear shots, keeps \
                          moderate AP reserve, and falls back to cover if health dips."
                .to_string(),
            weights: ProfileWeights::default(),
            thresholds: ProfileThresholds::default(),
        }
    }

    pub fn aggressive() -> Self {
        Self {
            id: ProfileId::Aggressive,
            label: "Aggressive".to_string(),
            description: "Closes distance, spends AP rapidly, and consumes resources to finish \
                          priority targets. Retreats only when near death."
                .to_string(),
            weights: ProfileWeights {
                attack_bias: 1.35,
                focus_lowest_health: 1.1,
                focus_overwatch_threat: 0.7,
                maintain_cover: 0.35,
                pursuit_aggression: 1.2,
                consumable_aggression: 1.0,
                retreat_bias: 0.2,
            },
            thresholds: ProfileThresholds {
                panic_health_fraction: 0.2,
                ap_reserve: 0,
                minimum_consumable_charges: 0,
            },
        }
    }

    pub fn defensive() -> Self {
        Self {
            id: ProfileId::Defensive,
            label: "Defensive".to_string(),
            description: "Holds positions with strong cover, conserves consumables, and only \
                          advances when safe. Will disengage early if health drops."
                .to_string(),
            weights: ProfileWeights {
                attack_bias: 0.6,
                focus_lowest_health: 0.55,
                focus_overwatch_threat: 1.25,
                maintain_cover: 1.6,
                pursuit_aggression: 0.3,
                consumable_aggression: 0.25,
                retreat_bias: 1.4,
            },
            thresholds: ProfileThresholds {
                panic_health_fraction: 0.5,
                ap_reserve: 2,
                minimum_consumable_charges: 2,
            },
        }
    }

    pub fn builtin(id: ProfileId) -> Self {
        match id {
            ProfileId::Balanced => Self::balanced(),
            ProfileId::Aggressive => Self::aggressive(),
            ProfileId::Defensive => Self::defensive(),
        }
    }

    /// Reject numbers the planner cannot score with
    pub fn validate(&self) -> Result<()> {
        let w = &self.weights;
        let weights = [
            ("attack_bias", w.attack_bias),
            ("focus_lowest_health", w.focus_lowest_health),
            ("focus_overwatch_threat", w.focus_overwatch_threat),
            ("maintain_cover", w.maintain_cover),
            ("pursuit_aggression", w.pursuit_aggression),
            ("consumable_aggression", w.consumable_aggression),
            ("retreat_bias", w.retreat_bias),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(self.invalid(format!("weight {} must be a non-negative number", name)));
            }
        }

        let panic = self.thresholds.panic_health_fraction;
        if !(0.0..=1.0).contains(&panic) {
            return Err(self.invalid("panic_health_fraction must be within 0..=1".to_string()));
        }
        if self.thresholds.ap_reserve < 0 {
            return Err(self.invalid("ap_reserve must not be negative".to_string()));
        }
        Ok(())
    }

    fn invalid(&self, reason: String) -> AutoBattleError {
        AutoBattleError::InvalidProfile {
            id: self.id.to_string(),
            reason,
        }
    }
}

/// Profile catalogue; lookups always succeed
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRegistry {
    balanced: AutoBattleProfile,
    aggressive: AutoBattleProfile,
    defensive: AutoBattleProfile,
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProfileRegistry {
    /// The built-in catalogue
    pub fn new() -> Self {
        Self {
            balanced: AutoBattleProfile::balanced(),
            aggressive: AutoBattleProfile::aggressive(),
            defensive: AutoBattleProfile::defensive(),
        }
    }

    pub fn get(&self, id: ProfileId) -> &AutoBattleProfile {
        match id {
            ProfileId::Balanced => &self.balanced,
            ProfileId::Aggressive => &self.aggressive,
            ProfileId::Defensive => &self.defensive,
        }
    }

    /// Lookup by raw id string, falling back to the default profile
    pub fn get_by_name(&self, id: &str) -> &AutoBattleProfile {
        self.get(ProfileId::from_str_or_default(id))
    }

    pub fn profiles(&self) -> impl Iterator<Item = &AutoBattleProfile> {
        ProfileId::ALL.into_iter().map(move |id| self.get(id))
    }

    /// Replace a catalogue entry after validating it
    pub fn insert(&mut self, profile: AutoBattleProfile) -> Result<()> {
        profile.validate()?;
        let slot = match profile.id {
            ProfileId::Balanced => &mut self.balanced,
            ProfileId::Aggressive => &mut self.aggressive,
            ProfileId::Defensive => &mut self.defensive,
        };
        *slot = profile;
        Ok(())
    }

    /// Load `<id>.toml` overrides from `dir`, returning how many were applied
    ///
    /// Missing files keep the built-in profile.
    pub fn load_overrides(&mut self, dir: &Path) -> Result<usize> {
        let mut loaded = 0;
        for id in ProfileId::ALL {
            let path = dir.join(format!("{}.toml", id));
            if !path.is_file() {
                continue;
            }
            let profile = load_profile(&path, id)?;
            self.insert(profile)?;
            tracing::info!("Loaded auto-battle profile override {} from {:?}", id, path);
            loaded += 1;
        }
        Ok(loaded)
    }
}

/// Load a single profile from TOML, stamping it with `id`
///
/// Empty label and description are filled from the built-in profile.
pub fn load_profile(path: &Path, id: ProfileId) -> Result<AutoBattleProfile> {
    let contents = fs::read_to_string(path)?;
    let mut profile: AutoBattleProfile = toml::from_str(&contents)?;
    profile.id = id;

    let builtin = AutoBattleProfile::builtin(id);
    if profile.label.is_empty() {
        profile.label = builtin.label;
    }
    if profile.description.is_empty() {
        profile.description = builtin.description;
    }
    Ok(profile)
}

fn builtin_registry() -> &'static ProfileRegistry {
    static REGISTRY: OnceLock<ProfileRegistry> = OnceLock::new();
    REGISTRY.get_or_init(ProfileRegistry::new)
}

/// Built-in profile for `id`
pub fn get_profile(id: ProfileId) -> &'static AutoBattleProfile {
    builtin_registry().get(id)
}

/// Built-in profile by raw id string; unknown ids give the balanced profile
pub fn get_profile_by_name(id: &str) -> &'static AutoBattleProfile {
    builtin_registry().get_by_name(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_builtin_weights() {
        let aggressive = get_profile(ProfileId::Aggressive);
        assert_eq!(aggressive.weights.attack_bias, 1.35);
        assert_eq!(aggressive.thresholds.ap_reserve, 0);

        let defensive = get_profile(ProfileId::Defensive);
        assert_eq!(defensive.weights.maintain_cover, 1.6);
        assert_eq!(defensive.thresholds.panic_health_fraction, 0.5);
    }

    #[test]
    fn test_unknown_profile_falls_back_to_balanced() {
        assert_eq!(get_profile_by_name("sniper").id, ProfileId::Balanced);
        assert_eq!(get_profile_by_name("").id, ProfileId::Balanced);
        assert_eq!(get_profile_by_name("Defensive").id, ProfileId::Defensive);
    }

    #[test]
    fn test_strict_parse_rejects_unknown() {
        assert!("aggressive".parse::<ProfileId>().is_ok());
        assert!(matches!(
            "sniper".parse::<ProfileId>(),
            Err(AutoBattleError::UnknownProfile(_))
        ));
    }

    #[test]
    fn test_profile_cycling_wraps() {
        assert_eq!(ProfileId::Balanced.next(), ProfileId::Aggressive);
        assert_eq!(ProfileId::Defensive.next(), ProfileId::Balanced);
    }

    #[test]
    fn test_builtins_validate() {
        for profile in ProfileRegistry::new().profiles() {
            assert!(profile.validate().is_ok(), "{} should validate", profile.id);
        }
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let mut profile = AutoBattleProfile::balanced();
        profile.weights.retreat_bias = f32::NAN;
        assert!(profile.validate().is_err());

        let mut registry = ProfileRegistry::new();
        assert!(registry.insert(profile).is_err());
        assert_eq!(registry.get(ProfileId::Balanced), &AutoBattleProfile::balanced());
    }

    #[test]
    fn test_load_overrides_from_directory() {
        let dir = std::env::temp_dir().join(format!("auto_battle_profiles_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("aggressive.toml"),
            r#"
            [weights]
            attack_bias = 2.0
            focus_lowest_health = 1.0
            focus_overwatch_threat = 0.5
            maintain_cover = 0.1
            pursuit_aggression = 1.5
            consumable_aggression = 1.0
            retreat_bias = 0.0

            [thresholds]
            panic_health_fraction = 0.1
            ap_reserve = 0
            minimum_consumable_charges = 0
            "#,
        )
        .unwrap();

        let mut registry = ProfileRegistry::new();
        let loaded = registry.load_overrides(&dir).expect("override should load");
        fs::remove_dir_all(&dir).ok();

        assert_eq!(loaded, 1);
        let aggressive = registry.get(ProfileId::Aggressive);
        assert_eq!(aggressive.weights.attack_bias, 2.0);
        assert_eq!(aggressive.label, "Aggressive");
        assert_eq!(registry.get(ProfileId::Balanced), &AutoBattleProfile::balanced());
    }
}
