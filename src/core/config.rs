//! Auto-battle settings loaded from TOML
//!
//! Settings mirror what a player toggles in the options menu: whether
//! automation is on, which behavior profile drives it, and where custom
//! profile tuning lives on disk.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::automation::profiles::{ProfileId, ProfileRegistry};
use crate::core::error::Result;

/// Player-facing automation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoBattleSettings {
    /// Master toggle; disabled automation forces the controller to Idle
    pub enabled: bool,
    /// Profile id as written by the player or the settings UI
    ///
    /// Kept as a string so hand-edited files with a stale id still load;
    /// resolution falls back to the default profile.
    pub profile: String,
    /// Optional directory of `<profile id>.toml` overrides
    pub profile_dir: Option<PathBuf>,
}

impl Default for AutoBattleSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            profile: ProfileId::default().as_str().to_string(),
            profile_dir: None,
        }
    }
}

impl AutoBattleSettings {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Resolved profile id; unknown ids fall back to the default profile
    pub fn profile_id(&self) -> ProfileId {
        ProfileId::from_str_or_default(&self.profile)
    }

    /// Strict validation for tooling that wants to reject stale ids
    pub fn validate(&self) -> Result<()> {
        self.profile.parse::<ProfileId>()?;
        Ok(())
    }

    /// Built-in catalogue plus any overrides found in `profile_dir`
    pub fn build_registry(&self) -> Result<ProfileRegistry> {
        let mut registry = ProfileRegistry::new();
        if let Some(dir) = &self.profile_dir {
            registry.load_overrides(dir)?;
        }
        Ok(registry)
    }
}
