//! Equipped weapon stats as seen by the auto-battle planner

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub id: String,
    pub name: String,
    pub damage: i32,
    /// Maximum straight-line reach in tiles
    pub range: i32,
    pub ap_cost: i32,
    /// Silenced weapons do not alert nearby hostiles
    #[serde(default)]
    pub silenced: bool,
}

impl Weapon {
    pub fn new(id: &str, name: &str, damage: i32, range: i32, ap_cost: i32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            damage,
            range,
            ap_cost,
            silenced: false,
        }
    }

    pub fn pistol() -> Self {
        Self::new("pistol", "Pistol", 12, 3, 2)
    }

    pub fn rifle() -> Self {
        Self::new("rifle", "Rifle", 18, 4, 3)
    }

    pub fn knife() -> Self {
        Self::new("knife", "Knife", 10, 1, 2)
    }

    pub fn is_ranged(&self) -> bool {
        self.range > 1
    }
}
