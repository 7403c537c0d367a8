//! Session inputs supplied by the caller: level configuration, upgrades,
//! plant stats, and progress carried over from earlier sessions.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::enums::Weather;
use crate::error::ConfigError;

/// One entry of an explicit pest list. Overrides replace the level-scaled
/// catalog base value; behaviour and environment multipliers still apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestEntry {
    pub pest_id: String,
    #[serde(default)]
    pub health: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub damage: Option<f64>,
}

/// Explicit boss for a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossDescriptor {
    pub boss_id: String,
    #[serde(default = "one")]
    pub health_multiplier: f64,
    #[serde(default = "one")]
    pub speed_multiplier: f64,
    #[serde(default = "one")]
    pub damage_multiplier: f64,
}

/// Level modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecialCondition {
    /// Chance of duplicating part of each explicit batch.
    PestSpawnBoost { value: f64 },
    /// Multiplies every spawned pest's speed.
    SpeedBoost { value: f64 },
    /// Scales the plant's starting health.
    PlantStress { value: f64 },
}

/// End-of-level leaf rewards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardTable {
    pub base_leaf: u32,
    pub completion_bonus: u32,
    pub perfect_bonus: u32,
}

/// Level objective.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Objective {
    /// Keep the plant alive this long; reaching it completes the level.
    Survive { duration_secs: u64 },
    EliminatePests { count: u32 },
    MaintainHealth { threshold: f64 },
}

/// Everything that defines a level. Immutable for the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    #[serde(default)]
    pub pests: Vec<PestEntry>,
    #[serde(default)]
    pub boss: Option<BossDescriptor>,
    /// Initial weather; falls back to the engine default.
    #[serde(default)]
    pub weather: Option<Weather>,
    /// Initial hour of day; falls back to the engine default.
    #[serde(default)]
    pub time_of_day: Option<f64>,
    #[serde(default)]
    pub special_conditions: Vec<SpecialCondition>,
    #[serde(default)]
    pub rewards: Option<RewardTable>,
    #[serde(default)]
    pub objectives: Vec<Objective>,
}

impl LevelConfig {
    /// A catalog-driven level with no overrides.
    pub fn for_level(level: u32) -> Self {
        Self {
            level,
            pests: Vec::new(),
            boss: None,
            weather: None,
            time_of_day: None,
            special_conditions: Vec::new(),
            rewards: None,
            objectives: Vec::new(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check every reference into the catalog and the numeric fields.
    pub fn validate(&self, catalog: &Catalog) -> Result<(), ConfigError> {
        if self.level == 0 {
            return Err(ConfigError::InvalidLevel(self.level));
        }
        for entry in &self.pests {
            if catalog.pest(&entry.pest_id).is_none() {
                return Err(ConfigError::UnknownPest {
                    pest_id: entry.pest_id.clone(),
                });
            }
            for (field, value) in [
                ("health", entry.health),
                ("speed", entry.speed),
                ("damage", entry.damage),
            ] {
                if let Some(v) = value {
                    if !v.is_finite() || v < 0.0 {
                        return Err(ConfigError::InvalidValue {
                            field: format!("pest `{}` {field}", entry.pest_id),
                            value: v,
                        });
                    }
                }
            }
        }
        if let Some(boss) = &self.boss {
            if catalog.boss(&boss.boss_id).is_none() {
                return Err(ConfigError::UnknownBoss {
                    boss_id: boss.boss_id.clone(),
                });
            }
        }
        for condition in &self.special_conditions {
            let (field, value) = match *condition {
                SpecialCondition::PestSpawnBoost { value } => ("pest_spawn_boost", value),
                SpecialCondition::SpeedBoost { value } => ("speed_boost", value),
                SpecialCondition::PlantStress { value } => ("plant_stress", value),
            };
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Spawn boost multiplier (1.0 when absent).
    pub fn spawn_boost(&self) -> f64 {
        self.special_conditions
            .iter()
            .find_map(|c| match c {
                SpecialCondition::PestSpawnBoost { value } => Some(*value),
                _ => None,
            })
            .unwrap_or(1.0)
    }

    /// Speed boost multiplier (1.0 when absent).
    pub fn speed_boost(&self) -> f64 {
        self.special_conditions
            .iter()
            .find_map(|c| match c {
                SpecialCondition::SpeedBoost { value } => Some(*value),
                _ => None,
            })
            .unwrap_or(1.0)
    }

    /// Plant stress multiplier on starting health (1.0 when absent).
    pub fn plant_stress(&self) -> f64 {
        self.special_conditions
            .iter()
            .find_map(|c| match c {
                SpecialCondition::PlantStress { value } => Some(*value),
                _ => None,
            })
            .unwrap_or(1.0)
    }

    /// Duration of the first `Survive` objective, if any.
    pub fn survive_duration_ms(&self) -> Option<u64> {
        self.objectives.iter().find_map(|o| match o {
            Objective::Survive { duration_secs } => Some(duration_secs * 1000),
            _ => None,
        })
    }

    pub fn is_boss_level(&self) -> bool {
        self.level % crate::constants::BOSS_LEVEL_INTERVAL == 0
    }
}

/// Purchased upgrades and plant bonuses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpgradeBundle {
    pub spray_speed: u32,
    pub spray_radius: u32,
    pub spray_potency: u32,
    pub refill_speed: u32,
    pub spray_duration: u32,
    pub slow_effect: u32,
    pub area_damage: u32,
    /// Percent damage reduction for the plant (capped at 75).
    pub resistance_bonus: f64,
    /// Percent reduction of water decay.
    pub water_efficiency: f64,
    /// Percent reduction of nutrition decay.
    pub nutrient_efficiency: f64,
    /// Percent increase of growth chance.
    pub light_efficiency: f64,
}

impl Default for UpgradeBundle {
    fn default() -> Self {
        Self {
            spray_speed: 1,
            spray_radius: 1,
            spray_potency: 1,
            refill_speed: 1,
            spray_duration: 1,
            slow_effect: 0,
            area_damage: 0,
            resistance_bonus: 0.0,
            water_efficiency: 0.0,
            nutrient_efficiency: 0.0,
            light_efficiency: 0.0,
        }
    }
}

/// Plant resource levels at session start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlantStats {
    pub water_level: f64,
    pub nutrition_level: f64,
    pub light_exposure: f64,
    pub growth_level: f64,
}

impl Default for PlantStats {
    fn default() -> Self {
        Self {
            water_level: 100.0,
            nutrition_level: 100.0,
            light_exposure: 50.0,
            growth_level: 1.0,
        }
    }
}

/// Progress from earlier sessions that the end-of-session reducers fold into.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryOver {
    pub current_level: u32,
    pub season_day: u32,
    pub pests_encountered: BTreeSet<String>,
}

fn one() -> f64 {
    1.0
}
