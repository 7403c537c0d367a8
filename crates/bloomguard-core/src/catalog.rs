//! Pest and boss catalog: immutable type definitions supplied by the caller.

use serde::{Deserialize, Serialize};

use crate::enums::{Behavior, BossClass, SizeCategory};
use crate::error::ConfigError;

/// A pest type as stored in the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestTypeDef {
    pub id: String,
    pub name: String,
    pub base_health: f64,
    pub base_speed: f64,
    pub base_damage_per_second: f64,
    #[serde(default)]
    pub size: SizeCategory,
    #[serde(default)]
    pub behavior: Behavior,
    /// Lowest level at which this pest may appear in catalog-driven batches.
    #[serde(default = "default_unlock_level")]
    pub unlock_level: u32,
}

/// A boss type as stored in the external catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossTypeDef {
    pub id: String,
    pub name: String,
    pub class: BossClass,
    pub base_health: f64,
    pub speed: f64,
    pub damage_per_second: f64,
    #[serde(default)]
    pub armor_segments: u32,
    /// Level at which this boss first appears.
    pub level_appearance: u32,
    #[serde(default = "default_toxic_cloud_damage")]
    pub toxic_cloud_damage: f64,
}

/// The full catalog of pest and boss types.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub pests: Vec<PestTypeDef>,
    #[serde(default)]
    pub bosses: Vec<BossTypeDef>,
}

fn default_unlock_level() -> u32 {
    1
}

fn default_toxic_cloud_damage() -> f64 {
    1.0
}

impl Catalog {
    /// Parse a catalog from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reject catalogs the engine cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pests.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        for pest in &self.pests {
            check_positive(&format!("pest `{}` base_health", pest.id), pest.base_health)?;
            check_non_negative(&format!("pest `{}` base_speed", pest.id), pest.base_speed)?;
            check_non_negative(
                &format!("pest `{}` base_damage_per_second", pest.id),
                pest.base_damage_per_second,
            )?;
        }
        for boss in &self.bosses {
            check_positive(&format!("boss `{}` base_health", boss.id), boss.base_health)?;
        }
        Ok(())
    }

    pub fn pest(&self, id: &str) -> Option<&PestTypeDef> {
        self.pests.iter().find(|p| p.id == id)
    }

    pub fn boss(&self, id: &str) -> Option<&BossTypeDef> {
        self.bosses.iter().find(|b| b.id == id)
    }

    /// Pests that may appear at `level`.
    pub fn unlocked_pests(&self, level: u32) -> Vec<&PestTypeDef> {
        self.pests.iter().filter(|p| p.unlock_level <= level).collect()
    }

    /// The boss that debuts at exactly `level`, if any.
    pub fn boss_for_level(&self, level: u32) -> Option<&BossTypeDef> {
        self.bosses.iter().find(|b| b.level_appearance == level)
    }

    /// Stock catalog: eleven garden pests and one boss per class.
    pub fn builtin() -> Self {
        let pest = |id: &str,
                    name: &str,
                    health: f64,
                    speed: f64,
                    dps: f64,
                    size: SizeCategory,
                    behavior: Behavior,
                    unlock_level: u32| PestTypeDef {
            id: id.to_string(),
            name: name.to_string(),
            base_health: health,
            base_speed: speed,
            base_damage_per_second: dps,
            size,
            behavior,
            unlock_level,
        };

        Self {
            pests: vec![
                pest("aphid", "Aphid", 30.0, 1.0, 0.5, SizeCategory::Tiny, Behavior::Swarm, 1),
                pest("thrip", "Thrip", 25.0, 1.4, 0.4, SizeCategory::Tiny, Behavior::Fast, 1),
                pest("spider_mite", "Spider Mite", 35.0, 1.0, 0.6, SizeCategory::Tiny, Behavior::Zigzag, 2),
                pest("whitefly", "Whitefly", 30.0, 1.2, 0.5, SizeCategory::Small, Behavior::Flying, 2),
                pest("caterpillar", "Caterpillar", 80.0, 0.6, 1.2, SizeCategory::Medium, Behavior::Resistant, 3),
                pest("grasshopper", "Grasshopper", 60.0, 1.3, 1.0, SizeCategory::Medium, Behavior::Jumper, 4),
                pest("leafhopper", "Leafhopper", 40.0, 1.5, 0.7, SizeCategory::Small, Behavior::Fast, 5),
                pest("fungus_gnat", "Fungus Gnat", 20.0, 1.3, 0.3, SizeCategory::Tiny, Behavior::Flying, 5),
                pest("root_borer", "Root Borer", 90.0, 0.7, 1.5, SizeCategory::Medium, Behavior::Burrowing, 6),
                pest("fungal_spreader", "Fungal Spreader", 70.0, 0.8, 0.9, SizeCategory::Medium, Behavior::Spreading, 7),
                pest("leaf_mimic", "Leaf Mimic", 65.0, 0.9, 1.0, SizeCategory::Small, Behavior::Camouflaged, 8),
            ],
            bosses: vec![
                BossTypeDef {
                    id: "hive_queen".to_string(),
                    name: "Hive Queen".to_string(),
                    class: BossClass::Swarm,
                    base_health: 400.0,
                    speed: 0.5,
                    damage_per_second: 2.0,
                    armor_segments: 0,
                    level_appearance: 3,
                    toxic_cloud_damage: 1.0,
                },
                BossTypeDef {
                    id: "blight_lord".to_string(),
                    name: "Blight Lord".to_string(),
                    class: BossClass::Toxic,
                    base_health: 600.0,
                    speed: 0.4,
                    damage_per_second: 2.5,
                    armor_segments: 0,
                    level_appearance: 6,
                    toxic_cloud_damage: 2.0,
                },
                BossTypeDef {
                    id: "iron_beetle".to_string(),
                    name: "Iron Beetle".to_string(),
                    class: BossClass::Colossus,
                    base_health: 900.0,
                    speed: 0.3,
                    damage_per_second: 4.0,
                    armor_segments: 3,
                    level_appearance: 9,
                    toxic_cloud_damage: 1.0,
                },
            ],
        }
    }
}

fn check_positive(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        })
    }
}

fn check_non_negative(field: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            field: field.to_string(),
            value,
        })
    }
}
