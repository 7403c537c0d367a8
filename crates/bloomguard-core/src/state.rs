//! Encounter snapshot, running stats, and the terminal session result.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::config::Objective;
use crate::enums::*;
use crate::events::EncounterEvent;
use crate::types::{Position, SimTime};

/// Complete encounter state handed to the caller after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    pub phase: EncounterPhase,
    pub level: u32,
    pub pests: Vec<PestView>,
    pub boss: Option<BossView>,
    pub clouds: Vec<CloudView>,
    pub sprays: Vec<SprayView>,
    /// Power-ups waiting to be collected.
    pub power_ups: Vec<PowerUpView>,
    /// Timed power-ups currently in effect.
    pub active_power_ups: Vec<ActivePowerUpView>,
    pub difficulty: DifficultyMultipliers,
    pub plant: PlantView,
    pub environment: EnvironmentView,
    pub stats: SessionStats,
    pub spray_ammo: f64,
    pub events: Vec<EncounterEvent>,
}

/// A live pest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PestView {
    pub id: u32,
    pub type_id: String,
    pub name: String,
    pub behavior: Behavior,
    pub size: SizeCategory,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub speed: f64,
    pub damage_per_second: f64,
    pub alarm_level: u8,
    pub alerted_toward: Option<Position>,
    /// Set while burrowed.
    pub underground_until_ms: Option<u64>,
    /// Set for camouflaged pests.
    pub opacity_hint: Option<f64>,
    pub slowed_until_ms: Option<u64>,
    pub created_at_ms: u64,
}

/// The active boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossView {
    pub id: u32,
    pub type_id: String,
    pub name: String,
    pub class: BossClass,
    pub phase: BossPhase,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub armor_segments: u32,
    pub total_armor_segments: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloudView {
    pub id: u32,
    pub position: Position,
    pub damage: f64,
    pub created_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SprayView {
    pub id: u32,
    pub position: Position,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
    pub area_damage: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub position: Position,
    pub spawned_at_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivePowerUpView {
    pub id: u32,
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

/// Adaptive difficulty multipliers. All start at 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyMultipliers {
    /// Applied to spawned pest and boss health.
    pub pest_health: f64,
    /// Applied to spawned pest and boss speed.
    pub pest_speed: f64,
    /// Divides the batch spawn interval.
    pub pest_spawn_rate: f64,
    /// Divides the power-up spawn interval.
    pub power_up_spawn_rate: f64,
}

impl Default for DifficultyMultipliers {
    fn default() -> Self {
        Self {
            pest_health: 1.0,
            pest_speed: 1.0,
            pest_spawn_rate: 1.0,
            power_up_spawn_rate: 1.0,
        }
    }
}

/// The defended plant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantView {
    pub health: f64,
    pub max_health: f64,
    pub water_level: f64,
    pub nutrition_level: f64,
    pub light_exposure: f64,
    pub growth_level: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentView {
    pub weather: Weather,
    pub season: Season,
    pub hour: f64,
    pub weather_expires_at_ms: u64,
}

/// Running session statistics for live UI display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    /// Eliminations keyed by catalog type id.
    pub eliminations: BTreeMap<String, u32>,
    pub elapsed_ms: u64,
    pub plant_health: f64,
    pub completed: bool,
}

impl SessionStats {
    pub fn total_eliminations(&self) -> u32 {
        self.eliminations.values().sum()
    }
}

/// What a single hit did.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HitOutcome {
    pub eliminated: bool,
    pub score_delta: u32,
    /// Spores and reinforcements created by this hit.
    pub spawned: Vec<PestView>,
}

/// Whether an objective was met at session end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveStatus {
    pub objective: Objective,
    pub met: bool,
}

/// Terminal record of a session, handed back for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub outcome: EncounterPhase,
    pub completed: bool,
    pub level: u32,
    pub score: u32,
    pub duration_secs: u64,
    pub pests_eliminated: BTreeMap<String, u32>,
    pub plant_health_final: f64,
    pub research_points: u32,
    pub leaf_earned: u32,
    pub bonus_leaf: u32,
    pub skill_points: u32,
    pub pests_encountered: BTreeSet<String>,
    pub next_level: u32,
    pub season: Season,
    pub season_day: u32,
    pub objectives: Vec<ObjectiveStatus>,
}
