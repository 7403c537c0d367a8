//! Encounter state: the live world plus everything that sits beside it.
//!
//! The boss, toxic clouds, sprays and power-ups are stored here directly, NOT
//! as ECS entities. Only the engine mutates this state.

use std::collections::{BTreeMap, VecDeque};

use hecs::{Entity, World};

use bloomguard_core::catalog::Catalog;
use bloomguard_core::config::{LevelConfig, UpgradeBundle};
use bloomguard_core::constants::*;
use bloomguard_core::enums::*;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::{DifficultyMultipliers, SessionStats};
use bloomguard_core::types::{Position, SimTime};
use bloomguard_environment::resources::PlantResources;

use crate::world_setup::{self, PestSpawn};

/// Immutable per-session rules derived from the caller's configuration.
#[derive(Debug, Clone)]
pub struct EncounterRules {
    pub level: LevelConfig,
    pub catalog: Catalog,
    pub upgrades: UpgradeBundle,
    pub max_active_pests: usize,
    pub spawn_interval_ms: u64,
    pub day_cycle_speed: f64,
    pub dynamic_weather: bool,
}

impl EncounterRules {
    pub fn level_number(&self) -> u32 {
        self.level.level
    }

    /// Plant damage multiplier from the resistance upgrade.
    pub fn plant_damage_factor(&self) -> f64 {
        1.0 - self.upgrades.resistance_bonus.clamp(0.0, RESISTANCE_BONUS_CAP) / 100.0
    }
}

/// The active boss.
#[derive(Debug, Clone)]
pub struct BossInstance {
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
    pub speed: f64,
    pub damage_per_second: f64,
    pub toxic_cloud_damage: f64,
    pub last_minion_at_ms: u64,
    pub last_toxic_at_ms: u64,
}

/// A toxic cloud left by a toxic-class boss. Never mutated; pruned on expiry.
#[derive(Debug, Clone)]
pub struct ToxicCloud {
    pub id: u32,
    pub position: Position,
    pub damage: f64,
    pub created_at_ms: u64,
}

/// A spray left by the player.
#[derive(Debug, Clone)]
pub struct SprayEffect {
    pub id: u32,
    pub position: Position,
    pub created_at_ms: u64,
    pub expires_at_ms: u64,
    /// Damage per pulse to pests in range, when the area upgrade is owned.
    pub area_damage: Option<f64>,
}

/// A power-up lying on the field.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub position: Position,
    pub spawned_at_ms: u64,
}

/// A collected timed power-up still in effect.
#[derive(Debug, Clone)]
pub struct ActivePowerUp {
    pub id: u32,
    pub kind: PowerUpKind,
    pub expires_at_ms: u64,
}

/// Adaptive difficulty: the live multipliers and the recent performance
/// samples they were derived from.
#[derive(Debug, Clone, Default)]
pub struct DifficultyState {
    pub multipliers: DifficultyMultipliers,
    pub history: VecDeque<f64>,
}

#[derive(Debug, Clone)]
pub struct EnvironmentState {
    pub weather: Weather,
    pub season: Season,
    /// Hour of day, 0.0..24.0.
    pub hour: f64,
    pub weather_expires_at_ms: u64,
}

#[derive(Debug, Clone)]
pub struct PlantState {
    pub health: f64,
    pub max_health: f64,
    pub resources: PlantResources,
}

/// Deadlines of the periodic effects, as timestamps of their last firing.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timers {
    pub last_spawn_ms: u64,
    pub last_decay_ms: u64,
    pub last_refill_ms: u64,
    pub last_power_up_ms: u64,
    pub last_difficulty_ms: u64,
}

/// Aggregate mutable simulation state for one session.
pub struct EncounterState {
    pub world: World,
    /// Stable pest id to entity.
    pub index: BTreeMap<u32, Entity>,
    next_id: u32,
    pub time: SimTime,
    pub boss: Option<BossInstance>,
    /// A boss spawns at most once per session.
    pub boss_spawned: bool,
    /// Level completes when this passes.
    pub completion_due_ms: Option<u64>,
    pub clouds: Vec<ToxicCloud>,
    pub sprays: Vec<SprayEffect>,
    pub power_ups: Vec<PowerUp>,
    pub active_power_ups: Vec<ActivePowerUp>,
    /// Clouds, sprays and power-ups share this id space.
    next_effect_id: u32,
    pub difficulty: DifficultyState,
    pub environment: EnvironmentState,
    pub plant: PlantState,
    pub stats: SessionStats,
    pub spray_ammo: f64,
    pub timers: Timers,
    pub events: Vec<EncounterEvent>,
}

impl EncounterState {
    pub fn new(environment: EnvironmentState, plant: PlantState) -> Self {
        let mut stats = SessionStats::default();
        stats.plant_health = plant.health;
        Self {
            world: World::new(),
            index: BTreeMap::new(),
            next_id: 1,
            time: SimTime::default(),
            boss: None,
            boss_spawned: false,
            completion_due_ms: None,
            clouds: Vec::new(),
            sprays: Vec::new(),
            power_ups: Vec::new(),
            active_power_ups: Vec::new(),
            next_effect_id: 1,
            difficulty: DifficultyState::default(),
            environment,
            plant,
            stats,
            spray_ammo: SPRAY_AMMO_MAX,
            timers: Timers::default(),
            events: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> u64 {
        self.time.elapsed_ms
    }

    /// Next id in the shared pest/boss id space.
    pub fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Next id for clouds, sprays and power-ups.
    pub fn allocate_effect_id(&mut self) -> u32 {
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        id
    }

    pub fn active_pests(&self) -> usize {
        self.index.len()
    }

    pub fn boss_active(&self) -> bool {
        self.boss
            .as_ref()
            .is_some_and(|b| b.phase == BossPhase::Active)
    }

    pub fn entity(&self, pest_id: u32) -> Option<Entity> {
        self.index.get(&pest_id).copied()
    }

    /// Add a pest unless the active cap is reached. Excess is dropped silently.
    pub fn insert_pest(&mut self, spawn: PestSpawn, max_active: usize) -> Option<u32> {
        if self.index.len() >= max_active {
            return None;
        }
        let id = self.allocate_id();
        let entity = world_setup::spawn_pest(&mut self.world, id, self.time.elapsed_ms, spawn);
        self.index.insert(id, entity);
        Some(id)
    }

    /// Remove a pest. Unknown ids are ignored.
    pub fn remove_pest(&mut self, pest_id: u32) -> bool {
        match self.index.remove(&pest_id) {
            Some(entity) => self.world.despawn(entity).is_ok(),
            None => false,
        }
    }

    /// Remove every pest (a boss arrival clears the field).
    pub fn clear_pests(&mut self) {
        self.world.clear();
        self.index.clear();
    }

    pub fn record_elimination(&mut self, type_id: &str, score: u32) {
        *self.stats.eliminations.entry(type_id.to_string()).or_insert(0) += 1;
        self.stats.score = self.stats.score.saturating_add(score);
    }

    /// Apply damage to the plant, floored at zero.
    pub fn damage_plant(&mut self, amount: f64) {
        if amount > 0.0 {
            self.plant.health = (self.plant.health - amount).max(0.0);
        }
    }

    pub fn plant_lost(&self) -> bool {
        self.plant.health <= 0.0
    }
}
