//! Simulation engine: the single authoritative tick driver.
//!
//! `SimulationEngine` owns the encounter state, processes player commands,
//! runs every system in a fixed order, and produces `EncounterSnapshot`s.
//! Completely headless; time only moves when the caller ticks, so a seed
//! plus a sequence of ticks fully determines the session.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use bloomguard_core::catalog::Catalog;
use bloomguard_core::commands::PlayerCommand;
use bloomguard_core::config::*;
use bloomguard_core::constants::*;
use bloomguard_core::enums::*;
use bloomguard_core::error::{ConfigError, TickError};
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::{EncounterSnapshot, HitOutcome, SessionResult};
use bloomguard_core::types::{Position, SimTime};
use bloomguard_environment::resources::PlantResources;
use bloomguard_environment::weather::roll_duration_ms;

use crate::encounter::{EncounterRules, EncounterState, EnvironmentState, PlantState};
use crate::session;
use crate::systems;

/// Configuration for starting a new session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same session.
    pub seed: u64,
    /// Hard cap on simultaneously active pests.
    pub max_active_pests: usize,
    pub season: Season,
    /// Starting hour when the level does not set one.
    pub hour: f64,
    /// Day/night speed multiplier.
    pub day_cycle_speed: f64,
    /// Whether weather changes on its own during the session.
    pub dynamic_weather: bool,
    /// Starting weather when the level does not set one.
    pub weather: Weather,
    pub upgrades: UpgradeBundle,
    pub plant: PlantStats,
    pub carry_over: CarryOver,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_active_pests: DEFAULT_MAX_ACTIVE_PESTS,
            season: Season::default(),
            hour: 12.0,
            day_cycle_speed: 1.0,
            dynamic_weather: true,
            weather: Weather::default(),
            upgrades: UpgradeBundle::default(),
            plant: PlantStats::default(),
            carry_over: CarryOver::default(),
        }
    }
}

/// The simulation engine. Owns the encounter state and the generator.
pub struct SimulationEngine<R = ChaCha8Rng> {
    state: EncounterState,
    rules: EncounterRules,
    phase: EncounterPhase,
    season: Season,
    carry_over: CarryOver,
    rng: R,
    command_queue: VecDeque<PlayerCommand>,
    result: Option<SessionResult>,
}

impl SimulationEngine<ChaCha8Rng> {
    /// Start a session seeded from `config.seed`.
    pub fn new(config: SimConfig, level: LevelConfig, catalog: Catalog) -> Result<Self, ConfigError> {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::with_rng(config, level, catalog, rng)
    }
}

impl<R: Rng> SimulationEngine<R> {
    /// Start a session drawing every random roll from `rng`.
    ///
    /// Fails if the catalog or level is malformed; the first spawn batch is
    /// scheduled before this returns.
    pub fn with_rng(
        config: SimConfig,
        level: LevelConfig,
        catalog: Catalog,
        mut rng: R,
    ) -> Result<Self, ConfigError> {
        catalog.validate()?;
        level.validate(&catalog)?;
        validate_config(&config)?;

        let weather = level.weather.unwrap_or(config.weather);
        let hour = level.time_of_day.unwrap_or(config.hour).rem_euclid(24.0);
        let environment = EnvironmentState {
            weather,
            season: config.season,
            hour,
            weather_expires_at_ms: roll_duration_ms(weather, &mut rng),
        };
        let plant = PlantState {
            health: PLANT_MAX_HEALTH * level.plant_stress(),
            max_health: PLANT_MAX_HEALTH,
            resources: PlantResources {
                water: config.plant.water_level.clamp(0.0, 100.0),
                nutrition: config.plant.nutrition_level.clamp(0.0, 100.0),
                light_exposure: config.plant.light_exposure,
                growth_level: config.plant.growth_level.min(MAX_GROWTH_LEVEL),
            },
        };

        let rules = EncounterRules {
            spawn_interval_ms: systems::spawner::spawn_interval_ms(level.level),
            level,
            catalog,
            upgrades: config.upgrades,
            max_active_pests: config.max_active_pests,
            day_cycle_speed: config.day_cycle_speed,
            dynamic_weather: config.dynamic_weather,
        };

        let mut state = EncounterState::new(environment, plant);
        info!(
            level = rules.level_number(),
            seed = config.seed,
            ?weather,
            season = ?config.season,
            "session started"
        );
        systems::spawner::spawn_batch(&mut state, &rules, &mut rng);

        Ok(Self {
            state,
            rules,
            phase: EncounterPhase::Active,
            season: config.season,
            carry_over: config.carry_over,
            rng,
            command_queue: VecDeque::new(),
            result: None,
        })
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the encounter by `delta_ms` and return the resulting snapshot.
    ///
    /// While paused the snapshot is returned without advancing. Once the
    /// session is over every call is rejected.
    pub fn tick(&mut self, delta_ms: u64) -> Result<EncounterSnapshot, TickError> {
        if self.phase.is_terminal() {
            return Err(TickError::SessionOver { outcome: self.phase });
        }

        self.process_commands();

        if self.phase == EncounterPhase::Active {
            self.state.time.advance(delta_ms);
            self.run_systems(delta_ms);
        }

        Ok(self.snapshot())
    }

    /// Hit a pest or the boss now. A no-op unless the encounter is active.
    pub fn apply_hit(&mut self, target_id: u32, raw_damage: f64) -> HitOutcome {
        if self.phase != EncounterPhase::Active {
            return HitOutcome::default();
        }
        systems::combat::apply_hit(&mut self.state, &self.rules, target_id, raw_damage, &mut self.rng)
    }

    /// Leave a spray effect now. Returns its id, or `None` when out of ammo
    /// or the encounter is not active.
    pub fn spray(&mut self, position: Position) -> Option<u32> {
        if self.phase != EncounterPhase::Active {
            return None;
        }
        systems::hazards::spray(&mut self.state, &self.rules, position)
    }

    /// Pick up a power-up now. Returns its kind, or `None` when the id is
    /// not on the field or the encounter is not active.
    pub fn collect_power_up(&mut self, power_up_id: u32) -> Option<PowerUpKind> {
        if self.phase != EncounterPhase::Active {
            return None;
        }
        systems::powerups::collect(&mut self.state, power_up_id)
    }

    /// End the session early. Returns the settled result; a session that
    /// already ended keeps the outcome it ended with.
    pub fn end_session(&mut self) -> SessionResult {
        if !self.phase.is_terminal() {
            self.finish(EncounterPhase::Abandoned);
        }
        match &self.result {
            Some(result) => result.clone(),
            None => self.settle(self.phase),
        }
    }

    /// The settled result, once the session is over.
    pub fn session_result(&self) -> Option<&SessionResult> {
        self.result.as_ref()
    }

    /// Get the current encounter phase.
    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.state.time
    }

    /// Read-only access to the encounter state.
    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    pub fn rules(&self) -> &EncounterRules {
        &self.rules
    }

    /// Spawn a catalog pest at an exact position (for tests).
    #[cfg(test)]
    pub fn spawn_test_pest(&mut self, type_id: &str, position: Position) -> Option<u32> {
        let def = self.rules.catalog.pest(type_id)?;
        let spawn = crate::world_setup::PestSpawn::from_def(
            def,
            position,
            def.base_health,
            def.base_speed,
            def.base_damage_per_second,
        );
        self.state.insert_pest(spawn, self.rules.max_active_pests)
    }

    /// Mutable access to the encounter state (for tests).
    #[cfg(test)]
    pub fn state_mut(&mut self) -> &mut EncounterState {
        &mut self.state
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == EncounterPhase::Active {
                    self.phase = EncounterPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == EncounterPhase::Paused {
                    self.phase = EncounterPhase::Active;
                }
            }
            PlayerCommand::Hit { target_id, damage } => {
                self.apply_hit(target_id, damage);
            }
            PlayerCommand::Spray { position } => {
                self.spray(position);
            }
            PlayerCommand::CollectPowerUp { power_up_id } => {
                self.collect_power_up(power_up_id);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, delta_ms: u64) {
        let state = &mut self.state;
        let rules = &self.rules;
        let rng = &mut self.rng;

        // 1. Cloud and spray expiry
        systems::hazards::expire(state);
        // 2. Boss spawn and sub-timers
        systems::boss::run(state, rules, rng);
        // 3. Movement, emergence and slow expiry
        systems::movement::run(state, delta_ms);
        // 4. Plant damage from pests, boss and clouds
        systems::proximity::run(state, rules, delta_ms);
        if state.plant_lost() {
            self.finish(EncounterPhase::Defeated);
            return;
        }
        // 5. Spray damage-over-time and ammo
        systems::hazards::apply_spray_damage(state, delta_ms);
        systems::hazards::refill_ammo(state, rules);
        // 6. Spawn scheduling
        systems::spawner::run(state, rules, rng);
        // 7. Power-up spawning and timed-effect expiry
        systems::powerups::run(state, rules, rng);
        // 8. Environment and plant resources
        systems::environment::run(state, rules, delta_ms, rng);
        if state.plant_lost() {
            self.finish(EncounterPhase::Defeated);
            return;
        }
        // 9. Adaptive difficulty
        systems::difficulty::run(state);
        // 10. Level completion
        let now = state.now_ms();
        let boss_done = state.completion_due_ms.is_some_and(|due| now >= due);
        let survived = rules.level.survive_duration_ms().is_some_and(|d| now >= d);
        if boss_done || survived {
            self.finish(EncounterPhase::Completed);
        }
    }

    /// Enter a terminal phase and settle the session.
    fn finish(&mut self, outcome: EncounterPhase) {
        self.phase = outcome;
        match outcome {
            EncounterPhase::Completed => self.state.events.push(EncounterEvent::LevelCompleted {
                level: self.rules.level_number(),
            }),
            EncounterPhase::Defeated => self.state.events.push(EncounterEvent::PlantLost),
            _ => {}
        }
        let result = self.settle(outcome);
        info!(
            outcome = ?outcome,
            score = result.score,
            elapsed_ms = self.state.now_ms(),
            plant_health = result.plant_health_final,
            "session ended"
        );
        self.result = Some(result);
    }

    fn settle(&self, outcome: EncounterPhase) -> SessionResult {
        let mut stats = self.state.stats.clone();
        stats.elapsed_ms = self.state.now_ms();
        stats.plant_health = self.state.plant.health;
        stats.completed = outcome == EncounterPhase::Completed;
        session::settle(&stats, &self.rules.level, &self.carry_over, self.season, outcome)
    }

    fn snapshot(&mut self) -> EncounterSnapshot {
        let events = std::mem::take(&mut self.state.events);
        systems::snapshot::build_snapshot(&self.state, self.phase, self.rules.level_number(), events)
    }
}

fn validate_config(config: &SimConfig) -> Result<(), ConfigError> {
    let checks = [
        ("max_active_pests", config.max_active_pests as f64, config.max_active_pests > 0),
        ("hour", config.hour, config.hour.is_finite()),
        (
            "day_cycle_speed",
            config.day_cycle_speed,
            config.day_cycle_speed.is_finite() && config.day_cycle_speed >= 0.0,
        ),
        (
            "resistance_bonus",
            config.upgrades.resistance_bonus,
            config.upgrades.resistance_bonus.is_finite(),
        ),
    ];
    for (field, value, ok) in checks {
        if !ok {
            return Err(ConfigError::InvalidValue {
                field: field.to_string(),
                value,
            });
        }
    }
    Ok(())
}
