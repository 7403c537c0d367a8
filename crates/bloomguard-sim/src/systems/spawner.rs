//! Spawn scheduling: batch composition and cadence.
//!
//! A batch is spawned once at session start and then every
//! `spawn_interval_ms`, skipped entirely while a boss is active.

use rand::Rng;
use tracing::{debug, warn};

use bloomguard_core::catalog::PestTypeDef;
use bloomguard_core::config::PestEntry;
use bloomguard_core::constants::*;
use bloomguard_core::enums::Behavior;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::DifficultyMultipliers;
use bloomguard_core::types::Position;
use bloomguard_environment::modifiers::resolve_modifiers;
use bloomguard_pest_ai::profiles::get_profile;

use crate::encounter::{EncounterRules, EncounterState, EnvironmentState};
use crate::world_setup::PestSpawn;

/// Per-level stat multipliers applied to catalog base values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelScaling {
    pub health: f64,
    pub speed: f64,
    pub damage: f64,
}

pub fn level_scaling(level: u32) -> LevelScaling {
    let steps = level.saturating_sub(1) as f64;
    LevelScaling {
        health: 1.0 + steps * LEVEL_HEALTH_STEP,
        speed: 1.0 + steps * LEVEL_SPEED_STEP,
        damage: 1.0 + steps * LEVEL_DAMAGE_STEP,
    }
}

/// Time between scheduled batches.
pub fn spawn_interval_ms(level: u32) -> u64 {
    SPAWN_INTERVAL_BASE_MS
        .saturating_sub(level as u64 * SPAWN_INTERVAL_PER_LEVEL_MS)
        .max(SPAWN_INTERVAL_MIN_MS)
}

/// Batch size when the level has no explicit pest list.
pub fn catalog_batch_size(level: u32) -> usize {
    (CATALOG_BATCH_BASE + (level / 2) as usize).min(CATALOG_BATCH_MAX)
}

struct Candidate<'a> {
    def: &'a PestTypeDef,
    entry: Option<&'a PestEntry>,
}

/// Compose one batch. Rejected candidates and anything past the active cap
/// are dropped; the returned blueprints are ready to insert.
///
/// A health override on the level entry is the pest's health before the
/// difficulty multiplier; profile and season health multipliers only apply
/// to the scaled catalog base.
pub fn schedule_batch(
    rules: &EncounterRules,
    environment: &EnvironmentState,
    difficulty: &DifficultyMultipliers,
    active_count: usize,
    now_ms: u64,
    rng: &mut impl Rng,
) -> Vec<PestSpawn> {
    let level = rules.level_number();
    let candidates = select_candidates(rules, rng);

    let room = rules.max_active_pests.saturating_sub(active_count);
    let mut accepted = Vec::new();
    for candidate in candidates {
        let mods = resolve_modifiers(environment.weather, environment.season, candidate.def.behavior);
        if rng.gen::<f64>() > mods.spawn_chance {
            continue;
        }
        accepted.push((candidate, mods));
    }
    accepted.truncate(room);

    let scaling = level_scaling(level);
    let speed_boost = rules.level.speed_boost();
    let count = accepted.len();
    let sector = std::f64::consts::TAU / count.max(1) as f64;

    accepted
        .into_iter()
        .enumerate()
        .map(|(i, (candidate, mods))| {
            let def = candidate.def;
            let profile = get_profile(def.behavior);
            let entry = candidate.entry;

            let health = entry
                .and_then(|e| e.health)
                .unwrap_or(def.base_health * scaling.health * profile.health_mult * mods.health_mult);
            let base_speed = entry
                .and_then(|e| e.speed)
                .unwrap_or(def.base_speed * scaling.speed);
            let base_damage = entry
                .and_then(|e| e.damage)
                .unwrap_or(def.base_damage_per_second * scaling.damage);

            let health = (health * difficulty.pest_health).floor();
            let speed =
                base_speed * profile.speed_mult * mods.speed_mult * speed_boost * difficulty.pest_speed;
            let damage = base_damage * mods.damage_mult;

            let angle = sector * i as f64 + (rng.gen::<f64>() - 0.5) * sector * 0.5;
            let distance = SPAWN_RING_MIN + rng.gen::<f64>() * SPAWN_RING_JITTER;
            let mut position = Position::default().offset_on_ground(angle, distance);

            let mut spawn = PestSpawn::from_def(def, position, health, speed, damage);
            spawn.wander_phase = rng.gen::<f64>();
            if def.behavior == Behavior::Burrowing {
                position.y = UNDERGROUND_HEIGHT;
                let delay = BURROW_MIN_MS + (rng.gen::<f64>() * BURROW_JITTER_MS) as u64;
                spawn.emerge_at_ms = Some(now_ms.saturating_add(delay));
            } else {
                position.y = SURFACE_HEIGHT + profile.y_offset;
            }
            spawn.position = position;
            spawn
        })
        .collect()
}

fn select_candidates<'a>(rules: &'a EncounterRules, rng: &mut impl Rng) -> Vec<Candidate<'a>> {
    let level = rules.level_number();

    if !rules.level.pests.is_empty() {
        let mut candidates: Vec<Candidate<'a>> = rules
            .level
            .pests
            .iter()
            .filter_map(|entry| {
                rules.catalog.pest(&entry.pest_id).map(|def| Candidate {
                    def,
                    entry: Some(entry),
                })
            })
            .collect();

        let boost = rules.level.spawn_boost();
        if boost > 1.0 && !candidates.is_empty() && rng.gen::<f64>() < SPAWN_BOOST_CHANCE {
            let extra = (candidates.len() as f64 * (boost - 1.0)).floor() as usize;
            for _ in 0..extra {
                let picked = &candidates[pick(rng, candidates.len())];
                let duplicate = Candidate {
                    def: picked.def,
                    entry: picked.entry,
                };
                candidates.push(duplicate);
            }
        }
        return candidates;
    }

    let pool = rules.catalog.unlocked_pests(level);
    if pool.is_empty() {
        warn!(level, "no catalog pest is unlocked at this level");
        return Vec::new();
    }
    (0..catalog_batch_size(level))
        .map(|_| Candidate {
            def: pool[pick(rng, pool.len())],
            entry: None,
        })
        .collect()
}

/// Schedule a batch and insert it, recording spawn events.
pub fn spawn_batch(state: &mut EncounterState, rules: &EncounterRules, rng: &mut impl Rng) -> Vec<u32> {
    let now = state.now_ms();
    let batch = schedule_batch(
        rules,
        &state.environment,
        &state.difficulty.multipliers,
        state.active_pests(),
        now,
        rng,
    );
    let mut ids = Vec::with_capacity(batch.len());
    for spawn in batch {
        let behavior = spawn.behavior;
        if let Some(pest_id) = state.insert_pest(spawn, rules.max_active_pests) {
            state.events.push(EncounterEvent::PestSpawned { pest_id, behavior });
            ids.push(pest_id);
        }
    }
    state.timers.last_spawn_ms = now;
    debug!(now_ms = now, spawned = ids.len(), active = state.active_pests(), "spawn batch");
    ids
}

/// The level's spawn interval shortened by the difficulty spawn rate.
pub fn effective_interval_ms(rules: &EncounterRules, difficulty: &DifficultyMultipliers) -> u64 {
    (rules.spawn_interval_ms as f64 / difficulty.pest_spawn_rate.max(f64::EPSILON)) as u64
}

/// Spawn a batch if the interval has elapsed and no boss is active.
pub fn run(state: &mut EncounterState, rules: &EncounterRules, rng: &mut impl Rng) {
    if state.boss_active() {
        return;
    }
    let interval = effective_interval_ms(rules, &state.difficulty.multipliers);
    if state.now_ms().saturating_sub(state.timers.last_spawn_ms) >= interval {
        spawn_batch(state, rules, rng);
    }
}

/// Uniform index in `0..len`. `len` must be non-zero.
pub(crate) fn pick(rng: &mut impl Rng, len: usize) -> usize {
    ((rng.gen::<f64>() * len as f64) as usize).min(len - 1)
}
