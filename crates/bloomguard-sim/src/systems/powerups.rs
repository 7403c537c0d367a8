//! Power-ups: seeded spawning near the plant, collection and timed-effect
//! expiry.
//!
//! Uncollected power-ups stay on the field until picked up; at most
//! `MAX_FIELD_POWER_UPS` wait at once and a spawn due while the field is
//! full is skipped.

use hecs::Entity;
use rand::Rng;
use tracing::{debug, info};

use bloomguard_core::components::Pest;
use bloomguard_core::constants::*;
use bloomguard_core::enums::PowerUpKind;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::DifficultyMultipliers;
use bloomguard_core::types::Position;

use crate::encounter::{ActivePowerUp, EncounterRules, EncounterState, PowerUp};
use crate::systems::combat::slow_pest;
use crate::systems::spawner::pick;

/// Time between power-up spawns, shortened by the difficulty power-up rate.
pub fn spawn_interval_ms(level: u32, difficulty: &DifficultyMultipliers) -> u64 {
    let base = POWER_UP_INTERVAL_BASE_MS
        .saturating_sub(level as u64 * POWER_UP_INTERVAL_PER_LEVEL_MS)
        .max(POWER_UP_INTERVAL_MIN_MS);
    (base as f64 / difficulty.power_up_spawn_rate.max(f64::EPSILON)) as u64
}

/// Kinds that can appear at `level`.
pub fn pool(level: u32) -> Vec<PowerUpKind> {
    let mut kinds = PowerUpKind::COMMON.to_vec();
    if level >= NUKE_UNLOCK_LEVEL {
        kinds.push(PowerUpKind::Nuke);
    }
    kinds
}

/// Expire finished timed effects, then spawn a power-up when one is due.
pub fn run(state: &mut EncounterState, rules: &EncounterRules, rng: &mut impl Rng) {
    expire(state);

    let now = state.now_ms();
    let interval = spawn_interval_ms(rules.level_number(), &state.difficulty.multipliers);
    if now.saturating_sub(state.timers.last_power_up_ms) < interval {
        return;
    }
    state.timers.last_power_up_ms = now;
    if state.power_ups.len() >= MAX_FIELD_POWER_UPS {
        return;
    }

    let kinds = pool(rules.level_number());
    let kind = kinds[pick(rng, kinds.len())];
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let distance = POWER_UP_RING_MIN + rng.gen::<f64>() * POWER_UP_RING_JITTER;
    let mut position = Position::default().offset_on_ground(angle, distance);
    position.y = POWER_UP_HEIGHT;

    let id = state.allocate_effect_id();
    state.power_ups.push(PowerUp {
        id,
        kind,
        position,
        spawned_at_ms: now,
    });
    debug!(power_up_id = id, ?kind, "power-up spawned");
    state.events.push(EncounterEvent::PowerUpSpawned { power_up_id: id, kind });
}

/// Pick up a power-up and apply its effect. Unknown ids are ignored.
pub fn collect(state: &mut EncounterState, power_up_id: u32) -> Option<PowerUpKind> {
    let index = state.power_ups.iter().position(|p| p.id == power_up_id)?;
    let power_up = state.power_ups.remove(index);
    let kind = power_up.kind;
    let now = state.now_ms();

    match kind {
        PowerUpKind::Nuke => {
            let cleared = state.active_pests();
            state.clear_pests();
            state.stats.score = state.stats.score.saturating_add(NUKE_SCORE);
            info!(cleared, "nuke detonated");
        }
        PowerUpKind::Health => {
            state.plant.health = (state.plant.health + HEALTH_POWER_UP_AMOUNT).min(state.plant.max_health);
        }
        PowerUpKind::Freeze => slow_all(state, FREEZE_SPEED_FACTOR, now.saturating_add(kind.duration_ms())),
        PowerUpKind::SlowTime => slow_all(state, SLOW_TIME_SPEED_FACTOR, now.saturating_add(kind.duration_ms())),
    }

    if kind.duration_ms() > 0 {
        state.active_power_ups.push(ActivePowerUp {
            id: power_up_id,
            kind,
            expires_at_ms: now.saturating_add(kind.duration_ms()),
        });
    }
    state.events.push(EncounterEvent::PowerUpCollected { power_up_id, kind });
    Some(kind)
}

fn slow_all(state: &mut EncounterState, factor: f64, until_ms: u64) {
    let entities: Vec<Entity> = state.world.query::<&Pest>().iter().map(|(e, _)| e).collect();
    for entity in entities {
        slow_pest(&mut state.world, entity, factor, until_ms);
    }
}

fn expire(state: &mut EncounterState) {
    let now = state.now_ms();
    let (expired, active): (Vec<ActivePowerUp>, Vec<ActivePowerUp>) = std::mem::take(&mut state.active_power_ups)
        .into_iter()
        .partition(|p| now >= p.expires_at_ms);
    state.active_power_ups = active;
    for power_up in expired {
        state.events.push(EncounterEvent::PowerUpExpired {
            power_up_id: power_up.id,
            kind: power_up.kind,
        });
    }
}
