//! Snapshot system: reads the encounter state and builds a complete
//! `EncounterSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::{Entity, World};

use bloomguard_core::components::*;
use bloomguard_core::enums::EncounterPhase;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::*;
use bloomguard_core::types::Position;

use crate::encounter::{BossInstance, EncounterState};

/// Build a complete snapshot from the current encounter state.
pub fn build_snapshot(
    state: &EncounterState,
    phase: EncounterPhase,
    level: u32,
    events: Vec<EncounterEvent>,
) -> EncounterSnapshot {
    let mut stats = state.stats.clone();
    stats.elapsed_ms = state.now_ms();
    stats.plant_health = state.plant.health;
    stats.completed = phase == EncounterPhase::Completed;

    EncounterSnapshot {
        time: state.time,
        phase,
        level,
        pests: build_pests(&state.world),
        boss: state.boss.as_ref().map(boss_view),
        clouds: state
            .clouds
            .iter()
            .map(|c| CloudView {
                id: c.id,
                position: c.position,
                damage: c.damage,
                created_at_ms: c.created_at_ms,
            })
            .collect(),
        sprays: state
            .sprays
            .iter()
            .map(|s| SprayView {
                id: s.id,
                position: s.position,
                created_at_ms: s.created_at_ms,
                expires_at_ms: s.expires_at_ms,
                area_damage: s.area_damage,
            })
            .collect(),
        power_ups: state
            .power_ups
            .iter()
            .map(|p| PowerUpView {
                id: p.id,
                kind: p.kind,
                position: p.position,
                spawned_at_ms: p.spawned_at_ms,
            })
            .collect(),
        active_power_ups: state
            .active_power_ups
            .iter()
            .map(|p| ActivePowerUpView {
                id: p.id,
                kind: p.kind,
                expires_at_ms: p.expires_at_ms,
            })
            .collect(),
        difficulty: state.difficulty.multipliers,
        plant: PlantView {
            health: state.plant.health,
            max_health: state.plant.max_health,
            water_level: state.plant.resources.water,
            nutrition_level: state.plant.resources.nutrition,
            light_exposure: state.plant.resources.light_exposure,
            growth_level: state.plant.resources.growth_level,
        },
        environment: EnvironmentView {
            weather: state.environment.weather,
            season: state.environment.season,
            hour: state.environment.hour,
            weather_expires_at_ms: state.environment.weather_expires_at_ms,
        },
        stats,
        spray_ammo: state.spray_ammo,
        events,
    }
}

/// All live pests, sorted by id.
fn build_pests(world: &World) -> Vec<PestView> {
    let mut pests: Vec<PestView> = world
        .query::<&Pest>()
        .iter()
        .filter_map(|(entity, _)| pest_view(world, entity))
        .collect();
    pests.sort_by_key(|p| p.id);
    pests
}

/// View of one pest entity.
pub fn pest_view(world: &World, entity: Entity) -> Option<PestView> {
    let pest = world.get::<&Pest>(entity).ok()?;
    let position = *world.get::<&Position>(entity).ok()?;
    let health = *world.get::<&Health>(entity).ok()?;
    let mobility = *world.get::<&Mobility>(entity).ok()?;
    let attack = *world.get::<&Attack>(entity).ok()?;
    let alarm = world.get::<&Alarm>(entity).map(|a| *a).unwrap_or_default();

    Some(PestView {
        id: pest.id,
        type_id: pest.type_id.clone(),
        name: pest.name.clone(),
        behavior: pest.behavior,
        size: pest.size,
        position,
        health: health.current,
        max_health: health.max,
        speed: mobility.speed,
        damage_per_second: attack.damage_per_second,
        alarm_level: alarm.level,
        alerted_toward: alarm.alert_target,
        underground_until_ms: world.get::<&Burrowed>(entity).ok().map(|b| b.emerge_at_ms),
        opacity_hint: world.get::<&Camouflage>(entity).ok().map(|c| c.opacity_hint),
        slowed_until_ms: world.get::<&Slowed>(entity).ok().map(|s| s.until_ms),
        created_at_ms: pest.created_at_ms,
    })
}

fn boss_view(boss: &BossInstance) -> BossView {
    BossView {
        id: boss.id,
        type_id: boss.type_id.clone(),
        name: boss.name.clone(),
        class: boss.class,
        phase: boss.phase,
        position: boss.position,
        health: boss.health,
        max_health: boss.max_health,
        armor_segments: boss.armor_segments,
        total_armor_segments: boss.total_armor_segments,
    }
}
