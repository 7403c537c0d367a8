//! Combat resolution: player hits, alarm propagation, spores and
//! reinforcements.

use hecs::{Entity, World};
use rand::Rng;
use tracing::debug;

use bloomguard_core::components::*;
use bloomguard_core::constants::*;
use bloomguard_core::enums::Behavior;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::HitOutcome;
use bloomguard_core::types::Position;
use bloomguard_pest_ai::profiles::get_profile;

use crate::encounter::{EncounterRules, EncounterState};
use crate::systems::{boss, snapshot};
use crate::world_setup::PestSpawn;

/// Apply a player hit to a pest or the active boss.
///
/// Unknown, eliminated and burrowed targets are no-ops. Health never
/// increases and alarm never exceeds `MAX_ALARM_LEVEL`.
pub fn apply_hit(
    state: &mut EncounterState,
    rules: &EncounterRules,
    target_id: u32,
    raw_damage: f64,
    rng: &mut impl Rng,
) -> HitOutcome {
    let raw_damage = if raw_damage.is_finite() { raw_damage.max(0.0) } else { 0.0 };

    if state.boss.as_ref().is_some_and(|b| b.id == target_id) {
        return boss::damage_boss(state, rules, raw_damage);
    }

    let Some(entity) = state.entity(target_id) else {
        return HitOutcome::default();
    };
    if state.world.get::<&Burrowed>(entity).is_ok() {
        return HitOutcome::default();
    }

    let Some(target) = read_target(state, entity) else {
        return HitOutcome::default();
    };

    let now = state.now_ms();
    let mut outcome = HitOutcome::default();

    // Spores
    let spread_due = state
        .world
        .get::<&Spreader>(entity)
        .ok()
        .map(|s| s.last_spread_at_ms.map_or(true, |last| now.saturating_sub(last) > s.cooldown_ms));
    let mut spore_ids = Vec::new();
    if spread_due == Some(true) {
        spore_ids = release_spores(state, rules, &target, rng);
        if let Ok(mut spreader) = state.world.get::<&mut Spreader>(entity) {
            spreader.last_spread_at_ms = Some(now);
        }
        debug!(parent = target_id, spores = spore_ids.len(), "spores released");
    }

    // Damage
    let profile = get_profile(target.pest.behavior);
    let alarm_mult = (1.0 - target.alarm_level as f64 * ALARM_SPEED_STEP).max(1.0);
    let final_damage = raw_damage * profile.damage_taken_mult * alarm_mult;
    let new_health = target.health - final_damage;

    if new_health <= 0.0 {
        outcome.eliminated = true;
        outcome.score_delta = eliminate(state, target_id);
    } else {
        if let Ok(mut health) = state.world.get::<&mut Health>(entity) {
            health.current = new_health.min(health.current);
        }
        if let Ok(mut alarm) = state.world.get::<&mut Alarm>(entity) {
            alarm.level = (alarm.level + 1).min(MAX_ALARM_LEVEL);
        }
        apply_slow(state, rules, entity, now);
    }

    alert_neighbours(state, target_id, &target.position);

    // Spores are reported as they stand after the alarm spread.
    if spread_due == Some(true) {
        collect_views(state, &spore_ids, &mut outcome);
        state.events.push(EncounterEvent::SporesReleased {
            parent_id: target_id,
            spore_ids,
        });
    }

    // Reinforcement
    if rng.gen::<f64>() < REINFORCEMENT_CHANCE && state.active_pests() < rules.max_active_pests {
        if let Some(pest_id) = call_reinforcement(state, rules, &target, rng) {
            debug!(caller = target_id, pest_id, "reinforcement arrived");
            state.events.push(EncounterEvent::ReinforcementArrived {
                pest_id,
                caller_id: target_id,
            });
            collect_views(state, &[pest_id], &mut outcome);
        }
    }

    outcome
}

/// Copy of the hit pest's state taken before any mutation.
struct HitTarget {
    pest: Pest,
    position: Position,
    health: f64,
    max_health: f64,
    speed: f64,
    damage_per_second: f64,
    alarm_level: u8,
}

fn read_target(state: &EncounterState, entity: Entity) -> Option<HitTarget> {
    let world = &state.world;
    let pest = (*world.get::<&Pest>(entity).ok()?).clone();
    let position = *world.get::<&Position>(entity).ok()?;
    let health = *world.get::<&Health>(entity).ok()?;
    let speed = world.get::<&Mobility>(entity).ok()?.speed;
    let damage_per_second = world.get::<&Attack>(entity).ok()?.damage_per_second;
    let alarm_level = world.get::<&Alarm>(entity).ok()?.level;
    Some(HitTarget {
        pest,
        position,
        health: health.current,
        max_health: health.max,
        speed,
        damage_per_second,
        alarm_level,
    })
}

/// Remove a pest and award its elimination score. Returns the score.
pub fn eliminate(state: &mut EncounterState, pest_id: u32) -> u32 {
    let Some(entity) = state.entity(pest_id) else {
        return 0;
    };
    let Ok(pest) = state.world.get::<&Pest>(entity).map(|p| (*p).clone()) else {
        return 0;
    };
    let score = PEST_KILL_SCORE + get_profile(pest.behavior).kill_bonus;
    state.remove_pest(pest_id);
    state.record_elimination(&pest.type_id, score);
    state.events.push(EncounterEvent::PestEliminated {
        pest_id,
        type_id: pest.type_id,
        score,
    });
    score
}

/// Slow a surviving pest. Re-hitting a slowed pest only refreshes the expiry.
fn apply_slow(state: &mut EncounterState, rules: &EncounterRules, entity: Entity, now: u64) {
    let level = rules.upgrades.slow_effect;
    if level == 0 {
        return;
    }
    let factor = (1.0 - level as f64 * SLOW_STEP).max(SLOW_MIN_FACTOR);
    slow_pest(&mut state.world, entity, factor, now.saturating_add(SLOW_DURATION_MS));
}

/// Slow a pest by `factor` until `until_ms`.
///
/// Overlapping slows keep the stronger factor and the later expiry; the
/// speed is only ever divided by the factor currently applied.
pub fn slow_pest(world: &mut World, entity: Entity, factor: f64, until_ms: u64) {
    let factor = factor.clamp(f64::EPSILON, 1.0);
    let existing = world.get::<&Slowed>(entity).ok().map(|s| *s);
    let Ok(mut mobility) = world.get::<&mut Mobility>(entity) else {
        return;
    };
    let slowed = match existing {
        Some(current) => {
            let stronger = factor.min(current.factor);
            mobility.speed = mobility.speed / current.factor * stronger;
            Slowed {
                until_ms: until_ms.max(current.until_ms),
                factor: stronger,
            }
        }
        None => {
            mobility.speed *= factor;
            Slowed { until_ms, factor }
        }
    };
    drop(mobility);
    let _ = world.insert_one(entity, slowed);
}

/// Raise alarm and speed of every other pest strictly within
/// `ALARM_RADIUS` of the hit, measured in all three axes.
fn alert_neighbours(state: &mut EncounterState, target_id: u32, hit_position: &Position) {
    for (_entity, (pest, position, alarm, mobility)) in state
        .world
        .query_mut::<(&Pest, &Position, &mut Alarm, &mut Mobility)>()
    {
        if pest.id == target_id || position.range_to(hit_position) >= ALARM_RADIUS {
            continue;
        }
        alarm.level = (alarm.level + 1).min(MAX_ALARM_LEVEL);
        alarm.alert_target = Some(*hit_position);
        mobility.speed *= 1.0 + alarm.level as f64 * ALARM_SPEED_STEP;
    }
}

fn release_spores(
    state: &mut EncounterState,
    rules: &EncounterRules,
    parent: &HitTarget,
    rng: &mut impl Rng,
) -> Vec<u32> {
    let now = state.now_ms();
    let mut ids = Vec::with_capacity(SPORES_PER_SPREAD);
    for _ in 0..SPORES_PER_SPREAD {
        let Some(def) = rules.catalog.pest(&parent.pest.type_id) else {
            break;
        };
        let mut position = parent.position;
        position.x += (rng.gen::<f64>() - 0.5) * 2.0;
        position.z += (rng.gen::<f64>() - 0.5) * 2.0;
        let mut spore = PestSpawn::from_def(
            def,
            position,
            parent.max_health * SPORE_HEALTH_FACTOR,
            parent.speed * SPORE_SPEED_FACTOR,
            parent.damage_per_second * SPORE_DAMAGE_FACTOR,
        );
        spore.wander_phase = rng.gen::<f64>();
        spore.last_spread_at_ms = Some(now);
        if let Some(id) = state.insert_pest(spore, rules.max_active_pests) {
            ids.push(id);
        }
    }
    ids
}

fn call_reinforcement(
    state: &mut EncounterState,
    rules: &EncounterRules,
    caller: &HitTarget,
    rng: &mut impl Rng,
) -> Option<u32> {
    let def = rules.catalog.pest(&caller.pest.type_id)?;
    let angle = rng.gen::<f64>() * std::f64::consts::TAU;
    let position = caller.position.offset_on_ground(angle, ALARM_RADIUS + 2.0);
    let mut reinforcement = PestSpawn::from_def(
        def,
        position,
        caller.max_health * REINFORCEMENT_HEALTH_FACTOR,
        caller.speed * REINFORCEMENT_SPEED_FACTOR,
        caller.damage_per_second,
    );
    reinforcement.wander_phase = rng.gen::<f64>();
    reinforcement.alarm = Alarm {
        level: REINFORCEMENT_ALARM_LEVEL,
        alert_target: Some(caller.position),
    };
    if def.behavior == Behavior::Burrowing {
        reinforcement.position.y = UNDERGROUND_HEIGHT;
        reinforcement.emerge_at_ms =
            Some(state.now_ms().saturating_add(BURROW_MIN_MS + (rng.gen::<f64>() * BURROW_JITTER_MS) as u64));
    }
    state.insert_pest(reinforcement, rules.max_active_pests)
}

fn collect_views(state: &EncounterState, ids: &[u32], outcome: &mut HitOutcome) {
    for id in ids {
        if let Some(view) = state.entity(*id).and_then(|e| snapshot::pest_view(&state.world, e)) {
            outcome.spawned.push(view);
        }
    }
}
