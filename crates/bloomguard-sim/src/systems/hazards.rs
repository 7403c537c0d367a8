//! Toxic clouds and spray effects: creation, expiry, damage-over-time and
//! spray ammo.

use tracing::debug;

use bloomguard_core::components::{Burrowed, Health, Pest};
use bloomguard_core::constants::*;
use bloomguard_core::types::Position;

use crate::encounter::{EncounterRules, EncounterState, SprayEffect};
use crate::systems::combat;

/// Prune expired clouds and sprays.
pub fn expire(state: &mut EncounterState) {
    let now = state.now_ms();
    state
        .clouds
        .retain(|c| now.saturating_sub(c.created_at_ms) < TOXIC_CLOUD_LIFETIME_MS);
    state.sprays.retain(|s| now < s.expires_at_ms);
}

/// How long a spray lasts with the given duration upgrade.
pub fn spray_lifetime_ms(spray_duration: u32) -> u64 {
    SPRAY_BASE_LIFETIME_MS + spray_duration as u64 * SPRAY_LIFETIME_PER_LEVEL_MS
}

/// Leave a spray effect. Returns `None` when out of ammo.
pub fn spray(state: &mut EncounterState, rules: &EncounterRules, position: Position) -> Option<u32> {
    if state.spray_ammo <= 0.0 {
        return None;
    }
    state.spray_ammo = (state.spray_ammo - SPRAY_AMMO_COST).max(0.0);

    let now = state.now_ms();
    let id = state.allocate_effect_id();
    let area = rules.upgrades.area_damage;
    state.sprays.push(SprayEffect {
        id,
        position,
        created_at_ms: now,
        expires_at_ms: now.saturating_add(spray_lifetime_ms(rules.upgrades.spray_duration)),
        area_damage: (area > 0).then(|| area as f64 * SPRAY_AREA_DAMAGE_STEP),
    });
    Some(id)
}

/// Refill ammo for every whole refill period elapsed since the last one.
pub fn refill_ammo(state: &mut EncounterState, rules: &EncounterRules) {
    let level = rules.upgrades.refill_speed.max(1) as u64 - 1;
    let interval = 200u64.saturating_sub(level * 15).max(50);
    let amount = 1.0 + level as f64 * 0.3;

    let periods = state.now_ms().saturating_sub(state.timers.last_refill_ms) / interval;
    if periods == 0 {
        return;
    }
    state.timers.last_refill_ms += periods * interval;
    state.spray_ammo = (state.spray_ammo + periods as f64 * amount).min(SPRAY_AMMO_MAX);
}

/// Area damage from sprays to surfaced pests in range, scaled by `delta_ms`.
pub fn apply_spray_damage(state: &mut EncounterState, delta_ms: u64) {
    let pulses = delta_ms as f64 / DAMAGE_PULSE_MS;
    let damaging: Vec<(Position, f64)> = state
        .sprays
        .iter()
        .filter_map(|s| s.area_damage.map(|d| (s.position, d * pulses)))
        .collect();
    if damaging.is_empty() {
        return;
    }

    let mut killed = Vec::new();
    for (_entity, (pest, position, health, burrowed)) in state
        .world
        .query_mut::<(&Pest, &Position, &mut Health, Option<&Burrowed>)>()
    {
        if burrowed.is_some() {
            continue;
        }
        for (spray_position, damage) in &damaging {
            if position.ground_range_to(spray_position) <= SPRAY_EFFECT_RADIUS {
                health.current = (health.current - damage).max(0.0);
            }
        }
        if health.current <= 0.0 {
            killed.push(pest.id);
        }
    }

    for pest_id in killed {
        let score = combat::eliminate(state, pest_id);
        debug!(pest_id, score, "pest eliminated by spray");
    }
}
