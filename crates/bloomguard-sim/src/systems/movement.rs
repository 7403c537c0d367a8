//! Movement system: walks pests and the boss toward the plant and resolves
//! burrow emergence and slow expiry.

use hecs::Entity;

use bloomguard_core::components::*;
use bloomguard_core::constants::BOSS_HOLD_RANGE;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::types::Position;
use bloomguard_pest_ai::fsm::{approach, evaluate, PestContext};

use crate::encounter::EncounterState;

/// Run one tick of movement.
pub fn run(state: &mut EncounterState, delta_ms: u64) {
    expire_slows(state);

    let now = state.now_ms();
    let target = Position::default();

    // Collect updates in a buffer to avoid borrow issues with hecs
    let mut updates: Vec<(Entity, u32, Position, bool)> = Vec::new();
    {
        let mut query = state
            .world
            .query::<(&Pest, &Position, &Mobility, &Wander, Option<&Burrowed>)>();
        for (entity, (pest, position, mobility, wander, burrowed)) in query.iter() {
            let ctx = PestContext {
                behavior: pest.behavior,
                position: *position,
                target,
                speed: mobility.speed,
                wander_phase: wander.phase,
                emerge_at_ms: burrowed.map(|b| b.emerge_at_ms),
                now_ms: now,
                delta_ms,
            };
            let update = evaluate(&ctx);
            updates.push((entity, pest.id, update.position, update.emerged));
        }
    }

    for (entity, pest_id, new_position, emerged) in updates {
        if let Ok(mut position) = state.world.get::<&mut Position>(entity) {
            *position = new_position;
        }
        if emerged && state.world.remove_one::<Burrowed>(entity).is_ok() {
            state.events.push(EncounterEvent::PestEmerged { pest_id });
        }
    }

    if state.boss_active() {
        if let Some(boss) = state.boss.as_mut() {
            let dt = delta_ms as f64 / 1000.0;
            boss.position = approach(&boss.position, &target, boss.speed, dt, BOSS_HOLD_RANGE);
        }
    }
}

/// Restore the speed of pests whose slow has run out.
fn expire_slows(state: &mut EncounterState) {
    let now = state.now_ms();
    let expired: Vec<(Entity, f64)> = state
        .world
        .query::<&Slowed>()
        .iter()
        .filter(|(_, slowed)| now >= slowed.until_ms)
        .map(|(entity, slowed)| (entity, slowed.factor))
        .collect();

    for (entity, factor) in expired {
        if let Ok(mut mobility) = state.world.get::<&mut Mobility>(entity) {
            if factor > 0.0 {
                mobility.speed /= factor;
            }
        }
        let _ = state.world.remove_one::<Slowed>(entity);
    }
}
