//! Pest movement finite state machine.
//!
//! Pure functions that compute the next position and substate transitions
//! for one pest per tick. No ECS dependency; operates on plain data.

use bloomguard_core::constants::*;
use bloomguard_core::enums::Behavior;
use bloomguard_core::types::Position;

use crate::profiles::get_profile;

/// Input to the movement FSM for a single pest.
pub struct PestContext {
    pub behavior: Behavior,
    pub position: Position,
    pub target: Position,
    /// Current speed (units/second).
    pub speed: f64,
    /// Per-pest phase offset in 0.0..1.0.
    pub wander_phase: f64,
    /// When a burrowed pest surfaces. `None` when above ground.
    pub emerge_at_ms: Option<u64>,
    pub now_ms: u64,
    pub delta_ms: u64,
}

/// Output from the movement FSM.
pub struct PestUpdate {
    pub position: Position,
    /// The pest surfaced on this tick.
    pub emerged: bool,
}

/// Evaluate one tick of movement for one pest.
pub fn evaluate(ctx: &PestContext) -> PestUpdate {
    let dt = ctx.delta_ms as f64 / 1000.0;
    let t = ctx.now_ms as f64 / 1000.0;
    let phase = ctx.wander_phase * std::f64::consts::TAU;

    let still_underground = ctx.emerge_at_ms.is_some_and(|at| ctx.now_ms < at);
    let emerged = ctx.emerge_at_ms.is_some() && !still_underground;

    let mut position = approach(&ctx.position, &ctx.target, ctx.speed, dt, PEST_HOLD_RANGE);

    if ctx.behavior == Behavior::Zigzag && ctx.position.ground_range_to(&ctx.target) > PEST_HOLD_RANGE {
        position = weave(&position, &ctx.target, ctx.speed * dt, t, phase);
    }

    position.y = if still_underground {
        UNDERGROUND_HEIGHT
    } else {
        surface_height(ctx.behavior, t, phase)
    };

    PestUpdate { position, emerged }
}

/// Step `from` toward `target` on the ground plane by at most `speed * dt`,
/// never closer than `hold_range`. Height is left unchanged.
pub fn approach(from: &Position, target: &Position, speed: f64, dt: f64, hold_range: f64) -> Position {
    let distance = from.ground_range_to(target);
    if distance <= hold_range || distance < 1e-9 {
        return *from;
    }
    let step = (speed.max(0.0) * dt).min(distance - hold_range);
    let ux = (target.x - from.x) / distance;
    let uz = (target.z - from.z) / distance;
    Position::new(from.x + ux * step, from.y, from.z + uz * step)
}

/// Lateral sine weave perpendicular to the bearing toward the target.
fn weave(position: &Position, target: &Position, step: f64, t: f64, phase: f64) -> Position {
    let distance = position.ground_range_to(target);
    if distance < 1e-9 {
        return *position;
    }
    let ux = (target.x - position.x) / distance;
    let uz = (target.z - position.z) / distance;
    let lateral = (t * ZIGZAG_FREQUENCY + phase).sin() * step * ZIGZAG_WEAVE_FACTOR;
    Position::new(position.x - uz * lateral, position.y, position.z + ux * lateral)
}

/// Travel height for a surfaced pest.
fn surface_height(behavior: Behavior, t: f64, phase: f64) -> f64 {
    let profile = get_profile(behavior);
    match behavior {
        Behavior::Jumper => SURFACE_HEIGHT + (t * JUMP_FREQUENCY + phase).sin().abs() * JUMP_HEIGHT,
        _ => SURFACE_HEIGHT + profile.y_offset,
    }
}
