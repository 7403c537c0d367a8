//! Pest spawn factory.
//!
//! Turns a `PestSpawn` blueprint into a hecs entity with the component
//! bundle its behaviour needs.

use hecs::{Entity, World};

use bloomguard_core::catalog::PestTypeDef;
use bloomguard_core::components::*;
use bloomguard_core::constants::*;
use bloomguard_core::enums::{Behavior, SizeCategory};
use bloomguard_core::types::Position;

/// Everything needed to put one pest into the world.
#[derive(Debug, Clone)]
pub struct PestSpawn {
    pub type_id: String,
    pub name: String,
    pub behavior: Behavior,
    pub size: SizeCategory,
    pub position: Position,
    pub health: f64,
    pub speed: f64,
    pub damage_per_second: f64,
    pub alarm: Alarm,
    pub wander_phase: f64,
    /// Burrowing pests only.
    pub emerge_at_ms: Option<u64>,
    /// Spreading pests only; `None` can release spores on the first hit.
    pub last_spread_at_ms: Option<u64>,
}

impl PestSpawn {
    /// Blueprint with the given final stats and no substate.
    pub fn from_def(def: &PestTypeDef, position: Position, health: f64, speed: f64, damage: f64) -> Self {
        Self {
            type_id: def.id.clone(),
            name: def.name.clone(),
            behavior: def.behavior,
            size: def.size,
            position,
            health: health.max(1.0),
            speed: speed.max(0.0),
            damage_per_second: damage.max(0.0),
            alarm: Alarm::default(),
            wander_phase: 0.0,
            emerge_at_ms: None,
            last_spread_at_ms: None,
        }
    }
}

/// Spawn a pest entity. Behaviour substates are attached as optional
/// components so systems can query for them directly.
pub fn spawn_pest(world: &mut World, id: u32, now_ms: u64, spawn: PestSpawn) -> Entity {
    let behavior = spawn.behavior;
    let entity = world.spawn((
        Pest {
            id,
            type_id: spawn.type_id,
            name: spawn.name,
            behavior,
            size: spawn.size,
            created_at_ms: now_ms,
        },
        spawn.position,
        Health {
            current: spawn.health,
            max: spawn.health,
        },
        Mobility { speed: spawn.speed },
        Attack {
            damage_per_second: spawn.damage_per_second,
        },
        spawn.alarm,
        Wander {
            phase: spawn.wander_phase,
        },
    ));

    match behavior {
        Behavior::Burrowing => {
            if let Some(emerge_at_ms) = spawn.emerge_at_ms {
                let _ = world.insert_one(entity, Burrowed { emerge_at_ms });
            }
        }
        Behavior::Camouflaged => {
            let _ = world.insert_one(
                entity,
                Camouflage {
                    opacity_hint: CAMOUFLAGE_OPACITY,
                    detection_radius: CAMOUFLAGE_DETECTION_RADIUS,
                },
            );
        }
        Behavior::Spreading => {
            let _ = world.insert_one(
                entity,
                Spreader {
                    last_spread_at_ms: spawn.last_spread_at_ms,
                    cooldown_ms: SPREAD_COOLDOWN_MS,
                },
            );
        }
        _ => {}
    }

    entity
}
