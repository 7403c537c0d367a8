//! ECS components for hecs pest entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::{Behavior, SizeCategory};
use crate::types::Position;

/// Identity of a live pest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pest {
    /// Stable id, unique per session and shared with the boss id space.
    pub id: u32,
    /// Catalog type id (e.g. `"aphid"`).
    pub type_id: String,
    pub name: String,
    pub behavior: Behavior,
    pub size: SizeCategory,
    pub created_at_ms: u64,
}

/// Hit points. Current never exceeds max; the entity is removed at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Movement speed (units/second), already including every multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Mobility {
    pub speed: f64,
}

/// Damage dealt to the plant while in attack range.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Attack {
    pub damage_per_second: f64,
}

/// Acquired aggression from nearby combat.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Alarm {
    /// 0..=MAX_ALARM_LEVEL.
    pub level: u8,
    /// Where the pest was alerted toward, if it has been alerted.
    pub alert_target: Option<Position>,
}

/// Per-pest movement phase so weaving pests don't move in lockstep.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Wander {
    /// 0.0..1.0
    pub phase: f64,
}

/// Pest is underground and cannot be targeted until it emerges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Burrowed {
    pub emerge_at_ms: u64,
}

/// Pest is camouflaged; the renderer draws it faintly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Camouflage {
    pub opacity_hint: f64,
    pub detection_radius: f64,
}

/// Pest releases spores when hit, on a cooldown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Spreader {
    /// None until the first release.
    pub last_spread_at_ms: Option<u64>,
    pub cooldown_ms: u64,
}

/// Temporary slow applied by the slow-effect upgrade or a power-up.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Slowed {
    pub until_ms: u64,
    /// Speed multiplier applied when the slow began; divided out on expiry.
    pub factor: f64,
}
