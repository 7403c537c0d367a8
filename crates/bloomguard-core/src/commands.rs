//! Player commands sent from the orchestrator to the engine.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Damage a pest or the boss by id.
    Hit { target_id: u32, damage: f64 },
    /// Leave a spray effect at a position.
    Spray { position: Position },
    /// Pick up a power-up lying on the field.
    CollectPowerUp { power_up_id: u32 },
    /// Pause the encounter.
    Pause,
    /// Resume the encounter.
    Resume,
}
