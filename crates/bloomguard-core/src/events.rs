//! Events emitted by the encounter for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Something noteworthy that happened since the previous snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EncounterEvent {
    /// A pest joined the encounter from a spawn batch.
    PestSpawned { pest_id: u32, behavior: Behavior },
    /// A pest was eliminated by a hit or a spray effect.
    PestEliminated {
        pest_id: u32,
        type_id: String,
        score: u32,
    },
    /// A burrowed pest surfaced and can now be targeted.
    PestEmerged { pest_id: u32 },
    /// A spreading pest released spores.
    SporesReleased { parent_id: u32, spore_ids: Vec<u32> },
    /// A hit pest called for backup.
    ReinforcementArrived { pest_id: u32, caller_id: u32 },
    BossSpawned {
        boss_id: u32,
        class: BossClass,
        max_health: f64,
    },
    ArmorSegmentBroken { boss_id: u32, remaining: u32 },
    BossDefeated { boss_id: u32, score: u32 },
    MinionSpawned { pest_id: u32, boss_id: u32 },
    ToxicCloudReleased { cloud_id: u32 },
    PowerUpSpawned { power_up_id: u32, kind: PowerUpKind },
    PowerUpCollected { power_up_id: u32, kind: PowerUpKind },
    /// A timed power-up ran out.
    PowerUpExpired { power_up_id: u32, kind: PowerUpKind },
    /// The adaptive difficulty multipliers moved.
    DifficultyAdjusted {
        pest_health: f64,
        pest_speed: f64,
        pest_spawn_rate: f64,
        power_up_spawn_rate: f64,
    },
    WeatherChanged { weather: Weather },
    PlantGrew { growth_level: f64 },
    LevelCompleted { level: u32 },
    PlantLost,
}
