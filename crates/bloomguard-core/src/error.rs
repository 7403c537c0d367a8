//! Error types surfaced to the engine's caller.
//!
//! Only configuration problems and ticking a finished session are errors.
//! Out-of-range numbers inside a running encounter are clamped instead.

use thiserror::Error;

use crate::enums::EncounterPhase;

/// Session construction failures. The session does not start.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("level number must be at least 1, got {0}")]
    InvalidLevel(u32),

    #[error("catalog contains no pest types")]
    EmptyCatalog,

    #[error("level references unknown pest `{pest_id}`")]
    UnknownPest { pest_id: String },

    #[error("level references unknown boss `{boss_id}`")]
    UnknownBoss { boss_id: String },

    #[error("invalid value for {field}: {value}")]
    InvalidValue { field: String, value: f64 },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Returned by `tick` once the encounter can no longer advance.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickError {
    #[error("session is over ({outcome:?}); start a new session to continue")]
    SessionOver { outcome: EncounterPhase },
}
