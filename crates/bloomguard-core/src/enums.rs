//! Enumeration types used throughout the encounter.

use serde::{Deserialize, Serialize};

/// Pest behaviour tag. Closed set; per-behaviour numbers live in the
/// pest-ai profile table, not in branches scattered through the systems.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    Swarm,
    Fast,
    Resistant,
    Zigzag,
    Flying,
    Jumper,
    Camouflaged,
    Burrowing,
    Spreading,
    #[default]
    Normal,
}

impl Behavior {
    pub const ALL: [Behavior; 10] = [
        Behavior::Swarm,
        Behavior::Fast,
        Behavior::Resistant,
        Behavior::Zigzag,
        Behavior::Flying,
        Behavior::Jumper,
        Behavior::Camouflaged,
        Behavior::Burrowing,
        Behavior::Spreading,
        Behavior::Normal,
    ];
}

/// Visual size class reported to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeCategory {
    Tiny,
    #[default]
    Small,
    Medium,
    Large,
}

/// Current weather.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Wind,
    Heatwave,
}

/// Current season.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    /// The season that follows this one.
    pub fn next(self) -> Season {
        match self {
            Season::Spring => Season::Summer,
            Season::Summer => Season::Autumn,
            Season::Autumn => Season::Winter,
            Season::Winter => Season::Spring,
        }
    }
}

/// Boss archetype. Determines which sub-timers and damage gates apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BossClass {
    /// Armored; damage is gated through discrete segments.
    Colossus,
    /// Periodically spawns minion pests.
    Swarm,
    /// Periodically emits toxic clouds.
    Toxic,
}

/// Boss lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BossPhase {
    #[default]
    Dormant,
    Active,
    Defeated,
}

/// Top-level encounter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    #[default]
    Active,
    Paused,
    /// Level objectives completed (terminal).
    Completed,
    /// Plant health reached zero (terminal).
    Defeated,
    /// Caller ended the session early (terminal).
    Abandoned,
}

impl EncounterPhase {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            EncounterPhase::Completed | EncounterPhase::Defeated | EncounterPhase::Abandoned
        )
    }
}

/// Collectible power-up. Instant kinds act once on collection; timed kinds
/// stay active until their duration runs out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerUpKind {
    /// Clears every pest on the field.
    Nuke,
    /// Restores plant health.
    Health,
    /// Nearly stops every pest for a short while.
    Freeze,
    /// Slows every pest for a longer while.
    SlowTime,
}

impl PowerUpKind {
    /// Kinds that can appear from level 1.
    pub const COMMON: [PowerUpKind; 3] = [PowerUpKind::Health, PowerUpKind::Freeze, PowerUpKind::SlowTime];

    /// How long the effect stays active (ms). Zero for instant kinds.
    pub fn duration_ms(self) -> u64 {
        match self {
            PowerUpKind::Nuke | PowerUpKind::Health => 0,
            PowerUpKind::Freeze => crate::constants::FREEZE_DURATION_MS,
            PowerUpKind::SlowTime => crate::constants::SLOW_TIME_DURATION_MS,
        }
    }
}
