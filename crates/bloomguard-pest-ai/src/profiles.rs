//! Behaviour-specific profiles.
//!
//! Every per-behaviour number the encounter uses lives in this table.

use bloomguard_core::enums::Behavior;

/// Stat and scoring profile for a behaviour tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BehaviorProfile {
    /// Multiplier on spawn speed.
    pub speed_mult: f64,
    /// Multiplier on spawn health.
    pub health_mult: f64,
    /// Height above the surface the pest travels at.
    pub y_offset: f64,
    /// Added to the base elimination score.
    pub kill_bonus: u32,
    /// Multiplier on incoming hit damage.
    pub damage_taken_mult: f64,
}

/// Get the profile for a behaviour tag.
pub fn get_profile(behavior: Behavior) -> BehaviorProfile {
    let profile = |speed_mult, health_mult| BehaviorProfile {
        speed_mult,
        health_mult,
        y_offset: 0.0,
        kill_bonus: 0,
        damage_taken_mult: 1.0,
    };

    match behavior {
        Behavior::Flying => BehaviorProfile {
            y_offset: 2.0,
            kill_bonus: 8,
            ..profile(0.7, 0.8)
        },
        Behavior::Fast => BehaviorProfile {
            kill_bonus: 6,
            ..profile(1.5, 0.7)
        },
        Behavior::Resistant => BehaviorProfile {
            kill_bonus: 5,
            damage_taken_mult: 0.6,
            ..profile(0.6, 1.8)
        },
        Behavior::Zigzag => profile(1.0, 1.0),
        Behavior::Swarm => profile(0.9, 0.9),
        Behavior::Jumper => profile(1.2, 1.1),
        Behavior::Camouflaged => profile(0.8, 1.3),
        Behavior::Burrowing => profile(0.7, 1.5),
        Behavior::Spreading => profile(0.9, 1.2),
        Behavior::Normal => profile(1.0, 1.0),
    }
}
