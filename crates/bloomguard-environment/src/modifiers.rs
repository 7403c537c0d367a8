//! Pure weather/season modifier resolution.

use bloomguard_core::enums::{Behavior, Season, Weather};

/// Multipliers applied to a pest spawned under the current environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PestModifiers {
    pub speed_mult: f64,
    pub health_mult: f64,
    pub damage_mult: f64,
    /// Probability a candidate is accepted. Values above 1.0 always pass.
    pub spawn_chance: f64,
}

impl Default for PestModifiers {
    fn default() -> Self {
        Self {
            speed_mult: 1.0,
            health_mult: 1.0,
            damage_mult: 1.0,
            spawn_chance: 1.0,
        }
    }
}

/// Resolve the modifiers for one behaviour tag.
///
/// Weather is accepted for symmetry with the resource model but contributes
/// nothing here; rain, wind and heatwave only act on plant resources.
pub fn resolve_modifiers(_weather: Weather, season: Season, behavior: Behavior) -> PestModifiers {
    let mut m = PestModifiers::default();

    match season {
        Season::Spring => {
            if matches!(behavior, Behavior::Swarm | Behavior::Fast) {
                m.spawn_chance *= 1.6;
            }
        }
        Season::Summer => {
            m.speed_mult *= 1.2;
            if matches!(behavior, Behavior::Jumper | Behavior::Flying) {
                m.spawn_chance *= 1.8;
                m.damage_mult *= 1.3;
            }
        }
        Season::Winter => {
            if behavior == Behavior::Zigzag {
                m.spawn_chance *= 1.5;
                m.health_mult *= 1.2;
            } else {
                m.speed_mult *= 0.7;
            }
        }
        Season::Autumn => {
            if behavior == Behavior::Spreading {
                m.spawn_chance *= 2.0;
                m.damage_mult *= 1.4;
            }
        }
    }

    m
}

/// Weather multipliers on plant resources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherEffects {
    /// Multiplier on water decay.
    pub water_mult: f64,
    /// Multiplier on growth chance.
    pub growth_mult: f64,
}

pub fn weather_effects(weather: Weather) -> WeatherEffects {
    let (water_mult, growth_mult) = match weather {
        Weather::Clear => (0.85, 1.1),
        Weather::Rain => (1.8, 1.2),
        Weather::Wind => (0.8, 1.0),
        Weather::Heatwave => (0.5, 0.6),
    };
    WeatherEffects {
        water_mult,
        growth_mult,
    }
}
