//! Plant resource decay, growth and starvation.
//!
//! Runs once per `RESOURCE_DECAY_INTERVAL_MS`. Rain turns water decay into
//! a net gain; heatwave and wind make it worse.

use bloomguard_core::config::UpgradeBundle;
use bloomguard_core::constants::*;
use bloomguard_core::enums::{Season, Weather};
use rand::Rng;

use crate::modifiers::weather_effects;
use crate::weather::is_daytime;

/// Plant resource levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlantResources {
    pub water: f64,
    pub nutrition: f64,
    pub light_exposure: f64,
    pub growth_level: f64,
}

/// Result of one decay interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecayOutcome {
    pub resources: PlantResources,
    /// Amount removed from water this interval (negative = gain).
    pub water_decay: f64,
    pub nutrition_decay: f64,
    pub grew: bool,
    /// Health the plant loses to starvation this interval.
    pub health_drain: f64,
}

/// Water and nutrition decay for one interval, before clamping.
pub fn decay_rates(season: Season, weather: Weather, upgrades: &UpgradeBundle) -> (f64, f64) {
    let mut water = 0.1;
    let mut nutrition = 0.05;
    match season {
        Season::Summer => water += 0.05,
        Season::Winter => {
            water += 0.03;
            nutrition += 0.02;
        }
        Season::Spring => nutrition -= 0.02,
        Season::Autumn => {}
    }

    water *= weather_effects(weather).water_mult;
    match weather {
        Weather::Rain => water = -0.5,
        Weather::Heatwave => water = 0.25,
        Weather::Wind => water += 0.08,
        Weather::Clear => {}
    }

    if water > 0.0 {
        water *= 1.0 - upgrades.water_efficiency.min(EFFICIENCY_BONUS_CAP) / 100.0;
    }
    if nutrition > 0.0 {
        nutrition *= 1.0 - upgrades.nutrient_efficiency.min(EFFICIENCY_BONUS_CAP) / 100.0;
    }
    (water, nutrition)
}

/// Chance of a growth step this interval, before the daytime/resource gate.
pub fn growth_chance(season: Season, weather: Weather, upgrades: &UpgradeBundle) -> f64 {
    let seasonal = match season {
        Season::Spring => 0.01,
        Season::Summer => 0.005,
        Season::Winter => -0.01,
        Season::Autumn => 0.0,
    };
    (0.02 + seasonal) * weather_effects(weather).growth_mult * (1.0 + upgrades.light_efficiency / 100.0)
}

/// Run one decay interval.
pub fn decay_step(
    current: &PlantResources,
    season: Season,
    weather: Weather,
    hour: f64,
    upgrades: &UpgradeBundle,
    rng: &mut impl Rng,
) -> DecayOutcome {
    let (water_decay, nutrition_decay) = decay_rates(season, weather, upgrades);

    let starving = current.water < STARVATION_THRESHOLD || current.nutrition < STARVATION_THRESHOLD;
    let can_grow = is_daytime(hour) && current.light_exposure > 60.0 && current.water > 30.0;

    let mut resources = PlantResources {
        water: (current.water - water_decay).clamp(0.0, 100.0),
        nutrition: (current.nutrition - nutrition_decay).clamp(0.0, 100.0),
        ..*current
    };

    let mut grew = false;
    if can_grow
        && resources.growth_level < MAX_GROWTH_LEVEL
        && rng.gen::<f64>() < growth_chance(season, weather, upgrades)
    {
        resources.growth_level = (resources.growth_level + GROWTH_STEP).min(MAX_GROWTH_LEVEL);
        grew = true;
    }

    DecayOutcome {
        resources,
        water_decay,
        nutrition_decay,
        grew,
        health_drain: if starving { STARVATION_HEALTH_DRAIN } else { 0.0 },
    }
}
