//! Environment system: day/night clock, weather changes and the plant
//! resource decay interval.

use rand::Rng;
use tracing::debug;

use bloomguard_core::constants::{MAX_DECAY_STEPS_PER_TICK, RESOURCE_DECAY_INTERVAL_MS};
use bloomguard_core::events::EncounterEvent;
use bloomguard_environment::resources::decay_step;
use bloomguard_environment::weather::{advance_hour, roll_duration_ms, roll_weather};

use crate::encounter::{EncounterRules, EncounterState};

pub fn run(state: &mut EncounterState, rules: &EncounterRules, delta_ms: u64, rng: &mut impl Rng) {
    let now = state.now_ms();
    let env = &mut state.environment;
    env.hour = advance_hour(env.hour, delta_ms, rules.day_cycle_speed);

    if rules.dynamic_weather && now >= env.weather_expires_at_ms {
        let previous = env.weather;
        env.weather = roll_weather(rng);
        env.weather_expires_at_ms = now.saturating_add(roll_duration_ms(env.weather, rng));
        if env.weather != previous {
            debug!(weather = ?env.weather, until_ms = env.weather_expires_at_ms, "weather changed");
            state.events.push(EncounterEvent::WeatherChanged {
                weather: state.environment.weather,
            });
        }
    }

    // A long tick runs at most MAX_DECAY_STEPS_PER_TICK decay steps; the
    // rest of the backlog is skipped.
    let due = now.saturating_sub(state.timers.last_decay_ms) / RESOURCE_DECAY_INTERVAL_MS;
    state.timers.last_decay_ms += due * RESOURCE_DECAY_INTERVAL_MS;
    for _ in 0..due.min(MAX_DECAY_STEPS_PER_TICK) {
        let env = &state.environment;
        let outcome = decay_step(
            &state.plant.resources,
            env.season,
            env.weather,
            env.hour,
            &rules.upgrades,
            rng,
        );
        state.plant.resources = outcome.resources;
        state.damage_plant(outcome.health_drain);
        if outcome.grew {
            state.events.push(EncounterEvent::PlantGrew {
                growth_level: outcome.resources.growth_level,
            });
        }
    }
}
