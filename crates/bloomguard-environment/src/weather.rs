//! Weather cycling and the day/night clock.

use bloomguard_core::constants::HOURS_PER_SECOND;
use bloomguard_core::enums::Weather;
use rand::Rng;

/// Clear weather is twice as likely as any other.
pub const WEATHER_POOL: [Weather; 5] = [
    Weather::Clear,
    Weather::Clear,
    Weather::Rain,
    Weather::Wind,
    Weather::Heatwave,
];

/// Inclusive duration bounds (ms) for a weather.
pub fn duration_bounds_ms(weather: Weather) -> (u64, u64) {
    match weather {
        Weather::Clear => (15_000, 30_000),
        Weather::Rain => (10_000, 20_000),
        Weather::Wind => (8_000, 15_000),
        Weather::Heatwave => (12_000, 25_000),
    }
}

/// Random duration for a weather, within its bounds.
pub fn roll_duration_ms(weather: Weather, rng: &mut impl Rng) -> u64 {
    let (lo, hi) = duration_bounds_ms(weather);
    let span = (hi - lo) as f64 * rng.gen::<f64>();
    (lo + span as u64).min(hi)
}

/// Draw the next weather from the pool.
pub fn roll_weather(rng: &mut impl Rng) -> Weather {
    let idx = ((rng.gen::<f64>() * WEATHER_POOL.len() as f64) as usize).min(WEATHER_POOL.len() - 1);
    WEATHER_POOL[idx]
}

/// Advance the hour of day by `delta_ms`, wrapping at 24.
pub fn advance_hour(hour: f64, delta_ms: u64, cycle_speed: f64) -> f64 {
    let hours = delta_ms as f64 / 1000.0 * HOURS_PER_SECOND * cycle_speed;
    (hour + hours).rem_euclid(24.0)
}

/// Plants only grow between 06:00 and 18:00.
pub fn is_daytime(hour: f64) -> bool {
    (6.0..18.0).contains(&hour)
}
