//! Adaptive difficulty.
//!
//! Every `DIFFICULTY_SAMPLE_INTERVAL_MS` the player's performance is scored
//! from kill rate, plant survival and score rate. The average of the last
//! `DIFFICULTY_HISTORY_LEN` samples nudges the multipliers up, down, or
//! back toward 1.0. New multipliers only affect pests and bosses spawned
//! afterwards.

use tracing::debug;

use bloomguard_core::constants::*;
use bloomguard_core::events::EncounterEvent;
use bloomguard_core::state::DifficultyMultipliers;

use crate::encounter::EncounterState;

/// Performance score for one sample.
///
/// `kill_rate` and `score_rate` are per elapsed second; `survival` is plant
/// health as a fraction of full.
pub fn performance(kill_rate: f64, survival: f64, score_rate: f64) -> f64 {
    kill_rate * 30.0 + survival * 40.0 + score_rate * 30.0
}

/// Next multipliers given the averaged performance.
pub fn adjust(current: DifficultyMultipliers, average: f64) -> DifficultyMultipliers {
    if average > DIFFICULTY_RAISE_THRESHOLD {
        DifficultyMultipliers {
            pest_health: (current.pest_health + 0.08).min(1.5),
            pest_speed: (current.pest_speed + 0.05).min(1.4),
            pest_spawn_rate: (current.pest_spawn_rate + 0.1).min(1.6),
            power_up_spawn_rate: (current.power_up_spawn_rate - 0.05).max(0.7),
        }
    } else if average < DIFFICULTY_EASE_THRESHOLD {
        DifficultyMultipliers {
            pest_health: (current.pest_health - 0.06).max(0.7),
            pest_speed: (current.pest_speed - 0.04).max(0.8),
            pest_spawn_rate: (current.pest_spawn_rate - 0.08).max(0.6),
            power_up_spawn_rate: (current.power_up_spawn_rate + 0.1).min(1.5),
        }
    } else {
        let relax = |x: f64| x + (1.0 - x) * DIFFICULTY_RELAX_RATE;
        DifficultyMultipliers {
            pest_health: relax(current.pest_health),
            pest_speed: relax(current.pest_speed),
            pest_spawn_rate: relax(current.pest_spawn_rate),
            power_up_spawn_rate: relax(current.power_up_spawn_rate),
        }
    }
}

/// Take a performance sample when one is due and adjust the multipliers.
pub fn run(state: &mut EncounterState) {
    let now = state.now_ms();
    if now.saturating_sub(state.timers.last_difficulty_ms) < DIFFICULTY_SAMPLE_INTERVAL_MS {
        return;
    }
    state.timers.last_difficulty_ms = now;

    let secs = (now / 1000).max(1) as f64;
    let sample = performance(
        state.stats.total_eliminations() as f64 / secs,
        state.plant.health / state.plant.max_health.max(f64::EPSILON),
        state.stats.score as f64 / secs,
    );

    let history = &mut state.difficulty.history;
    history.push_back(sample);
    while history.len() > DIFFICULTY_HISTORY_LEN {
        history.pop_front();
    }
    let average = history.iter().sum::<f64>() / history.len() as f64;

    let current = state.difficulty.multipliers;
    let next = adjust(current, average);
    if next == current {
        return;
    }
    state.difficulty.multipliers = next;
    debug!(sample, average, ?next, "difficulty adjusted");
    state.events.push(EncounterEvent::DifficultyAdjusted {
        pest_health: next.pest_health,
        pest_speed: next.pest_speed,
        pest_spawn_rate: next.pest_spawn_rate,
        power_up_spawn_rate: next.power_up_spawn_rate,
    });
}
