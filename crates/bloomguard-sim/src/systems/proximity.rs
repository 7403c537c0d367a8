//! Continuous plant damage from pests and the boss in attack range, and
//! from live toxic clouds.

use bloomguard_core::components::{Attack, Burrowed, Pest};
use bloomguard_core::constants::*;
use bloomguard_core::types::Position;

use crate::encounter::{EncounterRules, EncounterState};

/// Damage the plant for `delta_ms` of exposure. Returns the damage dealt.
pub fn run(state: &mut EncounterState, rules: &EncounterRules, delta_ms: u64) -> f64 {
    let secs = delta_ms as f64 / 1000.0;
    let plant = Position::default();

    let mut raw = 0.0;
    for (_entity, (_pest, position, attack, burrowed)) in state
        .world
        .query::<(&Pest, &Position, &Attack, Option<&Burrowed>)>()
        .iter()
    {
        if burrowed.is_none() && position.ground_range_to(&plant) <= PEST_ATTACK_RANGE {
            raw += attack.damage_per_second * secs;
        }
    }

    if let Some(boss) = state.boss.as_ref().filter(|_| state.boss_active()) {
        if boss.position.ground_range_to(&plant) <= BOSS_ATTACK_RANGE {
            raw += boss.damage_per_second * secs;
        }
    }

    let pulses = delta_ms as f64 / DAMAGE_PULSE_MS;
    for cloud in &state.clouds {
        raw += cloud.damage * TOXIC_CLOUD_PLANT_FACTOR * pulses;
    }

    let dealt = raw * rules.plant_damage_factor();
    state.damage_plant(dealt);
    dealt
}
