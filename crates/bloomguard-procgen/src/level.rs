//! Level generator.

use bloomguard_core::catalog::{BossTypeDef, Catalog};
use bloomguard_core::config::*;
use bloomguard_core::constants::LEVEL_HEALTH_STEP;
use bloomguard_core::enums::Weather;
use rand::Rng;
use tracing::{debug, warn};

/// Upper bound on generated pest entries.
pub const MAX_GENERATED_PESTS: usize = 20;

pub const WEATHER_CHOICES: [Weather; 5] = [
    Weather::Clear,
    Weather::Clear,
    Weather::Rain,
    Weather::Wind,
    Weather::Heatwave,
];

pub const HOUR_CHOICES: [f64; 8] = [6.0, 9.0, 12.0, 15.0, 18.0, 21.0, 0.0, 3.0];

/// Generate a level. Levels with no unlocked pests get an empty pest list,
/// which makes the engine fall back to catalog-driven batches.
pub fn generate_level(level: u32, catalog: &Catalog, rng: &mut impl Rng) -> LevelConfig {
    let level = level.max(1);
    let difficulty = 1.0 + (level - 1) as f64 * LEVEL_HEALTH_STEP;
    let boss_level = level % bloomguard_core::constants::BOSS_LEVEL_INTERVAL == 0;

    let pool = catalog.unlocked_pests(level);
    let count = ((3.0 + level as f64 * 0.5) as usize).min(MAX_GENERATED_PESTS);
    let mut pests = Vec::with_capacity(count);
    if pool.is_empty() {
        warn!(level, "no catalog pest unlocked; generated level has no explicit pests");
    } else {
        for _ in 0..count {
            let def = pool[pick(rng, pool.len())];
            let health = (def.base_health * difficulty * rng.gen_range(0.8..1.2)).floor().max(1.0);
            let speed = def.base_speed * difficulty * rng.gen_range(0.9..1.1);
            pests.push(PestEntry {
                pest_id: def.id.clone(),
                health: Some(health),
                speed: Some(speed),
                damage: Some(def.base_damage_per_second * difficulty),
            });
        }
    }

    let boss = if boss_level {
        generate_boss(level, catalog, rng)
    } else {
        None
    };

    let weather = WEATHER_CHOICES[pick(rng, WEATHER_CHOICES.len())];
    let time_of_day = HOUR_CHOICES[pick(rng, HOUR_CHOICES.len())];

    let mut special_conditions = Vec::new();
    if rng.gen::<f64>() < 0.3 {
        special_conditions.push(SpecialCondition::PestSpawnBoost { value: 1.5 });
    }
    if rng.gen::<f64>() < 0.2 {
        special_conditions.push(SpecialCondition::SpeedBoost { value: 1.3 });
    }
    if rng.gen::<f64>() < 0.15 {
        special_conditions.push(SpecialCondition::PlantStress { value: 0.8 });
    }

    let base_leaf = 50 + level * 10 + if boss_level { 200 } else { 0 };
    let rewards = RewardTable {
        base_leaf,
        completion_bonus: base_leaf / 2,
        perfect_bonus: base_leaf * 3 / 10,
    };

    let objectives = vec![
        Objective::Survive {
            duration_secs: 120 + level as u64 * 5,
        },
        Objective::EliminatePests {
            count: (pests.len() as f64 * 0.7) as u32,
        },
        Objective::MaintainHealth { threshold: 50.0 },
    ];

    debug!(
        level,
        pests = pests.len(),
        boss = ?boss.as_ref().map(|b| &b.boss_id),
        ?weather,
        "generated level"
    );

    LevelConfig {
        level,
        pests,
        boss,
        weather: Some(weather),
        time_of_day: Some(time_of_day),
        special_conditions,
        rewards: Some(rewards),
        objectives,
    }
}

fn generate_boss(level: u32, catalog: &Catalog, rng: &mut impl Rng) -> Option<BossDescriptor> {
    let eligible: Vec<&BossTypeDef> = catalog
        .bosses
        .iter()
        .filter(|b| b.level_appearance <= level)
        .collect();
    if eligible.is_empty() {
        warn!(level, "boss level but no catalog boss has appeared yet");
        return None;
    }
    let def = eligible[pick(rng, eligible.len())];
    let levels_past = (level - def.level_appearance) as f64;
    Some(BossDescriptor {
        boss_id: def.id.clone(),
        health_multiplier: 1.0 + levels_past * 0.25,
        speed_multiplier: 1.0 + rng.gen::<f64>() * 0.3,
        damage_multiplier: 1.0 + levels_past * 0.15,
    })
}

fn pick(rng: &mut impl Rng, len: usize) -> usize {
    ((rng.gen::<f64>() * len as f64) as usize).min(len - 1)
}
