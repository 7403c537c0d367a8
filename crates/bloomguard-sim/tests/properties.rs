use bloomguard_core::catalog::{BossTypeDef, Catalog, PestTypeDef};
use bloomguard_core::config::LevelConfig;
use bloomguard_core::constants::MAX_ALARM_LEVEL;
use bloomguard_core::enums::{Behavior, BossClass, Season, SizeCategory, Weather};
use bloomguard_core::state::DifficultyMultipliers;
use bloomguard_environment::modifiers::resolve_modifiers;
use bloomguard_sim::systems::difficulty::adjust;
use bloomguard_sim::{SimConfig, SimulationEngine};
use proptest::prelude::*;

fn arb_behavior() -> impl Strategy<Value = Behavior> {
    prop::sample::select(Behavior::ALL.to_vec())
}

fn arb_season() -> impl Strategy<Value = Season> {
    prop::sample::select(vec![Season::Spring, Season::Summer, Season::Autumn, Season::Winter])
}

fn arb_weather() -> impl Strategy<Value = Weather> {
    prop::sample::select(vec![Weather::Clear, Weather::Rain, Weather::Wind, Weather::Heatwave])
}

fn calm(seed: u64) -> SimConfig {
    SimConfig {
        seed,
        dynamic_weather: false,
        ..Default::default()
    }
}

fn armored_catalog(health: f64, segments: u32) -> Catalog {
    Catalog {
        pests: vec![PestTypeDef {
            id: "mite".to_string(),
            name: "Mite".to_string(),
            base_health: 50.0,
            base_speed: 0.0,
            base_damage_per_second: 0.0,
            size: SizeCategory::Tiny,
            behavior: Behavior::Normal,
            unlock_level: 1,
        }],
        bosses: vec![BossTypeDef {
            id: "shell_beetle".to_string(),
            name: "Shell Beetle".to_string(),
            class: BossClass::Colossus,
            base_health: health,
            speed: 0.0,
            damage_per_second: 0.0,
            armor_segments: segments,
            level_appearance: 3,
            toxic_cloud_damage: 1.0,
        }],
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_hits_never_raise_health_or_alarm_past_cap(
        seed in any::<u64>(),
        damages in prop::collection::vec(-50.0f64..120.0, 1..12)
    ) {
        let mut engine = SimulationEngine::new(calm(seed), LevelConfig::for_level(2), Catalog::builtin()).unwrap();
        let Some(target) = engine.state().index.keys().next().copied() else {
            return Ok(());
        };
        let mut last_health = f64::INFINITY;

        for damage in damages {
            engine.apply_hit(target, damage);
            let snap = engine.tick(0).unwrap();
            for pest in &snap.pests {
                prop_assert!(pest.alarm_level <= MAX_ALARM_LEVEL, "alarm {} over cap", pest.alarm_level);
                prop_assert!(pest.health <= pest.max_health);
            }
            match snap.pests.iter().find(|p| p.id == target) {
                Some(pest) => {
                    prop_assert!(pest.health <= last_health, "health rose from {} to {}", last_health, pest.health);
                    last_health = pest.health;
                }
                None => break,
            }
        }
    }

    #[test]
    fn test_active_pests_never_exceed_cap(
        seed in any::<u64>(),
        cap in 1usize..6,
        level in 1u32..9,
        steps in 5usize..40
    ) {
        let config = SimConfig {
            max_active_pests: cap,
            ..calm(seed)
        };
        let mut engine = SimulationEngine::new(config, LevelConfig::for_level(level), Catalog::builtin()).unwrap();
        prop_assert!(engine.state().active_pests() <= cap);

        for _ in 0..steps {
            let ids: Vec<u32> = engine.state().index.keys().copied().collect();
            for id in ids {
                let outcome = engine.apply_hit(id, 5.0);
                prop_assert!(engine.state().active_pests() <= cap, "{} outcome spawned past cap {}", outcome.spawned.len(), cap);
            }
            if engine.tick(500).is_err() {
                break;
            }
            prop_assert!(engine.state().active_pests() <= cap);
        }
    }

    #[test]
    fn test_armor_breaks_at_most_one_segment_per_hit(
        health in 50.0f64..2000.0,
        segments in 1u32..6,
        hits in prop::collection::vec(0.0f64..5000.0, 1..20)
    ) {
        let mut engine = SimulationEngine::new(
            calm(1),
            LevelConfig::for_level(3),
            armored_catalog(health, segments),
        )
        .unwrap();
        let boss_id = engine.tick(16).unwrap().boss.unwrap().id;
        let mut armor = segments;

        for damage in hits {
            engine.apply_hit(boss_id, damage);
            match engine.state().boss.as_ref() {
                Some(boss) => {
                    prop_assert!(armor - boss.armor_segments <= 1, "armor fell from {} to {}", armor, boss.armor_segments);
                    armor = boss.armor_segments;
                }
                None => break,
            }
        }
    }

    #[test]
    fn test_resolve_modifiers_is_pure_and_weather_neutral(
        weather in arb_weather(),
        other in arb_weather(),
        season in arb_season(),
        behavior in arb_behavior()
    ) {
        let first = resolve_modifiers(weather, season, behavior);
        prop_assert_eq!(first, resolve_modifiers(weather, season, behavior));
        prop_assert_eq!(first, resolve_modifiers(other, season, behavior));
        prop_assert!(first.speed_mult > 0.0 && first.health_mult > 0.0);
        prop_assert!(first.damage_mult > 0.0 && first.spawn_chance > 0.0);
    }

    #[test]
    fn test_difficulty_stays_within_bounds(averages in prop::collection::vec(0.0f64..200.0, 1..60)) {
        let mut multipliers = DifficultyMultipliers::default();
        for average in averages {
            multipliers = adjust(multipliers, average);
            prop_assert!((0.7..=1.5).contains(&multipliers.pest_health), "{:?}", multipliers);
            prop_assert!((0.8..=1.4).contains(&multipliers.pest_speed), "{:?}", multipliers);
            prop_assert!((0.6..=1.6).contains(&multipliers.pest_spawn_rate), "{:?}", multipliers);
            prop_assert!((0.7..=1.5).contains(&multipliers.power_up_spawn_rate), "{:?}", multipliers);
        }
    }
}
