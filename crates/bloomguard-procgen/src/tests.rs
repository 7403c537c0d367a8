#[cfg(test)]
mod tests {
    use bloomguard_core::catalog::Catalog;
    use bloomguard_core::config::{Objective, SpecialCondition};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::level::{generate_level, HOUR_CHOICES, MAX_GENERATED_PESTS};

    #[test]
    fn test_generated_level_validates() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for level in 1..=15 {
            let config = generate_level(level, &catalog, &mut rng);
            config.validate(&catalog).unwrap();
            assert_eq!(config.level, level);
        }
    }

    #[test]
    fn test_pest_count_scales_with_level() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(generate_level(1, &catalog, &mut rng).pests.len(), 3);
        assert_eq!(generate_level(4, &catalog, &mut rng).pests.len(), 5);
        assert_eq!(
            generate_level(200, &catalog, &mut rng).pests.len(),
            MAX_GENERATED_PESTS
        );
    }

    #[test]
    fn test_pests_only_from_unlocked_pool() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..20 {
            let config = generate_level(2, &catalog, &mut rng);
            for entry in &config.pests {
                let def = catalog.pest(&entry.pest_id).unwrap();
                assert!(def.unlock_level <= 2);
                let health = entry.health.unwrap();
                let difficulty = 1.15;
                assert!(health >= (def.base_health * difficulty * 0.8).floor());
                assert!(health <= def.base_health * difficulty * 1.2);
                assert_eq!(health, health.floor());
            }
        }
    }

    #[test]
    fn test_boss_only_on_boss_levels() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(generate_level(2, &catalog, &mut rng).boss.is_none());

        let level_three = generate_level(3, &catalog, &mut rng);
        let boss = level_three.boss.expect("level 3 should carry a boss");
        assert_eq!(boss.boss_id, "hive_queen");
        assert_eq!(boss.health_multiplier, 1.0);
        assert!(boss.speed_multiplier >= 1.0 && boss.speed_multiplier <= 1.3);

        let level_twelve = generate_level(12, &catalog, &mut rng);
        let boss = level_twelve.boss.unwrap();
        let appearance = catalog.boss(&boss.boss_id).unwrap().level_appearance;
        let past = (12 - appearance) as f64;
        assert!((boss.health_multiplier - (1.0 + past * 0.25)).abs() < 1e-10);
        assert!((boss.damage_multiplier - (1.0 + past * 0.15)).abs() < 1e-10);
    }

    #[test]
    fn test_rewards_and_objectives() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let config = generate_level(6, &catalog, &mut rng);
        let rewards = config.rewards.unwrap();
        assert_eq!(rewards.base_leaf, 50 + 60 + 200);
        assert_eq!(rewards.completion_bonus, 155);
        assert_eq!(rewards.perfect_bonus, 93);
        assert_eq!(config.survive_duration_ms(), Some(150_000));
        assert!(config.objectives.contains(&Objective::EliminatePests { count: 4 }));
        assert!(config.objectives.contains(&Objective::MaintainHealth { threshold: 50.0 }));
        assert!(HOUR_CHOICES.contains(&config.time_of_day.unwrap()));
        assert!(config.weather.is_some());
    }

    #[test]
    fn test_special_conditions_use_fixed_values() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(77);
        let mut boosts = 0;
        for level in 1..=100 {
            for condition in generate_level(level, &catalog, &mut rng).special_conditions {
                match condition {
                    SpecialCondition::PestSpawnBoost { value } => {
                        boosts += 1;
                        assert_eq!(value, 1.5)
                    }
                    SpecialCondition::SpeedBoost { value } => assert_eq!(value, 1.3),
                    SpecialCondition::PlantStress { value } => assert_eq!(value, 0.8),
                }
            }
        }
        assert!(boosts > 0 && boosts < 100);
    }

    /// Same seed, same level.
    #[test]
    fn test_generation_is_deterministic() {
        let catalog = Catalog::builtin();
        let a = generate_level(7, &catalog, &mut ChaCha8Rng::seed_from_u64(3));
        let b = generate_level(7, &catalog, &mut ChaCha8Rng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_pool_yields_no_entries() {
        let mut catalog = Catalog::builtin();
        for pest in &mut catalog.pests {
            pest.unlock_level = 50;
        }
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let config = generate_level(1, &catalog, &mut rng);
        assert!(config.pests.is_empty());
        assert!(config.objectives.contains(&Objective::EliminatePests { count: 0 }));
    }
}
