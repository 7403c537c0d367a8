#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::commands::PlayerCommand;
    use crate::config::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::EncounterEvent;
    use crate::state::{EncounterSnapshot, SessionStats};
    use crate::types::{Position, SimTime};

    /// Verify behaviour tags use their snake_case wire names.
    #[test]
    fn test_behavior_serde() {
        for v in Behavior::ALL {
            let json = serde_json::to_string(&v).unwrap();
            let back: Behavior = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
        assert_eq!(serde_json::to_string(&Behavior::Burrowing).unwrap(), "\"burrowing\"");
    }

    #[test]
    fn test_weather_season_serde() {
        assert_eq!(serde_json::to_string(&Weather::Heatwave).unwrap(), "\"heatwave\"");
        let season: Season = serde_json::from_str("\"autumn\"").unwrap();
        assert_eq!(season, Season::Autumn);
    }

    #[test]
    fn test_season_cycle() {
        let mut season = Season::Spring;
        let mut seen = vec![season];
        for _ in 0..4 {
            season = season.next();
            seen.push(season);
        }
        assert_eq!(
            seen,
            vec![
                Season::Spring,
                Season::Summer,
                Season::Autumn,
                Season::Winter,
                Season::Spring
            ]
        );
    }

    #[test]
    fn test_terminal_phases() {
        assert!(!EncounterPhase::Active.is_terminal());
        assert!(!EncounterPhase::Paused.is_terminal());
        assert!(EncounterPhase::Completed.is_terminal());
        assert!(EncounterPhase::Defeated.is_terminal());
        assert!(EncounterPhase::Abandoned.is_terminal());
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::Hit {
                target_id: 3,
                damage: 30.0,
            },
            PlayerCommand::Spray {
                position: Position::new(1.0, 0.0, -2.0),
            },
            PlayerCommand::CollectPowerUp { power_up_id: 12 },
            PlayerCommand::Pause,
            PlayerCommand::Resume,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(*cmd, back);
        }
        let hit: PlayerCommand =
            serde_json::from_str(r#"{"type":"Hit","target_id":7,"damage":12.5}"#).unwrap();
        assert_eq!(
            hit,
            PlayerCommand::Hit {
                target_id: 7,
                damage: 12.5
            }
        );
    }

    #[test]
    fn test_event_serde() {
        let events = vec![
            EncounterEvent::SporesReleased {
                parent_id: 4,
                spore_ids: vec![9, 10],
            },
            EncounterEvent::ArmorSegmentBroken {
                boss_id: 2,
                remaining: 1,
            },
            EncounterEvent::PowerUpCollected {
                power_up_id: 5,
                kind: PowerUpKind::SlowTime,
            },
            EncounterEvent::PlantLost,
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            assert!(json.contains("\"type\""));
            let back: EncounterEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    /// Verify the default snapshot serializes and stays small.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = EncounterSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: EncounterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time, back.time);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_stats_total_eliminations() {
        let mut stats = SessionStats::default();
        stats.eliminations.insert("aphid".to_string(), 3);
        stats.eliminations.insert("thrip".to_string(), 2);
        assert_eq!(stats.total_eliminations(), 5);
    }

    #[test]
    fn test_position_range() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 12.0, 4.0);
        assert!((a.range_to(&b) - 13.0).abs() < 1e-10);
        assert!((a.ground_range_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_offset_on_ground_keeps_height() {
        let origin = Position::new(1.0, 2.0, 1.0);
        let p = origin.offset_on_ground(std::f64::consts::FRAC_PI_2, 4.0);
        assert!((p.x - 1.0).abs() < 1e-10);
        assert!((p.z - 5.0).abs() < 1e-10);
        assert_eq!(p.y, 2.0);
        assert!((origin.ground_range_to(&p) - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..30 {
            time.advance(100);
        }
        assert_eq!(time.tick, 30);
        assert_eq!(time.elapsed_ms, 3000);
        assert!((time.elapsed_secs() - 3.0).abs() < 1e-10);

        time.advance(u64::MAX);
        assert_eq!(time.elapsed_ms, u64::MAX);
        assert_eq!(time.tick, 31);
    }

    #[test]
    fn test_power_up_durations() {
        assert_eq!(PowerUpKind::Nuke.duration_ms(), 0);
        assert_eq!(PowerUpKind::Health.duration_ms(), 0);
        assert_eq!(PowerUpKind::Freeze.duration_ms(), 5000);
        assert_eq!(PowerUpKind::SlowTime.duration_ms(), 12_000);
        assert_eq!(serde_json::to_string(&PowerUpKind::SlowTime).unwrap(), "\"slow_time\"");
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        catalog.validate().unwrap();
        assert_eq!(catalog.pests.len(), 11);
        assert_eq!(catalog.unlocked_pests(1).len(), 2);
        assert_eq!(catalog.unlocked_pests(100).len(), 11);
        assert_eq!(catalog.boss_for_level(6).unwrap().id, "blight_lord");
        assert!(catalog.boss_for_level(4).is_none());
        assert_eq!(catalog.pest("root_borer").unwrap().behavior, Behavior::Burrowing);
    }

    #[test]
    fn test_catalog_from_json_defaults() {
        let json = r#"{
            "pests": [{
                "id": "mite", "name": "Mite",
                "base_health": 50, "base_speed": 1.0, "base_damage_per_second": 1.0
            }]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        let mite = catalog.pest("mite").unwrap();
        assert_eq!(mite.behavior, Behavior::Normal);
        assert_eq!(mite.size, SizeCategory::Small);
        assert_eq!(mite.unlock_level, 1);
        assert!(catalog.bosses.is_empty());
    }

    #[test]
    fn test_catalog_rejects_empty_and_bad_values() {
        assert!(matches!(
            Catalog::from_json(r#"{"pests": []}"#),
            Err(ConfigError::EmptyCatalog)
        ));
        let bad = r#"{"pests": [{"id": "x", "name": "X", "base_health": 0,
            "base_speed": 1, "base_damage_per_second": 1}]}"#;
        assert!(matches!(
            Catalog::from_json(bad),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_level_config_validation() {
        let catalog = Catalog::builtin();
        LevelConfig::for_level(1).validate(&catalog).unwrap();

        assert!(matches!(
            LevelConfig::for_level(0).validate(&catalog),
            Err(ConfigError::InvalidLevel(0))
        ));

        let mut unknown = LevelConfig::for_level(2);
        unknown.pests.push(PestEntry {
            pest_id: "locust".to_string(),
            health: None,
            speed: None,
            damage: None,
        });
        match unknown.validate(&catalog) {
            Err(ConfigError::UnknownPest { pest_id }) => assert_eq!(pest_id, "locust"),
            other => panic!("expected UnknownPest, got {other:?}"),
        }

        let mut boss = LevelConfig::for_level(3);
        boss.boss = Some(BossDescriptor {
            boss_id: "dragon".to_string(),
            health_multiplier: 1.0,
            speed_multiplier: 1.0,
            damage_multiplier: 1.0,
        });
        assert!(matches!(
            boss.validate(&catalog),
            Err(ConfigError::UnknownBoss { .. })
        ));

        let mut negative = LevelConfig::for_level(1);
        negative.special_conditions.push(SpecialCondition::SpeedBoost { value: -1.0 });
        assert!(matches!(
            negative.validate(&catalog),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_level_config_json() {
        let json = r#"{
            "level": 4,
            "pests": [{"pest_id": "aphid", "health": 12}, {"pest_id": "thrip"}],
            "boss": {"boss_id": "hive_queen"},
            "weather": "rain",
            "special_conditions": [
                {"type": "pest_spawn_boost", "value": 1.5},
                {"type": "plant_stress", "value": 0.8}
            ],
            "rewards": {"base_leaf": 90, "completion_bonus": 45, "perfect_bonus": 27},
            "objectives": [{"type": "survive", "duration_secs": 140}]
        }"#;
        let config = LevelConfig::from_json(json).unwrap();
        assert_eq!(config.pests[0].health, Some(12.0));
        assert_eq!(config.pests[1].speed, None);
        assert_eq!(config.boss.as_ref().unwrap().health_multiplier, 1.0);
        assert_eq!(config.weather, Some(Weather::Rain));
        assert_eq!(config.spawn_boost(), 1.5);
        assert_eq!(config.speed_boost(), 1.0);
        assert_eq!(config.plant_stress(), 0.8);
        assert_eq!(config.survive_duration_ms(), Some(140_000));
        assert!(!config.is_boss_level());
        config.validate(&Catalog::builtin()).unwrap();
    }

    #[test]
    fn test_upgrade_bundle_defaults() {
        let bundle: UpgradeBundle = serde_json::from_str(r#"{"slow_effect": 2}"#).unwrap();
        assert_eq!(bundle.slow_effect, 2);
        assert_eq!(bundle.spray_duration, 1);
        assert_eq!(bundle.area_damage, 0);
        let plant: PlantStats = serde_json::from_str("{}").unwrap();
        assert_eq!(plant, PlantStats::default());
    }
}
