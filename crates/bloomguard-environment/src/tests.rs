#[cfg(test)]
mod tests {
    use bloomguard_core::config::UpgradeBundle;
    use bloomguard_core::constants::*;
    use bloomguard_core::enums::{Behavior, Season, Weather};
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::modifiers::{resolve_modifiers, weather_effects};
    use crate::resources::{decay_rates, decay_step, PlantResources};
    use crate::weather::*;

    const SEASONS: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];
    const WEATHERS: [Weather; 4] = [Weather::Clear, Weather::Rain, Weather::Wind, Weather::Heatwave];

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn healthy() -> PlantResources {
        PlantResources {
            water: 80.0,
            nutrition: 80.0,
            light_exposure: 70.0,
            growth_level: 1.0,
        }
    }

    #[test]
    fn test_spring_affinity() {
        let aphid = resolve_modifiers(Weather::Clear, Season::Spring, Behavior::Swarm);
        assert!((aphid.spawn_chance - 1.6).abs() < 1e-10);
        assert_eq!(aphid.speed_mult, 1.0);
        let mite = resolve_modifiers(Weather::Clear, Season::Spring, Behavior::Normal);
        assert_eq!(mite.spawn_chance, 1.0);
    }

    #[test]
    fn test_summer_affinity() {
        let flyer = resolve_modifiers(Weather::Clear, Season::Summer, Behavior::Flying);
        assert!((flyer.speed_mult - 1.2).abs() < 1e-10);
        assert!((flyer.spawn_chance - 1.8).abs() < 1e-10);
        assert!((flyer.damage_mult - 1.3).abs() < 1e-10);
        let crawler = resolve_modifiers(Weather::Clear, Season::Summer, Behavior::Resistant);
        assert!((crawler.speed_mult - 1.2).abs() < 1e-10);
        assert_eq!(crawler.damage_mult, 1.0);
    }

    #[test]
    fn test_winter_affinity() {
        let cold = resolve_modifiers(Weather::Clear, Season::Winter, Behavior::Zigzag);
        assert_eq!(cold.speed_mult, 1.0);
        assert!((cold.health_mult - 1.2).abs() < 1e-10);
        assert!((cold.spawn_chance - 1.5).abs() < 1e-10);
        let other = resolve_modifiers(Weather::Clear, Season::Winter, Behavior::Fast);
        assert!((other.speed_mult - 0.7).abs() < 1e-10);
    }

    #[test]
    fn test_autumn_affinity() {
        let spreader = resolve_modifiers(Weather::Clear, Season::Autumn, Behavior::Spreading);
        assert!((spreader.spawn_chance - 2.0).abs() < 1e-10);
        assert!((spreader.damage_mult - 1.4).abs() < 1e-10);
    }

    /// Weather never changes pest modifiers.
    #[test]
    fn test_weather_is_pest_neutral() {
        for season in SEASONS {
            for behavior in Behavior::ALL {
                let base = resolve_modifiers(Weather::Clear, season, behavior);
                for weather in WEATHERS {
                    assert_eq!(resolve_modifiers(weather, season, behavior), base);
                }
            }
        }
    }

    #[test]
    fn test_weather_effect_table() {
        assert_eq!(weather_effects(Weather::Rain).water_mult, 1.8);
        assert_eq!(weather_effects(Weather::Heatwave).growth_mult, 0.6);
    }

    /// Rain produces a net water gain for the interval in every season.
    #[test]
    fn test_rain_refills_water_every_season() {
        let upgrades = UpgradeBundle::default();
        for season in SEASONS {
            let out = decay_step(&healthy(), season, Weather::Rain, 12.0, &upgrades, &mut never());
            assert!(out.water_decay < 0.0);
            assert!(
                out.resources.water > healthy().water,
                "rain should add water in {season:?}"
            );
        }
    }

    #[test]
    fn test_heatwave_and_wind_decay_faster() {
        let upgrades = UpgradeBundle::default();
        let (clear, _) = decay_rates(Season::Autumn, Weather::Clear, &upgrades);
        let (wind, _) = decay_rates(Season::Autumn, Weather::Wind, &upgrades);
        let (heat, _) = decay_rates(Season::Autumn, Weather::Heatwave, &upgrades);
        assert!((clear - 0.085).abs() < 1e-10);
        assert!((wind - 0.16).abs() < 1e-10);
        assert!((heat - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_seasonal_decay_rates() {
        let upgrades = UpgradeBundle::default();
        let (_, spring_n) = decay_rates(Season::Spring, Weather::Clear, &upgrades);
        let (winter_w, winter_n) = decay_rates(Season::Winter, Weather::Clear, &upgrades);
        assert!((spring_n - 0.03).abs() < 1e-10);
        assert!((winter_n - 0.07).abs() < 1e-10);
        assert!((winter_w - 0.13 * 0.85).abs() < 1e-10);
    }

    #[test]
    fn test_efficiency_upgrades_are_capped() {
        let upgrades = UpgradeBundle {
            water_efficiency: 200.0,
            nutrient_efficiency: 50.0,
            ..Default::default()
        };
        let (water, nutrition) = decay_rates(Season::Autumn, Weather::Heatwave, &upgrades);
        assert!((water - 0.25 * 0.25).abs() < 1e-10);
        assert!((nutrition - 0.025).abs() < 1e-10);
    }

    #[test]
    fn test_growth_requires_daylight() {
        let upgrades = UpgradeBundle::default();
        let day = decay_step(&healthy(), Season::Spring, Weather::Clear, 12.0, &upgrades, &mut always());
        assert!(day.grew);
        assert!((day.resources.growth_level - (1.0 + GROWTH_STEP)).abs() < 1e-10);

        let night = decay_step(&healthy(), Season::Spring, Weather::Clear, 22.0, &upgrades, &mut always());
        assert!(!night.grew);

        let dim = PlantResources {
            light_exposure: 50.0,
            ..healthy()
        };
        let shaded = decay_step(&dim, Season::Spring, Weather::Clear, 12.0, &upgrades, &mut always());
        assert!(!shaded.grew);

        let unlucky = decay_step(&healthy(), Season::Spring, Weather::Clear, 12.0, &upgrades, &mut never());
        assert!(!unlucky.grew);
    }

    #[test]
    fn test_growth_caps_at_max() {
        let upgrades = UpgradeBundle::default();
        let grown = PlantResources {
            growth_level: MAX_GROWTH_LEVEL,
            ..healthy()
        };
        let out = decay_step(&grown, Season::Summer, Weather::Clear, 12.0, &upgrades, &mut always());
        assert!(!out.grew);
        assert_eq!(out.resources.growth_level, MAX_GROWTH_LEVEL);
    }

    #[test]
    fn test_starvation_drain() {
        let upgrades = UpgradeBundle::default();
        let thirsty = PlantResources {
            water: 10.0,
            ..healthy()
        };
        let out = decay_step(&thirsty, Season::Autumn, Weather::Clear, 12.0, &upgrades, &mut never());
        assert_eq!(out.health_drain, STARVATION_HEALTH_DRAIN);
        let fine = decay_step(&healthy(), Season::Autumn, Weather::Clear, 12.0, &upgrades, &mut never());
        assert_eq!(fine.health_drain, 0.0);
    }

    #[test]
    fn test_resources_clamped() {
        let upgrades = UpgradeBundle::default();
        let full = PlantResources {
            water: 100.0,
            ..healthy()
        };
        let wet = decay_step(&full, Season::Spring, Weather::Rain, 12.0, &upgrades, &mut never());
        assert_eq!(wet.resources.water, 100.0);

        let dry = PlantResources {
            water: 0.05,
            nutrition: 0.0,
            ..healthy()
        };
        let out = decay_step(&dry, Season::Summer, Weather::Heatwave, 12.0, &upgrades, &mut never());
        assert_eq!(out.resources.water, 0.0);
        assert_eq!(out.resources.nutrition, 0.0);
    }

    #[test]
    fn test_weather_durations_in_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for weather in WEATHERS {
            let (lo, hi) = duration_bounds_ms(weather);
            for _ in 0..50 {
                let d = roll_duration_ms(weather, &mut rng);
                assert!(d >= lo && d <= hi, "{weather:?}: {d}");
            }
        }
        assert_eq!(roll_duration_ms(Weather::Rain, &mut always()), 10_000);
    }

    #[test]
    fn test_roll_weather_uses_pool() {
        assert_eq!(roll_weather(&mut always()), Weather::Clear);
        assert_eq!(roll_weather(&mut never()), Weather::Heatwave);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut seen_rain = false;
        for _ in 0..200 {
            seen_rain |= roll_weather(&mut rng) == Weather::Rain;
        }
        assert!(seen_rain);
    }

    #[test]
    fn test_hour_wraps() {
        assert!((advance_hour(12.0, 10_000, 1.0) - 13.0).abs() < 1e-10);
        assert!((advance_hour(23.5, 10_000, 1.0) - 0.5).abs() < 1e-10);
        assert!((advance_hour(6.0, 10_000, 2.0) - 8.0).abs() < 1e-10);
        assert!(is_daytime(6.0));
        assert!(!is_daytime(18.0));
    }
}
