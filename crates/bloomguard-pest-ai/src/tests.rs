#[cfg(test)]
mod tests {
    use bloomguard_core::constants::*;
    use bloomguard_core::enums::Behavior;
    use bloomguard_core::types::Position;

    use crate::fsm::{approach, evaluate, PestContext};
    use crate::profiles::get_profile;

    fn make_context(behavior: Behavior, distance: f64) -> PestContext {
        PestContext {
            behavior,
            position: Position::new(distance, SURFACE_HEIGHT, 0.0),
            target: Position::default(),
            speed: 1.0,
            wander_phase: 0.25,
            emerge_at_ms: None,
            now_ms: 1000,
            delta_ms: 1000,
        }
    }

    #[test]
    fn test_profile_table() {
        let flying = get_profile(Behavior::Flying);
        assert_eq!(flying.speed_mult, 0.7);
        assert_eq!(flying.health_mult, 0.8);
        assert_eq!(flying.kill_bonus, 8);
        assert!(flying.y_offset > 0.0);

        let fast = get_profile(Behavior::Fast);
        assert_eq!((fast.speed_mult, fast.health_mult, fast.kill_bonus), (1.5, 0.7, 6));

        let resistant = get_profile(Behavior::Resistant);
        assert_eq!(resistant.speed_mult, 0.6);
        assert_eq!(resistant.health_mult, 1.8);
        assert_eq!(resistant.kill_bonus, 5);
        assert_eq!(resistant.damage_taken_mult, 0.6);
    }

    /// Only resistant pests shrug off damage; only three tags pay a bonus.
    #[test]
    fn test_profile_defaults() {
        for behavior in Behavior::ALL {
            let p = get_profile(behavior);
            if behavior != Behavior::Resistant {
                assert_eq!(p.damage_taken_mult, 1.0, "{behavior:?}");
            }
            let bonus_expected = matches!(
                behavior,
                Behavior::Flying | Behavior::Fast | Behavior::Resistant
            );
            assert_eq!(p.kill_bonus > 0, bonus_expected, "{behavior:?}");
            assert!(p.speed_mult > 0.0 && p.health_mult > 0.0);
        }
        assert_eq!(get_profile(Behavior::Normal).speed_mult, 1.0);
        assert_eq!(get_profile(Behavior::Burrowing).health_mult, 1.5);
    }

    #[test]
    fn test_approach_moves_toward_target() {
        let update = evaluate(&make_context(Behavior::Normal, 10.0));
        assert!((update.position.x - 9.0).abs() < 1e-10);
        assert_eq!(update.position.y, SURFACE_HEIGHT);
        assert!(!update.emerged);
    }

    #[test]
    fn test_approach_holds_at_range() {
        let mut ctx = make_context(Behavior::Normal, 2.0);
        ctx.speed = 5.0;
        let update = evaluate(&ctx);
        let d = update.position.ground_range_to(&Position::default());
        assert!((d - PEST_HOLD_RANGE).abs() < 1e-10);

        // Already inside hold range: stays put
        let held = approach(
            &Position::new(1.0, 0.0, 0.0),
            &Position::default(),
            5.0,
            1.0,
            PEST_HOLD_RANGE,
        );
        assert_eq!(held, Position::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_flying_holds_altitude() {
        let update = evaluate(&make_context(Behavior::Flying, 10.0));
        assert_eq!(update.position.y, SURFACE_HEIGHT + get_profile(Behavior::Flying).y_offset);
    }

    #[test]
    fn test_zigzag_weaves_off_axis() {
        let update = evaluate(&make_context(Behavior::Zigzag, 10.0));
        assert!(update.position.z.abs() > 1e-6, "zigzag should leave the x axis");
        assert!(update.position.ground_range_to(&Position::default()) < 10.0);
    }

    #[test]
    fn test_jumper_bobs_above_surface() {
        let update = evaluate(&make_context(Behavior::Jumper, 10.0));
        assert!(update.position.y >= SURFACE_HEIGHT);
        assert!(update.position.y <= SURFACE_HEIGHT + JUMP_HEIGHT);
    }

    #[test]
    fn test_burrowed_stays_underground_then_emerges() {
        let mut ctx = make_context(Behavior::Burrowing, 10.0);
        ctx.emerge_at_ms = Some(5000);
        let under = evaluate(&ctx);
        assert_eq!(under.position.y, UNDERGROUND_HEIGHT);
        assert!(!under.emerged);

        ctx.now_ms = 5000;
        let up = evaluate(&ctx);
        assert!(up.emerged);
        assert_eq!(up.position.y, SURFACE_HEIGHT);
    }
}
