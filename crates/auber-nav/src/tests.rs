#[cfg(test)]
mod tests {
    use glam::Vec2;

    use auber_core::components::Movement;
    use auber_core::constants::*;
    use auber_core::enums::NpcPhase;

    use crate::fsm::{evaluate, startle, NpcContext};
    use crate::navigator::{FleePointNavigator, Navigator};

    fn make_context(phase: NpcPhase, center: Vec2, destination: Option<Vec2>) -> NpcContext {
        NpcContext {
            phase,
            center,
            velocity: Vec2::ZERO,
            movement: Movement::npc_baseline(),
            destination,
        }
    }

    #[test]
    fn test_nearest_flee_point() {
        let nav = FleePointNavigator::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(50.0, 200.0),
        ]);
        assert_eq!(nav.nearest_flee_point(Vec2::new(80.0, 10.0)), Some(Vec2::new(100.0, 0.0)));
        assert_eq!(nav.nearest_flee_point(Vec2::new(40.0, 150.0)), Some(Vec2::new(50.0, 200.0)));
        // Equidistant: first listed wins.
        assert_eq!(nav.nearest_flee_point(Vec2::new(50.0, 0.0)), Some(Vec2::ZERO));
        assert_eq!(nav.distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_no_flee_points() {
        let nav = FleePointNavigator::default();
        assert_eq!(nav.nearest_flee_point(Vec2::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_startle_enters_fleeing() {
        let update = startle(NpcPhase::Idle, Vec2::new(10.0, 10.0));
        assert_eq!(update.new_phase, NpcPhase::Fleeing);
        assert_eq!(update.destination, Some(Vec2::new(10.0, 10.0)));
        assert!(update.phase_changed);

        // A second startle just retargets.
        let again = startle(NpcPhase::Fleeing, Vec2::new(0.0, 0.0));
        assert!(!again.phase_changed);
    }

    #[test]
    fn test_fleeing_accelerates_toward_destination() {
        let ctx = make_context(NpcPhase::Fleeing, Vec2::ZERO, Some(Vec2::new(100.0, 0.0)));
        let update = evaluate(&ctx);
        assert_eq!(update.new_phase, NpcPhase::Fleeing);
        assert!((update.new_velocity.x - NPC_SPEED).abs() < 1e-6);
        assert_eq!(update.new_velocity.y, 0.0);
    }

    #[test]
    fn test_fleeing_speed_is_capped() {
        let mut ctx = make_context(NpcPhase::Fleeing, Vec2::ZERO, Some(Vec2::new(0.0, 500.0)));
        for _ in 0..50 {
            let update = evaluate(&ctx);
            ctx.velocity = update.new_velocity;
        }
        assert!(ctx.velocity.length() <= NPC_MAX_SPEED + 1e-5);
        assert!((ctx.velocity.y - NPC_MAX_SPEED).abs() < 1e-4);
    }

    #[test]
    fn test_arrival_returns_to_idle() {
        let dest = Vec2::new(10.0, 10.0);
        let ctx = make_context(NpcPhase::Fleeing, dest + Vec2::new(1.0, 1.0), Some(dest));
        let update = evaluate(&ctx);
        assert_eq!(update.new_phase, NpcPhase::Idle);
        assert!(update.phase_changed);
        assert_eq!(update.new_velocity, Vec2::ZERO);
        assert_eq!(update.destination, None);
    }

    #[test]
    fn test_frozen_npc_does_not_move() {
        let mut ctx = make_context(NpcPhase::Fleeing, Vec2::ZERO, Some(Vec2::new(100.0, 0.0)));
        ctx.velocity = Vec2::new(1.5, 0.0);
        ctx.movement = Movement {
            speed: 0.0,
            max_speed: 0.0,
        };
        let update = evaluate(&ctx);
        assert_eq!(update.new_velocity, Vec2::ZERO);
        assert_eq!(update.new_phase, NpcPhase::Fleeing, "Stun keeps the flee plan");
        assert_eq!(update.destination, Some(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn test_idle_keeps_velocity() {
        let mut ctx = make_context(NpcPhase::Idle, Vec2::ZERO, None);
        ctx.velocity = Vec2::new(2.0, 0.0);
        let update = evaluate(&ctx);
        assert_eq!(update.new_velocity, Vec2::new(2.0, 0.0));
        assert_eq!(update.new_phase, NpcPhase::Idle);
        assert!(!update.phase_changed);
    }
}
