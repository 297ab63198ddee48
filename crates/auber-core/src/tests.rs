use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;

use crate::commands::SimCommand;
use crate::components::{Debuffs, Npc};
use crate::config::Tuning;
use crate::constants::*;
use crate::enums::*;
use crate::error::{ConfigError, RecordError};
use crate::record::{EntityRecord, PlayerRecord};
use crate::state::GameStateSnapshot;
use crate::types::{ticks_for_ms, EntityId, Rect, SimTime};

#[test]
fn test_rect_contains_is_edge_inclusive() {
    let rect = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(16.0, 16.0));
    assert!(rect.contains(Vec2::new(10.0, 20.0)));
    assert!(rect.contains(Vec2::new(26.0, 36.0)));
    assert!(rect.contains(Vec2::new(18.0, 28.0)));
    assert!(!rect.contains(Vec2::new(26.01, 30.0)));
    assert!(!rect.contains(Vec2::new(9.99, 30.0)));
}

#[test]
fn test_rect_overlap_excludes_touching_edges() {
    let a = Rect::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
    let touching = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
    let crossing = Rect::new(Vec2::new(9.0, 9.0), Vec2::new(4.0, 4.0));
    assert!(!a.overlaps(&touching));
    assert!(a.overlaps(&crossing));
    assert!(crossing.overlaps(&a));
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    for _ in 0..TICK_RATE {
        time.advance();
    }
    assert_eq!(time.tick, 60);
    assert!((time.elapsed_ms - 1000.0).abs() < 1e-9);
}

#[test]
fn test_ticks_for_ms_rounds_up() {
    assert_eq!(ticks_for_ms(0), 0);
    assert_eq!(ticks_for_ms(1000), 60);
    assert_eq!(ticks_for_ms(5000), 300);
    assert_eq!(ticks_for_ms(2000), 120);
    // 250 ms is 15 ticks exactly; 251 ms needs one more.
    assert_eq!(ticks_for_ms(250), 15);
    assert_eq!(ticks_for_ms(251), 16);
    assert_eq!(ticks_for_ms(u64::MAX), u64::MAX.div_ceil(1000));
}

proptest! {
    #[test]
    fn ticks_for_ms_covers_the_delay(ms in 0u64..10_000_000) {
        let ticks = ticks_for_ms(ms);
        prop_assert!(ticks as f64 * TICK_MS + 1e-6 >= ms as f64);
        if ticks > 0 {
            prop_assert!(((ticks - 1) as f64) * TICK_MS < ms as f64);
        }
    }
}

#[test]
fn test_random_debuff_kind_is_seeded() {
    let mut a = seeded_rng(7);
    let mut b = seeded_rng(7);
    let seq_a: Vec<DebuffKind> = (0..32).map(|_| DebuffKind::random(&mut a)).collect();
    let seq_b: Vec<DebuffKind> = (0..32).map(|_| DebuffKind::random(&mut b)).collect();
    assert_eq!(seq_a, seq_b);
    for kind in DebuffKind::ALL {
        assert!(seq_a.contains(&kind), "{kind:?} never drawn in 32 samples");
    }
}

fn seeded_rng(seed: u64) -> rand::rngs::StdRng {
    rand::rngs::StdRng::seed_from_u64(seed)
}

#[test]
fn test_debuff_generations() {
    let mut debuffs = Debuffs::default();
    assert!(!debuffs.is_active(DebuffKind::Slow));

    debuffs.set(DebuffKind::Slow, true);
    assert!(debuffs.slowed);
    assert!(!debuffs.confused && !debuffs.blinded);

    let first = debuffs.bump(DebuffKind::Slow);
    let second = debuffs.bump(DebuffKind::Slow);
    assert_ne!(first, second);
    assert_eq!(debuffs.generation(DebuffKind::Slow), second);
    assert_eq!(debuffs.generation(DebuffKind::Blind), 0);
}

#[test]
fn test_npc_capabilities() {
    let civilian = Npc::new(NpcKind::Civilian);
    assert!(civilian.has_flee_behavior());
    assert!(!civilian.is_exposed());

    let mut infiltrator = Npc::new(NpcKind::Infiltrator);
    assert!(infiltrator.has_flee_behavior());
    infiltrator.exposed = true;
    assert!(infiltrator.is_exposed());
    assert!(!infiltrator.has_flee_behavior());
}

#[test]
fn test_player_record_format() {
    let record = PlayerRecord {
        base: EntityRecord {
            x: 120.5,
            y: 64.0,
            rotation: -90.0,
        },
        health: 0.9,
        confused: true,
        slowed: false,
        blinded: true,
    };
    assert_eq!(record.to_string(), "120.5,64,-90,0.9,1,0,1");

    let parsed: PlayerRecord = "120.5,64.0,-90.0,0.9,1,0,1".parse().unwrap();
    assert_eq!(parsed, record);
}

#[test]
fn test_player_record_rejects_malformed() {
    assert_eq!(
        "1,2,3".parse::<PlayerRecord>(),
        Err(RecordError::FieldCount {
            expected: 7,
            found: 3
        })
    );
    assert!(matches!(
        "1,2,3,healthy,1,0,0".parse::<PlayerRecord>(),
        Err(RecordError::InvalidNumber {
            field: "health",
            ..
        })
    ));
    assert!(matches!(
        "300,64,0,NaN,0,0,0".parse::<PlayerRecord>(),
        Err(RecordError::InvalidNumber {
            field: "health",
            ..
        })
    ));
    assert!(matches!(
        "inf,64,0,0.5,0,0,0".parse::<PlayerRecord>(),
        Err(RecordError::InvalidNumber { field: "x", .. })
    ));
    assert!(matches!(
        "1,-inf,0,0.5,0,0,0".parse::<PlayerRecord>(),
        Err(RecordError::InvalidNumber { field: "y", .. })
    ));
    // Anything but "1" reads as a cleared flag.
    let lenient: PlayerRecord = "0,0,0,1.0,yes,0,1".parse().unwrap();
    assert!(!lenient.confused);
    assert!(lenient.blinded);
}

#[test]
fn test_player_record_validate_rejects_non_finite() {
    let mut record = PlayerRecord {
        health: 0.5,
        ..PlayerRecord::default()
    };
    assert!(record.validate().is_ok());
    record.base.rotation = f32::NAN;
    assert!(matches!(
        record.validate(),
        Err(RecordError::InvalidNumber {
            field: "rotation",
            ..
        })
    ));
}

#[test]
fn test_tuning_partial_override() {
    let tuning = Tuning::from_json(r#"{ "hearing_radius": 120.0, "legacy_debuff_expiry": true }"#)
        .unwrap();
    assert_eq!(tuning.hearing_radius, 120.0);
    assert!(tuning.legacy_debuff_expiry);
    assert_eq!(tuning.charge_rate, AUBER_CHARGE_RATE);
    assert_eq!(tuning.debuff_time_ms, AUBER_DEBUFF_TIME_MS);
}

#[test]
fn test_tuning_validation() {
    assert!(Tuning::from_json(r#"{ "charge_rate": 1.5 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "blind_offset_ms": 9000 }"#).is_err());
    assert!(Tuning::from_json("not json").is_err());
    assert!(Tuning::from_json(r#"{ "fire_threshold": 0.0 }"#).is_err());
    assert!(matches!(
        Tuning::from_json(r#"{ "ray_time_ms": 18446744073709551615 }"#),
        Err(ConfigError::OutOfRange {
            field: "ray_time_ms",
            ..
        })
    ));
    assert!(Tuning::from_json(r#"{ "stun_duration_ms": 3600001 }"#).is_err());
    assert!(Tuning::from_json(r#"{ "debuff_time_ms": 3600000 }"#).is_ok());
    assert!(Tuning::default().validate().is_ok());
}

#[test]
fn test_blind_is_shorter_than_other_debuffs() {
    let tuning = Tuning::default();
    assert_eq!(tuning.debuff_duration_ms(DebuffKind::Confuse), 5000);
    assert_eq!(tuning.debuff_duration_ms(DebuffKind::Slow), 5000);
    assert_eq!(tuning.debuff_duration_ms(DebuffKind::Blind), 2000);
}

#[test]
fn test_command_serde_is_tagged() {
    let cmd = SimCommand::FireProjectile {
        shooter: EntityId(3),
        target: Vec2::new(1.0, 2.0),
        action: Some(DebuffKind::Blind),
    };
    let json = serde_json::to_string(&cmd).unwrap();
    assert!(json.contains(r#""type":"FireProjectile""#), "{json}");
    let back: SimCommand = serde_json::from_str(&json).unwrap();
    assert_eq!(json, serde_json::to_string(&back).unwrap());
}

#[test]
fn test_snapshot_serde() {
    let snapshot = GameStateSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.time.tick, back.time.tick);
    assert_eq!(snapshot.phase, back.phase);
    assert!(back.player.ray_endpoint.is_none());
    assert!(
        json.len() < 1024,
        "Empty snapshot should be <1KB, was {} bytes",
        json.len()
    );
}
