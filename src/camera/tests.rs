use super::*;
use crate::movement::CameraReactor;

const DT: f32 = 0.02;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_tween_reaches_target_after_duration() {
    let mut tween = Tween::settled(1.0);
    tween.restart(0.25, 0.35);
    assert!(tween.in_flight());

    for _ in 0..17 {
        tween.advance(DT);
    }
    assert!(tween.in_flight());
    assert!(tween.value() > 0.25 && tween.value() < 1.0);

    tween.advance(DT);
    assert!(!tween.in_flight());
    assert_eq!(tween.value(), 0.25);
}

#[test]
fn test_restart_overrides_in_flight_tween() {
    let mut tween = Tween::settled(0.0);
    tween.restart(180.0, 0.5);
    for _ in 0..5 {
        tween.advance(DT);
    }
    let midway = tween.value();
    assert!(close(midway, 36.0));

    // Turning back starts from where the first blend got to.
    tween.restart(0.0, 0.5);
    assert!(close(tween.value(), midway));
    assert_eq!(tween.target(), 0.0);

    for _ in 0..30 {
        tween.advance(DT);
    }
    assert!(!tween.in_flight());
    assert_eq!(tween.value(), 0.0);
}

#[test]
fn test_zero_duration_tween_snaps() {
    let mut tween = Tween::settled(2.0);
    tween.restart(5.0, 0.0);
    assert!(!tween.in_flight());
    assert_eq!(tween.value(), 5.0);
}

#[test]
fn test_turn_swings_look_ahead() {
    let mut rig = CameraRig::default();
    assert!(close(rig.look_ahead_offset(), 3.0));

    rig.trigger_turn(false);
    for _ in 0..30 {
        rig.advance(DT);
    }
    assert!(close(rig.yaw_degrees(), 180.0));
    assert!(close(rig.look_ahead_offset(), -3.0));
}

#[test]
fn test_falling_damping_latches_until_cleared() {
    let mut rig = CameraRig::default();
    assert_eq!(rig.fall_speed_threshold(), -15.0);
    assert!(!rig.is_falling_latched());

    rig.set_falling_damping(true);
    assert!(rig.is_falling_latched());
    assert!(rig.is_damping_in_flight());

    for _ in 0..20 {
        rig.advance(DT);
    }
    assert!(!rig.is_damping_in_flight());
    assert!(close(rig.y_damping(), 0.25));

    rig.clear_falling_latch();
    rig.set_falling_damping(false);
    assert!(!rig.is_falling_latched());
    for _ in 0..20 {
        rig.advance(DT);
    }
    assert!(close(rig.y_damping(), 1.0));
}
