// Host-side tests for the two-state camera transition.

use scene_core::constants::{DEFAULT_EYE, FOCUSED_EYE, FOCUSED_LOOK_AT};
use scene_core::{smoothing_factor, CameraMode, CameraParams, CameraRig};

const DT: f32 = 1.0 / 60.0;

fn rig() -> CameraRig {
    CameraRig::new(CameraParams::default(), 16.0 / 9.0).unwrap()
}

#[test]
fn starts_on_default_target() {
    let r = rig();
    assert_eq!(r.mode(), CameraMode::Default);
    assert_eq!(r.position(), DEFAULT_EYE);
}

#[test]
fn converges_monotonically_on_focused_target() {
    let mut r = rig();
    let mut last = r.position().distance(FOCUSED_EYE);
    for _ in 0..(60 * 20) {
        r.update(CameraMode::Focused, DT, 1.0);
        let d = r.position().distance(FOCUSED_EYE);
        assert!(d <= last + 1e-6, "distance grew from {last} to {d}");
        last = d;
    }
    assert!(last < 1e-3, "still {last} away");
}

#[test]
fn look_direction_settles_on_target() {
    let mut r = rig();
    for _ in 0..(60 * 30) {
        r.update(CameraMode::Focused, DT, 1.0);
    }
    let want = (FOCUSED_LOOK_AT - r.position()).normalize();
    assert!(r.camera().forward.dot(want) > 0.9999);
}

#[test]
fn rapid_toggle_moves_each_way() {
    let mut r = rig();
    let start = r.position();
    r.update(CameraMode::Focused, DT, 1.0);
    let after_focus = r.position();
    assert!(after_focus.distance(FOCUSED_EYE) < start.distance(FOCUSED_EYE) - 1e-4);

    r.update(CameraMode::Default, DT, 1.0);
    let after_back = r.position();
    assert!(after_back.distance(DEFAULT_EYE) < after_focus.distance(DEFAULT_EYE) - 1e-5);
    assert!(after_back.is_finite());
}

#[test]
fn smoothing_is_frame_rate_independent() {
    let mut one = rig();
    let mut two = rig();
    one.update(CameraMode::Focused, 0.1, 1.0);
    two.update(CameraMode::Focused, 0.05, 1.0);
    two.update(CameraMode::Focused, 0.05, 1.0);
    assert!(one.position().distance(two.position()) < 1e-4);
}

#[test]
fn degenerate_delta_is_a_no_op() {
    assert_eq!(smoothing_factor(1.5, 0.0), 0.0);
    assert_eq!(smoothing_factor(1.5, -1.0), 0.0);
    assert_eq!(smoothing_factor(1.5, f32::NAN), 0.0);
    assert_eq!(smoothing_factor(1.5, f32::INFINITY), 0.0);

    let mut r = rig();
    r.update(CameraMode::Focused, f32::NAN, 1.0);
    assert_eq!(r.position(), DEFAULT_EYE);
}

#[test]
fn bad_aspect_keeps_previous() {
    let mut r = rig();
    r.update(CameraMode::Default, DT, 0.0);
    assert!((r.camera().aspect - 16.0 / 9.0).abs() < 1e-6);
}

#[test]
fn rejects_non_positive_rates() {
    let params = CameraParams {
        position_rate: 0.0,
        ..CameraParams::default()
    };
    assert!(CameraRig::new(params, 1.0).is_err());
}
