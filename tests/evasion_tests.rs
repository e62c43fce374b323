// Host-side tests for the evasion controls and the session mode.

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{AppMode, CameraMode, EvasionController, EvasionParams, Session};

fn controller(seed: u64) -> EvasionController<StdRng> {
    EvasionController::new(EvasionParams::default(), StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn starts_side_by_side() {
    let c = controller(1);
    assert_eq!((c.accept().x, c.accept().y), (42.0, 70.0));
    assert_eq!((c.evade().x, c.evade().y), (58.0, 70.0));
    assert_eq!(c.accept().emphasis_scale, 1.0);
    assert!(!c.has_engaged());
}

#[test]
fn emphasis_strictly_increases() {
    let mut c = controller(2);
    let mut last = c.accept().emphasis_scale;
    for _ in 0..100 {
        c.on_evade_hover();
        let now = c.accept().emphasis_scale;
        assert!(now > last);
        last = now;
    }
    assert!((last - (1.0 + 100.0 * 0.15)).abs() < 1e-3);
    assert_eq!(c.hover_count(), 100);
}

#[test]
fn evade_stays_inside_margins() {
    let mut c = controller(3);
    for _ in 0..1000 {
        c.on_evade_hover();
        let e = c.evade();
        assert!((10.0..90.0).contains(&e.x), "x = {}", e.x);
        assert!((10.0..90.0).contains(&e.y), "y = {}", e.y);
    }
}

#[test]
fn accept_centres_once() {
    let mut c = controller(4);
    c.on_evade_hover();
    assert!(c.has_engaged());
    let first = *c.accept();
    assert_eq!((first.x, first.y), (50.0, 70.0));

    c.on_evade_hover();
    let second = *c.accept();
    assert_eq!((second.x, second.y), (first.x, first.y));
    assert!(second.emphasis_scale > first.emphasis_scale);
}

#[test]
fn injected_generator_drives_relocation() {
    let mut c = EvasionController::new(EvasionParams::default(), StepRng::new(0, 0)).unwrap();
    c.on_evade_hover();
    assert_eq!((c.evade().x, c.evade().y), (10.0, 10.0));
}

#[test]
fn accept_fires_once_and_freezes_controls() {
    let mut c = controller(5);
    c.on_evade_hover();
    assert!(c.on_accept_activate().is_some());
    assert!(c.on_accept_activate().is_none());
    assert!(c.is_accepted());

    let before = (*c.accept(), *c.evade(), c.hover_count());
    c.on_evade_hover();
    assert_eq!((*c.accept(), *c.evade(), c.hover_count()), before);
}

#[test]
fn css_reflects_state() {
    let mut c = controller(6);
    assert_eq!(c.accept().css_transform(), "translate(-50%, -50%)");
    c.on_evade_hover();
    let (left, top) = c.accept().css_position();
    assert_eq!((left.as_str(), top.as_str()), ("50%", "70%"));
    assert!(c.accept().css_transform().contains("scale(1.15"));
}

#[test]
fn session_accepts_exactly_once() {
    let mut c = controller(7);
    let mut s = Session::new();
    assert_eq!(s.mode(), AppMode::Asking);
    assert_eq!(s.camera_mode(), CameraMode::Default);

    let event = c.on_accept_activate().unwrap();
    assert!(s.accept(event));
    assert!(s.is_accepted());
    assert_eq!(s.camera_mode(), CameraMode::Focused);
    assert!(!s.accept(event));
    assert_eq!(s.mode(), AppMode::Accepted);
}

#[test]
fn rejects_inverted_margins() {
    let params = EvasionParams {
        margin_min: 80.0,
        margin_max: 20.0,
        ..EvasionParams::default()
    };
    assert!(EvasionController::new(params, StdRng::seed_from_u64(0)).is_err());
}
