// Host-side tests for candle flicker, flame jitter and the float bob.

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{
    flame_jitter, flicker_intensity, float_motion, CandleAnimator, FlameJitter, FlameParams,
    FlickerLight, FlickerParams, FloatParams,
};

#[test]
fn flicker_matches_formula() {
    let p = FlickerParams::default();
    for t in [0.0_f32, 0.1, 1.7, 12.0] {
        let want = 1.5 + 0.3 * (15.0 * t).sin() + 0.05;
        assert!((flicker_intensity(&p, t, 0.0, 0.05) - want).abs() < 1e-5);
    }
}

#[test]
fn flicker_stays_in_band() {
    let mut light = FlickerLight::new(FlickerParams::default(), 0.0, StdRng::seed_from_u64(9));
    for i in 0..600 {
        let v = light.tick(i as f32 / 60.0).intensity_or_rotation;
        assert!((1.2 - 1e-5..2.0 + 1e-5).contains(&v), "intensity {v}");
        assert_eq!(v, light.current_intensity);
    }
}

#[test]
fn zero_generator_gives_noise_free_values() {
    let mut light = FlickerLight::new(FlickerParams::default(), 0.0, StepRng::new(0, 0));
    let frame = light.tick(0.0);
    assert!((frame.intensity_or_rotation - 1.5).abs() < 1e-6);

    let mut flame = FlameJitter::new(FlameParams::default(), StepRng::new(0, 0));
    let t = 0.25_f32;
    let frame = flame.tick(t);
    assert!((frame.scale - (1.0 + 0.1 * (20.0 * t).sin())).abs() < 1e-5);
    assert!((frame.intensity_or_rotation - 0.1 * (10.0 * t).sin()).abs() < 1e-6);
    assert_eq!(flame.scale_vec().y, flame.current_scale);
    assert_eq!(flame.scale_vec().x, 1.0);
}

#[test]
fn only_the_flicker_carries_a_phase() {
    let t = 0.25_f32;
    let mut flame = FlameJitter::new(FlameParams::default(), StepRng::new(0, 0));
    flame.tick(t);
    // 1 + 0.1·sin(5) and 0.1·sin(2.5)
    assert!((flame.current_scale - 0.904_107_6).abs() < 1e-5);
    assert!((flame.current_rotation - 0.059_847_2).abs() < 1e-5);

    let mut light = FlickerLight::new(FlickerParams::default(), 1.0, StepRng::new(0, 0));
    light.tick(t);
    let want = 1.5 + 0.3 * (15.0 * t + 1.0).sin();
    assert!((light.current_intensity - want).abs() < 1e-5);
}

#[test]
fn flame_sway_is_bounded() {
    let p = FlameParams::default();
    for i in 0..1000 {
        let (scale, sway) = flame_jitter(&p, i as f32 * 0.013, 0.09);
        assert!(sway.abs() <= 0.1 + 1e-6);
        assert!((0.9 - 1e-5..1.2).contains(&scale));
    }
}

#[test]
fn candles_do_not_flicker_in_lockstep() {
    let mut a = CandleAnimator::new(FlickerParams::default(), FlameParams::default(), 42, 0);
    let mut b = CandleAnimator::new(FlickerParams::default(), FlameParams::default(), 42, 1);
    let differs = (0..30).any(|i| {
        let t = i as f32 / 60.0;
        a.tick(t);
        b.tick(t);
        a.light.current_intensity != b.light.current_intensity
    });
    assert!(differs);
}

#[test]
fn candle_is_reproducible_from_seed() {
    let mut a = CandleAnimator::new(FlickerParams::default(), FlameParams::default(), 42, 3);
    let mut b = CandleAnimator::new(FlickerParams::default(), FlameParams::default(), 42, 3);
    for i in 0..30 {
        let t = i as f32 / 60.0;
        a.tick(t);
        b.tick(t);
        assert_eq!(a.light.current_intensity, b.light.current_intensity);
        assert_eq!(a.flame.current_scale, b.flame.current_scale);
    }
}

#[test]
fn float_bob_is_small_and_periodic() {
    let p = FloatParams::default();
    let rest = float_motion(&p, 0.0);
    assert_eq!(rest.offset_y, 0.0);
    for i in 0..500 {
        let pose = float_motion(&p, i as f32 * 0.05);
        assert!(pose.offset_y.abs() <= 0.05 + 1e-6);
        assert!(pose.rotation.abs().max_element() <= 0.2 / 8.0 + 1e-6);
    }
    // period of sin(t/4·speed) is 4π at speed 2
    let period = 4.0 * std::f32::consts::PI;
    let a = float_motion(&p, 1.0);
    let b = float_motion(&p, 1.0 + period);
    assert!((a.offset_y - b.offset_y).abs() < 1e-4);
}

#[test]
fn negative_parameters_are_rejected() {
    let p = FlickerParams {
        noise: -0.1,
        ..FlickerParams::default()
    };
    assert!(p.validate().is_err());
    let p = FlameParams {
        sway_amplitude: f32::NAN,
        ..FlameParams::default()
    };
    assert!(p.validate().is_err());
}
