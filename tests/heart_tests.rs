// Host-side tests for the extruded heart and its geometry cache.

use std::rc::Rc;

use glam::Vec2;
use scene_core::{
    build, triangulate, CubicSegment, CurveDefinition, ExtrudeParams, GeometryCache,
    HeartAnimator, HeartMotion, SceneError,
};

// Coarse settings keep the builds quick.
fn coarse() -> ExtrudeParams {
    ExtrudeParams {
        curve_segments: 8,
        bevel_segments: 3,
        steps: 1,
        ..ExtrudeParams::default()
    }
}

#[test]
fn heart_builds_valid_indexed_mesh() {
    let mesh = build(&CurveDefinition::heart(), &coarse()).unwrap();
    assert!(mesh.triangle_count() > 0);
    assert_eq!(mesh.indices.len() % 3, 0);
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n));
    assert!(mesh
        .vertices
        .iter()
        .all(|v| v.pos().is_finite() && glam::Vec3::from(v.normal).is_finite()));
}

#[test]
fn heart_is_centred_on_origin() {
    let mesh = build(&CurveDefinition::heart(), &coarse()).unwrap();
    let (lo, hi) = mesh.bounds().unwrap();
    let centre = (lo + hi) * 0.5;
    assert!(centre.length() < 1e-3, "centre {centre}");
}

#[test]
fn thickness_is_depth_plus_both_bevels() {
    let params = coarse();
    let mesh = build(&CurveDefinition::heart(), &params).unwrap();
    let (lo, hi) = mesh.bounds().unwrap();
    let want = params.depth + 2.0 * params.bevel_thickness;
    assert!(((hi.z - lo.z) - want).abs() < 1e-3);

    let flat = ExtrudeParams {
        bevel_enabled: false,
        ..coarse()
    };
    let (lo, hi) = build(&CurveDefinition::heart(), &flat).unwrap().bounds().unwrap();
    assert!(((hi.z - lo.z) - flat.depth).abs() < 1e-3);
}

#[test]
fn rebuild_is_identical() {
    let a = build(&CurveDefinition::heart(), &coarse()).unwrap();
    let b = build(&CurveDefinition::heart(), &coarse()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn cache_builds_once_per_parameter_set() {
    let mut cache = GeometryCache::default();
    let curve = CurveDefinition::heart();
    let a = cache.get_or_build(&curve, &coarse()).unwrap();
    let b = cache.get_or_build(&curve, &coarse()).unwrap();
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.build_count(), 1);

    let deeper = ExtrudeParams {
        depth: 6.0,
        ..coarse()
    };
    let c = cache.get_or_build(&curve, &deeper).unwrap();
    assert!(!Rc::ptr_eq(&a, &c));
    assert_eq!(cache.build_count(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn malformed_curves_are_rejected() {
    let empty = CurveDefinition {
        start: Vec2::ZERO,
        segments: vec![],
    };
    assert!(matches!(build(&empty, &coarse()), Err(SceneError::MalformedCurve(_))));

    let open = CurveDefinition {
        start: Vec2::ZERO,
        segments: vec![CubicSegment::new([1.0, 0.0], [1.0, 1.0], [0.0, 1.0])],
    };
    assert!(matches!(build(&open, &coarse()), Err(SceneError::MalformedCurve(_))));

    let mut nan = CurveDefinition::heart();
    nan.segments[2].c1.x = f32::NAN;
    assert!(matches!(build(&nan, &coarse()), Err(SceneError::MalformedCurve(_))));

    let mut cache = GeometryCache::default();
    assert!(cache.get_or_build(&empty, &coarse()).is_err());
    assert_eq!(cache.build_count(), 0);
    assert!(cache.is_empty());
}

#[test]
fn zero_steps_is_a_configuration_error() {
    let params = ExtrudeParams {
        steps: 0,
        ..coarse()
    };
    assert!(matches!(
        build(&CurveDefinition::heart(), &params),
        Err(SceneError::InvalidParameter { name: "extrude.steps", .. })
    ));
}

#[test]
fn triangulates_a_square() {
    let square = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    assert_eq!(triangulate(&square).len(), 2);
}

#[test]
fn heart_spins_and_breathes() {
    let motion = HeartMotion::default();
    let mut anim = HeartAnimator::default();
    for i in 1..=60 {
        anim.update(&motion, i as f32 / 60.0, 1.0 / 60.0);
    }
    assert!((anim.yaw - 0.1).abs() < 1e-4);
    for t in [0.0_f32, 0.5, 1.0, 7.3] {
        let s = motion.scale_at(t);
        assert!((s - 0.1).abs() <= 0.005 + 1e-6);
    }
}
