// Host-side tests for pointer repulsion and the particle field.

use glam::{Mat4, Vec2, Vec3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scene_core::{displace, BoundingVolume, Camera, ParticleField, ParticleParams, SceneError};

const RADIUS: f32 = 0.4;
const STRENGTH: f32 = 2.0;

// With an identity view-projection an origin's NDC is just its x/y.
fn at_ndc(x: f32, y: f32) -> Vec3 {
    Vec3::new(x, y, -0.5)
}

#[test]
fn pointer_at_particle_pushes_full_strength_along_x() {
    let origin = at_ndc(0.0, 0.0);
    let out = displace(origin, Some(Vec2::ZERO), &Mat4::IDENTITY, RADIUS, STRENGTH);
    assert!((out.x - 2.0).abs() < 1e-6, "x = {}", out.x);
    assert_eq!(out.y, 0.0);
    assert_eq!(out.z, origin.z);
}

#[test]
fn outside_radius_is_untouched_exactly() {
    for origin in [at_ndc(0.4, 0.0), at_ndc(0.5, 0.1), at_ndc(-0.9, 0.9)] {
        let out = displace(origin, Some(Vec2::ZERO), &Mat4::IDENTITY, RADIUS, STRENGTH);
        assert_eq!(out, origin);
    }
}

#[test]
fn displacement_shrinks_with_distance() {
    let mut last = f32::INFINITY;
    for i in 0..40 {
        let d = i as f32 * 0.01;
        let origin = at_ndc(d, 0.0);
        let out = displace(origin, Some(Vec2::ZERO), &Mat4::IDENTITY, RADIUS, STRENGTH);
        let moved = (out - origin).length();
        assert!(moved <= last + 1e-6, "moved {moved} at d={d} after {last}");
        last = moved;
    }
}

#[test]
fn push_points_away_from_pointer() {
    let origin = at_ndc(0.1, 0.1);
    let out = displace(origin, Some(Vec2::ZERO), &Mat4::IDENTITY, RADIUS, STRENGTH);
    assert!(out.x > origin.x && out.y > origin.y);
    let origin = at_ndc(-0.1, 0.0);
    let out = displace(origin, Some(Vec2::ZERO), &Mat4::IDENTITY, RADIUS, STRENGTH);
    assert!(out.x < origin.x);
}

#[test]
fn no_pointer_leaves_origin() {
    let origin = at_ndc(0.0, 0.0);
    assert_eq!(displace(origin, None, &Mat4::IDENTITY, RADIUS, STRENGTH), origin);
}

#[test]
fn points_behind_camera_are_ignored() {
    let cam = Camera::default();
    let vp = cam.view_projection();
    let behind = Vec3::new(0.0, 0.0, 20.0);
    assert_eq!(displace(behind, Some(Vec2::ZERO), &vp, RADIUS, STRENGTH), behind);
}

#[test]
fn field_origins_stay_in_bounds() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = ParticleParams {
        count: 500,
        ..ParticleParams::default()
    };
    let bounds = params.bounds;
    let field = ParticleField::new(params, &mut rng).unwrap();
    assert_eq!(field.len(), 500);
    for p in field.particles() {
        let o = p.origin;
        assert!(o.cmpge(bounds.min).all() && o.cmple(bounds.max).all(), "{o}");
    }
}

#[test]
fn field_update_marks_dirty_every_frame() {
    let mut rng = StdRng::seed_from_u64(1);
    let params = ParticleParams {
        count: 10,
        ..ParticleParams::default()
    };
    let mut field = ParticleField::new(params, &mut rng).unwrap();
    let vp = Camera::default().view_projection();
    field.update(None, &vp);
    assert!(field.take_dirty());
    assert!(!field.take_dirty());
    field.update(None, &vp);
    assert!(field.take_dirty());
    assert!(field.particles().iter().all(|p| p.displaced == p.origin));
}

#[test]
fn zero_count_field_is_a_no_op() {
    let params = ParticleParams {
        count: 0,
        ..ParticleParams::default()
    };
    let mut field = ParticleField::new(params, &mut StdRng::seed_from_u64(2)).unwrap();
    assert!(field.is_empty());
    field.update(Some(Vec2::ZERO), &Camera::default().view_projection());
    assert_eq!(field.len(), 0);
    assert!(field.take_dirty());
}

#[test]
fn reconfigure_rebuilds_on_count_change() {
    let mut rng = StdRng::seed_from_u64(5);
    let params = ParticleParams {
        count: 32,
        ..ParticleParams::default()
    };
    let mut field = ParticleField::new(params.clone(), &mut rng).unwrap();
    let before = field.particles().to_vec();

    // same count and volume: origins survive, other knobs apply
    let stronger = ParticleParams {
        strength: 4.0,
        ..params.clone()
    };
    field.reconfigure(stronger, &mut rng).unwrap();
    assert_eq!(field.particles(), before.as_slice());
    assert_eq!(field.params().strength, 4.0);

    let more = ParticleParams {
        count: 48,
        ..params.clone()
    };
    field.reconfigure(more, &mut rng).unwrap();
    assert_eq!(field.len(), 48);

    let too_many = ParticleParams {
        count: scene_core::constants::MAX_PARTICLE_COUNT + 1,
        ..params
    };
    assert!(field.reconfigure(too_many, &mut rng).is_err());
    assert_eq!(field.len(), 48);
}

#[test]
fn same_seed_same_field() {
    let params = ParticleParams {
        count: 64,
        ..ParticleParams::default()
    };
    let a = ParticleField::new(params.clone(), &mut StdRng::seed_from_u64(3)).unwrap();
    let b = ParticleField::new(params, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn rejects_bad_configuration() {
    let mut rng = StdRng::seed_from_u64(0);
    let too_many = ParticleParams {
        count: scene_core::constants::MAX_PARTICLE_COUNT + 1,
        ..ParticleParams::default()
    };
    assert!(matches!(
        ParticleField::new(too_many, &mut rng),
        Err(SceneError::InvalidParticleCount { .. })
    ));

    let inverted = ParticleParams {
        bounds: BoundingVolume {
            min: Vec3::splat(1.0),
            max: Vec3::splat(-1.0),
        },
        ..ParticleParams::default()
    };
    assert!(matches!(
        ParticleField::new(inverted, &mut rng),
        Err(SceneError::InvalidBounds)
    ));
}
