// Host-side tests for the transform tree and the composed scene.

use glam::{Mat4, Vec2, Vec3};
use scene_core::constants::{FOCUSED_EYE, MAX_POINT_LIGHTS};
use scene_core::{
    FrameInput, FrameTime, Material, MeshId, ParticleParams, Scene, SceneError, SceneGraph,
    SceneParams, Transform,
};

fn small_params() -> SceneParams {
    let mut p = SceneParams::default();
    p.particles = ParticleParams {
        count: 200,
        ..ParticleParams::default()
    };
    p.heart.extrude.curve_segments = 8;
    p.heart.extrude.bevel_segments = 3;
    p.heart.extrude.steps = 1;
    p
}

fn frame(i: u32) -> FrameInput {
    FrameInput {
        time: FrameTime::new(i as f32 / 60.0, 1.0 / 60.0),
        aspect: 1.5,
        ..FrameInput::default()
    }
}

#[test]
fn world_matrix_composes_parents() {
    let mut g = SceneGraph::new();
    let root = g.add("root", None, Transform::at(1.0, 0.0, 0.0).with_uniform_scale(2.0));
    let child = g.add("child", Some(root), Transform::at(0.0, 1.0, 0.0));
    let p = g.world_matrix(child).transform_point3(Vec3::ZERO);
    assert!(p.distance(Vec3::new(1.0, 2.0, 0.0)) < 1e-6);
    assert_eq!(g.node(root).children.as_slice(), &[child]);
}

#[test]
fn hidden_parent_prunes_subtree() {
    let mut g = SceneGraph::new();
    let mat = Material::lit([1.0, 0.0, 0.0]);
    let root = g.add("root", None, Transform::default());
    let leaf = g.add_mesh("leaf", Some(root), Transform::default(), MeshId(0), mat);
    g.add_mesh("other", None, Transform::default(), MeshId(1), mat);
    assert_eq!(g.collect_draws().len(), 2);

    g.set_visible(root, false);
    assert!(!g.is_effectively_visible(leaf));
    let draws = g.collect_draws();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0].mesh, MeshId(1));
    assert_eq!(draws[0].model, Mat4::IDENTITY);
}

#[test]
fn scene_builds_heart_once() {
    let scene = Scene::new(small_params()).unwrap();
    assert_eq!(scene.geometry_cache().build_count(), 1);
    assert_eq!(scene.particles().len(), 200);
    assert_eq!(scene.sparkles().positions().len(), 200);
    assert!(scene.meshes().len() > 3);
}

#[test]
fn asking_shows_heart_only() {
    let mut scene = Scene::new(small_params()).unwrap();
    let out = scene.update(&frame(1), false);
    assert_eq!(out.draws.len(), 1);
    assert_eq!(out.lights.len(), 3);
    assert!(out.particles_dirty);
}

#[test]
fn accepted_shows_dinner_with_candle_lights() {
    let mut scene = Scene::new(small_params()).unwrap();
    let out = scene.update(&frame(1), true);
    assert!(out.draws.len() > 20);
    assert_eq!(out.lights.len(), MAX_POINT_LIGHTS);
    assert!(out.lights[3..].iter().all(|l| l.range > 0.0 && l.intensity > 1.0));
    assert_eq!(scene.candle_intensities().len(), 5);
}

#[test]
fn acceptance_moves_camera_toward_focus() {
    let mut scene = Scene::new(small_params()).unwrap();
    let before = scene.camera().position().distance(FOCUSED_EYE);
    for i in 1..=60 {
        scene.update(&frame(i), true);
    }
    assert!(scene.camera().position().distance(FOCUSED_EYE) < before * 0.5);
}

#[test]
fn particles_dirty_every_frame() {
    let mut scene = Scene::new(small_params()).unwrap();
    for i in 1..=3 {
        assert!(scene.update(&frame(i), false).particles_dirty);
    }
}

#[test]
fn drag_turns_active_controls_and_snaps_back() {
    let mut scene = Scene::new(small_params()).unwrap();
    let mut input = frame(1);
    input.pointer_down = true;
    input.drag_delta = Some(Vec2::new(0.2, 0.0));
    for i in 1..=30 {
        input.time = FrameTime::new(i as f32 / 60.0, 1.0 / 60.0);
        scene.update(&input, false);
    }
    assert!(scene.heart_rotation().y > 0.1);
    assert_eq!(scene.table_rotation(), Vec2::ZERO);

    input.pointer_down = false;
    input.drag_delta = None;
    for i in 31..=400 {
        input.time = FrameTime::new(i as f32 / 60.0, 1.0 / 60.0);
        scene.update(&input, false);
    }
    assert!(scene.heart_rotation().length() < 1e-3);
}

#[test]
fn degenerate_frame_input_is_safe() {
    let mut scene = Scene::new(small_params()).unwrap();
    let input = FrameInput {
        time: FrameTime {
            elapsed: f32::NAN,
            delta: -1.0,
        },
        pointer: None,
        aspect: 0.0,
        ..FrameInput::default()
    };
    let out = scene.update(&input, false);
    assert!(out.view_proj.is_finite());
    assert!(scene.particles().positions().all(|p| p.is_finite()));
}

#[test]
fn invalid_configuration_is_fatal() {
    let mut p = small_params();
    p.particles.count = scene_core::constants::MAX_PARTICLE_COUNT + 1;
    assert!(matches!(
        Scene::new(p),
        Err(SceneError::InvalidParticleCount { .. })
    ));

    let mut p = small_params();
    p.heart.curve.segments.clear();
    assert!(matches!(Scene::new(p), Err(SceneError::MalformedCurve(_))));
}

#[test]
fn default_params_validate() {
    assert!(SceneParams::default().validate().is_ok());
    assert_eq!(SceneParams::default().with_seed(9).seed, 9);
}
