//! Scene composition and the per-frame driver.
//!
//! `Scene::new` builds every mesh once, lays the nodes out in a transform tree
//! and seeds each random consumer with its own generator. `Scene::update` runs
//! the controllers in a fixed order and hands the renderer a draw list.

use std::f32::consts::{FRAC_PI_2, PI};
use std::rc::Rc;

use glam::{Mat4, Quat, Vec2, Vec3};

use crate::camera_rig::{CameraMode, CameraRig};
use crate::constants::*;
use crate::error::Result;
use crate::heart::{GeometryCache, HeartAnimator};
use crate::mesh::{Mesh, MeshId, MeshLibrary};
use crate::params::SceneParams;
use crate::particles::ParticleField;
use crate::presentation::PresentationControls;
use crate::primitives;
use crate::props::{float_motion, instance_rng, CandleAnimator};
use crate::scene_graph::{DrawItem, Material, NodeId, SceneGraph, Transform};
use crate::sparkles::SparkleField;
use crate::state::FrameInput;

// Stream indices for generators derived from the base seed.
const RNG_PARTICLES: usize = 1000;
const RNG_SPARKLES: usize = 1001;
const RNG_CANDLES: usize = 2000;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
    /// Zero means unlimited.
    pub range: f32,
}

/// Everything the renderer needs for one frame, apart from the particle and
/// sparkle positions which it reads from the scene directly.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub view_proj: Mat4,
    pub camera_eye: Vec3,
    pub draws: Vec<DrawItem>,
    pub lights: Vec<PointLight>,
    pub ambient: f32,
    /// Particle instance data changed; always set since every particle is
    /// recomputed each frame.
    pub particles_dirty: bool,
}

struct CandleRig {
    animator: CandleAnimator,
    flame: NodeId,
    light: NodeId,
}

struct Nodes {
    heart_controls: NodeId,
    heart_float: NodeId,
    heart_mesh: NodeId,
    dinner: NodeId,
    table_controls: NodeId,
}

pub struct Scene {
    params: SceneParams,
    meshes: MeshLibrary,
    geometry: GeometryCache,
    graph: SceneGraph,
    nodes: Nodes,
    camera: CameraRig,
    particles: ParticleField,
    sparkles: SparkleField,
    candles: Vec<CandleRig>,
    heart: HeartAnimator,
    heart_controls: PresentationControls,
    table_controls: PresentationControls,
    star_mesh: MeshId,
    sparkle_mesh: MeshId,
}

impl Scene {
    /// Validate `params` and build the scene. Configuration errors are fatal.
    pub fn new(params: SceneParams) -> Result<Self> {
        params.validate()?;
        let mut meshes = MeshLibrary::default();
        let mut geometry = GeometryCache::default();
        let mut graph = SceneGraph::new();

        let heart_mesh = geometry.get_or_build(&params.heart.curve, &params.heart.extrude)?;
        let heart_id = meshes.add("heart", heart_mesh);
        let star_mesh = meshes.add("star", Rc::new(primitives::ball(PARTICLE_RADIUS, 10)));
        let sparkle_mesh = meshes.add("sparkle", Rc::new(primitives::ball(1.0, 6)));

        // heart: controls -> group -> float -> mesh
        let heart_controls = graph.add("heart.controls", None, Transform::default());
        let heart_group = graph.add("heart", Some(heart_controls), Transform::at(0.0, -1.0, 0.0));
        let heart_float = graph.add("heart.float", Some(heart_group), Transform::default());
        let heart_node = graph.add_mesh(
            "heart.mesh",
            Some(heart_float),
            Transform::default()
                .with_euler(PI, 0.0, 0.0)
                .with_uniform_scale(params.heart.motion.base_scale),
            heart_id,
            Material::lit(HEART_RED).with_emissive(HEART_EMISSIVE),
        );

        let (dinner, table_controls, candle_nodes) = compose_dinner(&mut graph, &mut meshes);
        graph.set_visible(dinner, false);

        let candles = candle_nodes
            .into_iter()
            .enumerate()
            .map(|(i, (flame, light))| CandleRig {
                animator: CandleAnimator::new(
                    params.flicker.clone(),
                    params.flame.clone(),
                    params.seed,
                    RNG_CANDLES + i,
                ),
                flame,
                light,
            })
            .collect();

        let mut particle_rng = instance_rng(params.seed, RNG_PARTICLES);
        let particles = ParticleField::new(params.particles.clone(), &mut particle_rng)?;
        let mut sparkle_rng = instance_rng(params.seed, RNG_SPARKLES);
        let sparkles = SparkleField::new(params.sparkles.clone(), &mut sparkle_rng)?;
        let camera = CameraRig::new(params.camera.clone(), 1.0)?;

        log::info!(
            "[scene] {} nodes, {} meshes, {} particles, {} sparkles",
            graph.len(),
            meshes.len(),
            particles.len(),
            sparkles.positions().len()
        );

        Ok(Self {
            heart_controls: PresentationControls::new(params.heart_controls.clone()),
            table_controls: PresentationControls::new(params.table_controls.clone()),
            params,
            meshes,
            geometry,
            graph,
            nodes: Nodes {
                heart_controls,
                heart_float,
                heart_mesh: heart_node,
                dinner,
                table_controls,
            },
            camera,
            particles,
            sparkles,
            candles,
            heart: HeartAnimator::default(),
            star_mesh,
            sparkle_mesh,
        })
    }

    /// Run one frame. `accepted` selects the camera target and which half of
    /// the scene is shown.
    pub fn update(&mut self, input: &FrameInput, accepted: bool) -> FrameOutput {
        let time = input.time.sanitized();
        let (t, dt) = (time.elapsed, time.delta);

        self.camera
            .update(CameraMode::from_accepted(accepted), dt, input.aspect_or_square());
        let view_proj = self.camera.view_projection();

        self.particles.update(input.pointer, &view_proj);

        for c in &mut self.candles {
            c.animator.tick(t);
            let node = self.graph.node_mut(c.flame);
            node.local.scale = c.animator.flame.scale_vec();
            node.local.rotation = Quat::from_rotation_z(c.animator.flame.current_rotation);
        }

        self.heart.update(&self.params.heart.motion, t, dt);
        {
            let node = self.graph.node_mut(self.nodes.heart_mesh);
            node.local.rotation = Quat::from_euler(glam::EulerRot::XYZ, PI, self.heart.yaw, 0.0);
            node.local.scale = Vec3::splat(self.heart.scale);
        }
        let pose = float_motion(&self.params.float, t);
        {
            let node = self.graph.node_mut(self.nodes.heart_float);
            node.local.rotation =
                Quat::from_euler(glam::EulerRot::XYZ, pose.rotation.x, pose.rotation.y, pose.rotation.z);
            node.local.translation = Vec3::new(0.0, pose.offset_y, 0.0);
        }

        self.drive_controls(input, accepted, dt);
        self.sparkles.update(t);

        self.graph.set_visible(self.nodes.heart_controls, !accepted);
        self.graph.set_visible(self.nodes.dinner, accepted);

        FrameOutput {
            view_proj,
            camera_eye: self.camera.position(),
            draws: self.graph.collect_draws(),
            lights: self.lights(accepted),
            ambient: AMBIENT_INTENSITY,
            particles_dirty: self.particles.take_dirty(),
        }
    }

    fn drive_controls(&mut self, input: &FrameInput, accepted: bool, dt: f32) {
        let (active, idle) = if accepted {
            (&mut self.table_controls, &mut self.heart_controls)
        } else {
            (&mut self.heart_controls, &mut self.table_controls)
        };
        match (input.pointer_down, input.drag_delta) {
            (true, Some(delta)) => active.drag(delta),
            (false, _) if active.is_dragging() => active.release(),
            _ => {}
        }
        if idle.is_dragging() {
            idle.release();
        }
        active.update(dt);
        idle.update(dt);

        let heart_rot = self.heart_controls.rotation();
        let table_rot = self.table_controls.rotation();
        self.graph.node_mut(self.nodes.heart_controls).local.rotation = heart_rot;
        self.graph.node_mut(self.nodes.table_controls).local.rotation = table_rot;
    }

    fn lights(&self, accepted: bool) -> Vec<PointLight> {
        let mut lights = vec![
            PointLight {
                position: Vec3::new(10.0, 10.0, 10.0),
                color: KEY_LIGHT_COLOR,
                intensity: 1.5,
                range: 0.0,
            },
            PointLight {
                position: Vec3::new(-10.0, 10.0, 10.0),
                color: RIM_LIGHT_COLOR,
                intensity: 2.0,
                range: 0.0,
            },
            PointLight {
                position: Vec3::new(0.0, -5.0, 5.0),
                color: FILL_LIGHT_COLOR,
                intensity: 0.5,
                range: 0.0,
            },
        ];
        if accepted {
            lights.extend(self.candles.iter().map(|c| PointLight {
                position: self.graph.world_matrix(c.light).transform_point3(Vec3::ZERO),
                color: FLAME_ORANGE,
                intensity: c.animator.light.current_intensity,
                range: CANDLE_LIGHT_RANGE,
            }));
        }
        lights.truncate(MAX_POINT_LIGHTS);
        lights
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    pub fn geometry_cache(&self) -> &GeometryCache {
        &self.geometry
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn sparkles(&self) -> &SparkleField {
        &self.sparkles
    }

    pub fn star_mesh(&self) -> MeshId {
        self.star_mesh
    }

    pub fn sparkle_mesh(&self) -> MeshId {
        self.sparkle_mesh
    }

    pub fn candle_intensities(&self) -> Vec<f32> {
        self.candles
            .iter()
            .map(|c| c.animator.light.current_intensity)
            .collect()
    }

    pub fn heart_rotation(&self) -> Vec2 {
        self.heart_controls.angles()
    }

    pub fn table_rotation(&self) -> Vec2 {
        self.table_controls.angles()
    }
}

/// Lay out the table, candles and the two figurines. Returns the dinner root,
/// the node driven by the table's presentation controls and `(flame, light)`
/// node pairs, one per candle.
fn compose_dinner(
    graph: &mut SceneGraph,
    meshes: &mut MeshLibrary,
) -> (NodeId, NodeId, Vec<(NodeId, NodeId)>) {
    let mut mesh = |label: &'static str, m: Mesh| meshes.add(label, Rc::new(m));
    let table = mesh("table", primitives::disc(8.0, 64));
    let cloth = mesh("cloth", primitives::disc(6.0, 64));
    let stick = mesh("candle.stick", primitives::cylinder(0.2, 0.2, 2.0, 16));
    let flame = mesh("candle.flame", primitives::cone(0.15, 0.4, 16));
    let shell = mesh("turtle.shell", primitives::sphere(0.4, 16, 16, FRAC_PI_2));
    let belly = mesh("turtle.belly", primitives::cylinder(0.35, 0.35, 0.5, 16));
    let turtle_head = mesh("turtle.head", primitives::ball(0.2, 16));
    let eye = mesh("eye", primitives::ball(0.03, 8));
    let foot = mesh("turtle.foot", primitives::ball(0.1, 8));
    let panda_body = mesh("panda.body", primitives::ball(0.35, 16));
    let panda_head = mesh("panda.head", primitives::ball(0.3, 16));
    let ear = mesh("panda.ear", primitives::ball(0.08, 16));
    let patch = mesh("panda.patch", primitives::ball(0.06, 16));
    let arm = mesh("panda.arm", primitives::capsule(0.08, 0.4, 4, 8));
    let leg = mesh("panda.leg", primitives::capsule(0.09, 0.3, 4, 8));

    let dinner = graph.add("dinner", None, Transform::default());
    let flat = |y: f32| Transform::at(0.0, y, 0.0).with_euler(-FRAC_PI_2, 0.0, 0.0);
    graph.add_mesh("table", Some(dinner), flat(-2.0), table, Material::lit(TABLE_WOOD));
    graph.add_mesh("cloth", Some(dinner), flat(-1.99), cloth, Material::lit(TABLE_CLOTH));

    let controls = graph.add("dinner.controls", Some(dinner), Transform::default());
    let props = graph.add("dinner.props", Some(controls), Transform::at(0.0, -1.5, 0.0));

    let candles = CANDLE_POSITIONS
        .iter()
        .map(|[x, y, z]| {
            let group = graph.add(
                "candle",
                Some(props),
                Transform::at(*x, *y, *z).with_uniform_scale(CANDLE_SCALE),
            );
            graph.add_mesh("candle.stick", Some(group), Transform::at(0.0, 1.0, 0.0), stick, Material::lit(CANDLE_WAX));
            let f = graph.add_mesh(
                "candle.flame",
                Some(group),
                Transform::at(0.0, FLAME_OFFSET_Y, 0.0),
                flame,
                Material::unlit(FLAME_ORANGE),
            );
            let l = graph.add("candle.light", Some(group), Transform::at(0.0, CANDLE_LIGHT_OFFSET_Y, 0.0));
            (f, l)
        })
        .collect();

    let turtle = graph.add(
        "turtle",
        Some(props),
        Transform::at(-0.6, 0.1, 0.0)
            .with_euler(0.0, -0.5, 0.0)
            .with_uniform_scale(1.2),
    );
    let shell_mat = Material::lit(SHELL_GREEN);
    let skin = Material::lit(SKIN_GREEN);
    graph.add_mesh("turtle.shell", Some(turtle), Transform::at(0.0, 0.13, 0.0), shell, shell_mat);
    graph.add_mesh(
        "turtle.belly",
        Some(turtle),
        Transform::at(0.0, 0.1, 0.0).with_scale(Vec3::new(1.0, 0.2, 1.0)),
        belly,
        skin,
    );
    graph.add_mesh("turtle.head", Some(turtle), Transform::at(0.45, 0.3, 0.0), turtle_head, skin);
    for z in [0.1, -0.1] {
        graph.add_mesh("turtle.eye", Some(turtle), Transform::at(0.6, 0.35, z), eye, Material::unlit(INK_BLACK));
    }
    for (x, z) in [(0.3, 0.3), (0.3, -0.3), (-0.3, 0.3), (-0.3, -0.3)] {
        let tilt = if x > 0.0 { 0.2 } else { -0.2 };
        graph.add_mesh(
            "turtle.foot",
            Some(turtle),
            Transform::at(x, 0.1, z).with_euler(0.0, 0.0, tilt),
            foot,
            skin,
        );
    }

    let panda = graph.add(
        "panda",
        Some(props),
        Transform::at(0.6, 0.1, 0.0)
            .with_euler(0.0, -0.2, 0.0)
            .with_uniform_scale(1.2),
    );
    let white = Material::lit(PANDA_WHITE);
    let black = Material::lit(INK_BLACK);
    graph.add_mesh("panda.body", Some(panda), Transform::at(0.0, 0.35, 0.0), panda_body, white);
    graph.add_mesh("panda.head", Some(panda), Transform::at(0.0, 0.8, 0.0), panda_head, white);
    for side in [1.0_f32, -1.0] {
        graph.add_mesh("panda.ear", Some(panda), Transform::at(0.2 * side, 1.0, 0.0), ear, black);
        graph.add_mesh(
            "panda.patch",
            Some(panda),
            Transform::at(0.1 * side, 0.85, 0.22).with_euler(0.0, 0.2 * side, 0.0),
            patch,
            black,
        );
        graph.add_mesh(
            "panda.arm",
            Some(panda),
            Transform::at(0.3 * side, 0.5, 0.0).with_euler(0.0, 0.0, -0.5 * side),
            arm,
            black,
        );
        graph.add_mesh("panda.leg", Some(panda), Transform::at(0.15 * side, 0.1, 0.1), leg, black);
    }

    (dinner, controls, candles)
}
