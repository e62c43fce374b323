//! Procedural heart solid: a closed cubic Bézier outline, extruded with a
//! rounded bevel and re-centred on its local origin.

use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use fnv::FnvHashMap;
use glam::{Vec2, Vec3};

use crate::error::{ensure_non_negative, ensure_positive, Result, SceneError};
use crate::mesh::{Mesh, Vertex};

/// Longest outward offset relative to the bevel size at a sharp corner.
const MAX_MITER: f32 = 3.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicSegment {
    pub c1: Vec2,
    pub c2: Vec2,
    pub end: Vec2,
}

impl CubicSegment {
    pub fn new(c1: [f32; 2], c2: [f32; 2], end: [f32; 2]) -> Self {
        Self {
            c1: Vec2::from_array(c1),
            c2: Vec2::from_array(c2),
            end: Vec2::from_array(end),
        }
    }

    fn point(&self, start: Vec2, t: f32) -> Vec2 {
        let u = 1.0 - t;
        start * (u * u * u) + self.c1 * (3.0 * u * u * t) + self.c2 * (3.0 * u * t * t) + self.end * (t * t * t)
    }
}

/// Closed path made of cubic segments starting at `start`.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveDefinition {
    pub start: Vec2,
    pub segments: Vec<CubicSegment>,
}

impl Default for CurveDefinition {
    fn default() -> Self {
        Self::heart()
    }
}

impl CurveDefinition {
    /// The heart outline, tip at +Y (flipped upright by the scene).
    pub fn heart() -> Self {
        Self {
            start: Vec2::new(5.0, 5.0),
            segments: vec![
                CubicSegment::new([5.0, 5.0], [4.0, 0.0], [0.0, 0.0]),
                CubicSegment::new([-6.0, 0.0], [-6.0, 7.0], [-6.0, 7.0]),
                CubicSegment::new([-6.0, 11.0], [-3.0, 15.4], [5.0, 19.0]),
                CubicSegment::new([12.0, 15.4], [16.0, 11.0], [16.0, 7.0]),
                CubicSegment::new([16.0, 7.0], [16.0, 0.0], [10.0, 0.0]),
                CubicSegment::new([7.0, 0.0], [5.0, 5.0], [5.0, 5.0]),
            ],
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(SceneError::MalformedCurve("no segments".into()));
        }
        let finite = self.start.is_finite()
            && self
                .segments
                .iter()
                .all(|s| s.c1.is_finite() && s.c2.is_finite() && s.end.is_finite());
        if !finite {
            return Err(SceneError::MalformedCurve("non-finite control point".into()));
        }
        let last = self.segments[self.segments.len() - 1].end;
        if last.distance(self.start) > 1e-4 {
            return Err(SceneError::MalformedCurve(format!(
                "path is open: ends at {last} but starts at {}",
                self.start
            )));
        }
        Ok(())
    }

    /// Sample each segment at `divisions` steps, dropping repeated points and
    /// the closing duplicate.
    pub fn sample(&self, divisions: u32) -> Vec<Vec2> {
        let divisions = divisions.max(1);
        let mut points: Vec<Vec2> = vec![self.start];
        let mut from = self.start;
        for seg in &self.segments {
            for d in 1..=divisions {
                let p = seg.point(from, d as f32 / divisions as f32);
                if points.last().map_or(true, |q| q.distance_squared(p) > 1e-12) {
                    points.push(p);
                }
            }
            from = seg.end;
        }
        if points.len() > 1 && points[0].distance_squared(points[points.len() - 1]) <= 1e-12 {
            points.pop();
        }
        points
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExtrudeParams {
    pub depth: f32,
    pub bevel_enabled: bool,
    pub bevel_segments: u32,
    pub steps: u32,
    pub bevel_size: f32,
    pub bevel_thickness: f32,
    pub curve_segments: u32,
}

impl Default for ExtrudeParams {
    fn default() -> Self {
        Self {
            depth: 4.0,
            bevel_enabled: true,
            bevel_segments: 20,
            steps: 5,
            bevel_size: 1.5,
            bevel_thickness: 1.5,
            curve_segments: 60,
        }
    }
}

impl ExtrudeParams {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("extrude.depth", self.depth)?;
        ensure_non_negative("extrude.bevel_size", self.bevel_size)?;
        ensure_non_negative("extrude.bevel_thickness", self.bevel_thickness)?;
        let zero = |name: &'static str| SceneError::InvalidParameter { name, value: 0.0 };
        if self.steps == 0 {
            return Err(zero("extrude.steps"));
        }
        if self.curve_segments == 0 {
            return Err(zero("extrude.curve_segments"));
        }
        if self.bevel_enabled && self.bevel_segments == 0 {
            return Err(zero("extrude.bevel_segments"));
        }
        Ok(())
    }
}

#[inline]
fn cross(a: Vec2, b: Vec2) -> f32 {
    a.x * b.y - a.y * b.x
}

fn signed_area(points: &[Vec2]) -> f32 {
    let n = points.len();
    (0..n).map(|i| cross(points[i], points[(i + 1) % n])).sum::<f32>() * 0.5
}

fn in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = cross(b - a, p - a);
    let d2 = cross(c - b, p - b);
    let d3 = cross(a - c, p - c);
    d1 >= 0.0 && d2 >= 0.0 && d3 >= 0.0
}

/// Ear-clip a simple counter-clockwise polygon into index triples.
pub fn triangulate(points: &[Vec2]) -> Vec<[u32; 3]> {
    let mut remaining: Vec<usize> = (0..points.len()).collect();
    let mut tris = Vec::with_capacity(points.len().saturating_sub(2));
    while remaining.len() > 3 {
        let n = remaining.len();
        let mut clipped = false;
        for k in 0..n {
            let (ip, ic, inx) = (remaining[(k + n - 1) % n], remaining[k], remaining[(k + 1) % n]);
            let (a, b, c) = (points[ip], points[ic], points[inx]);
            if cross(b - a, c - b) <= 0.0 {
                continue;
            }
            let blocked = remaining.iter().any(|&j| {
                j != ip && j != ic && j != inx && {
                    let p = points[j];
                    p != a && p != b && p != c && in_triangle(p, a, b, c)
                }
            });
            if blocked {
                continue;
            }
            tris.push([ip as u32, ic as u32, inx as u32]);
            remaining.remove(k);
            clipped = true;
            break;
        }
        if !clipped {
            // numerically degenerate leftovers: fan the rest
            let first = remaining[0];
            for w in remaining[1..].windows(2) {
                tris.push([first as u32, w[0] as u32, w[1] as u32]);
            }
            return tris;
        }
    }
    if remaining.len() == 3 {
        tris.push([remaining[0] as u32, remaining[1] as u32, remaining[2] as u32]);
    }
    tris
}

/// Outward offset direction per vertex of a counter-clockwise contour, scaled
/// so that adjacent edges move by one unit.
fn bevel_vectors(contour: &[Vec2]) -> Vec<Vec2> {
    let n = contour.len();
    let outward = |a: Vec2, b: Vec2| {
        let e = (b - a).normalize_or_zero();
        Vec2::new(e.y, -e.x)
    };
    (0..n)
        .map(|i| {
            let prev = contour[(i + n - 1) % n];
            let cur = contour[i];
            let next = contour[(i + 1) % n];
            let n1 = outward(prev, cur);
            let n2 = outward(cur, next);
            match (n1 + n2).try_normalize() {
                Some(m) => {
                    let cos = m.dot(n1).max(1.0 / MAX_MITER);
                    m / cos
                }
                None => n1,
            }
        })
        .collect()
}

/// Build the extruded solid for `curve` and centre it.
pub fn build(curve: &CurveDefinition, params: &ExtrudeParams) -> Result<Mesh> {
    curve.validate()?;
    params.validate()?;
    let mut contour = curve.sample(params.curve_segments);
    if contour.len() < 3 {
        return Err(SceneError::MalformedCurve(format!(
            "outline has only {} distinct points",
            contour.len()
        )));
    }
    let area = signed_area(&contour);
    if area.abs() <= f32::EPSILON {
        return Err(SceneError::MalformedCurve("outline encloses no area".into()));
    }
    if area < 0.0 {
        contour.reverse();
    }
    let cap_tris = triangulate(&contour);
    let moves = bevel_vectors(&contour);

    // (z, outward offset) for each ring, front to back
    let mut layers: Vec<(f32, f32)> = Vec::new();
    let (size, thickness) = if params.bevel_enabled {
        (params.bevel_size, params.bevel_thickness)
    } else {
        (0.0, 0.0)
    };
    let bevel = if params.bevel_enabled { params.bevel_segments } else { 0 };
    for b in 0..bevel {
        let t = b as f32 / bevel as f32 * FRAC_PI_2;
        layers.push((-thickness * t.cos(), size * t.sin()));
    }
    layers.push((0.0, size));
    for s in 1..=params.steps {
        layers.push((params.depth * s as f32 / params.steps as f32, size));
    }
    for b in (0..bevel).rev() {
        let t = b as f32 / bevel as f32 * FRAC_PI_2;
        layers.push((params.depth + thickness * t.cos(), size * t.sin()));
    }

    let n = contour.len() as u32;
    let ring = |z: f32, offset: f32| {
        contour
            .iter()
            .zip(&moves)
            .map(move |(p, m)| {
                let q = *p + *m * offset;
                Vec3::new(q.x, q.y, z)
            })
    };

    let mut walls = Mesh::default();
    for &(z, offset) in &layers {
        walls
            .vertices
            .extend(ring(z, offset).map(|p| Vertex::new(p, Vec3::Z)));
    }
    for k in 0..layers.len() as u32 - 1 {
        for i in 0..n {
            let j = (i + 1) % n;
            let a = k * n + i;
            let b = k * n + j;
            let c = (k + 1) * n + j;
            let d = (k + 1) * n + i;
            walls.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    walls.compute_normals();

    let (front_z, front_off) = layers[0];
    let (back_z, back_off) = layers[layers.len() - 1];
    let mut front = Mesh {
        vertices: ring(front_z, front_off).map(|p| Vertex::new(p, Vec3::NEG_Z)).collect(),
        indices: Vec::with_capacity(cap_tris.len() * 3),
    };
    let mut back = Mesh {
        vertices: ring(back_z, back_off).map(|p| Vertex::new(p, Vec3::Z)).collect(),
        indices: Vec::with_capacity(cap_tris.len() * 3),
    };
    for [a, b, c] in &cap_tris {
        front.indices.extend_from_slice(&[*a, *c, *b]);
        back.indices.extend_from_slice(&[*a, *b, *c]);
    }

    let mut mesh = walls;
    mesh.append(&front);
    mesh.append(&back);
    mesh.center();
    log::debug!(
        "[heart] built {} vertices / {} triangles from {} outline points",
        mesh.vertices.len(),
        mesh.triangle_count(),
        n
    );
    Ok(mesh)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct GeometryKey(Vec<u32>);

impl GeometryKey {
    fn new(curve: &CurveDefinition, params: &ExtrudeParams) -> Self {
        let mut bits = vec![curve.start.x.to_bits(), curve.start.y.to_bits()];
        for s in &curve.segments {
            for v in [s.c1, s.c2, s.end] {
                bits.extend_from_slice(&[v.x.to_bits(), v.y.to_bits()]);
            }
        }
        bits.extend_from_slice(&[
            params.depth.to_bits(),
            params.bevel_enabled as u32,
            params.bevel_segments,
            params.steps,
            params.bevel_size.to_bits(),
            params.bevel_thickness.to_bits(),
            params.curve_segments,
        ]);
        Self(bits)
    }
}

/// Memoised geometry: one build per distinct parameter set.
#[derive(Default)]
pub struct GeometryCache {
    entries: FnvHashMap<GeometryKey, Rc<Mesh>>,
    builds: usize,
}

impl GeometryCache {
    pub fn get_or_build(&mut self, curve: &CurveDefinition, params: &ExtrudeParams) -> Result<Rc<Mesh>> {
        let key = GeometryKey::new(curve, params);
        if let Some(mesh) = self.entries.get(&key) {
            return Ok(mesh.clone());
        }
        let mesh = Rc::new(build(curve, params)?);
        self.builds += 1;
        self.entries.insert(key, mesh.clone());
        Ok(mesh)
    }

    /// Number of actual builds performed so far.
    pub fn build_count(&self) -> usize {
        self.builds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeartMotion {
    /// Spin about Y in rad/s.
    pub spin_rate: f32,
    pub base_scale: f32,
    pub breath_amplitude: f32,
    pub breath_frequency: f32,
}

impl Default for HeartMotion {
    fn default() -> Self {
        Self {
            spin_rate: 0.1,
            base_scale: 0.1,
            breath_amplitude: 0.005,
            breath_frequency: 1.5,
        }
    }
}

impl HeartMotion {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("heart.base_scale", self.base_scale)?;
        ensure_non_negative("heart.breath_amplitude", self.breath_amplitude)?;
        if self.breath_amplitude >= self.base_scale {
            return Err(SceneError::InvalidParameter {
                name: "heart.breath_amplitude",
                value: self.breath_amplitude,
            });
        }
        Ok(())
    }

    pub fn scale_at(&self, elapsed: f32) -> f32 {
        self.base_scale + (elapsed * self.breath_frequency).sin() * self.breath_amplitude
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeartParams {
    pub curve: CurveDefinition,
    pub extrude: ExtrudeParams,
    pub motion: HeartMotion,
}

impl HeartParams {
    pub fn validate(&self) -> Result<()> {
        self.curve.validate()?;
        self.extrude.validate()?;
        self.motion.validate()
    }
}

/// Accumulated spin and breathing scale.
#[derive(Clone, Debug, Default)]
pub struct HeartAnimator {
    pub yaw: f32,
    pub scale: f32,
}

impl HeartAnimator {
    pub fn update(&mut self, motion: &HeartMotion, elapsed: f32, dt: f32) {
        self.yaw += dt * motion.spin_rate;
        self.scale = motion.scale_at(elapsed);
    }
}
