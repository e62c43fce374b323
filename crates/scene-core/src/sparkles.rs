use glam::Vec3;
use rand::Rng;

use crate::error::{ensure_non_negative, ensure_positive, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct SparkleParams {
    pub count: usize,
    /// Edge length of the cube the sparkles are scattered in.
    pub extent: f32,
    pub speed: f32,
    pub amplitude: f32,
    pub size: f32,
}

impl Default for SparkleParams {
    fn default() -> Self {
        Self {
            count: 200,
            extent: 15.0,
            speed: 0.4,
            amplitude: 0.3,
            size: 0.03,
        }
    }
}

impl SparkleParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("sparkles.extent", self.extent)?;
        ensure_non_negative("sparkles.speed", self.speed)?;
        ensure_non_negative("sparkles.amplitude", self.amplitude)?;
        ensure_positive("sparkles.size", self.size)
    }
}

#[derive(Clone, Copy, Debug)]
struct Sparkle {
    origin: Vec3,
    phase: f32,
}

/// Ambient drifting sparkles; positions are a pure function of time.
pub struct SparkleField {
    sparkles: Vec<Sparkle>,
    positions: Vec<Vec3>,
    params: SparkleParams,
}

impl SparkleField {
    pub fn new<R: Rng + ?Sized>(params: SparkleParams, rng: &mut R) -> Result<Self> {
        params.validate()?;
        let half = params.extent * 0.5;
        let sparkles = (0..params.count)
            .map(|_| Sparkle {
                origin: Vec3::new(
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                    rng.gen_range(-half..half),
                ),
                phase: rng.gen_range(0.0..std::f32::consts::TAU),
            })
            .collect::<Vec<_>>();
        let positions = sparkles.iter().map(|s| s.origin).collect();
        Ok(Self {
            sparkles,
            positions,
            params,
        })
    }

    pub fn update(&mut self, elapsed: f32) {
        let SparkleParams {
            speed, amplitude, ..
        } = self.params;
        for (pos, s) in self.positions.iter_mut().zip(&self.sparkles) {
            let t = elapsed * speed + s.phase;
            *pos = s.origin + Vec3::new(0.5 * amplitude * t.cos(), amplitude * t.sin(), 0.0);
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn size(&self) -> f32 {
        self.params.size
    }
}
