//! Pointer-reactive star field.
//!
//! Every particle keeps the origin it was created with. Each frame the origin
//! is projected to NDC and, if the pointer is close enough on screen, pushed
//! away along the screen-space direction from pointer to particle. The push is
//! applied directly on world X/Y: the camera mostly faces -Z, so this reads as
//! "away from the cursor" without a full unprojection. Displacement is
//! recomputed from the origin every frame; nothing is integrated.

use glam::{Mat4, Vec2, Vec3};
use rand::Rng;

use crate::constants::MAX_PARTICLE_COUNT;
use crate::error::{ensure_non_negative, ensure_positive, Result, SceneError};
use crate::state::project_to_ndc;

/// Axis-aligned box the origins are scattered in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingVolume {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingVolume {
    fn default() -> Self {
        // x, y in [-50, 50); z in [-65, -35), well behind the heart
        Self {
            min: Vec3::new(-50.0, -50.0, -65.0),
            max: Vec3::new(50.0, 50.0, -35.0),
        }
    }
}

impl BoundingVolume {
    pub fn validate(&self) -> Result<()> {
        if self.min.is_finite() && self.max.is_finite() && self.min.cmple(self.max).all() {
            Ok(())
        } else {
            Err(SceneError::InvalidBounds)
        }
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let t = Vec3::new(rng.gen::<f32>(), rng.gen::<f32>(), rng.gen::<f32>());
        self.min + (self.max - self.min) * t
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleParams {
    pub count: usize,
    pub bounds: BoundingVolume,
    /// Repulsion radius in NDC units.
    pub radius: f32,
    /// World-space displacement at full force.
    pub strength: f32,
}

impl Default for ParticleParams {
    fn default() -> Self {
        Self {
            count: 5000,
            bounds: BoundingVolume::default(),
            radius: 0.4,
            strength: 2.0,
        }
    }
}

impl ParticleParams {
    pub fn validate(&self) -> Result<()> {
        if self.count > MAX_PARTICLE_COUNT {
            return Err(SceneError::InvalidParticleCount {
                count: self.count,
                max: MAX_PARTICLE_COUNT,
            });
        }
        self.bounds.validate()?;
        ensure_positive("particles.radius", self.radius)?;
        ensure_non_negative("particles.strength", self.strength)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub origin: Vec3,
    pub displaced: Vec3,
}

impl Particle {
    pub fn at(origin: Vec3) -> Self {
        Self {
            origin,
            displaced: origin,
        }
    }
}

/// Displaced position of one origin for the current pointer and camera.
///
/// A pointer of `None` (off-canvas) or an origin behind the camera leaves the
/// origin untouched.
#[inline]
pub fn displace(
    origin: Vec3,
    pointer: Option<Vec2>,
    view_proj: &Mat4,
    radius: f32,
    strength: f32,
) -> Vec3 {
    let (Some(pointer), Some(ndc)) = (pointer, project_to_ndc(view_proj, origin)) else {
        return origin;
    };
    let d = ndc - pointer;
    let dist = d.length();
    if !(dist < radius) {
        return origin;
    }
    let force = (radius - dist) / radius;
    // atan2(0, 0) == 0, so a particle right under the pointer goes along +X
    let angle = d.y.atan2(d.x);
    let push = force * strength;
    Vec3::new(
        origin.x + angle.cos() * push,
        origin.y + angle.sin() * push,
        origin.z,
    )
}

/// Fixed-size particle set plus the parameters that shaped it.
pub struct ParticleField {
    particles: Vec<Particle>,
    params: ParticleParams,
    dirty: bool,
}

impl ParticleField {
    /// Scatter `params.count` origins uniformly inside `params.bounds`.
    pub fn new<R: Rng + ?Sized>(params: ParticleParams, rng: &mut R) -> Result<Self> {
        params.validate()?;
        let particles = (0..params.count)
            .map(|_| Particle::at(params.bounds.sample(rng)))
            .collect::<Vec<_>>();
        log::debug!("[particles] created {} origins", particles.len());
        Ok(Self {
            particles,
            params,
            dirty: true,
        })
    }

    /// Recreate the whole set when the count or volume changes; a no-op for
    /// identical parameters.
    pub fn reconfigure<R: Rng + ?Sized>(&mut self, params: ParticleParams, rng: &mut R) -> Result<()> {
        if params.count == self.params.count && params.bounds == self.params.bounds {
            params.validate()?;
            self.params = params;
            return Ok(());
        }
        *self = Self::new(params, rng)?;
        Ok(())
    }

    /// Recompute every displaced position. Always marks the instance data dirty.
    pub fn update(&mut self, pointer: Option<Vec2>, view_proj: &Mat4) {
        let ParticleParams {
            radius, strength, ..
        } = self.params;
        for p in &mut self.particles {
            p.displaced = displace(p.origin, pointer, view_proj, radius, strength);
        }
        self.dirty = true;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn params(&self) -> &ParticleParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Whether the renderer must re-upload instance data; cleared on read.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.particles.iter().map(|p| p.displaced)
    }
}
