//! Per-frame input types and the camera value shared with the web frontend.
//!
//! These types avoid referencing platform-specific APIs. The web frontend
//! fills a [`FrameInput`] from DOM events each frame and consumes the camera
//! matrices the controllers produce.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::clock::FrameTime;
use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, DEFAULT_EYE, DEFAULT_LOOK_AT};

/// Right-handed perspective camera described by an eye and a unit forward vector.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at(DEFAULT_EYE, DEFAULT_LOOK_AT, 1.0)
    }
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3, aspect: f32) -> Self {
        Self {
            eye,
            forward: (target - eye).try_normalize().unwrap_or(Vec3::NEG_Z),
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    /// Point one unit in front of the camera along its current orientation.
    pub fn look_point(&self) -> Vec3 {
        self.eye + self.forward
    }

    /// Re-orient the camera toward `target`, keeping the old orientation when
    /// the target coincides with the eye.
    pub fn look_at(&mut self, target: Vec3) {
        if let Some(dir) = (target - self.eye).try_normalize() {
            self.forward = dir;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect.max(1e-3), self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.eye, self.forward, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Project a world-space point into normalized device coordinates.
///
/// Points on or behind the camera plane have no meaningful projection and
/// yield `None`.
#[inline]
pub fn project_to_ndc(view_proj: &Mat4, world: Vec3) -> Option<Vec2> {
    let clip = *view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
}

/// Pointer position in NDC. Anything outside `[-1, 1]²` (or not finite) means
/// the pointer is off the canvas.
#[inline]
pub fn pointer_from_ndc(x: f32, y: f32) -> Option<Vec2> {
    let inside = |v: f32| v.is_finite() && (-1.0..=1.0).contains(&v);
    (inside(x) && inside(y)).then(|| Vec2::new(x, y))
}

/// Map CSS pixel coordinates relative to the canvas' top-left corner into NDC
/// (y up). Returns `None` for an empty canvas or a point outside it.
#[inline]
pub fn canvas_to_ndc(px: f32, py: f32, width: f32, height: f32) -> Option<Vec2> {
    if !(width > 0.0 && height > 0.0) {
        return None;
    }
    pointer_from_ndc((px / width) * 2.0 - 1.0, 1.0 - (py / height) * 2.0)
}

/// Everything the controllers read for one frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    pub time: FrameTime,
    pub pointer: Option<Vec2>,
    pub aspect: f32,
    /// Primary button held on the canvas.
    pub pointer_down: bool,
    /// Pointer movement in NDC since the previous frame while a drag is active.
    pub drag_delta: Option<Vec2>,
}

impl FrameInput {
    pub fn aspect_or_square(&self) -> f32 {
        if self.aspect.is_finite() && self.aspect > 0.0 {
            self.aspect
        } else {
            1.0
        }
    }
}
