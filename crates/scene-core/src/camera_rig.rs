//! Two-state camera transition.
//!
//! The mode is read every frame, never latched, so toggling is idempotent and
//! reversible at any time. Position and look point both ease toward the
//! selected target with `1 - exp(-k·dt)` so the convergence rate does not
//! depend on frame rate.

use glam::{Mat4, Vec3};

use crate::constants::{DEFAULT_EYE, DEFAULT_LOOK_AT, FOCUSED_EYE, FOCUSED_LOOK_AT};
use crate::error::{ensure_positive, Result};
use crate::state::Camera;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraMode {
    #[default]
    Default,
    Focused,
}

impl CameraMode {
    pub fn from_accepted(accepted: bool) -> Self {
        if accepted {
            Self::Focused
        } else {
            Self::Default
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraTarget {
    pub position: Vec3,
    pub look_at: Vec3,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CameraParams {
    pub default_target: CameraTarget,
    pub focused_target: CameraTarget,
    /// Position smoothing rate (1/s).
    pub position_rate: f32,
    /// Look point smoothing rate (1/s).
    pub look_rate: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            default_target: CameraTarget {
                position: DEFAULT_EYE,
                look_at: DEFAULT_LOOK_AT,
            },
            focused_target: CameraTarget {
                position: FOCUSED_EYE,
                look_at: FOCUSED_LOOK_AT,
            },
            position_rate: 1.5,
            look_rate: 2.0,
        }
    }
}

impl CameraParams {
    pub fn validate(&self) -> Result<()> {
        ensure_positive("camera.position_rate", self.position_rate)?;
        ensure_positive("camera.look_rate", self.look_rate)
    }

    pub fn target(&self, mode: CameraMode) -> CameraTarget {
        match mode {
            CameraMode::Default => self.default_target,
            CameraMode::Focused => self.focused_target,
        }
    }
}

/// Fraction of the remaining distance covered in `dt` at `rate`.
#[inline]
pub fn smoothing_factor(rate: f32, dt: f32) -> f32 {
    if dt > 0.0 && dt.is_finite() {
        1.0 - (-rate * dt).exp()
    } else {
        0.0
    }
}

pub struct CameraRig {
    camera: Camera,
    params: CameraParams,
    mode: CameraMode,
}

impl CameraRig {
    /// Start in `Default` mode, already sitting on the default target.
    pub fn new(params: CameraParams, aspect: f32) -> Result<Self> {
        params.validate()?;
        let start = params.default_target;
        Ok(Self {
            camera: Camera::looking_at(start.position, start.look_at, aspect),
            params,
            mode: CameraMode::Default,
        })
    }

    pub fn update(&mut self, mode: CameraMode, dt: f32, aspect: f32) {
        if mode != self.mode {
            log::debug!("[camera] {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
        }
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
        let target = self.params.target(mode);

        let a = smoothing_factor(self.params.position_rate, dt);
        self.camera.eye = self.camera.eye.lerp(target.position, a);

        let b = smoothing_factor(self.params.look_rate, dt);
        let smoothed = self.camera.look_point().lerp(target.look_at, b);
        self.camera.look_at(smoothed);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn position(&self) -> Vec3 {
        self.camera.eye
    }

    pub fn look_point(&self) -> Vec3 {
        self.camera.look_point()
    }

    pub fn target(&self) -> CameraTarget {
        self.params.target(self.mode)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.view_projection()
    }
}
