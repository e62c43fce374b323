//! Drag-to-rotate for a group, clamped to polar/azimuth limits, easing back to
//! rest on release when `snap` is set.

use glam::{Quat, Vec2};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6, PI};

use crate::camera_rig::smoothing_factor;
use crate::error::{ensure_positive, Result, SceneError};

#[derive(Clone, Debug, PartialEq)]
pub struct PresentationParams {
    /// Limits for rotation about X.
    pub polar: (f32, f32),
    /// Limits for rotation about Y.
    pub azimuth: (f32, f32),
    pub speed: f32,
    pub snap: bool,
    /// Easing rate toward the target rotation (1/s).
    pub damping: f32,
}

impl PresentationParams {
    pub fn heart() -> Self {
        Self {
            polar: (-FRAC_PI_4, FRAC_PI_4),
            azimuth: (-FRAC_PI_2, FRAC_PI_2),
            ..Self::default()
        }
    }

    pub fn table() -> Self {
        Self {
            polar: (-FRAC_PI_6, FRAC_PI_6),
            azimuth: (-FRAC_PI_4, FRAC_PI_4),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_positive("presentation.speed", self.speed)?;
        ensure_positive("presentation.damping", self.damping)?;
        for (name, (lo, hi)) in [("presentation.polar", self.polar), ("presentation.azimuth", self.azimuth)] {
            if !(lo <= 0.0 && hi >= 0.0 && lo.is_finite() && hi.is_finite()) {
                return Err(SceneError::InvalidParameter { name, value: lo });
            }
        }
        Ok(())
    }
}

impl Default for PresentationParams {
    fn default() -> Self {
        Self {
            polar: (0.0, 0.0),
            azimuth: (0.0, 0.0),
            speed: 1.5,
            snap: true,
            damping: 8.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PresentationControls {
    params: PresentationParams,
    /// (polar, azimuth) the drag asks for.
    target: Vec2,
    current: Vec2,
    dragging: bool,
}

impl PresentationControls {
    pub fn new(params: PresentationParams) -> Self {
        Self {
            params,
            target: Vec2::ZERO,
            current: Vec2::ZERO,
            dragging: false,
        }
    }

    /// Feed a pointer movement in NDC while the pointer is held down.
    /// A full-width drag (2 NDC units) turns by `speed·π`.
    pub fn drag(&mut self, delta_ndc: Vec2) {
        if !delta_ndc.is_finite() {
            return;
        }
        self.dragging = true;
        let scale = self.params.speed * PI * 0.5;
        let (plo, phi) = self.params.polar;
        let (alo, ahi) = self.params.azimuth;
        self.target.x = (self.target.x - delta_ndc.y * scale).clamp(plo, phi);
        self.target.y = (self.target.y + delta_ndc.x * scale).clamp(alo, ahi);
    }

    pub fn release(&mut self) {
        self.dragging = false;
        if self.params.snap {
            self.target = Vec2::ZERO;
        }
    }

    pub fn update(&mut self, dt: f32) {
        let a = smoothing_factor(self.params.damping, dt);
        self.current = self.current.lerp(self.target, a);
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current (polar, azimuth).
    pub fn angles(&self) -> Vec2 {
        self.current
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_euler(glam::EulerRot::XYZ, self.current.x, self.current.y, 0.0)
    }
}
