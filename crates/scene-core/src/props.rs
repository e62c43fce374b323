//! Oscillating prop animation: candle light flicker, flame jitter and the
//! floating bob applied to the heart.
//!
//! Every animated instance owns its own generator so flicker never correlates
//! across candles, while all of them read the same elapsed time.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{ensure_non_negative, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct FlickerParams {
    pub base: f32,
    pub amplitude: f32,
    pub frequency: f32,
    /// Upper bound of the uniform noise added each frame.
    pub noise: f32,
}

impl Default for FlickerParams {
    fn default() -> Self {
        Self {
            base: 1.5,
            amplitude: 0.3,
            frequency: 15.0,
            noise: 0.2,
        }
    }
}

impl FlickerParams {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("flicker.base", self.base)?;
        ensure_non_negative("flicker.amplitude", self.amplitude)?;
        ensure_non_negative("flicker.frequency", self.frequency)?;
        ensure_non_negative("flicker.noise", self.noise)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlameParams {
    pub scale_amplitude: f32,
    pub scale_frequency: f32,
    pub noise: f32,
    pub sway_amplitude: f32,
    pub sway_frequency: f32,
}

impl Default for FlameParams {
    fn default() -> Self {
        Self {
            scale_amplitude: 0.1,
            scale_frequency: 20.0,
            noise: 0.1,
            sway_amplitude: 0.1,
            sway_frequency: 10.0,
        }
    }
}

impl FlameParams {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("flame.scale_amplitude", self.scale_amplitude)?;
        ensure_non_negative("flame.scale_frequency", self.scale_frequency)?;
        ensure_non_negative("flame.noise", self.noise)?;
        ensure_non_negative("flame.sway_amplitude", self.sway_amplitude)?;
        ensure_non_negative("flame.sway_frequency", self.sway_frequency)
    }
}

/// Result of one animator tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PropFrame {
    pub scale: f32,
    /// Light intensity for a flicker, Z rotation (radians) for a flame.
    pub intensity_or_rotation: f32,
}

/// `base + A·sin(t·f + phase) + noise`, with the noise sample supplied.
#[inline]
pub fn flicker_intensity(params: &FlickerParams, elapsed: f32, phase: f32, noise: f32) -> f32 {
    params.base + params.amplitude * (elapsed * params.frequency + phase).sin() + noise
}

/// Vertical flame scale and sway angle, with the noise sample supplied.
/// Flames share the clock; only their noise differs.
#[inline]
pub fn flame_jitter(params: &FlameParams, elapsed: f32, noise: f32) -> (f32, f32) {
    let scale_y = 1.0 + params.scale_amplitude * (elapsed * params.scale_frequency).sin() + noise;
    let sway = params.sway_amplitude * (elapsed * params.sway_frequency).sin();
    (scale_y, sway)
}

/// Draw from `[0, bound)`; zero when the bound is zero.
#[inline]
fn draw_noise<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.gen_range(0.0..bound)
    } else {
        0.0
    }
}

/// Flickering point light.
#[derive(Clone, Debug)]
pub struct FlickerLight<R: Rng = StdRng> {
    pub phase_seed: f32,
    pub current_intensity: f32,
    params: FlickerParams,
    rng: R,
}

impl<R: Rng> FlickerLight<R> {
    pub fn new(params: FlickerParams, phase_seed: f32, rng: R) -> Self {
        let current_intensity = params.base;
        Self {
            phase_seed,
            current_intensity,
            params,
            rng,
        }
    }

    /// Noise is redrawn every call and never smoothed.
    pub fn tick(&mut self, elapsed: f32) -> PropFrame {
        let noise = draw_noise(&mut self.rng, self.params.noise);
        self.current_intensity = flicker_intensity(&self.params, elapsed, self.phase_seed, noise);
        PropFrame {
            scale: 1.0,
            intensity_or_rotation: self.current_intensity,
        }
    }
}

/// Jittering flame mesh: vertical scale plus a small sway about Z.
#[derive(Clone, Debug)]
pub struct FlameJitter<R: Rng = StdRng> {
    pub current_scale: f32,
    pub current_rotation: f32,
    params: FlameParams,
    rng: R,
}

impl<R: Rng> FlameJitter<R> {
    pub fn new(params: FlameParams, rng: R) -> Self {
        Self {
            current_scale: 1.0,
            current_rotation: 0.0,
            params,
            rng,
        }
    }

    pub fn tick(&mut self, elapsed: f32) -> PropFrame {
        let noise = draw_noise(&mut self.rng, self.params.noise);
        let (scale, sway) = flame_jitter(&self.params, elapsed, noise);
        self.current_scale = scale;
        self.current_rotation = sway;
        PropFrame {
            scale,
            intensity_or_rotation: sway,
        }
    }

    /// Non-uniform scale to apply to the flame node.
    pub fn scale_vec(&self) -> Vec3 {
        Vec3::new(1.0, self.current_scale, 1.0)
    }
}

/// Derive an independent generator for animator `index` from a base seed.
pub fn instance_rng(seed: u64, index: usize) -> StdRng {
    let mix = seed ^ (index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mix)
}

/// A candle's two animators, each with its own generator.
pub struct CandleAnimator {
    pub light: FlickerLight,
    pub flame: FlameJitter,
}

impl CandleAnimator {
    pub fn new(flicker: FlickerParams, flame: FlameParams, seed: u64, index: usize) -> Self {
        let mut seeder = instance_rng(seed, index);
        let phase_seed = seeder.gen_range(0.0..std::f32::consts::TAU);
        let light_rng = StdRng::seed_from_u64(seeder.gen());
        let flame_rng = StdRng::seed_from_u64(seeder.gen());
        Self {
            light: FlickerLight::new(flicker, phase_seed, light_rng),
            flame: FlameJitter::new(flame, flame_rng),
        }
    }

    pub fn tick(&mut self, elapsed: f32) {
        self.light.tick(elapsed);
        self.flame.tick(elapsed);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FloatParams {
    pub speed: f32,
    pub rotation_intensity: f32,
    pub float_intensity: f32,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self {
            speed: 2.0,
            rotation_intensity: 0.2,
            float_intensity: 0.5,
        }
    }
}

impl FloatParams {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("float.speed", self.speed)?;
        ensure_non_negative("float.rotation_intensity", self.rotation_intensity)?;
        ensure_non_negative("float.float_intensity", self.float_intensity)
    }
}

/// Gentle hover: Euler XYZ rotation and a Y offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FloatPose {
    pub rotation: Vec3,
    pub offset_y: f32,
}

pub fn float_motion(params: &FloatParams, elapsed: f32) -> FloatPose {
    let s = elapsed / 4.0 * params.speed;
    FloatPose {
        rotation: Vec3::new(s.cos() / 8.0, s.sin() / 8.0, s.sin() / 20.0) * params.rotation_intensity,
        offset_y: s.sin() / 10.0 * params.float_intensity,
    }
}
