use crate::assets::PhotoManifest;
use crate::camera_rig::CameraParams;
use crate::carousel::CarouselParams;
use crate::error::Result;
use crate::evasion::EvasionParams;
use crate::heart::HeartParams;
use crate::particles::ParticleParams;
use crate::presentation::PresentationParams;
use crate::props::{FlameParams, FlickerParams, FloatParams};
use crate::sparkles::SparkleParams;

/// Every tunable of the scene. `Default` is the shipped configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneParams {
    pub particles: ParticleParams,
    pub camera: CameraParams,
    pub flicker: FlickerParams,
    pub flame: FlameParams,
    pub heart: HeartParams,
    pub float: FloatParams,
    pub heart_controls: PresentationParams,
    pub table_controls: PresentationParams,
    pub sparkles: SparkleParams,
    pub evasion: EvasionParams,
    pub carousel: CarouselParams,
    pub photos: PhotoManifest,
    /// Base seed; every random consumer derives its own generator from it.
    pub seed: u64,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            particles: ParticleParams::default(),
            camera: CameraParams::default(),
            flicker: FlickerParams::default(),
            flame: FlameParams::default(),
            heart: HeartParams::default(),
            float: FloatParams::default(),
            heart_controls: PresentationParams::heart(),
            table_controls: PresentationParams::table(),
            sparkles: SparkleParams::default(),
            evasion: EvasionParams::default(),
            carousel: CarouselParams::default(),
            photos: PhotoManifest::default(),
            seed: 0x5EED_14_02,
        }
    }
}

impl SceneParams {
    /// Check every section; the first problem wins.
    pub fn validate(&self) -> Result<()> {
        self.particles.validate()?;
        self.camera.validate()?;
        self.flicker.validate()?;
        self.flame.validate()?;
        self.heart.validate()?;
        self.float.validate()?;
        self.heart_controls.validate()?;
        self.table_controls.validate()?;
        self.sparkles.validate()?;
        self.evasion.validate()?;
        self.carousel.validate()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
