//! Frame-driven animation and interaction rules for the heart scene.
//!
//! Nothing here touches the DOM or the GPU; the web front-end feeds a
//! [`FrameInput`] per frame and draws what [`Scene::update`] returns.

pub mod assets;
pub mod camera_rig;
pub mod carousel;
pub mod clock;
pub mod constants;
pub mod error;
pub mod evasion;
pub mod heart;
pub mod mesh;
pub mod mode;
pub mod params;
pub mod particles;
pub mod presentation;
pub mod primitives;
pub mod props;
pub mod scene;
pub mod scene_graph;
pub mod sparkles;
pub mod state;

pub use assets::*;
pub use camera_rig::*;
pub use carousel::*;
pub use clock::*;
pub use error::{Result, SceneError};
pub use evasion::*;
pub use heart::*;
pub use mesh::*;
pub use mode::*;
pub use params::*;
pub use particles::*;
pub use presentation::*;
pub use props::*;
pub use scene::*;
pub use scene_graph::*;
pub use sparkles::*;
pub use state::*;
