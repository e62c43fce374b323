use thiserror::Error;

/// Errors raised while building a scene.
///
/// Only configuration problems are fatal. Per-frame code never returns an
/// error: degenerate input is sanitised where it is read.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SceneError {
    #[error("particle count {count} exceeds the maximum of {max}")]
    InvalidParticleCount { count: usize, max: usize },

    #[error("bounding volume is empty or not finite")]
    InvalidBounds,

    #[error("parameter `{name}` has invalid value {value}")]
    InvalidParameter { name: &'static str, value: f32 },

    #[error("malformed curve definition: {0}")]
    MalformedCurve(String),

    /// Recovered locally by showing a placeholder label; kept as an error value
    /// so it can be logged consistently.
    #[error("photo {index} could not be loaded")]
    MissingAsset { index: usize },
}

pub type Result<T> = std::result::Result<T, SceneError>;

/// Reject non-finite or non-positive values for a named parameter.
pub(crate) fn ensure_positive(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidParameter { name, value })
    }
}

/// Reject non-finite or negative values for a named parameter.
pub(crate) fn ensure_non_negative(name: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidParameter { name, value })
    }
}
