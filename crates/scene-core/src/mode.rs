use crate::camera_rig::CameraMode;
use crate::evasion::AcceptedEvent;

/// Global application mode. Moves forward only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AppMode {
    #[default]
    Asking,
    Accepted,
}

#[derive(Clone, Debug, Default)]
pub struct Session {
    mode: AppMode,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the accept event. Returns `true` only for the transition itself.
    pub fn accept(&mut self, _event: AcceptedEvent) -> bool {
        if self.mode == AppMode::Accepted {
            return false;
        }
        self.mode = AppMode::Accepted;
        log::info!("[session] accepted");
        true
    }

    pub fn mode(&self) -> AppMode {
        self.mode
    }

    pub fn is_accepted(&self) -> bool {
        self.mode == AppMode::Accepted
    }

    pub fn camera_mode(&self) -> CameraMode {
        CameraMode::from_accepted(self.is_accepted())
    }
}
