//! The accept / evade button pair.
//!
//! Hovering the evade control sends it to a random spot inside the safe margin
//! and makes the accept control a little bigger each time. The first hover also
//! moves the accept control to the centre, once.

use rand::rngs::StdRng;
use rand::Rng;

use crate::error::{ensure_non_negative, ensure_positive, Result, SceneError};

/// Position in percent of the container, plus the emphasis multiplier.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UiControlState {
    pub x: f32,
    pub y: f32,
    pub emphasis_scale: f32,
}

impl UiControlState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            emphasis_scale: 1.0,
        }
    }

    /// CSS `left`/`top` values.
    pub fn css_position(&self) -> (String, String) {
        (format!("{}%", self.x), format!("{}%", self.y))
    }

    /// CSS transform keeping the control centred on its anchor point.
    pub fn css_transform(&self) -> String {
        if self.emphasis_scale == 1.0 {
            "translate(-50%, -50%)".to_string()
        } else {
            format!("translate(-50%, -50%) scale({})", self.emphasis_scale)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct EvasionParams {
    pub accept_start: (f32, f32),
    pub evade_start: (f32, f32),
    pub accept_centered: (f32, f32),
    /// Safe margin for relocation, in percent, applied to both axes.
    pub margin_min: f32,
    pub margin_max: f32,
    pub emphasis_step: f32,
}

impl Default for EvasionParams {
    fn default() -> Self {
        Self {
            accept_start: (42.0, 70.0),
            evade_start: (58.0, 70.0),
            accept_centered: (50.0, 70.0),
            margin_min: 10.0,
            margin_max: 90.0,
            emphasis_step: 0.15,
        }
    }
}

impl EvasionParams {
    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("evasion.margin_min", self.margin_min)?;
        ensure_positive("evasion.emphasis_step", self.emphasis_step)?;
        if !(self.margin_max > self.margin_min && self.margin_max <= 100.0) {
            return Err(SceneError::InvalidParameter {
                name: "evasion.margin_max",
                value: self.margin_max,
            });
        }
        Ok(())
    }
}

/// Emitted once, when the accept control is activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AcceptedEvent;

pub struct EvasionController<R: Rng = StdRng> {
    accept: UiControlState,
    evade: UiControlState,
    has_engaged: bool,
    accepted: bool,
    hovers: u32,
    params: EvasionParams,
    rng: R,
}

impl<R: Rng> EvasionController<R> {
    pub fn new(params: EvasionParams, rng: R) -> Result<Self> {
        params.validate()?;
        let (ax, ay) = params.accept_start;
        let (ex, ey) = params.evade_start;
        Ok(Self {
            accept: UiControlState::at(ax, ay),
            evade: UiControlState::at(ex, ey),
            has_engaged: false,
            accepted: false,
            hovers: 0,
            params,
            rng,
        })
    }

    /// Pointer entered the evade control. Ignored once accepted.
    pub fn on_evade_hover(&mut self) {
        if self.accepted {
            return;
        }
        if !self.has_engaged {
            self.has_engaged = true;
            let (cx, cy) = self.params.accept_centered;
            self.accept.x = cx;
            self.accept.y = cy;
            log::debug!("[evasion] engaged, accept control centred");
        }
        let range = self.params.margin_min..self.params.margin_max;
        self.evade.x = self.rng.gen_range(range.clone());
        self.evade.y = self.rng.gen_range(range);
        self.accept.emphasis_scale += self.params.emphasis_step;
        self.hovers += 1;
        log::debug!(
            "[evasion] hover #{} -> evade=({:.1}%, {:.1}%) emphasis={:.2}",
            self.hovers,
            self.evade.x,
            self.evade.y,
            self.accept.emphasis_scale
        );
    }

    /// Accept control activated. Yields the event only the first time.
    pub fn on_accept_activate(&mut self) -> Option<AcceptedEvent> {
        if self.accepted {
            return None;
        }
        self.accepted = true;
        log::info!("[evasion] accepted after {} evasions", self.hovers);
        Some(AcceptedEvent)
    }

    pub fn accept(&self) -> &UiControlState {
        &self.accept
    }

    pub fn evade(&self) -> &UiControlState {
        &self.evade
    }

    pub fn has_engaged(&self) -> bool {
        self.has_engaged
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    pub fn hover_count(&self) -> u32 {
        self.hovers
    }

    pub fn params(&self) -> &EvasionParams {
        &self.params
    }
}
