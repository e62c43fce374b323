use glam::Vec2;
use scene_core::{canvas_to_ndc, FrameInput, FrameTime};

use crate::constants::MAX_FRAME_DELTA_SEC;

/// Pointer state shared between DOM listeners and the frame loop.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub ndc: Option<Vec2>,
    pub down: bool,
    last_drag: Option<Vec2>,
    drag_accum: Vec2,
}

impl PointerState {
    /// `pointermove` in CSS pixels relative to the canvas' top-left corner.
    pub fn on_move(&mut self, px: f32, py: f32, width: f32, height: f32) {
        let ndc = canvas_to_ndc(px, py, width, height);
        if self.down {
            if let (Some(prev), Some(now)) = (self.last_drag, ndc) {
                self.drag_accum += now - prev;
            }
            if ndc.is_some() {
                self.last_drag = ndc;
            }
        }
        self.ndc = ndc;
    }

    pub fn on_leave(&mut self) {
        self.ndc = None;
    }

    pub fn on_down(&mut self, px: f32, py: f32, width: f32, height: f32) {
        self.ndc = canvas_to_ndc(px, py, width, height);
        self.down = true;
        self.last_drag = self.ndc;
        self.drag_accum = Vec2::ZERO;
    }

    pub fn on_up(&mut self) {
        self.down = false;
        self.last_drag = None;
        self.drag_accum = Vec2::ZERO;
    }

    /// Snapshot for one frame. Drains the drag movement gathered since the
    /// previous call.
    pub fn frame_input(&mut self, time: FrameTime, aspect: f32) -> FrameInput {
        let drag_delta = self
            .down
            .then(|| std::mem::replace(&mut self.drag_accum, Vec2::ZERO));
        FrameInput {
            time: clamp_delta(time),
            pointer: self.ndc,
            aspect,
            pointer_down: self.down,
            drag_delta,
        }
    }
}

#[inline]
pub fn clamp_delta(time: FrameTime) -> FrameTime {
    let t = time.sanitized();
    FrameTime::new(t.elapsed, t.delta.min(MAX_FRAME_DELTA_SEC))
}

#[inline]
pub fn aspect_of(width: u32, height: u32) -> f32 {
    if height == 0 {
        1.0
    } else {
        width as f32 / height as f32
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ToggleFullscreen,
    ExitFullscreen,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    match key {
        "Enter" => Some(KeyAction::ToggleFullscreen),
        "Escape" => Some(KeyAction::ExitFullscreen),
        _ => None,
    }
}
