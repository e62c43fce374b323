// Front-end wiring and renderer tuning constants. Scene tuning lives in
// `scene_core::constants`.

// DOM element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const ACCEPT_BUTTON_ID: &str = "btn-yes";
pub const EVADE_BUTTON_ID: &str = "btn-no";
pub const ASK_VIEW_ID: &str = "ask-view";
pub const SUCCESS_VIEW_ID: &str = "success-view";
pub const CAROUSEL_TRACK_ID: &str = "carousel-track";

// CSS hook toggled on hidden views
pub const HIDDEN_CLASS: &str = "hidden";

// Upper bound on one frame's delta; longer gaps (tab in background) are clamped
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1;

// Instance buffer growth: capacity is rounded up to a multiple of this
pub const INSTANCE_CHUNK: usize = 1024;

// Drawn star and sparkle shading
pub const STAR_OPACITY: f32 = 0.8;
pub const SPARKLE_OPACITY: f32 = 0.7;
