use glam::Vec3;

// Shared visual tuning constants for the scene composer and the web frontend.

/// Convert a `0xRRGGBB` colour into normalized sRGB components.
pub const fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

// Camera
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 2000.0;
pub const DEFAULT_EYE: Vec3 = Vec3::new(0.0, 0.0, 8.0);
pub const DEFAULT_LOOK_AT: Vec3 = Vec3::ZERO;
pub const FOCUSED_EYE: Vec3 = Vec3::new(0.0, 4.0, 5.0); // above the table, closer in
pub const FOCUSED_LOOK_AT: Vec3 = Vec3::new(0.0, -1.0, 0.0);

// Particle field
pub const MAX_PARTICLE_COUNT: usize = 200_000;
pub const PARTICLE_RADIUS: f32 = 0.05; // world-space sphere radius of one star

// Palette
pub const BACKGROUND: [f32; 3] = rgb(0x1a0b14);
pub const STAR_WHITE: [f32; 3] = rgb(0xffffff);
pub const SPARKLE_PINK: [f32; 3] = rgb(0xffb3c6);
pub const HEART_RED: [f32; 3] = rgb(0xff0040);
pub const HEART_EMISSIVE: [f32; 3] = rgb(0x500010);
pub const TABLE_WOOD: [f32; 3] = rgb(0x4a0e16);
pub const TABLE_CLOTH: [f32; 3] = rgb(0xffccd5);
pub const CANDLE_WAX: [f32; 3] = rgb(0xfff0f5);
pub const FLAME_ORANGE: [f32; 3] = rgb(0xffaa00);
pub const SHELL_GREEN: [f32; 3] = rgb(0x228b22);
pub const SKIN_GREEN: [f32; 3] = rgb(0x8fbc8f);
pub const PANDA_WHITE: [f32; 3] = rgb(0xffffff);
pub const INK_BLACK: [f32; 3] = rgb(0x000000);

// Lighting
pub const AMBIENT_INTENSITY: f32 = 0.5;
pub const KEY_LIGHT_COLOR: [f32; 3] = rgb(0xffdddd);
pub const RIM_LIGHT_COLOR: [f32; 3] = rgb(0xff0000);
pub const FILL_LIGHT_COLOR: [f32; 3] = rgb(0x400010);
pub const CANDLE_LIGHT_RANGE: f32 = 10.0;
pub const MAX_POINT_LIGHTS: usize = 8;

// Dinner layout
pub const CANDLE_SCALE: f32 = 0.7;
pub const CANDLE_POSITIONS: [[f32; 3]; 5] = [
    [0.0, 0.0, -2.5],
    [-2.0, 0.0, -1.5],
    [2.0, 0.0, -1.5],
    [-1.5, 0.0, 1.0],
    [1.5, 0.0, 1.0],
];
pub const FLAME_OFFSET_Y: f32 = 2.1;
pub const CANDLE_LIGHT_OFFSET_Y: f32 = 2.2;
