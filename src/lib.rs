//! Beach Dash - a side-scrolling beach cleanup game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, scoring)
//! - `renderer`: DOM image-element rendering (wasm only)
//! - `audio`: Background loop + effect clips (wasm only)
//! - `settings`: Runtime preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick ~16ms)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// World dimensions (CSS pixels)
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const WORLD_HEIGHT: f32 = 450.0;
    /// Height of the sand strip at the bottom edge
    pub const GROUND_MARGIN: f32 = 10.0;

    /// Sprite sizes
    pub const PLAYER_WIDTH: f32 = 100.0;
    pub const PLAYER_HEIGHT: f32 = 120.0;
    pub const CAN_WIDTH: f32 = 80.0;
    pub const CAN_HEIGHT: f32 = 120.0;
    pub const ITEM_WIDTH: f32 = 20.0;
    pub const ITEM_HEIGHT: f32 = 20.0;
    pub const PILE_WIDTH: f32 = 120.0;
    pub const PILE_HEIGHT: f32 = 80.0;

    /// Player run speed (px/s, 5 px per tick)
    pub const RUN_SPEED: f32 = 300.0;
    /// World scroll speed (px/s, 2 px per tick)
    pub const SCROLL_SPEED: f32 = 120.0;

    /// Jump tuning: half-sine arc over a fixed duration
    pub const JUMP_HEIGHT: f32 = 150.0;
    pub const JUMP_DISTANCE: f32 = 200.0;
    pub const JUMP_DURATION_SECS: f32 = 0.5;
    /// Minimum ticks between jumps (100ms at 60 Hz)
    pub const JUMP_COOLDOWN_TICKS: u64 = 6;

    /// Throw tuning: fixed launch angle and speed
    pub const THROW_ANGLE: f32 = -std::f32::consts::FRAC_PI_6;
    pub const THROW_SPEED: f32 = 600.0;

    /// Projectile gravity (px/s^2, 0.5 px/tick^2 at 60 Hz)
    pub const GRAVITY: f32 = 1800.0;
    /// Horizontal velocity decay per tick
    pub const THROW_FRICTION: f32 = 0.99;

    /// Pool minimums for recycled entities
    pub const MIN_CANS: usize = 3;
    pub const MIN_PILES: usize = 2;
    /// Spawn jitter ahead of the right edge
    pub const CAN_SPAWN_RANGE: f32 = 300.0;
    pub const PILE_SPAWN_RANGE: f32 = 500.0;

    /// Pile collision penalty and invulnerability window (1s at 60 Hz)
    pub const PILE_PENALTY: i64 = -100;
    pub const HURT_COOLDOWN_TICKS: u64 = 60;

    /// Score popup float speed (px/s) and fade rate (opacity/s)
    pub const POPUP_RISE_SPEED: f32 = 60.0;
    pub const POPUP_FADE_RATE: f32 = 1.2;

    /// Camera smoothing factor per tick (follow mode)
    pub const CAMERA_SMOOTHING: f32 = 0.1;
}

/// Y coordinate of the top edge of an entity standing on the ground line
#[inline]
pub fn ground_y(entity_height: f32) -> f32 {
    consts::WORLD_HEIGHT - entity_height - consts::GROUND_MARGIN
}
