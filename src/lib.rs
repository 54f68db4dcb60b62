//! Arkanoid Remix - brick-breaker simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, power-ups, game state)
//! - `levels`: Level catalog (built-in layouts and JSON assets)
//! - `snapshot`: Read-only view handed to the renderer each tick
//! - `audio`: Sound collaborator seam
//! - `settings`: Runtime configuration

pub mod audio;
pub mod levels;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use levels::{LevelCatalog, LevelError};
pub use settings::Settings;
pub use snapshot::RenderSnapshot;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 900.0;
    pub const SCREEN_HEIGHT: f32 = 700.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Horizontal speed (units per tick)
    pub const PADDLE_SPEED: f32 = 14.0;
    /// Gap between the paddle bottom and the screen bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 30.0;
    /// Width multiplier while the enlarge power-up is active
    pub const PADDLE_ENLARGE_FACTOR: f32 = 1.5;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    pub const BALL_START_DX: f32 = 5.0;
    pub const BALL_START_DY: f32 = -5.0;
    /// Ball center height above the screen bottom at level start (plus paddle height)
    pub const BALL_START_OFFSET: f32 = 40.0;
    /// Horizontal speed when the ball hits the very edge of the paddle
    pub const MAX_DEFLECTION_SPEED: f32 = 6.0;

    /// Brick grid
    pub const BRICK_WIDTH: f32 = 70.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_GAP: f32 = 5.0;
    pub const BRICK_TOP_OFFSET: f32 = 50.0;
    /// Layout value for a brick that can never be destroyed
    pub const INDESTRUCTIBLE_BRICK: u32 = 99;

    /// Power-up defaults
    pub const POWERUP_SIZE: f32 = 30.0;
    /// Fall speed (units per tick)
    pub const POWERUP_FALL_SPEED: f32 = 6.0;
    /// Probability of a power-up dropping from a destroyed brick
    pub const DEFAULT_POWERUP_CHANCE: f32 = 0.2;
    /// Horizontal offset of multi-ball spawns from the paddle center
    pub const MULTI_BALL_OFFSET: f32 = 20.0;
    pub const ENLARGE_DURATION_MS: u32 = 5000;
    pub const SLOW_DURATION_MS: u32 = 7000;

    /// Session defaults
    pub const STARTING_LIVES: u8 = 3;
    pub const BRICK_SCORE: u64 = 10;
}

/// Convert a wall-clock duration to a whole number of simulation ticks
#[inline]
pub fn ms_to_ticks(ms: u32) -> u64 {
    (ms as u64 * consts::TICK_RATE as u64) / 1000
}
