//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (storage order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod loader;
pub mod powerup;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{BrickHit, StepReport, paddle_deflection, step_balls};
pub use loader::build_bricks;
pub use powerup::{apply_effect, expire_effects, roll_spawn, step_powerups};
pub use rect::{Rect, intersects};
pub use state::{
    ActiveEffects, Ball, Brick, GamePhase, GameState, HeldInput, HitOutcome, Paddle, PowerUp,
    PowerUpKind, Rgb, Session,
};
pub use tick::{InputEvent, TickInput, tick};
