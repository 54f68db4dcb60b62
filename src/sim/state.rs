//! Game state and core simulation types
//!
//! Entities are plain data with a bounding [`Rect`] plus their own behavior.
//! All mutable session data lives in [`GameState`]; nothing is global.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::*;
use crate::levels::LevelCatalog;
use crate::settings::Settings;

/// RGB color handed to the renderer
pub type Rgb = [u8; 3];

pub const WHITE: Rgb = [255, 255, 255];
pub const RED: Rgb = [255, 0, 0];
pub const GREEN: Rgb = [0, 255, 0];
pub const BLUE: Rgb = [0, 0, 255];
pub const GRAY: Rgb = [100, 100, 100];

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    Title,
    /// Active gameplay
    Playing,
    /// Out of lives, waiting for retry or main menu
    GameOver,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Horizontal speed (units per tick)
    pub speed: f32,
    /// Width to return to when effects end
    pub base_width: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                SCREEN_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_MARGIN,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            speed: PADDLE_SPEED,
            base_width: PADDLE_WIDTH,
        }
    }
}

impl Paddle {
    /// Move horizontally by `direction` (-1, 0 or +1) times speed, staying on screen
    pub fn step(&mut self, direction: i8) {
        self.rect.pos.x += f32::from(direction.signum()) * self.speed;
        let max_x = (SCREEN_WIDTH - self.rect.width()).max(0.0);
        self.rect.pos.x = self.rect.pos.x.clamp(0.0, max_x);
    }

    /// Change width around the current center
    pub fn resize(&mut self, new_width: f32) {
        let center_x = self.rect.center_x();
        self.rect.set_width(new_width);
        self.rect.pos.x = center_x - new_width / 2.0;
    }

    /// Back to base width, centered on screen
    pub fn reset(&mut self) {
        self.resize(self.base_width);
        self.rect.pos.x = SCREEN_WIDTH / 2.0 - self.base_width / 2.0;
    }
}

/// A ball. The rect is the bounding box of the circle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Velocity (units per tick)
    pub vel: Vec2,
    pub radius: f32,
    /// Velocity restored when a slow effect expires
    pub original_vel: Vec2,
}

impl Ball {
    /// New ball centered on `center`, moving up and to the right
    pub fn new(center: Vec2, radius: f32) -> Self {
        assert!(radius > 0.0, "ball radius must be positive, got {radius}");
        let vel = Vec2::new(BALL_START_DX, BALL_START_DY);
        Self {
            rect: Rect::from_center(center, radius * 2.0, radius * 2.0),
            vel,
            radius,
            original_vel: vel,
        }
    }

    /// Ball at the canonical level-start position
    pub fn at_start() -> Self {
        Self::new(
            Vec2::new(
                SCREEN_WIDTH / 2.0,
                SCREEN_HEIGHT - PADDLE_HEIGHT - BALL_START_OFFSET,
            ),
            BALL_RADIUS,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    /// Advance by one tick of velocity and bounce off the side and top walls.
    ///
    /// Returns true if a wall was hit. A component is only flipped while it
    /// still points out of the playfield, so a ball that needs two ticks to
    /// get back inside is not flipped twice.
    pub fn integrate(&mut self) -> bool {
        self.rect.pos += self.vel;

        let mut bounced = false;
        if (self.rect.left() < 0.0 && self.vel.x < 0.0)
            || (self.rect.right() > SCREEN_WIDTH && self.vel.x > 0.0)
        {
            self.vel.x = -self.vel.x;
            bounced = true;
        }
        if self.rect.top() < 0.0 && self.vel.y < 0.0 {
            self.vel.y = -self.vel.y;
            bounced = true;
        }
        bounced
    }

    /// Recenter above the paddle and restore the original velocity
    pub fn reset(&mut self) {
        self.rect.pos = Vec2::new(
            SCREEN_WIDTH / 2.0 - self.radius,
            SCREEN_HEIGHT - PADDLE_HEIGHT - self.radius * 3.0,
        );
        self.vel = self.original_vel;
    }

    /// Replace either velocity component; `None` leaves it unchanged
    pub fn rescale_velocity(&mut self, dx: Option<f32>, dy: Option<f32>) {
        if let Some(dx) = dx {
            self.vel.x = dx;
        }
        if let Some(dy) = dy {
            self.vel.y = dy;
        }
    }

    /// Whole ball has dropped below the bottom of the screen
    pub fn is_lost(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT
    }
}

/// Result of hitting a brick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Brick took the hit and is still standing
    Absorbed,
    /// This hit destroyed the brick
    Destroyed,
}

/// A brick in the level grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Hits left before destruction
    pub hits: u32,
    /// Layout value the brick was created from
    pub original_hits: u32,
    pub destroyed: bool,
}

impl Brick {
    pub fn new(rect: Rect, brick_type: u32) -> Self {
        assert!(brick_type > 0, "brick type 0 is an empty cell");
        Self {
            rect,
            hits: brick_type,
            original_hits: brick_type,
            destroyed: false,
        }
    }

    /// Indestructible bricks absorb every hit
    pub fn is_indestructible(&self) -> bool {
        self.original_hits == INDESTRUCTIBLE_BRICK
    }

    /// Returns true if this brick must be destroyed to clear the level
    pub fn counts_for_clear(&self) -> bool {
        !self.is_indestructible()
    }

    /// Take one hit. Callers must skip destroyed bricks.
    pub fn hit(&mut self) -> HitOutcome {
        debug_assert!(!self.destroyed, "hit() on a destroyed brick");
        if self.is_indestructible() || self.hits == 0 {
            return HitOutcome::Absorbed;
        }
        self.hits -= 1;
        if self.hits == 0 {
            self.destroyed = true;
            HitOutcome::Destroyed
        } else {
            HitOutcome::Absorbed
        }
    }

    pub fn color(&self) -> Rgb {
        match self.original_hits {
            1 => BLUE,
            2 => RED,
            _ => GRAY,
        }
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Paddle grows to 1.5x for a while
    EnlargePaddle,
    /// Two extra balls
    MultiBall,
    /// All balls at half speed for a while
    SlowBall,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::EnlargePaddle,
        PowerUpKind::MultiBall,
        PowerUpKind::SlowBall,
    ];

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::EnlargePaddle => GREEN,
            PowerUpKind::MultiBall => WHITE,
            PowerUpKind::SlowBall => BLUE,
        }
    }
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    /// Fall speed (units per tick)
    pub speed: f32,
}

impl PowerUp {
    /// New capsule centered on `center`
    pub fn new(center: Vec2, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::from_center(center, POWERUP_SIZE, POWERUP_SIZE),
            kind,
            speed: POWERUP_FALL_SPEED,
        }
    }

    pub fn integrate(&mut self) {
        self.rect.pos.y += self.speed;
    }

    pub fn color(&self) -> Rgb {
        self.kind.color()
    }
}

/// Pending reversions for timed power-ups, as absolute expiry ticks.
/// At most one per effect; re-arming overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub enlarge_until: Option<u64>,
    pub slow_until: Option<u64>,
}

/// Per-run player data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub lives: u8,
    pub score: u64,
    /// Current level (0-based)
    pub level_index: usize,
    pub muted: bool,
}

impl Session {
    pub fn new(muted: bool) -> Self {
        Self {
            lives: STARTING_LIVES,
            score: 0,
            level_index: 0,
            muted,
        }
    }

    /// Back to starting values. The mute flag survives.
    pub fn reset(&mut self) {
        *self = Self::new(self.muted);
    }
}

/// Movement keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldInput {
    pub left: bool,
    pub right: bool,
}

impl HeldInput {
    /// Net direction: -1, 0 or +1
    pub fn direction(&self) -> i8 {
        i8::from(self.right) - i8::from(self.left)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub session: Session,
    /// Simulation tick counter (advances only while playing)
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// Active balls, in spawn order
    pub balls: Vec<Ball>,
    /// Active bricks, in layout order
    pub bricks: Vec<Brick>,
    /// Falling power-ups, in spawn order
    pub powerups: Vec<PowerUp>,
    pub effects: ActiveEffects,
    pub held: HeldInput,
    /// Drop probability per destroyed brick
    pub powerup_chance: f32,
    /// Seeded RNG for power-up rolls
    pub rng: Pcg32,
    pub catalog: LevelCatalog,
}

impl GameState {
    /// Built-in levels and default settings
    pub fn new(seed: u64) -> Self {
        Self::with_config(LevelCatalog::builtin(), &Settings::default(), seed)
    }

    /// Title screen with level 0 loaded
    pub fn with_config(catalog: LevelCatalog, settings: &Settings, seed: u64) -> Self {
        let mut state = Self {
            phase: GamePhase::Title,
            session: Session::new(settings.muted),
            time_ticks: 0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            effects: ActiveEffects::default(),
            held: HeldInput::default(),
            powerup_chance: settings.effective_powerup_chance(),
            rng: Pcg32::seed_from_u64(seed),
            catalog,
        };

        if !state.load_level(0) {
            log::warn!("Level catalog has no first level");
        }

        state
    }

    /// Full reset: starting lives, zero score, level 0 loaded
    pub fn reset_session(&mut self) {
        self.session.reset();
        self.effects = ActiveEffects::default();
        if !self.load_level(0) {
            log::warn!("Level catalog has no first level");
        }
    }

    /// Put a single fresh ball in play and reset the paddle (after a life is lost)
    pub fn respawn(&mut self) {
        self.balls.clear();
        self.balls.push(Ball::at_start());
        self.paddle.reset();
        self.effects.enlarge_until = None;
    }

    /// Bricks still standing that must go before the level is cleared
    pub fn clearable_bricks(&self) -> usize {
        self.bricks
            .iter()
            .filter(|b| !b.destroyed && b.counts_for_clear())
            .count()
    }
}
