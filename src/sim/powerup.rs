//! Power-up drops, pickup and timed effects
//!
//! Timed effects are stored as absolute expiry ticks in
//! [`ActiveEffects`](super::state::ActiveEffects). Picking up the same kind
//! again re-arms the timer instead of stacking.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Ball, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::ms_to_ticks;

/// Roll for a drop at `center`; on success the kind is picked uniformly
pub fn roll_spawn(rng: &mut Pcg32, chance: f32, center: Vec2) -> Option<PowerUp> {
    if !rng.random_bool(f64::from(chance.clamp(0.0, 1.0))) {
        return None;
    }
    let kind = PowerUpKind::ALL[rng.random_range(0..PowerUpKind::ALL.len())];
    Some(PowerUp::new(center, kind))
}

/// Move falling power-ups, collect the ones touching the paddle and drop the
/// ones that left the screen. Returns the kinds collected this tick.
pub fn step_powerups(state: &mut GameState) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    let paddle = state.paddle.rect;

    state.powerups.retain_mut(|pu| {
        pu.integrate();
        if pu.rect.intersects(&paddle) {
            collected.push(pu.kind);
            false
        } else {
            pu.rect.top() <= SCREEN_HEIGHT
        }
    });

    for &kind in &collected {
        apply_effect(state, kind);
    }
    collected
}

/// Apply a collected power-up
pub fn apply_effect(state: &mut GameState, kind: PowerUpKind) {
    log::debug!("Power-up {kind:?} collected");
    match kind {
        PowerUpKind::EnlargePaddle => {
            state
                .paddle
                .resize(state.paddle.base_width * PADDLE_ENLARGE_FACTOR);
            state.effects.enlarge_until =
                Some(state.time_ticks + ms_to_ticks(ENLARGE_DURATION_MS));
        }
        PowerUpKind::MultiBall => {
            let center_x = state.paddle.rect.center_x();
            let y = state.paddle.rect.top() - BALL_RADIUS;

            let mut left = Ball::new(Vec2::new(center_x - MULTI_BALL_OFFSET, y), BALL_RADIUS);
            left.vel.x = -left.vel.x;
            let right = Ball::new(Vec2::new(center_x + MULTI_BALL_OFFSET, y), BALL_RADIUS);

            state.balls.push(left);
            state.balls.push(right);
        }
        PowerUpKind::SlowBall => {
            for ball in state.balls.iter_mut() {
                let slowed = ball.vel * 0.5;
                ball.rescale_velocity(Some(slowed.x), Some(slowed.y));
            }
            state.effects.slow_until = Some(state.time_ticks + ms_to_ticks(SLOW_DURATION_MS));
        }
    }
}

/// Revert timed effects whose expiry tick has been reached
pub fn expire_effects(state: &mut GameState) {
    let now = state.time_ticks;

    if state.effects.enlarge_until.is_some_and(|t| now >= t) {
        state.effects.enlarge_until = None;
        state.paddle.resize(state.paddle.base_width);
        log::debug!("Paddle enlarge expired");
    }

    if state.effects.slow_until.is_some_and(|t| now >= t) {
        state.effects.slow_until = None;
        for ball in state.balls.iter_mut() {
            let original = ball.original_vel;
            ball.rescale_velocity(Some(original.x), Some(original.y));
        }
        log::debug!("Ball slow expired");
    }
}
