//! Ball physics and collision resolution
//!
//! Each tick every ball runs the same fixed sequence: move and bounce off
//! walls, then the paddle, then at most one brick, then the off-screen check.
//! The order matters for scoring and must not be rearranged.

use glam::Vec2;

use super::powerup::roll_spawn;
use super::rect::Rect;
use super::state::{Ball, Brick, GameState, HitOutcome, Paddle};
use crate::audio::{AudioSink, SoundEffect, play_unless_muted};
use crate::consts::*;

/// A brick struck by a ball this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrickHit {
    /// Index into the brick list
    pub index: usize,
    pub outcome: HitOutcome,
}

/// Totals for one physics step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    pub bricks_destroyed: u32,
    pub balls_lost: u32,
}

/// Horizontal speed after a paddle hit: zero at the center, full deflection
/// at either edge, never more than [`MAX_DEFLECTION_SPEED`]
pub fn paddle_deflection(ball: &Rect, paddle: &Rect) -> f32 {
    let offset = (ball.center_x() - paddle.center_x()) / (paddle.width() / 2.0);
    (offset * MAX_DEFLECTION_SPEED).clamp(-MAX_DEFLECTION_SPEED, MAX_DEFLECTION_SPEED)
}

/// Bounce a descending ball off the paddle. Returns true on contact.
pub fn resolve_paddle(ball: &mut Ball, paddle: &Paddle) -> bool {
    if ball.vel.y > 0.0 && ball.rect.intersects(&paddle.rect) {
        ball.vel.y = -ball.vel.y;
        ball.vel.x = paddle_deflection(&ball.rect, &paddle.rect);
        true
    } else {
        false
    }
}

/// Hit the first standing brick the ball overlaps, in storage order.
///
/// The ball always reverses vertically on contact, whether or not the brick
/// breaks. Only one brick is affected per call.
pub fn resolve_bricks(ball: &mut Ball, bricks: &mut [Brick]) -> Option<BrickHit> {
    let index = bricks
        .iter()
        .position(|b| !b.destroyed && ball.rect.intersects(&b.rect))?;
    let outcome = bricks[index].hit();
    ball.vel.y = -ball.vel.y;
    Some(BrickHit { index, outcome })
}

/// Advance every ball one tick and resolve its collisions.
///
/// Destroyed bricks score points and may drop a power-up. Lost balls are
/// removed; destroyed bricks are pruned after all balls have moved.
pub fn step_balls(state: &mut GameState, audio: &mut dyn AudioSink) -> StepReport {
    let muted = state.session.muted;
    let mut report = StepReport::default();

    for ball in state.balls.iter_mut() {
        if ball.integrate() {
            play_unless_muted(audio, muted, SoundEffect::WallHit);
        }

        if resolve_paddle(ball, &state.paddle) {
            play_unless_muted(audio, muted, SoundEffect::PaddleHit);
        }

        if let Some(hit) = resolve_bricks(ball, &mut state.bricks) {
            play_unless_muted(audio, muted, SoundEffect::BrickHit);
            if hit.outcome == HitOutcome::Destroyed {
                let center: Vec2 = state.bricks[hit.index].rect.center();
                state.session.score += BRICK_SCORE;
                report.bricks_destroyed += 1;
                log::debug!("Brick destroyed at {center}, score {}", state.session.score);

                if let Some(powerup) = roll_spawn(&mut state.rng, state.powerup_chance, center) {
                    log::debug!("Power-up {:?} dropped", powerup.kind);
                    state.powerups.push(powerup);
                }
            }
        }
    }

    let before = state.balls.len();
    state.balls.retain(|b| !b.is_lost());
    report.balls_lost = (before - state.balls.len()) as u32;

    state.bricks.retain(|b| !b.destroyed);
    report
}
