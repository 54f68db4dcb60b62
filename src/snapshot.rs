//! Render snapshot
//!
//! A read-only copy of everything the renderer draws, taken once per tick.
//! There is no path from here back into the simulation.

use glam::Vec2;
use serde::Serialize;

use crate::sim::{GamePhase, GameState, Rect, Rgb};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub center: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxView {
    pub rect: Rect,
    pub color: Rgb,
}

/// Everything needed to draw one frame and the HUD
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub paddle: Rect,
    pub balls: Vec<BallView>,
    pub bricks: Vec<BoxView>,
    pub powerups: Vec<BoxView>,
    pub score: u64,
    pub lives: u8,
    /// 0-based level index
    pub level_index: usize,
    pub muted: bool,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            phase: state.phase,
            paddle: state.paddle.rect,
            balls: state
                .balls
                .iter()
                .map(|b| BallView {
                    center: b.center(),
                    radius: b.radius,
                })
                .collect(),
            bricks: state
                .bricks
                .iter()
                .filter(|b| !b.destroyed)
                .map(|b| BoxView {
                    rect: b.rect,
                    color: b.color(),
                })
                .collect(),
            powerups: state
                .powerups
                .iter()
                .map(|p| BoxView {
                    rect: p.rect,
                    color: p.color(),
                })
                .collect(),
            score: state.session.score,
            lives: state.session.lives,
            level_index: state.session.level_index,
            muted: state.session.muted,
        }
    }

    /// Level number as shown in the HUD (1-based)
    pub fn level_number(&self) -> usize {
        self.level_index + 1
    }
}

impl GameState {
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot::capture(self)
    }
}
