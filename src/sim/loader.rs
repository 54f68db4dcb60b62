//! Level loading
//!
//! Turns a catalog layout into positioned bricks and resets the ball and
//! paddle for a fresh start.

use super::rect::Rect;
use super::state::{Ball, Brick, GameState};
use crate::consts::*;

/// Horizontal distance between brick origins
const CELL_PITCH: f32 = BRICK_WIDTH + BRICK_GAP;
/// Vertical distance between brick rows
const ROW_PITCH: f32 = BRICK_HEIGHT + BRICK_GAP;

/// Place the bricks of a layout on a grid, each row centered on screen
pub fn build_bricks(layout: &[Vec<u32>]) -> Vec<Brick> {
    let mut bricks = Vec::new();
    for (row_idx, row) in layout.iter().enumerate() {
        let row_offset = ((SCREEN_WIDTH - row.len() as f32 * CELL_PITCH) / 2.0).floor();
        let y = row_idx as f32 * ROW_PITCH + BRICK_TOP_OFFSET;
        for (col_idx, &brick_type) in row.iter().enumerate() {
            if brick_type == 0 {
                continue;
            }
            let x = col_idx as f32 * CELL_PITCH + row_offset;
            bricks.push(Brick::new(
                Rect::new(x, y, BRICK_WIDTH, BRICK_HEIGHT),
                brick_type,
            ));
        }
    }
    bricks
}

impl GameState {
    /// Load level `index` from the catalog.
    ///
    /// Returns false (and changes nothing) when the catalog has no such level.
    pub fn load_level(&mut self, index: usize) -> bool {
        let Some(layout) = self.catalog.get(index) else {
            log::info!("No level {index} in catalog ({} levels)", self.catalog.len());
            return false;
        };
        let bricks = build_bricks(layout);

        self.bricks = bricks;
        self.powerups.clear();
        self.balls.clear();
        self.balls.push(Ball::at_start());
        self.paddle.reset();
        self.effects = Default::default();

        log::info!("Level {}: {} bricks", index + 1, self.bricks.len());
        true
    }
}
