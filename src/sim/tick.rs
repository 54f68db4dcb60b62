//! Fixed timestep simulation tick
//!
//! Core game loop: consumes the input events for one tick, applies phase
//! transitions, then advances the simulation while playing.

use super::collision::step_balls;
use super::powerup::{expire_effects, step_powerups};
use super::state::{GamePhase, GameState};
use crate::audio::AudioSink;

/// Discrete input events from the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MoveLeftStart,
    MoveLeftStop,
    MoveRightStart,
    MoveRightStop,
    /// Title screen start button
    StartGame,
    /// Game over retry button
    Retry,
    /// Game over main menu button
    MainMenu,
    ToggleMute,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in arrival order
    pub events: Vec<InputEvent>,
}

impl TickInput {
    pub fn from_events(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput, audio: &mut dyn AudioSink) {
    for &event in &input.events {
        handle_event(state, event);
    }

    if state.phase == GamePhase::Playing {
        step_playing(state, audio);
    }
}

fn handle_event(state: &mut GameState, event: InputEvent) {
    match event {
        InputEvent::MoveLeftStart => state.held.left = true,
        InputEvent::MoveLeftStop => state.held.left = false,
        InputEvent::MoveRightStart => state.held.right = true,
        InputEvent::MoveRightStop => state.held.right = false,
        InputEvent::ToggleMute => {
            state.session.muted = !state.session.muted;
            log::info!("Sound {}", if state.session.muted { "muted" } else { "on" });
        }
        InputEvent::StartGame if state.phase == GamePhase::Title => {
            // Coming back from game over via the menu leaves a spent session
            if state.session.lives == 0 {
                state.reset_session();
            }
            state.phase = GamePhase::Playing;
            log::info!("Game started");
        }
        InputEvent::Retry if state.phase == GamePhase::GameOver => {
            state.reset_session();
            state.phase = GamePhase::Playing;
            log::info!("Retry");
        }
        InputEvent::MainMenu if state.phase == GamePhase::GameOver => {
            state.phase = GamePhase::Title;
        }
        InputEvent::StartGame | InputEvent::Retry | InputEvent::MainMenu => {}
    }
}

fn step_playing(state: &mut GameState, audio: &mut dyn AudioSink) {
    state.time_ticks += 1;
    expire_effects(state);

    let direction = state.held.direction();
    state.paddle.step(direction);

    let report = step_balls(state, audio);
    if report.balls_lost > 0 {
        log::debug!("{} ball(s) lost, {} left", report.balls_lost, state.balls.len());
    }

    // Check if all balls lost
    if state.balls.is_empty() {
        state.session.lives = state.session.lives.saturating_sub(1);
        if state.session.lives == 0 {
            log::info!("Game over, final score {}", state.session.score);
            state.phase = GamePhase::GameOver;
            return;
        }
        log::info!("Life lost, {} remaining", state.session.lives);
        state.respawn();
    }

    step_powerups(state);

    // Check level clear (indestructible bricks don't count)
    if state.clearable_bricks() == 0 {
        state.session.level_index += 1;
        log::info!("Level cleared, score {}", state.session.score);
        if !state.load_level(state.session.level_index) {
            log::info!("All levels complete, final score {}", state.session.score);
            state.phase = GamePhase::Title;
            state.reset_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::NullAudio;
    use crate::consts::*;
    use crate::sim::rect::Rect;
    use crate::sim::state::{Ball, Brick};
    use glam::Vec2;

    fn start() -> TickInput {
        TickInput::from_events([InputEvent::StartGame])
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new(12345);
        tick(&mut state, &start(), &mut NullAudio);
        state
    }

    /// Put the only ball one step away from falling out
    fn drop_ball(state: &mut GameState) {
        state.balls[0].rect.pos.y = SCREEN_HEIGHT + 1.0;
        state.balls[0].vel = Vec2::new(0.0, 5.0);
    }

    #[test]
    fn test_title_to_playing() {
        let mut state = GameState::new(12345);
        assert_eq!(state.phase, GamePhase::Title);

        // Nothing moves on the title screen
        let ball_pos = state.balls[0].rect.pos;
        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.balls[0].rect.pos, ball_pos);

        tick(&mut state, &start(), &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.balls[0].rect.pos, ball_pos + Vec2::new(5.0, -5.0));
    }

    #[test]
    fn test_held_input_moves_paddle() {
        let mut state = playing_state();
        let x = state.paddle.rect.pos.x;

        let press = TickInput::from_events([InputEvent::MoveLeftStart]);
        tick(&mut state, &press, &mut NullAudio);
        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.paddle.rect.pos.x, x - 2.0 * PADDLE_SPEED);

        let release = TickInput::from_events([InputEvent::MoveLeftStop]);
        tick(&mut state, &release, &mut NullAudio);
        assert_eq!(state.paddle.rect.pos.x, x - 2.0 * PADDLE_SPEED);
    }

    #[test]
    fn test_toggle_mute_any_phase() {
        let mut state = GameState::new(1);
        let mute = TickInput::from_events([InputEvent::ToggleMute]);
        tick(&mut state, &mute, &mut NullAudio);
        assert!(state.session.muted);
        tick(&mut state, &mute, &mut NullAudio);
        assert!(!state.session.muted);
    }

    #[test]
    fn test_losing_last_ball_with_lives_left_respawns() {
        let mut state = playing_state();
        state.paddle.resize(300.0);
        drop_ball(&mut state);

        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.lives, STARTING_LIVES - 1);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.paddle.rect.width(), PADDLE_WIDTH);
    }

    #[test]
    fn test_last_life_goes_to_game_over() {
        let mut state = playing_state();
        state.session.lives = 1;
        drop_ball(&mut state);

        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.session.lives, 0);
        assert!(state.balls.is_empty());

        // Frozen until a button is pressed
        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_retry_resets_session() {
        let mut state = playing_state();
        state.session.lives = 1;
        state.session.score = 90;
        drop_ball(&mut state);
        tick(&mut state, &TickInput::default(), &mut NullAudio);

        let retry = TickInput::from_events([InputEvent::Retry]);
        tick(&mut state, &retry, &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.level_index, 0);
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.bricks.len(), 30);
    }

    #[test]
    fn test_main_menu_keeps_session_until_start() {
        let mut state = playing_state();
        state.session.lives = 1;
        state.session.score = 40;
        drop_ball(&mut state);
        tick(&mut state, &TickInput::default(), &mut NullAudio);

        let menu = TickInput::from_events([InputEvent::MainMenu]);
        tick(&mut state, &menu, &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.session.score, 40);

        tick(&mut state, &start(), &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert_eq!(state.session.score, 0);
    }

    #[test]
    fn test_buttons_ignored_in_wrong_phase() {
        let mut state = GameState::new(1);
        let input = TickInput::from_events([InputEvent::Retry, InputEvent::MainMenu]);
        tick(&mut state, &input, &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Title);

        let mut state = playing_state();
        tick(&mut state, &start(), &mut NullAudio);
        tick(&mut state, &input, &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_level_clear_loads_next() {
        let mut state = playing_state();
        // Single brick right above the ball
        let ball = state.balls[0].rect;
        state.bricks = vec![Brick::new(
            Rect::new(ball.left() - 10.0, ball.top() - 24.0, BRICK_WIDTH, BRICK_HEIGHT),
            1,
        )];

        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.session.score, BRICK_SCORE);
        assert_eq!(state.session.level_index, 1);
        assert_eq!(state.bricks.len(), 24);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_indestructible_bricks_do_not_block_clear() {
        let mut state = playing_state();
        state.bricks = vec![Brick::new(
            Rect::new(0.0, 0.0, BRICK_WIDTH, BRICK_HEIGHT),
            INDESTRUCTIBLE_BRICK,
        )];
        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.session.level_index, 1);
    }

    #[test]
    fn test_last_level_clear_returns_to_title() {
        let mut state = playing_state();
        state.session.level_index = 2;
        state.session.score = 500;
        state.bricks.clear();

        tick(&mut state, &TickInput::default(), &mut NullAudio);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.session.score, 0);
        assert_eq!(state.session.lives, STARTING_LIVES);
        assert_eq!(state.session.level_index, 0);
        assert_eq!(state.bricks.len(), 30);
    }

    #[test]
    fn test_effects_expire_during_play() {
        let mut state = playing_state();
        crate::sim::powerup::apply_effect(&mut state, crate::sim::PowerUpKind::EnlargePaddle);
        assert_eq!(state.paddle.rect.width(), PADDLE_WIDTH * 1.5);

        for _ in 0..crate::ms_to_ticks(ENLARGE_DURATION_MS) {
            // Keep a ball in open space so nothing else happens
            state.balls = vec![Ball::new(Vec2::new(450.0, 350.0), BALL_RADIUS)];
            tick(&mut state, &TickInput::default(), &mut NullAudio);
        }
        assert_eq!(state.paddle.rect.width(), PADDLE_WIDTH);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.powerup_chance = 1.0;
        state2.powerup_chance = 1.0;

        let inputs = [
            start(),
            TickInput::from_events([InputEvent::MoveRightStart]),
            TickInput::default(),
            TickInput::from_events([InputEvent::MoveRightStop]),
        ];

        for input in inputs.iter().cycle().take(400) {
            tick(&mut state1, input, &mut NullAudio);
            tick(&mut state2, input, &mut NullAudio);
        }

        assert_eq!(state1.session, state2.session);
        assert_eq!(state1.balls.len(), state2.balls.len());
        assert_eq!(state1.bricks.len(), state2.bricks.len());
        assert_eq!(state1.powerups.len(), state2.powerups.len());
        assert_eq!(state1.paddle.rect, state2.paddle.rect);
    }
}
