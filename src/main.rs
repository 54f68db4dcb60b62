//! Arkanoid Remix headless runner
//!
//! Drives the simulation at a fixed 60 Hz with a ball-tracking autopilot in
//! place of a human player, then prints the final frame snapshot as JSON.
//!
//! Usage: `arkanoid-remix [settings.json] [levels.json] [ticks]`

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use arkanoid_remix::audio::{AudioSink, SoundEffect};
use arkanoid_remix::consts::TICK_RATE;
use arkanoid_remix::sim::{GamePhase, GameState, InputEvent, TickInput, tick};
use arkanoid_remix::{LevelCatalog, Settings};

/// Default run length: two minutes of game time
const DEFAULT_TICKS: u64 = 120 * TICK_RATE as u64;

/// Counts bounce sounds instead of playing them
#[derive(Default)]
struct CountingAudio {
    bounces: u64,
}

impl AudioSink for CountingAudio {
    fn play(&mut self, effect: SoundEffect) {
        log::trace!("sound {effect:?}");
        self.bounces += 1;
    }
}

/// Demo mode - follows the lowest descending ball
#[derive(Default)]
struct Autopilot {
    left: bool,
    right: bool,
}

impl Autopilot {
    fn events(&mut self, state: &GameState) -> Vec<InputEvent> {
        let mut events = Vec::new();
        match state.phase {
            GamePhase::Title => events.push(InputEvent::StartGame),
            GamePhase::GameOver => return events,
            GamePhase::Playing => {}
        }

        let target = state
            .balls
            .iter()
            .filter(|b| b.vel.y > 0.0)
            .max_by(|a, b| a.rect.pos.y.total_cmp(&b.rect.pos.y))
            .or_else(|| state.balls.first())
            .map(|b| b.center().x);

        let paddle_x = state.paddle.rect.center_x();
        let dead_zone = state.paddle.rect.width() / 4.0;
        let (want_left, want_right) = match target {
            Some(x) if x < paddle_x - dead_zone => (true, false),
            Some(x) if x > paddle_x + dead_zone => (false, true),
            _ => (false, false),
        };

        if want_left != self.left {
            events.push(if want_left {
                InputEvent::MoveLeftStart
            } else {
                InputEvent::MoveLeftStop
            });
            self.left = want_left;
        }
        if want_right != self.right {
            events.push(if want_right {
                InputEvent::MoveRightStart
            } else {
                InputEvent::MoveRightStop
            });
            self.right = want_right;
        }
        events
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let settings = args
        .first()
        .map(|p| Settings::load(Path::new(p)))
        .unwrap_or_default();

    let catalog = match args.get(1) {
        Some(path) => LevelCatalog::load(Path::new(path)).unwrap_or_else(|e| {
            log::warn!("{e}, using built-in levels");
            LevelCatalog::builtin()
        }),
        None => LevelCatalog::builtin(),
    };

    let ticks = args
        .get(2)
        .and_then(|t| t.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TICKS);

    let seed = settings.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed {seed}, {} levels, {ticks} ticks", catalog.len());

    let mut state = GameState::with_config(catalog, &settings, seed);
    let mut audio = CountingAudio::default();
    let mut autopilot = Autopilot::default();

    for _ in 0..ticks {
        let input = TickInput::from_events(autopilot.events(&state));
        tick(&mut state, &input, &mut audio);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "Finished after {} ticks: score {}, level {}, lives {}, {} bounces",
        state.time_ticks,
        state.session.score,
        state.session.level_index + 1,
        state.session.lives,
        audio.bounces
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize snapshot: {e}"),
    }
}
