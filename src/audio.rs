//! Audio collaborator seam
//!
//! The simulation only asks for sounds; playing them is up to the shell.
//! Calls are fire-and-forget and must never block a tick.

/// Sound effect types (all are bounce sounds in the stock game)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits a side or the top wall
    WallHit,
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits a brick
    BrickHit,
}

/// Something that can play sound effects
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Silent sink, used when no sound device or asset is available
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Play `effect` unless muted
#[inline]
pub fn play_unless_muted(audio: &mut dyn AudioSink, muted: bool, effect: SoundEffect) {
    if !muted {
        audio.play(effect);
    }
}
