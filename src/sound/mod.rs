//! Audio cues for phase transitions.
//!
//! This module plays a short sound when a focus or rest interval begins:
//!
//! - System sound theme discovery with an embedded fallback click
//! - Non-blocking playback on a detached sink
//! - Graceful degradation when no audio device exists
//!
//! The notify layer owns the only call site; a playback failure is logged
//! there and never reaches the timer.

mod error;
mod player;
mod source;

pub use error::SoundError;
pub use player::{try_create_player, RodioSoundPlayer};
pub use source::{default_cue, discover_system_sounds, find_system_sound, SoundSource};

/// Trait for cue playback, allowing a mock in tests.
pub trait SoundPlayer: Send + Sync {
    /// Plays a cue without blocking.
    ///
    /// # Errors
    ///
    /// Returns an error if playback fails.
    fn play(&self, source: &SoundSource) -> Result<(), SoundError>;

    /// Returns true if cues are muted.
    fn is_muted(&self) -> bool;
}

impl SoundPlayer for RodioSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        RodioSoundPlayer::play(self, source)
    }

    fn is_muted(&self) -> bool {
        RodioSoundPlayer::is_muted(self)
    }
}

/// Mock sound player for tests.
#[derive(Debug, Default)]
pub struct MockSoundPlayer {
    plays: std::sync::Mutex<Vec<SoundSource>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockSoundPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn play_count(&self) -> usize {
        self.plays.lock().unwrap().len()
    }

    #[must_use]
    pub fn played(&self) -> Vec<SoundSource> {
        self.plays.lock().unwrap().clone()
    }
}

impl SoundPlayer for MockSoundPlayer {
    fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(SoundError::PlaybackError("mock failure".to_string()));
        }
        self.plays.lock().unwrap().push(source.clone());
        Ok(())
    }

    fn is_muted(&self) -> bool {
        false
    }
}
