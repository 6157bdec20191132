//! Sound player backed by rodio.

use std::fs::File;
use std::io::{BufReader, Cursor};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::error::SoundError;
use super::source::{embedded_click, SoundSource};

/// Plays notification cues through the default audio output.
///
/// Playback is non-blocking: each cue runs on a detached sink and the
/// caller returns immediately. The player can be muted without tearing
/// down the audio stream, and it is safe to share behind an `Arc`.
pub struct RodioSoundPlayer {
    // The stream must outlive every sink created from its handle.
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    muted: AtomicBool,
}

impl RodioSoundPlayer {
    /// Creates a player on the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// exists.
    pub fn new(muted: bool) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!("audio output stream initialized");

        Ok(Self {
            _stream: stream,
            stream_handle,
            muted: AtomicBool::new(muted),
        })
    }

    /// Plays a cue without blocking.
    ///
    /// A system sound that fails to open or decode falls back to the
    /// embedded click so a broken sound theme never silences transitions.
    ///
    /// # Errors
    ///
    /// Returns an error if the fallback itself cannot be played.
    pub fn play(&self, source: &SoundSource) -> Result<(), SoundError> {
        if self.muted.load(Ordering::Relaxed) {
            debug!("sound muted, skipping cue");
            return Ok(());
        }

        match source {
            SoundSource::System { path, name } => match self.play_file(path) {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!("system sound '{name}' failed ({e}), falling back to embedded click");
                    self.play_embedded()
                }
            },
            SoundSource::Embedded => self.play_embedded(),
        }
    }

    fn play_file(&self, path: &std::path::Path) -> Result<(), SoundError> {
        let file = File::open(path)
            .map_err(|e| SoundError::FileNotFound(format!("{}: {e}", path.display())))?;
        let decoder = Decoder::new(BufReader::new(file))
            .map_err(|e| SoundError::DecodeError(e.to_string()))?;
        self.play_decoder(decoder)
    }

    fn play_embedded(&self) -> Result<(), SoundError> {
        let decoder = Decoder::new(Cursor::new(embedded_click()))
            .map_err(|e| SoundError::DecodeError(format!("embedded click: {e}")))?;
        self.play_decoder(decoder)
    }

    fn play_decoder<R>(&self, decoder: Decoder<R>) -> Result<(), SoundError>
    where
        R: std::io::Read + std::io::Seek + Send + Sync + 'static,
    {
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| SoundError::StreamError(e.to_string()))?;
        sink.append(decoder);
        // Detached so the cue keeps playing after this call returns.
        sink.detach();
        Ok(())
    }

    /// Returns true if cues are currently muted.
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Mutes or unmutes cues.
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
    }
}

impl std::fmt::Debug for RodioSoundPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioSoundPlayer")
            .field("muted", &self.muted.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Creates a shared player, or `None` with a warning when the machine has
/// no usable audio output. The timer runs fine without one.
#[must_use]
pub fn try_create_player(muted: bool) -> Option<Arc<RodioSoundPlayer>> {
    match RodioSoundPlayer::new(muted) {
        Ok(player) => Some(Arc::new(player)),
        Err(e) => {
            warn!("audio unavailable, transition cues disabled: {e}");
            None
        }
    }
}
