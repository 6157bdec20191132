//! Sound system error types.

use thiserror::Error;

/// Errors that can occur while playing a notification cue.
///
/// None of these are fatal to the timer; the notify layer logs them and
/// moves on.
#[derive(Debug, Error)]
pub enum SoundError {
    /// No audio output device is available.
    #[error("audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// The cue file could not be opened.
    #[error("sound file not found: {0}")]
    FileNotFound(String),

    /// The cue file could not be decoded.
    #[error("failed to decode sound: {0}")]
    DecodeError(String),

    /// The audio output stream could not be created.
    #[error("failed to open audio stream: {0}")]
    StreamError(String),

    /// Generic playback failure.
    #[error("sound playback failed: {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if the error is about the audio device rather than a
    /// particular cue file.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SoundError::DeviceNotAvailable("no output".to_string());
        assert!(err.to_string().contains("no output"));
        assert!(err.to_string().contains("audio device"));

        let err = SoundError::FileNotFound("/usr/share/sounds/x.oga".to_string());
        assert!(err.to_string().contains("/usr/share/sounds/x.oga"));
    }

    #[test]
    fn test_is_device_error() {
        assert!(SoundError::DeviceNotAvailable("x".into()).is_device_error());
        assert!(SoundError::StreamError("x".into()).is_device_error());
        assert!(!SoundError::FileNotFound("x".into()).is_device_error());
        assert!(!SoundError::DecodeError("x".into()).is_device_error());
    }
}
