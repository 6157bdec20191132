//! Notification error types.

use thiserror::Error;

use crate::sound::SoundError;

/// Errors from delivering a phase-transition alert.
///
/// These never reach the phase controller; `dispatch` logs them and drops
/// them.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The desktop notification could not be shown.
    #[error("desktop notification failed: {0}")]
    Desktop(String),

    /// The audio cue could not be played.
    #[error("audio cue failed: {0}")]
    Cue(#[from] SoundError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = NotifyError::Desktop("no notification daemon".to_string());
        assert!(err.to_string().contains("no notification daemon"));
    }

    #[test]
    fn test_from_sound_error() {
        let err = NotifyError::from(SoundError::PlaybackError("sink gone".to_string()));
        assert!(matches!(err, NotifyError::Cue(_)));
        assert!(err.to_string().contains("audio cue"));
    }
}
