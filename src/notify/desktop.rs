//! Desktop notifier: a toast plus an optional audio cue.

use std::sync::Arc;

use notify_rust::Notification;

use super::error::NotifyError;
use super::Notifier;
use crate::engine::Alert;
use crate::sound::{default_cue, SoundPlayer};

/// Shows a desktop toast for each phase transition and plays a cue when a
/// sound player is available.
pub struct DesktopNotifier {
    sound: Option<Arc<dyn SoundPlayer>>,
}

impl DesktopNotifier {
    /// Creates a notifier. Pass `None` to skip audio cues entirely.
    pub fn new(sound: Option<Arc<dyn SoundPlayer>>) -> Self {
        Self { sound }
    }

    fn show_toast(&self, alert: Alert) -> Result<(), NotifyError> {
        let (summary, body) = match alert {
            Alert::FocusStarted => ("Focus!", "Rest is over. Back to work."),
            Alert::RestStarted => ("Rest", "Focus interval complete. Step away for a bit."),
        };

        Notification::new()
            .summary(summary)
            .body(body)
            .appname("pomotui")
            .icon("alarm-clock")
            .show()
            .map(|_| ())
            .map_err(|e| NotifyError::Desktop(e.to_string()))
    }

    fn play_cue(&self) -> Result<(), NotifyError> {
        if let Some(player) = &self.sound {
            player.play(&default_cue())?;
        }
        Ok(())
    }
}

impl Notifier for DesktopNotifier {
    fn notify(&self, alert: Alert) -> Result<(), NotifyError> {
        // Attempt both channels; a dead notification daemon must not
        // silence the cue, and vice versa.
        let toast = self.show_toast(alert);
        let cue = self.play_cue();
        toast.and(cue)
    }
}
