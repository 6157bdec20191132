//! Phase-transition alerts.
//!
//! The phase controller hands an [`Alert`] to `dispatch` at every
//! automatic transition. Delivery is fire-and-forget: the alert runs on a
//! blocking task with no return channel, failures are logged and dropped,
//! and the timer never waits for or retries a notification.

mod desktop;
mod error;

use std::sync::Arc;

use tracing::warn;

use crate::engine::Alert;

pub use desktop::DesktopNotifier;
pub use error::NotifyError;

/// Trait for alert delivery, allowing a mock in tests.
pub trait Notifier: Send + Sync {
    /// Delivers a single alert.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert could not be delivered; callers are
    /// expected to log and drop it.
    fn notify(&self, alert: Alert) -> Result<(), NotifyError>;
}

/// Delivers an alert in the background.
///
/// Runs on the blocking pool because toast delivery can stall on a slow
/// notification daemon; the timer loop must never inherit that stall.
pub fn dispatch(notifier: Arc<dyn Notifier>, alert: Alert) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = notifier.notify(alert) {
            warn!("dropped {alert:?} notification: {e}");
        }
    });
}

/// Mock notifier for tests.
#[derive(Debug, Default)]
pub struct MockNotifier {
    alerts: std::sync::Mutex<Vec<Alert>>,
    should_fail: std::sync::atomic::AtomicBool,
}

impl MockNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail
            .store(should_fail, std::sync::atomic::Ordering::SeqCst);
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, alert: Alert) -> Result<(), NotifyError> {
        if self.should_fail.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(NotifyError::Desktop("mock failure".to_string()));
        }
        self.alerts.lock().unwrap().push(alert);
        Ok(())
    }
}
