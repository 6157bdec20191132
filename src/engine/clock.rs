//! Countdown clock for the pomotui timer.
//!
//! A single repeating tick source with two states, stopped and running.
//! While armed it delivers one tick per second over an unbounded channel;
//! while disarmed it delivers nothing and owes nothing. Every arm gets a
//! fresh generation number so a tick that raced a disarm can be told apart
//! from a live one and discarded by the consumer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Cadence of the countdown.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// ClockTick
// ============================================================================

/// A single elapsed-second event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTick {
    /// The arm that produced this tick. Stale when it no longer matches
    /// [`CountdownClock::generation`].
    pub generation: u64,
}

// ============================================================================
// CountdownClock
// ============================================================================

/// The tick source driving the phase controller.
///
/// Running means a spawned interval task is delivering ticks; stopped means
/// no task exists. The first tick of an arm lands one full period after the
/// arm point, and pausing discards any partial period rather than replaying
/// it on resume.
pub struct CountdownClock {
    tick_tx: mpsc::UnboundedSender<ClockTick>,
    period: Duration,
    generation: u64,
    task: Option<JoinHandle<()>>,
}

impl CountdownClock {
    /// Creates a stopped clock delivering ticks into `tick_tx` once per
    /// second when armed.
    pub fn new(tick_tx: mpsc::UnboundedSender<ClockTick>) -> Self {
        Self::with_period(tick_tx, TICK_PERIOD)
    }

    /// Creates a stopped clock with a custom period.
    pub fn with_period(tick_tx: mpsc::UnboundedSender<ClockTick>, period: Duration) -> Self {
        Self {
            tick_tx,
            period,
            generation: 0,
            task: None,
        }
    }

    /// Returns true while a tick task is delivering.
    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// The generation of the current arm. Ticks carrying any other value
    /// are stale.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Arms the clock, restarting the cadence from now.
    ///
    /// Called on session start, on resume, and after every phase
    /// transition, so each phase's first tick lands a full period after
    /// the phase began.
    pub fn arm(&mut self) {
        self.disarm();
        self.generation += 1;
        let generation = self.generation;
        let period = self.period;
        let tick_tx = self.tick_tx.clone();

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tick_tx.send(ClockTick { generation }).is_err() {
                    // Receiver gone; the app is shutting down.
                    break;
                }
            }
        }));
    }

    /// Disarms the clock.
    ///
    /// Bumps the generation first, so a tick already queued by the aborted
    /// task is recognizably stale.
    pub fn disarm(&mut self) {
        if let Some(task) = self.task.take() {
            self.generation += 1;
            task.abort();
        }
    }
}

impl Drop for CountdownClock {
    fn drop(&mut self) {
        self.disarm();
    }
}

// ============================================================================
// Tests
// ============================================================================
