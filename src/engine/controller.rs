//! Phase controller for the pomotui timer.
//!
//! This module owns the authoritative timer state and decides phase
//! transitions:
//! - Focus and Rest alternate without end until the user resets to Idle
//! - Expiry of one phase immediately starts the other
//! - Alerts for the notifier are returned, never awaited

use std::time::Duration;

use crate::types::{Phase, PresetCatalog, Snapshot, TimerState};

// ============================================================================
// Alert
// ============================================================================

/// The cue handed to the notifier at each automatic phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    /// A rest interval just ended and a focus interval began
    FocusStarted,
    /// A focus interval just ended and a rest interval began
    RestStarted,
}

// ============================================================================
// TickOutcome
// ============================================================================

/// What a delivered tick did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Ignored,
    /// One tick of countdown was consumed
    Tick,
    /// The countdown expired and the phase flipped
    PhaseChanged(Alert),
}

// ============================================================================
// PhaseController
// ============================================================================

/// The phase state machine.
///
/// Owns the `TimerState` and the preset catalog. All mutation happens
/// through the operations below, sequentially on the app's event loop;
/// the renderer only ever receives a [`Snapshot`].
pub struct PhaseController {
    state: TimerState,
    catalog: PresetCatalog,
}

impl PhaseController {
    /// Creates an idle controller over the given catalog.
    pub fn new(catalog: PresetCatalog) -> Self {
        Self {
            state: TimerState::idle(),
            catalog,
        }
    }

    /// Returns the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Returns a read-only snapshot for the renderer.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Returns the preset catalog.
    pub fn catalog(&self) -> &PresetCatalog {
        &self.catalog
    }

    /// Selects the catalog preset at `index`.
    ///
    /// Out-of-range indices leave everything unchanged and return false.
    pub fn select_preset(&mut self, index: usize) -> bool {
        self.catalog.select(index)
    }

    /// Moves the catalog selection down one entry.
    pub fn select_next(&mut self) {
        self.catalog.select_next();
    }

    /// Moves the catalog selection up one entry.
    pub fn select_prev(&mut self) {
        self.catalog.select_prev();
    }

    /// Starts a focus session with the catalog's selected preset.
    ///
    /// Presets are validated when the catalog is built, so there are no
    /// error conditions here.
    pub fn start(&mut self) {
        self.state = TimerState::focus(self.catalog.selected().clone());
    }

    /// Flips between running and paused.
    ///
    /// A no-op while Idle; toggling twice restores the original value.
    pub fn toggle(&mut self) {
        if self.state.phase.is_active() {
            self.state.running = !self.state.running;
        }
    }

    /// Consumes `elapsed` of countdown time.
    ///
    /// Ticks delivered while not running are ignored; the clock is
    /// disarmed while paused, so such a tick is a stale straggler. When
    /// the countdown reaches zero the phase flips in the same call and a
    /// fresh state for the next phase replaces the old one.
    pub fn tick(&mut self, elapsed: Duration) -> TickOutcome {
        if !self.state.running {
            return TickOutcome::Ignored;
        }

        let remaining = self.state.remaining.saturating_sub(elapsed);
        if remaining > Duration::ZERO {
            self.state.remaining = remaining;
            return TickOutcome::Tick;
        }

        let Some(preset) = self.state.preset().cloned() else {
            // A running state always carries a preset; see TimerState.
            return TickOutcome::Ignored;
        };

        // The transition table: Focus -> Rest, Rest -> Focus, no end.
        let (next, alert) = match self.state.phase {
            Phase::Focus => (TimerState::rest(preset), Alert::RestStarted),
            Phase::Rest => (TimerState::focus(preset), Alert::FocusStarted),
            Phase::Idle => return TickOutcome::Ignored,
        };
        self.state = next;
        TickOutcome::PhaseChanged(alert)
    }

    /// Returns to Idle, clearing the preset and remaining time.
    pub fn reset(&mut self) {
        self.state = TimerState::idle();
    }
}

// ============================================================================
// Tests
// ============================================================================
