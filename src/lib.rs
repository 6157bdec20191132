//! Pomotui Library
//!
//! This library provides the core functionality for the pomotui terminal
//! Pomodoro timer. It includes:
//! - Phase state machine alternating Focus and Rest intervals
//! - Countdown clock delivering a one-second cadence while armed
//! - Application event loop and screen modes over ratatui
//! - Type definitions for presets, timer state, and render snapshots
//! - Desktop notification and audio cue dispatch for phase transitions

pub mod app;
pub mod engine;
pub mod notify;
pub mod sound;
pub mod types;
pub mod ui;

// Re-export commonly used types for convenience
pub use types::{Phase, Preset, PresetCatalog, Snapshot, TimerState};

// Re-export the timer core
pub use engine::{Alert, ClockTick, CountdownClock, PhaseController, TickOutcome, TICK_PERIOD};

// Re-export the app loop and screens
pub use app::{App, Screen, TaskList};

// Re-export notification types
pub use notify::{DesktopNotifier, MockNotifier, Notifier, NotifyError};

// Re-export sound types
pub use sound::{
    default_cue, discover_system_sounds, find_system_sound, try_create_player, MockSoundPlayer,
    RodioSoundPlayer, SoundError, SoundPlayer, SoundSource,
};
