//! Core data types for the pomotui timer.
//!
//! This module defines the data structures used for:
//! - Interval presets and the startup catalog
//! - Timer state owned by the phase controller
//! - Read-only snapshots handed to the renderer

use std::time::Duration;

use serde::{Deserialize, Serialize};

// ============================================================================
// Phase
// ============================================================================

/// Represents the current phase of the timer.
///
/// Task-board and task-picker screens are UI modes layered above the timer
/// and are not phases; while they are shown the timer is still `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No session in progress; a preset may be browsed but none is active
    Idle,
    /// Counting down a focus interval
    Focus,
    /// Counting down a rest interval
    Rest,
}

impl Phase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Focus => "focus",
            Phase::Rest => "rest",
        }
    }

    /// Returns true if a countdown belongs to this phase.
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Focus | Phase::Rest)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Idle
    }
}

// ============================================================================
// Preset
// ============================================================================

/// An immutable focus/rest interval pair offered for selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preset {
    /// Display label, e.g. "25min focus / 5min rest"
    pub label: String,
    /// Focus interval length in minutes (1-120)
    pub focus_minutes: u32,
    /// Rest interval length in minutes (1-60)
    pub rest_minutes: u32,
}

impl Preset {
    /// Creates a new preset.
    pub fn new(label: impl Into<String>, focus_minutes: u32, rest_minutes: u32) -> Self {
        Self {
            label: label.into(),
            focus_minutes,
            rest_minutes,
        }
    }

    /// Returns the focus interval as a duration.
    pub fn focus(&self) -> Duration {
        Duration::from_secs(u64::from(self.focus_minutes) * 60)
    }

    /// Returns the rest interval as a duration.
    pub fn rest(&self) -> Duration {
        Duration::from_secs(u64::from(self.rest_minutes) * 60)
    }

    /// Validates the preset.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<(), String> {
        if self.label.trim().is_empty() {
            return Err("preset label must not be empty".to_string());
        }
        if self.focus_minutes < 1 || self.focus_minutes > 120 {
            return Err(format!(
                "focus interval must be 1-120 minutes, got {}",
                self.focus_minutes
            ));
        }
        if self.rest_minutes < 1 || self.rest_minutes > 60 {
            return Err(format!(
                "rest interval must be 1-60 minutes, got {}",
                self.rest_minutes
            ));
        }
        Ok(())
    }
}

// ============================================================================
// PresetCatalog
// ============================================================================

/// A fixed, ordered catalog of presets configured at startup.
///
/// Selection is by index; out-of-range selection is a no-op.
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<Preset>,
    selected: usize,
}

impl Default for PresetCatalog {
    fn default() -> Self {
        Self {
            presets: vec![
                Preset::new("25min focus / 5min rest", 25, 5),
                Preset::new("30min focus / 10min rest", 30, 10),
                Preset::new("30min focus / 5min rest", 30, 5),
                Preset::new("45min focus / 15min rest", 45, 15),
            ],
            selected: 0,
        }
    }
}

impl PresetCatalog {
    /// Creates a catalog from a list of presets.
    ///
    /// Returns an error message if the list is empty or any preset is
    /// invalid; the catalog is fixed after startup, so all validation
    /// happens here.
    pub fn new(presets: Vec<Preset>) -> Result<Self, String> {
        if presets.is_empty() {
            return Err("preset catalog must not be empty".to_string());
        }
        for preset in &presets {
            preset.validate()?;
        }
        Ok(Self {
            presets,
            selected: 0,
        })
    }

    /// Returns the number of presets in the catalog.
    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Returns true if the catalog holds no presets.
    ///
    /// Unreachable through `new`, which rejects empty lists.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Returns all presets in catalog order.
    pub fn presets(&self) -> &[Preset] {
        &self.presets
    }

    /// Returns the preset at the given index, if any.
    pub fn get(&self, index: usize) -> Option<&Preset> {
        self.presets.get(index)
    }

    /// Returns the index of the currently selected preset.
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Returns the currently selected preset.
    pub fn selected(&self) -> &Preset {
        &self.presets[self.selected]
    }

    /// Selects the preset at `index`.
    ///
    /// Out-of-range indices leave the selection unchanged and return false.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.presets.len() {
            self.selected = index;
            true
        } else {
            false
        }
    }

    /// Moves the selection down one entry, stopping at the last.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.presets.len() {
            self.selected += 1;
        }
    }

    /// Moves the selection up one entry, stopping at the first.
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// The authoritative timer state, owned by the phase controller.
///
/// A fresh value is constructed on start and on every phase transition;
/// Idle carries no preset and is never running. Constructors uphold both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    /// Current phase
    pub phase: Phase,
    /// Time left in the current phase
    pub remaining: Duration,
    /// False while paused or idle
    pub running: bool,
    preset: Option<Preset>,
}

impl TimerState {
    /// The idle state: no preset, no countdown.
    pub fn idle() -> Self {
        Self {
            phase: Phase::Idle,
            remaining: Duration::ZERO,
            running: false,
            preset: None,
        }
    }

    /// A running focus phase at the start of the preset's focus interval.
    pub fn focus(preset: Preset) -> Self {
        Self {
            phase: Phase::Focus,
            remaining: preset.focus(),
            running: true,
            preset: Some(preset),
        }
    }

    /// A running rest phase at the start of the preset's rest interval.
    pub fn rest(preset: Preset) -> Self {
        Self {
            phase: Phase::Rest,
            remaining: preset.rest(),
            running: true,
            preset: Some(preset),
        }
    }

    /// Returns the active preset, if a session is in progress.
    pub fn preset(&self) -> Option<&Preset> {
        self.preset.as_ref()
    }

    /// Returns true if the timer is counting down.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Returns a read-only copy for the renderer.
    pub fn snapshot(&self) -> Snapshot {
        let phase_total = match self.phase {
            Phase::Focus => self.preset.as_ref().map(Preset::focus),
            Phase::Rest => self.preset.as_ref().map(Preset::rest),
            Phase::Idle => None,
        };
        Snapshot {
            phase: self.phase,
            remaining: self.remaining,
            running: self.running,
            preset_label: self.preset.as_ref().map(|p| p.label.clone()),
            phase_total,
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// A read-only view of the timer handed to the renderer after every
/// processed event. The renderer never touches `TimerState` itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    /// Current phase
    pub phase: Phase,
    /// Time left in the current phase
    pub remaining: Duration,
    /// False while paused or idle
    pub running: bool,
    /// Label of the active preset, if any
    pub preset_label: Option<String>,
    /// Full length of the current phase, for progress display
    pub phase_total: Option<Duration>,
}

// ============================================================================
// Tests
// ============================================================================
