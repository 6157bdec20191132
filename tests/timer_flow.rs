//! Integration tests for the timer core.
//!
//! These tests drive the phase controller and countdown clock through the
//! public library API, end to end:
//! - Focus and Rest alternate losslessly, cycle after cycle
//! - Pause gates the countdown; resume picks up where it left off
//! - Reset returns to Idle from any phase
//! - The clock's ticks actually move the controller

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use pomotui::{
    Alert, CountdownClock, Phase, PhaseController, Preset, PresetCatalog, TickOutcome, TICK_PERIOD,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Creates a controller over a one-preset catalog.
fn controller_with(focus_minutes: u32, rest_minutes: u32) -> PhaseController {
    let catalog = PresetCatalog::new(vec![Preset::new(
        format!("{focus_minutes}min focus / {rest_minutes}min rest"),
        focus_minutes,
        rest_minutes,
    )])
    .unwrap();
    PhaseController::new(catalog)
}

/// Delivers `n` one-second ticks and returns the outcomes.
fn tick_n(controller: &mut PhaseController, n: u64) -> Vec<TickOutcome> {
    (0..n)
        .map(|_| controller.tick(Duration::from_secs(1)))
        .collect()
}

// ============================================================================
// Phase Alternation
// ============================================================================

#[test]
fn test_focus_ticks_yield_rest_for_every_default_preset() {
    let defaults = PresetCatalog::default();

    for index in 0..defaults.len() {
        let preset = defaults.get(index).unwrap().clone();
        let focus_secs = u64::from(preset.focus_minutes) * 60;
        let rest_secs = u64::from(preset.rest_minutes) * 60;

        let mut controller = controller_with(preset.focus_minutes, preset.rest_minutes);
        controller.start();

        let outcomes = tick_n(&mut controller, focus_secs);
        assert_eq!(
            outcomes.last(),
            Some(&TickOutcome::PhaseChanged(Alert::RestStarted)),
            "preset {}",
            preset.label
        );
        assert_eq!(controller.state().phase, Phase::Rest);
        assert_eq!(
            controller.state().remaining,
            Duration::from_secs(rest_secs),
            "preset {}",
            preset.label
        );
    }
}

#[test]
fn test_full_cycle_round_trips_back_to_focus() {
    let mut controller = controller_with(25, 5);
    controller.start();

    // f + r ticks from Focus-start land back at Focus with remaining = f.
    tick_n(&mut controller, (25 + 5) * 60);
    assert_eq!(controller.state().phase, Phase::Focus);
    assert_eq!(controller.state().remaining, Duration::from_secs(25 * 60));
    assert!(controller.state().running);
}

#[test]
fn test_concrete_25_5_scenario() {
    let mut controller = controller_with(25, 5);
    controller.start();
    assert_eq!(controller.state().phase, Phase::Focus);
    assert_eq!(controller.state().remaining, Duration::from_secs(1500));

    tick_n(&mut controller, 1500);
    assert_eq!(controller.state().phase, Phase::Rest);
    assert_eq!(controller.state().remaining, Duration::from_secs(300));

    tick_n(&mut controller, 300);
    assert_eq!(controller.state().phase, Phase::Focus);
    assert_eq!(controller.state().remaining, Duration::from_secs(1500));
}

#[test]
fn test_alternation_is_infinite() {
    let mut controller = controller_with(1, 1);
    controller.start();

    // No session cap: ten full cycles later the timer is still flipping.
    for _ in 0..10 {
        tick_n(&mut controller, 60);
        assert_eq!(controller.state().phase, Phase::Rest);
        tick_n(&mut controller, 60);
        assert_eq!(controller.state().phase, Phase::Focus);
    }
    assert!(controller.state().running);
}

// ============================================================================
// Pause / Resume
// ============================================================================

#[test]
fn test_pause_gates_ticks_and_resume_continues() {
    let mut controller = controller_with(25, 5);
    controller.start();
    tick_n(&mut controller, 100);
    let at_pause = controller.state().remaining;

    controller.toggle();
    let outcomes = tick_n(&mut controller, 10);
    assert!(outcomes.iter().all(|o| *o == TickOutcome::Ignored));
    assert_eq!(controller.state().remaining, at_pause);

    controller.toggle();
    tick_n(&mut controller, 10);
    assert_eq!(
        controller.state().remaining,
        at_pause - Duration::from_secs(10)
    );
}

#[test]
fn test_double_toggle_is_noop_on_running() {
    let mut controller = controller_with(25, 5);
    controller.start();

    controller.toggle();
    controller.toggle();
    assert!(controller.state().running);

    controller.toggle();
    controller.toggle();
    controller.toggle();
    assert!(!controller.state().running);
}

#[test]
fn test_toggle_while_idle_is_noop() {
    let mut controller = controller_with(25, 5);
    controller.toggle();
    assert_eq!(controller.state().phase, Phase::Idle);
    assert!(!controller.state().running);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn test_reset_from_each_phase_yields_idle() {
    // From Focus.
    let mut controller = controller_with(1, 1);
    controller.start();
    tick_n(&mut controller, 10);
    controller.reset();
    assert_eq!(controller.state().phase, Phase::Idle);
    assert!(!controller.state().running);
    assert!(controller.state().preset().is_none());

    // From Rest.
    let mut controller = controller_with(1, 1);
    controller.start();
    tick_n(&mut controller, 60);
    assert_eq!(controller.state().phase, Phase::Rest);
    controller.reset();
    assert_eq!(controller.state().phase, Phase::Idle);
    assert!(controller.state().preset().is_none());

    // From Idle, a no-op.
    let mut controller = controller_with(1, 1);
    controller.reset();
    assert_eq!(controller.state().phase, Phase::Idle);
}

// ============================================================================
// Preset Selection
// ============================================================================

#[test]
fn test_out_of_range_selection_changes_nothing() {
    let mut controller = PhaseController::new(PresetCatalog::default());
    assert!(controller.select_preset(2));

    assert!(!controller.select_preset(99));
    assert_eq!(controller.catalog().selected_index(), 2);
    assert_eq!(controller.state().phase, Phase::Idle);

    controller.start();
    // Selected preset 30min focus / 5min rest.
    assert_eq!(controller.state().remaining, Duration::from_secs(30 * 60));
}

// ============================================================================
// Clock-Driven Flow
// ============================================================================

/// Drives the controller from a real (fast) clock: arm, consume one tick
/// per delivered event, and watch a whole focus interval expire.
#[tokio::test]
async fn test_clock_drives_controller_through_a_transition() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut clock = CountdownClock::with_period(tick_tx, Duration::from_millis(2));
    let mut controller = controller_with(1, 1);

    controller.start();
    clock.arm();

    // 60 delivered ticks, one simulated second each.
    let mut last = TickOutcome::Ignored;
    for _ in 0..60 {
        let tick = timeout(Duration::from_secs(5), tick_rx.recv())
            .await
            .expect("tick within wait window")
            .expect("channel open");
        assert_eq!(tick.generation, clock.generation());
        last = controller.tick(TICK_PERIOD);
    }

    assert_eq!(last, TickOutcome::PhaseChanged(Alert::RestStarted));
    assert_eq!(controller.state().phase, Phase::Rest);

    clock.disarm();
    assert!(!clock.is_running());
}

/// A disarmed clock delivers nothing, so a paused timer cannot move.
#[tokio::test]
async fn test_disarmed_clock_leaves_paused_timer_untouched() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let mut clock = CountdownClock::with_period(tick_tx, Duration::from_millis(2));
    let mut controller = controller_with(25, 5);

    controller.start();
    clock.arm();
    let tick = timeout(Duration::from_secs(5), tick_rx.recv())
        .await
        .expect("tick within wait window")
        .expect("channel open");
    controller.tick(TICK_PERIOD);
    let stale_generation = tick.generation;

    controller.toggle();
    clock.disarm();
    while tick_rx.try_recv().is_ok() {}
    let paused_at = controller.state().remaining;

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(tick_rx.try_recv().is_err(), "no ticks after disarm");
    assert_ne!(clock.generation(), stale_generation);
    assert_eq!(controller.state().remaining, paused_at);
}
