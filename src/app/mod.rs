//! Application loop and input dispatch.
//!
//! Everything runs on one logical timeline: a `tokio::select!` over the
//! terminal input stream and the countdown clock's tick channel. The
//! phase controller is only ever mutated here, in response to a key, a
//! tick, or a reset, so its state needs no locking. After each processed
//! event the UI is redrawn from a fresh snapshot.

mod tasks;

use std::sync::Arc;

use anyhow::{Context, Result};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::Backend;
use ratatui::Terminal;
use tracing::{debug, trace};

use crate::engine::{ClockTick, CountdownClock, PhaseController, TickOutcome, TICK_PERIOD};
use crate::notify::{self, Notifier};
use crate::types::PresetCatalog;
use crate::ui;

pub use tasks::TaskList;

// ============================================================================
// Screen
// ============================================================================

/// Which screen the UI is showing.
///
/// These are UI modes layered above the timer core; the timer itself only
/// knows Idle/Focus/Rest. TaskBoard and TaskPicker both sit on top of an
/// idle timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Catalog browsing, the entry screen
    PresetSelect,
    /// Adding and removing tasks
    TaskBoard,
    /// Picking the tasks for the next session
    TaskPicker,
    /// The running (or paused) countdown
    Timer,
}

// ============================================================================
// App
// ============================================================================

/// The application: timer core, clock, task list, and current screen.
pub struct App {
    controller: PhaseController,
    clock: CountdownClock,
    tick_rx: tokio::sync::mpsc::UnboundedReceiver<ClockTick>,
    notifier: Arc<dyn Notifier>,
    tasks: TaskList,
    screen: Screen,
    should_quit: bool,
}

impl App {
    /// Creates the app over a validated preset catalog.
    pub fn new(catalog: PresetCatalog, notifier: Arc<dyn Notifier>) -> Self {
        let (tick_tx, tick_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            controller: PhaseController::new(catalog),
            clock: CountdownClock::new(tick_tx),
            tick_rx,
            notifier,
            tasks: TaskList::new(),
            screen: Screen::PresetSelect,
            should_quit: false,
        }
    }

    /// Runs the event loop until the user quits.
    pub async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut input = crossterm::event::EventStream::new();

        while !self.should_quit {
            terminal
                .draw(|frame| ui::render(frame, &self.view()))
                .context("drawing frame")?;

            tokio::select! {
                maybe_event = input.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.on_key(key);
                    }
                    // Resizes need nothing beyond the redraw; the next
                    // frame reads its own area.
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).context("reading terminal input"),
                    None => self.should_quit = true,
                },
                Some(tick) = self.tick_rx.recv() => self.on_tick(tick),
            }
        }

        Ok(())
    }

    fn view(&self) -> ui::View<'_> {
        ui::View {
            screen: self.screen,
            snapshot: self.controller.snapshot(),
            presets: self.controller.catalog().presets(),
            selected_preset: self.controller.catalog().selected_index(),
            tasks: &self.tasks,
        }
    }

    // ------------------------------------------------------------------------
    // Input handling
    // ------------------------------------------------------------------------

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::PresetSelect => self.on_preset_select_key(key),
            Screen::TaskBoard => self.on_task_board_key(key),
            Screen::TaskPicker => self.on_task_picker_key(key),
            Screen::Timer => self.on_timer_key(key),
        }
    }

    fn on_preset_select_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.controller.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.controller.select_prev(),
            KeyCode::Enter | KeyCode::Char(' ') => self.screen = Screen::TaskPicker,
            KeyCode::Char('a') => self.screen = Screen::TaskBoard,
            _ => {}
        }
    }

    fn on_task_board_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.screen = Screen::PresetSelect,
            KeyCode::Enter => {
                self.tasks.submit_input();
            }
            KeyCode::Backspace => self.tasks.pop_char(),
            KeyCode::Down => self.tasks.cursor_next(),
            KeyCode::Up => self.tasks.cursor_prev(),
            KeyCode::Delete => self.tasks.remove_current(),
            KeyCode::Char(c) => self.tasks.push_char(c),
            _ => {}
        }
    }

    fn on_task_picker_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.screen = Screen::PresetSelect,
            KeyCode::Char('j') | KeyCode::Down => self.tasks.cursor_next(),
            KeyCode::Char('k') | KeyCode::Up => self.tasks.cursor_prev(),
            KeyCode::Char(' ') => self.tasks.toggle_selected(),
            KeyCode::Enter => self.start_session(),
            _ => {}
        }
    }

    fn on_timer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.toggle_pause(),
            KeyCode::Char('q') | KeyCode::Esc => self.abort_to_idle(),
            _ => {}
        }
    }

    // ------------------------------------------------------------------------
    // Timer control
    // ------------------------------------------------------------------------

    fn start_session(&mut self) {
        self.controller.start();
        self.clock.arm();
        self.screen = Screen::Timer;
        debug!(
            preset = self.controller.catalog().selected().label,
            "session started"
        );
    }

    fn toggle_pause(&mut self) {
        self.controller.toggle();
        if self.controller.state().is_running() {
            self.clock.arm();
        } else {
            self.clock.disarm();
        }
    }

    /// Returns to the preset screen, disarming the clock so no further
    /// tick can reach the controller.
    fn abort_to_idle(&mut self) {
        self.clock.disarm();
        self.controller.reset();
        self.screen = Screen::PresetSelect;
    }

    // ------------------------------------------------------------------------
    // Tick handling
    // ------------------------------------------------------------------------

    fn on_tick(&mut self, tick: ClockTick) {
        if tick.generation != self.clock.generation() {
            // The tick raced a disarm or re-arm.
            trace!(generation = tick.generation, "discarding stale tick");
            return;
        }

        match self.controller.tick(TICK_PERIOD) {
            TickOutcome::PhaseChanged(alert) => {
                // The new phase counts its first second from now.
                self.clock.arm();
                notify::dispatch(self.notifier.clone(), alert);
            }
            TickOutcome::Tick | TickOutcome::Ignored => {}
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Alert;
    use crate::notify::MockNotifier;
    use crate::types::Phase;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> (App, Arc<MockNotifier>) {
        let notifier = Arc::new(MockNotifier::new());
        let app = App::new(PresetCatalog::default(), notifier.clone());
        (app, notifier)
    }

    fn start_session(app: &mut App) {
        app.on_key(key(KeyCode::Enter)); // preset select -> task picker
        app.on_key(key(KeyCode::Enter)); // task picker -> timer
    }

    #[tokio::test]
    async fn test_initial_screen_is_preset_select() {
        let (app, _) = test_app();
        assert_eq!(app.screen, Screen::PresetSelect);
        assert_eq!(app.controller.state().phase, Phase::Idle);
        assert!(!app.clock.is_running());
    }

    #[tokio::test]
    async fn test_preset_navigation_keys() {
        let (mut app, _) = test_app();
        app.on_key(key(KeyCode::Char('j')));
        app.on_key(key(KeyCode::Down));
        assert_eq!(app.controller.catalog().selected_index(), 2);

        app.on_key(key(KeyCode::Char('k')));
        assert_eq!(app.controller.catalog().selected_index(), 1);
    }

    #[tokio::test]
    async fn test_enter_starts_session_via_task_picker() {
        let (mut app, _) = test_app();
        start_session(&mut app);

        assert_eq!(app.screen, Screen::Timer);
        assert_eq!(app.controller.state().phase, Phase::Focus);
        assert!(app.clock.is_running());
    }

    #[tokio::test]
    async fn test_space_toggles_pause_and_clock() {
        let (mut app, _) = test_app();
        start_session(&mut app);

        app.on_key(key(KeyCode::Char(' ')));
        assert!(!app.controller.state().is_running());
        assert!(!app.clock.is_running());

        app.on_key(key(KeyCode::Char(' ')));
        assert!(app.controller.state().is_running());
        assert!(app.clock.is_running());
    }

    #[tokio::test]
    async fn test_quit_key_from_timer_aborts_to_idle() {
        let (mut app, _) = test_app();
        start_session(&mut app);

        app.on_key(key(KeyCode::Char('q')));
        assert_eq!(app.screen, Screen::PresetSelect);
        assert_eq!(app.controller.state().phase, Phase::Idle);
        assert!(!app.clock.is_running());
        assert!(!app.should_quit);
    }

    #[tokio::test]
    async fn test_quit_key_from_preset_select_quits() {
        let (mut app, _) = test_app();
        app.on_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_ctrl_c_quits_from_any_screen() {
        let (mut app, _) = test_app();
        start_session(&mut app);
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_task_board_input_flow() {
        let (mut app, _) = test_app();
        app.on_key(key(KeyCode::Char('a')));
        assert_eq!(app.screen, Screen::TaskBoard);

        for c in "ship it".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));
        assert_eq!(app.tasks.tasks(), ["ship it"]);

        app.on_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::PresetSelect);
    }

    #[tokio::test]
    async fn test_task_picker_selection() {
        let (mut app, _) = test_app();
        app.on_key(key(KeyCode::Char('a')));
        for c in "review".chars() {
            app.on_key(key(KeyCode::Char(c)));
        }
        app.on_key(key(KeyCode::Enter));
        app.on_key(key(KeyCode::Esc));

        app.on_key(key(KeyCode::Enter)); // into task picker
        app.on_key(key(KeyCode::Char(' ')));
        assert!(app.tasks.is_selected("review"));

        app.on_key(key(KeyCode::Char('q')));
        assert_eq!(app.screen, Screen::PresetSelect);
    }

    #[tokio::test]
    async fn test_live_tick_advances_countdown() {
        let (mut app, _) = test_app();
        start_session(&mut app);
        let before = app.controller.state().remaining;

        app.on_tick(ClockTick {
            generation: app.clock.generation(),
        });
        assert_eq!(
            app.controller.state().remaining,
            before - std::time::Duration::from_secs(1)
        );
    }

    #[tokio::test]
    async fn test_stale_tick_is_discarded() {
        let (mut app, _) = test_app();
        start_session(&mut app);
        let stale = app.clock.generation();
        let before = app.controller.state().remaining;

        app.on_key(key(KeyCode::Char(' '))); // pause bumps the generation
        app.on_key(key(KeyCode::Char(' '))); // resume bumps it again

        app.on_tick(ClockTick { generation: stale });
        assert_eq!(app.controller.state().remaining, before);
    }

    #[tokio::test]
    async fn test_transition_rearms_clock_and_notifies() {
        let notifier = Arc::new(MockNotifier::new());
        let catalog =
            PresetCatalog::new(vec![crate::types::Preset::new("1/1", 1, 1)]).unwrap();
        let mut app = App::new(catalog, notifier.clone());
        start_session(&mut app);

        let generation_before = app.clock.generation();
        for _ in 0..60 {
            app.on_tick(ClockTick {
                generation: app.clock.generation(),
            });
        }

        assert_eq!(app.controller.state().phase, Phase::Rest);
        assert!(app.clock.generation() > generation_before);
        assert!(app.clock.is_running());

        // Delivery is fire-and-forget; wait for the background task.
        tokio::time::timeout(std::time::Duration::from_secs(1), async {
            while notifier.alerts().is_empty() {
                tokio::time::sleep(std::time::Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("alert delivered");
        assert_eq!(notifier.alerts(), vec![Alert::RestStarted]);
    }
}
