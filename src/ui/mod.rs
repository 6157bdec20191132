//! Pull-based terminal rendering.
//!
//! The app loop hands this module a [`View`] after every processed event
//! and the whole frame is redrawn from it. Nothing here feeds back into
//! the timer; layout width comes from the frame itself on each draw.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::app::{Screen, TaskList};
use crate::types::{Phase, Preset, Snapshot};

const ACCENT: Color = Color::Rgb(0xea, 0x9d, 0x34);

/// Everything one frame needs: the current screen, a timer snapshot, and
/// the lists the screens draw from.
pub struct View<'a> {
    pub screen: Screen,
    pub snapshot: Snapshot,
    pub presets: &'a [Preset],
    pub selected_preset: usize,
    pub tasks: &'a TaskList,
}

/// Draws the current screen.
pub fn render(frame: &mut Frame, view: &View<'_>) {
    match view.screen {
        Screen::PresetSelect => render_preset_select(frame, view),
        Screen::TaskBoard => render_task_board(frame, view),
        Screen::TaskPicker => render_task_picker(frame, view),
        Screen::Timer => render_timer(frame, view),
    }
}

// ============================================================================
// Screens
// ============================================================================

fn render_preset_select(frame: &mut Frame, view: &View<'_>) {
    let mut lines: Vec<Line> = view
        .presets
        .iter()
        .enumerate()
        .map(|(i, preset)| {
            if i == view.selected_preset {
                Line::from(Span::styled(
                    preset.label.clone(),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(preset.label.clone())
            }
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(legend_line(
        "j/k move  •  Enter select  •  a tasks  •  q quit",
    ));

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block(" pomotui ")),
        area,
    );
}

fn render_task_board(frame: &mut Frame, view: &View<'_>) {
    let mut lines = vec![Line::from(Span::styled(
        "Tasks",
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));

    if view.tasks.is_empty() {
        lines.push(Line::from("No tasks yet"));
    } else {
        for (i, task) in view.tasks.tasks().iter().enumerate() {
            let row = format!("{}. {task}", i + 1);
            if i == view.tasks.cursor() {
                lines.push(Line::from(Span::styled(
                    row,
                    Style::default().fg(ACCENT),
                )));
            } else {
                lines.push(Line::from(row));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!("New task: {}\u{2588}", view.tasks.input())));
    lines.push(Line::from(""));
    lines.push(legend_line(
        "Enter add  •  Del remove  •  Esc back",
    ));

    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block(" tasks ")),
        area,
    );
}

fn render_task_picker(frame: &mut Frame, view: &View<'_>) {
    let mut lines = vec![Line::from("Which task will you be working on?")];
    lines.push(Line::from(""));

    if view.tasks.is_empty() {
        lines.push(Line::from("No tasks yet"));
    } else {
        for (i, task) in view.tasks.tasks().iter().enumerate() {
            let marker = if view.tasks.is_selected(task) { "O " } else { "  " };
            let row = format!("{marker}{}. {task}", i + 1);
            if i == view.tasks.cursor() {
                lines.push(Line::from(Span::styled(
                    row,
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )));
            } else {
                lines.push(Line::from(row));
            }
        }
    }

    lines.push(Line::from(""));
    lines.push(legend_line(
        "Space select  •  Enter start  •  q back",
    ));

    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(titled_block(" pomotui ")),
        area,
    );
}

fn render_timer(frame: &mut Frame, view: &View<'_>) {
    let snapshot = &view.snapshot;

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Length(1), // phase banner
            Constraint::Length(1),
            Constraint::Length(3), // countdown
            Constraint::Length(1),
            Constraint::Min(3),    // selected tasks
            Constraint::Length(1), // pause marker
            Constraint::Length(3), // progress gauge
            Constraint::Length(1), // legend
            Constraint::Percentage(10),
        ])
        .split(frame.area());

    let (banner, color) = match snapshot.phase {
        Phase::Focus => ("Focus!", Color::Green),
        Phase::Rest => ("Rest", Color::Cyan),
        Phase::Idle => ("", Color::Gray),
    };
    frame.render_widget(
        Paragraph::new(banner)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[1],
    );

    frame.render_widget(
        Paragraph::new(format_clock(snapshot.remaining.as_secs()))
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center),
        sections[3],
    );

    let task_lines: Vec<Line> = view
        .tasks
        .selected()
        .iter()
        .enumerate()
        .map(|(i, task)| Line::from(format!("{}. {task}", i + 1)))
        .collect();
    frame.render_widget(
        Paragraph::new(task_lines)
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center),
        sections[5],
    );

    if !snapshot.running {
        frame.render_widget(
            Paragraph::new("-PAUSE-")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            sections[6],
        );
    }

    frame.render_widget(
        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(progress_percent(snapshot)),
        centered_horizontal(60, sections[7]),
    );

    frame.render_widget(
        Paragraph::new(legend_line("Space pause/resume  •  q stop"))
            .alignment(Alignment::Center),
        sections[8],
    );
}

// ============================================================================
// Helpers
// ============================================================================

/// Formats seconds as mm:ss; hour-long phases roll the minute field past 59.
fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// How much of the current phase has elapsed, 0-100.
fn progress_percent(snapshot: &Snapshot) -> u16 {
    let Some(total) = snapshot.phase_total else {
        return 0;
    };
    if total.is_zero() {
        return 0;
    }
    let elapsed = total.saturating_sub(snapshot.remaining);
    ((elapsed.as_secs_f64() / total.as_secs_f64()) * 100.0).round() as u16
}

fn legend_line(text: &str) -> Line<'_> {
    Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)))
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
}

/// A rect centered in `area`, sized as a percentage of it.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn centered_horizontal(percent_x: u16, area: Rect) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area)[1]
}

// ============================================================================
// Tests
// ============================================================================
