//! Main TUI application state and logic

use crate::engine::{Command, Mode, Stepper};
use crate::exercise::Exercise;
use crate::snapshot::Snapshot;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Auto-play speed steps for `+` / `-`
pub const SPEED_PRESETS: [f64; 7] = [0.25, 0.5, 1.0, 1.5, 2.0, 3.0, 4.0];

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Visualizer,
    Log,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Visualizer => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Visualizer,
        }
    }
}

/// The main application state
pub struct App {
    /// The stepper driving the exercise
    pub stepper: Stepper,

    /// The exercise being visualized
    pub exercise: &'static Exercise,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub visual_scroll: usize,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Index into [`SPEED_PRESETS`]
    pub speed_index: usize,

    /// Event poll interval
    pub tick: Duration,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    /// Log length at the previous frame (for auto-follow)
    prev_log_len: usize,

    /// Whether the current outcome was already announced
    outcome_seen: bool,
}

impl App {
    /// Create a new app. The closest speed preset to `speed` is selected.
    pub fn new(stepper: Stepper, exercise: &'static Exercise, speed: f64, tick: Duration) -> Self {
        let speed_index = SPEED_PRESETS
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| (*a - speed).abs().total_cmp(&(*b - speed).abs()))
            .map_or(2, |(i, _)| i);

        App {
            stepper,
            exercise,
            focused_pane: FocusedPane::Visualizer,
            visual_scroll: 0,
            log_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready! Press r to run, s to step, a to auto-play"),
            speed_index,
            tick,
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
            prev_log_len: 0,
            outcome_seen: false,
        }
    }

    pub fn speed(&self) -> f64 {
        SPEED_PRESETS[self.speed_index]
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let snapshot = self.stepper.snapshot();
            self.observe(&snapshot);
            terminal.draw(|f| self.render(f, &snapshot))?;

            if self.should_quit {
                break;
            }

            // Poll with a timeout so worker progress is redrawn
            if event::poll(self.tick)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.stepper.stop();
        Ok(())
    }

    /// Follow the log and announce outcomes
    fn observe(&mut self, snapshot: &Snapshot) {
        if snapshot.log.len() > self.prev_log_len {
            self.log_scroll = usize::MAX;
        }
        self.prev_log_len = snapshot.log.len();

        match (&snapshot.outcome, self.outcome_seen) {
            (Some(outcome), false) => {
                self.outcome_seen = true;
                self.status_message = match outcome {
                    Ok(output) => format!("Finished: {}", output),
                    Err(error) => format!("Error: {}", error),
                };
            }
            (None, true) => self.outcome_seen = false,
            _ => {}
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame, snapshot: &Snapshot) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Visualizer on top, log and metrics below
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(pane_area);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        super::panes::render_visualizer_pane(
            frame,
            rows[0],
            self.exercise.id,
            &snapshot.scene,
            self.focused_pane == FocusedPane::Visualizer,
            &mut self.visual_scroll,
        );

        super::panes::render_log_pane(
            frame,
            bottom[0],
            &snapshot.log,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        super::panes::render_metrics_pane(frame, bottom[1], self.exercise, snapshot);

        super::panes::render_status_bar(frame, status_area, &self.status_message, snapshot);
    }

    /// Send a command, reporting failures in the status bar
    fn send(&mut self, command: Command, message: &str) {
        match self.stepper.dispatch(command) {
            Ok(()) => self.status_message = message.to_string(),
            Err(error) => self.status_message = format!("Error: {}", error),
        }
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('r') => self.send(Command::Run, "Running..."),
            KeyCode::Right | KeyCode::Char('s') => self.send(Command::Step, "Stepped forward"),
            KeyCode::Left => {
                if self.stepper.snapshot().cursor == 0 {
                    self.status_message = "Already at the start".to_string();
                } else {
                    self.send(Command::Prev, "Stepped backward");
                }
            }
            KeyCode::Char('a') => {
                let message = if self.stepper.snapshot().mode == Mode::AutoPlaying {
                    "Auto-play stopped"
                } else {
                    "Playing..."
                };
                self.send(
                    Command::Auto {
                        speed: self.speed(),
                    },
                    message,
                );
            }
            KeyCode::Char(' ') => {
                // Toggle pause (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    let snapshot = self.stepper.snapshot();
                    match snapshot.mode {
                        Mode::AutoPlaying | Mode::SteppingWait => {
                            let message = if snapshot.paused { "Resumed" } else { "Paused" };
                            self.send(Command::PauseResume, message);
                        }
                        _ => self.status_message = "Nothing to pause".to_string(),
                    }
                }
            }
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.speed_index = (self.speed_index + 1).min(SPEED_PRESETS.len() - 1);
                self.change_speed();
            }
            KeyCode::Char('-') => {
                self.speed_index = self.speed_index.saturating_sub(1);
                self.change_speed();
            }
            KeyCode::Backspace | KeyCode::Char('x') => {
                self.visual_scroll = 0;
                self.log_scroll = 0;
                self.send(Command::Reset, "Reset");
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Visualizer => {
                    self.visual_scroll = self.visual_scroll.saturating_sub(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Visualizer => {
                    self.visual_scroll = self.visual_scroll.saturating_add(1);
                }
                FocusedPane::Log => {
                    self.log_scroll = self.log_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    fn change_speed(&mut self) {
        let speed = self.speed();
        self.send(Command::SetSpeed(speed), &format!("Speed {}x", speed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::Inputs;
    use crate::config::StepperConfig;
    use crate::exercise::Catalog;
    use crossterm::event::KeyModifiers;

    fn app(speed: f64) -> App {
        let exercise = Catalog::new().get("ARRAY_MAX").expect("known exercise");
        let binding = exercise.binding(Inputs::with_array(vec![3, 9, 4]));
        let stepper = Stepper::new(binding, Some(exercise.visualizer()), StepperConfig::instant());
        App::new(stepper, exercise, speed, Duration::from_millis(10))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_new_picks_closest_speed() {
        assert_eq!(app(1.0).speed(), 1.0);
        assert_eq!(app(3.7).speed(), 4.0);
        assert_eq!(app(0.1).speed(), 0.25);
    }

    #[test]
    fn test_speed_keys_clamp_to_presets() {
        let mut app = app(4.0);
        press(&mut app, KeyCode::Char('+'));
        assert_eq!(app.speed(), 4.0);

        press(&mut app, KeyCode::Char('-'));
        assert_eq!(app.speed(), 3.0);
        assert_eq!(app.status_message, "Speed 3x");
    }

    #[test]
    fn test_focus_cycles_and_quit() {
        let mut app = app(1.0);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Log);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Visualizer);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_prev_at_start_is_reported() {
        let mut app = app(1.0);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.status_message, "Already at the start");
    }

    #[test]
    fn test_run_outcome_reaches_status_bar() {
        let mut app = app(1.0);
        press(&mut app, KeyCode::Char('r'));
        app.stepper.wait_idle();

        let snapshot = app.stepper.snapshot();
        app.observe(&snapshot);
        assert!(app.status_message.starts_with("Finished: "));
        assert_eq!(app.log_scroll, usize::MAX);
    }
}
