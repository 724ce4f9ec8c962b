//! Status bar rendering with keybindings and state indicators

use crate::engine::Mode;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Badge shown at the right end of the status bar
fn badge(snapshot: &Snapshot) -> Option<(&'static str, Color)> {
    let failed = matches!(snapshot.outcome, Some(Err(_)));
    match snapshot.mode {
        _ if snapshot.is_reviewing() => Some((" ◀ REVIEW ", DEFAULT_THEME.primary)),
        Mode::AutoPlaying | Mode::SteppingWait if snapshot.paused => {
            Some((" ⏸ PAUSED ", DEFAULT_THEME.secondary))
        }
        Mode::AutoPlaying => Some((" ▶ PLAYING ", DEFAULT_THEME.secondary)),
        Mode::Running => Some((" ▶ RUNNING ", DEFAULT_THEME.secondary)),
        Mode::SteppingWait => Some((" STEP ", DEFAULT_THEME.primary)),
        Mode::Idle if failed => Some((" FAILED ", DEFAULT_THEME.error)),
        Mode::Idle if snapshot.outcome.is_some() => Some((" END ", DEFAULT_THEME.success)),
        Mode::Idle => None,
    }
}

/// Render the status bar at the bottom
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, snapshot: &Snapshot) {
    // Split status bar into left and right
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let failed = matches!(snapshot.outcome, Some(Err(_)));
    let step_text = format!(" Step {}/{} ", snapshot.cursor, snapshot.recorded);

    let left_spans = vec![
        Span::styled(
            step_text,
            Style::default()
                .bg(if failed {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.primary
                })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(if failed {
                    DEFAULT_THEME.error
                } else {
                    DEFAULT_THEME.fg
                }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);

    frame.render_widget(left_paragraph, layout[0]);

    // Right side: Keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let hints = [
        (" r ", " run "),
        (" ←/→ ", " step "),
        (" a ", " auto "),
        (" ⎵ ", " pause "),
        (" +/- ", " speed "),
        (" ⌫ ", " reset "),
        ("q", " quit "),
    ];

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(*key, key_style));
        right_spans.push(Span::styled(*desc, desc_style));
    }

    if let Some((label, color)) = badge(snapshot) {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            label,
            Style::default()
                .bg(color)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);

    frame.render_widget(right_paragraph, layout[1]);
}
