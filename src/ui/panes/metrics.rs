//! Exercise details, metrics and outcome

use crate::exercise::Exercise;
use crate::snapshot::Snapshot;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

fn row(name: &'static str, value: String, value_style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", name),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, value_style),
    ])
}

/// Render the metrics pane
pub fn render_metrics_pane(frame: &mut Frame, area: Rect, exercise: &Exercise, snapshot: &Snapshot) {
    let block = Block::default()
        .title(" Metrics ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let value = Style::default().fg(DEFAULT_THEME.fg);
    let number = Style::default()
        .fg(DEFAULT_THEME.secondary)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            exercise.title,
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} · {}", exercise.category, exercise.difficulty),
            Style::default().fg(DEFAULT_THEME.comment),
        )),
        Line::from(Span::styled(exercise.description, value)),
        Line::default(),
        row("Steps", snapshot.metrics.steps.to_string(), number),
        row("Comparisons", snapshot.metrics.comparisons.to_string(), number),
        row("Swaps", snapshot.metrics.swaps.to_string(), number),
        Line::default(),
        row("Mode", snapshot.mode.to_string(), value),
        row("Speed", format!("{}x", snapshot.speed), value),
    ];

    match &snapshot.outcome {
        Some(Ok(output)) => lines.push(row(
            "Result",
            output.to_string(),
            Style::default()
                .fg(DEFAULT_THEME.success)
                .add_modifier(Modifier::BOLD),
        )),
        Some(Err(error)) => lines.push(row(
            "Failed",
            error.to_string(),
            Style::default().fg(DEFAULT_THEME.error),
        )),
        None => {}
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
