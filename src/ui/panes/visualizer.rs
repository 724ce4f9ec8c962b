//! Visualizer pane: draws a [`Scene`] as rows of boxed cells

use crate::ui::theme::DEFAULT_THEME;
use crate::visual::{Cell, Link, Scene, Track};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

/// Render the visualizer pane
pub fn render_visualizer_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    scene: &Scene,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style)
        .padding(Padding::new(1, 1, 1, 0));

    if scene.is_empty() {
        let paragraph = Paragraph::new("(nothing to show yet: press r, s or a)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = scene.tracks.iter().flat_map(track_lines).collect();

    // Borders plus top padding
    let visible_height = area.height.saturating_sub(3).max(1) as usize;
    if lines.len() > visible_height {
        *scroll_offset = (*scroll_offset).min(lines.len() - visible_height);
    } else {
        *scroll_offset = 0;
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .scroll((*scroll_offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn connector(link: Link) -> &'static str {
    match link {
        Link::None => " ",
        Link::Forward | Link::Circular => " → ",
        Link::Both => " ⇄ ",
    }
}

fn cell_width(cell: &Cell) -> usize {
    let caption = cell.caption.as_ref().map_or(0, |c| c.chars().count());
    cell.text.chars().count().max(caption) + 2
}

fn centered(text: &str, width: usize) -> String {
    format!("{:^width$}", text, width = width)
}

fn cell_style(cell: &Cell) -> Style {
    match cell.mark {
        Some(kind) => Style::default()
            .bg(DEFAULT_THEME.highlight(kind))
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
        None => Style::default().bg(DEFAULT_THEME.cell_bg).fg(DEFAULT_THEME.fg),
    }
}

/// A track becomes a label line, a cell line, an optional caption line and a
/// blank separator
fn track_lines(track: &Track) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(label) = track.label {
        lines.push(Line::from(Span::styled(
            label,
            Style::default()
                .fg(DEFAULT_THEME.primary)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if track.cells.is_empty() {
        if let Some(placeholder) = track.placeholder {
            lines.push(Line::from(Span::styled(
                placeholder,
                Style::default().fg(DEFAULT_THEME.comment),
            )));
        }
        lines.push(Line::default());
        return lines;
    }

    let link_style = Style::default().fg(DEFAULT_THEME.link);
    let gap = connector(track.link);
    let mut cells = Vec::new();
    let mut captions = String::new();

    for (i, cell) in track.cells.iter().enumerate() {
        if i > 0 {
            cells.push(Span::styled(gap, link_style));
            captions.push_str(&" ".repeat(gap.chars().count()));
        }
        let width = cell_width(cell);
        cells.push(Span::styled(centered(&cell.text, width), cell_style(cell)));
        captions.push_str(&centered(cell.caption.as_deref().unwrap_or(""), width));
    }

    if track.link == Link::Circular {
        cells.push(Span::styled(" → (back to start)", link_style));
    }

    lines.push(Line::from(cells));
    if track.cells.iter().any(|c| c.caption.is_some()) {
        lines.push(Line::from(Span::styled(
            captions,
            Style::default().fg(DEFAULT_THEME.comment),
        )));
    }
    lines.push(Line::default());
    lines
}
