//! Output log pane rendering

use crate::snapshot::OutputLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph},
    Frame,
};

/// Render the numbered output log.
///
/// `scroll_offset` is clamped here; `usize::MAX` pins the view to the newest line.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    log: &OutputLog,
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
        .title(" Output Log ")
        .borders(Borders::ALL)
        .border_style(border_style);

    if log.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let total_items = log.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = log
        .lines
        .iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|line| {
            let message_style = if line.message.starts_with("Error") {
                Style::default().fg(DEFAULT_THEME.error)
            } else if line.message.starts_with("Warning") {
                Style::default().fg(DEFAULT_THEME.secondary)
            } else {
                Style::default().fg(DEFAULT_THEME.fg)
            };
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[Step {}] ", line.number),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(line.message.clone(), message_style),
            ]))
        })
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
