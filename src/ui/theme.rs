use crate::visual::Highlight;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub cell_bg: Color,
    pub active: Color,    // Yellow
    pub comparing: Color, // Blue
    pub swapped: Color,   // Pink
    pub sorted: Color,    // Green
    pub link: Color,
}

impl Theme {
    /// Background color for a highlighted cell
    pub fn highlight(&self, kind: Highlight) -> Color {
        match kind {
            Highlight::Active => self.active,
            Highlight::Comparing => self.comparing,
            Highlight::Swapped => self.swapped,
            Highlight::Sorted => self.sorted,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for bars
    cell_bg: Color::Rgb(69, 71, 90),
    active: Color::Rgb(249, 226, 175),
    comparing: Color::Rgb(137, 180, 250),
    swapped: Color::Rgb(245, 194, 231),
    sorted: Color::Rgb(166, 227, 161),
    link: Color::Rgb(148, 226, 213), // Teal arrows between nodes
};
