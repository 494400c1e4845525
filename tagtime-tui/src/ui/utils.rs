use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use tagtime_client::color::{badge_style, Rgb};

/// Terminal background the badge tints are blended over.
const BACKDROP: Rgb = Rgb::new(0, 0, 0);

/// Helper function to create a centered rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height.saturating_sub(height)) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((r.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Length((r.width.saturating_sub(width)) / 2),
        ])
        .split(popup_layout[1])[1]
}

pub fn rgb_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Chip style derived from a tag's color.
pub fn badge(color: Option<&str>) -> Style {
    let style = badge_style(color);
    Style::default()
        .fg(rgb_color(style.foreground))
        .bg(rgb_color(style.background.over(BACKDROP)))
}

/// Foreground-only variant for list rows.
pub fn swatch(color: Option<&str>) -> Style {
    Style::default().fg(rgb_color(badge_style(color).border))
}

/// `Key: Label  ` pair for control bars.
pub fn hint<'a>(key: &'a str, label: &'a str) -> [Span<'a>; 2] {
    [
        Span::styled(key, Style::default().fg(Color::Yellow)),
        Span::raw(label),
    ]
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    }
}

pub fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}
