use crate::app::{App, FocusedBox, SelectorFocus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph},
    Frame,
};

mod entries_list;
mod tag_selector;
mod timer_card;
pub(super) mod utils;

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Tags
            Constraint::Length(5), // Timer
            Constraint::Min(5),    // Entries
            Constraint::Length(1), // Status
            Constraint::Length(3), // Controls
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    tag_selector::render_tag_input(frame, chunks[1], app);
    timer_card::render_timer(frame, chunks[2], app);
    entries_list::render_entries(frame, chunks[3], app);
    render_status(frame, chunks[4], app);
    render_controls(frame, chunks[5], app);

    // Overlays last so they sit above the boxes below the tag input
    if app.focused_box == FocusedBox::Tags && app.timer.tag_selector.is_dropdown_visible() {
        tag_selector::render_dropdown(frame, chunks[1], app);
    }
    if app.timer.tag_selector.dialog().is_some() {
        tag_selector::render_create_dialog(frame, app);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &mut App) {
    let mut spans = vec![Span::styled(
        "tagtime",
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.is_dev {
        spans.push(Span::styled(
            "  [dev data]",
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    if app.is_busy() {
        let throbber_area = Rect {
            x: area.x + area.width.saturating_sub(2),
            width: area.width.min(2),
            ..area
        };
        let throbber = throbber_widgets_tui::Throbber::default()
            .style(Style::default().fg(Color::Yellow))
            .throbber_style(Style::default().fg(Color::Yellow))
            .throbber_set(throbber_widgets_tui::BRAILLE_SIX)
            .use_type(throbber_widgets_tui::WhichUse::Spin);
        frame.render_stateful_widget(throbber, throbber_area, &mut app.throbber_state);
    }
}

fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Cyan),
        )),
        None => Line::from(""),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_controls(frame: &mut Frame, area: Rect, app: &App) {
    let selector_focus = app.timer.tag_selector.focus();
    let mut spans = Vec::new();
    match app.focused_box {
        FocusedBox::Tags if selector_focus == Some(SelectorFocus::Dialog) => {
            spans.extend(utils::hint("Tab", ": Switch field  "));
            spans.extend(utils::hint("Enter", ": Create  "));
            spans.extend(utils::hint("Esc", ": Cancel"));
        }
        FocusedBox::Tags if selector_focus == Some(SelectorFocus::Options) => {
            spans.extend(utils::hint("↑↓", ": Navigate  "));
            spans.extend(utils::hint("Enter", ": Select  "));
            spans.extend(utils::hint("Esc", ": Back to search"));
        }
        FocusedBox::Tags => {
            spans.extend(utils::hint("Type", ": Search  "));
            spans.extend(utils::hint("Enter", ": Add  "));
            spans.extend(utils::hint("↓", ": Options  "));
            spans.extend(utils::hint("←→", ": Chips  "));
            spans.extend(utils::hint("Bksp", ": Remove  "));
            spans.extend(utils::hint("Ctrl+T", ": Start/Stop  "));
            spans.extend(utils::hint("Tab", ": Next box"));
        }
        FocusedBox::Timer => {
            spans.extend(utils::hint("Space", ": Start/Stop  "));
            spans.extend(utils::hint("t", ": Tags  "));
            spans.extend(utils::hint("j", ": Entries  "));
            spans.extend(utils::hint("Tab", ": Next box  "));
            spans.extend(utils::hint("q", ": Quit"));
        }
        FocusedBox::Entries => {
            spans.extend(utils::hint("↑↓/j/k", ": Navigate  "));
            spans.extend(utils::hint("d", ": Delete  "));
            spans.extend(utils::hint("r", ": Refresh  "));
            spans.extend(utils::hint("Tab", ": Next box  "));
            spans.extend(utils::hint("q", ": Quit"));
        }
    }

    let controls = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(Span::styled(
                    " Controls ",
                    Style::default().fg(Color::DarkGray),
                ))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(controls, area);
}
