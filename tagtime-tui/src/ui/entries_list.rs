use super::utils::{badge, border_style};
use super::*;
use crate::app::entries_list::{format_clock, format_duration};
use crate::store::QueryKey;

pub fn render_entries(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focused_box == FocusedBox::Entries;
    let sorted = app.sorted_entries();

    let title = if sorted.is_empty() {
        " Entries ".to_string()
    } else {
        format!(" Entries ({}) ", sorted.len())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style(focused))
        .padding(Padding::horizontal(1));

    let placeholder = if app.store.is_loading(QueryKey::TimeEntries) {
        Some(("Loading entries…", Color::DarkGray))
    } else if app.store.is_error(QueryKey::TimeEntries) {
        Some(("Unable to load time entries.", Color::Red))
    } else if sorted.is_empty() {
        Some(("No entries yet.", Color::DarkGray))
    } else {
        None
    };
    if let Some((message, color)) = placeholder {
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(color)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = sorted
        .iter()
        .map(|entry| {
            let mut header = vec![
                Span::raw(format_clock(Some(entry.start_at.as_str()))),
                Span::styled(" → ", Style::default().fg(Color::DarkGray)),
                Span::raw(format_clock(entry.end_at.as_deref())),
                Span::styled(
                    format!("  ({})", format_duration(&entry.start_at, entry.end_at.as_deref())),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if app.entries.is_deleting(&entry.id) {
                header.push(Span::styled(
                    "  deleting...",
                    Style::default().fg(Color::Yellow),
                ));
            }

            let mut lines = vec![Line::from(header)];
            if !entry.tags.is_empty() {
                let mut chips = Vec::new();
                for tag in &entry.tags {
                    chips.push(Span::styled(
                        format!(" {} ", tag.label),
                        badge(tag.color.as_deref()),
                    ));
                    chips.push(Span::raw(" "));
                }
                lines.push(Line::from(chips));
            }
            ListItem::new(lines)
        })
        .collect();

    let mut list = List::new(items).block(block);
    if focused {
        list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    }

    let list_area = if let Some(err) = app.entries.delete_error_text() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(area);
        frame.render_widget(
            Paragraph::new(Span::styled(err, Style::default().fg(Color::Red))),
            split[1],
        );
        split[0]
    } else {
        area
    };

    let mut state = ListState::default();
    state.select(app.entries.focused_index(sorted.len()));
    frame.render_stateful_widget(list, list_area, &mut state);
}
