use super::utils::{badge, border_style, centered_rect, highlight, swatch};
use super::*;
use crate::app::tag_selector::{highlight_label, DialogField, SelectorOption};

pub fn render_tag_input(frame: &mut Frame, area: Rect, app: &App) {
    let selector = &app.timer.tag_selector;
    let focused = app.focused_box == FocusedBox::Tags;
    let typing = focused && selector.focus() == Some(SelectorFocus::Input);

    let mut spans = Vec::new();
    for (index, tag) in selector.selection().tags().iter().enumerate() {
        let mut style = badge(tag.color.as_deref());
        if selector.active_index() == Some(index) {
            style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
        }
        spans.push(Span::styled(format!(" {} × ", tag.label), style));
        spans.push(Span::raw(" "));
    }

    if selector.search().is_empty() && selector.selection().is_empty() && !typing {
        spans.push(Span::styled(
            "Add tags...",
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::raw(selector.search().to_string()));
    }
    if typing && selector.active_index().is_none() {
        spans.push(Span::raw("█"));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Tags ")
            .border_style(border_style(focused))
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

/// Options list anchored below the tag input.
pub fn render_dropdown(frame: &mut Frame, anchor: Rect, app: &App) {
    let selector = &app.timer.tag_selector;
    let available = app.available_tags();

    let rows = selector.visible_rows(available) as u16;
    let screen = frame.area();
    let top = anchor.y + anchor.height;
    let area = Rect {
        x: anchor.x,
        y: top,
        width: anchor.width,
        height: (rows + 2).min(screen.height.saturating_sub(top)),
    };
    if area.height < 3 {
        return;
    }
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .padding(Padding::horizontal(1));

    if let Some(message) =
        selector.empty_message(available, app.tags_loading(), app.tags_failed())
    {
        let color = if app.tags_failed() {
            Color::Red
        } else {
            Color::DarkGray
        };
        let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(color)))
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let search = selector.search();
    let disabled = selector.is_creating();
    let items: Vec<ListItem> = selector
        .options(available)
        .into_iter()
        .map(|option| match option {
            SelectorOption::Tag(tag) => {
                let mut spans = vec![Span::styled("● ", swatch(tag.color.as_deref()))];
                match highlight_label(&tag.label, search) {
                    Some((before, matched, after)) => {
                        spans.push(Span::raw(before.to_string()));
                        spans.push(Span::styled(matched.to_string(), highlight()));
                        spans.push(Span::raw(after.to_string()));
                    }
                    None => spans.push(Span::raw(tag.label.clone())),
                }
                ListItem::new(Line::from(spans))
            }
            SelectorOption::Create => {
                let style = if disabled {
                    Style::default().fg(Color::DarkGray)
                } else {
                    Style::default().fg(Color::Green)
                };
                ListItem::new(Span::styled(
                    format!("+ Add \"{}\"", selector.trimmed_search()),
                    style,
                ))
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    let mut state = ListState::default();
    state.select(selector.highlighted_option(available));
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_create_dialog(frame: &mut Frame, app: &App) {
    let selector = &app.timer.tag_selector;
    let Some(dialog) = selector.dialog() else {
        return;
    };

    let area = centered_rect(52, 12, frame.area());
    frame.render_widget(Clear, area);

    let field_style = |field: DialogField| {
        if dialog.field == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let cursor = |field: DialogField| {
        if dialog.field == field && !selector.is_creating() {
            "█"
        } else {
            ""
        }
    };
    let preview = dialog.preview_color();

    let mut lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Name:  ", field_style(DialogField::Name)),
            Span::raw(dialog.name.clone()),
            Span::raw(cursor(DialogField::Name)),
        ]),
        Line::from(vec![
            Span::styled("Color: ", field_style(DialogField::Color)),
            Span::raw(dialog.color.clone()),
            Span::raw(cursor(DialogField::Color)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Preview: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!(" {} ", dialog.name.trim()),
                badge(Some(preview.as_str())),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(err) = &dialog.error {
        lines.push(Line::from(Span::styled(
            err.as_str(),
            Style::default().fg(Color::Red),
        )));
    } else if selector.is_creating() {
        lines.push(Line::from(Span::styled(
            "Creating...",
            Style::default().fg(Color::DarkGray),
        )));
    } else {
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(Span::styled(
                " Create Tag ",
                Style::default().fg(Color::Yellow),
            ))
            .padding(Padding::horizontal(2)),
    );
    frame.render_widget(paragraph, area);
}
