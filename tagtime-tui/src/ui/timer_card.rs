use super::utils::border_style;
use super::*;
use crate::app::entries_list::format_clock;
use crate::app::TimerPhase;
use tagtime_client::domain::format_timestamp;

pub fn render_timer(frame: &mut Frame, area: Rect, app: &App) {
    let timer = &app.timer;
    let focused = app.focused_box == FocusedBox::Timer;

    let (state_text, state_color) = if timer.is_submitting() {
        ("Saving...", Color::Yellow)
    } else if timer.is_running() {
        ("⏵ Running", Color::Green)
    } else {
        ("Not running", Color::DarkGray)
    };

    let border = if !focused && timer.is_running() {
        Style::default().fg(Color::Green)
    } else {
        border_style(focused)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                timer.format_elapsed(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(state_text, Style::default().fg(state_color)),
            Span::styled(started_label(timer.phase()), Style::default().fg(Color::DarkGray)),
        ]),
        Line::from(tag_summary(app)),
    ];
    if let Some(err) = timer.save_error() {
        lines.push(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Timer ")
            .border_style(border)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(paragraph, area);
}

fn tag_summary(app: &App) -> Span<'static> {
    let selection = app.timer.tag_selector.selection();
    if selection.is_empty() {
        return Span::styled("No tags", Style::default().fg(Color::DarkGray));
    }
    let labels: Vec<&str> = selection.tags().iter().map(|t| t.label.as_str()).collect();
    Span::styled(labels.join(", "), Style::default().fg(Color::Gray))
}

fn started_label(phase: TimerPhase) -> String {
    match phase {
        TimerPhase::Running { started_at } => match format_timestamp(started_at) {
            Ok(raw) => format!("  since {}", format_clock(Some(raw.as_str()))),
            Err(_) => String::new(),
        },
        TimerPhase::Idle => String::new(),
    }
}
