use crate::app::{App, FocusedBox};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, focus_into};

pub(super) fn handle_timer_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Char(' ') | KeyCode::Enter => {
            if app.timer.is_submitting() {
                app.set_status("Still saving the previous entry");
            } else {
                enqueue_action(action_tx, Action::ToggleTimer);
            }
        }
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab | KeyCode::Char('t') | KeyCode::Up | KeyCode::Char('k') => {
            focus_into(app, FocusedBox::Tags, action_tx)
        }
        KeyCode::Down | KeyCode::Char('j') => focus_into(app, FocusedBox::Entries, action_tx),
        KeyCode::Esc => app.clear_status(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TagtimeConfig;
    use crate::store::QueryKey;
    use crossterm::event::KeyModifiers;
    use time::OffsetDateTime;

    use super::super::super::action_queue::channel;

    fn timer_app() -> App {
        let mut app = App::new(&TagtimeConfig::default(), true);
        app.focus(FocusedBox::Timer);
        app
    }

    fn trigger(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_timer_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn space_and_enter_toggle_timer() {
        let mut app = timer_app();
        assert_eq!(trigger(&mut app, KeyCode::Char(' ')), Some(Action::ToggleTimer));
        assert_eq!(trigger(&mut app, KeyCode::Enter), Some(Action::ToggleTimer));
    }

    #[test]
    fn toggle_is_held_back_while_saving() {
        let mut app = timer_app();
        let now = OffsetDateTime::now_utc();
        app.timer.start(now);
        app.timer.stop(now);

        assert_eq!(trigger(&mut app, KeyCode::Enter), None);
        assert!(app.status_message.is_some());
    }

    #[test]
    fn moving_to_tags_refreshes_tags() {
        let mut app = timer_app();
        assert_eq!(
            trigger(&mut app, KeyCode::Char('t')),
            Some(Action::Refresh(QueryKey::Tags))
        );
        assert_eq!(app.focused_box, FocusedBox::Tags);
    }

    #[test]
    fn q_quits() {
        let mut app = timer_app();
        trigger(&mut app, KeyCode::Char('q'));
        assert!(!app.running);
    }
}
