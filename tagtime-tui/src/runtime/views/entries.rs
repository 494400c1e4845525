use crate::app::{App, FocusedBox};
use crate::store::QueryKey;
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, focus_into};

pub(super) fn handle_entries_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let len = app.store.time_entries().len();

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        KeyCode::Down | KeyCode::Char('j') => app.entries.move_down(len),
        KeyCode::Up | KeyCode::Char('k') => app.entries.move_up(len),
        KeyCode::Char('d') | KeyCode::Delete => {
            let sorted = app.sorted_entries();
            let Some(entry) = app.entries.focused_entry(&sorted) else {
                return;
            };
            if app.entries.is_deleting(&entry.id) {
                return;
            }
            let id = entry.id.clone();
            enqueue_action(action_tx, Action::DeleteEntry(id));
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.entries.clear_delete_error();
            enqueue_action(action_tx, Action::Refetch(QueryKey::TimeEntries));
        }
        KeyCode::Tab => focus_into(app, FocusedBox::Tags, action_tx),
        KeyCode::BackTab => app.focus(FocusedBox::Timer),
        KeyCode::Esc => {
            app.entries.clear_delete_error();
            app.clear_status();
        }
        _ => {}
    }
}
