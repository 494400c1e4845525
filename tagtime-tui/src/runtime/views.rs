use crate::app::{App, FocusedBox};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod entries;
mod tags;
mod timer;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => {
                app.quit();
                return;
            }
            // Start/stop from any box, including while typing a tag search
            KeyCode::Char('t') => {
                enqueue_action(action_tx, Action::ToggleTimer);
                return;
            }
            _ => {}
        }
    }

    match app.focused_box {
        FocusedBox::Tags => tags::handle_tags_key(key, app, action_tx),
        FocusedBox::Timer => timer::handle_timer_key(key, app, action_tx),
        FocusedBox::Entries => entries::handle_entries_key(key, app, action_tx),
    }
}

/// Shared by the boxes that do not capture text.
fn focus_into(app: &mut App, target: FocusedBox, action_tx: &ActionTx) {
    app.focus(target);
    if target == FocusedBox::Tags {
        enqueue_action(action_tx, Action::Refresh(crate::store::QueryKey::Tags));
    }
}
