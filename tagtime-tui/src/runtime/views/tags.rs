use crate::app::{App, FocusedBox, SelectorFocus};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::enqueue_action;

pub(super) fn handle_tags_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let focus = app.timer.tag_selector.focus();

    if focus == Some(SelectorFocus::Dialog) {
        if let Some(request) = app.timer.tag_selector.handle_dialog_key(key.code) {
            enqueue_action(action_tx, Action::CreateTag(request));
        }
        return;
    }

    match key.code {
        KeyCode::Tab => app.focus_next(),
        KeyCode::BackTab => app.focus_prev(),
        KeyCode::Esc if focus != Some(SelectorFocus::Options) => app.focus(FocusedBox::Timer),
        KeyCode::Char(_) if key.modifiers.contains(KeyModifiers::CONTROL) => {}
        code => {
            let available = app.available_tags().to_vec();
            let selector = &mut app.timer.tag_selector;
            match focus {
                Some(SelectorFocus::Options) => selector.handle_options_key(code, &available),
                _ => selector.handle_input_key(code, &available),
            }
        }
    }
}
