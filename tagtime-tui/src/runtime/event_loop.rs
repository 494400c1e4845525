use crate::app::App;
use crate::config::TagtimeConfig;
use crate::store::QueryKey;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tagtime_client::TrackerClient;

use super::action_queue::{channel, outcome_channel, Action};
use super::actions::{apply_outcome, run_action, Runtime};
use super::views::handle_key;

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: TrackerClient,
    cfg: &TagtimeConfig,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    let (outcome_tx, mut outcome_rx) = outcome_channel();
    let mut rt = Runtime::new(
        client,
        action_tx.clone(),
        outcome_tx,
        cfg.entries_refresh_interval(),
    );

    let _ = action_tx.send(Action::Refresh(QueryKey::Tags));
    let _ = action_tx.send(Action::Refresh(QueryKey::TimeEntries));

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_busy() {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, app, &action_tx);
            }
        }

        while let Ok(outcome) = outcome_rx.try_recv() {
            apply_outcome(outcome, app, &mut rt);
        }

        while let Ok(action) = action_rx.try_recv() {
            run_action(action, app, &mut rt);
        }

        if !app.running {
            break;
        }
    }

    tracing::info!("Event loop finished");
    Ok(())
}
