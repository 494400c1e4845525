use crate::app::entries_list::DELETE_FAILED;
use crate::app::App;
use crate::periodic::PeriodicTask;
use crate::store::{QueryData, QueryKey};
use std::time::{Duration, Instant};
use tagtime_client::{CreateTagRequest, TrackerClient, TrackerError};
use time::OffsetDateTime;

use super::action_queue::{Action, ActionTx, Outcome, OutcomeTx};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Backend handle, channels and background tasks owned by the event loop.
pub(super) struct Runtime {
    client: TrackerClient,
    action_tx: ActionTx,
    outcome_tx: OutcomeTx,
    /// Present only while the timer runs.
    ticker: Option<PeriodicTask>,
    _entries_refresh: PeriodicTask,
}

impl Runtime {
    pub(super) fn new(
        client: TrackerClient,
        action_tx: ActionTx,
        outcome_tx: OutcomeTx,
        entries_refresh: Duration,
    ) -> Self {
        let entries_refresh = PeriodicTask::spawn(entries_refresh, action_tx.clone(), || {
            Action::Refetch(QueryKey::TimeEntries)
        });
        Self {
            client,
            action_tx,
            outcome_tx,
            ticker: None,
            _entries_refresh: entries_refresh,
        }
    }

    #[cfg(test)]
    pub(super) fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

pub(super) fn run_action(action: Action, app: &mut App, rt: &mut Runtime) {
    match action {
        Action::Refresh(key) => {
            if app.store.needs_fetch(key, Instant::now()) {
                spawn_fetch(key, app, rt);
            }
        }
        Action::Refetch(key) => spawn_fetch(key, app, rt),
        Action::ToggleTimer => {
            if app.timer.is_running() {
                handle_stop_timer(app, rt);
            } else {
                handle_start_timer(app, rt);
            }
        }
        Action::Tick => app.timer.tick(),
        Action::CreateTag(request) => spawn_create_tag(request, rt),
        Action::DeleteEntry(id) => {
            let Some(ticket) = app.entries.begin_delete(&mut app.store, &id) else {
                return;
            };
            let client = rt.client.clone();
            let tx = rt.outcome_tx.clone();
            tokio::spawn(async move {
                let result = client
                    .delete_time_entry(&ticket.id)
                    .await
                    .map_err(|e| user_message(&e, DELETE_FAILED));
                let _ = tx.send(Outcome::EntryDeleted { ticket, result });
            });
        }
    }
}

pub(super) fn apply_outcome(outcome: Outcome, app: &mut App, rt: &mut Runtime) {
    match outcome {
        Outcome::Fetched { ticket, result } => {
            app.store.complete_fetch(ticket, result, Instant::now());
        }
        Outcome::TagCreated(Ok(tag)) => {
            app.set_status(format!("Created tag {}", tag.label));
            app.timer.tag_selector.create_succeeded(tag);
            app.store.invalidate(QueryKey::Tags);
            spawn_fetch(QueryKey::Tags, app, rt);
        }
        Outcome::TagCreated(Err(message)) => {
            app.timer.tag_selector.create_failed(message);
        }
        Outcome::IntervalSaved(result) => {
            match result {
                Ok(()) => {
                    app.timer.submission_succeeded();
                    app.set_status("Time entry saved");
                }
                Err(message) => app.timer.submission_failed(&message),
            }
            app.store.invalidate(QueryKey::TimeEntries);
            spawn_fetch(QueryKey::TimeEntries, app, rt);
        }
        Outcome::EntryDeleted { ticket, result } => {
            if result.is_ok() {
                app.set_status("Time entry deleted");
            }
            app.entries.finish_delete(&mut app.store, ticket, result);
            spawn_fetch(QueryKey::TimeEntries, app, rt);
        }
    }
}

fn handle_start_timer(app: &mut App, rt: &mut Runtime) {
    if !app.timer.start(OffsetDateTime::now_utc()) {
        return;
    }
    rt.ticker = Some(PeriodicTask::spawn(TICK_PERIOD, rt.action_tx.clone(), || {
        Action::Tick
    }));
    app.clear_status();
}

fn handle_stop_timer(app: &mut App, rt: &mut Runtime) {
    let Some(submission) = app.timer.stop(OffsetDateTime::now_utc()) else {
        return;
    };
    rt.ticker = None;

    let client = rt.client.clone();
    let tx = rt.outcome_tx.clone();
    tokio::spawn(async move {
        let result = client
            .create_time_entry(submission.start_at, submission.end_at, &submission.tag_ids)
            .await
            .map_err(|e| user_message(&e, &e.to_string()));
        let _ = tx.send(Outcome::IntervalSaved(result));
    });
}

fn spawn_create_tag(request: CreateTagRequest, rt: &Runtime) {
    let client = rt.client.clone();
    let tx = rt.outcome_tx.clone();
    tokio::spawn(async move {
        let result = client
            .create_tag(&request)
            .await
            .map_err(|e| user_message(&e, "Failed to create tag"));
        let _ = tx.send(Outcome::TagCreated(result));
    });
}

fn spawn_fetch(key: QueryKey, app: &mut App, rt: &Runtime) {
    let Some(ticket) = app.store.begin_fetch(key) else {
        return;
    };
    let client = rt.client.clone();
    let tx = rt.outcome_tx.clone();
    tokio::spawn(async move {
        let result = match key {
            QueryKey::Tags => client.list_tags().await.map(QueryData::Tags),
            QueryKey::TimeEntries => client.list_time_entries().await.map(QueryData::TimeEntries),
        }
        .map_err(|e| e.to_string());
        let _ = tx.send(Outcome::Fetched { ticket, result });
    });
}

fn user_message(error: &TrackerError, fallback: &str) -> String {
    tracing::warn!("{}", error);
    error.message_or(fallback)
}
