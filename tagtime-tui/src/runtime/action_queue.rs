use crate::app::entries_list::DeleteTicket;
use crate::store::{FetchTicket, QueryData, QueryKey};
use tagtime_client::domain::{EntryId, Tag};
use tagtime_client::CreateTagRequest;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Work requested by key handlers and periodic tasks.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Action {
    /// Fetch `key` if the cached copy is missing or stale.
    Refresh(QueryKey),
    /// Fetch `key` even if the cached copy is fresh.
    Refetch(QueryKey),
    ToggleTimer,
    Tick,
    CreateTag(CreateTagRequest),
    DeleteEntry(EntryId),
}

/// Results of spawned backend calls, applied on the event loop.
#[derive(Debug)]
pub(super) enum Outcome {
    Fetched {
        ticket: FetchTicket,
        result: Result<QueryData, String>,
    },
    TagCreated(Result<Tag, String>),
    IntervalSaved(Result<(), String>),
    EntryDeleted {
        ticket: DeleteTicket,
        result: Result<(), String>,
    },
}

pub(super) type ActionTx = UnboundedSender<Action>;
pub(super) type ActionRx = UnboundedReceiver<Action>;
pub(super) type OutcomeTx = UnboundedSender<Outcome>;
pub(super) type OutcomeRx = UnboundedReceiver<Outcome>;

pub(super) fn channel() -> (ActionTx, ActionRx) {
    mpsc::unbounded_channel()
}

pub(super) fn outcome_channel() -> (OutcomeTx, OutcomeRx) {
    mpsc::unbounded_channel()
}
