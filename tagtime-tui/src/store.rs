use std::collections::HashMap;
use std::time::{Duration, Instant};

use tagtime_client::domain::{Tag, TimeEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Tags,
    TimeEntries,
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Tags(Vec<Tag>),
    TimeEntries(Vec<TimeEntry>),
}

impl QueryData {
    pub fn key(&self) -> QueryKey {
        match self {
            QueryData::Tags(_) => QueryKey::Tags,
            QueryData::TimeEntries(_) => QueryKey::TimeEntries,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Idle,
    Fetching,
    Ready,
    Failed,
}

/// Proof that a fetch was issued, tied to the slot generation at that time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub key: QueryKey,
    generation: u64,
}

#[derive(Debug)]
struct Slot {
    data: Option<QueryData>,
    status: QueryStatus,
    stale: bool,
    generation: u64,
    in_flight: Option<u64>,
    fetched_at: Option<Instant>,
    stale_after: Option<Duration>,
}

impl Slot {
    fn new(stale_after: Option<Duration>) -> Self {
        Self {
            data: None,
            status: QueryStatus::Idle,
            stale: true,
            generation: 0,
            in_flight: None,
            fetched_at: None,
            stale_after,
        }
    }
}

/// Cache of backend query results, keyed by [`QueryKey`].
///
/// Every `set` or `invalidate` starts a new generation for its key. Fetch
/// results are only applied when they were issued in the current generation,
/// so a response that raced a local change is dropped instead of overwriting
/// it.
#[derive(Debug)]
pub struct QueryStore {
    slots: HashMap<QueryKey, Slot>,
}

impl Default for QueryStore {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl QueryStore {
    /// `None` stale times mean results stay fresh until invalidated.
    pub fn new(tags_stale_after: Option<Duration>, entries_stale_after: Option<Duration>) -> Self {
        let slots = HashMap::from([
            (QueryKey::Tags, Slot::new(tags_stale_after)),
            (QueryKey::TimeEntries, Slot::new(entries_stale_after)),
        ]);
        Self { slots }
    }

    fn slot(&self, key: QueryKey) -> &Slot {
        &self.slots[&key]
    }

    fn slot_mut(&mut self, key: QueryKey) -> &mut Slot {
        self.slots
            .get_mut(&key)
            .expect("every query key has a slot")
    }

    pub fn get(&self, key: QueryKey) -> Option<&QueryData> {
        self.slot(key).data.as_ref()
    }

    pub fn tags(&self) -> &[Tag] {
        match self.get(QueryKey::Tags) {
            Some(QueryData::Tags(tags)) => tags,
            _ => &[],
        }
    }

    pub fn time_entries(&self) -> &[TimeEntry] {
        match self.get(QueryKey::TimeEntries) {
            Some(QueryData::TimeEntries(entries)) => entries,
            _ => &[],
        }
    }

    /// Replace cached data locally. Fetches issued before this call are
    /// discarded when they complete.
    pub fn set(&mut self, data: QueryData) {
        let slot = self.slot_mut(data.key());
        slot.generation += 1;
        slot.data = Some(data);
        if slot.status != QueryStatus::Fetching {
            slot.status = QueryStatus::Ready;
        }
    }

    /// Mark cached data as out of date so the next refresh refetches it.
    pub fn invalidate(&mut self, key: QueryKey) {
        let slot = self.slot_mut(key);
        slot.generation += 1;
        slot.stale = true;
    }

    pub fn needs_fetch(&self, key: QueryKey, now: Instant) -> bool {
        let slot = self.slot(key);
        if slot.stale || slot.data.is_none() {
            return true;
        }
        match (slot.fetched_at, slot.stale_after) {
            (Some(fetched_at), Some(stale_after)) => now.duration_since(fetched_at) >= stale_after,
            _ => false,
        }
    }

    /// Start a fetch for `key` unless one is already in flight for the
    /// current generation.
    pub fn begin_fetch(&mut self, key: QueryKey) -> Option<FetchTicket> {
        let slot = self.slot_mut(key);
        if slot.in_flight == Some(slot.generation) {
            return None;
        }
        slot.in_flight = Some(slot.generation);
        slot.status = QueryStatus::Fetching;

        Some(FetchTicket {
            key,
            generation: slot.generation,
        })
    }

    /// Apply a fetch result. Returns false when the result was discarded as
    /// outdated.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<QueryData, String>,
        now: Instant,
    ) -> bool {
        let slot = self.slot_mut(ticket.key);
        if slot.in_flight == Some(ticket.generation) {
            slot.in_flight = None;
        }

        if ticket.generation != slot.generation {
            if slot.in_flight.is_none() {
                slot.status = if slot.data.is_some() {
                    QueryStatus::Ready
                } else {
                    QueryStatus::Idle
                };
            }
            tracing::debug!("Discarded outdated {:?} fetch result", ticket.key);
            return false;
        }

        match result {
            Ok(data) => {
                slot.data = Some(data);
                slot.status = QueryStatus::Ready;
                slot.stale = false;
                slot.fetched_at = Some(now);
            }
            Err(error) => {
                tracing::warn!("Fetching {:?} failed: {}", ticket.key, error);
                slot.status = QueryStatus::Failed;
            }
        }
        true
    }

    pub fn status(&self, key: QueryKey) -> QueryStatus {
        self.slot(key).status
    }

    /// Nothing to show yet and a fetch is underway.
    pub fn is_loading(&self, key: QueryKey) -> bool {
        let slot = self.slot(key);
        slot.data.is_none() && matches!(slot.status, QueryStatus::Idle | QueryStatus::Fetching)
    }

    /// The last fetch failed and there is nothing to fall back on.
    pub fn is_error(&self, key: QueryKey) -> bool {
        let slot = self.slot(key);
        slot.data.is_none() && slot.status == QueryStatus::Failed
    }

    pub fn is_fetching(&self, key: QueryKey) -> bool {
        self.slot(key).in_flight.is_some()
    }
}
