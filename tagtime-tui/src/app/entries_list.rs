use std::cmp::Ordering;
use std::collections::HashSet;

use tagtime_client::domain::{parse_timestamp, EntryId, TimeEntry};

use crate::store::{QueryData, QueryKey, QueryStore};
use crate::time_utils::to_local_time;

/// Placeholder for values that cannot be shown.
pub const MISSING: &str = "—";

/// Shown when the backend gives no reason for a failed delete.
pub const DELETE_FAILED: &str = "Failed to delete entry";

/// A deletion applied optimistically, with the list as it was before.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteTicket {
    pub id: EntryId,
    previous: Vec<TimeEntry>,
}

/// Row focus and deletion bookkeeping for the entries box.
#[derive(Debug, Clone, Default)]
pub struct EntriesList {
    focused: usize,
    deleting: HashSet<EntryId>,
    delete_error: Option<String>,
}

impl EntriesList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Focused row, clamped to a list of `len` rows.
    pub fn focused_index(&self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.focused.min(len - 1))
    }

    pub fn focused_entry<'a>(&self, sorted: &[&'a TimeEntry]) -> Option<&'a TimeEntry> {
        self.focused_index(sorted.len()).map(|index| sorted[index])
    }

    pub fn move_up(&mut self, len: usize) {
        self.focused = self.focused.min(len.saturating_sub(1)).saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        if len > 0 {
            self.focused = (self.focused + 1).min(len - 1);
        }
    }

    pub fn is_deleting(&self, id: &EntryId) -> bool {
        self.deleting.contains(id)
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.delete_error.as_deref()
    }

    /// Error line for the list footer.
    pub fn delete_error_text(&self) -> Option<String> {
        self.delete_error.as_deref().map(|message| {
            if message == DELETE_FAILED {
                message.to_string()
            } else {
                format!("Delete failed: {}", message)
            }
        })
    }

    pub fn clear_delete_error(&mut self) {
        self.delete_error = None;
    }

    /// Drop the entry from the cached list right away. `None` when the
    /// entry is unknown or its deletion is already in flight.
    pub fn begin_delete(&mut self, store: &mut QueryStore, id: &EntryId) -> Option<DeleteTicket> {
        if self.deleting.contains(id) {
            return None;
        }
        let previous = store.time_entries().to_vec();
        if !previous.iter().any(|entry| &entry.id == id) {
            return None;
        }

        let remaining = previous
            .iter()
            .filter(|entry| &entry.id != id)
            .cloned()
            .collect();
        store.set(QueryData::TimeEntries(remaining));
        self.deleting.insert(id.clone());
        self.delete_error = None;

        Some(DeleteTicket {
            id: id.clone(),
            previous,
        })
    }

    /// Settle a deletion. Failure puts the previous list back; either way
    /// the entries are refetched.
    pub fn finish_delete(
        &mut self,
        store: &mut QueryStore,
        ticket: DeleteTicket,
        result: Result<(), String>,
    ) {
        self.deleting.remove(&ticket.id);
        if let Err(message) = result {
            tracing::warn!("Deleting entry {} failed: {}", ticket.id, message);
            store.set(QueryData::TimeEntries(ticket.previous));
            self.delete_error = Some(message);
        }
        store.invalidate(QueryKey::TimeEntries);
    }
}

/// Most recently finished first. Entries whose timestamps cannot be parsed
/// go last, keeping their relative order.
pub fn sort_entries(entries: &[TimeEntry]) -> Vec<&TimeEntry> {
    let mut sorted: Vec<(&TimeEntry, _)> = entries
        .iter()
        .map(|entry| (entry, entry.effective_end()))
        .collect();
    sorted.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.into_iter().map(|(entry, _)| entry).collect()
}

/// Human-readable length of an interval, e.g. `1h 2m 3s`.
pub fn format_duration(start_at: &str, end_at: Option<&str>) -> String {
    let Some(end_at) = end_at else {
        return "In progress".to_string();
    };
    let (Some(start), Some(end)) = (parse_timestamp(start_at), parse_timestamp(end_at)) else {
        return MISSING.to_string();
    };
    let diff = end - start;
    if diff.is_negative() {
        return MISSING.to_string();
    }

    let total = diff.whole_seconds();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);

    let mut segments = Vec::new();
    if hours > 0 {
        segments.push(format!("{}h", hours));
    }
    if minutes > 0 {
        segments.push(format!("{}m", minutes));
    }
    if seconds > 0 || segments.is_empty() {
        segments.push(format!("{}s", seconds));
    }
    segments.join(" ")
}

/// Local wall-clock `HH:MM`. Unparseable values are shown as received.
pub fn format_clock(value: Option<&str>) -> String {
    let Some(value) = value.filter(|v| !v.is_empty()) else {
        return MISSING.to_string();
    };
    match parse_timestamp(value) {
        Some(dt) => {
            let local = to_local_time(dt);
            format!("{:02}:{:02}", local.hour(), local.minute())
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, start: &str, end: Option<&str>) -> TimeEntry {
        TimeEntry {
            id: EntryId::from(id),
            start_at: start.to_string(),
            end_at: end.map(str::to_string),
            tags: vec![],
        }
    }

    fn loaded_store(entries: Vec<TimeEntry>) -> QueryStore {
        let mut store = QueryStore::default();
        store.set(QueryData::TimeEntries(entries));
        store
    }

    fn ids(entries: &[TimeEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn sorts_by_effective_end_descending() {
        let entries = vec![
            entry("old", "2024-01-01T08:00:00Z", Some("2024-01-01T09:00:00Z")),
            entry("bad", "yesterday", None),
            entry("open", "2024-01-01T11:00:00Z", None),
            entry("new", "2024-01-01T09:30:00Z", Some("2024-01-01T10:00:00Z")),
            entry("bad-end", "2024-01-01T12:00:00Z", Some("later")),
        ];

        let sorted: Vec<&str> = sort_entries(&entries).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(sorted, vec!["open", "new", "old", "bad", "bad-end"]);
    }

    #[test]
    fn optimistic_delete_removes_immediately() {
        let mut store = loaded_store(vec![
            entry("e1", "2024-01-01T09:00:00Z", Some("2024-01-01T10:00:00Z")),
            entry("e2", "2024-01-01T11:00:00Z", Some("2024-01-01T12:00:00Z")),
        ]);
        let mut list = EntriesList::new();

        let ticket = list.begin_delete(&mut store, &EntryId::from("e1")).unwrap();
        assert_eq!(ids(store.time_entries()), vec!["e2"]);
        assert!(list.is_deleting(&EntryId::from("e1")));
        assert!(list.begin_delete(&mut store, &EntryId::from("e1")).is_none());

        list.finish_delete(&mut store, ticket, Ok(()));
        assert_eq!(ids(store.time_entries()), vec!["e2"]);
        assert!(!list.is_deleting(&EntryId::from("e1")));
        assert!(store.needs_fetch(QueryKey::TimeEntries, std::time::Instant::now()));
    }

    #[test]
    fn failed_delete_restores_previous_list() {
        let mut store = loaded_store(vec![
            entry("e1", "2024-01-01T09:00:00Z", Some("2024-01-01T10:00:00Z")),
            entry("e2", "2024-01-01T11:00:00Z", Some("2024-01-01T12:00:00Z")),
        ]);
        let mut list = EntriesList::new();

        let ticket = list.begin_delete(&mut store, &EntryId::from("e1")).unwrap();
        list.finish_delete(&mut store, ticket, Err(DELETE_FAILED.to_string()));

        assert_eq!(ids(store.time_entries()), vec!["e1", "e2"]);
        assert_eq!(list.delete_error(), Some(DELETE_FAILED));
        assert_eq!(list.delete_error_text().as_deref(), Some(DELETE_FAILED));
        assert!(store.needs_fetch(QueryKey::TimeEntries, std::time::Instant::now()));
    }

    #[test]
    fn server_reason_is_prefixed_and_can_be_cleared() {
        let mut store = loaded_store(vec![entry("e1", "2024-01-01T09:00:00Z", None)]);
        let mut list = EntriesList::new();

        let ticket = list.begin_delete(&mut store, &EntryId::from("e1")).unwrap();
        list.finish_delete(&mut store, ticket, Err("entry is locked".to_string()));
        assert_eq!(
            list.delete_error_text().as_deref(),
            Some("Delete failed: entry is locked")
        );

        list.clear_delete_error();
        assert_eq!(list.delete_error_text(), None);
    }

    #[test]
    fn deleting_unknown_entry_does_nothing() {
        let mut store = loaded_store(vec![entry("e1", "2024-01-01T09:00:00Z", None)]);
        let mut list = EntriesList::new();

        assert!(list.begin_delete(&mut store, &EntryId::from("nope")).is_none());
        assert_eq!(ids(store.time_entries()), vec!["e1"]);
    }

    #[test]
    fn focus_stays_in_bounds() {
        let mut list = EntriesList::new();
        assert_eq!(list.focused_index(0), None);

        list.move_down(3);
        list.move_down(3);
        list.move_down(3);
        assert_eq!(list.focused_index(3), Some(2));
        assert_eq!(list.focused_index(1), Some(0));

        list.move_up(3);
        assert_eq!(list.focused_index(3), Some(1));
        list.move_up(1);
        assert_eq!(list.focused_index(3), Some(0));
    }

    #[test]
    fn duration_formatting() {
        assert_eq!(
            format_duration("2024-01-01T09:00:00Z", Some("2024-01-01T10:02:03Z")),
            "1h 2m 3s"
        );
        assert_eq!(
            format_duration("2024-01-01T09:00:00Z", Some("2024-01-01T09:00:00Z")),
            "0s"
        );
        assert_eq!(
            format_duration("2024-01-01T09:00:00Z", Some("2024-01-01T11:00:05Z")),
            "2h 5s"
        );
        assert_eq!(format_duration("2024-01-01T09:00:00Z", None), "In progress");
        assert_eq!(format_duration("garbage", Some("2024-01-01T09:00:00Z")), MISSING);
        assert_eq!(
            format_duration("2024-01-01T10:00:00Z", Some("2024-01-01T09:00:00Z")),
            MISSING
        );
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(None), MISSING);
        assert_eq!(format_clock(Some("")), MISSING);
        assert_eq!(format_clock(Some("soon")), "soon");

        let clock = format_clock(Some("2024-01-01T09:05:00Z"));
        assert_eq!(clock.len(), 5);
        assert_eq!(clock.as_bytes()[2], b':');
    }

    #[test]
    fn clock_uses_offset_of_the_entry_date() {
        for value in ["2024-01-01T09:05:00Z", "2024-07-01T09:05:00Z"] {
            let dt = parse_timestamp(value).unwrap();
            let offset = time::UtcOffset::local_offset_at(dt).unwrap_or(time::UtcOffset::UTC);
            let local = dt.to_offset(offset);
            assert_eq!(
                format_clock(Some(value)),
                format!("{:02}:{:02}", local.hour(), local.minute())
            );
        }
    }
}
