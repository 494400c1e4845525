use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use super::{normalize_tags, EntryId, Tag};

/// A recorded interval. `end_at` is `None` while the interval is still open.
///
/// Timestamps are kept exactly as the backend sent them; use
/// [`parse_timestamp`] to interpret them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeEntry {
    pub id: EntryId,
    pub start_at: String,
    pub end_at: Option<String>,
    pub tags: Vec<Tag>,
}

impl TimeEntry {
    pub fn from_json(item: &Value) -> Option<Self> {
        let map = item.as_object()?;
        let id = map.get("id").and_then(EntryId::from_json)?;
        let start_at = map.get("startAt").and_then(Value::as_str)?.to_string();
        let end_at = map.get("endAt").and_then(Value::as_str).map(str::to_string);
        let tags = map.get("tags").map(normalize_tags).unwrap_or_default();

        Some(Self {
            id,
            start_at,
            end_at,
            tags,
        })
    }

    pub fn is_in_progress(&self) -> bool {
        self.end_at.is_none()
    }

    /// End time, or start time for an open interval.
    pub fn effective_end(&self) -> Option<OffsetDateTime> {
        parse_timestamp(self.end_at.as_deref().unwrap_or(&self.start_at))
    }
}

pub fn parse_timestamp(value: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(value.trim(), &Rfc3339).ok()
}

pub fn format_timestamp(value: OffsetDateTime) -> Result<String, time::error::Format> {
    value.format(&Rfc3339)
}

/// Normalize an entry list payload. Non-arrays are treated as empty.
pub fn normalize_entries(payload: &Value) -> Vec<TimeEntry> {
    payload
        .as_array()
        .map(|items| items.iter().filter_map(TimeEntry::from_json).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    #[test]
    fn parses_closed_and_open_entries() {
        let entries = normalize_entries(&json!([
            {
                "id": 1,
                "startAt": "2024-01-01T09:00:00Z",
                "endAt": "2024-01-01T10:00:00Z",
                "tags": [{"id": "t1", "name": "Design", "userId": "u", "createdAt": "x", "updatedAt": "x"}]
            },
            { "id": "open", "startAt": "2024-01-02T09:00:00Z", "endAt": null },
        ]));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, EntryId::from("1"));
        assert_eq!(entries[0].tags, vec![Tag::new("t1", "Design")]);
        assert!(entries[1].is_in_progress());
        assert!(entries[1].tags.is_empty());
    }

    #[test]
    fn skips_items_without_id_or_start() {
        let entries = normalize_entries(&json!([
            { "startAt": "2024-01-01T09:00:00Z" },
            { "id": 3 },
        ]));
        assert!(entries.is_empty());
    }

    #[test]
    fn effective_end_uses_start_for_open_entries() {
        let entry = TimeEntry {
            id: EntryId::from("e"),
            start_at: "2024-01-01T09:00:00Z".to_string(),
            end_at: None,
            tags: vec![],
        };
        assert_eq!(entry.effective_end(), Some(datetime!(2024-01-01 09:00 UTC)));
    }

    #[test]
    fn formats_rfc3339() {
        let formatted = format_timestamp(datetime!(2024-01-01 01:02:03 UTC)).unwrap();
        assert_eq!(formatted, "2024-01-01T01:02:03Z");
    }
}
