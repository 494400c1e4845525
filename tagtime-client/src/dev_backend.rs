use std::sync::{Arc, Mutex};
use time::{Duration, OffsetDateTime};

use crate::color::normalize_hex_color;
use crate::domain::{format_timestamp, EntryId, Tag, TagId, TimeEntry};
use crate::dto::CreateTagRequest;

/// In-memory stand-in for the REST backend, used by `tagtime dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    tags: Vec<Tag>,
    entries: Vec<DevEntry>,
    next_id: u64,
}

#[derive(Debug, Clone)]
struct DevEntry {
    id: EntryId,
    start_at: OffsetDateTime,
    end_at: Option<OffsetDateTime>,
    tag_ids: Vec<TagId>,
}

impl Default for DevBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl DevBackend {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(seed_dev_store(OffsetDateTime::now_utc()))),
        }
    }

    pub fn tags(&self) -> Vec<Tag> {
        self.store.lock().expect("dev store lock poisoned").tags.clone()
    }

    pub fn create_tag(&self, request: &CreateTagRequest) -> Tag {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let id = store.allocate_id();
        let tag = Tag {
            id: TagId::new(format!("tag-{}", id)),
            label: request.name.clone(),
            color: normalize_hex_color(request.color.as_deref()),
        };
        store.tags.push(tag.clone());
        tag
    }

    pub fn time_entries(&self) -> Vec<TimeEntry> {
        let store = self.store.lock().expect("dev store lock poisoned");
        store
            .entries
            .iter()
            .map(|entry| TimeEntry {
                id: entry.id.clone(),
                start_at: format_timestamp(entry.start_at).unwrap_or_default(),
                end_at: entry
                    .end_at
                    .map(|end| format_timestamp(end).unwrap_or_default()),
                tags: entry
                    .tag_ids
                    .iter()
                    .filter_map(|id| store.tags.iter().find(|tag| &tag.id == id).cloned())
                    .collect(),
            })
            .collect()
    }

    pub fn create_entry(&self, start_at: OffsetDateTime, end_at: OffsetDateTime, tag_ids: &[TagId]) {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let id = store.allocate_id();
        store.entries.push(DevEntry {
            id: EntryId::new(id.to_string()),
            start_at,
            end_at: Some(end_at),
            tag_ids: tag_ids.to_vec(),
        });
    }

    /// Returns false when no entry has that id.
    pub fn delete_entry(&self, id: &EntryId) -> bool {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        let before = store.entries.len();
        store.entries.retain(|entry| &entry.id != id);
        store.entries.len() != before
    }
}

impl DevStore {
    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn seed_dev_store(now: OffsetDateTime) -> DevStore {
    let tags = vec![
        Tag::new("meeting", "Meeting").with_color("#f59e0b"),
        Tag::new("planning", "Planning").with_color("#8b5cf6"),
        Tag::new("design", "Design").with_color("#ec4899"),
        Tag::new("development", "Development").with_color("#2563eb"),
        Tag::new("testing", "Testing"),
        Tag::new("research", "Research").with_color("#10b981"),
    ];

    let interval = |id: u64, hours_ago: i64, minutes: i64, tags: &[&str]| DevEntry {
        id: EntryId::new(id.to_string()),
        start_at: now - Duration::hours(hours_ago),
        end_at: Some(now - Duration::hours(hours_ago) + Duration::minutes(minutes)),
        tag_ids: tags.iter().map(|id| TagId::from(*id)).collect(),
    };

    let entries = vec![
        interval(1, 30, 45, &["meeting", "planning"]),
        interval(2, 27, 125, &["development"]),
        interval(3, 6, 50, &["design", "research"]),
        interval(4, 3, 95, &["development", "testing"]),
        interval(5, 1, 15, &[]),
    ];

    DevStore {
        tags,
        next_id: entries.len() as u64 + 1,
        entries,
    }
}
