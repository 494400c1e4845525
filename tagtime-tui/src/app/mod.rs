use crate::config::TagtimeConfig;
use crate::store::{QueryKey, QueryStore};
use tagtime_client::domain::{Tag, TimeEntry};

pub mod entries_list;
pub mod tag_selector;
pub mod timer_card;

pub use entries_list::EntriesList;
pub use tag_selector::SelectorFocus;
pub use timer_card::{TimerCard, TimerPhase};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedBox {
    Tags,
    Timer,
    Entries,
}

impl FocusedBox {
    fn next(self) -> Self {
        match self {
            FocusedBox::Tags => FocusedBox::Timer,
            FocusedBox::Timer => FocusedBox::Entries,
            FocusedBox::Entries => FocusedBox::Tags,
        }
    }

    fn prev(self) -> Self {
        match self {
            FocusedBox::Tags => FocusedBox::Entries,
            FocusedBox::Timer => FocusedBox::Tags,
            FocusedBox::Entries => FocusedBox::Timer,
        }
    }
}

pub struct App {
    pub running: bool,
    pub focused_box: FocusedBox,
    pub status_message: Option<String>,
    pub is_dev: bool,

    pub timer: TimerCard,
    pub entries: EntriesList,
    pub store: QueryStore,

    fallback_tags: Vec<Tag>,

    // Loading indicator
    pub throbber_state: throbber_widgets_tui::ThrobberState,
}

impl App {
    pub fn new(cfg: &TagtimeConfig, is_dev: bool) -> Self {
        let mut app = Self {
            running: true,
            focused_box: FocusedBox::Timer,
            status_message: None,
            is_dev,
            timer: TimerCard::new(cfg.allow_tag_creation),
            entries: EntriesList::new(),
            store: QueryStore::new(Some(cfg.tags_stale_after()), None),
            fallback_tags: fallback_tags(&cfg.fallback_tags),
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
        };
        app.focus(FocusedBox::Tags);
        app
    }

    /// Remote tags when the backend returned any, otherwise the fallbacks.
    pub fn available_tags(&self) -> &[Tag] {
        let remote = self.store.tags();
        if remote.is_empty() {
            &self.fallback_tags
        } else {
            remote
        }
    }

    pub fn tags_loading(&self) -> bool {
        self.store.is_loading(QueryKey::Tags)
    }

    pub fn tags_failed(&self) -> bool {
        self.store.is_error(QueryKey::Tags)
    }

    pub fn sorted_entries(&self) -> Vec<&TimeEntry> {
        entries_list::sort_entries(self.store.time_entries())
    }

    /// Something is on the wire and worth a spinner.
    pub fn is_busy(&self) -> bool {
        self.store.is_fetching(QueryKey::Tags)
            || self.store.is_fetching(QueryKey::TimeEntries)
            || self.timer.is_submitting()
            || self.timer.tag_selector.is_creating()
    }

    pub fn focus(&mut self, target: FocusedBox) {
        if self.focused_box == FocusedBox::Tags && target != FocusedBox::Tags {
            self.timer.tag_selector.blur();
        }
        if target == FocusedBox::Tags && self.timer.tag_selector.focus().is_none() {
            self.timer.tag_selector.focus_input();
        }
        self.focused_box = target;
    }

    pub fn focus_next(&mut self) {
        self.focus(self.focused_box.next());
    }

    pub fn focus_prev(&mut self) {
        self.focus(self.focused_box.prev());
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

fn fallback_tags(labels: &[String]) -> Vec<Tag> {
    labels
        .iter()
        .map(|label| label.trim())
        .filter(|label| !label.is_empty())
        .map(|label| Tag::new(label.to_lowercase(), label))
        .collect()
}
