use tagtime_client::domain::TagId;
use time::OffsetDateTime;

use super::tag_selector::TagSelector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerPhase {
    Idle,
    Running { started_at: OffsetDateTime },
}

/// A closed interval ready to be posted as a time entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalSubmission {
    pub start_at: OffsetDateTime,
    pub end_at: OffsetDateTime,
    pub tag_ids: Vec<TagId>,
}

/// Start/stop timer with its tag picker and save status.
#[derive(Debug, Clone)]
pub struct TimerCard {
    phase: TimerPhase,
    elapsed_seconds: u64,
    submitting: bool,
    save_error: Option<String>,
    pub tag_selector: TagSelector,
}

impl TimerCard {
    pub fn new(allow_tag_creation: bool) -> Self {
        Self {
            phase: TimerPhase::Idle,
            elapsed_seconds: 0,
            submitting: false,
            save_error: None,
            tag_selector: TagSelector::new(allow_tag_creation),
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, TimerPhase::Running { .. })
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Begin a session. Returns false when already running or while the
    /// previous interval is still being saved.
    pub fn start(&mut self, now: OffsetDateTime) -> bool {
        if self.is_running() || self.submitting {
            return false;
        }
        self.phase = TimerPhase::Running { started_at: now };
        self.elapsed_seconds = 0;
        self.save_error = None;
        true
    }

    /// End the session and hand back the interval to persist.
    pub fn stop(&mut self, now: OffsetDateTime) -> Option<IntervalSubmission> {
        if self.submitting {
            return None;
        }
        let TimerPhase::Running { started_at } = self.phase else {
            return None;
        };

        self.phase = TimerPhase::Idle;
        self.elapsed_seconds = 0;
        self.submitting = true;

        Some(IntervalSubmission {
            start_at: started_at,
            end_at: now,
            tag_ids: self.tag_selector.selection().ids(),
        })
    }

    pub fn tick(&mut self) {
        if self.is_running() {
            self.elapsed_seconds += 1;
        }
    }

    pub fn submission_succeeded(&mut self) {
        self.submitting = false;
        self.save_error = None;
    }

    pub fn submission_failed(&mut self, message: &str) {
        self.submitting = false;
        self.save_error = Some(format!("Failed to save time entry: {}", message));
    }

    pub fn format_elapsed(&self) -> String {
        format_hms(self.elapsed_seconds)
    }
}

/// `HH:MM:SS`; hours keep growing past 99.
pub fn format_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}
