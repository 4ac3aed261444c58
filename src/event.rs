// src/event.rs
use crate::timeline_event::TimelineEvent;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Emitted once the dataset has been fetched and parsed.
    DatasetLoaded {
        events: Vec<TimelineEvent>,
        timestamp: DateTime<Utc>,
    },
    /// Emitted when fetching or parsing failed. The UI stays empty.
    DatasetFailed {
        error: String,
        timestamp: DateTime<Utc>,
    },
}
