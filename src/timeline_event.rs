// src/timeline_event.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;

// === EVENT STRUCTURES ===
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventId(i64);

impl EventId {
    pub fn new(id: i64) -> Self {
        EventId(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLink {
    pub url: String,
    pub text: String,
}

impl EventLink {
    pub fn new(url: &str, text: &str) -> Self {
        Self { url: url.to_string(), text: text.to_string() }
    }
}

/// Which release date places an event on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Film,
    Episode,
}

impl Axis {
    pub fn toggle(self) -> Self {
        match self {
            Axis::Film => Axis::Episode,
            Axis::Episode => Axis::Film,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::Film => "Film release",
            Axis::Episode => "Episode release",
        }
    }
}

/// One podcast episode paired with the film it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineEvent {
    id: EventId,
    title: String,
    description: String,
    content: String,
    director: String,
    date: DateTime<Utc>,
    episode_date: DateTime<Utc>,
    episode_number: String,
    tags: Vec<String>,
    links: Vec<EventLink>,
}

/// Derived views reference entries of the loaded set instead of copying them.
pub type SharedEvent = Arc<TimelineEvent>;

impl TimelineEvent {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: EventId,
        title: String,
        description: String,
        content: String,
        director: String,
        date: DateTime<Utc>,
        episode_date: DateTime<Utc>,
        episode_number: String,
        tags: Vec<String>,
        links: Vec<EventLink>,
    ) -> Self {
        Self {
            id,
            title,
            description,
            content,
            director,
            date,
            episode_date,
            episode_number,
            tags,
            links,
        }
    }

    // Accessor methods

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn director(&self) -> &str {
        &self.director
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn episode_date(&self) -> DateTime<Utc> {
        self.episode_date
    }

    pub fn episode_number(&self) -> &str {
        &self.episode_number
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn links(&self) -> &[EventLink] {
        &self.links
    }

    pub fn timestamp(&self, axis: Axis) -> DateTime<Utc> {
        match axis {
            Axis::Film => self.date,
            Axis::Episode => self.episode_date,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use chrono::TimeZone;

    pub fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    pub fn event(id: i64, director: &str, tags: &[&str], date: DateTime<Utc>) -> SharedEvent {
        Arc::new(TimelineEvent::new(
            EventId::new(id),
            format!("Film {}", id),
            format!("Description {}", id),
            String::new(),
            director.to_string(),
            date,
            date,
            id.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
            Vec::new(),
        ))
    }

    pub fn event_with_episode(
        id: i64,
        date: DateTime<Utc>,
        episode_date: DateTime<Utc>,
    ) -> SharedEvent {
        Arc::new(TimelineEvent::new(
            EventId::new(id),
            format!("Film {}", id),
            String::new(),
            String::new(),
            "Someone".to_string(),
            date,
            episode_date,
            id.to_string(),
            Vec::new(),
            Vec::new(),
        ))
    }
}
