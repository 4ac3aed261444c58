// src/timeline.rs
use crate::color::ColorResolver;
use crate::eras::{ERAS, EraGroup, era_groups};
use crate::filter::filter_events;
use crate::filter_state::FilterState;
use crate::position::AxisRange;
use crate::timeline_event::{Axis, EventId, SharedEvent, TimelineEvent};
use ratatui::style::Color;
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PositionedEvent {
    pub event: SharedEvent,
    pub position: f64,
}

/// What the renderer draws for one filter state.
#[derive(Debug, Clone)]
pub struct TimelineView {
    pub axis: Axis,
    pub range: Option<AxisRange>,
    pub visible_events: Vec<PositionedEvent>,
}

impl TimelineView {
    pub fn is_empty(&self) -> bool {
        self.visible_events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.visible_events.len()
    }

    pub fn index_of(&self, id: EventId) -> Option<usize> {
        self.visible_events.iter().position(|p| p.event.id() == id)
    }
}

/// The loaded dataset plus everything derived from it once.
#[derive(Debug, Clone)]
pub struct Timeline {
    events: Vec<SharedEvent>,
    available_directors: Vec<String>,
    available_tags: Vec<String>,
    era_groups: Vec<EraGroup>,
    colors: ColorResolver,
}

fn first_occurrences<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    values.filter(|v| seen.insert(*v)).map(str::to_string).collect()
}

impl Timeline {
    /// `events` are expected in load order (film date ascending).
    pub fn new(events: Vec<TimelineEvent>) -> Self {
        let events: Vec<SharedEvent> = events.into_iter().map(Arc::new).collect();
        let available_directors = first_occurrences(events.iter().map(|e| e.director()));
        let available_tags =
            first_occurrences(events.iter().flat_map(|e| e.tags().iter().map(String::as_str)));
        let era_groups = era_groups(ERAS, &available_directors);

        Self { events, available_directors, available_tags, era_groups, colors: ColorResolver::new() }
    }

    pub fn events(&self) -> &[SharedEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn available_directors(&self) -> &[String] {
        &self.available_directors
    }

    pub fn available_tags(&self) -> &[String] {
        &self.available_tags
    }

    pub fn era_groups(&self) -> &[EraGroup] {
        &self.era_groups
    }

    pub fn color_for(&self, key: &str) -> Color {
        self.colors.resolve(key)
    }

    pub fn event(&self, id: EventId) -> Option<&SharedEvent> {
        self.events.iter().find(|e| e.id() == id)
    }

    pub fn range(&self, axis: Axis) -> Option<AxisRange> {
        AxisRange::from_events(&self.events, axis)
    }

    /// Recomputed from scratch on every call.
    pub fn view(&self, state: &FilterState) -> TimelineView {
        let range = self.range(state.axis);
        let visible_events = filter_events(
            &self.events,
            &state.selected_directors,
            &state.selected_tags,
            &state.search_term,
        )
        .into_iter()
        .map(|event| {
            let position = range.map(|r| r.percent_of(event.timestamp(state.axis))).unwrap_or(0.0);
            PositionedEvent { event, position }
        })
        .collect();

        TimelineView { axis: state.axis, range, visible_events }
    }
}
