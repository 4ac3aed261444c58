// src/filter_state.rs
use crate::timeline_event::{Axis, EventId};
use std::collections::BTreeSet;

pub const MIN_ZOOM: f64 = 1.0;
pub const MAX_ZOOM: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.5;

/// Which filter options the filter panel offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryView {
    #[default]
    All,
    Directors,
    Genres,
}

impl CategoryView {
    pub fn next(self) -> Self {
        match self {
            CategoryView::All => CategoryView::Directors,
            CategoryView::Directors => CategoryView::Genres,
            CategoryView::Genres => CategoryView::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryView::All => "All",
            CategoryView::Directors => "Directors",
            CategoryView::Genres => "Genres",
        }
    }

    pub fn shows_directors(self) -> bool {
        matches!(self, CategoryView::All | CategoryView::Directors)
    }

    pub fn shows_genres(self) -> bool {
        matches!(self, CategoryView::All | CategoryView::Genres)
    }
}

/// Everything the user can change about what the timeline shows.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selected_tags: BTreeSet<String>,
    pub selected_directors: BTreeSet<String>,
    pub search_term: String,
    pub axis: Axis,
    pub category_view: CategoryView,
    pub zoom: f64,
    pub selected_event: Option<EventId>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            selected_tags: BTreeSet::new(),
            selected_directors: BTreeSet::new(),
            search_term: String::new(),
            axis: Axis::default(),
            category_view: CategoryView::default(),
            zoom: MIN_ZOOM,
            selected_event: None,
        }
    }
}

fn toggle(set: &mut BTreeSet<String>, key: &str) -> bool {
    if set.remove(key) {
        false
    } else {
        set.insert(key.to_string());
        true
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the director is selected afterwards.
    pub fn toggle_director(&mut self, director: &str) -> bool {
        toggle(&mut self.selected_directors, director)
    }

    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        toggle(&mut self.selected_tags, tag)
    }

    pub fn set_search(&mut self, term: &str) {
        self.search_term = term.to_string();
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_term.push(c);
    }

    pub fn pop_search_char(&mut self) {
        self.search_term.pop();
    }

    pub fn clear_search(&mut self) {
        self.search_term.clear();
    }

    pub fn set_axis(&mut self, axis: Axis) {
        self.axis = axis;
    }

    pub fn toggle_axis(&mut self) {
        self.axis = self.axis.toggle();
    }

    pub fn cycle_category_view(&mut self) {
        self.category_view = self.category_view.next();
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom - ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn reset_zoom(&mut self) {
        self.zoom = MIN_ZOOM;
    }

    pub fn select_event(&mut self, id: EventId) {
        self.selected_event = Some(id);
    }

    pub fn clear_selected_event(&mut self) {
        self.selected_event = None;
    }

    /// Drops director, tag and search filters. Axis, view and zoom stay.
    pub fn clear_filters(&mut self) {
        self.selected_directors.clear();
        self.selected_tags.clear();
        self.search_term.clear();
    }

    pub fn has_active_filters(&self) -> bool {
        !self.selected_directors.is_empty()
            || !self.selected_tags.is_empty()
            || !self.search_term.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut state = FilterState::new();
        state.toggle_tag("noir");
        let before = state.clone();

        assert!(state.toggle_director("Billy Wilder"));
        assert!(!state.toggle_director("Billy Wilder"));
        assert!(state.toggle_tag("western"));
        assert!(!state.toggle_tag("western"));

        assert_eq!(state, before);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut state = FilterState::new();
        state.zoom_out();
        assert_eq!(state.zoom, MIN_ZOOM);
        for _ in 0..20 {
            state.zoom_in();
        }
        assert_eq!(state.zoom, MAX_ZOOM);
        state.reset_zoom();
        assert_eq!(state.zoom, MIN_ZOOM);
    }

    #[test]
    fn test_category_view_cycles() {
        let mut state = FilterState::new();
        state.cycle_category_view();
        assert_eq!(state.category_view, CategoryView::Directors);
        state.cycle_category_view();
        assert_eq!(state.category_view, CategoryView::Genres);
        state.cycle_category_view();
        assert_eq!(state.category_view, CategoryView::All);
    }

    #[test]
    fn test_search_editing() {
        let mut state = FilterState::new();
        for c in "kubr".chars() {
            state.push_search_char(c);
        }
        state.pop_search_char();
        assert_eq!(state.search_term, "kub");
        assert!(state.has_active_filters());
        state.clear_search();
        assert!(!state.has_active_filters());
    }

    #[test]
    fn test_clear_filters_keeps_axis_and_zoom() {
        let mut state = FilterState::new();
        state.toggle_axis();
        state.zoom_in();
        state.toggle_director("Wes Anderson");
        state.set_search("hotel");
        state.clear_filters();
        assert!(!state.has_active_filters());
        assert_eq!(state.axis, Axis::Episode);
        assert_eq!(state.zoom, MIN_ZOOM + ZOOM_STEP);
    }
}
