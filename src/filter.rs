// src/filter.rs
use crate::timeline_event::SharedEvent;
use std::collections::BTreeSet;

/// Narrows `events` by director, then tag, then search term. Every pass is an AND;
/// tags match if any selected tag is present. Input order is preserved.
pub fn filter_events(
    events: &[SharedEvent],
    selected_directors: &BTreeSet<String>,
    selected_tags: &BTreeSet<String>,
    search_term: &str,
) -> Vec<SharedEvent> {
    let mut visible: Vec<SharedEvent> = events.to_vec();

    if !selected_directors.is_empty() {
        visible.retain(|event| selected_directors.contains(event.director()));
    }

    if !selected_tags.is_empty() {
        visible.retain(|event| event.tags().iter().any(|tag| selected_tags.contains(tag)));
    }

    if !search_term.is_empty() {
        let needle = search_term.to_lowercase();
        visible.retain(|event| {
            [event.title(), event.description(), event.content(), event.director()]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        });
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline_event::test_support::{event, ymd};
    use crate::timeline_event::{EventId, TimelineEvent};
    use std::sync::Arc;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn ids(events: &[SharedEvent]) -> Vec<i64> {
        events.iter().map(|e| e.id().value()).collect()
    }

    fn sample() -> Vec<SharedEvent> {
        vec![
            event(1, "X", &["sci-fi"], ymd(1970, 1, 1)),
            event(2, "Y", &["sci-fi"], ymd(1980, 1, 1)),
            event(3, "Christopher Nolan", &["thriller", "sci-fi"], ymd(2010, 7, 16)),
            event(4, "X", &[], ymd(2020, 1, 1)),
        ]
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        let out = filter_events(&[], &set(&["X"]), &set(&["sci-fi"]), "film");
        assert!(out.is_empty());
    }

    #[test]
    fn test_no_filters_is_identity() {
        let events = sample();
        let out = filter_events(&events, &set(&[]), &set(&[]), "");
        assert_eq!(ids(&out), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_director_and_tag_compose_conjunctively() {
        let events = sample();
        let out = filter_events(&events, &set(&["X"]), &set(&["sci-fi"]), "");
        assert_eq!(ids(&out), vec![1]);
    }

    #[test]
    fn test_tags_match_any_selected() {
        let events = sample();
        let out = filter_events(&events, &set(&[]), &set(&["thriller", "western"]), "");
        assert_eq!(ids(&out), vec![3]);
    }

    #[test]
    fn test_untagged_events_drop_out_under_tag_filter() {
        let events = sample();
        let out = filter_events(&events, &set(&["X"]), &set(&["sci-fi", "horror"]), "");
        assert!(!out.iter().any(|e| e.id() == EventId::new(4)));
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let events = sample();
        assert_eq!(ids(&filter_events(&events, &set(&[]), &set(&[]), "nolan")), vec![3]);
        assert_eq!(ids(&filter_events(&events, &set(&[]), &set(&[]), "FILM 2")), vec![2]);
        assert_eq!(ids(&filter_events(&events, &set(&[]), &set(&[]), "description 4")), vec![4]);
        assert!(filter_events(&events, &set(&[]), &set(&[]), "zzz").is_empty());
    }

    #[test]
    fn test_search_reaches_content() {
        let mut events = sample();
        events.push(Arc::new(TimelineEvent::new(
            EventId::new(5),
            "Arrival".to_string(),
            "First contact".to_string(),
            "<p>Heptapods</p>".to_string(),
            "Denis Villeneuve".to_string(),
            ymd(2016, 11, 11),
            ymd(2016, 11, 11),
            "5".to_string(),
            vec![],
            vec![],
        )));
        assert_eq!(ids(&filter_events(&events, &set(&[]), &set(&[]), "HEPTA")), vec![5]);
    }

    #[test]
    fn test_result_preserves_input_order() {
        let events = sample();
        let out = filter_events(&events, &set(&["X", "Y"]), &set(&[]), "");
        assert_eq!(ids(&out), vec![1, 2, 4]);
    }
}
