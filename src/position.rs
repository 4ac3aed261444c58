// src/position.rs
use crate::timeline_event::{Axis, SharedEvent, TimelineEvent};
use chrono::{DateTime, TimeDelta, Utc};

/// Earliest and latest timestamp of the full dataset on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisRange {
    pub min: DateTime<Utc>,
    pub max: DateTime<Utc>,
}

impl AxisRange {
    /// `None` when there are no events.
    pub fn from_events(all_events: &[SharedEvent], axis: Axis) -> Option<Self> {
        let mut stamps = all_events.iter().map(|e| e.timestamp(axis));
        let first = stamps.next()?;
        let (min, max) = stamps.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
        Some(Self { min, max })
    }

    /// Percentage in [0, 100]. A zero-width range puts everything at 0.
    pub fn percent_of(&self, time: DateTime<Utc>) -> f64 {
        let span = seconds(self.max - self.min);
        if span <= 0.0 {
            return 0.0;
        }
        let offset = seconds(time - self.min);
        (offset / span * 100.0).clamp(0.0, 100.0)
    }
}

// Whole seconds plus the sub-second part, so spans under a millisecond survive.
fn seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// Position of `event` along `axis`, scaled against the unfiltered set.
pub fn position(event: &TimelineEvent, axis: Axis, all_events: &[SharedEvent]) -> f64 {
    AxisRange::from_events(all_events, axis)
        .map(|range| range.percent_of(event.timestamp(axis)))
        .unwrap_or(0.0)
}

/// Column of a marker on a track `width` cells wide after zooming.
pub fn marker_column(percent: f64, width: u16, zoom: f64) -> u16 {
    let track = (f64::from(width) * zoom.max(1.0)).round();
    if track < 1.0 {
        return 0;
    }
    ((percent.clamp(0.0, 100.0) / 100.0) * (track - 1.0)).round() as u16
}
