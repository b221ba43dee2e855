//! Per-column illumination events with a sliding time window.

use std::collections::BTreeMap;

use pixelrain_core::RainConfig;

/// Events strictly younger than the window are recent. Timestamps later
/// than `now` count as recent.
fn is_recent(window_ms: u64, timestamp: u64, now: u64) -> bool {
    now.saturating_sub(timestamp) < window_ms
}

/// Records when falling symbols crossed the overlay band in each column and
/// forgets events older than the window.
///
/// Every read or write of a column prunes it, so memory stays bounded by
/// columns × events per window.
#[derive(Debug, Clone)]
pub struct IlluminationTracker {
    window_ms: u64,
    full_intensity_events: usize,
    /// Column index to event timestamps in insertion order.
    columns: BTreeMap<usize, Vec<u64>>,
}

impl IlluminationTracker {
    pub fn new(window_ms: u64, full_intensity_events: usize) -> Self {
        Self {
            window_ms,
            full_intensity_events: full_intensity_events.max(1),
            columns: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &RainConfig) -> Self {
        Self::new(config.illumination_window_ms, config.full_intensity_events)
    }

    /// Record an event for `column` and drop anything outside the window
    /// ending at `timestamp`.
    pub fn record(&mut self, column: usize, timestamp: u64) {
        let window_ms = self.window_ms;
        let events = self.columns.entry(column).or_default();
        events.push(timestamp);
        events.retain(|&t| is_recent(window_ms, t, timestamp));
    }

    /// Number of events in `column` within the window ending at `now`.
    /// Stale events are pruned from storage.
    pub fn recent_count(&mut self, column: usize, now: u64) -> usize {
        let window_ms = self.window_ms;
        match self.columns.get_mut(&column) {
            Some(events) => {
                events.retain(|&t| is_recent(window_ms, t, now));
                events.len()
            }
            None => 0,
        }
    }

    /// Normalised activity of `column` in `0.0..=1.0`.
    pub fn intensity(&mut self, column: usize, now: u64) -> f32 {
        let count = self.recent_count(column, now);
        self.intensity_for(count)
    }

    /// Intensity corresponding to a number of recent events.
    pub fn intensity_for(&self, count: usize) -> f32 {
        (count as f32 / self.full_intensity_events as f32).min(1.0)
    }

    /// Prune every column and return `(column, recent_count)` for the
    /// columns that still have events, in column order.
    pub fn lit_columns(&mut self, now: u64) -> Vec<(usize, usize)> {
        let window_ms = self.window_ms;
        self.columns
            .iter_mut()
            .filter_map(|(&column, events)| {
                events.retain(|&t| is_recent(window_ms, t, now));
                (!events.is_empty()).then_some((column, events.len()))
            })
            .collect()
    }

    /// Total stored events across all columns, stale ones included.
    pub fn stored_events(&self) -> usize {
        self.columns.values().map(Vec::len).sum()
    }
}
