//! Listen tracking
//!
//! Decides when a listen should be reported to the history collaborator:
//! once per source load as soon as the duration is known, and once per
//! repeat while a single track loops.

use remix_core::{ListenRecord, TrackId};

/// Per-load listen bookkeeping
#[derive(Debug, Clone)]
pub struct ListenTracker {
    /// Whether the current load has been reported
    recorded: bool,

    /// Previous position sample (native loop detection)
    last_time: Option<f64>,

    /// Distance from the end that counts as "near end"
    end_window: f64,

    /// Position below which a sample counts as "near start"
    start_window: f64,
}

impl ListenTracker {
    /// Create a tracker with the native loop detection windows (seconds)
    pub fn new(end_window: f64, start_window: f64) -> Self {
        Self {
            recorded: false,
            last_time: None,
            end_window,
            start_window,
        }
    }

    /// Forget everything about the previous load
    pub fn reset(&mut self) {
        self.recorded = false;
        self.last_time = None;
    }

    /// Whether the current load was already reported
    pub fn is_recorded(&self) -> bool {
        self.recorded
    }

    /// Duration became known for the current load
    ///
    /// Yields a record the first time a positive duration is seen.
    pub fn on_duration(&mut self, track_id: &TrackId, duration: f64) -> Option<ListenRecord> {
        if self.recorded || !(duration.is_finite() && duration > 0.0) {
            return None;
        }
        self.recorded = true;
        Some(ListenRecord::from_seconds(track_id.clone(), duration))
    }

    /// Position sample while the output loops natively
    ///
    /// A jump from within `end_window` of the end to below `start_window`
    /// between consecutive samples is taken as one repeat. Depends on tick
    /// spacing, so very sparse ticks can miss a repeat.
    pub fn on_time_update(
        &mut self,
        track_id: &TrackId,
        current_time: f64,
        duration: f64,
    ) -> Option<ListenRecord> {
        let previous = self.last_time.replace(current_time);

        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }

        let previous = previous?;
        let was_near_end = previous >= duration - self.end_window;
        let is_near_start = current_time < self.start_window;

        if was_near_end && is_near_start {
            Some(ListenRecord::from_seconds(track_id.clone(), duration))
        } else {
            None
        }
    }

    /// The controller restarted the track after `Ended`
    ///
    /// Yields nothing while the duration is still unknown.
    pub fn on_loop_restart(&mut self, track_id: &TrackId, duration: f64) -> Option<ListenRecord> {
        self.last_time = Some(0.0);
        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }
        Some(ListenRecord::from_seconds(track_id.clone(), duration))
    }

    /// Drop the previous position sample
    ///
    /// Samples taken before a loop mode change must not pair with samples
    /// taken after it.
    pub fn forget_sample(&mut self) {
        self.last_time = None;
    }
}

impl Default for ListenTracker {
    fn default() -> Self {
        Self::new(1.0, 0.5)
    }
}
