use crate::timeline::phase::{Phase, progress_at};

/// Wall-clock progress tracker for one playback.
///
/// The start time latches on the first tick. Progress only ever moves forward, so a clock that
/// jumps backwards cannot rewind the animation.
#[derive(Clone, Debug)]
pub struct PhaseClock {
    duration_ms: f64,
    start_ms: Option<f64>,
    progress: f64,
}

impl PhaseClock {
    /// Clock for a playback of `duration_ms`.
    pub fn new(duration_ms: f64) -> Self {
        Self {
            duration_ms,
            start_ms: None,
            progress: 0.0,
        }
    }

    /// Record a frame at `now_ms` and return the resulting progress.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let start = *self.start_ms.get_or_insert(now_ms);
        let p = progress_at(now_ms - start, self.duration_ms);
        self.progress = self.progress.max(p);
        self.progress
    }

    /// Latest progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Phase implied by the latest progress.
    pub fn phase(&self) -> Phase {
        Phase::from_progress(self.progress)
    }

    /// Timestamp of the first tick, if any.
    pub fn start_ms(&self) -> Option<f64> {
        self.start_ms
    }

    /// Configured playback length.
    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;
