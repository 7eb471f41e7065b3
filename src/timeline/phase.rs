/// Progress where particles stop orbiting and start converging.
pub const ORBIT_END: f64 = 0.4;
/// Progress where the wordmark starts its reveal.
pub const LABEL_START: f64 = 0.7;
/// Progress past which the particle field is frozen and hidden.
pub const CONVERGE_END: f64 = 0.8;

/// Coarse animation stage, derived from progress alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Particles orbit and converge; no wordmark yet.
    Orbit,
    /// Wordmark reveal in progress.
    Label,
    /// Fully revealed.
    Done,
}

impl Phase {
    /// Phase for `progress`; out-of-range input is clamped.
    pub fn from_progress(progress: f64) -> Self {
        let p = clamp_progress(progress);
        if p < LABEL_START {
            Self::Orbit
        } else if p < 1.0 {
            Self::Label
        } else {
            Self::Done
        }
    }

    /// Status line a host can show under the animation.
    pub fn caption(self) -> &'static str {
        match self {
            Self::Orbit => "Loading...",
            Self::Label => "Optimizing...",
            Self::Done => "Ready!",
        }
    }
}

/// `min(elapsed / duration, 1)`, with negative or NaN elapsed mapped to 0.
pub fn progress_at(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    clamp_progress(elapsed_ms / duration_ms)
}

fn clamp_progress(p: f64) -> f64 {
    if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/phase.rs"]
mod tests;
