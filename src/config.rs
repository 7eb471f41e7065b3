//! Playback configuration.
//!
//! Every field has a default so a host can mount with `SplashConfig::default()` or deserialize a
//! partial JSON object.

use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{SplashError, SplashResult};

/// Default playback length in milliseconds.
pub const DEFAULT_DURATION_MS: f64 = 3500.0;
/// Extra time the watchdog waits past the duration before forcing completion.
pub const DEFAULT_GRACE_MS: f64 = 2000.0;

/// Labels scattered around the ring by default.
pub const DEFAULT_VOCABULARY: [&str; 36] = [
    "200MB", "100MB", "50MB", "25MB", "malloc()", "free()", "pool", "cache", "1010101", "1100110",
    "1111000", "0101010", "bytes", "KB", "MB", "RAM", "heap", "stack", "memory", "buffer", "0xFF",
    "0x64", "0x32", "0x19", "compress", "optimize", "minimize", "efficient", "GC", "alloc",
    "dealloc", "leak", "virtual", "physical", "paging", "swap",
];

/// Top-level configuration for one playback.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplashConfig {
    /// Playback length in milliseconds.
    pub duration_ms: f64,
    /// Watchdog grace past `duration_ms`.
    pub grace_ms: f64,
    /// Particle scatter seed; `None` seeds from the wall clock.
    pub seed: Option<u64>,
    /// Label tokens, one slot on the ring each.
    pub vocabulary: Vec<String>,
    /// Particle field tuning.
    pub field: FieldParams,
    /// Wordmark reveal tuning.
    pub wordmark: WordmarkParams,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            grace_ms: DEFAULT_GRACE_MS,
            seed: None,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| (*s).to_owned()).collect(),
            field: FieldParams::default(),
            wordmark: WordmarkParams::default(),
        }
    }
}

/// Particle field tuning.
///
/// The kinematic constants were picked by eye for a ~60 Hz frame clock; retune them together when
/// targeting a different cadence.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldParams {
    /// Tokens shorter than this many characters get three particles instead of two.
    pub short_token_len: usize,
    /// Ring spread as a fraction of the smaller viewport dimension.
    pub ring_fraction: f64,
    /// Constant added to every starting radius.
    pub ring_margin: f64,
    /// Orbital radius never shrinks below this.
    pub radius_floor: f64,
    /// Orbital radius shrink per frame.
    pub radius_step: f64,
    /// Scales the per-frame convergence blend.
    pub damping: f64,
    /// Per-frame size multiplier while converging.
    pub size_decay: f64,
    /// Per-frame opacity decrement while converging.
    pub fade_step: f64,
    /// Particles at or below this opacity are not drawn.
    pub visibility_epsilon: f64,
    /// Initial font size band `[lo, hi)`.
    pub size_range: [f64; 2],
    /// Initial opacity band `[lo, hi)`.
    pub opacity_range: [f64; 2],
    /// Angular speed band `[lo, hi)`, degrees per half-step.
    pub speed_range: [f64; 2],
    /// Glyph fill color.
    pub color: Rgba8,
    /// Font family reserved for particle glyphs.
    pub font_family: String,
    /// Radius of the soft halo drawn around each glyph in its own color; 0 disables it.
    pub glow_px: f64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            short_token_len: 4,
            ring_fraction: 0.4,
            ring_margin: 100.0,
            radius_floor: 50.0,
            radius_step: 1.0,
            damping: 0.1,
            size_decay: 0.98,
            fade_step: 0.04,
            visibility_epsilon: 0.01,
            size_range: [12.0, 32.0],
            opacity_range: [0.8, 1.0],
            speed_range: [0.02, 0.03],
            color: Rgba8::WHITE,
            font_family: "\"Courier New\", monospace".to_owned(),
            glow_px: 2.0,
        }
    }
}

/// Wordmark reveal tuning.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WordmarkParams {
    /// Title text.
    pub text: String,
    /// Font size when the reveal starts.
    pub base_size: f64,
    /// Font size when the reveal ends.
    pub max_size: f64,
    /// Final vertical position as a fraction of viewport height.
    pub anchor_fraction: f64,
    /// Curve driving the vertical motion.
    pub ease: Ease,
    /// Fill color used when the theme provider has nothing.
    pub color: Rgba8,
    /// Font family for the wordmark.
    pub font_family: String,
    /// Draw the wordmark bold.
    pub bold: bool,
}

impl Default for WordmarkParams {
    fn default() -> Self {
        Self {
            text: "OPTIMIZE".to_owned(),
            base_size: 60.0,
            max_size: 140.0,
            anchor_fraction: 0.4,
            ease: Ease::InOutCubic,
            color: Rgba8::WHITE,
            font_family: "Oswald, sans-serif".to_owned(),
            bold: true,
        }
    }
}

impl SplashConfig {
    /// Default config with a different duration.
    pub fn with_duration_ms(mut self, duration_ms: f64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// Default config with a fixed seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Deadline of the fallback watchdog, relative to mount.
    pub fn watchdog_ms(&self) -> f64 {
        self.duration_ms + self.grace_ms
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> SplashResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| SplashError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> SplashResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject configs the engine cannot play.
    pub fn validate(&self) -> SplashResult<()> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(SplashError::validation(
                "duration_ms must be finite and > 0",
            ));
        }
        if !self.grace_ms.is_finite() || self.grace_ms < 0.0 {
            return Err(SplashError::validation("grace_ms must be finite and >= 0"));
        }
        if self.vocabulary.is_empty() {
            return Err(SplashError::validation("vocabulary must not be empty"));
        }
        if self.vocabulary.iter().any(|t| t.trim().is_empty()) {
            return Err(SplashError::validation(
                "vocabulary tokens must not be blank",
            ));
        }
        self.field.validate()?;
        self.wordmark.validate()
    }
}

fn check_band(name: &str, band: [f64; 2]) -> SplashResult<()> {
    let [lo, hi] = band;
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(SplashError::validation(format!(
            "{name} must be a finite [lo, hi] band with lo <= hi"
        )));
    }
    Ok(())
}

impl FieldParams {
    fn validate(&self) -> SplashResult<()> {
        if self.short_token_len == 0 {
            return Err(SplashError::validation("field.short_token_len must be > 0"));
        }
        if !(self.ring_fraction.is_finite() && self.ring_fraction >= 0.0) {
            return Err(SplashError::validation("field.ring_fraction must be >= 0"));
        }
        if !(self.radius_floor.is_finite() && self.radius_floor >= 0.0) {
            return Err(SplashError::validation("field.radius_floor must be >= 0"));
        }
        if !(self.ring_margin.is_finite() && self.ring_margin >= self.radius_floor) {
            return Err(SplashError::validation(
                "field.ring_margin must be >= field.radius_floor",
            ));
        }
        if !(self.radius_step.is_finite() && self.radius_step >= 0.0) {
            return Err(SplashError::validation("field.radius_step must be >= 0"));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(SplashError::validation("field.damping must be in (0, 1]"));
        }
        if !(self.size_decay > 0.0 && self.size_decay <= 1.0) {
            return Err(SplashError::validation(
                "field.size_decay must be in (0, 1]",
            ));
        }
        if !(self.fade_step.is_finite() && self.fade_step >= 0.0) {
            return Err(SplashError::validation("field.fade_step must be >= 0"));
        }
        if !(0.0..1.0).contains(&self.visibility_epsilon) {
            return Err(SplashError::validation(
                "field.visibility_epsilon must be in [0, 1)",
            ));
        }
        if !(self.glow_px.is_finite() && self.glow_px >= 0.0) {
            return Err(SplashError::validation("field.glow_px must be >= 0"));
        }
        check_band("field.size_range", self.size_range)?;
        check_band("field.opacity_range", self.opacity_range)?;
        check_band("field.speed_range", self.speed_range)?;
        if self.size_range[0] <= 0.0 {
            return Err(SplashError::validation("field.size_range must be > 0"));
        }
        if self.opacity_range[0] < 0.0 || self.opacity_range[1] > 1.0 {
            return Err(SplashError::validation(
                "field.opacity_range must lie within [0, 1]",
            ));
        }
        Ok(())
    }
}

impl WordmarkParams {
    fn validate(&self) -> SplashResult<()> {
        if self.text.trim().is_empty() {
            return Err(SplashError::validation("wordmark.text must not be blank"));
        }
        if !(self.base_size.is_finite() && self.base_size > 0.0) {
            return Err(SplashError::validation("wordmark.base_size must be > 0"));
        }
        if !(self.max_size.is_finite() && self.max_size >= self.base_size) {
            return Err(SplashError::validation(
                "wordmark.max_size must be >= wordmark.base_size",
            ));
        }
        if !(0.0..=1.0).contains(&self.anchor_fraction) {
            return Err(SplashError::validation(
                "wordmark.anchor_fraction must be in [0, 1]",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
