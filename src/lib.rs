//! A time-driven splash transition: a vortex of short technical words orbits the viewport center,
//! converges on it and fades out, then a wordmark eases into place.
//!
//! One playback is a [`Splash`] mounted on a [`Host`]:
//!
//! - The host delivers frames, timers and resize notifications, and calls back into the splash
//! - Progress is wall-clock driven, so a slow host skips visual states instead of stretching them
//! - Completion fires exactly once, from the frame loop or from a watchdog, unless the host tears
//!   the playback down first
//!
//! [`SimHost`] runs playbacks on virtual time; [`RecordingSurface`] and [`CpuSurface`] are the
//! draw surfaces shipped with the crate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod engine;
pub(crate) mod field;
pub(crate) mod host;
pub(crate) mod render;
pub(crate) mod timeline;

pub use crate::animation::ease::Ease;
pub use crate::config::{
    DEFAULT_DURATION_MS, DEFAULT_GRACE_MS, DEFAULT_VOCABULARY, FieldParams, SplashConfig,
    WordmarkParams,
};
pub use crate::engine::gate::{CompletionCallback, CompletionSource, Outcome};
pub use crate::engine::{ColorProvider, Mount, PhaseObserver, PlaybackStats, Splash};
pub use crate::field::{DrawStats, Particle, ParticleField, particles_per_token};
pub use crate::foundation::core::{Point, Rect, Rgba8, Size, Vec2};
pub use crate::foundation::error::{SplashError, SplashResult};
pub use crate::foundation::math::Rng64;
pub use crate::host::sim::{MIN_FRAME_INTERVAL_MS, SimClock, SimCounters, SimEvent, SimHost};
pub use crate::host::{FrameRequest, Host, ListenerId, TimerId};
pub use crate::render::FrameRGBA;
pub use crate::render::cpu::{CpuSurface, FontSet};
pub use crate::render::recording::{DrawOp, RecordingSurface};
pub use crate::render::surface::{DrawSurface, FontRole, TextDraw};
pub use crate::timeline::clock::PhaseClock;
pub use crate::timeline::phase::{CONVERGE_END, LABEL_START, ORBIT_END, Phase, progress_at};
pub use crate::timeline::wordmark::WordmarkFrame;
