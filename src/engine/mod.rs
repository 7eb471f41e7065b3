//! The phase clock and scheduler: one playback from mount to completion or teardown.

pub(crate) mod gate;

use std::marker::PhantomData;

use crate::config::SplashConfig;
use crate::engine::gate::{CompletionCallback, CompletionGate, CompletionSource, Outcome};
use crate::field::ParticleField;
use crate::foundation::math::Rng64;
use crate::host::{FrameRequest, Host, ListenerId, TimerId};
use crate::render::surface::DrawSurface;
use crate::timeline::clock::PhaseClock;
use crate::timeline::phase::Phase;
use crate::timeline::wordmark::{WordmarkFrame, resolve_color};

/// Theme lookup for the wordmark fill, e.g. reading a CSS custom property.
pub type ColorProvider = Box<dyn Fn() -> Option<String>>;

/// Called with the new phase whenever it changes during a live playback.
pub type PhaseObserver = Box<dyn FnMut(Phase)>;

/// Everything a host supplies at mount besides the completion callback.
pub struct Mount<S> {
    /// Playback configuration.
    pub config: SplashConfig,
    /// Host-owned surface; when `None` the engine acquires one from the host.
    pub surface: Option<S>,
    /// Theme color lookup for the wordmark.
    pub color_provider: Option<ColorProvider>,
    /// Phase change notifications.
    pub phase_observer: Option<PhaseObserver>,
}

impl<S> Mount<S> {
    /// Mount with `config` and no optional collaborators.
    pub fn new(config: SplashConfig) -> Self {
        Self {
            config,
            surface: None,
            color_provider: None,
            phase_observer: None,
        }
    }

    /// Draw onto a host-owned surface.
    pub fn with_surface(mut self, surface: S) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Look the wordmark color up through `provider` on every wordmark draw.
    pub fn with_color_provider(mut self, provider: impl Fn() -> Option<String> + 'static) -> Self {
        self.color_provider = Some(Box::new(provider));
        self
    }

    /// Notify `observer` of phase changes.
    pub fn with_phase_observer(mut self, observer: impl FnMut(Phase) + 'static) -> Self {
        self.phase_observer = Some(Box::new(observer));
        self
    }
}

/// Counters for one playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PlaybackStats {
    /// Frames that did work.
    pub frames: u64,
    /// Particle glyphs drawn.
    pub particle_draws: u64,
    /// Wordmark draws.
    pub wordmark_draws: u64,
    /// Draw calls the surface refused.
    pub draw_failures: u64,
}

enum SurfaceSlot<S> {
    External(S),
    Owned(S),
}

impl<S> SurfaceSlot<S> {
    fn get(&self) -> &S {
        match self {
            Self::External(s) | Self::Owned(s) => s,
        }
    }

    fn get_mut(&mut self) -> &mut S {
        match self {
            Self::External(s) | Self::Owned(s) => s,
        }
    }
}

/// One splash playback.
///
/// The host drives it: [`Splash::on_frame`] for each delivered frame request,
/// [`Splash::on_timeout`] for fired timers, [`Splash::on_resize`] for viewport changes and
/// [`Splash::teardown`] when the splash goes away early. Completion is reported through the
/// callback given to [`Splash::mount`], at most once; after completion or teardown every callback
/// is a no-op.
pub struct Splash<H: Host> {
    config: SplashConfig,
    clock: PhaseClock,
    field: ParticleField,
    surface: Option<SurfaceSlot<H::Surface>>,
    gate: CompletionGate,
    frame: Option<FrameRequest>,
    watchdog: Option<TimerId>,
    resize_listener: Option<ListenerId>,
    color_provider: Option<ColorProvider>,
    phase_observer: Option<PhaseObserver>,
    phase: Phase,
    stats: PlaybackStats,
    _host: PhantomData<fn(&mut H)>,
}

impl<H: Host> Splash<H> {
    /// Start a playback.
    ///
    /// Never fails: an invalid config falls back to defaults, a surface that cannot be acquired
    /// leaves only the watchdog running, and a host without frame scheduling completes
    /// immediately.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn mount(
        host: &mut H,
        mount: Mount<H::Surface>,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        let Mount {
            mut config,
            surface,
            color_provider,
            phase_observer,
        } = mount;
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "invalid splash config, using defaults");
            config = SplashConfig::default();
        }

        let viewport = host.viewport();
        let mut rng = config.seed.map(Rng64::new).unwrap_or_else(Rng64::from_time);
        let field = ParticleField::new(viewport, &config.vocabulary, &config.field, &mut rng);

        let surface = match surface {
            Some(mut s) => {
                s.resize(viewport);
                Some(SurfaceSlot::External(s))
            }
            None => match host.acquire_surface(viewport) {
                Ok(s) => Some(SurfaceSlot::Owned(s)),
                Err(e) => {
                    tracing::warn!(error = %e, "no draw surface, splash will only time out");
                    None
                }
            },
        };

        let callback: CompletionCallback = Box::new(on_complete);
        let mut splash = Self {
            clock: PhaseClock::new(config.duration_ms),
            field,
            surface,
            gate: CompletionGate::new(callback),
            frame: None,
            watchdog: None,
            resize_listener: None,
            color_provider,
            phase_observer,
            phase: Phase::Orbit,
            stats: PlaybackStats::default(),
            config,
            _host: PhantomData,
        };

        splash.watchdog = Some(host.set_timeout(splash.config.watchdog_ms()));
        tracing::info!(
            duration_ms = splash.config.duration_ms,
            watchdog_ms = splash.config.watchdog_ms(),
            particles = splash.field.particles().len(),
            "splash mounted"
        );

        if splash.surface.is_some() {
            splash.resize_listener = Some(host.add_resize_listener());
            splash.schedule_frame(host);
        }
        splash
    }

    /// Render the frame for `request` and either schedule the next one or complete.
    pub fn on_frame(&mut self, host: &mut H, request: FrameRequest) {
        if !self.gate.is_live() {
            return;
        }
        if self.frame != Some(request) {
            tracing::debug!(?request, "ignoring stale frame request");
            return;
        }
        self.frame = None;

        let progress = self.clock.tick(host.now_ms());
        self.set_phase(Phase::from_progress(progress));

        let Some(slot) = self.surface.as_mut() else {
            return;
        };
        let surface = slot.get_mut();
        surface.clear();

        let mut failures = 0u64;
        if ParticleField::is_active(progress) {
            self.field.update(progress);
            let drawn = self.field.draw(surface, progress);
            self.stats.particle_draws += drawn.drawn as u64;
            failures += drawn.failed as u64;
        }
        if let Some(wordmark) = WordmarkFrame::at(progress, surface.size(), &self.config.wordmark) {
            let theme = self.color_provider.as_ref().and_then(|lookup| lookup());
            let color = resolve_color(theme, self.config.wordmark.color);
            match wordmark.draw(surface, &self.config.wordmark, color) {
                Ok(()) => self.stats.wordmark_draws += 1,
                Err(e) => {
                    tracing::debug!(error = %e, "wordmark draw failed");
                    failures += 1;
                }
            }
        }
        self.stats.frames += 1;
        if failures > 0 {
            if self.stats.draw_failures == 0 {
                tracing::warn!(failures, "surface refused draw calls");
            }
            self.stats.draw_failures += failures;
        }

        if progress < 1.0 {
            self.schedule_frame(host);
        } else {
            self.complete(host, CompletionSource::FrameLoop);
        }
    }

    /// Handle a fired timeout. Only the playback's own watchdog is acted on.
    pub fn on_timeout(&mut self, host: &mut H, id: TimerId) {
        if self.watchdog != Some(id) {
            return;
        }
        self.watchdog = None;
        if !self.gate.is_live() {
            return;
        }
        tracing::warn!(
            progress = self.clock.progress(),
            "animation timeout reached, forcing completion"
        );
        self.complete(host, CompletionSource::Watchdog);
    }

    /// Resize the surface to the host's current viewport. Particle coordinates stay put.
    pub fn on_resize(&mut self, host: &mut H) {
        if !self.gate.is_live() {
            return;
        }
        if let Some(slot) = self.surface.as_mut() {
            let size = host.viewport();
            slot.get_mut().resize(size);
            tracing::debug!(width = size.width, height = size.height, "surface resized");
        }
    }

    /// Abandon the playback. Releases every host resource; completion will never fire.
    ///
    /// Safe to call any number of times, before or after completion.
    pub fn teardown(&mut self, host: &mut H) {
        if self.gate.tear_down() {
            tracing::debug!(progress = self.clock.progress(), "splash torn down");
        }
        self.release(host);
    }

    /// Current phase, for auxiliary UI only.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Status caption for the current phase.
    pub fn caption(&self) -> &'static str {
        self.phase.caption()
    }

    /// Latest progress in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.clock.progress()
    }

    /// Whether frames and timers still do work.
    pub fn is_live(&self) -> bool {
        self.gate.is_live()
    }

    /// How the playback ended, once it has.
    pub fn outcome(&self) -> Option<Outcome> {
        self.gate.outcome()
    }

    /// The particle swarm.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Effective configuration.
    pub fn config(&self) -> &SplashConfig {
        &self.config
    }

    /// Playback counters.
    pub fn stats(&self) -> PlaybackStats {
        self.stats
    }

    /// The surface being drawn on, while the playback holds one.
    pub fn surface(&self) -> Option<&H::Surface> {
        self.surface.as_ref().map(SurfaceSlot::get)
    }

    /// Mutable access to the surface, e.g. to read pixels back.
    pub fn surface_mut(&mut self) -> Option<&mut H::Surface> {
        self.surface.as_mut().map(SurfaceSlot::get_mut)
    }

    /// Hand a host-owned surface back. Engine-acquired surfaces are returned through
    /// [`Host::release_surface`] instead.
    pub fn take_surface(&mut self) -> Option<H::Surface> {
        match self.surface.take() {
            Some(SurfaceSlot::External(s)) => Some(s),
            other => {
                self.surface = other;
                None
            }
        }
    }

    /// Pending next-frame request, if any.
    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.frame
    }

    /// Armed watchdog, if any.
    pub fn watchdog(&self) -> Option<TimerId> {
        self.watchdog
    }

    /// Whether the resize listener is still registered.
    pub fn listens_for_resize(&self) -> bool {
        self.resize_listener.is_some()
    }

    fn set_phase(&mut self, phase: Phase) {
        if phase == self.phase {
            return;
        }
        tracing::debug!(from = ?self.phase, to = ?phase, "phase changed");
        self.phase = phase;
        if let Some(observer) = self.phase_observer.as_mut() {
            observer(phase);
        }
    }

    fn schedule_frame(&mut self, host: &mut H) {
        match host.request_frame() {
            Some(request) => self.frame = Some(request),
            None => {
                tracing::warn!("host cannot schedule frames, completing through the watchdog path");
                self.complete(host, CompletionSource::Watchdog);
            }
        }
    }

    fn complete(&mut self, host: &mut H, source: CompletionSource) {
        let Some(callback) = self.gate.complete(source) else {
            return;
        };
        tracing::info!(
            ?source,
            progress = self.clock.progress(),
            frames = self.stats.frames,
            "splash complete"
        );
        self.release(host);
        callback();
    }

    fn release(&mut self, host: &mut H) {
        if let Some(request) = self.frame.take() {
            host.cancel_frame(request);
        }
        if let Some(id) = self.watchdog.take() {
            host.clear_timeout(id);
        }
        if let Some(id) = self.resize_listener.take() {
            host.remove_resize_listener(id);
        }
        match self.surface.take() {
            Some(SurfaceSlot::Owned(s)) => host.release_surface(s),
            other => self.surface = other,
        }
        self.color_provider = None;
        self.phase_observer = None;
    }
}
