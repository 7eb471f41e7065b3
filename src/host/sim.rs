use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use crate::engine::Splash;
use crate::foundation::core::Size;
use crate::foundation::error::{SplashError, SplashResult};
use crate::host::{FrameRequest, Host, ListenerId, TimerId};
use crate::render::recording::RecordingSurface;
use crate::render::surface::DrawSurface;

type SurfaceFactory<S> = Box<dyn FnMut(Size) -> SplashResult<S>>;

/// Shortest frame cadence a [`SimHost`] accepts.
pub const MIN_FRAME_INTERVAL_MS: f64 = 1.0;

/// Shared read handle on a [`SimHost`]'s virtual clock.
///
/// Completion callbacks can hold one to learn when they fired.
#[derive(Clone, Debug, Default)]
pub struct SimClock(Rc<Cell<f64>>);

impl SimClock {
    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.0.get()
    }
}

/// Event dispatched by [`SimHost::drive`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SimEvent {
    /// A frame request came due.
    Frame(FrameRequest),
    /// A timeout fired.
    Timeout(TimerId),
    /// The viewport changed while a listener was registered.
    Resize(Size),
}

/// Resource accounting, for leak checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SimCounters {
    /// `request_frame` calls that returned a handle.
    pub frames_requested: u64,
    /// Frames delivered.
    pub frames_delivered: u64,
    /// Pending frames withdrawn via `cancel_frame`.
    pub frames_cancelled: u64,
    /// Timeouts armed.
    pub timers_set: u64,
    /// Armed timeouts disarmed via `clear_timeout`.
    pub timers_cleared: u64,
    /// Timeouts that fired.
    pub timers_fired: u64,
    /// Resize listeners added.
    pub listeners_added: u64,
    /// Resize listeners removed.
    pub listeners_removed: u64,
    /// Surfaces created through `acquire_surface`.
    pub surfaces_acquired: u64,
    /// Surfaces handed back through `release_surface`.
    pub surfaces_released: u64,
}

/// Deterministic single-threaded host running on virtual time.
///
/// Frames arrive on a fixed cadence after each request, timers fire at their deadlines, and
/// scheduled resizes change the viewport. Knobs simulate the failure modes a browser host has:
/// frames that stop arriving, no frame primitive at all, and surfaces that cannot be created.
pub struct SimHost<S = RecordingSurface> {
    clock: SimClock,
    viewport: Size,
    frame_interval_ms: f64,
    stall_after_ms: Option<f64>,
    frames_available: bool,
    next_handle: u64,
    pending_frame: Option<(FrameRequest, f64)>,
    timers: BTreeMap<TimerId, f64>,
    listeners: BTreeSet<ListenerId>,
    resizes: Vec<(f64, Size)>,
    make_surface: SurfaceFactory<S>,
    counters: SimCounters,
}

impl SimHost<RecordingSurface> {
    /// Host handing out [`RecordingSurface`]s.
    pub fn recording(viewport: Size) -> Self {
        Self::with_factory(viewport, |size| Ok(RecordingSurface::new(size)))
    }
}

impl<S: DrawSurface> SimHost<S> {
    /// Host creating surfaces through `factory`. Frames default to a 16 ms cadence.
    pub fn with_factory(
        viewport: Size,
        factory: impl FnMut(Size) -> SplashResult<S> + 'static,
    ) -> Self {
        Self {
            clock: SimClock::default(),
            viewport,
            frame_interval_ms: 16.0,
            stall_after_ms: None,
            frames_available: true,
            next_handle: 1,
            pending_frame: None,
            timers: BTreeMap::new(),
            listeners: BTreeSet::new(),
            resizes: Vec::new(),
            make_surface: Box::new(factory),
            counters: SimCounters::default(),
        }
    }

    /// Deliver frames every `interval_ms`, floored at [`MIN_FRAME_INTERVAL_MS`].
    ///
    /// A non-finite interval keeps the current cadence.
    pub fn with_frame_interval(mut self, interval_ms: f64) -> Self {
        if interval_ms.is_finite() {
            self.frame_interval_ms = interval_ms.max(MIN_FRAME_INTERVAL_MS);
        } else {
            tracing::warn!(interval_ms, "ignoring non-finite frame interval");
        }
        self
    }

    /// Current frame cadence in milliseconds.
    pub fn frame_interval_ms(&self) -> f64 {
        self.frame_interval_ms
    }

    /// Stop delivering frames due after `at_ms`; requests are still accepted.
    pub fn stall_frames_after(mut self, at_ms: f64) -> Self {
        self.stall_after_ms = Some(at_ms);
        self
    }

    /// Act like a target without a frame scheduling primitive.
    pub fn without_frames(mut self) -> Self {
        self.frames_available = false;
        self
    }

    /// Fail every surface acquisition.
    pub fn failing_surfaces(mut self) -> Self {
        self.make_surface = Box::new(|_| Err(SplashError::surface("surface not attached")));
        self
    }

    /// Change the viewport to `size` at `at_ms`.
    pub fn resize_at(mut self, at_ms: f64, size: Size) -> Self {
        self.resizes.push((at_ms, size));
        self.resizes.sort_by(|a, b| a.0.total_cmp(&b.0));
        self
    }

    /// Shared handle on the virtual clock.
    pub fn clock(&self) -> SimClock {
        self.clock.clone()
    }

    /// Resource accounting so far.
    pub fn counters(&self) -> SimCounters {
        self.counters
    }

    /// Armed timeouts.
    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    /// Whether a frame request is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// Registered resize listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Pop the next event due at or before `until_ms`, advancing virtual time to it.
    pub fn next_event(&mut self, until_ms: f64) -> Option<SimEvent> {
        loop {
            let frame = self
                .pending_frame
                .filter(|(_, due)| self.stall_after_ms.is_none_or(|stall| *due <= stall))
                .map(|(req, due)| (due, 0u8, SimEvent::Frame(req)));
            let timer = self
                .timers
                .iter()
                .min_by(|a, b| a.1.total_cmp(b.1).then(a.0.cmp(b.0)))
                .map(|(id, due)| (*due, 1u8, SimEvent::Timeout(*id)));
            let resize = self
                .resizes
                .first()
                .map(|(at, size)| (*at, 2u8, SimEvent::Resize(*size)));

            let (at, _, event) = [frame, timer, resize]
                .into_iter()
                .flatten()
                .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))?;
            if at > until_ms {
                return None;
            }
            self.clock.0.set(self.clock.now_ms().max(at));

            match event {
                SimEvent::Frame(_) => {
                    self.pending_frame = None;
                    self.counters.frames_delivered += 1;
                }
                SimEvent::Timeout(id) => {
                    self.timers.remove(&id);
                    self.counters.timers_fired += 1;
                }
                SimEvent::Resize(size) => {
                    self.resizes.remove(0);
                    self.viewport = size;
                    if self.listeners.is_empty() {
                        continue;
                    }
                }
            }
            return Some(event);
        }
    }

    /// Dispatch events to `splash` until nothing is due before `until_ms`.
    ///
    /// `observe` runs after each dispatched event. Returns the number of events dispatched.
    pub fn drive(
        &mut self,
        splash: &mut Splash<Self>,
        until_ms: f64,
        mut observe: impl FnMut(&Splash<Self>, &Self, SimEvent),
    ) -> usize {
        let mut dispatched = 0;
        while let Some(event) = self.next_event(until_ms) {
            match event {
                SimEvent::Frame(req) => splash.on_frame(self, req),
                SimEvent::Timeout(id) => splash.on_timeout(self, id),
                SimEvent::Resize(_) => splash.on_resize(self),
            }
            dispatched += 1;
            observe(splash, self, event);
        }
        dispatched
    }

    /// Advance virtual time to `at_ms` without dispatching anything.
    pub fn advance_to(&mut self, at_ms: f64) {
        self.clock.0.set(self.clock.now_ms().max(at_ms));
    }

    fn handle(&mut self) -> u64 {
        let h = self.next_handle;
        self.next_handle += 1;
        h
    }
}

impl<S: DrawSurface> Host for SimHost<S> {
    type Surface = S;

    fn now_ms(&self) -> f64 {
        self.clock.now_ms()
    }

    fn viewport(&self) -> Size {
        self.viewport
    }

    fn request_frame(&mut self) -> Option<FrameRequest> {
        if !self.frames_available {
            return None;
        }
        let req = FrameRequest(self.handle());
        self.pending_frame = Some((req, self.now_ms() + self.frame_interval_ms));
        self.counters.frames_requested += 1;
        Some(req)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending_frame.is_some_and(|(req, _)| req == request) {
            self.pending_frame = None;
            self.counters.frames_cancelled += 1;
        }
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TimerId {
        let id = TimerId(self.handle());
        self.timers.insert(id, self.now_ms() + delay_ms.max(0.0));
        self.counters.timers_set += 1;
        id
    }

    fn clear_timeout(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            self.counters.timers_cleared += 1;
        }
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.handle());
        self.listeners.insert(id);
        self.counters.listeners_added += 1;
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        if self.listeners.remove(&id) {
            self.counters.listeners_removed += 1;
        }
    }

    fn acquire_surface(&mut self, size: Size) -> SplashResult<S> {
        let surface = (self.make_surface)(size)?;
        self.counters.surfaces_acquired += 1;
        Ok(surface)
    }

    fn release_surface(&mut self, surface: S) {
        self.counters.surfaces_released += 1;
        drop(surface);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/sim.rs"]
mod tests;
