//! What the engine needs from its host: a clock, a frame scheduler, a timer queue, viewport
//! notifications and draw surfaces.
//!
//! The engine never owns the host. Every engine callback takes `&mut H`, and the host calls back
//! into the engine (`on_frame`, `on_timeout`, `on_resize`) from its own loop.

pub(crate) mod sim;

use crate::foundation::core::Size;
use crate::foundation::error::SplashResult;
use crate::render::surface::DrawSurface;

/// Handle for one pending next-frame request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct FrameRequest(pub u64);

/// Handle for one armed timeout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TimerId(pub u64);

/// Handle for one registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct ListenerId(pub u64);

/// Host environment for one playback.
pub trait Host {
    /// Surface type handed out by [`Host::acquire_surface`].
    type Surface: DrawSurface;

    /// Current time in milliseconds. Only differences are used.
    fn now_ms(&self) -> f64;

    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Ask for one `on_frame` callback. `None` means the host cannot deliver frames at all.
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Withdraw a pending frame request. Unknown handles are ignored.
    fn cancel_frame(&mut self, request: FrameRequest);

    /// Arm a one-shot `on_timeout` callback after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: f64) -> TimerId;

    /// Disarm a timeout. Unknown or already-fired handles are ignored.
    fn clear_timeout(&mut self, id: TimerId);

    /// Start delivering `on_resize` callbacks.
    fn add_resize_listener(&mut self) -> ListenerId;

    /// Stop delivering `on_resize` callbacks for `id`.
    fn remove_resize_listener(&mut self, id: ListenerId);

    /// Create a surface for a playback that was not given one.
    fn acquire_surface(&mut self, size: Size) -> SplashResult<Self::Surface>;

    /// Take back a surface created by [`Host::acquire_surface`].
    fn release_surface(&mut self, surface: Self::Surface) {
        drop(surface);
    }
}
