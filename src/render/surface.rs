use crate::foundation::core::{Point, Rect, Rgba8, Size};
use crate::foundation::error::SplashResult;

/// Which font a glyph run is drawn with.
///
/// Particles and the wordmark use distinct faces; surfaces map each role to a concrete font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Small monospace labels orbiting the ring.
    Particle,
    /// The title revealed at the end.
    Wordmark,
}

/// One filled-text draw call, centered on `position`.
#[derive(Clone, Copy, Debug)]
pub struct TextDraw<'a> {
    /// Text to draw.
    pub text: &'a str,
    /// Center of the text box.
    pub position: Point,
    /// Font size in pixels.
    pub size_px: f64,
    /// Global alpha in `[0, 1]`.
    pub alpha: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Font role.
    pub role: FontRole,
    /// CSS-style family list the role was configured with.
    pub family: &'a str,
    /// Bold weight.
    pub bold: bool,
    /// Soft halo radius in pixels, in the fill color. 0 draws a plain fill.
    pub glow_px: f64,
}

/// The 2D drawing surface the engine renders onto.
///
/// Implementations decide how a [`FontRole`] maps to a face. Drawing failures are returned, not
/// panicked on; the engine logs and carries on.
pub trait DrawSurface {
    /// Current pixel dimensions.
    fn size(&self) -> Size;

    /// Track a new viewport size. Existing content may be discarded.
    fn resize(&mut self, size: Size);

    /// Erase a rectangle back to the surface background.
    fn clear_rect(&mut self, rect: Rect);

    /// Erase the whole surface.
    fn clear(&mut self) {
        let size = self.size();
        self.clear_rect(Rect::from_origin_size(Point::ZERO, size));
    }

    /// Fill `draw.text` centered on `draw.position`.
    fn fill_text(&mut self, draw: &TextDraw<'_>) -> SplashResult<()>;
}

impl<S: DrawSurface + ?Sized> DrawSurface for Box<S> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn resize(&mut self, size: Size) {
        (**self).resize(size);
    }

    fn clear_rect(&mut self, rect: Rect) {
        (**self).clear_rect(rect);
    }

    fn clear(&mut self) {
        (**self).clear();
    }

    fn fill_text(&mut self, draw: &TextDraw<'_>) -> SplashResult<()> {
        (**self).fill_text(draw)
    }
}
