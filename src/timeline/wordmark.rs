use crate::config::WordmarkParams;
use crate::foundation::core::{Point, Rgba8, Size, center_of};
use crate::foundation::error::SplashResult;
use crate::foundation::math::lerp;
use crate::render::surface::{DrawSurface, FontRole, TextDraw};
use crate::timeline::phase::LABEL_START;

/// Resolved wordmark geometry for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WordmarkFrame {
    /// Progress through the reveal window, `[0, 1]`.
    pub text_progress: f64,
    /// `text_progress` after the configured ease.
    pub eased: f64,
    /// Center of the text.
    pub position: Point,
    /// Font size in pixels.
    pub size_px: f64,
    /// Global alpha.
    pub alpha: f64,
}

impl WordmarkFrame {
    /// Geometry at `progress`, or `None` before the reveal window opens.
    ///
    /// The vertical travel follows the ease; size grows linearly with the window; alpha saturates
    /// halfway through.
    pub fn at(progress: f64, viewport: Size, params: &WordmarkParams) -> Option<Self> {
        if progress < LABEL_START {
            return None;
        }
        let text_progress = ((progress - LABEL_START) / (1.0 - LABEL_START)).clamp(0.0, 1.0);
        let eased = params.ease.apply(text_progress);

        let center = center_of(viewport);
        let anchor_y = viewport.height * params.anchor_fraction;
        let y = lerp(center.y, anchor_y, eased);

        Some(Self {
            text_progress,
            eased,
            position: Point::new(center.x.floor(), y.floor()),
            size_px: lerp(params.base_size, params.max_size, text_progress).floor(),
            alpha: (text_progress * 2.0).min(1.0),
        })
    }

    /// Draw the wordmark with `color`.
    pub fn draw<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        params: &WordmarkParams,
        color: Rgba8,
    ) -> SplashResult<()> {
        surface.fill_text(&TextDraw {
            text: &params.text,
            position: self.position,
            size_px: self.size_px,
            alpha: self.alpha,
            color,
            role: FontRole::Wordmark,
            family: &params.font_family,
            bold: params.bold,
            glow_px: 0.0,
        })
    }
}

/// Resolve the wordmark fill from the theme value, falling back to `fallback`.
pub fn resolve_color(theme_value: Option<String>, fallback: Rgba8) -> Rgba8 {
    let Some(raw) = theme_value else {
        return fallback;
    };
    if raw.trim().is_empty() {
        return fallback;
    }
    match Rgba8::parse_hex(&raw) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!(error = %e, "theme color unusable, using default");
            fallback
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/wordmark.rs"]
mod tests;
