use crate::foundation::core::{Rect, Rgba8, Size};
use crate::foundation::error::SplashResult;
use crate::render::surface::{DrawSurface, FontRole, TextDraw};

/// A draw call captured by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    /// Partial clear. Full clears reset the op list instead of being recorded.
    Clear {
        /// Cleared rectangle.
        rect: [f64; 4],
    },
    /// Filled text.
    Text {
        /// Drawn text.
        text: String,
        /// Center point.
        x: f64,
        /// Center point.
        y: f64,
        /// Font size in pixels.
        size_px: f64,
        /// Global alpha.
        alpha: f64,
        /// Fill color.
        color: Rgba8,
        /// Font role.
        role: FontRole,
        /// Configured family list.
        family: String,
        /// Bold weight.
        bold: bool,
        /// Halo radius.
        glow_px: f64,
    },
}

/// In-memory surface that records the draw calls of the current frame.
///
/// A clear covering the whole surface starts a new frame, mirroring how a canvas is wiped once
/// per animation frame.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    size: Size,
    ops: Vec<DrawOp>,
    full_clears: u64,
    resizes: u64,
    total_text_draws: u64,
}

impl RecordingSurface {
    /// Empty surface of the given size.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Ops drawn since the last full clear.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Text ops of the current frame drawn with `role`.
    pub fn texts(&self, role: FontRole) -> impl Iterator<Item = &DrawOp> {
        self.ops
            .iter()
            .filter(move |op| matches!(op, DrawOp::Text { role: r, .. } if *r == role))
    }

    /// Number of whole-surface clears, i.e. frames started.
    pub fn full_clears(&self) -> u64 {
        self.full_clears
    }

    /// Number of resize calls.
    pub fn resizes(&self) -> u64 {
        self.resizes
    }

    /// Text draws across all frames.
    pub fn total_text_draws(&self) -> u64 {
        self.total_text_draws
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
        self.resizes += 1;
        self.ops.clear();
    }

    fn clear_rect(&mut self, rect: Rect) {
        if covers(rect, self.size) {
            self.ops.clear();
            self.full_clears += 1;
        } else {
            self.ops.push(DrawOp::Clear {
                rect: [rect.x0, rect.y0, rect.x1, rect.y1],
            });
        }
    }

    fn fill_text(&mut self, draw: &TextDraw<'_>) -> SplashResult<()> {
        self.total_text_draws += 1;
        self.ops.push(DrawOp::Text {
            text: draw.text.to_owned(),
            x: draw.position.x,
            y: draw.position.y,
            size_px: draw.size_px,
            alpha: draw.alpha,
            color: draw.color,
            role: draw.role,
            family: draw.family.to_owned(),
            bold: draw.bold,
            glow_px: draw.glow_px,
        });
        Ok(())
    }
}

fn covers(rect: Rect, size: Size) -> bool {
    rect.x0 <= 0.0 && rect.y0 <= 0.0 && rect.x1 >= size.width && rect.y1 >= size.height
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
