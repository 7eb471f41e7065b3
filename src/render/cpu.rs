use std::sync::Arc;

use crate::foundation::core::{Rect, Rgba8, Size};
use crate::foundation::error::{SplashError, SplashResult};
use crate::render::composite::{fill_rect_in_place, over_in_place};
use crate::render::surface::{DrawSurface, FontRole, TextDraw};
use crate::render::text::{TextBrushRgba8, TextLayoutEngine};
use crate::render::FrameRGBA;

/// Font bytes for each [`FontRole`].
///
/// A role without a font cannot be drawn; [`CpuSurface::fill_text`] reports it as a surface error.
#[derive(Clone, Debug, Default)]
pub struct FontSet {
    particle: Option<Arc<Vec<u8>>>,
    wordmark: Option<Arc<Vec<u8>>>,
}

impl FontSet {
    /// No fonts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `bytes` (TTF/OTF) for particle glyphs.
    pub fn with_particle(mut self, bytes: Vec<u8>) -> Self {
        self.particle = Some(Arc::new(bytes));
        self
    }

    /// Use `bytes` (TTF/OTF) for the wordmark.
    pub fn with_wordmark(mut self, bytes: Vec<u8>) -> Self {
        self.wordmark = Some(Arc::new(bytes));
        self
    }

    /// Use the same face for both roles.
    pub fn with_both(self, bytes: Vec<u8>) -> Self {
        let shared = Arc::new(bytes);
        Self {
            particle: Some(shared.clone()),
            wordmark: Some(shared),
        }
    }
}

struct Face {
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// Raster surface: `parley` shapes, `vello_cpu` rasterizes.
///
/// Draws accumulate in a render context and are composited onto a base pixmap whenever the
/// surface is cleared or read back, so partial clears keep their canvas semantics.
pub struct CpuSurface {
    width: u16,
    height: u16,
    background: Option<Rgba8>,
    base: vello_cpu::Pixmap,
    ctx: vello_cpu::RenderContext,
    pending: bool,
    text_engine: TextLayoutEngine,
    particle_face: Option<Face>,
    wordmark_face: Option<Face>,
}

impl CpuSurface {
    /// Transparent surface of `size` pixels.
    pub fn new(size: Size, fonts: &FontSet) -> SplashResult<Self> {
        let (width, height) = (dim(size.width)?, dim(size.height)?);
        let mut text_engine = TextLayoutEngine::new();
        let particle_face = fonts
            .particle
            .as_ref()
            .map(|bytes| load_face(&mut text_engine, bytes))
            .transpose()?;
        let wordmark_face = fonts
            .wordmark
            .as_ref()
            .map(|bytes| load_face(&mut text_engine, bytes))
            .transpose()?;

        Ok(Self {
            width,
            height,
            background: None,
            base: vello_cpu::Pixmap::new(width, height),
            ctx: vello_cpu::RenderContext::new(width, height),
            pending: false,
            text_engine,
            particle_face,
            wordmark_face,
        })
    }

    /// Clears paint `background` instead of transparency.
    pub fn with_background(mut self, background: Option<Rgba8>) -> Self {
        self.background = background;
        let rect = [0, 0, u32::from(self.width), u32::from(self.height)];
        self.erase(rect);
        self
    }

    /// Composite pending draws and read the frame back.
    pub fn snapshot(&mut self) -> SplashResult<FrameRGBA> {
        self.commit()?;
        Ok(FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.base.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn face(&self, role: FontRole) -> Option<&Face> {
        match role {
            FontRole::Particle => self.particle_face.as_ref(),
            FontRole::Wordmark => self.wordmark_face.as_ref(),
        }
    }

    fn commit(&mut self) -> SplashResult<()> {
        if !self.pending {
            return Ok(());
        }
        let mut layer = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut layer);
        self.ctx.reset();
        self.pending = false;
        over_in_place(
            self.base.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
        )
    }

    fn erase(&mut self, [x0, y0, x1, y1]: [u32; 4]) {
        let fill = self.background.map(Rgba8::to_premul).unwrap_or([0; 4]);
        fill_rect_in_place(
            self.base.data_as_u8_slice_mut(),
            u32::from(self.width),
            u32::from(self.height),
            [x0, y0, x1, y1],
            fill,
        );
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    fn resize(&mut self, size: Size) {
        let width = dim(size.width).unwrap_or(self.width);
        let height = dim(size.height).unwrap_or(self.height);
        if (width, height) == (self.width, self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.base = vello_cpu::Pixmap::new(width, height);
        self.ctx = vello_cpu::RenderContext::new(width, height);
        self.pending = false;
        self.erase([0, 0, u32::from(width), u32::from(height)]);
    }

    fn clear_rect(&mut self, rect: Rect) {
        if let Err(e) = self.commit() {
            tracing::warn!(error = %e, "dropping pending draws before clear");
        }
        let px = |v: f64| -> u32 { v.max(0.0).round() as u32 };
        self.erase([px(rect.x0), px(rect.y0), px(rect.x1), px(rect.y1)]);
    }

    fn fill_text(&mut self, draw: &TextDraw<'_>) -> SplashResult<()> {
        if draw.alpha <= 0.0 || draw.text.is_empty() {
            return Ok(());
        }
        let (family_name, font) = match self.face(draw.role) {
            Some(face) => (face.family_name.clone(), face.font.clone()),
            None => {
                return Err(SplashError::surface(format!(
                    "no font registered for {:?} glyphs",
                    draw.role
                )));
            }
        };

        let brush = TextBrushRgba8 {
            r: draw.color.r,
            g: draw.color.g,
            b: draw.color.b,
            a: draw.color.a,
        };
        let layout = self.text_engine.layout_line(
            draw.text,
            &family_name,
            draw.size_px as f32,
            draw.bold,
            brush,
        )?;

        // Center the line box on the requested point.
        let ox = draw.position.x - f64::from(layout.width()) / 2.0;
        let oy = draw.position.y - f64::from(layout.height()) / 2.0;
        let alpha = draw.alpha.min(1.0) as f32;

        let ctx = &mut self.ctx;
        if draw.glow_px > 0.0 {
            let r = draw.glow_px;
            for (dx, dy) in [(-r, 0.0), (r, 0.0), (0.0, -r), (0.0, r)] {
                paint_layout(ctx, &layout, &font, (ox + dx, oy + dy), alpha * GLOW_ALPHA);
            }
        }
        paint_layout(ctx, &layout, &font, (ox, oy), alpha);
        self.pending = true;
        Ok(())
    }
}

/// Opacity of each offset copy making up a glyph halo.
const GLOW_ALPHA: f32 = 0.25;

fn paint_layout(
    ctx: &mut vello_cpu::RenderContext,
    layout: &parley::Layout<TextBrushRgba8>,
    font: &vello_cpu::peniko::FontData,
    origin: (f64, f64),
    alpha: f32,
) {
    ctx.set_transform(vello_cpu::kurbo::Affine::translate(origin));
    if alpha < 1.0 {
        ctx.push_opacity_layer(alpha);
    }
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            ctx.glyph_run(font)
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    if alpha < 1.0 {
        ctx.pop_layer();
    }
}

fn load_face(engine: &mut TextLayoutEngine, bytes: &Arc<Vec<u8>>) -> SplashResult<Face> {
    let family_name = engine.register(bytes)?;
    let font = vello_cpu::peniko::FontData::new(
        vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
        0,
    );
    Ok(Face { family_name, font })
}

fn dim(v: f64) -> SplashResult<u16> {
    if !v.is_finite() || v < 1.0 {
        return Err(SplashError::surface(format!(
            "surface dimension {v} must be finite and >= 1"
        )));
    }
    u16::try_from(v.ceil() as u64)
        .map_err(|_| SplashError::surface(format!("surface dimension {v} exceeds u16")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
