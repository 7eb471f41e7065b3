use super::*;
use crate::foundation::core::Point;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn draw(role: FontRole, alpha: f64) -> TextDraw<'static> {
    TextDraw {
        text: "RAM",
        position: Point::new(8.0, 8.0),
        size_px: 12.0,
        alpha,
        color: Rgba8::WHITE,
        role,
        family: "monospace",
        bold: false,
        glow_px: 0.0,
    }
}

#[test]
fn new_surface_is_transparent_and_sized() {
    let mut s = CpuSurface::new(Size::new(16.0, 8.0), &FontSet::new()).unwrap();
    assert_eq!(s.size(), Size::new(16.0, 8.0));
    let frame = s.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (16, 8));
    assert_eq!(frame.data.len(), 16 * 8 * 4);
    assert!(frame.premultiplied);
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn degenerate_sizes_are_rejected() {
    assert!(CpuSurface::new(Size::new(0.0, 8.0), &FontSet::new()).is_err());
    assert!(CpuSurface::new(Size::new(8.0, f64::NAN), &FontSet::new()).is_err());
    assert!(CpuSurface::new(Size::new(70_000.0, 8.0), &FontSet::new()).is_err());
}

#[test]
fn partial_clear_paints_background_inside_rect_only() {
    let bg = Rgba8::opaque(18, 20, 28);
    let mut s = CpuSurface::new(Size::new(8.0, 8.0), &FontSet::new())
        .unwrap()
        .with_background(Some(bg));
    let frame = s.snapshot().unwrap();
    assert_eq!(px(&frame, 7, 7), [18, 20, 28, 255]);

    s.background = None;
    s.clear_rect(Rect::new(0.0, 0.0, 4.0, 4.0));
    let frame = s.snapshot().unwrap();
    assert_eq!(px(&frame, 1, 1), [0, 0, 0, 0]);
    assert_eq!(px(&frame, 6, 6), [18, 20, 28, 255]);
}

#[test]
fn resize_tracks_viewport_and_ignores_bad_sizes() {
    let mut s = CpuSurface::new(Size::new(8.0, 8.0), &FontSet::new()).unwrap();
    s.resize(Size::new(20.0, 10.0));
    assert_eq!(s.size(), Size::new(20.0, 10.0));
    s.resize(Size::new(0.0, 10.0));
    assert_eq!(s.size(), Size::new(20.0, 10.0));
    assert_eq!(s.snapshot().unwrap().data.len(), 20 * 10 * 4);
}

#[test]
fn missing_font_is_a_surface_error() {
    let mut s = CpuSurface::new(Size::new(16.0, 16.0), &FontSet::new()).unwrap();
    let err = s.fill_text(&draw(FontRole::Wordmark, 1.0)).unwrap_err();
    assert!(matches!(err, SplashError::Surface(_)));
}

#[test]
fn invisible_text_is_skipped_without_a_font() {
    let mut s = CpuSurface::new(Size::new(16.0, 16.0), &FontSet::new()).unwrap();
    s.fill_text(&draw(FontRole::Particle, 0.0)).unwrap();
}

#[test]
fn garbage_font_bytes_fail_at_construction() {
    let fonts = FontSet::new().with_particle(b"not a font".to_vec());
    assert!(CpuSurface::new(Size::new(16.0, 16.0), &fonts).is_err());
}

fn test_font() -> Vec<u8> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/fonts/DejaVuSansMono.ttf");
    std::fs::read(path).unwrap()
}

fn render_ram(alpha: f64, glow_px: f64) -> FrameRGBA {
    let fonts = FontSet::new().with_both(test_font());
    let mut s = CpuSurface::new(Size::new(64.0, 32.0), &fonts).unwrap();
    let mut d = draw(FontRole::Particle, alpha);
    d.position = Point::new(32.0, 16.0);
    d.size_px = 16.0;
    d.glow_px = glow_px;
    s.fill_text(&d).unwrap();
    s.snapshot().unwrap()
}

/// Bounding box `[x0, y0, x1, y1]` of pixels with alpha above `min_alpha`, and the peak alpha.
fn lit(frame: &FrameRGBA, min_alpha: u8) -> ([u32; 4], u8) {
    let mut bbox = [u32::MAX, u32::MAX, 0, 0];
    let mut peak = 0;
    for y in 0..frame.height {
        for x in 0..frame.width {
            let a = px(frame, x, y)[3];
            peak = peak.max(a);
            if a > min_alpha {
                bbox = [bbox[0].min(x), bbox[1].min(y), bbox[2].max(x), bbox[3].max(y)];
            }
        }
    }
    (bbox, peak)
}

#[test]
fn text_is_centered_on_its_position() {
    let frame = render_ram(1.0, 0.0);
    let ([x0, y0, x1, y1], peak) = lit(&frame, 0);
    assert!(x0 <= x1 && y0 <= y1, "nothing was drawn");
    assert!(peak >= 250, "peak alpha {peak}");

    // Three monospace cells at 16 px span roughly 29 px.
    let width = x1 - x0 + 1;
    assert!((22..=36).contains(&width), "lit width {width}");
    assert!(y1 - y0 + 1 <= 16, "lit height {}", y1 - y0 + 1);

    let cx = (x0 + x1) as f64 / 2.0;
    let cy = (y0 + y1) as f64 / 2.0;
    assert!((cx - 32.0).abs() <= 3.0, "center x {cx}");
    assert!((cy - 16.0).abs() <= 5.0, "center y {cy}");

    // White over transparent stays white once premultiplied.
    let [r, g, b, a] = frame
        .data
        .chunks_exact(4)
        .map(|p| [p[0], p[1], p[2], p[3]])
        .max_by_key(|p| p[3])
        .unwrap();
    assert_eq!((r, g, b), (a, a, a));
}

#[test]
fn half_alpha_halves_coverage() {
    let (full_bbox, full) = lit(&render_ram(1.0, 0.0), 0);
    let (half_bbox, half) = lit(&render_ram(0.5, 0.0), 0);
    assert!(full >= 250, "peak alpha {full}");
    assert!((125..=131).contains(&half), "peak alpha {half}");
    assert!(half_bbox[0] >= full_bbox[0] && half_bbox[2] <= full_bbox[2]);
    assert!(half_bbox[1] >= full_bbox[1] && half_bbox[3] <= full_bbox[3]);
}

#[test]
fn glow_spreads_a_faint_halo_around_glyphs() {
    let plain = render_ram(1.0, 0.0);
    let glowing = render_ram(1.0, 2.0);
    let ([px0, py0, px1, py1], _) = lit(&plain, 0);
    let ([gx0, gy0, gx1, gy1], peak) = lit(&glowing, 0);
    assert!(peak >= 250);
    assert!(gx0 + 1 <= px0 && gx1 >= px1 + 1, "x {gx0}..{gx1} vs {px0}..{px1}");
    assert!(gy0 + 1 <= py0 && gy1 >= py1 + 1, "y {gy0}..{gy1} vs {py0}..{py1}");

    // Columns left of the glyphs are covered by a single quarter-strength copy.
    for y in 0..glowing.height {
        for x in gx0..px0 {
            let a = px(&glowing, x, y)[3];
            assert!(a <= 70, "halo alpha {a} at ({x}, {y})");
        }
    }
}
