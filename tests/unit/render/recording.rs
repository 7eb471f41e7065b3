use super::*;
use crate::foundation::core::Point;

fn text<'a>(s: &'a str, role: FontRole) -> TextDraw<'a> {
    TextDraw {
        text: s,
        position: Point::new(10.0, 20.0),
        size_px: 12.0,
        alpha: 0.5,
        color: Rgba8::WHITE,
        role,
        family: "monospace",
        bold: false,
        glow_px: 0.0,
    }
}

#[test]
fn full_clear_starts_a_new_frame() {
    let mut s = RecordingSurface::new(Size::new(100.0, 50.0));
    s.fill_text(&text("RAM", FontRole::Particle)).unwrap();
    assert_eq!(s.ops().len(), 1);

    s.clear();
    assert!(s.ops().is_empty());
    assert_eq!(s.full_clears(), 1);
    assert_eq!(s.total_text_draws(), 1);
}

#[test]
fn partial_clear_is_recorded() {
    let mut s = RecordingSurface::new(Size::new(100.0, 50.0));
    s.clear_rect(Rect::new(0.0, 0.0, 10.0, 10.0));
    assert_eq!(s.full_clears(), 0);
    assert_eq!(
        s.ops(),
        &[DrawOp::Clear {
            rect: [0.0, 0.0, 10.0, 10.0]
        }]
    );
}

#[test]
fn texts_filters_by_role() {
    let mut s = RecordingSurface::new(Size::new(100.0, 50.0));
    s.fill_text(&text("RAM", FontRole::Particle)).unwrap();
    s.fill_text(&text("0xFF", FontRole::Particle)).unwrap();
    s.fill_text(&text("OPTIMIZE", FontRole::Wordmark)).unwrap();
    assert_eq!(s.texts(FontRole::Particle).count(), 2);
    assert_eq!(s.texts(FontRole::Wordmark).count(), 1);
}

#[test]
fn ops_serialize_with_tags() {
    let mut s = RecordingSurface::new(Size::new(100.0, 50.0));
    s.fill_text(&text("KB", FontRole::Particle)).unwrap();
    let json = serde_json::to_value(s.ops()).unwrap();
    assert_eq!(json[0]["op"], "text");
    assert_eq!(json[0]["role"], "particle");
    assert_eq!(json[0]["color"], "#ffffff");
}
