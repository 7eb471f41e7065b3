use super::*;

#[test]
fn parse_hex_accepts_short_long_and_alpha_forms() {
    assert_eq!(Rgba8::parse_hex("#fff").unwrap(), Rgba8::WHITE);
    assert_eq!(
        Rgba8::parse_hex("  #1a2B3c ").unwrap(),
        Rgba8::opaque(0x1a, 0x2b, 0x3c)
    );
    assert_eq!(
        Rgba8::parse_hex("#00ff0080").unwrap(),
        Rgba8 {
            r: 0,
            g: 255,
            b: 0,
            a: 128
        }
    );
}

#[test]
fn parse_hex_rejects_garbage() {
    for bad in ["", "fff", "#ff", "#gggggg", "#12345", "#ééé"] {
        assert!(Rgba8::parse_hex(bad).is_err(), "{bad:?} should be rejected");
    }
}

#[test]
fn serde_uses_hex_strings() {
    let c: Rgba8 = serde_json::from_str("\"#3366ff\"").unwrap();
    assert_eq!(c, Rgba8::opaque(0x33, 0x66, 0xff));
    assert_eq!(serde_json::to_string(&c).unwrap(), "\"#3366ff\"");
}

#[test]
fn premul_scales_channels_by_alpha() {
    let c = Rgba8 {
        r: 255,
        g: 128,
        b: 0,
        a: 0,
    };
    assert_eq!(c.to_premul(), [0, 0, 0, 0]);
    assert_eq!(Rgba8::WHITE.to_premul(), [255, 255, 255, 255]);
}

#[test]
fn polar_walks_the_circle_in_degrees() {
    let c = Point::new(100.0, 50.0);
    let p0 = polar(c, 0.0, 10.0);
    let p90 = polar(c, 90.0, 10.0);
    assert!((p0.x - 110.0).abs() < 1e-9 && (p0.y - 50.0).abs() < 1e-9);
    assert!((p90.x - 100.0).abs() < 1e-9 && (p90.y - 60.0).abs() < 1e-9);
}
