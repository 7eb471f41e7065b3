use super::*;

#[test]
fn transparent_source_keeps_destination() {
    assert_eq!(over([10, 20, 30, 255], [0, 0, 0, 0]), [10, 20, 30, 255]);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([10, 20, 30, 255], [200, 0, 0, 255]), [200, 0, 0, 255]);
}

#[test]
fn half_alpha_white_over_black() {
    let out = over([0, 0, 0, 255], [128, 128, 128, 128]);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

#[test]
fn over_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4]).is_err());
}

#[test]
fn fill_rect_clips_to_bounds() {
    let (w, h) = (4u32, 3u32);
    let mut data = vec![0u8; (w * h * 4) as usize];
    fill_rect_in_place(&mut data, w, h, [2, 1, 99, 99], [1, 2, 3, 4]);

    let px = |x: u32, y: u32| {
        let i = ((y * w + x) * 4) as usize;
        [data[i], data[i + 1], data[i + 2], data[i + 3]]
    };
    assert_eq!(px(0, 0), [0, 0, 0, 0]);
    assert_eq!(px(1, 1), [0, 0, 0, 0]);
    assert_eq!(px(2, 1), [1, 2, 3, 4]);
    assert_eq!(px(3, 2), [1, 2, 3, 4]);
}
