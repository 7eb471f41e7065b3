use crate::foundation::error::{SplashError, SplashResult};

/// Premultiplied RGBA8 pixel.
pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Composite a premultiplied layer over `dst`, both tightly packed and equally sized.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8]) -> SplashResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SplashError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Overwrite the pixel rectangle `[x0, x1) x [y0, y1)` with `rgba`; bounds are clipped.
pub(crate) fn fill_rect_in_place(
    data: &mut [u8],
    width: u32,
    height: u32,
    [x0, y0, x1, y1]: [u32; 4],
    rgba: PremulRgba8,
) {
    let x1 = x1.min(width);
    let y1 = y1.min(height);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    let stride = width as usize * 4;
    for y in y0..y1 {
        let row = y as usize * stride;
        let start = row + x0 as usize * 4;
        let end = row + x1 as usize * 4;
        for px in data[start..end].chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
