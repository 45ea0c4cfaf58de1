//! Integer alpha compositing, 0..=255 scale. Alpha 255 is opaque.

use crate::engine::types::Color;

/// `x / 255`, rounded, for `x <= 255 * 255`.
#[inline(always)]
pub fn div255(x: u32) -> u32 {
    let t = x + 128;
    (t + (t >> 8)) >> 8
}

/// Combines two opacities multiplicatively.
///
/// In transparency terms (`t = 255 - a`) this is
/// `255 - ((255 - t1) * (255 - t2)) / 255`.
#[inline(always)]
pub fn combine_alpha(a1: u8, a2: u8) -> u8 {
    div255(a1 as u32 * a2 as u32) as u8
}

/// `dst * (1 - a) + src * a`
#[inline(always)]
pub fn blend_channel(dst: u8, src: u8, a: u8) -> u8 {
    let a = a as u32;
    div255(dst as u32 * (255 - a) + src as u32 * a) as u8
}

/// Source-over of `src` (straight alpha) onto an `0xAARRGGBB` pixel.
#[inline(always)]
pub fn blend_argb(dst: u32, src: Color) -> u32 {
    let a = src.3;
    if a == 255 {
        return src.to_argb();
    }
    if a == 0 {
        return dst;
    }
    let d = Color::from_argb(dst);
    let out_a = a as u32 + div255(d.3 as u32 * (255 - a as u32));
    Color(
        blend_channel(d.0, src.0, a),
        blend_channel(d.1, src.1, a),
        blend_channel(d.2, src.2, a),
        out_a.min(255) as u8,
    )
    .to_argb()
}

/// Source-over onto an 8-bit luminance pixel.
#[inline(always)]
pub fn blend_gray(dst: u8, src: Color) -> u8 {
    match src.3 {
        255 => src.luma(),
        0 => dst,
        a => blend_channel(dst, src.luma(), a),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn div255_is_exact_at_edges() {
        assert_eq!(div255(0), 0);
        assert_eq!(div255(255 * 255), 255);
        assert_eq!(div255(255 * 128), 128);
    }

    #[test]
    fn combine_is_multiplicative() {
        assert_eq!(combine_alpha(255, 255), 255);
        assert_eq!(combine_alpha(255, 0), 0);
        assert_eq!(combine_alpha(128, 128), 64);
        // same result as the transparency form
        let (t1, t2) = (255u32 - 200, 255u32 - 100);
        let via_t = 255 - div255((255 - t1) * (255 - t2));
        assert_eq!(combine_alpha(200, 100) as u32, 255 - (255 - via_t));
    }

    #[test]
    fn half_blend_mixes_channels() {
        let out = Color::from_argb(blend_argb(Color::WHITE.to_argb(), Color(0, 0, 0, 128)));
        assert_eq!(out, Color(127, 127, 127, 255));
        assert_eq!(blend_gray(255, Color(0, 0, 0, 128)), 127);
    }
}
