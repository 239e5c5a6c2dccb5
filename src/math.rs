//! Fixed point color math

use crate::color::Rgba8;

/// Interpolate towards a pre-multiplied value, p + q - p * a
pub fn prelerp_u8(p: u8, q: u8, a: u8) -> u8 {
    p.wrapping_add(q).wrapping_sub(multiply_u8(p,a))
}

/// Multiply two u8 values using fixed point math
///
/// See agg_color_rgba.h:395
pub fn multiply_u8(a: u8, b: u8) -> u8 {
    let base_shift = 8;
    let base_msb = 1 << (base_shift - 1);
    let (a,b) = (u32::from(a), u32::from(b));
    let t : u32  = a * b + base_msb;
    let tt : u32 = ((t >> base_shift) + t) >> base_shift;
    tt as u8
}

/// Blend a solid color with coverage onto a pre-multiplied pixel
///
/// `c` is not pre-multiplied; its alpha is scaled by `cover` before the
///   source-over operation
///
///     use tilecanvas::{blend_pix, Rgba8};
///
///     let p = blend_pix(Rgba8::transparent(), Rgba8::black(), 255);
///     assert_eq!(p, Rgba8::black());
///
pub fn blend_pix(p: Rgba8, c: Rgba8, cover: u8) -> Rgba8 {
    let alpha = multiply_u8(c.a, cover);
    if alpha == 0 {
        return p;
    }
    if alpha == 255 {
        return c;
    }
    Rgba8::new(prelerp_u8(p.r, multiply_u8(c.r, alpha), alpha),
               prelerp_u8(p.g, multiply_u8(c.g, alpha), alpha),
               prelerp_u8(p.b, multiply_u8(c.b, alpha), alpha),
               prelerp_u8(p.a, alpha, alpha))
}

/// Source-over of two pre-multiplied pixels, `s` over `p`
pub fn composite_pix(p: Rgba8, s: Rgba8) -> Rgba8 {
    match s.a {
        0 => p,
        255 => s,
        a => Rgba8::new(prelerp_u8(p.r, s.r, a),
                        prelerp_u8(p.g, s.g, a),
                        prelerp_u8(p.b, s.b, a),
                        prelerp_u8(p.a, s.a, a)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiply_edges() {
        assert_eq!(multiply_u8(255, 255), 255);
        assert_eq!(multiply_u8(0, 255), 0);
        assert_eq!(multiply_u8(255, 128), 128);
    }
    #[test]
    fn prelerp_edges() {
        assert_eq!(prelerp_u8(200, 0, 0), 200);
        assert_eq!(prelerp_u8(200, 10, 255), 10);
    }
    #[test]
    fn half_cover_black_on_white() {
        let p = blend_pix(Rgba8::white(), Rgba8::black(), 128);
        assert_eq!(p.a, 255);
        assert!(p.r > 120 && p.r < 135, "{:?}", p);
    }
    #[test]
    fn composite_opaque_source_replaces() {
        let p = composite_pix(Rgba8::white(), Rgba8::new(10,20,30,255));
        assert_eq!(p, Rgba8::new(10,20,30,255));
        let q = composite_pix(Rgba8::white(), Rgba8::transparent());
        assert_eq!(q, Rgba8::white());
    }
}
