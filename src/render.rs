//! Renderer

use crate::scan::ScanlineU8;
use crate::buffer::RenderingBuffer;
use crate::color::Rgba8;
use crate::math::blend_pix;

use crate::Rasterize;

/// Render a single Scanline (y-row) with Anti Aliasing
///
/// Spans are clipped to the buffer
fn render_scanline_aa_solid(sl: &ScanlineU8,
                            ren: &mut RenderingBuffer,
                            color: Rgba8) -> usize {
    if sl.y < 0 || sl.y >= ren.height as i64 {
        return 0;
    }
    let y = sl.y as usize;
    let w = ren.width as i64;
    let mut n = 0;
    for span in &sl.spans {
        let x1 = span.x.max(0);
        let x2 = (span.x + span.len).min(w);
        for x in x1 .. x2 {
            let cover = span.covers[(x - span.x) as usize];
            let (xu, c) = (x as usize, color);
            let p = ren.get(xu, y);
            ren.set(xu, y, blend_pix(p, c, cover));
            n += 1;
        }
    }
    n
}

/// Render rasterized data to an image using a single color, Anti-aliased
///
/// Returns the number of pixels blended
pub fn render_scanlines_aa_solid<RAS>(ras: &mut RAS,
                                      sl: &mut ScanlineU8,
                                      ren: &mut RenderingBuffer,
                                      color: Rgba8) -> usize
    where RAS: Rasterize
{
    let mut n = 0;
    if ras.rewind_scanlines() {
        while ras.sweep_scanline(sl) {
            n += render_scanline_aa_solid(sl, ren, color);
        }
    }
    n
}
