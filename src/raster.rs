//! Anti-Aliased Scanline Rasterizer

use crate::POLY_SUBPIXEL_SHIFT;
use crate::POLY_SUBPIXEL_SCALE;

use crate::clip::Clip;
use crate::scan::ScanlineU8;
use crate::cell::RasterizerCell;
use crate::paths::PathCommand;

use crate::Rasterize;
use crate::VertexSource;

use std::cmp::min;
use std::cmp::max;

/// Largest subpixel coordinate magnitude, keeps edge arithmetic within i64
const POLY_COORD_LIMIT: f64 = (1u64 << 50) as f64;

/// Conversion between floating point and subpixel coordinates
#[derive(Debug)]
pub struct RasConvInt {
}
impl RasConvInt {
    /// Subpixel coordinate, clamped to the representable range
    pub fn upscale(v: f64) -> i64 {
        (v * POLY_SUBPIXEL_SCALE as f64).round()
            .clamp(-POLY_COORD_LIMIT, POLY_COORD_LIMIT) as i64
    }
    pub fn downscale(v: i64) -> i64 {
        v
    }
}

#[derive(Debug,PartialEq,Copy,Clone)]
pub enum PathStatus {
    Initial,
    Closed,
    MoveTo,
    LineTo
}
impl Default for PathStatus {
    fn default() -> PathStatus {
        PathStatus::Initial
    }
}

/// Rasterizer, converts polygons into rows of coverage values
///
/// Polygons are accumulated as cells by [`add_path`](trait.Rasterize.html#tymethod.add_path)
///   and read back a row at a time with
///   [`sweep_scanline`](trait.Rasterize.html#tymethod.sweep_scanline)
#[derive(Debug, Default)]
pub struct RasterizerScanlineAA {
    clipper: Clip,
    outline: RasterizerCell,
    status: PathStatus,
    x0: i64,
    y0: i64,
    /// Index of the next cell to sweep
    scan_cell: usize,
}

impl Rasterize for RasterizerScanlineAA {
    fn reset(&mut self) {
        self.outline.reset();
        self.status = PathStatus::Initial;
        self.scan_cell = 0;
    }
    fn add_path<VS: VertexSource>(&mut self, path: &VS) {
        if self.outline.sorted() {
            self.reset();
        }
        for seg in path.xconvert() {
            match seg.cmd {
                PathCommand::LineTo => self.line_to_d(seg.x, seg.y),
                PathCommand::MoveTo => self.move_to_d(seg.x, seg.y),
                PathCommand::Close  => self.close_polygon(),
                PathCommand::Stop   => {},
            }
        }
    }
    fn rewind_scanlines(&mut self) -> bool {
        self.close_polygon();
        self.outline.sort_cells();
        self.scan_cell = 0;
        self.outline.total_cells() != 0
    }
    fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool {
        let cells = self.outline.cells();
        loop {
            let start = self.scan_cell;
            if start >= cells.len() {
                return false;
            }
            let y = cells[start].y;
            let end = cells[start..].iter()
                .position(|c| c.y != y)
                .map(|n| start + n)
                .unwrap_or(cells.len());
            self.scan_cell = end;

            sl.reset_spans();
            let mut cover = 0;
            let mut i = start;
            while i < end {
                let mut x = cells[i].x;
                let mut area = cells[i].area;
                cover += cells[i].cover;
                i += 1;
                // Accumulate all cells with the same x
                while i < end && cells[i].x == x {
                    area  += cells[i].area;
                    cover += cells[i].cover;
                    i += 1;
                }
                if area != 0 {
                    let alpha = self.calculate_alpha((cover << (POLY_SUBPIXEL_SHIFT + 1)) - area);
                    if alpha > 0 {
                        sl.add_cell(x, alpha);
                    }
                    x += 1;
                }
                if i < end && cells[i].x > x {
                    let alpha = self.calculate_alpha(cover << (POLY_SUBPIXEL_SHIFT + 1));
                    if alpha > 0 {
                        sl.add_span(x, cells[i].x - x, alpha);
                    }
                }
            }
            if sl.num_spans() != 0 {
                sl.finalize(y);
                return true;
            }
        }
    }
    fn min_x(&self) -> i64 {
        self.outline.min_x
    }
    fn max_x(&self) -> i64 {
        self.outline.max_x
    }
}

impl RasterizerScanlineAA {
    /// Create a new Rasterizer, non-zero filling without clipping
    pub fn new() -> Self {
        Self { clipper: Clip::new(), status: PathStatus::Initial,
               outline: RasterizerCell::new(),
               x0: 0, y0: 0, scan_cell: 0,
        }
    }
    /// Restrict rasterization to a region, in pixels
    pub fn clip_box(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.reset();
        self.clipper.clip_box(RasConvInt::upscale(x1),
                              RasConvInt::upscale(y1),
                              RasConvInt::upscale(x2),
                              RasConvInt::upscale(y2));
    }
    /// Rows covered by added polygons, inclusive
    pub fn min_y(&self) -> i64 {
        self.outline.min_y
    }
    pub fn max_y(&self) -> i64 {
        self.outline.max_y
    }
    /// Start a new polygon at (x,y)
    ///
    /// An open polygon is closed first
    pub fn move_to_d(&mut self, x: f64, y: f64) {
        if self.outline.sorted() {
            self.reset();
        }
        self.close_polygon();
        self.x0 = RasConvInt::upscale( x );
        self.y0 = RasConvInt::upscale( y );
        self.clipper.move_to(self.x0,self.y0);
        self.status = PathStatus::MoveTo;
    }
    /// Add an edge to (x,y)
    pub fn line_to_d(&mut self, x: f64, y: f64) {
        let x = RasConvInt::upscale( x );
        let y = RasConvInt::upscale( y );
        self.clipper.line_to(&mut self.outline, x,y);
        self.status = PathStatus::LineTo;
    }
    /// Close the current polygon back to its starting point
    pub fn close_polygon(&mut self) {
        if self.status == PathStatus::LineTo {
            self.clipper.line_to(&mut self.outline, self.x0, self.y0);
            self.status = PathStatus::Closed;
        }
    }
    /// Convert an area into an 8-bit coverage, non-zero winding
    pub fn calculate_alpha(&self, area: i64) -> u8 {
        let aa_shift  = 8;
        let aa_mask   = (1 << aa_shift) - 1;

        let cover = (area >> (POLY_SUBPIXEL_SHIFT*2 + 1 - aa_shift)).abs();
        max(0, min(cover, aa_mask)) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::Path;

    fn square(x: f64, y: f64, s: f64) -> Path {
        let mut p = Path::new();
        p.move_to(x, y);
        p.line_to(x + s, y);
        p.line_to(x + s, y + s);
        p.line_to(x, y + s);
        p.close_polygon();
        p
    }

    #[test]
    fn pixel_aligned_square_is_fully_covered() {
        let mut ras = RasterizerScanlineAA::new();
        ras.add_path(&square(2.0, 3.0, 4.0));
        assert!(ras.rewind_scanlines());
        let mut sl = ScanlineU8::new();
        let mut rows = vec![];
        while ras.sweep_scanline(&mut sl) {
            assert_eq!(sl.num_spans(), 1);
            assert_eq!(sl.spans[0].x, 2);
            assert_eq!(sl.spans[0].len, 4);
            assert!(sl.spans[0].covers.iter().all(|&c| c == 255));
            rows.push(sl.y);
        }
        assert_eq!(rows, vec![3, 4, 5, 6]);
    }
    #[test]
    fn half_pixel_edge_is_half_covered() {
        let mut ras = RasterizerScanlineAA::new();
        ras.add_path(&square(0.5, 0.0, 2.0));
        assert!(ras.rewind_scanlines());
        let mut sl = ScanlineU8::new();
        assert!(ras.sweep_scanline(&mut sl));
        let covers : Vec<u8> = sl.spans.iter().flat_map(|s| s.covers.clone()).collect();
        assert_eq!(covers.len(), 3);
        assert!((covers[0] as i32 - 128).abs() <= 1, "{:?}", covers);
        assert_eq!(covers[1], 255);
        assert!((covers[2] as i32 - 128).abs() <= 1, "{:?}", covers);
    }
    #[test]
    fn huge_coordinates_are_clamped() {
        assert_eq!(RasConvInt::upscale(1.5), 384);
        assert_eq!(RasConvInt::upscale(1e300), 1 << 50);
        assert_eq!(RasConvInt::upscale(f64::NEG_INFINITY), -(1 << 50));
        assert_eq!(RasConvInt::upscale(f64::NAN), 0);

        let mut ras = RasterizerScanlineAA::new();
        ras.clip_box(0.0, 0.0, 10.0, 10.0);
        ras.move_to_d(-1e20, -1e20);
        ras.line_to_d(1e20, 1e20);
        ras.line_to_d(-1e20, 1e20);
        ras.close_polygon();
        assert!(ras.rewind_scanlines());
        let mut sl = ScanlineU8::new();
        let mut rows = 0;
        while ras.sweep_scanline(&mut sl) {
            rows += 1;
        }
        assert_eq!(rows, 10);
    }
    #[test]
    fn overlap_is_filled_once() {
        let mut outer = square(0.0, 0.0, 6.0);
        let inner = square(2.0, 2.0, 2.0);
        outer.vertices.extend(inner.vertices);
        let mut ras = RasterizerScanlineAA::new();
        ras.add_path(&outer);
        assert!(ras.rewind_scanlines());
        let mut sl = ScanlineU8::new();
        let mut found = false;
        while ras.sweep_scanline(&mut sl) {
            if sl.y == 3 {
                assert_eq!(sl.num_spans(), 1);
                assert!(sl.spans[0].covers.iter().all(|&c| c == 255));
                found = true;
            }
        }
        assert!(found);
    }
    #[test]
    fn clipped_to_box() {
        let mut ras = RasterizerScanlineAA::new();
        ras.clip_box(0.0, 0.0, 10.0, 10.0);
        ras.add_path(&square(-5.0, -5.0, 30.0));
        assert!(ras.rewind_scanlines());
        let mut sl = ScanlineU8::new();
        while ras.sweep_scanline(&mut sl) {
            assert!(sl.y >= 0 && sl.y <= 10);
        }
    }
    #[test]
    fn empty_path_has_no_scanlines() {
        let mut ras = RasterizerScanlineAA::new();
        ras.add_path(&Path::new());
        assert!(!ras.rewind_scanlines());
    }
}
