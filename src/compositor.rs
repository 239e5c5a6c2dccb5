//! Viewport Compositor
//!
//! Draws tiles onto the output surface. A tile covers the viewport pixels
//!   whose centres fall inside its world rectangle; each such pixel samples
//!   the nearest tile pixel. Adjacent tiles share their edges, so the
//!   footprints of neighbouring tiles never overlap or leave gaps

use crate::buffer::RenderingBuffer;
use crate::color::Rgba8;
use crate::coords::{tile_viewport_origin, TileCoord, ViewState};
use crate::math::composite_pix;
use crate::tiles::{Tile, TileStore};
use crate::transform::Transform;

/// Output surface and the operations drawing tiles into it
#[derive(Debug, Clone)]
pub struct Compositor {
    surface: RenderingBuffer,
    background: Rgba8,
}

/// Pixel rectangle `[x1,x2) x [y1,y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Footprint {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Footprint {
    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }
    /// Clip to a `width` x `height` surface
    fn clip(&self, width: usize, height: usize) -> Footprint {
        Footprint {
            x1: self.x1.max(0),
            y1: self.y1.max(0),
            x2: self.x2.min(width as i64),
            y2: self.y2.min(height as i64),
        }
    }
}

/// Viewport pixels covered by a tile, unclipped
pub fn footprint(coord: TileCoord, view: &ViewState, tile_size: usize) -> Footprint {
    let ts = tile_size as f64;
    let lo = tile_viewport_origin(coord, view, ts);
    let hi = tile_viewport_origin(TileCoord::new(coord.i + 1, coord.j + 1), view, ts);
    // Pixel d is covered when lo <= d + 0.5 < hi
    let first = |v: f64| (v - 0.5).ceil() as i64;
    Footprint { x1: first(lo.x), y1: first(lo.y), x2: first(hi.x), y2: first(hi.y) }
}

impl Compositor {
    /// Create a surface filled with the background
    pub fn new(width: usize, height: usize, background: Rgba8) -> Self {
        let background = background.premultiply();
        let mut surface = RenderingBuffer::new(width, height);
        surface.clear(background);
        Self { surface, background }
    }
    /// Output surface, pre-multiplied
    pub fn surface(&self) -> &RenderingBuffer {
        &self.surface
    }
    pub fn width(&self) -> usize {
        self.surface.width
    }
    pub fn height(&self) -> usize {
        self.surface.height
    }
    /// Background color, pre-multiplied
    pub fn background(&self) -> Rgba8 {
        self.background
    }
    /// Change the surface size and redraw everything
    ///
    /// Tiles are not touched
    pub fn resize(&mut self, width: usize, height: usize, store: &TileStore, view: &ViewState, margin: i64) {
        log::debug!("surface resized to {}x{}", width, height);
        self.surface = RenderingBuffer::new(width, height);
        self.recompose(store, view, margin);
    }
    /// Clear the surface then draw every tracked tile in the visible range
    pub fn recompose(&mut self, store: &TileStore, view: &ViewState, margin: i64) {
        self.surface.clear(self.background);
        let range = store.visible_range(view, margin);
        let mut n = 0;
        for coord in range.iter() {
            if let Some(tile) = store.get(coord) {
                self.blit(tile, view);
                n += 1;
            }
        }
        log::debug!("recompose: {} tiles of {} in range", n, range.len());
    }
    /// Redraw a single tile's footprint
    ///
    /// The footprint is cleared to the background first. An untracked tile
    ///   leaves just the background
    pub fn composite_one(&mut self, store: &TileStore, coord: TileCoord, view: &ViewState) {
        let fp = footprint(coord, view, store.tile_size())
            .clip(self.surface.width, self.surface.height);
        if fp.is_empty() {
            return;
        }
        self.surface.fill_rect(fp.x1, fp.y1, fp.x2, fp.y2, self.background);
        if let Some(tile) = store.get(coord) {
            self.blit(tile, view);
        }
    }
    /// Composite a tile over its footprint
    fn blit(&mut self, tile: &Tile, view: &ViewState) {
        let raster = tile.raster();
        let ts = raster.width;
        let fp = footprint(tile.coord(), view, ts)
            .clip(self.surface.width, self.surface.height);
        if fp.is_empty() {
            return;
        }
        // Viewport pixel centre to tile local position
        let o = tile.coord().world_origin(ts as f64);
        let m = Transform::new_scale(view.scale, view.scale)
            * Transform::new_translate(view.origin.x - o.x, view.origin.y - o.y);
        let last = ts as i64 - 1;
        for y in fp.y1 .. fp.y2 {
            for x in fp.x1 .. fp.x2 {
                let (lx, ly) = m.transform(x as f64 + 0.5, y as f64 + 0.5);
                let sx = (lx.floor() as i64).max(0).min(last) as usize;
                let sy = (ly.floor() as i64).max(0).min(last) as usize;
                let s = raster.get(sx, sy);
                if s.a == 0 {
                    continue;
                }
                let (x, y) = (x as usize, y as usize);
                let p = self.surface.get(x, y);
                self.surface.set(x, y, composite_pix(p, s));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::WorldPoint;

    #[test]
    fn neighbouring_footprints_share_edges() {
        let mut view = ViewState::new(100, 100);
        view.scale = 0.848;
        view.origin = WorldPoint::new(-13.7, 5.1);
        let a = footprint(TileCoord::new(0, 0), &view, 400);
        let b = footprint(TileCoord::new(1, 0), &view, 400);
        let c = footprint(TileCoord::new(0, 1), &view, 400);
        assert_eq!(a.x2, b.x1);
        assert_eq!(a.y2, c.y1);
    }
    #[test]
    fn footprint_at_unit_scale() {
        let view = ViewState::new(800, 600);
        let f = footprint(TileCoord::new(1, 0), &view, 400);
        assert_eq!(f, Footprint { x1: 400, y1: 0, x2: 800, y2: 400 });
    }
}
