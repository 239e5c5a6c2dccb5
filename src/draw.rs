//! Stroke Rasterizer
//!
//! A stroke arrives one quadratic segment at a time. Each segment is
//!   flattened once in world space, then moved into the local space of every
//!   tracked tile it can touch, outlined with round caps and joins, and
//!   rasterized into that tile's raster
//!
//! Width is in tile pixels and does not follow the zoom

use crate::color::Rgba8;
use crate::coords::{tile_of, TileCoord, WorldPoint};
use crate::paths::Path;
use crate::raster::RasterizerScanlineAA;
use crate::render::render_scanlines_aa_solid;
use crate::scan::ScanlineU8;
use crate::stroke::Stroke;
use crate::tiles::{Tile, TileRange, TileStore};
use crate::transform::{ConvTransform, Transform};

use crate::Rasterize;

use serde::{Deserialize, Serialize};

/// One quadratic Bézier increment of a smoothed stroke
///
/// The curve starts at `previous_midpoint`, bends towards `control_point`
///   and ends at `current_midpoint`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrokeSegment {
    pub previous_midpoint: WorldPoint,
    pub control_point: WorldPoint,
    pub current_midpoint: WorldPoint,
    #[serde(alias = "colour")]
    pub color: Rgba8,
    pub width: f64,
}

impl StrokeSegment {
    /// The three key points, in order
    pub fn key_points(&self) -> [WorldPoint; 3] {
        [self.previous_midpoint, self.control_point, self.current_midpoint]
    }
    /// Segment starting and ending on a single point, drawn as a dot
    pub fn dot(p: WorldPoint, color: Rgba8, width: f64) -> Self {
        Self { previous_midpoint: p, control_point: p, current_midpoint: p, color, width }
    }
    /// Tiles holding any of the key points, grown by half the width
    ///
    /// The curve lies within the hull of its key points, and its outline no
    ///   further than half the width outside that
    pub fn tile_range(&self, tile_size: f64) -> TileRange {
        let r = self.width.abs() / 2.0;
        let [p0, c, p1] = self.key_points();
        let mut lo = p0;
        let mut hi = p0;
        for p in &[c, p1] {
            lo = WorldPoint::new(lo.x.min(p.x), lo.y.min(p.y));
            hi = WorldPoint::new(hi.x.max(p.x), hi.y.max(p.y));
        }
        TileRange::new(tile_of(WorldPoint::new(lo.x - r, lo.y - r), tile_size),
                       tile_of(WorldPoint::new(hi.x + r, hi.y + r), tile_size))
    }
    /// Centre line of the segment in world space
    pub fn path(&self, approx_scale: f64) -> Path {
        let mut path = Path::new();
        path.approximation_scale(approx_scale);
        let [p0, c, p1] = self.key_points();
        path.move_to(p0.x, p0.y);
        path.curve3(c.x, c.y, p1.x, p1.y);
        path
    }
}

/// Paints stroke segments into tiles
///
/// Holds the rasterizer and scanline so they are reused between segments
#[derive(Debug)]
pub struct StrokeRasterizer {
    ras: RasterizerScanlineAA,
    sl: ScanlineU8,
    approx_scale: f64,
}

impl Default for StrokeRasterizer {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl StrokeRasterizer {
    pub fn new(approx_scale: f64) -> Self {
        Self { ras: RasterizerScanlineAA::new(), sl: ScanlineU8::new(), approx_scale }
    }
    /// Paint `path`, the segment's world centre line, into one tile
    ///
    /// Returns the number of pixels blended
    fn paint_path(&mut self, tile: &mut Tile, path: &Path, segment: &StrokeSegment) -> usize {
        let ts = tile.raster().width as f64;
        let o = tile.coord().world_origin(ts);
        let local = ConvTransform::new(path, Transform::new_translate(-o.x, -o.y));
        let mut stroke = Stroke::new(&local);
        stroke.width(segment.width);
        stroke.approximation_scale(self.approx_scale);

        self.ras.clip_box(0.0, 0.0, ts, ts);
        self.ras.add_path(&stroke);
        let n = render_scanlines_aa_solid(&mut self.ras, &mut self.sl,
                                          tile.raster_mut(), segment.color);
        log::trace!("segment painted {} pixels into tile {}", n, tile.coord());
        n
    }
    /// Paint a segment into a single tile
    ///
    /// Returns the number of pixels blended
    pub fn paint_tile(&mut self, tile: &mut Tile, segment: &StrokeSegment) -> usize {
        let path = segment.path(self.approx_scale);
        self.paint_path(tile, &path, segment)
    }
    /// Paint a segment into every tracked tile it touches
    ///
    /// Untracked tiles are skipped and the ink meant for them is lost.
    ///   Returns the tiles painted
    pub fn draw(&mut self, store: &mut TileStore, segment: &StrokeSegment) -> Vec<TileCoord> {
        let ts = store.tile_size() as f64;
        let range = segment.tile_range(ts);
        // Walk whichever is smaller, the range or the tracked tiles
        let mut targets: Vec<TileCoord> = if range.len() > store.len() {
            store.coords().into_iter().filter(|c| range.contains(*c)).collect()
        } else {
            range.iter().collect()
        };
        targets.sort_by_key(|c| (c.j, c.i));
        let path = segment.path(self.approx_scale);
        let mut painted = vec![];
        for coord in targets {
            match store.get_mut(coord) {
                Some(tile) => {
                    self.paint_path(tile, &path, segment);
                    painted.push(coord);
                },
                None => log::debug!("tile {} not tracked, segment ink dropped", coord),
            }
        }
        painted
    }
}
