//! World, viewport and tile coordinates
//!
//! World space is unbounded and holds every stroke. Viewport space is the
//!   pixel grid of the output surface. Each tile is rasterized in its own
//!   local space, world units shifted so the tile's corner is at (0,0)
//!
//!     use tilecanvas::coords::*;
//!
//!     let view = ViewState::new(800, 600);
//!     let w = viewport_to_world(ViewportPoint::new(410.0, 50.0), &view);
//!     let t = tile_of(w, 400.0);
//!     assert_eq!(t, TileCoord::new(1, 0));
//!     assert_eq!(tile_local_pos(w, t, 400.0), (10.0, 50.0));
//!

use serde::{Deserialize, Serialize};

/// Point in world space
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Point in viewport pixels
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportPoint {
    pub x: f64,
    pub y: f64,
}

impl WorldPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    /// Point halfway between `self` and `other`
    pub fn midpoint(&self, other: &WorldPoint) -> WorldPoint {
        WorldPoint::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

impl ViewportPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Index of a square world region of side `tile_size`
///
/// Tile (i,j) covers `[i*ts, (i+1)*ts) x [j*ts, (j+1)*ts)`
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileCoord {
    pub i: i64,
    pub j: i64,
}

impl TileCoord {
    pub fn new(i: i64, j: i64) -> Self {
        Self { i, j }
    }
    /// World position of the tile's top-left corner
    pub fn world_origin(&self, tile_size: f64) -> WorldPoint {
        WorldPoint::new(self.i as f64 * tile_size, self.j as f64 * tile_size)
    }
}

impl std::fmt::Display for TileCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.i, self.j)
    }
}

/// Pan and zoom of the viewport
///
/// A viewport pixel `p` shows world point `p * scale + origin`. `scale` is
///   derived from the zoom accumulator `zoom` as `2 ^ (zoom / 1000)` by the
///   view controller
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    /// World point shown at viewport pixel (0,0)
    pub origin: WorldPoint,
    /// World units per viewport pixel
    pub scale: f64,
    /// Zoom accumulator
    #[serde(alias = "zoomAccumulator")]
    pub zoom: f64,
    /// Viewport width in pixels
    pub width: usize,
    /// Viewport height in pixels
    pub height: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl ViewState {
    /// Unzoomed view at the world origin
    pub fn new(width: usize, height: usize) -> Self {
        Self { origin: WorldPoint::default(), scale: 1.0, zoom: 0.0, width, height }
    }
    /// Viewport pixel at the centre of the viewport
    pub fn center(&self) -> ViewportPoint {
        ViewportPoint::new(self.width as f64 / 2.0, self.height as f64 / 2.0)
    }
}

/// Largest tile index magnitude, coordinates further out share the edge tile
pub const TILE_INDEX_LIMIT: i64 = 1 << 40;

/// Tile index holding `v`, in units of tiles, floored and clamped
pub fn tile_index(v: f64) -> i64 {
    let lim = TILE_INDEX_LIMIT as f64;
    v.floor().clamp(-lim, lim) as i64
}

/// Tile containing the world point, floor semantics
///
///     use tilecanvas::coords::{tile_of, TileCoord, WorldPoint};
///
///     assert_eq!(tile_of(WorldPoint::new(-0.5, -0.5), 400.0), TileCoord::new(-1, -1));
///     assert_eq!(tile_of(WorldPoint::new(399.9, 400.0), 400.0), TileCoord::new(0, 1));
///
pub fn tile_of(p: WorldPoint, tile_size: f64) -> TileCoord {
    TileCoord::new(tile_index(p.x / tile_size),
                   tile_index(p.y / tile_size))
}

/// World point shown at viewport pixel `p`
pub fn viewport_to_world(p: ViewportPoint, view: &ViewState) -> WorldPoint {
    WorldPoint::new(p.x * view.scale + view.origin.x,
                    p.y * view.scale + view.origin.y)
}

/// Viewport pixel showing world point `p`
pub fn world_to_viewport(p: WorldPoint, view: &ViewState) -> ViewportPoint {
    ViewportPoint::new((p.x - view.origin.x) / view.scale,
                       (p.y - view.origin.y) / view.scale)
}

/// Position of a world point within a tile's raster
pub fn tile_local_pos(p: WorldPoint, tile: TileCoord, tile_size: f64) -> (f64, f64) {
    let o = tile.world_origin(tile_size);
    (p.x - o.x, p.y - o.y)
}

/// Viewport pixel where the tile's top-left corner is drawn
pub fn tile_viewport_origin(tile: TileCoord, view: &ViewState, tile_size: f64) -> ViewportPoint {
    world_to_viewport(tile.world_origin(tile_size), view)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_through_tile_space() {
        let mut view = ViewState::new(640, 480);
        view.origin = WorldPoint::new(-1234.5, 77.25);
        view.scale = 0.848;
        for &(x, y) in &[(0.0, 0.0), (12.5, 400.0), (639.0, 479.0), (320.3, 17.9)] {
            let v = ViewportPoint::new(x, y);
            let w = viewport_to_world(v, &view);
            let t = tile_of(w, 400.0);
            let (lx, ly) = tile_local_pos(w, t, 400.0);
            let o = tile_viewport_origin(t, &view, 400.0);
            assert!((o.x + lx / view.scale - x).abs() < 1e-9);
            assert!((o.y + ly / view.scale - y).abs() < 1e-9);
        }
    }
    #[test]
    fn view_state_json_names() {
        let view = ViewState::new(10, 20);
        let s = serde_json::to_string(&view).unwrap();
        assert!(s.contains("\"origin\""));
        let back : ViewState = serde_json::from_str(&s).unwrap();
        assert_eq!(back, view);
    }
}
