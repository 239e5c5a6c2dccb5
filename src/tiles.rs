//! Tile Store
//!
//! Sparse map from tile coordinate to an owned raster. Tiles are only created
//!   by [`ensure`](struct.TileStore.html#method.ensure) or a diff and only
//!   removed by [`remove`](struct.TileStore.html#method.remove) or a diff;
//!   nothing is evicted behind the caller's back
//!
//!     use tilecanvas::{TileStore, TileCoord};
//!
//!     let mut store = TileStore::new(400);
//!     store.ensure(TileCoord::new(-1, 2));
//!     assert!(store.get(TileCoord::new(-1, 2)).is_some());
//!     assert!(store.get(TileCoord::new(0, 0)).is_none());
//!     assert!(store.remove(TileCoord::new(-1, 2)));
//!     assert!(!store.remove(TileCoord::new(-1, 2)));
//!

use crate::buffer::RenderingBuffer;
use crate::coords::TileCoord;
use crate::coords::ViewState;
use crate::coords::{tile_index, TILE_INDEX_LIMIT};

use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;
use std::collections::HashMap;

/// Raster of a single tile
///
/// `tile_size` x `tile_size` pre-multiplied pixels, initially transparent
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    coord: TileCoord,
    raster: RenderingBuffer,
}

impl Tile {
    fn new(coord: TileCoord, tile_size: usize) -> Self {
        Self { coord, raster: RenderingBuffer::new(tile_size, tile_size) }
    }
    pub fn coord(&self) -> TileCoord {
        self.coord
    }
    pub fn raster(&self) -> &RenderingBuffer {
        &self.raster
    }
    pub fn raster_mut(&mut self) -> &mut RenderingBuffer {
        &mut self.raster
    }
    /// Tile has no ink
    pub fn is_blank(&self) -> bool {
        self.raster.painted_pixels() == 0
    }
}

/// Inclusive rectangle of tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileRange {
    pub i0: i64,
    pub j0: i64,
    pub i1: i64,
    pub j1: i64,
}

impl TileRange {
    /// Range covering both coordinates
    pub fn new(a: TileCoord, b: TileCoord) -> Self {
        Self { i0: a.i.min(b.i), j0: a.j.min(b.j),
               i1: a.i.max(b.i), j1: a.j.max(b.j) }
    }
    pub fn contains(&self, c: TileCoord) -> bool {
        c.i >= self.i0 && c.i <= self.i1 && c.j >= self.j0 && c.j <= self.j1
    }
    /// Number of tiles in the range, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        let w = (i128::from(self.i1) - i128::from(self.i0) + 1).max(0);
        let h = (i128::from(self.j1) - i128::from(self.j0) + 1).max(0);
        (w * h).min(usize::MAX as i128) as usize
    }
    /// Bounds are crossed
    ///
    /// Never true for ranges built by [`new`](#method.new)
    pub fn is_empty(&self) -> bool {
        self.i1 < self.i0 || self.j1 < self.j0
    }
    /// Coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> {
        let (i0, i1) = (self.i0, self.i1);
        (self.j0 ..= self.j1)
            .flat_map(move |j| (i0 ..= i1).map(move |i| TileCoord::new(i, j)))
    }
    pub fn to_set(&self) -> BTreeSet<TileCoord> {
        self.iter().collect()
    }
}

/// Tiles needed to show the view, with `margin` extra tiles right and below
///
/// Each axis runs from the tile holding the origin to
///   `floor(origin/ts) + ceil(scale*size/ts) + margin`, margin is at least 1.
///   Indices are clamped to [`TILE_INDEX_LIMIT`](constant.TILE_INDEX_LIMIT.html)
///
///     use tilecanvas::{visible_range, ViewState};
///
///     let view = ViewState::new(800, 600);
///     let r = visible_range(&view, 400, 1);
///     assert_eq!((r.i0, r.i1, r.j0, r.j1), (0, 3, 0, 3));
///
pub fn visible_range(view: &ViewState, tile_size: usize, margin: i64) -> TileRange {
    let ts = tile_size as f64;
    let margin = margin.max(1);
    let axis = |origin: f64, size: usize| -> (i64, i64) {
        let start = tile_index(origin / ts);
        let count = tile_index((view.scale * size as f64 / ts).ceil()).max(0);
        let end = start.saturating_add(count).saturating_add(margin);
        (start, end.min(TILE_INDEX_LIMIT))
    };
    let (i0, i1) = axis(view.origin.x, view.width);
    let (j0, j1) = axis(view.origin.y, view.height);
    TileRange { i0, j0, i1, j1 }
}

/// Tiles to create and remove when the visible set changes
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileDiff {
    #[serde(default)]
    pub to_create: BTreeSet<TileCoord>,
    #[serde(default)]
    pub to_remove: BTreeSet<TileCoord>,
}

impl TileDiff {
    /// Changes turning the set `old` into the set `new`
    pub fn between(old: &BTreeSet<TileCoord>, new: &BTreeSet<TileCoord>) -> Self {
        TileDiff {
            to_create: new.difference(old).copied().collect(),
            to_remove: old.difference(new).copied().collect(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }
    /// Apply the diff to a set of coordinates
    ///
    /// A coordinate in both sets stays in the set
    pub fn apply_to(&self, set: &mut BTreeSet<TileCoord>) {
        for c in &self.to_remove {
            if !self.to_create.contains(c) {
                set.remove(c);
            }
        }
        set.extend(self.to_create.iter().copied());
    }
}

/// Sparse collection of tiles keyed by coordinate
#[derive(Debug, Clone)]
pub struct TileStore {
    tile_size: usize,
    tiles: HashMap<TileCoord, Tile>,
}

impl TileStore {
    /// Create an empty store, the tile size is fixed for its lifetime
    pub fn new(tile_size: usize) -> Self {
        Self { tile_size: tile_size.max(1), tiles: HashMap::new() }
    }
    pub fn tile_size(&self) -> usize {
        self.tile_size
    }
    pub fn len(&self) -> usize {
        self.tiles.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
    pub fn contains(&self, coord: TileCoord) -> bool {
        self.tiles.contains_key(&coord)
    }
    /// Tracked coordinates in order
    pub fn coords(&self) -> BTreeSet<TileCoord> {
        self.tiles.keys().copied().collect()
    }
    /// Return the tile, creating a blank one if absent
    ///
    /// An existing tile is returned unchanged
    pub fn ensure(&mut self, coord: TileCoord) -> &mut Tile {
        let ts = self.tile_size;
        self.tiles.entry(coord).or_insert_with(|| {
            log::debug!("tile {} created", coord);
            Tile::new(coord, ts)
        })
    }
    pub fn get(&self, coord: TileCoord) -> Option<&Tile> {
        self.tiles.get(&coord)
    }
    pub fn get_mut(&mut self, coord: TileCoord) -> Option<&mut Tile> {
        self.tiles.get_mut(&coord)
    }
    /// Discard a tile, returns whether one was present
    pub fn remove(&mut self, coord: TileCoord) -> bool {
        let removed = self.tiles.remove(&coord).is_some();
        if removed {
            log::debug!("tile {} removed", coord);
        }
        removed
    }
    /// Discard every tile
    pub fn clear(&mut self) {
        self.tiles.clear();
    }
    /// Create then remove tiles
    ///
    /// A coordinate listed in both sets ends up present with a fresh, blank
    ///   raster: its previous content is dropped once and it is created once
    pub fn apply_diff(&mut self, diff: &TileDiff) {
        log::debug!("apply diff: +{} -{}", diff.to_create.len(), diff.to_remove.len());
        for &c in &diff.to_create {
            if diff.to_remove.contains(&c) {
                let fresh = Tile::new(c, self.tile_size);
                if self.tiles.insert(c, fresh).is_some() {
                    log::debug!("tile {} recreated", c);
                }
            } else {
                self.ensure(c);
            }
        }
        for &c in &diff.to_remove {
            if !diff.to_create.contains(&c) {
                self.remove(c);
            }
        }
    }
    /// Tiles needed to show the view with this store's tile size
    pub fn visible_range(&self, view: &ViewState, margin: i64) -> TileRange {
        visible_range(view, self.tile_size, margin)
    }
    /// Iterate over all tiles, unordered
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_iter_is_row_major() {
        let r = TileRange::new(TileCoord::new(1, -1), TileCoord::new(0, 0));
        let v : Vec<_> = r.iter().collect();
        assert_eq!(v, vec![TileCoord::new(0, -1), TileCoord::new(1, -1),
                           TileCoord::new(0, 0), TileCoord::new(1, 0)]);
        assert_eq!(r.len(), 4);
        assert!(!r.is_empty());
    }
    #[test]
    fn crossed_range_is_empty() {
        let r = TileRange { i0: 2, j0: 0, i1: 1, j1: 5 };
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.iter().count(), 0);
        let wide = TileRange { i0: i64::MIN, j0: i64::MIN, i1: i64::MAX, j1: i64::MAX };
        assert!(!wide.is_empty());
        assert_eq!(wide.len(), usize::MAX);
    }
    #[test]
    fn far_origin_is_clamped() {
        let mut view = ViewState::new(100, 100);
        view.origin.x = 1e25;
        view.origin.y = -1e25;
        let r = visible_range(&view, 400, 1);
        assert_eq!((r.i0, r.i1), (TILE_INDEX_LIMIT, TILE_INDEX_LIMIT));
        assert_eq!((r.j0, r.j1), (-TILE_INDEX_LIMIT, -TILE_INDEX_LIMIT + 2));
        assert_eq!(r.len(), 3);
        view.origin.x = f64::NAN;
        let r = visible_range(&view, 400, i64::MAX);
        assert_eq!((r.i0, r.i1), (0, TILE_INDEX_LIMIT));
    }
    #[test]
    fn diff_between_sets() {
        let a = TileRange::new(TileCoord::new(0, 0), TileCoord::new(1, 0)).to_set();
        let b = TileRange::new(TileCoord::new(1, 0), TileCoord::new(2, 0)).to_set();
        let d = TileDiff::between(&a, &b);
        assert_eq!(d.to_create.iter().copied().collect::<Vec<_>>(), vec![TileCoord::new(2, 0)]);
        assert_eq!(d.to_remove.iter().copied().collect::<Vec<_>>(), vec![TileCoord::new(0, 0)]);
        let mut s = a.clone();
        d.apply_to(&mut s);
        assert_eq!(s, b);
    }
}
