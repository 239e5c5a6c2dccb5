//! View Controller
//!
//! Owns the view state and the set of tiles the view needs. Every change of
//!   view returns the [`TileDiff`](../tiles/struct.TileDiff.html) between the
//!   previously visible set and the new one; the caller applies it to the
//!   store and recomposes
//!
//! Zoom is driven by an accumulator clamped to `[zoom_min, zoom_max]`,
//!   `scale = 2 ^ (accumulator / zoom_divisor)`. Zooming keeps the world point
//!   under the cursor, or the pinch centroid, on the same viewport pixel

use crate::config::CanvasConfig;
use crate::coords::{viewport_to_world, TileCoord, ViewState, ViewportPoint, WorldPoint};
use crate::tiles::{visible_range, TileDiff, TileRange};

use serde::{Deserialize, Serialize};

use std::collections::BTreeSet;

/// What the view is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Idle,
    Panning,
    Zooming,
}

/// Direction of a keyboard pan, in world space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PanDirection {
    Left,
    Right,
    Up,
    Down,
}

impl PanDirection {
    /// Unit vector of the direction
    pub fn vector(&self) -> (f64, f64) {
        match self {
            PanDirection::Left  => (-1.0,  0.0),
            PanDirection::Right => ( 1.0,  0.0),
            PanDirection::Up    => ( 0.0, -1.0),
            PanDirection::Down  => ( 0.0,  1.0),
        }
    }
}

/// Pinch in progress
#[derive(Debug, Clone, Copy)]
struct Pinch {
    /// Scale when the gesture began
    baseline: f64,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    view: ViewState,
    mode: ViewMode,
    /// Scale at the end of the last zoom, the baseline of the next pinch
    committed_scale: f64,
    pinch: Option<Pinch>,
    visible: BTreeSet<TileCoord>,
    tile_size: usize,
    margin: i64,
    pan_step: f64,
    zoom_min: f64,
    zoom_max: f64,
    zoom_divisor: f64,
    pinch_min: f64,
    pinch_max: f64,
}

impl ViewController {
    /// Unzoomed view at the world origin with nothing visible yet
    ///
    /// Call [`refresh`](#method.refresh) for the initial set of tiles
    pub fn new(config: &CanvasConfig, width: usize, height: usize) -> Self {
        let config = config.clone().sanitized();
        Self {
            view: ViewState::new(width, height),
            mode: ViewMode::Idle,
            committed_scale: 1.0,
            pinch: None,
            visible: BTreeSet::new(),
            tile_size: config.tile_size,
            margin: config.margin,
            pan_step: config.pan_step,
            zoom_min: config.zoom_min,
            zoom_max: config.zoom_max,
            zoom_divisor: config.zoom_divisor,
            pinch_min: config.pinch_min_scale,
            pinch_max: config.pinch_max_scale,
        }
    }
    pub fn view(&self) -> &ViewState {
        &self.view
    }
    pub fn mode(&self) -> ViewMode {
        self.mode
    }
    pub fn margin(&self) -> i64 {
        self.margin
    }
    /// Tiles the view currently needs
    pub fn visible(&self) -> &BTreeSet<TileCoord> {
        &self.visible
    }
    pub fn visible_range(&self) -> TileRange {
        visible_range(&self.view, self.tile_size, self.margin)
    }
    /// Scale for a zoom accumulator value
    pub fn scale_for(&self, zoom: f64) -> f64 {
        (zoom / self.zoom_divisor).exp2()
    }
    /// Recompute the visible set, returning what changed
    pub fn refresh(&mut self) -> TileDiff {
        let next = self.visible_range().to_set();
        let diff = TileDiff::between(&self.visible, &next);
        self.visible = next;
        if !diff.is_empty() {
            log::debug!("visible tiles: +{} -{} ({} total)",
                        diff.to_create.len(), diff.to_remove.len(), self.visible.len());
        }
        diff
    }
    /// Viewport size changed
    pub fn set_viewport(&mut self, width: usize, height: usize) -> TileDiff {
        self.view.width = width;
        self.view.height = height;
        self.refresh()
    }
    /// Replace the view and apply an externally computed diff
    ///
    /// The diff is trusted as given; the zoom accumulator is clamped and a
    ///   non-positive or non-finite scale falls back to the one derived from it
    pub fn set_view(&mut self, view: ViewState, diff: &TileDiff) {
        let mut view = view;
        view.zoom = view.zoom.max(self.zoom_min).min(self.zoom_max);
        if !(view.scale.is_finite() && view.scale > 0.0) {
            view.scale = self.scale_for(view.zoom);
        }
        self.view = view;
        self.committed_scale = view.scale;
        diff.apply_to(&mut self.visible);
    }
    /// Move the origin by one step in world space
    pub fn pan(&mut self, dir: PanDirection) -> TileDiff {
        let (dx, dy) = dir.vector();
        self.view.origin.x += dx * self.pan_step;
        self.view.origin.y += dy * self.pan_step;
        log::trace!("pan {:?} origin ({}, {})", dir, self.view.origin.x, self.view.origin.y);
        self.refresh()
    }
    /// Pan key pressed or repeated, one step per event
    pub fn key_down(&mut self, dir: PanDirection) -> TileDiff {
        self.mode = ViewMode::Panning;
        self.pan(dir)
    }
    /// Pan key released
    pub fn key_up(&mut self) {
        if self.mode == ViewMode::Panning {
            self.mode = ViewMode::Idle;
        }
    }
    /// Set the scale keeping `anchor` fixed on screen
    fn zoom_about(&mut self, scale: f64, anchor: ViewportPoint) {
        let before : WorldPoint = viewport_to_world(anchor, &self.view);
        self.view.scale = scale;
        self.view.origin = WorldPoint::new(before.x - anchor.x * scale,
                                           before.y - anchor.y * scale);
    }
    /// Zoom by a normalized wheel delta around the cursor
    pub fn wheel(&mut self, delta: f64, cursor: ViewportPoint) -> TileDiff {
        let prev = self.mode;
        self.mode = ViewMode::Zooming;
        let zoom = (self.view.zoom + delta).max(self.zoom_min).min(self.zoom_max);
        self.view.zoom = zoom;
        let scale = self.scale_for(zoom);
        self.zoom_about(scale, cursor);
        self.committed_scale = scale;
        log::trace!("wheel {} zoom {} scale {}", delta, zoom, scale);
        let diff = self.refresh();
        self.mode = if prev == ViewMode::Zooming { ViewMode::Zooming } else { ViewMode::Idle };
        diff
    }
    /// Start a pinch, the current scale becomes the baseline
    pub fn pinch_begin(&mut self) {
        self.mode = ViewMode::Zooming;
        self.pinch = Some(Pinch { baseline: self.committed_scale });
    }
    /// Pinch moved, `factor` is the current finger distance over the distance
    ///   at the start of the gesture
    ///
    /// Spreading the fingers (`factor > 1`) zooms in. Without a prior
    ///   [`pinch_begin`](#method.pinch_begin) one is started implicitly
    pub fn pinch_update(&mut self, factor: f64, centroid: ViewportPoint) -> TileDiff {
        let baseline = match self.pinch {
            Some(p) => p.baseline,
            None => {
                self.pinch_begin();
                self.committed_scale
            }
        };
        if !(factor.is_finite() && factor > 0.0) {
            return TileDiff::default();
        }
        let scale = (baseline / factor).max(self.pinch_min).min(self.pinch_max);
        self.view.zoom = (self.zoom_divisor * scale.log2()).max(self.zoom_min).min(self.zoom_max);
        self.zoom_about(scale, centroid);
        self.refresh()
    }
    /// End the pinch, its scale is the baseline of the next one
    pub fn pinch_end(&mut self) {
        if self.pinch.take().is_some() {
            self.committed_scale = self.view.scale;
        }
        self.mode = ViewMode::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_up_only_ends_panning() {
        let mut vc = ViewController::new(&CanvasConfig::default(), 100, 100);
        vc.pinch_begin();
        vc.key_up();
        assert_eq!(vc.mode(), ViewMode::Zooming);
        vc.pinch_end();
        vc.key_down(PanDirection::Up);
        assert_eq!(vc.mode(), ViewMode::Panning);
        vc.key_up();
        assert_eq!(vc.mode(), ViewMode::Idle);
    }
    #[test]
    fn bad_pinch_factor_is_ignored() {
        let mut vc = ViewController::new(&CanvasConfig::default(), 100, 100);
        vc.refresh();
        let d = vc.pinch_update(0.0, ViewportPoint::new(50.0, 50.0));
        assert!(d.is_empty());
        assert_eq!(vc.view().scale, 1.0);
    }
}
