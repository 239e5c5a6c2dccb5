//! Canvas context and command surface
//!
//! A [`TileCanvas`](struct.TileCanvas.html) owns everything one drawing
//!   surface needs: configuration, tile store, view controller, stroke
//!   rasterizer and compositor. Handlers run to completion one at a time;
//!   the same sequence of commands always produces the same surface
//!
//!     use tilecanvas::*;
//!
//!     let mut canvas = TileCanvas::new(CanvasConfig::default());
//!     canvas.load_surface(800, 600);
//!     let seg = StrokeSegment {
//!         previous_midpoint: WorldPoint::new(390.0, 50.0),
//!         control_point: WorldPoint::new(410.0, 50.0),
//!         current_midpoint: WorldPoint::new(430.0, 50.0),
//!         color: Rgba8::black(),
//!         width: 4.0,
//!     };
//!     let painted = canvas.draw_stroke_segment(&seg);
//!     assert_eq!(painted, vec![TileCoord::new(0, 0), TileCoord::new(1, 0)]);
//!

use crate::color::Rgba8;
use crate::compositor::Compositor;
use crate::config::CanvasConfig;
use crate::coords::{TileCoord, ViewState, ViewportPoint};
use crate::draw::{StrokeRasterizer, StrokeSegment};
use crate::input::CanvasEvent;
use crate::input::WheelDelta;
use crate::tiles::{TileDiff, TileStore};
use crate::view::{PanDirection, ViewController};

use serde::{Deserialize, Serialize};

/// Commands accepted by a canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum Command {
    LoadSurface { width: usize, height: usize },
    Resize { width: usize, height: usize },
    UpdateView { view: ViewState, diff: TileDiff },
    DrawSegment { target: TileCoord, segment: StrokeSegment },
    DrawStrokeSegment { segment: StrokeSegment },
    Pan { direction: PanDirection },
    Wheel {
        delta: f64,
        #[serde(rename = "viewportPos")]
        viewport_pos: ViewportPoint,
    },
}

/// One independent infinite canvas
#[derive(Debug)]
pub struct TileCanvas {
    config: CanvasConfig,
    store: TileStore,
    controller: ViewController,
    rasterizer: StrokeRasterizer,
    compositor: Compositor,
    loaded: bool,
}

impl TileCanvas {
    /// Create a canvas without a surface
    pub fn new(config: CanvasConfig) -> Self {
        let config = config.sanitized();
        Self {
            store: TileStore::new(config.tile_size),
            controller: ViewController::new(&config, 0, 0),
            rasterizer: StrokeRasterizer::new(config.approximation_scale),
            compositor: Compositor::new(0, 0, config.background),
            loaded: false,
            config,
        }
    }
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }
    /// Output surface, pre-multiplied RGBA
    pub fn surface(&self) -> &crate::buffer::RenderingBuffer {
        self.compositor.surface()
    }
    pub fn view(&self) -> &ViewState {
        self.controller.view()
    }
    pub fn controller(&self) -> &ViewController {
        &self.controller
    }
    pub fn store(&self) -> &TileStore {
        &self.store
    }
    /// A surface has been loaded
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }
    fn margin(&self) -> i64 {
        self.controller.margin()
    }
    /// Apply a diff to the store then redraw everything
    fn commit(&mut self, diff: TileDiff) -> TileDiff {
        self.store.apply_diff(&diff);
        let margin = self.margin();
        self.compositor.recompose(&self.store, self.controller.view(), margin);
        diff
    }

    /// Bind a `width` x `height` surface with an empty store and an
    ///   unzoomed view, then create the visible tiles and draw
    pub fn load_surface(&mut self, width: usize, height: usize) -> TileDiff {
        log::debug!("load surface {}x{}", width, height);
        self.store = TileStore::new(self.config.tile_size);
        self.controller = ViewController::new(&self.config, width, height);
        self.compositor = Compositor::new(width, height, self.config.background);
        self.loaded = true;
        let diff = self.controller.refresh();
        self.commit(diff)
    }
    /// Change the surface size; tile content is kept
    pub fn resize(&mut self, width: usize, height: usize) -> TileDiff {
        let diff = self.controller.set_viewport(width, height);
        self.store.apply_diff(&diff);
        let margin = self.margin();
        self.compositor.resize(width, height, &self.store, self.controller.view(), margin);
        diff
    }
    /// Replace the view and apply the given diff in one step
    pub fn update_view(&mut self, view: ViewState, diff: &TileDiff) {
        self.controller.set_view(view, diff);
        self.commit(diff.clone());
    }
    /// Paint a segment into one tile and redraw that tile
    ///
    /// Returns false, changing nothing, when the tile is not tracked
    pub fn draw_segment(&mut self, target: TileCoord, segment: &StrokeSegment) -> bool {
        let tile = match self.store.get_mut(target) {
            Some(tile) => tile,
            None => {
                log::debug!("draw on untracked tile {} ignored", target);
                return false;
            }
        };
        self.rasterizer.paint_tile(tile, segment);
        self.compositor.composite_one(&self.store, target, self.controller.view());
        true
    }
    /// Paint a segment into every tracked tile it touches, redrawing each
    ///
    /// Returns the tiles painted
    pub fn draw_stroke_segment(&mut self, segment: &StrokeSegment) -> Vec<TileCoord> {
        let painted = self.rasterizer.draw(&mut self.store, segment);
        for &coord in &painted {
            self.compositor.composite_one(&self.store, coord, self.controller.view());
        }
        painted
    }
    /// Move the view one pan step
    pub fn pan(&mut self, dir: PanDirection) -> TileDiff {
        let diff = self.controller.pan(dir);
        self.commit(diff)
    }
    pub fn key_down(&mut self, dir: PanDirection) -> TileDiff {
        let diff = self.controller.key_down(dir);
        self.commit(diff)
    }
    pub fn key_up(&mut self) {
        self.controller.key_up();
    }
    /// Zoom around a viewport point by a wheel delta
    pub fn wheel(&mut self, delta: WheelDelta, cursor: ViewportPoint) -> TileDiff {
        let page = self.controller.view().height as f64;
        let delta = delta.normalize(self.config.line_height, page);
        let diff = self.controller.wheel(delta, cursor);
        self.commit(diff)
    }
    pub fn pinch_begin(&mut self) {
        self.controller.pinch_begin();
    }
    pub fn pinch_update(&mut self, factor: f64, centroid: ViewportPoint) -> TileDiff {
        let diff = self.controller.pinch_update(factor, centroid);
        self.commit(diff)
    }
    pub fn pinch_end(&mut self) {
        self.controller.pinch_end();
    }
    /// Apply one command
    pub fn execute(&mut self, cmd: &Command) {
        log::trace!("execute {:?}", cmd);
        match cmd {
            Command::LoadSurface { width, height } => { self.load_surface(*width, *height); },
            Command::Resize { width, height } => { self.resize(*width, *height); },
            Command::UpdateView { view, diff } => self.update_view(*view, diff),
            Command::DrawSegment { target, segment } => { self.draw_segment(*target, segment); },
            Command::DrawStrokeSegment { segment } => { self.draw_stroke_segment(segment); },
            Command::Pan { direction } => { self.pan(*direction); },
            Command::Wheel { delta, viewport_pos } => {
                self.wheel(WheelDelta::Pixels(*delta), *viewport_pos);
            },
        }
    }
    /// Apply the view side of an outbound event: wheels zoom and resizes
    ///   resize. Pointer events carry drawing intent and are left to the
    ///   controller
    pub fn handle_event(&mut self, event: &CanvasEvent) {
        match *event {
            CanvasEvent::Wheel { delta, viewport_pos } => {
                self.wheel(WheelDelta::Pixels(delta), viewport_pos);
            },
            CanvasEvent::Resized { width, height } => { self.resize(width, height); },
            CanvasEvent::PointerMoved { .. } |
            CanvasEvent::PointerDown { .. } |
            CanvasEvent::PointerUp => {},
        }
    }
    /// Surface pixel at (x,y), pre-multiplied
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba8> {
        let s = self.compositor.surface();
        if x < s.width && y < s.height {
            Some(s.get(x, y))
        } else {
            None
        }
    }
}
