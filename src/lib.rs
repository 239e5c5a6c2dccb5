//! Tile based infinite canvas
//!
//! Strokes are painted into fixed size square tiles of an unbounded world.
//!   Tiles are created when the view needs them and dropped when it no longer
//!   does. The output surface is composed from the tiles that are visible,
//!   scaled by the current zoom
//!
//! # Example
//!
//!     use tilecanvas::*;
//!
//!     let mut canvas = TileCanvas::new(CanvasConfig::default());
//!     canvas.load_surface(640, 480);
//!
//!     let mut smoother = StrokeSmoother::new();
//!     smoother.begin(WorldPoint::new(100.0, 100.0), Rgba8::black(), 3.0);
//!     for &(x, y) in &[(120.0, 110.0), (140.0, 130.0), (150.0, 160.0)] {
//!         if let Some(seg) = smoother.extend(WorldPoint::new(x, y)) {
//!             canvas.draw_stroke_segment(&seg);
//!         }
//!     }
//!     smoother.end();
//!     assert!(canvas.store().get(TileCoord::new(0, 0)).map(|t| !t.is_blank()).unwrap_or(false));
//!
//! # How does this work
//!
//! ```text
//! canvas = TileCanvas( store, controller, rasterizer, compositor )
//! Drawing, draw_stroke_segment
//!   StrokeSegment.tile_range()  - tiles the segment may touch
//!   for each tracked tile
//!     Path.curve3()             - flatten, world space
//!     ConvTransform             - into tile local space
//!     Stroke                    - outline, round caps and joins
//!     RasterizerScanlineAA      - clip, cells, sweep
//!     render_scanlines_aa_solid - blend into the tile raster
//!     Compositor.composite_one  - redraw the tile footprint
//! Viewing, pan / wheel / pinch / resize
//!   ViewController              - new origin, scale
//!     visible_range, TileDiff   - tiles to create and remove
//!   TileStore.apply_diff
//!   Compositor.recompose        - clear and blit visible tiles
//! ```

pub mod buffer;
pub mod canvas;
pub mod cell;
pub mod clip;
pub mod color;
pub mod compositor;
pub mod config;
pub mod coords;
pub mod draw;
pub mod error;
pub mod input;
pub mod math;
pub mod paths;
pub mod ppm;
pub mod raster;
pub mod render;
pub mod scan;
pub mod smooth;
pub mod stroke;
pub mod tiles;
pub mod transform;
pub mod view;

pub use crate::buffer::*;
pub use crate::canvas::*;
pub use crate::color::*;
pub use crate::compositor::*;
pub use crate::config::*;
pub use crate::coords::*;
pub use crate::draw::*;
pub use crate::error::*;
pub use crate::input::*;
pub use crate::math::*;
pub use crate::paths::*;
pub use crate::raster::*;
pub use crate::render::*;
pub use crate::scan::*;
pub use crate::smooth::*;
pub use crate::stroke::*;
pub use crate::tiles::*;
pub use crate::transform::*;
pub use crate::view::*;


const POLY_SUBPIXEL_SHIFT : i64 = 8;
const POLY_SUBPIXEL_SCALE : i64 = 1<<POLY_SUBPIXEL_SHIFT;
const POLY_SUBPIXEL_MASK  : i64 = POLY_SUBPIXEL_SCALE - 1;

/// Source of Vertices, paths and the converters built on them
pub trait VertexSource {
    /// Vertices of the source, after any conversion
    fn xconvert(&self) -> Vec<Vertex<f64>>;
}

/// Converts polygons into scanlines of coverage
pub trait Rasterize {
    /// Remove all polygons
    fn reset(&mut self);
    /// Add the polygons of a vertex source
    fn add_path<VS: VertexSource>(&mut self, path: &VS);
    /// Prepare for sweeping, returns false when there is nothing to sweep
    fn rewind_scanlines(&mut self) -> bool;
    /// Fill the next non-empty scanline, returns false when done
    fn sweep_scanline(&mut self, sl: &mut ScanlineU8) -> bool;
    fn min_x(&self) -> i64;
    fn max_x(&self) -> i64;
}
