//! Canvas configuration
//!
//! All fields have defaults, a JSON document only needs the values it
//!   changes
//!
//!     use tilecanvas::CanvasConfig;
//!
//!     let config = CanvasConfig::from_json(r##"{"tile_size": 256, "background": "#000"}"##).unwrap();
//!     assert_eq!(config.tile_size, 256);
//!     assert_eq!(config.pan_step, 20.0);
//!

use crate::color::Rgba8;
use crate::Result;

use serde::{Deserialize, Serialize};

use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Side of a square tile in world units and tile pixels
    pub tile_size: usize,
    /// Extra tiles kept beyond the visible ones, at least 1
    pub margin: i64,
    /// World distance moved by a single pan key event
    pub pan_step: f64,
    /// Pixels per wheel line
    pub line_height: f64,
    /// Lowest zoom accumulator value
    pub zoom_min: f64,
    /// Highest zoom accumulator value
    pub zoom_max: f64,
    /// scale = 2 ^ (accumulator / zoom_divisor)
    pub zoom_divisor: f64,
    /// Smallest scale reachable by a pinch
    pub pinch_min_scale: f64,
    /// Largest scale reachable by a pinch
    pub pinch_max_scale: f64,
    /// Surface color where no tile ink is
    pub background: Rgba8,
    /// Curve flattening and arc precision
    pub approximation_scale: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        CanvasConfig {
            tile_size: 400,
            margin: 1,
            pan_step: 20.0,
            line_height: 40.0,
            zoom_min: -1000.0,
            zoom_max: 3000.0,
            zoom_divisor: 1000.0,
            pinch_min_scale: 0.5,
            pinch_max_scale: 8.0,
            background: Rgba8::white(),
            approximation_scale: 1.0,
        }
    }
}

impl CanvasConfig {
    /// Parse a JSON configuration
    pub fn from_json(s: &str) -> Result<Self> {
        let config: CanvasConfig = serde_json::from_str(s)?;
        Ok(config.sanitized())
    }
    /// Read a JSON configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::debug!("loading canvas config from {}", path.as_ref().display());
        Self::from_json(&text)
    }
    /// Raise out of range values to their minimum
    pub fn sanitized(mut self) -> Self {
        if self.margin < 1 {
            log::debug!("margin {} raised to 1", self.margin);
            self.margin = 1;
        }
        self.tile_size = self.tile_size.max(1);
        if !(self.zoom_divisor > 0.0) {
            self.zoom_divisor = 1000.0;
        }
        if self.zoom_min > self.zoom_max {
            std::mem::swap(&mut self.zoom_min, &mut self.zoom_max);
        }
        if self.pinch_min_scale > self.pinch_max_scale {
            std::mem::swap(&mut self.pinch_min_scale, &mut self.pinch_max_scale);
        }
        if !(self.approximation_scale > 0.0) {
            self.approximation_scale = 1.0;
        }
        self
    }
}
