//! Rendering buffer

use crate::color::Rgba8;

use std::ops::Index;
use std::ops::IndexMut;

/// Bytes per pixel, pre-multiplied RGBA
pub const BPP: usize = 4;

/// Rendering Buffer
///
/// Data is stored as row-major order (C-format), 4 components per pixel with
///   color components pre-multiplied by alpha
#[derive(Debug,Default,Clone,PartialEq)]
pub struct RenderingBuffer {
    /// Pixel / Component level data of Image
    pub data: Vec<u8>,
    /// Image Width in pixels
    pub width: usize,
    /// Image Height in pixels
    pub height: usize,
}

impl RenderingBuffer {
    /// Create a new buffer of width and height
    ///
    /// Data for the Image is allocated and fully transparent. A zero width or
    ///   height gives an empty buffer
    pub fn new(width: usize, height: usize) -> Self {
        RenderingBuffer {
            width, height, data: vec![0u8; width * height * BPP]
        }
    }
    /// Size of underlying Rendering Buffer in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }
    /// Buffer contains no pixels
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
    /// Raw pixel data
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
    /// Return slice of a single row
    pub fn row(&self, y: usize) -> &[u8] {
        debug_assert!(y < self.height);
        let i = y * self.width * BPP;
        &self.data[i .. i + self.width * BPP]
    }
    /// Return mutable slice of a single row
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        debug_assert!(y < self.height);
        let i = y * self.width * BPP;
        &mut self.data[i .. i + self.width * BPP]
    }
    /// Fill the whole image with a pre-multiplied color
    pub fn clear(&mut self, color: Rgba8) {
        let c = [color.r, color.g, color.b, color.a];
        self.data.chunks_exact_mut(BPP).for_each(|p| p.copy_from_slice(&c));
    }
    /// Fill the pixels in [x1,x2) x [y1,y2) with a pre-multiplied color
    ///
    /// The region is clipped to the image
    pub fn fill_rect(&mut self, x1: i64, y1: i64, x2: i64, y2: i64, color: Rgba8) {
        let (x1, x2) = (x1.max(0), x2.min(self.width as i64));
        let (y1, y2) = (y1.max(0), y2.min(self.height as i64));
        if x2 <= x1 || y2 <= y1 {
            return;
        }
        let (x1, x2) = (x1 as usize, x2 as usize);
        let c = [color.r, color.g, color.b, color.a];
        for y in y1 as usize .. y2 as usize {
            let row = self.row_mut(y);
            row[x1 * BPP .. x2 * BPP]
                .chunks_exact_mut(BPP)
                .for_each(|p| p.copy_from_slice(&c));
        }
    }
    /// Get the pixel at (`x`,`y`)
    pub fn get(&self, x: usize, y: usize) -> Rgba8 {
        let p = &self[(x,y)];
        Rgba8::new(p[0], p[1], p[2], p[3])
    }
    /// Set the pixel at (`x`,`y`)
    pub fn set(&mut self, x: usize, y: usize, c: Rgba8) {
        self[(x,y)][..BPP].copy_from_slice(&[c.r, c.g, c.b, c.a]);
    }
    /// Number of pixels with a non-zero alpha
    pub fn painted_pixels(&self) -> usize {
        self.data.chunks_exact(BPP).filter(|p| p[3] != 0).count()
    }
}

impl Index<(usize,usize)> for RenderingBuffer {
    type Output = [u8];
    fn index(&self, index: (usize, usize)) -> &[u8] {
        assert!(index.0 < self.width, "request {} >= {} width :: index", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index", index.1, self.height);
        let i = ((index.1 * self.width) + index.0) * BPP;
        &self.data[i..]
    }
}
impl IndexMut<(usize,usize)> for RenderingBuffer {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut [u8] {
        assert!(index.0 < self.width, "request {} >= {} width :: index_mut", index.0, self.width);
        assert!(index.1 < self.height, "request {} >= {} height :: index_mut", index.1, self.height);
        let i = ((index.1 * self.width) + index.0) * BPP;
        &mut self.data[i..]
    }
}
