//! Scanlines, a single row of coverage values

/// Run of pixels on a scanline
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Span {
    /// Starting x position
    pub x: i64,
    /// Number of pixels
    pub len: i64,
    /// Coverage for each pixel
    pub covers: Vec<u8>,
}

/// Scanline of 8-bit coverage values
#[derive(Debug,Default)]
pub struct ScanlineU8 {
    last_x: i64,
    pub spans: Vec<Span>,
    pub y: i64,
}

const LAST_X: i64 = 0x7FFF_FFF0;

impl ScanlineU8 {
    pub fn new() -> Self {
        Self { last_x: LAST_X, y: 0, spans: vec![] }
    }
    /// Remove all spans
    pub fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.spans.clear();
    }
    /// Set the row of the scanline
    pub fn finalize(&mut self, y: i64) {
        self.y = y;
    }
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    /// Add `len` pixels of the same coverage starting at `x`
    pub fn add_span(&mut self, x: i64, len: i64, cover: u8) {
        if len <= 0 {
            return;
        }
        match self.spans.last_mut() {
            Some(cur) if x == self.last_x + 1 => {
                cur.len += len;
                cur.covers.extend(std::iter::repeat(cover).take(len as usize));
            },
            _ => self.spans.push(Span { x, len, covers: vec![cover; len as usize] }),
        }
        self.last_x = x + len - 1;
    }
    /// Add a single pixel of coverage at `x`
    pub fn add_cell(&mut self, x: i64, cover: u8) {
        self.add_span(x, 1, cover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_cells_merge() {
        let mut sl = ScanlineU8::new();
        sl.add_cell(4, 10);
        sl.add_span(5, 3, 255);
        sl.add_cell(10, 20);
        assert_eq!(sl.num_spans(), 2);
        assert_eq!(sl.spans[0], Span { x: 4, len: 4, covers: vec![10, 255, 255, 255] });
        assert_eq!(sl.spans[1].x, 10);
        sl.reset_spans();
        assert_eq!(sl.num_spans(), 0);
    }
}
