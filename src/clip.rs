//! Clipping Region

use crate::cell::RasterizerCell;

/// Rectangle
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Rectangle<T: std::cmp::PartialOrd + Copy> {
    /// Minimum x value
    pub x1: T,
    /// Minimum y value
    pub y1: T,
    /// Maximum x value
    pub x2: T,
    /// Maximum y value
    pub y2: T,
}
impl<T> Rectangle<T> where T: std::cmp::PartialOrd + Copy {
    /// Create a new Rectangle
    ///
    /// Values are sorted before storing
    pub fn new(x1: T, y1: T, x2: T, y2: T) -> Self {
        let (x1, x2) = if x1 > x2 { (x2,x1) } else { (x1,x2) };
        let (y1, y2) = if y1 > y2 { (y2,y1) } else { (y1,y2) };
        Self { x1,y1,x2,y2 }
    }
    /// Get location of point relative to rectangle
    ///
    /// Returned is an a u8 made up of the following bits:
    /// - [INSIDE](constant.INSIDE.html)
    /// - [LEFT](constant.LEFT.html)
    /// - [RIGHT](constant.RIGHT.html)
    /// - [BOTTOM](constant.BOTTOM.html)
    /// - [TOP](constant.TOP.html)
    ///
    pub fn clip_flags(&self, x: T, y: T) -> u8 {
        clip_flags(&x,&y, &self.x1, &self.y1, &self.x2, &self.y2)
    }
}

/// Inside Region
///
/// See [Liang Barsky](https://en.wikipedia.org/wiki/Liang-Barsky_algorithm)
pub const INSIDE : u8 = 0b0000;
/// Left of Region
pub const LEFT   : u8 = 0b0000_0001;
/// Right of Region
pub const RIGHT  : u8 = 0b0000_0010;
/// Below Region, smaller y
pub const BOTTOM : u8 = 0b0000_0100;
/// Above Region, larger y
pub const TOP    : u8 = 0b0000_1000;

/// Determine the location of a point to a broken-down rectangle or range
fn clip_flags<T: std::cmp::PartialOrd>(x: &T, y: &T, x1: &T, y1: &T, x2: &T, y2: &T) -> u8 {
    let mut code = INSIDE;
    if x < x1 { code |= LEFT; }
    if x > x2 { code |= RIGHT; }
    if y < y1 { code |= BOTTOM; }
    if y > y2 { code |= TOP; }
    code
}

/// Clip Region
///
/// Lines are cut at the top and bottom of the clip box. Parts left or right
///   of the box are moved onto its edge so the cover they carry into a row
///   is kept
#[derive(Debug,Default)]
pub struct Clip {
    /// Current x Point
    x1: i64,
    /// Current y Point
    y1: i64,
    /// Rectangle to clip on
    clip_box: Option<Rectangle<i64>>,
    /// Current clip flag for point (x1,y1)
    clip_flag: u8,
}

/// a * b / c, rounded, computed in f64
fn mul_div(a: i64, b: i64, c: i64) -> i64 {
    let (a,b,c) = (a as f64, b as f64, c as f64);
    (a * b / c).round() as i64
}

/// Add the part of (x1,y1) -> (x2,y2) between the top and bottom of `b`
fn line_clip_y(ras: &mut RasterizerCell, b: &Rectangle<i64>,
               (x1, y1): (i64, i64), (x2, y2): (i64, i64)) {
    let f1 = b.clip_flags(x1, y1) & (TOP|BOTTOM);
    let f2 = b.clip_flags(x2, y2) & (TOP|BOTTOM);
    if f1 != INSIDE && f1 == f2 {
        return;
    }
    let x_at = |y: i64| x1 + mul_div(y - y1, x2 - x1, y2 - y1);
    let edge = |f: u8| if f & BOTTOM != 0 { b.y1 } else { b.y2 };
    let (mut ax, mut ay, mut bx, mut by) = (x1, y1, x2, y2);
    if f1 != INSIDE {
        ay = edge(f1);
        ax = x_at(ay);
    }
    if f2 != INSIDE {
        by = edge(f2);
        bx = x_at(by);
    }
    ras.line(ax, ay, bx, by);
}

impl Clip {
    /// Create new Clipping region
    pub fn new() -> Self {
        Self {x1: 0, y1: 0,
              clip_box: None,
              clip_flag: INSIDE }
    }
    /// Draw a line from the current point to (x2,y2) into a RasterizerCell
    ///
    /// (x2,y2) becomes the current point
    pub fn line_to(&mut self, ras: &mut RasterizerCell, x2: i64, y2: i64) {
        let (x1, y1, f1) = (self.x1, self.y1, self.clip_flag);
        self.x1 = x2;
        self.y1 = y2;
        let b = match self.clip_box {
            None => {
                ras.line(x1, y1, x2, y2);
                return;
            },
            Some(b) => b,
        };
        let f2 = b.clip_flags(x2, y2);
        self.clip_flag = f2;
        // Both points above or below clip box
        let fy1 = f1 & (TOP|BOTTOM);
        if fy1 != INSIDE && fy1 == f2 & (TOP|BOTTOM) {
            return;
        }
        // Split where the line crosses the left and right edges, in order
        let mut pts = vec![(x1, y1)];
        let crossed = |e: i64, out: fn(i64, i64) -> bool| out(x1, e) != out(x2, e);
        let mut edges = vec![];
        if crossed(b.x1, |x: i64, e: i64| x < e) {
            edges.push(b.x1);
        }
        if crossed(b.x2, |x: i64, e: i64| x > e) {
            edges.push(b.x2);
        }
        if x2 < x1 {
            edges.reverse();
        }
        for e in edges {
            pts.push((e, y1 + mul_div(e - x1, y2 - y1, x2 - x1)));
        }
        pts.push((x2, y2));
        // Parts beside the box run along its edge
        let project = |(x, y): (i64, i64)| (x.max(b.x1).min(b.x2), y);
        for w in pts.windows(2) {
            line_clip_y(ras, &b, project(w[0]), project(w[1]));
        }
    }
    /// Move to point (x2,y2)
    ///
    /// Point is saved internally as (x1,y1)
    pub fn move_to(&mut self, x2: i64, y2: i64) {
        self.x1 = x2;
        self.y1 = y2;
        if let Some(ref b) = self.clip_box {
            self.clip_flag = b.clip_flags(x2, y2);
        }
    }
    /// Define the clipping region
    pub fn clip_box(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
        self.clip_box = Some( Rectangle::new(x1, y1, x2, y2) );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_sorts_corners() {
        let r = Rectangle::new(10, 20, 0, 5);
        assert_eq!(r, Rectangle { x1: 0, y1: 5, x2: 10, y2: 20 });
        assert_eq!(r.clip_flags(-1, 6), LEFT);
        assert_eq!(r.clip_flags(11, 21), RIGHT | TOP);
        assert_eq!(r.clip_flags(5, 5), INSIDE);
    }
    #[test]
    fn line_outside_in_y_adds_no_cells() {
        let mut ras = RasterizerCell::new();
        let mut clip = Clip::new();
        clip.clip_box(0, 0, 256 * 10, 256 * 10);
        clip.move_to(0, -512);
        clip.line_to(&mut ras, 256 * 5, -256);
        ras.sort_cells();
        assert_eq!(ras.total_cells(), 0);
    }
    #[test]
    fn line_left_of_box_keeps_cover() {
        let mut ras = RasterizerCell::new();
        let mut clip = Clip::new();
        clip.clip_box(0, 0, 256 * 10, 256 * 10);
        clip.move_to(-256 * 5, 0);
        clip.line_to(&mut ras, -256 * 5, 256 * 2);
        ras.sort_cells();
        let cover : i64 = ras.cells().iter().map(|c| c.cover).sum();
        assert_eq!(cover, 512);
        assert!(ras.cells().iter().all(|c| c.x == 0));
    }
    #[test]
    fn diagonal_through_box_is_split_at_edges() {
        let mut ras = RasterizerCell::new();
        let mut clip = Clip::new();
        let s = 256;
        clip.clip_box(0, 0, 10 * s, 10 * s);
        clip.move_to(-5 * s, 0);
        clip.line_to(&mut ras, 15 * s, 10 * s);
        ras.sort_cells();
        let cover : i64 = ras.cells().iter().map(|c| c.cover).sum();
        assert_eq!(cover, 10 * s);
        // Left part runs down the left edge, right part down the right edge
        assert!(ras.cells().iter().any(|c| c.x == 0 && c.y == 0));
        assert!(ras.cells().iter().any(|c| c.x == 10 && c.y == 9));
        assert!(ras.cells().iter().all(|c| c.x >= 0 && c.x <= 10));
    }
}
