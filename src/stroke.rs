//! Path Stroking
//!
//! A centre line becomes one closed outline per sub-path with round caps and
//!   round joins. The outline runs along the left offset of the line, around
//!   the end, back along the other side and around the start. On the outside
//!   of a turn the offsets are joined by an arc, on the inside they pivot
//!   through the corner; the overlap is resolved by the non-zero fill of the
//!   rasterizer
//!
//! # Example
//!
//!     use tilecanvas::{Path, Stroke, RasterizerScanlineAA, Rasterize};
//!
//!     // Input Path
//!     let mut path = Path::new();
//!     path.move_to(  0.0,   0.0);
//!     path.curve3(100.0, 100.0, 200.0,  50.0);
//!
//!     // Stroke
//!     let mut stroke = Stroke::new( &path );
//!     stroke.width(6.0);
//!
//!     // Draw
//!     let mut ras = RasterizerScanlineAA::new();
//!     ras.add_path(&stroke);
//!

use crate::paths::PathCommand;
use crate::paths::Vertex;
use crate::paths::len;
use crate::paths::split;

use crate::VertexSource;
use std::f64::consts::PI;

/// Vertices closer than this are treated as the same point
const VERTEX_DIST_EPSILON: f64 = 1e-6;
/// Most vertices in a full circle
const ARC_MAX_STEPS: f64 = 512.0;

/// Round stroke of a Vertex Source
#[derive(Debug)]
pub struct Stroke<'a, T: VertexSource> {
    /// Source of Verticies
    source: &'a T,
    /// Half the line width, 0.5
    half: f64,
    /// Approximation scale, 1.0
    approx_scale: f64,
}

impl<'a, T> VertexSource for Stroke<'a, T> where T: VertexSource {
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        self.stroke()
    }
}

impl<'a, T> Stroke<'a, T> where T: VertexSource {
    /// Create a new Stroke of width 1.0
    pub fn new(source: &'a T) -> Self {
        Self { source, half: 0.5, approx_scale: 1.0 }
    }
    /// Set the Stroke Width, the sign is ignored
    pub fn width(&mut self, width: f64) {
        self.half = width.abs() / 2.0;
    }
    /// Set approximation scale
    ///
    /// Larger values give more vertices per arc
    pub fn approximation_scale(&mut self, scale: f64) {
        self.approx_scale = scale;
    }
    /// Angle increment for arcs of the current width
    fn arc_step(&self) -> f64 {
        let da = 2.0 * (self.half / (self.half + 0.125 / self.approx_scale)).acos();
        da.max(2.0 * PI / ARC_MAX_STEPS)
    }
    /// Arc around `c` starting at angle `start`, turning clockwise by `sweep`
    ///
    /// Both end points are included
    fn arc(&self, c: &Vertex<f64>, start: f64, sweep: f64, out: &mut Vec<Vertex<f64>>) {
        let n = (sweep / self.arc_step()) as usize;
        let da = sweep / (n + 1) as f64;
        for k in 0 ..= n + 1 {
            let a = start - da * k as f64;
            out.push(Vertex::line_to(c.x + a.cos() * self.half,
                                     c.y + a.sin() * self.half));
        }
    }
    /// Half circle around the end `b` of the segment `a` -> `b`
    fn cap(&self, a: &Vertex<f64>, b: &Vertex<f64>, out: &mut Vec<Vertex<f64>>) {
        let start = (b.y - a.y).atan2(b.x - a.x) + PI / 2.0;
        self.arc(b, start, PI, out);
    }
    /// Join of `a` -> `p` and `p` -> `b` on the left side
    fn join(&self, a: &Vertex<f64>, p: &Vertex<f64>, b: &Vertex<f64>, out: &mut Vec<Vertex<f64>>) {
        let (l1, l2) = (len(a, p), len(p, b));
        let (ux1, uy1) = ((p.x - a.x) / l1, (p.y - a.y) / l1);
        let (ux2, uy2) = ((b.x - p.x) / l2, (b.y - p.y) / l2);
        let cross = ux1 * uy2 - uy1 * ux2;
        if cross > 0.0 {
            // Inside of the turn
            out.push(Vertex::line_to(p.x - uy1 * self.half, p.y + ux1 * self.half));
            out.push(Vertex::line_to(p.x, p.y));
            out.push(Vertex::line_to(p.x - uy2 * self.half, p.y + ux2 * self.half));
        } else {
            let sweep = cross.abs().atan2(ux1 * ux2 + uy1 * uy2);
            self.arc(p, uy1.atan2(ux1) + PI / 2.0, sweep, out);
        }
    }
    /// Left side joins of `v` followed by the cap at its end
    fn side(&self, v: &[Vertex<f64>], out: &mut Vec<Vertex<f64>>) {
        for w in v.windows(3) {
            self.join(&w[0], &w[1], &w[2], out);
        }
        let n = v.len();
        self.cap(&v[n-2], &v[n-1], out);
    }
    /// Full circle around `c`
    fn dot(&self, c: &Vertex<f64>, out: &mut Vec<Vertex<f64>>) {
        let n = ((2.0 * PI / self.arc_step()).ceil() as usize).max(8);
        let da = 2.0 * PI / n as f64;
        for i in 0 .. n {
            let a = da * i as f64;
            out.push(Vertex::line_to(c.x + a.cos() * self.half, c.y + a.sin() * self.half));
        }
    }
    /// Stroke the Vertex Source
    fn stroke(&self) -> Vec<Vertex<f64>> {
        let mut all_out = vec![];
        let v0 = self.source.xconvert();
        for (m1,m2) in split(&v0) {
            let mut v = clean_path(&v0[m1..=m2]);
            let mut out = vec![];
            match v.len() {
                0 => continue,
                1 => self.dot(&v[0], &mut out),
                _ => {
                    self.side(&v, &mut out);
                    v.reverse();
                    self.side(&v, &mut out);
                }
            }
            out[0].cmd = PathCommand::MoveTo;
            if let Some(last) = out.last().copied() {
                out.push( Vertex::close_polygon(last.x, last.y) );
            }
            all_out.extend(out);
        }
        all_out
    }
}

/// Remove repeated vertices and Close markers
fn clean_path(v: &[Vertex<f64>]) -> Vec<Vertex<f64>> {
    let mut out : Vec<Vertex<f64>> = Vec::with_capacity(v.len());
    for vi in v {
        match vi.cmd {
            PathCommand::Close | PathCommand::Stop => {},
            PathCommand::MoveTo | PathCommand::LineTo => {
                let far = out.last()
                    .map(|last| len(last, vi) >= VERTEX_DIST_EPSILON)
                    .unwrap_or(true);
                if far {
                    out.push(*vi);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::Path;

    fn dist(v: &Vertex<f64>, x: f64, y: f64) -> f64 {
        ((v.x - x).powi(2) + (v.y - y).powi(2)).sqrt()
    }

    #[test]
    fn single_point_is_a_circle() {
        let mut p = Path::new();
        p.move_to(10.0, 10.0);
        p.line_to(10.0, 10.0);
        let mut s = Stroke::new(&p);
        s.width(8.0);
        let out = s.xconvert();
        assert!(out.len() > 8);
        for v in &out {
            assert!((dist(v, 10.0, 10.0) - 4.0).abs() < 1e-9);
        }
        assert_eq!(out[0].cmd, PathCommand::MoveTo);
        assert_eq!(out[out.len()-1].cmd, PathCommand::Close);
    }
    #[test]
    fn open_line_is_one_polygon() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0);
        p.line_to(20.0, 5.0);
        let mut s = Stroke::new(&p);
        s.width(2.0);
        let out = s.xconvert();
        let moves = out.iter().filter(|v| v.cmd == PathCommand::MoveTo).count();
        let closes = out.iter().filter(|v| v.cmd == PathCommand::Close).count();
        assert_eq!((moves, closes), (1, 1));
    }
    #[test]
    fn straight_outline_is_half_width_from_line() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(30.0, 0.0);
        let mut s = Stroke::new(&p);
        s.width(6.0);
        let out = s.xconvert();
        for v in &out {
            let d = if v.x < 0.0 {
                dist(v, 0.0, 0.0)
            } else if v.x > 30.0 {
                dist(v, 30.0, 0.0)
            } else {
                v.y.abs()
            };
            assert!((d - 3.0).abs() < 1e-9, "{:?}", v);
        }
        // Caps reach half the width past both ends
        let min_x = out.iter().map(|v| v.x).fold(f64::MAX, f64::min);
        let max_x = out.iter().map(|v| v.x).fold(f64::MIN, f64::max);
        assert!((min_x + 3.0).abs() < 1e-9 && (max_x - 33.0).abs() < 1e-9);
    }
    #[test]
    fn joins_arc_outside_and_pivot_inside() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0);
        p.line_to(10.0, 10.0);
        let mut s = Stroke::new(&p);
        s.width(4.0);
        let out = s.xconvert();
        // The corner itself is visited once, by the inside pivot
        assert_eq!(out.iter().filter(|v| dist(v, 10.0, 0.0) < 1e-9).count(), 1);
        // The outside arc passes between the two offset lines
        assert!(out.iter().any(|v| v.x > 10.5 && v.y < -0.5 && (dist(v, 10.0, 0.0) - 2.0).abs() < 1e-9));
    }
    #[test]
    fn reversal_wraps_around_the_end() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(10.0, 0.0);
        p.line_to(0.0, 0.0);
        let mut s = Stroke::new(&p);
        s.width(4.0);
        let out = s.xconvert();
        let max_x = out.iter().map(|v| v.x).fold(f64::MIN, f64::max);
        assert!(max_x > 11.8 && max_x < 12.0 + 1e-9, "{}", max_x);
    }
    #[test]
    fn repeated_points_are_removed() {
        let v = vec![Vertex::move_to(0.0, 0.0),
                     Vertex::line_to(0.0, 0.0),
                     Vertex::line_to(5.0, 0.0),
                     Vertex::line_to(5.0, 0.0),
                     Vertex::close_polygon(5.0, 0.0)];
        assert_eq!(clean_path(&v).len(), 2);
    }
}
