//! Paths, Vertices and Curves

use crate::VertexSource;

/// Path Command
#[derive(Debug,Copy,Clone,PartialEq)]
pub enum PathCommand {
    Stop,
    MoveTo,
    LineTo,
    Close,
}
impl Default for PathCommand {
    fn default() -> PathCommand {
        PathCommand::MoveTo
    }
}

/// Path Vertex
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex<T> {
    pub x: T,
    pub y: T,
    pub cmd: PathCommand
}

impl<T> Vertex<T> {
    /// Create a new Vertex
    pub fn new(x: T, y: T, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    /// Create a new Vertex with a MoveTo command
    pub fn move_to(x: T, y:T) -> Self {
        Self { x, y, cmd: PathCommand::MoveTo }
    }
    /// Create a new Vertex with a LineTo command
    pub fn line_to(x: T, y:T) -> Self {
        Self { x, y, cmd: PathCommand::LineTo }
    }
    /// Create a new Vertex with a Close command
    pub fn close_polygon(x: T, y: T) -> Self {
        Self { x, y, cmd: PathCommand::Close }
    }
}

/// Distance between two vertices
pub fn len(a: &Vertex<f64>, b: &Vertex<f64>) -> f64 {
    ((a.x-b.x).powi(2) + (a.y-b.y).powi(2)).sqrt()
}

/// Split a list of vertices into (start,end) index pairs, one per sub-path
///
/// Each sub-path begins with a MoveTo
pub fn split(v: &[Vertex<f64>]) -> Vec<(usize, usize)> {
    let mut pairs = vec![];
    let mut start = None;
    for (i, vi) in v.iter().enumerate() {
        match vi.cmd {
            PathCommand::MoveTo => {
                if let Some(s) = start {
                    pairs.push((s, i - 1));
                }
                start = Some(i);
            },
            PathCommand::Stop => {
                if let Some(s) = start.take() {
                    pairs.push((s, i - 1));
                }
            },
            PathCommand::LineTo | PathCommand::Close => {},
        }
    }
    if let Some(s) = start {
        pairs.push((s, v.len() - 1));
    }
    pairs
}

/// Minimum number of line segments a curve is split into
const CURVE_MIN_STEPS: usize = 4;
/// Maximum number of line segments a curve is split into
const CURVE_MAX_STEPS: usize = 1024;

/// Path of Vertices
///
///     use tilecanvas::{Path, VertexSource};
///
///     let mut path = Path::new();
///     path.move_to(0.0, 0.0);
///     path.curve3(50.0, 100.0, 100.0, 0.0);
///     let v = path.xconvert();
///     assert_eq!(v[0].x, 0.0);
///     assert_eq!(v[v.len()-1].x, 100.0);
///
#[derive(Debug,Clone)]
pub struct Path {
    pub vertices: Vec<Vertex<f64>>,
    /// Scale used to decide how finely curves are flattened
    pub approx_scale: f64,
}

impl Default for Path {
    fn default() -> Self {
        Self::new()
    }
}

impl VertexSource for Path {
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        self.vertices.clone()
    }
}

impl Path {
    /// Create a new, empty Path
    pub fn new() -> Self {
        Self { vertices: vec![], approx_scale: 1.0 }
    }
    /// Number of vertices
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    /// Path has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Last vertex of the path
    pub fn last_vertex(&self) -> Option<Vertex<f64>> {
        self.vertices.last().copied()
    }
    /// Set the curve approximation scale
    ///
    /// Larger values produce more segments per curve
    pub fn approximation_scale(&mut self, scale: f64) {
        self.approx_scale = scale;
    }
    /// Start a new sub-path at (x,y)
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.vertices.push( Vertex::move_to(x,y) );
    }
    /// Add a line to (x,y)
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.vertices.push( Vertex::line_to(x,y) );
    }
    /// Add a Quadratic Bezier curve from the last point through control point
    ///   (`xc`,`yc`) ending at (`x`,`y`)
    ///
    /// The curve is flattened into line segments. With no previous point the
    ///   curve starts at the control point
    pub fn curve3(&mut self, xc: f64, yc: f64, x: f64, y: f64) {
        let (x0, y0) = match self.last_vertex() {
            Some(v) => (v.x, v.y),
            None => {
                self.move_to(xc, yc);
                (xc, yc)
            }
        };
        for (px, py) in curve3_points(x0, y0, xc, yc, x, y, self.approx_scale) {
            self.line_to(px, py);
        }
    }
    /// Close the current polygon
    pub fn close_polygon(&mut self) {
        if let Some(last) = self.last_vertex() {
            if last.cmd == PathCommand::LineTo {
                self.vertices.push( Vertex::close_polygon(last.x, last.y) );
            }
        }
    }
}

/// Flatten a Quadratic Bezier curve by forward differencing
///
/// Returns the points after (x1,y1), the last point is (x3,y3) exactly
///
/// The number of steps follows the length of the control polygon, as in
///   agg::curve3_inc, and is capped for very long or non-finite curves
pub fn curve3_points(x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64,
                     approx_scale: f64) -> Vec<(f64, f64)> {
    let dx1 = x2 - x1;
    let dy1 = y2 - y1;
    let dx2 = x3 - x2;
    let dy2 = y3 - y2;
    let len = (dx1*dx1 + dy1*dy1).sqrt() + (dx2*dx2 + dy2*dy2).sqrt();
    let steps = ((len * 0.25 * approx_scale).round() as usize)
        .max(CURVE_MIN_STEPS)
        .min(CURVE_MAX_STEPS);

    let subdivide_step  = 1.0 / steps as f64;
    let subdivide_step2 = subdivide_step * subdivide_step;

    let tmpx = (x1 - x2 * 2.0 + x3) * subdivide_step2;
    let tmpy = (y1 - y2 * 2.0 + y3) * subdivide_step2;

    let mut fx  = x1;
    let mut fy  = y1;
    let mut dfx = tmpx + (x2 - x1) * (2.0 * subdivide_step);
    let mut dfy = tmpy + (y2 - y1) * (2.0 * subdivide_step);
    let ddfx = tmpx * 2.0;
    let ddfy = tmpy * 2.0;

    let mut out = Vec::with_capacity(steps);
    for _ in 1 .. steps {
        fx  += dfx;
        fy  += dfy;
        dfx += ddfx;
        dfy += ddfy;
        out.push((fx, fy));
    }
    out.push((x3, y3));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn curve_ends_on_end_point() {
        let pts = curve3_points(0.0, 0.0, 10.0, 20.0, 20.0, 0.0, 1.0);
        assert!(pts.len() >= CURVE_MIN_STEPS);
        assert_eq!(*pts.last().unwrap(), (20.0, 0.0));
    }
    #[test]
    fn collinear_curve_stays_on_line() {
        let pts = curve3_points(390.0, 50.0, 410.0, 50.0, 430.0, 50.0, 1.0);
        for (x, y) in pts {
            assert!((y - 50.0).abs() < 1e-9);
            assert!(x > 390.0 && x <= 430.0 + 1e-9);
        }
    }
    #[test]
    fn huge_curve_step_count_is_capped() {
        let pts = curve3_points(0.0, 0.0, 1e18, 1e18, 2e18, 0.0, 1.0);
        assert_eq!(pts.len(), CURVE_MAX_STEPS);
        assert_eq!(*pts.last().unwrap(), (2e18, 0.0));
        let pts = curve3_points(0.0, 0.0, f64::INFINITY, 0.0, 1.0, 0.0, 1.0);
        assert!(pts.len() <= CURVE_MAX_STEPS);
        let pts = curve3_points(0.0, 0.0, f64::NAN, 0.0, 1.0, 0.0, 1.0);
        assert_eq!(pts.len(), CURVE_MIN_STEPS);
    }
    #[test]
    fn split_sub_paths() {
        let mut p = Path::new();
        p.move_to(0.0, 0.0);
        p.line_to(1.0, 0.0);
        p.move_to(5.0, 5.0);
        p.line_to(6.0, 5.0);
        p.line_to(6.0, 6.0);
        assert_eq!(split(&p.vertices), vec![(0, 1), (2, 4)]);
    }
}
