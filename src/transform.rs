//! Transformations

use crate::paths::Vertex;
use crate::VertexSource;

use std::ops::Mul;

/// Affine Transformation
#[derive(Debug,Copy,Clone,PartialEq)]
pub struct Transform {
    pub sx: f64,
    pub sy: f64,
    pub shx: f64,
    pub shy: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

impl Transform {
    /// Creates a new, identity, Transform
    pub fn new() -> Self {
        Self { sx: 1.0,  sy: 1.0,
               shx: 0.0, shy: 0.0,
               tx: 0.0,  ty: 0.0,
        }
    }
    /// Add a translation to the transform
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }
    /// Add a scaling to the transform
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.sx  *= sx;
        self.shx *= sx;
        self.tx  *= sx;
        self.sy  *= sy;
        self.shy *= sy;
        self.ty  *= sy;
    }
    /// Perform the transform
    pub fn transform(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.sx  + y * self.shx + self.tx,
         x * self.shy + y * self.sy  + self.ty)
    }
    /// Apply `self` then `m`
    pub fn mul_transform(&self, m: &Transform) -> Self {
        let t0  = self.sx  * m.sx  + self.shy * m.shx;
        let t2  = self.shx * m.sx  + self.sy  * m.shx;
        let t4  = self.tx  * m.sx  + self.ty  * m.shx + m.tx;
        let shy = self.sx  * m.shy + self.shy * m.sy;
        let sy  = self.shx * m.shy + self.sy  * m.sy;
        let ty  = self.tx  * m.shy + self.ty  * m.sy + m.ty;
        Transform { sx: t0, sy, tx: t4, ty, shx: t2, shy }
    }
    /// Scaling only Transform
    pub fn new_scale(sx: f64, sy: f64) -> Transform {
        let mut t = Self::new();
        t.scale(sx,sy);
        t
    }
    /// Translation only Transform
    pub fn new_translate(tx: f64, ty: f64) -> Transform {
        let mut t = Self::new();
        t.translate(tx,ty);
        t
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;
    fn mul(self, rhs: Transform) -> Self {
        self.mul_transform(&rhs)
    }
}

/// Path Transform
#[derive(Debug)]
pub struct ConvTransform<'a, T: VertexSource> {
    /// Source Path to Transform
    pub source: &'a T,
    /// Transform to apply
    pub trans: Transform,
}

impl<'a, T: VertexSource> VertexSource for ConvTransform<'a, T> {
    /// Apply the Transform
    fn xconvert(&self) -> Vec<Vertex<f64>> {
        self.transform()
    }
}

impl<'a, T: VertexSource> ConvTransform<'a, T> {
    /// Create a new Path Transform
    pub fn new(source: &'a T, trans: Transform) -> Self {
        Self { source, trans }
    }
    /// Transform the Path
    pub fn transform(&self) -> Vec<Vertex<f64>> {
        self.source.xconvert().into_iter()
            .map(|v| {
                let (x,y) = self.trans.transform(v.x, v.y);
                Vertex::new(x, y, v.cmd)
            })
            .collect()
    }
}
