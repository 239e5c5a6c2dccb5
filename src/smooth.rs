//! Midpoint stroke smoothing
//!
//! Raw pointer positions become quadratic segments joining the midpoints of
//!   consecutive positions, each raw position acting as the control point.
//!   The drawn curve always stops at the last midpoint, one step behind the
//!   pointer, and consecutive segments meet with a common tangent
//!
//!     use tilecanvas::{StrokeSmoother, WorldPoint, Rgba8};
//!
//!     let mut s = StrokeSmoother::new();
//!     s.begin(WorldPoint::new(0.0, 0.0), Rgba8::black(), 2.0);
//!     let a = s.extend(WorldPoint::new(10.0, 0.0)).unwrap();
//!     assert_eq!(a.current_midpoint, WorldPoint::new(5.0, 0.0));
//!     let b = s.extend(WorldPoint::new(20.0, 10.0)).unwrap();
//!     assert_eq!(b.previous_midpoint, a.current_midpoint);
//!     assert_eq!(b.control_point, WorldPoint::new(10.0, 0.0));
//!

use crate::color::Rgba8;
use crate::coords::WorldPoint;
use crate::draw::StrokeSegment;

#[derive(Debug, Clone, Copy)]
struct Active {
    color: Rgba8,
    width: f64,
    /// Last raw point
    last: WorldPoint,
    /// End of the last emitted segment
    mid: WorldPoint,
    /// Raw points after the first
    moved: usize,
}

/// Turns raw points of a stroke into segments
#[derive(Debug, Default, Clone)]
pub struct StrokeSmoother {
    active: Option<Active>,
}

impl StrokeSmoother {
    pub fn new() -> Self {
        Self { active: None }
    }
    /// A stroke is in progress
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
    /// Start a stroke at `p`, replacing any stroke in progress
    pub fn begin(&mut self, p: WorldPoint, color: Rgba8, width: f64) {
        self.active = Some(Active { color, width, last: p, mid: p, moved: 0 });
    }
    /// Add a raw point, returning the segment to draw
    ///
    /// `None` without an active stroke or when `p` repeats the last point
    pub fn extend(&mut self, p: WorldPoint) -> Option<StrokeSegment> {
        let a = self.active.as_mut()?;
        if p == a.last {
            return None;
        }
        let mid = a.last.midpoint(&p);
        let seg = StrokeSegment {
            previous_midpoint: a.mid,
            control_point: a.last,
            current_midpoint: mid,
            color: a.color,
            width: a.width,
        };
        a.last = p;
        a.mid = mid;
        a.moved += 1;
        Some(seg)
    }
    /// Dot at the start of a stroke without motion
    ///
    /// `None` once the pointer has moved or without an active stroke
    pub fn dot(&self) -> Option<StrokeSegment> {
        match self.active {
            Some(a) if a.moved == 0 => Some(StrokeSegment::dot(a.last, a.color, a.width)),
            _ => None,
        }
    }
    /// Finish the stroke
    pub fn end(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_segments_without_stroke() {
        let mut s = StrokeSmoother::new();
        assert!(s.extend(WorldPoint::new(1.0, 1.0)).is_none());
        assert!(s.dot().is_none());
    }
    #[test]
    fn dot_only_before_motion() {
        let mut s = StrokeSmoother::new();
        s.begin(WorldPoint::new(3.0, 4.0), Rgba8::black(), 5.0);
        let d = s.dot().unwrap();
        assert_eq!(d.key_points(), [WorldPoint::new(3.0, 4.0); 3]);
        assert!(s.extend(WorldPoint::new(3.0, 4.0)).is_none());
        s.extend(WorldPoint::new(5.0, 4.0));
        assert!(s.dot().is_none());
        s.end();
        assert!(!s.is_active());
    }
}
