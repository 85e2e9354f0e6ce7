//! Cubic Bezier frames: evaluation, flatness and subdivision.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The four control points of one cubic Bezier segment in 3D.
///
/// `start` and `end` lie on the curve, `ctrl1` and `ctrl2` shape it. The
/// flattener consumes frames by value, so every subdivision step owns its
/// control points outright.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use pathflat::CubicFrame;
///
/// let frame = CubicFrame::new(
///     Vec3::ZERO,
///     Vec3::new(0.0, 1.0, 0.0),
///     Vec3::new(1.0, 1.0, 0.0),
///     Vec3::new(1.0, 0.0, 0.0),
/// );
///
/// let (left, right) = frame.split(0.5);
/// assert_eq!(left.end, right.start);
/// assert!(frame.flatness() > left.flatness());
/// ```
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CubicFrame {
    /// On-curve start point.
    pub start: Vec3,
    /// First control point.
    pub ctrl1: Vec3,
    /// Second control point.
    pub ctrl2: Vec3,
    /// On-curve end point.
    pub end: Vec3,
}

impl CubicFrame {
    /// Create a frame from its four control points.
    #[inline]
    pub const fn new(start: Vec3, ctrl1: Vec3, ctrl2: Vec3, end: Vec3) -> Self {
        Self {
            start,
            ctrl1,
            ctrl2,
            end,
        }
    }

    /// Create a frame that traces the straight line `start → end`.
    ///
    /// Control points sit at the thirds so the parameterisation is uniform.
    pub fn line(start: Vec3, end: Vec3) -> Self {
        Self {
            start,
            ctrl1: start.lerp(end, 1.0 / 3.0),
            ctrl2: start.lerp(end, 2.0 / 3.0),
            end,
        }
    }

    /// Evaluate the curve at parameter t.
    ///
    /// Uses the formula: B(t) = (1-t)³P₀ + 3(1-t)²tP₁ + 3(1-t)t²P₂ + t³P₃
    ///
    /// `t` is clamped to `[0,1]`.
    #[inline]
    pub fn evaluate(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        let t2 = t * t;
        let t3 = t2 * t;
        let mt = 1.0 - t;
        let mt2 = mt * mt;
        let mt3 = mt2 * mt;

        self.start * mt3 + self.ctrl1 * (3.0 * mt2 * t) + self.ctrl2 * (3.0 * mt * t2) + self.end * t3
    }

    /// Maximum distance of the two control points from the chord.
    ///
    /// The distance is measured to the chord *segment*, not the infinite
    /// line through it, so control points that overshoot an endpoint still
    /// count as deviation. A frame whose four points coincide has flatness 0.
    pub fn flatness(&self) -> f32 {
        let d1 = point_segment_distance_squared(self.ctrl1, self.start, self.end);
        let d2 = point_segment_distance_squared(self.ctrl2, self.start, self.end);
        d1.max(d2).sqrt()
    }

    /// Straight-line distance between the on-curve endpoints.
    #[inline]
    pub fn chord_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Length of the control polygon `start → ctrl1 → ctrl2 → end`.
    ///
    /// Always an upper bound on the arc length of the curve.
    pub fn control_polygon_length(&self) -> f32 {
        self.start.distance(self.ctrl1) + self.ctrl1.distance(self.ctrl2) + self.ctrl2.distance(self.end)
    }

    /// Split the curve at parameter t with de Casteljau's construction.
    ///
    /// Returns `(left, right)` where `left` covers `[0, t]` and `right`
    /// covers `[t, 1]`. Both halves share the on-curve split point.
    pub fn split(&self, t: f32) -> (Self, Self) {
        let p01 = self.start.lerp(self.ctrl1, t);
        let p12 = self.ctrl1.lerp(self.ctrl2, t);
        let p23 = self.ctrl2.lerp(self.end, t);
        let p012 = p01.lerp(p12, t);
        let p123 = p12.lerp(p23, t);
        let mid = p012.lerp(p123, t);

        (
            Self::new(self.start, p01, p012, mid),
            Self::new(mid, p123, p23, self.end),
        )
    }

    /// Reverse the direction of travel.
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.ctrl2, self.ctrl1, self.start)
    }
}

/// Squared distance from `point` to the segment `a → b`.
///
/// The projection of `point` onto the line through `a` and `b` is clamped to
/// the segment, so points beyond either end measure to that endpoint. A
/// zero-length segment measures to `a`.
pub fn point_segment_distance_squared(point: Vec3, a: Vec3, b: Vec3) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= 0.0 {
        return point.distance_squared(a);
    }

    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    point.distance_squared(a + ab * t)
}
