//! Ready-made paths covering the shapes the flattener has to handle.

use glam::Vec3;
use pathflat::{CubicFrame, Segment, SegmentPath};

/// Control-point offset that makes a cubic approximate a quarter circle.
pub const QUARTER_CIRCLE_K: f32 = 0.552_284_8;

/// A named path with the tolerance it is usually flattened at.
#[derive(Debug, Clone)]
pub struct PathFixture {
    pub name: &'static str,
    pub path: SegmentPath,
    pub tolerance: f32,
}

impl PathFixture {
    fn new(name: &'static str, path: SegmentPath, tolerance: f32) -> Self {
        Self {
            name,
            path,
            tolerance,
        }
    }
}

/// `(0,0,0) → (1,0,0)`.
pub fn unit_line() -> SegmentPath {
    SegmentPath::new().move_to(Vec3::ZERO).line_to(Vec3::X)
}

/// `(0,0,0) → (3,4,0)`, length 5.
pub fn three_four_five() -> SegmentPath {
    SegmentPath::new()
        .move_to(Vec3::ZERO)
        .line_to(Vec3::new(3.0, 4.0, 0.0))
}

/// Cubic rising one unit above its unit chord.
pub fn arch_frame() -> CubicFrame {
    CubicFrame::new(
        Vec3::ZERO,
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    )
}

/// [`arch_frame`] as a path.
pub fn arch() -> SegmentPath {
    SegmentPath::from_segments(vec![Segment::Skip, Segment::Cubic(arch_frame())])
}

/// Unit quarter circle from `(1,0,0)` to `(0,1,0)`.
pub fn quarter_circle() -> SegmentPath {
    SegmentPath::new().move_to(Vec3::X).cubic_to(
        Vec3::new(1.0, QUARTER_CIRCLE_K, 0.0),
        Vec3::new(QUARTER_CIRCLE_K, 1.0, 0.0),
        Vec3::Y,
    )
}

/// Full unit circle in the xy plane as four cubics.
pub fn circle() -> SegmentPath {
    let k = QUARTER_CIRCLE_K;
    SegmentPath::new()
        .move_to(Vec3::X)
        .cubic_to(Vec3::new(1.0, k, 0.0), Vec3::new(k, 1.0, 0.0), Vec3::Y)
        .cubic_to(Vec3::new(-k, 1.0, 0.0), Vec3::new(-1.0, k, 0.0), Vec3::NEG_X)
        .cubic_to(Vec3::new(-1.0, -k, 0.0), Vec3::new(-k, -1.0, 0.0), Vec3::NEG_Y)
        .cubic_to(Vec3::new(k, -1.0, 0.0), Vec3::new(1.0, -k, 0.0), Vec3::X)
}

/// Cubic whose control points lie on the chord.
pub fn collinear_cubic() -> SegmentPath {
    SegmentPath::new().move_to(Vec3::ZERO).cubic_to(
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(2.0, 2.0, 2.0),
        Vec3::new(3.0, 3.0, 3.0),
    )
}

/// Cubic whose four points coincide.
pub fn degenerate_cubic() -> SegmentPath {
    let p = Vec3::new(1.0, 2.0, 3.0);
    SegmentPath::new().move_to(p).cubic_to(p, p, p)
}

/// Cubic with crossed control points, tracing a small loop.
pub fn looped_cubic() -> SegmentPath {
    SegmentPath::new().move_to(Vec3::ZERO).cubic_to(
        Vec3::new(3.0, 2.0, 0.0),
        Vec3::new(-2.0, 2.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
    )
}

/// Helix-like cubic that leaves the xy plane.
pub fn spatial_cubic() -> SegmentPath {
    SegmentPath::new().move_to(Vec3::ZERO).cubic_to(
        Vec3::new(1.0, 0.0, 0.5),
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(0.0, 1.0, 1.5),
    )
}

/// Only moves, nothing drawn.
pub fn all_skips() -> SegmentPath {
    SegmentPath::new()
        .move_to(Vec3::ZERO)
        .move_to(Vec3::X)
        .move_to(Vec3::Y)
}

/// Lines and a cubic broken up by moves, with one zero-length line.
pub fn mixed_with_gaps() -> SegmentPath {
    SegmentPath::new()
        .move_to(Vec3::ZERO)
        .line_to(Vec3::new(1.0, 0.0, 0.0))
        .line_to(Vec3::new(1.0, 0.0, 0.0))
        .move_to(Vec3::new(2.0, 0.0, 0.0))
        .cubic_to(
            Vec3::new(2.0, 1.0, 0.0),
            Vec3::new(3.0, 1.0, 0.0),
            Vec3::new(3.0, 0.0, 0.0),
        )
        .line_to(Vec3::new(5.0, 0.0, 0.0))
}

/// Every fixture with a sensible tolerance.
pub fn all_fixtures() -> Vec<PathFixture> {
    vec![
        PathFixture::new("unit_line", unit_line(), 0.01),
        PathFixture::new("three_four_five", three_four_five(), 0.01),
        PathFixture::new("arch", arch(), 0.01),
        PathFixture::new("quarter_circle", quarter_circle(), 0.001),
        PathFixture::new("circle", circle(), 0.001),
        PathFixture::new("collinear_cubic", collinear_cubic(), 0.001),
        PathFixture::new("degenerate_cubic", degenerate_cubic(), 0.0),
        PathFixture::new("looped_cubic", looped_cubic(), 0.01),
        PathFixture::new("spatial_cubic", spatial_cubic(), 0.005),
        PathFixture::new("all_skips", all_skips(), 0.01),
        PathFixture::new("mixed_with_gaps", mixed_with_gaps(), 0.01),
    ]
}
