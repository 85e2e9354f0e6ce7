//! Path segments and the cursor the flattener walks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::bezier::CubicFrame;

/// One step of a path as seen by the flattener.
///
/// Every step advances the segment index by one, including skips, so the
/// parameter of a drawn segment is its position in the step sequence.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Segment {
    /// Straight segment between two points.
    Linear {
        /// Start point.
        start: Vec3,
        /// End point.
        end: Vec3,
    },

    /// Cubic Bezier segment.
    Cubic(CubicFrame),

    /// A move without a drawn segment.
    ///
    /// Produces no mapping and leaves a gap in the parameter range.
    Skip,
}

impl Segment {
    /// Whether this step draws anything.
    #[inline]
    pub fn is_drawn(&self) -> bool {
        !matches!(self, Segment::Skip)
    }

    /// Start and end point of a drawn segment.
    pub fn endpoints(&self) -> Option<(Vec3, Vec3)> {
        match self {
            Segment::Linear { start, end } => Some((*start, *end)),
            Segment::Cubic(frame) => Some((frame.start, frame.end)),
            Segment::Skip => None,
        }
    }
}

/// Forward-only cursor over the steps of a path.
///
/// The flattener reads the step under the cursor with [`current`], acts on
/// it, then calls [`advance`]. A cursor is exhausted once `current` returns
/// `None`.
///
/// [`current`]: PathCursor::current
/// [`advance`]: PathCursor::advance
pub trait PathCursor {
    /// The step under the cursor, or `None` once the path is exhausted.
    fn current(&self) -> Option<Segment>;

    /// Move to the next step.
    fn advance(&mut self);
}

impl<C: PathCursor + ?Sized> PathCursor for &mut C {
    fn current(&self) -> Option<Segment> {
        (**self).current()
    }

    fn advance(&mut self) {
        (**self).advance();
    }
}

/// Cursor over a slice of segments.
#[derive(Clone, Debug)]
pub struct SegmentCursor<'a> {
    segments: &'a [Segment],
    position: usize,
}

impl<'a> SegmentCursor<'a> {
    /// Create a cursor positioned on the first segment.
    pub fn new(segments: &'a [Segment]) -> Self {
        Self {
            segments,
            position: 0,
        }
    }

    /// Number of steps not yet consumed.
    pub fn remaining(&self) -> usize {
        self.segments.len().saturating_sub(self.position)
    }
}

impl PathCursor for SegmentCursor<'_> {
    fn current(&self) -> Option<Segment> {
        self.segments.get(self.position).copied()
    }

    fn advance(&mut self) {
        if self.position < self.segments.len() {
            self.position += 1;
        }
    }
}

/// Minimal in-memory path: an ordered list of segments.
///
/// This is the smallest thing that can drive a [`PathFlattener`]. A
/// `move_to` records a [`Segment::Skip`], so a path that starts with
/// `move_to` numbers its first drawn segment 1 and that segment spans
/// parameters `[0, 1]`.
///
/// [`PathFlattener`]: crate::PathFlattener
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use pathflat::{Segment, SegmentPath};
///
/// let path = SegmentPath::new()
///     .move_to(Vec3::ZERO)
///     .line_to(Vec3::X)
///     .cubic_to(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 0.5, 0.0), Vec3::new(2.0, 1.0, 0.0));
///
/// assert_eq!(path.segments().len(), 3);
/// assert_eq!(path.segments()[0], Segment::Skip);
/// assert_eq!(path.current_point(), Vec3::new(2.0, 1.0, 0.0));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SegmentPath {
    segments: Vec<Segment>,
    current: Vec3,
}

impl SegmentPath {
    /// Create an empty path positioned at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a path directly from a list of steps.
    ///
    /// The current point becomes the end of the last drawn segment.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let current = segments
            .iter()
            .rev()
            .find_map(Segment::endpoints)
            .map_or(Vec3::ZERO, |(_, end)| end);
        Self { segments, current }
    }

    /// Move to a point without drawing.
    pub fn move_to(mut self, to: Vec3) -> Self {
        self.segments.push(Segment::Skip);
        self.current = to;
        self
    }

    /// Draw a straight line to a point.
    pub fn line_to(mut self, to: Vec3) -> Self {
        self.segments.push(Segment::Linear {
            start: self.current,
            end: to,
        });
        self.current = to;
        self
    }

    /// Draw a cubic Bezier curve to a point.
    pub fn cubic_to(mut self, ctrl1: Vec3, ctrl2: Vec3, to: Vec3) -> Self {
        self.segments
            .push(Segment::Cubic(CubicFrame::new(self.current, ctrl1, ctrl2, to)));
        self.current = to;
        self
    }

    /// Append an arbitrary step.
    pub fn push(&mut self, segment: Segment) {
        if let Some((_, end)) = segment.endpoints() {
            self.current = end;
        }
        self.segments.push(segment);
    }

    /// The steps recorded so far.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Where the next drawn segment will start.
    pub fn current_point(&self) -> Vec3 {
        self.current
    }

    /// A cursor over the recorded steps.
    pub fn cursor(&self) -> SegmentCursor<'_> {
        SegmentCursor::new(&self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_records_skip_for_move() {
        let path = SegmentPath::new()
            .move_to(Vec3::new(1.0, 2.0, 3.0))
            .line_to(Vec3::new(4.0, 2.0, 3.0));

        assert_eq!(
            path.segments(),
            &[
                Segment::Skip,
                Segment::Linear {
                    start: Vec3::new(1.0, 2.0, 3.0),
                    end: Vec3::new(4.0, 2.0, 3.0),
                }
            ]
        );
    }

    #[test]
    fn test_builder_chains_cubic_from_current_point() {
        let path = SegmentPath::new()
            .move_to(Vec3::X)
            .cubic_to(Vec3::Y, Vec3::Z, Vec3::ONE);

        match path.segments().get(1) {
            Some(Segment::Cubic(frame)) => {
                assert_eq!(frame.start, Vec3::X);
                assert_eq!(frame.end, Vec3::ONE);
            }
            other => panic!("expected cubic segment, got {other:?}"),
        }
        assert_eq!(path.current_point(), Vec3::ONE);
    }

    #[test]
    fn test_cursor_walks_and_exhausts() {
        let path = SegmentPath::new().move_to(Vec3::ZERO).line_to(Vec3::X);
        let mut cursor = path.cursor();

        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.current(), Some(Segment::Skip));
        cursor.advance();
        assert!(matches!(cursor.current(), Some(Segment::Linear { .. })));
        cursor.advance();
        assert_eq!(cursor.current(), None);
        assert_eq!(cursor.remaining(), 0);

        // Advancing past the end stays exhausted.
        cursor.advance();
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_cursor_by_mutable_reference() {
        let path = SegmentPath::new().line_to(Vec3::X);
        let mut cursor = path.cursor();
        {
            let by_ref = &mut cursor;
            assert!(by_ref.current().is_some());
            by_ref.advance();
        }
        assert_eq!(cursor.current(), None);
    }

    #[test]
    fn test_from_segments_tracks_last_endpoint() {
        let path = SegmentPath::from_segments(vec![
            Segment::Linear {
                start: Vec3::ZERO,
                end: Vec3::X,
            },
            Segment::Skip,
        ]);
        assert_eq!(path.current_point(), Vec3::X);
    }

    #[test]
    fn test_segment_endpoints() {
        assert_eq!(Segment::Skip.endpoints(), None);
        assert!(!Segment::Skip.is_drawn());

        let cubic = Segment::Cubic(CubicFrame::line(Vec3::ZERO, Vec3::Y));
        assert_eq!(cubic.endpoints(), Some((Vec3::ZERO, Vec3::Y)));
        assert!(cubic.is_drawn());
    }

    #[test]
    fn test_push_updates_current_point() {
        let mut path = SegmentPath::new();
        path.push(Segment::Linear {
            start: Vec3::ZERO,
            end: Vec3::Z,
        });
        path.push(Segment::Skip);
        assert_eq!(path.current_point(), Vec3::Z);
        assert_eq!(path.segments().len(), 2);
    }
}
