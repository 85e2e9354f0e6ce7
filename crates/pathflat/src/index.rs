//! Arc-length index over a flattened path.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::FlattenError;

/// One straight piece of a flattened path.
///
/// `param_start..param_end` is the range of the original curve parameter the
/// piece replaces, `start` and `end` are its endpoints and
/// `cumulative_distance` is the polyline length from the beginning of the
/// path up to and including this piece.
///
/// Parameters are `f64`: the integer part counts path steps, and an `f32`
/// runs out of fraction bits for deep subdivisions a few thousand steps in.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Mapping {
    /// Curve parameter at `start`.
    pub param_start: f64,
    /// Curve parameter at `end`.
    pub param_end: f64,
    /// Start point of the piece.
    pub start: Vec3,
    /// End point of the piece.
    pub end: Vec3,
    /// Polyline length from the path start to `end`.
    pub cumulative_distance: f32,
}

impl Mapping {
    /// Straight-line length of this piece.
    #[inline]
    pub fn chord_length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Width of the parameter range.
    #[inline]
    pub fn param_span(&self) -> f64 {
        self.param_end - self.param_start
    }
}

/// Ordered table of [`Mapping`]s with length and parameter lookups.
///
/// The table is built once by [`PathFlattener`](crate::PathFlattener) and
/// never changes afterwards. Both `cumulative_distance` and `param_end` are
/// non-decreasing over it, which is what the two binary searches rely on.
///
/// No query fails: an empty table answers 0, queries past the end clamp to
/// the last entry and zero-width brackets return a boundary value. The
/// `try_*` variants additionally reject non-finite arguments.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use pathflat::{PathFlattener, SegmentPath};
///
/// let path = SegmentPath::new()
///     .move_to(Vec3::ZERO)
///     .line_to(Vec3::new(2.0, 0.0, 0.0))
///     .line_to(Vec3::new(2.0, 2.0, 0.0));
///
/// let index = PathFlattener::new(path.cursor(), 0.01)?.into_index();
///
/// assert_eq!(index.length(), 4.0);
/// assert_eq!(index.length_to_dot(3.0), 1.5);
/// assert_eq!(index.dot_to_length(1.5), 3.0);
/// assert_eq!(index.length_to_position(3.0), Some(Vec3::new(2.0, 1.0, 0.0)));
/// # Ok::<(), pathflat::FlattenError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ArcLengthIndex {
    mappings: Vec<Mapping>,
}

impl ArcLengthIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            mappings: Vec::with_capacity(capacity),
        }
    }

    /// Append a straight piece, extending the cumulative distance.
    pub(crate) fn push_linear(&mut self, param_start: f64, param_end: f64, start: Vec3, end: Vec3) {
        let previous = self.length();
        self.mappings.push(Mapping {
            param_start,
            param_end,
            start,
            end,
            cumulative_distance: start.distance(end) + previous,
        });
    }

    /// The whole table in path order.
    pub fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }

    /// Iterate over the table in path order.
    pub fn iter(&self) -> std::slice::Iter<'_, Mapping> {
        self.mappings.iter()
    }

    /// Number of mappings.
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether the path produced no mappings (empty or all skips).
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Parameter range covered by the table, `None` when empty.
    pub fn param_range(&self) -> Option<(f64, f64)> {
        let first = self.mappings.first()?;
        let last = self.mappings.last()?;
        Some((first.param_start, last.param_end))
    }

    /// Total polyline length; 0 for an empty table.
    #[inline]
    pub fn length(&self) -> f32 {
        self.mappings.last().map_or(0.0, |m| m.cumulative_distance)
    }

    /// Look up `length` by cumulative distance.
    ///
    /// `Ok(i)` when entry `i` ends exactly at `length` (the first such entry
    /// if several do), otherwise `Err(i)` with `i` the first entry ending
    /// beyond `length`, which may be one past the end.
    #[expect(clippy::float_cmp, reason = "an exact hit selects param_end without interpolating")]
    fn search_distance(&self, length: f32) -> Result<usize, usize> {
        let at = self
            .mappings
            .partition_point(|m| m.cumulative_distance < length);
        match self.mappings.get(at) {
            Some(m) if m.cumulative_distance == length => Ok(at),
            _ => Err(at),
        }
    }

    /// Look up `dot` by end parameter. Same contract as `search_distance`.
    #[expect(clippy::float_cmp, reason = "an exact hit selects the stored distance")]
    fn search_param(&self, dot: f64) -> Result<usize, usize> {
        let at = self.mappings.partition_point(|m| m.param_end < dot);
        match self.mappings.get(at) {
            Some(m) if m.param_end == dot => Ok(at),
            _ => Err(at),
        }
    }

    /// Cumulative distance at the end of the entry before `index`, 0 at the
    /// start of the table.
    fn distance_before(&self, index: usize) -> f32 {
        index
            .checked_sub(1)
            .and_then(|i| self.mappings.get(i))
            .map_or(0.0, |m| m.cumulative_distance)
    }

    /// Map an arc length to a curve parameter.
    ///
    /// - `length == 0` or an empty table gives 0.
    /// - A length that lands exactly on the end of an entry gives that
    ///   entry's `param_end`.
    /// - Otherwise the parameter is interpolated linearly inside the first
    ///   entry reaching past `length`. The interpolation fraction is clamped
    ///   to `[0,1]`, so negative lengths give the first entry's
    ///   `param_start`.
    /// - Lengths beyond [`length`](Self::length) clamp to the last
    ///   `param_end`.
    /// - A zero-length bracketing entry gives its `param_end`.
    #[expect(clippy::float_cmp, reason = "zero-length brackets are detected exactly")]
    pub fn length_to_dot(&self, length: f32) -> f64 {
        if length == 0.0 {
            return 0.0;
        }
        let Some(last) = self.mappings.last() else {
            return 0.0;
        };

        let left_of = match self.search_distance(length) {
            Ok(found) => return self.mappings.get(found).map_or(0.0, |m| m.param_end),
            Err(insertion) => insertion,
        };
        let Some(bracket) = self.mappings.get(left_of) else {
            return last.param_end;
        };

        let l1 = self.distance_before(left_of);
        let l2 = bracket.cumulative_distance;
        if l1 == l2 {
            return bracket.param_end;
        }

        let x = f64::from((length - l1) / (l2 - l1)).clamp(0.0, 1.0);
        bracket.param_start * (1.0 - x) + x * bracket.param_end
    }

    /// Map a curve parameter to an arc length.
    ///
    /// - An empty table gives 0.
    /// - A parameter equal to an entry's `param_end` gives that entry's
    ///   cumulative distance.
    /// - Otherwise the length is interpolated between the cumulative distance
    ///   before the first entry ending beyond `dot` and that entry's own. The
    ///   fraction is clamped to `[0,1]`: parameters below the table, or in the
    ///   gap a skip leaves, give the distance reached before the gap.
    /// - Parameters beyond the last `param_end` clamp to
    ///   [`length`](Self::length).
    /// - A zero-width bracketing entry gives the distance before it (0 at the
    ///   start of the table).
    #[expect(clippy::float_cmp, reason = "zero-width brackets are detected exactly")]
    pub fn dot_to_length(&self, dot: f64) -> f32 {
        let Some(last) = self.mappings.last() else {
            return 0.0;
        };

        let left_of = match self.search_param(dot) {
            Ok(found) => {
                return self
                    .mappings
                    .get(found)
                    .map_or(0.0, |m| m.cumulative_distance);
            }
            Err(insertion) => insertion,
        };
        let Some(bracket) = self.mappings.get(left_of) else {
            return last.cumulative_distance;
        };

        let before = self.distance_before(left_of);
        let l1 = bracket.param_start;
        let l2 = bracket.param_end;
        if l1 == l2 {
            return before;
        }

        let x = narrow(((dot - l1) / (l2 - l1)).clamp(0.0, 1.0));
        before * (1.0 - x) + x * bracket.cumulative_distance
    }

    /// [`length_to_dot`](Self::length_to_dot) that rejects NaN and infinite
    /// lengths.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::NonFiniteQuery`] if `length` is not finite.
    pub fn try_length_to_dot(&self, length: f32) -> Result<f64, FlattenError> {
        if !length.is_finite() {
            return Err(FlattenError::NonFiniteQuery {
                query: "length_to_dot",
                value: f64::from(length),
            });
        }
        Ok(self.length_to_dot(length))
    }

    /// [`dot_to_length`](Self::dot_to_length) that rejects NaN and infinite
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::NonFiniteQuery`] if `dot` is not finite.
    pub fn try_dot_to_length(&self, dot: f64) -> Result<f32, FlattenError> {
        if !dot.is_finite() {
            return Err(FlattenError::NonFiniteQuery {
                query: "dot_to_length",
                value: dot,
            });
        }
        Ok(self.dot_to_length(dot))
    }

    /// Prefix of the table up to and including the entry that contains
    /// `length`.
    ///
    /// Lengths past the end return the whole table; an empty table returns an
    /// empty slice.
    pub fn mapping_sublist(&self, length: f32) -> &[Mapping] {
        let bracket = match self.search_distance(length) {
            Ok(found) => found,
            Err(insertion) => insertion,
        };
        let end = bracket.saturating_add(1).min(self.mappings.len());
        self.mappings.get(..end).unwrap_or_default()
    }

    /// Point on the polyline at arc length `length`.
    ///
    /// Lengths are clamped to `[0, length()]`. Returns `None` for an empty
    /// table.
    pub fn length_to_position(&self, length: f32) -> Option<Vec3> {
        let first = self.mappings.first()?;
        let last = self.mappings.last()?;
        if length <= 0.0 {
            return Some(first.start);
        }

        let left_of = match self.search_distance(length) {
            Ok(found) => return self.mappings.get(found).map(|m| m.end),
            Err(insertion) => insertion,
        };
        let Some(bracket) = self.mappings.get(left_of) else {
            return Some(last.end);
        };

        let l1 = self.distance_before(left_of);
        let span = bracket.cumulative_distance - l1;
        if span <= 0.0 {
            return Some(bracket.end);
        }
        let x = ((length - l1) / span).clamp(0.0, 1.0);
        Some(bracket.start.lerp(bracket.end, x))
    }

    /// Point on the polyline at curve parameter `dot`.
    ///
    /// Parameters outside the table clamp to its first or last point; a
    /// parameter inside a skip gap gives the point the path resumes from.
    /// Returns `None` for an empty table.
    pub fn dot_to_position(&self, dot: f64) -> Option<Vec3> {
        let last = self.mappings.last()?;

        let left_of = match self.search_param(dot) {
            Ok(found) => return self.mappings.get(found).map(|m| m.end),
            Err(insertion) => insertion,
        };
        let Some(bracket) = self.mappings.get(left_of) else {
            return Some(last.end);
        };

        let span = bracket.param_span();
        if span <= 0.0 {
            return Some(bracket.end);
        }
        let x = narrow(((dot - bracket.param_start) / span).clamp(0.0, 1.0));
        Some(bracket.start.lerp(bracket.end, x))
    }

    /// Whether both search keys are non-decreasing over the table.
    pub fn is_monotonic(&self) -> bool {
        self.mappings.windows(2).all(|pair| match pair {
            [a, b] => {
                a.cumulative_distance <= b.cumulative_distance && a.param_end <= b.param_end
            }
            _ => true,
        })
    }
}

/// Interpolation fraction in `[0, 1]` as `f32` for blending lengths and
/// points.
#[expect(
    clippy::cast_possible_truncation,
    reason = "fractions in [0, 1] only lose precision, never range"
)]
fn narrow(fraction: f64) -> f32 {
    fraction as f32
}

impl<'a> IntoIterator for &'a ArcLengthIndex {
    type Item = &'a Mapping;
    type IntoIter = std::slice::Iter<'a, Mapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.mappings.iter()
    }
}

impl Serialize for ArcLengthIndex {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.mappings.as_slice().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ArcLengthIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let mappings: Vec<Mapping> = Vec::deserialize(deserializer)?;
        let index = ArcLengthIndex { mappings };
        if !index.is_monotonic() {
            return Err(serde::de::Error::custom(
                "ArcLengthIndex entries must be non-decreasing in cumulative_distance and param_end",
            ));
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathflat_test_helpers::assert_approx_eq;

    /// Two unit-length pieces along x, then a skip, then a piece of length 2.
    fn gapped() -> ArcLengthIndex {
        let mut index = ArcLengthIndex::new();
        index.push_linear(0.0, 1.0, Vec3::ZERO, Vec3::X);
        index.push_linear(1.0, 2.0, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        index.push_linear(
            3.0,
            4.0,
            Vec3::new(2.0, 5.0, 0.0),
            Vec3::new(4.0, 5.0, 0.0),
        );
        index
    }

    fn single_line() -> ArcLengthIndex {
        let mut index = ArcLengthIndex::new();
        index.push_linear(0.0, 1.0, Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        index
    }

    #[test]
    fn test_push_accumulates_distance() {
        let index = gapped();
        let cumulative: Vec<f32> = index.iter().map(|m| m.cumulative_distance).collect();
        assert_eq!(cumulative, vec![1.0, 2.0, 4.0]);
        assert!(index.is_monotonic());
    }

    #[test]
    fn test_empty_index() {
        let index = ArcLengthIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.length(), 0.0);
        assert_eq!(index.length_to_dot(3.0), 0.0);
        assert_eq!(index.dot_to_length(3.0), 0.0);
        assert!(index.mapping_sublist(1.0).is_empty());
        assert_eq!(index.length_to_position(1.0), None);
        assert_eq!(index.dot_to_position(1.0), None);
        assert_eq!(index.param_range(), None);
    }

    #[test]
    fn test_single_line_queries() {
        let index = single_line();
        assert_eq!(index.length(), 5.0);
        assert_eq!(index.dot_to_length(0.0), 0.0);
        assert_eq!(index.dot_to_length(1.0), 5.0);
        assert_eq!(index.length_to_dot(2.5), 0.5);
        assert_eq!(index.length_to_dot(5.0), 1.0);
    }

    #[test]
    fn test_length_to_dot_zero_is_zero() {
        let mut index = ArcLengthIndex::new();
        index.push_linear(2.0, 3.0, Vec3::ZERO, Vec3::X);
        // The fast path returns 0 even when the table starts later.
        assert_eq!(index.length_to_dot(0.0), 0.0);
    }

    #[test]
    fn test_length_to_dot_clamps_beyond_end() {
        let index = gapped();
        assert_eq!(index.length_to_dot(100.0), 4.0);
    }

    #[test]
    fn test_length_to_dot_negative_clamps_to_first_param() {
        let index = gapped();
        assert_eq!(index.length_to_dot(-1.0), 0.0);
    }

    #[test]
    fn test_length_to_dot_exact_entry_end() {
        let index = gapped();
        assert_eq!(index.length_to_dot(1.0), 1.0);
        assert_eq!(index.length_to_dot(2.0), 2.0);
    }

    #[test]
    fn test_length_to_dot_interpolates_across_gap() {
        let index = gapped();
        // Halfway along the piece after the skip.
        assert_approx_eq!(index.length_to_dot(3.0), 3.5, 1e-6);
    }

    #[test]
    fn test_length_to_dot_zero_length_bracket() {
        let mut index = ArcLengthIndex::new();
        index.push_linear(0.0, 1.0, Vec3::ZERO, Vec3::X);
        index.push_linear(1.0, 2.0, Vec3::X, Vec3::X);
        index.push_linear(2.0, 3.0, Vec3::X, Vec3::new(2.0, 0.0, 0.0));

        // Two entries end at 1.0; the first one wins.
        assert_eq!(index.length_to_dot(1.0), 1.0);
        assert_approx_eq!(index.length_to_dot(1.5), 2.5, 1e-6);
    }

    #[test]
    fn test_length_to_dot_zero_length_first_entry() {
        let mut index = ArcLengthIndex::new();
        index.push_linear(0.0, 1.0, Vec3::ONE, Vec3::ONE);
        // A zero-length-only table: every positive length is past the end.
        assert_eq!(index.length_to_dot(0.5), 1.0);
    }

    #[test]
    fn test_dot_to_length_exact_and_interpolated() {
        let index = gapped();
        assert_eq!(index.dot_to_length(1.0), 1.0);
        assert_approx_eq!(index.dot_to_length(0.25), 0.25, 1e-6);
        assert_approx_eq!(index.dot_to_length(3.5), 3.0, 1e-6);
    }

    #[test]
    fn test_dot_to_length_inside_gap_holds_previous_distance() {
        let index = gapped();
        assert_approx_eq!(index.dot_to_length(2.5), 2.0, 1e-6);
    }

    #[test]
    fn test_dot_to_length_clamps() {
        let index = gapped();
        assert_eq!(index.dot_to_length(10.0), 4.0);
        assert_eq!(index.dot_to_length(-3.0), 0.0);
    }

    #[test]
    fn test_dot_to_length_zero_width_first_entry() {
        let mut index = ArcLengthIndex::new();
        index.push_linear(0.5, 0.5, Vec3::ZERO, Vec3::X);
        index.push_linear(0.5, 1.0, Vec3::X, Vec3::new(2.0, 0.0, 0.0));
        // Degenerate bracket with nothing before it resolves to 0.
        assert_eq!(index.dot_to_length(0.25), 0.0);
    }

    #[test]
    fn test_dot_to_length_zero_width_later_entry() {
        let mut index = ArcLengthIndex::new();
        index.push_linear(0.0, 1.0, Vec3::ZERO, Vec3::X);
        index.push_linear(2.0, 2.0, Vec3::X, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(index.dot_to_length(1.5), 1.0);
    }

    #[test]
    fn test_mapping_sublist() {
        let index = gapped();
        assert_eq!(index.mapping_sublist(0.5).len(), 1);
        assert_eq!(index.mapping_sublist(1.0).len(), 1);
        assert_eq!(index.mapping_sublist(1.5).len(), 2);
        assert_eq!(index.mapping_sublist(3.0).len(), 3);
        assert_eq!(index.mapping_sublist(50.0).len(), 3);
    }

    #[test]
    fn test_length_to_position() {
        let index = gapped();
        assert_eq!(index.length_to_position(-1.0), Some(Vec3::ZERO));
        assert_eq!(index.length_to_position(1.0), Some(Vec3::X));
        assert_eq!(index.length_to_position(3.0), Some(Vec3::new(3.0, 5.0, 0.0)));
        assert_eq!(index.length_to_position(99.0), Some(Vec3::new(4.0, 5.0, 0.0)));
    }

    #[test]
    fn test_dot_to_position() {
        let index = gapped();
        assert_eq!(index.dot_to_position(0.5), Some(Vec3::new(0.5, 0.0, 0.0)));
        assert_eq!(index.dot_to_position(2.5), Some(Vec3::new(2.0, 5.0, 0.0)));
        assert_eq!(index.dot_to_position(-1.0), Some(Vec3::ZERO));
        assert_eq!(index.dot_to_position(9.0), Some(Vec3::new(4.0, 5.0, 0.0)));
    }

    #[test]
    fn test_try_queries_reject_non_finite() {
        let index = single_line();
        assert!(matches!(
            index.try_length_to_dot(f32::NAN),
            Err(FlattenError::NonFiniteQuery {
                query: "length_to_dot",
                ..
            })
        ));
        assert!(index.try_dot_to_length(f64::INFINITY).is_err());
        assert_eq!(index.try_length_to_dot(2.5), Ok(0.5));
        assert_eq!(index.try_dot_to_length(1.0), Ok(5.0));
    }

    #[test]
    fn test_index_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ArcLengthIndex>();
    }

    #[test]
    fn test_param_range() {
        assert_eq!(gapped().param_range(), Some((0.0, 4.0)));
    }

    #[test]
    fn test_index_serialization_roundtrip() {
        let index = gapped();
        let json = serde_json::to_string(&index).expect("serialization failed");
        let back: ArcLengthIndex = serde_json::from_str(&json).expect("deserialization failed");
        assert_eq!(index, back);
    }

    #[test]
    fn test_index_deserialization_rejects_unsorted() {
        let mut mappings = gapped().mappings().to_vec();
        mappings.reverse();
        let json = serde_json::to_string(&mappings).expect("serialization failed");
        let result: Result<ArcLengthIndex, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }
}
