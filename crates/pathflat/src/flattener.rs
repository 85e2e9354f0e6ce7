//! Adaptive flattening of a path into an [`ArcLengthIndex`].

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::bezier::CubicFrame;
use crate::config::FlattenConfig;
use crate::error::FlattenError;
use crate::index::{ArcLengthIndex, Mapping};
use crate::segment::{PathCursor, Segment};

/// Counters gathered while building the table.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct FlattenStats {
    /// Steps read from the cursor, skips included.
    pub steps: usize,
    /// Linear segments emitted directly.
    pub linear_segments: usize,
    /// Cubic segments subdivided.
    pub cubic_segments: usize,
    /// Skip steps.
    pub skipped: usize,
    /// Mappings emitted for cubic segments.
    pub cubic_pieces: usize,
    /// Cubic pieces emitted by a depth or length cap while still above
    /// tolerance.
    pub capped_pieces: usize,
    /// Deepest subdivision level that emitted a piece.
    pub max_depth_reached: u32,
    /// Largest flatness of any emitted cubic piece.
    ///
    /// At most the tolerance unless `capped_pieces > 0`, in which case this is
    /// the worst deviation actually left in the table.
    pub worst_flatness: f32,
}

/// A cubic piece waiting on the work stack.
#[derive(Clone, Copy, Debug)]
struct Piece {
    param_start: f64,
    param_end: f64,
    frame: CubicFrame,
    depth: u32,
}

/// Flattens a path and owns the resulting [`ArcLengthIndex`].
///
/// The whole table is built in the constructor from a single pass over the
/// cursor:
///
/// - a linear step becomes one [`Mapping`]
/// - a cubic step is halved with de Casteljau's construction until every
///   piece is within tolerance (or hits a cap), each piece becoming one
///   [`Mapping`]
/// - a skip step produces nothing but still advances the parameter
///
/// The step at position `i` covers parameters `[i - 1, i]`, so after a
/// leading move the first drawn segment spans `[0, 1]`.
///
/// # Example
///
/// ```
/// use glam::Vec3;
/// use pathflat::{PathFlattener, SegmentPath};
///
/// let path = SegmentPath::new()
///     .move_to(Vec3::new(1.0, 0.0, 0.0))
///     .cubic_to(
///         Vec3::new(1.0, 0.55, 0.0),
///         Vec3::new(0.55, 1.0, 0.0),
///         Vec3::new(0.0, 1.0, 0.0),
///     );
///
/// let flattener = PathFlattener::new(path.cursor(), 0.001)?;
///
/// // Close to a quarter of the unit circle.
/// assert!((flattener.length() - std::f32::consts::FRAC_PI_2).abs() < 0.01);
/// assert!(flattener.mappings().len() > 1);
/// assert_eq!(flattener.length_to_dot(flattener.length()), 1.0);
/// # Ok::<(), pathflat::FlattenError>(())
/// ```
#[derive(Clone, Debug)]
pub struct PathFlattener {
    index: ArcLengthIndex,
    config: FlattenConfig,
    stats: FlattenStats,
}

impl PathFlattener {
    /// Flatten `cursor` with the given tolerance and default caps.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::InvalidTolerance`] if `tolerance` is negative
    /// or non-finite.
    pub fn new<C: PathCursor>(cursor: C, tolerance: f32) -> Result<Self, FlattenError> {
        let config = FlattenConfig::new(tolerance)?;
        Ok(Self::build(cursor, config))
    }

    /// Flatten `cursor` with a full configuration.
    ///
    /// # Errors
    ///
    /// Returns the error from [`FlattenConfig::validate`].
    pub fn with_config<C: PathCursor>(
        cursor: C,
        config: &FlattenConfig,
    ) -> Result<Self, FlattenError> {
        config.validate()?;
        Ok(Self::build(cursor, config.clone()))
    }

    fn build<C: PathCursor>(mut cursor: C, config: FlattenConfig) -> Self {
        let mut flattener = Self {
            index: ArcLengthIndex::with_capacity(16),
            config,
            stats: FlattenStats::default(),
        };
        let mut stack = Vec::new();

        let mut param_end = 0.0f64;
        while let Some(segment) = cursor.current() {
            let param_start = param_end - 1.0;
            match segment {
                Segment::Cubic(frame) => {
                    flattener.stats.cubic_segments += 1;
                    flattener.flatten_cubic(&mut stack, param_start, param_end, frame);
                }
                Segment::Linear { start, end } => {
                    flattener.stats.linear_segments += 1;
                    flattener
                        .index
                        .push_linear(param_start, param_end, start, end);
                }
                Segment::Skip => {
                    flattener.stats.skipped += 1;
                }
            }
            flattener.stats.steps += 1;
            param_end += 1.0;
            cursor.advance();
        }

        debug!(
            "Flattened {} steps into {} mappings, length {}",
            flattener.stats.steps,
            flattener.index.len(),
            flattener.index.length()
        );
        if flattener.stats.capped_pieces > 0 {
            warn!(
                "{} cubic pieces hit the subdivision cap (max_depth {}, min_segment_length {}); worst flatness {} exceeds tolerance {}",
                flattener.stats.capped_pieces,
                flattener.config.max_depth,
                flattener.config.min_segment_length,
                flattener.stats.worst_flatness,
                flattener.config.tolerance
            );
        }

        flattener
    }

    /// Subdivide one cubic segment, emitting its pieces in parameter order.
    ///
    /// Runs on an explicit stack of owned frames. The right half is pushed
    /// before the left so the left half is emitted first.
    fn flatten_cubic(
        &mut self,
        stack: &mut Vec<Piece>,
        param_start: f64,
        param_end: f64,
        frame: CubicFrame,
    ) {
        stack.clear();
        stack.push(Piece {
            param_start,
            param_end,
            frame,
            depth: 0,
        });

        while let Some(piece) = stack.pop() {
            let flatness = piece.frame.flatness();
            if flatness > self.config.tolerance {
                let depth_capped = piece.depth >= self.config.max_depth;
                let length_capped =
                    piece.frame.control_polygon_length() < self.config.min_segment_length;

                if !depth_capped && !length_capped {
                    let (left, right) = piece.frame.split(0.5);
                    let mid = piece.param_start + (piece.param_end - piece.param_start) * 0.5;
                    stack.push(Piece {
                        param_start: mid,
                        param_end: piece.param_end,
                        frame: right,
                        depth: piece.depth + 1,
                    });
                    stack.push(Piece {
                        param_start: piece.param_start,
                        param_end: mid,
                        frame: left,
                        depth: piece.depth + 1,
                    });
                    continue;
                }
                self.stats.capped_pieces += 1;
            }

            trace!(
                "cubic piece [{}, {}] depth {} flatness {}",
                piece.param_start, piece.param_end, piece.depth, flatness
            );
            self.stats.cubic_pieces += 1;
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(piece.depth);
            self.stats.worst_flatness = self.stats.worst_flatness.max(flatness);
            self.index.push_linear(
                piece.param_start,
                piece.param_end,
                piece.frame.start,
                piece.frame.end,
            );
        }
    }

    /// The finished table and its queries.
    pub fn index(&self) -> &ArcLengthIndex {
        &self.index
    }

    /// Take ownership of the finished table.
    pub fn into_index(self) -> ArcLengthIndex {
        self.index
    }

    /// Configuration the table was built with.
    pub fn config(&self) -> &FlattenConfig {
        &self.config
    }

    /// Counters gathered while building.
    pub fn stats(&self) -> &FlattenStats {
        &self.stats
    }

    /// See [`ArcLengthIndex::mappings`].
    pub fn mappings(&self) -> &[Mapping] {
        self.index.mappings()
    }

    /// See [`ArcLengthIndex::length`].
    pub fn length(&self) -> f32 {
        self.index.length()
    }

    /// See [`ArcLengthIndex::length_to_dot`].
    pub fn length_to_dot(&self, length: f32) -> f64 {
        self.index.length_to_dot(length)
    }

    /// See [`ArcLengthIndex::dot_to_length`].
    pub fn dot_to_length(&self, dot: f64) -> f32 {
        self.index.dot_to_length(dot)
    }

    /// See [`ArcLengthIndex::mapping_sublist`].
    pub fn mapping_sublist(&self, length: f32) -> &[Mapping] {
        self.index.mapping_sublist(length)
    }
}
