//! Adaptive path flattening with an arc-length index.
//!
//! This crate turns a path made of linear and cubic Bezier segments into a
//! polyline and keeps, for every straight piece it emits, the curve parameter
//! range it covers and the cumulative arc length at its end. The resulting
//! table answers the three-way mapping between curve parameter ("dot"),
//! arc length and 3D position without walking the curve again.
//!
//! # Overview
//!
//! - [`Segment`] / [`PathCursor`]: the path as seen by the flattener
//! - [`CubicFrame`]: flatness test and de Casteljau subdivision
//! - [`FlattenConfig`]: tolerance and subdivision caps
//! - [`PathFlattener`]: builds the table from a cursor
//! - [`ArcLengthIndex`] / [`Mapping`]: the table and its queries
//!
//! # Parameters
//!
//! The parameter of a point is its segment index plus the fraction of the way
//! through that segment. The cursor's first step is usually the initial move
//! of the path, so the first drawn segment spans `[0, 1]`, the next `[1, 2]`,
//! and so on.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use pathflat::{PathFlattener, SegmentPath};
//!
//! let path = SegmentPath::new()
//!     .move_to(Vec3::ZERO)
//!     .line_to(Vec3::new(3.0, 4.0, 0.0));
//!
//! let flattener = PathFlattener::new(path.cursor(), 0.01)?;
//!
//! assert_eq!(flattener.length(), 5.0);
//! assert_eq!(flattener.dot_to_length(1.0), 5.0);
//! assert_eq!(flattener.length_to_dot(2.5), 0.5);
//! # Ok::<(), pathflat::FlattenError>(())
//! ```

#![deny(unsafe_op_in_unsafe_fn, clippy::unwrap_used)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod bezier;
pub mod config;
pub mod error;
pub mod flattener;
pub mod index;
pub mod prelude;
pub mod segment;

pub use bezier::CubicFrame;
pub use config::FlattenConfig;
pub use error::FlattenError;
pub use flattener::{FlattenStats, PathFlattener};
pub use index::{ArcLengthIndex, Mapping};
pub use segment::{PathCursor, Segment, SegmentCursor, SegmentPath};

/// A specialized `Result` type for flattening operations.
pub type Result<T> = std::result::Result<T, FlattenError>;
