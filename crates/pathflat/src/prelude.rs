//! Convenience re-exports.
//!
//! ```
//! use pathflat::prelude::*;
//! ```

pub use crate::bezier::CubicFrame;
pub use crate::config::FlattenConfig;
pub use crate::error::FlattenError;
pub use crate::flattener::{FlattenStats, PathFlattener};
pub use crate::index::{ArcLengthIndex, Mapping};
pub use crate::segment::{PathCursor, Segment, SegmentCursor, SegmentPath};
pub use crate::Result;
