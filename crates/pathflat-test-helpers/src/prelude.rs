//! Convenience re-exports for common test utilities.
//!
//! ```rust,ignore
//! use pathflat_test_helpers::prelude::*;
//! ```

pub use crate::must::{must, must_some, must_with};
pub use crate::{assert_approx_eq, assert_points_near, assert_sorted};

#[cfg(feature = "fixtures")]
pub use crate::fixtures::{PathFixture, all_fixtures};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;
