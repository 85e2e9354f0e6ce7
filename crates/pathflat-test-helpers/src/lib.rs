//! Shared test utilities for pathflat.
//!
//! # Modules
//!
//! - [`mod@must`] - Unwrap helpers with `#[track_caller]`
//! - [`assertions`] - Float and ordering assertion macros
//! - [`fixtures`] - Ready-made paths (feature `fixtures`)
//! - [`prelude`] - Convenience re-exports
//!
//! The fixtures depend on `pathflat` itself, so they are only meant for
//! integration tests and benches. Unit tests inside `pathflat` use the
//! macros and [`must`] only.
//!
//! ```rust,ignore
//! use pathflat_test_helpers::prelude::*;
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod assertions;
pub mod must;
pub mod prelude;

#[cfg(feature = "fixtures")]
#[cfg_attr(docsrs, doc(cfg(feature = "fixtures")))]
pub mod fixtures;

pub use must::*;
