//! Panicking accessors for test code.
//!
//! Library code returns `Result` and `Option` everywhere, so tests would
//! otherwise be littered with `unwrap()`. A failure points at the test line
//! that asked, not at this module.

use std::fmt::Debug;

/// Take the success value, or fail the test with the error's `Debug` form.
///
/// ```rust
/// use pathflat_test_helpers::must;
///
/// let tolerance: Result<f32, String> = "0.25".parse::<f32>().map_err(|e| e.to_string());
/// assert_eq!(must(tolerance), 0.25);
/// ```
///
/// # Panics
///
/// Panics on `Err`.
#[track_caller]
pub fn must<T, E: Debug>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("must: got Err({error:?})"),
    }
}

/// Take the value out of an `Option` that the test knows is populated.
///
/// `why` says what made the test expect a value, e.g. "table is not empty".
///
/// ```rust
/// use pathflat_test_helpers::must_some;
///
/// let distances = [0.0_f32, 1.5, 3.0];
/// assert_eq!(must_some(distances.last(), "three distances"), &3.0);
/// ```
///
/// # Panics
///
/// Panics on `None`, quoting `why`.
#[track_caller]
pub fn must_some<T>(option: Option<T>, why: &str) -> T {
    match option {
        Some(value) => value,
        None => panic!("must_some: got None, expected {why}"),
    }
}

/// Like [`must`], but names the step that failed, e.g. the fixture being
/// flattened.
///
/// # Panics
///
/// Panics on `Err`, quoting `step` and the error.
#[track_caller]
pub fn must_with<T, E: Debug>(result: Result<T, E>, step: &str) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("must_with: {step} failed: {error:?}"),
    }
}
