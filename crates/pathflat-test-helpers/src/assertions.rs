//! Assertion macros for float-heavy tests.

/// Assert that two floating-point values are approximately equal.
///
/// ```rust
/// use pathflat_test_helpers::assert_approx_eq;
///
/// assert_approx_eq!(1.0_f32, 1.0001, 0.001);
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
                left, right, diff, tolerance
            );
        }
    };
    ($left:expr, $right:expr, $tolerance:expr, $($arg:tt)+) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let diff = (left - right).abs();
        if !(diff <= tolerance) {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`: {}",
                left, right, diff, tolerance, format_args!($($arg)+)
            );
        }
    };
}

/// Assert that two points are within `tolerance` of each other.
///
/// Works with any type that has a `distance` method, such as `glam::Vec3`.
#[macro_export]
macro_rules! assert_points_near {
    ($left:expr, $right:expr, $tolerance:expr $(,)?) => {
        let left = $left;
        let right = $right;
        let tolerance = $tolerance;
        let distance = left.distance(right);
        if !(distance <= tolerance) {
            panic!(
                "assertion failed: points too far apart\n  left: `{:?}`,\n right: `{:?}`,\n  distance: `{:?}`,\n  tolerance: `{:?}`",
                left, right, distance, tolerance
            );
        }
    };
}

/// Assert that a collection is sorted in ascending order.
///
/// Equal neighbours are allowed.
///
/// ```rust
/// use pathflat_test_helpers::assert_sorted;
///
/// assert_sorted!(&[1.0, 2.0, 2.0, 4.0]);
/// ```
#[macro_export]
macro_rules! assert_sorted {
    ($collection:expr $(,)?) => {
        let collection = $collection;
        let mut iter = collection.iter();
        if let Some(mut prev) = iter.next() {
            for (i, curr) in iter.enumerate() {
                if prev > curr {
                    panic!(
                        "assertion failed: collection is not sorted\n  first unsorted pair at index {}: {:?} > {:?}",
                        i, prev, curr
                    );
                }
                prev = curr;
            }
        }
    };
    ($collection:expr, $($arg:tt)+) => {
        let collection = $collection;
        let mut iter = collection.iter();
        if let Some(mut prev) = iter.next() {
            for (i, curr) in iter.enumerate() {
                if prev > curr {
                    panic!(
                        "assertion failed: collection is not sorted\n  first unsorted pair at index {}: {:?} > {:?}: {}",
                        i, prev, curr, format_args!($($arg)+)
                    );
                }
                prev = curr;
            }
        }
    };
}
