//! Testing utilities for clearwater
//!
//! Assertion macros for outcomes, plus property-based testing support
//! behind the `proptest` feature.
//!
//! # Examples
//!
//! ```
//! use clearwater::{assert_failure, assert_success, Outcome};
//!
//! let good = Outcome::ok(42);
//! assert_success!(good);
//!
//! let bad: Outcome<i32> = Outcome::fail("error");
//! assert_failure!(bad);
//! ```

/// Assert that an outcome is successful.
///
/// Panics with the outcome's transcript when it is failed.
///
/// # Example
///
/// ```
/// use clearwater::{assert_success, Outcome};
///
/// let outcome = Outcome::ok(42).with_success("checked");
/// assert_success!(outcome);
/// ```
#[macro_export]
macro_rules! assert_success {
    ($outcome:expr) => {{
        let outcome = &$outcome;
        if outcome.is_failed() {
            panic!("Expected success, got failure: {}", outcome);
        }
    }};
}

/// Assert that an outcome is failed.
///
/// Panics with the outcome's transcript when it is successful.
///
/// # Example
///
/// ```
/// use clearwater::{assert_failure, Outcome};
///
/// let outcome: Outcome<i32> = Outcome::fail("error");
/// assert_failure!(outcome);
/// ```
#[macro_export]
macro_rules! assert_failure {
    ($outcome:expr) => {{
        let outcome = &$outcome;
        if outcome.is_success() {
            panic!("Expected failure, got success: {}", outcome);
        }
    }};
}

/// Assert that an outcome's error messages equal the expected list, in
/// order.
///
/// # Example
///
/// ```
/// use clearwater::{assert_error_messages, Outcome};
///
/// let outcome: Outcome<i32> = Outcome::fail("first").with_error("second");
/// assert_error_messages!(outcome, ["first", "second"]);
/// ```
#[macro_export]
macro_rules! assert_error_messages {
    ($outcome:expr, [$($expected:expr),* $(,)?]) => {{
        let outcome = &$outcome;
        let actual: Vec<&str> = outcome
            .reasons()
            .iter()
            .filter(|r| r.is_error())
            .map(|r| r.message())
            .collect();
        let expected: Vec<&str> = vec![$($expected),*];
        assert_eq!(
            actual, expected,
            "error messages do not match; outcome: {}", outcome
        );
    }};
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

#[cfg(feature = "proptest")]
impl<T> Arbitrary for crate::Outcome<T>
where
    T: Arbitrary + Send + Sync + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            any_with::<T>(args).prop_map(crate::Outcome::ok),
            prop::collection::vec("[a-z]{1,12}", 1..4)
                .prop_map(|messages| crate::Outcome::<T>::fail_all(messages)),
        ]
        .boxed()
    }
}
