//! Outcome type: an ordered reason log with an optional carried value
//!
//! An [`Outcome`] is the explicit value of an operation: instead of raising,
//! an operation returns an outcome whose success or failure is *derived*
//! from its reason log: it is failed exactly when the log contains at
//! least one error entry. An outcome with no reasons at all is successful.
//!
//! Outcomes are built fluently by value (the builder phase), then handed to
//! the combinators in [`transform`](crate::transform), each of which
//! consumes its input and returns a new, independently owned outcome.
//! Cloning is cheap: reason payloads are shared behind `Arc` and treated as
//! immutable, so a clone and its original can never observe each other.
//!
//! # Examples
//!
//! ## Construction and accumulation
//!
//! ```
//! use clearwater::Outcome;
//!
//! let outcome = Outcome::ok(42)
//!     .with_success("validated input")
//!     .with_success("cache hit");
//!
//! assert!(outcome.is_success());
//! assert_eq!(outcome.reasons().len(), 2);
//! assert_eq!(*outcome.value(), 42);
//! ```
//!
//! ## Failure is derived from the log
//!
//! ```
//! use clearwater::Outcome;
//!
//! let outcome: Outcome<i32> = Outcome::new()
//!     .with_success("step one done")
//!     .with_error("step two exploded");
//!
//! assert!(outcome.is_failed());
//! assert_eq!(outcome.errors().len(), 1);
//! assert_eq!(outcome.value_opt(), None);
//! ```

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::reason::{ErrorReason, IntoError, IntoSuccess, ReasonEntry, SuccessReason};

/// The result of an operation: an ordered, append-only log of reasons plus
/// an optional carried value.
///
/// `Outcome<T>` carries a value of type `T`; `Outcome<()>` (the default) is
/// the no-value shape. Failure is derived, never stored: the outcome is
/// failed iff its log contains an error entry.
///
/// A failed outcome's value is logically absent; every accessor hides it,
/// regardless of what was assigned before the failure was recorded.
///
/// # Examples
///
/// ```
/// use clearwater::Outcome;
///
/// let ok = Outcome::ok(5);
/// assert!(ok.is_success());
///
/// let failed: Outcome<i32> = Outcome::fail("nope");
/// assert!(failed.is_failed());
/// assert_eq!(failed.value_or_default(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct Outcome<T = ()> {
    reasons: Vec<ReasonEntry>,
    value: Option<T>,
}

impl<T> Default for Outcome<T> {
    fn default() -> Self {
        Outcome::new()
    }
}

impl<T> Outcome<T> {
    /// Create an empty outcome: zero reasons, no value, successful.
    ///
    /// This is the builder origin; attach reasons and a value with the
    /// `with_*` methods before handing the outcome to combinators.
    pub fn new() -> Self {
        Outcome {
            reasons: Vec::new(),
            value: None,
        }
    }

    /// Create a successful outcome carrying `value`, with no reasons.
    pub fn ok(value: T) -> Self {
        Outcome {
            reasons: Vec::new(),
            value: Some(value),
        }
    }

    /// Create a failed outcome with a single error reason.
    ///
    /// Accepts anything convertible to an error reason: a message string,
    /// the default [`Error`](crate::Error), or a custom
    /// [`ErrorReason`] implementor.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::{Error, Outcome};
    ///
    /// let a: Outcome<i32> = Outcome::fail("plain message");
    /// let b: Outcome<i32> = Outcome::fail(Error::new("rich").with_meta("code", 7));
    ///
    /// assert!(a.is_failed());
    /// assert!(b.is_failed());
    /// ```
    pub fn fail(error: impl IntoError) -> Self {
        Outcome::new().with_error(error)
    }

    /// Create a failed outcome from one or more errors, preserving order.
    pub fn fail_all<I>(errors: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoError,
    {
        Outcome::new().with_errors(errors)
    }

    // --- accumulation (builder phase) ---

    /// Append one reason entry.
    pub fn with_reason(mut self, reason: impl Into<ReasonEntry>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    /// Append several reason entries, preserving input order.
    pub fn with_reasons<I>(mut self, reasons: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ReasonEntry>,
    {
        self.reasons.extend(reasons.into_iter().map(Into::into));
        self
    }

    /// Append one error reason. The outcome is failed from here on.
    pub fn with_error(mut self, error: impl IntoError) -> Self {
        self.reasons.push(ReasonEntry::Error(error.into_error()));
        self
    }

    /// Append several error reasons, preserving input order.
    pub fn with_errors<I>(mut self, errors: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoError,
    {
        for error in errors {
            self.reasons.push(ReasonEntry::Error(error.into_error()));
        }
        self
    }

    /// Append one success reason.
    pub fn with_success(mut self, success: impl IntoSuccess) -> Self {
        self.reasons
            .push(ReasonEntry::Success(success.into_success()));
        self
    }

    /// Append several success reasons, preserving input order.
    pub fn with_successes<I>(mut self, successes: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoSuccess,
    {
        for success in successes {
            self.reasons
                .push(ReasonEntry::Success(success.into_success()));
        }
        self
    }

    /// Assign the carried value.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    // --- inspection ---

    /// True when the reason log contains no error entry.
    ///
    /// An outcome with zero reasons is successful.
    pub fn is_success(&self) -> bool {
        !self.is_failed()
    }

    /// True when the reason log contains at least one error entry.
    pub fn is_failed(&self) -> bool {
        self.reasons.iter().any(ReasonEntry::is_error)
    }

    /// The full reason log, in append order.
    pub fn reasons(&self) -> &[ReasonEntry] {
        &self.reasons
    }

    /// Ordered snapshot of the error reasons.
    pub fn errors(&self) -> Vec<Arc<dyn ErrorReason>> {
        self.reasons
            .iter()
            .filter_map(|r| r.as_error().cloned())
            .collect()
    }

    /// Ordered snapshot of the success reasons.
    pub fn successes(&self) -> Vec<Arc<dyn SuccessReason>> {
        self.reasons
            .iter()
            .filter_map(|r| r.as_success().cloned())
            .collect()
    }

    // --- typed predicate search (flat over the log, never into causes) ---

    /// True when the log contains an error reason of concrete type `K`.
    ///
    /// ```
    /// use clearwater::{Error, Outcome};
    ///
    /// let outcome: Outcome<()> = Outcome::fail(Error::new("boom"));
    /// assert!(outcome.has_error::<Error>());
    /// ```
    pub fn has_error<K: ErrorReason>(&self) -> bool {
        self.typed_errors::<K>().next().is_some()
    }

    /// True when the log contains an error reason of type `K` satisfying
    /// `predicate`.
    pub fn has_error_matching<K, P>(&self, predicate: P) -> bool
    where
        K: ErrorReason,
        P: Fn(&K) -> bool,
    {
        self.typed_errors::<K>().any(|e| predicate(e))
    }

    /// Ordered snapshot of the error reasons of concrete type `K`, in
    /// encounter order.
    pub fn errors_of_type<K: ErrorReason>(&self) -> Vec<&K> {
        self.typed_errors::<K>().collect()
    }

    /// True when the log contains a success reason of concrete type `K`.
    pub fn has_success<K: SuccessReason>(&self) -> bool {
        self.typed_successes::<K>().next().is_some()
    }

    /// True when the log contains a success reason of type `K` satisfying
    /// `predicate`.
    pub fn has_success_matching<K, P>(&self, predicate: P) -> bool
    where
        K: SuccessReason,
        P: Fn(&K) -> bool,
    {
        self.typed_successes::<K>().any(|s| predicate(s))
    }

    /// Ordered snapshot of the success reasons of concrete type `K`.
    pub fn successes_of_type<K: SuccessReason>(&self) -> Vec<&K> {
        self.typed_successes::<K>().collect()
    }

    /// True when some error reason wraps a source error of type `E`.
    ///
    /// The wrapped error is inspected in place, never re-raised.
    ///
    /// ```
    /// use clearwater::{Error, Outcome};
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    /// let outcome: Outcome<()> = Outcome::fail(Error::from_source(io));
    ///
    /// assert!(outcome.has_source_error::<std::io::Error>());
    /// assert!(!outcome.has_source_error::<std::fmt::Error>());
    /// ```
    pub fn has_source_error<E: StdError + 'static>(&self) -> bool {
        self.has_source_error_matching::<E, _>(|_| true)
    }

    /// True when some error reason wraps a source error of type `E`
    /// satisfying `predicate`.
    pub fn has_source_error_matching<E, P>(&self, predicate: P) -> bool
    where
        E: StdError + 'static,
        P: Fn(&E) -> bool,
    {
        self.reasons
            .iter()
            .filter_map(|r| r.as_error())
            .filter_map(|e| e.source_error())
            .filter_map(|s| s.downcast_ref::<E>())
            .any(|e| predicate(e))
    }

    fn typed_errors<K: ErrorReason>(&self) -> impl Iterator<Item = &K> {
        self.reasons
            .iter()
            .filter_map(|r| r.as_error())
            .filter_map(|e| e.as_any().downcast_ref::<K>())
    }

    fn typed_successes<K: SuccessReason>(&self) -> impl Iterator<Item = &K> {
        self.reasons
            .iter()
            .filter_map(|r| r.as_success())
            .filter_map(|s| s.as_any().downcast_ref::<K>())
    }

    // --- value access ---

    /// Borrow the carried value. Strict accessor.
    ///
    /// # Panics
    ///
    /// Panics when the outcome is failed (the message embeds every recorded
    /// error) or when no value was ever assigned. Both are contract
    /// violations by the caller, not domain failures; use
    /// [`try_value`](Outcome::try_value) or
    /// [`value_opt`](Outcome::value_opt) when failure is a possibility.
    pub fn value(&self) -> &T {
        match self.try_value() {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// Borrow the carried value, or explain why it is inaccessible.
    ///
    /// ```
    /// use clearwater::Outcome;
    ///
    /// let failed: Outcome<i32> = Outcome::fail("broken");
    /// let err = failed.try_value().unwrap_err();
    /// assert!(err.to_string().contains("broken"));
    /// ```
    pub fn try_value(&self) -> Result<&T, ValueAccessError> {
        if self.is_failed() {
            return Err(ValueAccessError::Failed {
                errors: self
                    .reasons
                    .iter()
                    .filter(|r| r.is_error())
                    .map(|r| r.message().to_string())
                    .collect(),
            });
        }
        self.value.as_ref().ok_or(ValueAccessError::Unassigned)
    }

    /// Borrow the carried value; `None` when failed or unassigned.
    pub fn value_opt(&self) -> Option<&T> {
        if self.is_failed() {
            None
        } else {
            self.value.as_ref()
        }
    }

    /// The carried value, or `T::default()` when failed or unassigned.
    /// Never fails.
    pub fn value_or_default(&self) -> T
    where
        T: Default + Clone,
    {
        self.value_opt().cloned().unwrap_or_default()
    }

    /// Consume the outcome, yielding the carried value when successful.
    pub fn into_value(self) -> Option<T> {
        if self.is_failed() {
            None
        } else {
            self.value
        }
    }

    /// Merge several outcomes into one carrying all their values.
    ///
    /// Reasons are concatenated in input order. The merged outcome is
    /// failed iff any input is failed; on success the values of the inputs
    /// that carry one are collected in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::Outcome;
    ///
    /// let merged = Outcome::merge(vec![Outcome::ok(1), Outcome::ok(2)]);
    /// assert_eq!(merged.into_value(), Some(vec![1, 2]));
    ///
    /// let merged = Outcome::merge(vec![Outcome::ok(1), Outcome::fail("no")]);
    /// assert!(merged.is_failed());
    /// assert_eq!(merged.reasons().len(), 1);
    /// ```
    pub fn merge<I>(outcomes: I) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = Outcome<T>>,
    {
        let mut reasons = Vec::new();
        let mut values = Vec::new();
        for outcome in outcomes {
            let Outcome {
                reasons: inner,
                value,
            } = outcome;
            if !inner.iter().any(ReasonEntry::is_error) {
                if let Some(v) = value {
                    values.push(v);
                }
            }
            reasons.extend(inner);
        }
        let failed = reasons.iter().any(ReasonEntry::is_error);
        Outcome {
            value: if failed { None } else { Some(values) },
            reasons,
        }
    }

    // Internal constructor used by the combinators: reasons carried over,
    // value slot filled by the caller.
    pub(crate) fn from_parts(reasons: Vec<ReasonEntry>, value: Option<T>) -> Self {
        Outcome { reasons, value }
    }

    pub(crate) fn into_parts(self) -> (Vec<ReasonEntry>, Option<T>) {
        (self.reasons, self.value)
    }
}

impl<T> fmt::Display for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.is_failed() { "failed" } else { "ok" })?;
        if !self.reasons.is_empty() {
            write!(f, " with {} reason(s):", self.reasons.len())?;
            for (i, reason) in self.reasons.iter().enumerate() {
                write!(f, "\n  {}. {}", i + 1, reason)?;
            }
        }
        Ok(())
    }
}

/// Why the strict value accessor could not produce a value.
///
/// Returned by [`Outcome::try_value`]; [`Outcome::value`] panics with the
/// same message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueAccessError {
    /// The outcome is failed; carries the recorded error messages in order.
    Failed {
        /// Messages of the error reasons, in append order.
        errors: Vec<String>,
    },
    /// The outcome is successful but no value was ever assigned.
    Unassigned,
}

impl fmt::Display for ValueAccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueAccessError::Failed { errors } => {
                write!(
                    f,
                    "cannot access the value of a failed outcome; errors: {}",
                    errors.join("; ")
                )
            }
            ValueAccessError::Unassigned => {
                write!(f, "no value was assigned to this outcome")
            }
        }
    }
}

impl StdError for ValueAccessError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reason::{Error, Success};

    #[test]
    fn empty_outcome_is_successful() {
        let outcome: Outcome<i32> = Outcome::new();
        assert!(outcome.is_success());
        assert!(!outcome.is_failed());
        assert!(outcome.reasons().is_empty());
    }

    #[test]
    fn failure_is_derived_from_log() {
        let outcome: Outcome<i32> = Outcome::new()
            .with_success("fine")
            .with_error("not fine")
            .with_success("also fine");

        assert!(outcome.is_failed());
        assert_eq!(outcome.errors().len(), 1);
        assert_eq!(outcome.successes().len(), 2);
    }

    #[test]
    fn append_preserves_prefix_order() {
        let outcome: Outcome<()> = Outcome::new().with_error("e1").with_success("s1");
        let before: Vec<String> = outcome
            .reasons()
            .iter()
            .map(|r| r.message().to_string())
            .collect();

        let outcome = outcome.with_error("e2");
        let after: Vec<String> = outcome
            .reasons()
            .iter()
            .map(|r| r.message().to_string())
            .collect();

        assert_eq!(&after[..2], &before[..]);
        assert_eq!(after, vec!["e1", "s1", "e2"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let outcome: Outcome<()> = Outcome::new().with_error("same").with_error("same");
        assert_eq!(outcome.errors().len(), 2);
    }

    #[test]
    fn clone_is_independent() {
        let original: Outcome<i32> = Outcome::ok(1).with_success("seed");
        let mutated = original.clone().with_error("x");

        assert!(original.is_success());
        assert_eq!(original.reasons().len(), 1);
        assert!(mutated.is_failed());
        assert_eq!(mutated.reasons().len(), 2);
    }

    #[test]
    fn value_access_on_success() {
        let outcome = Outcome::ok(5);
        assert_eq!(*outcome.value(), 5);
        assert_eq!(outcome.try_value(), Ok(&5));
        assert_eq!(outcome.value_opt(), Some(&5));
        assert_eq!(outcome.value_or_default(), 5);
        assert_eq!(outcome.into_value(), Some(5));
    }

    #[test]
    #[should_panic(expected = "replica lag exceeded threshold")]
    fn strict_value_panics_on_failure() {
        // The panic message must quote the error's own text.
        let outcome: Outcome<i32> = Outcome::fail("replica lag exceeded threshold");
        let _ = outcome.value();
    }

    #[test]
    fn strict_value_message_lists_errors() {
        let outcome: Outcome<i32> = Outcome::fail("first").with_error("second");
        let err = outcome.try_value().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("first"));
        assert!(text.contains("second"));
    }

    #[test]
    #[should_panic(expected = "no value was assigned")]
    fn strict_value_panics_when_unassigned() {
        let outcome: Outcome<i32> = Outcome::new();
        let _ = outcome.value();
    }

    #[test]
    fn failed_value_is_logically_absent() {
        // Assigned first, failed later: accessors must hide the value.
        let outcome = Outcome::ok(9).with_error("late failure");
        assert_eq!(outcome.value_opt(), None);
        assert_eq!(outcome.value_or_default(), 0);
        assert_eq!(outcome.into_value(), None);
    }

    #[test]
    fn typed_error_search() {
        #[derive(Debug)]
        struct Timeout {
            after_ms: u64,
            metadata: crate::Metadata,
        }
        impl std::fmt::Display for Timeout {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "timed out after {}ms", self.after_ms)
            }
        }
        impl crate::Reason for Timeout {
            fn message(&self) -> &str {
                "timed out"
            }
            fn metadata(&self) -> &crate::Metadata {
                &self.metadata
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
        impl ErrorReason for Timeout {}

        let outcome: Outcome<()> = Outcome::new()
            .with_error(Error::new("plain"))
            .with_error(Timeout {
                after_ms: 100,
                metadata: crate::Metadata::new(),
            })
            .with_error(Timeout {
                after_ms: 900,
                metadata: crate::Metadata::new(),
            });

        assert!(outcome.has_error::<Timeout>());
        assert!(outcome.has_error::<Error>());
        assert!(outcome.has_error_matching::<Timeout, _>(|t| t.after_ms > 500));
        assert!(!outcome.has_error_matching::<Timeout, _>(|t| t.after_ms > 5000));

        // Encounter order preserved in the matched subset.
        let timeouts = outcome.errors_of_type::<Timeout>();
        let after: Vec<u64> = timeouts.iter().map(|t| t.after_ms).collect();
        assert_eq!(after, vec![100, 900]);
    }

    #[test]
    fn typed_search_is_flat_over_causes() {
        #[derive(Debug)]
        struct Inner(crate::Metadata);
        impl std::fmt::Display for Inner {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "inner")
            }
        }
        impl crate::Reason for Inner {
            fn message(&self) -> &str {
                "inner"
            }
            fn metadata(&self) -> &crate::Metadata {
                &self.0
            }
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }
        impl ErrorReason for Inner {}

        let outer = Error::new("outer").caused_by(Inner(crate::Metadata::new()));
        let outcome: Outcome<()> = Outcome::fail(outer);

        // Inner sits in the cause tree, not in the log itself.
        assert!(!outcome.has_error::<Inner>());
        assert!(outcome.has_error::<Error>());
    }

    #[test]
    fn typed_success_search() {
        let outcome: Outcome<()> = Outcome::new()
            .with_success(Success::new("warm"))
            .with_error("cold");

        assert!(outcome.has_success::<Success>());
        assert!(outcome.has_success_matching::<Success, _>(|s| {
            crate::Reason::message(s) == "warm"
        }));
        assert_eq!(outcome.successes_of_type::<Success>().len(), 1);
    }

    #[test]
    fn source_error_search() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let outcome: Outcome<()> = Outcome::fail(Error::from_source(io));

        assert!(outcome.has_source_error::<std::io::Error>());
        assert!(outcome.has_source_error_matching::<std::io::Error, _>(|e| {
            e.kind() == std::io::ErrorKind::PermissionDenied
        }));
        assert!(!outcome.has_source_error::<std::fmt::Error>());
    }

    #[test]
    fn merge_concatenates_in_order() {
        let merged = Outcome::merge(vec![
            Outcome::ok(1).with_success("a"),
            Outcome::ok(2).with_success("b"),
        ]);

        assert!(merged.is_success());
        assert_eq!(merged.into_value(), Some(vec![1, 2]));
    }

    #[test]
    fn merge_fails_when_any_input_failed() {
        let merged = Outcome::merge(vec![
            Outcome::ok(1),
            Outcome::fail("broken"),
            Outcome::ok(3).with_success("late"),
        ]);

        assert!(merged.is_failed());
        assert_eq!(merged.reasons().len(), 2);
        assert_eq!(merged.into_value(), None);
    }

    #[test]
    fn display_renders_transcript_in_order() {
        let outcome: Outcome<()> = Outcome::new()
            .with_error(Error::new("first bad"))
            .with_success("then good");

        let text = format!("{}", outcome);
        assert!(text.starts_with("failed with 2 reason(s):"));
        let first = text.find("first bad").unwrap();
        let second = text.find("then good").unwrap();
        assert!(first < second);
    }

    #[test]
    fn display_of_empty_outcome() {
        let outcome: Outcome<()> = Outcome::new();
        assert_eq!(format!("{}", outcome), "ok");
    }
}
