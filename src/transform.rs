//! Combinator algebra over outcomes
//!
//! Every combinator consumes its receiver and returns a new, independently
//! owned outcome, so a fluent chain can never mutate an earlier stage. To
//! keep an outcome across a transformation, clone it first: clones are
//! cheap because reason payloads are shared and immutable.
//!
//! The algebra:
//!
//! - [`map`](Outcome::map) transforms the carried value when successful.
//! - [`bind`](Outcome::bind) / [`then`](Outcome::then) sequence dependent
//!   stages with short-circuiting: a failed receiver skips the next stage
//!   while keeping every reason seen so far.
//! - [`map_errors`](Outcome::map_errors) /
//!   [`map_successes`](Outcome::map_successes) rewrite one side of the
//!   reason log. The asymmetry is deliberate: mapping errors is identity on
//!   a successful outcome, mapping successes runs regardless of status.
//! - `*_async` variants accept producers returning futures and suspend
//!   exactly once per call.
//!
//! # Examples
//!
//! ## A pipeline that accumulates reasons
//!
//! ```
//! use clearwater::Outcome;
//!
//! fn parse(raw: &str) -> Outcome<i32> {
//!     match raw.parse() {
//!         Ok(n) => Outcome::ok(n).with_success("parsed"),
//!         Err(_) => Outcome::fail("not a number"),
//!     }
//! }
//!
//! let outcome = parse("21")
//!     .map(|n| n * 2)
//!     .bind(|n| Outcome::ok(n + 1).with_success("bumped"));
//!
//! assert_eq!(*outcome.value(), 43);
//! assert_eq!(outcome.reasons().len(), 2);
//!
//! // The first failure halts later stages but keeps the log.
//! let outcome = parse("oops").bind(|n| Outcome::ok(n + 1));
//! assert!(outcome.is_failed());
//! assert_eq!(outcome.reasons().len(), 1);
//! ```
//!
//! ## Async stages
//!
//! ```
//! use clearwater::Outcome;
//!
//! # tokio_test::block_on(async {
//! let outcome = Outcome::ok(5)
//!     .bind_async(|x| async move { Outcome::ok(x * 2) })
//!     .await;
//!
//! assert_eq!(*outcome.value(), 10);
//! # });
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::outcome::Outcome;
use crate::reason::{ErrorReason, IntoError, IntoSuccess, ReasonEntry, SuccessReason};

impl<T> Outcome<T> {
    /// Transform the carried value when successful.
    ///
    /// The mapper is not invoked when the outcome is failed or when no
    /// value was assigned; reasons are carried over unchanged either way,
    /// and a failed output's value is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::Outcome;
    ///
    /// let doubled = Outcome::ok(5).map(|x| x * 2);
    /// assert_eq!(*doubled.value(), 10);
    ///
    /// let failed: Outcome<String> = Outcome::<i32>::fail("e").map(|x| x.to_string());
    /// assert!(failed.is_failed());
    /// assert_eq!(failed.value_or_default(), String::new());
    /// ```
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        let failed = self.is_failed();
        let (reasons, value) = self.into_parts();
        let value = if failed { None } else { value.map(f) };
        Outcome::from_parts(reasons, value)
    }

    /// Transform the carried value through an async mapper when successful.
    ///
    /// Suspends exactly once; the mapper is never invoked on a failed
    /// outcome.
    pub async fn map_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = U>,
    {
        let failed = self.is_failed();
        let (reasons, value) = self.into_parts();
        let value = match (failed, value) {
            (false, Some(v)) => Some(f(v).await),
            _ => None,
        };
        Outcome::from_parts(reasons, value)
    }

    /// Replace every error reason with `f(error)`, preserving success
    /// reasons verbatim and keeping the log order.
    ///
    /// Identity on a successful outcome: the mapper is never invoked and
    /// the receiver is returned as-is. (Mapping successes is meaningful
    /// regardless of status, so [`map_successes`](Outcome::map_successes)
    /// behaves differently by design.)
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::{Error, Outcome, Reason};
    ///
    /// let outcome: Outcome<()> = Outcome::fail("timeout")
    ///     .map_errors(|e| Error::new(format!("db: {}", e.message())));
    ///
    /// assert_eq!(outcome.errors()[0].message(), "db: timeout");
    /// ```
    pub fn map_errors<F, R>(self, f: F) -> Self
    where
        F: Fn(&dyn ErrorReason) -> R,
        R: IntoError,
    {
        if self.is_success() {
            return self;
        }
        let (reasons, value) = self.into_parts();
        let reasons = reasons
            .into_iter()
            .map(|entry| match entry {
                ReasonEntry::Error(e) => ReasonEntry::Error(f(e.as_ref()).into_error()),
                success => success,
            })
            .collect();
        Outcome::from_parts(reasons, value)
    }

    /// Async form of [`map_errors`](Outcome::map_errors); errors are mapped
    /// one at a time, in log order. The mapper receives the shared handle
    /// so the returned future owns its input.
    pub async fn map_errors_async<F, Fut, R>(self, f: F) -> Self
    where
        F: Fn(Arc<dyn ErrorReason>) -> Fut,
        Fut: Future<Output = R>,
        R: IntoError,
    {
        if self.is_success() {
            return self;
        }
        let (reasons, value) = self.into_parts();
        let mut mapped = Vec::with_capacity(reasons.len());
        for entry in reasons {
            match entry {
                ReasonEntry::Error(e) => {
                    mapped.push(ReasonEntry::Error(f(e).await.into_error()));
                }
                success => mapped.push(success),
            }
        }
        Outcome::from_parts(mapped, value)
    }

    /// Replace every success reason with `f(success)`, preserving error
    /// reasons verbatim and keeping the log order. Runs regardless of the
    /// outcome's status.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::{Outcome, Reason, Success};
    ///
    /// let outcome = Outcome::ok(1)
    ///     .with_success("step done")
    ///     .map_successes(|s| Success::new(format!("audit: {}", s.message())));
    ///
    /// assert_eq!(outcome.successes()[0].message(), "audit: step done");
    /// ```
    pub fn map_successes<F, R>(self, f: F) -> Self
    where
        F: Fn(&dyn SuccessReason) -> R,
        R: IntoSuccess,
    {
        let (reasons, value) = self.into_parts();
        let reasons = reasons
            .into_iter()
            .map(|entry| match entry {
                ReasonEntry::Success(s) => ReasonEntry::Success(f(s.as_ref()).into_success()),
                error => error,
            })
            .collect();
        Outcome::from_parts(reasons, value)
    }

    /// Sequence a dependent stage on the carried value.
    ///
    /// The output starts with the receiver's reasons. When the receiver is
    /// failed, `f` is never invoked and the output is that reason log with
    /// an absent value (short-circuit). When successful, `f(value)` runs
    /// and its reasons are appended; its value becomes the output's value.
    ///
    /// # Panics
    ///
    /// Panics when called on a successful outcome whose value slot was
    /// never assigned, which is a contract violation by the caller. Use
    /// [`then`](Outcome::then) for stages that take no input.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::Outcome;
    ///
    /// let outcome = Outcome::ok(5).bind(|x| Outcome::ok(x * 2).with_success("doubled"));
    /// assert_eq!(*outcome.value(), 10);
    /// assert_eq!(outcome.reasons().len(), 1);
    /// ```
    pub fn bind<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Outcome<U>,
    {
        let failed = self.is_failed();
        let (mut reasons, value) = self.into_parts();
        if failed {
            return Outcome::from_parts(reasons, None);
        }
        let input = match value {
            Some(v) => v,
            None => panic!("bind called on a successful outcome with no assigned value"),
        };
        let (next_reasons, next_value) = f(input).into_parts();
        reasons.extend(next_reasons);
        Outcome::from_parts(reasons, next_value)
    }

    /// Async form of [`bind`](Outcome::bind). Suspends exactly once, on
    /// the producer's future; the producer is never invoked when the
    /// receiver is failed.
    ///
    /// # Panics
    ///
    /// Same contract as [`bind`](Outcome::bind).
    pub async fn bind_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        let failed = self.is_failed();
        let (mut reasons, value) = self.into_parts();
        if failed {
            return Outcome::from_parts(reasons, None);
        }
        let input = match value {
            Some(v) => v,
            None => panic!("bind_async called on a successful outcome with no assigned value"),
        };
        let (next_reasons, next_value) = f(input).await.into_parts();
        reasons.extend(next_reasons);
        Outcome::from_parts(reasons, next_value)
    }

    /// Sequence a stage that takes no input: [`bind`](Outcome::bind) for
    /// the no-carried-value shapes. The receiver's value slot, if any, is
    /// dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::Outcome;
    ///
    /// let outcome: Outcome<i32> = Outcome::<()>::new()
    ///     .with_success("connected")
    ///     .then(|| Outcome::ok(7));
    ///
    /// assert_eq!(*outcome.value(), 7);
    /// assert_eq!(outcome.reasons().len(), 1);
    /// ```
    pub fn then<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce() -> Outcome<U>,
    {
        let failed = self.is_failed();
        let (mut reasons, _) = self.into_parts();
        if failed {
            return Outcome::from_parts(reasons, None);
        }
        let (next_reasons, next_value) = f().into_parts();
        reasons.extend(next_reasons);
        Outcome::from_parts(reasons, next_value)
    }

    /// Async form of [`then`](Outcome::then).
    pub async fn then_async<U, F, Fut>(self, f: F) -> Outcome<U>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Outcome<U>>,
    {
        let failed = self.is_failed();
        let (mut reasons, _) = self.into_parts();
        if failed {
            return Outcome::from_parts(reasons, None);
        }
        let (next_reasons, next_value) = f().await.into_parts();
        reasons.extend(next_reasons);
        Outcome::from_parts(reasons, next_value)
    }

    /// Convert to a different value shape, keeping the reasons.
    ///
    /// The failure state is unaffected; `value` is attached only when the
    /// outcome is successful.
    pub fn into_valued<U>(self, value: U) -> Outcome<U> {
        let failed = self.is_failed();
        let (reasons, _) = self.into_parts();
        Outcome::from_parts(reasons, if failed { None } else { Some(value) })
    }

    /// Drop the carried value, keeping the reasons. The failure state is
    /// unaffected, and the result can be sequenced with
    /// [`then`](Outcome::then).
    pub fn into_unit(self) -> Outcome<()> {
        let (reasons, _) = self.into_parts();
        Outcome::from_parts(reasons, Some(()))
    }

    /// Await several externally supplied outcome-producing futures and
    /// merge the results, reasons in input order.
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::Outcome;
    ///
    /// # tokio_test::block_on(async {
    /// let merged = Outcome::join((1..=2).map(|n| async move { Outcome::ok(n) })).await;
    ///
    /// assert_eq!(merged.into_value(), Some(vec![1, 2]));
    /// # });
    /// ```
    pub async fn join<I, Fut>(futures: I) -> Outcome<Vec<T>>
    where
        I: IntoIterator<Item = Fut>,
        Fut: Future<Output = Outcome<T>>,
    {
        let outcomes = futures::future::join_all(futures).await;
        Outcome::merge(outcomes)
    }
}
