//! # Clearwater
//!
//! > *"Clear water hides nothing"*
//!
//! A Rust library for reason-carrying outcomes: every result remembers why.
//!
//! ## Philosophy
//!
//! An [`Outcome`] models the result of an operation as an explicit value
//! instead of an exception. It carries an ordered, append-only log of
//! **reasons** (errors and successes) accumulated across a pipeline of
//! transformations. Success and failure are *derived* from the log: an
//! outcome is failed exactly when the log contains at least one error.
//!
//! ## Quick Example
//!
//! ```rust
//! use clearwater::{Error, Outcome};
//!
//! fn find_user(id: u64) -> Outcome<String> {
//!     if id == 42 {
//!         Outcome::ok("Arthur".to_string()).with_success("cache hit")
//!     } else {
//!         Outcome::fail(Error::new("user not found").with_meta("id", id as i64))
//!     }
//! }
//!
//! let greeting = find_user(42)
//!     .map(|name| format!("Hello, {}!", name))
//!     .bind(|msg| Outcome::ok(msg.len()).with_success("measured"));
//!
//! assert!(greeting.is_success());
//! assert_eq!(*greeting.value(), 14);
//! assert_eq!(greeting.reasons().len(), 2);
//!
//! // Failures short-circuit later stages but keep the whole log.
//! let missing = find_user(7).map(|name| name.to_uppercase());
//! assert!(missing.is_failed());
//! assert!(missing.to_string().contains("user not found"));
//! ```
//!
//! For async pipelines, each combinator has an `*_async` form that awaits
//! the supplied producer exactly once.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod metadata;
pub mod outcome;
pub mod reason;
pub mod testing;
pub mod transform;

#[cfg(feature = "tracing")]
pub mod trace;

// Re-exports
pub use metadata::{MetaValue, Metadata};
pub use outcome::{Outcome, ValueAccessError};
pub use reason::{
    Error, ErrorReason, IntoError, IntoSuccess, Reason, ReasonEntry, Success, SuccessReason,
};

#[cfg(feature = "tracing")]
pub use trace::OutcomeTraceExt;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::metadata::{MetaValue, Metadata};
    pub use crate::outcome::{Outcome, ValueAccessError};
    pub use crate::reason::{
        Error, ErrorReason, IntoError, IntoSuccess, Reason, ReasonEntry, Success, SuccessReason,
    };

    #[cfg(feature = "tracing")]
    pub use crate::trace::OutcomeTraceExt;
}
