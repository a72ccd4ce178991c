//! Reason taxonomy: errors and successes recorded by an outcome
//!
//! A reason is one entry in an outcome's log. The taxonomy is a closed sum
//! with an open extension point: [`ReasonEntry`] distinguishes errors from
//! successes, while the payloads are trait objects so user-defined reason
//! kinds plug in by implementing [`ErrorReason`] or [`SuccessReason`].
//!
//! Reasons are immutable once appended to an outcome. They are built with
//! by-value builder methods and then shared behind `Arc`, which is what
//! makes cloning an outcome cheap and alias-safe.
//!
//! # Examples
//!
//! ## Building reasons
//!
//! ```
//! use clearwater::{Error, Success};
//!
//! let error = Error::new("connection refused")
//!     .with_meta("host", "db-01")
//!     .caused_by("socket closed");
//!
//! assert_eq!(error.message(), "connection refused");
//!
//! let note = Success::new("cache warmed").with_meta("entries", 128);
//! assert_eq!(note.message(), "cache warmed");
//! # use clearwater::Reason;
//! ```
//!
//! ## Custom reason kinds
//!
//! ```
//! use std::any::Any;
//! use std::fmt;
//! use clearwater::{ErrorReason, Metadata, Outcome, Reason};
//!
//! #[derive(Debug)]
//! struct NotFound {
//!     resource: String,
//!     metadata: Metadata,
//! }
//!
//! impl fmt::Display for NotFound {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "{} not found", self.resource)
//!     }
//! }
//!
//! impl Reason for NotFound {
//!     fn message(&self) -> &str {
//!         &self.resource
//!     }
//!     fn metadata(&self) -> &Metadata {
//!         &self.metadata
//!     }
//!     fn as_any(&self) -> &dyn Any {
//!         self
//!     }
//! }
//!
//! impl ErrorReason for NotFound {}
//!
//! let outcome: Outcome<i32> = Outcome::fail(NotFound {
//!     resource: "user/42".to_string(),
//!     metadata: Metadata::new(),
//! });
//! assert!(outcome.has_error::<NotFound>());
//! ```

use std::any::Any;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use crate::metadata::{MetaValue, Metadata};

/// Base capability shared by every reason: a message and a metadata map.
///
/// `as_any` is the downcast hook used by the typed queries on
/// [`Outcome`](crate::Outcome) (`has_error::<K>`, `errors_of_type::<K>`);
/// implementors return `self`.
pub trait Reason: fmt::Debug + fmt::Display + Send + Sync + 'static {
    /// Human-readable message (may be empty).
    fn message(&self) -> &str;

    /// Metadata attached to this reason.
    fn metadata(&self) -> &Metadata;

    /// Downcast hook for typed reason queries.
    fn as_any(&self) -> &dyn Any;
}

/// A reason that marks its outcome as failed.
///
/// Errors may carry nested causing reasons (a finite tree, never a cycle)
/// and may wrap an underlying `std::error::Error` that triggered them.
/// Both members have empty defaults so simple error kinds only implement
/// [`Reason`].
pub trait ErrorReason: Reason {
    /// Causing reasons, outermost first. Default: none.
    fn causes(&self) -> &[Arc<dyn ErrorReason>] {
        &[]
    }

    /// The wrapped source error, if this reason was built from one.
    /// Default: none.
    fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        None
    }
}

/// A reason that records a success. Terminal: successes carry no causes.
pub trait SuccessReason: Reason {}

/// The default error reason: a message, metadata, optional causes, and an
/// optional wrapped source error.
///
/// # Examples
///
/// ```
/// use clearwater::{Error, ErrorReason, Reason};
///
/// let err = Error::new("query failed")
///     .with_meta("table", "users")
///     .caused_by(Error::new("timeout").with_meta("after_ms", 250));
///
/// assert_eq!(err.message(), "query failed");
/// assert_eq!(err.causes().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Error {
    message: String,
    metadata: Metadata,
    causes: Vec<Arc<dyn ErrorReason>>,
    source: Option<Arc<dyn StdError + Send + Sync>>,
}

impl Error {
    /// Create an error reason with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Error {
            message: message.into(),
            metadata: Metadata::new(),
            causes: Vec::new(),
            source: None,
        }
    }

    /// Create an error reason from an underlying error, using its `Display`
    /// output as the message and keeping it reachable through
    /// [`ErrorReason::source_error`].
    ///
    /// # Examples
    ///
    /// ```
    /// use clearwater::{Error, ErrorReason};
    ///
    /// let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    /// let err = Error::from_source(io);
    ///
    /// assert!(err.source_error().is_some());
    /// ```
    pub fn from_source(source: impl StdError + Send + Sync + 'static) -> Self {
        let message = source.to_string();
        Error {
            message,
            metadata: Metadata::new(),
            causes: Vec::new(),
            source: Some(Arc::new(source)),
        }
    }

    /// Attach a metadata entry, returning the updated reason.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }

    /// Append a causing reason.
    pub fn caused_by(mut self, cause: impl IntoError) -> Self {
        self.causes.push(cause.into_error());
        self
    }

    /// Attach an underlying source error without changing the message.
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.metadata.is_empty() {
            write!(f, " {}", self.metadata)?;
        }
        Ok(())
    }
}

impl Reason for Error {
    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl ErrorReason for Error {
    fn causes(&self) -> &[Arc<dyn ErrorReason>] {
        &self.causes
    }

    fn source_error(&self) -> Option<&(dyn StdError + Send + Sync + 'static)> {
        self.source.as_deref()
    }
}

/// The default success reason: a message and metadata.
///
/// # Examples
///
/// ```
/// use clearwater::{Reason, Success};
///
/// let note = Success::new("row inserted").with_meta("id", 42);
/// assert_eq!(note.message(), "row inserted");
/// ```
#[derive(Debug, Clone)]
pub struct Success {
    message: String,
    metadata: Metadata,
}

impl Success {
    /// Create a success reason with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Success {
            message: message.into(),
            metadata: Metadata::new(),
        }
    }

    /// Attach a metadata entry, returning the updated reason.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<MetaValue>) -> Self {
        self.metadata.insert(key, value);
        self
    }
}

impl fmt::Display for Success {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if !self.metadata.is_empty() {
            write!(f, " {}", self.metadata)?;
        }
        Ok(())
    }
}

impl Reason for Success {
    fn message(&self) -> &str {
        &self.message
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SuccessReason for Success {}

/// One entry in an outcome's reason log: either an error or a success.
///
/// This is the closed tag over the open [`ErrorReason`] / [`SuccessReason`]
/// payloads. Entries are cheap to clone; the payloads are shared.
#[derive(Debug, Clone)]
pub enum ReasonEntry {
    /// An error reason; its presence makes the outcome failed.
    Error(Arc<dyn ErrorReason>),
    /// A success reason; purely informational.
    Success(Arc<dyn SuccessReason>),
}

impl ReasonEntry {
    /// Wrap anything convertible to an error reason.
    pub fn error(error: impl IntoError) -> Self {
        ReasonEntry::Error(error.into_error())
    }

    /// Wrap anything convertible to a success reason.
    pub fn success(success: impl IntoSuccess) -> Self {
        ReasonEntry::Success(success.into_success())
    }

    /// The entry's message.
    pub fn message(&self) -> &str {
        match self {
            ReasonEntry::Error(e) => e.message(),
            ReasonEntry::Success(s) => s.message(),
        }
    }

    /// The entry's metadata.
    pub fn metadata(&self) -> &Metadata {
        match self {
            ReasonEntry::Error(e) => e.metadata(),
            ReasonEntry::Success(s) => s.metadata(),
        }
    }

    /// True for error entries.
    pub fn is_error(&self) -> bool {
        matches!(self, ReasonEntry::Error(_))
    }

    /// True for success entries.
    pub fn is_success(&self) -> bool {
        matches!(self, ReasonEntry::Success(_))
    }

    /// Borrow the error payload, if this is an error entry.
    pub fn as_error(&self) -> Option<&Arc<dyn ErrorReason>> {
        match self {
            ReasonEntry::Error(e) => Some(e),
            ReasonEntry::Success(_) => None,
        }
    }

    /// Borrow the success payload, if this is a success entry.
    pub fn as_success(&self) -> Option<&Arc<dyn SuccessReason>> {
        match self {
            ReasonEntry::Error(_) => None,
            ReasonEntry::Success(s) => Some(s),
        }
    }
}

impl From<Error> for ReasonEntry {
    fn from(error: Error) -> Self {
        ReasonEntry::Error(Arc::new(error))
    }
}

impl From<Success> for ReasonEntry {
    fn from(success: Success) -> Self {
        ReasonEntry::Success(Arc::new(success))
    }
}

fn fmt_error_tree(
    error: &dyn ErrorReason,
    depth: usize,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    if depth == 0 {
        write!(f, "error: {}", error.message())?;
    } else {
        write!(
            f,
            "\n{:indent$}caused by: {}",
            "",
            error.message(),
            indent = depth * 2
        )?;
    }
    if !error.metadata().is_empty() {
        write!(f, " {}", error.metadata())?;
    }
    if let Some(source) = error.source_error() {
        write!(f, " (source: {})", source)?;
    }
    for cause in error.causes() {
        fmt_error_tree(cause.as_ref(), depth + 1, f)?;
    }
    Ok(())
}

impl fmt::Display for ReasonEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReasonEntry::Error(e) => fmt_error_tree(e.as_ref(), 0, f),
            ReasonEntry::Success(s) => {
                write!(f, "success: {}", s.message())?;
                if !s.metadata().is_empty() {
                    write!(f, " {}", s.metadata())?;
                }
                Ok(())
            }
        }
    }
}

/// Conversion into a shared error reason.
///
/// This trait is the explicit, compile-time replacement for a global
/// string-to-error factory: `&str` and `String` convert into the default
/// [`Error`], any [`ErrorReason`] implementor converts into itself, and an
/// already-shared handle passes through untouched.
pub trait IntoError {
    /// Convert into a shared error reason.
    fn into_error(self) -> Arc<dyn ErrorReason>;
}

impl<R: ErrorReason> IntoError for R {
    fn into_error(self) -> Arc<dyn ErrorReason> {
        Arc::new(self)
    }
}

impl IntoError for &str {
    fn into_error(self) -> Arc<dyn ErrorReason> {
        Arc::new(Error::new(self))
    }
}

impl IntoError for String {
    fn into_error(self) -> Arc<dyn ErrorReason> {
        Arc::new(Error::new(self))
    }
}

impl IntoError for Arc<dyn ErrorReason> {
    fn into_error(self) -> Arc<dyn ErrorReason> {
        self
    }
}

/// Conversion into a shared success reason. Mirror of [`IntoError`].
pub trait IntoSuccess {
    /// Convert into a shared success reason.
    fn into_success(self) -> Arc<dyn SuccessReason>;
}

impl<S: SuccessReason> IntoSuccess for S {
    fn into_success(self) -> Arc<dyn SuccessReason> {
        Arc::new(self)
    }
}

impl IntoSuccess for &str {
    fn into_success(self) -> Arc<dyn SuccessReason> {
        Arc::new(Success::new(self))
    }
}

impl IntoSuccess for String {
    fn into_success(self) -> Arc<dyn SuccessReason> {
        Arc::new(Success::new(self))
    }
}

impl IntoSuccess for Arc<dyn SuccessReason> {
    fn into_success(self) -> Arc<dyn SuccessReason> {
        self
    }
}
