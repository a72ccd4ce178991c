//! Insertion-ordered metadata attached to reasons
//!
//! Every reason carries a [`Metadata`] map: string keys paired with small
//! displayable [`MetaValue`]s. Keys are unique; inserting an existing key
//! replaces the value but keeps the key's original position, so display
//! order is stable across updates.
//!
//! # Examples
//!
//! ```
//! use clearwater::metadata::{Metadata, MetaValue};
//!
//! let mut meta = Metadata::new();
//! meta.insert("retry_count", 3);
//! meta.insert("endpoint", "users/42");
//!
//! assert_eq!(meta.get("retry_count"), Some(&MetaValue::Int(3)));
//! assert_eq!(meta.len(), 2);
//! ```

use std::fmt;

/// A small displayable value stored in reason metadata.
///
/// Conversions exist from the obvious Rust primitives, so call sites can
/// pass literals directly:
///
/// ```
/// use clearwater::metadata::MetaValue;
///
/// let v: MetaValue = "hello".into();
/// assert_eq!(v, MetaValue::Str("hello".to_string()));
///
/// let v: MetaValue = 3.into();
/// assert_eq!(v, MetaValue::Int(3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    /// Boolean flag
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating-point number
    Float(f64),
    /// Owned string
    Str(String),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Bool(b) => write!(f, "{}", b),
            MetaValue::Int(i) => write!(f, "{}", i),
            MetaValue::Float(x) => write!(f, "{}", x),
            MetaValue::Str(s) => write!(f, "{}", s),
        }
    }
}

impl From<bool> for MetaValue {
    fn from(b: bool) -> Self {
        MetaValue::Bool(b)
    }
}

impl From<i64> for MetaValue {
    fn from(i: i64) -> Self {
        MetaValue::Int(i)
    }
}

impl From<i32> for MetaValue {
    fn from(i: i32) -> Self {
        MetaValue::Int(i64::from(i))
    }
}

impl From<u32> for MetaValue {
    fn from(i: u32) -> Self {
        MetaValue::Int(i64::from(i))
    }
}

impl From<usize> for MetaValue {
    fn from(i: usize) -> Self {
        // Saturate rather than wrap when the value exceeds i64::MAX.
        MetaValue::Int(i64::try_from(i).unwrap_or(i64::MAX))
    }
}

impl From<f64> for MetaValue {
    fn from(x: f64) -> Self {
        MetaValue::Float(x)
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Str(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Str(s)
    }
}

/// An insertion-ordered map of string keys to [`MetaValue`]s.
///
/// Backed by a `Vec` of pairs: reason metadata is small (a handful of
/// entries), lookup is by linear scan, and iteration order is exactly
/// insertion order.
///
/// # Examples
///
/// ```
/// use clearwater::metadata::Metadata;
///
/// let mut meta = Metadata::new();
/// meta.insert("attempt", 1);
/// meta.insert("host", "db-01");
/// meta.insert("attempt", 2); // replaces in place, keeps position
///
/// let keys: Vec<&str> = meta.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, vec!["attempt", "host"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    /// Create an empty metadata map.
    pub fn new() -> Self {
        Metadata {
            entries: Vec::new(),
        }
    }

    /// Insert a key/value pair.
    ///
    /// If the key already exists, its value is replaced and the key keeps
    /// its original position in display order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetaValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no entries are present.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Merge another metadata map into this one, entry by entry.
    ///
    /// Entries from `other` follow the same replace-in-place rule as
    /// [`Metadata::insert`].
    pub fn extend(&mut self, other: Metadata) {
        for (k, v) in other.entries {
            self.insert(k, v);
        }
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        write!(f, "}}")
    }
}

impl<K: Into<String>, V: Into<MetaValue>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Metadata::new();
        for (k, v) in iter {
            meta.insert(k, v);
        }
        meta
    }
}
