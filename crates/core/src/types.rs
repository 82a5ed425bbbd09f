//! Value types shared by the facade API
//!
//! - [`NonEmpty`]: member lists for multi-member set and bloom filter calls
//! - [`ScoredMember`]: one entry of a sorted-set range
//! - [`Ttl`]: remaining lifetime of a key

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// An ordered sequence with at least one element.
///
/// Commands such as `SADD` and `BF.MADD` reject an empty member list, so the
/// facade takes this instead of a bare slice.
///
/// # Examples
///
/// ```
/// use nsredis_core::NonEmpty;
///
/// let members = NonEmpty::<&str>::try_from(vec!["a", "b"]).unwrap();
/// assert_eq!(members.len(), 2);
/// assert_eq!(members.first(), &"a");
///
/// assert!(NonEmpty::<&str>::try_from(Vec::<&str>::new()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmpty<T> {
    items: Vec<T>,
}

impl<T> NonEmpty<T> {
    /// A list holding exactly `item`.
    pub fn one(item: T) -> Self {
        Self { items: vec![item] }
    }

    /// `head` followed by `tail`.
    pub fn new(head: T, tail: Vec<T>) -> Self {
        let mut items = Vec::with_capacity(tail.len() + 1);
        items.push(head);
        items.extend(tail);
        Self { items }
    }

    /// First element.
    pub fn first(&self) -> &T {
        &self.items[0]
    }

    /// Number of elements, always at least one.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Always false; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate in order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrow as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Unwrap into the underlying vector.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> TryFrom<Vec<T>> for NonEmpty<T> {
    type Error = Error;

    fn try_from(items: Vec<T>) -> Result<Self> {
        if items.is_empty() {
            return Err(Error::InvalidInput("member list must not be empty".into()));
        }
        Ok(Self { items })
    }
}

impl<T: Clone> TryFrom<&[T]> for NonEmpty<T> {
    type Error = Error;

    fn try_from(items: &[T]) -> Result<Self> {
        Self::try_from(items.to_vec())
    }
}

impl<T> From<NonEmpty<T>> for Vec<T> {
    fn from(list: NonEmpty<T>) -> Self {
        list.items
    }
}

impl<'a, T> IntoIterator for &'a NonEmpty<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A sorted-set member with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredMember {
    /// Member name
    pub member: String,
    /// Score used for ordering
    pub score: f64,
}

impl ScoredMember {
    /// Create a scored member.
    pub fn new(member: impl Into<String>, score: f64) -> Self {
        Self {
            member: member.into(),
            score,
        }
    }
}

impl From<(String, f64)> for ScoredMember {
    fn from((member, score): (String, f64)) -> Self {
        Self { member, score }
    }
}

/// Remaining lifetime of an existing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ttl {
    /// The key exists and never expires.
    Persistent,
    /// The key expires after the given duration.
    Expires(Duration),
}

impl Ttl {
    /// Interpret a `TTL` reply. Returns `None` for `-2` (no such key).
    pub fn from_reply(seconds: i64) -> Option<Self> {
        match seconds {
            -2 => None,
            s if s < 0 => Some(Ttl::Persistent),
            s => Some(Ttl::Expires(Duration::from_secs(s as u64))),
        }
    }

    /// Remaining time, `None` when persistent.
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Ttl::Persistent => None,
            Ttl::Expires(d) => Some(*d),
        }
    }

    /// True when the key will expire.
    pub fn is_expiring(&self) -> bool {
        matches!(self, Ttl::Expires(_))
    }
}
