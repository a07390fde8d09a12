//! Common ID Types
//!
//! Type-safe wrappers around store-assigned integer keys.
//! Keys are monotonic and start at 1; `0` is never a real record.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::Id;
/// struct UserMarker;
/// type UserId = Id<UserMarker>;
///
/// let id = UserId::from_raw(7);
/// assert_eq!(id.get(), 7);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a raw key (e.g., from a database row)
    #[inline]
    pub const fn from_raw(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Convert an unsigned subject value into an ID.
    ///
    /// Returns `None` for the `0` sentinel and for values outside the key range.
    pub fn from_subject(subject: u64) -> Option<Self> {
        if subject == 0 {
            return None;
        }
        i64::try_from(subject).ok().map(Self::from_raw)
    }

    /// Get the raw key
    #[inline]
    pub const fn get(&self) -> i64 {
        self.value
    }

    /// Unsigned representation used in token subjects
    #[inline]
    pub fn as_subject(&self) -> u64 {
        u64::try_from(self.value).unwrap_or(0)
    }
}

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> FromStr for Id<T> {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self::from_raw)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        i64::deserialize(deserializer).map(Self::from_raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Apple;
    struct Pear;

    #[test]
    fn test_id_type_safety() {
        let apple: Id<Apple> = Id::from_raw(1);
        let pear: Id<Pear> = Id::from_raw(1);

        // Same raw value, different types
        assert_eq!(apple.get(), pear.get());
    }

    #[test]
    fn test_from_subject() {
        assert!(Id::<Apple>::from_subject(0).is_none());
        assert!(Id::<Apple>::from_subject(u64::MAX).is_none());
        assert_eq!(Id::<Apple>::from_subject(42).unwrap().get(), 42);
        assert_eq!(Id::<Apple>::from_raw(42).as_subject(), 42);
    }

    #[test]
    fn test_parse_and_display() {
        let id: Id<Apple> = "15".parse().unwrap();
        assert_eq!(id.to_string(), "15");
        assert!("abc".parse::<Id<Apple>>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id: Id<Apple> = Id::from_raw(9);
        assert_eq!(serde_json::to_string(&id).unwrap(), "9");
        let back: Id<Apple> = serde_json::from_str("9").unwrap();
        assert_eq!(back, id);
    }
}
