//! Ordered map type for ZON objects.
//!
//! [`ZonMap`] wraps an [`IndexMap`] so object fields keep the order they were
//! decoded or inserted in. Decoding `.{ .b = 1, .a = 2 }` and encoding it again
//! yields the fields in the same order.
//!
//! Keys are stored without the leading `.` that marks them in ZON text.
//!
//! Equality ignores order: two maps are equal when they hold the same keys
//! with equal values.
//!
//! ## Examples
//!
//! ```rust
//! use serde_zon::{ZonMap, Value};
//!
//! let mut map = ZonMap::new();
//! map.insert("name".to_string(), Value::from("Alice"));
//! map.insert("age".to_string(), Value::from(30));
//!
//! assert_eq!(map.len(), 2);
//! assert_eq!(map.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! ```

use indexmap::IndexMap;
use std::collections::HashMap;

/// An ordered map of string keys to ZON values.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{ZonMap, Value};
///
/// let mut map = ZonMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ZonMap(IndexMap<String, crate::Value>);

impl ZonMap {
    /// Creates an empty `ZonMap`.
    #[must_use]
    pub fn new() -> Self {
        ZonMap(IndexMap::new())
    }

    /// Creates an empty `ZonMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ZonMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// A repeated key keeps its original position and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::{ZonMap, Value};
    ///
    /// let mut map = ZonMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: crate::Value) -> Option<crate::Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&crate::Value> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut crate::Value> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<crate::Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sorts entries by key.
    pub fn sort_keys(&mut self) {
        self.0.sort_keys();
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, crate::Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, crate::Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, crate::Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, crate::Value>> for ZonMap {
    fn from(map: HashMap<String, crate::Value>) -> Self {
        ZonMap(map.into_iter().collect())
    }
}

impl From<ZonMap> for HashMap<String, crate::Value> {
    fn from(map: ZonMap) -> Self {
        map.0.into_iter().collect()
    }
}

impl IntoIterator for ZonMap {
    type Item = (String, crate::Value);
    type IntoIter = indexmap::map::IntoIter<String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ZonMap {
    type Item = (&'a String, &'a crate::Value);
    type IntoIter = indexmap::map::Iter<'a, String, crate::Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, crate::Value)> for ZonMap {
    fn from_iter<T: IntoIterator<Item = (String, crate::Value)>>(iter: T) -> Self {
        ZonMap(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_equality_ignores_order() {
        let a: ZonMap = [("x".to_string(), Value::from(1)), ("y".to_string(), Value::from(2))]
            .into_iter()
            .collect();
        let b: ZonMap = [("y".to_string(), Value::from(2)), ("x".to_string(), Value::from(1))]
            .into_iter()
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map: ZonMap = ["a", "b", "c"]
            .iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect();
        map.remove("b");
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["a", "c"]);
    }

    #[test]
    fn test_sort_keys() {
        let mut map: ZonMap = ["zeta", "alpha", "mid"]
            .iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect();
        map.sort_keys();
        let keys: Vec<_> = map.keys().map(String::as_str).collect();
        assert_eq!(keys, ["alpha", "mid", "zeta"]);
    }
}
