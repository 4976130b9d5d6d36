//! In-memory view of a settings file

use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single `key=value` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// The complete content of a settings file.
///
/// Keys are unique. Iteration follows insertion order: replacing the value
/// of an existing key keeps its position, new keys are appended. Equality
/// ignores order.
#[derive(Debug, Clone, Default)]
pub struct ConfigSet {
    entries: Vec<ConfigEntry>,
}

impl ConfigSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the stored string for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.position(key).map(|idx| self.entries[idx].value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => Some(std::mem::replace(&mut self.entries[idx].value, value)),
            None => {
                self.entries.push(ConfigEntry { key, value });
                None
            }
        }
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.position(key)?;
        Some(self.entries.remove(idx).value)
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(as_pair)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }
}

fn as_pair(entry: &ConfigEntry) -> (&str, &str) {
    (entry.key.as_str(), entry.value.as_str())
}

impl PartialEq for ConfigSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for ConfigSet {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ConfigSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for ConfigSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a ConfigSet {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, ConfigEntry>,
        fn(&'a ConfigEntry) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(as_pair as fn(&'a ConfigEntry) -> (&'a str, &'a str))
    }
}

impl Serialize for ConfigSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_existing_key_keeps_position() {
        let mut set: ConfigSet = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();

        let previous = set.insert("A", "9");

        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(set.keys().collect::<Vec<_>>(), ["A", "B", "C"]);
        assert_eq!(set.get("A"), Some("9"));
    }

    #[test]
    fn insert_new_key_appends() {
        let mut set: ConfigSet = [("B", "2")].into_iter().collect();
        set.insert("A", "1");
        assert_eq!(set.keys().collect::<Vec<_>>(), ["B", "A"]);
    }

    #[test]
    fn remove_keeps_relative_order() {
        let mut set: ConfigSet = [("A", "1"), ("B", "2"), ("C", "3")].into_iter().collect();

        assert_eq!(set.remove("B").as_deref(), Some("2"));
        assert_eq!(set.remove("B"), None);
        assert_eq!(set.keys().collect::<Vec<_>>(), ["A", "C"]);
    }

    #[test]
    fn equality_ignores_order() {
        let a: ConfigSet = [("A", "1"), ("B", "2")].into_iter().collect();
        let b: ConfigSet = [("B", "2"), ("A", "1")].into_iter().collect();
        let c: ConfigSet = [("A", "1"), ("B", "3")].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn collecting_duplicates_keeps_last_value() {
        let set: ConfigSet = [("A", "1"), ("A", "2")].into_iter().collect();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("A"), Some("2"));
    }

    #[test]
    fn borrowed_iteration_yields_pairs() {
        let set: ConfigSet = [("A", "1")].into_iter().collect();
        let pairs: Vec<(&str, &str)> = (&set).into_iter().collect();
        assert_eq!(pairs, [("A", "1")]);
    }
}
