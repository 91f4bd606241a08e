//! Frequency table of summarized events.

use crate::audit::types::Summary;
use std::collections::hash_map::{self, HashMap};
use std::hash::Hash;

/// Multiset of observed keys, compressed by equality into counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<K: Eq + Hash = Summary> {
    counts: HashMap<K, usize>,
}

impl<K: Eq + Hash> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one more observation of `key`.
    pub fn record(&mut self, key: K) {
        self.add(key, 1);
    }

    /// Adds `count` observations of `key`.
    pub fn add(&mut self, key: K, count: usize) {
        *self.counts.entry(key).or_insert(0) += count;
    }

    pub fn contains(&self, key: &K) -> bool {
        self.counts.contains_key(key)
    }

    pub fn get(&self, key: &K) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, K, usize> {
        self.counts.iter()
    }
}

impl<K: Eq + Hash> FromIterator<(K, usize)> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = (K, usize)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, count) in iter {
            table.add(key, count);
        }
        table
    }
}

impl<K: Eq + Hash> IntoIterator for FrequencyTable<K> {
    type Item = (K, usize);
    type IntoIter = hash_map::IntoIter<K, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

impl<'a, K: Eq + Hash> IntoIterator for &'a FrequencyTable<K> {
    type Item = (&'a K, &'a usize);
    type IntoIter = hash_map::Iter<'a, K, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(user: &str) -> Summary {
        Summary {
            user: user.to_string(),
            ..Summary::default()
        }
    }

    #[test]
    fn test_record_and_add() {
        let mut table = FrequencyTable::new();
        table.record(summary("alice"));
        table.record(summary("alice"));
        table.add(summary("bob"), 5);

        assert_eq!(table.get(&summary("alice")), 2);
        assert_eq!(table.get(&summary("bob")), 5);
        assert_eq!(table.get(&summary("carol")), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn test_from_iter_merges_duplicates() {
        let table: FrequencyTable = vec![(summary("a"), 1), (summary("a"), 2), (summary("b"), 3)]
            .into_iter()
            .collect();
        assert_eq!(table.get(&summary("a")), 3);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_equality_ignores_insertion_order() {
        let mut left = FrequencyTable::new();
        left.record(summary("a"));
        left.record(summary("b"));

        let mut right = FrequencyTable::new();
        right.record(summary("b"));
        right.record(summary("a"));

        assert_eq!(left, right);
    }
}
