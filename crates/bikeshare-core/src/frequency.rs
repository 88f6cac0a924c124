//! Frequency tables with explicit tie-break rules
//!
//! Modes are never left to hash-map iteration order. Each table remembers
//! where a value first appeared so ties can be broken either by the
//! smallest value ([`FrequencyTable::mode_smallest`]) or by first
//! appearance in row order ([`FrequencyTable::mode_first_seen`]).
//!
//! # Examples
//!
//! ```
//! use bikeshare_core::frequency::FrequencyTable;
//!
//! let months: FrequencyTable<u32> = [2, 1, 2, 1, 3].into_iter().collect();
//! assert_eq!(months.mode_smallest(), Some(&1));
//! assert_eq!(months.mode_first_seen(), Some(&2));
//! ```

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Counts occurrences of values in a single pass
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    tallies: HashMap<K, Tally>,
    total: usize,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            tallies: HashMap::new(),
            total: 0,
        }
    }
}

impl<K: Eq + Hash> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `value`
    pub fn insert(&mut self, value: K) {
        let position = self.total;
        self.tallies
            .entry(value)
            .and_modify(|tally| tally.count += 1)
            .or_insert(Tally {
                count: 1,
                first_seen: position,
            });
        self.total += 1;
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Number of values inserted
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, value: &K) -> usize {
        self.tallies.get(value).map_or(0, |tally| tally.count)
    }

    /// Most frequent value; ties go to the value seen first
    pub fn mode_first_seen(&self) -> Option<&K> {
        self.tallies
            .iter()
            .min_by(|(_, a), (_, b)| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.first_seen.cmp(&b.first_seen))
            })
            .map(|(value, _)| value)
    }

    /// All values with their counts, most frequent first
    ///
    /// Values with equal counts are listed in first-seen order.
    pub fn counts(&self) -> Vec<(&K, usize)> {
        let mut rows: Vec<(&K, Tally)> = self.tallies.iter().map(|(k, t)| (k, *t)).collect();
        rows.sort_by(|(_, a), (_, b)| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        rows.into_iter().map(|(k, t)| (k, t.count)).collect()
    }
}

impl<K: Eq + Hash + Ord> FrequencyTable<K> {
    /// Most frequent value; ties go to the smallest value
    pub fn mode_smallest(&self) -> Option<&K> {
        self.tallies
            .iter()
            .min_by(|(va, a), (vb, b)| b.count.cmp(&a.count).then_with(|| va.cmp(vb)))
            .map(|(value, _)| value)
    }
}

impl<K: Eq + Hash> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        for value in iter {
            table.insert(value);
        }
        table
    }
}

impl<K: Eq + Hash> Extend<K> for FrequencyTable<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}
