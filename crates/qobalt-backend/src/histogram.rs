//! Outcome histograms.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A mapping from outcome string to observed count.
///
/// Outcome strings have length `num_clbits`; the character at position `i` is
/// the value of classical bit `i`. For a successful run the total always
/// equals the requested shot count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Histogram {
    counts: FxHashMap<String, u64>,
}

impl Histogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single outcome.
    pub fn record(&mut self, outcome: impl Into<String>) {
        self.add(outcome, 1);
    }

    /// Add `n` observations of an outcome.
    pub fn add(&mut self, outcome: impl Into<String>, n: u64) {
        *self.counts.entry(outcome.into()).or_insert(0) += n;
    }

    /// Get the count for an outcome (0 if never observed).
    pub fn get(&self, outcome: &str) -> u64 {
        self.counts.get(outcome).copied().unwrap_or(0)
    }

    /// Total number of observations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if the histogram is empty.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(outcome, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequent outcome, if any. Ties break toward the
    /// lexicographically smaller outcome so the answer is deterministic.
    pub fn most_frequent(&self) -> Option<(&str, u64)> {
        self.counts
            .iter()
            .map(|(k, &v)| (k.as_str(), v))
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
    }

    /// Merge another histogram into this one.
    pub fn merge(&mut self, other: Histogram) {
        for (outcome, count) in other.counts {
            *self.counts.entry(outcome).or_insert(0) += count;
        }
    }

    /// The histogram as a vector sorted by outcome string.
    pub fn to_sorted_vec(&self) -> Vec<(String, u64)> {
        let mut entries: Vec<_> = self
            .counts
            .iter()
            .map(|(k, &v)| (k.clone(), v))
            .collect();
        entries.sort();
        entries
    }
}

impl FromIterator<String> for Histogram {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut hist = Histogram::new();
        for outcome in iter {
            hist.record(outcome);
        }
        hist
    }
}
