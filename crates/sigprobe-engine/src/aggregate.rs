//! Outcome aggregation for a single sweep.
//!
//! Per-combination outcomes land in exactly one of two maps keyed by type
//! key. Buckets keep first-insertion key order and append argument lists in
//! invocation order; the constructor materializer relies on both.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use sigprobe_pool::Value;

/// Insertion-ordered map from type key to every argument list that produced
/// the same outcome for that key.
///
/// Vec-backed: key count is bounded by the number of distinct type-tag
/// tuples, which stays small in practice, so linear key lookup beats hashing
/// plus a separate order index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutcomeMap {
    entries: Vec<(String, Vec<Vec<Value>>)>,
}

impl OutcomeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an argument list under `key`, creating the bucket on first
    /// use. Never overwrites, never deduplicates.
    pub fn record(&mut self, key: &str, args: Vec<Value>) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, bucket)) => bucket.push(args),
            None => self.entries.push((key.to_string(), vec![args])),
        }
    }

    pub fn get(&self, key: &str) -> Option<&[Vec<Value>]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bucket)| bucket.as_slice())
    }

    /// The first-inserted bucket, i.e. the earliest type key seen in the
    /// sweep's enumeration order.
    pub fn first(&self) -> Option<(&str, &[Vec<Value>])> {
        self.entries
            .first()
            .map(|(k, bucket)| (k.as_str(), bucket.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Vec<Value>])> {
        self.entries
            .iter()
            .map(|(k, bucket)| (k.as_str(), bucket.as_slice()))
    }

    /// Number of distinct type keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total argument lists recorded across all buckets (duplicates count).
    pub fn total_recorded(&self) -> usize {
        self.entries.iter().map(|(_, bucket)| bucket.len()).sum()
    }
}

/// Serializes as a JSON object in first-insertion key order.
impl Serialize for OutcomeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, bucket) in &self.entries {
            map.serialize_entry(key, bucket)?;
        }
        map.end()
    }
}

/// The two-way partition of a sweep's attempted combinations.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SweepOutcomes {
    pub successes: OutcomeMap,
    pub failures: OutcomeMap,
}

impl SweepOutcomes {
    pub fn record_success(&mut self, key: &str, args: Vec<Value>) {
        self.successes.record(key, args);
    }

    pub fn record_failure(&mut self, key: &str, args: Vec<Value>) {
        self.failures.record(key, args);
    }

    /// Every attempted combination lands in exactly one map, so this is the
    /// total attempted count.
    pub fn total_recorded(&self) -> usize {
        self.successes.total_recorded() + self.failures.total_recorded()
    }
}

/// The result record for one fuzzed target — created fresh per sweep,
/// populated synchronously, read-only once the sweep completes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzReport {
    /// The dotted symbol path that was fuzzed.
    pub function_to_type: String,
    pub results: SweepOutcomes,
}

impl FuzzReport {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            function_to_type: target.into(),
            results: SweepOutcomes::default(),
        }
    }
}
