//! Y-fast trie: the public predecessor index
//!
//! Sorted keys are cut into buckets of about `log U` keys. One representative
//! per bucket goes into an [`XFastTrie`]; each representative owns a
//! balanced search tree of its bucket. A query looks in the bucket of the
//! nearest representative on one side and falls back to the other side.

use super::xfast::XFastTrie;
use crate::error::{Error, Result};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

/// Static predecessor/successor index over distinct `u64` keys with
/// attached values.
#[derive(Debug, Clone)]
pub struct PredecessorIndex<V> {
    representatives: XFastTrie,
    buckets: FxHashMap<u64, BTreeMap<u64, V>>,
    len: usize,
}

impl<V> PredecessorIndex<V> {
    /// Build from `(key, value)` pairs in any order.
    ///
    /// Rejects an empty input and duplicate keys before building anything.
    pub fn build(mut pairs: Vec<(u64, V)>) -> Result<Self> {
        if pairs.is_empty() {
            return Err(Error::EmptyKeySet);
        }
        if !pairs.windows(2).all(|w| w[0].0 < w[1].0) {
            pairs.sort_unstable_by_key(|(key, _)| *key);
        }
        if let Some(w) = pairs.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(Error::DuplicateKey(w[0].0));
        }

        let len = pairs.len();
        let max_key = pairs[len - 1].0;
        let bucket_size = (u64::BITS - max_key.leading_zeros()).max(1) as usize;

        let mut representatives = Vec::with_capacity(len.div_ceil(bucket_size));
        let mut buckets = FxHashMap::default();
        let mut pairs = pairs.into_iter().peekable();
        while pairs.peek().is_some() {
            let bucket: Vec<(u64, V)> = pairs.by_ref().take(bucket_size).collect();
            // Middle key of the bucket stands for it
            let rep = bucket[bucket.len() / 2].0;
            representatives.push(rep);
            buckets.insert(rep, bucket.into_iter().collect::<BTreeMap<_, _>>());
        }

        Ok(Self {
            representatives: XFastTrie::from_sorted(&representatives),
            buckets,
            len,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets (representatives)
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn has_key(&self, key: u64) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: u64) -> Option<&V> {
        if self.representatives.has_key(key) {
            return self.bucket(key).get(&key);
        }
        [self.representatives.predecessor(key), self.representatives.successor(key)]
            .into_iter()
            .flatten()
            .find_map(|rep| self.bucket(rep).get(&key))
    }

    /// Largest key strictly smaller than `key`, with its value
    pub fn predecessor(&self, key: u64) -> Option<(u64, &V)> {
        let below = self.representatives.predecessor(key);
        let above = if self.representatives.has_key(key) {
            Some(key)
        } else {
            self.representatives.successor(key)
        };

        let in_bucket = |rep: u64| {
            self.bucket(rep)
                .range(..key)
                .next_back()
                .map(|(k, v)| (*k, v))
        };
        above.and_then(in_bucket).or_else(|| below.and_then(in_bucket))
    }

    /// Smallest key strictly greater than `key`, with its value
    pub fn successor(&self, key: u64) -> Option<(u64, &V)> {
        let above = self.representatives.successor(key);
        let below = if self.representatives.has_key(key) {
            Some(key)
        } else {
            self.representatives.predecessor(key)
        };

        let in_bucket = |rep: u64| {
            self.bucket(rep)
                .range((Excluded(key), Unbounded))
                .next()
                .map(|(k, v)| (*k, v))
        };
        below.and_then(in_bucket).or_else(|| above.and_then(in_bucket))
    }

    /// Iterate all entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &V)> + '_ {
        let mut reps: Vec<u64> = self.buckets.keys().copied().collect();
        reps.sort_unstable();
        reps.into_iter()
            .flat_map(move |rep| self.bucket(rep).iter().map(|(k, v)| (*k, v)))
    }

    #[inline]
    fn bucket(&self, rep: u64) -> &BTreeMap<u64, V> {
        &self.buckets[&rep]
    }
}

impl PredecessorIndex<()> {
    /// Build a key-only index
    pub fn from_keys(keys: impl IntoIterator<Item = u64>) -> Result<Self> {
        Self::build(keys.into_iter().map(|k| (k, ())).collect())
    }
}
