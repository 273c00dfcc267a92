//! Item Memory: keyed associative store over hypervectors.
//!
//! Supports exact lookup by key and nearest-neighbor retrieval by query
//! vector. Entries live in a `BTreeMap`, so iteration, `distances` and
//! winner-take-all tie-breaking all follow ascending key order and never
//! depend on hashing.

use crate::error::{HdcError, Result};
use crate::space::HypervectorSpace;
use crate::vector::Hypervector;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// An associative store of `(key, hypervector)` entries in one space.
#[derive(Clone, Debug)]
pub struct ItemMemory<K> {
    space: HypervectorSpace,
    entries: BTreeMap<K, Hypervector>,
}

impl<K: Ord + Clone + Debug> ItemMemory<K> {
    /// Create an empty memory bound to `space`.
    pub fn new(space: HypervectorSpace) -> Self {
        Self {
            space,
            entries: BTreeMap::new(),
        }
    }

    /// The space every stored vector belongs to.
    pub fn space(&self) -> HypervectorSpace {
        self.space
    }

    /// Store `v` under `key`, replacing any previous entry.
    pub fn add(&mut self, key: K, v: Hypervector) -> Result<()> {
        self.space.check(&v)?;
        self.entries.insert(key, v);
        Ok(())
    }

    // `make` must produce a vector of this space's dimension.
    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &Hypervector
    where
        F: FnOnce() -> Hypervector,
    {
        self.entries.entry(key).or_insert_with(make)
    }

    /// Exact lookup.
    pub fn get(&self, key: &K) -> Result<&Hypervector> {
        self.entries
            .get(key)
            .ok_or_else(|| HdcError::KeyNotFound(format!("{:?}", key)))
    }

    /// Whether `key` has an entry.
    pub fn has(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove an entry. Returns the vector if it existed.
    pub fn remove(&mut self, key: &K) -> Option<Hypervector> {
        self.entries.remove(key)
    }

    /// Distance from `query` to every stored entry.
    pub fn distances(&self, query: &Hypervector) -> Result<BTreeMap<K, f64>> {
        self.space.check(query)?;
        self.entries
            .iter()
            .map(|(k, v)| Ok((k.clone(), self.space.distance(v, query)?)))
            .collect()
    }

    /// Key of the entry closest to `query`.
    ///
    /// Ties resolve to the smallest key in `Ord` order.
    pub fn winner_take_all(&self, query: &Hypervector) -> Result<K> {
        self.space.check(query)?;

        let mut best: Option<(&K, f64)> = None;
        for (key, v) in &self.entries {
            let d = self.space.distance(v, query)?;
            // Strict comparison keeps the earliest (smallest) key on ties
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((key, d));
            }
        }

        best.map(|(k, _)| k.clone())
            .ok_or(HdcError::EmptyOperand("winner_take_all on empty item memory"))
    }

    /// Every entry within `threshold` (inclusive) of `query`.
    pub fn matches(&self, query: &Hypervector, threshold: f64) -> Result<BTreeMap<K, f64>> {
        Ok(self
            .distances(query)?
            .into_iter()
            .filter(|(_, d)| *d <= threshold)
            .collect())
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &Hypervector)> {
        self.entries.iter()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
