//! Codebook: symbol grounding.
//!
//! A codebook is an [`ItemMemory`] that assigns each new key a freshly
//! sampled hypervector. The guarantee it adds:
//! once a symbol is grounded, its vector NEVER changes, so every later
//! decode against the codebook stays consistent.

use crate::error::{HdcError, Result};
use crate::item_memory::ItemMemory;
use crate::seeding;
use crate::space::HypervectorSpace;
use crate::vector::Hypervector;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// An item memory that grounds keys to random, lifetime-stable vectors.
#[derive(Clone, Debug)]
pub struct Codebook<K> {
    memory: ItemMemory<K>,
    rng: ChaCha8Rng,
}

impl<K: Ord + Clone + Debug> Codebook<K> {
    /// Create an empty codebook whose vectors come from the labelled
    /// codebook stream of `seed`.
    pub fn new(space: HypervectorSpace, seed: u64) -> Self {
        Self::with_rng(space, seeding::stream(seed, seeding::CODEBOOK_STREAM))
    }

    /// Create an empty codebook drawing from an explicit RNG.
    pub fn with_rng(space: HypervectorSpace, rng: ChaCha8Rng) -> Self {
        Self {
            memory: ItemMemory::new(space),
            rng,
        }
    }

    /// Ground `key` to a fresh random vector.
    ///
    /// Re-adding an existing key is a no-op: the stored vector is returned
    /// unchanged and no randomness is consumed.
    pub fn add(&mut self, key: K) -> &Hypervector {
        let space = self.memory.space();
        let rng = &mut self.rng;
        self.memory.get_or_insert_with(key, || space.sample(rng))
    }

    /// Ground `key` on first use and return its vector.
    pub fn get_or_add(&mut self, key: K) -> Hypervector {
        self.add(key).clone()
    }

    /// Ground `key` to a caller-supplied vector.
    ///
    /// Grounding an absent key stores `v`. Re-grounding with an identical
    /// vector is a no-op. Re-grounding with a different vector fails with
    /// `ReboundSymbol` and leaves the codebook unchanged.
    pub fn ground(&mut self, key: K, v: Hypervector) -> Result<()> {
        if let Ok(existing) = self.memory.get(&key) {
            if *existing == v {
                return Ok(());
            }
            tracing::warn!(symbol = ?key, "rejected attempt to reground symbol");
            return Err(HdcError::ReboundSymbol(format!("{:?}", key)));
        }
        self.memory.add(key, v)
    }

    /// Vector grounded for `key`, or `KeyNotFound`.
    pub fn get(&self, key: &K) -> Result<&Hypervector> {
        self.memory.get(key)
    }

    /// Whether `key` is grounded.
    pub fn has(&self, key: &K) -> bool {
        self.memory.has(key)
    }

    /// Distance from `query` to every grounded symbol.
    pub fn distances(&self, query: &Hypervector) -> Result<BTreeMap<K, f64>> {
        self.memory.distances(query)
    }

    /// Decode `query` to the closest grounded symbol.
    pub fn winner_take_all(&self, query: &Hypervector) -> Result<K> {
        self.memory.winner_take_all(query)
    }

    /// Every symbol within `threshold` (inclusive) of `query`.
    pub fn matches(&self, query: &Hypervector, threshold: f64) -> Result<BTreeMap<K, f64>> {
        self.memory.matches(query, threshold)
    }

    /// Read-only view of the underlying item memory.
    pub fn memory(&self) -> &ItemMemory<K> {
        &self.memory
    }

    /// The space grounded vectors are sampled from.
    pub fn space(&self) -> HypervectorSpace {
        self.memory.space()
    }

    /// Number of grounded symbols.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }
}
