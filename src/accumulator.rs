//! Running accumulator: incremental majority over every gram seen so far.
//!
//! Bundling n grams from scratch costs O(n·D) per step. The accumulator
//! keeps the unthresholded per-component one-counts instead, so adding a
//! gram is O(D) and thresholding reproduces the batch bundle exactly:
//!
//! - `bundle([g_1, ..., g_n])[j] == majority_bit(counts[j], n)`
//!
//! Both sides go through [`majority_bit`], so the equality is bit-for-bit,
//! tie policy included.
//!
//! # Capacity
//!
//! Nothing is ever evicted. The majority is over the whole run, so as n
//! grows old grams progressively dilute recent structure.

use crate::error::{HdcError, Result};
use crate::space::majority_bit;
use crate::vector::Hypervector;

/// Per-component one-counts plus the number of grams accumulated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunningAccumulator {
    /// Running count of 1 bits per component (not thresholded)
    counts: Vec<usize>,
    /// Number of grams accumulated
    gram_count: usize,
}

impl RunningAccumulator {
    /// Create a new empty accumulator.
    pub fn new(dimensions: usize) -> Self {
        Self {
            counts: vec![0; dimensions],
            gram_count: 0,
        }
    }

    /// Rebuild an accumulator from persisted parts.
    ///
    /// Fails if any per-component count exceeds `gram_count`.
    pub fn from_parts(counts: Vec<usize>, gram_count: usize) -> Result<Self> {
        if let Some(j) = counts.iter().position(|&c| c > gram_count) {
            return Err(HdcError::Checkpoint(format!(
                "accumulator component {} counts {} ones over {} grams",
                j, counts[j], gram_count
            )));
        }
        Ok(Self { counts, gram_count })
    }

    /// Vector dimensionality.
    pub fn dimensions(&self) -> usize {
        self.counts.len()
    }

    /// Number of grams folded in so far.
    pub fn gram_count(&self) -> usize {
        self.gram_count
    }

    /// Raw per-component one-counts.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Fold one gram into the accumulator.
    pub fn add(&mut self, gram: &Hypervector) -> Result<()> {
        if gram.dimensions() != self.dimensions() {
            return Err(HdcError::DimensionMismatch {
                expected: self.dimensions(),
                got: gram.dimensions(),
            });
        }

        for (count, &b) in self.counts.iter_mut().zip(gram.bits()) {
            *count += b as usize;
        }
        self.gram_count += 1;
        Ok(())
    }

    /// Threshold to a hypervector: `counts[j] > gram_count / 2`.
    ///
    /// Fails with `EmptyOperand` before any gram has been added, matching
    /// `bundle` of an empty sequence.
    pub fn threshold(&self) -> Result<Hypervector> {
        if self.gram_count == 0 {
            return Err(HdcError::EmptyOperand("threshold of empty accumulator"));
        }
        let bits = self
            .counts
            .iter()
            .map(|&c| majority_bit(c, self.gram_count))
            .collect();
        Ok(Hypervector::from_bits_unchecked(bits))
    }

    /// Reset to the empty state.
    pub fn clear(&mut self) {
        self.counts.fill(0);
        self.gram_count = 0;
    }
}
