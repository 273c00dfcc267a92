//! Encoder: symbol windows to k-gram hypervectors.
//!
//! # Positional binding
//!
//! A window `v_0..v_{k-1}` (oldest → newest) becomes one gram:
//!
//! ```text
//! gram = permute(v_0, 0) ^ permute(v_1, 1) ^ ... ^ permute(v_{k-1}, k-1)
//! ```
//!
//! Each slot is tagged by its permutation offset, so `[y, n]` and `[n, y]`
//! encode differently. Because permute is invertible and XOR is
//! self-inverse, binding a gram with the encoding of all-but-one of its
//! slots leaves the missing slot's (permuted) vector behind.
//!
//! # Queries
//!
//! A query encodes the last k−1 symbols with the same offsets `0..k-2` and
//! shifts the result by one more position. Its tags now sit at `1..k-1`,
//! so binding it with a stored gram cancels those slots and isolates slot
//! 0 at offset 0, where it is directly comparable with the codebook.

use crate::codebook::Codebook;
use crate::error::{HdcError, Result};
use crate::history::History;
use crate::space::HypervectorSpace;
use crate::vector::Hypervector;
use std::fmt::Debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Builds grams and queries for a fixed context size.
#[derive(Clone, Copy, Debug)]
pub struct SequenceEncoder {
    space: HypervectorSpace,
    context_size: usize,
}

/// Smallest usable context size: one query slot plus the predicted slot.
pub const MIN_CONTEXT_SIZE: usize = 2;

/// Reject context sizes below [`MIN_CONTEXT_SIZE`].
pub fn check_context_size(context_size: usize) -> Result<()> {
    if context_size < MIN_CONTEXT_SIZE {
        return Err(HdcError::InvalidConfig(format!(
            "context_size must be at least {}, got {}",
            MIN_CONTEXT_SIZE, context_size
        )));
    }
    Ok(())
}

impl SequenceEncoder {
    /// Create an encoder for k-grams of `context_size` symbols.
    ///
    /// Fails with `InvalidConfig` when `context_size < 2`.
    pub fn new(space: HypervectorSpace, context_size: usize) -> Result<Self> {
        check_context_size(context_size)?;
        Ok(Self {
            space,
            context_size,
        })
    }

    pub fn space(&self) -> HypervectorSpace {
        self.space
    }

    /// The k in k-gram.
    pub fn context_size(&self) -> usize {
        self.context_size
    }

    /// Positionally bind a run of vectors, oldest first.
    #[cfg(not(feature = "parallel"))]
    pub fn encode_run(&self, vectors: &[&Hypervector]) -> Result<Hypervector> {
        let tagged = vectors
            .iter()
            .enumerate()
            .map(|(i, v)| self.space.permute(v, i as isize))
            .collect::<Result<Vec<_>>>()?;

        self.space.bind_all(&tagged)
    }

    /// Positionally bind a run of vectors, oldest first.
    ///
    /// Slot tags are computed in parallel; the fold order is irrelevant
    /// because bind is associative and commutative.
    #[cfg(feature = "parallel")]
    pub fn encode_run(&self, vectors: &[&Hypervector]) -> Result<Hypervector> {
        let tagged = vectors
            .par_iter()
            .enumerate()
            .map(|(i, v)| self.space.permute(v, i as isize))
            .collect::<Result<Vec<_>>>()?;

        self.space.bind_all(&tagged)
    }

    /// Encode the query for a known (k−1)-symbol prefix.
    pub fn encode_query(&self, vectors: &[&Hypervector]) -> Result<Hypervector> {
        let run = self.encode_run(vectors)?;
        self.space.permute(&run, 1)
    }

    /// Gram for one window of symbols.
    pub fn gram<S>(&self, codebook: &Codebook<S>, window: &[S]) -> Result<Hypervector>
    where
        S: Ord + Clone + Debug,
    {
        let vectors = lookup(codebook, window)?;
        self.encode_run(&vectors)
    }

    /// Gram for the window of `history` ending just before `end`.
    pub fn gram_ending_at<S>(
        &self,
        codebook: &Codebook<S>,
        history: &History<S>,
        end: usize,
    ) -> Result<Hypervector>
    where
        S: Ord + Clone + Debug,
    {
        let k = self.context_size;
        if end < k || end > history.len() {
            return Err(HdcError::HistoryIndex {
                index: end,
                processed: history.len(),
            });
        }
        self.gram(codebook, &history.as_slice()[end - k..end])
    }

    /// Query built from the last k−1 symbols of `history[0:upto]`.
    pub fn query<S>(
        &self,
        codebook: &Codebook<S>,
        history: &History<S>,
        upto: usize,
    ) -> Result<Hypervector>
    where
        S: Ord + Clone + Debug,
    {
        let prefix = history.last_before(upto, self.context_size - 1);
        let vectors = lookup(codebook, prefix)?;
        self.encode_query(&vectors)
    }
}

fn lookup<'a, S>(codebook: &'a Codebook<S>, symbols: &[S]) -> Result<Vec<&'a Hypervector>>
where
    S: Ord + Clone + Debug,
{
    symbols.iter().map(|s| codebook.get(s)).collect()
}
