//! History: the append-only symbol sequence a predictor consumes.
//!
//! Stored chronologically (index 0 is the oldest symbol). Consumers that
//! think in "most recent first" terms use [`History::recent`], a reversed
//! view; nothing is ever stored reversed.

use serde::{Deserialize, Serialize};
use std::iter::Rev;
use std::slice::{Iter, Windows};

/// Append-only, chronologically ordered sequence of symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History<S> {
    items: Vec<S>,
}

impl<S> History<S> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append the newest symbol.
    pub fn push(&mut self, symbol: S) {
        self.items.push(symbol);
    }

    /// Number of symbols appended.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All symbols, oldest first.
    pub fn as_slice(&self) -> &[S] {
        &self.items
    }

    /// Symbol at chronological index `i`.
    pub fn get(&self, i: usize) -> Option<&S> {
        self.items.get(i)
    }

    /// `history[0:upto]`, clamped to the current length.
    pub fn prefix(&self, upto: usize) -> &[S] {
        &self.items[..upto.min(self.items.len())]
    }

    /// The last `n` symbols of `history[0:upto]`, oldest first.
    ///
    /// Returns fewer than `n` symbols when the prefix is shorter.
    pub fn last_before(&self, upto: usize, n: usize) -> &[S] {
        let prefix = self.prefix(upto);
        &prefix[prefix.len().saturating_sub(n)..]
    }

    /// Every length-`k` window of `history[0:upto]`, oldest window first.
    pub fn windows(&self, upto: usize, k: usize) -> Windows<'_, S> {
        self.prefix(upto).windows(k)
    }

    /// Most-recent-first view: `recent().nth(0)` is the newest symbol.
    pub fn recent(&self) -> Rev<Iter<'_, S>> {
        self.items.iter().rev()
    }

    pub fn into_vec(self) -> Vec<S> {
        self.items
    }
}

impl<S> From<Vec<S>> for History<S> {
    fn from(items: Vec<S>) -> Self {
        Self { items }
    }
}

impl<S> Extend<S> for History<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chronological_and_recent_views() {
        let h: History<u8> = vec![1, 2, 3, 4].into();

        assert_eq!(h.as_slice(), &[1, 2, 3, 4]);
        let recent: Vec<_> = h.recent().copied().collect();
        assert_eq!(recent, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_last_before() {
        let h: History<char> = "abcdef".chars().collect::<Vec<_>>().into();

        assert_eq!(h.last_before(4, 2), &['c', 'd']);
        assert_eq!(h.last_before(6, 3), &['d', 'e', 'f']);
        assert_eq!(h.last_before(1, 3), &['a']);
        assert_eq!(h.last_before(99, 1), &['f']);
    }

    #[test]
    fn test_windows() {
        let h: History<u8> = vec![1, 2, 3, 4, 5].into();
        let w: Vec<_> = h.windows(4, 3).collect();
        assert_eq!(w, vec![&[1, 2, 3][..], &[2, 3, 4][..]]);
        assert_eq!(h.windows(2, 3).count(), 0);
    }

    #[test]
    fn test_push_and_extend() {
        let mut h = History::new();
        h.push("y");
        h.extend(["n", "y"]);
        assert_eq!(h.len(), 3);
        assert_eq!(h.get(1), Some(&"n"));
        assert_eq!(h.into_vec(), vec!["y", "n", "y"]);
    }
}
