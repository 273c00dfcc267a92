//! Hypervector type for hdpredict.
//!
//! Hypervectors are dense binary vectors with components in {0, 1}.
//! Internally stored as one u8 per component.

use crate::error::{HdcError, Result};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// A high-dimensional dense binary vector.
///
/// This is the value every algebra operation consumes and produces. It is
/// never mutated in place once built; operators in
/// [`HypervectorSpace`](crate::space::HypervectorSpace) return fresh vectors.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Hypervector {
    bits: Vec<u8>,
}

impl Hypervector {
    /// Create an all-zero vector of given dimensionality.
    pub fn zeros(dimensions: usize) -> Self {
        Self {
            bits: vec![0; dimensions],
        }
    }

    /// Create a vector from raw components, rejecting anything outside {0, 1}.
    pub fn from_bits(bits: Vec<u8>) -> Result<Self> {
        if let Some((index, &value)) = bits.iter().enumerate().find(|(_, &b)| b > 1) {
            return Err(HdcError::InvalidComponent { index, value });
        }
        Ok(Self { bits })
    }

    /// Create a vector from booleans.
    pub fn from_bools(bools: &[bool]) -> Self {
        Self {
            bits: bools.iter().map(|&b| b as u8).collect(),
        }
    }

    // Callers guarantee every component is 0 or 1.
    pub(crate) fn from_bits_unchecked(bits: Vec<u8>) -> Self {
        debug_assert!(bits.iter().all(|&b| b <= 1));
        Self { bits }
    }

    /// Get the dimensionality.
    pub fn dimensions(&self) -> usize {
        self.bits.len()
    }

    /// Get the raw components as a slice.
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Number of components set to 1.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

impl Index<usize> for Hypervector {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        &self.bits[index]
    }
}

impl TryFrom<Vec<u8>> for Hypervector {
    type Error = HdcError;

    fn try_from(bits: Vec<u8>) -> Result<Self> {
        Self::from_bits(bits)
    }
}

impl From<Hypervector> for Vec<u8> {
    fn from(v: Hypervector) -> Self {
        v.bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros() {
        let v = Hypervector::zeros(100);
        assert_eq!(v.dimensions(), 100);
        assert_eq!(v.count_ones(), 0);
    }

    #[test]
    fn test_from_bits_rejects_non_binary() {
        let err = Hypervector::from_bits(vec![0, 1, 2, 1]).unwrap_err();
        assert!(matches!(
            err,
            HdcError::InvalidComponent {
                index: 2,
                value: 2
            }
        ));
    }

    #[test]
    fn test_from_bools() {
        let v = Hypervector::from_bools(&[true, false, true]);
        assert_eq!(v.bits(), &[1, 0, 1]);
        assert_eq!(v[0], 1);
    }

    #[test]
    fn test_serde_validates_components() {
        let v = Hypervector::from_bools(&[true, false, false, true]);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, "[1,0,0,1]");
        let back: Hypervector = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);

        assert!(serde_json::from_str::<Hypervector>("[1,0,3]").is_err());
    }
}
