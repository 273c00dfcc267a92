//! Hypervector space: the binary VSA algebra.
//!
//! Every operation is parameterized by an explicit [`HypervectorSpace`] so
//! that spaces of different dimensionality never interfere:
//! - **sample**: fresh random vector (fair coin per component)
//! - **distance**: normalized Hamming distance
//! - **bind**: XOR association (self-inverse)
//! - **bundle**: majority-vote superposition
//! - **permute**: circular shift encoding position

use crate::error::{HdcError, Result};
use crate::vector::Hypervector;
use rand::Rng;

/// Component value produced by [`HypervectorSpace::bundle`] when exactly half
/// of the inputs are 1 at a position.
pub const BUNDLE_TIE_BIT: u8 = 0;

/// Majority rule shared by batch bundling and the running accumulator.
///
/// Returns 1 iff strictly more than half of `total` inputs are 1, and
/// [`BUNDLE_TIE_BIT`] on an exact half/half split.
#[inline]
pub fn majority_bit(ones: usize, total: usize) -> u8 {
    match (2 * ones).cmp(&total) {
        std::cmp::Ordering::Greater => 1,
        std::cmp::Ordering::Equal => BUNDLE_TIE_BIT,
        std::cmp::Ordering::Less => 0,
    }
}

/// A binary hypervector space of fixed dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HypervectorSpace {
    dimension: usize,
}

impl HypervectorSpace {
    /// Create a space of the given dimension.
    pub fn new(dimension: usize) -> Result<Self> {
        if dimension == 0 {
            return Err(HdcError::InvalidConfig(
                "dimension must be positive".to_string(),
            ));
        }
        Ok(Self { dimension })
    }

    /// Get the dimension.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Fail with `DimensionMismatch` unless `v` belongs to this space.
    pub fn check(&self, v: &Hypervector) -> Result<()> {
        if v.dimensions() != self.dimension {
            return Err(HdcError::DimensionMismatch {
                expected: self.dimension,
                got: v.dimensions(),
            });
        }
        Ok(())
    }

    /// Draw D independent fair-coin bits.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Hypervector {
        let bits = (0..self.dimension).map(|_| rng.gen::<bool>() as u8).collect();
        Hypervector::from_bits_unchecked(bits)
    }

    /// Normalized Hamming distance in [0, 1].
    pub fn distance(&self, a: &Hypervector, b: &Hypervector) -> Result<f64> {
        self.check(a)?;
        self.check(b)?;

        let differing = a
            .bits()
            .iter()
            .zip(b.bits().iter())
            .filter(|(&x, &y)| x != y)
            .count();

        Ok(differing as f64 / self.dimension as f64)
    }

    /// Bind two vectors (component-wise XOR).
    ///
    /// `bind(bind(a, b), b) == a`; commutative and associative.
    pub fn bind(&self, a: &Hypervector, b: &Hypervector) -> Result<Hypervector> {
        self.check(a)?;
        self.check(b)?;

        let bits = a
            .bits()
            .iter()
            .zip(b.bits().iter())
            .map(|(&x, &y)| x ^ y)
            .collect();

        Ok(Hypervector::from_bits_unchecked(bits))
    }

    /// Fold [`bind`](Self::bind) over a non-empty sequence.
    pub fn bind_all<'a, I>(&self, vectors: I) -> Result<Hypervector>
    where
        I: IntoIterator<Item = &'a Hypervector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next().ok_or(HdcError::EmptyOperand("bind_all"))?;
        self.check(first)?;

        let mut acc = first.bits().to_vec();
        for v in iter {
            self.check(v)?;
            for (a, &b) in acc.iter_mut().zip(v.bits()) {
                *a ^= b;
            }
        }

        Ok(Hypervector::from_bits_unchecked(acc))
    }

    /// Bundle vectors by component-wise majority vote.
    ///
    /// The result is close, in expectation, to every input. Exact ties
    /// resolve to [`BUNDLE_TIE_BIT`].
    pub fn bundle<'a, I>(&self, vectors: I) -> Result<Hypervector>
    where
        I: IntoIterator<Item = &'a Hypervector>,
    {
        let mut ones = vec![0usize; self.dimension];
        let mut total = 0usize;

        for v in vectors {
            self.check(v)?;
            for (count, &b) in ones.iter_mut().zip(v.bits()) {
                *count += b as usize;
            }
            total += 1;
        }

        if total == 0 {
            return Err(HdcError::EmptyOperand("bundle"));
        }

        let bits = ones.iter().map(|&n| majority_bit(n, total)).collect();
        Ok(Hypervector::from_bits_unchecked(bits))
    }

    /// Circular shift of component positions.
    ///
    /// Component `i` moves to `(i + offset) mod D`; negative offsets shift
    /// the other way, so `permute(permute(v, i), -i) == v`.
    pub fn permute(&self, v: &Hypervector, offset: isize) -> Result<Hypervector> {
        self.check(v)?;

        let n = self.dimension;
        let shift = offset.rem_euclid(n as isize) as usize;
        if shift == 0 {
            return Ok(v.clone());
        }

        let mut bits = vec![0u8; n];
        for (i, &b) in v.bits().iter().enumerate() {
            bits[(i + shift) % n] = b;
        }

        Ok(Hypervector::from_bits_unchecked(bits))
    }
}
