//! Genome representation and genetic operators.
//!
//! A [`Genome`] is a fixed-length ordered sequence of alleles plus a
//! configured crossover segment length. It owns two crossover operators
//! and three mutation operators:
//!
//! - [`mate`](Genome::mate): free-form segment swap — no allele-set
//!   constraint on the offspring
//! - [`mate_no_duplicates`](Genome::mate_no_duplicates): segment swap
//!   followed by duplicate repair, so each offspring remains a valid
//!   permutation of the mother's allele domain (TSP-style encodings)
//! - [`mutate`](Genome::mutate): replace one allele from a pool
//! - [`mutate_swap`](Genome::mutate_swap): exchange two positions — O(1),
//!   permutation-preserving
//! - [`mutate_rotate`](Genome::mutate_rotate): rotate at a random pivot —
//!   permutation-preserving, a bijection on cyclic arrangements
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and
//!   Machine Learning*

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{GaError, Result};

/// Marker trait for allele values.
///
/// Blanket-implemented for every type meeting the bounds; users never
/// implement it directly. `Eq + Hash` is what the duplicate repair in
/// [`Genome::mate_no_duplicates`] needs to count occurrences.
pub trait Allele: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> Allele for T {}

/// A fixed-length ordered sequence of alleles, one candidate solution.
///
/// The allele sequence is owned exclusively and never resized; mutation
/// operators rewrite it in place, crossover produces brand-new genomes.
///
/// `swap_length` is the size of the contiguous segment exchanged during
/// crossover, always in `[1, L-1]` (with the single exception of a
/// length-1 genome, where the default of 1 means a full-length swap).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Genome<A> {
    alleles: Vec<A>,
    swap_length: usize,
}

impl<A: Allele> Genome<A> {
    /// Creates a genome with the default crossover segment length of
    /// `max(L / 3, 1)`.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if `alleles` is empty.
    pub fn new(alleles: Vec<A>) -> Result<Self> {
        if alleles.is_empty() {
            return Err(GaError::InvalidConfiguration(
                "genome must contain at least one allele".into(),
            ));
        }
        let swap_length = (alleles.len() / 3).max(1);
        Ok(Self {
            alleles,
            swap_length,
        })
    }

    /// Creates a genome with an explicit crossover segment length.
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] if `alleles` is empty or
    /// `swap_length` is outside `[1, L-1]`.
    pub fn with_swap_length(alleles: Vec<A>, swap_length: usize) -> Result<Self> {
        if alleles.is_empty() {
            return Err(GaError::InvalidConfiguration(
                "genome must contain at least one allele".into(),
            ));
        }
        let len = alleles.len();
        if swap_length == 0 || swap_length >= len {
            return Err(GaError::InvalidConfiguration(format!(
                "swap_length {swap_length} out of range [1, {}] for genome of length {len}",
                len - 1
            )));
        }
        Ok(Self {
            alleles,
            swap_length,
        })
    }

    /// The allele sequence.
    pub fn alleles(&self) -> &[A] {
        &self.alleles
    }

    /// Number of alleles (fixed for the lifetime of the genome).
    pub fn len(&self) -> usize {
        self.alleles.len()
    }

    /// Always `false`: construction rejects empty genomes.
    pub fn is_empty(&self) -> bool {
        self.alleles.is_empty()
    }

    /// The configured crossover segment length.
    pub fn swap_length(&self) -> usize {
        self.swap_length
    }

    /// Consumes the genome, returning its allele sequence.
    pub fn into_alleles(self) -> Vec<A> {
        self.alleles
    }

    /// Free-form crossover: swaps a random contiguous segment with the
    /// father and returns two offspring.
    ///
    /// The segment start is uniform on `[0, L - swap_length)` and the
    /// segment has length `swap_length`. Both offspring have length `L`;
    /// no allele-set constraint is enforced.
    ///
    /// # Errors
    /// [`GaError::IncompatibleGenomes`] if the genomes differ in length.
    pub fn mate<R: Rng>(&self, father: &Self, rng: &mut R) -> Result<(Self, Self)> {
        self.check_compatible(father)?;
        let (start, end) = self.swap_bounds(rng);
        let child1 = self.splice(&self.alleles, &father.alleles, start, end);
        let child2 = self.splice(&father.alleles, &self.alleles, start, end);
        Ok((child1, child2))
    }

    /// Permutation-preserving crossover: the same segment swap as
    /// [`mate`](Self::mate), but each offspring is then repaired so its
    /// allele multiset equals the mother's exactly.
    ///
    /// Repair policy (deterministic): domain values missing from an
    /// offspring are collected in first-seen order over the mother's
    /// alleles; each is written over the lowest index currently holding
    /// a duplicated value. The repair runs at most `L` iterations.
    ///
    /// # Errors
    /// - [`GaError::IncompatibleGenomes`] if the genomes differ in length.
    /// - [`GaError::DomainMismatch`] if a value is still missing but no
    ///   duplicate remains to replace. This cannot happen when both
    ///   parents are permutations of the same domain.
    pub fn mate_no_duplicates<R: Rng>(&self, father: &Self, rng: &mut R) -> Result<(Self, Self)> {
        let (mut child1, mut child2) = self.mate(father, rng)?;
        self.enforce_domain(&mut child1.alleles)?;
        self.enforce_domain(&mut child2.alleles)?;
        Ok((child1, child2))
    }

    /// Replaces the allele at one uniformly random position with a
    /// uniformly random value drawn from `pool`.
    ///
    /// Does not preserve a permutation invariant; not safe to combine
    /// with [`mate_no_duplicates`](Self::mate_no_duplicates) unless the
    /// caller tolerates duplicates.
    ///
    /// # Errors
    /// [`GaError::EmptyAllelePool`] if `pool` is empty.
    pub fn mutate<R: Rng>(&mut self, pool: &[A], rng: &mut R) -> Result<()> {
        let Some(value) = pool.choose(rng) else {
            return Err(GaError::EmptyAllelePool);
        };
        let idx = rng.random_range(0..self.alleles.len());
        self.alleles[idx] = value.clone();
        Ok(())
    }

    /// Exchanges the alleles at two independently uniform positions.
    ///
    /// The positions may coincide (a no-op with probability `1/L`).
    /// Always permutation-preserving.
    pub fn mutate_swap<R: Rng>(&mut self, rng: &mut R) {
        let n = self.alleles.len();
        let i = rng.random_range(0..n);
        let j = rng.random_range(0..n);
        self.alleles.swap(i, j);
    }

    /// Rotates the allele sequence left at a uniformly random pivot.
    ///
    /// Always permutation-preserving; rotating by `p` and then by
    /// `L - p` restores the original sequence.
    pub fn mutate_rotate<R: Rng>(&mut self, rng: &mut R) {
        let pivot = rng.random_range(0..self.alleles.len());
        self.alleles.rotate_left(pivot);
    }

    /// Applies the caller-supplied fitness function to the allele
    /// sequence. Every call recomputes; nothing is cached.
    pub fn value<S, F>(&self, fitness: F) -> S
    where
        F: Fn(&[A]) -> S,
    {
        fitness(&self.alleles)
    }

    fn check_compatible(&self, father: &Self) -> Result<()> {
        if self.alleles.len() != father.alleles.len() {
            return Err(GaError::IncompatibleGenomes {
                mother: self.alleles.len(),
                father: father.alleles.len(),
            });
        }
        Ok(())
    }

    /// Picks the crossover segment `[start, end)`.
    ///
    /// The start range is empty only for a length-1 genome with the
    /// default `swap_length` of 1; there the whole genome is swapped.
    fn swap_bounds<R: Rng>(&self, rng: &mut R) -> (usize, usize) {
        let upper = self.alleles.len() - self.swap_length;
        let start = if upper == 0 {
            0
        } else {
            rng.random_range(0..upper)
        };
        (start, start + self.swap_length)
    }

    /// Builds an offspring: `base` with `[start, end)` replaced by the
    /// donor's segment. The offspring inherits this genome's
    /// `swap_length`.
    fn splice(&self, base: &[A], donor: &[A], start: usize, end: usize) -> Self {
        let mut alleles = base.to_vec();
        alleles[start..end].clone_from_slice(&donor[start..end]);
        Self {
            alleles,
            swap_length: self.swap_length,
        }
    }

    /// Repairs `target` so its multiset of values equals this genome's.
    ///
    /// Missing values are consumed in first-seen order over this
    /// genome's alleles; each replaces the lowest index in `target`
    /// currently holding a duplicated value. One missing value is
    /// consumed per iteration, so the loop runs at most `L` times.
    fn enforce_domain(&self, target: &mut [A]) -> Result<()> {
        let mut counts: HashMap<A, usize> = HashMap::with_capacity(target.len());
        for value in target.iter() {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }

        let mut missing: Vec<A> = Vec::new();
        for value in &self.alleles {
            if !counts.contains_key(value) && !missing.contains(value) {
                missing.push(value.clone());
            }
        }

        for (consumed, replacement) in missing.iter().enumerate() {
            let slot = target
                .iter()
                .position(|v| counts.get(v).copied().unwrap_or(0) > 1);
            let Some(slot) = slot else {
                return Err(GaError::DomainMismatch {
                    missing: missing.len() - consumed,
                });
            };
            let evicted = std::mem::replace(&mut target[slot], replacement.clone());
            if let Some(count) = counts.get_mut(&evicted) {
                *count -= 1;
            }
            *counts.entry(replacement.clone()).or_insert(0) += 1;
        }
        Ok(())
    }
}

impl<A: fmt::Display> fmt::Display for Genome<A> {
    /// Stable comma-separated rendering of the allele sequence.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, allele) in self.alleles.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{allele}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
