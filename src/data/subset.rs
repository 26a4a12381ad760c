//! # Data Subset
//!
//! A [`DataSubset`] is an indexed view over one or more aligned observation
//! stores: a tuple of sources that all report the same observation count,
//! plus an ordered index sequence shared across them. Indices need not be
//! contiguous or unique. The subset is immutable after construction;
//! shuffling produces a new subset with permuted indices.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::stream::{RandomBatches, RandomObs, SubsetIter};
use crate::data::ObservationStore;
use crate::error::{OptError, OptResult};

/// A tuple of observation stores accessed positionally in lockstep.
///
/// Implemented for 1-ary through 4-ary tuples; `Obs` and `Block` are tuples
/// with one element per source, aligned by position.
pub trait StoreTuple {
    type Obs;
    type Block;

    /// The common observation count, or `SizeMismatch` if the members
    /// disagree.
    fn aligned_len(&self) -> OptResult<usize>;

    /// One observation from each source at the same index.
    fn obs(&self, i: usize) -> Self::Obs;

    /// One sub-container per source over the same index sequence.
    fn take(&self, idx: &[usize]) -> Self::Block;
}

macro_rules! impl_store_tuple {
    ($($S:ident : $i:tt),+) => {
        impl<$($S: ObservationStore),+> StoreTuple for ($($S,)+) {
            type Obs = ($($S::Obs,)+);
            type Block = ($($S::Block,)+);

            fn aligned_len(&self) -> OptResult<usize> {
                let n = self.0.n_obs();
                $(
                    if self.$i.n_obs() != n {
                        return Err(OptError::SizeMismatch {
                            expected: n,
                            got: self.$i.n_obs(),
                        });
                    }
                )+
                Ok(n)
            }

            fn obs(&self, i: usize) -> Self::Obs {
                ($(self.$i.obs(i),)+)
            }

            fn take(&self, idx: &[usize]) -> Self::Block {
                ($(self.$i.take(idx),)+)
            }
        }
    };
}

impl_store_tuple!(S0: 0);
impl_store_tuple!(S0: 0, S1: 1);
impl_store_tuple!(S0: 0, S1: 1, S2: 2);
impl_store_tuple!(S0: 0, S1: 1, S2: 2, S3: 3);

/// An indexed view combining aligned observation stores.
///
/// Positions are 0-based: position `p` of the subset resolves to source
/// index `indices[p]`. Construction validates that all sources agree on
/// observation count and that every index is in range, so the accessors
/// only have to check positions against the subset's own length.
#[derive(Clone, Debug)]
pub struct DataSubset<S: StoreTuple> {
    sources: S,
    indices: Vec<usize>,
}

impl<S: StoreTuple> DataSubset<S> {
    /// View over the full range of the sources, in natural order.
    ///
    /// Fails with `SizeMismatch` if the sources disagree on observation
    /// count.
    pub fn new(sources: S) -> OptResult<Self> {
        let n = sources.aligned_len()?;
        Ok(DataSubset {
            sources,
            indices: (0..n).collect(),
        })
    }

    /// View over an explicit index sequence.
    ///
    /// Fails with `SizeMismatch` if the sources disagree on observation
    /// count, or `OutOfRange` if any index is invalid.
    pub fn with_indices(sources: S, indices: Vec<usize>) -> OptResult<Self> {
        let n = sources.aligned_len()?;
        if let Some(&bad) = indices.iter().find(|&&i| i >= n) {
            return Err(OptError::OutOfRange { index: bad, len: n });
        }
        Ok(DataSubset { sources, indices })
    }

    /// Number of positions in the view (not the sources' observation count,
    /// unless the view is full-range).
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The index sequence backing the view.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// The aligned per-source observations at position `i`.
    pub fn get(&self, i: usize) -> OptResult<S::Obs> {
        let &src = self.indices.get(i).ok_or(OptError::OutOfRange {
            index: i,
            len: self.indices.len(),
        })?;
        Ok(self.sources.obs(src))
    }

    /// Materialize the whole view as one owned, contiguous sub-container per
    /// source, in position order.
    pub fn extract(&self) -> S::Block {
        self.sources.take(&self.indices)
    }

    /// One observation tuple drawn uniformly at random from the view
    /// (with replacement across calls).
    pub fn rand_obs<R: Rng>(&self, rng: &mut R) -> OptResult<S::Obs> {
        if self.indices.is_empty() {
            return Err(OptError::OutOfRange { index: 0, len: 0 });
        }
        let pick = self.indices[rng.gen_range(0..self.indices.len())];
        Ok(self.sources.obs(pick))
    }

    /// A batch of `k` observations per source, each pick drawn independently
    /// and uniformly at random (with replacement) from the view.
    pub fn rand_batch<R: Rng>(&self, rng: &mut R, k: usize) -> OptResult<S::Block> {
        if self.indices.is_empty() && k > 0 {
            return Err(OptError::OutOfRange { index: 0, len: 0 });
        }
        let picks: Vec<usize> = (0..k)
            .map(|_| self.indices[rng.gen_range(0..self.indices.len())])
            .collect();
        Ok(self.sources.take(&picks))
    }

    /// A new subset over the same sources with the index sequence permuted
    /// uniformly at random. The original's order is untouched.
    pub fn shuffled<R: Rng>(&self, rng: &mut R) -> Self
    where
        S: Clone,
    {
        let mut indices = self.indices.clone();
        indices.shuffle(rng);
        DataSubset {
            sources: self.sources.clone(),
            indices,
        }
    }

    /// Finite, restartable walk over the view in index order. Re-iterating
    /// yields the same sequence because the indices are fixed.
    pub fn iter(&self) -> SubsetIter<'_, S> {
        SubsetIter::new(self)
    }

    /// Infinite stream of independent uniform single-observation draws.
    /// Never terminates on its own; stopping is the training loop's job.
    pub fn repeat_obs<R: Rng>(&self, rng: R) -> RandomObs<'_, S, R> {
        RandomObs::new(self, rng)
    }

    /// Infinite stream of independent uniform batches of `k` observations.
    pub fn repeat_batches<R: Rng>(&self, rng: R, k: usize) -> RandomBatches<'_, S, R> {
        RandomBatches::new(self, rng, k)
    }

    // For the stream types in this module's sibling file.
    pub(crate) fn sources(&self) -> &S {
        &self.sources
    }
}
