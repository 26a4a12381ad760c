//! # Observation Stores (`data`)
//!
//! Uniform interface over array-like data containers, plus the [`DataSubset`]
//! view that combines several aligned containers under one shared index
//! sequence.
//!
//! A store exposes its count of observations, single observations by index,
//! and sub-containers over arbitrary index sets. For matrix-shaped containers
//! the observation axis is the *last* axis: each column of an `Array2` is one
//! observation. Vector-shaped containers treat each element as one
//! observation.

use ndarray::{Array1, Array2, Axis};

use crate::error::{OptError, OptResult};

// --- Submodules ---
pub mod stream;
pub mod subset;

// Re-exports
pub use stream::{RandomBatches, RandomObs, SubsetIter};
pub use subset::{DataSubset, StoreTuple};

/// Uniform interface over one data container.
///
/// `obs` and `take` are pure projections: they never mutate the store, and
/// mutating a returned value never retroactively affects the store. Both
/// panic on out-of-bounds indices, like standard indexing; [`DataSubset`]
/// validates indices at construction so its accesses cannot go out of
/// bounds. Callers holding a raw store should use [`try_obs`] for a checked
/// variant.
///
/// [`try_obs`]: ObservationStore::try_obs
pub trait ObservationStore {
    /// A single observation: the container's dimensionality minus the
    /// observation axis (a column vector from a matrix, a scalar from a
    /// vector).
    type Obs;
    /// A sub-container of the same kind as the store itself.
    type Block;

    /// Count along the observation axis.
    fn n_obs(&self) -> usize;

    /// Fetch the observation at `i`. Panics if `i >= n_obs()`.
    fn obs(&self, i: usize) -> Self::Obs;

    /// Materialize the observations at `idx` (in order, duplicates allowed)
    /// as an owned sub-container. Panics on any out-of-bounds index.
    fn take(&self, idx: &[usize]) -> Self::Block;

    /// Bounds-checked [`obs`](ObservationStore::obs).
    fn try_obs(&self, i: usize) -> OptResult<Self::Obs> {
        if i >= self.n_obs() {
            return Err(OptError::OutOfRange {
                index: i,
                len: self.n_obs(),
            });
        }
        Ok(self.obs(i))
    }

    /// Contiguous sub-container over `[start, end)`.
    fn slice_obs(&self, start: usize, end: usize) -> OptResult<Self::Block> {
        if end > self.n_obs() {
            return Err(OptError::OutOfRange {
                index: end,
                len: self.n_obs(),
            });
        }
        // Inverted range: the start is the offending value, bounded by end.
        if start > end {
            return Err(OptError::OutOfRange {
                index: start,
                len: end,
            });
        }
        let idx: Vec<usize> = (start..end).collect();
        Ok(self.take(&idx))
    }
}

impl<A: Clone> ObservationStore for Array1<A> {
    type Obs = A;
    type Block = Array1<A>;

    fn n_obs(&self) -> usize {
        self.len()
    }

    fn obs(&self, i: usize) -> A {
        self[i].clone()
    }

    fn take(&self, idx: &[usize]) -> Array1<A> {
        self.select(Axis(0), idx)
    }
}

impl<A: Clone> ObservationStore for Array2<A> {
    type Obs = Array1<A>;
    type Block = Array2<A>;

    fn n_obs(&self) -> usize {
        self.ncols()
    }

    fn obs(&self, i: usize) -> Array1<A> {
        self.column(i).to_owned()
    }

    fn take(&self, idx: &[usize]) -> Array2<A> {
        self.select(Axis(1), idx)
    }
}

impl<A: Clone> ObservationStore for Vec<A> {
    type Obs = A;
    type Block = Vec<A>;

    fn n_obs(&self) -> usize {
        self.len()
    }

    fn obs(&self, i: usize) -> A {
        self[i].clone()
    }

    fn take(&self, idx: &[usize]) -> Vec<A> {
        idx.iter().map(|&i| self[i].clone()).collect()
    }
}

// Borrowed stores delegate, so subsets can be built over references without
// cloning the underlying container.
impl<S: ObservationStore> ObservationStore for &S {
    type Obs = S::Obs;
    type Block = S::Block;

    fn n_obs(&self) -> usize {
        (**self).n_obs()
    }

    fn obs(&self, i: usize) -> Self::Obs {
        (**self).obs(i)
    }

    fn take(&self, idx: &[usize]) -> Self::Block {
        (**self).take(idx)
    }
}
