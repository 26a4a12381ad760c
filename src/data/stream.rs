//! Observation streams over a [`DataSubset`].
//!
//! Two kinds of stream feed the training loop, and the distinction matters
//! to it: [`SubsetIter`] is a finite, replayable walk over fixed indices, so
//! "stream exhausted" is a reachable terminal state; [`RandomObs`] and
//! [`RandomBatches`] are true generators with no length that resample
//! forever and only stop when the loop's stop signal fires.

use rand::Rng;

use crate::data::subset::{DataSubset, StoreTuple};

/// Finite iterator over a subset's positions, in index order.
pub struct SubsetIter<'a, S: StoreTuple> {
    subset: &'a DataSubset<S>,
    pos: usize,
}

impl<'a, S: StoreTuple> SubsetIter<'a, S> {
    pub(crate) fn new(subset: &'a DataSubset<S>) -> Self {
        SubsetIter { subset, pos: 0 }
    }
}

impl<'a, S: StoreTuple> Iterator for SubsetIter<'a, S> {
    type Item = S::Obs;

    fn next(&mut self) -> Option<S::Obs> {
        let &src = self.subset.indices().get(self.pos)?;
        self.pos += 1;
        Some(self.subset.sources().obs(src))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.subset.len() - self.pos;
        (left, Some(left))
    }
}

impl<'a, S: StoreTuple> ExactSizeIterator for SubsetIter<'a, S> {}

/// Infinite stream of uniform single-observation draws.
///
/// Degenerate case: over an empty subset there is nothing to draw, so the
/// stream yields `None` immediately instead of being infinite.
pub struct RandomObs<'a, S: StoreTuple, R: Rng> {
    subset: &'a DataSubset<S>,
    rng: R,
}

impl<'a, S: StoreTuple, R: Rng> RandomObs<'a, S, R> {
    pub(crate) fn new(subset: &'a DataSubset<S>, rng: R) -> Self {
        RandomObs { subset, rng }
    }
}

impl<'a, S: StoreTuple, R: Rng> Iterator for RandomObs<'a, S, R> {
    type Item = S::Obs;

    fn next(&mut self) -> Option<S::Obs> {
        self.subset.rand_obs(&mut self.rng).ok()
    }
}

/// Infinite stream of uniform fixed-size batch draws.
///
/// Same degenerate case as [`RandomObs`]: empty subset, empty stream.
pub struct RandomBatches<'a, S: StoreTuple, R: Rng> {
    subset: &'a DataSubset<S>,
    rng: R,
    k: usize,
}

impl<'a, S: StoreTuple, R: Rng> RandomBatches<'a, S, R> {
    pub(crate) fn new(subset: &'a DataSubset<S>, rng: R, k: usize) -> Self {
        RandomBatches { subset, rng, k }
    }
}

impl<'a, S: StoreTuple, R: Rng> Iterator for RandomBatches<'a, S, R> {
    type Item = S::Block;

    fn next(&mut self) -> Option<S::Block> {
        self.subset.rand_batch(&mut self.rng, self.k).ok()
    }
}

#[cfg(test)]
mod tests {
    use crate::data::DataSubset;
    use ndarray::array;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn iter_is_restartable() {
        let x = array![1.0, 2.0, 3.0];
        let sub = DataSubset::new((x,)).unwrap();
        let first: Vec<f64> = sub.iter().map(|(v,)| v).collect();
        let second: Vec<f64> = sub.iter().map(|(v,)| v).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn empty_subset_yields_empty_streams() {
        let x = array![1.0, 2.0];
        let sub = DataSubset::with_indices((x,), vec![]).unwrap();
        let rng = StdRng::seed_from_u64(7);
        assert!(sub.repeat_obs(rng).next().is_none());
    }

    #[test]
    fn random_stream_draws_from_the_view() {
        let x = array![5.0, 6.0, 7.0, 8.0];
        let sub = DataSubset::with_indices((x,), vec![1, 2]).unwrap();
        let rng = StdRng::seed_from_u64(42);
        for (v,) in sub.repeat_obs(rng).take(50) {
            assert!(v == 6.0 || v == 7.0);
        }
    }
}
