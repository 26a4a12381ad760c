//! Shared fixtures for integration tests.

use ndarray::Array1;
use stograd::{Objective, OptResult, Scalar};

/// Convex quadratic `0.5 * ||w - target||^2` with gradient `w - target`.
///
/// The batch is ignored: the gradient is exact, which makes convergence
/// behavior deterministic for a given rule and learning rate.
pub struct Quadratic {
    w: Array1<Scalar>,
    target: Array1<Scalar>,
}

impl Quadratic {
    pub fn new(w0: Array1<Scalar>, target: Array1<Scalar>) -> Self {
        Quadratic { w: w0, target }
    }
}

impl Objective for Quadratic {
    type Batch = ();

    fn params(&self) -> &Array1<Scalar> {
        &self.w
    }

    fn params_mut(&mut self) -> &mut Array1<Scalar> {
        &mut self.w
    }

    fn value(&self) -> Scalar {
        (&self.w - &self.target).mapv(|d| d * d).sum() * 0.5
    }

    fn gradient(&mut self, _batch: &()) -> OptResult<Array1<Scalar>> {
        Ok(&self.w - &self.target)
    }
}
