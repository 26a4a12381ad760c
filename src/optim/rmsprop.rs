//! # RMSProp
//!
//! Unpublished; usually cited to Tieleman & Hinton's "Lecture 6.5 - rmsprop"
//! (COURSERA: Neural Networks for Machine Learning, 2012).

use ndarray::Array1;

use super::{check_shapes, ensure_state, UpdateRule};
use crate::error::OptResult;
use crate::Scalar;

const DEFAULT_RHO: Scalar = 0.9;
const DEFAULT_EPS: Scalar = 1e-8;

/// Adagrad with a decaying average instead of a cumulative sum:
/// `s = rho * s + (1 - rho) * g^2; delta = -lr * g / (sqrt(s) + eps)`.
pub struct RmsProp {
    rho: Scalar,
    eps: Scalar,
    sq_avg: Array1<Scalar>,
}

impl RmsProp {
    pub fn new() -> Self {
        Self::with_params(DEFAULT_RHO, DEFAULT_EPS)
    }

    pub fn with_params(rho: Scalar, eps: Scalar) -> Self {
        RmsProp {
            rho,
            eps,
            sq_avg: Array1::zeros(0),
        }
    }
}

impl Default for RmsProp {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRule for RmsProp {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        let established = (!self.sq_avg.is_empty()).then(|| self.sq_avg.len());
        let n = check_shapes(params, grad, established)?;
        ensure_state(&mut self.sq_avg, n, "rmsprop");

        let rho = self.rho;
        self.sq_avg
            .zip_mut_with(grad, |s, &g| *s = rho * *s + (1.0 - rho) * g * g);

        let eps = self.eps;
        let mut delta = grad.clone();
        delta.zip_mut_with(&self.sq_avg, |d, &s| {
            *d = -lr * *d / (s.sqrt() + eps);
        });
        Ok(delta)
    }

    fn reset(&mut self) {
        self.sq_avg = Array1::zeros(0);
    }

    fn name(&self) -> &'static str {
        "rmsprop"
    }
}
