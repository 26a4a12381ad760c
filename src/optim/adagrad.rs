//! # Adagrad
//!
//! Reference: Adaptive Subgradient Methods for Online Learning and
//! Stochastic Optimization - http://jmlr.org/papers/v12/duchi11a.html

use ndarray::Array1;

use super::{check_shapes, ensure_state, UpdateRule};
use crate::error::OptResult;
use crate::Scalar;

const DEFAULT_EPS: Scalar = 1e-8;

/// Per-parameter learning rates scaled by the cumulative squared-gradient
/// sum: `s += g^2; delta = -lr * g / (sqrt(s) + eps)`.
pub struct Adagrad {
    eps: Scalar,
    sq_sum: Array1<Scalar>,
}

impl Adagrad {
    pub fn new() -> Self {
        Self::with_eps(DEFAULT_EPS)
    }

    /// Override the denominator guard term.
    pub fn with_eps(eps: Scalar) -> Self {
        Adagrad {
            eps,
            sq_sum: Array1::zeros(0),
        }
    }
}

impl Default for Adagrad {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRule for Adagrad {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        let established = (!self.sq_sum.is_empty()).then(|| self.sq_sum.len());
        let n = check_shapes(params, grad, established)?;
        ensure_state(&mut self.sq_sum, n, "adagrad");

        self.sq_sum.zip_mut_with(grad, |s, &g| *s += g * g);

        let eps = self.eps;
        let mut delta = grad.clone();
        delta.zip_mut_with(&self.sq_sum, |d, &s| {
            *d = -lr * *d / (s.sqrt() + eps);
        });
        Ok(delta)
    }

    fn reset(&mut self) {
        self.sq_sum = Array1::zeros(0);
    }

    fn name(&self) -> &'static str {
        "adagrad"
    }
}
