//! # Adadelta
//!
//! Reference: ADADELTA: An Adaptive Learning Rate Method -
//! https://arxiv.org/abs/1212.5701

use ndarray::Array1;

use super::{check_shapes, ensure_state, UpdateRule};
use crate::error::OptResult;
use crate::Scalar;

const DEFAULT_RHO: Scalar = 0.95;
const DEFAULT_EPS: Scalar = 1e-6;

/// Learning-rate-free rule driven by two decaying averages: squared
/// gradients `s` and squared deltas `d`.
///
/// ```text
/// s = rho * s + (1 - rho) * g^2
/// delta = -sqrt(d + eps) / sqrt(s + eps) * g
/// d = rho * d + (1 - rho) * delta^2
/// ```
///
/// The `lr` argument is ignored; Adadelta derives its effective step size
/// from the ratio of the two accumulators.
pub struct Adadelta {
    rho: Scalar,
    eps: Scalar,
    sq_grad: Array1<Scalar>,
    sq_delta: Array1<Scalar>,
}

impl Adadelta {
    pub fn new() -> Self {
        Self::with_params(DEFAULT_RHO, DEFAULT_EPS)
    }

    pub fn with_params(rho: Scalar, eps: Scalar) -> Self {
        Adadelta {
            rho,
            eps,
            sq_grad: Array1::zeros(0),
            sq_delta: Array1::zeros(0),
        }
    }
}

impl Default for Adadelta {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRule for Adadelta {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        _lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        let established = (!self.sq_grad.is_empty()).then(|| self.sq_grad.len());
        let n = check_shapes(params, grad, established)?;
        ensure_state(&mut self.sq_grad, n, "adadelta");
        ensure_state(&mut self.sq_delta, n, "adadelta");

        let (rho, eps) = (self.rho, self.eps);
        self.sq_grad
            .zip_mut_with(grad, |s, &g| *s = rho * *s + (1.0 - rho) * g * g);

        let mut delta = grad.clone();
        for i in 0..n {
            delta[i] = -((self.sq_delta[i] + eps).sqrt() / (self.sq_grad[i] + eps).sqrt()) * grad[i];
        }

        self.sq_delta
            .zip_mut_with(&delta, |d, &dl| *d = rho * *d + (1.0 - rho) * dl * dl);
        Ok(delta)
    }

    fn reset(&mut self) {
        self.sq_grad = Array1::zeros(0);
        self.sq_delta = Array1::zeros(0);
    }

    fn name(&self) -> &'static str {
        "adadelta"
    }
}
