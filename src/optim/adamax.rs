//! # Adamax
//!
//! The infinity-norm variant of Adam, from the same paper
//! (https://arxiv.org/abs/1412.6980, section 7).

use ndarray::Array1;

use super::{check_shapes, ensure_state, UpdateRule};
use crate::error::OptResult;
use crate::Scalar;

const DEFAULT_BETA1: Scalar = 0.9;
const DEFAULT_BETA2: Scalar = 0.999;
const DEFAULT_EPS: Scalar = 1e-8;

/// First moment plus an infinity-norm accumulator:
///
/// ```text
/// m = beta1 * m + (1 - beta1) * g
/// u = max(beta2 * u, |g|)
/// delta = -(lr / (1 - beta1^t)) * m / (u + eps)
/// ```
pub struct Adamax {
    betas: (Scalar, Scalar),
    eps: Scalar,
    exp_avg: Array1<Scalar>,  // m_t
    inf_norm: Array1<Scalar>, // u_t
    t: usize,
}

impl Adamax {
    pub fn new() -> Self {
        Self::with_params(DEFAULT_BETA1, DEFAULT_BETA2, DEFAULT_EPS)
    }

    pub fn with_params(beta1: Scalar, beta2: Scalar, eps: Scalar) -> Self {
        Adamax {
            betas: (beta1, beta2),
            eps,
            exp_avg: Array1::zeros(0),
            inf_norm: Array1::zeros(0),
            t: 0,
        }
    }
}

impl Default for Adamax {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRule for Adamax {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        let established = (!self.exp_avg.is_empty()).then(|| self.exp_avg.len());
        let n = check_shapes(params, grad, established)?;
        ensure_state(&mut self.exp_avg, n, "adamax");
        ensure_state(&mut self.inf_norm, n, "adamax");

        self.t += 1;
        let (beta1, beta2) = self.betas;
        let step = lr / (1.0 - beta1.powi(self.t as i32));

        self.exp_avg
            .zip_mut_with(grad, |m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
        self.inf_norm
            .zip_mut_with(grad, |u, &g| *u = (beta2 * *u).max(g.abs()));

        let eps = self.eps;
        let mut delta = Array1::zeros(n);
        for i in 0..n {
            delta[i] = -step * self.exp_avg[i] / (self.inf_norm[i] + eps);
        }
        Ok(delta)
    }

    fn reset(&mut self) {
        self.exp_avg = Array1::zeros(0);
        self.inf_norm = Array1::zeros(0);
        self.t = 0;
    }

    fn name(&self) -> &'static str {
        "adamax"
    }
}
