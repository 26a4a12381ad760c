//! # Adam
//!
//! Reference: Adam: A Method for Stochastic Optimization -
//! https://arxiv.org/abs/1412.6980

use ndarray::Array1;

use super::{check_shapes, ensure_state, UpdateRule};
use crate::error::OptResult;
use crate::Scalar;

const DEFAULT_BETA1: Scalar = 0.9;
const DEFAULT_BETA2: Scalar = 0.999;
const DEFAULT_EPS: Scalar = 1e-8;

/// Bias-corrected first and second moment estimates:
///
/// ```text
/// m = beta1 * m + (1 - beta1) * g
/// v = beta2 * v + (1 - beta2) * g^2
/// delta = -lr * (m / (1 - beta1^t)) / (sqrt(v / (1 - beta2^t)) + eps)
/// ```
pub struct Adam {
    betas: (Scalar, Scalar),
    eps: Scalar,
    exp_avg: Array1<Scalar>,    // m_t
    exp_avg_sq: Array1<Scalar>, // v_t
    t: usize,
}

impl Adam {
    pub fn new() -> Self {
        Self::with_params(DEFAULT_BETA1, DEFAULT_BETA2, DEFAULT_EPS)
    }

    pub fn with_params(beta1: Scalar, beta2: Scalar, eps: Scalar) -> Self {
        Adam {
            betas: (beta1, beta2),
            eps,
            exp_avg: Array1::zeros(0),
            exp_avg_sq: Array1::zeros(0),
            t: 0,
        }
    }
}

impl Default for Adam {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRule for Adam {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        let established = (!self.exp_avg.is_empty()).then(|| self.exp_avg.len());
        let n = check_shapes(params, grad, established)?;
        ensure_state(&mut self.exp_avg, n, "adam");
        ensure_state(&mut self.exp_avg_sq, n, "adam");

        self.t += 1;
        let (beta1, beta2) = self.betas;
        let bias1 = 1.0 - beta1.powi(self.t as i32);
        let bias2 = 1.0 - beta2.powi(self.t as i32);

        self.exp_avg
            .zip_mut_with(grad, |m, &g| *m = beta1 * *m + (1.0 - beta1) * g);
        self.exp_avg_sq
            .zip_mut_with(grad, |v, &g| *v = beta2 * *v + (1.0 - beta2) * g * g);

        let eps = self.eps;
        let mut delta = Array1::zeros(n);
        for i in 0..n {
            let m_hat = self.exp_avg[i] / bias1;
            let v_hat = self.exp_avg_sq[i] / bias2;
            delta[i] = -lr * m_hat / (v_hat.sqrt() + eps);
        }
        Ok(delta)
    }

    fn reset(&mut self) {
        self.exp_avg = Array1::zeros(0);
        self.exp_avg_sq = Array1::zeros(0);
        self.t = 0;
    }

    fn name(&self) -> &'static str {
        "adam"
    }
}
