//! # Stochastic Gradient Descent

use ndarray::Array1;

use super::{check_shapes, ensure_state, UpdateRule};
use crate::error::OptResult;
use crate::Scalar;

/// Plain stochastic gradient descent, with optional classical momentum.
///
/// Without momentum the rule is stateless: `delta = -lr * g`. With
/// `momentum > 0` a velocity buffer is kept and
/// `v = momentum * v - lr * g; delta = v`.
pub struct Sgd {
    momentum: Scalar,
    velocity: Array1<Scalar>,
}

impl Sgd {
    pub fn new() -> Self {
        Sgd {
            momentum: 0.0,
            velocity: Array1::zeros(0),
        }
    }

    /// SGD with a classical momentum factor in `[0, 1)`.
    pub fn with_momentum(momentum: Scalar) -> Self {
        Sgd {
            momentum,
            velocity: Array1::zeros(0),
        }
    }
}

impl Default for Sgd {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateRule for Sgd {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        let established = if self.momentum != 0.0 && !self.velocity.is_empty() {
            Some(self.velocity.len())
        } else {
            None
        };
        let n = check_shapes(params, grad, established)?;

        if self.momentum == 0.0 {
            return Ok(grad.mapv(|g| -lr * g));
        }

        ensure_state(&mut self.velocity, n, "sgd");
        let momentum = self.momentum;
        self.velocity.zip_mut_with(grad, |v, &g| {
            *v = momentum * *v - lr * g;
        });
        Ok(self.velocity.clone())
    }

    fn reset(&mut self) {
        self.velocity = Array1::zeros(0);
    }

    fn name(&self) -> &'static str {
        "sgd"
    }
}
