//! The update-driving strategy.

use ndarray::Array1;

use crate::error::OptResult;
use crate::learn::Strategy;
use crate::optim::{LearnRate, UpdateRule};
use crate::train::Objective;
use crate::Scalar;

/// Couples an [`UpdateRule`] with a [`LearnRate`] policy and applies the
/// resulting delta to the objective's parameters.
///
/// This is the single parameter writer in a training run: the rule returns a
/// delta, and this strategy performs `params += delta` in its `update_hook`.
pub struct GradientDescent<R: UpdateRule> {
    rule: R,
    lr: LearnRate,
}

impl<R: UpdateRule> GradientDescent<R> {
    pub fn new(rule: R, lr: impl Into<LearnRate>) -> Self {
        GradientDescent {
            rule,
            lr: lr.into(),
        }
    }

    pub fn rule(&self) -> &R {
        &self.rule
    }

    /// Clear the rule's accumulators for a fresh run.
    pub fn reset(&mut self) {
        self.rule.reset();
    }
}

impl<O: Objective, R: UpdateRule> Strategy<O> for GradientDescent<R> {
    fn update_hook(&mut self, obj: &mut O, iter: usize, grad: &Array1<Scalar>) -> OptResult<()> {
        let step = self.lr.at(iter);
        let delta = self.rule.delta(obj.params(), grad, step)?;
        log::trace!(
            "iter {}: {} step at lr {:e}",
            iter,
            self.rule.name(),
            step
        );
        *obj.params_mut() += &delta;
        Ok(())
    }
}
