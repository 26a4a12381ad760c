//! # Update Rules (`optim`)
//!
//! First-order stochastic update algorithms. A rule maps the current
//! gradient to a parameter *delta*; it never touches the parameters itself.
//! The driving strategy applies `params += delta`, keeping the single-writer
//! discipline in one place.
//!
//! Rules own algorithm-specific accumulators (squared-gradient sums, moment
//! estimates). Accumulators are zero-initialized lazily on the first call,
//! sized to the observed parameter length, and persist for the lifetime of
//! the rule instance. Reusing an instance across training runs carries over
//! stale accumulators unless [`reset`](UpdateRule::reset) is called first.

use ndarray::Array1;

use crate::error::{OptError, OptResult};
use crate::Scalar;

// --- Submodules ---
pub mod adadelta;
pub mod adagrad;
pub mod adam;
pub mod adamax;
pub mod lr;
pub mod rmsprop;
pub mod sgd;

// Re-export the rule family
pub use adadelta::Adadelta;
pub use adagrad::Adagrad;
pub use adam::Adam;
pub use adamax::Adamax;
pub use lr::LearnRate;
pub use rmsprop::RmsProp;
pub use sgd::Sgd;

/// Base trait for all update rules.
///
/// Object-safe so a rule can be picked at runtime and boxed behind the
/// configuration layer.
pub trait UpdateRule {
    /// Compute the parameter delta for one step.
    ///
    /// `params` is read-only here; the caller applies the returned delta.
    /// Fails with `ShapeMismatch` if `grad` disagrees with the length the
    /// rule's state was established at (or with `params` on first use).
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>>;

    /// Clear all accumulators, returning the rule to its freshly-built
    /// state. Call between runs when reusing an instance.
    fn reset(&mut self);

    /// Algorithm name, for logs and config round-trips.
    fn name(&self) -> &'static str;
}

impl UpdateRule for Box<dyn UpdateRule> {
    fn delta(
        &mut self,
        params: &Array1<Scalar>,
        grad: &Array1<Scalar>,
        lr: Scalar,
    ) -> OptResult<Array1<Scalar>> {
        (**self).delta(params, grad, lr)
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Shared entry check for rule implementations: verify the gradient matches
/// the parameter vector, and lazily size a rule's accumulators on first use.
///
/// Returns the established length.
pub(crate) fn check_shapes(
    params: &Array1<Scalar>,
    grad: &Array1<Scalar>,
    established: Option<usize>,
) -> OptResult<usize> {
    let expected = established.unwrap_or_else(|| params.len());
    if grad.len() != expected {
        return Err(OptError::ShapeMismatch {
            expected,
            got: grad.len(),
        });
    }
    if params.len() != expected {
        return Err(OptError::ShapeMismatch {
            expected,
            got: params.len(),
        });
    }
    Ok(expected)
}

/// Lazily size an accumulator to `n`, zero-filled, logging the first
/// allocation. No-op once sized.
pub(crate) fn ensure_state(state: &mut Array1<Scalar>, n: usize, rule: &'static str) {
    if state.is_empty() && n > 0 {
        log::debug!("{}: sizing accumulators for {} parameters", rule, n);
        *state = Array1::zeros(n);
    }
}
