//! # Training Loop Engine (`train`)
//!
//! Orchestrates one training run: pull the next observation batch from a
//! stream, ask the [`Objective`] for a gradient, drive the strategy hooks,
//! and stop when a strategy asks for it, the stream runs dry, or the
//! objective fails.
//!
//! The loop is single-threaded and cooperative. Each iteration runs to
//! completion; cancellation happens only between iterations via the
//! composite `finished` signal.

use ndarray::Array1;

use crate::error::{OptError, OptResult};
use crate::learn::Strategy;
use crate::Scalar;

/// The external collaborator that owns the parameter vector and knows how to
/// evaluate and differentiate itself over a batch of observations.
///
/// The engine consumes gradients; it never computes them.
pub trait Objective {
    /// One batch of observations, as produced by the data stream feeding the
    /// run (often a tuple of per-source sub-containers).
    type Batch;

    /// Read access to the flat parameter vector.
    fn params(&self) -> &Array1<Scalar>;

    /// Write access to the flat parameter vector. Only the update-driving
    /// strategy goes through this during a run.
    fn params_mut(&mut self) -> &mut Array1<Scalar>;

    /// Current loss value at the current parameters.
    fn value(&self) -> Scalar;

    /// Gradient of the loss over `batch` at the current parameters; must
    /// match the parameter vector's length.
    fn gradient(&mut self, batch: &Self::Batch) -> OptResult<Array1<Scalar>>;
}

/// Why a training run came to rest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A strategy signalled `finished`: convergence, an iteration cap, or a
    /// time limit.
    CriterionMet,
    /// A finite stream ran out of batches.
    StreamExhausted,
    /// The objective failed while computing a gradient. Partial progress up
    /// to the last successful iteration is retained, not rolled back.
    ObjectiveFailure(String),
}

/// Run the training loop to completion.
///
/// `stream` may be finite (an epoch-style walk, where exhaustion is a normal
/// terminal state) or infinite (a resampling stream, where only the strategy
/// can stop the run). The iteration counter is 1-based: hooks for the first
/// iteration see `iter == 1`.
///
/// Per iteration: `pre_hook`, gradient, `update_hook`, `post_hook`, then the
/// `finished` check. Objective failures terminate the run with a classified
/// [`StopReason`]; they are never retried here. Errors out of `update_hook`
/// (a gradient/parameter length disagreement) indicate a caller bug and
/// propagate as `Err`.
pub fn learn<O, S, I>(obj: &mut O, strategy: &mut S, stream: I) -> OptResult<StopReason>
where
    O: Objective,
    S: Strategy<O>,
    I: IntoIterator<Item = O::Batch>,
{
    let mut iter = 0usize;
    for batch in stream {
        iter += 1;

        strategy.pre_hook(obj, iter);

        let grad = match obj.gradient(&batch) {
            Ok(g) => g,
            Err(e) => {
                let detail = match e {
                    OptError::Objective(msg) => msg,
                    other => other.to_string(),
                };
                log::debug!("objective failed at iteration {}: {}", iter, detail);
                return Ok(StopReason::ObjectiveFailure(detail));
            }
        };

        strategy.update_hook(obj, iter, &grad)?;
        strategy.post_hook(obj, iter);

        if strategy.finished(obj, iter) {
            log::debug!("stop criterion met after {} iterations", iter);
            return Ok(StopReason::CriterionMet);
        }
    }

    log::debug!("stream exhausted after {} iterations", iter);
    Ok(StopReason::StreamExhausted)
}
