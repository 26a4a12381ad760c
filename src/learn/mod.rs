//! # Strategies and Learners (`learn`)
//!
//! A [`Strategy`] is a stateful unit with lifecycle hooks invoked by the
//! training loop each iteration. Concrete strategies cover the parameter
//! update itself ([`GradientDescent`]), stop policies ([`MaxIterations`],
//! [`TimeLimit`], [`ConvergenceCheck`]), and observers ([`ValueTracer`],
//! [`IterCallback`]).
//!
//! A [`Learner`] is itself a strategy holding an ordered list of child
//! strategies: every hook fans out in list order, and the composite wants to
//! stop as soon as any child does. Since a learner satisfies the trait, it
//! can be nested wherever a strategy is expected.

use ndarray::Array1;

use crate::error::OptResult;
use crate::train::Objective;
use crate::Scalar;

// --- Submodules ---
pub mod descent;
pub mod strategies;

pub use descent::GradientDescent;
pub use strategies::{
    ConvergenceCheck, IterCallback, MaxIterations, TimeLimit, ValueTrace, ValueTracer,
};

/// Lifecycle hooks for one training-loop iteration.
///
/// Every hook has a default no-op body so a concrete strategy overrides only
/// what it needs. Hooks run sequentially within an iteration, in the order
/// they are declared here; `iter` counts from 1 and is the iteration in
/// progress (for `finished`, the iteration just completed).
///
/// State is single-run: a strategy instance must not be shared across two
/// concurrently running loops.
pub trait Strategy<O: Objective> {
    /// Before the gradient is computed.
    fn pre_hook(&mut self, _obj: &mut O, _iter: usize) {}

    /// Perform or contribute to the parameter update. Only the update-driving
    /// strategy writes parameters; everything else keeps the default no-op.
    fn update_hook(
        &mut self,
        _obj: &mut O,
        _iter: usize,
        _grad: &Array1<Scalar>,
    ) -> OptResult<()> {
        Ok(())
    }

    /// After the update has been applied.
    fn post_hook(&mut self, _obj: &mut O, _iter: usize) {}

    /// Whether this strategy alone wants to stop training.
    fn finished(&mut self, _obj: &mut O, _iter: usize) -> bool {
        false
    }
}

/// Ordered composite of strategies, itself a [`Strategy`].
pub struct Learner<O: Objective + 'static> {
    children: Vec<Box<dyn Strategy<O>>>,
}

impl<O: Objective + 'static> Learner<O> {
    pub fn new() -> Self {
        Learner {
            children: Vec::new(),
        }
    }

    /// Builder-style append; dispatch order is append order.
    pub fn with(mut self, strategy: impl Strategy<O> + 'static) -> Self {
        self.children.push(Box::new(strategy));
        self
    }

    pub fn push(&mut self, strategy: impl Strategy<O> + 'static) {
        self.children.push(Box::new(strategy));
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl<O: Objective + 'static> Default for Learner<O> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: Objective + 'static> Strategy<O> for Learner<O> {
    fn pre_hook(&mut self, obj: &mut O, iter: usize) {
        for child in &mut self.children {
            child.pre_hook(obj, iter);
        }
    }

    fn update_hook(&mut self, obj: &mut O, iter: usize, grad: &Array1<Scalar>) -> OptResult<()> {
        for child in &mut self.children {
            child.update_hook(obj, iter, grad)?;
        }
        Ok(())
    }

    fn post_hook(&mut self, obj: &mut O, iter: usize) {
        for child in &mut self.children {
            child.post_hook(obj, iter);
        }
    }

    fn finished(&mut self, obj: &mut O, iter: usize) -> bool {
        // Every child's hook runs even after one says stop, so stateful
        // limiters observe every iteration.
        let mut stop = false;
        for child in &mut self.children {
            stop |= child.finished(obj, iter);
        }
        stop
    }
}
